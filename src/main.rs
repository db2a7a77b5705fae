use anyhow::Result;
use tracing::info;
use zugzwang_core::{divide, Board};

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    info!("zugzwang starting");

    let board = Board::starting_position();
    for (mv, count) in divide(&board, 2) {
        println!("{mv}: {count}");
    }

    Ok(())
}
