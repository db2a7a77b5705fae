//! The reversible game wrapper: a [`Board`] plus the history needed to undo moves
//! exactly, and the terminal-state query built on top of the move generator.

use crate::board::Board;
use crate::castle_rights::CastleRights;
use crate::chess_move::Move;
use crate::color::Color;
use crate::error::IllegalMoveError;
use crate::movegen::{generate_legal_moves, MoveList};
use crate::piece::Piece;
use crate::square::Square;

/// One entry of applied-move history: the move that was played and a full snapshot
/// of the board immediately before it. Restoring a snapshot by value restores piece
/// placement, side to move, castling rights, and the en-passant target all at once,
/// so undo needs no separate per-field reconstruction logic.
#[derive(Debug, Clone, Copy)]
struct HistoryEntry {
    mv: Move,
    before: Board,
}

/// The outcome of a position, as classified by [`Game::game_result`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameResult {
    /// The game has not ended.
    Ongoing,
    /// White has checkmated Black.
    WhiteWins,
    /// Black has checkmated White.
    BlackWins,
    /// The side to move has no legal moves and is not in check.
    Draw,
}

/// A chess game: the current position plus enough history to reverse every move
/// played so far.
///
/// Terminal status is not cached on `Game` — [`Game::game_result`] recomputes it
/// from scratch on every call by asking the move generator. This keeps the
/// generator itself a pure function of [`Board`] and avoids a flag that is only
/// valid "immediately after" some other call.
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    move_log: Vec<HistoryEntry>,
    castle_rights_log: Vec<CastleRights>,
}

impl Game {
    /// Start a new game from the standard initial position.
    pub fn new() -> Game {
        let board = Board::starting_position();
        Game {
            castle_rights_log: vec![board.castling()],
            board,
            move_log: Vec::new(),
        }
    }

    /// Start a game from an arbitrary position.
    pub fn from_board(board: Board) -> Game {
        Game {
            castle_rights_log: vec![board.castling()],
            board,
            move_log: Vec::new(),
        }
    }

    /// Return the current position.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Return the side to move.
    pub fn side_to_move(&self) -> Color {
        self.board.side_to_move()
    }

    /// Return the legal moves from the current position.
    pub fn generate_legal_moves(&self) -> MoveList {
        generate_legal_moves(&self.board)
    }

    /// Return the contents of the square at `(row, col)`, in the boundary coordinate
    /// system: `row = 0` is Black's home rank (rank 8), `row = 7` is White's home rank
    /// (rank 1); `col = 0` is file a. So `a1 = (7, 0)`, `h8 = (0, 7)`.
    ///
    /// # Panics
    ///
    /// Debug-asserts `row < 8 && col < 8`.
    pub fn piece_at(&self, row: u8, col: u8) -> Option<Piece> {
        debug_assert!(row < 8 && col < 8);
        let sq = square_from_row_col(row, col);
        self.board.colored_piece_on(sq)
    }

    /// Return the `(row, col)` of the king for the given color, in the boundary
    /// coordinate system described in [`Game::piece_at`].
    pub fn king_square(&self, color: Color) -> (u8, u8) {
        row_col_from_square(self.board.king_square(color))
    }

    /// Apply `mv` if it is a legal move from the current position.
    ///
    /// On rejection the game is left completely unmodified — no partial
    /// application, no corrupted invariants.
    pub fn make_move(&mut self, mv: Move) -> Result<(), IllegalMoveError> {
        let legal = self.generate_legal_moves();
        if !legal.as_slice().iter().any(|&legal_mv| legal_mv == mv) {
            tracing::warn!(attempted = %mv, "rejected illegal move");
            return Err(IllegalMoveError { attempted: mv });
        }

        if mv.is_castle() {
            tracing::debug!(%mv, "castling");
        } else if mv.is_en_passant() {
            tracing::debug!(%mv, "en passant capture");
        } else if mv.is_promotion() {
            tracing::debug!(%mv, "pawn promotion");
        }

        self.move_log.push(HistoryEntry {
            mv,
            before: self.board,
        });
        self.board = self.board.make_move(mv);
        self.castle_rights_log.push(self.board.castling());

        Ok(())
    }

    /// Undo the most recently applied move. A no-op, not an error, if no move has
    /// been applied yet.
    pub fn undo_move(&mut self) {
        if let Some(entry) = self.move_log.pop() {
            self.board = entry.before;
            self.castle_rights_log.pop();
        }
    }

    /// Classify the current position. Recomputed fresh on every call — no caching.
    pub fn game_result(&self) -> GameResult {
        let in_check = self
            .board
            .is_square_attacked(self.board.king_square(self.side_to_move()), self.side_to_move().flip());
        let has_moves = !self.generate_legal_moves().is_empty();

        match (has_moves, in_check) {
            (true, _) => GameResult::Ongoing,
            (false, false) => GameResult::Draw,
            (false, true) => match self.side_to_move() {
                Color::White => GameResult::BlackWins,
                Color::Black => GameResult::WhiteWins,
            },
        }
    }

    /// Return `true` if the side to move is checkmated. Derived from
    /// [`Game::game_result`], not cached.
    pub fn is_checkmate(&self) -> bool {
        matches!(self.game_result(), GameResult::WhiteWins | GameResult::BlackWins)
    }

    /// Return `true` if the position is a stalemate. Derived from
    /// [`Game::game_result`], not cached.
    pub fn is_stalemate(&self) -> bool {
        self.game_result() == GameResult::Draw
    }

    /// Number of moves applied so far (and hence available to [`Game::undo_move`]).
    pub fn ply_count(&self) -> usize {
        self.move_log.len()
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

fn square_from_row_col(row: u8, col: u8) -> Square {
    let rank_index = 7 - row;
    let index = rank_index * 8 + col;
    Square::from_index(index).expect("row/col in 0..8 always yields a valid square")
}

fn row_col_from_square(sq: Square) -> (u8, u8) {
    let rank_index = sq.rank().index() as u8;
    (7 - rank_index, sq.file().index() as u8)
}
