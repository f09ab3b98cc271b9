//! Chess position representation.

use chess_core::{square_code, Color, FenBoard, FenError, Move, Piece, PieceKind, Square};
use std::fmt;

/// The 8x8 grid of square contents, indexed `[row][col]`.
pub type Grid = [[Option<Piece>; 8]; 8];

const BACK_ROW: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// Board state: square contents, side to move, and the undo log.
///
/// Row 0 is black's back rank. The position owns its grid outright; callers
/// that need a second copy clone it explicitly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    board: Grid,
    side_to_move: Color,
    /// Applied moves, most recent last. Only `apply` pushes and `undo` pops.
    log: Vec<Move>,
}

impl Position {
    /// Creates an empty board with white to move.
    pub fn empty() -> Self {
        Position {
            board: [[None; 8]; 8],
            side_to_move: Color::White,
            log: Vec::new(),
        }
    }

    /// Creates the standard starting position.
    pub fn startpos() -> Self {
        let mut position = Self::empty();
        for (col, kind) in BACK_ROW.into_iter().enumerate() {
            position.board[0][col] = Some(Piece::new(Color::Black, kind));
            position.board[1][col] = Some(Piece::new(Color::Black, PieceKind::Pawn));
            position.board[6][col] = Some(Piece::new(Color::White, PieceKind::Pawn));
            position.board[7][col] = Some(Piece::new(Color::White, kind));
        }
        position
    }

    /// Creates a position from a FEN string.
    ///
    /// Only the piece placement and side to move are read.
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        let FenBoard { grid, side_to_move } = FenBoard::parse(fen)?;
        Ok(Self {
            board: grid,
            side_to_move,
            ..Self::empty()
        })
    }

    /// Serializes the position to FEN.
    ///
    /// The castling, en passant, halfmove and fullmove fields are always
    /// `- - 0 1`.
    pub fn to_fen(&self) -> String {
        let mut fen = String::new();

        for (row, squares) in self.board.iter().enumerate() {
            let mut empty_count = 0;
            for square in squares {
                match square {
                    Some(piece) => {
                        if empty_count > 0 {
                            fen.push_str(&empty_count.to_string());
                            empty_count = 0;
                        }
                        fen.push(piece.to_fen_char());
                    }
                    None => empty_count += 1,
                }
            }
            if empty_count > 0 {
                fen.push_str(&empty_count.to_string());
            }
            if row < 7 {
                fen.push('/');
            }
        }

        fen.push(' ');
        fen.push(self.side_to_move.letter());
        fen.push_str(" - - 0 1");

        fen
    }

    /// Returns the content of the given square.
    #[inline]
    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.board[sq.row() as usize][sq.col() as usize]
    }

    /// Overwrites a square. Intended for setting up positions; it bypasses
    /// the undo log.
    #[inline]
    pub fn set_piece(&mut self, sq: Square, content: Option<Piece>) {
        self.board[sq.row() as usize][sq.col() as usize] = content;
    }

    /// Returns the grid of square contents.
    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.board
    }

    /// Returns the side to move.
    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    /// Returns true if white is to move.
    #[inline]
    pub fn white_to_move(&self) -> bool {
        self.side_to_move == Color::White
    }

    /// Sets the side to move.
    #[inline]
    pub fn set_side_to_move(&mut self, color: Color) {
        self.side_to_move = color;
    }

    /// Returns the applied moves, oldest first.
    #[inline]
    pub fn move_log(&self) -> &[Move] {
        &self.log
    }

    /// Builds a move between two squares with snapshots of their current
    /// contents.
    pub fn candidate_move(&self, start: Square, end: Square) -> Move {
        Move::new(start, end, self.piece_at(start), self.piece_at(end))
    }

    /// Applies a move.
    ///
    /// The moving piece replaces whatever stood on the end square, which is
    /// how captures happen. The log records what was actually moved and
    /// overwritten so `undo` restores the exact prior state. Does nothing if
    /// the start square is empty. No legality check is made here.
    pub fn apply(&mut self, m: &Move) {
        let Some(occupant) = self.piece_at(m.start()) else {
            return;
        };
        let moved = m.moved().unwrap_or(occupant);
        let captured = self.piece_at(m.end());

        self.set_piece(m.start(), None);
        self.set_piece(m.end(), Some(moved));
        self.log
            .push(Move::new(m.start(), m.end(), Some(occupant), captured));
        self.side_to_move = self.side_to_move.opposite();
    }

    /// Takes back the most recent move, returning it. Does nothing if no
    /// move has been applied.
    pub fn undo(&mut self) -> Option<Move> {
        let m = self.log.pop()?;
        self.set_piece(m.end(), m.captured());
        self.set_piece(m.start(), m.moved());
        self.side_to_move = self.side_to_move.opposite();
        Some(m)
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::startpos()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for squares in &self.board {
            let codes: Vec<String> = squares.iter().map(|sq| square_code(*sq)).collect();
            writeln!(f, "{}", codes.join(" "))?;
        }
        write!(f, "{} to move", self.side_to_move)
    }
}
