//! Chess piece representation.
//!
//! A square holds either nothing or a [`Piece`], which pairs a [`Color`] with
//! a [`PieceKind`]. Pieces have a compact 2-character code (`"wp"`, `"bN"`),
//! and empty squares use the [`EMPTY_CODE`] sentinel.

use crate::Color;
use std::fmt;
use thiserror::Error;

/// Code written for an empty square.
pub const EMPTY_CODE: &str = "--";

/// Errors that can occur when parsing piece codes.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PieceCodeError {
    #[error("invalid piece code '{0}': expected 2 characters")]
    InvalidLength(String),

    #[error("invalid color letter '{0}'")]
    InvalidColor(char),

    #[error("invalid piece letter '{0}'")]
    InvalidKind(char),
}

/// The six kinds of chess pieces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PieceKind {
    Pawn = 0,
    Knight = 1,
    Bishop = 2,
    Rook = 3,
    Queen = 4,
    King = 5,
}

impl PieceKind {
    /// All piece kinds in order.
    pub const ALL: [PieceKind; 6] = [
        PieceKind::Pawn,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
        PieceKind::King,
    ];

    /// Returns the index of this piece kind (0-5).
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Returns the letter used in piece codes.
    ///
    /// Pawns use a lowercase `p`, every other kind an uppercase letter.
    pub const fn letter(self) -> char {
        match self {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'N',
            PieceKind::Bishop => 'B',
            PieceKind::Rook => 'R',
            PieceKind::Queen => 'Q',
            PieceKind::King => 'K',
        }
    }

    /// Parses a piece-code letter.
    pub const fn from_letter(c: char) -> Option<Self> {
        match c {
            'p' => Some(PieceKind::Pawn),
            'N' => Some(PieceKind::Knight),
            'B' => Some(PieceKind::Bishop),
            'R' => Some(PieceKind::Rook),
            'Q' => Some(PieceKind::Queen),
            'K' => Some(PieceKind::King),
            _ => None,
        }
    }

    /// Returns the lowercase FEN letter for this kind.
    pub const fn fen_char(self) -> char {
        match self {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        }
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PieceKind::Pawn => "Pawn",
            PieceKind::Knight => "Knight",
            PieceKind::Bishop => "Bishop",
            PieceKind::Rook => "Rook",
            PieceKind::Queen => "Queen",
            PieceKind::King => "King",
        };
        write!(f, "{}", name)
    }
}

/// A colored piece standing on a square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub color: Color,
    pub kind: PieceKind,
}

impl Piece {
    /// Creates a piece.
    #[inline]
    pub const fn new(color: Color, kind: PieceKind) -> Self {
        Piece { color, kind }
    }

    /// Returns the 2-character piece code (e.g., "wp", "bK").
    pub fn code(self) -> String {
        let mut code = String::with_capacity(2);
        code.push(self.color.letter());
        code.push(self.kind.letter());
        code
    }

    /// Parses a 2-character piece code.
    pub fn from_code(code: &str) -> Result<Self, PieceCodeError> {
        let mut chars = code.chars();
        let (Some(c), Some(k), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(PieceCodeError::InvalidLength(code.to_string()));
        };
        let color = Color::from_letter(c).ok_or(PieceCodeError::InvalidColor(c))?;
        let kind = PieceKind::from_letter(k).ok_or(PieceCodeError::InvalidKind(k))?;
        Ok(Piece::new(color, kind))
    }

    /// Returns the FEN character: uppercase for white, lowercase for black.
    pub const fn to_fen_char(self) -> char {
        let c = self.kind.fen_char();
        match self.color {
            Color::White => c.to_ascii_uppercase(),
            Color::Black => c,
        }
    }

    /// Parses a FEN character into a piece.
    pub const fn from_fen_char(c: char) -> Option<Self> {
        let color = if c.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        let kind = match c.to_ascii_lowercase() {
            'p' => PieceKind::Pawn,
            'n' => PieceKind::Knight,
            'b' => PieceKind::Bishop,
            'r' => PieceKind::Rook,
            'q' => PieceKind::Queen,
            'k' => PieceKind::King,
            _ => return None,
        };
        Some(Piece::new(color, kind))
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.color.letter(), self.kind.letter())
    }
}

/// Returns the code of a square's content, [`EMPTY_CODE`] when empty.
pub fn square_code(content: Option<Piece>) -> String {
    match content {
        Some(piece) => piece.code(),
        None => EMPTY_CODE.to_string(),
    }
}

/// Parses a square's content from its code.
pub fn parse_square_code(code: &str) -> Result<Option<Piece>, PieceCodeError> {
    if code == EMPTY_CODE {
        return Ok(None);
    }
    Piece::from_code(code).map(Some)
}
