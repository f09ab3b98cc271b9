//! Board square representation.

use std::fmt;

/// Number of rows on the board.
pub const ROWS: u8 = 8;

/// Number of columns on the board.
pub const COLS: u8 = 8;

/// A square on the chess board, addressed by row and column.
///
/// Row 0 is the visual top of the board (black's back rank, rank 8) and
/// row 7 is white's back rank. Column 0 is the a-file.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square {
    row: u8,
    col: u8,
}

impl Square {
    /// Creates a square, returning `None` when the coordinates are off the board.
    #[inline]
    pub const fn new(row: u8, col: u8) -> Option<Self> {
        if row < ROWS && col < COLS {
            Some(Square { row, col })
        } else {
            None
        }
    }

    /// Creates a square from index (0-63, row-major from the top-left corner).
    #[inline]
    pub const fn from_index(index: u8) -> Option<Self> {
        if index < ROWS * COLS {
            Some(Square {
                row: index / COLS,
                col: index % COLS,
            })
        } else {
            None
        }
    }

    /// Returns the row (0-7).
    #[inline]
    pub const fn row(self) -> u8 {
        self.row
    }

    /// Returns the column (0-7).
    #[inline]
    pub const fn col(self) -> u8 {
        self.col
    }

    /// Returns the row-major index (0-63).
    #[inline]
    pub const fn index(self) -> u8 {
        self.row * COLS + self.col
    }

    /// Returns the square displaced by the given row and column steps,
    /// or `None` if that falls off the board.
    #[inline]
    pub const fn offset(self, d_row: i8, d_col: i8) -> Option<Self> {
        let row = self.row as i8 + d_row;
        let col = self.col as i8 + d_col;
        if row < 0 || col < 0 {
            return None;
        }
        Square::new(row as u8, col as u8)
    }

    /// Parses a square from algebraic notation (e.g., "e4").
    pub const fn from_algebraic(s: &str) -> Option<Self> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return None;
        }
        let file = bytes[0].to_ascii_lowercase();
        let rank = bytes[1];
        if file < b'a' || file > b'h' || rank < b'1' || rank > b'8' {
            return None;
        }
        Square::new(b'8' - rank, file - b'a')
    }

    /// Returns the algebraic notation for this square.
    pub fn to_algebraic(self) -> String {
        let file = (b'a' + self.col) as char;
        let rank = (b'8' - self.row) as char;
        format!("{}{}", file, rank)
    }

    /// Iterates over all 64 squares in row-major order.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..ROWS * COLS).filter_map(Square::from_index)
    }
}

impl fmt::Debug for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Square({}, {})", self.row, self.col)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_algebraic())
    }
}
