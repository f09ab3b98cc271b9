//! Reading board grids out of FEN.
//!
//! Only the first two fields carry information the board tracks. Castling,
//! en passant and the two clocks may follow, but they are skipped.

use crate::{Color, Piece, COLS, ROWS};
use thiserror::Error;

const WIDTH: usize = COLS as usize;
const HEIGHT: usize = ROWS as usize;

/// The initial position as the board writes it.
pub const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w - - 0 1";

const MAX_FIELDS: usize = 6;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FenError {
    #[error("FEN needs a placement and a side to move")]
    MissingSideToMove,

    #[error("FEN has {0} fields, at most 6 are allowed")]
    TooManyFields(usize),

    #[error("placement has {0} rows, expected 8")]
    RowCount(usize),

    #[error("row {row}: unexpected '{found}'")]
    BadSymbol { row: usize, found: char },

    #[error("row {row} covers {width} columns, expected 8")]
    RowWidth { row: usize, width: usize },

    #[error("side to move must be 'w' or 'b', got '{0}'")]
    BadSideToMove(String),
}

/// The grid and side to move decoded from a FEN string.
///
/// `grid[0]` is the eighth rank, matching the board's row numbering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FenBoard {
    pub grid: [[Option<Piece>; WIDTH]; HEIGHT],
    pub side_to_move: Color,
}

impl FenBoard {
    pub fn parse(fen: &str) -> Result<Self, FenError> {
        let fields: Vec<&str> = fen.split_whitespace().collect();
        if fields.len() > MAX_FIELDS {
            return Err(FenError::TooManyFields(fields.len()));
        }
        let (placement, side) = match fields.as_slice() {
            [placement, side, ..] => (*placement, *side),
            _ => return Err(FenError::MissingSideToMove),
        };

        Ok(Self {
            grid: read_grid(placement)?,
            side_to_move: read_side(side)?,
        })
    }
}

fn read_grid(placement: &str) -> Result<[[Option<Piece>; WIDTH]; HEIGHT], FenError> {
    let rows: Vec<&str> = placement.split('/').collect();
    if rows.len() != HEIGHT {
        return Err(FenError::RowCount(rows.len()));
    }

    let mut grid = [[None; WIDTH]; HEIGHT];
    for (row, text) in rows.into_iter().enumerate() {
        let mut col = 0usize;
        for symbol in text.chars() {
            match symbol {
                '1'..='8' => col += symbol as usize - '0' as usize,
                _ => {
                    let piece = Piece::from_fen_char(symbol)
                        .ok_or(FenError::BadSymbol { row, found: symbol })?;
                    if col < WIDTH {
                        grid[row][col] = Some(piece);
                    }
                    col += 1;
                }
            }
        }
        if col != WIDTH {
            return Err(FenError::RowWidth { row, width: col });
        }
    }
    Ok(grid)
}

fn read_side(field: &str) -> Result<Color, FenError> {
    let mut chars = field.chars();
    match (chars.next().and_then(Color::from_letter), chars.next()) {
        (Some(color), None) => Ok(color),
        _ => Err(FenError::BadSideToMove(field.to_string())),
    }
}
