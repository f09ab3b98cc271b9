//! Pseudo-legal move generation.
//!
//! Every piece of the side to move is routed by kind to one generation rule.
//! Moves are not checked against the mover's own king: a move that leaves it
//! capturable is still produced. Castling, en passant and promotion do not
//! exist here.

mod offsets;
pub mod perft;

use crate::Position;
use chess_core::{Color, Move, Piece, PieceKind, Square};

pub use offsets::{
    BISHOP_DIRECTIONS, KING_OFFSETS, KNIGHT_OFFSETS, PAWN_CAPTURE_COLS, ROOK_DIRECTIONS,
};

/// Moves produced for one position, in generation order.
///
/// Any placement is accepted, so the count has no useful bound: a board
/// crowded with queens passes 256 pseudo-legal moves.
#[derive(Clone, Default)]
pub struct MoveList {
    moves: Vec<Move>,
}

impl MoveList {
    pub fn new() -> Self {
        Self {
            moves: Vec::with_capacity(64),
        }
    }

    #[inline]
    pub fn push(&mut self, m: Move) {
        self.moves.push(m);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    #[inline]
    pub fn as_slice(&self) -> &[Move] {
        &self.moves
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Move> {
        self.moves.iter()
    }

    /// Compares coordinates only, like `Move` equality.
    pub fn contains(&self, m: &Move) -> bool {
        self.moves.contains(m)
    }

    /// The generated move from `start` to `end`, carrying its snapshots.
    pub fn find(&self, start: Square, end: Square) -> Option<Move> {
        self.iter()
            .find(|m| m.start() == start && m.end() == end)
            .copied()
    }
}

impl std::ops::Index<usize> for MoveList {
    type Output = Move;

    fn index(&self, index: usize) -> &Move {
        &self.as_slice()[index]
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl std::fmt::Debug for MoveList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/// Generates all pseudo-legal moves for the side to move.
///
/// The board is scanned row by row from the top, columns ascending.
pub fn generate_moves(position: &Position) -> MoveList {
    let mut moves = MoveList::new();
    let us = position.side_to_move();

    for from in Square::all() {
        if let Some(piece) = position.piece_at(from) {
            if piece.color == us {
                generate_piece_moves(position, from, piece, &mut moves);
            }
        }
    }

    moves
}

/// Generates the pseudo-legal moves of the piece on one square.
///
/// Returns an empty list for an empty square. The piece's color is used as
/// given, regardless of whose turn it is.
pub fn moves_from(position: &Position, from: Square) -> MoveList {
    let mut moves = MoveList::new();
    if let Some(piece) = position.piece_at(from) {
        generate_piece_moves(position, from, piece, &mut moves);
    }
    moves
}

fn generate_piece_moves(position: &Position, from: Square, piece: Piece, moves: &mut MoveList) {
    match piece.kind {
        PieceKind::Pawn => generate_pawn_moves(position, from, piece, moves),
        PieceKind::Knight => generate_step_moves(position, from, piece, &KNIGHT_OFFSETS, moves),
        PieceKind::Bishop => generate_ray_moves(position, from, piece, &BISHOP_DIRECTIONS, moves),
        PieceKind::Rook => generate_ray_moves(position, from, piece, &ROOK_DIRECTIONS, moves),
        PieceKind::Queen => {
            generate_ray_moves(position, from, piece, &ROOK_DIRECTIONS, moves);
            generate_ray_moves(position, from, piece, &BISHOP_DIRECTIONS, moves);
        }
        PieceKind::King => generate_step_moves(position, from, piece, &KING_OFFSETS, moves),
    }
}

/// Pawn advances and diagonal captures.
///
/// The double advance needs both squares ahead to be empty. A pawn that
/// reaches the far row stays a pawn.
fn generate_pawn_moves(position: &Position, from: Square, pawn: Piece, moves: &mut MoveList) {
    let dir = pawn.color.pawn_direction();

    if let Some(one) = from.offset(dir, 0) {
        if position.piece_at(one).is_none() {
            moves.push(Move::new(from, one, Some(pawn), None));

            if from.row() == pawn.color.pawn_start_row() {
                if let Some(two) = from.offset(2 * dir, 0) {
                    if position.piece_at(two).is_none() {
                        moves.push(Move::new(from, two, Some(pawn), None));
                    }
                }
            }
        }
    }

    for d_col in PAWN_CAPTURE_COLS {
        if let Some(to) = from.offset(dir, d_col) {
            if let Some(target) = position.piece_at(to) {
                if target.color != pawn.color {
                    moves.push(Move::new(from, to, Some(pawn), Some(target)));
                }
            }
        }
    }
}

/// Single-step pieces (knight, king): every on-board offset not holding a
/// piece of the mover's color.
fn generate_step_moves(
    position: &Position,
    from: Square,
    piece: Piece,
    offsets: &[(i8, i8)],
    moves: &mut MoveList,
) {
    for &(d_row, d_col) in offsets {
        let Some(to) = from.offset(d_row, d_col) else {
            continue;
        };
        let target = position.piece_at(to);
        if !is_own(target, piece.color) {
            moves.push(Move::new(from, to, Some(piece), target));
        }
    }
}

/// Sliding pieces: walk each ray until the board edge or the first occupied
/// square, which is included only when it holds an opposing piece.
fn generate_ray_moves(
    position: &Position,
    from: Square,
    piece: Piece,
    directions: &[(i8, i8)],
    moves: &mut MoveList,
) {
    for &(d_row, d_col) in directions {
        let mut cursor = from;
        while let Some(to) = cursor.offset(d_row, d_col) {
            match position.piece_at(to) {
                None => moves.push(Move::new(from, to, Some(piece), None)),
                Some(target) => {
                    if target.color != piece.color {
                        moves.push(Move::new(from, to, Some(piece), Some(target)));
                    }
                    break;
                }
            }
            cursor = to;
        }
    }
}

#[inline]
fn is_own(target: Option<Piece>, color: Color) -> bool {
    matches!(target, Some(p) if p.color == color)
}
