//! Movement templates and attack detection.
//!
//! Every piece moves by one of two patterns: *stepping* to a fixed set of
//! offsets, or *sliding* along a set of directions until blocked. The
//! closed template table below replaces per-kind special casing; promoted
//! Silver/Knight/Lance/Pawn borrow the Gold template, promoted Rook/Bishop
//! add the complementary king steps to their slides.

use crate::{Color, Piece, PieceType, Position, Square};

impl Piece {
    /// Returns the fixed one-step offsets of this piece, as (file, rank)
    /// deltas. Forward is toward smaller ranks for black.
    pub(crate) fn step_offsets(self) -> Vec<(i8, i8)> {
        let f: i8 = if self.color == Color::Black { -1 } else { 1 };

        if self.promoted {
            return match self.piece_type {
                // Promoted minor pieces all move as a gold.
                PieceType::Silver | PieceType::Knight | PieceType::Lance | PieceType::Pawn => {
                    gold_steps(f)
                }
                // Dragon adds the diagonal king steps to the rook slides.
                PieceType::Rook => vec![(-1, -1), (1, -1), (-1, 1), (1, 1)],
                // Horse adds the orthogonal king steps to the bishop slides.
                PieceType::Bishop => vec![(0, -1), (0, 1), (-1, 0), (1, 0)],
                _ => Vec::new(),
            };
        }

        match self.piece_type {
            PieceType::King => vec![
                (-1, -1),
                (0, -1),
                (1, -1),
                (-1, 0),
                (1, 0),
                (-1, 1),
                (0, 1),
                (1, 1),
            ],
            PieceType::Gold => gold_steps(f),
            PieceType::Silver => vec![(-1, f), (0, f), (1, f), (-1, -f), (1, -f)],
            PieceType::Knight => vec![(-1, 2 * f), (1, 2 * f)],
            PieceType::Pawn => vec![(0, f)],
            _ => Vec::new(),
        }
    }

    /// Returns the sliding directions of this piece.
    pub(crate) fn slide_directions(self) -> Vec<(i8, i8)> {
        let f: i8 = if self.color == Color::Black { -1 } else { 1 };

        match self.piece_type {
            PieceType::Rook => vec![(0, -1), (0, 1), (-1, 0), (1, 0)],
            PieceType::Bishop => vec![(-1, -1), (1, -1), (-1, 1), (1, 1)],
            PieceType::Lance if !self.promoted => vec![(0, f)],
            _ => Vec::new(),
        }
    }
}

fn gold_steps(f: i8) -> Vec<(i8, i8)> {
    vec![(-1, f), (0, f), (1, f), (-1, 0), (1, 0), (0, -f)]
}

/////////////////////////////////////////////////////////////////////////////
// Attack queries
/////////////////////////////////////////////////////////////////////////////

impl Position {
    /// Returns true when the given piece standing on `from` attacks `to`,
    /// honoring slide blocking by any piece in between.
    fn reaches(&self, from: Square, piece: Piece, to: Square) -> bool {
        for (df, dr) in piece.step_offsets() {
            if from.shift(df, dr) == Some(to) {
                return true;
            }
        }

        for (df, dr) in piece.slide_directions() {
            let mut current = from;
            while let Some(next) = current.shift(df, dr) {
                if next == to {
                    return true;
                }
                if self.piece_at(next).is_some() {
                    break;
                }
                current = next;
            }
        }

        false
    }

    /// Returns the squares of all pieces of the given color whose
    /// pseudo-legal movement reaches the given square.
    ///
    /// # Examples
    ///
    /// ```
    /// use shogiban::{Color, Position};
    /// use shogiban::square::consts::*;
    ///
    /// let mut pos = Position::new();
    /// pos.set_sfen("9/3r5/9/9/6B2/9/9/9/3K5 b P 1").unwrap();
    ///
    /// // The white rook on 6b pins down the black king's file.
    /// assert_eq!(vec![SQ_6B], pos.attackers(SQ_6I, Color::White));
    /// ```
    pub fn attackers(&self, sq: Square, c: Color) -> Vec<Square> {
        Square::iter()
            .filter(|&from| {
                self.piece_at(from)
                    .is_some_and(|pc| pc.color == c && self.reaches(from, pc, sq))
            })
            .collect()
    }

    /// Checks if the given square is attacked by any piece of the
    /// specified color.
    pub fn is_attacked_by(&self, sq: Square, c: Color) -> bool {
        Square::iter().any(|from| {
            self.piece_at(from)
                .is_some_and(|pc| pc.color == c && self.reaches(from, pc, sq))
        })
    }

    /// Returns the squares of the enemy pieces currently attacking the
    /// king of the given color. Empty when there is no king on the board.
    pub fn checkers(&self, c: Color) -> Vec<Square> {
        match self.find_king(c) {
            Some(king_sq) => self.attackers(king_sq, c.flip()),
            None => Vec::new(),
        }
    }

    /// Returns the number of enemy pieces attacking the given side's king:
    /// 0 for no check, 1 for a check, 2 for a double check.
    pub fn attacker_count(&self, c: Color) -> usize {
        self.checkers(c).len()
    }

    /// Checks if the king with the given color is in check.
    pub fn in_check(&self, c: Color) -> bool {
        match self.find_king(c) {
            Some(king_sq) => self.is_attacked_by(king_sq, c.flip()),
            None => false,
        }
    }
}
