//! A piece on the board: kind, owner and promotion state.

use crate::{Color, PieceType, Square};
use std::fmt;

/// Represents a piece: its kind, its owner and whether it has promoted.
///
/// Promotion is a property of the instance, not a separate kind. A
/// promoted piece reverts to its unpromoted kind when captured.
///
/// # Examples
///
/// ```
/// use shogiban::{Color, Piece, PieceType};
///
/// let pc = Piece {
///     piece_type: PieceType::Pawn,
///     color: Color::Black,
///     promoted: false,
/// };
/// assert_eq!("P", pc.to_string());
///
/// let promoted = pc.promote().unwrap();
/// assert_eq!("+P", promoted.to_string());
/// assert_eq!(Some(pc), promoted.unpromote());
/// ```
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Piece {
    pub piece_type: PieceType,
    pub color: Color,
    pub promoted: bool,
}

impl Piece {
    /// Creates a new unpromoted piece of the given kind and color.
    pub fn new(piece_type: PieceType, color: Color) -> Piece {
        Piece {
            piece_type,
            color,
            promoted: false,
        }
    }

    /// Creates a new instance of `Piece` from a SFEN piece letter.
    ///
    /// Uppercase letters are black pieces, lowercase white. The `+` prefix
    /// of a promoted piece is handled by the position codec, not here.
    pub fn from_sfen(c: char) -> Option<Piece> {
        let color = if c.is_ascii_uppercase() {
            Color::Black
        } else {
            Color::White
        };

        PieceType::from_sfen(c.to_ascii_lowercase()).map(|piece_type| Piece {
            piece_type,
            color,
            promoted: false,
        })
    }

    /// Returns a new promoted instance, or `None` when this piece cannot
    /// promote (kings, golds, pieces already promoted).
    pub fn promote(self) -> Option<Piece> {
        if self.promoted || !self.piece_type.can_promote() {
            return None;
        }

        Some(Piece {
            promoted: true,
            ..self
        })
    }

    /// Returns a new unpromoted instance, or `None` when this piece is not
    /// promoted.
    pub fn unpromote(self) -> Option<Piece> {
        if !self.promoted {
            return None;
        }

        Some(Piece {
            promoted: false,
            ..self
        })
    }

    /// Returns a new instance owned by the opposite side.
    pub fn flip(self) -> Piece {
        Piece {
            color: self.color.flip(),
            ..self
        }
    }

    /// Returns true if this piece could ever move again from the given
    /// square.
    ///
    /// An unpromoted pawn or lance is stuck on the furthest rank, a knight
    /// on the furthest two; such a piece may neither stand there nor be
    /// dropped there.
    pub fn is_placeable_at(self, sq: Square) -> bool {
        if self.promoted {
            return true;
        }

        match self.piece_type {
            PieceType::Pawn | PieceType::Lance => sq.relative_rank(self.color) > 0,
            PieceType::Knight => sq.relative_rank(self.color) > 1,
            _ => true,
        }
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        if self.promoted {
            write!(f, "+")?;
        }

        let c = match self.piece_type {
            PieceType::King => 'k',
            PieceType::Rook => 'r',
            PieceType::Bishop => 'b',
            PieceType::Gold => 'g',
            PieceType::Silver => 's',
            PieceType::Knight => 'n',
            PieceType::Lance => 'l',
            PieceType::Pawn => 'p',
        };

        write!(
            f,
            "{}",
            if self.color == Color::Black {
                c.to_ascii_uppercase()
            } else {
                c
            }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::square::consts::*;

    #[test]
    fn from_sfen() {
        let ok_cases = [
            ('P', PieceType::Pawn, Color::Black),
            ('p', PieceType::Pawn, Color::White),
            ('K', PieceType::King, Color::Black),
            ('k', PieceType::King, Color::White),
            ('R', PieceType::Rook, Color::Black),
            ('l', PieceType::Lance, Color::White),
        ];
        let ng_cases = ['+', 'z', 'Z', '1', ' '];

        for (i, case) in ok_cases.iter().enumerate() {
            let pc = Piece::from_sfen(case.0);
            assert_eq!(
                Some(Piece {
                    piece_type: case.1,
                    color: case.2,
                    promoted: false
                }),
                pc,
                "failed at #{i}"
            );
        }

        for (i, case) in ng_cases.iter().enumerate() {
            assert!(Piece::from_sfen(*case).is_none(), "failed at #{i}");
        }
    }

    #[test]
    fn to_sfen() {
        let cases = [
            ("P", Piece::new(PieceType::Pawn, Color::Black)),
            ("p", Piece::new(PieceType::Pawn, Color::White)),
            ("+R", Piece::new(PieceType::Rook, Color::Black).promote().unwrap()),
            ("+s", Piece::new(PieceType::Silver, Color::White).promote().unwrap()),
        ];

        for (i, case) in cases.iter().enumerate() {
            assert_eq!(case.0, case.1.to_string(), "failed at #{i}");
        }
    }

    #[test]
    fn promote_unpromote() {
        let pawn = Piece::new(PieceType::Pawn, Color::Black);
        let promoted = pawn.promote().unwrap();
        assert!(promoted.promoted);
        assert_eq!(PieceType::Pawn, promoted.piece_type);
        assert_eq!(Some(pawn), promoted.unpromote());

        // No second promotion, no unpromoting an unpromoted piece.
        assert_eq!(None, promoted.promote());
        assert_eq!(None, pawn.unpromote());

        // Kings and golds never promote.
        assert_eq!(None, Piece::new(PieceType::King, Color::Black).promote());
        assert_eq!(None, Piece::new(PieceType::Gold, Color::White).promote());
    }

    #[test]
    fn flip() {
        let pc = Piece::new(PieceType::Silver, Color::Black);
        assert_eq!(Color::White, pc.flip().color);
        assert_eq!(PieceType::Silver, pc.flip().piece_type);
    }

    #[test]
    fn is_placeable_at() {
        let black_pawn = Piece::new(PieceType::Pawn, Color::Black);
        assert!(!black_pawn.is_placeable_at(SQ_5A));
        assert!(black_pawn.is_placeable_at(SQ_5B));
        assert!(black_pawn.is_placeable_at(SQ_5I));

        let white_pawn = Piece::new(PieceType::Pawn, Color::White);
        assert!(!white_pawn.is_placeable_at(SQ_5I));
        assert!(white_pawn.is_placeable_at(SQ_5A));

        let black_lance = Piece::new(PieceType::Lance, Color::Black);
        assert!(!black_lance.is_placeable_at(SQ_1A));
        assert!(black_lance.is_placeable_at(SQ_1B));

        let black_knight = Piece::new(PieceType::Knight, Color::Black);
        assert!(!black_knight.is_placeable_at(SQ_5A));
        assert!(!black_knight.is_placeable_at(SQ_5B));
        assert!(black_knight.is_placeable_at(SQ_5C));

        // Promotion lifts the restriction.
        let tokin = black_pawn.promote().unwrap();
        assert!(tokin.is_placeable_at(SQ_5A));
    }
}
