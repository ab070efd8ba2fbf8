//! Move representation and its compact coordinate notation.

use crate::square::Square;
use crate::PieceType;
use std::fmt;
use std::str::FromStr;

/// Represents a move which either is a normal move or a drop move.
///
/// A `Move` is only a proposal: it carries no legality guarantee and is
/// meaningless without a [`Position`] to validate it against. A move never
/// both drops and promotes.
///
/// The text form is the SFEN coordinate notation exchanged with engines
/// and network peers: `7g7f`, `2b8h+` (promotion), `S*5e` (drop).
///
/// [`Position`]: ../position/struct.Position.html
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Move {
    Normal {
        from: Square,
        to: Square,
        promote: bool,
    },
    Drop {
        to: Square,
        piece_type: PieceType,
    },
}

impl Move {
    /// Creates a new instance of `Move` from SFEN formatted string.
    pub fn from_sfen(s: &str) -> Option<Move> {
        if !s.is_ascii() {
            return None;
        }

        if s.len() != 4 && (s.len() != 5 || !s.ends_with('+')) {
            return None;
        }

        let first = s.chars().next()?;

        if first.is_ascii_digit() {
            let from = Square::from_sfen(&s[0..2])?;
            let to = Square::from_sfen(&s[2..4])?;

            return Some(Move::Normal {
                from,
                to,
                promote: s.len() == 5,
            });
        }

        if first.is_ascii_uppercase() && s.len() == 4 && &s[1..2] == "*" {
            let piece_type = PieceType::from_sfen(first.to_ascii_lowercase())?;
            if !piece_type.is_hand_piece() {
                return None;
            }
            let to = Square::from_sfen(&s[2..4])?;

            return Some(Move::Drop { to, piece_type });
        }

        None
    }

    /// Returns the destination square of this move.
    pub fn to(&self) -> Square {
        match *self {
            Move::Normal { to, .. } => to,
            Move::Drop { to, .. } => to,
        }
    }

    /// Returns true if this is a drop move.
    pub fn is_drop(&self) -> bool {
        matches!(self, Move::Drop { .. })
    }

    /// Returns true if this move includes a promotion.
    pub fn is_promotion(&self) -> bool {
        matches!(self, Move::Normal { promote: true, .. })
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        match *self {
            Move::Normal { from, to, promote } => {
                write!(f, "{}{}{}", from, to, if promote { "+" } else { "" })
            }
            Move::Drop { to, piece_type } => {
                write!(f, "{}*{}", piece_type.to_string().to_uppercase(), to)
            }
        }
    }
}

/// Error type for parsing a move from SFEN notation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid move notation")]
pub struct ParseMoveError;

impl FromStr for Move {
    type Err = ParseMoveError;

    /// Parses a move from SFEN notation.
    ///
    /// # Examples
    ///
    /// ```
    /// use shogiban::Move;
    /// use shogiban::square::consts::*;
    ///
    /// let mv: Move = "7g7f".parse().unwrap();
    /// assert!(matches!(mv, Move::Normal { from: SQ_7G, to: SQ_7F, promote: false }));
    ///
    /// let mv: Move = "7g7f+".parse().unwrap();
    /// assert!(mv.is_promotion());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Move::from_sfen(s).ok_or(ParseMoveError)
    }
}
