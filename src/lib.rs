//! A library implementing the position and move rules of shogi.
//!
//! `shogiban` represents a board position, enumerates legal moves,
//! validates proposed moves (including drops from the captured-piece
//! hands and promotion), detects check and double check, and enforces
//! the game's special restrictions (double pawn, pawn-drop checkmate).
//! Positions can be serialized to and deserialized from the SFEN format.
//! See [USIプロトコルとは (What is the USI protocol?)](http://shogidokoro.starfree.jp/usi.html)
//! for more detail about the USI protocol and SFEN format.
//!
//! The engine is a pure in-memory core: no I/O, no process handling, no
//! game history. A viewer, an engine adapter or a network layer drives it
//! through [`Position::legal_moves`], [`Position::validate_move`],
//! [`Position::in_check`] / [`Position::attacker_count`] and the SFEN
//! codec, and owns everything else.
//!
//! # Examples
//!
//! ```
//! use shogiban::{Move, Position};
//! use shogiban::square::consts::*;
//!
//! let mut pos = Position::startpos();
//!
//! // You can programatically create a Move instance.
//! let m = Move::Normal{from: SQ_7G, to: SQ_7F, promote: false};
//! pos.make_move(m).unwrap();
//!
//! // Move can be created from the SFEN formatted string as well.
//! let m = Move::from_sfen("3c3d").unwrap();
//! pos.make_move(m).unwrap();
//!
//! // Position can be converted back to the SFEN formatted string.
//! assert_eq!(
//!     "lnsgkgsnl/1r5b1/pppppp1pp/6p2/9/2P6/PP1PPPPPP/1B5R1/LNSGKGSNL b - 3",
//!     pos.to_sfen()
//! );
//! ```

pub mod color;
pub mod error;
pub mod hand;
pub mod moves;
pub mod piece;
pub mod piece_type;
pub mod position;
pub mod square;

mod attacks;
mod movegen;
mod validator;

pub use self::color::Color;
pub use self::error::{MoveError, SfenError};
pub use self::hand::Hand;
pub use self::moves::{Move, ParseMoveError};
pub use self::piece::Piece;
pub use self::piece_type::PieceType;
pub use self::position::{Handicap, Position, STARTING_SFEN};
pub use self::square::{ParseSquareError, Square};
