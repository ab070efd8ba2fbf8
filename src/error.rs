//! Error types returned by the rules engine.
//!
//! Two disjoint families: [`SfenError`] reports structural malformation of
//! notation text, [`MoveError`] reports why a proposed move or a position
//! violates the rules. Both are ordinary, recoverable outcomes; neither
//! corrupts an existing position.

use crate::PieceType;
use thiserror::Error;

/// Represents an error occurred during parsing SFEN text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SfenError {
    #[error("data fields are missing")]
    MissingDataFields,

    #[error("unexpected extra data fields")]
    ExtraDataFields,

    #[error("an illegal board state is detected")]
    IllegalBoardState,

    #[error("an illegal piece type is detected")]
    IllegalPieceType,

    #[error("an illegal side to move is detected")]
    IllegalSideToMove,

    #[error("an illegal piece is detected in the hand")]
    IllegalHandPiece,

    #[error("the move number must be a positive integer")]
    IllegalMoveNumber,
}

/// Represents the reason a move or a position was rejected.
///
/// Every rule yields its own variant so that callers can report specific
/// feedback and tests can assert on the violated rule rather than on a
/// generic failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("inconsistent move: {0}")]
    Inconsistent(&'static str),

    #[error("the piece does not belong to the side to move")]
    EnemysTurn,

    #[error("the piece could never move again from its destination")]
    NonMovablePiece,

    #[error("the promotion is not allowed for this move")]
    IllegalPromotion,

    #[error("there is already an unpromoted pawn on that file")]
    Nifu,

    #[error("a pawn may not be dropped to deliver checkmate")]
    Uchifuzume,

    #[error("only a king move can answer a double check")]
    DoubleCheck,

    #[error("the king would be left in check")]
    InCheck,

    #[error("each side must have exactly one king")]
    InvalidKingCount,

    #[error("the position holds more {0:?} pieces than the set contains")]
    PieceCountExceeded(PieceType),
}
