//! The rules gate: move validation and position sanity checking.

use log::debug;

use crate::position::PROMOTION_ZONE_DEPTH;
use crate::{Color, Move, MoveError, Piece, PieceType, Position, Square};

impl Position {
    /// Checks whether the given move is legal in this position.
    ///
    /// This is the authoritative gate run before [`make_move`] applies a
    /// move coming from the user interface, a network peer or an engine.
    /// Every rule rejects with its own [`MoveError`] kind so the caller
    /// can report exactly what was wrong. The position itself is never
    /// changed; simulation runs on scratch copies.
    ///
    /// [`make_move`]: #method.make_move
    /// [`MoveError`]: ../error/enum.MoveError.html
    pub fn validate_move(&self, m: &Move) -> Result<(), MoveError> {
        match *m {
            Move::Normal { from, to, promote } => self.validate_normal_move(from, to, promote),
            Move::Drop { to, piece_type } => self.validate_drop_move(to, piece_type),
        }
    }

    /// Checks whether the given move would be legal, reported as a plain
    /// boolean.
    pub fn is_legal_move(&self, m: &Move) -> bool {
        self.validate_move(m).is_ok()
    }

    fn validate_normal_move(
        &self,
        from: Square,
        to: Square,
        promote: bool,
    ) -> Result<(), MoveError> {
        let stm = self.side_to_move();

        let moved = self
            .piece_at(from)
            .ok_or(MoveError::Inconsistent("no piece at the source square"))?;

        if moved.color != stm {
            return Err(MoveError::EnemysTurn);
        }

        if let Some(captured) = self.piece_at(to) {
            if captured.color == stm {
                return Err(MoveError::Inconsistent("the destination holds an own piece"));
            }
        }

        if !self.move_candidates(from, moved).contains(&to) {
            return Err(MoveError::Inconsistent("the piece cannot reach the destination"));
        }

        // A double check can only be answered by a king move, unless this
        // very move disposes of every attacker at once.
        if moved.piece_type != PieceType::King && self.attacker_count(stm) >= 2 {
            let m = Move::Normal { from, to, promote };
            if self.leaves_king_in_check(&m, stm) {
                return Err(MoveError::DoubleCheck);
            }
        }

        if promote {
            let in_zone = from.relative_rank(stm) < PROMOTION_ZONE_DEPTH
                || to.relative_rank(stm) < PROMOTION_ZONE_DEPTH;
            if moved.promote().is_none() || !in_zone {
                return Err(MoveError::IllegalPromotion);
            }
        } else if !moved.is_placeable_at(to) {
            // The piece could never move again; promotion is mandatory.
            return Err(MoveError::NonMovablePiece);
        }

        let m = Move::Normal { from, to, promote };
        if self.leaves_king_in_check(&m, stm) {
            return Err(MoveError::InCheck);
        }

        Ok(())
    }

    fn validate_drop_move(&self, to: Square, pt: PieceType) -> Result<(), MoveError> {
        let stm = self.side_to_move();
        let pc = Piece::new(pt, stm);

        if !pt.is_hand_piece() {
            return Err(MoveError::Inconsistent("the piece can never be in a hand"));
        }

        if self.hand(pc) == 0 {
            return Err(MoveError::Inconsistent("the piece is not in the hand"));
        }

        if self.piece_at(to).is_some() {
            return Err(MoveError::Inconsistent("the destination square is occupied"));
        }

        // A dropped piece blocks at most one line of attack, so no drop
        // can ever answer a double check.
        if self.attacker_count(stm) >= 2 {
            return Err(MoveError::DoubleCheck);
        }

        if !pc.is_placeable_at(to) {
            return Err(MoveError::NonMovablePiece);
        }

        if pt == PieceType::Pawn {
            if self.is_nifu(to.file(), stm) {
                return Err(MoveError::Nifu);
            }

            if self.is_uchifuzume(to) {
                return Err(MoveError::Uchifuzume);
            }
        }

        let m = Move::Drop { to, piece_type: pt };
        if self.leaves_king_in_check(&m, stm) {
            return Err(MoveError::InCheck);
        }

        Ok(())
    }

    /////////////////////////////////////////////////////////////////////////
    // Position sanity
    /////////////////////////////////////////////////////////////////////////

    /// Checks the board invariants that the SFEN codec does not enforce:
    /// king counts, per-kind piece totals, stuck pieces and double pawns.
    ///
    /// The codec accepts transiently inconsistent positions on purpose
    /// (loading and editing go through such states), so this pass is run
    /// separately once a position is meant to be played.
    pub fn validate_position(&self) -> Result<(), MoveError> {
        for c in Color::iter() {
            let kings = Square::iter()
                .filter(|&sq| {
                    self.piece_at(sq)
                        .is_some_and(|pc| pc.piece_type == PieceType::King && pc.color == c)
                })
                .count();

            if kings != 1 {
                debug!("king count check failed: {c:?} has {kings} kings");
                return Err(MoveError::InvalidKingCount);
            }
        }

        for pt in PieceType::iter() {
            let on_board = Square::iter()
                .filter(|&sq| self.piece_at(sq).is_some_and(|pc| pc.piece_type == pt))
                .count();
            let in_hands = Color::iter()
                .map(|c| self.hand(Piece::new(pt, c)) as usize)
                .sum::<usize>();

            if on_board + in_hands > pt.max_count() as usize {
                debug!(
                    "piece count check failed: {} {pt:?} on board, {} in hands",
                    on_board, in_hands
                );
                return Err(MoveError::PieceCountExceeded(pt));
            }
        }

        for sq in Square::iter() {
            if let Some(pc) = self.piece_at(sq) {
                if !pc.is_placeable_at(sq) {
                    return Err(MoveError::NonMovablePiece);
                }
            }
        }

        for c in Color::iter() {
            for file in 0..9 {
                let pawns = (0..9)
                    .filter(|&rank| {
                        Square::new(file, rank)
                            .and_then(|sq| self.piece_at(sq))
                            .is_some_and(|pc| {
                                pc.piece_type == PieceType::Pawn && !pc.promoted && pc.color == c
                            })
                    })
                    .count();
                if pawns > 1 {
                    return Err(MoveError::Nifu);
                }
            }
        }

        Ok(())
    }

    /////////////////////////////////////////////////////////////////////////
    // Game termination helpers
    /////////////////////////////////////////////////////////////////////////

    /// Returns true if the specified color is in checkmate: in check with
    /// no legal move left.
    pub fn is_checkmate(&self, c: Color) -> bool {
        self.in_check(c) && !self.has_legal_moves(c)
    }

    /// Returns true if the specified color has no legal move while not in
    /// check. In shogi this loses for the stalemated player.
    pub fn is_stalemate(&self, c: Color) -> bool {
        !self.in_check(c) && !self.has_legal_moves(c)
    }
}
