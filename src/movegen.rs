//! Pseudo-legal and legal move generation.

use crate::hand::HAND_PIECE_TYPES;
use crate::position::PROMOTION_ZONE_DEPTH;
use crate::{Color, Move, Piece, PieceType, Position, Square};

impl Position {
    /// Returns a list of squares to where the given piece at the given
    /// square can move, ignoring king safety.
    pub fn move_candidates(&self, sq: Square, p: Piece) -> Vec<Square> {
        let mut candidates = Vec::new();

        for (df, dr) in p.step_offsets() {
            if let Some(to) = sq.shift(df, dr) {
                match self.piece_at(to) {
                    Some(other) if other.color == p.color => {}
                    _ => candidates.push(to),
                }
            }
        }

        for (df, dr) in p.slide_directions() {
            let mut current = sq;
            while let Some(to) = current.shift(df, dr) {
                match self.piece_at(to) {
                    Some(other) => {
                        if other.color != p.color {
                            candidates.push(to);
                        }
                        break;
                    }
                    None => {
                        candidates.push(to);
                        current = to;
                    }
                }
            }
        }

        candidates
    }

    /// Returns all pseudo-legal moves for the side to move: every
    /// movement-shape move including its promotion variants, and every
    /// drop honoring the placement restrictions, ignoring only king
    /// safety.
    pub fn pseudo_legal_moves(&self) -> Vec<Move> {
        self.pseudo_legal_moves_for(self.side_to_move())
    }

    /// Returns all pseudo-legal moves for the specified color.
    pub fn pseudo_legal_moves_for(&self, c: Color) -> Vec<Move> {
        if c == self.side_to_move() {
            self.pseudo_legal_moves_impl(true)
        } else {
            self.with_side_to_move(c).pseudo_legal_moves_impl(true)
        }
    }

    /// Returns all legal moves for the side to move.
    pub fn legal_moves(&self) -> Vec<Move> {
        self.legal_moves_for(self.side_to_move())
    }

    /// Returns all legal moves for the specified color: the pseudo-legal
    /// moves that do not leave the mover's own king in check.
    pub fn legal_moves_for(&self, c: Color) -> Vec<Move> {
        if c == self.side_to_move() {
            self.legal_moves_impl(true)
        } else {
            self.with_side_to_move(c).legal_moves_impl(true)
        }
    }

    /// Returns true if the specified color has at least one legal move.
    pub fn has_legal_moves(&self, c: Color) -> bool {
        if c == self.side_to_move() {
            self.has_legal_moves_impl(true)
        } else {
            self.with_side_to_move(c).has_legal_moves_impl(true)
        }
    }

    /////////////////////////////////////////////////////////////////////////
    // Internals
    /////////////////////////////////////////////////////////////////////////

    /// Generation core. The side to move is the mover. `test_uchifuzume`
    /// is switched off inside the one-ply drop-checkmate search so that
    /// the search stays bounded; a drop can never parry a pawn check, so
    /// the answer is unaffected.
    pub(crate) fn pseudo_legal_moves_impl(&self, test_uchifuzume: bool) -> Vec<Move> {
        let c = self.side_to_move();
        let mut moves = Vec::new();

        for sq in Square::iter() {
            if let Some(pc) = self.piece_at(sq) {
                if pc.color == c {
                    for to in self.move_candidates(sq, pc) {
                        self.push_normal_moves(sq, to, pc, &mut moves);
                    }
                }
            }
        }

        for pt in HAND_PIECE_TYPES {
            let pc = Piece::new(pt, c);
            if self.hand(pc) == 0 {
                continue;
            }

            for sq in Square::iter() {
                if self.piece_at(sq).is_some() || !pc.is_placeable_at(sq) {
                    continue;
                }

                if pt == PieceType::Pawn {
                    if self.is_nifu(sq.file(), c) {
                        continue;
                    }
                    if test_uchifuzume && self.is_uchifuzume(sq) {
                        continue;
                    }
                }

                moves.push(Move::Drop { to: sq, piece_type: pt });
            }
        }

        moves
    }

    pub(crate) fn legal_moves_impl(&self, test_uchifuzume: bool) -> Vec<Move> {
        let c = self.side_to_move();
        self.pseudo_legal_moves_impl(test_uchifuzume)
            .into_iter()
            .filter(|m| !self.leaves_king_in_check(m, c))
            .collect()
    }

    pub(crate) fn has_legal_moves_impl(&self, test_uchifuzume: bool) -> bool {
        let c = self.side_to_move();
        self.pseudo_legal_moves_impl(test_uchifuzume)
            .iter()
            .any(|m| !self.leaves_king_in_check(m, c))
    }

    /// Expands a movement-shape move into its promotion variants.
    fn push_normal_moves(&self, from: Square, to: Square, pc: Piece, moves: &mut Vec<Move>) {
        let in_zone = from.relative_rank(pc.color) < PROMOTION_ZONE_DEPTH
            || to.relative_rank(pc.color) < PROMOTION_ZONE_DEPTH;
        let can_promote = pc.promote().is_some() && in_zone;
        let must_promote = !pc.promoted && !pc.is_placeable_at(to);

        if can_promote {
            moves.push(Move::Normal {
                from,
                to,
                promote: true,
            });
        }
        if !must_promote {
            moves.push(Move::Normal {
                from,
                to,
                promote: false,
            });
        }
    }

    /// Returns true when the given side already has an unpromoted pawn on
    /// the file.
    pub(crate) fn is_nifu(&self, file: u8, c: Color) -> bool {
        (0..9).any(|rank| {
            Square::new(file, rank)
                .and_then(|sq| self.piece_at(sq))
                .is_some_and(|pc| {
                    pc.piece_type == PieceType::Pawn && !pc.promoted && pc.color == c
                })
        })
    }

    /// Returns true when dropping the side-to-move's pawn on the given
    /// square would checkmate the opponent, which the rules forbid.
    ///
    /// Resolved by trial application: simulate the drop and search the
    /// opponent's legal responses one ply deep.
    pub(crate) fn is_uchifuzume(&self, to: Square) -> bool {
        let c = self.side_to_move();
        let opponent = c.flip();

        let mut next = self.clone();
        next.apply_move(Move::Drop {
            to,
            piece_type: PieceType::Pawn,
        });

        if !next.in_check(opponent) {
            return false;
        }

        let mated = !next.has_legal_moves_impl(false);
        if mated {
            log::trace!("pawn drop to {to} rejected: immediate checkmate");
        }
        mated
    }

    /// Returns true when applying the move would leave the mover's own
    /// king attacked. Simulation runs on a scratch copy.
    pub(crate) fn leaves_king_in_check(&self, m: &Move, c: Color) -> bool {
        let mut next = self.with_side_to_move(c);
        next.apply_move(*m);
        next.in_check(c)
    }
}
