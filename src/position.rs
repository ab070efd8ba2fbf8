use itertools::Itertools;
use std::fmt;

use crate::color::Color;
use crate::error::{MoveError, SfenError};
use crate::hand::{Hand, HAND_PIECE_TYPES};
use crate::moves::Move;
use crate::piece::Piece;
use crate::square::Square;

/// SFEN string of the even-game starting position.
pub const STARTING_SFEN: &str =
    "lnsgkgsnl/1r5b1/ppppppppp/9/9/9/PPPPPPPPP/1B5R1/LNSGKGSNL b - 1";

/// Depth of the promotion zone: the three ranks furthest from each side.
pub const PROMOTION_ZONE_DEPTH: u8 = 3;

/// The preset starting layouts.
///
/// In a handicap game the stronger player gives up pieces and plays White,
/// which is why every layout except [`Even`] has White to move first.
///
/// [`Even`]: #variant.Even
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Handicap {
    /// The even game (hirate).
    Even,
    /// White gives up the left lance.
    Lance,
    /// White gives up the right lance.
    RightLance,
    /// White gives up the bishop.
    Bishop,
    /// White gives up the rook.
    Rook,
    /// White gives up the rook and the left lance.
    RookLance,
    /// White gives up the rook and the bishop.
    TwoPiece,
    /// White gives up the rook, the bishop and the left lance.
    ThreePiece,
    /// White gives up the rook, the bishop and both lances.
    FourPiece,
    /// Four-piece handicap plus the right knight.
    FivePiece,
    /// Four-piece handicap plus the left knight.
    LeftFivePiece,
    /// White gives up the rook, the bishop, both lances and both knights.
    SixPiece,
    /// White keeps the king and the golds only.
    EightPiece,
    /// White keeps the king only.
    TenPiece,
}

impl Handicap {
    /// Returns all handicap layouts.
    pub fn iter() -> impl Iterator<Item = Handicap> {
        const ALL: [Handicap; 14] = [
            Handicap::Even,
            Handicap::Lance,
            Handicap::RightLance,
            Handicap::Bishop,
            Handicap::Rook,
            Handicap::RookLance,
            Handicap::TwoPiece,
            Handicap::ThreePiece,
            Handicap::FourPiece,
            Handicap::FivePiece,
            Handicap::LeftFivePiece,
            Handicap::SixPiece,
            Handicap::EightPiece,
            Handicap::TenPiece,
        ];
        ALL.into_iter()
    }

    /// Returns the SFEN string of this starting layout.
    pub fn sfen(self) -> &'static str {
        match self {
            Handicap::Even => STARTING_SFEN,
            Handicap::Lance => {
                "lnsgkgsn1/1r5b1/ppppppppp/9/9/9/PPPPPPPPP/1B5R1/LNSGKGSNL w - 1"
            }
            Handicap::RightLance => {
                "1nsgkgsnl/1r5b1/ppppppppp/9/9/9/PPPPPPPPP/1B5R1/LNSGKGSNL w - 1"
            }
            Handicap::Bishop => {
                "lnsgkgsnl/1r7/ppppppppp/9/9/9/PPPPPPPPP/1B5R1/LNSGKGSNL w - 1"
            }
            Handicap::Rook => {
                "lnsgkgsnl/7b1/ppppppppp/9/9/9/PPPPPPPPP/1B5R1/LNSGKGSNL w - 1"
            }
            Handicap::RookLance => {
                "lnsgkgsn1/7b1/ppppppppp/9/9/9/PPPPPPPPP/1B5R1/LNSGKGSNL w - 1"
            }
            Handicap::TwoPiece => {
                "lnsgkgsnl/9/ppppppppp/9/9/9/PPPPPPPPP/1B5R1/LNSGKGSNL w - 1"
            }
            Handicap::ThreePiece => {
                "lnsgkgsn1/9/ppppppppp/9/9/9/PPPPPPPPP/1B5R1/LNSGKGSNL w - 1"
            }
            Handicap::FourPiece => {
                "1nsgkgsn1/9/ppppppppp/9/9/9/PPPPPPPPP/1B5R1/LNSGKGSNL w - 1"
            }
            Handicap::FivePiece => {
                "2sgkgsn1/9/ppppppppp/9/9/9/PPPPPPPPP/1B5R1/LNSGKGSNL w - 1"
            }
            Handicap::LeftFivePiece => {
                "1nsgkgs2/9/ppppppppp/9/9/9/PPPPPPPPP/1B5R1/LNSGKGSNL w - 1"
            }
            Handicap::SixPiece => {
                "2sgkgs2/9/ppppppppp/9/9/9/PPPPPPPPP/1B5R1/LNSGKGSNL w - 1"
            }
            Handicap::EightPiece => {
                "3gkg3/9/ppppppppp/9/9/9/PPPPPPPPP/1B5R1/LNSGKGSNL w - 1"
            }
            Handicap::TenPiece => {
                "4k4/9/ppppppppp/9/9/9/PPPPPPPPP/1B5R1/LNSGKGSNL w - 1"
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct PieceGrid([Option<Piece>; 81]);

impl PieceGrid {
    fn get(&self, sq: Square) -> Option<Piece> {
        self.0[sq.index()]
    }

    fn set(&mut self, sq: Square, pc: Option<Piece>) {
        self.0[sq.index()] = pc;
    }
}

/// Represents a state of the game: the board, both hands, the side to move
/// and the move number.
///
/// A position is mutated only through [`make_move`] and [`set_sfen`]; all
/// rule checking that needs to try a move out works on a scratch clone, so
/// a rejected move never changes the caller's position. The engine keeps no
/// game history — recording moves, undo stacks and repetition detection
/// belong to the embedding application.
///
/// # Examples
///
/// ```
/// use shogiban::{Move, Position};
/// use shogiban::square::consts::*;
///
/// let mut pos = Position::startpos();
///
/// let m = Move::Normal { from: SQ_7G, to: SQ_7F, promote: false };
/// pos.make_move(m).unwrap();
///
/// assert_eq!(
///     "lnsgkgsnl/1r5b1/ppppppppp/9/9/2P6/PP1PPPPPP/1B5R1/LNSGKGSNL w - 2",
///     pos.to_sfen()
/// );
/// ```
///
/// [`make_move`]: #method.make_move
/// [`set_sfen`]: #method.set_sfen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    board: PieceGrid,
    hand: Hand,
    ply: u16,
    side_to_move: Color,
}

/////////////////////////////////////////////////////////////////////////////
// Type implementation
/////////////////////////////////////////////////////////////////////////////

impl Position {
    /// Creates a new instance of `Position` with an empty board.
    pub fn new() -> Position {
        Default::default()
    }

    /// Creates a position with the even-game starting setup.
    pub fn startpos() -> Position {
        let mut pos = Position::new();
        pos.set_sfen(STARTING_SFEN).expect("invalid starting SFEN");
        pos
    }

    /// Creates a position with the given handicap starting setup.
    pub fn from_handicap(h: Handicap) -> Position {
        let mut pos = Position::new();
        pos.set_sfen(h.sfen()).expect("invalid handicap SFEN");
        pos
    }

    /////////////////////////////////////////////////////////////////////////
    // Accessors
    /////////////////////////////////////////////////////////////////////////

    /// Returns a piece at the given square.
    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.board.get(sq)
    }

    /// Returns the number of the given piece in hand.
    pub fn hand(&self, p: Piece) -> u8 {
        self.hand.get(p)
    }

    /// Returns the side to make a move next.
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    /// Returns the current move number, starting at 1.
    pub fn ply(&self) -> u16 {
        self.ply
    }

    /// Returns the position of the king with the given color.
    pub fn find_king(&self, c: Color) -> Option<Square> {
        Square::iter().find(|&sq| {
            self.board.get(sq).is_some_and(|pc| {
                pc.piece_type == crate::PieceType::King && pc.color == c
            })
        })
    }

    /////////////////////////////////////////////////////////////////////////
    // Mutation primitives
    /////////////////////////////////////////////////////////////////////////

    fn set_piece(&mut self, sq: Square, p: Option<Piece>) {
        self.board.set(sq, p);
    }

    /// Returns a clone of this position with the side to move replaced.
    pub(crate) fn with_side_to_move(&self, c: Color) -> Position {
        let mut pos = self.clone();
        pos.side_to_move = c;
        pos
    }

    /// Applies a move without validating it. The caller has validated.
    ///
    /// Captured pieces lose their promotion and join the capturer's hand,
    /// the turn flips and the move number advances.
    pub(crate) fn apply_move(&mut self, m: Move) {
        match m {
            Move::Normal { from, to, promote } => {
                let Some(moved) = self.piece_at(from) else {
                    return;
                };

                let placed = if promote {
                    moved.promote().unwrap_or(moved)
                } else {
                    moved
                };

                let captured = self.piece_at(to);
                self.set_piece(from, None);
                self.set_piece(to, Some(placed));

                if let Some(cap) = captured {
                    self.hand.increment(cap.unpromote().unwrap_or(cap).flip());
                }
            }
            Move::Drop { to, piece_type } => {
                let pc = Piece::new(piece_type, self.side_to_move);
                self.hand.decrement(pc);
                self.set_piece(to, Some(pc));
            }
        }

        self.side_to_move = self.side_to_move.flip();
        self.ply = self.ply.saturating_add(1);
    }

    /// Makes the given move. Returns `Err` with the violated rule when the
    /// move is not legal, leaving the position untouched.
    pub fn make_move(&mut self, m: Move) -> Result<(), MoveError> {
        self.validate_move(&m)?;
        self.apply_move(m);
        Ok(())
    }

    /////////////////////////////////////////////////////////////////////////
    // SFEN serialization / deserialization
    /////////////////////////////////////////////////////////////////////////

    /// Parses the given SFEN string and updates the game state.
    ///
    /// The expected form is `<board> <side> <hands> <move number>` with
    /// single spaces in between. Parsing is strict: every rank must account
    /// for exactly nine files and the move number must be positive. On any
    /// error the previous state is kept unchanged.
    pub fn set_sfen(&mut self, sfen_str: &str) -> Result<(), SfenError> {
        let fields: Vec<&str> = sfen_str.split(' ').collect();

        if fields.len() < 4 {
            return Err(SfenError::MissingDataFields);
        }
        if fields.len() > 4 {
            return Err(SfenError::ExtraDataFields);
        }

        let mut pos = Position::new();
        pos.parse_sfen_board(fields[0])?;
        pos.parse_sfen_stm(fields[1])?;
        pos.parse_sfen_hand(fields[2])?;
        pos.parse_sfen_ply(fields[3])?;

        *self = pos;
        Ok(())
    }

    /// Converts the current state into SFEN formatted string.
    ///
    /// The output is canonical: empty-square runs are collapsed and hand
    /// pieces appear in the fixed order R B G S N L P, black before white.
    pub fn to_sfen(&self) -> String {
        let board = (0..9)
            .map(|row| {
                let mut s = String::new();
                let mut num_spaces = 0;
                for file in (0..9).rev() {
                    let sq = Square::new(file, row).expect("square index in range");
                    match self.piece_at(sq) {
                        Some(pc) => {
                            if num_spaces > 0 {
                                s.push_str(&num_spaces.to_string());
                                num_spaces = 0;
                            }

                            s.push_str(&pc.to_string());
                        }
                        None => num_spaces += 1,
                    }
                }

                if num_spaces > 0 {
                    s.push_str(&num_spaces.to_string());
                }

                s
            })
            .join("/");

        let color = if self.side_to_move == Color::Black {
            "b"
        } else {
            "w"
        };

        let mut hand = [Color::Black, Color::White]
            .iter()
            .map(|&c| {
                HAND_PIECE_TYPES
                    .iter()
                    .map(|&pt| {
                        let pc = Piece::new(pt, c);
                        let n = self.hand.get(pc);

                        if n == 0 {
                            "".to_string()
                        } else if n == 1 {
                            format!("{pc}")
                        } else {
                            format!("{n}{pc}")
                        }
                    })
                    .join("")
            })
            .join("");

        if hand.is_empty() {
            hand = "-".to_string();
        }

        format!("{} {} {} {}", board, color, hand, self.ply)
    }

    fn parse_sfen_board(&mut self, s: &str) -> Result<(), SfenError> {
        let rows: Vec<&str> = s.split('/').collect();

        if rows.len() != 9 {
            return Err(SfenError::IllegalBoardState);
        }

        for (i, row) in rows.iter().enumerate() {
            let mut j = 0u8;
            let mut is_promoted = false;

            for c in row.chars() {
                match c {
                    '+' => {
                        if is_promoted {
                            return Err(SfenError::IllegalPieceType);
                        }
                        is_promoted = true;
                    }
                    n if n.is_ascii_digit() => {
                        if is_promoted {
                            return Err(SfenError::IllegalPieceType);
                        }

                        if let Some(n) = n.to_digit(10) {
                            let n = n as u8;
                            if n == 0 || j + n > 9 {
                                return Err(SfenError::IllegalBoardState);
                            }
                            j += n;
                        }
                    }
                    c => {
                        let mut pc =
                            Piece::from_sfen(c).ok_or(SfenError::IllegalPieceType)?;

                        if is_promoted {
                            pc = pc.promote().ok_or(SfenError::IllegalPieceType)?;
                        }

                        if j >= 9 {
                            return Err(SfenError::IllegalBoardState);
                        }

                        let sq = Square::new(8 - j, i as u8)
                            .ok_or(SfenError::IllegalBoardState)?;
                        self.set_piece(sq, Some(pc));
                        j += 1;

                        is_promoted = false;
                    }
                }
            }

            if is_promoted || j != 9 {
                return Err(if is_promoted {
                    SfenError::IllegalPieceType
                } else {
                    SfenError::IllegalBoardState
                });
            }
        }

        Ok(())
    }

    fn parse_sfen_stm(&mut self, s: &str) -> Result<(), SfenError> {
        self.side_to_move = match s {
            "b" => Color::Black,
            "w" => Color::White,
            _ => return Err(SfenError::IllegalSideToMove),
        };
        Ok(())
    }

    fn parse_sfen_hand(&mut self, s: &str) -> Result<(), SfenError> {
        if s == "-" {
            self.hand.clear();
            return Ok(());
        }

        if s.is_empty() {
            return Err(SfenError::IllegalHandPiece);
        }

        let mut num: u8 = 0;
        let mut has_count = false;

        for c in s.chars() {
            if let Some(d) = c.to_digit(10) {
                has_count = true;
                num = num.saturating_mul(10).saturating_add(d as u8);
            } else {
                let pc = Piece::from_sfen(c).ok_or(SfenError::IllegalHandPiece)?;
                if !pc.piece_type.is_hand_piece() {
                    return Err(SfenError::IllegalHandPiece);
                }

                // A written count must be at least 2; a single piece is
                // written without one.
                if has_count && num < 2 {
                    return Err(SfenError::IllegalHandPiece);
                }

                let count = if has_count { num } else { 1 };
                self.hand.set(pc, self.hand.get(pc).saturating_add(count));

                num = 0;
                has_count = false;
            }
        }

        if has_count {
            return Err(SfenError::IllegalHandPiece);
        }

        Ok(())
    }

    fn parse_sfen_ply(&mut self, s: &str) -> Result<(), SfenError> {
        let ply: u16 = s.parse().map_err(|_| SfenError::IllegalMoveNumber)?;
        if ply == 0 {
            return Err(SfenError::IllegalMoveNumber);
        }
        self.ply = ply;
        Ok(())
    }
}

/////////////////////////////////////////////////////////////////////////////
// Trait implementations
/////////////////////////////////////////////////////////////////////////////

impl Default for Position {
    fn default() -> Position {
        Position {
            side_to_move: Color::Black,
            board: PieceGrid([None; 81]),
            hand: Default::default(),
            ply: 1,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "   9   8   7   6   5   4   3   2   1")?;
        writeln!(f, "+---+---+---+---+---+---+---+---+---+")?;

        for row in 0..9 {
            write!(f, "|")?;
            for file in (0..9).rev() {
                let sq = Square::new(file, row).expect("square index in range");
                if let Some(piece) = self.piece_at(sq) {
                    write!(f, "{:>3}|", piece.to_string())?;
                } else {
                    write!(f, "   |")?;
                }
            }

            writeln!(f, " {}", (b'a' + row) as char)?;
            writeln!(f, "+---+---+---+---+---+---+---+---+---+")?;
        }

        writeln!(
            f,
            "Side to move: {}",
            if self.side_to_move == Color::Black {
                "Black"
            } else {
                "White"
            }
        )?;

        let fmt_hand = |color: Color, f: &mut fmt::Formatter| -> fmt::Result {
            for &pt in HAND_PIECE_TYPES.iter() {
                let pc = Piece::new(pt, color);
                let n = self.hand.get(pc);

                if n > 0 {
                    write!(f, "{pc}{n} ")?;
                }
            }
            Ok(())
        };
        write!(f, "Hand (Black): ")?;
        fmt_hand(Color::Black, f)?;
        writeln!(f)?;

        write!(f, "Hand (White): ")?;
        fmt_hand(Color::White, f)?;
        writeln!(f)?;

        write!(f, "Ply: {}", self.ply)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::square::consts::*;
    use crate::PieceType;

    #[test]
    fn new() {
        let pos = Position::new();

        for sq in Square::iter() {
            assert_eq!(None, pos.piece_at(sq));
        }
        assert_eq!(Color::Black, pos.side_to_move());
        assert_eq!(1, pos.ply());
    }

    #[test]
    fn startpos() {
        let pos = Position::startpos();

        let cases = [
            (SQ_5A, PieceType::King, Color::White),
            (SQ_5I, PieceType::King, Color::Black),
            (SQ_8B, PieceType::Rook, Color::White),
            (SQ_2H, PieceType::Rook, Color::Black),
            (SQ_2B, PieceType::Bishop, Color::White),
            (SQ_8H, PieceType::Bishop, Color::Black),
            (SQ_9A, PieceType::Lance, Color::White),
            (SQ_1I, PieceType::Lance, Color::Black),
            (SQ_5C, PieceType::Pawn, Color::White),
            (SQ_5G, PieceType::Pawn, Color::Black),
        ];

        for (i, case) in cases.iter().enumerate() {
            assert_eq!(
                Some(Piece::new(case.1, case.2)),
                pos.piece_at(case.0),
                "failed at #{i}"
            );
        }

        assert_eq!(Color::Black, pos.side_to_move());
        assert_eq!(1, pos.ply());
        assert!(pos.hand.is_empty(Color::Black));
        assert!(pos.hand.is_empty(Color::White));
    }

    #[test]
    fn set_sfen_ok() {
        let cases = [
            STARTING_SFEN,
            "l6nl/5+P1gk/2np1S3/p1p4Pp/3P2Sp1/1PPb2P1P/P5GS1/R8/LN4bKL w GR5pnsg 1",
            "8k/9/4+p4/9/4R4/9/9/9/4K4 b - 1",
            "9/9/9/9/9/9/9/9/9 b - 1",
            "4k4/9/9/9/9/9/9/9/4K4 w 18P 100",
        ];

        let mut pos = Position::new();
        for (i, case) in cases.iter().enumerate() {
            assert!(pos.set_sfen(case).is_ok(), "failed at #{i}");
        }
    }

    #[test]
    fn set_sfen_ng() {
        let cases = [
            // Wrong number of fields.
            ("", SfenError::MissingDataFields),
            ("lnsgkgsnl/1r5b1/ppppppppp/9/9/9/PPPPPPPPP/1B5R1/LNSGKGSNL b -", SfenError::MissingDataFields),
            ("lnsgkgsnl/1r5b1/ppppppppp/9/9/9/PPPPPPPPP/1B5R1/LNSGKGSNL b - 1 moves", SfenError::ExtraDataFields),
            ("lnsgkgsnl/1r5b1/ppppppppp/9/9/9/PPPPPPPPP/1B5R1/LNSGKGSNL b  - 1", SfenError::ExtraDataFields),
            // Bad board part.
            ("lnsgkgsnl/1r5b1/ppppppppp/9/9/9/PPPPPPPPP/1B5R1 b - 1", SfenError::IllegalBoardState),
            ("lnsgkgsnl/1r5b1/ppppppppp/9/9/9/9/PPPPPPPPP/1B5R1/LNSGKGSNL b - 1", SfenError::IllegalBoardState),
            ("lnsgkgsnl/1r5b1/pppppppp/9/9/9/PPPPPPPPP/1B5R1/LNSGKGSNL b - 1", SfenError::IllegalBoardState),
            ("lnsgkgsnl/1r5b1/pppppppppp/9/9/9/PPPPPPPPP/1B5R1/LNSGKGSNL b - 1", SfenError::IllegalBoardState),
            ("lnsgkgsnl/1r5b1/ppppppppp/90/9/9/PPPPPPPPP/1B5R1/LNSGKGSNL b - 1", SfenError::IllegalBoardState),
            // Bad piece tokens.
            ("lnsgkgsnl/1r5b1/pppppxppp/9/9/9/PPPPPPPPP/1B5R1/LNSGKGSNL b - 1", SfenError::IllegalPieceType),
            ("lnsg+kgsnl/1r5b1/ppppppppp/9/9/9/PPPPPPPPP/1B5R1/LNSGKGSNL b - 1", SfenError::IllegalPieceType),
            ("lnsgkgsn+/1r5b1/ppppppppp/9/9/9/PPPPPPPPP/1B5R1/LNSGKGSNL b - 1", SfenError::IllegalPieceType),
            // Bad side to move.
            ("lnsgkgsnl/1r5b1/ppppppppp/9/9/9/PPPPPPPPP/1B5R1/LNSGKGSNL x - 1", SfenError::IllegalSideToMove),
            // Bad hand part.
            ("lnsgkgsnl/1r5b1/ppppppppp/9/9/9/PPPPPPPPP/1B5R1/LNSGKGSNL b K 1", SfenError::IllegalHandPiece),
            ("lnsgkgsnl/1r5b1/ppppppppp/9/9/9/PPPPPPPPP/1B5R1/LNSGKGSNL b 0P 1", SfenError::IllegalHandPiece),
            ("lnsgkgsnl/1r5b1/ppppppppp/9/9/9/PPPPPPPPP/1B5R1/LNSGKGSNL b 1P 1", SfenError::IllegalHandPiece),
            ("lnsgkgsnl/1r5b1/ppppppppp/9/9/9/PPPPPPPPP/1B5R1/LNSGKGSNL b 2 1", SfenError::IllegalHandPiece),
            ("lnsgkgsnl/1r5b1/ppppppppp/9/9/9/PPPPPPPPP/1B5R1/LNSGKGSNL b +P 1", SfenError::IllegalHandPiece),
            // Bad move number.
            ("lnsgkgsnl/1r5b1/ppppppppp/9/9/9/PPPPPPPPP/1B5R1/LNSGKGSNL b - 0", SfenError::IllegalMoveNumber),
            ("lnsgkgsnl/1r5b1/ppppppppp/9/9/9/PPPPPPPPP/1B5R1/LNSGKGSNL b - x", SfenError::IllegalMoveNumber),
        ];

        for (i, case) in cases.iter().enumerate() {
            let mut pos = Position::startpos();
            assert_eq!(Err(case.1), pos.set_sfen(case.0), "failed at #{i}");

            // A failed parse leaves the previous state untouched.
            assert_eq!(STARTING_SFEN, pos.to_sfen(), "failed at #{i}");
        }
    }

    #[test]
    fn sfen_roundtrip() {
        let cases = [
            STARTING_SFEN,
            "l6nl/5+P1gk/2np1S3/p1p4Pp/3P2Sp1/1PPb2P1P/P5GS1/R8/LN4bKL w RGgsn5p 1",
            "ln1g5/1ks1g3l/1p2p1n2/p1pGs2rp/1P1N1ppp1/P1SB1P2P/1S1p1bPP1/LKG6/4R2NL w 2Pp 91",
            "9/9/9/9/9/9/9/9/9 b - 1",
        ];

        for (i, case) in cases.iter().enumerate() {
            let mut pos = Position::new();
            pos.set_sfen(case).expect("failed to parse SFEN string");
            assert_eq!(*case, pos.to_sfen(), "failed at #{i}");

            let mut reparsed = Position::new();
            reparsed
                .set_sfen(&pos.to_sfen())
                .expect("failed to parse SFEN string");
            assert_eq!(pos, reparsed, "failed at #{i}");
        }
    }

    #[test]
    fn sfen_canonicalization() {
        // Equivalent run-length encodings collapse to the canonical form.
        let cases = [
            (
                "lnsgkgsnl/1r5b1/ppppppppp/45/9/9/PPPPPPPPP/1B5R1/LNSGKGSNL b - 1",
                STARTING_SFEN,
            ),
            (
                "lnsgkgsnl/1r5b1/ppppppppp/111111111/9/9/PPPPPPPPP/1B5R1/LNSGKGSNL b - 1",
                STARTING_SFEN,
            ),
            (
                "4k4/9/9/9/9/9/9/9/4K4 b PP 1",
                "4k4/9/9/9/9/9/9/9/4K4 b 2P 1",
            ),
        ];

        for (i, case) in cases.iter().enumerate() {
            let mut pos = Position::new();
            pos.set_sfen(case.0).expect("failed to parse SFEN string");
            assert_eq!(case.1, pos.to_sfen(), "failed at #{i}");
        }
    }

    #[test]
    fn make_move_updates_state() {
        let mut pos = Position::startpos();

        pos.make_move(Move::Normal {
            from: SQ_7G,
            to: SQ_7F,
            promote: false,
        })
        .expect("failed to make a move");

        assert_eq!(None, pos.piece_at(SQ_7G));
        assert_eq!(
            Some(Piece::new(PieceType::Pawn, Color::Black)),
            pos.piece_at(SQ_7F)
        );
        assert_eq!(Color::White, pos.side_to_move());
        assert_eq!(2, pos.ply());
    }

    #[test]
    fn capture_demotes_into_hand() {
        let mut pos = Position::new();
        pos.set_sfen("8k/9/4+p4/9/4R4/9/9/9/4K4 b - 1")
            .expect("failed to parse SFEN string");

        pos.make_move(Move::Normal {
            from: SQ_5E,
            to: SQ_5C,
            promote: false,
        })
        .expect("failed to make a move");

        // The promoted pawn reverts to a plain pawn in Black's hand.
        assert_eq!(1, pos.hand(Piece::new(PieceType::Pawn, Color::Black)));
        assert_eq!(
            Some(Piece::new(PieceType::Rook, Color::Black)),
            pos.piece_at(SQ_5C)
        );
        assert!(pos.validate_position().is_ok());
    }

    #[test]
    fn drop_consumes_hand_piece() {
        let mut pos = Position::new();
        pos.set_sfen("4k4/9/9/9/9/9/9/9/4K4 b G 1")
            .expect("failed to parse SFEN string");

        pos.make_move(Move::Drop {
            to: SQ_5E,
            piece_type: PieceType::Gold,
        })
        .expect("failed to make a move");

        assert_eq!(0, pos.hand(Piece::new(PieceType::Gold, Color::Black)));
        assert_eq!(
            Some(Piece::new(PieceType::Gold, Color::Black)),
            pos.piece_at(SQ_5E)
        );
    }

    #[test]
    fn find_king() {
        let cases = [
            (STARTING_SFEN, Some(SQ_5I), Some(SQ_5A)),
            ("9/3r5/9/9/6B2/9/9/9/3K5 b P 1", Some(SQ_6I), None),
            ("9/9/9/9/9/9/9/9/9 b - 1", None, None),
        ];

        let mut pos = Position::new();
        for (i, case) in cases.iter().enumerate() {
            pos.set_sfen(case.0).expect("failed to parse SFEN string");
            assert_eq!(case.1, pos.find_king(Color::Black), "failed at #{i}");
            assert_eq!(case.2, pos.find_king(Color::White), "failed at #{i}");
        }
    }

    #[test]
    fn handicap_layouts() {
        for h in Handicap::iter() {
            let pos = Position::from_handicap(h);
            assert!(pos.validate_position().is_ok(), "failed for {h:?}");

            let expected = if h == Handicap::Even {
                Color::Black
            } else {
                Color::White
            };
            assert_eq!(expected, pos.side_to_move(), "failed for {h:?}");
        }

        // The ten-piece handicap leaves White with the king and pawns only.
        let pos = Position::from_handicap(Handicap::TenPiece);
        assert_eq!(None, pos.piece_at(SQ_8B));
        assert_eq!(None, pos.piece_at(SQ_2B));
        assert_eq!(
            Some(Piece::new(PieceType::King, Color::White)),
            pos.piece_at(SQ_5A)
        );
    }
}
