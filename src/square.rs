use crate::Color;
use std::fmt;
use std::iter;
use std::str::FromStr;

const ASCII_1: u8 = b'1';
const ASCII_LOWER_A: u8 = b'a';

/// The number of files on the board.
pub const NUM_FILES: u8 = 9;

/// The number of ranks on the board.
pub const NUM_RANKS: u8 = 9;

/// Represents a position of each cell in the 9×9 game board.
///
/// Both coordinates are 0-indexed: `file` runs from 0 (SFEN file `1`) to 8
/// (SFEN file `9`), `rank` runs from 0 (SFEN rank `a`) to 8 (SFEN rank `i`).
/// Out-of-range construction fails.
///
/// # Examples
///
/// ```
/// use shogiban::Square;
///
/// let sq = Square::new(4, 4).unwrap();
/// assert_eq!("5e", sq.to_string());
/// ```
///
/// `Square` can be created by parsing a SFEN formatted string as well.
///
/// ```
/// use shogiban::Square;
///
/// let sq = Square::from_sfen("5e").unwrap();
/// assert_eq!(4, sq.file());
/// assert_eq!(4, sq.rank());
/// ```
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Square {
    inner: u8,
}

impl Square {
    /// The total number of squares on the board.
    pub const NUM_SQUARES: usize = (NUM_FILES as usize) * (NUM_RANKS as usize);

    /// Creates a new instance of `Square`.
    ///
    /// `file` can take a value from 0 to 8, as can `rank`.
    pub fn new(file: u8, rank: u8) -> Option<Square> {
        if file >= NUM_FILES || rank >= NUM_RANKS {
            return None;
        }

        Some(Square {
            inner: file * NUM_RANKS + rank,
        })
    }

    /// Creates a new instance of `Square` from SFEN formatted string.
    ///
    /// Files are the digits `1`-`9`, ranks the letters `a`-`i`.
    pub fn from_sfen(s: &str) -> Option<Square> {
        let bytes: &[u8] = s.as_bytes();

        if bytes.len() != 2 {
            return None;
        }

        let file_char = bytes[0];
        if file_char < ASCII_1 || file_char >= ASCII_1 + NUM_FILES {
            return None;
        }

        let rank_char = bytes[1];
        if rank_char < ASCII_LOWER_A || rank_char >= ASCII_LOWER_A + NUM_RANKS {
            return None;
        }

        Square::new(file_char - ASCII_1, rank_char - ASCII_LOWER_A)
    }

    /// Creates a new instance of `Square` with the given index value.
    pub fn from_index(index: u8) -> Option<Square> {
        if index as usize >= Square::NUM_SQUARES {
            return None;
        }

        Some(Square { inner: index })
    }

    /// Returns an iterator of all squares on the board.
    pub fn iter() -> SquareIter {
        SquareIter { current: 0 }
    }

    /// Returns the file (column) of the square (0-indexed).
    pub fn file(self) -> u8 {
        self.inner / NUM_RANKS
    }

    /// Returns the rank (row) of the square (0-indexed).
    pub fn rank(self) -> u8 {
        self.inner % NUM_RANKS
    }

    /// Returns a new `Square` instance by moving the file and the rank values.
    ///
    /// # Examples
    ///
    /// ```
    /// use shogiban::square::consts::*;
    ///
    /// let sq = SQ_2B;
    /// let shifted = sq.shift(2, 3).unwrap();
    ///
    /// assert_eq!(3, shifted.file());
    /// assert_eq!(4, shifted.rank());
    /// ```
    #[must_use]
    pub fn shift(self, df: i8, dr: i8) -> Option<Square> {
        let f = self.file() as i8 + df;
        let r = self.rank() as i8 + dr;

        if !(0..NUM_FILES as i8).contains(&f) || !(0..NUM_RANKS as i8).contains(&r) {
            return None;
        }

        Square::new(f as u8, r as u8)
    }

    /// Returns a relative rank as if the specified color is black.
    ///
    /// For black, returns the rank as-is (0 = furthest from black's side).
    /// For white, returns 8-rank.
    ///
    /// # Examples
    ///
    /// ```
    /// use shogiban::Color;
    /// use shogiban::square::consts::*;
    ///
    /// let sq = SQ_1G;
    ///
    /// assert_eq!(6, sq.relative_rank(Color::Black));
    /// assert_eq!(2, sq.relative_rank(Color::White));
    /// ```
    pub fn relative_rank(self, c: Color) -> u8 {
        if c == Color::Black {
            self.rank()
        } else {
            NUM_RANKS - 1 - self.rank()
        }
    }

    /// Converts the instance into the unique number for array indexing purpose.
    #[inline(always)]
    pub fn index(self) -> usize {
        self.inner as usize
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        debug_assert!(
            self.file() < NUM_FILES && self.rank() < NUM_RANKS,
            "trying to stringify an invalid square: {self:?}"
        );
        write!(
            f,
            "{}{}",
            (self.file() + ASCII_1) as char,
            (self.rank() + ASCII_LOWER_A) as char
        )
    }
}

/// Error type for parsing a square from SFEN notation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid square notation")]
pub struct ParseSquareError;

impl FromStr for Square {
    type Err = ParseSquareError;

    /// Parses a square from SFEN notation (e.g., "7g", "5e").
    ///
    /// # Examples
    ///
    /// ```
    /// use shogiban::Square;
    ///
    /// let sq: Square = "7g".parse().unwrap();
    /// assert_eq!(sq.file(), 6);
    /// assert_eq!(sq.rank(), 6);
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Square::from_sfen(s).ok_or(ParseSquareError)
    }
}

/// Square constants covering all 81 squares.
pub mod consts {
    use super::Square;

    macro_rules! make_square {
        {0, $t:ident $($ts:ident)+} => {
            pub const $t: Square = Square { inner: 0 };
            make_square!{1, $($ts)*}
        };
        {$n:expr, $t:ident $($ts:ident)+} => {
            pub const $t: Square = Square { inner: $n };
            make_square!{($n + 1), $($ts)*}
        };
        {$n:expr, $t:ident} => {
            pub const $t: Square = Square { inner: $n };
        };
    }

    make_square! {0, SQ_1A SQ_1B SQ_1C SQ_1D SQ_1E SQ_1F SQ_1G SQ_1H SQ_1I
    SQ_2A SQ_2B SQ_2C SQ_2D SQ_2E SQ_2F SQ_2G SQ_2H SQ_2I
    SQ_3A SQ_3B SQ_3C SQ_3D SQ_3E SQ_3F SQ_3G SQ_3H SQ_3I
    SQ_4A SQ_4B SQ_4C SQ_4D SQ_4E SQ_4F SQ_4G SQ_4H SQ_4I
    SQ_5A SQ_5B SQ_5C SQ_5D SQ_5E SQ_5F SQ_5G SQ_5H SQ_5I
    SQ_6A SQ_6B SQ_6C SQ_6D SQ_6E SQ_6F SQ_6G SQ_6H SQ_6I
    SQ_7A SQ_7B SQ_7C SQ_7D SQ_7E SQ_7F SQ_7G SQ_7H SQ_7I
    SQ_8A SQ_8B SQ_8C SQ_8D SQ_8E SQ_8F SQ_8G SQ_8H SQ_8I
    SQ_9A SQ_9B SQ_9C SQ_9D SQ_9E SQ_9F SQ_9G SQ_9H SQ_9I}
}

/// This struct is created by the [`iter`] method on [`Square`].
///
/// [`iter`]: ./struct.Square.html#method.iter
/// [`Square`]: struct.Square.html
pub struct SquareIter {
    current: u8,
}

impl iter::Iterator for SquareIter {
    type Item = Square;

    fn next(&mut self) -> Option<Self::Item> {
        let cur = self.current;

        if cur as usize >= Square::NUM_SQUARES {
            return None;
        }

        self.current += 1;

        Some(Square { inner: cur })
    }
}
