use derive_more::{BitAnd, BitAndAssign, BitOr, BitOrAssign};
use std::fmt::{self, Display};
use std::hint;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum SquareParseError {
    #[error("unexpected file char {0:?}")]
    UnexpectedFileChar(char),
    #[error("unexpected rank char {0:?}")]
    UnexpectedRankChar(char),
    #[error("invalid string length")]
    BadLength,
}

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum ColorParseError {
    #[error("unexpected color char {0:?}")]
    UnexpectedChar(char),
    #[error("invalid string length")]
    BadLength,
}

/// Castling field contains a char other than `K`, `Q`, `k`, `q` or `-`
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid castling value {value:?}: unexpected char {ch:?}")]
pub struct InvalidCastlingValue {
    pub value: String,
    pub ch: char,
}

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
#[error("raw castling rights {0} out of range")]
pub struct CastlingRightsRangeError(pub u8);

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Hash)]
#[repr(u8)]
pub enum File {
    A = 0,
    B = 1,
    C = 2,
    D = 3,
    E = 4,
    F = 5,
    G = 6,
    H = 7,
}

impl File {
    pub const fn index(&self) -> usize {
        *self as u8 as usize
    }

    const unsafe fn from_index_unchecked(val: usize) -> Self {
        match val {
            0 => File::A,
            1 => File::B,
            2 => File::C,
            3 => File::D,
            4 => File::E,
            5 => File::F,
            6 => File::G,
            7 => File::H,
            _ => hint::unreachable_unchecked(),
        }
    }

    pub const fn from_index(val: usize) -> Self {
        assert!(val < 8, "file index must be between 0 and 7");
        unsafe { Self::from_index_unchecked(val) }
    }

    pub fn iter() -> impl Iterator<Item = Self> {
        (0..8).map(|x| unsafe { Self::from_index_unchecked(x) })
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'a'..='h' => Some(Self::from_index((u32::from(c) - u32::from('a')) as usize)),
            _ => None,
        }
    }

    pub fn as_char(&self) -> char {
        (b'a' + *self as u8) as char
    }
}

impl fmt::Display for File {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{}", self.as_char())
    }
}

/// Rank of the board, numbered from the White side
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Hash)]
#[repr(u8)]
pub enum Rank {
    R1 = 0,
    R2 = 1,
    R3 = 2,
    R4 = 3,
    R5 = 4,
    R6 = 5,
    R7 = 6,
    R8 = 7,
}

impl Rank {
    pub const fn index(&self) -> usize {
        *self as u8 as usize
    }

    const unsafe fn from_index_unchecked(val: usize) -> Self {
        match val {
            0 => Rank::R1,
            1 => Rank::R2,
            2 => Rank::R3,
            3 => Rank::R4,
            4 => Rank::R5,
            5 => Rank::R6,
            6 => Rank::R7,
            7 => Rank::R8,
            _ => hint::unreachable_unchecked(),
        }
    }

    pub const fn from_index(val: usize) -> Self {
        assert!(val < 8, "rank index must be between 0 and 7");
        unsafe { Self::from_index_unchecked(val) }
    }

    pub fn iter() -> impl Iterator<Item = Self> {
        (0..8).map(|x| unsafe { Self::from_index_unchecked(x) })
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '1'..='8' => Some(Self::from_index((u32::from(c) - u32::from('1')) as usize)),
            _ => None,
        }
    }

    pub fn as_char(&self) -> char {
        (b'1' + *self as u8) as char
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{}", self.as_char())
    }
}

/// Square in algebraic notation, like `e3`
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct Square {
    file: File,
    rank: Rank,
}

impl Square {
    pub const fn from_parts(file: File, rank: Rank) -> Square {
        Square { file, rank }
    }

    pub const fn file(&self) -> File {
        self.file
    }

    pub const fn rank(&self) -> Rank {
        self.rank
    }
}

impl fmt::Debug for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "Square({})", self)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{}{}", self.file.as_char(), self.rank.as_char())
    }
}

impl FromStr for Square {
    type Err = SquareParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let (file_ch, rank_ch) = match (chars.next(), chars.next(), chars.next()) {
            (Some(file_ch), Some(rank_ch), None) => (file_ch, rank_ch),
            _ => return Err(SquareParseError::BadLength),
        };
        Ok(Square::from_parts(
            File::from_char(file_ch).ok_or(SquareParseError::UnexpectedFileChar(file_ch))?,
            Rank::from_char(rank_ch).ok_or(SquareParseError::UnexpectedRankChar(rank_ch))?,
        ))
    }
}

/// Side to move
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Color {
    White = 0,
    Black = 1,
}

impl Color {
    pub fn as_char(&self) -> char {
        match *self {
            Color::White => 'w',
            Color::Black => 'b',
        }
    }

    pub fn from_char(c: char) -> Option<Color> {
        match c {
            'w' => Some(Color::White),
            'b' => Some(Color::Black),
            _ => None,
        }
    }
}

impl Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{}", self.as_char())
    }
}

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(ch), None) => Color::from_char(ch).ok_or(ColorParseError::UnexpectedChar(ch)),
            _ => Err(ColorParseError::BadLength),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum CastlingSide {
    King = 0,
    Queen = 1,
}

/// Set of castling rights packed into four bits
///
/// Bit weights are fixed: 1 is Black king side, 2 is Black queen side, 4 is White king side
/// and 8 is White queen side. No other bits are ever set.
///
/// The value is immutable in spirit: all the derivations like [`CastlingRights::without_white()`]
/// return a new value.
#[derive(
    Default, Copy, Clone, PartialEq, Eq, Hash, BitAnd, BitAndAssign, BitOr, BitOrAssign,
)]
pub struct CastlingRights(u8);

impl CastlingRights {
    const fn to_index(c: Color, s: CastlingSide) -> u8 {
        (((c as u8) ^ 1) << 1) | s as u8
    }

    pub const EMPTY: CastlingRights = CastlingRights(0);
    pub const BLACK_KING_SIDE: CastlingRights = CastlingRights(1);
    pub const BLACK_QUEEN_SIDE: CastlingRights = CastlingRights(2);
    pub const WHITE_KING_SIDE: CastlingRights = CastlingRights(4);
    pub const WHITE_QUEEN_SIDE: CastlingRights = CastlingRights(8);
    pub const FULL: CastlingRights = CastlingRights(15);

    pub const fn from_bits(val: u8) -> CastlingRights {
        assert!(val < 16, "raw castling rights must be between 0 and 15");
        CastlingRights(val)
    }

    pub const fn bits(&self) -> u8 {
        self.0
    }

    /// Parses the castling field of FEN
    ///
    /// Characters may come in any order and may repeat, `-` adds nothing. So, `"qQKk"`,
    /// `"KQkqKQ"` and `"KQkq"` all give [`CastlingRights::FULL`], while the empty string
    /// and `"-"` give [`CastlingRights::EMPTY`].
    pub fn parse(s: &str) -> Result<CastlingRights, InvalidCastlingValue> {
        let mut res = CastlingRights::EMPTY;
        for ch in s.chars() {
            res |= match ch {
                'K' => Self::WHITE_KING_SIDE,
                'Q' => Self::WHITE_QUEEN_SIDE,
                'k' => Self::BLACK_KING_SIDE,
                'q' => Self::BLACK_QUEEN_SIDE,
                '-' => Self::EMPTY,
                _ => {
                    return Err(InvalidCastlingValue {
                        value: s.to_string(),
                        ch,
                    })
                }
            };
        }
        Ok(res)
    }

    pub const fn has(&self, c: Color, s: CastlingSide) -> bool {
        ((self.0 >> Self::to_index(c, s)) & 1) != 0
    }

    pub const fn with(self, c: Color, s: CastlingSide) -> CastlingRights {
        CastlingRights(self.0 | (1_u8 << Self::to_index(c, s)))
    }

    pub const fn without_color(self, c: Color) -> CastlingRights {
        let mask = (1_u8 << Self::to_index(c, CastlingSide::King))
            | (1_u8 << Self::to_index(c, CastlingSide::Queen));
        CastlingRights(self.0 & !mask)
    }

    pub const fn without_white(self) -> CastlingRights {
        self.without_color(Color::White)
    }

    pub const fn without_black(self) -> CastlingRights {
        self.without_color(Color::Black)
    }

    pub const fn is_unavailable(&self) -> bool {
        self.0 == 0
    }

    pub const fn is_black_king_side_available(&self) -> bool {
        self.has(Color::Black, CastlingSide::King)
    }

    pub const fn is_black_queen_side_available(&self) -> bool {
        self.has(Color::Black, CastlingSide::Queen)
    }

    pub const fn is_white_king_side_available(&self) -> bool {
        self.has(Color::White, CastlingSide::King)
    }

    pub const fn is_white_queen_side_available(&self) -> bool {
        self.has(Color::White, CastlingSide::Queen)
    }
}

impl TryFrom<u8> for CastlingRights {
    type Error = CastlingRightsRangeError;

    fn try_from(val: u8) -> Result<CastlingRights, Self::Error> {
        if val >= 16 {
            return Err(CastlingRightsRangeError(val));
        }
        Ok(CastlingRights(val))
    }
}

impl fmt::Debug for CastlingRights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        if self.is_unavailable() {
            return write!(f, "CastlingRights(-)");
        }
        write!(f, "CastlingRights({})", self)
    }
}

/// Writes the rights in the canonical order `K`, `Q`, `k`, `q`
///
/// Note that nothing is written for [`CastlingRights::EMPTY`]. FEN writers are expected to
/// put `-` in this case.
impl fmt::Display for CastlingRights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        if self.is_white_king_side_available() {
            write!(f, "K")?;
        }
        if self.is_white_queen_side_available() {
            write!(f, "Q")?;
        }
        if self.is_black_king_side_available() {
            write!(f, "k")?;
        }
        if self.is_black_queen_side_available() {
            write!(f, "q")?;
        }
        Ok(())
    }
}

impl FromStr for CastlingRights {
    type Err = InvalidCastlingValue;

    fn from_str(s: &str) -> Result<CastlingRights, Self::Err> {
        CastlingRights::parse(s)
    }
}
