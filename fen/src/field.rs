//! Fields of FEN

use std::fmt;

/// One of the six space-separated fields of FEN
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum FenField {
    /// Piece placement, eight `/`-separated rows
    Pieces = 0,
    /// Side to move
    Turn = 1,
    /// Castling rights
    Castling = 2,
    /// En passant target square
    EnPassant = 3,
    /// Half-move clock
    HalfMoveClock = 4,
    /// Full-move number
    MoveNumber = 5,
}

impl FenField {
    /// Number of fields in a complete FEN
    pub const COUNT: usize = 6;

    /// Returns the position of the field inside FEN
    #[inline]
    pub const fn index(&self) -> usize {
        *self as u8 as usize
    }

    /// Iterates over all the fields in the order they appear in FEN
    pub fn iter() -> impl Iterator<Item = Self> {
        [
            Self::Pieces,
            Self::Turn,
            Self::Castling,
            Self::EnPassant,
            Self::HalfMoveClock,
            Self::MoveNumber,
        ]
        .into_iter()
    }

    fn name(&self) -> &'static str {
        match *self {
            Self::Pieces => "piece placement",
            Self::Turn => "turn",
            Self::Castling => "castling rights",
            Self::EnPassant => "en passant",
            Self::HalfMoveClock => "half-move clock",
            Self::MoveNumber => "full-move number",
        }
    }
}

impl fmt::Display for FenField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{}", self.name())
    }
}
