//! Validated FEN position

use crate::field::FenField;
use crate::types::{CastlingRights, Color, Square};
use crate::validator::{self, ValidationResult};

use std::fmt::{self, Display};
use std::str::FromStr;

use thiserror::Error;
use tracing::warn;

/// FEN of the initial position
pub const DEFAULT_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

const DEFAULT_PIECES: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR";

/// Error creating [`FenPosition`] from a string
///
/// Each variant contains the offending FEN.
#[derive(Debug, Clone, Error, Eq, PartialEq)]
pub enum InvalidFenError {
    /// FEN passed validation, but still cannot be decoded
    #[error("unexpected error while parsing FEN {fen:?}")]
    UnexpectedError { fen: String },
    /// Bad castling rights
    #[error("invalid castling rights in FEN {fen:?}")]
    InvalidCastlingPiece { fen: String },
    /// En passant square doesn't match the side to move
    #[error("illegal en passant square in FEN {fen:?}")]
    EnPassantIllegal { fen: String },
    /// Bad en passant square
    #[error("invalid en passant square in FEN {fen:?}")]
    EnPassantInvalidSquare { fen: String },
    /// FEN doesn't contain exactly six fields
    #[error("FEN {fen:?} must contain 6 fields, but contains {count}")]
    IncorrectFieldCount { fen: String, count: usize },
    /// Half-move clock is not a number
    #[error("invalid half-move clock in FEN {fen:?}")]
    WrongHalfMoveCounter { fen: String },
    /// Bad side to move
    #[error("invalid turn in FEN {fen:?}")]
    InvalidTurn { fen: String },
    /// Full-move number is not a positive number
    #[error("invalid full-move number in FEN {fen:?}")]
    WrongMoveNumber { fen: String },
    /// Piece placement contains a bad char or two digits in a row
    #[error("invalid piece placement in FEN {fen:?}")]
    InvalidPiecePlacement { fen: String },
    /// One of the rows doesn't describe exactly eight squares
    #[error("invalid row length in piece placement of FEN {fen:?}")]
    IncorrectPiecePlacementRowLength { fen: String },
    /// Piece placement doesn't contain exactly eight rows
    #[error("invalid number of rows in piece placement of FEN {fen:?}")]
    IncorrectPiecePlacementRowsLength { fen: String },
}

impl InvalidFenError {
    /// Converts the result of [`validate()`](crate::validate) for `fen` into an error
    ///
    /// Returns `None` if the result is [`ValidationResult::Valid`].
    pub fn from_result(res: ValidationResult, fen: &str) -> Option<InvalidFenError> {
        type R = ValidationResult;

        let fen = fen.to_string();
        Some(match res {
            R::Valid => return None,
            R::FieldCountTooLarge | R::FieldCountTooSmall => {
                let count = fen.split(' ').count();
                Self::IncorrectFieldCount { fen, count }
            }
            R::MoveNumberNan | R::MoveNumberPositive => Self::WrongMoveNumber { fen },
            R::HalfmoveCounterNan => Self::WrongHalfMoveCounter { fen },
            R::EnPassantInvalidSquare => Self::EnPassantInvalidSquare { fen },
            R::InvalidCastlingPiece => Self::InvalidCastlingPiece { fen },
            R::InvalidTurn => Self::InvalidTurn { fen },
            R::PieceNotEnoughRows | R::PieceTooManyRows => {
                Self::IncorrectPiecePlacementRowsLength { fen }
            }
            R::PieceConsecutiveNumbers | R::PieceInvalid => Self::InvalidPiecePlacement { fen },
            R::PieceRowTooSmall | R::PieceRowTooLarge => {
                Self::IncorrectPiecePlacementRowLength { fen }
            }
            R::EnPassantInvalidMove => Self::EnPassantIllegal { fen },
        })
    }

    /// Returns the FEN which caused the error
    pub fn fen(&self) -> &str {
        match self {
            Self::UnexpectedError { fen }
            | Self::InvalidCastlingPiece { fen }
            | Self::EnPassantIllegal { fen }
            | Self::EnPassantInvalidSquare { fen }
            | Self::IncorrectFieldCount { fen, .. }
            | Self::WrongHalfMoveCounter { fen }
            | Self::InvalidTurn { fen }
            | Self::WrongMoveNumber { fen }
            | Self::InvalidPiecePlacement { fen }
            | Self::IncorrectPiecePlacementRowLength { fen }
            | Self::IncorrectPiecePlacementRowsLength { fen } => fen,
        }
    }

    fn unexpected(fen: &str, field: FenField) -> InvalidFenError {
        warn!(fen, %field, "FEN passed validation, but the field cannot be decoded");
        Self::UnexpectedError {
            fen: fen.to_string(),
        }
    }
}

/// Decodes a move counter which has already passed validation
///
/// Values beyond `u64::MAX` saturate.
fn parse_counter(s: &str) -> u64 {
    s.bytes().fold(0_u64, |acc, b| {
        acc.saturating_mul(10).saturating_add(u64::from(b - b'0'))
    })
}

/// Chess position decoded from a valid FEN
///
/// The position can only be created from a string which passes [`validate()`](crate::validate).
/// It is not modified after creation.
///
/// The checks are purely syntactic, so the position may be unreachable or even contain no kings.
///
/// # Example
///
/// ```
/// # use fen_notation::{FenPosition, Color};
/// #
/// let pos = FenPosition::from_fen("rnbqkbnr/pp1ppppp/8/2p5/4P3/8/PPPP1PPP/RNBQKBNR w KQkq c6 0 2").unwrap();
/// assert_eq!(pos.turn(), Color::White);
/// assert_eq!(pos.en_passant().unwrap().to_string(), "c6");
/// assert_eq!(pos.full_move_number(), 2);
/// assert_eq!(pos.as_epd(), "rnbqkbnr/pp1ppppp/8/2p5/4P3/8/PPPP1PPP/RNBQKBNR w KQkq c6");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FenPosition {
    pieces: String,
    turn: Color,
    castling: CastlingRights,
    en_passant: Option<Square>,
    half_move_clock: u64,
    full_move_number: u64,
}

impl FenPosition {
    /// Returns the initial position, the one described by [`DEFAULT_FEN`]
    pub fn initial() -> FenPosition {
        FenPosition {
            pieces: DEFAULT_PIECES.to_string(),
            turn: Color::White,
            castling: CastlingRights::FULL,
            en_passant: None,
            half_move_clock: 0,
            full_move_number: 1,
        }
    }

    /// Parses a position from FEN
    ///
    /// Does the same as [`FenPosition::from_str`]. It is recommended to use this function instead of
    /// `from_str()` for better readability.
    pub fn from_fen(fen: &str) -> Result<FenPosition, InvalidFenError> {
        if let Some(err) = InvalidFenError::from_result(validator::validate(fen), fen) {
            return Err(err);
        }

        let fields = validator::split_fields(fen).map_err(|count| {
            InvalidFenError::IncorrectFieldCount {
                fen: fen.to_string(),
                count,
            }
        })?;
        let field = |f: FenField| fields[f.index()];

        let turn = Color::from_str(field(FenField::Turn))
            .map_err(|_| InvalidFenError::unexpected(fen, FenField::Turn))?;
        let castling = CastlingRights::parse(field(FenField::Castling))
            .map_err(|_| InvalidFenError::unexpected(fen, FenField::Castling))?;
        let en_passant = match field(FenField::EnPassant) {
            "-" => None,
            s => Some(
                Square::from_str(s)
                    .map_err(|_| InvalidFenError::unexpected(fen, FenField::EnPassant))?,
            ),
        };
        let half_move_clock = parse_counter(field(FenField::HalfMoveClock));
        let full_move_number = parse_counter(field(FenField::MoveNumber));

        Ok(FenPosition {
            pieces: field(FenField::Pieces).to_string(),
            turn,
            castling,
            en_passant,
            half_move_clock,
            full_move_number,
        })
    }

    /// Returns the piece placement field as is
    #[inline]
    pub fn piece_placement(&self) -> &str {
        &self.pieces
    }

    /// Returns the rows of the piece placement, starting from the 8th rank
    #[inline]
    pub fn rows(&self) -> impl Iterator<Item = &str> {
        self.pieces.split('/')
    }

    /// Returns side to move
    #[inline]
    pub fn turn(&self) -> Color {
        self.turn
    }

    #[inline]
    pub fn is_white_turn(&self) -> bool {
        self.turn == Color::White
    }

    #[inline]
    pub fn is_black_turn(&self) -> bool {
        self.turn == Color::Black
    }

    /// Returns castling rights
    #[inline]
    pub fn castling(&self) -> CastlingRights {
        self.castling
    }

    #[inline]
    pub fn can_castle_white_king_side(&self) -> bool {
        self.castling.is_white_king_side_available()
    }

    #[inline]
    pub fn can_castle_white_queen_side(&self) -> bool {
        self.castling.is_white_queen_side_available()
    }

    #[inline]
    pub fn can_castle_black_king_side(&self) -> bool {
        self.castling.is_black_king_side_available()
    }

    #[inline]
    pub fn can_castle_black_queen_side(&self) -> bool {
        self.castling.is_black_queen_side_available()
    }

    /// Returns en passant target square, i. e. the square right behind the pawn which has just
    /// made a double move
    ///
    /// The square is recorded regardless of whether the capture is possible.
    #[inline]
    pub fn en_passant(&self) -> Option<Square> {
        self.en_passant
    }

    /// Number of half-moves since the last capture or pawn move
    #[inline]
    pub fn half_move_clock(&self) -> u64 {
        self.half_move_clock
    }

    /// Move number, starts from 1 and is incremented after each move by Black
    #[inline]
    pub fn full_move_number(&self) -> u64 {
        self.full_move_number
    }

    fn fmt_epd(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{} {}", self.pieces, self.turn)?;
        if self.castling.is_unavailable() {
            write!(f, " -")
        } else {
            write!(f, " {}", self.castling)
        }
    }

    /// Converts the position into a FEN string
    ///
    /// Does the same as `FenPosition::to_string()`. It is recommended to use this function instead of
    /// `to_string()` for better readability.
    #[inline]
    pub fn as_fen(&self) -> String {
        self.to_string()
    }

    /// Converts the position into EPD-style string
    ///
    /// Unlike FEN, it doesn't contain the half-move clock and full-move number. En passant square is
    /// omitted completely if there is none.
    pub fn as_epd(&self) -> String {
        Epd(self).to_string()
    }
}

impl Default for FenPosition {
    #[inline]
    fn default() -> FenPosition {
        FenPosition::initial()
    }
}

struct Epd<'a>(&'a FenPosition);

impl<'a> Display for Epd<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        self.0.fmt_epd(f)?;
        if let Some(p) = self.0.en_passant {
            write!(f, " {}", p)?;
        }
        Ok(())
    }
}

impl Display for FenPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        self.fmt_epd(f)?;
        match self.en_passant {
            Some(p) => write!(f, " {}", p)?,
            None => write!(f, " -")?,
        };
        write!(f, " {} {}", self.half_move_clock, self.full_move_number)
    }
}

impl FromStr for FenPosition {
    type Err = InvalidFenError;

    fn from_str(s: &str) -> Result<FenPosition, Self::Err> {
        FenPosition::from_fen(s)
    }
}

impl TryFrom<&str> for FenPosition {
    type Error = InvalidFenError;

    fn try_from(s: &str) -> Result<FenPosition, Self::Error> {
        FenPosition::from_fen(s)
    }
}
