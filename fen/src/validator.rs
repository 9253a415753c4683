//! Structural validation of FEN strings
//!
//! The validator only checks the syntax of FEN. It doesn't verify that the position is reachable,
//! that both kings are present or that the side not to move is not in check.

use crate::field::FenField;

use std::fmt;

use arrayvec::ArrayVec;
use tracing::debug;

const PIECE_CHARS: &str = "pnbrqkPNBRQK";
const ROW_COUNT: usize = 8;
const ROW_LEN: usize = 8;

/// Outcome of [`validate()`]
///
/// There is exactly one success variant, [`ValidationResult::Valid`], and one variant for each kind
/// of structural failure. The discriminants are stable and returned by [`ValidationResult::code()`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ValidationResult {
    /// FEN is well-formed
    Valid = 0,
    /// En passant square is on the rank that doesn't match the side to move
    EnPassantInvalidMove = 1,
    /// En passant field is neither `-` nor a square on rank 3 or 6
    EnPassantInvalidSquare = 2,
    /// More than six fields
    FieldCountTooLarge = 3,
    /// Less than six fields
    FieldCountTooSmall = 4,
    /// Castling field is neither `-` nor a combination of `K`, `Q`, `k` and `q`
    InvalidCastlingPiece = 5,
    /// Turn is neither `w` nor `b`
    InvalidTurn = 6,
    /// Half-move clock is not a number
    HalfmoveCounterNan = 7,
    /// Full-move number is not a number
    MoveNumberNan = 8,
    /// Full-move number is zero
    MoveNumberPositive = 9,
    /// Two digits in a row inside the piece placement
    PieceConsecutiveNumbers = 10,
    /// Unknown piece char
    PieceInvalid = 11,
    /// Less than eight rows in the piece placement
    PieceNotEnoughRows = 12,
    /// Row describes less than eight squares
    PieceRowTooSmall = 13,
    /// Row describes more than eight squares
    PieceRowTooLarge = 14,
    /// More than eight rows in the piece placement
    PieceTooManyRows = 15,
}

impl ValidationResult {
    /// Returns `true` for [`ValidationResult::Valid`]
    #[inline]
    pub const fn is_valid(&self) -> bool {
        matches!(*self, Self::Valid)
    }

    /// Returns the numeric code of the result
    #[inline]
    pub const fn code(&self) -> u8 {
        *self as u8
    }

    /// Returns the field which caused the failure
    ///
    /// Returns `None` for valid FEN and for the failures related to the number of fields.
    pub const fn field(&self) -> Option<FenField> {
        match *self {
            Self::Valid | Self::FieldCountTooLarge | Self::FieldCountTooSmall => None,
            Self::EnPassantInvalidMove | Self::EnPassantInvalidSquare => Some(FenField::EnPassant),
            Self::InvalidCastlingPiece => Some(FenField::Castling),
            Self::InvalidTurn => Some(FenField::Turn),
            Self::HalfmoveCounterNan => Some(FenField::HalfMoveClock),
            Self::MoveNumberNan | Self::MoveNumberPositive => Some(FenField::MoveNumber),
            Self::PieceConsecutiveNumbers
            | Self::PieceInvalid
            | Self::PieceNotEnoughRows
            | Self::PieceRowTooSmall
            | Self::PieceRowTooLarge
            | Self::PieceTooManyRows => Some(FenField::Pieces),
        }
    }

    fn description(&self) -> &'static str {
        match *self {
            Self::Valid => "valid",
            Self::EnPassantInvalidMove => "en passant square doesn't match side to move",
            Self::EnPassantInvalidSquare => "invalid en passant square",
            Self::FieldCountTooLarge => "too many fields",
            Self::FieldCountTooSmall => "not enough fields",
            Self::InvalidCastlingPiece => "invalid castling rights",
            Self::InvalidTurn => "invalid turn",
            Self::HalfmoveCounterNan => "half-move clock is not a number",
            Self::MoveNumberNan => "full-move number is not a number",
            Self::MoveNumberPositive => "full-move number is not positive",
            Self::PieceConsecutiveNumbers => "consecutive numbers in piece placement",
            Self::PieceInvalid => "invalid piece",
            Self::PieceNotEnoughRows => "not enough rows",
            Self::PieceRowTooSmall => "row is too small",
            Self::PieceRowTooLarge => "row is too large",
            Self::PieceTooManyRows => "too many rows",
        }
    }
}

impl fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{}", self.description())
    }
}

/// Splits FEN into exactly six fields
///
/// On failure, returns the actual number of fields.
pub(crate) fn split_fields(fen: &str) -> Result<[&str; FenField::COUNT], usize> {
    let mut fields = ArrayVec::<&str, { FenField::COUNT }>::new();
    let mut iter = fen.split(' ');
    for field in iter.by_ref() {
        if fields.try_push(field).is_err() {
            return Err(FenField::COUNT + 1 + iter.count());
        }
    }
    fields.into_inner().map_err(|fields| fields.len())
}

fn is_number(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

fn check_move_number(s: &str) -> Result<(), ValidationResult> {
    if !is_number(s) {
        return Err(ValidationResult::MoveNumberNan);
    }
    if s.bytes().all(|b| b == b'0') {
        return Err(ValidationResult::MoveNumberPositive);
    }
    Ok(())
}

fn check_half_move_clock(s: &str) -> Result<(), ValidationResult> {
    if !is_number(s) {
        return Err(ValidationResult::HalfmoveCounterNan);
    }
    Ok(())
}

fn check_en_passant(s: &str) -> Result<(), ValidationResult> {
    match s.as_bytes() {
        [b'-'] | [b'a'..=b'h', b'3' | b'6'] => Ok(()),
        _ => Err(ValidationResult::EnPassantInvalidSquare),
    }
}

fn check_castling(s: &str) -> Result<(), ValidationResult> {
    if s == "-" || (!s.is_empty() && s.chars().all(|c| matches!(c, 'K' | 'Q' | 'k' | 'q'))) {
        return Ok(());
    }
    Err(ValidationResult::InvalidCastlingPiece)
}

fn check_turn(s: &str) -> Result<(), ValidationResult> {
    match s {
        "w" | "b" => Ok(()),
        _ => Err(ValidationResult::InvalidTurn),
    }
}

fn check_row(row: &str) -> Result<(), ValidationResult> {
    type Error = ValidationResult;

    let mut sum = 0_usize;
    let mut prev_digit = false;
    for ch in row.chars() {
        match ch.to_digit(10) {
            Some(d) => {
                if prev_digit {
                    return Err(Error::PieceConsecutiveNumbers);
                }
                sum += d as usize;
                prev_digit = true;
            }
            None => {
                if !PIECE_CHARS.contains(ch) {
                    return Err(Error::PieceInvalid);
                }
                sum += 1;
                prev_digit = false;
            }
        }
    }

    if sum < ROW_LEN {
        return Err(Error::PieceRowTooSmall);
    }
    if sum > ROW_LEN {
        return Err(Error::PieceRowTooLarge);
    }
    Ok(())
}

fn check_pieces(s: &str) -> Result<(), ValidationResult> {
    let rows = s.split('/').count();
    if rows < ROW_COUNT {
        return Err(ValidationResult::PieceNotEnoughRows);
    }
    if rows > ROW_COUNT {
        return Err(ValidationResult::PieceTooManyRows);
    }
    s.split('/').try_for_each(check_row)
}

fn check_en_passant_turn(en_passant: &str, turn: &str) -> Result<(), ValidationResult> {
    match (en_passant.as_bytes(), turn) {
        ([_, b'3'], "w") | ([_, b'6'], "b") => Err(ValidationResult::EnPassantInvalidMove),
        _ => Ok(()),
    }
}

fn check(fen: &str) -> Result<(), ValidationResult> {
    let fields = split_fields(fen).map_err(|count| {
        if count < FenField::COUNT {
            ValidationResult::FieldCountTooSmall
        } else {
            ValidationResult::FieldCountTooLarge
        }
    })?;
    let field = |f: FenField| fields[f.index()];

    check_move_number(field(FenField::MoveNumber))?;
    check_half_move_clock(field(FenField::HalfMoveClock))?;
    check_en_passant(field(FenField::EnPassant))?;
    check_castling(field(FenField::Castling))?;
    check_turn(field(FenField::Turn))?;
    check_pieces(field(FenField::Pieces))?;
    check_en_passant_turn(field(FenField::EnPassant), field(FenField::Turn))?;
    Ok(())
}

/// Classifies `fen` as valid or as one of the structural failures
///
/// The checks are run in a fixed order, and the first failed check determines the result:
///
/// 1. number of fields
/// 2. full-move number
/// 3. half-move clock
/// 4. en passant square
/// 5. castling rights
/// 6. turn
/// 7. piece placement, row by row
/// 8. en passant square against the side to move
///
/// The function never panics and always returns a result.
///
/// # Example
///
/// ```
/// # use fen_notation::{validate, ValidationResult};
/// #
/// assert_eq!(
///     validate("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"),
///     ValidationResult::Valid,
/// );
/// assert_eq!(
///     validate("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR"),
///     ValidationResult::FieldCountTooSmall,
/// );
/// ```
pub fn validate(fen: &str) -> ValidationResult {
    match check(fen) {
        Ok(()) => ValidationResult::Valid,
        Err(res) => {
            debug!(fen, code = res.code(), reason = %res, "rejected FEN");
            res
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::seq::SliceRandom;
    use rand::{Rng, SeedableRng};

    const INI_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

    #[test]
    fn test_valid() {
        assert_eq!(validate(INI_FEN), ValidationResult::Valid);
        assert_eq!(
            validate("rnbqkbnr/pp1ppppp/8/2p5/4P3/8/PPPP1PPP/RNBQKBNR w KQkq c6 0 2"),
            ValidationResult::Valid
        );
        assert_eq!(
            validate("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1"),
            ValidationResult::Valid
        );
        assert_eq!(
            validate("1rq1r1k1/1p3ppp/pB3n2/3ppP2/Pbb1P3/1PN2B2/2P2QPP/R1R4K w - - 1 21"),
            ValidationResult::Valid
        );
        assert!(validate(INI_FEN).is_valid());
    }

    #[test]
    fn test_field_count() {
        assert_eq!(
            validate("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR"),
            ValidationResult::FieldCountTooSmall
        );
        assert_eq!(validate(""), ValidationResult::FieldCountTooSmall);
        assert_eq!(
            validate("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR b KQkq - 0 1 abc"),
            ValidationResult::FieldCountTooLarge
        );
        // Fields are separated by single spaces, so double space yields an extra empty field
        assert_eq!(
            validate("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR  w KQkq - 0 1"),
            ValidationResult::FieldCountTooLarge
        );
        assert_eq!(
            validate("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR\tw KQkq - 0 1"),
            ValidationResult::FieldCountTooSmall
        );
    }

    #[test]
    fn test_split_fields() {
        assert_eq!(
            split_fields(INI_FEN),
            Ok([
                "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR",
                "w",
                "KQkq",
                "-",
                "0",
                "1"
            ])
        );
        assert_eq!(split_fields("a b"), Err(2));
        assert_eq!(split_fields(""), Err(1));
        assert_eq!(split_fields("a b c d e f g h"), Err(8));
    }

    #[test]
    fn test_move_number() {
        assert_eq!(
            validate("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR b KQkq - 0 a"),
            ValidationResult::MoveNumberNan
        );
        assert_eq!(
            validate("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR b KQkq - 0 -1"),
            ValidationResult::MoveNumberNan
        );
        assert_eq!(
            validate("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR b KQkq - 0 "),
            ValidationResult::MoveNumberNan
        );
        assert_eq!(
            validate("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR b KQkq - 0 0"),
            ValidationResult::MoveNumberPositive
        );
        assert_eq!(
            validate("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR b KQkq - 0 000"),
            ValidationResult::MoveNumberPositive
        );
        assert_eq!(
            validate("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR b KQkq - 0 1"),
            ValidationResult::Valid
        );
    }

    #[test]
    fn test_half_move_clock() {
        assert_eq!(
            validate("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR b KQkq - a 1"),
            ValidationResult::HalfmoveCounterNan
        );
        assert_eq!(
            validate("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR b KQkq - +3 1"),
            ValidationResult::HalfmoveCounterNan
        );
        assert_eq!(
            validate("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR b KQkq - 0 1"),
            ValidationResult::Valid
        );
    }

    #[test]
    fn test_en_passant_square() {
        for ep in ["a", "a1", "i3", "A3", "e33", "e4", "--", "3e"] {
            let fen = format!("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq {} 0 1", ep);
            assert_eq!(
                validate(&fen),
                ValidationResult::EnPassantInvalidSquare,
                "{}",
                ep
            );
        }
    }

    #[test]
    fn test_en_passant_move() {
        assert_eq!(
            validate("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq a3 0 1"),
            ValidationResult::EnPassantInvalidMove
        );
        assert_eq!(
            validate("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR b KQkq h6 0 1"),
            ValidationResult::EnPassantInvalidMove
        );
        assert_eq!(
            validate("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR b KQkq a3 0 1"),
            ValidationResult::Valid
        );
        assert_eq!(
            validate("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq h6 0 1"),
            ValidationResult::Valid
        );
    }

    #[test]
    fn test_castling() {
        assert_eq!(
            validate("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR b e - 0 1"),
            ValidationResult::InvalidCastlingPiece
        );
        assert_eq!(
            validate("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkqR - 0 1"),
            ValidationResult::InvalidCastlingPiece
        );
        assert_eq!(
            validate("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w K- - 0 1"),
            ValidationResult::InvalidCastlingPiece
        );
        assert_eq!(
            validate("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w K|q - 0 1"),
            ValidationResult::InvalidCastlingPiece
        );
        for castling in ["-", "K", "qQKk", "KKKK", "kq"] {
            let fen = format!(
                "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w {} - 0 1",
                castling
            );
            assert_eq!(validate(&fen), ValidationResult::Valid, "{}", castling);
        }
    }

    #[test]
    fn test_turn() {
        assert_eq!(
            validate("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR l KQkq - 0 1"),
            ValidationResult::InvalidTurn
        );
        assert_eq!(
            validate("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR W KQkq - 0 1"),
            ValidationResult::InvalidTurn
        );
        assert_eq!(
            validate("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR wb KQkq - 0 1"),
            ValidationResult::InvalidTurn
        );
    }

    #[test]
    fn test_pieces() {
        assert_eq!(
            validate("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP b KQkq - 0 1"),
            ValidationResult::PieceNotEnoughRows
        );
        assert_eq!(
            validate("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR/8 b KQkq - 0 1"),
            ValidationResult::PieceTooManyRows
        );
        assert_eq!(
            validate("rnbqkbnr/pppppppp/8/8/8/8/88/RNBQKBNR b KQkq - 0 1"),
            ValidationResult::PieceConsecutiveNumbers
        );
        assert_eq!(
            validate("rnbqkbnr/pppppppp/8/8/8/8/PgPPPPPP/RNBQKBNR b KQkq - 0 1"),
            ValidationResult::PieceInvalid
        );
        assert_eq!(
            validate("rnbqkbnr/p4p/8/8/8/8/PPPPPPPP/RNBQKBNR b KQkq - 0 1"),
            ValidationResult::PieceRowTooSmall
        );
        assert_eq!(
            validate("rnbqkbnr/p8p/8/8/8/8/PPPPPPPP/RNBQKBNR b KQkq - 0 1"),
            ValidationResult::PieceRowTooLarge
        );
        assert_eq!(
            validate("rnbqkbnr/pppppppp//8/8/8/PPPPPPPP/RNBQKBNR b KQkq - 0 1"),
            ValidationResult::PieceRowTooSmall
        );
        assert_eq!(
            validate("rnbqkbnr/pppppppp/9/8/8/8/PPPPPPPP/RNBQKBNR b KQkq - 0 1"),
            ValidationResult::PieceRowTooLarge
        );
        assert_eq!(
            validate("rnbqkbnr/pppppppp/08/8/8/8/PPPPPPPP/RNBQKBNR b KQkq - 0 1"),
            ValidationResult::PieceConsecutiveNumbers
        );
        assert_eq!(
            validate("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNé b KQkq - 0 1"),
            ValidationResult::PieceInvalid
        );
    }

    #[test]
    fn test_no_chess_rules() {
        assert_eq!(
            validate("kkkkkkkk/8/8/8/8/8/8/KKKKKKKK w - - 0 1"),
            ValidationResult::Valid
        );
        assert_eq!(
            validate("8/8/8/8/8/8/8/8 w KQkq - 0 1"),
            ValidationResult::Valid
        );
    }

    #[test]
    fn test_row_order() {
        // The first failing row determines the result
        assert_eq!(
            validate("rnbqkbnr/p8p/8/8/8/8/PgPPPPPP/RNBQKBNR b KQkq - 0 1"),
            ValidationResult::PieceRowTooLarge
        );
        assert_eq!(
            validate("rnbqkbnr/pgpppppp/8/8/8/8/PPPPPPPP/RNBQKBN b KQkq - 0 1"),
            ValidationResult::PieceInvalid
        );
    }

    #[test]
    fn test_check_order() {
        assert_eq!(
            validate("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR l KQkq - 0"),
            ValidationResult::FieldCountTooSmall
        );
        assert_eq!(
            validate("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR l e a1 x y"),
            ValidationResult::MoveNumberNan
        );
        assert_eq!(
            validate("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR l e a1 x 1"),
            ValidationResult::HalfmoveCounterNan
        );
        assert_eq!(
            validate("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR l e a1 0 1"),
            ValidationResult::EnPassantInvalidSquare
        );
        assert_eq!(
            validate("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR l e a3 0 1"),
            ValidationResult::InvalidCastlingPiece
        );
        assert_eq!(
            validate("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR l - a3 0 1"),
            ValidationResult::InvalidTurn
        );
        assert_eq!(
            validate("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP w - a3 0 1"),
            ValidationResult::PieceNotEnoughRows
        );
        assert_eq!(
            validate("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w - a3 0 1"),
            ValidationResult::EnPassantInvalidMove
        );
    }

    #[test]
    fn test_result_info() {
        assert_eq!(ValidationResult::Valid.code(), 0);
        assert_eq!(ValidationResult::EnPassantInvalidMove.code(), 1);
        assert_eq!(ValidationResult::HalfmoveCounterNan.code(), 7);
        assert_eq!(ValidationResult::PieceTooManyRows.code(), 15);
        assert_eq!(ValidationResult::Valid.field(), None);
        assert_eq!(ValidationResult::FieldCountTooLarge.field(), None);
        assert_eq!(
            ValidationResult::EnPassantInvalidMove.field(),
            Some(FenField::EnPassant)
        );
        assert_eq!(
            ValidationResult::PieceRowTooSmall.field(),
            Some(FenField::Pieces)
        );
        assert_eq!(ValidationResult::InvalidTurn.to_string(), "invalid turn");
        assert!(!ValidationResult::InvalidTurn.is_valid());
    }

    #[test]
    fn test_random_strings() {
        let mut rng = StdRng::seed_from_u64(1337);
        let alphabet: Vec<char> = "pnbrqkPNBRQKwb-/ 0123456789aehx36é\t".chars().collect();
        for _ in 0..2000 {
            let len = rng.gen_range(0..80);
            let s: String = (0..len)
                .map(|_| *alphabet.choose(&mut rng).unwrap())
                .collect();
            let res = validate(&s);
            assert!(res.code() <= 15);
            if res.is_valid() {
                assert_eq!(split_fields(&s).map(|f| f.len()), Ok(FenField::COUNT));
            }
        }

        // Mutate single chars of a valid FEN
        for _ in 0..2000 {
            let mut chars: Vec<char> = INI_FEN.chars().collect();
            let pos = rng.gen_range(0..chars.len());
            chars[pos] = *alphabet.choose(&mut rng).unwrap();
            let s: String = chars.into_iter().collect();
            let _ = validate(&s);
        }
    }
}
