//! # Forsyth-Edwards Notation
//!
//! Parser, validator and serializer for FEN strings. The crate checks the syntax of all the six
//! fields and decodes them into a [`FenPosition`]. It doesn't know anything about chess rules, so
//! validated positions may be unreachable.
//!
//! # Example
//!
//! ```
//! use fen_notation::{validate, FenPosition, ValidationResult, DEFAULT_FEN};
//!
//! assert_eq!(validate(DEFAULT_FEN), ValidationResult::Valid);
//! assert_eq!(
//!     validate("rnbqkbnr/pppppppp/8/8/8/8/88/RNBQKBNR b KQkq - 0 1"),
//!     ValidationResult::PieceConsecutiveNumbers,
//! );
//!
//! let pos = FenPosition::from_fen(DEFAULT_FEN).unwrap();
//! assert!(pos.is_white_turn());
//! assert!(pos.castling().without_black().is_white_king_side_available());
//! assert_eq!(pos.as_fen(), DEFAULT_FEN);
//! ```

pub mod field;
pub mod position;
pub mod validator;

pub use fen_notation_base::types;

pub use field::FenField;
pub use position::{FenPosition, InvalidFenError, DEFAULT_FEN};
pub use types::{
    CastlingRights, CastlingSide, Color, File, InvalidCastlingValue, Rank, Square,
};
pub use validator::{validate, ValidationResult};
