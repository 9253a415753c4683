//! # Base types for fen_notation
//!
//! This is an auxiliary crate for `fen_notation`, which contains the value types of the individual
//! FEN fields. It was split from the main crate, so these types can be used without pulling in the
//! validator.
//!
//! Normally you don't want to use this crate directly. Use `fen_notation` instead.

pub mod types;

pub use types::{CastlingRights, CastlingSide, Color, File, Rank, Square};
