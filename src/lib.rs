//! # Reversi Engine
//!
//! Rules engine for Reversi-style grid capture games with two or more
//! players: legality checks, capture-line search, move enumeration and
//! atomic move application with score bookkeeping.
//!
//! ## Modules
//!
//! - [`game`] — Board, players, capture search and the text notation
//! - [`config`] — TOML configuration loading and validation
//! - [`error`] — Structured error types
//!
//! The engine is synchronous and does no I/O. A [`game::Board`] is a plain
//! value: callers that share one across threads must serialize calls to
//! [`game::Board::apply_move`] themselves.

pub mod config;
pub mod error;
pub mod game;
