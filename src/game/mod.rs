//! Core capture-game rules: board representation, player roster, capture
//! search and atomic move application.

mod board;
mod geometry;
pub mod notation;
mod player;

pub use board::{Board, Cell, MoveOutcome, MAX_PLAYERS, MAX_SIDE, MIN_PLAYERS, MIN_SIDE};
pub use geometry::{Coord, Direction, DirectionSet};
pub use player::{Player, PlayerId};
