use std::fmt;

use serde::{Serialize, Serializer};

use crate::error::BoardError;

/// A cell position. `x` counts columns from the left, `y` rows from the top.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Coord {
    pub x: usize,
    pub y: usize,
}

impl Coord {
    pub fn new(x: usize, y: usize) -> Self {
        Coord { x, y }
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// One of the eight unit steps used by the capture search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Direction {
    dx: i8,
    dy: i8,
}

impl Direction {
    /// All eight directions, ordered row by row from the top-left neighbour.
    pub const ALL: [Direction; 8] = [
        Direction { dx: -1, dy: -1 },
        Direction { dx: 0, dy: -1 },
        Direction { dx: 1, dy: -1 },
        Direction { dx: -1, dy: 0 },
        Direction { dx: 1, dy: 0 },
        Direction { dx: -1, dy: 1 },
        Direction { dx: 0, dy: 1 },
        Direction { dx: 1, dy: 1 },
    ];

    /// Build a direction, rejecting components outside `{-1, 0, 1}` and the
    /// zero vector.
    pub fn new(dx: i32, dy: i32) -> Result<Self, BoardError> {
        let valid = (-1..=1).contains(&dx) && (-1..=1).contains(&dy) && (dx, dy) != (0, 0);
        if !valid {
            return Err(BoardError::InvalidDirection { dx, dy });
        }
        Ok(Direction {
            dx: dx as i8,
            dy: dy as i8,
        })
    }

    pub fn dx(self) -> i32 {
        self.dx as i32
    }

    pub fn dy(self) -> i32 {
        self.dy as i32
    }

    /// Position in [`Direction::ALL`]; the 3x3 neighbourhood minus its centre.
    fn index(self) -> usize {
        let cell = ((self.dy + 1) * 3 + (self.dx + 1)) as usize;
        if cell > 4 {
            cell - 1
        } else {
            cell
        }
    }

    fn bit(self) -> u8 {
        1 << self.index()
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.dx, self.dy)
    }
}

/// A set of directions, iterated in [`Direction::ALL`] order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct DirectionSet(u8);

impl DirectionSet {
    pub fn new() -> Self {
        DirectionSet(0)
    }

    pub fn insert(&mut self, direction: Direction) {
        self.0 |= direction.bit();
    }

    pub fn contains(&self, direction: Direction) -> bool {
        self.0 & direction.bit() != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn iter(&self) -> impl Iterator<Item = Direction> + '_ {
        Direction::ALL.into_iter().filter(|&d| self.contains(d))
    }
}

impl FromIterator<Direction> for DirectionSet {
    fn from_iter<I: IntoIterator<Item = Direction>>(iter: I) -> Self {
        let mut set = DirectionSet::new();
        for direction in iter {
            set.insert(direction);
        }
        set
    }
}

impl Serialize for DirectionSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}
