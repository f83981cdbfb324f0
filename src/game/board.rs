use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;
use tracing::{debug, instrument};

use super::geometry::{Coord, Direction, DirectionSet};
use super::notation;
use super::player::{Player, PlayerId};
use crate::error::{BoardError, NotationError};

pub const MIN_SIDE: usize = 2;
pub const MAX_SIDE: usize = 16;
pub const MIN_PLAYERS: usize = 2;
pub const MAX_PLAYERS: usize = 10;

static NEXT_BOARD_ID: AtomicU64 = AtomicU64::new(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Empty,
    /// Owned by the player at this seat of the roster.
    Owned(u8),
}

impl Cell {
    pub fn owner(self) -> Option<usize> {
        match self {
            Cell::Empty => None,
            Cell::Owned(seat) => Some(seat as usize),
        }
    }
}

/// Result of [`Board::apply_move`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum MoveOutcome {
    /// The piece was placed and `flipped` changed hands.
    Applied { placed: Coord, flipped: Vec<Coord> },
    /// The placement captures nothing; the board is unchanged.
    Rejected,
}

impl MoveOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, MoveOutcome::Applied { .. })
    }

    pub fn flipped(&self) -> &[Coord] {
        match self {
            MoveOutcome::Applied { flipped, .. } => flipped,
            MoveOutcome::Rejected => &[],
        }
    }
}

/// Grid of cells plus the roster of seated players.
///
/// Cells are stored row by row. Every mutating path goes through
/// [`Board::apply_move`] (or the opening setup), and every public entry point
/// validates its coordinates and player before reading the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    id: u64,
    width: usize,
    height: usize,
    cells: Vec<Cell>,
    players: Vec<Player>,
}

impl Board {
    /// Create an empty board with `num_players` zero-score players.
    pub fn new(width: usize, height: usize, num_players: usize) -> Result<Self, BoardError> {
        check_bound("width", width, MIN_SIDE, MAX_SIDE)?;
        check_bound("height", height, MIN_SIDE, MAX_SIDE)?;
        check_bound("num_players", num_players, MIN_PLAYERS, MAX_PLAYERS)?;

        Ok(Board {
            id: NEXT_BOARD_ID.fetch_add(1, Ordering::Relaxed),
            width,
            height,
            cells: vec![Cell::Empty; width * height],
            players: vec![Player::new(); num_players],
        })
    }

    /// Reset the board and seed the standard two-player opening: a 2x2 block
    /// at the centre with seat 0 on the diagonal and seat 1 on the
    /// anti-diagonal. Pieces already on the board are cleared.
    ///
    /// Boards with any other player count have no standard opening and are
    /// left untouched.
    pub fn default_start(&mut self) -> Result<&mut Self, BoardError> {
        if self.players.len() != 2 {
            return Err(BoardError::UnsupportedOpening(self.players.len()));
        }

        self.cells.fill(Cell::Empty);
        let mid_x = self.width / 2;
        let mid_y = self.height / 2;
        let seeds = [
            (mid_x - 1, mid_y - 1, 0),
            (mid_x, mid_y - 1, 1),
            (mid_x - 1, mid_y, 1),
            (mid_x, mid_y, 0),
        ];
        for (x, y, seat) in seeds {
            let index = self.index(x, y);
            self.cells[index] = Cell::Owned(seat);
        }
        for player in &mut self.players {
            player.set_score(2);
        }

        debug!(board = self.id, mid_x, mid_y, "seeded standard opening");
        Ok(self)
    }

    /// Restore a board from the text produced by [`Board::serialize`].
    ///
    /// Each player's score is set to the number of cells it owns.
    pub fn parse(text: &str, num_players: usize) -> Result<Self, NotationError> {
        let (width, rows) = notation::decode_rows(text)?;
        let mut board = Board::new(width, rows.len(), num_players)?;

        for (y, row) in rows.into_iter().enumerate() {
            for (x, cell) in row.into_iter().enumerate() {
                if let Some(owner) = cell.owner() {
                    if owner >= num_players {
                        return Err(NotationError::OwnerOutOfRange {
                            row: y,
                            col: x,
                            owner,
                            num_players,
                        });
                    }
                    board.players[owner].gain();
                }
                let index = board.index(x, y);
                board.cells[index] = cell;
            }
        }

        Ok(board)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn num_players(&self) -> usize {
        self.players.len()
    }

    /// Handle for the player at `seat`, if that seat exists.
    pub fn player(&self, seat: usize) -> Option<PlayerId> {
        (seat < self.players.len()).then(|| PlayerId {
            board: self.id,
            seat: seat as u8,
        })
    }

    /// Handles for every seated player, in seat order.
    pub fn players(&self) -> impl Iterator<Item = PlayerId> + '_ {
        (0..self.players.len()).filter_map(|seat| self.player(seat))
    }

    pub fn score(&self, player: PlayerId) -> Result<i32, BoardError> {
        let seat = self.check_player(player)?;
        Ok(self.players[seat as usize].score())
    }

    pub fn roster(&self) -> &[Player] {
        &self.players
    }

    /// Scores of all players, in seat order.
    pub fn scores(&self) -> Vec<i32> {
        self.players.iter().map(Player::score).collect()
    }

    pub fn cell(&self, x: usize, y: usize) -> Result<Cell, BoardError> {
        let index = self.check_coord(x, y)?;
        Ok(self.cells[index])
    }

    /// Number of cells currently tagged with `player`'s seat.
    pub fn owned_cells(&self, player: PlayerId) -> Result<usize, BoardError> {
        let seat = self.check_player(player)?;
        Ok(self
            .cells
            .iter()
            .filter(|&&cell| cell == Cell::Owned(seat))
            .count())
    }

    /// Directions in which a piece placed at `(x, y)` by `player` would
    /// capture. Empty when the cell is occupied or nothing is flanked.
    pub fn is_valid_move(
        &self,
        x: usize,
        y: usize,
        player: PlayerId,
    ) -> Result<DirectionSet, BoardError> {
        let index = self.check_coord(x, y)?;
        let seat = self.check_player(player)?;
        Ok(self.capture_directions(index, x, y, seat))
    }

    /// Whether placing at `(x, y)` would flank a line in direction
    /// `(dx, dy)`.
    pub fn check_for_line(
        &self,
        x: usize,
        y: usize,
        dx: i32,
        dy: i32,
        player: PlayerId,
    ) -> Result<bool, BoardError> {
        let index = self.check_coord(x, y)?;
        let direction = Direction::new(dx, dy)?;
        let seat = self.check_player(player)?;

        if self.cells[index] != Cell::Empty {
            return Ok(false);
        }
        Ok(self.flank_length(x, y, direction, seat).is_some())
    }

    /// Every empty cell where `player` has a legal move, scanned row by row
    /// from the top-left corner.
    pub fn get_valid_plays(&self, player: PlayerId) -> Result<Vec<Coord>, BoardError> {
        let seat = self.check_player(player)?;
        Ok(self.valid_plays_for(seat))
    }

    /// True when no seated player has a legal move.
    pub fn is_terminal(&self) -> bool {
        (0..self.players.len()).all(|seat| self.valid_plays_for(seat as u8).is_empty())
    }

    /// Place `player`'s piece at `(x, y)` and flip every flanked line.
    ///
    /// A placement that captures nothing is [`MoveOutcome::Rejected`] and
    /// leaves the grid and all scores as they were. Captures are collected
    /// before the first write, so an applied move is all-or-nothing.
    #[instrument(level = "debug", skip(self), fields(board = self.id))]
    pub fn apply_move(
        &mut self,
        x: usize,
        y: usize,
        player: PlayerId,
    ) -> Result<MoveOutcome, BoardError> {
        let index = self.check_coord(x, y)?;
        let seat = self.check_player(player)?;

        let directions = self.capture_directions(index, x, y, seat);
        if directions.is_empty() {
            debug!("move rejected");
            return Ok(MoveOutcome::Rejected);
        }

        let mut flipped = Vec::new();
        for direction in directions.iter() {
            let run = self.flank_length(x, y, direction, seat).unwrap_or(0);
            let mut cursor = (x, y);
            for _ in 0..run {
                cursor = match self.step(cursor.0, cursor.1, direction) {
                    Some(next) => next,
                    None => break,
                };
                flipped.push(Coord::new(cursor.0, cursor.1));
            }
        }

        self.cells[index] = Cell::Owned(seat);
        self.players[seat as usize].gain();
        for coord in &flipped {
            let cell_index = self.index(coord.x, coord.y);
            if let Some(previous) = self.cells[cell_index].owner() {
                self.players[previous].lose();
            }
            self.players[seat as usize].gain();
            self.cells[cell_index] = Cell::Owned(seat);
        }

        debug!(
            flipped = flipped.len(),
            score = self.players[seat as usize].score(),
            "move applied"
        );
        Ok(MoveOutcome::Applied {
            placed: Coord::new(x, y),
            flipped,
        })
    }

    /// Text form of the grid; see [`notation`](super::notation).
    pub fn serialize(&self) -> String {
        self.to_string()
    }

    fn valid_plays_for(&self, seat: u8) -> Vec<Coord> {
        let mut plays = Vec::new();
        for y in 0..self.height {
            for x in 0..self.width {
                let index = self.index(x, y);
                if !self.capture_directions(index, x, y, seat).is_empty() {
                    plays.push(Coord::new(x, y));
                }
            }
        }
        plays
    }

    fn capture_directions(&self, index: usize, x: usize, y: usize, seat: u8) -> DirectionSet {
        if self.cells[index] != Cell::Empty {
            return DirectionSet::new();
        }
        Direction::ALL
            .into_iter()
            .filter(|&direction| self.flank_length(x, y, direction, seat).is_some())
            .collect()
    }

    /// Length of the run of foreign pieces walked from `(x, y)` that ends on
    /// a `seat` piece, or `None` if the walk leaves the board, reaches an
    /// empty cell, or hits `seat` immediately. The origin itself is not read.
    fn flank_length(&self, x: usize, y: usize, direction: Direction, seat: u8) -> Option<usize> {
        let mut cursor = (x, y);
        let mut run = 0;
        // A line can never be longer than the board's longer side.
        for _ in 0..self.width.max(self.height) {
            cursor = self.step(cursor.0, cursor.1, direction)?;
            match self.cells[self.index(cursor.0, cursor.1)] {
                Cell::Empty => return None,
                Cell::Owned(owner) if owner == seat => return (run > 0).then_some(run),
                Cell::Owned(_) => run += 1,
            }
        }
        None
    }

    fn step(&self, x: usize, y: usize, direction: Direction) -> Option<(usize, usize)> {
        let nx = x.checked_add_signed(direction.dx() as isize)?;
        let ny = y.checked_add_signed(direction.dy() as isize)?;
        (nx < self.width && ny < self.height).then_some((nx, ny))
    }

    fn index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    fn check_coord(&self, x: usize, y: usize) -> Result<usize, BoardError> {
        if x >= self.width || y >= self.height {
            return Err(BoardError::OutOfRange {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        Ok(self.index(x, y))
    }

    fn check_player(&self, player: PlayerId) -> Result<u8, BoardError> {
        if player.board != self.id || player.seat() >= self.players.len() {
            return Err(BoardError::InvalidPlayer);
        }
        Ok(player.seat)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (y, row) in self.cells.chunks(self.width).enumerate() {
            if y > 0 {
                writeln!(f)?;
            }
            for &cell in row {
                write!(f, "{}", notation::encode_cell(cell))?;
            }
        }
        Ok(())
    }
}

fn check_bound(
    field: &'static str,
    value: usize,
    min: usize,
    max: usize,
) -> Result<(), BoardError> {
    if value < min || value > max {
        return Err(BoardError::Configuration {
            field,
            value,
            min,
            max,
        });
    }
    Ok(())
}
