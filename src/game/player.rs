/// A seated participant and its running score.
///
/// Players are owned by their [`Board`](super::Board)'s roster and only the
/// board's move routine changes the score.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Player {
    score: i32,
}

impl Player {
    pub fn new() -> Self {
        Player { score: 0 }
    }

    pub fn score(&self) -> i32 {
        self.score
    }

    pub(crate) fn set_score(&mut self, score: i32) {
        self.score = score;
    }

    pub(crate) fn gain(&mut self) {
        self.score += 1;
    }

    pub(crate) fn lose(&mut self) {
        self.score -= 1;
    }
}

/// Handle naming one seat at one board.
///
/// Handles are minted by the board and carry its id, so a handle from a
/// different board never passes the membership check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlayerId {
    pub(crate) board: u64,
    pub(crate) seat: u8,
}

impl PlayerId {
    /// Owner index used to tag this player's cells.
    pub fn seat(self) -> usize {
        self.seat as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_player_has_zero_score() {
        assert_eq!(Player::new().score(), 0);
        assert_eq!(Player::default(), Player::new());
    }

    #[test]
    fn test_gain_and_lose() {
        let mut player = Player::new();
        player.gain();
        player.gain();
        player.lose();
        assert_eq!(player.score(), 1);
    }

    #[test]
    fn test_seat_index() {
        let id = PlayerId { board: 1, seat: 3 };
        assert_eq!(id.seat(), 3);
        assert_ne!(id, PlayerId { board: 2, seat: 3 });
    }
}
