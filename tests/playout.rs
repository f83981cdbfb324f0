//! Seeded random playouts checking the engine's invariants move by move.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use reversi_engine::game::{Board, Cell, MoveOutcome, PlayerId};

/// Three-seat opening used for multi-player playouts.
const THREE_SEAT_OPENING: &str = "______\n______\n__01__\n__12__\n__20__\n______";

fn assert_scores_match_cells(board: &Board) {
    let players: Vec<PlayerId> = board.players().collect();
    for player in players {
        assert_eq!(
            board.score(player).unwrap() as usize,
            board.owned_cells(player).unwrap(),
            "score drifted from owned cells on\n{}",
            board
        );
    }
}

fn assert_plays_are_sound(board: &Board, player: PlayerId) -> Vec<reversi_engine::game::Coord> {
    let plays = board.get_valid_plays(player).unwrap();
    let mut sorted = plays.clone();
    sorted.sort();
    sorted.dedup();
    assert_eq!(sorted.len(), plays.len(), "duplicate plays: {:?}", plays);
    for coord in &plays {
        assert_eq!(board.cell(coord.x, coord.y).unwrap(), Cell::Empty);
        assert!(!board.is_valid_move(coord.x, coord.y, player).unwrap().is_empty());
    }
    plays
}

/// Play random legal moves, passing when a seat is stuck, until nobody can
/// move. Returns the number of moves applied.
fn play_out(mut board: Board, rng: &mut StdRng) -> usize {
    let players: Vec<PlayerId> = board.players().collect();
    let area = board.width() * board.height();
    let mut moves = 0;
    let mut turn = 0;

    while !board.is_terminal() {
        assert!(turn <= area * players.len(), "playout did not terminate");
        let player = players[turn % players.len()];
        turn += 1;

        let plays = assert_plays_are_sound(&board, player);
        if plays.is_empty() {
            continue;
        }

        // An occupied cell must be rejected without touching anything.
        let occupied = (0..board.height())
            .flat_map(|y| (0..board.width()).map(move |x| (x, y)))
            .find(|&(x, y)| board.cell(x, y).unwrap() != Cell::Empty);
        if let Some(occupied) = occupied {
            let before = board.clone();
            let outcome = board.apply_move(occupied.0, occupied.1, player).unwrap();
            assert_eq!(outcome, MoveOutcome::Rejected);
            assert_eq!(board, before);
        }

        let target = plays[rng.random_range(0..plays.len())];
        let pieces_before: i32 = board.scores().iter().sum();
        let outcome = board.apply_move(target.x, target.y, player).unwrap();

        let MoveOutcome::Applied { placed, flipped } = outcome else {
            panic!("listed play {target} was rejected");
        };
        assert_eq!(placed, target);
        assert!(!flipped.is_empty());
        for coord in flipped.iter().chain(std::iter::once(&placed)) {
            assert_eq!(
                board.cell(coord.x, coord.y).unwrap(),
                Cell::Owned(player.seat() as u8)
            );
        }
        let pieces_after: i32 = board.scores().iter().sum();
        assert_eq!(pieces_after, pieces_before + 1);
        assert_scores_match_cells(&board);
        moves += 1;
    }

    for player in board.players() {
        assert!(board.get_valid_plays(player).unwrap().is_empty());
    }
    moves
}

#[test]
fn test_two_player_playouts_terminate() {
    let mut rng = StdRng::seed_from_u64(7);
    for (width, height) in [(8, 8), (4, 4), (6, 5), (3, 7), (16, 16)] {
        for _ in 0..5 {
            let mut board = Board::new(width, height, 2).unwrap();
            board.default_start().unwrap();
            let moves = play_out(board, &mut rng);
            assert!(moves >= 1);
            assert!(moves <= width * height - 4);
        }
    }
}

#[test]
fn test_full_opening_board_is_terminal() {
    let mut board = Board::new(2, 2, 2).unwrap();
    board.default_start().unwrap();
    assert!(board.is_terminal());
    let mut rng = StdRng::seed_from_u64(1);
    assert_eq!(play_out(board, &mut rng), 0);
}

#[test]
fn test_three_player_playouts_terminate() {
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..10 {
        let board = Board::parse(THREE_SEAT_OPENING, 3).unwrap();
        assert_eq!(board.scores(), vec![2, 2, 2]);
        play_out(board, &mut rng);
    }
}

#[test]
fn test_serialized_state_survives_reload() {
    let mut rng = StdRng::seed_from_u64(3);
    let mut board = Board::new(8, 8, 2).unwrap();
    board.default_start().unwrap();
    let players: Vec<PlayerId> = board.players().collect();

    for turn in 0..10 {
        let player = players[turn % 2];
        let plays = board.get_valid_plays(player).unwrap();
        if plays.is_empty() {
            continue;
        }
        let target = plays[rng.random_range(0..plays.len())];
        board.apply_move(target.x, target.y, player).unwrap();
    }

    let restored = Board::parse(&board.serialize(), 2).unwrap();
    assert_eq!(restored.serialize(), board.serialize());
    assert_eq!(restored.scores(), board.scores());
    let restored_players: Vec<PlayerId> = restored.players().collect();
    for seat in 0..2 {
        assert_eq!(
            restored.get_valid_plays(restored_players[seat]).unwrap(),
            board.get_valid_plays(players[seat]).unwrap()
        );
    }
}
