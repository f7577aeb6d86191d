use battleship_sim::{
    Board, Coord, FleetConfig, GameError, Match, MatchConfig, MatchStatus, Orientation, Player,
    ShotOutcome, TargetingAi,
};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use std::cell::RefCell;
use std::collections::{HashSet, VecDeque};
use std::rc::Rc;

#[test]
fn test_ai_vs_ai_game() {
    let mut rng = SmallRng::seed_from_u64(123);
    let config = MatchConfig::default();
    let mut game = Match::new(&config, &mut rng).unwrap();

    let mut fired: [HashSet<Coord>; 2] = [HashSet::new(), HashSet::new()];
    while game.status() == MatchStatus::InProgress {
        let turn = game.play_turn(&mut rng).unwrap();
        assert_ne!(turn.outcome, ShotOutcome::AlreadyTargeted);
        assert!(fired[turn.shooter].insert(turn.coord), "refired at {}", turn.coord);
        for p in 0..2 {
            game.board(p).check_consistency().unwrap();
        }
    }
    let report = game.report();
    let winner = match report.status {
        MatchStatus::Won { winner } => winner,
        other => panic!("game did not finish: {:?}", other),
    };
    assert!(game.board(1 - winner).is_defeated());
    assert!(!game.board(winner).is_defeated());
    assert!(report.stats[winner].shots <= 100);
    assert_eq!(report.stats[winner].sunk, 5);
    assert_eq!(report.stats[winner].hits, FleetConfig::standard().total_cells());
    assert_eq!(
        report.turns,
        report.stats[0].shots + report.stats[1].shots
    );
    assert_eq!(game.play_turn(&mut rng).unwrap_err(), GameError::MatchFinished);
}

#[test]
fn test_self_play_terminates_for_many_seeds() {
    for seed in 0..40 {
        let mut rng = SmallRng::seed_from_u64(seed);
        let config = MatchConfig::default();
        let mut game = Match::new(&config, &mut rng).unwrap();
        let report = game.run(&mut rng).unwrap();
        match report.status {
            MatchStatus::Won { winner } => {
                assert!(report.stats[winner].shots <= config.width * config.height);
            }
            other => panic!("seed {} did not finish: {:?}", seed, other),
        }
    }
}

#[test]
fn test_classic_fleet_self_play() {
    let mut rng = SmallRng::seed_from_u64(99);
    let config = MatchConfig {
        fleet: FleetConfig::classic(),
        ..MatchConfig::default()
    };
    let mut game = Match::new(&config, &mut rng).unwrap();
    let report = game.run(&mut rng).unwrap();
    assert!(matches!(report.status, MatchStatus::Won { .. }));
}

/// Drives each AI turn by hand, checking its bookkeeping against the opponent.
#[test]
fn test_ai_state_stays_consistent() {
    let mut rng = SmallRng::seed_from_u64(2);
    let mut board = Board::deploy(10, 10, &FleetConfig::standard(), &mut rng).unwrap();
    let mut ai = TargetingAi::new();
    let mut shots = 0;
    while !board.is_defeated() {
        let coord = ai
            .next_shot(board.view(), &board.registry().live_lengths(), &mut rng)
            .expect("unfired cell must remain while ships are afloat");
        assert!(!board.view().cell_at(coord).unwrap().is_fired());
        let outcome = board.fire_at(coord).unwrap();
        ai.record_outcome(coord, &outcome);
        ai.check_invariants(board.registry()).unwrap();
        shots += 1;
        assert!(shots <= 100);
    }
    assert!(ai.unresolved().is_empty());
}

#[test]
fn test_turn_limit_is_reported() {
    let mut rng = SmallRng::seed_from_u64(4);
    let config = MatchConfig {
        turn_limit: Some(6),
        ..MatchConfig::default()
    };
    let mut game = Match::new(&config, &mut rng).unwrap();
    let report = game.run(&mut rng).unwrap();
    assert_eq!(report.status, MatchStatus::TurnLimitReached);
    assert_eq!(report.turns, 6);
    assert_eq!(report.stats[0].shots, 3);
    assert_eq!(report.stats[1].shots, 3);
}

struct Sweeper {
    next: usize,
}

impl Player for Sweeper {
    fn select_target(
        &mut self,
        _chooser: &mut dyn battleship_sim::Chooser,
        view: &battleship_sim::Grid,
        _remaining: &[usize],
    ) -> Option<Coord> {
        let coord = Coord::new(self.next / view.width(), self.next % view.width());
        self.next += 1;
        Some(coord)
    }
}

#[test]
fn test_scripted_players_on_hand_placed_boards() {
    let players: [Box<dyn Player>; 2] =
        [Box::new(Sweeper { next: 0 }), Box::new(Sweeper { next: 0 })];
    let mut game = Match::from_boards(small_boards(), players, 18);
    let mut rng = SmallRng::seed_from_u64(0);
    let report = game.run(&mut rng).unwrap();
    // player 0 sinks (0,0)+(1,0) on its fourth shot, before player 1 reaches row 2
    assert_eq!(report.status, MatchStatus::Won { winner: 0 });
    assert_eq!(report.stats[0].shots, 4);
    assert_eq!(report.turns, 7);
}

/// Fires at a fixed list of cells and keeps every outcome it is told about.
struct Scripted {
    shots: VecDeque<Coord>,
    seen: Rc<RefCell<Vec<ShotOutcome>>>,
}

impl Player for Scripted {
    fn select_target(
        &mut self,
        _chooser: &mut dyn battleship_sim::Chooser,
        _view: &battleship_sim::Grid,
        _remaining: &[usize],
    ) -> Option<Coord> {
        // past the end of the script, keep repeating the last cell
        if self.shots.len() > 1 {
            self.shots.pop_front()
        } else {
            self.shots.front().copied()
        }
    }

    fn handle_shot_outcome(&mut self, _coord: Coord, outcome: &ShotOutcome) {
        self.seen.borrow_mut().push(outcome.clone());
    }
}

fn small_boards() -> [Board; 2] {
    let mut first = Board::new(3, 3).unwrap();
    first
        .place_ship("Destroyer", 2, Coord::new(2, 1), Orientation::Horizontal)
        .unwrap();
    let mut second = Board::new(3, 3).unwrap();
    second
        .place_ship("Destroyer", 2, Coord::new(0, 0), Orientation::Vertical)
        .unwrap();
    [first, second]
}

#[test]
fn test_refire_keeps_the_turn() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let stubborn = Scripted {
        shots: VecDeque::from(vec![Coord::new(0, 2)]),
        seen: Rc::clone(&seen),
    };
    let players: [Box<dyn Player>; 2] = [Box::new(stubborn), Box::new(Sweeper { next: 0 })];
    let mut game = Match::from_boards(small_boards(), players, 18);
    let mut rng = SmallRng::seed_from_u64(0);

    assert_eq!(game.play_turn(&mut rng).unwrap().outcome, ShotOutcome::Miss);
    assert_eq!(game.play_turn(&mut rng).unwrap().outcome, ShotOutcome::Miss);
    for _ in 0..3 {
        let turn = game.play_turn(&mut rng).unwrap();
        assert_eq!(turn.shooter, 0);
        assert_eq!(turn.outcome, ShotOutcome::AlreadyTargeted);
        assert_eq!(game.current(), 0);
        assert_eq!(game.turns(), 2);
        assert_eq!(game.stats()[0].shots, 1);
        assert_eq!(game.status(), MatchStatus::InProgress);
    }
    let seen = seen.borrow();
    assert_eq!(seen.len(), 4);
    assert!(seen[1..].iter().all(|o| *o == ShotOutcome::AlreadyTargeted));
}

#[test]
fn test_match_continues_after_refire() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let retrier = Scripted {
        shots: VecDeque::from(vec![
            Coord::new(0, 2),
            Coord::new(0, 2),
            Coord::new(0, 0),
            Coord::new(1, 0),
        ]),
        seen: Rc::clone(&seen),
    };
    let players: [Box<dyn Player>; 2] = [Box::new(retrier), Box::new(Sweeper { next: 0 })];
    let mut game = Match::from_boards(small_boards(), players, 18);
    let mut rng = SmallRng::seed_from_u64(0);
    let report = game.run(&mut rng).unwrap();

    assert_eq!(report.status, MatchStatus::Won { winner: 0 });
    assert_eq!(report.turns, 5);
    assert_eq!(report.stats[0].shots, 3);
    assert_eq!(report.stats[0].hits, 2);
    assert_eq!(report.stats[1].shots, 2);
    assert_eq!(seen.borrow()[1], ShotOutcome::AlreadyTargeted);
}

/// Only lengths reach the shooter, never positions.
#[test]
fn test_shooter_sees_remaining_lengths_only() {
    struct Recorder {
        next: usize,
        lengths: Rc<RefCell<Vec<Vec<usize>>>>,
    }
    impl Player for Recorder {
        fn select_target(
            &mut self,
            _chooser: &mut dyn battleship_sim::Chooser,
            view: &battleship_sim::Grid,
            remaining: &[usize],
        ) -> Option<Coord> {
            self.lengths.borrow_mut().push(remaining.to_vec());
            assert!(!view
                .cells()
                .any(|(_, s)| matches!(s, battleship_sim::CellState::Occupied(_))));
            let coord = Coord::new(self.next / view.width(), self.next % view.width());
            self.next += 1;
            Some(coord)
        }
    }
    let lengths = Rc::new(RefCell::new(Vec::new()));
    let recorder = Recorder {
        next: 0,
        lengths: Rc::clone(&lengths),
    };
    let players: [Box<dyn Player>; 2] = [Box::new(recorder), Box::new(Sweeper { next: 0 })];
    let mut game = Match::from_boards(small_boards(), players, 18);
    let mut rng = SmallRng::seed_from_u64(0);
    game.run(&mut rng).unwrap();
    // player 0 sinks the vertical Destroyer with its fourth shot
    assert_eq!(*lengths.borrow(), vec![vec![2]; 4]);
}
