use alloc::boxed::Box;

use crate::{
    ai::TargetingAi,
    board::Board,
    chooser::Chooser,
    common::{Coord, GameError, ShotOutcome},
    config::MatchConfig,
    player::Player,
};

/// Per-shooter shot counters.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize))]
pub struct ShotStats {
    pub shots: usize,
    pub hits: usize,
    pub sunk: usize,
}

/// Current status of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize))]
pub enum MatchStatus {
    InProgress,
    /// Player `winner` sank the whole opposing fleet.
    Won { winner: usize },
    TurnLimitReached,
}

/// What happened during one turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnReport {
    pub shooter: usize,
    pub coord: Coord,
    pub outcome: ShotOutcome,
}

/// Summary of a finished match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize))]
pub struct MatchReport {
    pub status: MatchStatus,
    pub turns: usize,
    pub stats: [ShotStats; 2],
}

/// Two boards and two players taking alternate shots. Player 0 fires first.
pub struct Match {
    boards: [Board; 2],
    players: [Box<dyn Player>; 2],
    current: usize,
    turns: usize,
    turn_limit: usize,
    stats: [ShotStats; 2],
}

impl Match {
    /// CPU versus CPU with both fleets deployed at random.
    pub fn new<C: Chooser>(config: &MatchConfig, chooser: &mut C) -> Result<Self, GameError> {
        let players: [Box<dyn Player>; 2] =
            [Box::new(TargetingAi::new()), Box::new(TargetingAi::new())];
        Self::with_players(config, players, chooser)
    }

    /// Deploy both fleets at random and seat the given players.
    pub fn with_players<C: Chooser>(
        config: &MatchConfig,
        players: [Box<dyn Player>; 2],
        chooser: &mut C,
    ) -> Result<Self, GameError> {
        let first = Board::deploy(config.width, config.height, &config.fleet, chooser)?;
        let second = Board::deploy(config.width, config.height, &config.fleet, chooser)?;
        Ok(Self::from_boards(
            [first, second],
            players,
            config.effective_turn_limit(),
        ))
    }

    /// Start from prepared boards, e.g. hand-placed layouts.
    pub fn from_boards(boards: [Board; 2], players: [Box<dyn Player>; 2], turn_limit: usize) -> Self {
        Self {
            boards,
            players,
            current: 0,
            turns: 0,
            turn_limit,
            stats: [ShotStats::default(); 2],
        }
    }

    pub fn board(&self, player: usize) -> &Board {
        &self.boards[player]
    }

    /// Index of the player about to shoot.
    pub fn current(&self) -> usize {
        self.current
    }

    pub fn turns(&self) -> usize {
        self.turns
    }

    pub fn stats(&self) -> [ShotStats; 2] {
        self.stats
    }

    /// Evaluate the current match status.
    pub fn status(&self) -> MatchStatus {
        if self.boards[1].is_defeated() {
            MatchStatus::Won { winner: 0 }
        } else if self.boards[0].is_defeated() {
            MatchStatus::Won { winner: 1 }
        } else if self.turns >= self.turn_limit {
            MatchStatus::TurnLimitReached
        } else {
            MatchStatus::InProgress
        }
    }

    /// Let the current player take one shot at the opponent.
    ///
    /// A shot at a cell already fired upon comes back as
    /// [`ShotOutcome::AlreadyTargeted`] and costs nothing: the turn counter,
    /// the stats and the current player stay as they were.
    pub fn play_turn<C: Chooser>(&mut self, chooser: &mut C) -> Result<TurnReport, GameError> {
        if self.status() != MatchStatus::InProgress {
            return Err(GameError::MatchFinished);
        }
        let shooter = self.current;
        let target = 1 - shooter;

        let coord = {
            let board = &self.boards[target];
            let remaining = board.registry().live_lengths();
            self.players[shooter]
                .select_target(chooser, board.view(), &remaining)
                .ok_or(GameError::InvariantViolation(
                    "no unfired cell left while the opposing fleet is afloat",
                ))?
        };
        let outcome = self.boards[target].fire_at(coord)?;
        if outcome == ShotOutcome::AlreadyTargeted {
            // the shooter keeps the turn and is asked again
            log::debug!("player {} re-fired at {}", shooter, coord);
            self.players[shooter].handle_shot_outcome(coord, &outcome);
            return Ok(TurnReport {
                shooter,
                coord,
                outcome,
            });
        }

        let stats = &mut self.stats[shooter];
        stats.shots += 1;
        if outcome.is_hit() {
            stats.hits += 1;
        }
        if outcome.is_sunk() {
            stats.sunk += 1;
        }
        self.players[shooter].handle_shot_outcome(coord, &outcome);
        self.players[target].handle_opponent_shot(coord, &outcome);

        self.turns += 1;
        self.current = target;
        Ok(TurnReport {
            shooter,
            coord,
            outcome,
        })
    }

    /// Play turns until a fleet is sunk or the turn limit is reached.
    pub fn run<C: Chooser>(&mut self, chooser: &mut C) -> Result<MatchReport, GameError> {
        while self.status() == MatchStatus::InProgress {
            self.play_turn(chooser)?;
        }
        let report = self.report();
        log::info!(
            "match finished after {} turns: {:?}",
            report.turns,
            report.status
        );
        Ok(report)
    }

    pub fn report(&self) -> MatchReport {
        MatchReport {
            status: self.status(),
            turns: self.turns,
            stats: self.stats,
        }
    }
}
