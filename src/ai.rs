// Hunt/target guessing logic for the opponent board.

use alloc::vec::Vec;

use crate::{
    chooser::{pick_one, Chooser},
    common::{Coord, Direction, GameError, ShipId, ShotOutcome},
    fleet::FleetRegistry,
    grid::{CellState, Grid},
    placement::find_blocks,
};

/// Direction in which the unresolved hits line up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    Undetermined,
    Horizontal,
    Vertical,
}

impl Alignment {
    fn directions(self) -> &'static [Direction] {
        match self {
            Alignment::Undetermined => &Direction::ALL,
            Alignment::Horizontal => &Direction::HORIZONTAL,
            Alignment::Vertical => &Direction::VERTICAL,
        }
    }
}

/// Decision mode, derived from the unresolved hits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Hunting,
    Targeting(Alignment),
}

/// A hit whose ship has not been reported sunk yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnresolvedHit {
    pub coord: Coord,
    pub ship: ShipId,
}

/// One entry of the shot log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShotRecord {
    pub coord: Coord,
    pub outcome: ShotOutcome,
}

/// CPU targeting state: shot log plus the unresolved hits driving target mode.
#[derive(Debug, Clone, Default)]
pub struct TargetingAi {
    log: Vec<ShotRecord>,
    unresolved: Vec<UnresolvedHit>,
}

impl TargetingAi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> Mode {
        if self.unresolved.is_empty() {
            Mode::Hunting
        } else {
            Mode::Targeting(alignment(&self.unresolved_coords()))
        }
    }

    pub fn unresolved(&self) -> &[UnresolvedHit] {
        &self.unresolved
    }

    pub fn shot_log(&self) -> &[ShotRecord] {
        &self.log
    }

    fn unresolved_coords(&self) -> Vec<Coord> {
        self.unresolved.iter().map(|h| h.coord).collect()
    }

    /// Choose the next cell to fire at on `view`, the opponent's view grid.
    /// `remaining` holds the lengths of the opponent's ships still afloat.
    ///
    /// Returns `None` only when every cell of `view` has been fired upon.
    pub fn next_shot<C: Chooser + ?Sized>(
        &self,
        view: &Grid,
        remaining: &[usize],
        chooser: &mut C,
    ) -> Option<Coord> {
        if !self.unresolved.is_empty() {
            if let Some(coord) = target_shot(view, &self.unresolved_coords(), chooser) {
                return Some(coord);
            }
            log::warn!(
                "no open cell next to {} unresolved hit(s), hunting instead",
                self.unresolved.len()
            );
        }
        hunt_shot(view, remaining.iter().copied().max(), chooser)
    }

    /// Feed back the outcome of a shot at `coord`.
    pub fn record_outcome(&mut self, coord: Coord, outcome: &ShotOutcome) {
        match outcome {
            ShotOutcome::AlreadyTargeted => return,
            ShotOutcome::Hit {
                ship, sunk: true, ..
            } => self.unresolved.retain(|h| h.ship != *ship),
            ShotOutcome::Hit {
                ship, sunk: false, ..
            } => self.unresolved.push(UnresolvedHit { coord, ship: *ship }),
            ShotOutcome::Miss => {}
        }
        self.log.push(ShotRecord {
            coord,
            outcome: outcome.clone(),
        });
    }

    /// Every unresolved hit must belong to a ship that is still afloat.
    pub fn check_invariants(&self, opponent: &FleetRegistry) -> Result<(), GameError> {
        if self
            .unresolved
            .iter()
            .any(|h| opponent.instance(h.ship).is_none())
        {
            return Err(GameError::InvariantViolation(
                "unresolved hit references a ship that is no longer afloat",
            ));
        }
        Ok(())
    }
}

/// Alignment of a set of hits. Rows are checked before columns.
pub fn alignment(hits: &[Coord]) -> Alignment {
    let shares = |same: fn(&Coord, &Coord) -> bool| {
        hits.iter()
            .enumerate()
            .any(|(i, a)| hits[i + 1..].iter().any(|b| same(a, b)))
    };
    if shares(|a, b| a.row == b.row) {
        Alignment::Horizontal
    } else if shares(|a, b| a.col == b.col) {
        Alignment::Vertical
    } else {
        Alignment::Undetermined
    }
}

/// Unfired in-bounds neighbours of `hits` along `dirs`, sorted and deduplicated.
pub fn target_candidates(view: &Grid, hits: &[Coord], dirs: &[Direction]) -> Vec<Coord> {
    let mut candidates: Vec<Coord> = hits
        .iter()
        .flat_map(|&hit| dirs.iter().filter_map(move |&dir| view.neighbour(hit, dir)))
        .filter(|&c| view.cell_at(c).map_or(false, |s| !s.is_fired()))
        .collect();
    candidates.sort_unstable();
    candidates.dedup();
    candidates
}

/// Target mode: extend along the hits' alignment. Falls back to all four
/// directions when the aligned ends are blocked.
pub fn target_shot<C: Chooser + ?Sized>(
    view: &Grid,
    hits: &[Coord],
    chooser: &mut C,
) -> Option<Coord> {
    let aligned = alignment(hits);
    let mut candidates = target_candidates(view, hits, aligned.directions());
    if candidates.is_empty() && aligned != Alignment::Undetermined {
        candidates = target_candidates(view, hits, &Direction::ALL);
    }
    pick_one(chooser, &candidates).copied()
}

/// Hunt mode: look for the largest open square a ship of `largest_ship` could
/// hide in and fire at its centre, shrinking the window until something fits.
pub fn hunt_shot<C: Chooser + ?Sized>(
    view: &Grid,
    largest_ship: Option<usize>,
    chooser: &mut C,
) -> Option<Coord> {
    let size = largest_ship.unwrap_or(1).max(1);
    let (mut width, mut height) = (2 * size - 1, 2 * size - 1);
    let unfired = |cell: CellState| !cell.is_fired();

    loop {
        if let Some(coord) = shot_in_window(view, width, height, unfired, chooser) {
            return Some(coord);
        }
        let mut narrower = [
            (width.saturating_sub(1), height),
            (width, height.saturating_sub(1)),
        ];
        if chooser.choose_index(2) == 1 {
            narrower.swap(0, 1);
        }
        for (w, h) in narrower {
            if let Some(coord) = shot_in_window(view, w, h, unfired, chooser) {
                return Some(coord);
            }
        }
        if width <= 1 && height <= 1 {
            break;
        }
        width = width.saturating_sub(1).max(1);
        height = height.saturating_sub(1).max(1);
        log::trace!("hunting window shrunk to {}x{}", width, height);
    }

    let open: Vec<Coord> = view
        .cells()
        .filter(|(_, state)| !state.is_fired())
        .map(|(coord, _)| coord)
        .collect();
    pick_one(chooser, &open).copied()
}

fn shot_in_window<C, F>(
    view: &Grid,
    width: usize,
    height: usize,
    accept: F,
    chooser: &mut C,
) -> Option<Coord>
where
    C: Chooser + ?Sized,
    F: Fn(CellState) -> bool,
{
    let blocks = find_blocks(view, width, height, accept);
    let origin = *pick_one(chooser, &blocks)?;
    Some(window_center(origin, width, height, chooser))
}

/// Centre cell of a window; on an even side one of the two middle cells is
/// picked uniformly. Row is decided before column.
pub fn window_center<C: Chooser + ?Sized>(
    origin: Coord,
    width: usize,
    height: usize,
    chooser: &mut C,
) -> Coord {
    let mut middle = |side: usize| {
        let base = (side - 1) / 2;
        if side % 2 == 0 {
            base + chooser.choose_index(2)
        } else {
            base
        }
    };
    let row = origin.row + middle(height);
    let col = origin.col + middle(width);
    Coord::new(row, col)
}
