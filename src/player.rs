use crate::{
    ai::TargetingAi,
    chooser::Chooser,
    common::{Coord, ShotOutcome},
    grid::Grid,
};

/// Interface implemented by different player types.
///
/// The match loop asks the shooter for a target, resolves it on the opponent's
/// board and reports the outcome back. Interactive players live outside this
/// crate and plug in here.
pub trait Player {
    /// Choose the next target on the opponent's view grid, `None` if no
    /// unfired cell remains. `remaining` lists the lengths of the opponent's
    /// ships still afloat; their positions stay hidden.
    fn select_target(
        &mut self,
        chooser: &mut dyn Chooser,
        view: &Grid,
        remaining: &[usize],
    ) -> Option<Coord>;

    /// Inform the player of the result of its last shot. A
    /// [`ShotOutcome::AlreadyTargeted`] outcome means the turn was not used and
    /// the player will be asked again.
    fn handle_shot_outcome(&mut self, _coord: Coord, _outcome: &ShotOutcome) {}

    /// Inform the player of an opponent shot against its board.
    fn handle_opponent_shot(&mut self, _coord: Coord, _outcome: &ShotOutcome) {}
}

impl Player for TargetingAi {
    fn select_target(
        &mut self,
        chooser: &mut dyn Chooser,
        view: &Grid,
        remaining: &[usize],
    ) -> Option<Coord> {
        self.next_shot(view, remaining, chooser)
    }

    fn handle_shot_outcome(&mut self, coord: Coord, outcome: &ShotOutcome) {
        self.record_outcome(coord, outcome);
    }
}
