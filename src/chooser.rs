//! Injected random-choice provider.
//!
//! Every randomized decision in the crate (orientation, placement origin,
//! hunting window, window centre tie-break, targeting candidate) goes through a
//! [`Chooser`]. Any `rand::Rng` is a chooser; [`ScriptedChooser`] replays fixed
//! indices so tests can pin outcomes.

use alloc::vec::Vec;
use rand::Rng;

/// Source of uniform choices.
pub trait Chooser {
    /// Uniform index in `0..len`. Callers never pass `len == 0`.
    fn choose_index(&mut self, len: usize) -> usize;
}

impl<R: Rng> Chooser for R {
    fn choose_index(&mut self, len: usize) -> usize {
        self.random_range(0..len)
    }
}

/// Pick one element uniformly, `None` for an empty slice. The chooser is only
/// consulted when `items` is non-empty.
pub fn pick_one<'a, T, C: Chooser + ?Sized>(chooser: &mut C, items: &'a [T]) -> Option<&'a T> {
    if items.is_empty() {
        return None;
    }
    items.get(chooser.choose_index(items.len()))
}

/// Deterministic chooser cycling through a fixed script of indices. Each
/// scripted value is reduced modulo the requested length.
#[derive(Debug, Clone, Default)]
pub struct ScriptedChooser {
    script: Vec<usize>,
    pos: usize,
}

impl ScriptedChooser {
    pub fn new(script: Vec<usize>) -> Self {
        Self { script, pos: 0 }
    }

    /// Number of choices made so far.
    pub fn calls(&self) -> usize {
        self.pos
    }
}

impl Chooser for ScriptedChooser {
    fn choose_index(&mut self, len: usize) -> usize {
        let value = if self.script.is_empty() {
            0
        } else {
            self.script[self.pos % self.script.len()]
        };
        self.pos += 1;
        value % len
    }
}
