//! RNG module - random color draws
//!
//! Every random decision in the core goes through [`ColorSource`], so callers
//! choose between a seeded generator (deterministic replay, tests) and OS
//! entropy. [`ColorRng`] wraps `SmallRng` (xoshiro256++).
//! [`SequenceSource`] replays a fixed index script for scripted tests.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::palette::Palette;
use crate::types::TokenColor;

/// Source of uniformly distributed palette indices.
pub trait ColorSource {
    /// Return an index in `[0, bound)`. `bound` is never zero.
    fn next_index(&mut self, bound: usize) -> usize;

    /// Draw a color from `palette`.
    fn draw(&mut self, palette: &Palette) -> TokenColor {
        palette.color(self.next_index(palette.len()))
    }

    /// Draw a color other than `prior` with a single index.
    ///
    /// Picks uniformly among the remaining colors, so a source that keeps
    /// returning the same index still makes progress.
    fn draw_except(&mut self, palette: &Palette, prior: TokenColor) -> TokenColor {
        match palette.index_of(prior) {
            Some(i) => {
                let len = palette.len();
                palette.color((i + 1 + self.next_index(len - 1)) % len)
            }
            None => self.draw(palette),
        }
    }
}

impl<S: ColorSource + ?Sized> ColorSource for &mut S {
    fn next_index(&mut self, bound: usize) -> usize {
        (**self).next_index(bound)
    }
}

impl<S: ColorSource + ?Sized> ColorSource for Box<S> {
    fn next_index(&mut self, bound: usize) -> usize {
        (**self).next_index(bound)
    }
}

/// Seedable color generator.
#[derive(Debug, Clone)]
pub struct ColorRng {
    inner: SmallRng,
    seed: Option<u64>,
}

impl ColorRng {
    /// Create with a specific seed for deterministic behavior.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            inner: SmallRng::seed_from_u64(seed),
            seed: Some(seed),
        }
    }

    /// Create from system entropy.
    pub fn from_entropy() -> Self {
        Self {
            inner: SmallRng::from_os_rng(),
            seed: None,
        }
    }

    /// Seeded when `seed` is `Some`, entropy-backed otherwise.
    pub fn new(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::from_seed(seed),
            None => Self::from_entropy(),
        }
    }

    /// The seed this generator started from, if any.
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }
}

impl ColorSource for ColorRng {
    #[inline(always)]
    fn next_index(&mut self, bound: usize) -> usize {
        self.inner.random_range(0..bound)
    }
}

/// Replays a fixed list of indices, cycling when exhausted.
///
/// Each value is reduced modulo the requested bound.
#[derive(Debug, Clone)]
pub struct SequenceSource {
    script: Vec<usize>,
    pos: usize,
}

impl SequenceSource {
    pub fn new(script: impl Into<Vec<usize>>) -> Self {
        let mut script = script.into();
        if script.is_empty() {
            script.push(0);
        }
        Self { script, pos: 0 }
    }

    /// Number of indices handed out so far.
    pub fn draws(&self) -> usize {
        self.pos
    }
}

impl ColorSource for SequenceSource {
    fn next_index(&mut self, bound: usize) -> usize {
        let v = self.script[self.pos % self.script.len()];
        self.pos += 1;
        v % bound
    }
}
