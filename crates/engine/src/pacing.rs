//! Presentation pacing.
//!
//! A [`Pacing`] decides how long a staged event waits before it is released
//! to the presenter. The delay depends on the event and on the event released
//! just before it in the same activation.

use log::warn;

use crate::types::{BoardEvent, EVALUATE_DELAY_MS, REFILL_DELAY_MS, SELECT_DELAY_MS, SWAP_DELAY_MS};

pub trait Pacing {
    /// Milliseconds to wait before releasing `next`.
    ///
    /// `previous` is `None` for the first event of an activation.
    fn delay_ms(&self, previous: Option<&BoardEvent>, next: &BoardEvent) -> u32;
}

/// Fixed per-stage delays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedPacing {
    /// Pause after the second cell lights up.
    pub select_ms: u32,
    /// Additional pause before the swap is shown.
    pub swap_ms: u32,
    /// Pause between a swap and its evaluation (removal or swap back).
    pub evaluate_ms: u32,
    /// Pause between removal and refill.
    pub refill_ms: u32,
}

impl Default for FixedPacing {
    fn default() -> Self {
        Self {
            select_ms: SELECT_DELAY_MS,
            swap_ms: SWAP_DELAY_MS,
            evaluate_ms: EVALUATE_DELAY_MS,
            refill_ms: REFILL_DELAY_MS,
        }
    }
}

impl FixedPacing {
    /// All delays zero.
    pub const fn instant() -> Self {
        Self {
            select_ms: 0,
            swap_ms: 0,
            evaluate_ms: 0,
            refill_ms: 0,
        }
    }

    /// Create from `MATCH3_PACING` (`normal` by default, `off` for instant).
    pub fn from_env() -> Self {
        match std::env::var("MATCH3_PACING") {
            Ok(v) => Self::from_mode(&v).unwrap_or_else(|| {
                warn!("[Pacing] unknown MATCH3_PACING {:?}, using normal", v);
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    pub fn from_mode(mode: &str) -> Option<Self> {
        match mode.trim().to_ascii_lowercase().as_str() {
            "" | "normal" | "on" => Some(Self::default()),
            "off" | "none" | "0" => Some(Self::instant()),
            _ => None,
        }
    }

    /// Total delay of a kept swap, from the second click to the refill.
    pub fn kept_swap_ms(&self) -> u32 {
        self.select_ms + self.swap_ms + self.evaluate_ms + self.refill_ms
    }
}

impl Pacing for FixedPacing {
    fn delay_ms(&self, previous: Option<&BoardEvent>, next: &BoardEvent) -> u32 {
        use BoardEvent::*;
        match (previous, next) {
            (Some(CellHighlighted(_)), CellsSwapped(..)) => self.select_ms + self.swap_ms,
            (Some(CellHighlighted(_)), CellRestored(_)) => self.select_ms,
            (Some(CellsSwapped(..)), CellsSwapped(..) | CellsRemoved(_)) => self.evaluate_ms,
            (Some(CellsRemoved(_)), CellsRefilled(_)) => self.refill_ms,
            _ => 0,
        }
    }
}

/// Releases every event immediately.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoPacing;

impl Pacing for NoPacing {
    fn delay_ms(&self, _previous: Option<&BoardEvent>, _next: &BoardEvent) -> u32 {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Coord;
    use std::collections::BTreeSet;

    #[test]
    fn test_fixed_pacing_stages() {
        let p = FixedPacing::default();
        let a = Coord::new(0, 0);
        let b = Coord::new(0, 1);

        assert_eq!(p.delay_ms(None, &BoardEvent::CellHighlighted(a)), 0);
        assert_eq!(
            p.delay_ms(
                Some(&BoardEvent::CellHighlighted(b)),
                &BoardEvent::CellsSwapped(a, b)
            ),
            1100
        );
        assert_eq!(
            p.delay_ms(
                Some(&BoardEvent::CellsSwapped(a, b)),
                &BoardEvent::CellsSwapped(a, b)
            ),
            1000
        );
        assert_eq!(
            p.delay_ms(
                Some(&BoardEvent::CellsSwapped(a, b)),
                &BoardEvent::CellsRemoved(BTreeSet::new())
            ),
            1000
        );
        assert_eq!(
            p.delay_ms(
                Some(&BoardEvent::CellsSwapped(a, b)),
                &BoardEvent::CellRestored(a)
            ),
            0
        );
        assert_eq!(p.kept_swap_ms(), 2600);
    }

    #[test]
    fn test_mode_parsing() {
        assert_eq!(FixedPacing::from_mode("normal"), Some(FixedPacing::default()));
        assert_eq!(FixedPacing::from_mode(" OFF "), Some(FixedPacing::instant()));
        assert_eq!(FixedPacing::from_mode("turbo"), None);
    }
}
