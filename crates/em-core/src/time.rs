//! Tick model and AI pass configuration.
//!
//! The reaction core runs once per simulation frame inside the AI update
//! pass.  Frames are counted by a monotonically increasing `Tick`; the
//! mapping to wall-clock time (`tick_duration_ms`) only matters to callers
//! converting speeds into per-tick distances.

use std::fmt;

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute AI-pass counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// The following tick.
    #[inline]
    pub fn next(self) -> Tick {
        Tick(self.0 + 1)
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── AiConfig ──────────────────────────────────────────────────────────────────

/// Top-level configuration for the AI reaction + steering pass.
///
/// Typically loaded from a JSON file by the application crate (enable the
/// `serde` feature) and passed to the pass builder.  Every field has a
/// default, so a partial file only overrides what it names.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AiConfig {
    /// Master RNG seed.  The same seed always produces identical reactions.
    pub seed: u64,

    /// Milliseconds of simulated time per AI pass.
    pub tick_duration_ms: u32,

    /// Ticks run by `AiPass::run`.
    pub total_ticks: u64,

    /// Worker thread count for the parallel reaction phase.  `None` uses
    /// Rayon's global pool.
    pub num_threads: Option<usize>,

    /// Radius (metres) of the built-in perception pass.
    pub perception_radius: f32,

    /// Extra clearance (metres) added around every dynamic obstacle: the
    /// steering agent's own radius.
    pub clearance: f32,

    /// Spacing (metres) between control points emitted by the straight-line
    /// planner.
    pub path_spacing: f32,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            seed:              0,
            tick_duration_ms:  100,
            total_ticks:       1,
            num_threads:       None,
            perception_radius: 30.0,
            clearance:         0.5,
            path_spacing:      2.0,
        }
    }
}

impl AiConfig {
    /// The tick at which `AiPass::run` stops (exclusive upper bound).
    #[inline]
    pub fn end_tick(&self) -> Tick {
        Tick(self.total_ticks)
    }

    /// Validate value ranges; returns a human-readable reason on failure.
    pub fn validate(&self) -> Result<(), String> {
        if self.tick_duration_ms == 0 {
            return Err("tick_duration_ms must be > 0".into());
        }
        if !(self.perception_radius.is_finite() && self.perception_radius >= 0.0) {
            return Err(format!("perception_radius {} is not a finite, non-negative distance", self.perception_radius));
        }
        if !(self.clearance.is_finite() && self.clearance >= 0.0) {
            return Err(format!("clearance {} is not a finite, non-negative distance", self.clearance));
        }
        if !(self.path_spacing.is_finite() && self.path_spacing > 0.0) {
            return Err(format!("path_spacing {} must be a finite distance > 0", self.path_spacing));
        }
        Ok(())
    }
}
