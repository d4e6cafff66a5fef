//! Tunable option records for the animations.
//!
//! All values are in canvas units: positions and radii in half-block
//! pixels, speeds in pixels per tick, delays in ticks.

use serde::{Deserialize, Serialize};

use crate::Rng;

/// Range a fractional value is sampled from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: f32,
    pub max: f32,
}

impl Bounds {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Uniform sample from `[min, max)`.
    pub fn sample(&self, rng: &mut Rng) -> f32 {
        rng.range(self.min, self.max)
    }
}

/// Inclusive range a tick count is sampled from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickBounds {
    pub min: u64,
    pub max: u64,
}

impl TickBounds {
    pub const fn new(min: u64, max: u64) -> Self {
        Self { min, max }
    }

    /// Uniform sample from `[min, max]`.
    pub fn sample(&self, rng: &mut Rng) -> u64 {
        rng.u64(self.min..=self.max)
    }
}

/// Tunables for the firework engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FireworksOptions {
    /// Ticks between auto-spawned launches.
    pub delay: TickBounds,
    /// Base particle count per burst.
    pub particles: usize,
    /// Per-tick downward acceleration applied to burst particles.
    pub gravity: f32,
    /// Per-tick velocity damping applied to burst particles.
    pub friction: f32,
    /// Per-tick velocity multiplier applied to climbing shells.
    pub acceleration: f32,
    /// Trail capacity of a climbing shell, in recorded positions.
    pub trail_length: usize,
    /// Maximum outward burst speed.
    pub explosion: f32,
    /// Lateral wobble strength of climbing shells.
    pub wobble: f32,
    /// Stroke width of the shell trace.
    pub trace_width: Bounds,
    /// Radius of burst particles.
    pub spark_size: Bounds,
    /// Trace lightness percentage.
    pub brightness: Bounds,
    /// Per-tick alpha decay of burst particles.
    pub decay: Bounds,
}

impl Default for FireworksOptions {
    fn default() -> Self {
        Self {
            delay: TickBounds::new(10, 20),
            particles: 80,
            gravity: 0.015,
            friction: 0.98,
            acceleration: 1.05,
            trail_length: 10,
            explosion: 2.5,
            wobble: 0.4,
            trace_width: Bounds::new(0.5, 1.0),
            spark_size: Bounds::new(0.5, 1.5),
            brightness: Bounds::new(50.0, 80.0),
            decay: Bounds::new(0.015, 0.03),
        }
    }
}

/// Tunables for the snowfall pool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnowOptions {
    /// Number of flakes in the pool.
    pub count: usize,
    /// Flake radius.
    pub size: Bounds,
    /// Downward speed per tick.
    pub speed: Bounds,
    /// Per-flake constant horizontal drift.
    pub drift: Bounds,
    /// Horizontal push applied to every flake.
    pub wind: f32,
}

impl Default for SnowOptions {
    fn default() -> Self {
        Self {
            count: 200,
            size: Bounds::new(0.5, 2.0),
            speed: Bounds::new(0.15, 0.55),
            drift: Bounds::new(-0.25, 0.25),
            wind: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_sample_in_range() {
        let mut rng = Rng::with_seed(3);
        let bounds = Bounds::new(0.015, 0.03);
        for _ in 0..128 {
            let v = bounds.sample(&mut rng);
            assert!((0.015..0.03).contains(&v));
        }
    }

    #[test]
    fn tick_bounds_sample_inclusive() {
        let mut rng = Rng::with_seed(9);
        let bounds = TickBounds::new(10, 20);
        for _ in 0..128 {
            let v = bounds.sample(&mut rng);
            assert!((10..=20).contains(&v));
        }
    }

    #[test]
    fn pinned_bounds_sample_is_constant() {
        let mut rng = Rng::with_seed(1);
        let bounds = Bounds::new(0.02, 0.02);
        assert_eq!(bounds.sample(&mut rng), 0.02);
    }
}
