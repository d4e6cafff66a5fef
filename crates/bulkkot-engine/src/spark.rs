//! Decaying burst particles.

use std::f32::consts::TAU;

use bulkkot_core::{FireworksOptions, Rng, hue_color};

use crate::canvas::Canvas;

/// Hue jitter applied to particles relative to their parent shell.
const HUE_JITTER: f32 = 15.0;

/// Minimum outward burst speed.
const MIN_SPEED: f32 = 0.5;

/// Fill lightness percentage of a burst particle.
const LIGHTNESS: f32 = 60.0;

/// Alpha at or below which a particle counts as spent. Leaves room for
/// float error so a decay rate that divides 1.0 evenly still reaches zero.
const MIN_ALPHA: f32 = 1e-3;

/// A burst particle flying outward from a detonation, fading to nothing.
#[derive(Debug, Clone)]
pub struct Spark {
    x: f32,
    y: f32,
    vx: f32,
    vy: f32,
    hue: f32,
    alpha: f32,
    decay: f32,
    radius: f32,
}

impl Spark {
    /// Spawn one particle of a burst at the detonation point.
    pub fn new(x: f32, y: f32, hue: f32, opts: &FireworksOptions, rng: &mut Rng) -> Self {
        let angle = rng.f32() * TAU;
        let speed = MIN_SPEED + rng.f32() * opts.explosion;
        Self {
            x,
            y,
            vx: angle.cos() * speed,
            vy: angle.sin() * speed,
            hue: hue + rng.range(-HUE_JITTER, HUE_JITTER),
            alpha: 1.0,
            decay: opts.decay.sample(rng),
            radius: opts.spark_size.sample(rng),
        }
    }

    pub fn position(&self) -> (f32, f32) {
        (self.x, self.y)
    }

    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    /// True once visibility has decayed away; the engine drops the particle.
    pub fn faded(&self) -> bool {
        self.alpha <= MIN_ALPHA
    }

    /// Damp, fall, advance, fade. Particles leaving the surface keep going
    /// until their alpha runs out; there is no edge collision.
    pub fn update(&mut self, opts: &FireworksOptions) {
        self.vx *= opts.friction;
        self.vy *= opts.friction;
        self.vy += opts.gravity;
        self.x += self.vx;
        self.y += self.vy;
        self.alpha -= self.decay;
    }

    /// Filled circle at the current visibility.
    pub fn draw(&self, canvas: &mut Canvas) {
        canvas.fill_circle(
            self.x,
            self.y,
            self.radius,
            hue_color(self.hue, LIGHTNESS),
            self.alpha.max(0.0),
        );
    }
}
