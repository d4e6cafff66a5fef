//! Climbing firework shells.

use std::collections::VecDeque;
use std::f32::consts::TAU;

use bulkkot_core::{FireworksOptions, Rng, hue_color};

use crate::canvas::Canvas;

/// Launch speed range for new shells.
const MIN_SPEED: f32 = 1.2;
const MAX_SPEED: f32 = 2.2;

/// Detonate after covering this share of the straight-line target distance,
/// so wobble-induced path deviation still bursts near the target.
const DETONATION_PROGRESS: f32 = 0.8;

/// Tip radius and lightness of the bright head circle.
const TIP_RADIUS: f32 = 1.0;
const TIP_LIGHTNESS: f32 = 90.0;

/// A shell climbing from its launch point toward a target, leaving a
/// bounded trail behind it. Once detonated it never updates or draws again;
/// the engine removes it in the same loop pass.
#[derive(Debug, Clone)]
pub struct Rocket {
    x: f32,
    y: f32,
    origin: (f32, f32),
    target: (f32, f32),
    vx: f32,
    vy: f32,
    wobble: f32,
    wobble_freq: f32,
    wobble_phase: f32,
    trail: VecDeque<(f32, f32)>,
    hue: f32,
    brightness: f32,
    target_dist: f32,
    traveled: f32,
    detonated: bool,
}

impl Rocket {
    pub fn new(
        origin: (f32, f32),
        target: (f32, f32),
        opts: &FireworksOptions,
        rng: &mut Rng,
    ) -> Self {
        let (sx, sy) = origin;
        let (tx, ty) = target;
        let angle = (ty - sy).atan2(tx - sx);
        let speed = rng.range(MIN_SPEED, MAX_SPEED);
        Self {
            x: sx,
            y: sy,
            origin,
            target,
            vx: angle.cos() * speed,
            vy: angle.sin() * speed,
            wobble: (rng.f32() - 0.5) * opts.wobble,
            wobble_freq: rng.range(0.04, 0.10),
            wobble_phase: rng.f32() * TAU,
            trail: VecDeque::with_capacity(opts.trail_length + 1),
            hue: rng.f32() * 360.0,
            brightness: opts.brightness.sample(rng),
            target_dist: (tx - sx).hypot(ty - sy),
            traveled: 0.0,
            detonated: false,
        }
    }

    pub fn position(&self) -> (f32, f32) {
        (self.x, self.y)
    }

    pub fn origin(&self) -> (f32, f32) {
        self.origin
    }

    pub fn target(&self) -> (f32, f32) {
        self.target
    }

    pub fn hue(&self) -> f32 {
        self.hue
    }

    pub fn traveled(&self) -> f32 {
        self.traveled
    }

    pub fn detonated(&self) -> bool {
        self.detonated
    }

    /// Advance one tick. Returns true when the shell has detonated.
    pub fn update(&mut self, opts: &FireworksOptions) -> bool {
        if self.detonated {
            return true;
        }

        self.trail.push_back((self.x, self.y));
        if self.trail.len() > opts.trail_length {
            self.trail.pop_front();
        }

        let phase = self.traveled * self.wobble_freq + self.wobble_phase;
        let wobble_x = phase.sin() * self.wobble;
        let wobble_y = phase.cos() * self.wobble;

        self.vx *= opts.acceleration;
        self.vy *= opts.acceleration;
        self.x += self.vx + wobble_x;
        self.y += self.vy + wobble_y;

        self.traveled = (self.x - self.origin.0).hypot(self.y - self.origin.1);

        if self.traveled >= self.target_dist * DETONATION_PROGRESS {
            self.detonated = true;
        }
        self.detonated
    }

    /// Stroke the trail and the bright head tip.
    pub fn draw(&self, canvas: &mut Canvas, opts: &FireworksOptions, rng: &mut Rng) {
        if self.detonated {
            return;
        }
        let mut points: Vec<(f32, f32)> = self.trail.iter().copied().collect();
        points.push((self.x, self.y));
        canvas.stroke_polyline(
            &points,
            opts.trace_width.sample(rng),
            hue_color(self.hue, self.brightness),
        );
        canvas.fill_circle(
            self.x,
            self.y,
            TIP_RADIUS,
            hue_color(self.hue, TIP_LIGHTNESS),
            1.0,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn launch(seed: u64, opts: &FireworksOptions) -> (Rocket, Rng) {
        let mut rng = Rng::with_seed(seed);
        let rocket = Rocket::new((40.0, 100.0), (50.0, 20.0), opts, &mut rng);
        (rocket, rng)
    }

    #[test]
    fn traveled_distance_is_non_decreasing() {
        let opts = FireworksOptions::default();
        for seed in [1, 17, 99] {
            let (mut rocket, _) = launch(seed, &opts);
            let mut last = rocket.traveled();
            for _ in 0..500 {
                let detonated = rocket.update(&opts);
                assert!(rocket.traveled() >= last);
                last = rocket.traveled();
                if detonated {
                    break;
                }
            }
            assert!(rocket.detonated(), "shell must detonate within 500 ticks");
        }
    }

    #[test]
    fn detonates_near_the_target() {
        let opts = FireworksOptions::default();
        let (mut rocket, _) = launch(5, &opts);
        while !rocket.update(&opts) {}
        let dist = (50.0f32 - 40.0).hypot(20.0 - 100.0);
        assert!(rocket.traveled() >= dist * 0.8);
        // One tick past the threshold at most: the overshoot is bounded by
        // the final step length.
        assert!(rocket.traveled() < dist * 1.2);
    }

    #[test]
    fn straight_climb_descends_monotonically_without_wobble() {
        let opts = FireworksOptions {
            wobble: 0.0,
            ..FireworksOptions::default()
        };
        let mut rng = Rng::with_seed(11);
        let mut rocket = Rocket::new((0.0, 100.0), (0.0, 0.0), &opts, &mut rng);
        let mut last_y = 100.0;
        while !rocket.update(&opts) {
            let (x, y) = rocket.position();
            assert!(x.abs() < 1e-4);
            assert!(y < last_y);
            last_y = y;
        }
    }

    #[test]
    fn trail_capacity_is_bounded() {
        let opts = FireworksOptions::default();
        let (mut rocket, _) = launch(23, &opts);
        for _ in 0..opts.trail_length * 2 {
            if rocket.update(&opts) {
                break;
            }
        }
        assert!(rocket.trail.len() <= opts.trail_length);
    }

    #[test]
    fn no_movement_after_detonation() {
        let opts = FireworksOptions::default();
        let (mut rocket, _) = launch(31, &opts);
        while !rocket.update(&opts) {}
        let frozen = rocket.position();
        assert!(rocket.update(&opts));
        assert_eq!(rocket.position(), frozen);
    }
}
