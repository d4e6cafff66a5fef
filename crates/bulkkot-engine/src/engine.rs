//! Firework lifecycle: spawn scheduler, climbing shells, burst particles.

use bulkkot_core::{FireworksOptions, Rng};

use crate::canvas::{BlendMode, Canvas};
use crate::rocket::Rocket;
use crate::spark::Spark;

/// Extra particles added to each burst on top of the configured base count.
const BURST_BONUS: usize = 20;

/// Ticks between staggered launches queued by [`FireworksEngine::launch`].
const LAUNCH_STAGGER: u64 = 3;

/// Chance that an auto-spawn fires two shells instead of one.
const DOUBLE_LAUNCH_CHANCE: f32 = 0.3;

/// The firework simulation: owns the shell and particle collections and a
/// tick-based auto-spawn scheduler. One [`FireworksEngine::advance`] call
/// is one frame; the caller owns the cadence.
#[derive(Debug)]
pub struct FireworksEngine {
    opts: FireworksOptions,
    width: f32,
    height: f32,
    rockets: Vec<Rocket>,
    sparks: Vec<Spark>,
    running: bool,
    tick: u64,
    /// Tick of the next automatic launch, while running.
    next_spawn: Option<u64>,
    /// Due ticks of launches queued by [`FireworksEngine::launch`].
    pending: Vec<u64>,
}

impl FireworksEngine {
    /// Create an engine for a surface of the given pixel dimensions.
    pub fn new(opts: FireworksOptions, width: u16, height: u16) -> Self {
        Self {
            opts,
            width: width as f32,
            height: height as f32,
            rockets: Vec::new(),
            sparks: Vec::new(),
            running: false,
            tick: 0,
            next_spawn: None,
            pending: Vec::new(),
        }
    }

    pub fn options(&self) -> &FireworksOptions {
        &self.opts
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn rockets(&self) -> &[Rocket] {
        &self.rockets
    }

    pub fn sparks(&self) -> &[Spark] {
        &self.sparks
    }

    /// Begin advancing and schedule the first automatic launch. Calling
    /// while already running is a no-op.
    pub fn start(&mut self, rng: &mut Rng) {
        if self.running {
            return;
        }
        self.running = true;
        self.next_spawn = Some(self.tick + self.opts.delay.sample(rng));
    }

    /// Halt advancement and cancel every scheduled launch.
    pub fn stop(&mut self) {
        self.running = false;
        self.next_spawn = None;
        self.pending.clear();
    }

    /// Discard all shells and particles and blank the surface.
    pub fn clear(&mut self, canvas: &mut Canvas) {
        self.rockets.clear();
        self.sparks.clear();
        canvas.clear();
    }

    /// Queue `count` launches, staggered a few ticks apart.
    pub fn launch(&mut self, count: usize) {
        for i in 0..count {
            self.pending.push(self.tick + i as u64 * LAUNCH_STAGGER);
        }
    }

    /// Update the spawn bounds for future shells. Live entities keep their
    /// coordinates.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width as f32;
        self.height = height as f32;
    }

    /// Advance the simulation one tick and redraw onto `canvas`. No-op
    /// unless running.
    pub fn advance(&mut self, canvas: &mut Canvas, rng: &mut Rng) {
        if !self.running {
            return;
        }
        self.tick += 1;

        if self.next_spawn.is_some_and(|due| self.tick >= due) {
            let count = if rng.chance(DOUBLE_LAUNCH_CHANCE) { 2 } else { 1 };
            self.launch(count);
            self.next_spawn = Some(self.tick + self.opts.delay.sample(rng));
        }

        // Materialize launches whose stagger delay has elapsed.
        for i in (0..self.pending.len()).rev() {
            if self.pending[i] <= self.tick {
                self.pending.swap_remove(i);
                let rocket = self.spawn_rocket(rng);
                self.rockets.push(rocket);
            }
        }

        canvas.clear();
        canvas.set_blend(BlendMode::Additive);

        // Reverse index order keeps iteration safe under mid-loop removal.
        for i in (0..self.rockets.len()).rev() {
            if self.rockets[i].update(&self.opts) {
                let rocket = self.rockets.swap_remove(i);
                let (x, y) = rocket.position();
                let count = self.opts.particles + rng.usize(0..BURST_BONUS);
                for _ in 0..count {
                    self.sparks.push(Spark::new(x, y, rocket.hue(), &self.opts, rng));
                }
            } else {
                self.rockets[i].draw(canvas, &self.opts, rng);
            }
        }

        for i in (0..self.sparks.len()).rev() {
            self.sparks[i].update(&self.opts);
            if self.sparks[i].faded() {
                self.sparks.swap_remove(i);
            } else {
                self.sparks[i].draw(canvas);
            }
        }
    }

    /// New shell from a random bottom-edge zone toward the upper-middle
    /// region of the surface.
    fn spawn_rocket(&self, rng: &mut Rng) -> Rocket {
        let origin_x = match rng.usize(0..3) {
            0 => rng.f32() * self.width * 0.3,
            1 => self.width * 0.35 + rng.f32() * self.width * 0.3,
            _ => self.width * 0.7 + rng.f32() * self.width * 0.3,
        };
        let target = (
            self.width * 0.2 + rng.f32() * self.width * 0.6,
            self.height * 0.15 + rng.f32() * self.height * 0.35,
        );
        Rocket::new((origin_x, self.height), target, &self.opts, rng)
    }
}
