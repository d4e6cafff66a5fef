//! Snowfall pool animation.
//!
//! A degenerate cousin of the firework particles: a fixed pool of flakes
//! with constant fall speed and drift, recycled at the edges instead of
//! fading out.

use bulkkot_core::{Rng, SnowOptions};

use crate::canvas::{BlendMode, Canvas};

const SNOW_COLOR: (u8, u8, u8) = (255, 255, 255);

#[derive(Debug, Clone)]
struct Flake {
    x: f32,
    y: f32,
    radius: f32,
    speed: f32,
    drift: f32,
    alpha: f32,
}

/// A fixed-size pool of falling flakes. Flakes never expire; they wrap to
/// the top past the bottom edge and wrap horizontally at the sides.
#[derive(Debug)]
pub struct Snowfield {
    opts: SnowOptions,
    width: f32,
    height: f32,
    flakes: Vec<Flake>,
    running: bool,
}

impl Snowfield {
    /// Create a pool of `opts.count` flakes scattered over the surface.
    pub fn new(opts: SnowOptions, width: u16, height: u16, rng: &mut Rng) -> Self {
        let mut field = Self {
            opts,
            width: width as f32,
            height: height as f32,
            flakes: Vec::new(),
            running: false,
        };
        field.respawn(rng);
        field
    }

    pub fn count(&self) -> usize {
        self.flakes.len()
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Begin advancing. Calling while already running is a no-op.
    pub fn start(&mut self) {
        self.running = true;
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Drop the pool and blank the surface.
    pub fn clear(&mut self, canvas: &mut Canvas) {
        self.flakes.clear();
        canvas.clear();
    }

    /// Reinitialize the pool at a new size.
    pub fn set_count(&mut self, count: usize, rng: &mut Rng) {
        self.opts.count = count;
        self.respawn(rng);
    }

    /// Rescatter the pool over new dimensions.
    pub fn resize(&mut self, width: u16, height: u16, rng: &mut Rng) {
        self.width = width as f32;
        self.height = height as f32;
        self.respawn(rng);
    }

    /// Advance every flake one tick and redraw onto `canvas`. No-op unless
    /// running.
    pub fn advance(&mut self, canvas: &mut Canvas, rng: &mut Rng) {
        if !self.running {
            return;
        }
        canvas.clear();
        canvas.set_blend(BlendMode::Over);

        for flake in &mut self.flakes {
            flake.y += flake.speed;
            flake.x += flake.drift + self.opts.wind;

            if flake.y - flake.radius > self.height {
                flake.y = -flake.radius;
                flake.x = rng.f32() * self.width;
            }
            if flake.x - flake.radius > self.width {
                flake.x = -flake.radius;
            } else if flake.x + flake.radius < 0.0 {
                flake.x = self.width + flake.radius;
            }

            canvas.fill_circle(flake.x, flake.y, flake.radius, SNOW_COLOR, flake.alpha);
        }
    }

    fn respawn(&mut self, rng: &mut Rng) {
        let flakes = (0..self.opts.count)
            .map(|_| Flake {
                x: rng.f32() * self.width,
                y: rng.f32() * self.height,
                radius: self.opts.size.sample(rng),
                speed: self.opts.speed.sample(rng),
                drift: self.opts.drift.sample(rng),
                alpha: rng.f32(),
            })
            .collect();
        self.flakes = flakes;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(count: usize, width: u16, height: u16) -> (Snowfield, Canvas, Rng) {
        let opts = SnowOptions {
            count,
            ..SnowOptions::default()
        };
        let mut rng = Rng::with_seed(12);
        let mut field = Snowfield::new(opts, width, height, &mut rng);
        field.start();
        (field, Canvas::new(width, height), rng)
    }

    #[test]
    fn pool_holds_configured_count() {
        let (field, ..) = field(150, 40, 40);
        assert_eq!(field.count(), 150);
    }

    #[test]
    fn set_count_reinitializes_the_pool() {
        let (mut field, _, mut rng) = field(150, 40, 40);
        field.set_count(25, &mut rng);
        assert_eq!(field.count(), 25);
        field.set_count(0, &mut rng);
        assert_eq!(field.count(), 0);
    }

    #[test]
    fn flakes_wrap_instead_of_escaping() {
        let (mut field, mut canvas, mut rng) = field(100, 20, 20);
        for _ in 0..2000 {
            field.advance(&mut canvas, &mut rng);
        }
        for flake in &field.flakes {
            assert!(flake.y >= -flake.radius - 1.0);
            assert!(flake.y <= field.height + flake.radius + 1.0);
            assert!(flake.x >= -flake.radius - 1.0);
            assert!(flake.x <= field.width + flake.radius + 1.0);
        }
    }

    #[test]
    fn stopped_field_does_not_move() {
        let (mut field, mut canvas, mut rng) = field(10, 20, 20);
        field.stop();
        let before: Vec<(f32, f32)> = field.flakes.iter().map(|f| (f.x, f.y)).collect();
        field.advance(&mut canvas, &mut rng);
        let after: Vec<(f32, f32)> = field.flakes.iter().map(|f| (f.x, f.y)).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn zero_area_surface_tolerated() {
        let (mut field, _, mut rng) = field(50, 0, 0);
        let mut canvas = Canvas::new(0, 0);
        for _ in 0..10 {
            field.advance(&mut canvas, &mut rng);
        }
        assert_eq!(field.count(), 50);
    }
}
