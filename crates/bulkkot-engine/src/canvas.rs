//! Off-screen drawing surface with half-block terminal output.

use std::collections::HashSet;

use ratatui::{
    style::{Color, Style},
    text::{Line, Span},
};

/// How draw operations combine with pixels already on the surface.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BlendMode {
    /// Alpha-blend over the existing pixel.
    #[default]
    Over,
    /// Accumulate brightness, saturating at white.
    Additive,
}

/// RGB pixel surface the animations rasterize into.
///
/// The grid is in half-block pixels: one terminal row holds two vertically
/// stacked pixels, packed back into `▀`/`▄` spans by [`Canvas::to_lines`].
/// Channels are kept as floats in `[0, 1]` so additive blending can
/// accumulate before saturating on conversion.
#[derive(Debug, Clone)]
pub struct Canvas {
    width: u16,
    height: u16,
    blend: BlendMode,
    pixels: Vec<[f32; 3]>,
}

/// Channel sum below which a pixel renders as empty space.
const DARK_THRESHOLD: f32 = 0.02;

/// Step length when rasterizing line segments.
const STROKE_STEP: f32 = 0.5;

impl Canvas {
    /// Create a surface of the given pixel dimensions.
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            blend: BlendMode::default(),
            pixels: vec![[0.0; 3]; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Reallocate for new dimensions, discarding the current contents.
    /// Zero-area surfaces are fine; drawing onto them is a no-op.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.pixels.clear();
        self.pixels
            .resize(width as usize * height as usize, [0.0; 3]);
    }

    /// Blank the surface.
    pub fn clear(&mut self) {
        self.pixels.fill([0.0; 3]);
    }

    pub fn set_blend(&mut self, blend: BlendMode) {
        self.blend = blend;
    }

    /// True when no pixel holds any light.
    pub fn is_blank(&self) -> bool {
        self.pixels
            .iter()
            .all(|p| p[0] + p[1] + p[2] < DARK_THRESHOLD)
    }

    fn plot(&mut self, x: i32, y: i32, rgb: (u8, u8, u8), alpha: f32) {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return;
        }
        let idx = y as usize * self.width as usize + x as usize;
        let src = [
            rgb.0 as f32 / 255.0,
            rgb.1 as f32 / 255.0,
            rgb.2 as f32 / 255.0,
        ];
        let pixel = &mut self.pixels[idx];
        for c in 0..3 {
            pixel[c] = match self.blend {
                BlendMode::Over => src[c] * alpha + pixel[c] * (1.0 - alpha),
                BlendMode::Additive => pixel[c] + src[c] * alpha,
            };
        }
    }

    /// Fill a circle of radius `r` centered at `(cx, cy)` with the given
    /// transparency. Radii below half a pixel still cover the center pixel.
    pub fn fill_circle(&mut self, cx: f32, cy: f32, r: f32, rgb: (u8, u8, u8), alpha: f32) {
        if alpha <= 0.0 {
            return;
        }
        let r = r.max(0.5);
        let r2 = r * r;
        let x0 = (cx - r).floor() as i32;
        let x1 = (cx + r).ceil() as i32;
        let y0 = (cy - r).floor() as i32;
        let y1 = (cy + r).ceil() as i32;
        for y in y0..=y1 {
            for x in x0..=x1 {
                let dx = x as f32 + 0.5 - cx;
                let dy = y as f32 + 0.5 - cy;
                if dx * dx + dy * dy <= r2 {
                    self.plot(x, y, rgb, alpha);
                }
            }
        }
    }

    /// Stroke a polyline through `points` with the given brush width.
    ///
    /// Coverage is collected first so every pixel blends exactly once no
    /// matter how many segments or brush stamps overlap it.
    pub fn stroke_polyline(&mut self, points: &[(f32, f32)], width: f32, rgb: (u8, u8, u8)) {
        if points.len() < 2 {
            return;
        }
        let brush = (width * 0.5).max(0.5);
        let mut covered: HashSet<(i32, i32)> = HashSet::new();
        for pair in points.windows(2) {
            let (ax, ay) = pair[0];
            let (bx, by) = pair[1];
            let len = (bx - ax).hypot(by - ay);
            let steps = (len / STROKE_STEP).ceil().max(1.0) as usize;
            for step in 0..=steps {
                let t = step as f32 / steps as f32;
                let px = ax + (bx - ax) * t;
                let py = ay + (by - ay) * t;
                stamp_disc(px, py, brush, &mut covered);
            }
        }
        for (x, y) in covered {
            self.plot(x, y, rgb, 1.0);
        }
    }

    /// Pack vertical pixel pairs into half-block spans, one [`Line`] per
    /// terminal row. Unlit cells stay as plain spaces so the terminal
    /// background shows through.
    pub fn to_lines(&self) -> Vec<Line<'static>> {
        let rows = self.height.div_ceil(2);
        (0..rows)
            .map(|row| {
                let spans: Vec<Span> = (0..self.width)
                    .map(|x| self.pack_cell(x, row))
                    .collect();
                Line::from(spans)
            })
            .collect()
    }

    fn pack_cell(&self, x: u16, row: u16) -> Span<'static> {
        let top = self.pixel_color(x, row * 2);
        let bottom = self.pixel_color(x, row * 2 + 1);
        match (top, bottom) {
            (None, None) => Span::raw(" "),
            (Some(top), None) => Span::styled("▀", Style::new().fg(top)),
            (None, Some(bottom)) => Span::styled("▄", Style::new().fg(bottom)),
            (Some(top), Some(bottom)) => {
                Span::styled("▀", Style::new().fg(top).bg(bottom))
            }
        }
    }

    /// Terminal color of a pixel, or `None` when it is dark.
    fn pixel_color(&self, x: u16, y: u16) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let p = self.pixels[y as usize * self.width as usize + x as usize];
        if p[0] + p[1] + p[2] < DARK_THRESHOLD {
            return None;
        }
        Some(Color::Rgb(
            (p[0].min(1.0) * 255.0) as u8,
            (p[1].min(1.0) * 255.0) as u8,
            (p[2].min(1.0) * 255.0) as u8,
        ))
    }
}

fn stamp_disc(cx: f32, cy: f32, r: f32, out: &mut HashSet<(i32, i32)>) {
    let r2 = r * r;
    let x0 = (cx - r).floor() as i32;
    let x1 = (cx + r).ceil() as i32;
    let y0 = (cy - r).floor() as i32;
    let y1 = (cy + r).ceil() as i32;
    for y in y0..=y1 {
        for x in x0..=x1 {
            let dx = x as f32 + 0.5 - cx;
            let dy = y as f32 + 0.5 - cy;
            if dx * dx + dy * dy <= r2 {
                out.insert((x, y));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_blank_and_clears() {
        let mut canvas = Canvas::new(8, 8);
        assert!(canvas.is_blank());
        canvas.fill_circle(4.0, 4.0, 1.0, (255, 255, 255), 1.0);
        assert!(!canvas.is_blank());
        canvas.clear();
        assert!(canvas.is_blank());
    }

    #[test]
    fn additive_blending_accumulates() {
        let mut canvas = Canvas::new(4, 4);
        canvas.set_blend(BlendMode::Additive);
        canvas.fill_circle(1.5, 1.5, 0.5, (100, 0, 0), 1.0);
        let dim = canvas.pixel_color(1, 1).unwrap();
        canvas.fill_circle(1.5, 1.5, 0.5, (100, 0, 0), 1.0);
        canvas.fill_circle(1.5, 1.5, 0.5, (100, 0, 0), 1.0);
        let bright = canvas.pixel_color(1, 1).unwrap();
        let (Color::Rgb(dim_r, ..), Color::Rgb(bright_r, ..)) = (dim, bright) else {
            panic!("expected rgb colors");
        };
        assert!(bright_r > dim_r);
        // A fourth pass would exceed full brightness; conversion saturates.
        canvas.fill_circle(1.5, 1.5, 0.5, (100, 0, 0), 1.0);
        assert_eq!(canvas.pixel_color(1, 1), Some(Color::Rgb(255, 0, 0)));
    }

    #[test]
    fn half_block_packing() {
        let mut canvas = Canvas::new(2, 4);
        // Top pixel of row 0, bottom pixel of row 1.
        canvas.fill_circle(0.5, 0.5, 0.5, (255, 255, 255), 1.0);
        canvas.fill_circle(0.5, 3.5, 0.5, (255, 255, 255), 1.0);
        let lines = canvas.to_lines();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].spans[0].content, "▀");
        assert_eq!(lines[1].spans[0].content, "▄");
        assert_eq!(lines[0].spans[1].content, " ");
    }

    #[test]
    fn polyline_blends_each_pixel_once() {
        let mut canvas = Canvas::new(16, 4);
        canvas.set_blend(BlendMode::Additive);
        // Two collinear segments retrace the same pixels; additive mode must
        // not double up. A doubled blend of 128 would saturate at 255.
        canvas.stroke_polyline(&[(0.5, 1.5), (7.5, 1.5), (0.5, 1.5)], 1.0, (128, 128, 128));
        let Some(Color::Rgb(r, ..)) = canvas.pixel_color(3, 1) else {
            panic!("pixel on the stroke must be lit");
        };
        assert!((120..=136).contains(&r));
    }

    #[test]
    fn zero_area_surface_tolerated() {
        let mut canvas = Canvas::new(4, 4);
        canvas.resize(0, 0);
        canvas.fill_circle(1.0, 1.0, 2.0, (255, 255, 255), 1.0);
        canvas.stroke_polyline(&[(0.0, 0.0), (3.0, 3.0)], 1.0, (255, 255, 255));
        assert!(canvas.to_lines().is_empty());
        assert!(canvas.is_blank());
    }
}
