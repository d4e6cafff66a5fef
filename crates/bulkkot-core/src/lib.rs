//! Core types shared by the bulkkot animation crates.
//!
//! This crate holds the pieces every other crate agrees on: the effect
//! selector, the tunable option records, the seedable random source, and
//! the HSL color math used for firework hues.

use serde::{Deserialize, Serialize};

mod color;
mod options;
mod rng;

pub use color::{hsl_to_rgb, hue_color};
pub use options::{Bounds, FireworksOptions, SnowOptions, TickBounds};
pub use rng::Rng;

/// Which animation the application is showing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EffectKind {
    #[default]
    Fireworks,
    Snowfall,
}

impl EffectKind {
    /// Switch to the other effect.
    pub fn toggle(self) -> Self {
        match self {
            EffectKind::Fireworks => EffectKind::Snowfall,
            EffectKind::Snowfall => EffectKind::Fireworks,
        }
    }

    /// Human-readable name for the status line.
    pub fn label(self) -> &'static str {
        match self {
            EffectKind::Fireworks => "fireworks",
            EffectKind::Snowfall => "snowfall",
        }
    }
}
