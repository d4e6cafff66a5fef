//! Particle animations for the bulkkot terminal toy.
//!
//! This crate provides the firework engine (climbing shells that detonate
//! into decaying burst particles, driven by a tick-based spawn scheduler)
//! and the snowfall pool, both rasterized onto an off-screen [`Canvas`]
//! that packs into ratatui half-block lines.

mod canvas;
mod engine;
mod rocket;
mod snow;
mod spark;

pub use canvas::{BlendMode, Canvas};
pub use engine::FireworksEngine;
pub use rocket::Rocket;
pub use snow::Snowfield;
pub use spark::Spark;
