//! # particle_morph
//!
//! A particle cloud that morphs between three shapes (heart, ring, burst),
//! scaled and colored live by a thumb-index pinch.
//!
//! The scene logic (`particles`, `shapes`, `color`, `gesture`, `mode`,
//! `session`) is pure and host-independent. The host side (`camera`,
//! `tracker`, `render`, `draw`) feeds it camera frames and hand landmarks
//! and puts the result on screen.
//!
//! ## Pinch -> scene mapping
//!
//! | Input | Effect |
//! |---|---|
//! | Pinch distance `d` | scale = clamp(1/d, 0.6, 2.2), color = (1-2d, 2d, 0.8) |
//! | `d < 0.04`, >= 1 s since last switch | next shape, regenerated in its base color |
//! | No hand | nothing changes |

pub mod camera;
pub mod color;
pub mod config;
pub mod draw;
pub mod error;
pub mod gesture;
pub mod mode;
pub mod particles;
pub mod render;
pub mod session;
pub mod shapes;
pub mod tracker;
pub mod types;
