//! Simulation engine for the Ludi grid-game interpreter.
//!
//! [`Game`] owns one episode: the live sprite population built from a
//! [`GameDef`](ludi_core::GameDef) and a character grid, advanced one
//! discrete step at a time by [`Game::tick`]. The engine is strictly
//! single threaded and deterministic: identical definitions, levels,
//! and action sequences replay identically.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

mod collide;
mod effects;
mod game;
mod level;
mod metrics;
mod observe;
mod sprite;
mod terminate;

pub use game::{Game, TickResult};
pub use metrics::SimMetrics;
pub use observe::{Observation, Observations};
pub use sprite::{Sprite, SpriteId};
