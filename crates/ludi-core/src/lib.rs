//! Core types for the Ludi grid-game interpreter.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the data model shared by the parser and the simulation engine: the
//! parsed [`GameDef`] blueprint, the closed behavior/effect/termination
//! registries, geometry and keyword-value primitives, and the error
//! taxonomy.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod action;
pub mod class;
pub mod color;
pub mod def;
pub mod error;
pub mod geom;
pub mod value;

pub use action::Action;
pub use class::{BehaviorClass, EffectKind, TerminationClass};
pub use color::Color;
pub use def::{CollisionRule, CollisionTarget, EntityTypeDef, GameDef, TerminationRule};
pub use error::{ActionError, LevelError, ParseError};
pub use geom::{Orientation, Rect};
pub use value::Value;
