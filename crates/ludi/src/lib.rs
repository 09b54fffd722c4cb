//! Ludi: an interpreter for a miniature 2D grid-game description
//! language.
//!
//! A game is two pieces of text: a description declaring sprite types,
//! interaction rules, and termination predicates, and a character grid
//! laying out one level. Ludi parses the description into a
//! [`GameDef`](types::GameDef), instantiates it onto the grid, and
//! steps the resulting [`Game`](engine::Game) one action at a time.
//! Simulation is strictly deterministic: the same description, level,
//! and action sequence always replays the same episode.
//!
//! # Quick start
//!
//! ```rust
//! use ludi::prelude::*;
//!
//! let description = "
//! BasicGame
//!     SpriteSet
//!         gold > Resource value=1 limit=5 color=GOLD
//!     InteractionSet
//!         gold avatar > collectResource scoreChange=1
//!         gold avatar > killSprite
//!         avatar wall > stepBack
//!     TerminationSet
//!         SpriteCounter stype=gold limit=0 win=True
//!     LevelMapping
//!         g > gold
//! ";
//! let def = parse(description).unwrap();
//! let mut game = Game::build(def, "wwww\nwAgw\nwwww").unwrap();
//!
//! // Step right, onto the gold.
//! let right = game
//!     .possible_actions()
//!     .iter()
//!     .position(|a| *a == Action::Right)
//!     .unwrap();
//! let result = game.tick(right).unwrap();
//! assert_eq!(result.score_delta, 1);
//! assert!(!result.ended);
//!
//! // The collected gold is gone; the win predicate fires next tick.
//! let result = game.tick(0).unwrap();
//! assert_eq!(result.win, Some(true));
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in
//! the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `ludi-core` | The parsed blueprint, geometry, colors, actions, errors |
//! | [`text`] | `ludi-parse` | The description parser and indented-tree reader |
//! | [`engine`] | `ludi-engine` | The episode state, tick protocol, and observations |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Blueprint types, geometry, colors, actions, and errors (`ludi-core`).
///
/// Contains [`types::GameDef`] and everything it is made of, plus the
/// error types the parser and engine report.
pub use ludi_core as types;

/// The description parser (`ludi-parse`).
///
/// [`text::parse`] turns description text into a
/// [`types::GameDef`]; [`text::indent`] exposes the underlying
/// indented-tree reader.
pub use ludi_parse as text;

/// The simulation engine (`ludi-engine`).
///
/// [`engine::Game`] owns one episode; [`engine::Game::tick`] advances
/// it and [`engine::Game::observations`] reports the visible sprites.
pub use ludi_engine as engine;

/// Common imports for typical usage.
///
/// ```rust
/// use ludi::prelude::*;
/// ```
pub mod prelude {
    pub use ludi_core::{
        Action, ActionError, GameDef, LevelError, Orientation, ParseError, Value,
    };
    pub use ludi_engine::{Game, Observation, SimMetrics, SpriteId, TickResult};
    pub use ludi_parse::parse;
}
