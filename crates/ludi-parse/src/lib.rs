//! Description-language parser for the Ludi grid-game interpreter.
//!
//! Game descriptions are indentation-structured text: a root game
//! declaration with up to four nested sections (`SpriteSet`,
//! `InteractionSet`, `LevelMapping`, `TerminationSet`). [`parse`]
//! turns such a document into an immutable
//! [`GameDef`](ludi_core::GameDef) or fails with a
//! [`ParseError`](ludi_core::ParseError).

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod indent;
mod parser;

pub use parser::parse;
