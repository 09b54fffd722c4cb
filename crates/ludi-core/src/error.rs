//! Error types for the Ludi interpreter.
//!
//! Three fatal error families, one per external operation: parsing a
//! description, building a level, and stepping the simulation. Every
//! other runtime anomaly is non-fatal by design — the engine counts it
//! and continues.

use std::error::Error;
use std::fmt;

/// Errors from parsing a game description.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParseError {
    /// The description contains no game declaration.
    EmptyDocument,
    /// A line's indentation matches no open ancestor.
    BadIndentation {
        /// 1-based source line.
        line: usize,
    },
    /// A sprite, interaction, or mapping line is missing its `>`.
    MissingSeparator {
        /// 1-based source line.
        line: usize,
    },
    /// A bare leading token resolved to no registered behavior.
    UnknownClass {
        /// The unresolvable token.
        name: String,
    },
    /// A leaf sprite definition inherited no behavior class.
    MissingClass {
        /// The sprite name lacking a class.
        name: String,
    },
    /// An interaction's effect token resolved to no registered effect.
    UnknownEffect {
        /// The unresolvable token.
        name: String,
    },
    /// A termination line's leading token resolved to no registered
    /// predicate.
    UnknownTermination {
        /// The unresolvable token.
        name: String,
    },
    /// A mapping line's left side is not exactly one character.
    BadMappingChar {
        /// 1-based source line.
        line: usize,
        /// The offending token.
        token: String,
    },
    /// An interaction line has zero or more than two group tokens.
    BadGroupCount {
        /// 1-based source line.
        line: usize,
        /// Number of group tokens found.
        found: usize,
    },
    /// A token in keyword position is not of the form `key=value`.
    BadKeyword {
        /// 1-based source line.
        line: usize,
        /// The offending token.
        token: String,
    },
    /// A predicate or effect is missing a required keyword argument.
    MissingArgument {
        /// The class requiring the argument.
        class: String,
        /// The missing keyword.
        key: &'static str,
    },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyDocument => write!(f, "description contains no game declaration"),
            Self::BadIndentation { line } => {
                write!(f, "line {line}: indentation matches no open block")
            }
            Self::MissingSeparator { line } => write!(f, "line {line}: missing '>'"),
            Self::UnknownClass { name } => write!(f, "unknown behavior class '{name}'"),
            Self::MissingClass { name } => {
                write!(f, "sprite '{name}' declares and inherits no behavior class")
            }
            Self::UnknownEffect { name } => write!(f, "unknown effect '{name}'"),
            Self::UnknownTermination { name } => {
                write!(f, "unknown termination predicate '{name}'")
            }
            Self::BadMappingChar { line, token } => {
                write!(f, "line {line}: mapping key '{token}' is not a single character")
            }
            Self::BadGroupCount { line, found } => {
                write!(f, "line {line}: expected one or two collision groups, found {found}")
            }
            Self::BadKeyword { line, token } => {
                write!(f, "line {line}: expected key=value, found '{token}'")
            }
            Self::MissingArgument { class, key } => {
                write!(f, "{class} requires the '{key}' argument")
            }
        }
    }
}

impl Error for ParseError {}

/// Errors from building a level out of a character grid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LevelError {
    /// Not every row has the same length.
    InconsistentRowLength {
        /// 0-based row index of the offending row.
        row: usize,
        /// Length of the first row.
        expected: usize,
        /// Length of the offending row.
        found: usize,
    },
    /// The grid is smaller than 2x2.
    TooSmall {
        /// Grid width in cells.
        width: usize,
        /// Grid height in cells.
        height: usize,
    },
}

impl fmt::Display for LevelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InconsistentRowLength {
                row,
                expected,
                found,
            } => write!(
                f,
                "row {row} has length {found}, expected {expected}"
            ),
            Self::TooSmall { width, height } => {
                write!(f, "level is {width}x{height}, minimum is 2x2")
            }
        }
    }
}

impl Error for LevelError {}

/// Errors from stepping the simulation.
///
/// An out-of-range action index is a programming error in the host and
/// is never clamped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActionError {
    /// The supplied action index is outside the declared action set.
    InvalidAction {
        /// The supplied index.
        index: usize,
        /// Size of the declared action set.
        available: usize,
    },
}

impl fmt::Display for ActionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidAction { index, available } => {
                write!(f, "action index {index} outside declared set of {available}")
            }
        }
    }
}

impl Error for ActionError {}
