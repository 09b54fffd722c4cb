//! The discrete action vocabulary avatars can declare.

use crate::geom::Orientation;
use std::fmt;

/// One discrete input the host supplies per simulation tick.
///
/// The engine interprets nothing here; each avatar behavior declares the
/// ordered subset of actions it responds to, and the host indexes into
/// that list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Action {
    /// Do nothing this tick.
    Noop,
    /// Move or face up.
    Up,
    /// Move or face down.
    Down,
    /// Move or face left.
    Left,
    /// Move or face right.
    Right,
    /// Fire the avatar's declared projectile type.
    Shoot,
}

impl Action {
    /// Stable identifier for this action.
    pub fn name(&self) -> &'static str {
        match self {
            Action::Noop => "NOOP",
            Action::Up => "UP",
            Action::Down => "DOWN",
            Action::Left => "LEFT",
            Action::Right => "RIGHT",
            Action::Shoot => "SHOOT",
        }
    }

    /// The movement direction this action implies, if any.
    pub fn orientation(&self) -> Option<Orientation> {
        match self {
            Action::Up => Some(Orientation::UP),
            Action::Down => Some(Orientation::DOWN),
            Action::Left => Some(Orientation::LEFT),
            Action::Right => Some(Orientation::RIGHT),
            Action::Noop | Action::Shoot => None,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
