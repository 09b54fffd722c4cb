//! The host-facing observation surface.

use indexmap::IndexMap;
use ludi_core::{Color, Orientation};

use crate::game::Game;
use crate::sprite::SpriteId;

/// A flat snapshot of one visible sprite.
///
/// Positions are block-normalized: a sprite sitting exactly on a grid
/// cell reports whole numbers, and fractional speeds produce fractional
/// coordinates. Owned data only, so hosts can hold observations across
/// ticks.
#[derive(Clone, Debug, PartialEq)]
pub struct Observation {
    /// The observed sprite's per-episode identifier.
    pub id: SpriteId,
    /// The declaring type name.
    pub name: String,
    /// Horizontal position of the top-left corner, in blocks.
    pub x: f64,
    /// Vertical position of the top-left corner, in blocks.
    pub y: f64,
    /// Current facing/movement direction.
    pub orientation: Orientation,
    /// Render color.
    pub color: Color,
    /// Whether this sprite's behavior responds to actions.
    pub is_avatar: bool,
    /// Whether this sprite never moves.
    pub is_immovable: bool,
    /// Whether this sprite moves randomly.
    pub is_random_mover: bool,
    /// Whether this sprite flies along a fixed orientation.
    pub is_missile: bool,
    /// Resource counters carried by this sprite.
    pub resources: IndexMap<String, i64>,
}

/// Lazy iterator over the visible sprite population, in z-order.
///
/// Restartable: call [`Game::observations`] again for a fresh pass.
/// Groups declared `hidden=True` are skipped wholesale.
pub struct Observations<'a> {
    game: &'a Game,
    group: usize,
    member: usize,
}

impl<'a> Observations<'a> {
    pub(crate) fn new(game: &'a Game) -> Observations<'a> {
        Observations {
            game,
            group: 0,
            member: 0,
        }
    }
}

impl Iterator for Observations<'_> {
    type Item = Observation;

    fn next(&mut self) -> Option<Observation> {
        let block = f64::from(self.game.block_size);
        loop {
            let name = self.game.z_order.get(self.group)?;
            let hidden = self
                .game
                .def
                .sprite_defs
                .get(name)
                .is_some_and(|d| d.hidden());
            let ids = if hidden {
                None
            } else {
                self.game.groups.get(name)
            };
            match ids.and_then(|ids| ids.get(self.member)) {
                Some(&id) => {
                    self.member += 1;
                    if let Some(s) = self.game.sprite(id) {
                        return Some(Observation {
                            id,
                            name: s.name.clone(),
                            x: f64::from(s.rect.x) / block,
                            y: f64::from(s.rect.y) / block,
                            orientation: s.orientation,
                            color: s.color,
                            is_avatar: s.class.is_avatar(),
                            is_immovable: s.class.is_static(),
                            is_random_mover: s.class.is_random_mover(),
                            is_missile: s.class.is_missile(),
                            resources: s.resources.clone(),
                        });
                    }
                }
                None => {
                    self.group += 1;
                    self.member = 0;
                }
            }
        }
    }
}
