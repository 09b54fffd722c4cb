//! The parsed, immutable game blueprint.
//!
//! [`GameDef`] is what the parser produces and the engine consumes. It
//! is read-only after parsing: the engine clones whatever it needs into
//! per-episode state and never writes back.

use crate::action::Action;
use crate::class::{BehaviorClass, EffectKind};
use crate::value::Value;
use indexmap::IndexMap;
use smallvec::SmallVec;

/// Ticks after which a game ends unconditionally, regardless of its
/// declared termination predicates.
pub const HARD_TICK_CAP: u64 = 1000;

/// Default pixel edge length of one grid block.
pub const DEFAULT_BLOCK_SIZE: u32 = 10;

/// Default simulation seed when the description declares none.
pub const DEFAULT_SEED: u64 = 123;

// ── EntityTypeDef ──────────────────────────────────────────────────

/// A named sprite template: behavior class, accumulated keyword
/// arguments, and the ancestor tag chain from its definition nesting.
#[derive(Clone, Debug, PartialEq)]
pub struct EntityTypeDef {
    /// The declared type name.
    pub name: String,
    /// The behavior instances of this type run each tick.
    pub class: BehaviorClass,
    /// Keyword arguments accumulated down the nesting chain
    /// (child overrides parent; `singleton` already stripped).
    pub args: IndexMap<String, Value>,
    /// Ancestor tags plus the type's own name, most specific last.
    ///
    /// Fixed after parsing; length equals nesting depth + 1.
    pub stypes: SmallVec<[String; 4]>,
}

impl EntityTypeDef {
    /// Whether instances of this type are excluded from observations.
    pub fn hidden(&self) -> bool {
        self.args
            .get("hidden")
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }
}

// ── Collision rules ────────────────────────────────────────────────

/// What the second side of a collision rule matches.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CollisionTarget {
    /// A tag or exact type name.
    Group(String),
    /// The out-of-bounds sentinel (`EOS`): fires for every first-group
    /// instance not fully contained in the level bounds.
    OutOfBounds,
}

/// One ordered entry of the interaction table.
///
/// All rules matching a pair fire every tick, in declaration order;
/// later rules never shadow earlier ones.
#[derive(Clone, Debug, PartialEq)]
pub struct CollisionRule {
    /// The first group; the effect's first argument comes from here.
    pub first: String,
    /// The second group, or the out-of-bounds sentinel.
    pub second: CollisionTarget,
    /// The effect applied to each qualifying pair.
    pub effect: EffectKind,
    /// Score delta applied once per qualifying pair, before the effect
    /// runs. Stripped from `args` at parse time.
    pub score_change: i64,
    /// Remaining effect parameters (e.g. `stype`, `resource`, `value`).
    pub args: IndexMap<String, Value>,
}

// ── Termination rules ──────────────────────────────────────────────

/// A parsed termination predicate, evaluated in declaration order at
/// the start of every tick; the first one reporting done wins.
#[derive(Clone, Debug, PartialEq)]
pub enum TerminationRule {
    /// Done when `stype`'s live count drops to `limit` or below.
    SpriteCounter {
        /// The counted group.
        stype: String,
        /// Inclusive count threshold.
        limit: i64,
        /// Win flag reported when this predicate fires.
        win: bool,
    },
    /// Done when either group's live count drops to `limit` or below.
    MultiSpriteCounter {
        /// First counted group.
        stype1: String,
        /// Second counted group.
        stype2: String,
        /// Inclusive count threshold, shared by both groups.
        limit: i64,
        /// Win flag reported when this predicate fires.
        win: bool,
    },
    /// Done once the tick counter reaches `limit`.
    Timeout {
        /// Tick threshold.
        limit: u64,
        /// Win flag reported when this predicate fires.
        win: bool,
    },
}

// ── GameDef ────────────────────────────────────────────────────────

/// The complete parsed blueprint of one game.
#[derive(Clone, Debug, PartialEq)]
pub struct GameDef {
    /// Pixel edge length of one grid block.
    pub block_size: u32,
    /// Seed for the per-episode RNG.
    pub seed: u64,
    /// Type name → template, in declaration order.
    pub sprite_defs: IndexMap<String, EntityTypeDef>,
    /// Iteration/draw order of type names. Re-declaring a name moves it
    /// to the end without duplicating it.
    pub z_order: Vec<String>,
    /// Type names allowed at most one live instance.
    pub singletons: Vec<String>,
    /// The ordered interaction table.
    pub collision_rules: Vec<CollisionRule>,
    /// Level character → type names instantiated at that cell, in order.
    pub char_mapping: IndexMap<char, Vec<String>>,
    /// The ordered termination predicates.
    pub terminations: Vec<TerminationRule>,
}

impl Default for GameDef {
    /// A blueprint with only the built-in `wall` and `avatar` types.
    fn default() -> Self {
        let mut sprite_defs = IndexMap::new();
        let mut wall_args = IndexMap::new();
        wall_args.insert("color".to_string(), Value::Color(crate::color::DARKGRAY));
        sprite_defs.insert(
            "wall".to_string(),
            EntityTypeDef {
                name: "wall".to_string(),
                class: BehaviorClass::Immovable,
                args: wall_args,
                stypes: SmallVec::from_iter(["wall".to_string()]),
            },
        );
        sprite_defs.insert(
            "avatar".to_string(),
            EntityTypeDef {
                name: "avatar".to_string(),
                class: BehaviorClass::MovingAvatar,
                args: IndexMap::new(),
                stypes: SmallVec::from_iter(["avatar".to_string()]),
            },
        );
        Self {
            block_size: DEFAULT_BLOCK_SIZE,
            seed: DEFAULT_SEED,
            sprite_defs,
            z_order: vec!["wall".to_string(), "avatar".to_string()],
            singletons: Vec::new(),
            collision_rules: Vec::new(),
            char_mapping: IndexMap::new(),
            terminations: Vec::new(),
        }
    }
}

impl GameDef {
    /// Register (or re-register) a sprite template.
    ///
    /// A re-declared name overwrites its template and moves to the end
    /// of the z-order; everything else keeps its relative order.
    pub fn register_sprite(&mut self, def: EntityTypeDef) {
        self.z_order.retain(|n| n != &def.name);
        self.z_order.push(def.name.clone());
        self.sprite_defs.insert(def.name.clone(), def);
    }

    /// The fallback mapping for level characters with no declared entry.
    pub fn default_char_mapping(c: char) -> Option<&'static [&'static str]> {
        match c {
            'w' => Some(&["wall"]),
            'A' => Some(&["avatar"]),
            _ => None,
        }
    }

    /// The avatar's behavior class: the first type in z-order whose
    /// behavior responds to actions, if any.
    pub fn avatar_class(&self) -> Option<BehaviorClass> {
        self.z_order
            .iter()
            .filter_map(|name| self.sprite_defs.get(name))
            .map(|def| def.class)
            .find(BehaviorClass::is_avatar)
    }

    /// The ordered action vocabulary the host indexes into.
    ///
    /// Stable for the lifetime of the definition. A game with no avatar
    /// type still accepts the no-op action so hosts can drive time.
    pub fn possible_actions(&self) -> &'static [Action] {
        match self.avatar_class() {
            Some(class) => class.actions(),
            None => &[Action::Noop],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(name: &str, class: BehaviorClass) -> EntityTypeDef {
        EntityTypeDef {
            name: name.to_string(),
            class,
            args: IndexMap::new(),
            stypes: SmallVec::from_iter([name.to_string()]),
        }
    }

    #[test]
    fn default_def_knows_walls_and_avatars() {
        let def = GameDef::default();
        assert_eq!(def.z_order, ["wall", "avatar"]);
        assert_eq!(
            def.sprite_defs["wall"].class,
            BehaviorClass::Immovable
        );
        assert_eq!(def.avatar_class(), Some(BehaviorClass::MovingAvatar));
        assert_eq!(GameDef::default_char_mapping('w'), Some(&["wall"][..]));
        assert_eq!(GameDef::default_char_mapping('A'), Some(&["avatar"][..]));
        assert_eq!(GameDef::default_char_mapping('.'), None);
    }

    #[test]
    fn reregistration_moves_to_end_without_duplication() {
        let mut def = GameDef::default();
        def.register_sprite(leaf("alien", BehaviorClass::Bomber));
        assert_eq!(def.z_order, ["wall", "avatar", "alien"]);

        def.register_sprite(leaf("wall", BehaviorClass::Immovable));
        assert_eq!(def.z_order, ["avatar", "alien", "wall"]);
        assert_eq!(def.z_order.iter().filter(|n| *n == "wall").count(), 1);
        assert_eq!(def.sprite_defs.len(), 3);
    }

    #[test]
    fn possible_actions_follow_the_avatar_class() {
        let mut def = GameDef::default();
        assert_eq!(def.possible_actions().len(), 5);

        def.register_sprite(leaf("avatar", BehaviorClass::FlakAvatar));
        assert_eq!(def.possible_actions().len(), 4);

        def.sprite_defs.shift_remove("avatar");
        def.z_order.retain(|n| n != "avatar");
        assert_eq!(def.possible_actions(), &[Action::Noop]);
    }

    #[test]
    fn hidden_defaults_to_false() {
        let mut t = leaf("background", BehaviorClass::Immovable);
        assert!(!t.hidden());
        t.args
            .insert("hidden".to_string(), Value::Bool(true));
        assert!(t.hidden());
    }
}
