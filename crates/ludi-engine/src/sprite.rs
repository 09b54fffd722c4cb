//! Live sprite instances and their flat, resolved configuration.

use indexmap::IndexMap;
use ludi_core::color::COLOR_DISC;
use ludi_core::{BehaviorClass, Color, EntityTypeDef, Orientation, Rect, Value};
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use smallvec::SmallVec;
use std::fmt;

use crate::metrics::SimMetrics;

/// Keyword arguments a sprite definition may carry. Anything else is
/// dropped at spawn time and counted in
/// [`SimMetrics::unknown_attributes`].
const KNOWN_ATTRIBUTES: [&str; 14] = [
    "color",
    "speed",
    "cooldown",
    "orientation",
    "stype",
    "prob",
    "total",
    "value",
    "limit",
    "res_type",
    "hidden",
    "img",
    "invisible",
    "shrinkfactor",
];

/// Unique identifier of one live sprite, allocated monotonically per
/// episode. Never reused within an episode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SpriteId(pub u64);

impl fmt::Display for SpriteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One live entity in the simulation.
///
/// All type-level configuration (behavior defaults, then definition
/// keyword arguments) is resolved into flat fields at spawn time; the
/// definition is not consulted again afterwards.
#[derive(Clone, Debug, PartialEq)]
pub struct Sprite {
    /// Unique per-episode identifier.
    pub id: SpriteId,
    /// The declaring type name.
    pub name: String,
    /// The behavior driving this sprite's update routine.
    pub class: BehaviorClass,
    /// Ancestor tags plus the type name, most specific last.
    pub stypes: SmallVec<[String; 4]>,
    /// Current position and collision footprint.
    pub rect: Rect,
    /// Position at the start of the current tick.
    pub lastrect: Rect,
    /// Current facing/movement direction.
    pub orientation: Orientation,
    /// Movement speed, in blocks per move.
    pub speed: f64,
    /// Ticks that must elapse between two moves.
    pub cooldown: u32,
    /// Ticks since this sprite last moved.
    pub lastmove: u32,
    /// Render color; random from the palette when undeclared.
    pub color: Color,
    /// Named resource counters carried by this sprite.
    pub resources: IndexMap<String, i64>,
    /// Sprite type spawned by shooters and spawners.
    pub stype: Option<String>,
    /// Spawn probability per due tick.
    pub prob: f64,
    /// Spawn budget; the sprite dies once it is exhausted.
    pub total: Option<u64>,
    /// Sprites spawned so far, measured against `total`.
    pub spawned: u64,
    /// Amount a resource sprite credits its collector.
    pub value: i64,
    /// Counter cap declared by a resource sprite.
    pub limit: i64,
    /// Resource counter name override; defaults to the type name.
    pub res_type: Option<String>,
}

impl Sprite {
    /// Instantiate a definition at a pixel position, resolving the
    /// layered configuration (behavior defaults, then definition
    /// arguments) into flat fields.
    pub(crate) fn from_def(
        id: SpriteId,
        def: &EntityTypeDef,
        pos: (i32, i32),
        block_size: u32,
        rng: &mut ChaCha8Rng,
        metrics: &mut SimMetrics,
    ) -> Sprite {
        let args = &def.args;
        for key in args.keys() {
            if !KNOWN_ATTRIBUTES.contains(&key.as_str()) {
                metrics.unknown_attributes += 1;
            }
        }
        let color = args.get("color").and_then(Value::as_color).unwrap_or_else(|| {
            Color(
                COLOR_DISC[rng.random_range(0..COLOR_DISC.len())],
                COLOR_DISC[rng.random_range(0..COLOR_DISC.len())],
                COLOR_DISC[rng.random_range(0..COLOR_DISC.len())],
            )
        });
        let rect = Rect::new(pos.0, pos.1, block_size, block_size);
        Sprite {
            id,
            name: def.name.clone(),
            class: def.class,
            stypes: def.stypes.clone(),
            rect,
            lastrect: rect,
            orientation: args
                .get("orientation")
                .and_then(Value::as_dir)
                .unwrap_or_else(|| def.class.default_orientation()),
            speed: args
                .get("speed")
                .and_then(Value::as_f64)
                .unwrap_or_else(|| def.class.default_speed()),
            cooldown: args
                .get("cooldown")
                .and_then(Value::as_i64)
                .map(|n| n.max(0) as u32)
                .unwrap_or(0),
            lastmove: 0,
            color,
            resources: IndexMap::new(),
            stype: args.get("stype").and_then(Value::as_str).map(str::to_string),
            prob: args.get("prob").and_then(Value::as_f64).unwrap_or(1.0),
            total: args
                .get("total")
                .and_then(Value::as_i64)
                .map(|n| n.max(0) as u64),
            spawned: 0,
            value: args.get("value").and_then(Value::as_i64).unwrap_or(1),
            limit: args.get("limit").and_then(Value::as_i64).unwrap_or(2),
            res_type: args
                .get("res_type")
                .and_then(Value::as_str)
                .map(str::to_string),
        }
    }

    /// Whether this sprite belongs to a tag group.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.stypes.iter().any(|t| t == tag)
    }

    /// The resource counter this sprite feeds, for resource behaviors.
    pub fn resource_type(&self) -> &str {
        self.res_type.as_deref().unwrap_or(&self.name)
    }

    /// The unit direction of this sprite's movement this tick.
    pub fn last_direction(&self) -> Orientation {
        Orientation::unit(self.rect.x - self.lastrect.x, self.rect.y - self.lastrect.y)
    }

    /// Start-of-update bookkeeping: remember the previous position and
    /// age the cooldown clock.
    pub(crate) fn prepare_update(&mut self) {
        self.lastrect = self.rect;
        self.lastmove += 1;
    }

    /// Grid movement: advance `speed * block_size` pixels along `dir`,
    /// gated by the cooldown. Fractional distances truncate toward
    /// zero.
    pub(crate) fn grid_move(&mut self, dir: Orientation, speed: f64, block_size: u32) {
        if dir.is_none() || speed == 0.0 || self.cooldown > self.lastmove {
            return;
        }
        let step = speed * f64::from(block_size);
        let dx = (f64::from(dir.dx) * step) as i32;
        let dy = (f64::from(dir.dy) * step) as i32;
        self.rect = self.rect.translated(dx, dy);
        self.lastmove = 0;
    }
}
