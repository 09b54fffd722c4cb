//! Effects a collision rule can apply to a qualifying pair.

use indexmap::IndexMap;
use ludi_core::{EffectKind, Orientation, Value};

use crate::game::Game;
use crate::sprite::{Sprite, SpriteId};

/// Apply one effect to the first party of a collision, with the
/// partner available where the effect needs it. Out-of-bounds rules
/// carry no partner; partner-dependent parts then do nothing.
pub(crate) fn apply(
    game: &mut Game,
    kind: EffectKind,
    first: SpriteId,
    second: Option<SpriteId>,
    args: &IndexMap<String, Value>,
) {
    match kind {
        EffectKind::KillSprite => game.kill(first),
        EffectKind::KillBoth => {
            game.kill(first);
            if let Some(b) = second {
                game.kill(b);
            }
        }
        EffectKind::StepBack => {
            if let Some(s) = game.sprite_mut(first) {
                s.rect = s.lastrect;
            }
        }
        EffectKind::ReverseDirection => {
            if let Some(s) = game.sprite_mut(first) {
                s.orientation = s.orientation.reversed();
            }
        }
        EffectKind::TurnAround => turn_around(game, first),
        EffectKind::BounceForward => bounce_forward(game, first, second),
        EffectKind::TransformTo => transform_to(game, first, args),
        EffectKind::CollectResource => collect_resource(game, first, second),
        EffectKind::ChangeResource => change_resource(game, first, args),
    }
}

/// Undo this tick's move, drop one row, and face the other way. The
/// cooldown clock is left ripe so the reversed march resumes at once.
fn turn_around(game: &mut Game, first: SpriteId) {
    let block = game.block_size();
    if let Some(s) = game.sprite_mut(first) {
        s.rect = s.lastrect;
        let step = (forced_speed(s) * f64::from(block)) as i32;
        s.rect = s.rect.translated(0, step);
        s.lastmove = s.cooldown;
        s.orientation = s.orientation.reversed();
    }
}

/// Push the first sprite one move along the partner's direction of
/// travel this tick, ignoring its cooldown.
fn bounce_forward(game: &mut Game, first: SpriteId, second: Option<SpriteId>) {
    let dir = second
        .and_then(|b| game.sprite(b))
        .map(Sprite::last_direction)
        .unwrap_or(Orientation::NONE);
    if dir.is_none() {
        return;
    }
    let block = game.block_size();
    if let Some(s) = game.sprite_mut(first) {
        let step = (forced_speed(s) * f64::from(block)) as i32;
        s.rect = s.rect.translated(dir.dx * step, dir.dy * step);
    }
}

/// Replace the first sprite with a fresh instance of the declared type
/// at the same position, preserving its facing.
fn transform_to(game: &mut Game, first: SpriteId, args: &IndexMap<String, Value>) {
    let (pos, orientation) = match game.sprite(first) {
        Some(s) => ((s.rect.x, s.rect.y), s.orientation),
        None => return,
    };
    if let Some(stype) = args.get("stype").and_then(Value::as_str) {
        let created = game.create_sprites(&[stype.to_string()], pos);
        if let Some(&id) = created.first() {
            if let Some(fresh) = game.sprite_mut(id) {
                fresh.orientation = orientation;
            }
        }
    }
    game.kill(first);
}

/// Credit the partner with the resource the first sprite carries as a
/// pickup; the counter clamps at its declared limit.
fn collect_resource(game: &mut Game, first: SpriteId, second: Option<SpriteId>) {
    let (rtype, value) = match game.sprite(first) {
        Some(s) => (s.resource_type().to_string(), s.value),
        None => return,
    };
    if let Some(b) = second {
        game.change_resource(b, &rtype, value);
    }
}

/// Adjust a named counter on the first sprite by the declared amount.
fn change_resource(game: &mut Game, first: SpriteId, args: &IndexMap<String, Value>) {
    let delta = args.get("value").and_then(Value::as_i64).unwrap_or(1);
    if let Some(rtype) = args.get("resource").and_then(Value::as_str) {
        let rtype = rtype.to_string();
        game.change_resource(first, &rtype, delta);
    }
}

fn forced_speed(s: &Sprite) -> f64 {
    if s.speed == 0.0 {
        1.0
    } else {
        s.speed
    }
}

impl Game {
    /// Shift a sprite's named resource counter by `delta`, clamped to
    /// `[0, limit]`. Clamping is counted, never an error.
    pub(crate) fn change_resource(&mut self, id: SpriteId, rtype: &str, delta: i64) {
        let limit = self.resource_limits.get(rtype).copied().unwrap_or(2).max(0);
        if let Some(s) = self.sprites.get_mut(&id) {
            let current = s.resources.get(rtype).copied().unwrap_or(0);
            let raw = current + delta;
            let clamped = raw.clamp(0, limit);
            if clamped != raw {
                self.metrics.resource_clamps += 1;
            }
            s.resources.insert(rtype.to_string(), clamped);
        }
    }
}
