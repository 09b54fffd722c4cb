//! Closed registries of behavior, effect, and termination identifiers.
//!
//! The description language refers to behaviors and effects by bare
//! names. Rather than resolving those names against an open namespace,
//! each registry is a fixed enum with a `from_name` lookup; a name that
//! resolves in no registry is a parse error.

use crate::action::Action;
use crate::geom::Orientation;

// ── BehaviorClass ──────────────────────────────────────────────────

/// The built-in behavior a sprite type instantiates.
///
/// A behavior bundles the per-tick update routine with its attribute
/// defaults (speed, orientation, movement flags). Sprite definitions
/// may override the defaults with keyword arguments.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BehaviorClass {
    /// Never moves; the default for walls.
    Immovable,
    /// Moves only when pushed by effects (no passive movement by default).
    Passive,
    /// A collectible that increments a named counter on its collector.
    Resource,
    /// The four-direction player avatar.
    MovingAvatar,
    /// A left/right avatar that can fire its declared projectile type.
    FlakAvatar,
    /// Moves every tick along its fixed orientation.
    Missile,
    /// Picks a fresh random direction for every move.
    RandomNpc,
    /// A missile that also spawns its declared sprite type as it flies.
    Bomber,
    /// A stationary generator that spawns its declared sprite type.
    SpawnPoint,
}

impl BehaviorClass {
    /// Look up a behavior by its description-language name.
    pub fn from_name(name: &str) -> Option<BehaviorClass> {
        match name {
            "Immovable" => Some(BehaviorClass::Immovable),
            "Passive" => Some(BehaviorClass::Passive),
            "Resource" => Some(BehaviorClass::Resource),
            "MovingAvatar" => Some(BehaviorClass::MovingAvatar),
            "FlakAvatar" => Some(BehaviorClass::FlakAvatar),
            "Missile" => Some(BehaviorClass::Missile),
            "RandomNPC" => Some(BehaviorClass::RandomNpc),
            "Bomber" => Some(BehaviorClass::Bomber),
            "SpawnPoint" => Some(BehaviorClass::SpawnPoint),
            _ => None,
        }
    }

    /// The registered name of this behavior.
    pub fn name(&self) -> &'static str {
        match self {
            BehaviorClass::Immovable => "Immovable",
            BehaviorClass::Passive => "Passive",
            BehaviorClass::Resource => "Resource",
            BehaviorClass::MovingAvatar => "MovingAvatar",
            BehaviorClass::FlakAvatar => "FlakAvatar",
            BehaviorClass::Missile => "Missile",
            BehaviorClass::RandomNpc => "RandomNPC",
            BehaviorClass::Bomber => "Bomber",
            BehaviorClass::SpawnPoint => "SpawnPoint",
        }
    }

    /// Whether instances respond to host actions.
    pub fn is_avatar(&self) -> bool {
        matches!(self, BehaviorClass::MovingAvatar | BehaviorClass::FlakAvatar)
    }

    /// Whether instances never move at all.
    pub fn is_static(&self) -> bool {
        matches!(self, BehaviorClass::Immovable | BehaviorClass::SpawnPoint)
    }

    /// Whether instances fly along a fixed orientation.
    pub fn is_missile(&self) -> bool {
        matches!(self, BehaviorClass::Missile | BehaviorClass::Bomber)
    }

    /// Whether instances move randomly.
    pub fn is_random_mover(&self) -> bool {
        matches!(self, BehaviorClass::RandomNpc)
    }

    /// Whether the update routine draws from the simulation RNG.
    pub fn is_stochastic(&self) -> bool {
        matches!(
            self,
            BehaviorClass::RandomNpc | BehaviorClass::Bomber | BehaviorClass::SpawnPoint
        )
    }

    /// Whether the update routine can create new sprites on its own.
    pub fn is_spawner(&self) -> bool {
        matches!(self, BehaviorClass::Bomber | BehaviorClass::SpawnPoint)
    }

    /// Default movement speed, in blocks per move.
    pub fn default_speed(&self) -> f64 {
        match self {
            BehaviorClass::Immovable
            | BehaviorClass::Passive
            | BehaviorClass::Resource
            | BehaviorClass::SpawnPoint => 0.0,
            BehaviorClass::MovingAvatar
            | BehaviorClass::FlakAvatar
            | BehaviorClass::Missile
            | BehaviorClass::RandomNpc
            | BehaviorClass::Bomber => 1.0,
        }
    }

    /// Default orientation; missiles fly right unless told otherwise.
    pub fn default_orientation(&self) -> Orientation {
        if self.is_missile() {
            Orientation::RIGHT
        } else {
            Orientation::NONE
        }
    }

    /// The ordered action vocabulary instances respond to.
    ///
    /// Empty for non-avatar behaviors. Stable for the lifetime of a
    /// game definition, so hosts can index into it.
    pub fn actions(&self) -> &'static [Action] {
        match self {
            BehaviorClass::MovingAvatar => &[
                Action::Noop,
                Action::Up,
                Action::Down,
                Action::Left,
                Action::Right,
            ],
            BehaviorClass::FlakAvatar => {
                &[Action::Noop, Action::Left, Action::Right, Action::Shoot]
            }
            _ => &[],
        }
    }
}

// ── EffectKind ─────────────────────────────────────────────────────

/// The primitive operation a collision rule applies to a pair.
///
/// Effects receive the two colliding sprites in the rule's declared
/// group order; out-of-bounds rules pass no second party. Every effect
/// is a no-op on a sprite already pending removal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EffectKind {
    /// Mark the first party for end-of-tick removal.
    KillSprite,
    /// Mark both parties for end-of-tick removal.
    KillBoth,
    /// Move the first party back to its previous-tick position.
    StepBack,
    /// Step back, drop one row, and reverse direction.
    TurnAround,
    /// Reverse the first party's orientation in place.
    ReverseDirection,
    /// Push the first party one block along the second party's last move.
    BounceForward,
    /// Replace the first party with a new instance of `stype`.
    TransformTo,
    /// Credit the first party's resource counter to the second party.
    CollectResource,
    /// Add `value` to the first party's named resource counter.
    ChangeResource,
}

impl EffectKind {
    /// Look up an effect by its description-language name.
    pub fn from_name(name: &str) -> Option<EffectKind> {
        match name {
            "killSprite" => Some(EffectKind::KillSprite),
            "killBoth" => Some(EffectKind::KillBoth),
            "stepBack" => Some(EffectKind::StepBack),
            "turnAround" => Some(EffectKind::TurnAround),
            "reverseDirection" => Some(EffectKind::ReverseDirection),
            "bounceForward" => Some(EffectKind::BounceForward),
            "transformTo" => Some(EffectKind::TransformTo),
            "collectResource" => Some(EffectKind::CollectResource),
            "changeResource" => Some(EffectKind::ChangeResource),
            _ => None,
        }
    }

    /// The registered name of this effect.
    pub fn name(&self) -> &'static str {
        match self {
            EffectKind::KillSprite => "killSprite",
            EffectKind::KillBoth => "killBoth",
            EffectKind::StepBack => "stepBack",
            EffectKind::TurnAround => "turnAround",
            EffectKind::ReverseDirection => "reverseDirection",
            EffectKind::BounceForward => "bounceForward",
            EffectKind::TransformTo => "transformTo",
            EffectKind::CollectResource => "collectResource",
            EffectKind::ChangeResource => "changeResource",
        }
    }
}

// ── TerminationClass ───────────────────────────────────────────────

/// The built-in termination predicates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TerminationClass {
    /// Done when one group's live count drops to its limit.
    SpriteCounter,
    /// Done when either of two groups' live counts drops to its limit.
    MultiSpriteCounter,
    /// Done when the tick counter reaches its limit.
    Timeout,
}

impl TerminationClass {
    /// Look up a termination predicate by its description-language name.
    pub fn from_name(name: &str) -> Option<TerminationClass> {
        match name {
            "SpriteCounter" => Some(TerminationClass::SpriteCounter),
            "MultiSpriteCounter" => Some(TerminationClass::MultiSpriteCounter),
            "Timeout" => Some(TerminationClass::Timeout),
            _ => None,
        }
    }
}
