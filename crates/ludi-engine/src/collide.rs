//! The ordered collision pass.

use ludi_core::{CollisionRule, CollisionTarget};

use crate::effects;
use crate::game::Game;
use crate::sprite::SpriteId;

impl Game {
    /// Run every interaction rule once, in declaration order.
    ///
    /// Each rule resolves its groups through a per-pass cache that is
    /// dropped whenever an effect changes group membership, so later
    /// rules observe mid-tick creations and kills. Hits for one rule
    /// are collected before any of its effects run.
    pub(crate) fn collision_pass(&mut self) {
        self.group_cache.clear();
        for idx in 0..self.def.collision_rules.len() {
            let rule = self.def.collision_rules[idx].clone();
            match rule.second.clone() {
                CollisionTarget::OutOfBounds => self.out_of_bounds_rule(&rule),
                CollisionTarget::Group(second) => self.group_rule(&rule, &second),
            }
        }
    }

    fn group_rule(&mut self, rule: &CollisionRule, second: &str) {
        let firsts = self.cached_group(&rule.first);
        let seconds = self.cached_group(second);
        if firsts.is_empty() || seconds.is_empty() {
            return;
        }

        let mut hits: Vec<(SpriteId, SpriteId)> = Vec::new();
        if rule.first == second {
            // A group colliding with itself reports every overlapping
            // pair in both orderings.
            for &a in &firsts {
                for &b in &firsts {
                    if a != b && self.overlapping(a, b) {
                        hits.push((a, b));
                    }
                }
            }
        } else {
            // Iterate the smaller group on the outside; the pair keeps
            // its declared role order either way.
            let swapped = seconds.len() < firsts.len();
            let (outer, inner) = if swapped {
                (&seconds, &firsts)
            } else {
                (&firsts, &seconds)
            };
            for &o in outer.iter() {
                for &i in inner.iter() {
                    if o == i {
                        continue;
                    }
                    let (a, b) = if swapped { (i, o) } else { (o, i) };
                    if self.overlapping(a, b) {
                        hits.push((a, b));
                    }
                }
            }
        }

        for (a, b) in hits {
            if !self.sprites.contains_key(&a) || !self.sprites.contains_key(&b) {
                continue;
            }
            // Score counts for every qualifying pair, even when the
            // effect is then suppressed by a pending kill.
            self.add_score(rule.score_change);
            if self.kill_set.contains(&a) {
                continue;
            }
            effects::apply(self, rule.effect, a, Some(b), &rule.args);
        }
    }

    fn out_of_bounds_rule(&mut self, rule: &CollisionRule) {
        let ids = self.cached_group(&rule.first);
        let bounds = self.bounds();
        for id in ids {
            let outside = match self.sprites.get(&id) {
                Some(s) => !bounds.contains(&s.rect),
                None => false,
            };
            if !outside {
                continue;
            }
            self.add_score(rule.score_change);
            if self.kill_set.contains(&id) {
                continue;
            }
            effects::apply(self, rule.effect, id, None, &rule.args);
        }
    }

    fn overlapping(&self, a: SpriteId, b: SpriteId) -> bool {
        match (self.sprites.get(&a), self.sprites.get(&b)) {
            (Some(sa), Some(sb)) => sa.rect.overlaps(&sb.rect),
            _ => false,
        }
    }

    /// Resolve a tag to instance ids, including sprites pending
    /// removal. Cached until membership changes; an undeclared tag
    /// resolves empty and bumps [`SimMetrics::unknown_groups`].
    ///
    /// [`SimMetrics::unknown_groups`]: crate::SimMetrics::unknown_groups
    pub(crate) fn cached_group(&mut self, tag: &str) -> Vec<SpriteId> {
        if let Some(ids) = self.group_cache.get(tag) {
            return ids.clone();
        }
        let known = self
            .def
            .sprite_defs
            .values()
            .any(|d| d.stypes.iter().any(|t| t == tag));
        let ids: Vec<SpriteId> = if known {
            self.groups
                .iter()
                .filter(|(name, _)| self.type_has_tag(name, tag))
                .flat_map(|(_, ids)| ids.iter().copied())
                .collect()
        } else {
            self.metrics.unknown_groups += 1;
            Vec::new()
        };
        self.group_cache.insert(tag.to_string(), ids.clone());
        ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;
    use ludi_core::{BehaviorClass, EffectKind, EntityTypeDef, GameDef, Orientation, Value};
    use smallvec::SmallVec;

    fn leaf(name: &str, class: BehaviorClass) -> EntityTypeDef {
        EntityTypeDef {
            name: name.to_string(),
            class,
            args: IndexMap::new(),
            stypes: SmallVec::from_iter([name.to_string()]),
        }
    }

    fn rule(first: &str, second: CollisionTarget, effect: EffectKind, score: i64) -> CollisionRule {
        CollisionRule {
            first: first.to_string(),
            second,
            effect,
            score_change: score,
            args: IndexMap::new(),
        }
    }

    #[test]
    fn rules_fire_in_declaration_order_without_shadowing() {
        // Both rules match the same pair: the score rule first, then
        // the kill. Both fire on the same tick.
        let mut def = GameDef::default();
        def.char_mapping
            .insert('B', vec!["wall".to_string(), "avatar".to_string()]);
        def.collision_rules = vec![
            rule(
                "avatar",
                CollisionTarget::Group("wall".to_string()),
                EffectKind::StepBack,
                2,
            ),
            rule(
                "avatar",
                CollisionTarget::Group("wall".to_string()),
                EffectKind::KillSprite,
                3,
            ),
        ];
        let mut game = Game::build(def, "Bw\nww").unwrap();
        let r = game.tick(0).unwrap();
        assert_eq!(r.score_delta, 5);
        assert_eq!(game.num_sprites("avatar"), 0);
    }

    #[test]
    fn score_applies_even_when_a_pending_kill_suppresses_the_effect() {
        let mut def = GameDef::default();
        def.char_mapping
            .insert('B', vec!["wall".to_string(), "avatar".to_string()]);
        def.collision_rules = vec![
            rule(
                "avatar",
                CollisionTarget::Group("wall".to_string()),
                EffectKind::KillSprite,
                1,
            ),
            // Fires again on the already-killed avatar: score only.
            rule(
                "avatar",
                CollisionTarget::Group("wall".to_string()),
                EffectKind::KillSprite,
                10,
            ),
        ];
        let mut game = Game::build(def, "Bw\nww").unwrap();
        let r = game.tick(0).unwrap();
        assert_eq!(r.score_delta, 11);
        assert_eq!(game.metrics().sprites_killed, 1);
    }

    #[test]
    fn self_group_rules_fire_both_orderings() {
        let mut def = GameDef::default();
        def.register_sprite(leaf("crate", BehaviorClass::Immovable));
        def.char_mapping
            .insert('2', vec!["crate".to_string(), "crate".to_string()]);
        def.collision_rules = vec![rule(
            "crate",
            CollisionTarget::Group("crate".to_string()),
            EffectKind::KillSprite,
            1,
        )];
        let mut game = Game::build(def, "2w\nww").unwrap();
        let r = game.tick(0).unwrap();
        // Two ordered pairs, each scoring once; both crates die.
        assert_eq!(r.score_delta, 2);
        assert_eq!(game.num_sprites("crate"), 0);
    }

    #[test]
    fn out_of_bounds_fires_per_escaped_sprite() {
        let mut def = GameDef::default();
        let mut shot = leaf("shot", BehaviorClass::Missile);
        shot.args
            .insert("orientation".to_string(), Value::Dir(Orientation::UP));
        def.register_sprite(shot);
        def.char_mapping.insert('s', vec!["shot".to_string()]);
        def.collision_rules = vec![rule(
            "shot",
            CollisionTarget::OutOfBounds,
            EffectKind::KillSprite,
            -1,
        )];
        let mut game = Game::build(def, "ss\nww").unwrap();

        // Both shots leave the top edge on the first tick.
        let r = game.tick(0).unwrap();
        assert_eq!(r.score_delta, -2);
        assert_eq!(game.num_sprites("shot"), 0);
    }

    #[test]
    fn edge_contact_is_not_a_collision() {
        // Avatar and wall in adjacent cells share an edge only.
        let mut def = GameDef::default();
        def.collision_rules = vec![rule(
            "avatar",
            CollisionTarget::Group("wall".to_string()),
            EffectKind::KillSprite,
            1,
        )];
        let mut game = Game::build(def, "Aw\nww").unwrap();
        let r = game.tick(0).unwrap();
        assert_eq!(r.score_delta, 0);
        assert_eq!(game.num_sprites("avatar"), 1);
    }

    #[test]
    fn unknown_groups_resolve_empty_and_are_counted() {
        let mut def = GameDef::default();
        def.collision_rules = vec![rule(
            "phantom",
            CollisionTarget::Group("wall".to_string()),
            EffectKind::KillSprite,
            1,
        )];
        let mut game = Game::build(def, "Aw\nww").unwrap();
        let r = game.tick(0).unwrap();
        assert_eq!(r.score_delta, 0);
        assert_eq!(game.metrics().unknown_groups, 1);
    }

    #[test]
    fn tag_groups_aggregate_their_member_types() {
        let mut def = GameDef::default();
        let mut bomb = leaf("bomb", BehaviorClass::Immovable);
        bomb.stypes = SmallVec::from_iter(["enemy".to_string(), "bomb".to_string()]);
        let mut alien = leaf("alien", BehaviorClass::Immovable);
        alien.stypes = SmallVec::from_iter(["enemy".to_string(), "alien".to_string()]);
        def.register_sprite(bomb);
        def.register_sprite(alien);
        def.char_mapping.insert(
            'X',
            vec!["bomb".to_string(), "alien".to_string(), "avatar".to_string()],
        );
        def.collision_rules = vec![rule(
            "enemy",
            CollisionTarget::Group("avatar".to_string()),
            EffectKind::KillSprite,
            1,
        )];
        let mut game = Game::build(def, "Xw\nww").unwrap();
        let r = game.tick(0).unwrap();
        assert_eq!(r.score_delta, 2);
        assert_eq!(game.num_sprites("enemy"), 0);
        assert_eq!(game.num_sprites("avatar"), 1);
    }
}
