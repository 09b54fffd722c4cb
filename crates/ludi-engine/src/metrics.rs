//! Per-episode counters for non-fatal anomalies.

/// Cumulative counters collected over one episode.
///
/// The engine never fails on runtime anomalies: over-limit resource
/// transfers clamp, spawns beyond the sprite ceiling drop, unknown
/// collision groups resolve empty. Each such event increments a counter
/// here so hosts and tests can see what the simulation swallowed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SimMetrics {
    /// Sprites created, by the level builder or by spawn effects.
    pub sprites_spawned: u64,
    /// Sprites marked for removal.
    pub sprites_killed: u64,
    /// Spawns dropped because the sprite ceiling was reached.
    pub spawn_cap_drops: u64,
    /// Spawns suppressed by the singleton rule.
    pub singleton_suppressed: u64,
    /// Spawns referencing a type name with no definition.
    pub unknown_types: u64,
    /// Collision-group lookups that matched no declared tag.
    pub unknown_groups: u64,
    /// Resource transfers clamped at a counter's limit or at zero.
    pub resource_clamps: u64,
    /// Keyword arguments no behavior recognizes, dropped at spawn time.
    pub unknown_attributes: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_metrics_are_zero() {
        let m = SimMetrics::default();
        assert_eq!(m, SimMetrics::default());
        assert_eq!(m.sprites_spawned, 0);
        assert_eq!(m.spawn_cap_drops, 0);
        assert_eq!(m.unknown_groups, 0);
    }
}
