//! Diplomacy and relations

use std::fmt;

use tracing::debug;

use crate::core::config::DiplomacyConfig;
use crate::core::types::NationId;
use crate::world::nation::Nation;
use crate::world::state::GameState;

pub const MIN_RELATION: f64 = 0.0;
pub const MAX_RELATION: f64 = 100.0;

/// Shift `nation`'s relation toward `target`, clamped to [0, 100].
/// A missing entry starts from zero. Returns the new value.
pub fn adjust_relation(nation: &mut Nation, target: &NationId, change: f64) -> f64 {
    let entry = nation.relations.entry(target.clone()).or_insert(MIN_RELATION);
    *entry = (*entry + change).clamp(MIN_RELATION, MAX_RELATION);
    *entry
}

/// Send a paid diplomatic mission from `from` to `target`.
///
/// Declined when either nation is unknown, they are the same nation,
/// or `from` cannot afford the mission.
pub fn improve_relations(state: &mut GameState, from: &NationId, target: &NationId, config: &DiplomacyConfig) -> bool {
    if from == target || state.nation(target).is_none() {
        return false;
    }
    let Some(nation) = state.nation_mut(from) else {
        return false;
    };
    if nation.gdp < config.mission_cost {
        return false;
    }

    nation.gdp -= config.mission_cost;
    let value = adjust_relation(nation, target, config.mission_gain);
    debug!(%from, %target, value, "diplomatic mission");
    true
}

/// Display bucket for a relation value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationStatus {
    Allied,
    Friendly,
    Neutral,
    Tense,
    Hostile,
}

impl RelationStatus {
    pub fn from_value(value: f64) -> Self {
        if value >= 80.0 {
            RelationStatus::Allied
        } else if value >= 60.0 {
            RelationStatus::Friendly
        } else if value >= 40.0 {
            RelationStatus::Neutral
        } else if value >= 20.0 {
            RelationStatus::Tense
        } else {
            RelationStatus::Hostile
        }
    }
}

impl fmt::Display for RelationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RelationStatus::Allied => "Allied",
            RelationStatus::Friendly => "Friendly",
            RelationStatus::Neutral => "Neutral",
            RelationStatus::Tense => "Tense",
            RelationStatus::Hostile => "Hostile",
        };
        f.write_str(label)
    }
}
