//! Random global events
//!
//! Events are logged to the world feed with descriptive effects. Nothing
//! in the engine reads those effects back; they are for display only.

use std::collections::BTreeMap;

use serde_json::json;
use tracing::info;
use uuid::Uuid;

use crate::core::config::EventConfig;
use crate::core::random::RandomSource;
use crate::core::types::Turn;
use crate::world::event::{EventKind, GlobalEvent};
use crate::world::state::GameState;

/// A catalog entry, stamped into a `GlobalEvent` when it fires
struct EventTemplate {
    kind: EventKind,
    title: &'static str,
    description: &'static str,
    effects: &'static [(&'static str, f64)],
}

static CATALOG: [EventTemplate; 4] = [
    EventTemplate {
        kind: EventKind::Crisis,
        title: "Oil Crisis",
        description: "World oil prices jump 40% after a supply disruption.",
        effects: &[("oil_price_multiplier", 1.4)],
    },
    EventTemplate {
        kind: EventKind::Opportunity,
        title: "Technological Breakthrough",
        description: "A new battery technology gives renewable energy a boost.",
        effects: &[("renewable_boost", 1.2)],
    },
    EventTemplate {
        kind: EventKind::Info,
        title: "Climate Summit",
        description: "Nations pledge to cut their emissions by 15%.",
        effects: &[],
    },
    EventTemplate {
        kind: EventKind::Crisis,
        title: "Crop Failure",
        description: "Drought hits several regions and food prices climb.",
        effects: &[("food_production_penalty", 0.85)],
    },
];

impl EventTemplate {
    fn instantiate(&self, turn: Turn) -> GlobalEvent {
        let effects: BTreeMap<String, serde_json::Value> = self
            .effects
            .iter()
            .map(|(name, value)| (name.to_string(), json!(value)))
            .collect();

        GlobalEvent {
            id: format!("evt_{}_{}", turn, Uuid::new_v4().simple()),
            turn,
            kind: self.kind,
            title: self.title.to_string(),
            description: self.description.to_string(),
            effects,
        }
    }
}

/// Maybe append one catalog event to the feed, stamped with the current turn.
///
/// Fires when the roll is above the trigger threshold; the entry is then
/// picked uniformly with a second draw.
pub fn generate_random_event<'a, R: RandomSource + ?Sized>(
    state: &'a mut GameState,
    config: &EventConfig,
    rng: &mut R,
) -> Option<&'a GlobalEvent> {
    let roll = rng.next_f64();
    if roll <= config.trigger_threshold {
        return None;
    }

    let template = &CATALOG[rng.pick_index(CATALOG.len())?];
    let event = template.instantiate(state.turn);
    info!(turn = state.turn, kind = event.kind.as_str(), title = %event.title, "global event");

    state.global_events.push(event);
    state.global_events.last()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::random::ScriptedRandom;
    use crate::core::types::NationId;
    use std::collections::HashSet;

    fn empty_state() -> GameState {
        GameState::new(Vec::new(), NationId::new("nordland"), 2025)
    }

    #[test]
    fn test_low_roll_no_event() {
        let mut state = empty_state();
        let fired = generate_random_event(&mut state, &EventConfig::default(), &mut ScriptedRandom::constant(0.7));
        assert!(fired.is_none());
        assert!(state.global_events.is_empty());
    }

    #[test]
    fn test_high_roll_picks_catalog_entry() {
        let mut state = empty_state();
        state.turn = 9;
        let mut rng = ScriptedRandom::new(vec![0.95, 0.76]);

        let event = generate_random_event(&mut state, &EventConfig::default(), &mut rng).cloned().unwrap();

        assert_eq!(event.title, "Crop Failure");
        assert_eq!(event.kind, EventKind::Crisis);
        assert_eq!(event.turn, 9);
        assert!(event.id.starts_with("evt_9_"));
        assert_eq!(event.effects["food_production_penalty"], 0.85);
    }

    #[test]
    fn test_thousand_forced_events_are_unique() {
        let mut state = empty_state();
        state.turn = 4;
        let mut rng = ScriptedRandom::new(vec![0.99, 0.3, 0.8, 0.6]);

        for _ in 0..1000 {
            assert!(generate_random_event(&mut state, &EventConfig::default(), &mut rng).is_some());
        }

        assert_eq!(state.global_events.len(), 1000);
        assert!(state.global_events.iter().all(|e| e.turn == 4));
        let ids: HashSet<&str> = state.global_events.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids.len(), 1000);
    }

    #[test]
    fn test_effects_do_not_touch_nations() {
        let mut state = empty_state();
        let before = state.nations.clone();
        let mut rng = ScriptedRandom::new(vec![0.99, 0.0]);
        generate_random_event(&mut state, &EventConfig::default(), &mut rng);
        assert_eq!(state.nations, before);
        assert_eq!(state.global_events[0].title, "Oil Crisis");
    }
}
