//! AI decision engine for non-player nations
//!
//! Each AI nation analyses its needs, rolls once, walks the decision
//! cascade and executes at most one action per turn.

mod decision;
mod needs;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::core::config::SimulationConfig;
use crate::core::random::RandomSource;
use crate::core::types::NationId;
use crate::diplomacy::adjust_relation;
use crate::economy::{build_industry, create_trade_route};
use crate::world::state::GameState;

pub use decision::{decide_action, AiDecision};
pub use needs::{analyze_needs, NeedAnalysis};

/// An action an AI nation carried out
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AiAction {
    pub nation: NationId,
    #[serde(flatten)]
    pub decision: AiDecision,
}

/// Run one decision for every AI nation, in nation order.
///
/// Returns the actions that took effect; a build the nation cannot
/// afford or a trade it cannot supply is dropped silently.
pub fn process_ai_turns<R: RandomSource + ?Sized>(
    state: &mut GameState,
    config: &SimulationConfig,
    rng: &mut R,
) -> Vec<AiAction> {
    let mut actions = Vec::new();

    for idx in 0..state.nations.len() {
        if state.nations[idx].is_player {
            continue;
        }

        let decision = decide_action(&state.nations[idx], &state.nations, config, rng);
        if decision == AiDecision::Idle {
            continue;
        }

        let nation = state.nations[idx].id.clone();
        if execute_decision(state, idx, &decision, config) {
            debug!(%nation, ?decision, "ai action");
            actions.push(AiAction { nation, decision });
        }
    }

    info!(actions = actions.len(), "ai phase complete");
    actions
}

fn execute_decision(state: &mut GameState, idx: usize, decision: &AiDecision, config: &SimulationConfig) -> bool {
    match decision {
        AiDecision::Build { industry_type, cost } => {
            build_industry(&mut state.nations[idx], industry_type, *cost, &config.economy)
        }
        AiDecision::Trade {
            partner,
            resource,
            amount,
        } => {
            let from = state.nations[idx].id.clone();
            create_trade_route(state, &from, partner, *resource, *amount)
        }
        AiDecision::Diplomacy { target, change } => {
            adjust_relation(&mut state.nations[idx], target, *change);
            true
        }
        AiDecision::Idle => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::random::ScriptedRandom;
    use crate::world::nation::{IndustryType, Nation, Resources};

    fn needy(id: &str, gdp: f64) -> Nation {
        let mut nation = Nation::new(id, id);
        nation.gdp = gdp;
        nation.population = 10_000_000;
        nation.resources = Resources::new(0.0, 0.0, 0.0, 1_000.0, 0.0);
        nation
    }

    #[test]
    fn test_player_is_skipped() {
        let mut player = needy("player", 100_000.0);
        player.is_player = true;
        let mut state = GameState::new(vec![player], NationId::new("player"), 2025);

        let actions = process_ai_turns(&mut state, &SimulationConfig::default(), &mut ScriptedRandom::constant(0.0));

        assert!(actions.is_empty());
        assert!(state.nations[0].industries.is_empty());
    }

    #[test]
    fn test_build_executes_and_reports() {
        let mut state = GameState::new(vec![needy("a", 60_000.0)], NationId::new("player"), 2025);

        let actions = process_ai_turns(&mut state, &SimulationConfig::default(), &mut ScriptedRandom::constant(0.0));

        assert_eq!(actions.len(), 1);
        assert_eq!(state.nations[0].gdp, 10_000.0);
        assert_eq!(state.nations[0].industries[0].industry_type, IndustryType::RenewableEnergy);
    }

    #[test]
    fn test_unaffordable_build_not_reported() {
        let mut state = GameState::new(vec![needy("a", 1_000.0)], NationId::new("player"), 2025);

        let actions = process_ai_turns(&mut state, &SimulationConfig::default(), &mut ScriptedRandom::constant(0.0));

        assert!(actions.is_empty());
        assert_eq!(state.nations[0].gdp, 1_000.0);
    }

    #[test]
    fn test_trade_creates_route() {
        let mut exporter = needy("a", 0.0);
        exporter.resources = Resources::new(5_000.0, 0.0, 0.0, 1_000.0, 600.0);
        exporter.relations.insert(NationId::new("b"), 60.0);
        let mut importer = needy("b", 0.0);
        importer.is_player = true;
        let mut state = GameState::new(vec![exporter, importer], NationId::new("b"), 2025);

        let actions = process_ai_turns(&mut state, &SimulationConfig::default(), &mut ScriptedRandom::constant(0.2));

        assert_eq!(actions.len(), 1);
        assert_eq!(state.trade_routes.len(), 1);
        assert_eq!(state.trade_routes[0].to, NationId::new("b"));
        assert_eq!(state.trade_routes[0].amount, 500.0);
    }

    #[test]
    fn test_diplomacy_updates_relation() {
        let mut nation = needy("a", 0.0);
        nation.resources = Resources::new(0.0, 0.0, 0.0, 1_000.0, 600.0);
        nation.relations.insert(NationId::new("b"), 78.0);
        let mut state = GameState::new(vec![nation], NationId::new("player"), 2025);

        let actions = process_ai_turns(&mut state, &SimulationConfig::default(), &mut ScriptedRandom::constant(0.1));

        assert_eq!(actions.len(), 1);
        assert_eq!(state.nations[0].relations[&NationId::new("b")], 83.0);
    }

    #[test]
    fn test_action_serializes_flat() {
        let action = AiAction {
            nation: NationId::new("a"),
            decision: AiDecision::Diplomacy {
                target: NationId::new("b"),
                change: 5.0,
            },
        };
        let json = serde_json::to_value(&action).unwrap();
        assert_eq!(json["nation"], "a");
        assert_eq!(json["action"], "diplomacy");
        assert_eq!(json["target"], "b");
    }
}
