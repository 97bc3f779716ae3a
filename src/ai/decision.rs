//! The AI decision cascade
//!
//! One roll per nation is tested against each branch in order and the
//! first branch that matches wins. Branch chances are not independent
//! probabilities: a roll of 0.1 for a nation that needs power always
//! builds renewables, whatever else it could have done.

use serde::{Deserialize, Serialize};

use crate::ai::needs::analyze_needs;
use crate::core::config::{AiConfig, SimulationConfig};
use crate::core::random::RandomSource;
use crate::core::types::{NationId, ResourceKind};
use crate::world::nation::{IndustryType, Nation};

/// Industries an AI considers when expanding
static EXPANSION_OPTIONS: [IndustryType; 5] = [
    IndustryType::Manufacturing,
    IndustryType::Mining,
    IndustryType::RenewableEnergy,
    IndustryType::Agriculture,
    IndustryType::Tech,
];

/// What an AI nation chose to do this turn
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum AiDecision {
    Build {
        industry_type: IndustryType,
        cost: f64,
    },
    Trade {
        partner: NationId,
        resource: ResourceKind,
        amount: f64,
    },
    Diplomacy {
        target: NationId,
        change: f64,
    },
    #[serde(rename = "none")]
    Idle,
}

/// Pick this turn's action for an AI nation
pub fn decide_action<R: RandomSource + ?Sized>(
    nation: &Nation,
    nations: &[Nation],
    config: &SimulationConfig,
    rng: &mut R,
) -> AiDecision {
    let ai = &config.ai;
    let needs = analyze_needs(nation, ai, &config.economy);

    let roll = rng.next_f64();

    if needs.needs_power && roll < ai.power_chance {
        return AiDecision::Build {
            industry_type: IndustryType::RenewableEnergy,
            cost: ai.renewable_cost,
        };
    }

    if needs.needs_food && roll < ai.food_chance {
        return AiDecision::Build {
            industry_type: IndustryType::Agriculture,
            cost: ai.agriculture_cost,
        };
    }

    if needs.can_trade && roll < ai.trade_chance {
        // No acceptable partner falls through to the later branches
        if let (Some(partner), Some(resource)) = (find_trade_partner(nation, nations, ai, rng), needs.excess_resource) {
            return AiDecision::Trade {
                partner: partner.id.clone(),
                resource,
                amount: ai.trade_amount,
            };
        }
    }

    if nation.gdp > ai.expansion_gdp && roll < ai.expansion_chance {
        return AiDecision::Build {
            industry_type: choose_industry_to_build(nation, ai, rng),
            cost: ai.expansion_cost,
        };
    }

    if roll < ai.diplomacy_chance {
        if let Some(target) = pick_diplomacy_target(nation, ai, rng) {
            return AiDecision::Diplomacy {
                target,
                change: ai.diplomacy_step,
            };
        }
    }

    AiDecision::Idle
}

/// Random nation this one regards above the trade threshold
fn find_trade_partner<'a, R: RandomSource + ?Sized>(
    nation: &Nation,
    nations: &'a [Nation],
    ai: &AiConfig,
    rng: &mut R,
) -> Option<&'a Nation> {
    let candidates: Vec<&Nation> = nations
        .iter()
        .filter(|other| other.id != nation.id)
        .filter(|other| {
            nation
                .relation(&other.id)
                .is_some_and(|value| value > ai.trade_partner_min_relation)
        })
        .collect();

    rng.pick_index(candidates.len()).map(|i| candidates[i])
}

/// Random industry not yet at the level cap, or any if all are capped
fn choose_industry_to_build<R: RandomSource + ?Sized>(nation: &Nation, ai: &AiConfig, rng: &mut R) -> IndustryType {
    let available: Vec<&IndustryType> = EXPANSION_OPTIONS
        .iter()
        .filter(|option| {
            nation
                .industry(option)
                .map_or(true, |existing| existing.level < ai.max_industry_level)
        })
        .collect();

    if let Some(i) = rng.pick_index(available.len()) {
        return available[i].clone();
    }

    let i = rng.pick_index(EXPANSION_OPTIONS.len()).unwrap_or(0);
    EXPANSION_OPTIONS[i].clone()
}

/// Uniformly random relation entry, only if it is still below the ceiling
fn pick_diplomacy_target<R: RandomSource + ?Sized>(nation: &Nation, ai: &AiConfig, rng: &mut R) -> Option<NationId> {
    let i = rng.pick_index(nation.relations.len())?;
    let (target, value) = nation.relations.iter().nth(i)?;
    (*value < ai.diplomacy_ceiling).then(|| target.clone())
}
