//! Need analysis for AI nations

use crate::core::config::{AiConfig, EconomyConfig};
use crate::core::types::ResourceKind;
use crate::world::nation::Nation;

/// What a nation is short of, and what it could export
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NeedAnalysis {
    pub needs_power: bool,
    pub needs_food: bool,
    /// Resource with the largest surplus over its threshold, among those
    /// held at more than twice their threshold
    pub excess_resource: Option<ResourceKind>,
    pub max_excess: f64,
    pub can_trade: bool,
}

/// Stock per population factor that counts as "enough" of a resource
fn surplus_threshold(resource: ResourceKind) -> f64 {
    match resource {
        ResourceKind::Food => 1000.0,
        ResourceKind::Power => 600.0,
        ResourceKind::Oil => 400.0,
        ResourceKind::Iron => 300.0,
        ResourceKind::RareEarth => 100.0,
    }
}

pub fn analyze_needs(nation: &Nation, ai: &AiConfig, economy: &EconomyConfig) -> NeedAnalysis {
    let pop_factor = nation.population_factor(economy.population_scale);

    let needs_power = nation.resources.power < pop_factor * ai.power_need;
    let needs_food = nation.resources.food < pop_factor * ai.food_need;

    let mut excess_resource = None;
    let mut max_excess = 0.0;

    // Ties keep the earlier resource in save-file order
    for (resource, amount) in nation.resources.iter() {
        let threshold = surplus_threshold(resource) * pop_factor;
        if amount > threshold * 2.0 {
            let excess = amount - threshold;
            if excess > max_excess {
                max_excess = excess;
                excess_resource = Some(resource);
            }
        }
    }

    NeedAnalysis {
        needs_power,
        needs_food,
        excess_resource,
        max_excess,
        can_trade: excess_resource.is_some() && max_excess > ai.min_trade_surplus,
    }
}
