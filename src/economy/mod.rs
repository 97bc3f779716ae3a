//! Economic engine
//!
//! Per-nation production, consumption, GDP growth, pollution and
//! population, followed by trade route settlement.

mod industry;
mod production;
mod trade;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::config::EconomyConfig;
use crate::core::types::{NationId, ResourceKind};
use crate::world::nation::{Nation, Resources};
use crate::world::state::GameState;

pub use industry::build_industry;
pub use production::{
    calculate_consumption, calculate_gdp_growth, calculate_pollution_change, calculate_production,
    industry_production,
};
pub use trade::{create_trade_route, settle_trade_routes, TradeSettlement};

/// What changed for one nation during the economic phase
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct NationTick {
    pub production: Resources,
    pub consumption: Resources,
    /// Growth factor applied to GDP
    pub gdp_growth: f64,
    pub pollution_change: f64,
    pub population_change: u64,
}

/// Summary of one economic phase, for display
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EconomyTick {
    pub nations: BTreeMap<NationId, NationTick>,
    pub trades: Vec<TradeSettlement>,
}

/// Run the economic phase of a turn over every nation, then settle trade.
pub fn process_economic_turn(state: &mut GameState, config: &EconomyConfig) -> EconomyTick {
    let mut tick = EconomyTick::default();

    for nation in &mut state.nations {
        let nation_tick = update_nation(nation, config);
        tick.nations.insert(nation.id.clone(), nation_tick);
    }

    tick.trades = settle_trade_routes(state);

    debug!(
        nations = tick.nations.len(),
        trades = tick.trades.len(),
        "economic phase complete"
    );

    tick
}

fn update_nation(nation: &mut Nation, config: &EconomyConfig) -> NationTick {
    // Production
    let production = calculate_production(nation);
    for (resource, amount) in production.iter() {
        nation.resources.add(resource, amount);
    }

    // Consumption, never below zero
    let consumption = calculate_consumption(nation, config);
    for resource in ResourceKind::ALL {
        let stock = nation.resources.get_mut(resource);
        *stock = (*stock - consumption.get(resource)).max(0.0);
    }

    // GDP uses this turn's pollution before it is updated
    let gdp_growth = calculate_gdp_growth(nation, config);
    nation.gdp = (nation.gdp * (1.0 + gdp_growth)).floor();

    let pollution_change = calculate_pollution_change(nation, config);
    nation.pollution = (nation.pollution + pollution_change).max(0.0);

    let population_change = (nation.population as f64 * config.population_growth).floor() as u64;
    nation.population += population_change;

    NationTick {
        production,
        consumption,
        gdp_growth,
        pollution_change,
        population_change,
    }
}
