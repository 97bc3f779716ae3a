//! Trade route creation and per-turn settlement

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::types::{NationId, ResourceKind};
use crate::world::state::GameState;
use crate::world::trade::{resource_price, TradeRoute};

/// Outcome of one route for one turn
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TradeSettlement {
    pub from: NationId,
    pub to: NationId,
    pub resource: ResourceKind,
    pub requested: f64,
    pub transferred: f64,
    pub revenue: f64,
}

/// Open a trade route from `from` to `to` at the fixed resource price.
///
/// Declined (false) when either nation is unknown or the exporter does
/// not currently hold `amount` of the resource.
pub fn create_trade_route(
    state: &mut GameState,
    from: &NationId,
    to: &NationId,
    resource: ResourceKind,
    amount: f64,
) -> bool {
    let (Some(exporter), Some(_)) = (state.nation(from), state.nation(to)) else {
        return false;
    };

    if exporter.resources.get(resource) < amount {
        return false;
    }

    let price_per_unit = resource_price(resource);
    state.trade_routes.push(TradeRoute {
        from: from.clone(),
        to: to.clone(),
        resource,
        amount,
        price_per_unit,
    });

    debug!(%from, %to, %resource, amount, "trade route opened");
    true
}

/// Move goods along every route, in list order.
///
/// Each route ships `min(available, amount)`; a short exporter is a
/// partial fulfilment, not an error. The exporter earns and the importer
/// pays `transferred × price`. Routes naming a missing nation are skipped.
pub fn settle_trade_routes(state: &mut GameState) -> Vec<TradeSettlement> {
    let mut settlements = Vec::with_capacity(state.trade_routes.len());

    for route in &state.trade_routes {
        let (Some(from_idx), Some(to_idx)) = (state.nation_index(&route.from), state.nation_index(&route.to)) else {
            continue;
        };

        let transferred = state.nations[from_idx].resources.remove(route.resource, route.amount);
        state.nations[to_idx].resources.add(route.resource, transferred);

        let revenue = transferred * route.price_per_unit;
        state.nations[from_idx].gdp += revenue;
        state.nations[to_idx].gdp -= revenue;

        settlements.push(TradeSettlement {
            from: route.from.clone(),
            to: route.to.clone(),
            resource: route.resource,
            requested: route.amount,
            transferred,
            revenue,
        });
    }

    settlements
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::nation::{Nation, Resources};

    fn trading_state() -> GameState {
        let mut exporter = Nation::new("nordland", "Nordland");
        exporter.gdp = 1_000.0;
        exporter.resources = Resources::new(300.0, 0.0, 0.0, 0.0, 0.0);
        let mut importer = Nation::new("solaria", "Solaria");
        importer.gdp = 10_000.0;
        importer.resources = Resources::new(50.0, 0.0, 0.0, 0.0, 0.0);
        GameState::new(vec![exporter, importer], NationId::new("nordland"), 2025)
    }

    #[test]
    fn test_create_route_uses_price_table() {
        let mut state = trading_state();
        assert!(create_trade_route(
            &mut state,
            &NationId::new("nordland"),
            &NationId::new("solaria"),
            ResourceKind::Iron,
            200.0
        ));
        assert_eq!(state.trade_routes.len(), 1);
        assert_eq!(state.trade_routes[0].price_per_unit, 12.0);
    }

    #[test]
    fn test_create_route_declined_without_stock() {
        let mut state = trading_state();
        assert!(!create_trade_route(
            &mut state,
            &NationId::new("nordland"),
            &NationId::new("solaria"),
            ResourceKind::Iron,
            500.0
        ));
        assert!(state.trade_routes.is_empty());
    }

    #[test]
    fn test_create_route_declined_for_unknown_partner() {
        let mut state = trading_state();
        assert!(!create_trade_route(
            &mut state,
            &NationId::new("nordland"),
            &NationId::new("atlantis"),
            ResourceKind::Iron,
            10.0
        ));
    }

    #[test]
    fn test_partial_fulfilment() {
        let mut state = trading_state();
        state.trade_routes.push(TradeRoute {
            from: NationId::new("nordland"),
            to: NationId::new("solaria"),
            resource: ResourceKind::Iron,
            amount: 500.0,
            price_per_unit: 12.0,
        });

        let settlements = settle_trade_routes(&mut state);

        assert_eq!(settlements[0].transferred, 300.0);
        assert_eq!(state.nations[0].resources.iron, 0.0);
        assert_eq!(state.nations[1].resources.iron, 350.0);
        assert_eq!(state.nations[0].gdp, 1_000.0 + 3_600.0);
        assert_eq!(state.nations[1].gdp, 10_000.0 - 3_600.0);
    }

    #[test]
    fn test_routes_sharing_an_exporter_accumulate() {
        let mut state = trading_state();
        for _ in 0..2 {
            state.trade_routes.push(TradeRoute {
                from: NationId::new("nordland"),
                to: NationId::new("solaria"),
                resource: ResourceKind::Iron,
                amount: 200.0,
                price_per_unit: 12.0,
            });
        }

        let settlements = settle_trade_routes(&mut state);

        assert_eq!(settlements[0].transferred, 200.0);
        assert_eq!(settlements[1].transferred, 100.0);
        assert_eq!(state.nations[0].resources.iron, 0.0);
    }

    #[test]
    fn test_route_to_missing_nation_skipped() {
        let mut state = trading_state();
        state.trade_routes.push(TradeRoute {
            from: NationId::new("nordland"),
            to: NationId::new("atlantis"),
            resource: ResourceKind::Iron,
            amount: 100.0,
            price_per_unit: 12.0,
        });

        assert!(settle_trade_routes(&mut state).is_empty());
        assert_eq!(state.nations[0].resources.iron, 300.0);
    }
}
