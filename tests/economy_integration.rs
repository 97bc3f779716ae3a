//! Integration tests for the economic engine
//!
//! These tests drive the public economy API the way a turn does:
//! - Building and upgrading industries
//! - Trade settlement when the exporter runs short
//! - Resource and growth bounds over arbitrary nations

use geosynthesis::core::config::EconomyConfig;
use geosynthesis::core::types::{NationId, ResourceKind};
use geosynthesis::economy::{build_industry, calculate_gdp_growth, create_trade_route, process_economic_turn};
use geosynthesis::world::{GameState, Industry, IndustryType, Nation, Resources};
use proptest::prelude::*;

fn nation(id: &str) -> Nation {
    Nation::new(id, id.to_uppercase())
}

// ============================================================================
// Build scenarios
// ============================================================================

#[test]
fn test_build_new_mining_industry() {
    let mut n = nation("aqualis");
    n.gdp = 100_000.0;

    assert!(build_industry(&mut n, &IndustryType::Mining, 60_000.0, &EconomyConfig::default()));

    assert_eq!(n.gdp, 40_000.0);
    assert_eq!(
        n.industries,
        vec![Industry {
            industry_type: IndustryType::Mining,
            level: 1,
            output: 500.0
        }]
    );
}

#[test]
fn test_rebuild_existing_industry_upgrades() {
    let mut n = nation("aqualis");
    n.gdp = 100_000.0;
    n.industries.push(Industry {
        industry_type: IndustryType::Mining,
        level: 2,
        output: 1000.0,
    });

    assert!(build_industry(&mut n, &IndustryType::Mining, 60_000.0, &EconomyConfig::default()));

    assert_eq!(n.industries.len(), 1);
    assert_eq!(n.industries[0].level, 3);
    assert_eq!(n.industries[0].output, 1300.0);
}

#[test]
fn test_unaffordable_build_changes_nothing() {
    let mut n = nation("aqualis");
    n.gdp = 59_999.0;

    assert!(!build_industry(&mut n, &IndustryType::Tech, 60_000.0, &EconomyConfig::default()));

    assert_eq!(n.gdp, 59_999.0);
    assert!(n.industries.is_empty());
}

// ============================================================================
// Trade settlement
// ============================================================================

/// A 500-unit iron route from an exporter that only holds 300 ships 300.
///
/// Both nations are idle (no population, no industry, no pollution), so the
/// only GDP change besides trade is the flat base growth.
#[test]
fn test_partial_trade_ships_what_is_available() {
    let mut exporter = nation("ferrum");
    exporter.resources.iron = 500.0;
    let mut importer = nation("pacifica");
    importer.gdp = 100_000.0;

    let mut state = GameState::new(vec![exporter, importer], NationId::new("ferrum"), 2025);
    let from = NationId::new("ferrum");
    let to = NationId::new("pacifica");

    assert!(create_trade_route(&mut state, &from, &to, ResourceKind::Iron, 500.0));
    assert_eq!(state.trade_routes[0].price_per_unit, 12.0);

    // stock drops after the route was agreed
    state.nation_mut(&from).unwrap().resources.iron = 300.0;

    let tick = process_economic_turn(&mut state, &EconomyConfig::default());

    assert_eq!(tick.trades.len(), 1);
    assert_eq!(tick.trades[0].requested, 500.0);
    assert_eq!(tick.trades[0].transferred, 300.0);
    assert_eq!(tick.trades[0].revenue, 3_600.0);

    let exporter = state.nation(&from).unwrap();
    let importer = state.nation(&to).unwrap();
    assert_eq!(exporter.resources.iron, 0.0);
    assert_eq!(importer.resources.iron, 300.0);
    assert_eq!(exporter.gdp, 3_600.0);
    assert_eq!(importer.gdp, 102_000.0 - 3_600.0);
}

#[test]
fn test_trade_declined_without_stock() {
    let mut exporter = nation("ferrum");
    exporter.resources.oil = 100.0;
    let mut state = GameState::new(vec![exporter, nation("pacifica")], NationId::new("ferrum"), 2025);

    assert!(!create_trade_route(
        &mut state,
        &NationId::new("ferrum"),
        &NationId::new("pacifica"),
        ResourceKind::Oil,
        500.0
    ));
    assert!(state.trade_routes.is_empty());
}

// ============================================================================
// Bounds
// ============================================================================

fn arb_nation(id: &'static str) -> impl Strategy<Value = Nation> {
    (
        0.0f64..5_000_000.0,
        0u64..500_000_000,
        0.0f64..20.0,
        0.0f64..5_000.0,
        0.0f64..100.0,
        prop::array::uniform5(0.0f64..20_000.0),
        prop::collection::vec((0usize..8, 1u32..10, 0.0f64..5_000.0), 0..6),
    )
        .prop_map(move |(gdp, population, tech, pollution, stability, stock, industries)| {
            let mut n = Nation::new(id, id);
            n.gdp = gdp;
            n.population = population;
            n.tech_level = tech;
            n.pollution = pollution;
            n.stability = stability;
            n.resources = Resources::new(stock[0], stock[1], stock[2], stock[3], stock[4]);
            n.industries = industries
                .into_iter()
                .map(|(kind, level, output)| Industry {
                    industry_type: IndustryType::KNOWN[kind].clone(),
                    level,
                    output,
                })
                .collect();
            n
        })
}

proptest! {
    #[test]
    fn resources_never_negative_after_economic_turn(
        a in arb_nation("ferrum"),
        b in arb_nation("pacifica"),
        amount in 0.0f64..30_000.0,
    ) {
        let mut state = GameState::new(vec![a, b], NationId::new("ferrum"), 2025);
        // route may exceed stock; settlement must cap it
        state.trade_routes.push(geosynthesis::world::TradeRoute {
            from: NationId::new("ferrum"),
            to: NationId::new("pacifica"),
            resource: ResourceKind::Food,
            amount,
            price_per_unit: 3.0,
        });

        process_economic_turn(&mut state, &EconomyConfig::default());

        for n in &state.nations {
            for (_, value) in n.resources.iter() {
                prop_assert!(value >= 0.0);
            }
            prop_assert!(n.pollution >= 0.0);
        }
    }

    #[test]
    fn gdp_growth_always_clamped(n in arb_nation("ferrum")) {
        let config = EconomyConfig::default();
        let growth = calculate_gdp_growth(&n, &config);
        prop_assert!((config.min_growth..=config.max_growth).contains(&growth));
    }
}
