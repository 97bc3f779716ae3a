//! Per-nation production, consumption, growth and pollution formulas

use crate::core::config::EconomyConfig;
use crate::core::types::ResourceKind;
use crate::world::nation::{Industry, IndustryType, Nation, Resources};

/// Resource yield per unit of `output × level` for each industry type.
/// Types not listed here produce nothing.
fn production_coefficients(industry_type: &IndustryType) -> &'static [(ResourceKind, f64)] {
    match industry_type {
        IndustryType::Mining => &[(ResourceKind::Iron, 0.6), (ResourceKind::RareEarth, 0.1)],
        IndustryType::Energy => &[(ResourceKind::Power, 1.0), (ResourceKind::Oil, 0.3)],
        IndustryType::RenewableEnergy => &[(ResourceKind::Power, 0.8)],
        IndustryType::Agriculture => &[(ResourceKind::Food, 1.2)],
        IndustryType::Manufacturing => &[(ResourceKind::Iron, 0.2)],
        _ => &[],
    }
}

/// Pollution per unit of output; renewables clean up
fn pollution_factor(industry_type: &IndustryType) -> f64 {
    match industry_type {
        IndustryType::Mining => 0.05,
        IndustryType::Energy => 0.08,
        IndustryType::Manufacturing => 0.06,
        IndustryType::RenewableEnergy => -0.02,
        _ => 0.0,
    }
}

/// Consumption per population factor (per 10M people)
fn consumption_rate(resource: ResourceKind) -> f64 {
    match resource {
        ResourceKind::Food => 100.0,
        ResourceKind::Power => 80.0,
        ResourceKind::Oil => 30.0,
        ResourceKind::Iron => 20.0,
        ResourceKind::RareEarth => 5.0,
    }
}

/// Resources produced by one industry this turn
pub fn industry_production(industry: &Industry) -> Resources {
    let base_output = industry.output * industry.level as f64;
    let mut produced = Resources::default();
    for &(resource, coefficient) in production_coefficients(&industry.industry_type) {
        produced.add(resource, base_output * coefficient);
    }
    produced
}

/// Total production across a nation's industries
pub fn calculate_production(nation: &Nation) -> Resources {
    let mut total = Resources::default();
    for industry in &nation.industries {
        for (resource, amount) in industry_production(industry).iter() {
            total.add(resource, amount);
        }
    }
    total
}

/// Population-driven upkeep, rounded down per resource
pub fn calculate_consumption(nation: &Nation, config: &EconomyConfig) -> Resources {
    let pop_factor = nation.population_factor(config.population_scale);
    let mut consumption = Resources::default();
    for resource in ResourceKind::ALL {
        *consumption.get_mut(resource) = (pop_factor * consumption_rate(resource)).floor();
    }
    consumption
}

/// GDP growth factor for this turn, clamped to `[min_growth, max_growth]`
pub fn calculate_gdp_growth(nation: &Nation, config: &EconomyConfig) -> f64 {
    let mut growth = config.base_growth;

    growth += nation.tech_level * config.tech_growth;
    growth -= nation.pollution / config.pollution_drag;
    growth += (nation.stability - config.stability_pivot) / config.stability_divisor;

    growth += nation
        .industries
        .iter()
        .map(|i| i.level as f64 * config.industry_level_growth)
        .sum::<f64>();

    growth.clamp(config.min_growth, config.max_growth)
}

/// Whole-unit pollution change for this turn (may be negative)
pub fn calculate_pollution_change(nation: &Nation, config: &EconomyConfig) -> f64 {
    let industrial: f64 = nation
        .industries
        .iter()
        .map(|i| i.output * pollution_factor(&i.industry_type))
        .sum();

    (industrial - nation.tech_level * config.tech_pollution_reduction).floor()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn industry(kind: IndustryType, level: u32, output: f64) -> Industry {
        Industry {
            industry_type: kind,
            level,
            output,
        }
    }

    #[test]
    fn test_mining_production() {
        let produced = industry_production(&industry(IndustryType::Mining, 2, 1000.0));
        assert!((produced.iron - 1200.0).abs() < 1e-9);
        assert!((produced.rare_earth - 200.0).abs() < 1e-9);
        assert_eq!(produced.food, 0.0);
    }

    #[test]
    fn test_unknown_industry_produces_nothing() {
        let produced = industry_production(&industry(IndustryType::Tourism, 3, 1000.0));
        assert_eq!(produced, Resources::default());
        let produced = industry_production(&industry(IndustryType::Other("casino".into()), 1, 1000.0));
        assert_eq!(produced, Resources::default());
    }

    #[test]
    fn test_production_sums_industries() {
        let mut nation = Nation::new("aqualis", "Aqualis");
        nation.industries = vec![
            industry(IndustryType::Energy, 1, 1000.0),
            industry(IndustryType::RenewableEnergy, 1, 500.0),
            industry(IndustryType::Agriculture, 1, 500.0),
        ];
        let produced = calculate_production(&nation);
        assert!((produced.power - 1400.0).abs() < 1e-9);
        assert!((produced.oil - 300.0).abs() < 1e-9);
        assert!((produced.food - 600.0).abs() < 1e-9);
    }

    #[test]
    fn test_consumption_scales_with_population() {
        let mut nation = Nation::new("aqualis", "Aqualis");
        nation.population = 25_000_000;
        let used = calculate_consumption(&nation, &EconomyConfig::default());
        assert_eq!(used.food, 250.0);
        assert_eq!(used.power, 200.0);
        assert_eq!(used.oil, 75.0);
        assert_eq!(used.iron, 50.0);
        assert_eq!(used.rare_earth, 12.0);
    }

    #[test]
    fn test_growth_formula() {
        let mut nation = Nation::new("aqualis", "Aqualis");
        nation.tech_level = 2.0;
        nation.pollution = 100.0;
        nation.stability = 60.0;
        nation.industries = vec![industry(IndustryType::Mining, 2, 500.0)];
        // 0.02 + 0.01 - 0.01 + 0.002 + 0.006
        let growth = calculate_gdp_growth(&nation, &EconomyConfig::default());
        assert!((growth - 0.028).abs() < 1e-12);
    }

    #[test]
    fn test_growth_clamped() {
        let config = EconomyConfig::default();
        let mut nation = Nation::new("aqualis", "Aqualis");
        nation.tech_level = 100.0;
        assert_eq!(calculate_gdp_growth(&nation, &config), 0.15);

        nation.tech_level = 0.0;
        nation.pollution = 100_000.0;
        assert_eq!(calculate_gdp_growth(&nation, &config), -0.05);
    }

    #[test]
    fn test_pollution_change() {
        let mut nation = Nation::new("aqualis", "Aqualis");
        nation.tech_level = 3.0;
        nation.industries = vec![
            industry(IndustryType::Energy, 1, 1000.0),
            industry(IndustryType::RenewableEnergy, 1, 500.0),
        ];
        // 80 - 10 - 6
        assert_eq!(calculate_pollution_change(&nation, &EconomyConfig::default()), 64.0);
    }
}
