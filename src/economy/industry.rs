//! Industry construction

use tracing::debug;

use crate::core::config::EconomyConfig;
use crate::world::nation::{Industry, IndustryType, Nation};

/// Build (or upgrade) an industry, paying `cost` out of GDP.
///
/// Returns false and leaves the nation untouched when GDP is short.
/// Rebuilding an existing type raises its level by one and multiplies
/// its output by the upgrade multiplier.
pub fn build_industry(nation: &mut Nation, industry_type: &IndustryType, cost: f64, config: &EconomyConfig) -> bool {
    if nation.gdp < cost {
        return false;
    }

    if let Some(existing) = nation.industry_mut(industry_type) {
        existing.level += 1;
        existing.output = (existing.output * config.upgrade_multiplier).floor();
    } else {
        nation.industries.push(Industry {
            industry_type: industry_type.clone(),
            level: 1,
            output: config.new_industry_output,
        });
    }

    nation.gdp -= cost;
    debug!(nation = %nation.id, industry = %industry_type, cost, "industry built");
    true
}
