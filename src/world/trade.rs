//! Trade routes - standing directional resource transfers

use serde::{Deserialize, Serialize};

use crate::core::types::{NationId, ResourceKind};

/// Ships up to `amount` units of `resource` from `from` to `to` every turn
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeRoute {
    pub from: NationId,
    pub to: NationId,
    pub resource: ResourceKind,
    pub amount: f64,
    pub price_per_unit: f64,
}

impl TradeRoute {
    pub fn involves(&self, nation: &NationId) -> bool {
        &self.from == nation || &self.to == nation
    }
}

/// Fixed unit price of each resource
pub fn resource_price(resource: ResourceKind) -> f64 {
    match resource {
        ResourceKind::Iron => 12.0,
        ResourceKind::Oil => 25.0,
        ResourceKind::RareEarth => 150.0,
        ResourceKind::Food => 3.0,
        ResourceKind::Power => 8.0,
    }
}
