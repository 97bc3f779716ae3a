//! Nation - a player- or AI-controlled economic actor

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::types::{NationId, ResourceKind};

/// A nation and everything it owns
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Nation {
    pub id: NationId,
    pub name: String,
    pub is_player: bool,

    // Map position
    pub x: f64,
    pub y: f64,

    pub gdp: f64,
    pub population: u64,
    pub tech_level: f64,
    pub pollution: f64,
    pub stability: f64, // 0 to 100

    pub resources: Resources,
    pub industries: Vec<Industry>,
    pub traits: Vec<String>,

    /// Affinity toward other nations, 0 to 100
    pub relations: BTreeMap<NationId, f64>,

    /// Fields this version does not know about, kept for round-tripping
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Resource stockpile
///
/// Engine operations never leave a quantity below zero.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Resources {
    pub iron: f64,
    pub oil: f64,
    pub rare_earth: f64,
    pub food: f64,
    pub power: f64,
}

impl Resources {
    pub fn new(iron: f64, oil: f64, rare_earth: f64, food: f64, power: f64) -> Self {
        Self {
            iron,
            oil,
            rare_earth,
            food,
            power,
        }
    }

    pub fn get(&self, kind: ResourceKind) -> f64 {
        match kind {
            ResourceKind::Iron => self.iron,
            ResourceKind::Oil => self.oil,
            ResourceKind::RareEarth => self.rare_earth,
            ResourceKind::Food => self.food,
            ResourceKind::Power => self.power,
        }
    }

    pub fn get_mut(&mut self, kind: ResourceKind) -> &mut f64 {
        match kind {
            ResourceKind::Iron => &mut self.iron,
            ResourceKind::Oil => &mut self.oil,
            ResourceKind::RareEarth => &mut self.rare_earth,
            ResourceKind::Food => &mut self.food,
            ResourceKind::Power => &mut self.power,
        }
    }

    pub fn add(&mut self, kind: ResourceKind, amount: f64) {
        *self.get_mut(kind) += amount;
    }

    /// Remove up to `amount`, flooring at zero. Returns the amount removed.
    pub fn remove(&mut self, kind: ResourceKind, amount: f64) -> f64 {
        let slot = self.get_mut(kind);
        let removed = amount.min(*slot).max(0.0);
        *slot -= removed;
        removed
    }

    pub fn iter(&self) -> impl Iterator<Item = (ResourceKind, f64)> + '_ {
        ResourceKind::ALL.into_iter().map(move |kind| (kind, self.get(kind)))
    }
}

/// Industry categories
///
/// The set is open: save files may name types this engine has no
/// coefficients for, which are carried as `Other` and produce nothing.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum IndustryType {
    Mining,
    Energy,
    RenewableEnergy,
    Agriculture,
    Manufacturing,
    Tech,
    Tourism,
    Finance,
    Other(String),
}

impl IndustryType {
    /// Every named industry type
    pub const KNOWN: [IndustryType; 8] = [
        IndustryType::Mining,
        IndustryType::Manufacturing,
        IndustryType::Energy,
        IndustryType::Agriculture,
        IndustryType::Tech,
        IndustryType::Tourism,
        IndustryType::RenewableEnergy,
        IndustryType::Finance,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            IndustryType::Mining => "mining",
            IndustryType::Energy => "energy",
            IndustryType::RenewableEnergy => "renewable_energy",
            IndustryType::Agriculture => "agriculture",
            IndustryType::Manufacturing => "manufacturing",
            IndustryType::Tech => "tech",
            IndustryType::Tourism => "tourism",
            IndustryType::Finance => "finance",
            IndustryType::Other(name) => name,
        }
    }
}

impl From<String> for IndustryType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "mining" => IndustryType::Mining,
            "energy" => IndustryType::Energy,
            "renewable_energy" => IndustryType::RenewableEnergy,
            "agriculture" => IndustryType::Agriculture,
            "manufacturing" => IndustryType::Manufacturing,
            "tech" => IndustryType::Tech,
            "tourism" => IndustryType::Tourism,
            "finance" => IndustryType::Finance,
            _ => IndustryType::Other(value),
        }
    }
}

impl From<&str> for IndustryType {
    fn from(value: &str) -> Self {
        IndustryType::from(value.to_string())
    }
}

impl From<IndustryType> for String {
    fn from(value: IndustryType) -> Self {
        match value {
            IndustryType::Other(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for IndustryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A production facility; rebuilt to level up, never removed
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Industry {
    #[serde(rename = "type")]
    pub industry_type: IndustryType,
    pub level: u32,
    pub output: f64,
}

impl Nation {
    /// A bare nation with zeroed stats, used by generators and tests
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: NationId::new(id),
            name: name.into(),
            is_player: false,
            x: 0.0,
            y: 0.0,
            gdp: 0.0,
            population: 0,
            tech_level: 0.0,
            pollution: 0.0,
            stability: 50.0,
            resources: Resources::default(),
            industries: Vec::new(),
            traits: Vec::new(),
            relations: BTreeMap::new(),
            extra: serde_json::Map::new(),
        }
    }

    /// Population expressed in units of 10 million (with the default scale)
    pub fn population_factor(&self, scale: f64) -> f64 {
        self.population as f64 / scale
    }

    pub fn industry(&self, industry_type: &IndustryType) -> Option<&Industry> {
        self.industries.iter().find(|i| &i.industry_type == industry_type)
    }

    pub fn industry_mut(&mut self, industry_type: &IndustryType) -> Option<&mut Industry> {
        self.industries.iter_mut().find(|i| &i.industry_type == industry_type)
    }

    pub fn relation(&self, other: &NationId) -> Option<f64> {
        self.relations.get(other).copied()
    }
}
