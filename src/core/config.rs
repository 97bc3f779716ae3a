//! Simulation configuration with documented constants
//!
//! All tunable numbers live here. Every section deserializes with
//! `#[serde(default)]`, so a TOML file only needs the keys it overrides.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::error::{GeoError, Result};

/// Top-level configuration for a game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Seed for the simulation random source
    pub seed: u64,
    pub economy: EconomyConfig,
    pub ai: AiConfig,
    pub events: EventConfig,
    pub diplomacy: DiplomacyConfig,
    pub world: WorldConfig,
    pub persistence: PersistenceConfig,
}

/// Economic engine tunables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EconomyConfig {
    /// Population divisor that turns head count into a "population factor"
    ///
    /// Consumption, needs and surplus thresholds are all expressed per
    /// 10 million inhabitants.
    pub population_scale: f64,

    /// Baseline GDP growth per turn before modifiers
    pub base_growth: f64,

    /// Growth added per tech level
    pub tech_growth: f64,

    /// Pollution is divided by this before being subtracted from growth
    pub pollution_drag: f64,

    /// Stability above this pivot adds growth, below it subtracts
    pub stability_pivot: f64,

    /// Divisor applied to `(stability - pivot)`
    pub stability_divisor: f64,

    /// Growth added per industry level
    pub industry_level_growth: f64,

    /// Lower clamp on the growth factor
    pub min_growth: f64,

    /// Upper clamp on the growth factor
    pub max_growth: f64,

    /// Pollution removed per tech level each turn
    pub tech_pollution_reduction: f64,

    /// Fraction of the population added each turn
    pub population_growth: f64,

    /// Output multiplier applied when an existing industry is rebuilt
    pub upgrade_multiplier: f64,

    /// Output of a freshly built industry
    pub new_industry_output: f64,
}

impl Default for EconomyConfig {
    fn default() -> Self {
        Self {
            population_scale: 10_000_000.0,
            base_growth: 0.02,
            tech_growth: 0.005,
            pollution_drag: 10_000.0,
            stability_pivot: 50.0,
            stability_divisor: 5_000.0,
            industry_level_growth: 0.003,
            min_growth: -0.05,
            max_growth: 0.15,
            tech_pollution_reduction: 2.0,
            population_growth: 0.01,
            upgrade_multiplier: 1.3,
            new_industry_output: 500.0,
        }
    }
}

/// AI decision cascade tunables
///
/// The `*_chance` values are compared against a single roll per nation in
/// cascade order, so later branches only see rolls that earlier branches
/// did not claim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AiConfig {
    /// Power stock per population factor below which a nation needs power
    pub power_need: f64,
    /// Food stock per population factor below which a nation needs food
    pub food_need: f64,
    /// Surplus (over threshold) required before a nation will export
    pub min_trade_surplus: f64,
    /// Units per turn offered on an AI trade route
    pub trade_amount: f64,
    /// Partners must be held strictly above this relation
    pub trade_partner_min_relation: f64,
    /// GDP above which a nation considers expanding its industry
    pub expansion_gdp: f64,

    pub power_chance: f64,
    pub food_chance: f64,
    pub trade_chance: f64,
    pub expansion_chance: f64,
    pub diplomacy_chance: f64,

    pub renewable_cost: f64,
    pub agriculture_cost: f64,
    pub expansion_cost: f64,

    /// Industries at this level are skipped when picking what to expand
    pub max_industry_level: u32,
    /// Diplomacy only raises relations strictly below this value
    pub diplomacy_ceiling: f64,
    pub diplomacy_step: f64,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            power_need: 500.0,
            food_need: 800.0,
            min_trade_surplus: 1_000.0,
            trade_amount: 500.0,
            trade_partner_min_relation: 40.0,
            expansion_gdp: 100_000.0,
            power_chance: 0.4,
            food_chance: 0.3,
            trade_chance: 0.25,
            expansion_chance: 0.2,
            diplomacy_chance: 0.15,
            renewable_cost: 50_000.0,
            agriculture_cost: 40_000.0,
            expansion_cost: 60_000.0,
            max_industry_level: 5,
            diplomacy_ceiling: 80.0,
            diplomacy_step: 5.0,
        }
    }
}

/// Random global event tunables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventConfig {
    /// An event fires when the roll is strictly greater than this
    pub trigger_threshold: f64,
}

impl Default for EventConfig {
    fn default() -> Self {
        Self {
            trigger_threshold: 0.7,
        }
    }
}

/// Player diplomacy tunables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiplomacyConfig {
    /// GDP spent on one diplomatic mission
    pub mission_cost: f64,
    /// Relation gained by one diplomatic mission
    pub mission_gain: f64,
    /// Cost of a player-ordered industry build
    pub player_build_cost: f64,
}

impl Default for DiplomacyConfig {
    fn default() -> Self {
        Self {
            mission_cost: 10_000.0,
            mission_gain: 10.0,
            player_build_cost: 60_000.0,
        }
    }
}

/// World generation tunables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    pub nation_count: usize,
    pub start_year: u32,
    pub map_width: f64,
    pub map_height: f64,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            nation_count: 8,
            start_year: 2025,
            map_width: 1000.0,
            map_height: 600.0,
        }
    }
}

/// Save-game tunables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersistenceConfig {
    /// Directory holding local save slots
    pub save_dir: PathBuf,
    /// Save after every completed turn
    pub autosave: bool,
    pub autosave_slot: String,
    pub manual_slot: String,
    /// Base URL of the remote save service, if any
    pub remote_url: Option<String>,
}

impl Default for PersistenceConfig {
    fn default() -> Self {
        Self {
            save_dir: PathBuf::from("saves"),
            autosave: true,
            autosave_slot: "geosynthesis_autosave".into(),
            manual_slot: "geosynthesis_save".into(),
            remote_url: None,
        }
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            seed: 2025,
            economy: EconomyConfig::default(),
            ai: AiConfig::default(),
            events: EventConfig::default(),
            diplomacy: DiplomacyConfig::default(),
            world: WorldConfig::default(),
            persistence: PersistenceConfig::default(),
        }
    }
}

impl SimulationConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a (possibly partial) TOML document and validate it
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: SimulationConfig = toml::from_str(content)?;
        config.validate().map_err(GeoError::InvalidConfig)?;
        Ok(config)
    }

    /// Load a TOML config file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.economy.population_scale <= 0.0 {
            return Err("economy.population_scale must be positive".into());
        }

        if self.economy.min_growth > self.economy.max_growth {
            return Err(format!(
                "economy.min_growth ({}) should be <= economy.max_growth ({})",
                self.economy.min_growth, self.economy.max_growth
            ));
        }

        let chances = [
            ("ai.power_chance", self.ai.power_chance),
            ("ai.food_chance", self.ai.food_chance),
            ("ai.trade_chance", self.ai.trade_chance),
            ("ai.expansion_chance", self.ai.expansion_chance),
            ("ai.diplomacy_chance", self.ai.diplomacy_chance),
            ("events.trigger_threshold", self.events.trigger_threshold),
        ];
        for (name, value) in chances {
            if !(0.0..=1.0).contains(&value) {
                return Err(format!("{} ({}) must be within [0, 1]", name, value));
            }
        }

        if self.world.nation_count == 0 || self.world.nation_count > crate::world::MAX_NATIONS {
            return Err(format!(
                "world.nation_count ({}) must be between 1 and {}",
                self.world.nation_count,
                crate::world::MAX_NATIONS
            ));
        }

        let min_extent = 2.0 * crate::world::MAP_MARGIN;
        for (name, value) in [("world.map_width", self.world.map_width), ("world.map_height", self.world.map_height)] {
            if value.is_nan() || value <= min_extent {
                return Err(format!("{} ({}) must be greater than {}", name, value, min_extent));
            }
        }

        Ok(())
    }
}
