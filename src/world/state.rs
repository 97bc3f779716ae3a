//! GameState - the aggregate root holding the whole world

use serde::{Deserialize, Serialize};

use crate::core::error::Result;
use crate::core::types::{NationId, Turn, TURNS_PER_YEAR};
use crate::world::event::GlobalEvent;
use crate::world::nation::Nation;
use crate::world::trade::TradeRoute;

/// Save-format version written by this engine
pub const SAVE_VERSION: &str = "1.0.0";

/// The world state for one game
///
/// This is also the save-file and network payload shape.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    pub version: String,
    /// Current turn, starting at 1
    pub turn: Turn,
    pub year: u32,
    pub player_nation: NationId,
    pub nations: Vec<Nation>,
    /// Append-only event feed
    pub global_events: Vec<GlobalEvent>,
    pub trade_routes: Vec<TradeRoute>,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl GameState {
    pub fn new(nations: Vec<Nation>, player_nation: NationId, year: u32) -> Self {
        Self {
            version: SAVE_VERSION.to_string(),
            turn: 1,
            year,
            player_nation,
            nations,
            global_events: Vec::new(),
            trade_routes: Vec::new(),
            extra: serde_json::Map::new(),
        }
    }

    pub fn nation(&self, id: &NationId) -> Option<&Nation> {
        self.nations.iter().find(|n| &n.id == id)
    }

    pub fn nation_mut(&mut self, id: &NationId) -> Option<&mut Nation> {
        self.nations.iter_mut().find(|n| &n.id == id)
    }

    pub fn nation_index(&self, id: &NationId) -> Option<usize> {
        self.nations.iter().position(|n| &n.id == id)
    }

    pub fn player_nation(&self) -> Option<&Nation> {
        self.nation(&self.player_nation)
    }

    pub fn player_nation_mut(&mut self) -> Option<&mut Nation> {
        let id = self.player_nation.clone();
        self.nation_mut(&id)
    }

    pub fn routes_for<'a>(&'a self, nation: &'a NationId) -> impl Iterator<Item = &'a TradeRoute> {
        self.trade_routes.iter().filter(move |r| r.involves(nation))
    }

    /// Move to the next turn; the year rolls over on every 12th turn.
    /// Returns true when the year changed.
    pub fn advance_calendar(&mut self) -> bool {
        self.turn += 1;
        if self.turn % TURNS_PER_YEAR == 0 {
            self.year += 1;
            return true;
        }
        false
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
