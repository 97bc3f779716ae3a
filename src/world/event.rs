//! Global events and the world event feed

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::core::types::Turn;

/// A world-level occurrence; immutable once logged
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GlobalEvent {
    pub id: String,
    pub turn: Turn,
    #[serde(rename = "type")]
    pub kind: EventKind,
    pub title: String,
    pub description: String,
    /// Descriptive metadata (e.g. `oil_price_multiplier: 1.4`).
    /// The engine records these but does not apply them.
    pub effects: BTreeMap<String, serde_json::Value>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Info,
    Crisis,
    Opportunity,
    War,
}

impl EventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Info => "info",
            EventKind::Crisis => "crisis",
            EventKind::Opportunity => "opportunity",
            EventKind::War => "war",
        }
    }
}
