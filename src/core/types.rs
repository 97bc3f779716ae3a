//! Core type definitions used throughout the codebase

use std::fmt;

use serde::{Deserialize, Serialize};

/// Simulation turn counter (one turn is notionally one month)
pub type Turn = u32;

/// Number of turns that make up one in-game year
pub const TURNS_PER_YEAR: Turn = 12;

/// Unique identifier for nations
///
/// Serialized as the bare string used in save files (`"nordland"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NationId(pub String);

impl NationId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NationId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// The five tradeable resources every nation stockpiles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Iron,
    Oil,
    RareEarth,
    Food,
    Power,
}

impl ResourceKind {
    /// All resources, in save-file field order
    pub const ALL: [ResourceKind; 5] = [
        ResourceKind::Iron,
        ResourceKind::Oil,
        ResourceKind::RareEarth,
        ResourceKind::Food,
        ResourceKind::Power,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Iron => "iron",
            ResourceKind::Oil => "oil",
            ResourceKind::RareEarth => "rare_earth",
            ResourceKind::Food => "food",
            ResourceKind::Power => "power",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == value)
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_kind_parse() {
        assert_eq!(ResourceKind::parse("rare_earth"), Some(ResourceKind::RareEarth));
        assert_eq!(ResourceKind::parse("gold"), None);
    }

    #[test]
    fn test_nation_id_serializes_as_string() {
        let id = NationId::new("nordland");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"nordland\"");
    }
}
