pub mod config;
pub mod error;
pub mod random;
pub mod types;

pub use config::SimulationConfig;
pub use error::{GeoError, Result};
pub use random::{RandomSource, ScriptedRandom};
pub use types::{NationId, ResourceKind, Turn, TURNS_PER_YEAR};
