//! World state
//!
//! The data model for one game: nations, their industries and resources,
//! trade routes and the global event feed. `GameState` is the single owner;
//! engines borrow it mutably for the duration of one turn.

pub mod event;
pub mod generation;
pub mod nation;
pub mod state;
pub mod trade;

pub use event::{EventKind, GlobalEvent};
pub use generation::{generate_world, MAP_MARGIN, MAX_NATIONS};
pub use nation::{Industry, IndustryType, Nation, Resources};
pub use state::{GameState, SAVE_VERSION};
pub use trade::{resource_price, TradeRoute};
