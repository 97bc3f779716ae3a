//! Geosynthesis - turn-based geopolitical economy simulation
//!
//! Each turn runs the economic engine over every nation, lets the
//! AI-controlled nations act, may raise a global event, then advances
//! the calendar.

pub mod ai;
pub mod core;
pub mod diplomacy;
pub mod economy;
pub mod events;
pub mod persistence;
pub mod simulation;
pub mod world;
