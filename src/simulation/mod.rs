pub mod session;
pub mod tick;

pub use session::{GameSession, StateGuard, TurnOutcome};
pub use tick::{run_turn, TurnEngine, TurnReport};
