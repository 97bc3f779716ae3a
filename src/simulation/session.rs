//! GameSession - a game that can be shared between callers
//!
//! The session is the sole owner of the world state. A turn takes the
//! state lock without waiting: if a turn or a state borrow is already
//! underway, `advance` refuses with `TurnInProgress` instead of queueing.
//! A turn that panicked leaves the state half-applied; the session then
//! refuses further turns until the state is replaced.

use std::ops::{Deref, DerefMut};
use std::sync::{Mutex, MutexGuard, TryLockError};

use rand_chacha::ChaCha8Rng;
use tracing::warn;

use crate::core::error::{GeoError, Result};
use crate::core::random::RandomSource;
use crate::simulation::tick::{TurnEngine, TurnReport};
use crate::world::state::GameState;

struct SessionInner<R: RandomSource> {
    state: GameState,
    engine: TurnEngine<R>,
}

/// A finished turn plus a copy of the new state for persistence
#[derive(Debug, Clone)]
pub struct TurnOutcome {
    pub report: TurnReport,
    pub snapshot: GameState,
}

pub struct GameSession<R: RandomSource = ChaCha8Rng> {
    inner: Mutex<SessionInner<R>>,
}

/// Exclusive access to the session's state
pub struct StateGuard<'a, R: RandomSource> {
    guard: MutexGuard<'a, SessionInner<R>>,
}

impl<R: RandomSource> Deref for StateGuard<'_, R> {
    type Target = GameState;

    fn deref(&self) -> &GameState {
        &self.guard.state
    }
}

impl<R: RandomSource> DerefMut for StateGuard<'_, R> {
    fn deref_mut(&mut self) -> &mut GameState {
        &mut self.guard.state
    }
}

impl<R: RandomSource> GameSession<R> {
    pub fn new(state: GameState, engine: TurnEngine<R>) -> Self {
        Self {
            inner: Mutex::new(SessionInner { state, engine }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, SessionInner<R>> {
        self.inner.lock().unwrap_or_else(|poisoned| {
            warn!("session lock poisoned, recovering state");
            poisoned.into_inner()
        })
    }

    /// Play one turn, refusing if the state is already in use or was
    /// left behind by an interrupted turn
    pub fn advance(&self) -> Result<TurnOutcome> {
        let mut guard = match self.inner.try_lock() {
            Ok(guard) => guard,
            Err(TryLockError::WouldBlock) => return Err(GeoError::TurnInProgress),
            Err(TryLockError::Poisoned(_)) => {
                warn!("session state poisoned, refusing to advance");
                return Err(GeoError::SessionPoisoned);
            }
        };

        let inner = &mut *guard;
        let report = inner.engine.advance(&mut inner.state);

        Ok(TurnOutcome {
            report,
            snapshot: inner.state.clone(),
        })
    }

    /// Borrow the state (blocks while a turn runs). Still readable after an
    /// interrupted turn, for inspection or export.
    pub fn state(&self) -> StateGuard<'_, R> {
        StateGuard { guard: self.lock() }
    }

    pub fn snapshot(&self) -> GameState {
        self.lock().state.clone()
    }

    /// Swap in a different game (new game or load); this also clears an
    /// interrupted-turn condition
    pub fn replace_state(&self, state: GameState) -> GameState {
        let old = std::mem::replace(&mut self.lock().state, state);
        self.inner.clear_poison();
        old
    }

    pub fn into_state(self) -> GameState {
        self.inner
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .state
    }
}
