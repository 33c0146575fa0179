//! Session management: conversation log, store, and per-session gating.

pub mod conversation;
pub mod store;

pub use conversation::Conversation;
pub use store::{InMemorySessionStore, SessionStore};

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use crate::error::{Result, TangentError};

/// Enforces at-most-one in-flight run per session id.
///
/// Concurrent runs on the same id are rejected, not queued; distinct ids
/// never contend. The permit releases its id on drop, so a panicking or
/// aborted run cannot wedge the session.
#[derive(Debug, Default, Clone)]
pub struct SessionGate {
    in_flight: Arc<Mutex<HashSet<String>>>,
}

impl SessionGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim a session for a run, or fail with `SessionConflict`.
    pub fn acquire(&self, session_id: &str) -> Result<SessionPermit> {
        let mut in_flight = self.in_flight.lock().unwrap_or_else(|e| e.into_inner());
        if !in_flight.insert(session_id.to_string()) {
            return Err(TangentError::SessionConflict {
                session_id: session_id.to_string(),
            });
        }
        Ok(SessionPermit {
            session_id: session_id.to_string(),
            in_flight: Arc::clone(&self.in_flight),
        })
    }
}

/// RAII claim on a session id.
#[derive(Debug)]
pub struct SessionPermit {
    session_id: String,
    in_flight: Arc<Mutex<HashSet<String>>>,
}

impl Drop for SessionPermit {
    fn drop(&mut self) {
        if let Ok(mut in_flight) = self.in_flight.lock() {
            in_flight.remove(&self.session_id);
        }
    }
}
