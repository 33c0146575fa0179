//! Session store: keyed persistence of conversation logs.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::Result;

use super::conversation::Conversation;

/// Persistence seam for per-session conversation state.
///
/// Implementations must partition strictly by session id: two ids never
/// share message storage. `save` has full-overwrite semantics — callers
/// hand back the complete sequence including prior history.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Load the conversation for a session, creating an empty one for an
    /// unseen id. Never fails.
    async fn load(&self, session_id: &str) -> Conversation;

    /// Persist the full conversation, replacing any previous state.
    async fn save(&self, session_id: &str, conversation: &Conversation) -> Result<()>;
}

/// In-process store backed by a keyed map.
///
/// No eviction and no durability; lifecycle policy is the caller's
/// concern. Suitable for demos and tests, or as the cache tier in front
/// of a durable implementation of [`SessionStore`].
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    sessions: RwLock<HashMap<String, Conversation>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ids with stored state, for inspection.
    pub async fn session_ids(&self) -> Vec<String> {
        self.sessions.read().await.keys().cloned().collect()
    }

    /// Drop a session's state entirely.
    pub async fn remove(&self, session_id: &str) -> Option<Conversation> {
        self.sessions.write().await.remove(session_id)
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn load(&self, session_id: &str) -> Conversation {
        self.sessions
            .read()
            .await
            .get(session_id)
            .cloned()
            .unwrap_or_default()
    }

    async fn save(&self, session_id: &str, conversation: &Conversation) -> Result<()> {
        self.sessions
            .write()
            .await
            .insert(session_id.to_string(), conversation.clone());
        Ok(())
    }
}
