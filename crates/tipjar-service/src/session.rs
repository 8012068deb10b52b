//! Per-user custom amount sessions.

use std::collections::HashMap;

use tokio::sync::RwLock;

use tipjar_core::{SessionState, UserId};

/// Conversation state for every user with a pending prompt.
///
/// Users not in the map are idle. Transitions are `idle -> awaiting_amount`
/// on [`SessionRegistry::begin_custom_amount`] and back to idle on
/// [`SessionRegistry::take`].
#[derive(Debug, Default)]
pub struct SessionRegistry {
    states: RwLock<HashMap<UserId, SessionState>>,
}

impl SessionRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a user as awaiting a custom amount.
    pub async fn begin_custom_amount(&self, user_id: UserId) {
        self.states
            .write()
            .await
            .insert(user_id, SessionState::AwaitingAmount);
        tracing::debug!(user_id = %user_id, "Awaiting custom amount");
    }

    /// Return the user's state and reset them to idle.
    pub async fn take(&self, user_id: UserId) -> SessionState {
        self.states
            .write()
            .await
            .remove(&user_id)
            .unwrap_or_default()
    }

    /// Current state, without changing it.
    pub async fn state(&self, user_id: UserId) -> SessionState {
        self.states
            .read()
            .await
            .get(&user_id)
            .copied()
            .unwrap_or_default()
    }
}
