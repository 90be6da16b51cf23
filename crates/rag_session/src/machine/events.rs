//! Session events - Defines events that trigger state transitions

use serde::{Deserialize, Serialize};

/// Defines the events that can trigger state transitions in the FSM.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionEvent {
    // ========== Send Cycle ==========
    /// A user message was accepted and its round trip began.
    SendStarted,

    /// The server's reply was appended to the log.
    ReplyReceived,

    /// The round trip failed; a synthetic failure notice was appended
    /// instead. The optimistic user message stays in the log.
    SendFailed { error: String },

    // ========== History ==========
    /// Server-persisted history replaced the local log at startup.
    HistoryHydrated { count: usize },

    /// The local log and the server-persisted history were cleared.
    HistoryCleared,
}

impl SessionEvent {
    /// Check if this event resolves an outstanding round trip.
    pub fn resolves_send(&self) -> bool {
        matches!(self, Self::ReplyReceived | Self::SendFailed { .. })
    }

    /// Check if this is a failure event.
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::SendFailed { .. })
    }
}
