//! Session states - Defines the possible states of a chat session

use serde::{Deserialize, Serialize};

/// Defines the possible states of a chat session's lifecycle.
///
/// The session lives for the whole process; there is no terminal state.
/// `Sending` covers the interval between a user send and the resolution
/// (success or failure) of the corresponding server round trip.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    /// The session is idle, awaiting user input.
    Idle,

    /// A chat round trip is outstanding.
    Sending,
}

impl Default for SessionState {
    fn default() -> Self {
        SessionState::Idle
    }
}

impl SessionState {
    /// Check if a chat round trip is in flight.
    pub fn is_sending(&self) -> bool {
        matches!(self, Self::Sending)
    }

    /// Check if this state allows a new user send. The front end withholds
    /// the send control whenever this is false.
    pub fn accepts_user_input(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// Get a human-readable description of the current state.
    pub fn description(&self) -> &str {
        match self {
            Self::Idle => "Ready for input",
            Self::Sending => "Waiting for the agent",
        }
    }
}
