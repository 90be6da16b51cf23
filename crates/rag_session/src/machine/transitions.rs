//! State transitions - FSM transition logic

use super::events::SessionEvent;
use super::states::SessionState;

/// Represents a state transition result.
#[derive(Debug, Clone)]
pub struct StateTransition {
    /// The state before the transition.
    pub from: SessionState,
    /// The state after the transition.
    pub to: SessionState,
    /// The event that triggered the transition.
    pub event: SessionEvent,
    /// Whether the state actually changed.
    pub changed: bool,
}

/// State machine for the chat session lifecycle.
///
/// `Sending` is entered by at most one outstanding round trip at a time;
/// events that make no sense in the current state leave it unchanged.
#[derive(Debug, Clone)]
pub struct StateMachine {
    /// Current state.
    current_state: SessionState,
    /// Transition history (limited).
    history: Vec<StateTransition>,
    /// Max history entries to keep.
    max_history: usize,
}

impl Default for StateMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl StateMachine {
    /// Create a new state machine in Idle state.
    pub fn new() -> Self {
        Self {
            current_state: SessionState::Idle,
            history: Vec::new(),
            max_history: 50,
        }
    }

    /// Create a state machine with a specific initial state.
    pub fn with_state(state: SessionState) -> Self {
        Self {
            current_state: state,
            history: Vec::new(),
            max_history: 50,
        }
    }

    /// Get the current state.
    pub fn state(&self) -> &SessionState {
        &self.current_state
    }

    /// Get the transition history.
    pub fn history(&self) -> &[StateTransition] {
        &self.history
    }

    /// Handle an event and transition to a new state.
    pub fn handle_event(&mut self, event: SessionEvent) -> StateTransition {
        let old_state = self.current_state;
        let new_state = Self::compute_next_state(&old_state, &event);
        let changed = old_state != new_state;

        self.current_state = new_state;

        let transition = StateTransition {
            from: old_state,
            to: new_state,
            event,
            changed,
        };

        self.history.push(transition.clone());
        if self.history.len() > self.max_history {
            self.history.remove(0);
        }

        transition
    }

    /// Compute the next state given current state and event.
    fn compute_next_state(state: &SessionState, event: &SessionEvent) -> SessionState {
        use SessionEvent::*;
        use SessionState::*;

        match (state, event) {
            // ========== Send Cycle ==========
            (Idle, SendStarted) => Sending,
            (Sending, ReplyReceived) => Idle,
            (Sending, SendFailed { .. }) => Idle,

            // ========== History ==========
            // Hydration and clearing only happen while idle; they keep the
            // session idle but are recorded for diagnostics.
            (Idle, HistoryHydrated { .. }) => Idle,
            (Idle, HistoryCleared) => Idle,

            // ========== Default: No transition ==========
            _ => *state,
        }
    }

    /// Check if a transition is valid without executing it.
    pub fn can_transition(&self, event: &SessionEvent) -> bool {
        Self::compute_next_state(&self.current_state, event) != self.current_state
    }

    /// Reset to Idle state.
    pub fn reset(&mut self) {
        self.current_state = SessionState::Idle;
    }
}
