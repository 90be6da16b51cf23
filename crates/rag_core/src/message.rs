//! Message - Conversation message shapes
//!
//! The same shape is used for the local log, the chat request's history
//! payload, and the persisted history returned by the backend.

use serde::{Deserialize, Serialize};

/// Who produced a message.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// The person typing into the front end.
    User,
    /// The assistant on the other side of the backend.
    Agent,
}

impl Role {
    /// Label shown next to a message in the front end.
    pub fn label(&self) -> &'static str {
        match self {
            Self::User => "You",
            Self::Agent => "Agent",
        }
    }
}

/// A single conversation turn. Immutable once appended to the log;
/// ordering is significant, duplicates are allowed.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    /// Create a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    /// Create an agent message.
    pub fn agent(content: impl Into<String>) -> Self {
        Self {
            role: Role::Agent,
            content: content.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors() {
        let msg = Message::user("What is X?");
        assert_eq!(msg.role, Role::User);
        assert_eq!(msg.content, "What is X?");

        let msg = Message::agent("X is Y.");
        assert_eq!(msg.role, Role::Agent);
    }

    #[test]
    fn test_role_labels() {
        assert_eq!(Role::User.label(), "You");
        assert_eq!(Role::Agent.label(), "Agent");
    }

    // The backend contract depends on these exact role names.
    #[test]
    fn test_wire_role_names() {
        let json = serde_json::to_string(&Message::agent("hi")).unwrap();
        assert_eq!(json, r#"{"role":"agent","content":"hi"}"#);

        let msg: Message = serde_json::from_str(r#"{"role":"user","content":"hi"}"#).unwrap();
        assert_eq!(msg.role, Role::User);
    }
}
