//! rag_core - Core types shared across the RAG client
//!
//! This crate provides the foundational types used by the other crates:
//! - `message` - conversation message shapes
//! - `config` - backend connection settings

pub mod config;
pub mod message;

// Re-export commonly used types
pub use config::Config;
pub use message::{Message, Role};
