//! rag_ingest - Knowledge-base ingestion client
//!
//! An independent flow for adding typed facts or files to the knowledge
//! base. It shares nothing with the chat session beyond the transport:
//! ingestion never reads or mutates the message log, and concurrent
//! submissions are allowed with no ordering guarantee between them or
//! against in-flight chat sends.

pub mod client;
pub mod forms;

// Re-export commonly used types
pub use client::{IngestClient, IngestOutcome};
pub use forms::{FilePicker, TextForm};
