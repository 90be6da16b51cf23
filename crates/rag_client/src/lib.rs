//! rag_client - HTTP transport adapter for the RAG backend
//!
//! Wraps the backend's small HTTP surface (chat, ingest, upload, search,
//! history) behind the [`BackendTransport`] trait so the session and
//! ingestion flows never touch HTTP directly.

pub mod api;
pub mod client_trait;
pub mod error;

pub use api::client::BackendClient;
pub use api::models::{FilePayload, IngestDocument, SearchHit};
pub use client_trait::BackendTransport;
pub use error::{ClientError, Result};
