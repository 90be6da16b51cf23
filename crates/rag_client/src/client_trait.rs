use async_trait::async_trait;

use rag_core::Message;

use crate::api::models::{FilePayload, IngestDocument, SearchHit};
use crate::error::Result;

/// The backend surface consumed by the client. One implementation talks
/// real HTTP; tests substitute their own.
#[async_trait]
pub trait BackendTransport: Send + Sync {
    /// Send one chat turn. `history` is the pre-send snapshot of the local
    /// log, passed as conversational context. Returns the agent's reply.
    async fn send_chat(&self, message: &str, history: &[Message]) -> Result<String>;

    /// Submit a batch of documents to the knowledge base. Returns the
    /// backend's acknowledgement text.
    async fn ingest_documents(&self, documents: &[IngestDocument]) -> Result<String>;

    /// Upload a file for server-side text extraction. Returns the
    /// backend's acknowledgement text.
    async fn upload_file(&self, file: FilePayload) -> Result<String>;

    /// Preview knowledge-base results for a query.
    async fn search(&self, query: &str) -> Result<Vec<SearchHit>>;

    /// Fetch the persisted conversation history. Empty when none exists.
    async fn fetch_history(&self) -> Result<Vec<Message>>;

    /// Delete the persisted conversation history. Idempotent server-side.
    async fn clear_history(&self) -> Result<()>;
}
