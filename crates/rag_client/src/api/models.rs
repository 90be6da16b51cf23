//! Wire models for the backend's HTTP surface.

use serde::{Deserialize, Serialize};

use rag_core::Message;

/// Body of `POST /api/chat`.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ChatRequest {
    pub message: String,
    pub history: Vec<Message>,
}

/// Body of the chat response.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ChatResponse {
    pub response: String,
}

/// One element of the `POST /api/ingest` batch.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct IngestDocument {
    pub content: String,
    /// Free-form metadata attached to the document. Omitted from the wire
    /// when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
}

impl IngestDocument {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            metadata: None,
        }
    }

    pub fn with_metadata(mut self, metadata: serde_json::Value) -> Self {
        self.metadata = Some(metadata);
        self
    }
}

/// Acknowledgement returned by the ingest and upload endpoints.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct AckResponse {
    #[serde(default)]
    pub message: String,
}

/// Body of the search response.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct SearchResponse {
    #[serde(default)]
    pub results: Vec<SearchHit>,
}

/// One ranked knowledge-base match.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct SearchHit {
    pub content: String,
    #[serde(default)]
    pub score: f64,
}

/// A file queued for upload. The server extracts text from PDF, plain-text,
/// and common image formats; the client does not pre-validate beyond the
/// declared content type.
#[derive(Clone, Debug)]
pub struct FilePayload {
    pub bytes: Vec<u8>,
    pub filename: String,
    pub mime_type: String,
}

impl FilePayload {
    pub fn new(bytes: Vec<u8>, filename: impl Into<String>, mime_type: impl Into<String>) -> Self {
        Self {
            bytes,
            filename: filename.into(),
            mime_type: mime_type.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ingest_document_without_metadata_omits_field() {
        let json = serde_json::to_string(&IngestDocument::new("The sky is blue.")).unwrap();
        assert_eq!(json, r#"{"content":"The sky is blue."}"#);
    }

    #[test]
    fn test_ingest_document_with_metadata() {
        let doc = IngestDocument::new("fact")
            .with_metadata(serde_json::json!({ "source": "cli" }));
        let json = serde_json::to_string(&doc).unwrap();
        assert!(json.contains(r#""metadata":{"source":"cli"}"#));
    }

    #[test]
    fn test_ack_response_tolerates_empty_body() {
        let ack: AckResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(ack.message, "");
    }
}
