use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::header::{HeaderMap, ACCEPT, USER_AGENT};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};

use rag_core::{Config, Message};

use crate::api::models::{
    AckResponse, ChatRequest, ChatResponse, FilePayload, IngestDocument, SearchHit, SearchResponse,
};
use crate::client_trait::BackendTransport;
use crate::error::{ClientError, Result};

/// HTTP implementation of [`BackendTransport`].
///
/// Cheap to clone; the inner `reqwest::Client` shares its connection pool
/// across clones, so the chat and ingestion flows can each hold one.
#[derive(Debug, Clone)]
pub struct BackendClient {
    client: Client,
    base_url: String,
}

impl BackendClient {
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .default_headers(Self::default_headers())
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;
        Ok(Self {
            client,
            base_url: config.server_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn default_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, "application/json".parse().unwrap());
        headers.insert(USER_AGENT, "rag-cli/0.1.0".parse().unwrap());
        headers
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Map non-2xx statuses to [`ClientError::Status`] and hand back the
    /// raw body otherwise, so callers can decode through the distinct
    /// [`ClientError::Decode`] channel.
    async fn read_body(response: Response) -> Result<String> {
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(ClientError::Status { status, body });
        }
        Ok(body)
    }
}

#[async_trait]
impl BackendTransport for BackendClient {
    async fn send_chat(&self, message: &str, history: &[Message]) -> Result<String> {
        let url = self.url("/api/chat");
        debug!("POST {} ({} history messages)", url, history.len());
        let request = ChatRequest {
            message: message.to_string(),
            history: history.to_vec(),
        };
        let response = self.client.post(&url).json(&request).send().await?;
        let body = Self::read_body(response).await?;
        let parsed: ChatResponse = serde_json::from_str(&body)?;
        Ok(parsed.response)
    }

    async fn ingest_documents(&self, documents: &[IngestDocument]) -> Result<String> {
        let url = self.url("/api/ingest");
        debug!("POST {} ({} documents)", url, documents.len());
        let response = self.client.post(&url).json(&documents).send().await?;
        let body = Self::read_body(response).await?;
        let ack: AckResponse = serde_json::from_str(&body)?;
        Ok(ack.message)
    }

    async fn upload_file(&self, file: FilePayload) -> Result<String> {
        let url = self.url("/api/upload");
        debug!("POST {} ({}, {} bytes)", url, file.filename, file.bytes.len());
        let part = Part::bytes(file.bytes)
            .file_name(file.filename)
            .mime_str(&file.mime_type)?;
        let form = Form::new().part("file", part);
        let response = self.client.post(&url).multipart(form).send().await?;
        let body = Self::read_body(response).await?;
        let ack: AckResponse = serde_json::from_str(&body)?;
        Ok(ack.message)
    }

    async fn search(&self, query: &str) -> Result<Vec<SearchHit>> {
        let url = self.url("/api/search");
        debug!("POST {}", url);
        let response = self
            .client
            .post(&url)
            .query(&[("query", query)])
            .send()
            .await?;
        let body = Self::read_body(response).await?;
        let parsed: SearchResponse = serde_json::from_str(&body)?;
        Ok(parsed.results)
    }

    async fn fetch_history(&self) -> Result<Vec<Message>> {
        let url = self.url("/api/history");
        debug!("GET {}", url);
        let response = self.client.get(&url).send().await?;
        let body = Self::read_body(response).await?;
        let history: Vec<Message> = serde_json::from_str(&body)?;
        Ok(history)
    }

    async fn clear_history(&self) -> Result<()> {
        let url = self.url("/api/history");
        debug!("DELETE {}", url);
        let response = self.client.delete(&url).send().await?;
        Self::read_body(response).await?;
        Ok(())
    }
}
