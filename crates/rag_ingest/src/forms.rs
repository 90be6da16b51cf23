//! Input state for the two ingestion flows
//!
//! Models the original UI controls explicitly so their reset rules stay
//! testable: the text field keeps its draft across failed submissions, the
//! file control resets after every completed upload.

use rag_client::FilePayload;

/// Draft buffer for the typed-fact flow.
#[derive(Debug, Clone, Default)]
pub struct TextForm {
    draft: String,
}

impl TextForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn set_draft(&mut self, draft: impl Into<String>) {
        self.draft = draft.into();
    }

    /// True when there is nothing submittable (empty or whitespace-only).
    pub fn is_blank(&self) -> bool {
        self.draft.trim().is_empty()
    }

    pub fn clear(&mut self) {
        self.draft.clear();
    }
}

/// Selection state for the file-upload flow.
#[derive(Debug, Clone, Default)]
pub struct FilePicker {
    selected: Option<FilePayload>,
}

impl FilePicker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select(&mut self, file: FilePayload) {
        self.selected = Some(file);
    }

    pub fn selected(&self) -> Option<&FilePayload> {
        self.selected.as_ref()
    }

    /// Take the selection, leaving the picker reset. Re-selecting the same
    /// file afterwards is valid; there is no de-duplication.
    pub fn take(&mut self) -> Option<FilePayload> {
        self.selected.take()
    }
}
