//! IngestClient - submits facts and files to the knowledge base

use log::{info, warn};

use rag_client::{BackendTransport, IngestDocument};

use crate::forms::{FilePicker, TextForm};

/// How a submission resolved, for the front end to report. Failures carry
/// the error text because ingestion is user-initiated: silent failure would
/// be misleading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IngestOutcome {
    /// The backend accepted the submission.
    Accepted { message: String },
    /// The submission failed. Not retried automatically.
    Failed { error: String },
    /// Nothing to submit: blank draft or no file selected.
    Skipped,
}

/// Fire-and-report client for the two ingestion flows.
///
/// Submissions take `&mut self` only to manage the form state; there is no
/// in-flight guard, so a front end holding several clients may overlap
/// requests freely. Whether a newly ingested fact is visible to an
/// in-flight chat query is the backend's decision, not this client's.
pub struct IngestClient<T: BackendTransport> {
    transport: T,
    text_form: TextForm,
    file_picker: FilePicker,
}

impl<T: BackendTransport> IngestClient<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            text_form: TextForm::new(),
            file_picker: FilePicker::new(),
        }
    }

    pub fn text_form(&self) -> &TextForm {
        &self.text_form
    }

    pub fn text_form_mut(&mut self) -> &mut TextForm {
        &mut self.text_form
    }

    pub fn file_picker_mut(&mut self) -> &mut FilePicker {
        &mut self.file_picker
    }

    /// Submit the drafted fact as a single-element batch.
    ///
    /// Success clears the draft; failure keeps it so the user can retry
    /// without retyping.
    pub async fn submit_text(&mut self) -> IngestOutcome {
        if self.text_form.is_blank() {
            return IngestOutcome::Skipped;
        }
        let content = self.text_form.draft().trim().to_string();
        let documents = [IngestDocument::new(content)];

        match self.transport.ingest_documents(&documents).await {
            Ok(message) => {
                self.text_form.clear();
                info!("ingested 1 document");
                IngestOutcome::Accepted { message }
            }
            Err(err) => {
                warn!("text ingestion failed: {err}");
                IngestOutcome::Failed {
                    error: err.to_string(),
                }
            }
        }
    }

    /// Upload the selected file for server-side text extraction.
    ///
    /// The selection is consumed up front: the picker is reset whether or
    /// not the upload succeeds, so the same file can be re-selected and
    /// submitted again.
    pub async fn submit_file(&mut self) -> IngestOutcome {
        let Some(file) = self.file_picker.take() else {
            return IngestOutcome::Skipped;
        };
        let filename = file.filename.clone();

        match self.transport.upload_file(file).await {
            Ok(message) => {
                info!("uploaded {filename}");
                IngestOutcome::Accepted { message }
            }
            Err(err) => {
                warn!("upload of {filename} failed: {err}");
                IngestOutcome::Failed {
                    error: err.to_string(),
                }
            }
        }
    }
}
