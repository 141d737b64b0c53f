//! Text extraction seam. `AppState` carries an `Arc<dyn TextExtractor>`;
//! production uses [`PdfTextExtractor`].

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;
use tokio::task::JoinError;
use tracing::{debug, error};

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Failed to extract text from PDF: {0}")]
    Pdf(String),

    /// The blocking parser task panicked or was cancelled. The panic text
    /// is logged, never shown to the client.
    #[error("Error processing resume")]
    Task(#[source] JoinError),
}

/// Turns an uploaded document into plain text.
///
/// The buffer is taken by value so it is released as soon as extraction ends.
#[async_trait]
pub trait TextExtractor: Send + Sync {
    async fn extract(&self, document: Bytes) -> Result<String, ExtractionError>;
}

/// `pdf-extract` backed extractor. Parsing is CPU-bound and runs on the
/// blocking pool so it does not stall other requests.
pub struct PdfTextExtractor;

#[async_trait]
impl TextExtractor for PdfTextExtractor {
    async fn extract(&self, document: Bytes) -> Result<String, ExtractionError> {
        let text = tokio::task::spawn_blocking(move || {
            let size = document.len();
            let result = pdf_extract::extract_text_from_mem(&document)
                .map_err(|e| ExtractionError::Pdf(e.to_string()));
            drop(document);
            debug!("Released {size} byte upload buffer after parsing");
            result
        })
        .await
        .map_err(task_failed)??;
        Ok(text)
    }
}

fn task_failed(e: JoinError) -> ExtractionError {
    error!("PDF extraction task failed: {e}");
    ExtractionError::Task(e)
}
