//! Multipart form parsing for the review endpoints.
//!
//! Reads the form once, enforcing the upload limits while streaming, and
//! hands back owned parts. Nothing is filtered silently: a file with the
//! wrong MIME type is returned as-is and rejected by the handler.

use axum::extract::multipart::{Multipart, MultipartError, MultipartRejection};
use axum::http::StatusCode;
use bytes::{Bytes, BytesMut};

use crate::errors::AppError;

pub const RESUME_FIELD: &str = "resume";
pub const JOB_DESCRIPTION_FIELD: &str = "jobDescription";
pub const PDF_MIME: &str = "application/pdf";

/// Largest accepted résumé, 5 MiB.
pub const MAX_FILE_BYTES: usize = 5 * 1024 * 1024;
pub const MAX_FIELD_BYTES: usize = 50 * 1024;
pub const MAX_FILES: usize = 1;
pub const MAX_FIELDS: usize = 5;
pub const MAX_PARTS: usize = 10;

/// Whole-request cap for the review routes: one file plus text fields and framing.
pub const MAX_BODY_BYTES: usize = MAX_FILE_BYTES + MAX_FIELDS * MAX_FIELD_BYTES + 64 * 1024;

/// An uploaded document, scoped to a single request.
#[derive(Debug)]
pub struct UploadedFile {
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    data: Bytes,
}

impl UploadedFile {
    pub fn new(file_name: Option<String>, content_type: Option<String>, data: Bytes) -> Self {
        Self {
            file_name,
            content_type,
            data,
        }
    }

    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// True when the declared MIME essence is `application/pdf`.
    pub fn is_pdf(&self) -> bool {
        self.content_type
            .as_deref()
            .and_then(|ct| ct.split(';').next())
            .map(|essence| essence.trim().eq_ignore_ascii_case(PDF_MIME))
            .unwrap_or(false)
    }

    /// Gives up the buffer; whoever receives it decides when it is freed.
    pub fn into_bytes(self) -> Bytes {
        self.data
    }
}

/// Parsed review form. Either part may be missing; the handler decides.
#[derive(Debug, Default)]
pub struct ReviewForm {
    pub resume: Option<UploadedFile>,
    pub job_description: Option<String>,
}

pub async fn read_review_form(
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<ReviewForm, AppError> {
    let mut multipart = multipart.map_err(|e| AppError::Upload(e.body_text()))?;

    let mut form = ReviewForm::default();
    let mut parts = 0;
    let mut files = 0;
    let mut fields = 0;

    while let Some(mut field) = multipart.next_field().await.map_err(multipart_error)? {
        parts += 1;
        if parts > MAX_PARTS {
            return Err(AppError::Upload("Too many parts".to_string()));
        }

        let name = field.name().unwrap_or_default().to_string();
        let is_file = field.file_name().is_some() || name == RESUME_FIELD;

        if is_file {
            files += 1;
            if name != RESUME_FIELD {
                return Err(AppError::Upload("Unexpected field".to_string()));
            }
            if files > MAX_FILES {
                return Err(AppError::Upload("Too many files".to_string()));
            }

            let file_name = field.file_name().map(String::from);
            let content_type = field.content_type().map(String::from);
            let mut buffer = BytesMut::new();
            while let Some(chunk) = field.chunk().await.map_err(multipart_error)? {
                if buffer.len() + chunk.len() > MAX_FILE_BYTES {
                    return Err(AppError::FileTooLarge);
                }
                buffer.extend_from_slice(&chunk);
            }
            form.resume = Some(UploadedFile::new(file_name, content_type, buffer.freeze()));
            continue;
        }

        fields += 1;
        if fields > MAX_FIELDS {
            return Err(AppError::Upload("Too many fields".to_string()));
        }

        let mut value = BytesMut::new();
        while let Some(chunk) = field.chunk().await.map_err(multipart_error)? {
            if value.len() + chunk.len() > MAX_FIELD_BYTES {
                return Err(AppError::Upload("Field value too long".to_string()));
            }
            value.extend_from_slice(&chunk);
        }

        if name == JOB_DESCRIPTION_FIELD {
            if form.job_description.is_some() {
                return Err(AppError::Upload(format!(
                    "Duplicate field: {JOB_DESCRIPTION_FIELD}"
                )));
            }
            let text = String::from_utf8(value.to_vec())
                .map_err(|_| AppError::Upload("Field value is not valid UTF-8".to_string()))?;
            form.job_description = Some(text);
        }
    }

    Ok(form)
}

/// Body-limit overruns surface as the dedicated file-size error.
fn multipart_error(e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::FileTooLarge
    } else {
        AppError::Upload(e.body_text())
    }
}
