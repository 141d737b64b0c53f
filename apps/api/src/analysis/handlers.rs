//! Axum route handlers for résumé review.
//!
//! Both endpoints run the same pipeline and differ only in [`PromptKind`]:
//! validate → extract → normalize job description → truncate → generate → respond.

use std::time::{Duration, Instant};

use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    Json,
};
use serde::Serialize;
use tracing::{error, info};

use crate::analysis::truncate::{truncate, MAX_RESUME_CHARS};
use crate::analysis::upload::read_review_form;
use crate::errors::{format_millis, AppError, TimedError};
use crate::llm_client::prompts::PromptKind;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimingBreakdown {
    pub pdf_parsing: String,
    pub ai_generation: String,
    pub total: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewResponse {
    pub message: &'static str,
    pub suggestions: String,
    pub processing_time: String,
    pub breakdown: TimingBreakdown,
}

/// Result of a successful pipeline run, before shaping.
struct ReviewOutcome {
    suggestions: String,
    pdf_parsing: Duration,
    ai_generation: Duration,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /analyze/resume
///
/// Multipart: `resume` (PDF) + `jobDescription` (required).
pub async fn handle_analyze(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<ReviewResponse>, TimedError> {
    review(&state, PromptKind::Analysis, multipart).await
}

/// POST /roast/resume
///
/// Legacy variant. Same form, `jobDescription` optional.
pub async fn handle_roast(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<ReviewResponse>, TimedError> {
    review(&state, PromptKind::Roast, multipart).await
}

async fn review(
    state: &AppState,
    kind: PromptKind,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<ReviewResponse>, TimedError> {
    let started = Instant::now();

    match run_review(state, kind, multipart).await {
        Ok(outcome) => {
            let total = started.elapsed();
            info!(
                "{} completed in {}ms (PDF: {}ms, AI: {}ms)",
                kind.label(),
                total.as_millis(),
                outcome.pdf_parsing.as_millis(),
                outcome.ai_generation.as_millis()
            );
            Ok(Json(ReviewResponse {
                message: "Success",
                suggestions: outcome.suggestions,
                processing_time: format_millis(total),
                breakdown: TimingBreakdown {
                    pdf_parsing: format_millis(outcome.pdf_parsing),
                    ai_generation: format_millis(outcome.ai_generation),
                    total: format_millis(total),
                },
            }))
        }
        Err(e) => {
            let elapsed = started.elapsed();
            if e.status().is_server_error() {
                error!(
                    "Error processing resume after {}ms: {e}",
                    elapsed.as_millis()
                );
            } else {
                info!("Rejected {} request: {e}", kind.label());
            }
            Err(TimedError::new(e, elapsed))
        }
    }
}

/// The pipeline proper. The upload buffer is owned here and moved into the
/// extractor, so it is gone before the upstream call and on every early return.
async fn run_review(
    state: &AppState,
    kind: PromptKind,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<ReviewOutcome, AppError> {
    // 1. Validate
    let form = read_review_form(multipart).await?;
    let resume = form.resume.ok_or(AppError::MissingFile)?;
    let job_description = match form.job_description {
        Some(jd) => Some(jd),
        None if kind.requires_job_description() => return Err(AppError::MissingJobDescription),
        None => None,
    };
    if !resume.is_pdf() {
        return Err(AppError::UnsupportedMediaType);
    }

    // 2. Extract
    info!(
        "Processing PDF '{}' ({} bytes)",
        resume.file_name.as_deref().unwrap_or("unnamed"),
        resume.size()
    );
    let parse_started = Instant::now();
    let extracted = state.extractor.extract(resume.into_bytes()).await?;
    let pdf_parsing = parse_started.elapsed();

    let resume_text = extracted.trim();
    if resume_text.is_empty() {
        return Err(AppError::EmptyExtraction);
    }

    // 3. Normalize job description
    let job_description = job_description
        .as_deref()
        .map(str::trim)
        .filter(|jd| !jd.is_empty());
    if job_description.is_none() && kind.requires_job_description() {
        return Err(AppError::EmptyJobDescription);
    }

    // 4. Truncate
    let processed = truncate(resume_text, MAX_RESUME_CHARS);
    info!(
        "Extracted {} characters ({}ms). Processing {} chars for {}...",
        resume_text.chars().count(),
        pdf_parsing.as_millis(),
        processed.chars().count(),
        kind.label()
    );

    // 5. Generate
    let ai_started = Instant::now();
    let suggestions = state
        .llm
        .generate(kind, &processed, job_description)
        .await?
        .filter(|s| !s.trim().is_empty())
        .ok_or(AppError::NoSuggestions)?;
    let ai_generation = ai_started.elapsed();

    Ok(ReviewOutcome {
        suggestions,
        pdf_parsing,
        ai_generation,
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
