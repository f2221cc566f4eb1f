//! Axum route handlers for the comparison API.

use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::Deserialize;
use tracing::{debug, info};

use crate::errors::AppError;
use crate::extraction::extract_text;
use crate::matching::report::{compare_documents, CompareResponse, MatchReport};
use crate::state::AppState;

const RESUME_FIELD: &str = "resume";
const JOB_FIELD: &str = "job_description";

// ────────────────────────────────────────────────────────────────────────────
// Request types
// ────────────────────────────────────────────────────────────────────────────

/// Both fields are required; a missing field is rejected by the JSON extractor.
#[derive(Debug, Deserialize)]
pub struct CompareTextRequest {
    pub resume_text: String,
    pub job_text: String,
}

/// One uploaded file, still undecoded.
#[derive(Debug)]
struct UploadedDocument {
    filename: String,
    bytes: Vec<u8>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /compare (and /compare/)
///
/// Multipart upload with `resume` and `job_description` files. Each file is turned
/// into text first, then scored and checked for missing requirements.
pub async fn handle_compare_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<CompareResponse>, AppError> {
    let mut resume = None;
    let mut job = None;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        if name != RESUME_FIELD && name != JOB_FIELD {
            debug!("Ignoring unexpected multipart field '{name}'");
            continue;
        }

        let filename = field.file_name().unwrap_or(name.as_str()).to_string();
        let bytes = field.bytes().await?.to_vec();
        let document = UploadedDocument { filename, bytes };

        if name == RESUME_FIELD {
            resume = Some(document);
        } else {
            job = Some(document);
        }
    }

    let resume = resume.ok_or_else(|| missing_field(RESUME_FIELD))?;
    let job = job.ok_or_else(|| missing_field(JOB_FIELD))?;

    info!(
        resume = %resume.filename,
        job_description = %job.filename,
        "Comparing uploaded documents"
    );

    let resume_text = extract_document(resume).await?;
    let job_text = extract_document(job).await?;

    let report = compare_documents(
        state.scorer.as_ref(),
        &state.matcher,
        &resume_text,
        &job_text,
    );

    Ok(Json(report.into()))
}

/// POST /api/v1/compare
///
/// Same comparison over text that was already extracted by the caller.
pub async fn handle_compare_text(
    State(state): State<AppState>,
    Json(request): Json<CompareTextRequest>,
) -> Result<Json<CompareResponse>, AppError> {
    let report = compare_documents(
        state.scorer.as_ref(),
        &state.matcher,
        &request.resume_text,
        &request.job_text,
    );

    Ok(Json(report.into()))
}

/// POST /api/v1/compare/details
///
/// Full report for pre-extracted text: raw score, missing and matched
/// requirements, and the scorer backend that produced the score.
pub async fn handle_compare_details(
    State(state): State<AppState>,
    Json(request): Json<CompareTextRequest>,
) -> Result<Json<MatchReport>, AppError> {
    let report = compare_documents(
        state.scorer.as_ref(),
        &state.matcher,
        &request.resume_text,
        &request.job_text,
    );

    Ok(Json(report))
}

fn missing_field(field: &str) -> AppError {
    AppError::Validation(format!("Missing file field '{field}'"))
}

/// PDF parsing is CPU-bound and may panic on hostile input, so it runs on the blocking pool.
async fn extract_document(document: UploadedDocument) -> Result<String, AppError> {
    let UploadedDocument { filename, bytes } = document;
    let label = filename.clone();

    let text = tokio::task::spawn_blocking(move || extract_text(&bytes, &filename))
        .await
        .map_err(|e| {
            if e.is_panic() {
                AppError::UnprocessableEntity(format!("Could not read document '{label}'"))
            } else {
                AppError::Internal(anyhow::anyhow!("spawn_blocking failed in extraction: {e}"))
            }
        })??;

    Ok(text)
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
