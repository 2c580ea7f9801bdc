//! Axum route handlers for the career tools.

use axum::{
    extract::{Multipart, State},
    response::{IntoResponse, Response},
    Json,
};
use serde::{de::DeserializeOwned, Deserialize};
use serde_json::Value;
use tracing::{info, Instrument};
use uuid::Uuid;

use crate::budget::BudgetVerdict;
use crate::errors::AppError;
use crate::state::AppState;
use crate::tools::cover_letter::generate_cover_letter;
use crate::tools::files::{extract_text, ExtractedText, UploadedFile};
use crate::tools::interview::mock_interview;
use crate::tools::job_search::{search_jobs, JobSearchQuery, JobSearchResponse};
use crate::tools::portfolio::generate_portfolio;
use crate::tools::resume::{analyze_resume, enhance_resume};

// ────────────────────────────────────────────────────────────────────────────
// Request types
// ────────────────────────────────────────────────────────────────────────────

/// Envelope for every AI tool call: `{ "action": "...", "data": { ... } }`.
#[derive(Debug, Deserialize)]
pub struct AiRequest {
    pub action: Option<String>,
    pub data: Option<Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetEvaluateRequest {
    pub primary: String,
    pub secondary: Option<String>,
    /// Negative values are treated as a zero budget.
    pub budget_tokens: i64,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/ai
///
/// Dispatches to one of the five generation tools by `action`.
pub async fn handle_ai(
    State(state): State<AppState>,
    Json(request): Json<AiRequest>,
) -> Result<Response, AppError> {
    if !state.config.ai_configured() {
        return Err(AppError::NotConfigured);
    }

    let (Some(action), Some(data)) = (request.action, request.data) else {
        return Err(AppError::Validation("Missing required parameters".to_string()));
    };

    let span = tracing::info_span!("ai_request", request_id = %Uuid::new_v4(), action = %action);
    async move {
        info!("Processing AI request: {action}");
        let ctx = state.tools();

        let response = match action.as_str() {
            "generate-portfolio" => {
                Json(generate_portfolio(ctx, parse_data(data)?).await?).into_response()
            }
            "generate-cover-letter" => {
                Json(generate_cover_letter(ctx, parse_data(data)?).await?).into_response()
            }
            "analyze-resume" => {
                Json(analyze_resume(ctx, parse_data(data)?).await?).into_response()
            }
            "enhance-resume" => {
                Json(enhance_resume(ctx, parse_data(data)?).await?).into_response()
            }
            "mock-interview" => {
                Json(mock_interview(ctx, parse_data(data)?).await?).into_response()
            }
            _ => return Err(AppError::InvalidAction(action)),
        };

        Ok::<_, AppError>(response)
    }
    .instrument(span)
    .await
}

/// POST /api/v1/budget/evaluate
///
/// Runs the budget check without calling the model, so clients can preview
/// whether and how their input will be truncated.
pub async fn handle_budget_evaluate(
    State(state): State<AppState>,
    Json(request): Json<BudgetEvaluateRequest>,
) -> Json<BudgetVerdict> {
    let budget = usize::try_from(request.budget_tokens.max(0)).unwrap_or(usize::MAX);
    Json(
        state
            .budget
            .evaluate(&request.primary, request.secondary.as_deref(), budget),
    )
}

/// POST /api/v1/jobs/search
pub async fn handle_job_search(Json(query): Json<JobSearchQuery>) -> Json<JobSearchResponse> {
    let response = search_jobs(&query);
    info!("Job search matched {} listings", response.total);
    Json(response)
}

/// POST /api/v1/files/extract
///
/// Accepts a multipart upload with a `file` field and returns its text.
pub async fn handle_file_extract(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ExtractedText>, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Failed to read upload: {e}")))?;

        let extracted = extract_text(
            UploadedFile {
                file_name,
                content_type,
                data,
            },
            state.config.max_upload_bytes,
            &state.budget,
        )?;
        info!(
            "Extracted {} chars (~{} tokens) from upload",
            extracted.text.chars().count(),
            extracted.estimated_tokens
        );
        return Ok(Json(extracted));
    }

    Err(AppError::Validation("Missing 'file' field".to_string()))
}

fn parse_data<T: DeserializeOwned>(data: Value) -> Result<T, AppError> {
    serde_json::from_value(data).map_err(|e| AppError::Validation(format!("Invalid data: {e}")))
}
