//! Resume analyzer and enhancer, plus the resume + job description input shared
//! with the cover letter generator.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::budget::BudgetVerdict;
use crate::errors::AppError;
use crate::llm_client::prompts::{truncation_note, CAREER_ASSISTANT_SYSTEM, JSON_ONLY_SYSTEM};
use crate::llm_client::{generate_json, CompletionRequest, LlmError, LARGE_MODEL};
use crate::tools::prompts::{ANALYSIS_PROMPT_TEMPLATE, ENHANCE_PROMPT_TEMPLATE};
use crate::tools::{fill_template, require_text, ToolContext};

/// Resume and target job description, as sent by the cover letter, analyzer and
/// enhancer tools.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeJobInput {
    pub resume: Option<String>,
    pub job_description: Option<String>,
}

/// Budget-checked resume and job description ready for prompt assembly.
#[derive(Debug, Clone)]
pub struct BudgetedPair {
    pub resume: String,
    pub job_description: String,
    /// Set when the inputs were truncated.
    pub warning: Option<String>,
}

impl ResumeJobInput {
    /// Validates both fields and fits them into the paired-input budget.
    pub fn budgeted(&self, ctx: &ToolContext<'_>) -> Result<BudgetedPair, AppError> {
        let resume = require_text(self.resume.as_deref(), "resume")?;
        let job_description = require_text(self.job_description.as_deref(), "jobDescription")?;

        let verdict: BudgetVerdict = ctx.budget.evaluate(
            resume,
            Some(job_description),
            ctx.limits.paired_input_tokens,
        );

        if !verdict.valid {
            warn!(
                "Resume + job description over budget ({} > {} tokens), truncated",
                verdict.total_tokens, ctx.limits.paired_input_tokens
            );
        }

        Ok(BudgetedPair {
            resume: verdict.primary(resume).to_string(),
            job_description: verdict
                .secondary(Some(job_description))
                .unwrap_or(job_description)
                .to_string(),
            warning: verdict.message.clone(),
        })
    }
}

/// Structured ATS-style analysis returned by the model.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ResumeAnalysis {
    pub ats_score: u8,
    pub strengths: Vec<String>,
    pub improvements: Vec<String>,
    pub missing_keywords: Vec<String>,
    pub recommendations: Vec<String>,
}

impl ResumeAnalysis {
    fn validate(self) -> Result<Self, LlmError> {
        if self.ats_score > 100 {
            return Err(LlmError::Schema(format!(
                "atsScore must be between 0 and 100, got {}",
                self.ats_score
            )));
        }
        Ok(self)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AnalysisOutput {
    pub analysis: ResumeAnalysis,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnhanceOutput {
    pub enhanced_resume: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

pub async fn analyze_resume(
    ctx: ToolContext<'_>,
    input: ResumeJobInput,
) -> Result<AnalysisOutput, AppError> {
    let pair = input.budgeted(&ctx)?;
    let prompt = fill_template(
        ANALYSIS_PROMPT_TEMPLATE,
        &[
            ("resume", pair.resume.as_str()),
            ("job_description", pair.job_description.as_str()),
        ],
    );

    let analysis: ResumeAnalysis = generate_json(
        ctx.llm,
        &CompletionRequest {
            model: LARGE_MODEL,
            system: JSON_ONLY_SYSTEM,
            prompt: &prompt,
            max_tokens: ctx.limits.analysis_completion_tokens,
            json_mode: true,
        },
    )
    .await
    .and_then(ResumeAnalysis::validate)?;

    info!("Resume analyzed: atsScore={}", analysis.ats_score);

    Ok(AnalysisOutput {
        analysis,
        warning: pair.warning,
    })
}

pub async fn enhance_resume(
    ctx: ToolContext<'_>,
    input: ResumeJobInput,
) -> Result<EnhanceOutput, AppError> {
    let pair = input.budgeted(&ctx)?;
    let note = truncation_note(pair.warning.as_deref());
    let prompt = fill_template(
        ENHANCE_PROMPT_TEMPLATE,
        &[
            ("resume", pair.resume.as_str()),
            ("job_description", pair.job_description.as_str()),
            ("note", note.as_str()),
        ],
    );

    let enhanced_resume = ctx
        .llm
        .generate(&CompletionRequest {
            model: LARGE_MODEL,
            system: CAREER_ASSISTANT_SYSTEM,
            prompt: &prompt,
            max_tokens: ctx.limits.enhance_completion_tokens,
            json_mode: false,
        })
        .await?;

    Ok(EnhanceOutput {
        enhanced_resume,
        warning: pair.warning,
    })
}
