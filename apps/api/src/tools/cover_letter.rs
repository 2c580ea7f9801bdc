//! Cover letter generator.

use serde::Serialize;

use crate::errors::AppError;
use crate::llm_client::prompts::{truncation_note, CAREER_ASSISTANT_SYSTEM};
use crate::llm_client::{CompletionRequest, LARGE_MODEL};
use crate::tools::prompts::COVER_LETTER_PROMPT_TEMPLATE;
use crate::tools::resume::ResumeJobInput;
use crate::tools::{fill_template, ToolContext};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverLetterOutput {
    pub cover_letter: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

pub async fn generate_cover_letter(
    ctx: ToolContext<'_>,
    input: ResumeJobInput,
) -> Result<CoverLetterOutput, AppError> {
    let pair = input.budgeted(&ctx)?;
    let note = truncation_note(pair.warning.as_deref());
    let prompt = fill_template(
        COVER_LETTER_PROMPT_TEMPLATE,
        &[
            ("resume", pair.resume.as_str()),
            ("job_description", pair.job_description.as_str()),
            ("note", note.as_str()),
        ],
    );

    let cover_letter = ctx
        .llm
        .generate(&CompletionRequest {
            model: LARGE_MODEL,
            system: CAREER_ASSISTANT_SYSTEM,
            prompt: &prompt,
            max_tokens: ctx.limits.cover_letter_completion_tokens,
            json_mode: false,
        })
        .await?;

    Ok(CoverLetterOutput {
        cover_letter,
        warning: pair.warning,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::budget::{BudgetManager, BudgetTier};
    use crate::llm_client::testing::ScriptedGenerator;
    use crate::llm_client::LlmError;

    fn input(resume: &str, jd: &str) -> ResumeJobInput {
        ResumeJobInput {
            resume: Some(resume.to_string()),
            job_description: Some(jd.to_string()),
        }
    }

    #[tokio::test]
    async fn test_cover_letter_uses_original_text_when_within_budget() {
        let llm = ScriptedGenerator::ok("Dear hiring manager,");
        let budget = BudgetManager::default();
        let limits = BudgetTier::Free.budgets();
        let ctx = ToolContext {
            llm: &llm,
            budget: &budget,
            limits: &limits,
        };

        let request = input("Backend engineer, 6 years", "Rust platform role");
        let out = generate_cover_letter(ctx, request).await.unwrap();

        assert_eq!(out.cover_letter, "Dear hiring manager,");
        assert!(out.warning.is_none());

        let call = llm.last_call();
        assert!(call.prompt.contains("RESUME: Backend engineer, 6 years"));
        assert!(call.prompt.contains("JOB: Rust platform role"));
        assert!(!call.prompt.contains("Note:"));
        assert_eq!(call.max_tokens, 800);
        assert!(!call.json_mode);
    }

    #[tokio::test]
    async fn test_cover_letter_provider_rejection_surfaces_as_input_too_large() {
        let llm = ScriptedGenerator::replying([Err(LlmError::Api {
            status: 413,
            message: "Request too large for model".to_string(),
        })]);
        let budget = BudgetManager::default();
        let limits = BudgetTier::Free.budgets();
        let ctx = ToolContext {
            llm: &llm,
            budget: &budget,
            limits: &limits,
        };

        let err = generate_cover_letter(ctx, input("resume", "jd")).await.unwrap_err();
        assert!(matches!(err, AppError::InputTooLarge(_)));
    }

    #[test]
    fn test_output_serializes_warning_when_present() {
        let out = CoverLetterOutput {
            cover_letter: "Hi".to_string(),
            warning: Some("cut".to_string()),
        };
        assert_eq!(
            serde_json::to_value(&out).unwrap(),
            serde_json::json!({"coverLetter": "Hi", "warning": "cut"})
        );
    }
}
