//! Portfolio generator — turns a resume or questionnaire answers into a
//! self-contained HTML page.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use crate::budget::clip_chars;
use crate::errors::AppError;
use crate::llm_client::prompts::CAREER_ASSISTANT_SYSTEM;
use crate::llm_client::{strip_code_fences, CompletionRequest, LARGE_MODEL};
use crate::tools::prompts::PORTFOLIO_PROMPT_TEMPLATE;
use crate::tools::{fill_template, non_blank, ToolContext};

#[derive(Debug, Clone, Deserialize)]
pub struct PortfolioInput {
    pub resume: Option<String>,
    /// Free-form questionnaire answers, used when no resume is supplied.
    pub answers: Option<Value>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PortfolioOutput {
    pub portfolio: String,
}

/// Resolves the text the portfolio prompt is built from.
/// A non-blank resume wins; answers are serialized to JSON and clipped.
pub fn portfolio_source(ctx: &ToolContext<'_>, input: &PortfolioInput) -> Result<String, AppError> {
    if let Some(resume) = non_blank(input.resume.as_deref()) {
        return Ok(ctx
            .budget
            .truncate(resume, ctx.limits.portfolio_resume_tokens)
            .into_owned());
    }

    match &input.answers {
        Some(answers) if !answers.is_null() => {
            let serialized = serde_json::to_string(answers).map_err(|e| {
                AppError::Internal(anyhow::anyhow!("Failed to serialize answers: {e}"))
            })?;
            Ok(clip_chars(&serialized, ctx.limits.portfolio_answers_chars, "...").into_owned())
        }
        _ => Err(AppError::Validation(
            "Provide either a resume or questionnaire answers".to_string(),
        )),
    }
}

pub async fn generate_portfolio(
    ctx: ToolContext<'_>,
    input: PortfolioInput,
) -> Result<PortfolioOutput, AppError> {
    let input_text = portfolio_source(&ctx, &input)?;
    let prompt = fill_template(PORTFOLIO_PROMPT_TEMPLATE, &[("input_text", input_text.as_str())]);

    let html = ctx
        .llm
        .generate(&CompletionRequest {
            model: LARGE_MODEL,
            system: CAREER_ASSISTANT_SYSTEM,
            prompt: &prompt,
            max_tokens: ctx.limits.portfolio_completion_tokens,
            json_mode: false,
        })
        .await?;

    info!("Generated portfolio ({} chars)", html.chars().count());

    Ok(PortfolioOutput {
        portfolio: strip_code_fences(&html).to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::budget::{BudgetManager, BudgetTier};
    use crate::llm_client::testing::ScriptedGenerator;
    use serde_json::json;

    fn input(resume: Option<&str>, answers: Option<Value>) -> PortfolioInput {
        PortfolioInput {
            resume: resume.map(str::to_string),
            answers,
        }
    }

    #[tokio::test]
    async fn test_resume_is_truncated_to_portfolio_budget() {
        let llm = ScriptedGenerator::ok("<html></html>");
        let budget = BudgetManager::for_tier(4, BudgetTier::Free);
        let limits = BudgetTier::Free.budgets();
        let ctx = ToolContext {
            llm: &llm,
            budget: &budget,
            limits: &limits,
        };

        let resume = "r".repeat(10_000);
        let out = generate_portfolio(ctx, input(Some(&resume), None)).await.unwrap();
        assert_eq!(out.portfolio, "<html></html>");

        let call = llm.last_call();
        assert_eq!(call.max_tokens, 2000);
        assert!(call.prompt.contains(&"r".repeat(1500 * 4 - 100)));
        assert!(!call.prompt.contains(&"r".repeat(1500 * 4 - 99)));
        assert!(call.prompt.contains(BudgetTier::Free.marker()));
    }

    #[tokio::test]
    async fn test_html_fences_are_stripped() {
        let llm = ScriptedGenerator::ok("```html\n<html>hi</html>\n```");
        let budget = BudgetManager::default();
        let limits = BudgetTier::Free.budgets();
        let ctx = ToolContext {
            llm: &llm,
            budget: &budget,
            limits: &limits,
        };
        let out = generate_portfolio(ctx, input(Some("Jane Doe, engineer"), None))
            .await
            .unwrap();
        assert_eq!(out.portfolio, "<html>hi</html>");
    }

    #[test]
    fn test_answers_used_when_resume_blank() {
        let llm = ScriptedGenerator::default();
        let budget = BudgetManager::default();
        let limits = BudgetTier::Free.budgets();
        let ctx = ToolContext {
            llm: &llm,
            budget: &budget,
            limits: &limits,
        };
        let request = input(Some("  "), Some(json!({"name": "Ada"})));
        let source = portfolio_source(&ctx, &request).unwrap();
        assert_eq!(source, r#"{"name":"Ada"}"#);
    }

    #[test]
    fn test_long_answers_are_clipped() {
        let llm = ScriptedGenerator::default();
        let budget = BudgetManager::default();
        let limits = BudgetTier::Free.budgets();
        let ctx = ToolContext {
            llm: &llm,
            budget: &budget,
            limits: &limits,
        };
        let answers = json!({"bio": "x".repeat(7000)});
        let source = portfolio_source(&ctx, &input(None, Some(answers))).unwrap();
        assert_eq!(source.chars().count(), 6000 + 3);
        assert!(source.ends_with("..."));
    }

    #[test]
    fn test_no_input_is_rejected() {
        let llm = ScriptedGenerator::default();
        let budget = BudgetManager::default();
        let limits = BudgetTier::Free.budgets();
        let ctx = ToolContext {
            llm: &llm,
            budget: &budget,
            limits: &limits,
        };
        assert!(matches!(
            portfolio_source(&ctx, &input(None, None)),
            Err(AppError::Validation(_))
        ));
    }
}
