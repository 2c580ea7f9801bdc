//! Mock interview — generates role-specific questions, or grades one answer.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::llm_client::prompts::CAREER_ASSISTANT_SYSTEM;
use crate::llm_client::{CompletionRequest, STANDARD_MODEL};
use crate::tools::prompts::{
    INTERVIEW_FEEDBACK_PROMPT_TEMPLATE, INTERVIEW_QUESTIONS_PROMPT_TEMPLATE,
};
use crate::tools::{fill_template, non_blank, require_text, ToolContext};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterviewInput {
    pub role: Option<String>,
    pub job_description: Option<String>,
    pub question: Option<String>,
    pub answer: Option<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(untagged, rename_all_fields = "camelCase")]
pub enum InterviewOutput {
    Feedback {
        feedback: String,
    },
    Questions {
        questions: String,
        question_list: Vec<String>,
    },
}

/// Splits generated questions into one entry per non-empty line.
pub fn split_questions(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// With both `question` and `answer`, returns feedback on the answer;
/// otherwise generates a fresh question set for the role.
pub async fn mock_interview(
    ctx: ToolContext<'_>,
    input: InterviewInput,
) -> Result<InterviewOutput, AppError> {
    let role = require_text(input.role.as_deref(), "role")?;
    let limit = ctx.limits.interview_text_tokens;

    let (prompt, is_feedback) = match (
        non_blank(input.question.as_deref()),
        non_blank(input.answer.as_deref()),
    ) {
        (Some(question), Some(answer)) => {
            let answer = ctx.budget.truncate(answer, limit);
            let prompt = fill_template(
                INTERVIEW_FEEDBACK_PROMPT_TEMPLATE,
                &[("question", question), ("answer", &*answer), ("role", role)],
            );
            (prompt, true)
        }
        _ => {
            let job_section = non_blank(input.job_description.as_deref())
                .map(|jd| format!("Job: {}", ctx.budget.truncate(jd, limit)))
                .unwrap_or_default();
            let prompt = fill_template(
                INTERVIEW_QUESTIONS_PROMPT_TEMPLATE,
                &[("role", role), ("job_section", job_section.as_str())],
            );
            (prompt, false)
        }
    };

    let text = ctx
        .llm
        .generate(&CompletionRequest {
            model: STANDARD_MODEL,
            system: CAREER_ASSISTANT_SYSTEM,
            prompt: &prompt,
            max_tokens: ctx.limits.interview_completion_tokens,
            json_mode: false,
        })
        .await?;

    if is_feedback {
        return Ok(InterviewOutput::Feedback { feedback: text });
    }

    let question_list = split_questions(&text);
    info!("Generated {} interview questions for role '{}'", question_list.len(), role);

    Ok(InterviewOutput::Questions {
        questions: text,
        question_list,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::budget::{BudgetManager, BudgetTier};
    use crate::llm_client::testing::ScriptedGenerator;

    fn input(
        role: &str,
        jd: Option<&str>,
        question: Option<&str>,
        answer: Option<&str>,
    ) -> InterviewInput {
        InterviewInput {
            role: Some(role.to_string()),
            job_description: jd.map(str::to_string),
            question: question.map(str::to_string),
            answer: answer.map(str::to_string),
        }
    }

    #[test]
    fn test_split_questions_skips_blank_lines() {
        let text = "1. Why Rust?\n\n   2. Describe an outage.  \n\n";
        assert_eq!(
            split_questions(text),
            vec!["1. Why Rust?".to_string(), "2. Describe an outage.".to_string()]
        );
    }

    #[tokio::test]
    async fn test_questions_mode() {
        let llm = ScriptedGenerator::ok("Q1\nQ2\n\nQ3");
        let budget = BudgetManager::default();
        let limits = BudgetTier::Free.budgets();
        let ctx = ToolContext {
            llm: &llm,
            budget: &budget,
            limits: &limits,
        };

        let out = mock_interview(ctx, input("SRE", Some("On-call for Kafka"), None, None))
            .await
            .unwrap();

        match out {
            InterviewOutput::Questions { question_list, .. } => assert_eq!(question_list.len(), 3),
            other => panic!("expected questions, got {other:?}"),
        }

        let call = llm.last_call();
        assert!(call.prompt.contains("for SRE position"));
        assert!(call.prompt.contains("Job: On-call for Kafka"));
        assert_eq!(call.max_tokens, 600);
        assert_eq!(call.model, STANDARD_MODEL);
    }

    #[tokio::test]
    async fn test_feedback_mode_truncates_long_answer() {
        let llm = ScriptedGenerator::ok("Solid structure, add metrics.");
        let budget = BudgetManager::default();
        let limits = BudgetTier::Free.budgets();
        let ctx = ToolContext {
            llm: &llm,
            budget: &budget,
            limits: &limits,
        };

        let answer = "z".repeat(5000);
        let request = input("SRE", None, Some("Tell me about an outage"), Some(&answer));
        let out = mock_interview(ctx, request).await.unwrap();

        assert_eq!(
            out,
            InterviewOutput::Feedback {
                feedback: "Solid structure, add metrics.".to_string()
            }
        );
        let prompt = llm.last_call().prompt;
        assert!(prompt.contains(&"z".repeat(800 * 4 - 100)));
        assert!(!prompt.contains(&"z".repeat(800 * 4 - 99)));
    }

    #[tokio::test]
    async fn test_question_without_answer_falls_back_to_questions() {
        let llm = ScriptedGenerator::ok("Q1");
        let budget = BudgetManager::default();
        let limits = BudgetTier::Free.budgets();
        let ctx = ToolContext {
            llm: &llm,
            budget: &budget,
            limits: &limits,
        };

        let out = mock_interview(ctx, input("SRE", None, Some("Q"), Some("  "))).await.unwrap();
        assert!(matches!(out, InterviewOutput::Questions { .. }));
        assert!(!llm.last_call().prompt.contains("Job:"));
    }

    #[tokio::test]
    async fn test_role_is_required() {
        let llm = ScriptedGenerator::default();
        let budget = BudgetManager::default();
        let limits = BudgetTier::Free.budgets();
        let ctx = ToolContext {
            llm: &llm,
            budget: &budget,
            limits: &limits,
        };

        let err = mock_interview(ctx, input(" ", None, None, None)).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_questions_output_serializes_camel_case() {
        let out = InterviewOutput::Questions {
            questions: "Q1".to_string(),
            question_list: vec!["Q1".to_string()],
        };
        assert_eq!(
            serde_json::to_value(&out).unwrap(),
            serde_json::json!({"questions": "Q1", "questionList": ["Q1"]})
        );
    }
}
