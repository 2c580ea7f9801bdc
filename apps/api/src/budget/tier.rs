use std::str::FromStr;

use serde::Serialize;

/// Token ceilings for one model tier.
///
/// Input budgets are in estimated tokens and sized to leave room for the prompt
/// template and the completion. Completion limits are passed to the provider as
/// `max_tokens`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ToolBudgets {
    /// Resume text fed to the portfolio generator.
    pub portfolio_resume_tokens: usize,
    /// Serialized questionnaire answers, in characters.
    pub portfolio_answers_chars: usize,
    /// Combined resume + job description for cover letter, analysis and enhancement.
    pub paired_input_tokens: usize,
    /// Interview answer or job description in the mock interview.
    pub interview_text_tokens: usize,

    pub portfolio_completion_tokens: u32,
    pub cover_letter_completion_tokens: u32,
    pub analysis_completion_tokens: u32,
    pub enhance_completion_tokens: u32,
    pub interview_completion_tokens: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetTier {
    /// Conservative limits for rate-limited free API keys.
    #[default]
    Free,
    Standard,
}

impl BudgetTier {
    pub fn budgets(self) -> ToolBudgets {
        match self {
            BudgetTier::Free => ToolBudgets {
                portfolio_resume_tokens: 1500,
                portfolio_answers_chars: 6000,
                paired_input_tokens: 2000,
                interview_text_tokens: 800,
                portfolio_completion_tokens: 2000,
                cover_letter_completion_tokens: 800,
                analysis_completion_tokens: 800,
                enhance_completion_tokens: 1200,
                interview_completion_tokens: 600,
            },
            BudgetTier::Standard => ToolBudgets {
                portfolio_resume_tokens: 4000,
                portfolio_answers_chars: 16_000,
                paired_input_tokens: 3000,
                interview_text_tokens: 2000,
                portfolio_completion_tokens: 4000,
                cover_letter_completion_tokens: 1500,
                analysis_completion_tokens: 1500,
                enhance_completion_tokens: 2500,
                interview_completion_tokens: 1000,
            },
        }
    }

    pub fn marker(self) -> &'static str {
        match self {
            BudgetTier::Free => "\n\n[Content truncated...]",
            BudgetTier::Standard => "\n\n[Content truncated due to length...]",
        }
    }
}

impl FromStr for BudgetTier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "free" => Ok(BudgetTier::Free),
            "standard" => Ok(BudgetTier::Standard),
            other => Err(format!("unknown budget tier '{other}' (expected 'free' or 'standard')")),
        }
    }
}
