// Career tools: portfolio, cover letter, resume analysis/enhancement, mock interview,
// plus the static job search and file intake helpers.
// Every LLM-bound text passes through the budget manager before prompt assembly.

pub mod cover_letter;
pub mod files;
pub mod handlers;
pub mod interview;
pub mod job_search;
pub mod portfolio;
pub mod prompts;
pub mod resume;

use crate::budget::{BudgetManager, ToolBudgets};
use crate::errors::AppError;
use crate::llm_client::TextGenerator;

/// Everything a tool needs for one request, borrowed from `AppState`.
#[derive(Clone, Copy)]
pub struct ToolContext<'a> {
    pub llm: &'a dyn TextGenerator,
    pub budget: &'a BudgetManager,
    pub limits: &'a ToolBudgets,
}

/// Substitutes `{key}` placeholders in a single pass, so text inserted for one
/// key is never re-scanned for another.
pub fn fill_template(template: &str, vars: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let tail = &rest[start + 1..];
        let matched = vars
            .iter()
            .find(|(key, _)| tail.starts_with(key) && tail[key.len()..].starts_with('}'));
        match matched {
            Some((key, value)) => {
                out.push_str(value);
                rest = &tail[key.len() + 1..];
            }
            None => {
                out.push('{');
                rest = tail;
            }
        }
    }

    out.push_str(rest);
    out
}

/// Rejects missing or whitespace-only required fields.
pub(crate) fn require_text<'a>(value: Option<&'a str>, field: &str) -> Result<&'a str, AppError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(AppError::Validation(format!("{field} cannot be empty"))),
    }
}

/// Treats whitespace-only optional fields as absent.
pub(crate) fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
