use std::sync::Arc;

use crate::budget::{BudgetManager, ToolBudgets};
use crate::config::Config;
use crate::llm_client::TextGenerator;
use crate::tools::ToolContext;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Text generation backend. Production: `GroqClient`.
    pub llm: Arc<dyn TextGenerator>,
    pub config: Config,
    /// Immutable budgeting rules (chars-per-token, truncation marker).
    pub budget: BudgetManager,
    /// Per-tool ceilings for the configured tier.
    pub limits: ToolBudgets,
}

impl AppState {
    pub fn new(llm: Arc<dyn TextGenerator>, config: Config) -> Self {
        let budget = BudgetManager::for_tier(config.chars_per_token, config.budget_tier);
        let limits = config.budget_tier.budgets();
        Self {
            llm,
            config,
            budget,
            limits,
        }
    }

    pub fn tools(&self) -> ToolContext<'_> {
        ToolContext {
            llm: self.llm.as_ref(),
            budget: &self.budget,
            limits: &self.limits,
        }
    }
}
