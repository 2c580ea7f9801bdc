//! Input Budget Manager — sizes user text against a token budget before it is
//! placed into a prompt, truncating proportionally when the budget is exceeded.
//!
//! Token counts are estimated, not tokenized: one token is `chars_per_token`
//! characters (4 by default). Lengths are measured in Unicode scalar values and
//! truncation never splits a character.
//!
//! Everything here is pure and synchronous. A `BudgetManager` is immutable once
//! built, so one instance can be shared across all request handlers.

pub mod tier;

use std::borrow::Cow;

use serde::Serialize;

pub use tier::{BudgetTier, ToolBudgets};

pub const DEFAULT_CHARS_PER_TOKEN: usize = 4;
/// Characters held back from the kept prefix so the marker has room.
pub const DEFAULT_MARKER_RESERVE: usize = 100;
pub const DEFAULT_MARKER: &str = "\n\n[Content truncated...]";

/// Result of checking one or two text blocks against a budget.
///
/// When `valid` is true the caller sends the original texts verbatim.
/// When false it must send `adjusted_primary` / `adjusted_secondary` instead
/// and may surface `message` to the user as a non-fatal warning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetVerdict {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub adjusted_primary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub adjusted_secondary: Option<String>,
    pub total_tokens: usize,
}

impl BudgetVerdict {
    /// The primary text to send downstream.
    pub fn primary<'a>(&'a self, original: &'a str) -> &'a str {
        self.adjusted_primary.as_deref().unwrap_or(original)
    }

    /// The secondary text to send downstream, if there is one.
    pub fn secondary<'a>(&'a self, original: Option<&'a str>) -> Option<&'a str> {
        self.adjusted_secondary.as_deref().or(original)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BudgetManager {
    chars_per_token: usize,
    marker_reserve: usize,
    marker: String,
}

impl Default for BudgetManager {
    fn default() -> Self {
        Self {
            chars_per_token: DEFAULT_CHARS_PER_TOKEN,
            marker_reserve: DEFAULT_MARKER_RESERVE,
            marker: DEFAULT_MARKER.to_string(),
        }
    }
}

impl BudgetManager {
    /// `chars_per_token` of zero is treated as one.
    pub fn new(chars_per_token: usize, marker: impl Into<String>) -> Self {
        Self {
            chars_per_token: chars_per_token.max(1),
            marker_reserve: DEFAULT_MARKER_RESERVE,
            marker: marker.into(),
        }
    }

    pub fn for_tier(chars_per_token: usize, tier: BudgetTier) -> Self {
        Self::new(chars_per_token, tier.marker())
    }

    pub fn chars_per_token(&self) -> usize {
        self.chars_per_token
    }

    /// Approximate token count: `ceil(chars / chars_per_token)`.
    pub fn estimate_size(&self, text: &str) -> usize {
        text.chars().count().div_ceil(self.chars_per_token)
    }

    /// Returns `text` untouched when it fits in `max_tokens`, otherwise its first
    /// `max_tokens * chars_per_token - reserve` characters followed by the marker.
    ///
    /// The marker is a small, fixed overrun of the budget: the estimated size of
    /// the result is at most `max_tokens + ceil(marker_len / chars_per_token)`.
    pub fn truncate<'a>(&self, text: &'a str, max_tokens: usize) -> Cow<'a, str> {
        if self.estimate_size(text) <= max_tokens {
            return Cow::Borrowed(text);
        }

        let max_chars = max_tokens.saturating_mul(self.chars_per_token);
        let keep = max_chars.saturating_sub(self.marker_reserve);

        let mut truncated = String::with_capacity(keep + self.marker.len());
        truncated.push_str(char_prefix(text, keep));
        truncated.push_str(&self.marker);
        Cow::Owned(truncated)
    }

    /// Checks `primary` (+ optional `secondary`) against `budget` tokens.
    ///
    /// Over budget, each block is truncated to its proportional share
    /// `floor(budget * size / total)`, so a short block is barely touched while an
    /// oversized one absorbs most of the cut.
    pub fn evaluate(&self, primary: &str, secondary: Option<&str>, budget: usize) -> BudgetVerdict {
        let primary_tokens = self.estimate_size(primary);
        let secondary_tokens = secondary.map_or(0, |s| self.estimate_size(s));
        let total_tokens = primary_tokens + secondary_tokens;

        if total_tokens <= budget {
            return BudgetVerdict {
                valid: true,
                message: None,
                adjusted_primary: None,
                adjusted_secondary: None,
                total_tokens,
            };
        }

        let (primary_budget, secondary_budget) =
            split_budget(budget, primary_tokens, secondary_tokens);

        tracing::debug!(
            total_tokens,
            budget,
            primary_budget,
            secondary_budget,
            "input over budget, truncating proportionally"
        );

        BudgetVerdict {
            valid: false,
            message: Some(format!(
                "Input too large ({total_tokens} tokens). Content has been automatically truncated to fit within limits."
            )),
            adjusted_primary: Some(self.truncate(primary, primary_budget).into_owned()),
            adjusted_secondary: secondary
                .map(|s| self.truncate(s, secondary_budget).into_owned()),
            total_tokens,
        }
    }
}

/// Splits `budget` between two blocks in proportion to their sizes, rounding each
/// share down so the shares never sum past `budget`.
pub fn split_budget(budget: usize, size_a: usize, size_b: usize) -> (usize, usize) {
    let total = size_a as u128 + size_b as u128;
    if total == 0 {
        return (0, 0);
    }
    let share = |size: usize| (budget as u128 * size as u128 / total) as usize;
    (share(size_a), share(size_b))
}

/// Clips `text` to `max_chars` characters and appends `suffix` when anything was cut.
pub fn clip_chars<'a>(text: &'a str, max_chars: usize, suffix: &str) -> Cow<'a, str> {
    let prefix = char_prefix(text, max_chars);
    if prefix.len() == text.len() {
        Cow::Borrowed(text)
    } else {
        Cow::Owned(format!("{prefix}{suffix}"))
    }
}

/// The first `n` characters of `text` (all of it if shorter).
fn char_prefix(text: &str, n: usize) -> &str {
    match text.char_indices().nth(n) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
