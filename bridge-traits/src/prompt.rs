//! Interactive Confirmation Abstractions
//!
//! The core asks three questions during a run ("show files?", "start sync?",
//! "continue past errors?"). A [`Prompt`] returns the raw answer and
//! [`Answer::parse`] maps it to the decision the core acts on.

use async_trait::async_trait;

use crate::error::Result;

/// Decision derived from a raw prompt answer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Answer {
    /// Anything that is not `n` or `s`, including an empty answer
    Yes,
    /// `n` or `N`
    No,
    /// `s` or `S`: continue, but list the affected files first
    Show,
}

impl Answer {
    /// Interpret a raw answer. Surrounding whitespace is ignored.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "n" => Self::No,
            "s" => Self::Show,
            _ => Self::Yes,
        }
    }

    /// Check if the answer declines the question
    pub fn is_no(&self) -> bool {
        matches!(self, Self::No)
    }
}

/// Confirmation prompt trait
///
/// # Example
///
/// ```ignore
/// use bridge_traits::prompt::{Answer, Prompt};
///
/// async fn confirm(prompt: &dyn Prompt) -> Result<bool> {
///     let raw = prompt.ask("Start Sync? [Y/n] ").await?;
///     Ok(!Answer::parse(&raw).is_no())
/// }
/// ```
#[async_trait]
pub trait Prompt: Send + Sync {
    /// Ask a question and return the user's answer verbatim
    async fn ask(&self, question: &str) -> Result<String>;
}
