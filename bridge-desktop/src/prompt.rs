//! Interactive prompts

use async_trait::async_trait;
use bridge_traits::{
    error::{BridgeError, Result},
    prompt::Prompt,
};
use dialoguer::Input;
use tracing::debug;

/// Reads answers from the terminal with `dialoguer`
///
/// Empty answers are accepted and count as "yes".
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalPrompt;

impl TerminalPrompt {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Prompt for TerminalPrompt {
    async fn ask(&self, question: &str) -> Result<String> {
        let question = question.trim_end().to_string();

        let answer = tokio::task::spawn_blocking(move || {
            Input::<String>::new()
                .with_prompt(question)
                .allow_empty(true)
                .interact_text()
        })
        .await
        .map_err(|e| BridgeError::OperationFailed(format!("prompt task failed: {}", e)))?
        .map_err(|e| BridgeError::OperationFailed(format!("failed to read answer: {}", e)))?;

        debug!(answer = %answer, "Prompt answered");
        Ok(answer)
    }
}

/// Answers every question with "y"
#[derive(Debug, Default, Clone, Copy)]
pub struct AssumeYes;

#[async_trait]
impl Prompt for AssumeYes {
    async fn ask(&self, question: &str) -> Result<String> {
        debug!(question = question.trim_end(), "Assuming yes");
        Ok("y".to_string())
    }
}
