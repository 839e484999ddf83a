//! Prompt seam between the navigator and a terminal (or a script)

use super::step::{StepChoice, StepId};

/// Everything a prompter needs to render one step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepPrompt {
    pub step: StepId,
    pub title: &'static str,
    /// 1-based position among the steps shown on this path
    pub ordinal: usize,
    pub total: usize,
    pub choices: Vec<StepChoice>,
    /// Value selected when the prompt opens
    pub initial: &'static str,
    /// Whether a "go back" choice should be offered
    pub allow_back: bool,
}

impl StepPrompt {
    /// Title with its `ordinal/total` prefix
    pub fn heading(&self) -> String {
        format!("[{}/{}] {}", self.ordinal, self.total, self.title)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptReply {
    Selected(String),
    Back,
    /// Ctrl+C or escape at the prompt
    Interrupted,
}

pub trait Prompter {
    fn prompt(&mut self, prompt: &StepPrompt) -> anyhow::Result<PromptReply>;
}

/// Accepts every initial selection; drives `--yes` runs
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptDefaults;

impl Prompter for AcceptDefaults {
    fn prompt(&mut self, prompt: &StepPrompt) -> anyhow::Result<PromptReply> {
        tracing::debug!(step = %prompt.step, value = prompt.initial, "accepting default");
        Ok(PromptReply::Selected(prompt.initial.to_string()))
    }
}
