//! Wizard state machine
//!
//! A [`Session`] owns the step table, the answer draft and the navigation
//! history. Hidden and pre-seeded steps are passed through with
//! [`Selection::Skip`] and never enter the history, so going back always
//! lands on a step the operator actually saw.

use super::prompter::{PromptReply, Prompter, StepPrompt};
use super::step::{Selection, Step, StepContext, StepId};
use super::WizardOutcome;
use crate::choices::{ChoiceDraft, PackageManager};
use crate::error::{Result, ScaffoldError};

pub struct Session {
    steps: Vec<Step>,
    package_managers: Vec<PackageManager>,
    preset: ChoiceDraft,
    draft: ChoiceDraft,
    history: Vec<StepId>,
    current: StepId,
}

impl Session {
    /// Start a session at the first step of `steps`.
    ///
    /// `preset` answers (flags, answers file) are merged up front; their
    /// steps are never prompted.
    pub fn new(
        steps: Vec<Step>,
        preset: ChoiceDraft,
        package_managers: Vec<PackageManager>,
    ) -> Result<Self> {
        let draft = ChoiceDraft::default().overlay(&preset)?;
        let current = steps.first().map_or(StepId::Complete, |s| s.id);
        Ok(Self {
            steps,
            package_managers,
            preset,
            draft,
            history: Vec::new(),
            current,
        })
    }

    pub fn current(&self) -> StepId {
        self.current
    }

    pub fn history(&self) -> &[StepId] {
        &self.history
    }

    pub fn answers(&self) -> &ChoiceDraft {
        &self.draft
    }

    fn lookup(&self, id: StepId) -> Result<&Step> {
        self.steps
            .iter()
            .find(|s| s.id == id)
            .ok_or_else(|| ScaffoldError::UnknownStep(id.to_string()))
    }

    fn position(&self, id: StepId) -> Option<usize> {
        self.steps.iter().position(|s| s.id == id)
    }

    /// A preset step counts as answered only while the draft still holds
    /// its value; a framework switch can drop it.
    fn is_visible(&self, step: &Step) -> bool {
        let answered = self.preset.has(step.key) && self.draft.has(step.key);
        !answered && step.should_show.map_or(true, |show| show(&self.draft))
    }

    /// Advance past hidden steps and describe the next one to prompt.
    /// Returns `None` once the wizard is complete.
    pub fn resolve_visible(&mut self) -> Result<Option<StepPrompt>> {
        while self.current != StepId::Complete {
            let step = self.lookup(self.current)?;
            if self.is_visible(step) {
                return Ok(Some(self.describe(step)));
            }
            tracing::trace!(step = %step.id, "skipping step");
            self.current = (step.next)(Selection::Skip, &self.draft);
        }
        Ok(None)
    }

    fn describe(&self, step: &Step) -> StepPrompt {
        let ctx = StepContext {
            draft: &self.draft,
            package_managers: &self.package_managers,
        };
        let choices = (step.choices)(&ctx);
        let offered = |value: &str| choices.iter().any(|c| c.value == value);

        let initial = (step.current)(&self.draft)
            .or_else(|| (step.current)(&self.preset))
            .filter(|v| offered(*v))
            .or_else(|| offered(step.default).then_some(step.default))
            .or_else(|| choices.first().map(|c| c.value))
            .unwrap_or(step.default);

        let total = self.steps.iter().filter(|s| self.is_visible(s)).count();

        StepPrompt {
            step: step.id,
            title: step.title,
            ordinal: self.history.len() + 1,
            total: total.max(self.history.len() + 1),
            choices,
            initial,
            allow_back: !self.history.is_empty(),
        }
    }

    /// Record a value for the current step and move forward.
    ///
    /// Changing an earlier answer clears every non-preset answer of the
    /// steps after it; re-selecting the same value keeps them.
    pub fn select(&mut self, value: &str) -> Result<()> {
        let step = self.lookup(self.current)?;
        let answer = (step.parse)(value)?;
        let previous = (step.current)(&self.draft);
        let mut draft = self.draft.clone().apply(answer)?;
        let changed = previous.is_some() && (step.current)(&draft) != previous;

        let id = step.id;
        let next = step.next;
        for key in self.preset.answers().iter().map(|a| a.key()) {
            if self.draft.has(key) && !draft.has(key) {
                tracing::warn!(
                    step = %id,
                    answer = ?key,
                    "preset answer does not apply to this choice and was dropped"
                );
            }
        }
        if changed {
            if let Some(index) = self.position(id) {
                for later in &self.steps[index + 1..] {
                    if !self.preset.has(later.key) {
                        draft.clear(later.key);
                    }
                }
            }
            tracing::debug!(step = %id, "answer changed, cleared later answers");
        }

        self.draft = draft;
        self.history.push(id);
        self.current = next(Selection::Value(answer), &self.draft);
        Ok(())
    }

    /// Return to the most recently answered step (the first step when
    /// nothing has been answered). Answers are kept.
    pub fn go_back(&mut self) {
        self.current = match self.history.pop() {
            Some(previous) => previous,
            None => self.steps.first().map_or(StepId::Complete, |s| s.id),
        };
    }

    /// Drive the session to completion with `prompter`
    pub fn run(mut self, prompter: &mut dyn Prompter) -> anyhow::Result<WizardOutcome> {
        while let Some(prompt) = self.resolve_visible()? {
            match prompter.prompt(&prompt)? {
                PromptReply::Selected(value) => self.select(&value)?,
                PromptReply::Back => self.go_back(),
                PromptReply::Interrupted => {
                    tracing::debug!(step = %prompt.step, "wizard interrupted");
                    return Ok(WizardOutcome::Cancelled);
                }
            }
        }
        Ok(WizardOutcome::Completed(self.draft.finish()?))
    }
}
