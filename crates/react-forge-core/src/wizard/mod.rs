//! Selection wizard
//!
//! - `step` - the step table (ids, choices, parsing, successors)
//! - `navigator` - the [`Session`] state machine with back navigation
//! - `prompter` - the [`Prompter`] seam; terminal prompts live in `tui`

pub mod navigator;
pub mod prompter;
pub mod step;

use crate::choices::{ChoiceDraft, ChoiceSchema, PackageManager};

pub use navigator::Session;
pub use prompter::{AcceptDefaults, PromptReply, Prompter, StepPrompt};
pub use step::{steps, Selection, Step, StepChoice, StepContext, StepId};

/// How a wizard run ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardOutcome {
    Completed(ChoiceSchema),
    Cancelled,
}

/// Run the default step table with `prompter`
pub fn run(
    preset: ChoiceDraft,
    package_managers: Vec<PackageManager>,
    prompter: &mut dyn Prompter,
) -> anyhow::Result<WizardOutcome> {
    Session::new(steps(), preset, package_managers)?.run(prompter)
}
