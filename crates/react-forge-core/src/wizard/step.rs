//! Wizard step table
//!
//! Each step collects one schema field. Steps are plain data with function
//! pointers for their choices, parsing and successor, so the table can be
//! inspected and reordered in tests.

use crate::choices::{
    Answer, AnswerKey, ApiClient, ChoiceDraft, Deployment, Framework, NextRouter, PackageManager,
    Routing, StateManagement, Styling, Testing,
};
use crate::error::{Result, ScaffoldError};
use std::fmt;

/// Wizard state identifiers, in visitation order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StepId {
    PackageManager,
    Framework,
    NextjsOptions,
    Routing,
    Language,
    CodeQuality,
    Styling,
    StateManagement,
    Api,
    Testing,
    Deployment,
    Git,
    Editor,
    Complete,
}

impl StepId {
    pub fn as_str(&self) -> &'static str {
        match self {
            StepId::PackageManager => "packageManager",
            StepId::Framework => "framework",
            StepId::NextjsOptions => "nextjsOptions",
            StepId::Routing => "routing",
            StepId::Language => "language",
            StepId::CodeQuality => "codeQuality",
            StepId::Styling => "styling",
            StepId::StateManagement => "stateManagement",
            StepId::Api => "api",
            StepId::Testing => "testing",
            StepId::Deployment => "deployment",
            StepId::Git => "git",
            StepId::Editor => "editor",
            StepId::Complete => "complete",
        }
    }
}

impl fmt::Display for StepId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One selectable option of a step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepChoice {
    pub value: &'static str,
    pub label: &'static str,
    pub hint: &'static str,
}

impl StepChoice {
    pub const fn new(value: &'static str, label: &'static str, hint: &'static str) -> Self {
        Self { value, label, hint }
    }
}

/// Inputs a step's choice generator may depend on
#[derive(Debug, Clone, Copy)]
pub struct StepContext<'a> {
    pub draft: &'a ChoiceDraft,
    /// Package managers detected on this machine; empty when none were found
    pub package_managers: &'a [PackageManager],
}

/// What the operator did at a step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    Value(Answer),
    /// The step was not shown (hidden or pre-seeded)
    Skip,
}

pub struct Step {
    pub id: StepId,
    pub title: &'static str,
    pub key: AnswerKey,
    pub choices: fn(&StepContext) -> Vec<StepChoice>,
    pub default: &'static str,
    pub parse: fn(&str) -> Result<Answer>,
    /// Value already recorded for this step, if any
    pub current: fn(&ChoiceDraft) -> Option<&'static str>,
    pub next: fn(Selection, &ChoiceDraft) -> StepId,
    pub should_show: Option<fn(&ChoiceDraft) -> bool>,
}

impl fmt::Debug for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Step")
            .field("id", &self.id)
            .field("key", &self.key)
            .finish()
    }
}

fn yes_no(value: &str) -> Result<bool> {
    match value {
        "yes" => Ok(true),
        "no" => Ok(false),
        other => Err(ScaffoldError::UnknownValue {
            axis: "confirmation",
            value: other.to_string(),
            expected: "yes, no".to_string(),
        }),
    }
}

fn yes_no_str(value: Option<bool>) -> Option<&'static str> {
    value.map(|v| if v { "yes" } else { "no" })
}

/// Choices for one enum axis, labelled with display names
macro_rules! enum_choices {
    ($ty:ty) => {
        |_| {
            <$ty>::ALL
                .iter()
                .map(|v| StepChoice::new(v.as_str(), v.display_name(), ""))
                .collect()
        }
    };
}

fn package_manager_choices(ctx: &StepContext) -> Vec<StepChoice> {
    let offered: &[PackageManager] = if ctx.package_managers.is_empty() {
        PackageManager::ALL
    } else {
        ctx.package_managers
    };
    offered
        .iter()
        .map(|pm| StepChoice::new(pm.as_str(), pm.display_name(), ""))
        .collect()
}

fn is_nextjs(draft: &ChoiceDraft) -> bool {
    draft.framework == Some(Framework::NextJs)
}

fn is_vite(draft: &ChoiceDraft) -> bool {
    draft.framework == Some(Framework::Vite)
}

fn after_framework(selection: Selection, draft: &ChoiceDraft) -> StepId {
    let framework = match selection {
        Selection::Value(Answer::Framework(framework)) => Some(framework),
        _ => draft.framework,
    };
    match framework {
        Some(Framework::NextJs) => StepId::NextjsOptions,
        _ => StepId::Routing,
    }
}

/// The default step table
pub fn steps() -> Vec<Step> {
    vec![
        Step {
            id: StepId::PackageManager,
            title: "Which package manager do you want to use?",
            key: AnswerKey::PackageManager,
            choices: package_manager_choices,
            default: PackageManager::Npm.as_str(),
            parse: |v| Ok(Answer::PackageManager(v.parse()?)),
            current: |d| d.package_manager.map(|v| v.as_str()),
            next: |_, _| StepId::Framework,
            should_show: None,
        },
        Step {
            id: StepId::Framework,
            title: "Which framework do you want to use?",
            key: AnswerKey::Framework,
            choices: |_| {
                vec![
                    StepChoice::new("vite", "Vite", "Fast single-page app"),
                    StepChoice::new("nextjs", "Next.js", "Full-stack React framework"),
                ]
            },
            default: Framework::Vite.as_str(),
            parse: |v| Ok(Answer::Framework(v.parse()?)),
            current: |d| d.framework.map(|v| v.as_str()),
            next: after_framework,
            should_show: None,
        },
        Step {
            id: StepId::NextjsOptions,
            title: "Which Next.js router do you want to use?",
            key: AnswerKey::NextRouting,
            choices: |_| {
                vec![
                    StepChoice::new("app", "App Router", "Recommended"),
                    StepChoice::new("pages", "Pages Router", "Classic"),
                ]
            },
            default: NextRouter::App.as_str(),
            parse: |v| Ok(Answer::NextRouting(v.parse()?)),
            current: |d| d.next_routing.map(|v| v.as_str()),
            next: |_, _| StepId::Language,
            should_show: Some(is_nextjs),
        },
        Step {
            id: StepId::Routing,
            title: "Do you want client-side routing?",
            key: AnswerKey::Routing,
            choices: enum_choices!(Routing),
            default: Routing::ReactRouter.as_str(),
            parse: |v| Ok(Answer::Routing(v.parse()?)),
            current: |d| d.routing.map(|v| v.as_str()),
            next: |_, _| StepId::Language,
            should_show: Some(is_vite),
        },
        Step {
            id: StepId::Language,
            title: "Which language do you want to use?",
            key: AnswerKey::TypeScript,
            choices: |_| {
                vec![
                    StepChoice::new("typescript", "TypeScript", ""),
                    StepChoice::new("javascript", "JavaScript", ""),
                ]
            },
            default: "typescript",
            parse: |v| match v {
                "typescript" => Ok(Answer::TypeScript(true)),
                "javascript" => Ok(Answer::TypeScript(false)),
                other => Err(ScaffoldError::UnknownValue {
                    axis: "language",
                    value: other.to_string(),
                    expected: "typescript, javascript".to_string(),
                }),
            },
            current: |d| {
                d.typescript
                    .map(|ts| if ts { "typescript" } else { "javascript" })
            },
            next: |_, _| StepId::CodeQuality,
            should_show: None,
        },
        Step {
            id: StepId::CodeQuality,
            title: "Set up ESLint?",
            key: AnswerKey::Linting,
            choices: |_| {
                vec![
                    StepChoice::new("yes", "Yes", "Recommended"),
                    StepChoice::new("no", "No", ""),
                ]
            },
            default: "yes",
            parse: |v| Ok(Answer::Linting(yes_no(v)?)),
            current: |d| yes_no_str(d.linting),
            next: |_, _| StepId::Styling,
            should_show: None,
        },
        Step {
            id: StepId::Styling,
            title: "How do you want to style your app?",
            key: AnswerKey::Styling,
            choices: enum_choices!(Styling),
            default: Styling::Tailwind.as_str(),
            parse: |v| Ok(Answer::Styling(v.parse()?)),
            current: |d| d.styling.map(|v| v.as_str()),
            next: |_, _| StepId::StateManagement,
            should_show: None,
        },
        Step {
            id: StepId::StateManagement,
            title: "Which state management library?",
            key: AnswerKey::StateManagement,
            choices: enum_choices!(StateManagement),
            default: StateManagement::None.as_str(),
            parse: |v| Ok(Answer::StateManagement(v.parse()?)),
            current: |d| d.state_management.map(|v| v.as_str()),
            next: |_, _| StepId::Api,
            should_show: None,
        },
        Step {
            id: StepId::Api,
            title: "How will you fetch data?",
            key: AnswerKey::Api,
            choices: enum_choices!(ApiClient),
            default: ApiClient::None.as_str(),
            parse: |v| Ok(Answer::Api(v.parse()?)),
            current: |d| d.api.map(|v| v.as_str()),
            next: |_, _| StepId::Testing,
            should_show: None,
        },
        Step {
            id: StepId::Testing,
            title: "Which test framework?",
            key: AnswerKey::Testing,
            choices: enum_choices!(Testing),
            default: Testing::Vitest.as_str(),
            parse: |v| Ok(Answer::Testing(v.parse()?)),
            current: |d| d.testing.map(|v| v.as_str()),
            next: |_, _| StepId::Deployment,
            should_show: None,
        },
        Step {
            id: StepId::Deployment,
            title: "Where will you deploy?",
            key: AnswerKey::Deployment,
            choices: enum_choices!(Deployment),
            default: Deployment::None.as_str(),
            parse: |v| Ok(Answer::Deployment(v.parse()?)),
            current: |d| d.deployment.map(|v| v.as_str()),
            next: |_, _| StepId::Git,
            should_show: None,
        },
        Step {
            id: StepId::Git,
            title: "Initialize a git repository?",
            key: AnswerKey::InitGit,
            choices: |_| {
                vec![
                    StepChoice::new("yes", "Yes", ""),
                    StepChoice::new("no", "No", ""),
                ]
            },
            default: "yes",
            parse: |v| Ok(Answer::InitGit(yes_no(v)?)),
            current: |d| yes_no_str(d.init_git),
            next: |_, _| StepId::Editor,
            should_show: None,
        },
        Step {
            id: StepId::Editor,
            title: "Open the project in your editor when done?",
            key: AnswerKey::OpenEditor,
            choices: |_| {
                vec![
                    StepChoice::new("yes", "Yes", ""),
                    StepChoice::new("no", "No", ""),
                ]
            },
            default: "no",
            parse: |v| Ok(Answer::OpenEditor(yes_no(v)?)),
            current: |d| yes_no_str(d.open_editor),
            next: |_, _| StepId::Complete,
            should_show: None,
        },
    ]
}
