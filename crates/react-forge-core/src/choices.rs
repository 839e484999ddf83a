//! Choice schema: the resolved answer set for one generation run
//!
//! Answers are collected into a [`ChoiceDraft`] one axis at a time. Each
//! merge goes through [`ChoiceDraft::apply`], which keeps the
//! framework-specific fields mutually exclusive. Once every axis is answered,
//! [`ChoiceDraft::finish`] produces an immutable [`ChoiceSchema`].

use crate::error::{Result, ScaffoldError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

macro_rules! choice_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $axis:literal {
            $( $variant:ident => $value:literal, $label:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $value)]
                $variant,
            )+
        }

        impl $name {
            /// Every supported value, in prompt order
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Schema key of this axis
            pub const AXIS: &'static str = $axis;

            /// Serialized value (flag and answers-file spelling)
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $value),+
                }
            }

            pub fn display_name(&self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = ScaffoldError;

            fn from_str(s: &str) -> Result<Self> {
                let needle = s.trim().to_ascii_lowercase();
                $name::ALL
                    .iter()
                    .copied()
                    .find(|v| v.as_str() == needle)
                    .ok_or_else(|| ScaffoldError::UnknownValue {
                        axis: $axis,
                        value: s.to_string(),
                        expected: $name::ALL
                            .iter()
                            .map(|v| v.as_str())
                            .collect::<Vec<_>>()
                            .join(", "),
                    })
            }
        }
    };
}

choice_enum! {
    /// Package manager used for install and script invocation
    PackageManager, "packageManager" {
        Npm => "npm", "npm",
        Yarn => "yarn", "Yarn",
    }
}

choice_enum! {
    /// Build tool or meta-framework
    Framework, "framework" {
        Vite => "vite", "Vite",
        NextJs => "nextjs", "Next.js",
    }
}

choice_enum! {
    /// Next.js routing mode
    NextRouter, "nextRouting" {
        App => "app", "App Router",
        Pages => "pages", "Pages Router",
    }
}

choice_enum! {
    /// Client-side routing for Vite projects
    Routing, "routing" {
        ReactRouter => "react-router", "React Router",
        None => "none", "No routing",
    }
}

choice_enum! {
    Styling, "styling" {
        Css => "css", "Plain CSS",
        Tailwind => "tailwind", "Tailwind CSS",
        StyledComponents => "styled-components", "styled-components",
    }
}

choice_enum! {
    StateManagement, "stateManagement" {
        Redux => "redux", "Redux Toolkit",
        Zustand => "zustand", "Zustand",
        None => "none", "None",
    }
}

choice_enum! {
    /// HTTP client and data-fetching strategy
    ApiClient, "api" {
        AxiosReactQuery => "axios-react-query", "Axios + React Query",
        AxiosOnly => "axios-only", "Axios",
        FetchReactQuery => "fetch-react-query", "Fetch + React Query",
        FetchOnly => "fetch-only", "Fetch",
        None => "none", "None",
    }
}

choice_enum! {
    Testing, "testing" {
        Vitest => "vitest", "Vitest",
        Jest => "jest", "Jest",
        None => "none", "None",
    }
}

choice_enum! {
    Deployment, "deployment" {
        Vercel => "vercel", "Vercel",
        Netlify => "netlify", "Netlify",
        None => "none", "None",
    }
}

impl PackageManager {
    /// Invocation form for a package.json script (`npm run build` vs `yarn build`)
    pub fn run_script(&self, script: &str) -> String {
        match self {
            PackageManager::Npm => format!("npm run {}", script),
            PackageManager::Yarn => format!("yarn {}", script),
        }
    }

    pub fn install_command(&self) -> &'static str {
        match self {
            PackageManager::Npm => "npm install",
            PackageManager::Yarn => "yarn",
        }
    }
}

impl ApiClient {
    pub fn uses_axios(&self) -> bool {
        matches!(self, ApiClient::AxiosReactQuery | ApiClient::AxiosOnly)
    }

    pub fn uses_react_query(&self) -> bool {
        matches!(self, ApiClient::AxiosReactQuery | ApiClient::FetchReactQuery)
    }
}

/// Framework together with the routing field that only exists for it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrameworkChoice {
    Vite { routing: Routing },
    NextJs { router: NextRouter },
}

impl FrameworkChoice {
    pub fn framework(&self) -> Framework {
        match self {
            FrameworkChoice::Vite { .. } => Framework::Vite,
            FrameworkChoice::NextJs { .. } => Framework::NextJs,
        }
    }
}

/// A complete, internally consistent set of scaffolding decisions
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ChoiceSchema {
    pub package_manager: PackageManager,
    pub framework: FrameworkChoice,
    pub typescript: bool,
    pub linting: bool,
    pub styling: Styling,
    pub state_management: StateManagement,
    pub api: ApiClient,
    pub testing: Testing,
    pub deployment: Deployment,
    pub init_git: bool,
    pub open_editor: bool,
}

impl ChoiceSchema {
    pub fn framework(&self) -> Framework {
        self.framework.framework()
    }

    pub fn is_vite(&self) -> bool {
        self.framework() == Framework::Vite
    }

    /// Vite routing; `None` for Next.js projects
    pub fn routing(&self) -> Option<Routing> {
        match self.framework {
            FrameworkChoice::Vite { routing } => Some(routing),
            FrameworkChoice::NextJs { .. } => None,
        }
    }

    /// Next.js router; `None` for Vite projects
    pub fn next_routing(&self) -> Option<NextRouter> {
        match self.framework {
            FrameworkChoice::NextJs { router } => Some(router),
            FrameworkChoice::Vite { .. } => None,
        }
    }

    /// Extension for plain modules (`ts` / `js`)
    pub fn script_ext(&self) -> &'static str {
        if self.typescript {
            "ts"
        } else {
            "js"
        }
    }

    /// Extension for modules containing JSX (`tsx` / `jsx`)
    pub fn component_ext(&self) -> &'static str {
        if self.typescript {
            "tsx"
        } else {
            "jsx"
        }
    }

    /// Flatten back into draft form, e.g. for saving an answers file
    pub fn to_draft(&self) -> ChoiceDraft {
        ChoiceDraft {
            package_manager: Some(self.package_manager),
            framework: Some(self.framework()),
            next_routing: self.next_routing(),
            routing: self.routing(),
            typescript: Some(self.typescript),
            linting: Some(self.linting),
            styling: Some(self.styling),
            state_management: Some(self.state_management),
            api: Some(self.api),
            testing: Some(self.testing),
            deployment: Some(self.deployment),
            init_git: Some(self.init_git),
            open_editor: Some(self.open_editor),
        }
    }
}

/// Identifies one field of the schema
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnswerKey {
    PackageManager,
    Framework,
    NextRouting,
    Routing,
    TypeScript,
    Linting,
    Styling,
    StateManagement,
    Api,
    Testing,
    Deployment,
    InitGit,
    OpenEditor,
}

/// A single-field delta produced by one wizard step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Answer {
    PackageManager(PackageManager),
    Framework(Framework),
    NextRouting(NextRouter),
    Routing(Routing),
    TypeScript(bool),
    Linting(bool),
    Styling(Styling),
    StateManagement(StateManagement),
    Api(ApiClient),
    Testing(Testing),
    Deployment(Deployment),
    InitGit(bool),
    OpenEditor(bool),
}

impl Answer {
    pub fn key(&self) -> AnswerKey {
        match self {
            Answer::PackageManager(_) => AnswerKey::PackageManager,
            Answer::Framework(_) => AnswerKey::Framework,
            Answer::NextRouting(_) => AnswerKey::NextRouting,
            Answer::Routing(_) => AnswerKey::Routing,
            Answer::TypeScript(_) => AnswerKey::TypeScript,
            Answer::Linting(_) => AnswerKey::Linting,
            Answer::Styling(_) => AnswerKey::Styling,
            Answer::StateManagement(_) => AnswerKey::StateManagement,
            Answer::Api(_) => AnswerKey::Api,
            Answer::Testing(_) => AnswerKey::Testing,
            Answer::Deployment(_) => AnswerKey::Deployment,
            Answer::InitGit(_) => AnswerKey::InitGit,
            Answer::OpenEditor(_) => AnswerKey::OpenEditor,
        }
    }
}

/// Partially answered schema, as accumulated by the wizard or loaded from
/// flags and an answers file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ChoiceDraft {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package_manager: Option<PackageManager>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub framework: Option<Framework>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_routing: Option<NextRouter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub routing: Option<Routing>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub typescript: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linting: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub styling: Option<Styling>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state_management: Option<StateManagement>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api: Option<ApiClient>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub testing: Option<Testing>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deployment: Option<Deployment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub init_git: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub open_editor: Option<bool>,
}

impl ChoiceDraft {
    /// Parse an answers file (YAML or JSON, both are valid YAML)
    pub fn from_yaml(content: &str) -> Result<Self> {
        let draft: ChoiceDraft =
            serde_yaml::from_str(content).map_err(|source| ScaffoldError::Parse {
                what: "answers file".to_string(),
                source,
            })?;
        draft.validate()?;
        Ok(draft)
    }

    /// Merge one answer, returning the updated draft.
    ///
    /// Choosing a framework drops the other framework's routing field. Setting a
    /// routing field that belongs to the other framework is an error.
    pub fn apply(mut self, answer: Answer) -> Result<Self> {
        match answer {
            Answer::PackageManager(v) => self.package_manager = Some(v),
            Answer::Framework(v) => {
                self.framework = Some(v);
                match v {
                    Framework::Vite => self.next_routing = None,
                    Framework::NextJs => self.routing = None,
                }
            }
            Answer::NextRouting(v) => {
                if self.framework == Some(Framework::Vite) {
                    return Err(ScaffoldError::ConflictingFields {
                        field: NextRouter::AXIS,
                        framework: Framework::Vite.as_str(),
                    });
                }
                self.next_routing = Some(v);
            }
            Answer::Routing(v) => {
                if self.framework == Some(Framework::NextJs) {
                    return Err(ScaffoldError::ConflictingFields {
                        field: Routing::AXIS,
                        framework: Framework::NextJs.as_str(),
                    });
                }
                self.routing = Some(v);
            }
            Answer::TypeScript(v) => self.typescript = Some(v),
            Answer::Linting(v) => self.linting = Some(v),
            Answer::Styling(v) => self.styling = Some(v),
            Answer::StateManagement(v) => self.state_management = Some(v),
            Answer::Api(v) => self.api = Some(v),
            Answer::Testing(v) => self.testing = Some(v),
            Answer::Deployment(v) => self.deployment = Some(v),
            Answer::InitGit(v) => self.init_git = Some(v),
            Answer::OpenEditor(v) => self.open_editor = Some(v),
        }
        Ok(self)
    }

    /// Overlay every field set in `other` onto this draft
    pub fn overlay(self, other: &ChoiceDraft) -> Result<Self> {
        let mut merged = self;
        for answer in other.answers() {
            merged = merged.apply(answer)?;
        }
        merged.validate()?;
        Ok(merged)
    }

    /// Answers present in this draft, framework first so routing fields
    /// are checked against it
    pub fn answers(&self) -> Vec<Answer> {
        let mut answers = Vec::new();
        if let Some(v) = self.framework {
            answers.push(Answer::Framework(v));
        }
        if let Some(v) = self.package_manager {
            answers.push(Answer::PackageManager(v));
        }
        if let Some(v) = self.next_routing {
            answers.push(Answer::NextRouting(v));
        }
        if let Some(v) = self.routing {
            answers.push(Answer::Routing(v));
        }
        if let Some(v) = self.typescript {
            answers.push(Answer::TypeScript(v));
        }
        if let Some(v) = self.linting {
            answers.push(Answer::Linting(v));
        }
        if let Some(v) = self.styling {
            answers.push(Answer::Styling(v));
        }
        if let Some(v) = self.state_management {
            answers.push(Answer::StateManagement(v));
        }
        if let Some(v) = self.api {
            answers.push(Answer::Api(v));
        }
        if let Some(v) = self.testing {
            answers.push(Answer::Testing(v));
        }
        if let Some(v) = self.deployment {
            answers.push(Answer::Deployment(v));
        }
        if let Some(v) = self.init_git {
            answers.push(Answer::InitGit(v));
        }
        if let Some(v) = self.open_editor {
            answers.push(Answer::OpenEditor(v));
        }
        answers
    }

    pub fn has(&self, key: AnswerKey) -> bool {
        match key {
            AnswerKey::PackageManager => self.package_manager.is_some(),
            AnswerKey::Framework => self.framework.is_some(),
            AnswerKey::NextRouting => self.next_routing.is_some(),
            AnswerKey::Routing => self.routing.is_some(),
            AnswerKey::TypeScript => self.typescript.is_some(),
            AnswerKey::Linting => self.linting.is_some(),
            AnswerKey::Styling => self.styling.is_some(),
            AnswerKey::StateManagement => self.state_management.is_some(),
            AnswerKey::Api => self.api.is_some(),
            AnswerKey::Testing => self.testing.is_some(),
            AnswerKey::Deployment => self.deployment.is_some(),
            AnswerKey::InitGit => self.init_git.is_some(),
            AnswerKey::OpenEditor => self.open_editor.is_some(),
        }
    }

    pub fn clear(&mut self, key: AnswerKey) {
        match key {
            AnswerKey::PackageManager => self.package_manager = None,
            AnswerKey::Framework => self.framework = None,
            AnswerKey::NextRouting => self.next_routing = None,
            AnswerKey::Routing => self.routing = None,
            AnswerKey::TypeScript => self.typescript = None,
            AnswerKey::Linting => self.linting = None,
            AnswerKey::Styling => self.styling = None,
            AnswerKey::StateManagement => self.state_management = None,
            AnswerKey::Api => self.api = None,
            AnswerKey::Testing => self.testing = None,
            AnswerKey::Deployment => self.deployment = None,
            AnswerKey::InitGit => self.init_git = None,
            AnswerKey::OpenEditor => self.open_editor = None,
        }
    }

    /// Reject drafts carrying routing fields of both frameworks, or a
    /// routing field that contradicts the chosen framework
    pub fn validate(&self) -> Result<()> {
        match (self.framework, self.routing, self.next_routing) {
            (Some(Framework::Vite), _, Some(_)) => Err(ScaffoldError::ConflictingFields {
                field: NextRouter::AXIS,
                framework: Framework::Vite.as_str(),
            }),
            (Some(Framework::NextJs), Some(_), _) => Err(ScaffoldError::ConflictingFields {
                field: Routing::AXIS,
                framework: Framework::NextJs.as_str(),
            }),
            (None, Some(_), Some(_)) => Err(ScaffoldError::ConflictingFields {
                field: NextRouter::AXIS,
                framework: Framework::Vite.as_str(),
            }),
            _ => Ok(()),
        }
    }

    /// Turn a fully answered draft into a [`ChoiceSchema`]
    pub fn finish(&self) -> Result<ChoiceSchema> {
        self.validate()?;

        fn required<T: Copy>(value: Option<T>, key: &'static str) -> Result<T> {
            value.ok_or(ScaffoldError::MissingAnswer(key))
        }

        let framework = match required(self.framework, Framework::AXIS)? {
            Framework::Vite => FrameworkChoice::Vite {
                routing: required(self.routing, Routing::AXIS)?,
            },
            Framework::NextJs => FrameworkChoice::NextJs {
                router: required(self.next_routing, NextRouter::AXIS)?,
            },
        };

        Ok(ChoiceSchema {
            package_manager: required(self.package_manager, PackageManager::AXIS)?,
            framework,
            typescript: required(self.typescript, "typescript")?,
            linting: required(self.linting, "linting")?,
            styling: required(self.styling, Styling::AXIS)?,
            state_management: required(self.state_management, StateManagement::AXIS)?,
            api: required(self.api, ApiClient::AXIS)?,
            testing: required(self.testing, Testing::AXIS)?,
            deployment: required(self.deployment, Deployment::AXIS)?,
            init_git: required(self.init_git, "initGit")?,
            open_editor: required(self.open_editor, "openEditor")?,
        })
    }
}
