//! React Forge Core - resolution and generation for React front-end projects
//!
//! Turns a set of scaffolding choices into a ready-to-run project: the
//! dependency manifest, `package.json`, configuration files and application
//! sources. The `create-react-forge` binary is a thin shell around it.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! - **Layer 1: Pure pipeline** - [`choices`] → [`resolver`] → [`config`] and
//!   [`content`], with versions from the [`catalog`]
//! - **Layer 2: Orchestration** - the [`wizard`] state machine, [`project`]
//!   planning and writing, [`runtime`] detection
//! - **Layer 3: CLI/TUI Interface** - Optional cliclack-based prompts (feature-gated)
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based TUI prompts module
//!
//! # Example Usage (without TUI)
//!
//! ```ignore
//! use react_forge_core::{plan, wizard, ChoiceDraft, ProjectOptions, VersionCatalog};
//!
//! let outcome = wizard::run(ChoiceDraft::default(), vec![], &mut wizard::AcceptDefaults)?;
//! if let wizard::WizardOutcome::Completed(schema) = outcome {
//!     let catalog = VersionCatalog::embedded()?;
//!     let plan = plan(&schema, &catalog, &ProjectOptions::new("my-app"))?;
//!     react_forge_core::project::write_project(&plan, "my-app".as_ref(), false).await?;
//! }
//! ```

pub mod catalog;
pub mod choices;
pub mod config;
pub mod content;
pub mod error;
pub mod files;
pub mod layout;
pub mod project;
pub mod resolver;
pub mod runtime;
pub mod wizard;

#[cfg(feature = "tui")]
pub mod tui;

#[cfg(test)]
mod test_support;

// Re-export main types for convenience
pub use catalog::VersionCatalog;
pub use choices::{ChoiceDraft, ChoiceSchema};
pub use config::ProjectOptions;
pub use error::{ScaffoldError, Warning, WarningKind};
pub use project::{plan, ProjectPlan};
pub use resolver::{resolve, PackageManifest};
pub use wizard::WizardOutcome;

#[cfg(feature = "tui")]
pub use tui::run;

/// CLI version - used for catalog compatibility checking
/// Each binary should define its own version, but this provides a fallback
pub const DEFAULT_CLI_VERSION: &str = "0.1.0";
