//! Project plan assembly and writing
//!
//! [`plan`] runs the resolver, configuration builder and content generator
//! for one schema and checks the result hangs together. Nothing touches the
//! filesystem until [`write_project`].

use crate::catalog::VersionCatalog;
use crate::choices::ChoiceSchema;
use crate::config::{self, ProjectOptions, ScriptTable};
use crate::content;
use crate::error::{Result, Warning};
use crate::files::{verify_references, ConfigFileSet, SourceFileSet};
use crate::resolver::{self, PackageManifest};
use anyhow::Context;
use colored::Colorize;
use std::path::Path;
use tokio::fs;

pub const PACKAGE_JSON: &str = "package.json";

/// Everything needed to write one project
#[derive(Debug, Clone)]
pub struct ProjectPlan {
    pub schema: ChoiceSchema,
    pub manifest: PackageManifest,
    pub package_json: String,
    pub scripts: ScriptTable,
    pub config_files: ConfigFileSet,
    pub source_files: SourceFileSet,
    pub warnings: Vec<Warning>,
}

impl ProjectPlan {
    /// Every relative path the plan writes, sorted
    pub fn paths(&self) -> Vec<&str> {
        let mut paths: Vec<&str> = std::iter::once(PACKAGE_JSON)
            .chain(self.config_files.paths())
            .chain(self.source_files.paths())
            .collect();
        paths.sort_unstable();
        paths
    }

    /// Body of a planned file, package.json included
    pub fn file(&self, path: &str) -> Option<&str> {
        if path == PACKAGE_JSON {
            return Some(&self.package_json);
        }
        self.config_files
            .get(path)
            .or_else(|| self.source_files.get(path))
    }

    pub fn file_count(&self) -> usize {
        1 + self.config_files.len() + self.source_files.len()
    }
}

/// Build the full plan for a schema. Fails before anything is written.
pub fn plan(
    schema: &ChoiceSchema,
    catalog: &VersionCatalog,
    options: &ProjectOptions,
) -> Result<ProjectPlan> {
    let manifest = resolver::resolve(schema, catalog)?;
    let built = config::build(schema, &manifest, options)?;
    let source_files = content::generate(schema);

    verify_references(&[&built.files, &source_files])?;

    let mut warnings = resolver::check(schema);
    warnings.extend(built.warnings);

    tracing::info!(
        framework = %schema.framework(),
        dependencies = manifest.dependencies.len(),
        dev_dependencies = manifest.dev_dependencies.len(),
        files = 1 + built.files.len() + source_files.len(),
        warnings = warnings.len(),
        "planned project"
    );

    Ok(ProjectPlan {
        schema: schema.clone(),
        manifest,
        package_json: built.package_json,
        scripts: built.scripts,
        config_files: built.files,
        source_files,
        warnings,
    })
}

async fn is_empty_dir(dir: &Path) -> anyhow::Result<bool> {
    let mut entries = fs::read_dir(dir)
        .await
        .with_context(|| format!("Failed to read directory: {}", dir.display()))?;
    Ok(entries.next_entry().await?.is_none())
}

/// Write every planned file under `target_dir`, creating parent directories.
///
/// Refuses a non-empty directory unless `force` is set. Returns the written
/// paths.
pub async fn write_project(
    plan: &ProjectPlan,
    target_dir: &Path,
    force: bool,
) -> anyhow::Result<Vec<String>> {
    if target_dir.exists() && !force && !is_empty_dir(target_dir).await? {
        anyhow::bail!(
            "Directory {} is not empty (use --force to write anyway)",
            target_dir.display()
        );
    }

    fs::create_dir_all(target_dir)
        .await
        .context("Failed to create target directory")?;

    let mut written = Vec::new();
    for path in plan.paths() {
        let Some(body) = plan.file(path) else {
            continue;
        };
        let target_path = target_dir.join(path);
        if let Some(parent) = target_path.parent() {
            fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
        fs::write(&target_path, body)
            .await
            .with_context(|| format!("Failed to write file: {}", target_path.display()))?;
        written.push(path.to_string());
    }

    tracing::debug!(count = written.len(), dir = %target_dir.display(), "wrote project");
    Ok(written)
}

/// Human-readable listing of a plan: manifest, files and warnings
pub fn summary(plan: &ProjectPlan) -> String {
    let mut out = String::new();
    let mut section = |title: &str, rows: Vec<String>| {
        if rows.is_empty() {
            return;
        }
        out.push_str(&format!("{}\n", title.bold()));
        for row in rows {
            out.push_str(&format!("  {}\n", row));
        }
    };

    let packages = |map: &std::collections::BTreeMap<String, String>| {
        map.iter()
            .map(|(name, range)| format!("{} {}", name, range.dimmed()))
            .collect::<Vec<_>>()
    };

    section("Dependencies", packages(&plan.manifest.dependencies));
    section("Dev dependencies", packages(&plan.manifest.dev_dependencies));
    section(
        &format!("Files ({})", plan.file_count()),
        plan.paths().into_iter().map(String::from).collect(),
    );
    section(
        "Warnings",
        plan.warnings
            .iter()
            .map(|w| format!("{} {}", "!".yellow(), w))
            .collect(),
    );
    out
}

/// Commands the operator runs after generation. Install, git and editor are
/// printed, never executed.
pub fn next_steps(schema: &ChoiceSchema, dir: &Path, cwd: &Path) -> Vec<String> {
    let pm = schema.package_manager;
    let mut steps = Vec::new();

    if dir != cwd {
        let shown = dir.strip_prefix(cwd).unwrap_or(dir);
        steps.push(format!("cd {}", shown.display()));
    }
    steps.push(pm.install_command().to_string());
    if schema.init_git {
        steps.push("git init && git add -A && git commit -m \"Initial commit\"".to_string());
    }
    if schema.open_editor {
        steps.push("code .".to_string());
    }
    steps.push(pm.run_script("dev"));
    steps
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::choices::{PackageManager, StateManagement, Styling, Testing};
    use crate::error::WarningKind;
    use crate::test_support::{matrix, vite_schema};

    fn catalog() -> VersionCatalog {
        VersionCatalog::embedded().unwrap()
    }

    #[test]
    fn test_plan_includes_package_json_and_sources() {
        let plan = plan(&vite_schema(), &catalog(), &ProjectOptions::new("demo")).unwrap();
        let paths = plan.paths();
        assert!(paths.contains(&"package.json"));
        assert!(paths.contains(&"index.html"));
        assert!(paths.contains(&"src/main.jsx"));
        assert_eq!(paths.len(), plan.file_count());
        assert!(plan.file("package.json").unwrap().contains("\"name\": \"demo\""));
    }

    #[test]
    fn test_every_combination_is_referentially_complete() {
        let catalog = catalog();
        let options = ProjectOptions::new("matrix-app");
        for schema in matrix() {
            if let Err(err) = plan(&schema, &catalog, &options) {
                panic!("{:?}: {}", schema, err);
            }
        }
    }

    #[test]
    fn test_plan_collects_resolver_and_builder_warnings() {
        let schema = ChoiceSchema {
            typescript: true,
            linting: false,
            testing: Testing::Jest,
            styling: Styling::Tailwind,
            state_management: StateManagement::Zustand,
            ..vite_schema()
        };
        let plan = plan(&schema, &catalog(), &ProjectOptions::new("demo")).unwrap();
        let kinds: Vec<WarningKind> = plan.warnings.iter().map(|w| w.kind).collect();
        assert!(kinds.contains(&WarningKind::TypeScriptWithoutLinting));
        assert!(kinds.contains(&WarningKind::JestManualTransform));
    }

    #[test]
    fn test_summary_lists_manifest_and_files() {
        let plan = plan(&vite_schema(), &catalog(), &ProjectOptions::new("demo")).unwrap();
        let text = summary(&plan);
        assert!(text.contains("Dependencies"));
        assert!(text.contains("react-dom"));
        assert!(text.contains("src/App.jsx"));
        assert!(!text.contains("Warnings"));
    }

    #[test]
    fn test_next_steps() {
        let schema = ChoiceSchema {
            package_manager: PackageManager::Yarn,
            open_editor: true,
            ..vite_schema()
        };
        let steps = next_steps(&schema, Path::new("/work/app"), Path::new("/work"));
        assert_eq!(steps[0], "cd app");
        assert_eq!(steps[1], "yarn");
        assert!(steps[2].starts_with("git init"));
        assert_eq!(steps[3], "code .");
        assert_eq!(steps[4], "yarn dev");

        let here = next_steps(&vite_schema(), Path::new("/work"), Path::new("/work"));
        assert_eq!(here[0], "npm install");
    }
}
