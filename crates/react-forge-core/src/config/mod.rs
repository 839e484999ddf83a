//! Configuration builder
//!
//! Turns a schema and its resolved manifest into the package descriptor and
//! the set of configuration files:
//! - `package_json` - identity, scripts, dependency groups
//! - `typescript` - tsconfig / jsconfig per framework
//! - `styling` - Tailwind and PostCSS, plus scan-path validation
//! - `testing` - Vitest / Jest configs and the shared setup script
//! - `tooling` - build tool, ESLint, .gitignore
//! - `deploy` - Vercel / Netlify

pub mod deploy;
pub mod package_json;
pub mod styling;
pub mod testing;
pub mod tooling;
pub mod typescript;

use crate::choices::ChoiceSchema;
use crate::error::{Result, Warning};
use crate::files::ConfigFileSet;
use crate::resolver::PackageManifest;

pub use package_json::{scripts, validate_project_name, ScriptTable};

/// Caller-supplied settings that are not part of the choice schema
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectOptions {
    pub project_name: String,
    /// Scripts that replace or extend the generated defaults
    pub script_overrides: Vec<(String, String)>,
}

impl ProjectOptions {
    pub fn new(project_name: impl Into<String>) -> Self {
        Self {
            project_name: project_name.into(),
            script_overrides: Vec::new(),
        }
    }
}

/// Everything the builder produces for one schema
#[derive(Debug, Clone)]
pub struct ConfigOutput {
    pub package_json: String,
    pub scripts: ScriptTable,
    pub files: ConfigFileSet,
    pub warnings: Vec<Warning>,
}

/// Build package.json and every configuration file for a schema.
///
/// Scripts are computed first; the manifest only supplies the dependency
/// groups. Returns an error rather than a partially built output.
pub fn build(
    schema: &ChoiceSchema,
    manifest: &PackageManifest,
    options: &ProjectOptions,
) -> Result<ConfigOutput> {
    let scripts = package_json::scripts(schema, &options.script_overrides);
    let package_json = package_json::render(&options.project_name, schema, &scripts, manifest)?;

    let mut files = ConfigFileSet::new();
    let mut warnings = Vec::new();

    tooling::emit(schema, &options.project_name, &mut files)?;
    typescript::emit(schema, &mut files)?;
    warnings.extend(styling::emit(schema, &mut files));
    testing::emit(schema, &mut files);
    deploy::emit(schema, &mut files)?;

    tracing::debug!(
        files = files.len(),
        scripts = scripts.len(),
        "built configuration files"
    );

    Ok(ConfigOutput {
        package_json,
        scripts,
        files,
        warnings,
    })
}

/// Render a JSON config body with a trailing newline
pub(crate) fn pretty_json(value: &serde_json::Value) -> Result<String> {
    let mut body = serde_json::to_string_pretty(value)?;
    body.push('\n');
    Ok(body)
}

/// Export an object literal in the module style the framework expects.
/// Vite projects are ES modules; Next.js loads these configs as CommonJS.
pub(crate) fn module_export(schema: &ChoiceSchema, object: &str) -> String {
    if schema.is_vite() {
        format!("export default {}", object)
    } else {
        format!("module.exports = {}", object)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::VersionCatalog;
    use crate::choices::{Deployment, NextRouter, Styling, Testing};
    use crate::resolver::resolve;
    use crate::test_support::{next_schema, vite_schema};

    fn build_for(schema: &ChoiceSchema) -> ConfigOutput {
        let manifest = resolve(schema, &VersionCatalog::embedded().unwrap()).unwrap();
        build(schema, &manifest, &ProjectOptions::new("demo")).unwrap()
    }

    #[test]
    fn test_full_vite_config_set() {
        let schema = ChoiceSchema {
            typescript: true,
            styling: Styling::Tailwind,
            testing: Testing::Vitest,
            deployment: Deployment::Netlify,
            ..vite_schema()
        };
        let output = build_for(&schema);
        let paths: Vec<&str> = output.files.paths().collect();
        for expected in [
            ".gitignore",
            "eslint.config.js",
            "index.html",
            "netlify.toml",
            "postcss.config.js",
            "src/setupTests.ts",
            "tailwind.config.js",
            "tsconfig.json",
            "tsconfig.node.json",
            "vite.config.ts",
            "vitest.config.ts",
        ] {
            assert!(paths.contains(&expected), "missing {}", expected);
        }
        assert!(output.warnings.is_empty());
        assert!(output.package_json.contains("\"test\": \"vitest\""));
    }

    #[test]
    fn test_next_app_config_set() {
        let schema = ChoiceSchema {
            styling: Styling::StyledComponents,
            testing: Testing::Jest,
            ..next_schema(NextRouter::App)
        };
        let output = build_for(&schema);
        assert!(output.files.contains("next.config.mjs"));
        assert!(output.files.contains(".babelrc"));
        assert!(output.files.contains("jest.config.js"));
        assert!(output.files.contains("setupTests.js"));
        assert!(!output.files.contains("vite.config.js"));
    }

    #[test]
    fn test_invalid_project_name_is_rejected() {
        let schema = vite_schema();
        let manifest = resolve(&schema, &VersionCatalog::embedded().unwrap()).unwrap();
        assert!(build(&schema, &manifest, &ProjectOptions::new("Bad Name")).is_err());
    }

    #[test]
    fn test_module_export_style() {
        assert_eq!(module_export(&vite_schema(), "{}"), "export default {}");
        assert_eq!(
            module_export(&next_schema(NextRouter::Pages), "{}"),
            "module.exports = {}"
        );
    }
}
