//! package.json: identity, scripts and the resolved manifest

use crate::choices::{ChoiceSchema, Deployment, Framework, Testing};
use crate::error::{Result, ScaffoldError};
use crate::layout;
use crate::resolver::PackageManifest;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;

/// Version written into every new project
pub const INITIAL_VERSION: &str = "0.1.0";

/// Insertion-ordered script table
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScriptTable {
    entries: Vec<(String, String)>,
}

impl ScriptTable {
    /// Add a script unless one with the same name already exists.
    /// Returns whether it was added.
    pub fn add(&mut self, name: &str, command: impl Into<String>) -> bool {
        if self.get(name).is_some() {
            return false;
        }
        self.entries.push((name.to_string(), command.into()));
        true
    }

    /// Set a script, replacing any existing command in place
    pub fn set(&mut self, name: &str, command: impl Into<String>) {
        let command = command.into();
        match self.entries.iter_mut().find(|(n, _)| n == name) {
            Some(entry) => entry.1 = command,
            None => self.entries.push((name.to_string(), command)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, c)| c.as_str())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for ScriptTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, command) in &self.entries {
            map.serialize_entry(name, command)?;
        }
        map.end()
    }
}

/// One group of default scripts
type ScriptGroup = Vec<(&'static str, String)>;

fn framework_scripts(schema: &ChoiceSchema) -> ScriptGroup {
    let mut scripts = match schema.framework() {
        Framework::Vite => vec![
            ("dev", "vite".to_string()),
            (
                "build",
                if schema.typescript {
                    "tsc && vite build".to_string()
                } else {
                    "vite build".to_string()
                },
            ),
            ("preview", "vite preview".to_string()),
        ],
        Framework::NextJs => vec![
            ("dev", "next dev".to_string()),
            ("build", "next build".to_string()),
            ("start", "next start".to_string()),
        ],
    };
    if schema.linting {
        scripts.push((
            "lint",
            match schema.framework() {
                Framework::Vite => "eslint .".to_string(),
                Framework::NextJs => "next lint".to_string(),
            },
        ));
    }
    scripts
}

fn testing_scripts(schema: &ChoiceSchema) -> ScriptGroup {
    match schema.testing {
        Testing::Vitest => vec![
            ("test", "vitest".to_string()),
            ("test:run", "vitest run".to_string()),
        ],
        Testing::Jest => vec![
            ("test", "jest".to_string()),
            ("test:watch", "jest --watch".to_string()),
        ],
        Testing::None => Vec::new(),
    }
}

fn deployment_scripts(schema: &ChoiceSchema) -> ScriptGroup {
    let build = schema.package_manager.run_script("build");
    match schema.deployment {
        Deployment::Vercel => vec![
            ("deploy", format!("{} && vercel deploy --prod", build)),
            ("deploy:preview", format!("{} && vercel deploy", build)),
        ],
        Deployment::Netlify => {
            let dir = layout::output_dir(schema);
            vec![
                ("deploy", format!("{} && netlify deploy --prod --dir={}", build, dir)),
                ("deploy:preview", format!("{} && netlify deploy --dir={}", build, dir)),
            ]
        }
        Deployment::None => Vec::new(),
    }
}

/// Script table for a schema.
///
/// Groups fold in order (framework, testing, deployment); a later group only
/// adds names not yet present. Caller overrides are applied last and always
/// win.
pub fn scripts(schema: &ChoiceSchema, overrides: &[(String, String)]) -> ScriptTable {
    let groups = [
        framework_scripts(schema),
        testing_scripts(schema),
        deployment_scripts(schema),
    ];

    let mut table = groups
        .into_iter()
        .flatten()
        .fold(ScriptTable::default(), |mut table, (name, command)| {
            table.add(name, command);
            table
        });

    for (name, command) in overrides {
        table.set(name, command.clone());
    }
    table
}

/// Check a name against npm's package naming rules
pub fn validate_project_name(name: &str) -> Result<()> {
    let invalid = |reason| {
        Err(ScaffoldError::InvalidProjectName {
            name: name.to_string(),
            reason,
        })
    };

    if name.is_empty() {
        return invalid("name cannot be empty");
    }
    if name.len() > 214 {
        return invalid("name cannot be longer than 214 characters");
    }
    if name.starts_with('.') || name.starts_with('_') {
        return invalid("name cannot start with '.' or '_'");
    }
    if name != name.to_lowercase() {
        return invalid("name must be lowercase");
    }
    let allowed = |c: char| c.is_ascii_alphanumeric() || matches!(c, '-' | '.' | '_' | '~' | '@' | '/');
    if !name.chars().all(allowed) {
        return invalid("name may only contain URL-safe characters");
    }
    Ok(())
}

#[derive(Serialize)]
struct PackageJson<'a> {
    name: &'a str,
    version: &'a str,
    private: bool,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    module_type: Option<&'a str>,
    scripts: &'a ScriptTable,
    dependencies: &'a BTreeMap<String, String>,
    #[serde(rename = "devDependencies")]
    dev_dependencies: &'a BTreeMap<String, String>,
}

/// Render package.json with stable key order: identity fields, scripts,
/// dependencies, devDependencies
pub fn render(
    project_name: &str,
    schema: &ChoiceSchema,
    scripts: &ScriptTable,
    manifest: &PackageManifest,
) -> Result<String> {
    validate_project_name(project_name)?;

    let package = PackageJson {
        name: project_name,
        version: INITIAL_VERSION,
        private: true,
        module_type: schema.is_vite().then_some("module"),
        scripts,
        dependencies: &manifest.dependencies,
        dev_dependencies: &manifest.dev_dependencies,
    };

    let mut body = serde_json::to_string_pretty(&package)?;
    body.push('\n');
    Ok(body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::VersionCatalog;
    use crate::choices::{NextRouter, PackageManager};
    use crate::resolver::resolve;
    use crate::test_support::{next_schema, vite_schema};

    #[test]
    fn test_groups_add_in_order() {
        let schema = ChoiceSchema {
            testing: Testing::Vitest,
            deployment: Deployment::Vercel,
            ..vite_schema()
        };
        let table = scripts(&schema, &[]);
        let names: Vec<&str> = table.names().collect();
        assert_eq!(
            names,
            vec!["dev", "build", "preview", "lint", "test", "test:run", "deploy", "deploy:preview"]
        );
    }

    #[test]
    fn test_override_always_wins() {
        let overrides = vec![
            ("dev".to_string(), "vite --port 4000".to_string()),
            ("storybook".to_string(), "storybook dev".to_string()),
        ];
        let table = scripts(&vite_schema(), &overrides);
        assert_eq!(table.get("dev"), Some("vite --port 4000"));
        assert_eq!(table.get("storybook"), Some("storybook dev"));
        assert_eq!(table.names().next(), Some("dev"));
    }

    #[test]
    fn test_later_group_does_not_replace_earlier() {
        let mut table = ScriptTable::default();
        assert!(table.add("test", "vitest"));
        assert!(!table.add("test", "jest"));
        assert_eq!(table.get("test"), Some("vitest"));
    }

    #[test]
    fn test_deploy_script_uses_package_manager_form() {
        let npm = ChoiceSchema {
            deployment: Deployment::Netlify,
            ..vite_schema()
        };
        assert_eq!(
            scripts(&npm, &[]).get("deploy"),
            Some("npm run build && netlify deploy --prod --dir=dist")
        );

        let yarn = ChoiceSchema {
            package_manager: PackageManager::Yarn,
            deployment: Deployment::Vercel,
            ..next_schema(NextRouter::App)
        };
        assert_eq!(
            scripts(&yarn, &[]).get("deploy"),
            Some("yarn build && vercel deploy --prod")
        );
    }

    #[test]
    fn test_typescript_vite_build_runs_type_checker() {
        let schema = ChoiceSchema {
            typescript: true,
            ..vite_schema()
        };
        assert_eq!(scripts(&schema, &[]).get("build"), Some("tsc && vite build"));
    }

    #[test]
    fn test_render_key_order() {
        let schema = vite_schema();
        let manifest = resolve(&schema, &VersionCatalog::embedded().unwrap()).unwrap();
        let body = render("my-app", &schema, &scripts(&schema, &[]), &manifest).unwrap();

        let position = |key: &str| body.find(&format!("\"{}\"", key)).unwrap();
        assert!(position("name") < position("version"));
        assert!(position("private") < position("type"));
        assert!(position("type") < position("scripts"));
        assert!(position("scripts") < position("dependencies"));
        assert!(position("dependencies") < position("devDependencies"));
        assert!(body.ends_with("}\n"));
    }

    #[test]
    fn test_next_package_is_not_module_type() {
        let schema = next_schema(NextRouter::Pages);
        let manifest = resolve(&schema, &VersionCatalog::embedded().unwrap()).unwrap();
        let body = render("site", &schema, &scripts(&schema, &[]), &manifest).unwrap();
        let value: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert!(value.get("type").is_none());
        assert_eq!(value["scripts"]["start"], "next start");
    }

    #[test]
    fn test_project_name_rules() {
        assert!(validate_project_name("my-app").is_ok());
        assert!(validate_project_name("@scope/app").is_ok());
        assert!(validate_project_name("My App").is_err());
        assert!(validate_project_name(".hidden").is_err());
        assert!(validate_project_name("").is_err());
    }
}
