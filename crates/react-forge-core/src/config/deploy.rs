//! Deployment platform configs

use super::pretty_json;
use crate::choices::{ChoiceSchema, Deployment, Routing};
use crate::error::Result;
use crate::files::ConfigFileSet;
use crate::layout;
use serde_json::json;

/// Vite SPAs using client routing need every path served by index.html
fn needs_spa_fallback(schema: &ChoiceSchema) -> bool {
    schema.routing() == Some(Routing::ReactRouter)
}

fn vercel_json(schema: &ChoiceSchema) -> serde_json::Value {
    let build = schema.package_manager.run_script("build");
    if !schema.is_vite() {
        return json!({
            "framework": "nextjs",
            "buildCommand": build,
            "installCommand": schema.package_manager.install_command()
        });
    }

    let mut config = json!({
        "framework": "vite",
        "buildCommand": build,
        "installCommand": schema.package_manager.install_command(),
        "outputDirectory": layout::output_dir(schema)
    });
    if needs_spa_fallback(schema) {
        config["rewrites"] = json!([{ "source": "/(.*)", "destination": "/index.html" }]);
    }
    config
}

fn netlify_toml(schema: &ChoiceSchema) -> String {
    let mut body = format!(
        "[build]\n  command = \"{}\"\n  publish = \"{}\"\n",
        schema.package_manager.run_script("build"),
        layout::output_dir(schema)
    );
    if needs_spa_fallback(schema) {
        body.push_str("\n[[redirects]]\n  from = \"/*\"\n  to = \"/index.html\"\n  status = 200\n");
    }
    body
}

pub fn emit(schema: &ChoiceSchema, files: &mut ConfigFileSet) -> Result<()> {
    match schema.deployment {
        Deployment::Vercel => files.insert("vercel.json", pretty_json(&vercel_json(schema))?),
        Deployment::Netlify => files.insert("netlify.toml", netlify_toml(schema)),
        Deployment::None => {}
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::choices::{FrameworkChoice, NextRouter, PackageManager};
    use crate::test_support::{next_schema, vite_schema};

    #[test]
    fn test_netlify_uses_package_manager_build() {
        let schema = ChoiceSchema {
            package_manager: PackageManager::Yarn,
            deployment: Deployment::Netlify,
            ..next_schema(NextRouter::App)
        };
        let mut files = ConfigFileSet::new();
        emit(&schema, &mut files).unwrap();
        let toml = files.get("netlify.toml").unwrap();
        assert!(toml.contains("command = \"yarn build\""));
        assert!(toml.contains("publish = \".next\""));
        assert!(!toml.contains("redirects"));
    }

    #[test]
    fn test_vercel_spa_rewrite_only_with_router() {
        let routed = ChoiceSchema {
            framework: FrameworkChoice::Vite {
                routing: Routing::ReactRouter,
            },
            deployment: Deployment::Vercel,
            ..vite_schema()
        };
        let mut files = ConfigFileSet::new();
        emit(&routed, &mut files).unwrap();
        let config: serde_json::Value =
            serde_json::from_str(files.get("vercel.json").unwrap()).unwrap();
        assert_eq!(config["rewrites"][0]["destination"], "/index.html");
        assert_eq!(config["buildCommand"], "npm run build");

        let plain = ChoiceSchema {
            deployment: Deployment::Vercel,
            ..vite_schema()
        };
        let mut files = ConfigFileSet::new();
        emit(&plain, &mut files).unwrap();
        assert!(!files.get("vercel.json").unwrap().contains("rewrites"));
    }

    #[test]
    fn test_no_deployment_emits_nothing() {
        let mut files = ConfigFileSet::new();
        emit(&vite_schema(), &mut files).unwrap();
        assert!(files.is_empty());
    }
}
