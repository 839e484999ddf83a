//! Utility-CSS toolchain config and scan-path validation

use super::module_export;
use crate::choices::{ChoiceSchema, FrameworkChoice, NextRouter, Styling};
use crate::error::{Warning, WarningKind};
use crate::files::ConfigFileSet;
use crate::layout;

/// Globs Tailwind scans for class names, matching the framework's layout
pub fn content_globs(schema: &ChoiceSchema) -> Vec<&'static str> {
    match schema.framework {
        FrameworkChoice::Vite { .. } => vec!["./index.html", "./src/**/*.{js,ts,jsx,tsx}"],
        FrameworkChoice::NextJs {
            router: NextRouter::App,
        } => vec![
            "./app/**/*.{js,ts,jsx,tsx,mdx}",
            "./components/**/*.{js,ts,jsx,tsx,mdx}",
        ],
        FrameworkChoice::NextJs {
            router: NextRouter::Pages,
        } => vec![
            "./pages/**/*.{js,ts,jsx,tsx,mdx}",
            "./components/**/*.{js,ts,jsx,tsx,mdx}",
        ],
    }
}

/// Warn when no scan glob covers the framework's source directory; styles
/// would silently be missing from the build
pub fn check_scan_paths(schema: &ChoiceSchema, globs: &[&str]) -> Option<Warning> {
    let root = layout::scan_root(schema);
    if globs.iter().any(|glob| glob.starts_with(root)) {
        return None;
    }
    Some(Warning::new(
        WarningKind::ScanPathMismatch,
        format!(
            "tailwind.config.js does not scan '{}'; classes used there will not be generated",
            root
        ),
    ))
}

fn tailwind_config(schema: &ChoiceSchema, globs: &[&str]) -> String {
    let content = globs
        .iter()
        .map(|glob| format!("    '{}',", glob))
        .collect::<Vec<_>>()
        .join("\n");
    let body = format!(
        "{{\n  content: [\n{}\n  ],\n  theme: {{\n    extend: {{}},\n  }},\n  plugins: [],\n}}",
        content
    );
    format!(
        "/** @type {{import('tailwindcss').Config}} */\n{}\n",
        module_export(schema, &body)
    )
}

fn postcss_config(schema: &ChoiceSchema) -> String {
    let body = "{\n  plugins: {\n    tailwindcss: {},\n    autoprefixer: {},\n  },\n}";
    format!("{}\n", module_export(schema, body))
}

/// Emit styling-tool configs; returns the scan-path finding, if any
pub fn emit(schema: &ChoiceSchema, files: &mut ConfigFileSet) -> Option<Warning> {
    if schema.styling != Styling::Tailwind {
        return None;
    }

    let globs = content_globs(schema);
    files.insert("tailwind.config.js", tailwind_config(schema, &globs));
    files.insert("postcss.config.js", postcss_config(schema));
    check_scan_paths(schema, &globs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{next_schema, vite_schema};

    fn tailwind(schema: ChoiceSchema) -> ChoiceSchema {
        ChoiceSchema {
            styling: Styling::Tailwind,
            ..schema
        }
    }

    #[test]
    fn test_vite_tailwind_config_is_esm() {
        let mut files = ConfigFileSet::new();
        let warning = emit(&tailwind(vite_schema()), &mut files);
        assert!(warning.is_none());

        let config = files.get("tailwind.config.js").unwrap();
        assert!(config.contains("export default {"));
        assert!(config.contains("'./src/**/*.{js,ts,jsx,tsx}'"));
        assert!(files.get("postcss.config.js").unwrap().contains("autoprefixer"));
    }

    #[test]
    fn test_next_tailwind_scans_router_directory() {
        let mut files = ConfigFileSet::new();
        emit(&tailwind(next_schema(NextRouter::Pages)), &mut files);
        let config = files.get("tailwind.config.js").unwrap();
        assert!(config.starts_with("/** @type"));
        assert!(config.contains("module.exports = {"));
        assert!(config.contains("./pages/**"));
        assert!(!config.contains("./app/**"));
    }

    #[test]
    fn test_scan_path_mismatch_is_reported() {
        let schema = tailwind(next_schema(NextRouter::App));
        let warning = check_scan_paths(&schema, &["./src/**/*.{js,jsx}"]).unwrap();
        assert_eq!(warning.kind, WarningKind::ScanPathMismatch);
        assert!(warning.message.contains("./app/"));
    }

    #[test]
    fn test_every_layout_scans_its_own_root() {
        for schema in [
            vite_schema(),
            next_schema(NextRouter::App),
            next_schema(NextRouter::Pages),
        ] {
            assert!(check_scan_paths(&schema, &content_globs(&schema)).is_none());
        }
    }

    #[test]
    fn test_plain_css_emits_nothing() {
        let mut files = ConfigFileSet::new();
        assert!(emit(&vite_schema(), &mut files).is_none());
        assert!(files.is_empty());
    }
}
