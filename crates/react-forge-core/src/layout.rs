//! Framework-conventional file locations
//!
//! Config emission and content generation both derive paths from here, so a
//! config that points at a source file always agrees with where that file is
//! generated.

use crate::choices::{ChoiceSchema, FrameworkChoice, NextRouter, Styling};

/// Directory holding shared modules (store, api client)
pub fn lib_dir(schema: &ChoiceSchema) -> &'static str {
    if schema.is_vite() {
        "src"
    } else {
        "lib"
    }
}

/// Client entry file; only Vite projects have one
pub fn entry_path(schema: &ChoiceSchema) -> Option<String> {
    schema
        .is_vite()
        .then(|| format!("src/main.{}", schema.component_ext()))
}

/// Root display component (Vite `App`, Next.js landing page)
pub fn root_component_path(schema: &ChoiceSchema) -> String {
    let ext = schema.component_ext();
    match schema.framework {
        FrameworkChoice::Vite { .. } => format!("src/App.{}", ext),
        FrameworkChoice::NextJs {
            router: NextRouter::App,
        } => format!("app/page.{}", ext),
        FrameworkChoice::NextJs {
            router: NextRouter::Pages,
        } => format!("pages/index.{}", ext),
    }
}

/// Global stylesheet; styled-components projects have none
pub fn global_css_path(schema: &ChoiceSchema) -> Option<&'static str> {
    if schema.styling == Styling::StyledComponents {
        return None;
    }
    Some(match schema.framework {
        FrameworkChoice::Vite { .. } => "src/index.css",
        FrameworkChoice::NextJs {
            router: NextRouter::App,
        } => "app/globals.css",
        FrameworkChoice::NextJs {
            router: NextRouter::Pages,
        } => "styles/globals.css",
    })
}

/// Test setup script shared by whichever runner is chosen
pub fn setup_script_path(schema: &ChoiceSchema) -> String {
    let ext = schema.script_ext();
    if schema.is_vite() {
        format!("src/setupTests.{}", ext)
    } else {
        format!("setupTests.{}", ext)
    }
}

/// Source directory prefix that utility-CSS scanning must cover
pub fn scan_root(schema: &ChoiceSchema) -> &'static str {
    match schema.framework {
        FrameworkChoice::Vite { .. } => "./src/",
        FrameworkChoice::NextJs {
            router: NextRouter::App,
        } => "./app/",
        FrameworkChoice::NextJs {
            router: NextRouter::Pages,
        } => "./pages/",
    }
}

/// Build output directory
pub fn output_dir(schema: &ChoiceSchema) -> &'static str {
    if schema.is_vite() {
        "dist"
    } else {
        ".next"
    }
}
