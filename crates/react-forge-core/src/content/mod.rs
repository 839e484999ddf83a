//! Content generator
//!
//! Produces application sources for a schema. Each framework layout has a
//! [`Strategy`] in a lookup table; the strategy supplies the root component
//! pieces and the shell files (entry point, layout, stylesheets). Feature
//! modules (store, API client, sample test) are shared across layouts and
//! placed under [`layout::lib_dir`].

pub mod api;
pub mod next;
pub mod store;
pub mod vite;

use crate::choices::{ChoiceSchema, FrameworkChoice, NextRouter, StateManagement};
use crate::files::SourceFileSet;
use crate::layout;

/// Discriminant of a content strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StrategyKey {
    Vite,
    NextApp,
    NextPages,
}

impl StrategyKey {
    pub fn of(schema: &ChoiceSchema) -> Self {
        match schema.framework {
            FrameworkChoice::Vite { .. } => StrategyKey::Vite,
            FrameworkChoice::NextJs {
                router: NextRouter::App,
            } => StrategyKey::NextApp,
            FrameworkChoice::NextJs {
                router: NextRouter::Pages,
            } => StrategyKey::NextPages,
        }
    }
}

/// Source generation for one framework layout
pub struct Strategy {
    pub key: StrategyKey,
    /// Import lines of the root component
    pub imports: fn(&ChoiceSchema) -> Vec<String>,
    /// styled-components definitions; `None` for other styling choices
    pub style_block: fn(&ChoiceSchema) -> Option<String>,
    /// Root component function and its export
    pub component: fn(&ChoiceSchema) -> String,
    /// Client entry point; only Vite has one
    pub entry: Option<fn(&ChoiceSchema) -> String>,
    /// Layout, stylesheet and provider files around the root component
    pub shell: fn(&ChoiceSchema, &mut SourceFileSet),
}

/// Indexed by `StrategyKey` discriminant
const STRATEGIES: &[Strategy] = &[
    Strategy {
        key: StrategyKey::Vite,
        imports: vite::imports,
        style_block: vite::style_block,
        component: vite::component,
        entry: Some(vite::entry),
        shell: vite::shell,
    },
    Strategy {
        key: StrategyKey::NextApp,
        imports: next::imports,
        style_block: next::style_block,
        component: next::component,
        entry: None,
        shell: next::app_shell,
    },
    Strategy {
        key: StrategyKey::NextPages,
        imports: next::imports,
        style_block: next::style_block,
        component: next::component,
        entry: None,
        shell: next::pages_shell,
    },
];

pub fn strategy(key: StrategyKey) -> &'static Strategy {
    &STRATEGIES[key as usize]
}

/// Reset shared by every plain-CSS global stylesheet
pub(crate) const BASE_CSS: &str = r#":root {
  font-family: Inter, system-ui, Avenir, Helvetica, Arial, sans-serif;
  line-height: 1.5;
  font-weight: 400;
  color-scheme: light dark;
  color: rgba(255, 255, 255, 0.87);
  background-color: #242424;
  -webkit-font-smoothing: antialiased;
  -moz-osx-font-smoothing: grayscale;
}

* {
  box-sizing: border-box;
}

body {
  margin: 0;
  min-width: 320px;
  min-height: 100vh;
}

a {
  font-weight: 500;
  color: #646cff;
  text-decoration: inherit;
}

a:hover {
  color: #535bf2;
}
"#;

pub(crate) const TAILWIND_DIRECTIVES: &str = "@tailwind base;\n@tailwind components;\n@tailwind utilities;\n";

/// Assemble the root component from its strategy pieces
pub fn root_component(schema: &ChoiceSchema) -> String {
    let strategy = strategy(StrategyKey::of(schema));
    let mut body = String::new();
    for line in (strategy.imports)(schema) {
        body.push_str(&line);
        body.push('\n');
    }
    body.push('\n');
    if let Some(styles) = (strategy.style_block)(schema) {
        body.push_str(&styles);
        body.push('\n');
    }
    body.push_str(&(strategy.component)(schema));
    body
}

/// Generate every application source file for a schema
pub fn generate(schema: &ChoiceSchema) -> SourceFileSet {
    let strategy = strategy(StrategyKey::of(schema));
    let mut files = SourceFileSet::new();

    files.insert(layout::root_component_path(schema), root_component(schema));
    if let (Some(entry), Some(path)) = (strategy.entry, layout::entry_path(schema)) {
        let refs = vite::entry_references(schema);
        files.insert_with_refs(path, entry(schema), refs);
    }
    (strategy.shell)(schema, &mut files);

    store::emit(schema, &mut files);
    api::emit(schema, &mut files);
    sample_test::emit(schema, &mut files);

    tracing::debug!(files = files.len(), strategy = ?strategy.key, "generated sources");
    files
}

/// Path of a shared module under the library directory, without extension
pub(crate) fn lib_module(schema: &ChoiceSchema, module: &str) -> String {
    format!("{}/{}", layout::lib_dir(schema), module)
}

/// Context providers the app root needs, outermost first
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Provider {
    Redux,
    ReactQuery,
}

pub(crate) fn providers(schema: &ChoiceSchema) -> Vec<Provider> {
    let mut providers = Vec::new();
    if schema.state_management == StateManagement::Redux {
        providers.push(Provider::Redux);
    }
    if schema.api.uses_react_query() {
        providers.push(Provider::ReactQuery);
    }
    providers
}

impl Provider {
    /// Import lines, given the relative path from the importing file to the
    /// library directory
    pub(crate) fn imports(&self, lib: &str) -> Vec<String> {
        match self {
            Provider::Redux => vec![
                "import { Provider } from 'react-redux'".to_string(),
                format!("import {{ store }} from '{}/store'", lib),
            ],
            Provider::ReactQuery => vec![
                "import { QueryClientProvider } from '@tanstack/react-query'".to_string(),
                format!("import {{ queryClient }} from '{}/api/queryClient'", lib),
            ],
        }
    }

    pub(crate) fn tags(&self) -> (&'static str, &'static str) {
        match self {
            Provider::Redux => ("<Provider store={store}>", "</Provider>"),
            Provider::ReactQuery => (
                "<QueryClientProvider client={queryClient}>",
                "</QueryClientProvider>",
            ),
        }
    }

    /// Generated module the provider imports, without extension
    pub(crate) fn module(&self, schema: &ChoiceSchema) -> String {
        match self {
            Provider::Redux => lib_module(schema, "store/index"),
            Provider::ReactQuery => lib_module(schema, "api/queryClient"),
        }
    }
}

/// Wrap `inner` in nested tags, outermost first, indenting from `indent`
pub(crate) fn nest(inner: &str, layers: &[(&str, &str)], indent: usize) -> String {
    let pad = |depth: usize| " ".repeat(indent + depth * 2);
    let mut lines = Vec::new();
    for (depth, (open, _)) in layers.iter().enumerate() {
        lines.push(format!("{}{}", pad(depth), open));
    }
    lines.push(format!("{}{}", pad(layers.len()), inner));
    for (depth, (_, close)) in layers.iter().enumerate().rev() {
        lines.push(format!("{}{}", pad(depth), close));
    }
    lines.join("\n")
}

/// Props signature for a component that only takes children
pub(crate) fn children_props(schema: &ChoiceSchema) -> &'static str {
    if schema.typescript {
        "{ children }: { children: ReactNode }"
    } else {
        "{ children }"
    }
}
