//! Next.js sources for the app and pages routers

use super::{children_props, lib_module, nest, providers, StrategyKey, BASE_CSS, TAILWIND_DIRECTIVES};
use crate::choices::{ChoiceSchema, Styling};
use crate::files::SourceFileSet;
use crate::layout;

const MAIN_CSS: &str = r#"
.main {
  display: flex;
  min-height: 100vh;
  flex-direction: column;
  align-items: center;
  justify-content: center;
  padding: 6rem;
}
"#;

pub fn imports(schema: &ChoiceSchema) -> Vec<String> {
    if schema.styling != Styling::StyledComponents {
        return Vec::new();
    }
    let mut lines = Vec::new();
    // styled-components needs the client runtime under server components
    if StrategyKey::of(schema) == StrategyKey::NextApp {
        lines.push("'use client'".to_string());
        lines.push(String::new());
    }
    lines.push("import styled from 'styled-components'".to_string());
    lines
}

pub fn style_block(schema: &ChoiceSchema) -> Option<String> {
    if schema.styling != Styling::StyledComponents {
        return None;
    }
    Some(
        r#"const Main = styled.main`
  display: flex;
  min-height: 100vh;
  flex-direction: column;
  align-items: center;
  justify-content: center;
  padding: 6rem;
`

const Title = styled.h1`
  font-size: 3rem;
  font-weight: 700;
`
"#
        .to_string(),
    )
}

pub fn component(schema: &ChoiceSchema) -> String {
    let source = layout::root_component_path(schema);
    let (open, title, close) = match schema.styling {
        Styling::Css => ("<main className=\"main\">", "<h1>Welcome to Next.js</h1>", "</main>"),
        Styling::Tailwind => (
            "<main className=\"flex min-h-screen flex-col items-center justify-center p-24\">",
            "<h1 className=\"text-5xl font-bold\">Welcome to Next.js</h1>",
            "</main>",
        ),
        Styling::StyledComponents => ("<Main>", "<Title>Welcome to Next.js</Title>", "</Main>"),
    };

    format!(
        "export default function Home() {{\n  return (\n    {open}\n      {title}\n      <p>\n        Get started by editing <code>{source}</code>\n      </p>\n    {close}\n  )\n}}\n"
    )
}

fn global_css(schema: &ChoiceSchema) -> String {
    match schema.styling {
        Styling::Tailwind => TAILWIND_DIRECTIVES.to_string(),
        _ => format!("{}{}", BASE_CSS, MAIN_CSS),
    }
}

fn styled_registry(schema: &ChoiceSchema) -> String {
    format!(
        r#"'use client'

import {{ useState }} from 'react'
{types}import {{ useServerInsertedHTML }} from 'next/navigation'
import {{ ServerStyleSheet, StyleSheetManager }} from 'styled-components'

export default function StyledComponentsRegistry({props}) {{
  const [styledComponentsStyleSheet] = useState(() => new ServerStyleSheet())

  useServerInsertedHTML(() => {{
    const styles = styledComponentsStyleSheet.getStyleElement()
    styledComponentsStyleSheet.instance.clearTag()
    return <>{{styles}}</>
  }})

  if (typeof window !== 'undefined') return <>{{children}}</>

  return (
    <StyleSheetManager sheet={{styledComponentsStyleSheet.instance}}>
      {{children}}
    </StyleSheetManager>
  )
}}
"#,
        types = react_node_import(schema),
        props = children_props(schema),
    )
}

fn react_node_import(schema: &ChoiceSchema) -> &'static str {
    if schema.typescript {
        "import type { ReactNode } from 'react'\n"
    } else {
        ""
    }
}

fn providers_component(schema: &ChoiceSchema) -> String {
    let mut lines = vec!["'use client'".to_string(), String::new()];
    if schema.typescript {
        lines.push("import type { ReactNode } from 'react'".to_string());
    }
    let providers = providers(schema);
    for provider in &providers {
        lines.extend(provider.imports("../lib"));
    }
    let layers: Vec<_> = providers.iter().map(|p| p.tags()).collect();

    format!(
        "{}\n\nexport default function Providers({}) {{\n  return (\n{}\n  )\n}}\n",
        lines.join("\n"),
        children_props(schema),
        nest("{children}", &layers, 4)
    )
}

fn root_layout(schema: &ChoiceSchema, refs: &[String]) -> String {
    let ext = schema.component_ext();
    let mut lines = Vec::new();
    if schema.typescript {
        lines.push("import type { Metadata } from 'next'".to_string());
        lines.push("import type { ReactNode } from 'react'".to_string());
    }
    let mut layers = Vec::new();
    if refs.contains(&format!("{}.{}", lib_module(schema, "registry"), ext)) {
        lines.push("import StyledComponentsRegistry from '../lib/registry'".to_string());
        layers.push(("<StyledComponentsRegistry>", "</StyledComponentsRegistry>"));
    }
    if refs.contains(&format!("app/providers.{}", ext)) {
        lines.push("import Providers from './providers'".to_string());
        layers.push(("<Providers>", "</Providers>"));
    }
    if refs.iter().any(|r| r == "app/globals.css") {
        lines.push("import './globals.css'".to_string());
    }

    let metadata_type = if schema.typescript { ": Metadata" } else { "" };
    format!(
        "{imports}\n\nexport const metadata{metadata_type} = {{\n  title: 'Next.js App',\n  description: 'Generated by create-react-forge',\n}}\n\n\
         export default function RootLayout({props}) {{\n  return (\n    <html lang=\"en\">\n      <body>\n{body}\n      </body>\n    </html>\n  )\n}}\n",
        imports = lines.join("\n"),
        props = children_props(schema),
        body = nest("{children}", &layers, 8)
    )
}

/// `app/` router: layout, global stylesheet, providers and registry
pub fn app_shell(schema: &ChoiceSchema, files: &mut SourceFileSet) {
    let ext = schema.component_ext();
    let mut refs = Vec::new();

    if let Some(css) = layout::global_css_path(schema) {
        files.insert(css, global_css(schema));
        refs.push(css.to_string());
    }
    if schema.styling == Styling::StyledComponents {
        let path = format!("{}.{}", lib_module(schema, "registry"), ext);
        files.insert(path.clone(), styled_registry(schema));
        refs.push(path);
    }
    let providers = providers(schema);
    if !providers.is_empty() {
        let path = format!("app/providers.{}", ext);
        let provider_refs = providers
            .iter()
            .map(|p| format!("{}.{}", p.module(schema), schema.script_ext()));
        files.insert_with_refs(path.clone(), providers_component(schema), provider_refs);
        refs.push(path);
    }

    let body = root_layout(schema, &refs);
    files.insert_with_refs(format!("app/layout.{}", ext), body, refs);
}

/// `pages/` router: custom App wiring global styles and providers
pub fn pages_shell(schema: &ChoiceSchema, files: &mut SourceFileSet) {
    let mut refs = Vec::new();
    let mut lines = Vec::new();
    if schema.typescript {
        lines.push("import type { AppProps } from 'next/app'".to_string());
    }
    if let Some(css) = layout::global_css_path(schema) {
        files.insert(css, global_css(schema));
        lines.push(format!("import '../{}'", css));
        refs.push(css.to_string());
    }

    let providers = providers(schema);
    for provider in &providers {
        lines.extend(provider.imports("../lib"));
        refs.push(format!("{}.{}", provider.module(schema), schema.script_ext()));
    }
    let layers: Vec<_> = providers.iter().map(|p| p.tags()).collect();
    let props_type = if schema.typescript { ": AppProps" } else { "" };

    let mut body = lines.join("\n");
    if !body.is_empty() {
        body.push_str("\n\n");
    }
    body.push_str(&format!(
        "export default function App({{ Component, pageProps }}{}) {{\n  return (\n{}\n  )\n}}\n",
        props_type,
        nest("<Component {...pageProps} />", &layers, 4)
    ));

    files.insert_with_refs(format!("pages/_app.{}", schema.component_ext()), body, refs);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::choices::{ApiClient, NextRouter, StateManagement};
    use crate::content::root_component;
    use crate::test_support::next_schema;

    #[test]
    fn test_landing_page_is_static() {
        for router in [NextRouter::App, NextRouter::Pages] {
            for &styling in Styling::ALL {
                let schema = ChoiceSchema {
                    styling,
                    ..next_schema(router)
                };
                let body = root_component(&schema);
                assert!(body.contains("Welcome to Next.js"));
                assert!(!body.contains("useState"));
            }
        }
    }

    #[test]
    fn test_styled_app_page_is_client_component() {
        let app = ChoiceSchema {
            styling: Styling::StyledComponents,
            ..next_schema(NextRouter::App)
        };
        assert!(root_component(&app).starts_with("'use client'\n\nimport styled"));

        let pages = ChoiceSchema {
            styling: Styling::StyledComponents,
            ..next_schema(NextRouter::Pages)
        };
        assert!(root_component(&pages).starts_with("import styled"));
    }

    #[test]
    fn test_app_layout_wraps_registry_and_providers() {
        let schema = ChoiceSchema {
            typescript: true,
            styling: Styling::StyledComponents,
            state_management: StateManagement::Redux,
            ..next_schema(NextRouter::App)
        };
        let mut files = SourceFileSet::new();
        app_shell(&schema, &mut files);

        let layout = files.get("app/layout.tsx").unwrap();
        assert!(layout.contains("export const metadata: Metadata"));
        assert!(layout.contains("<StyledComponentsRegistry>\n          <Providers>"));
        assert!(!layout.contains("globals.css"));
        assert_eq!(
            files.references("app/layout.tsx"),
            ["lib/registry.tsx".to_string(), "app/providers.tsx".to_string()]
        );

        let providers = files.get("app/providers.tsx").unwrap();
        assert!(providers.starts_with("'use client'"));
        assert!(providers.contains("import { store } from '../lib/store'"));
        assert_eq!(
            files.references("app/providers.tsx"),
            ["lib/store/index.ts".to_string()]
        );
    }

    #[test]
    fn test_plain_app_layout_has_no_wrappers() {
        let mut files = SourceFileSet::new();
        app_shell(&next_schema(NextRouter::App), &mut files);
        let layout = files.get("app/layout.jsx").unwrap();
        assert!(layout.starts_with("import './globals.css'"));
        assert!(layout.contains("        {children}\n"));
        assert!(!files.contains("app/providers.jsx"));
        assert!(files.get("app/globals.css").unwrap().contains(".main {"));
    }

    #[test]
    fn test_pages_app_imports_styles_and_providers() {
        let schema = ChoiceSchema {
            typescript: true,
            api: ApiClient::FetchReactQuery,
            styling: Styling::Tailwind,
            ..next_schema(NextRouter::Pages)
        };
        let mut files = SourceFileSet::new();
        pages_shell(&schema, &mut files);

        let app = files.get("pages/_app.tsx").unwrap();
        assert!(app.contains("import '../styles/globals.css'"));
        assert!(app.contains("{ Component, pageProps }: AppProps"));
        assert!(app.contains("<QueryClientProvider client={queryClient}>"));
        assert!(files
            .get("styles/globals.css")
            .unwrap()
            .starts_with("@tailwind base;"));
    }
}
