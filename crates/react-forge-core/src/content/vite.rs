//! Vite single-page app sources

use super::{nest, providers, BASE_CSS, TAILWIND_DIRECTIVES};
use crate::choices::{ChoiceSchema, Routing, Styling};
use crate::files::SourceFileSet;
use crate::layout;

pub fn imports(schema: &ChoiceSchema) -> Vec<String> {
    let mut lines = vec!["import { useState } from 'react'".to_string()];
    match schema.styling {
        Styling::Css => lines.push("import './App.css'".to_string()),
        Styling::StyledComponents => {
            lines.push("import styled, { createGlobalStyle } from 'styled-components'".to_string())
        }
        Styling::Tailwind => {}
    }
    lines
}

pub fn style_block(schema: &ChoiceSchema) -> Option<String> {
    if schema.styling != Styling::StyledComponents {
        return None;
    }
    Some(
        r#"const GlobalStyle = createGlobalStyle`
  body {
    margin: 0;
    min-height: 100vh;
    font-family: Inter, system-ui, Avenir, Helvetica, Arial, sans-serif;
    color: rgba(255, 255, 255, 0.87);
    background-color: #242424;
  }
`

const Wrapper = styled.div`
  max-width: 1280px;
  margin: 0 auto;
  padding: 2rem;
  text-align: center;
`

const Button = styled.button`
  border-radius: 8px;
  border: 1px solid transparent;
  padding: 0.6em 1.2em;
  font-size: 1em;
  font-weight: 500;
  color: inherit;
  background-color: #1a1a1a;
  cursor: pointer;
  transition: border-color 0.25s;

  &:hover {
    border-color: #646cff;
  }
`
"#
        .to_string(),
    )
}

pub fn component(schema: &ChoiceSchema) -> String {
    let source = layout::root_component_path(schema);
    let markup = match schema.styling {
        Styling::Css => format!(
            r#"    <div className="app">
      <h1>Vite + React</h1>
      <div className="card">
        <button onClick={{() => setCount((count) => count + 1)}}>
          count is {{count}}
        </button>
        <p>
          Edit <code>{source}</code> and save to test HMR
        </p>
      </div>
    </div>"#
        ),
        Styling::Tailwind => format!(
            r#"    <div className="mx-auto max-w-5xl p-8 text-center">
      <h1 className="text-5xl font-bold">Vite + React</h1>
      <div className="p-8">
        <button
          className="rounded-lg border border-transparent bg-neutral-900 px-5 py-2.5 font-medium text-white transition-colors hover:border-indigo-500"
          onClick={{() => setCount((count) => count + 1)}}
        >
          count is {{count}}
        </button>
        <p className="mt-4">
          Edit <code>{source}</code> and save to test HMR
        </p>
      </div>
    </div>"#
        ),
        Styling::StyledComponents => format!(
            r#"    <>
      <GlobalStyle />
      <Wrapper>
        <h1>Vite + React</h1>
        <Button onClick={{() => setCount((count) => count + 1)}}>
          count is {{count}}
        </Button>
        <p>
          Edit <code>{source}</code> and save to test HMR
        </p>
      </Wrapper>
    </>"#
        ),
    };

    format!(
        "function App() {{\n  const [count, setCount] = useState(0)\n\n  return (\n{}\n  )\n}}\n\nexport default App\n",
        markup
    )
}

/// `src/main.*`: mounts the app inside StrictMode and any providers
pub fn entry(schema: &ChoiceSchema) -> String {
    let providers = providers(schema);
    let routed = schema.routing() == Some(Routing::ReactRouter);

    let mut lines = vec![
        "import { StrictMode } from 'react'".to_string(),
        "import { createRoot } from 'react-dom/client'".to_string(),
    ];
    if routed {
        lines.push("import { BrowserRouter, Routes, Route } from 'react-router-dom'".to_string());
    }
    for provider in &providers {
        lines.extend(provider.imports("."));
    }
    lines.push("import App from './App'".to_string());
    if layout::global_css_path(schema).is_some() {
        lines.push("import './index.css'".to_string());
    }

    let mut layers = vec![("<StrictMode>", "</StrictMode>")];
    layers.extend(providers.iter().map(|p| p.tags()));
    let inner = if routed {
        layers.push(("<BrowserRouter>", "</BrowserRouter>"));
        layers.push(("<Routes>", "</Routes>"));
        "<Route path=\"/\" element={<App />} />"
    } else {
        "<App />"
    };

    let root = if schema.typescript {
        "document.getElementById('root')!"
    } else {
        "document.getElementById('root')"
    };

    format!(
        "{}\n\ncreateRoot({}).render(\n{},\n)\n",
        lines.join("\n"),
        root,
        nest(inner, &layers, 2)
    )
}

/// Generated files the entry point imports
pub fn entry_references(schema: &ChoiceSchema) -> Vec<String> {
    let mut refs = vec![layout::root_component_path(schema)];
    if let Some(css) = layout::global_css_path(schema) {
        refs.push(css.to_string());
    }
    refs.extend(
        providers(schema)
            .iter()
            .map(|p| format!("{}.{}", p.module(schema), schema.script_ext())),
    );
    refs
}

const APP_CSS: &str = r#".app {
  max-width: 1280px;
  margin: 0 auto;
  padding: 2rem;
  text-align: center;
}

.card {
  padding: 2em;
}

button {
  border-radius: 8px;
  border: 1px solid transparent;
  padding: 0.6em 1.2em;
  font-size: 1em;
  font-weight: 500;
  font-family: inherit;
  background-color: #1a1a1a;
  cursor: pointer;
  transition: border-color 0.25s;
}

button:hover {
  border-color: #646cff;
}
"#;

/// Stylesheets and ambient type declarations around `App`
pub fn shell(schema: &ChoiceSchema, files: &mut SourceFileSet) {
    match schema.styling {
        Styling::Css => {
            files.insert("src/index.css", BASE_CSS);
            files.insert("src/App.css", APP_CSS);
        }
        Styling::Tailwind => files.insert("src/index.css", TAILWIND_DIRECTIVES),
        Styling::StyledComponents => {}
    }
    if schema.typescript {
        files.insert("src/vite-env.d.ts", "/// <reference types=\"vite/client\" />\n");
    }
}
