//! Build tool, linter and repository configs

use super::pretty_json;
use crate::choices::{ChoiceSchema, Framework, Styling};
use crate::error::Result;
use crate::files::ConfigFileSet;
use crate::layout;
use serde_json::json;

fn vite_config() -> String {
    "import { defineConfig } from 'vite'\n\
     import react from '@vitejs/plugin-react'\n\
     import { fileURLToPath } from 'node:url'\n\
     \n\
     // https://vite.dev/config/\n\
     export default defineConfig({\n\
     \x20 plugins: [react()],\n\
     \x20 resolve: {\n\
     \x20   alias: {\n\
     \x20     '@': fileURLToPath(new URL('./src', import.meta.url)),\n\
     \x20   },\n\
     \x20 },\n\
     })\n"
        .to_string()
}

fn index_html(project_name: &str, entry: &str) -> String {
    format!(
        "<!doctype html>\n\
         <html lang=\"en\">\n\
         \x20 <head>\n\
         \x20   <meta charset=\"UTF-8\" />\n\
         \x20   <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\" />\n\
         \x20   <title>{}</title>\n\
         \x20 </head>\n\
         \x20 <body>\n\
         \x20   <div id=\"root\"></div>\n\
         \x20   <script type=\"module\" src=\"/{}\"></script>\n\
         \x20 </body>\n\
         </html>\n",
        project_name, entry
    )
}

fn next_config() -> String {
    "/** @type {import('next').NextConfig} */\n\
     const nextConfig = {\n\
     \x20 reactStrictMode: true,\n\
     }\n\
     \n\
     export default nextConfig\n"
        .to_string()
}

fn vite_eslint_config(typescript: bool) -> String {
    let plugins = "    plugins: {\n      'react-hooks': reactHooks,\n      'react-refresh': reactRefresh,\n    },\n";
    let refresh_rule = "      'react-refresh/only-export-components': [\n        'warn',\n        { allowConstantExport: true },\n      ],\n";

    if typescript {
        format!(
            "import js from '@eslint/js'\n\
             import globals from 'globals'\n\
             import reactHooks from 'eslint-plugin-react-hooks'\n\
             import reactRefresh from 'eslint-plugin-react-refresh'\n\
             import tseslint from 'typescript-eslint'\n\
             \n\
             export default tseslint.config(\n\
             \x20 {{ ignores: ['dist'] }},\n\
             \x20 {{\n\
             \x20   extends: [js.configs.recommended, ...tseslint.configs.recommended],\n\
             \x20   files: ['**/*.{{ts,tsx}}'],\n\
             \x20   languageOptions: {{\n\
             \x20     ecmaVersion: 2020,\n\
             \x20     globals: globals.browser,\n\
             \x20   }},\n\
             {plugins}\
             \x20   rules: {{\n\
             \x20     ...reactHooks.configs.recommended.rules,\n\
             {refresh_rule}\
             \x20   }},\n\
             \x20 }},\n\
             )\n"
        )
    } else {
        format!(
            "import js from '@eslint/js'\n\
             import globals from 'globals'\n\
             import reactHooks from 'eslint-plugin-react-hooks'\n\
             import reactRefresh from 'eslint-plugin-react-refresh'\n\
             \n\
             export default [\n\
             \x20 {{ ignores: ['dist'] }},\n\
             \x20 {{\n\
             \x20   files: ['**/*.{{js,jsx}}'],\n\
             \x20   languageOptions: {{\n\
             \x20     ecmaVersion: 2020,\n\
             \x20     globals: globals.browser,\n\
             \x20     parserOptions: {{\n\
             \x20       ecmaVersion: 'latest',\n\
             \x20       ecmaFeatures: {{ jsx: true }},\n\
             \x20       sourceType: 'module',\n\
             \x20     }},\n\
             \x20   }},\n\
             {plugins}\
             \x20   rules: {{\n\
             \x20     ...js.configs.recommended.rules,\n\
             \x20     ...reactHooks.configs.recommended.rules,\n\
             {refresh_rule}\
             \x20   }},\n\
             \x20 }},\n\
             ]\n"
        )
    }
}

fn gitignore(schema: &ChoiceSchema) -> String {
    let mut lines = vec![
        "# dependencies",
        "node_modules",
        "",
        "# build output",
        layout::output_dir(schema),
    ];
    if !schema.is_vite() {
        lines.push("out");
    }
    lines.extend([
        "",
        "# testing",
        "coverage",
        "",
        "# env files",
        ".env*.local",
        "",
        "# deployment",
        ".vercel",
        ".netlify",
        "",
        "# logs",
        "*.log",
        "npm-debug.log*",
        "yarn-debug.log*",
        "yarn-error.log*",
        "",
        "# misc",
        ".DS_Store",
    ]);
    if schema.typescript {
        lines.push("*.tsbuildinfo");
    }
    let mut body = lines.join("\n");
    body.push('\n');
    body
}

/// Emit build-tool, linter and repository files
pub fn emit(schema: &ChoiceSchema, project_name: &str, files: &mut ConfigFileSet) -> Result<()> {
    match schema.framework() {
        Framework::Vite => {
            files.insert(format!("vite.config.{}", schema.script_ext()), vite_config());
            if let Some(entry) = layout::entry_path(schema) {
                files.insert_with_refs("index.html", index_html(project_name, &entry), [entry]);
            }
            if schema.linting {
                files.insert("eslint.config.js", vite_eslint_config(schema.typescript));
            }
        }
        Framework::NextJs => {
            files.insert("next.config.mjs", next_config());
            if schema.styling == Styling::StyledComponents {
                let babelrc = json!({
                    "presets": ["next/babel"],
                    "plugins": [["styled-components", { "ssr": true, "displayName": true }]]
                });
                files.insert(".babelrc", pretty_json(&babelrc)?);
            }
            if schema.linting {
                let eslintrc = json!({ "extends": "next/core-web-vitals" });
                files.insert(".eslintrc.json", pretty_json(&eslintrc)?);
            }
        }
    }

    files.insert(".gitignore", gitignore(schema));
    Ok(())
}
