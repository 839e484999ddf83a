//! Test-runner configuration and the shared setup script
//!
//! Both runners reference the same setup script path. Next.js projects using
//! Jest delegate to `next/jest`; Vite has no Jest integration, so those
//! projects get an explicit `babel-jest` transform plus a Babel config.

use crate::choices::{ChoiceSchema, Framework, Testing};
use crate::files::ConfigFileSet;
use crate::layout;

fn setup_script(testing: Testing) -> &'static str {
    match testing {
        Testing::Vitest => "import '@testing-library/jest-dom/vitest'\n",
        _ => "import '@testing-library/jest-dom'\n",
    }
}

fn vitest_config(schema: &ChoiceSchema, setup: &str) -> String {
    let test_block = format!(
        "  test: {{\n    globals: true,\n    environment: 'jsdom',\n    setupFiles: ['./{}'],\n    css: true,\n    reporters: ['default'],\n  }},",
        setup
    );

    match schema.framework() {
        Framework::Vite => format!(
            "import {{ defineConfig, mergeConfig }} from 'vitest/config'\n\
             import viteConfig from './vite.config'\n\
             \n\
             export default mergeConfig(\n\
             \x20 viteConfig,\n\
             \x20 defineConfig({{\n\
             {}\n\
             \x20 }}),\n\
             )\n",
            indent(&test_block, 2)
        ),
        Framework::NextJs => format!(
            "import {{ defineConfig }} from 'vitest/config'\n\
             import react from '@vitejs/plugin-react'\n\
             import {{ fileURLToPath }} from 'node:url'\n\
             \n\
             export default defineConfig({{\n\
             \x20 plugins: [react()],\n\
             \x20 resolve: {{\n\
             \x20   alias: {{\n\
             \x20     '@': fileURLToPath(new URL('./', import.meta.url)),\n\
             \x20   }},\n\
             \x20 }},\n\
             {}\n\
             }})\n",
            test_block
        ),
    }
}

fn indent(text: &str, spaces: usize) -> String {
    let pad = " ".repeat(spaces);
    text.lines()
        .map(|line| format!("{}{}", pad, line))
        .collect::<Vec<_>>()
        .join("\n")
}

fn next_jest_config(setup: &str) -> String {
    format!(
        "const nextJest = require('next/jest')\n\
         \n\
         const createJestConfig = nextJest({{\n\
         \x20 // Path to the Next.js app, so next.config and .env files are loaded\n\
         \x20 dir: './',\n\
         }})\n\
         \n\
         /** @type {{import('jest').Config}} */\n\
         const customJestConfig = {{\n\
         \x20 testEnvironment: 'jsdom',\n\
         \x20 setupFilesAfterEnv: ['<rootDir>/{}'],\n\
         \x20 moduleNameMapper: {{\n\
         \x20   '^@/(.*)$': '<rootDir>/$1',\n\
         \x20 }},\n\
         \x20 verbose: true,\n\
         }}\n\
         \n\
         module.exports = createJestConfig(customJestConfig)\n",
        setup
    )
}

fn vite_jest_config(setup: &str) -> String {
    format!(
        "/** @type {{import('jest').Config}} */\n\
         module.exports = {{\n\
         \x20 testEnvironment: 'jsdom',\n\
         \x20 setupFilesAfterEnv: ['<rootDir>/{}'],\n\
         \x20 transform: {{\n\
         \x20   '^.+\\\\.(js|jsx|ts|tsx)$': 'babel-jest',\n\
         \x20 }},\n\
         \x20 moduleNameMapper: {{\n\
         \x20   '\\\\.(css|less|scss)$': 'identity-obj-proxy',\n\
         \x20   '^@/(.*)$': '<rootDir>/src/$1',\n\
         \x20 }},\n\
         \x20 moduleFileExtensions: ['js', 'jsx', 'ts', 'tsx', 'json'],\n\
         \x20 verbose: true,\n\
         }}\n",
        setup
    )
}

fn babel_config(schema: &ChoiceSchema) -> String {
    let mut presets = vec![
        "    ['@babel/preset-env', { targets: { node: 'current' } }],".to_string(),
        "    ['@babel/preset-react', { runtime: 'automatic' }],".to_string(),
    ];
    if schema.typescript {
        presets.push("    '@babel/preset-typescript',".to_string());
    }
    format!(
        "// Used by babel-jest only; Vite does not read this file.\nmodule.exports = {{\n  presets: [\n{}\n  ],\n}}\n",
        presets.join("\n")
    )
}

/// Emit the runner config and setup script. Returns the runner config path.
pub fn emit(schema: &ChoiceSchema, files: &mut ConfigFileSet) -> Option<String> {
    if schema.testing == Testing::None {
        return None;
    }

    let setup = layout::setup_script_path(schema);
    files.insert(setup.clone(), setup_script(schema.testing));

    let config_path = match (schema.testing, schema.framework()) {
        (Testing::Vitest, framework) => {
            let path = format!("vitest.config.{}", schema.script_ext());
            let mut refs = vec![setup.clone()];
            if framework == Framework::Vite {
                refs.push(format!("vite.config.{}", schema.script_ext()));
            }
            files.insert_with_refs(path.clone(), vitest_config(schema, &setup), refs);
            path
        }
        (Testing::Jest, Framework::NextJs) => {
            let path = "jest.config.js".to_string();
            files.insert_with_refs(path.clone(), next_jest_config(&setup), [setup.clone()]);
            path
        }
        (Testing::Jest, Framework::Vite) => {
            files.insert("babel.config.cjs", babel_config(schema));
            let path = "jest.config.cjs".to_string();
            files.insert_with_refs(
                path.clone(),
                vite_jest_config(&setup),
                [setup.clone(), "babel.config.cjs".to_string()],
            );
            path
        }
        (Testing::None, _) => return None,
    };

    Some(config_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::choices::NextRouter;
    use crate::test_support::{next_schema, vite_schema};

    fn with_testing(schema: ChoiceSchema, testing: Testing) -> ChoiceSchema {
        ChoiceSchema { testing, ..schema }
    }

    #[test]
    fn test_vitest_on_vite_merges_vite_config() {
        let schema = ChoiceSchema {
            typescript: true,
            ..with_testing(vite_schema(), Testing::Vitest)
        };
        let mut files = ConfigFileSet::new();
        let path = emit(&schema, &mut files).unwrap();

        assert_eq!(path, "vitest.config.ts");
        let config = files.get(&path).unwrap();
        assert!(config.contains("mergeConfig"));
        assert!(config.contains("setupFiles: ['./src/setupTests.ts']"));
        assert!(config.contains("reporters: ['default']"));
        assert!(files.contains("src/setupTests.ts"));
        assert!(files
            .get("src/setupTests.ts")
            .unwrap()
            .contains("jest-dom/vitest"));
    }

    #[test]
    fn test_jest_on_next_uses_framework_factory() {
        let schema = with_testing(next_schema(NextRouter::App), Testing::Jest);
        let mut files = ConfigFileSet::new();
        let path = emit(&schema, &mut files).unwrap();

        let config = files.get(&path).unwrap();
        assert!(config.contains("require('next/jest')"));
        assert!(config.contains("<rootDir>/setupTests.js"));
        assert!(!config.contains("babel-jest"));
        assert!(!files.contains("babel.config.cjs"));
    }

    #[test]
    fn test_jest_on_vite_uses_manual_transform() {
        let schema = ChoiceSchema {
            typescript: true,
            ..with_testing(vite_schema(), Testing::Jest)
        };
        let mut files = ConfigFileSet::new();
        let path = emit(&schema, &mut files).unwrap();

        assert_eq!(path, "jest.config.cjs");
        let config = files.get(&path).unwrap();
        assert!(config.contains("'babel-jest'"));
        assert!(config.contains("<rootDir>/src/setupTests.ts"));
        assert!(config.contains("'^@/(.*)$': '<rootDir>/src/$1'"));
        assert!(files
            .get("babel.config.cjs")
            .unwrap()
            .contains("@babel/preset-typescript"));
    }

    #[test]
    fn test_runner_config_always_ships_with_its_setup_script() {
        for testing in [Testing::Vitest, Testing::Jest] {
            for schema in [
                vite_schema(),
                next_schema(NextRouter::App),
                next_schema(NextRouter::Pages),
            ] {
                let schema = with_testing(schema, testing);
                let mut files = ConfigFileSet::new();
                let path = emit(&schema, &mut files).unwrap();
                let setup = layout::setup_script_path(&schema);
                assert!(files.references(&path).contains(&setup));
                assert!(files.contains(&setup));
            }
        }
    }

    #[test]
    fn test_no_testing_emits_nothing() {
        let mut files = ConfigFileSet::new();
        assert!(emit(&vite_schema(), &mut files).is_none());
        assert!(files.is_empty());
    }
}
