//! Type-checker configuration (tsconfig.json / jsconfig.json)

use super::pretty_json as pretty;
use crate::choices::{ChoiceSchema, NextRouter, Testing};
use crate::error::Result;
use crate::files::ConfigFileSet;
use serde_json::{json, Value};

/// Vite: bundler resolution, automatic JSX runtime, no emit. The dev-server
/// config file is checked by a separate Node-environment config.
fn vite_tsconfig() -> Value {
    json!({
        "compilerOptions": {
            "target": "ES2020",
            "useDefineForClassFields": true,
            "lib": ["ES2020", "DOM", "DOM.Iterable"],
            "module": "ESNext",
            "skipLibCheck": true,
            "moduleResolution": "bundler",
            "allowImportingTsExtensions": true,
            "resolveJsonModule": true,
            "isolatedModules": true,
            "noEmit": true,
            "jsx": "react-jsx",
            "strict": true,
            "noUnusedLocals": true,
            "noUnusedParameters": true,
            "noFallthroughCasesInSwitch": true,
            "baseUrl": ".",
            "paths": { "@/*": ["src/*"] }
        },
        "include": ["src"],
        "references": [{ "path": "./tsconfig.node.json" }]
    })
}

fn vite_node_tsconfig(schema: &ChoiceSchema) -> Value {
    let mut include = vec!["vite.config.ts"];
    if schema.testing == Testing::Vitest {
        include.push("vitest.config.ts");
    }
    json!({
        "compilerOptions": {
            "composite": true,
            "skipLibCheck": true,
            "module": "ESNext",
            "moduleResolution": "bundler",
            "allowSyntheticDefaultImports": true,
            "strict": true
        },
        "include": include
    })
}

/// Next.js: node resolution, JSX preserved for the framework's compiler,
/// no emit with incremental checking
fn next_tsconfig(router: NextRouter) -> Value {
    let mut config = json!({
        "compilerOptions": {
            "target": "ES2017",
            "lib": ["dom", "dom.iterable", "esnext"],
            "allowJs": true,
            "skipLibCheck": true,
            "strict": true,
            "noEmit": true,
            "esModuleInterop": true,
            "module": "esnext",
            "moduleResolution": "node",
            "resolveJsonModule": true,
            "isolatedModules": true,
            "jsx": "preserve",
            "incremental": true,
            "paths": { "@/*": ["./*"] }
        },
        "include": ["next-env.d.ts", "**/*.ts", "**/*.tsx"],
        "exclude": ["node_modules"]
    });

    if router == NextRouter::App {
        config["compilerOptions"]["plugins"] = json!([{ "name": "next" }]);
        if let Some(include) = config["include"].as_array_mut() {
            include.push(json!(".next/types/**/*.ts"));
        }
    }
    config
}

const NEXT_ENV: &str = "/// <reference types=\"next\" />\n\
/// <reference types=\"next/image-types/global\" />\n\
\n\
// NOTE: This file should not be edited\n\
// see https://nextjs.org/docs/basic-features/typescript for more information.\n";

/// Emit the type-checker files for a schema
pub fn emit(schema: &ChoiceSchema, files: &mut ConfigFileSet) -> Result<()> {
    match (schema.next_routing(), schema.typescript) {
        (None, true) => {
            files.insert_with_refs(
                "tsconfig.json",
                pretty(&vite_tsconfig())?,
                ["tsconfig.node.json"],
            );
            files.insert_with_refs(
                "tsconfig.node.json",
                pretty(&vite_node_tsconfig(schema))?,
                ["vite.config.ts"],
            );
        }
        (None, false) => {}
        (Some(router), true) => {
            files.insert_with_refs(
                "tsconfig.json",
                pretty(&next_tsconfig(router))?,
                ["next-env.d.ts"],
            );
            files.insert("next-env.d.ts", NEXT_ENV);
        }
        (Some(_), false) => {
            let jsconfig = json!({
                "compilerOptions": {
                    "paths": { "@/*": ["./*"] }
                }
            });
            files.insert("jsconfig.json", pretty(&jsconfig)?);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{next_schema, vite_schema};

    fn parse(files: &ConfigFileSet, path: &str) -> Value {
        serde_json::from_str(files.get(path).unwrap()).unwrap()
    }

    #[test]
    fn test_vite_typescript_has_node_split() {
        let schema = ChoiceSchema {
            typescript: true,
            testing: Testing::Vitest,
            ..vite_schema()
        };
        let mut files = ConfigFileSet::new();
        emit(&schema, &mut files).unwrap();

        let main = parse(&files, "tsconfig.json");
        assert_eq!(main["compilerOptions"]["moduleResolution"], "bundler");
        assert_eq!(main["compilerOptions"]["jsx"], "react-jsx");
        assert_eq!(main["compilerOptions"]["noEmit"], true);

        let node = parse(&files, "tsconfig.node.json");
        assert_eq!(node["include"], json!(["vite.config.ts", "vitest.config.ts"]));
    }

    #[test]
    fn test_next_typescript_has_no_node_split() {
        let schema = ChoiceSchema {
            typescript: true,
            ..next_schema(NextRouter::App)
        };
        let mut files = ConfigFileSet::new();
        emit(&schema, &mut files).unwrap();

        assert!(!files.contains("tsconfig.node.json"));
        assert!(files.contains("next-env.d.ts"));
        let main = parse(&files, "tsconfig.json");
        assert_eq!(main["compilerOptions"]["moduleResolution"], "node");
        assert_eq!(main["compilerOptions"]["jsx"], "preserve");
        assert_eq!(main["compilerOptions"]["incremental"], true);
        assert_eq!(main["compilerOptions"]["plugins"][0]["name"], "next");
    }

    #[test]
    fn test_pages_router_has_no_next_plugin() {
        let schema = ChoiceSchema {
            typescript: true,
            ..next_schema(NextRouter::Pages)
        };
        let mut files = ConfigFileSet::new();
        emit(&schema, &mut files).unwrap();
        let main = parse(&files, "tsconfig.json");
        assert!(main["compilerOptions"].get("plugins").is_none());
    }

    #[test]
    fn test_javascript_projects() {
        let mut vite_files = ConfigFileSet::new();
        emit(&vite_schema(), &mut vite_files).unwrap();
        assert!(vite_files.is_empty());

        let mut next_files = ConfigFileSet::new();
        emit(&next_schema(NextRouter::App), &mut next_files).unwrap();
        assert!(next_files.contains("jsconfig.json"));
    }
}
