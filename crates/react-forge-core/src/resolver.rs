//! Dependency resolution: choice schema → package manifest
//!
//! Resolution is a fold over an ordered list of axis contributions. Each
//! contribution names the packages one axis adds and the bucket they land in;
//! version ranges come from the [`VersionCatalog`]. The same schema and
//! catalog always yield the same manifest.

use crate::catalog::VersionCatalog;
use crate::choices::{
    ChoiceSchema, Deployment, Framework, NextRouter, Routing, StateManagement, Styling, Testing,
};
use crate::error::{Result, ScaffoldError, Warning, WarningKind};
use serde::Serialize;
use std::collections::BTreeMap;

const CORE: &[&str] = &["react", "react-dom"];
const VITE: &[&str] = &["vite", "@vitejs/plugin-react"];
const NEXT: &[&str] = &["next"];
const TYPESCRIPT: &[&str] = &["typescript", "@types/react", "@types/react-dom", "@types/node"];
const TAILWIND: &[&str] = &["tailwindcss", "postcss", "autoprefixer"];
const STYLED_COMPONENTS: &[&str] = &["styled-components"];
const STYLED_COMPONENTS_TRANSFORM: &[&str] = &["babel-plugin-styled-components"];
const REACT_ROUTER: &[&str] = &["react-router-dom"];
const REDUX: &[&str] = &["@reduxjs/toolkit", "react-redux"];
const ZUSTAND: &[&str] = &["zustand"];
const AXIOS: &[&str] = &["axios"];
const REACT_QUERY: &[&str] = &["@tanstack/react-query"];
const TESTING_LIBRARY: &[&str] = &[
    "@testing-library/react",
    "@testing-library/jest-dom",
    "@testing-library/user-event",
];
const VITEST: &[&str] = &["vitest", "jsdom"];
const VITEST_NEXT: &[&str] = &["@vitejs/plugin-react"];
const JEST: &[&str] = &["jest", "jest-environment-jsdom"];
const JEST_BABEL: &[&str] = &[
    "babel-jest",
    "@babel/preset-env",
    "@babel/preset-react",
    "identity-obj-proxy",
];
const JEST_BABEL_TYPESCRIPT: &[&str] = &["@babel/preset-typescript"];
const JEST_TYPES: &[&str] = &["@types/jest"];
const ESLINT_VITE: &[&str] = &[
    "eslint",
    "@eslint/js",
    "globals",
    "eslint-plugin-react-hooks",
    "eslint-plugin-react-refresh",
];
const ESLINT_VITE_TYPESCRIPT: &[&str] = &["typescript-eslint"];
const ESLINT_NEXT: &[&str] = &["eslint", "eslint-config-next"];
const VERCEL: &[&str] = &["vercel"];
const NETLIFY: &[&str] = &["netlify-cli"];

/// Which manifest map a package belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bucket {
    Runtime,
    Dev,
}

/// Placement for build tooling.
///
/// Vite tooling only runs at build time. Next.js runs its own server in
/// production, so its tooling ships as runtime dependencies.
pub fn tooling_bucket(framework: Framework) -> Bucket {
    match framework {
        Framework::Vite => Bucket::Dev,
        Framework::NextJs => Bucket::Runtime,
    }
}

/// Packages one axis adds to the manifest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contribution {
    pub axis: &'static str,
    pub bucket: Bucket,
    pub packages: &'static [&'static str],
}

impl Contribution {
    fn new(axis: &'static str, bucket: Bucket, packages: &'static [&'static str]) -> Self {
        Self {
            axis,
            bucket,
            packages,
        }
    }
}

/// Resolved dependency listing of the generated project
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PackageManifest {
    pub dependencies: BTreeMap<String, String>,
    #[serde(rename = "devDependencies")]
    pub dev_dependencies: BTreeMap<String, String>,
}

impl PackageManifest {
    pub fn bucket(&self, bucket: Bucket) -> &BTreeMap<String, String> {
        match bucket {
            Bucket::Runtime => &self.dependencies,
            Bucket::Dev => &self.dev_dependencies,
        }
    }

    /// Bucket holding `package`, if any
    pub fn placement(&self, package: &str) -> Option<Bucket> {
        if self.dependencies.contains_key(package) {
            Some(Bucket::Runtime)
        } else if self.dev_dependencies.contains_key(package) {
            Some(Bucket::Dev)
        } else {
            None
        }
    }

    pub fn contains(&self, package: &str) -> bool {
        self.placement(package).is_some()
    }

    pub fn len(&self) -> usize {
        self.dependencies.len() + self.dev_dependencies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Fold one contribution into the manifest.
    ///
    /// A package may only ever live in one bucket; a second contribution
    /// placing it elsewhere is an internal error.
    fn with(mut self, contribution: &Contribution, catalog: &VersionCatalog) -> Result<Self> {
        for package in contribution.packages {
            let range = catalog.range(package)?.to_string();
            match self.placement(package) {
                Some(existing) if existing != contribution.bucket => {
                    return Err(ScaffoldError::Invariant(format!(
                        "package '{}' from axis '{}' is already placed in the other dependency group",
                        package, contribution.axis
                    )));
                }
                _ => {}
            }
            let target = match contribution.bucket {
                Bucket::Runtime => &mut self.dependencies,
                Bucket::Dev => &mut self.dev_dependencies,
            };
            target.insert(package.to_string(), range);
        }
        Ok(self)
    }
}

/// Ordered axis contributions for a schema
pub fn contributions(schema: &ChoiceSchema) -> Vec<Contribution> {
    let framework = schema.framework();
    let tooling = tooling_bucket(framework);
    let mut out = vec![Contribution::new("core", Bucket::Runtime, CORE)];

    out.push(match framework {
        Framework::Vite => Contribution::new("framework", tooling, VITE),
        Framework::NextJs => Contribution::new("framework", tooling, NEXT),
    });

    if schema.typescript {
        out.push(Contribution::new("language", tooling, TYPESCRIPT));
    }

    match schema.styling {
        Styling::Css => {}
        Styling::Tailwind => out.push(Contribution::new("styling", tooling, TAILWIND)),
        Styling::StyledComponents => {
            out.push(Contribution::new("styling", Bucket::Runtime, STYLED_COMPONENTS));
            if framework == Framework::NextJs {
                out.push(Contribution::new(
                    "styling",
                    tooling,
                    STYLED_COMPONENTS_TRANSFORM,
                ));
            }
        }
    }

    if schema.routing() == Some(Routing::ReactRouter) {
        out.push(Contribution::new("routing", Bucket::Runtime, REACT_ROUTER));
    }

    match schema.state_management {
        StateManagement::Redux => out.push(Contribution::new("stateManagement", Bucket::Runtime, REDUX)),
        StateManagement::Zustand => {
            out.push(Contribution::new("stateManagement", Bucket::Runtime, ZUSTAND))
        }
        StateManagement::None => {}
    }

    if schema.api.uses_axios() {
        out.push(Contribution::new("api", Bucket::Runtime, AXIOS));
    }
    if schema.api.uses_react_query() {
        out.push(Contribution::new("api", Bucket::Runtime, REACT_QUERY));
    }

    match schema.testing {
        Testing::Vitest => {
            out.push(Contribution::new("testing", Bucket::Dev, VITEST));
            out.push(Contribution::new("testing", Bucket::Dev, TESTING_LIBRARY));
            if framework == Framework::NextJs {
                out.push(Contribution::new("testing", Bucket::Dev, VITEST_NEXT));
            }
        }
        Testing::Jest => {
            out.push(Contribution::new("testing", Bucket::Dev, JEST));
            out.push(Contribution::new("testing", Bucket::Dev, TESTING_LIBRARY));
            if framework == Framework::Vite {
                out.push(Contribution::new("testing", Bucket::Dev, JEST_BABEL));
                if schema.typescript {
                    out.push(Contribution::new("testing", Bucket::Dev, JEST_BABEL_TYPESCRIPT));
                }
            }
            if schema.typescript {
                out.push(Contribution::new("testing", Bucket::Dev, JEST_TYPES));
            }
        }
        Testing::None => {}
    }

    if schema.linting {
        match framework {
            Framework::Vite => {
                out.push(Contribution::new("linting", Bucket::Dev, ESLINT_VITE));
                if schema.typescript {
                    out.push(Contribution::new("linting", Bucket::Dev, ESLINT_VITE_TYPESCRIPT));
                }
            }
            Framework::NextJs => out.push(Contribution::new("linting", Bucket::Dev, ESLINT_NEXT)),
        }
    }

    match schema.deployment {
        Deployment::Vercel => out.push(Contribution::new("deployment", Bucket::Dev, VERCEL)),
        Deployment::Netlify => out.push(Contribution::new("deployment", Bucket::Dev, NETLIFY)),
        Deployment::None => {}
    }

    out
}

/// Resolve a schema into its package manifest.
///
/// Either every requested package is placed or an error is returned; no
/// partial manifest escapes.
pub fn resolve(schema: &ChoiceSchema, catalog: &VersionCatalog) -> Result<PackageManifest> {
    let manifest = contributions(schema)
        .iter()
        .try_fold(PackageManifest::default(), |manifest, contribution| {
            manifest.with(contribution, catalog)
        })?;

    tracing::debug!(
        dependencies = manifest.dependencies.len(),
        dev_dependencies = manifest.dev_dependencies.len(),
        "resolved package manifest"
    );

    Ok(manifest)
}

/// Soft consistency checks; callers may display these but must not abort
pub fn check(schema: &ChoiceSchema) -> Vec<Warning> {
    let mut warnings = Vec::new();

    if schema.typescript && !schema.linting {
        warnings.push(Warning::new(
            WarningKind::TypeScriptWithoutLinting,
            "TypeScript is enabled without linting; type-aware lint rules will not run",
        ));
    }

    if schema.deployment != Deployment::None && !schema.init_git {
        warnings.push(Warning::new(
            WarningKind::DeploymentWithoutGit,
            format!(
                "{} deploys from a git repository, but git initialization is disabled",
                schema.deployment.display_name()
            ),
        ));
    }

    if schema.styling == Styling::StyledComponents && schema.next_routing() == Some(NextRouter::App) {
        warnings.push(Warning::new(
            WarningKind::StyledComponentsAppRouter,
            "styled-components only works in client components under the App Router",
        ));
    }

    if schema.testing == Testing::Jest && schema.framework() == Framework::Vite {
        warnings.push(Warning::new(
            WarningKind::JestManualTransform,
            "Jest has no Vite integration; tests are transformed with a separate Babel config",
        ));
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::choices::{ApiClient, FrameworkChoice, PackageManager};
    use crate::test_support::{matrix, vite_schema};
    use std::collections::BTreeSet;

    fn catalog() -> VersionCatalog {
        VersionCatalog::embedded().unwrap()
    }

    fn names(map: &BTreeMap<String, String>) -> BTreeSet<&str> {
        map.keys().map(String::as_str).collect()
    }

    fn all_names(manifest: &PackageManifest) -> BTreeSet<&str> {
        names(&manifest.dependencies)
            .union(&names(&manifest.dev_dependencies))
            .copied()
            .collect()
    }

    #[test]
    fn test_vite_typescript_tailwind_vitest_scenario() {
        let schema = ChoiceSchema {
            typescript: true,
            styling: Styling::Tailwind,
            testing: Testing::Vitest,
            ..vite_schema()
        };
        let manifest = resolve(&schema, &catalog()).unwrap();

        assert_eq!(
            names(&manifest.dependencies),
            BTreeSet::from(["react", "react-dom"])
        );
        for dev in [
            "tailwindcss",
            "postcss",
            "autoprefixer",
            "vite",
            "@vitejs/plugin-react",
            "typescript",
            "vitest",
            "@testing-library/react",
            "@testing-library/jest-dom",
            "@testing-library/user-event",
        ] {
            assert_eq!(manifest.placement(dev), Some(Bucket::Dev), "{}", dev);
        }
    }

    #[test]
    fn test_nextjs_styled_components_scenario() {
        let schema = ChoiceSchema {
            framework: FrameworkChoice::NextJs {
                router: NextRouter::App,
            },
            typescript: false,
            styling: Styling::StyledComponents,
            ..vite_schema()
        };
        let manifest = resolve(&schema, &catalog()).unwrap();

        assert_eq!(manifest.placement("styled-components"), Some(Bucket::Runtime));
        assert_eq!(
            manifest.placement("babel-plugin-styled-components"),
            Some(Bucket::Runtime)
        );
        assert_eq!(manifest.placement("next"), Some(Bucket::Runtime));
        assert!(!manifest.contains("typescript"));
    }

    #[test]
    fn test_vite_styled_components_has_no_transform_plugin() {
        let schema = ChoiceSchema {
            styling: Styling::StyledComponents,
            ..vite_schema()
        };
        let manifest = resolve(&schema, &catalog()).unwrap();
        assert!(manifest.contains("styled-components"));
        assert!(!manifest.contains("babel-plugin-styled-components"));
    }

    #[test]
    fn test_typescript_placement_follows_framework() {
        let vite = ChoiceSchema {
            typescript: true,
            ..vite_schema()
        };
        let next = ChoiceSchema {
            framework: FrameworkChoice::NextJs {
                router: NextRouter::Pages,
            },
            ..vite.clone()
        };
        let catalog = catalog();
        for package in TYPESCRIPT {
            assert_eq!(
                resolve(&vite, &catalog).unwrap().placement(package),
                Some(Bucket::Dev)
            );
            assert_eq!(
                resolve(&next, &catalog).unwrap().placement(package),
                Some(Bucket::Runtime)
            );
        }
    }

    #[test]
    fn test_api_axis_packages() {
        let catalog = catalog();
        let cases = [
            (ApiClient::AxiosReactQuery, vec!["axios", "@tanstack/react-query"]),
            (ApiClient::AxiosOnly, vec!["axios"]),
            (ApiClient::FetchReactQuery, vec!["@tanstack/react-query"]),
            (ApiClient::FetchOnly, vec![]),
            (ApiClient::None, vec![]),
        ];
        let base = all_names(&resolve(&vite_schema(), &catalog).unwrap())
            .into_iter()
            .map(str::to_string)
            .collect::<BTreeSet<_>>();

        for (api, expected) in cases {
            let schema = ChoiceSchema {
                api,
                ..vite_schema()
            };
            let manifest = resolve(&schema, &catalog).unwrap();
            let added: BTreeSet<&str> = all_names(&manifest)
                .into_iter()
                .filter(|name| !base.contains(*name))
                .collect();
            assert_eq!(added, expected.into_iter().collect::<BTreeSet<_>>(), "{:?}", api);
            for name in added {
                assert_eq!(manifest.placement(name), Some(Bucket::Runtime));
            }
        }
    }

    #[test]
    fn test_state_and_routing_packages() {
        let catalog = catalog();
        let redux = resolve(
            &ChoiceSchema {
                state_management: StateManagement::Redux,
                ..vite_schema()
            },
            &catalog,
        )
        .unwrap();
        assert!(redux.dependencies.contains_key("@reduxjs/toolkit"));
        assert!(redux.dependencies.contains_key("react-redux"));

        let routed = resolve(
            &ChoiceSchema {
                framework: FrameworkChoice::Vite {
                    routing: Routing::ReactRouter,
                },
                ..vite_schema()
            },
            &catalog,
        )
        .unwrap();
        assert!(routed.dependencies.contains_key("react-router-dom"));
        assert!(!resolve(&vite_schema(), &catalog)
            .unwrap()
            .contains("react-router-dom"));
    }

    #[test]
    fn test_testing_bundles_are_exclusive() {
        let catalog = catalog();
        let jest = resolve(
            &ChoiceSchema {
                testing: Testing::Jest,
                typescript: true,
                ..vite_schema()
            },
            &catalog,
        )
        .unwrap();
        assert!(jest.dev_dependencies.contains_key("jest"));
        assert!(jest.dev_dependencies.contains_key("babel-jest"));
        assert!(jest.dev_dependencies.contains_key("@babel/preset-typescript"));
        assert!(jest.dev_dependencies.contains_key("@types/jest"));
        assert!(!jest.contains("vitest"));

        let vitest = resolve(
            &ChoiceSchema {
                testing: Testing::Vitest,
                ..vite_schema()
            },
            &catalog,
        )
        .unwrap();
        assert!(!vitest.contains("jest"));
        assert!(!vitest.contains("babel-jest"));
    }

    #[test]
    fn test_deployment_cli_is_dev_dependency() {
        let catalog = catalog();
        let vercel = resolve(
            &ChoiceSchema {
                deployment: Deployment::Vercel,
                ..vite_schema()
            },
            &catalog,
        )
        .unwrap();
        assert_eq!(vercel.placement("vercel"), Some(Bucket::Dev));

        let netlify = resolve(
            &ChoiceSchema {
                deployment: Deployment::Netlify,
                package_manager: PackageManager::Yarn,
                ..vite_schema()
            },
            &catalog,
        )
        .unwrap();
        assert_eq!(netlify.placement("netlify-cli"), Some(Bucket::Dev));
    }

    #[test]
    fn test_every_combination_resolves_exactly_its_contributions() {
        let catalog = catalog();
        for schema in matrix() {
            let first = resolve(&schema, &catalog).unwrap();
            let second = resolve(&schema, &catalog).unwrap();
            assert_eq!(
                serde_json::to_string(&first).unwrap(),
                serde_json::to_string(&second).unwrap()
            );

            let expected: BTreeSet<&str> = contributions(&schema)
                .iter()
                .flat_map(|c| c.packages.iter().copied())
                .collect();
            assert_eq!(all_names(&first), expected, "{:?}", schema);
            assert!(names(&first.dependencies).is_disjoint(&names(&first.dev_dependencies)));
            assert!(first.dependencies.contains_key("react"));
            assert!(first.dependencies.contains_key("react-dom"));
        }
    }

    #[test]
    fn test_missing_catalog_entry_fails_without_partial_output() {
        let catalog = VersionCatalog::from_yaml(
            "packages:\n  react: \"^18.0.0\"\n  react-dom: \"^18.0.0\"\n",
        )
        .unwrap();
        let err = resolve(&vite_schema(), &catalog).unwrap_err();
        assert!(matches!(err, ScaffoldError::MissingPackage(ref p) if p == "vite"));
    }

    #[test]
    fn test_check_warns_for_typescript_without_linting() {
        let schema = ChoiceSchema {
            typescript: true,
            linting: false,
            ..vite_schema()
        };
        let warnings = check(&schema);
        assert!(warnings
            .iter()
            .any(|w| w.kind == WarningKind::TypeScriptWithoutLinting));

        let clean = ChoiceSchema {
            typescript: true,
            linting: true,
            ..vite_schema()
        };
        assert!(check(&clean).is_empty());
    }

    #[test]
    fn test_check_warns_for_deployment_without_git() {
        let schema = ChoiceSchema {
            deployment: Deployment::Netlify,
            init_git: false,
            ..vite_schema()
        };
        assert!(check(&schema)
            .iter()
            .any(|w| w.kind == WarningKind::DeploymentWithoutGit));
    }
}
