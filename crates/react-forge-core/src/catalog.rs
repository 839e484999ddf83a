//! Version catalog: package name to semver range
//!
//! The catalog is a single configuration asset. A default copy is embedded in
//! the binary; a replacement can be supplied with `--catalog` or the
//! `REACT_FORGE_CATALOG` environment variable.

use crate::error::{Result, ScaffoldError};
use anyhow::Context;
use semver::{Version, VersionReq};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Environment variable for overriding the catalog path
pub const CATALOG_ENV: &str = "REACT_FORGE_CATALOG";

const EMBEDDED_CATALOG: &str = include_str!("../assets/versions.yaml");

/// On-disk catalog format (assets/versions.yaml)
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CatalogFile {
    /// Oldest CLI version that understands this catalog
    #[serde(default)]
    min_cli_version: Option<String>,

    packages: BTreeMap<String, String>,
}

/// Validated package → version range table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionCatalog {
    min_cli_version: Option<String>,
    packages: BTreeMap<String, String>,
}

impl VersionCatalog {
    /// The catalog shipped with this release
    pub fn embedded() -> Result<Self> {
        Self::from_yaml(EMBEDDED_CATALOG)
    }

    /// Parse and validate a catalog. Every range must be a valid semver
    /// requirement.
    pub fn from_yaml(content: &str) -> Result<Self> {
        let file: CatalogFile =
            serde_yaml::from_str(content).map_err(|source| ScaffoldError::Parse {
                what: "version catalog".to_string(),
                source,
            })?;

        for (package, range) in &file.packages {
            VersionReq::parse(range).map_err(|source| ScaffoldError::InvalidRange {
                package: package.clone(),
                range: range.clone(),
                source,
            })?;
        }

        Ok(Self {
            min_cli_version: file.min_cli_version,
            packages: file.packages,
        })
    }

    /// Read a catalog from disk
    pub fn from_path(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_yaml(&content)
            .with_context(|| format!("Invalid version catalog {}", path.display()))
    }

    /// Load the catalog named by `explicit`, else by [`CATALOG_ENV`], else the
    /// embedded one
    pub fn load(explicit: Option<&Path>) -> anyhow::Result<Self> {
        let from_env = std::env::var_os(CATALOG_ENV).map(PathBuf::from);
        match explicit.map(Path::to_path_buf).or(from_env) {
            Some(path) => {
                tracing::debug!(path = %path.display(), "loading version catalog");
                Self::from_path(&path)
            }
            None => Ok(Self::embedded()?),
        }
    }

    /// Version range for a package
    pub fn range(&self, package: &str) -> Result<&str> {
        self.packages
            .get(package)
            .map(String::as_str)
            .ok_or_else(|| ScaffoldError::MissingPackage(package.to_string()))
    }

    pub fn contains(&self, package: &str) -> bool {
        self.packages.contains_key(package)
    }

    pub fn len(&self) -> usize {
        self.packages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }

    /// Returns a warning message if the CLI is older than the catalog expects
    pub fn compatibility_warning(&self, cli_version: &str, upgrade_command: &str) -> Option<String> {
        let required = self.min_cli_version.as_deref()?;
        check_compatibility(cli_version, required, upgrade_command)
    }
}

/// Compare the CLI version against the version a catalog requires.
/// Unparseable versions never produce a warning.
pub fn check_compatibility(
    cli_version: &str,
    required_version: &str,
    upgrade_command: &str,
) -> Option<String> {
    let cli_ver = parse_version(cli_version).ok()?;
    let required_ver = parse_version(required_version).ok()?;

    if cli_ver < required_ver {
        Some(format!(
            "This version catalog was written for create-react-forge {} or newer.\n\
             You are running version {}.\n\
             Consider updating: {}",
            required_version, cli_version, upgrade_command
        ))
    } else {
        None
    }
}

fn parse_version(version_str: &str) -> std::result::Result<Version, semver::Error> {
    let cleaned = version_str.strip_prefix('v').unwrap_or(version_str);
    Version::parse(cleaned)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_catalog_is_valid() {
        let catalog = VersionCatalog::embedded().unwrap();
        assert!(!catalog.is_empty());
        assert_eq!(catalog.range("react").unwrap(), "^18.3.1");
        assert!(catalog.contains("@tanstack/react-query"));
    }

    #[test]
    fn test_invalid_range_rejected() {
        let err = VersionCatalog::from_yaml("packages:\n  react: \"not a range\"\n").unwrap_err();
        assert!(matches!(err, ScaffoldError::InvalidRange { ref package, .. } if package == "react"));
    }

    #[test]
    fn test_missing_package() {
        let catalog = VersionCatalog::from_yaml("packages:\n  react: \"^18.0.0\"\n").unwrap();
        let err = catalog.range("vite").unwrap_err();
        assert!(matches!(err, ScaffoldError::MissingPackage(ref p) if p == "vite"));
    }

    #[test]
    fn test_cli_older_than_catalog() {
        let warning = check_compatibility("0.1.0", "0.2.0", "cargo install create-react-forge --force");
        assert!(warning.unwrap().contains("0.2.0"));
    }

    #[test]
    fn test_cli_same_or_newer_than_catalog() {
        assert!(check_compatibility("0.2.0", "0.2.0", "upgrade").is_none());
        assert!(check_compatibility("v0.3.0", "0.2.0", "upgrade").is_none());
    }

    #[test]
    fn test_invalid_versions_skip_warning() {
        assert!(check_compatibility("invalid", "0.1.0", "upgrade").is_none());
    }

    #[test]
    fn test_catalog_without_min_version_never_warns() {
        let catalog = VersionCatalog::from_yaml("packages:\n  react: \"^18.0.0\"\n").unwrap();
        assert!(catalog.compatibility_warning("0.0.1", "upgrade").is_none());
    }
}
