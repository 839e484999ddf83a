//! Generated file sets with cross-file reference tracking

use crate::error::{Result, ScaffoldError};
use std::collections::BTreeMap;

/// Body of one generated file plus the project paths it points at
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    pub body: String,
    pub references: Vec<String>,
}

/// Relative path → generated file, ordered by path
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileSet {
    files: BTreeMap<String, GeneratedFile>,
}

/// Generated configuration artifacts (build tool, type checker, styling, tests)
pub type ConfigFileSet = FileSet;

/// Generated application sources
pub type SourceFileSet = FileSet;

impl FileSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, path: impl Into<String>, body: impl Into<String>) {
        self.insert_with_refs(path, body, Vec::<String>::new());
    }

    /// Insert a file that references other generated paths
    pub fn insert_with_refs<I, S>(&mut self, path: impl Into<String>, body: impl Into<String>, refs: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.files.insert(
            path.into(),
            GeneratedFile {
                body: body.into(),
                references: refs.into_iter().map(Into::into).collect(),
            },
        );
    }

    pub fn get(&self, path: &str) -> Option<&str> {
        self.files.get(path).map(|f| f.body.as_str())
    }

    pub fn references(&self, path: &str) -> &[String] {
        self.files
            .get(path)
            .map(|f| f.references.as_slice())
            .unwrap_or(&[])
    }

    pub fn contains(&self, path: &str) -> bool {
        self.files.contains_key(path)
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &GeneratedFile)> {
        self.files.iter().map(|(path, file)| (path.as_str(), file))
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// Every reference in every set must point at a file in one of the sets
pub fn verify_references(sets: &[&FileSet]) -> Result<()> {
    for set in sets {
        for (path, file) in set.iter() {
            for target in &file.references {
                if !sets.iter().any(|s| s.contains(target)) {
                    return Err(ScaffoldError::Invariant(format!(
                        "'{}' references '{}', which is not generated",
                        path, target
                    )));
                }
            }
        }
    }
    Ok(())
}
