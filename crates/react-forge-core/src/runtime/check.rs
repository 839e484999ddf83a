//! Package manager detection

use crate::choices::PackageManager;
use std::process::Command;

/// Package manager detection result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageManagerInfo {
    pub kind: PackageManager,
    pub version: Option<String>,
    pub available: bool,
}

impl PackageManagerInfo {
    /// `name (version)` or `name (not installed)`
    pub fn describe(&self) -> String {
        if self.available {
            format!(
                "{} ({})",
                self.kind.display_name(),
                self.version.as_deref().unwrap_or("unknown")
            )
        } else {
            format!("{} (not installed)", self.kind.display_name())
        }
    }
}

fn probe(kind: PackageManager) -> PackageManagerInfo {
    let output = Command::new(kind.as_str()).arg("--version").output();

    match output {
        Ok(out) if out.status.success() => {
            let version = String::from_utf8_lossy(&out.stdout).trim().to_string();
            PackageManagerInfo {
                kind,
                version: Some(version),
                available: true,
            }
        }
        _ => PackageManagerInfo {
            kind,
            version: None,
            available: false,
        },
    }
}

/// Check if npm is available
pub fn check_npm() -> PackageManagerInfo {
    probe(PackageManager::Npm)
}

/// Check if Yarn is available
pub fn check_yarn() -> PackageManagerInfo {
    probe(PackageManager::Yarn)
}

/// Probe every supported package manager, in prompt order
pub fn detect_package_managers() -> Vec<PackageManagerInfo> {
    let detected = vec![check_npm(), check_yarn()];
    tracing::debug!(
        detected = ?detected.iter().map(|i| i.describe()).collect::<Vec<_>>(),
        "package manager detection"
    );
    detected
}

/// Package managers to offer. Falls back to all of them when none was found,
/// so the wizard never presents an empty choice.
pub fn available(detected: &[PackageManagerInfo]) -> Vec<PackageManager> {
    let found: Vec<PackageManager> = detected
        .iter()
        .filter(|info| info.available)
        .map(|info| info.kind)
        .collect();
    if found.is_empty() {
        PackageManager::ALL.to_vec()
    } else {
        found
    }
}
