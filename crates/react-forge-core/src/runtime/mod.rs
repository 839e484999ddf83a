//! Runtime detection
//!
//! Reports which package managers are installed. Nothing here spawns an
//! install; the result only shapes the wizard's package-manager choices.

pub mod check;

pub use check::{available, check_npm, check_yarn, detect_package_managers, PackageManagerInfo};
