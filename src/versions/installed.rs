//! Installed package versions from `composer.lock`.

use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Lock file name, relative to the project root.
pub const LOCK_FILE: &str = "composer.lock";

#[derive(Debug, Deserialize)]
struct LockFile {
    #[serde(default)]
    packages: Vec<LockedPackage>,
    #[serde(default, rename = "packages-dev")]
    packages_dev: Vec<LockedPackage>,
}

#[derive(Debug, Clone, Deserialize)]
struct LockedPackage {
    name: String,
    version: String,
}

/// Versions of everything pinned in a lock file.
#[derive(Debug, Clone, Default)]
pub struct InstalledPackages {
    packages: Vec<LockedPackage>,
}

impl InstalledPackages {
    /// Read `composer.lock` from `project_root`.
    ///
    /// Returns `None` if the file is missing or unreadable.
    pub fn load(project_root: &Path) -> Option<Self> {
        let path = project_root.join(LOCK_FILE);
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) => {
                tracing::debug!("Cannot read {}: {}", path.display(), e);
                return None;
            }
        };

        match Self::parse(&content) {
            Ok(installed) => Some(installed),
            Err(e) => {
                tracing::warn!("Ignoring malformed {}: {}", path.display(), e);
                None
            }
        }
    }

    /// Parse lock file JSON.
    pub fn parse(content: &str) -> serde_json::Result<Self> {
        let lock: LockFile = serde_json::from_str(content)?;
        let mut packages = lock.packages;
        packages.extend(lock.packages_dev);
        Ok(Self { packages })
    }

    /// Installed version of `name`, as written in the lock file.
    pub fn version_of(&self, name: &str) -> Option<&str> {
        self.packages
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
            .map(|p| p.version.as_str())
    }

    /// Number of locked packages.
    pub fn len(&self) -> usize {
        self.packages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }
}
