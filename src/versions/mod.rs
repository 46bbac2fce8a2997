//! Version lookup for tracked packages.
//!
//! This module provides:
//! - [`VersionClient`] resolving current/latest pairs per package
//! - [`JsonFetcher`] and [`HttpFetcher`] for registry and release-index calls
//! - [`compare_versions`] for free-form version ordering
//! - [`InstalledPackages`] reading `composer.lock`

pub mod client;
pub mod compare;
pub mod fetcher;
pub mod installed;

pub use client::{
    is_prerelease, latest_from_release_index, latest_stable_from_registry, registry_url,
    VersionClient,
};
pub use compare::{canonicalize, compare_versions, max_version, version_lt};
pub use fetcher::{HttpFetcher, JsonFetcher, StaticFetcher, DEFAULT_HTTP_TIMEOUT};
pub use installed::InstalledPackages;

use serde::Serialize;

/// Placeholder for a current version that could not be determined.
pub const UNKNOWN_VERSION: &str = "Unknown";

/// Current and latest version of one package for one report cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VersionPair {
    /// Installed or running version, [`UNKNOWN_VERSION`] when undetermined.
    pub current: String,
    /// Latest stable upstream version, `None` when the lookup failed.
    pub latest: Option<String>,
}

impl VersionPair {
    /// Whether an upgrade is available.
    pub fn is_outdated(&self) -> bool {
        self.latest
            .as_deref()
            .is_some_and(|latest| is_outdated(&self.current, latest))
    }
}

/// Whether `current` sorts strictly below `latest`.
///
/// An [`UNKNOWN_VERSION`] current version is never outdated.
pub fn is_outdated(current: &str, latest: &str) -> bool {
    current != UNKNOWN_VERSION && version_lt(current, latest)
}
