//! Current and latest version lookup for tracked packages.

use regex::Regex;
use serde_json::Value;
use std::cell::OnceCell;
use std::path::Path;
use std::sync::LazyLock;
use std::time::Duration;

use crate::config::{PackageKind, SourceSettings, TrackedPackage};
use crate::shell::{CommandOptions, CommandRunner};

use super::compare::max_version;
use super::fetcher::JsonFetcher;
use super::installed::InstalledPackages;
use super::{VersionPair, UNKNOWN_VERSION};

/// Tags that mark a registry version as a prerelease.
static PRERELEASE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(dev|alpha|beta|rc)").expect("PRERELEASE_REGEX must compile")
});

/// PHP snippet that prints the interpreter version.
const RUNTIME_VERSION_SNIPPET: &str = "echo PHP_VERSION;";

/// Resolves version pairs for tracked packages.
///
/// Lookups never fail: a missing current version becomes
/// [`UNKNOWN_VERSION`] and a missing latest version becomes `None`.
pub struct VersionClient<'a> {
    fetcher: &'a dyn JsonFetcher,
    runner: &'a dyn CommandRunner,
    sources: &'a SourceSettings,
    project_root: &'a Path,
    command_timeout: Duration,
    installed: OnceCell<Option<InstalledPackages>>,
}

impl<'a> VersionClient<'a> {
    pub fn new(
        fetcher: &'a dyn JsonFetcher,
        runner: &'a dyn CommandRunner,
        sources: &'a SourceSettings,
        project_root: &'a Path,
        command_timeout: Duration,
    ) -> Self {
        Self {
            fetcher,
            runner,
            sources,
            project_root,
            command_timeout,
            installed: OnceCell::new(),
        }
    }

    /// Current and latest version of `package`.
    pub fn version_pair(&self, package: &TrackedPackage) -> VersionPair {
        VersionPair {
            current: self.current_version(package),
            latest: self.latest_version(package),
        }
    }

    /// Installed (registry) or running (runtime) version.
    pub fn current_version(&self, package: &TrackedPackage) -> String {
        let version = match package.kind {
            PackageKind::Registry => self.installed_version(&package.name),
            PackageKind::Runtime => self.runtime_version(),
        };
        version.unwrap_or_else(|| UNKNOWN_VERSION.to_string())
    }

    /// Latest stable version published upstream.
    pub fn latest_version(&self, package: &TrackedPackage) -> Option<String> {
        match package.kind {
            PackageKind::Registry => self.latest_registry_version(&package.name),
            PackageKind::Runtime => self.latest_runtime_version(),
        }
    }

    fn installed_version(&self, name: &str) -> Option<String> {
        let installed = self
            .installed
            .get_or_init(|| InstalledPackages::load(self.project_root));

        installed
            .as_ref()?
            .version_of(name)
            .map(|v| v.trim_start_matches('v').to_string())
    }

    fn runtime_version(&self) -> Option<String> {
        let options = CommandOptions {
            cwd: Some(self.project_root.to_path_buf()),
            timeout: Some(self.command_timeout),
            ..Default::default()
        };
        let args = vec!["-r".to_string(), RUNTIME_VERSION_SNIPPET.to_string()];

        match self.runner.run(&self.sources.runtime_binary, &args, &options) {
            Ok(result) if result.success => {
                let version = result.stdout.trim();
                if version.is_empty() {
                    None
                } else {
                    Some(version.to_string())
                }
            }
            Ok(result) => {
                tracing::debug!(
                    "{} exited with {:?}: {}",
                    self.sources.runtime_binary,
                    result.exit_code,
                    result.stderr.trim()
                );
                None
            }
            Err(e) => {
                tracing::debug!("Runtime version lookup failed: {}", e);
                None
            }
        }
    }

    fn latest_registry_version(&self, name: &str) -> Option<String> {
        let url = registry_url(&self.sources.registry_url, name);
        match self.fetcher.fetch_json(&url) {
            Ok(document) => latest_stable_from_registry(&document),
            Err(e) => {
                tracing::debug!("Registry lookup for {} failed: {:#}", name, e);
                None
            }
        }
    }

    fn latest_runtime_version(&self) -> Option<String> {
        match self.fetcher.fetch_json(&self.sources.runtime_releases_url) {
            Ok(document) => latest_from_release_index(&document),
            Err(e) => {
                tracing::debug!("Runtime release lookup failed: {:#}", e);
                None
            }
        }
    }
}

/// Metadata URL for a package on the registry.
pub fn registry_url(base: &str, name: &str) -> String {
    format!("{}/packages/{}.json", base.trim_end_matches('/'), name)
}

/// Whether a version string carries a prerelease tag.
pub fn is_prerelease(version: &str) -> bool {
    PRERELEASE_REGEX.is_match(version)
}

/// Highest stable version in a registry metadata document.
///
/// Expects `{"package": {"versions": {"<version>": {...}, ...}}}`.
pub fn latest_stable_from_registry(document: &Value) -> Option<String> {
    let versions = document.get("package")?.get("versions")?.as_object()?;

    let stable = versions
        .keys()
        .filter(|v| !is_prerelease(v))
        .map(|v| v.trim_start_matches('v').to_string());

    max_version(stable)
}

/// Highest version in a runtime release index.
///
/// Expects `{"<major>": {"<minor>": {"version": "x.y.z", ...}, ...}, ...}`;
/// entries of any other shape are skipped.
pub fn latest_from_release_index(document: &Value) -> Option<String> {
    let majors = document.as_object()?;

    let versions = majors
        .values()
        .filter_map(Value::as_object)
        .flat_map(|minors| minors.values())
        .filter_map(|info| info.get("version")?.as_str())
        .map(String::from);

    max_version(versions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::ScriptedRunner;
    use crate::versions::fetcher::StaticFetcher;
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    const REGISTRY: &str = "https://packagist.test";
    const RELEASES: &str = "https://php.test/releases/active.php";

    fn sources() -> SourceSettings {
        SourceSettings {
            registry_url: REGISTRY.to_string(),
            runtime_releases_url: RELEASES.to_string(),
            ..Default::default()
        }
    }

    fn laravel() -> TrackedPackage {
        TrackedPackage::new("laravel/framework", "Laravel", "x", PackageKind::Registry)
    }

    fn php() -> TrackedPackage {
        TrackedPackage::new("php", "PHP", "x", PackageKind::Runtime)
    }

    #[test]
    fn prerelease_tags_are_case_insensitive() {
        assert!(is_prerelease("2.x-dev"));
        assert!(is_prerelease("v1.0.0-ALPHA1"));
        assert!(is_prerelease("1.0.0-Beta"));
        assert!(is_prerelease("11.0.0-RC2"));
        assert!(!is_prerelease("v11.2.0"));
    }

    #[test]
    fn registry_latest_skips_prereleases_and_strips_v() {
        let doc = json!({"package": {"versions": {"v1.2.0": {}, "v1.3.0-beta": {}, "v1.2.5": {}}}});
        assert_eq!(latest_stable_from_registry(&doc), Some("1.2.5".to_string()));
    }

    #[test]
    fn registry_latest_uses_version_order_not_string_order() {
        let doc = json!({"package": {"versions": {"v10.9.0": {}, "v10.10.0": {}, "dev-master": {}}}});
        assert_eq!(latest_stable_from_registry(&doc), Some("10.10.0".to_string()));
    }

    #[test]
    fn registry_latest_none_for_unexpected_shape() {
        assert_eq!(latest_stable_from_registry(&json!({"package": {}})), None);
        assert_eq!(latest_stable_from_registry(&json!({"package": {"versions": []}})), None);
        assert_eq!(latest_stable_from_registry(&json!([1, 2])), None);
    }

    #[test]
    fn registry_latest_none_when_only_prereleases() {
        let doc = json!({"package": {"versions": {"dev-main": {}, "v2.0.0-rc1": {}}}});
        assert_eq!(latest_stable_from_registry(&doc), None);
    }

    #[test]
    fn release_index_picks_highest_version() {
        let doc = json!({
            "8": {
                "2": {"version": "8.2.20", "date": "04 Jul 2024"},
                "3": {"version": "8.3.9"},
                "4": {"version": "8.3.10"}
            },
            "7": {"4": {"version": "7.4.33"}}
        });
        assert_eq!(latest_from_release_index(&doc), Some("8.3.10".to_string()));
    }

    #[test]
    fn release_index_skips_malformed_entries() {
        let doc = json!({
            "8": {"3": {"version": 83}, "2": "oops", "1": {"version": "8.1.29"}},
            "notes": "ignored"
        });
        assert_eq!(latest_from_release_index(&doc), Some("8.1.29".to_string()));
        assert_eq!(latest_from_release_index(&json!({})), None);
    }

    #[test]
    fn registry_url_joins_without_double_slash() {
        assert_eq!(
            registry_url("https://packagist.org/", "laravel/framework"),
            "https://packagist.org/packages/laravel/framework.json"
        );
    }

    #[test]
    fn current_registry_version_reads_lock_file() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join("composer.lock"),
            r#"{"packages":[{"name":"laravel/framework","version":"v11.2.0"}]}"#,
        )
        .unwrap();
        let fetcher = StaticFetcher::new();
        let runner = ScriptedRunner::new();
        let sources = sources();
        let client =
            VersionClient::new(&fetcher, &runner, &sources, temp.path(), Duration::from_secs(5));

        assert_eq!(client.current_version(&laravel()), "11.2.0");
    }

    #[test]
    fn current_registry_version_unknown_without_lock_file() {
        let temp = TempDir::new().unwrap();
        let fetcher = StaticFetcher::new();
        let runner = ScriptedRunner::new();
        let sources = sources();
        let client =
            VersionClient::new(&fetcher, &runner, &sources, temp.path(), Duration::from_secs(5));

        assert_eq!(client.current_version(&laravel()), UNKNOWN_VERSION);
    }

    #[test]
    fn current_runtime_version_runs_interpreter() {
        let temp = TempDir::new().unwrap();
        let fetcher = StaticFetcher::new();
        let runner = ScriptedRunner::new().succeed("php", "8.3.4\n");
        let sources = sources();
        let client =
            VersionClient::new(&fetcher, &runner, &sources, temp.path(), Duration::from_secs(5));

        assert_eq!(client.current_version(&php()), "8.3.4");

        let calls = runner.calls_to("php");
        assert_eq!(calls[0].args, vec!["-r", "echo PHP_VERSION;"]);
        assert_eq!(calls[0].options.timeout, Some(Duration::from_secs(5)));
    }

    #[test]
    fn current_runtime_version_unknown_when_interpreter_missing_or_failing() {
        let temp = TempDir::new().unwrap();
        let fetcher = StaticFetcher::new();
        let sources = sources();

        let missing = ScriptedRunner::new();
        let client =
            VersionClient::new(&fetcher, &missing, &sources, temp.path(), Duration::from_secs(5));
        assert_eq!(client.current_version(&php()), UNKNOWN_VERSION);

        let failing = ScriptedRunner::new().fail("php", 255, "", "Fatal error");
        let client =
            VersionClient::new(&fetcher, &failing, &sources, temp.path(), Duration::from_secs(5));
        assert_eq!(client.current_version(&php()), UNKNOWN_VERSION);
    }

    #[test]
    fn latest_registry_version_fetches_package_metadata() {
        let temp = TempDir::new().unwrap();
        let fetcher = StaticFetcher::new().with(
            "https://packagist.test/packages/laravel/framework.json",
            json!({"package": {"versions": {"v11.2.0": {}, "v11.3.1": {}}}}),
        );
        let runner = ScriptedRunner::new();
        let sources = sources();
        let client =
            VersionClient::new(&fetcher, &runner, &sources, temp.path(), Duration::from_secs(5));

        assert_eq!(client.latest_version(&laravel()), Some("11.3.1".to_string()));
    }

    #[test]
    fn latest_version_none_on_network_failure() {
        let temp = TempDir::new().unwrap();
        let fetcher = StaticFetcher::new();
        let runner = ScriptedRunner::new();
        let sources = sources();
        let client =
            VersionClient::new(&fetcher, &runner, &sources, temp.path(), Duration::from_secs(5));

        assert_eq!(client.latest_version(&laravel()), None);
        assert_eq!(client.latest_version(&php()), None);
    }

    #[test]
    fn version_pair_for_runtime() {
        let temp = TempDir::new().unwrap();
        let fetcher = StaticFetcher::new().with(
            RELEASES,
            json!({"8": {"3": {"version": "8.3.10"}}}),
        );
        let runner = ScriptedRunner::new().succeed("php", "8.3.4");
        let sources = sources();
        let client =
            VersionClient::new(&fetcher, &runner, &sources, temp.path(), Duration::from_secs(5));

        let pair = client.version_pair(&php());

        assert_eq!(pair.current, "8.3.4");
        assert_eq!(pair.latest.as_deref(), Some("8.3.10"));
        assert!(pair.is_outdated());
    }
}
