//! Registry of optional integrations present in the project.
//!
//! Presence is read from `composer.lock` (what is installed) and falls back
//! to the `require`/`require-dev` sections of `composer.json` (what is
//! declared) when no lockfile exists yet.
use crate::manifest::Manifest;
use crate::paths::ProjectPaths;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fs;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Integration {
    AdminPanel,
    QueueDashboard,
    DebugDashboard,
    PerformanceDashboard,
    ErrorTracking,
    IdeHelper,
}

impl Integration {
    pub const ALL: [Integration; 6] = [
        Integration::AdminPanel,
        Integration::QueueDashboard,
        Integration::DebugDashboard,
        Integration::PerformanceDashboard,
        Integration::ErrorTracking,
        Integration::IdeHelper,
    ];

    /// Composer package that provides the integration.
    pub fn package(self) -> &'static str {
        match self {
            Integration::AdminPanel => "filament/filament",
            Integration::QueueDashboard => "laravel/horizon",
            Integration::DebugDashboard => "laravel/telescope",
            Integration::PerformanceDashboard => "laravel/pulse",
            Integration::ErrorTracking => "sentry/sentry-laravel",
            Integration::IdeHelper => "barryvdh/laravel-ide-helper",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Integration::AdminPanel => "Filament",
            Integration::QueueDashboard => "Horizon",
            Integration::DebugDashboard => "Telescope",
            Integration::PerformanceDashboard => "Pulse",
            Integration::ErrorTracking => "Sentry",
            Integration::IdeHelper => "IDE Helper",
        }
    }
}

/// Where the registry learned about installed packages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RegistrySource {
    Lockfile,
    Manifest,
    Unavailable,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Integrations {
    present: BTreeSet<Integration>,
    source: RegistrySource,
}

#[derive(Debug, Deserialize)]
struct ComposerLock {
    #[serde(default)]
    packages: Vec<LockedPackage>,
    #[serde(default, rename = "packages-dev")]
    packages_dev: Vec<LockedPackage>,
}

#[derive(Debug, Deserialize)]
struct LockedPackage {
    name: String,
}

impl Integrations {
    /// Build a registry from a list of installed package names.
    pub fn from_packages<'a, I>(packages: I, source: RegistrySource) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let names: BTreeSet<&str> = packages.into_iter().collect();
        let present = Integration::ALL
            .into_iter()
            .filter(|integration| names.contains(integration.package()))
            .collect();
        Self { present, source }
    }

    /// Resolve the registry for a project.
    pub fn detect(paths: &ProjectPaths) -> Result<Self> {
        let lock_path = paths.composer_lock();
        if lock_path.is_file() {
            let bytes =
                fs::read(&lock_path).with_context(|| format!("read {}", lock_path.display()))?;
            let lock: ComposerLock = serde_json::from_slice(&bytes)
                .with_context(|| format!("parse {}", lock_path.display()))?;
            let names = lock
                .packages
                .iter()
                .chain(lock.packages_dev.iter())
                .map(|package| package.name.as_str());
            return Ok(Self::from_packages(names, RegistrySource::Lockfile));
        }

        let Some(manifest) = Manifest::load_optional(&paths.composer_json())? else {
            return Ok(Self::from_packages([], RegistrySource::Unavailable));
        };
        let declared = Integration::ALL
            .into_iter()
            .map(Integration::package)
            .filter(|package| {
                manifest.declares("require", package) || manifest.declares("require-dev", package)
            });
        Ok(Self::from_packages(declared, RegistrySource::Manifest))
    }

    pub fn contains(&self, integration: Integration) -> bool {
        self.present.contains(&integration)
    }

    pub fn present(&self) -> impl Iterator<Item = Integration> + '_ {
        self.present.iter().copied()
    }

    pub fn source(&self) -> RegistrySource {
        self.source
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project() -> (tempfile::TempDir, ProjectPaths) {
        let dir = tempfile::tempdir().expect("create temp dir");
        let paths = ProjectPaths::new(dir.path().to_path_buf());
        (dir, paths)
    }

    #[test]
    fn lockfile_lists_installed_packages() {
        let (_dir, paths) = project();
        std::fs::write(
            paths.composer_lock(),
            r#"{
                "packages": [{"name": "laravel/horizon", "version": "v5.0.0"}],
                "packages-dev": [{"name": "barryvdh/laravel-ide-helper"}]
            }"#,
        )
        .expect("write lock");
        std::fs::write(
            paths.composer_json(),
            r#"{"require": {"filament/filament": "^3.0"}}"#,
        )
        .expect("write manifest");

        let registry = Integrations::detect(&paths).expect("detect");
        assert_eq!(registry.source(), RegistrySource::Lockfile);
        assert_eq!(
            registry.present().collect::<Vec<_>>(),
            vec![Integration::QueueDashboard, Integration::IdeHelper]
        );
        assert!(!registry.contains(Integration::AdminPanel));
    }

    #[test]
    fn manifest_is_used_without_lockfile() {
        let (_dir, paths) = project();
        std::fs::write(
            paths.composer_json(),
            r#"{
                "require": {"laravel/pulse": "^1.0", "sentry/sentry-laravel": "^4.0"},
                "require-dev": {"laravel/telescope": "^5.0"}
            }"#,
        )
        .expect("write manifest");

        let registry = Integrations::detect(&paths).expect("detect");
        assert_eq!(registry.source(), RegistrySource::Manifest);
        assert!(registry.contains(Integration::PerformanceDashboard));
        assert!(registry.contains(Integration::ErrorTracking));
        assert!(registry.contains(Integration::DebugDashboard));
        assert!(!registry.contains(Integration::IdeHelper));
    }

    #[test]
    fn empty_project_has_no_integrations() {
        let (_dir, paths) = project();

        let registry = Integrations::detect(&paths).expect("detect");
        assert_eq!(registry.source(), RegistrySource::Unavailable);
        assert_eq!(registry.present().count(), 0);
    }

    #[test]
    fn malformed_lockfile_is_an_error() {
        let (_dir, paths) = project();
        std::fs::write(paths.composer_lock(), "{not json").expect("write lock");

        assert!(Integrations::detect(&paths).is_err());
    }
}
