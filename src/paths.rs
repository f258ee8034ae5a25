//! Typed paths into a Laravel project layout.
//!
//! Every step resolves its files through here so the layout is spelled out
//! once.
use std::path::{Path, PathBuf};

/// Directories created under the project root, each seeded with `.gitkeep`.
pub const APP_DIRECTORIES_REL: [&str; 5] = [
    "app/Actions",
    "app/DataObjects",
    "app/Enums",
    "app/Services",
    "app/Support",
];

pub const GITKEEP: &str = ".gitkeep";
pub const PHPSTAN_NEON_REL: &str = "phpstan.neon";
pub const CI_WORKFLOW_REL: &str = ".github/workflows/ci.yml";
pub const PEST_CONFIG_REL: &str = "tests/Pest.php";
pub const DOCS_SITE_REL: &str = "docs-site";
pub const STARTER_CONFIG_REL: &str = ".starter.json";

/// Convenience wrapper for locating project files.
#[derive(Debug, Clone)]
pub struct ProjectPaths {
    root: PathBuf,
}

impl ProjectPaths {
    /// Create a new path helper rooted at the project root.
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Return the project root used for path derivation.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Return the absolute paths of the scaffolded `app/` directories.
    pub fn app_directories(&self) -> Vec<PathBuf> {
        APP_DIRECTORIES_REL
            .iter()
            .map(|rel| self.root.join(rel))
            .collect()
    }

    /// Return the `composer.json` path.
    pub fn composer_json(&self) -> PathBuf {
        self.root.join("composer.json")
    }

    /// Return the `composer.lock` path.
    pub fn composer_lock(&self) -> PathBuf {
        self.root.join("composer.lock")
    }

    /// Return the `package.json` path.
    pub fn package_json(&self) -> PathBuf {
        self.root.join("package.json")
    }

    /// Return the `vendor/bin/pest` path.
    pub fn pest_binary(&self) -> PathBuf {
        self.root.join("vendor").join("bin").join("pest")
    }

    /// Return the `tests/Pest.php` path.
    pub fn pest_config(&self) -> PathBuf {
        self.root.join(PEST_CONFIG_REL)
    }

    /// Return the `docs-site/` directory path.
    pub fn docs_site_dir(&self) -> PathBuf {
        self.root.join(DOCS_SITE_REL)
    }

    /// Return the `CLAUDE.md` guideline document path.
    pub fn guidelines(&self) -> PathBuf {
        self.root.join("CLAUDE.md")
    }

    /// Return the optional `.starter.json` installer config path.
    pub fn starter_config(&self) -> PathBuf {
        self.root.join(STARTER_CONFIG_REL)
    }
}
