//! Shared test infrastructure for integration tests.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

pub const COMPOSER_JSON: &str = r#"{
    "name": "laravel/laravel",
    "type": "project",
    "require": {
        "php": "^8.2",
        "laravel/framework": "^11.0",
        "laravel/horizon": "^5.24"
    },
    "require-dev": {
        "barryvdh/laravel-ide-helper": "^3.1"
    },
    "scripts": {
        "post-autoload-dump": [
            "Illuminate\\Foundation\\ComposerScripts::postAutoloadDump",
            "@php artisan package:discover --ansi"
        ]
    }
}
"#;

pub const PACKAGE_JSON: &str = r#"{
    "private": true,
    "type": "module",
    "scripts": {
        "build": "vite build",
        "dev": "vite"
    }
}
"#;

pub const CLAUDE_MD: &str = "<laravel-boost-guidelines>
=== foundation rules ===

# Laravel Boost Guidelines

## Conventions
- Follow the existing code conventions used in this application.

</laravel-boost-guidelines>
";

/// A throwaway Laravel project whose tools are stand-in commands.
pub struct ProjectFixture {
    dir: TempDir,
}

/// Captured output of one `starter` run.
#[derive(Debug)]
pub struct RunResult {
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

impl ProjectFixture {
    /// Project whose composer, npm and php commands all succeed without
    /// doing anything.
    pub fn new() -> anyhow::Result<Self> {
        Self::with_tools("true", "true", "true")
    }

    pub fn with_tools(composer: &str, npm: &str, php: &str) -> anyhow::Result<Self> {
        let dir = TempDir::new()?;
        let root = dir.path();
        fs::write(root.join("composer.json"), COMPOSER_JSON)?;
        fs::write(root.join("package.json"), PACKAGE_JSON)?;
        fs::write(root.join("CLAUDE.md"), CLAUDE_MD)?;
        let config = serde_json::json!({
            "schema_version": 1,
            "composer": composer,
            "npm": npm,
            "php": php,
        });
        fs::write(
            root.join(".starter.json"),
            serde_json::to_string_pretty(&config)?,
        )?;
        Ok(Self { dir })
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn read(&self, rel: &str) -> String {
        fs::read_to_string(self.root().join(rel)).expect("read project file")
    }

    /// Run `starter <args> --project <root>`.
    pub fn starter(&self, args: &[&str]) -> anyhow::Result<RunResult> {
        let output = Command::new(env!("CARGO_BIN_EXE_starter"))
            .args(args)
            .arg("--project")
            .arg(self.root())
            .env_remove("RUST_LOG")
            .output()?;
        Ok(RunResult::from(output))
    }

    /// Every file under the project keyed by relative path.
    pub fn snapshot(&self) -> BTreeMap<String, String> {
        let mut files = BTreeMap::new();
        collect(self.root(), self.root(), &mut files);
        files
    }
}

impl From<Output> for RunResult {
    fn from(output: Output) -> Self {
        Self {
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        }
    }
}

fn collect(root: &Path, dir: &Path, files: &mut BTreeMap<String, String>) {
    let mut entries: Vec<_> = fs::read_dir(dir)
        .expect("read dir")
        .map(|entry| entry.expect("dir entry").path())
        .collect();
    entries.sort();
    for path in entries {
        if path.is_dir() {
            collect(root, &path, files);
            continue;
        }
        let rel = path
            .strip_prefix(root)
            .expect("path under root")
            .to_string_lossy()
            .replace('\\', "/");
        files.insert(rel, fs::read_to_string(&path).expect("read file"));
    }
}
