//! Fixtures shared by the workflow tests.
use super::context::Project;
use crate::config::StarterConfig;
use crate::paths::ProjectPaths;
use crate::process::{CommandRunner, Invocation, RunOutput};
use crate::prompt::Confirm;
use anyhow::Result;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

pub(crate) const BARE_COMPOSER_JSON: &str = r#"{
    "name": "laravel/laravel",
    "type": "project",
    "require": {
        "php": "^8.2",
        "laravel/framework": "^11.0"
    }
}
"#;

pub(crate) const BOOST_GUIDELINES: &str = "<laravel-boost-guidelines>
=== foundation rules ===

# Laravel Boost Guidelines

## Conventions
- Follow the existing code conventions used in this application.

</laravel-boost-guidelines>
";

pub(crate) fn laravel_project(composer_json: &str) -> (tempfile::TempDir, Project) {
    let dir = tempfile::tempdir().expect("create temp dir");
    write(dir.path(), "composer.json", composer_json);
    let project = reload(dir.path());
    (dir, project)
}

/// A fresh project handle, so nothing cached from an earlier run leaks in.
pub(crate) fn reload(root: &Path) -> Project {
    Project::new(ProjectPaths::new(root.to_path_buf()), StarterConfig::default())
}

pub(crate) fn write(root: &Path, rel: &str, contents: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent dir");
    }
    fs::write(&path, contents).expect("write fixture file");
}

pub(crate) fn read(root: &Path, rel: &str) -> String {
    fs::read_to_string(root.join(rel)).expect("read project file")
}

/// Every file under `root` keyed by its relative path.
pub(crate) fn snapshot(root: &Path) -> BTreeMap<String, String> {
    let mut files = BTreeMap::new();
    collect(root, root, &mut files);
    files
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
        let contents = fs::read_to_string(&path).expect("read file");
        files.insert(rel, contents);
    }
}

/// Records each invocation as a space-joined argv line.
#[derive(Debug, Default)]
pub(crate) struct RecordingRunner {
    pub(crate) calls: Vec<String>,
    fail_prefix: Option<String>,
}

impl RecordingRunner {
    /// Exit non-zero for any invocation whose line starts with `prefix`.
    pub(crate) fn failing_on(prefix: &str) -> Self {
        Self {
            calls: Vec::new(),
            fail_prefix: Some(prefix.to_string()),
        }
    }
}

impl CommandRunner for RecordingRunner {
    fn run(&mut self, invocation: &Invocation, _cwd: &Path) -> Result<RunOutput> {
        let mut words = vec![invocation.program.as_str()];
        words.extend(invocation.args.iter().map(String::as_str));
        let line = words.join(" ");
        let fail = self
            .fail_prefix
            .as_deref()
            .is_some_and(|prefix| line.starts_with(prefix));
        self.calls.push(line);
        if fail {
            return Ok(RunOutput {
                success: false,
                exit_code: Some(1),
                stdout: String::new(),
                stderr: "simulated failure".to_string(),
            });
        }
        Ok(RunOutput {
            success: true,
            exit_code: Some(0),
            ..RunOutput::default()
        })
    }
}

/// Gives the same answer to every question and remembers what was asked.
#[derive(Debug)]
pub(crate) struct ScriptedConfirm {
    answer: bool,
    pub(crate) questions: Vec<String>,
}

impl ScriptedConfirm {
    pub(crate) fn answering(answer: bool) -> Self {
        Self {
            answer,
            questions: Vec::new(),
        }
    }
}

impl Confirm for ScriptedConfirm {
    fn confirm(&mut self, question: &str, _default: bool) -> Result<bool> {
        self.questions.push(question.to_string());
        Ok(self.answer)
    }
}
