//! Idempotent patching of the project's agent guideline document.
//!
//! Laravel Boost writes `CLAUDE.md` with its rules wrapped in
//! `<laravel-boost-guidelines>` tags and split into `=== ... ===` sections.
//! The starter pack adds three blocks to that document. Markers are plain
//! string anchors; the document is never parsed.
use anyhow::{Context, Result};
use regex::Regex;
use std::fs;
use std::path::Path;

pub const OPENING_MARKER: &str = "<laravel-boost-guidelines>";
pub const CLOSING_MARKER: &str = "</laravel-boost-guidelines>";
pub const FOUNDATION_SECTION_MARKER: &str = "=== foundation rules ===";
pub const CONVENTIONS_ANCHOR_LINE: &str = "## Conventions";

pub const DOCUMENTATION_HEADING: &str = "## Project Documentation";
pub const ACTIONS_RULE_MARKER: &str = "app/Actions";
pub const STARTER_RULES_MARKER: &str = "=== starter rules ===";

const DOCUMENTATION_SECTION: &str = "## Project Documentation

Developer documentation lives in `docs-site/` and is built with VitePress.

- Read `docs-site/architecture/` before changing how the application is structured.
- Follow `docs-site/patterns/` when adding Actions, DTOs or Services.
- Update the matching page in `docs-site/` when a change alters documented behavior.
- Preview the site with `npm run docs:dev`.

";

const ACTIONS_RULE: &str = "- Put business logic in single-purpose Action classes under `app/Actions`; keep controllers, jobs and commands thin.";

const STARTER_RULES: &str = "=== starter rules ===

## Laravel Starter

- Pass structured data between layers as `spatie/laravel-data` objects in `app/DataObjects`.
- Model fixed sets of values as backed enums in `app/Enums`.
- Wrap third-party APIs in Services under `app/Services`, bound to an interface.
- Run `composer analyse` (PHPStan) and `php artisan test` (Pest) before finishing a change.

";

/// A block the patcher can insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuidelineBlock {
    /// Documentation usage section, placed before the opening tag.
    Documentation,
    /// Single rule line, placed after the conventions heading.
    ActionsRule,
    /// Starter rules section, placed before the closing tag.
    StarterRules,
}

impl GuidelineBlock {
    pub fn label(self) -> &'static str {
        match self {
            GuidelineBlock::Documentation => "documentation section",
            GuidelineBlock::ActionsRule => "actions rule",
            GuidelineBlock::StarterRules => "starter rules section",
        }
    }
}

/// Patched text plus the blocks that were inserted into it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatchOutcome {
    pub text: String,
    pub inserted: Vec<GuidelineBlock>,
}

impl PatchOutcome {
    pub fn changed(&self) -> bool {
        !self.inserted.is_empty()
    }
}

/// Insert every missing block whose guard holds.
///
/// Guards are evaluated against `original`; insertions are applied to a
/// working copy so later anchors are located after earlier insertions.
pub fn patch_guidelines(original: &str) -> PatchOutcome {
    let mut text = original.to_string();
    let mut inserted = Vec::new();

    if original.contains(OPENING_MARKER) && !original.contains(DOCUMENTATION_HEADING) {
        if let Some(at) = text.find(OPENING_MARKER) {
            text.insert_str(at, DOCUMENTATION_SECTION);
            inserted.push(GuidelineBlock::Documentation);
        }
    }

    // The anchor line is located independently of the guards; when it is
    // missing nothing is inserted.
    if original.contains(FOUNDATION_SECTION_MARKER) && !original.contains(ACTIONS_RULE_MARKER) {
        if let Some(at) = after_anchor_line(&text) {
            let needs_break = at == text.len() && !text.ends_with('\n');
            let mut line = String::new();
            if needs_break {
                line.push('\n');
            }
            line.push_str(ACTIONS_RULE);
            if !needs_break {
                line.push('\n');
            }
            text.insert_str(at, &line);
            inserted.push(GuidelineBlock::ActionsRule);
        }
    }

    if original.contains(CLOSING_MARKER) && !original.contains(STARTER_RULES_MARKER) {
        if let Some(at) = text.find(CLOSING_MARKER) {
            text.insert_str(at, STARTER_RULES);
            inserted.push(GuidelineBlock::StarterRules);
        }
    }

    PatchOutcome { text, inserted }
}

/// Byte offset just past the first line equal to the conventions anchor.
fn after_anchor_line(text: &str) -> Option<usize> {
    let pattern = format!(r"(?m)^{}\r?$", regex::escape(CONVENTIONS_ANCHOR_LINE));
    let anchor = Regex::new(&pattern).expect("regex for conventions anchor line");
    let found = anchor.find(text)?;
    let end = found.end();
    if text[end..].starts_with('\n') {
        Some(end + 1)
    } else {
        Some(end)
    }
}

/// Patch the guideline document at `path` in place.
///
/// Returns `None` when the document does not exist. The file is only
/// rewritten when at least one block was inserted.
pub fn patch_guidelines_file(path: &Path) -> Result<Option<Vec<GuidelineBlock>>> {
    if !path.is_file() {
        return Ok(None);
    }
    let original =
        fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let outcome = patch_guidelines(&original);
    if outcome.changed() {
        fs::write(path, outcome.text.as_bytes())
            .with_context(|| format!("write {}", path.display()))?;
    }
    Ok(Some(outcome.inserted))
}

#[cfg(test)]
#[path = "guidelines_tests.rs"]
mod tests;
