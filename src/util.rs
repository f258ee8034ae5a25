use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

pub fn display_path(path: &Path, base: Option<&Path>) -> String {
    if let Some(base) = base {
        if let Ok(relative) = path.strip_prefix(base) {
            return relative.display().to_string();
        }
    }
    path.display().to_string()
}

pub fn truncate_string(text: &str, max_bytes: usize) -> String {
    if text.len() <= max_bytes {
        return text.to_string();
    }
    let mut truncated = String::new();
    for ch in text.chars() {
        if truncated.len() + ch.len_utf8() > max_bytes {
            break;
        }
        truncated.push(ch);
    }
    truncated
}

/// Write `contents` to `path`, creating parent directories as needed.
pub fn write_file(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
    }
    fs::write(path, contents.as_bytes()).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

/// Write a stub unless something already exists at `path`.
///
/// Returns whether the file was written.
pub fn write_if_missing(path: &Path, contents: &str) -> Result<bool> {
    if path.exists() {
        return Ok(false);
    }
    write_file(path, contents)?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_string_respects_char_boundaries() {
        assert_eq!(truncate_string("héllo", 2), "h");
        assert_eq!(truncate_string("héllo", 3), "hé");
        assert_eq!(truncate_string("short", 64), "short");
    }

    #[test]
    fn write_if_missing_keeps_existing_contents() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("nested").join("file.txt");

        assert!(write_if_missing(&path, "first").expect("first write"));
        assert!(!write_if_missing(&path, "second").expect("second write"));
        assert_eq!(fs::read_to_string(&path).expect("read file"), "first");
    }

    #[test]
    fn display_path_strips_base_when_possible() {
        let base = Path::new("/srv/app");
        assert_eq!(
            display_path(Path::new("/srv/app/app/Actions"), Some(base)),
            "app/Actions"
        );
        assert_eq!(display_path(Path::new("/tmp/x"), Some(base)), "/tmp/x");
    }
}
