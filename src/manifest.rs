//! Key-ordered JSON manifests (`composer.json`, `package.json`).
//!
//! Edits go through [`Manifest`] so untouched keys keep their position and
//! value, and every write uses the same layout: four-space indentation,
//! unescaped slashes, trailing newline.
use anyhow::{anyhow, bail, Context, Result};
use serde::Serialize;
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct Manifest {
    path: PathBuf,
    root: Map<String, Value>,
}

impl Manifest {
    /// Load a manifest, failing if it is missing or not a JSON object.
    pub fn load(path: &Path) -> Result<Self> {
        let text =
            fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
        Self::parse(path, &text)
    }

    /// Load a manifest when the file exists.
    pub fn load_optional(path: &Path) -> Result<Option<Self>> {
        if !path.is_file() {
            return Ok(None);
        }
        Self::load(path).map(Some)
    }

    fn parse(path: &Path, text: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(text)
            .with_context(|| format!("parse JSON manifest {}", path.display()))?;
        match value {
            Value::Object(root) => Ok(Self {
                path: path.to_path_buf(),
                root,
            }),
            _ => Err(anyhow!("{} is not a JSON object", path.display())),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Return a script entry; `null` counts as absent.
    pub fn script(&self, name: &str) -> Option<&Value> {
        self.root
            .get("scripts")
            .and_then(Value::as_object)
            .and_then(|scripts| scripts.get(name))
            .filter(|value| !value.is_null())
    }

    /// Add a script entry only if the key is absent.
    ///
    /// Returns whether the manifest changed.
    pub fn ensure_script(&mut self, name: &str, value: Value) -> Result<bool> {
        if self.script(name).is_some() {
            return Ok(false);
        }
        self.scripts_mut()?.insert(name.to_string(), value);
        Ok(true)
    }

    /// Set a script entry, replacing any previous value in place.
    pub fn set_script(&mut self, name: &str, value: Value) -> Result<()> {
        self.scripts_mut()?.insert(name.to_string(), value);
        Ok(())
    }

    /// Report whether `package` is a key of the `section` object
    /// (e.g. `require`, `devDependencies`).
    pub fn declares(&self, section: &str, package: &str) -> bool {
        self.root
            .get(section)
            .and_then(Value::as_object)
            .is_some_and(|deps| deps.contains_key(package))
    }

    fn scripts_mut(&mut self) -> Result<&mut Map<String, Value>> {
        let entry = self
            .root
            .entry("scripts")
            .or_insert_with(|| Value::Object(Map::new()));
        // An empty `[]` is how PHP tooling serializes an empty map.
        if matches!(entry, Value::Null) || matches!(entry, Value::Array(items) if items.is_empty())
        {
            *entry = Value::Object(Map::new());
        }
        match entry {
            Value::Object(scripts) => Ok(scripts),
            _ => bail!("`scripts` in {} is not an object", self.path.display()),
        }
    }

    /// Render the manifest in its on-disk layout.
    pub fn to_json_string(&self) -> Result<String> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.root
            .serialize(&mut ser)
            .with_context(|| format!("serialize {}", self.path.display()))?;
        buf.push(b'\n');
        String::from_utf8(buf).context("manifest JSON is not UTF-8")
    }

    /// Write the manifest back to the path it was loaded from.
    pub fn save(&self) -> Result<()> {
        let text = self.to_json_string()?;
        fs::write(&self.path, text.as_bytes())
            .with_context(|| format!("write {}", self.path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "manifest_tests.rs"]
mod tests;
