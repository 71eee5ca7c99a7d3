//! Single-slot presets: one saved [`RenderParameters`] per design, keyed by
//! [`Design::preset_key`](crate::designs::Design::preset_key).
//!
//! The user image is runtime state and never part of a preset.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::designs::RenderParameters;
use crate::foundation::error::{RenderError, RenderResult};

/// Key-value storage of serialized presets. Implementors only move JSON text; `save` and `load`
/// handle the encoding and key checks.
pub trait PresetStore {
    fn write_raw(&mut self, key: &str, json: &str) -> RenderResult<()>;

    fn read_raw(&self, key: &str) -> RenderResult<Option<String>>;

    /// Overwrite the slot of `params`' design.
    fn save(&mut self, params: &RenderParameters) -> RenderResult<()> {
        let key = params.design.preset_key();
        let json = serde_json::to_string_pretty(params)
            .map_err(|e| RenderError::preset(format!("serialize '{key}': {e}")))?;
        self.write_raw(key, &json)?;
        tracing::debug!(key, "preset saved");
        Ok(())
    }

    /// Saved parameters under `key`, or `None` when the slot is empty.
    fn load(&self, key: &str) -> RenderResult<Option<RenderParameters>> {
        let Some(json) = self.read_raw(key)? else {
            return Ok(None);
        };
        let params: RenderParameters = serde_json::from_str(&json)
            .map_err(|e| RenderError::preset(format!("parse '{key}': {e}")))?;
        if params.design.preset_key() != key {
            return Err(RenderError::preset(format!(
                "slot '{key}' holds a '{}' preset",
                params.design.app_name()
            )));
        }
        Ok(Some(params))
    }
}

/// In-process store.
#[derive(Clone, Debug, Default)]
pub struct MemoryPresetStore {
    slots: HashMap<String, String>,
}

impl MemoryPresetStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PresetStore for MemoryPresetStore {
    fn write_raw(&mut self, key: &str, json: &str) -> RenderResult<()> {
        self.slots.insert(key.to_owned(), json.to_owned());
        Ok(())
    }

    fn read_raw(&self, key: &str) -> RenderResult<Option<String>> {
        Ok(self.slots.get(key).cloned())
    }
}

/// One `<key>.json` file per slot inside a directory.
#[derive(Clone, Debug)]
pub struct FilePresetStore {
    dir: PathBuf,
}

impl FilePresetStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn slot_path(&self, key: &str) -> RenderResult<PathBuf> {
        let valid = !key.is_empty()
            && key
                .bytes()
                .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'_');
        if !valid {
            return Err(RenderError::preset(format!("invalid preset key '{key}'")));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl PresetStore for FilePresetStore {
    fn write_raw(&mut self, key: &str, json: &str) -> RenderResult<()> {
        let path = self.slot_path(key)?;
        std::fs::create_dir_all(&self.dir).map_err(|e| {
            RenderError::preset(format!(
                "failed to create preset directory '{}': {e}",
                self.dir.display()
            ))
        })?;
        std::fs::write(&path, json).map_err(|e| {
            RenderError::preset(format!("failed to write preset '{}': {e}", path.display()))
        })
    }

    fn read_raw(&self, key: &str) -> RenderResult<Option<String>> {
        let path = self.slot_path(key)?;
        match std::fs::read_to_string(&path) {
            Ok(json) => Ok(Some(json)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(RenderError::preset(format!(
                "failed to read preset '{}': {e}",
                path.display()
            ))),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/export/preset.rs"]
mod tests;
