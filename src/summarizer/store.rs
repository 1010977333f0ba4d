//! Key/value storage capability shared by settings and history.
//!
//! Values are JSON documents addressed by `(scope, key)`. The file-backed
//! store keeps one JSON object per scope and serializes writers with an
//! exclusive advisory lock next to the scope file.

use anyhow::{Context, Result, anyhow};
use fs2::FileExt;
use serde_json::{Map, Value};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Scope {
    /// User settings: credential and language preference.
    Sync,
    /// Device-local data: the summary history.
    Local,
}

pub trait KeyValueStore {
    fn get(&self, scope: Scope, key: &str) -> Result<Option<Value>>;
    fn set(&self, scope: Scope, key: &str, value: Value) -> Result<()>;
}

#[derive(Debug, Clone)]
pub struct JsonFileStore {
    sync_file: PathBuf,
    local_file: PathBuf,
}

impl JsonFileStore {
    pub fn new(sync_file: impl Into<PathBuf>, local_file: impl Into<PathBuf>) -> Self {
        Self {
            sync_file: sync_file.into(),
            local_file: local_file.into(),
        }
    }

    pub fn file_for(&self, scope: Scope) -> &Path {
        match scope {
            Scope::Sync => &self.sync_file,
            Scope::Local => &self.local_file,
        }
    }
}

fn lock_path(file: &Path) -> PathBuf {
    let mut name = file
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".lock");
    file.with_file_name(name)
}

fn read_document(file: &Path) -> Result<Map<String, Value>> {
    if !file.exists() {
        return Ok(Map::new());
    }
    let raw =
        fs::read_to_string(file).with_context(|| format!("failed to read {}", file.display()))?;
    if raw.trim().is_empty() {
        return Ok(Map::new());
    }
    let parsed: Value = serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse {}", file.display()))?;
    match parsed {
        Value::Object(map) => Ok(map),
        _ => Err(anyhow!(
            "store document {} is not a JSON object",
            file.display()
        )),
    }
}

fn write_document(file: &Path, doc: &Map<String, Value>) -> Result<()> {
    let parent = file
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let data = serde_json::to_string_pretty(doc)?;
    let mut tmp = tempfile::NamedTempFile::new_in(parent)
        .with_context(|| format!("failed to stage write in {}", parent.display()))?;
    tmp.write_all(format!("{data}\n").as_bytes())?;
    tmp.persist(file)
        .map_err(|err| anyhow!("failed to write {}: {}", file.display(), err.error))?;
    Ok(())
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, scope: Scope, key: &str) -> Result<Option<Value>> {
        let mut doc = read_document(self.file_for(scope))?;
        Ok(doc.remove(key))
    }

    fn set(&self, scope: Scope, key: &str, value: Value) -> Result<()> {
        let file = self.file_for(scope);
        if let Some(parent) = file.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }

        let lock_file = lock_path(file);
        let lock = fs::OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&lock_file)
            .with_context(|| format!("failed to open {}", lock_file.display()))?;
        lock.lock_exclusive()
            .with_context(|| format!("failed to lock {}", lock_file.display()))?;

        let result = read_document(file).and_then(|mut doc| {
            doc.insert(key.to_string(), value);
            write_document(file, &doc)
        });
        let _ = FileExt::unlock(&lock);
        result
    }
}
