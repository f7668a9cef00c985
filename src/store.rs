//! # Document Store Module
//!
//! Persistence collaborator for session state. Documents are JSON values
//! stored under string keys (one key per user). The core never calls the
//! store itself; the front end saves and loads [`SessionSnapshot`]s
//! through it.

use crate::session::SessionSnapshot;
use anyhow::{Context, Result};
use log::{debug, info};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

/// Key-value document storage
pub trait DocumentStore {
    /// Fetch a document, `None` if the key is unknown
    fn get(&self, key: &str) -> Result<Option<Value>>;

    /// Insert or replace a document
    fn put(&mut self, key: &str, document: Value) -> Result<()>;

    /// Delete a document, returning whether it existed
    fn delete(&mut self, key: &str) -> Result<bool>;
}

/// Volatile store, mostly for tests
#[derive(Debug, Default)]
pub struct MemoryStore {
    documents: HashMap<String, Value>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

impl DocumentStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.documents.get(key).cloned())
    }

    fn put(&mut self, key: &str, document: Value) -> Result<()> {
        self.documents.insert(key.to_string(), document);
        Ok(())
    }

    fn delete(&mut self, key: &str) -> Result<bool> {
        Ok(self.documents.remove(key).is_some())
    }
}

/// All documents in one pretty-printed JSON file, rewritten on every change
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    documents: BTreeMap<String, Value>,
}

impl JsonFileStore {
    /// Open the store at `path`, starting empty if the file does not exist
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let documents = if path.exists() {
            let json = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read store file {}", path.display()))?;
            serde_json::from_str(&json)
                .with_context(|| format!("Failed to parse store file {}", path.display()))?
        } else {
            debug!("Store file {} not found, starting empty", path.display());
            BTreeMap::new()
        };

        info!(
            "Opened document store at {} ({} documents)",
            path.display(),
            documents.len()
        );
        Ok(Self { path, documents })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.documents)
            .context("Failed to serialize documents")?;
        fs::write(&self.path, json)
            .with_context(|| format!("Failed to write store file {}", self.path.display()))?;
        Ok(())
    }
}

impl DocumentStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.documents.get(key).cloned())
    }

    fn put(&mut self, key: &str, document: Value) -> Result<()> {
        self.documents.insert(key.to_string(), document);
        self.flush()
    }

    fn delete(&mut self, key: &str) -> Result<bool> {
        let existed = self.documents.remove(key).is_some();
        if existed {
            self.flush()?;
        }
        Ok(existed)
    }
}

/// Save a session snapshot under `user`
pub fn save_snapshot(store: &mut dyn DocumentStore, user: &str, snapshot: &SessionSnapshot) -> Result<()> {
    let document = serde_json::to_value(snapshot).context("Failed to serialize session snapshot")?;
    store
        .put(user, document)
        .with_context(|| format!("Failed to save session for '{user}'"))?;
    debug!("Saved session snapshot for '{}'", user);
    Ok(())
}

/// Load the snapshot saved under `user`, if any
pub fn load_snapshot(store: &dyn DocumentStore, user: &str) -> Result<Option<SessionSnapshot>> {
    let Some(document) = store
        .get(user)
        .with_context(|| format!("Failed to load session for '{user}'"))?
    else {
        return Ok(None);
    };

    let snapshot = serde_json::from_value(document)
        .with_context(|| format!("Stored session for '{user}' is malformed"))?;
    Ok(Some(snapshot))
}
