//! JSON document store.

use std::path::{Path, PathBuf};

use tokio::fs;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use assethub_core::config::StorageConfig;
use assethub_core::error::{AppError, ErrorKind};
use assethub_core::result::AppResult;
use assethub_entity::Document;

/// File-backed store for the single [`Document`].
///
/// Every mutation reads the whole file, applies a closure and rewrites the
/// file through a temporary sibling followed by a rename. Read-modify-write
/// cycles within this process are serialised by an async mutex; writers in
/// other processes are not coordinated with (last writer wins).
#[derive(Debug)]
pub struct JsonStore {
    /// Path of the document file.
    path: PathBuf,
    /// Serialises read-modify-write cycles.
    lock: Mutex<()>,
}

impl JsonStore {
    /// Open the store described by the configuration, creating the data
    /// directory if needed.
    pub async fn open(config: &StorageConfig) -> AppResult<Self> {
        Self::at(config.db_path()).await
    }

    /// Open a store at an explicit file path.
    pub async fn at(path: impl Into<PathBuf>) -> AppResult<Self> {
        let path = path.into();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await.map_err(|e| {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to create data directory: {}", parent.display()),
                    e,
                )
            })?;
        }
        info!(path = %path.display(), "Opened JSON document store");
        Ok(Self {
            path,
            lock: Mutex::new(()),
        })
    }

    /// Path of the document file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the current document.
    ///
    /// A missing file is initialised with the default document.
    pub async fn load(&self) -> AppResult<Document> {
        let _guard = self.lock.lock().await;
        self.read_or_init().await
    }

    /// Replace the document wholesale.
    pub async fn save(&self, doc: &Document) -> AppResult<()> {
        let _guard = self.lock.lock().await;
        self.write(doc).await
    }

    /// Apply a mutation and persist the result.
    ///
    /// The document is only written when the closure returns `Ok`.
    pub async fn update<F, R>(&self, f: F) -> AppResult<R>
    where
        F: FnOnce(&mut Document) -> AppResult<R>,
    {
        let _guard = self.lock.lock().await;
        let mut doc = self.read_or_init().await?;
        let result = f(&mut doc)?;
        self.write(&doc).await?;
        Ok(result)
    }

    /// Check that the document can be read.
    pub async fn health_check(&self) -> AppResult<bool> {
        Ok(self.load().await.is_ok())
    }

    async fn read_or_init(&self) -> AppResult<Document> {
        match fs::read_to_string(&self.path).await {
            Ok(raw) => serde_json::from_str(&raw).map_err(|e| {
                AppError::with_source(
                    ErrorKind::Serialization,
                    format!("Failed to parse document: {}", self.path.display()),
                    e,
                )
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!(path = %self.path.display(), "Document missing, writing defaults");
                let doc = Document::default();
                self.write(&doc).await?;
                Ok(doc)
            }
            Err(e) => Err(AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to read document: {}", self.path.display()),
                e,
            )),
        }
    }

    async fn write(&self, doc: &Document) -> AppResult<()> {
        let body = serde_json::to_string_pretty(doc)?;
        let tmp = self.path.with_extension("json.tmp");

        fs::write(&tmp, body.as_bytes()).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to write document: {}", tmp.display()),
                e,
            )
        })?;
        fs::rename(&tmp, &self.path).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to replace document: {}", self.path.display()),
                e,
            )
        })?;

        debug!(path = %self.path.display(), bytes = body.len(), "Wrote document");
        Ok(())
    }
}
