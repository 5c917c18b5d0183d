//! JSON document storage configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Location of the single JSON document that holds all state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory for all runtime data.
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
    /// File name of the document inside `data_dir`.
    #[serde(default = "default_db_file")]
    pub db_file: String,
}

impl StorageConfig {
    /// Full path of the document file.
    pub fn db_path(&self) -> PathBuf {
        PathBuf::from(&self.data_dir).join(&self.db_file)
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            db_file: default_db_file(),
        }
    }
}

fn default_data_dir() -> String {
    "data".to_string()
}

fn default_db_file() -> String {
    "db.json".to_string()
}
