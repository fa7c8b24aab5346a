use anyhow::Result;
use log::info;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::defaults::StarterData;

/// JsonConnection manages the data directory shared by all JSON repositories
/// and owns the starter dataset used when a collection has no readable file.
///
/// The starter dataset is generated exactly once per connection so that every
/// repository cloned from it falls back to the same correlated entities.
#[derive(Clone)]
pub struct JsonConnection {
    base_directory: PathBuf,
    starter: Arc<StarterData>,
}

impl JsonConnection {
    /// Create a new JSON connection with a base directory
    pub fn new<P: AsRef<Path>>(base_directory: P) -> Result<Self> {
        let base_path = base_directory.as_ref().to_path_buf();

        // Create the base directory if it doesn't exist
        if !base_path.exists() {
            fs::create_dir_all(&base_path)?;
        }

        Ok(Self {
            base_directory: base_path,
            starter: Arc::new(StarterData::generate()),
        })
    }

    /// Create a new JSON connection in the default data directory
    /// This uses a `Pet Care Tracker` folder under the platform documents directory
    pub fn new_default() -> Result<Self> {
        let parent_dir = match dirs::document_dir() {
            Some(docs_dir) => docs_dir,
            None => {
                // Fall back to the home directory if Documents is not available
                dirs::home_dir().ok_or_else(|| anyhow::anyhow!("Could not determine home directory"))?
            }
        };

        let data_dir = parent_dir.join("Pet Care Tracker");
        info!("Using default data directory: {}", data_dir.display());

        Self::new(data_dir)
    }

    /// Get the base data directory
    pub fn base_directory(&self) -> &Path {
        &self.base_directory
    }

    /// Get the full path of a data file inside the base directory
    pub fn data_file(&self, file_name: &str) -> PathBuf {
        self.base_directory.join(file_name)
    }

    /// Get the starter dataset shared by all repositories on this connection
    pub fn starter(&self) -> &StarterData {
        &self.starter
    }
}
