//! File-backed storage, one gzip-compressed file per key.

use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use flate2::Compression;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use tokio::fs;
use tracing::{debug, trace};

use crate::domain::errors::StorageError;
use crate::domain::ports::StoragePort;

const FILE_EXTENSION: &str = "json.gz";

/// Stores each key in `<dir>/<key>.json.gz`.
///
/// Writes go through a temporary file in the same directory and are renamed
/// into place, so readers never see a half-written value.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Creates storage rooted at `dir`, creating it if needed.
    ///
    /// # Errors
    /// Returns error if the directory cannot be created.
    pub async fn new(dir: PathBuf) -> Result<Self, StorageError> {
        fs::create_dir_all(&dir)
            .await
            .map_err(|e| StorageError::io(format!("creating {}", dir.display()), e))?;
        Ok(Self { dir })
    }

    /// Returns the storage directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(StorageError::Unavailable(format!("invalid storage key: {key:?}")));
        }
        Ok(self.dir.join(format!("{key}.{FILE_EXTENSION}")))
    }
}

#[async_trait]
impl StoragePort for FileStorage {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key)?;

        let bytes = match fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                trace!(key, "Storage miss");
                return Ok(None);
            }
            Err(e) => return Err(StorageError::io(format!("reading {}", path.display()), e)),
        };

        let compressed = bytes.len();
        let text = tokio::task::spawn_blocking(move || {
            let mut text = String::new();
            GzDecoder::new(bytes.as_slice()).read_to_string(&mut text)?;
            Ok::<_, std::io::Error>(text)
        })
        .await
        .map_err(|e| StorageError::Unavailable(format!("decode task failed: {e}")))?
        .map_err(|e| StorageError::io(format!("decompressing {}", path.display()), e))?;

        trace!(key, compressed, size = text.len(), "Storage hit");
        Ok(Some(text))
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        let dir = self.dir.clone();
        let value = value.to_owned();
        let target = path.clone();

        tokio::task::spawn_blocking(move || {
            let mut temp_file = tempfile::NamedTempFile::new_in(&dir)?;
            {
                let mut encoder = GzEncoder::new(temp_file.as_file_mut(), Compression::default());
                encoder.write_all(value.as_bytes())?;
                encoder.finish()?;
            }
            temp_file.as_file().sync_all()?;
            temp_file.persist(&target).map_err(|e| e.error)?;
            Ok::<_, std::io::Error>(())
        })
        .await
        .map_err(|e| StorageError::Unavailable(format!("write task failed: {e}")))?
        .map_err(|e| StorageError::io(format!("writing {}", path.display()), e))?;

        debug!(key, path = %path.display(), "Stored value");
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path).await {
            Ok(()) => {
                debug!(key, "Removed value");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::io(format!("removing {}", path.display()), e)),
        }
    }
}
