use super::store::{StoreError, WaitlistStore};
use crate::configuration::WaitlistSettings;
use axum::async_trait;
use std::{io::ErrorKind, path::PathBuf};

/// Stores the waitlist as a pretty-printed JSON array in a single file.
///
/// The file is read in full on every `load` and rewritten in full on every
/// `save`. It is created lazily by the first `save`.
#[derive(Debug, Clone)]
pub struct FileWaitlistStore {
    data_dir: PathBuf,
    path: PathBuf,
}

impl FileWaitlistStore {
    pub fn new(settings: &WaitlistSettings) -> Self {
        Self {
            data_dir: settings.data_dir.clone(),
            path: settings.file_path(),
        }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    fn staging_path(&self) -> PathBuf {
        let mut staging = self.path.clone().into_os_string();
        staging.push(".tmp");
        PathBuf::from(staging)
    }
}

#[async_trait]
impl WaitlistStore for FileWaitlistStore {
    #[tracing::instrument(name = "Loading waitlist from disk", skip(self), fields(path = %self.path.display()))]
    async fn load(&self) -> Result<Vec<String>, StoreError> {
        tokio::fs::create_dir_all(&self.data_dir)
            .await
            .map_err(|e| StoreError::CreateDirectory(self.data_dir.clone(), e))?;

        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!("No waitlist file yet, starting from an empty list");
                return Ok(Vec::new());
            }
            Err(e) => return Err(StoreError::Read(self.path.clone(), e)),
        };

        serde_json::from_str(&content).map_err(|e| StoreError::Corrupt(self.path.clone(), e))
    }

    #[tracing::instrument(name = "Saving waitlist to disk", skip(self, entries), fields(path = %self.path.display(), entries = entries.len()))]
    async fn save(&self, entries: &[String]) -> Result<(), StoreError> {
        let content = serde_json::to_string_pretty(entries).map_err(StoreError::Serialize)?;

        // Readers see either the previous or the new list, never a partial write.
        let staging = self.staging_path();
        tokio::fs::write(&staging, content)
            .await
            .map_err(|e| StoreError::Write(staging.clone(), e))?;
        tokio::fs::rename(&staging, &self.path)
            .await
            .map_err(|e| StoreError::Write(self.path.clone(), e))
    }
}
