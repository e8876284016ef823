use axum::async_trait;
use std::path::PathBuf;
use tokio::sync::Mutex;

/// Persistence for the waitlist. The whole list is loaded and saved at once.
#[async_trait]
pub trait WaitlistStore: Send + Sync + std::fmt::Debug {
    /// Load every entry in insertion order.
    async fn load(&self) -> Result<Vec<String>, StoreError>;

    /// Replace the persisted list with `entries`.
    async fn save(&self, entries: &[String]) -> Result<(), StoreError>;
}

#[derive(thiserror::Error)]
pub enum StoreError {
    #[error("Failed to create waitlist directory {}", .0.display())]
    CreateDirectory(PathBuf, #[source] std::io::Error),
    #[error("Failed to read waitlist file {}", .0.display())]
    Read(PathBuf, #[source] std::io::Error),
    #[error("Waitlist file {} is not a JSON array of strings", .0.display())]
    Corrupt(PathBuf, #[source] serde_json::Error),
    #[error("Failed to serialize the waitlist")]
    Serialize(#[source] serde_json::Error),
    #[error("Failed to write waitlist file {}", .0.display())]
    Write(PathBuf, #[source] std::io::Error),
}

/// Keeps the waitlist in memory. Nothing survives a restart.
#[derive(Debug, Default)]
pub struct InMemoryWaitlistStore {
    entries: Mutex<Vec<String>>,
}

impl InMemoryWaitlistStore {
    pub fn with_entries(entries: Vec<String>) -> Self {
        Self {
            entries: Mutex::new(entries),
        }
    }
}

#[async_trait]
impl WaitlistStore for InMemoryWaitlistStore {
    async fn load(&self) -> Result<Vec<String>, StoreError> {
        Ok(self.entries.lock().await.clone())
    }

    async fn save(&self, entries: &[String]) -> Result<(), StoreError> {
        *self.entries.lock().await = entries.to_vec();
        Ok(())
    }
}
