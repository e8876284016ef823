mod file_store;
mod store;

pub use file_store::FileWaitlistStore;
pub use store::{InMemoryWaitlistStore, StoreError, WaitlistStore};

use crate::domain::WaitlistEmail;
use tokio::sync::Mutex;

/// The waitlist service: records emails in a [`WaitlistStore`] while keeping
/// every entry unique.
#[derive(Debug)]
pub struct Waitlist {
    store: Box<dyn WaitlistStore>,
    // Serializes the load-check-save sequence of `join`.
    write_lock: Mutex<()>,
}

#[derive(thiserror::Error)]
pub enum JoinError {
    #[error("{0} is already on the waitlist")]
    Duplicate(WaitlistEmail),
    #[error("Failed to access the waitlist storage")]
    Store(#[from] StoreError),
}

impl Waitlist {
    pub fn new(store: impl WaitlistStore + 'static) -> Self {
        Self {
            store: Box::new(store),
            write_lock: Mutex::new(()),
        }
    }

    /// Append `email` to the end of the waitlist unless it is already there.
    ///
    /// A duplicate leaves the stored list untouched.
    #[tracing::instrument(name = "Adding email to the waitlist", skip(self, email), fields(email = %email))]
    pub async fn join(&self, email: WaitlistEmail) -> Result<(), JoinError> {
        let _guard = self.write_lock.lock().await;

        let mut entries = self.store.load().await?;
        if entries.iter().any(|entry| entry == email.as_ref()) {
            tracing::info!("Email is already on the waitlist");
            return Err(JoinError::Duplicate(email));
        }

        entries.push(email.into());
        self.store.save(&entries).await?;
        tracing::info!(waitlist_size = entries.len(), "Email has been added");

        Ok(())
    }

    /// Every email on the waitlist, read fresh from storage.
    pub async fn entries(&self) -> Result<Vec<String>, StoreError> {
        self.store.load().await
    }
}
