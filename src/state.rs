use crate::backend::CatchBackend;
use crate::errors::ClientError;
use crate::models::{CatchDraft, CatchId};
use crate::store::CatchStore;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info, warn};

/// The store lock is never held across a backend call.
#[derive(Clone)]
pub struct AppState {
    pub backend: Arc<dyn CatchBackend>,
    pub store: Arc<Mutex<CatchStore>>,
}

impl AppState {
    pub fn new(backend: Arc<dyn CatchBackend>) -> Self {
        Self {
            backend,
            store: Arc::new(Mutex::new(CatchStore::new())),
        }
    }

    /// Re-lists every catch from the backend. On failure the previous records
    /// stay in place and a notice is queued for the next page render.
    pub async fn refresh(&self, keep_page: bool) -> Result<(), ClientError> {
        let ticket = self.store.lock().await.begin_refresh();

        match self.backend.list().await {
            Ok(records) => {
                let count = records.len();
                let mut store = self.store.lock().await;
                if store.complete_refresh(ticket, records, keep_page) {
                    info!("loaded {count} catches");
                } else {
                    info!("dropping superseded catch listing ({count} records)");
                }
                Ok(())
            }
            Err(err) => {
                error!("failed to load catches: {err}");
                self.store
                    .lock()
                    .await
                    .notify(format!("Failed to load catches: {err}"));
                Err(err)
            }
        }
    }

    /// New catches land at the top, so the table goes back to page 1.
    pub async fn create(&self, draft: &CatchDraft) -> Result<(), ClientError> {
        let result = self.backend.create(draft).await;
        self.after_mutation("logging catch", result, false).await
    }

    pub async fn update(&self, id: CatchId, draft: &CatchDraft) -> Result<(), ClientError> {
        let result = self.backend.update(id, draft).await;
        self.after_mutation(&format!("updating catch {id}"), result, true)
            .await
    }

    pub async fn delete(&self, id: CatchId) -> Result<(), ClientError> {
        let result = self.backend.delete(id).await;
        self.after_mutation(&format!("deleting catch {id}"), result, true)
            .await
    }

    async fn after_mutation(
        &self,
        action: &str,
        result: Result<(), ClientError>,
        keep_page: bool,
    ) -> Result<(), ClientError> {
        match result {
            Ok(()) => {
                info!("{action} succeeded");
                // A failed re-list has already been logged and queued as a notice.
                let _ = self.refresh(keep_page).await;
                Ok(())
            }
            Err(err) => {
                warn!("{action} failed: {err}");
                self.store
                    .lock()
                    .await
                    .notify(format!("Error {action}: {err}"));
                Err(err)
            }
        }
    }
}
