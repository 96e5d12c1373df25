//! Durable external-metadata cache and API audit log repositories

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;

use crate::{
    error::AppResult,
    models::{Entity, ExternalApiLog, ExternalBookInfo},
};

use super::{paginate, store::JsonStore};

/// Cross-run cache of upstream book metadata, keyed by ISBN
#[derive(Clone)]
pub struct BookInfoRepository {
    store: Arc<JsonStore>,
}

impl BookInfoRepository {
    pub fn new(store: Arc<JsonStore>) -> Self {
        Self { store }
    }

    /// Cached entry for the ISBN if one exists and is younger than `ttl`
    pub async fn find_fresh(&self, isbn: &str, ttl: Duration) -> Option<ExternalBookInfo> {
        let isbn = isbn.to_lowercase();
        let now = Utc::now();
        self.store
            .load::<ExternalBookInfo>()
            .await
            .into_iter()
            .find(|info| {
                info.isbn.to_lowercase() == isbn
                    && (now - info.cached_at).num_seconds() < ttl.as_secs() as i64
            })
    }

    pub async fn insert(&self, mut info: ExternalBookInfo) -> AppResult<ExternalBookInfo> {
        let lock = self.store.lock_for::<ExternalBookInfo>();
        let _guard = lock.lock().await;

        let mut entries = self.store.load::<ExternalBookInfo>().await;
        info.set_id(JsonStore::next_id(&entries));
        entries.push(info.clone());
        self.store.save(&entries).await?;
        Ok(info)
    }
}

/// Append-only audit trail of upstream calls
#[derive(Clone)]
pub struct ApiLogsRepository {
    store: Arc<JsonStore>,
}

impl ApiLogsRepository {
    pub fn new(store: Arc<JsonStore>) -> Self {
        Self { store }
    }

    /// Append a log entry. Best-effort: a failure to persist the audit
    /// row must never fail the call being audited.
    pub async fn append(&self, mut log: ExternalApiLog) {
        let lock = self.store.lock_for::<ExternalApiLog>();
        let _guard = lock.lock().await;

        let mut logs = self.store.load::<ExternalApiLog>().await;
        log.set_id(JsonStore::next_id(&logs));
        logs.push(log);
        if let Err(e) = self.store.save(&logs).await {
            tracing::error!("Failed to persist API audit log entry: {}", e);
        }
    }

    /// Audit log, newest first
    pub async fn list(&self, page: i64, page_size: i64) -> Vec<ExternalApiLog> {
        let mut logs = self.store.load::<ExternalApiLog>().await;
        logs.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        paginate(logs, page, page_size)
    }

    #[cfg(test)]
    pub async fn count(&self) -> usize {
        self.store.load::<ExternalApiLog>().await.len()
    }
}
