//! Borrow records repository

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::{
    error::{AppError, AppResult},
    models::{BorrowRecord, BorrowStatus, Entity},
};

use super::{paginate, store::JsonStore};

#[derive(Clone)]
pub struct BorrowsRepository {
    store: Arc<JsonStore>,
}

impl BorrowsRepository {
    pub fn new(store: Arc<JsonStore>) -> Self {
        Self { store }
    }

    pub async fn list(&self, page: i64, page_size: i64) -> Vec<BorrowRecord> {
        let records = self.store.load::<BorrowRecord>().await;
        paginate(records, page, page_size)
    }

    pub async fn get_by_id(&self, id: i32) -> Option<BorrowRecord> {
        self.store.find_by_id(id).await
    }

    pub async fn insert(&self, mut record: BorrowRecord) -> AppResult<BorrowRecord> {
        let lock = self.store.lock_for::<BorrowRecord>();
        let _guard = lock.lock().await;

        let mut records = self.store.load::<BorrowRecord>().await;
        record.set_id(JsonStore::next_id(&records));
        record.created_at = Utc::now();
        records.push(record.clone());
        self.store.save(&records).await?;
        Ok(record)
    }

    /// Replace the stored record with the same id
    pub async fn replace(&self, record: BorrowRecord) -> AppResult<BorrowRecord> {
        let lock = self.store.lock_for::<BorrowRecord>();
        let _guard = lock.lock().await;

        let mut records = self.store.load::<BorrowRecord>().await;
        let pos = records
            .iter()
            .position(|r| r.id == record.id)
            .ok_or_else(|| {
                AppError::NotFound(format!("Borrow record with ID {} not found", record.id))
            })?;
        records[pos] = record.clone();
        self.store.save(&records).await?;
        Ok(record)
    }

    /// First Active record for the (borrower, book) pair. Nothing stops
    /// a borrower from holding several Active records for the same book;
    /// when that happens the first one wins.
    pub async fn find_active(&self, borrower_id: i32, book_id: i32) -> Option<BorrowRecord> {
        self.store
            .load::<BorrowRecord>()
            .await
            .into_iter()
            .find(|r| {
                r.borrower_id == borrower_id
                    && r.book_id == book_id
                    && r.status == BorrowStatus::Active
            })
    }

    pub async fn active_for_borrower(&self, borrower_id: i32) -> Vec<BorrowRecord> {
        self.store
            .load::<BorrowRecord>()
            .await
            .into_iter()
            .filter(|r| r.borrower_id == borrower_id && r.status == BorrowStatus::Active)
            .collect()
    }

    /// Records still Active but past their due date. This is the
    /// query-time notion of overdue; the stored `Overdue` status is only
    /// ever set when a late return is processed.
    pub async fn overdue(&self, now: DateTime<Utc>) -> Vec<BorrowRecord> {
        self.store
            .load::<BorrowRecord>()
            .await
            .into_iter()
            .filter(|r| r.status == BorrowStatus::Active && now > r.due_date)
            .collect()
    }
}
