//! Borrowers repository

use std::sync::Arc;

use chrono::Utc;

use crate::{
    error::{AppError, AppResult},
    models::{Borrower, Entity},
};

use super::{paginate, store::JsonStore};

#[derive(Clone)]
pub struct BorrowersRepository {
    store: Arc<JsonStore>,
}

impl BorrowersRepository {
    pub fn new(store: Arc<JsonStore>) -> Self {
        Self { store }
    }

    pub async fn list(&self, page: i64, page_size: i64) -> Vec<Borrower> {
        let borrowers = self.store.load::<Borrower>().await;
        paginate(borrowers, page, page_size)
    }

    pub async fn get_by_id(&self, id: i32) -> Option<Borrower> {
        self.store.find_by_id(id).await
    }

    pub async fn get_by_membership_id(&self, membership_id: &str) -> Option<Borrower> {
        let membership_id = membership_id.to_lowercase();
        self.store
            .load::<Borrower>()
            .await
            .into_iter()
            .find(|b| b.membership_id.to_lowercase() == membership_id)
    }

    /// Insert a borrower. The duplicate-membership check runs under the
    /// collection lock so check and append are atomic.
    pub async fn insert(&self, mut borrower: Borrower) -> AppResult<Borrower> {
        let lock = self.store.lock_for::<Borrower>();
        let _guard = lock.lock().await;

        let mut borrowers = self.store.load::<Borrower>().await;
        if borrowers
            .iter()
            .any(|b| b.membership_id.eq_ignore_ascii_case(&borrower.membership_id))
        {
            return Err(AppError::Conflict(format!(
                "Membership ID {} already exists",
                borrower.membership_id
            )));
        }

        borrower.set_id(JsonStore::next_id(&borrowers));
        borrower.created_at = Utc::now();
        borrower.updated_at = None;
        borrowers.push(borrower.clone());
        self.store.save(&borrowers).await?;
        Ok(borrower)
    }

    pub async fn update(&self, id: i32, mut borrower: Borrower) -> AppResult<Borrower> {
        let lock = self.store.lock_for::<Borrower>();
        let _guard = lock.lock().await;

        let mut borrowers = self.store.load::<Borrower>().await;
        let pos = borrowers
            .iter()
            .position(|b| b.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Borrower with ID {} not found", id)))?;

        borrower.id = id;
        borrower.created_at = borrowers[pos].created_at;
        borrower.updated_at = Some(Utc::now());
        borrowers[pos] = borrower.clone();
        self.store.save(&borrowers).await?;
        Ok(borrower)
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.store.delete_by_id::<Borrower>(id).await?;
        Ok(())
    }
}
