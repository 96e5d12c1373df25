//! Borrower management service

use crate::{error::AppResult, models::Borrower, repository::Repository};

#[derive(Clone)]
pub struct BorrowersService {
    repository: Repository,
}

impl BorrowersService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self, page: i64, page_size: i64) -> Vec<Borrower> {
        let borrowers = self.repository.borrowers.list(page, page_size).await;
        tracing::info!("Retrieved {} borrowers", borrowers.len());
        borrowers
    }

    pub async fn get(&self, id: i32) -> Option<Borrower> {
        self.repository.borrowers.get_by_id(id).await
    }

    pub async fn get_by_membership_id(&self, membership_id: &str) -> Option<Borrower> {
        self.repository
            .borrowers
            .get_by_membership_id(membership_id)
            .await
    }

    pub async fn add(&self, borrower: Borrower) -> AppResult<Borrower> {
        let borrower = self.repository.borrowers.insert(borrower).await?;
        tracing::info!("Borrower added with ID {}: {}", borrower.id, borrower.name);
        Ok(borrower)
    }

    pub async fn update(&self, id: i32, borrower: Borrower) -> AppResult<Borrower> {
        let borrower = self.repository.borrowers.update(id, borrower).await?;
        tracing::info!("Borrower updated with ID {}", id);
        Ok(borrower)
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.borrowers.delete(id).await?;
        tracing::info!("Borrower deleted with ID {}", id);
        Ok(())
    }
}
