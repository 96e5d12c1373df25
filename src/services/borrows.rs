//! Borrow/return workflow service
//!
//! Orchestrates the book and borrower collections around the borrow
//! record lifecycle: Active -> Returned | Overdue (both terminal).

use chrono::{Duration, Utc};
use rust_decimal::Decimal;

use crate::{
    error::{AppError, AppResult},
    models::{BorrowRecord, BorrowStatus},
    repository::Repository,
};

/// Fine charged per whole day a return is late, in currency units
const FINE_DAY_RATE: i64 = 10;

#[derive(Clone)]
pub struct BorrowsService {
    repository: Repository,
}

impl BorrowsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn get_all(&self, page: i64, page_size: i64) -> Vec<BorrowRecord> {
        let records = self.repository.borrows.list(page, page_size).await;
        tracing::info!("Retrieved {} borrow records", records.len());
        records
    }

    pub async fn get_by_id(&self, id: i32) -> Option<BorrowRecord> {
        self.repository.borrows.get_by_id(id).await
    }

    /// Borrow a book for `days` days.
    ///
    /// Preconditions, checked in order: the book exists, a copy is
    /// available, the borrower exists, the membership has not expired.
    /// The record write and the quantity decrement are two separate
    /// file writes; a crash between them leaves them inconsistent.
    pub async fn borrow_book(
        &self,
        borrower_id: i32,
        book_id: i32,
        days: i64,
    ) -> AppResult<BorrowRecord> {
        let mut book = self
            .repository
            .books
            .get_by_id(book_id)
            .await
            .ok_or_else(|| AppError::NotFound(format!("Book with ID {} not found", book_id)))?;

        if book.quantity <= 0 {
            return Err(AppError::Conflict(format!(
                "Book '{}' is not available",
                book.title
            )));
        }

        let borrower = self
            .repository
            .borrowers
            .get_by_id(borrower_id)
            .await
            .ok_or_else(|| {
                AppError::NotFound(format!("Borrower with ID {} not found", borrower_id))
            })?;

        let now = Utc::now();
        if now > borrower.membership_expiry_date {
            return Err(AppError::Conflict(
                "Borrower's membership has expired".to_string(),
            ));
        }

        // Durations large enough to overflow the datetime are rejected
        // rather than panicking mid-request
        let due_date = Duration::try_days(days)
            .and_then(|d| now.checked_add_signed(d))
            .ok_or_else(|| AppError::Validation(format!("Invalid borrow duration: {} days", days)))?;

        let record = self
            .repository
            .borrows
            .insert(BorrowRecord {
                id: 0,
                borrower_id,
                book_id,
                borrow_date: now,
                due_date,
                return_date: None,
                is_overdue: false,
                fine_amount: Decimal::ZERO,
                status: BorrowStatus::Active,
                created_at: now,
            })
            .await?;

        book.quantity -= 1;
        self.repository.books.update(book_id, book).await?;

        tracing::info!(
            "Book borrowed: BorrowerId={}, BookId={}, DueDate={}",
            borrower_id,
            book_id,
            record.due_date
        );
        Ok(record)
    }

    /// Return a borrowed book.
    ///
    /// Resolves the first Active record for the pair, stamps the return
    /// date, computes the fine for late returns and restores the book
    /// quantity. A missing book record skips the restore silently.
    pub async fn return_book(&self, borrower_id: i32, book_id: i32) -> AppResult<BorrowRecord> {
        let mut record = self
            .repository
            .borrows
            .find_active(borrower_id, book_id)
            .await
            .ok_or_else(|| AppError::NotFound("No active borrow record found".to_string()))?;

        let now = Utc::now();
        record.return_date = Some(now);
        record.is_overdue = now > record.due_date;

        if record.is_overdue {
            let days_overdue = (now - record.due_date).num_days();
            record.fine_amount = Decimal::from(days_overdue) * Decimal::from(FINE_DAY_RATE);
            record.status = BorrowStatus::Overdue;
        } else {
            record.status = BorrowStatus::Returned;
        }

        let record = self.repository.borrows.replace(record).await?;

        if let Some(mut book) = self.repository.books.get_by_id(book_id).await {
            book.quantity += 1;
            self.repository.books.update(book_id, book).await?;
        }

        tracing::info!(
            "Book returned: BorrowerId={}, BookId={}, Fine={}",
            borrower_id,
            book_id,
            record.fine_amount
        );
        Ok(record)
    }

    pub async fn get_active_borrows(&self, borrower_id: i32) -> Vec<BorrowRecord> {
        self.repository.borrows.active_for_borrower(borrower_id).await
    }

    /// Still-Active records past their due date. Distinct from the
    /// stored `Overdue` status, which is only assigned at return time.
    pub async fn get_overdue(&self) -> Vec<BorrowRecord> {
        self.repository.borrows.overdue(Utc::now()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Book, Borrower};
    use crate::repository::store::JsonStore;
    use std::sync::Arc;

    struct Fixture {
        _dir: tempfile::TempDir,
        repository: Repository,
        service: BorrowsService,
    }

    fn fixture() -> Fixture {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(JsonStore::new(dir.path()).unwrap());
        let repository = Repository::new(store);
        let service = BorrowsService::new(repository.clone());
        Fixture {
            _dir: dir,
            repository,
            service,
        }
    }

    async fn add_book(repo: &Repository, title: &str, isbn: &str, quantity: i32) -> Book {
        repo.books
            .insert(Book {
                id: 0,
                title: title.to_string(),
                author: String::new(),
                isbn: isbn.to_string(),
                genre: String::new(),
                quantity,
                published_date: None,
                publisher: String::new(),
                language: String::new(),
                shelf_location: String::new(),
                created_at: Utc::now(),
                updated_at: None,
            })
            .await
            .unwrap()
    }

    async fn add_borrower(repo: &Repository, name: &str, membership_id: &str, expiry_days: i64) -> Borrower {
        repo.borrowers
            .insert(Borrower {
                id: 0,
                name: name.to_string(),
                contact_number: String::new(),
                email: String::new(),
                membership_id: membership_id.to_string(),
                address: String::new(),
                membership_start_date: Utc::now(),
                membership_expiry_date: Utc::now() + Duration::days(expiry_days),
                created_at: Utc::now(),
                updated_at: None,
            })
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn borrow_decrements_quantity_and_creates_active_record() {
        let fx = fixture();
        let book = add_book(&fx.repository, "A", "111", 2).await;
        let borrower = add_borrower(&fx.repository, "B", "M1", 365).await;

        let record = fx.service.borrow_book(borrower.id, book.id, 7).await.unwrap();
        assert_eq!(record.status, BorrowStatus::Active);
        assert!(record.return_date.is_none());

        let stored = fx.repository.books.get_by_id(book.id).await.unwrap();
        assert_eq!(stored.quantity, 1);
    }

    #[tokio::test]
    async fn borrow_unavailable_book_conflicts_and_writes_no_record() {
        let fx = fixture();
        let book = add_book(&fx.repository, "A", "111", 0).await;
        let borrower = add_borrower(&fx.repository, "B", "M1", 365).await;

        let err = fx
            .service
            .borrow_book(borrower.id, book.id, 7)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
        assert!(fx.repository.borrows.list(1, 10).await.is_empty());
    }

    #[tokio::test]
    async fn borrow_duration_overflowing_the_due_date_is_rejected() {
        let fx = fixture();
        let book = add_book(&fx.repository, "A", "111", 1).await;
        let borrower = add_borrower(&fx.repository, "B", "M1", 365).await;

        let err = fx
            .service
            .borrow_book(borrower.id, book.id, 100_000_000)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        // Nothing was written and no copy was taken
        assert!(fx.repository.borrows.list(1, 10).await.is_empty());
        let stored = fx.repository.books.get_by_id(book.id).await.unwrap();
        assert_eq!(stored.quantity, 1);
    }

    #[tokio::test]
    async fn borrow_with_expired_membership_conflicts() {
        let fx = fixture();
        let book = add_book(&fx.repository, "A", "111", 1).await;
        let borrower = add_borrower(&fx.repository, "B", "M1", -1).await;

        let err = fx
            .service
            .borrow_book(borrower.id, book.id, 7)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn borrow_missing_book_or_borrower_is_not_found() {
        let fx = fixture();
        let err = fx.service.borrow_book(1, 99, 7).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));

        let book = add_book(&fx.repository, "A", "111", 1).await;
        let err = fx.service.borrow_book(99, book.id, 7).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn on_time_return_restores_quantity_without_fine() {
        let fx = fixture();
        let book = add_book(&fx.repository, "A", "111", 1).await;
        let borrower = add_borrower(&fx.repository, "B", "M1", 365).await;

        fx.service.borrow_book(borrower.id, book.id, 7).await.unwrap();
        let returned = fx.service.return_book(borrower.id, book.id).await.unwrap();

        assert_eq!(returned.status, BorrowStatus::Returned);
        assert!(!returned.is_overdue);
        assert_eq!(returned.fine_amount, Decimal::ZERO);

        let stored = fx.repository.books.get_by_id(book.id).await.unwrap();
        assert_eq!(stored.quantity, 1);
    }

    #[tokio::test]
    async fn late_return_charges_ten_per_day_and_marks_overdue() {
        let fx = fixture();
        let book = add_book(&fx.repository, "A", "111", 1).await;
        let borrower = add_borrower(&fx.repository, "B", "M1", 365).await;

        let record = fx.service.borrow_book(borrower.id, book.id, 7).await.unwrap();

        // Backdate the due date so the return is 3 whole days late
        let mut record = record;
        record.due_date = Utc::now() - Duration::days(3) - Duration::seconds(30);
        fx.repository.borrows.replace(record).await.unwrap();

        let returned = fx.service.return_book(borrower.id, book.id).await.unwrap();
        assert_eq!(returned.status, BorrowStatus::Overdue);
        assert!(returned.is_overdue);
        assert_eq!(returned.fine_amount, Decimal::from(30));

        let stored = fx.repository.books.get_by_id(book.id).await.unwrap();
        assert_eq!(stored.quantity, 1);
    }

    #[tokio::test]
    async fn return_without_active_record_is_not_found() {
        let fx = fixture();
        let err = fx.service.return_book(1, 1).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn returned_record_is_terminal() {
        let fx = fixture();
        let book = add_book(&fx.repository, "A", "111", 1).await;
        let borrower = add_borrower(&fx.repository, "B", "M1", 365).await;

        fx.service.borrow_book(borrower.id, book.id, 7).await.unwrap();
        fx.service.return_book(borrower.id, book.id).await.unwrap();

        // No Active record remains, so a second return fails
        let err = fx.service.return_book(borrower.id, book.id).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn overdue_query_reports_active_records_past_due() {
        let fx = fixture();
        let book = add_book(&fx.repository, "A", "111", 1).await;
        let borrower = add_borrower(&fx.repository, "B", "M1", 365).await;

        let mut record = fx.service.borrow_book(borrower.id, book.id, 7).await.unwrap();
        record.due_date = Utc::now() - Duration::days(1);
        fx.repository.borrows.replace(record).await.unwrap();

        let overdue = fx.service.get_overdue().await;
        assert_eq!(overdue.len(), 1);
        // Still Active: the stored Overdue status only appears on return
        assert_eq!(overdue[0].status, BorrowStatus::Active);
    }

    #[tokio::test]
    async fn active_borrows_filters_by_borrower() {
        let fx = fixture();
        let book = add_book(&fx.repository, "A", "111", 2).await;
        let b1 = add_borrower(&fx.repository, "B1", "M1", 365).await;
        let b2 = add_borrower(&fx.repository, "B2", "M2", 365).await;

        fx.service.borrow_book(b1.id, book.id, 7).await.unwrap();
        fx.service.borrow_book(b2.id, book.id, 7).await.unwrap();
        fx.service.return_book(b2.id, book.id).await.unwrap();

        let active = fx.service.get_active_borrows(b1.id).await;
        assert_eq!(active.len(), 1);
        assert!(fx.service.get_active_borrows(b2.id).await.is_empty());
    }
}
