//! Books repository

use std::sync::Arc;

use chrono::Utc;

use crate::{
    error::{AppError, AppResult},
    models::{Book, Entity},
};

use super::{paginate, store::JsonStore};

#[derive(Clone)]
pub struct BooksRepository {
    store: Arc<JsonStore>,
}

impl BooksRepository {
    pub fn new(store: Arc<JsonStore>) -> Self {
        Self { store }
    }

    /// List books with optional search term (title or author substring,
    /// case-insensitive) and exact case-insensitive genre filter.
    pub async fn list(
        &self,
        search_term: Option<&str>,
        genre: Option<&str>,
        page: i64,
        page_size: i64,
    ) -> Vec<Book> {
        let mut books = self.store.load::<Book>().await;

        if let Some(term) = search_term.filter(|t| !t.is_empty()) {
            let term = term.to_lowercase();
            books.retain(|b| {
                b.title.to_lowercase().contains(&term) || b.author.to_lowercase().contains(&term)
            });
        }

        if let Some(genre) = genre.filter(|g| !g.is_empty()) {
            let genre = genre.to_lowercase();
            books.retain(|b| b.genre.to_lowercase() == genre);
        }

        paginate(books, page, page_size)
    }

    pub async fn get_by_id(&self, id: i32) -> Option<Book> {
        self.store.find_by_id(id).await
    }

    /// First book with a case-insensitive ISBN match
    pub async fn get_by_isbn(&self, isbn: &str) -> Option<Book> {
        let isbn = isbn.to_lowercase();
        self.store
            .load::<Book>()
            .await
            .into_iter()
            .find(|b| b.isbn.to_lowercase() == isbn)
    }

    pub async fn insert(&self, mut book: Book) -> AppResult<Book> {
        let lock = self.store.lock_for::<Book>();
        let _guard = lock.lock().await;

        let mut books = self.store.load::<Book>().await;
        book.set_id(JsonStore::next_id(&books));
        book.created_at = Utc::now();
        book.updated_at = None;
        books.push(book.clone());
        self.store.save(&books).await?;
        Ok(book)
    }

    /// Whole-record replace. Preserves the original `created_at` and
    /// stamps `updated_at`.
    pub async fn update(&self, id: i32, mut book: Book) -> AppResult<Book> {
        let lock = self.store.lock_for::<Book>();
        let _guard = lock.lock().await;

        let mut books = self.store.load::<Book>().await;
        let pos = books
            .iter()
            .position(|b| b.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Book with ID {} not found", id)))?;

        book.id = id;
        book.created_at = books[pos].created_at;
        book.updated_at = Some(Utc::now());
        books[pos] = book.clone();
        self.store.save(&books).await?;
        Ok(book)
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.store.delete_by_id::<Book>(id).await?;
        Ok(())
    }
}
