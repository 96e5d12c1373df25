//! Book catalog service

use crate::{error::AppResult, models::Book, repository::Repository};

#[derive(Clone)]
pub struct BooksService {
    repository: Repository,
}

impl BooksService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(
        &self,
        search_term: Option<&str>,
        genre: Option<&str>,
        page: i64,
        page_size: i64,
    ) -> Vec<Book> {
        let books = self
            .repository
            .books
            .list(search_term, genre, page, page_size)
            .await;
        tracing::info!(
            "Retrieved {} books with filters: searchTerm={:?}, genre={:?}",
            books.len(),
            search_term,
            genre
        );
        books
    }

    pub async fn get(&self, id: i32) -> Option<Book> {
        self.repository.books.get_by_id(id).await
    }

    pub async fn get_by_isbn(&self, isbn: &str) -> Option<Book> {
        self.repository.books.get_by_isbn(isbn).await
    }

    pub async fn add(&self, book: Book) -> AppResult<Book> {
        let book = self.repository.books.insert(book).await?;
        tracing::info!("Book added with ID {}: {}", book.id, book.title);
        Ok(book)
    }

    pub async fn update(&self, id: i32, book: Book) -> AppResult<Book> {
        let book = self.repository.books.update(id, book).await?;
        tracing::info!("Book updated with ID {}", id);
        Ok(book)
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.books.delete(id).await?;
        tracing::info!("Book deleted with ID {}", id);
        Ok(())
    }
}
