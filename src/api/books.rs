//! Book endpoints

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    error::{AppError, AppResult},
    models::Book,
};

#[derive(Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct BookListQuery {
    /// Case-insensitive substring match on title or author
    pub search_term: Option<String>,
    /// Exact case-insensitive genre match
    pub genre: Option<String>,
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}

/// List books with search and pagination
#[utoipa::path(
    get,
    path = "/api/books",
    tag = "books",
    params(BookListQuery),
    responses(
        (status = 200, description = "List of books", body = Vec<Book>)
    )
)]
pub async fn list_books(
    State(state): State<crate::AppState>,
    Query(query): Query<BookListQuery>,
) -> AppResult<Json<Vec<Book>>> {
    let books = state
        .services
        .books
        .list(
            query.search_term.as_deref(),
            query.genre.as_deref(),
            query.page.unwrap_or(1),
            query.page_size.unwrap_or(10),
        )
        .await;
    Ok(Json(books))
}

/// Get a book by ID
#[utoipa::path(
    get,
    path = "/api/books/{id}",
    tag = "books",
    params(("id" = i32, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Book details", body = Book),
        (status = 404, description = "Book not found")
    )
)]
pub async fn get_book(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Book>> {
    let book = state
        .services
        .books
        .get(id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Book with ID {} not found", id)))?;
    Ok(Json(book))
}

/// Get a book by ISBN
#[utoipa::path(
    get,
    path = "/api/books/by-isbn/{isbn}",
    tag = "books",
    params(("isbn" = String, Path, description = "ISBN, matched case-insensitively")),
    responses(
        (status = 200, description = "Book details", body = Book),
        (status = 404, description = "Book not found")
    )
)]
pub async fn get_book_by_isbn(
    State(state): State<crate::AppState>,
    Path(isbn): Path<String>,
) -> AppResult<Json<Book>> {
    let book = state
        .services
        .books
        .get_by_isbn(&isbn)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Book with ISBN {} not found", isbn)))?;
    Ok(Json(book))
}

/// Add a new book
#[utoipa::path(
    post,
    path = "/api/books",
    tag = "books",
    request_body = Book,
    responses(
        (status = 201, description = "Book created", body = Book),
        (status = 400, description = "Missing title or ISBN")
    )
)]
pub async fn create_book(
    State(state): State<crate::AppState>,
    Json(book): Json<Book>,
) -> AppResult<(StatusCode, [(header::HeaderName, String); 1], Json<Book>)> {
    if book.title.is_empty() || book.isbn.is_empty() {
        return Err(AppError::Validation("Title and ISBN are required".to_string()));
    }

    let created = state.services.books.add(book).await?;
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, format!("/api/books/{}", created.id))],
        Json(created),
    ))
}

/// Update an existing book (whole-record replace)
#[utoipa::path(
    put,
    path = "/api/books/{id}",
    tag = "books",
    params(("id" = i32, Path, description = "Book ID")),
    request_body = Book,
    responses(
        (status = 200, description = "Book updated", body = Book),
        (status = 404, description = "Book not found")
    )
)]
pub async fn update_book(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    Json(book): Json<Book>,
) -> AppResult<Json<Book>> {
    let updated = state.services.books.update(id, book).await?;
    Ok(Json(updated))
}

/// Delete a book
#[utoipa::path(
    delete,
    path = "/api/books/{id}",
    tag = "books",
    params(("id" = i32, Path, description = "Book ID")),
    responses(
        (status = 204, description = "Book deleted"),
        (status = 404, description = "Book not found")
    )
)]
pub async fn delete_book(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state
        .services
        .books
        .get(id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Book with ID {} not found", id)))?;

    state.services.books.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
