//! Borrow workflow endpoints

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    Json,
};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use crate::{
    error::{AppError, AppResult},
    models::BorrowRecord,
};

#[derive(Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct BorrowListQuery {
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}

/// Borrow request
#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BorrowRequest {
    pub borrower_id: i32,
    pub book_id: i32,
    /// Loan duration in days
    pub days: i64,
}

/// Return request
#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReturnRequest {
    pub borrower_id: i32,
    pub book_id: i32,
}

/// List borrow records with pagination
#[utoipa::path(
    get,
    path = "/api/borrows",
    tag = "borrows",
    params(BorrowListQuery),
    responses(
        (status = 200, description = "List of borrow records", body = Vec<BorrowRecord>)
    )
)]
pub async fn list_borrows(
    State(state): State<crate::AppState>,
    Query(query): Query<BorrowListQuery>,
) -> AppResult<Json<Vec<BorrowRecord>>> {
    let records = state
        .services
        .borrows
        .get_all(query.page.unwrap_or(1), query.page_size.unwrap_or(10))
        .await;
    Ok(Json(records))
}

/// Get a borrow record by ID
#[utoipa::path(
    get,
    path = "/api/borrows/{id}",
    tag = "borrows",
    params(("id" = i32, Path, description = "Borrow record ID")),
    responses(
        (status = 200, description = "Borrow record", body = BorrowRecord),
        (status = 404, description = "Borrow record not found")
    )
)]
pub async fn get_borrow(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<BorrowRecord>> {
    let record = state
        .services
        .borrows
        .get_by_id(id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Borrow record with ID {} not found", id)))?;
    Ok(Json(record))
}

/// Borrow a book
#[utoipa::path(
    post,
    path = "/api/borrows/borrow",
    tag = "borrows",
    request_body = BorrowRequest,
    responses(
        (status = 201, description = "Borrow record created", body = BorrowRecord),
        (status = 400, description = "Invalid request, no copies available, or membership expired"),
        (status = 404, description = "Book or borrower not found")
    )
)]
pub async fn borrow_book(
    State(state): State<crate::AppState>,
    Json(request): Json<BorrowRequest>,
) -> AppResult<(StatusCode, [(header::HeaderName, String); 1], Json<BorrowRecord>)> {
    if request.borrower_id <= 0 || request.book_id <= 0 || request.days <= 0 {
        return Err(AppError::Validation(
            "Invalid borrowerId, bookId, or days".to_string(),
        ));
    }

    let record = state
        .services
        .borrows
        .borrow_book(request.borrower_id, request.book_id, request.days)
        .await?;
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, format!("/api/borrows/{}", record.id))],
        Json(record),
    ))
}

/// Return a borrowed book
#[utoipa::path(
    post,
    path = "/api/borrows/return",
    tag = "borrows",
    request_body = ReturnRequest,
    responses(
        (status = 200, description = "Book returned", body = BorrowRecord),
        (status = 400, description = "Invalid request"),
        (status = 404, description = "No active borrow record found")
    )
)]
pub async fn return_book(
    State(state): State<crate::AppState>,
    Json(request): Json<ReturnRequest>,
) -> AppResult<Json<BorrowRecord>> {
    if request.borrower_id <= 0 || request.book_id <= 0 {
        return Err(AppError::Validation(
            "Invalid borrowerId or bookId".to_string(),
        ));
    }

    let record = state
        .services
        .borrows
        .return_book(request.borrower_id, request.book_id)
        .await?;
    Ok(Json(record))
}

/// Active borrows for a borrower
#[utoipa::path(
    get,
    path = "/api/borrows/borrower/{borrowerId}",
    tag = "borrows",
    params(("borrowerId" = i32, Path, description = "Borrower ID")),
    responses(
        (status = 200, description = "Active borrow records", body = Vec<BorrowRecord>)
    )
)]
pub async fn get_active_borrows(
    State(state): State<crate::AppState>,
    Path(borrower_id): Path<i32>,
) -> AppResult<Json<Vec<BorrowRecord>>> {
    let records = state.services.borrows.get_active_borrows(borrower_id).await;
    Ok(Json(records))
}

/// Active borrow records past their due date
#[utoipa::path(
    get,
    path = "/api/borrows/overdue/list",
    tag = "borrows",
    responses(
        (status = 200, description = "Overdue borrow records", body = Vec<BorrowRecord>)
    )
)]
pub async fn get_overdue(
    State(state): State<crate::AppState>,
) -> AppResult<Json<Vec<BorrowRecord>>> {
    let records = state.services.borrows.get_overdue().await;
    Ok(Json(records))
}
