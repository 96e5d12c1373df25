//! Borrower endpoints

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    error::{AppError, AppResult},
    models::Borrower,
};

#[derive(Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct BorrowerListQuery {
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}

/// List borrowers with pagination
#[utoipa::path(
    get,
    path = "/api/borrowers",
    tag = "borrowers",
    params(BorrowerListQuery),
    responses(
        (status = 200, description = "List of borrowers", body = Vec<Borrower>)
    )
)]
pub async fn list_borrowers(
    State(state): State<crate::AppState>,
    Query(query): Query<BorrowerListQuery>,
) -> AppResult<Json<Vec<Borrower>>> {
    let borrowers = state
        .services
        .borrowers
        .list(query.page.unwrap_or(1), query.page_size.unwrap_or(10))
        .await;
    Ok(Json(borrowers))
}

/// Get a borrower by ID
#[utoipa::path(
    get,
    path = "/api/borrowers/{id}",
    tag = "borrowers",
    params(("id" = i32, Path, description = "Borrower ID")),
    responses(
        (status = 200, description = "Borrower details", body = Borrower),
        (status = 404, description = "Borrower not found")
    )
)]
pub async fn get_borrower(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Borrower>> {
    let borrower = state
        .services
        .borrowers
        .get(id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Borrower with ID {} not found", id)))?;
    Ok(Json(borrower))
}

/// Get a borrower by membership ID
#[utoipa::path(
    get,
    path = "/api/borrowers/by-membership/{membershipId}",
    tag = "borrowers",
    params(("membershipId" = String, Path, description = "Membership ID, matched case-insensitively")),
    responses(
        (status = 200, description = "Borrower details", body = Borrower),
        (status = 404, description = "Borrower not found")
    )
)]
pub async fn get_borrower_by_membership(
    State(state): State<crate::AppState>,
    Path(membership_id): Path<String>,
) -> AppResult<Json<Borrower>> {
    let borrower = state
        .services
        .borrowers
        .get_by_membership_id(&membership_id)
        .await
        .ok_or_else(|| {
            AppError::NotFound(format!(
                "Borrower with membership ID {} not found",
                membership_id
            ))
        })?;
    Ok(Json(borrower))
}

/// Register a new borrower
#[utoipa::path(
    post,
    path = "/api/borrowers",
    tag = "borrowers",
    request_body = Borrower,
    responses(
        (status = 201, description = "Borrower created", body = Borrower),
        (status = 400, description = "Missing name or membership ID, or duplicate membership ID")
    )
)]
pub async fn create_borrower(
    State(state): State<crate::AppState>,
    Json(borrower): Json<Borrower>,
) -> AppResult<(StatusCode, [(header::HeaderName, String); 1], Json<Borrower>)> {
    if borrower.name.is_empty() || borrower.membership_id.is_empty() {
        return Err(AppError::Validation(
            "Name and MembershipId are required".to_string(),
        ));
    }

    let created = state.services.borrowers.add(borrower).await?;
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, format!("/api/borrowers/{}", created.id))],
        Json(created),
    ))
}

/// Update an existing borrower (whole-record replace)
#[utoipa::path(
    put,
    path = "/api/borrowers/{id}",
    tag = "borrowers",
    params(("id" = i32, Path, description = "Borrower ID")),
    request_body = Borrower,
    responses(
        (status = 200, description = "Borrower updated", body = Borrower),
        (status = 404, description = "Borrower not found")
    )
)]
pub async fn update_borrower(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    Json(borrower): Json<Borrower>,
) -> AppResult<Json<Borrower>> {
    let updated = state.services.borrowers.update(id, borrower).await?;
    Ok(Json(updated))
}

/// Delete a borrower
#[utoipa::path(
    delete,
    path = "/api/borrowers/{id}",
    tag = "borrowers",
    params(("id" = i32, Path, description = "Borrower ID")),
    responses(
        (status = 204, description = "Borrower deleted"),
        (status = 404, description = "Borrower not found")
    )
)]
pub async fn delete_borrower(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state
        .services
        .borrowers
        .get(id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Borrower with ID {} not found", id)))?;

    state.services.borrowers.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
