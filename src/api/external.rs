//! External book-metadata endpoints

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    error::{AppError, AppResult},
    models::{ExternalApiLog, ExternalBookInfo},
};

#[derive(Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct LogListQuery {
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}

/// Look up book metadata by ISBN via the external API (cached)
#[utoipa::path(
    get,
    path = "/api/external/bookinfo/{isbn}",
    tag = "external",
    params(("isbn" = String, Path, description = "ISBN to look up")),
    responses(
        (status = 200, description = "Book metadata", body = ExternalBookInfo),
        (status = 404, description = "No metadata found for the ISBN"),
        (status = 500, description = "External API call failed")
    )
)]
pub async fn get_book_info(
    State(state): State<crate::AppState>,
    Path(isbn): Path<String>,
) -> AppResult<Json<ExternalBookInfo>> {
    let info = state
        .services
        .external
        .get_book_info(&isbn)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No book info found for ISBN {}", isbn)))?;
    Ok(Json(info))
}

/// External API audit log, newest first
#[utoipa::path(
    get,
    path = "/api/external/logs",
    tag = "external",
    params(LogListQuery),
    responses(
        (status = 200, description = "Audit log entries", body = Vec<ExternalApiLog>)
    )
)]
pub async fn get_api_logs(
    State(state): State<crate::AppState>,
    Query(query): Query<LogListQuery>,
) -> AppResult<Json<Vec<ExternalApiLog>>> {
    let logs = state
        .services
        .external
        .get_logs(query.page.unwrap_or(1), query.page_size.unwrap_or(10))
        .await;
    Ok(Json(logs))
}
