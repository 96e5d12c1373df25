//! HTTP handlers and router assembly

pub mod books;
pub mod borrowers;
pub mod borrows;
pub mod external;
pub mod health;
pub mod openapi;
pub mod products;

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::AppState;

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api = Router::new()
        // Books
        .route("/books", get(books::list_books))
        .route("/books", post(books::create_book))
        .route("/books/:id", get(books::get_book))
        .route("/books/:id", put(books::update_book))
        .route("/books/:id", delete(books::delete_book))
        .route("/books/by-isbn/:isbn", get(books::get_book_by_isbn))
        // Borrowers
        .route("/borrowers", get(borrowers::list_borrowers))
        .route("/borrowers", post(borrowers::create_borrower))
        .route("/borrowers/:id", get(borrowers::get_borrower))
        .route("/borrowers/:id", put(borrowers::update_borrower))
        .route("/borrowers/:id", delete(borrowers::delete_borrower))
        .route(
            "/borrowers/by-membership/:membership_id",
            get(borrowers::get_borrower_by_membership),
        )
        // Products
        .route("/products", get(products::list_products))
        .route("/products", post(products::create_product))
        .route("/products/:id", get(products::get_product))
        .route("/products/:id", put(products::update_product))
        .route("/products/:id", delete(products::delete_product))
        .route("/products/by-sku/:sku", get(products::get_product_by_sku))
        // Borrow workflow
        .route("/borrows", get(borrows::list_borrows))
        .route("/borrows/borrow", post(borrows::borrow_book))
        .route("/borrows/return", post(borrows::return_book))
        .route("/borrows/:id", get(borrows::get_borrow))
        .route("/borrows/borrower/:borrower_id", get(borrows::get_active_borrows))
        .route("/borrows/overdue/list", get(borrows::get_overdue))
        // External metadata
        .route("/external/bookinfo/:isbn", get(external::get_book_info))
        .route("/external/logs", get(external::get_api_logs))
        .with_state(state);

    Router::new()
        .route("/health", get(health::health_check))
        .nest("/api", api)
        .merge(openapi::create_openapi_router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
