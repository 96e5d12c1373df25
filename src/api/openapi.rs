//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{books, borrowers, borrows, external, health, products};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Bibliotek API",
        version = "0.1.0",
        description = "Library Management REST API"
    ),
    paths(
        // Health
        health::health_check,
        // Books
        books::list_books,
        books::get_book,
        books::get_book_by_isbn,
        books::create_book,
        books::update_book,
        books::delete_book,
        // Borrowers
        borrowers::list_borrowers,
        borrowers::get_borrower,
        borrowers::get_borrower_by_membership,
        borrowers::create_borrower,
        borrowers::update_borrower,
        borrowers::delete_borrower,
        // Products
        products::list_products,
        products::get_product,
        products::get_product_by_sku,
        products::create_product,
        products::update_product,
        products::delete_product,
        // Borrows
        borrows::list_borrows,
        borrows::get_borrow,
        borrows::borrow_book,
        borrows::return_book,
        borrows::get_active_borrows,
        borrows::get_overdue,
        // External metadata
        external::get_book_info,
        external::get_api_logs,
    ),
    components(
        schemas(
            crate::models::Book,
            crate::models::Borrower,
            crate::models::BorrowRecord,
            crate::models::BorrowStatus,
            crate::models::Product,
            crate::models::ExternalBookInfo,
            crate::models::ExternalApiLog,
            borrows::BorrowRequest,
            borrows::ReturnRequest,
            health::HealthResponse,
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check"),
        (name = "books", description = "Book catalog management"),
        (name = "borrowers", description = "Borrower management"),
        (name = "products", description = "Product catalog management"),
        (name = "borrows", description = "Borrow and return workflow"),
        (name = "external", description = "External book metadata")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new().merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
