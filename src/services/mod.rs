//! Business logic services

pub mod books;
pub mod borrowers;
pub mod borrows;
pub mod external;
pub mod heartbeat;
pub mod products;

use crate::{config::ExternalApiConfig, error::AppResult, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub books: books::BooksService,
    pub borrowers: borrowers::BorrowersService,
    pub borrows: borrows::BorrowsService,
    pub products: products::ProductsService,
    pub external: external::ExternalApiService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository, external_config: ExternalApiConfig) -> AppResult<Self> {
        Ok(Self {
            books: books::BooksService::new(repository.clone()),
            borrowers: borrowers::BorrowersService::new(repository.clone()),
            borrows: borrows::BorrowsService::new(repository.clone()),
            products: products::ProductsService::new(repository.clone()),
            external: external::ExternalApiService::new(repository, external_config)?,
        })
    }
}
