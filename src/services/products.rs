//! Product catalog service

use crate::{error::AppResult, models::Product, repository::Repository};

#[derive(Clone)]
pub struct ProductsService {
    repository: Repository,
}

impl ProductsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(
        &self,
        search: Option<&str>,
        category: Option<&str>,
        sort: Option<&str>,
        page: i64,
        page_size: i64,
    ) -> Vec<Product> {
        let products = self
            .repository
            .products
            .list(search, category, sort, page, page_size)
            .await;
        tracing::info!(
            "Retrieved {} products with filters: search={:?}, category={:?}, sort={:?}",
            products.len(),
            search,
            category,
            sort
        );
        products
    }

    pub async fn get(&self, id: i32) -> Option<Product> {
        self.repository.products.get_by_id(id).await
    }

    pub async fn get_by_sku(&self, sku: &str) -> Option<Product> {
        self.repository.products.get_by_sku(sku).await
    }

    pub async fn add(&self, product: Product) -> AppResult<Product> {
        let product = self.repository.products.insert(product).await?;
        tracing::info!(
            "Product added with ID {}: {}",
            product.product_id,
            product.name
        );
        Ok(product)
    }

    pub async fn update(&self, id: i32, product: Product) -> AppResult<Product> {
        let product = self.repository.products.update(id, product).await?;
        tracing::info!("Product updated with ID {}", id);
        Ok(product)
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.products.delete(id).await?;
        tracing::info!("Product soft-deleted with ID {}", id);
        Ok(())
    }
}
