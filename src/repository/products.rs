//! Products repository

use std::sync::Arc;

use chrono::Utc;

use crate::{
    error::{AppError, AppResult},
    models::{Entity, Product},
};

use super::{paginate, store::JsonStore};

#[derive(Clone)]
pub struct ProductsRepository {
    store: Arc<JsonStore>,
}

impl ProductsRepository {
    pub fn new(store: Arc<JsonStore>) -> Self {
        Self { store }
    }

    /// List active products with optional search (name, description or
    /// SKU substring), exact category filter and a sort key. Unknown
    /// sort keys leave the stored order untouched.
    pub async fn list(
        &self,
        search: Option<&str>,
        category: Option<&str>,
        sort: Option<&str>,
        page: i64,
        page_size: i64,
    ) -> Vec<Product> {
        let mut products: Vec<Product> = self
            .store
            .load::<Product>()
            .await
            .into_iter()
            .filter(|p| p.is_active)
            .collect();

        if let Some(term) = search.filter(|t| !t.is_empty()) {
            let term = term.to_lowercase();
            products.retain(|p| {
                p.name.to_lowercase().contains(&term)
                    || p.description.to_lowercase().contains(&term)
                    || p.sku.to_lowercase().contains(&term)
            });
        }

        if let Some(category) = category.filter(|c| !c.is_empty()) {
            let category = category.to_lowercase();
            products.retain(|p| p.category.to_lowercase() == category);
        }

        match sort.map(str::to_lowercase).as_deref() {
            Some("price_asc") => products.sort_by(|a, b| a.price.cmp(&b.price)),
            Some("price_desc") => products.sort_by(|a, b| b.price.cmp(&a.price)),
            Some("name_asc") => products.sort_by(|a, b| a.name.cmp(&b.name)),
            Some("name_desc") => products.sort_by(|a, b| b.name.cmp(&a.name)),
            Some("newest") => products.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
            Some("oldest") => products.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
            _ => {}
        }

        paginate(products, page, page_size)
    }

    /// Lookup by id, soft-deleted records included
    pub async fn get_by_id(&self, id: i32) -> Option<Product> {
        self.store.find_by_id(id).await
    }

    /// Case-insensitive SKU lookup over active products only
    pub async fn get_by_sku(&self, sku: &str) -> Option<Product> {
        let sku = sku.to_lowercase();
        self.store
            .load::<Product>()
            .await
            .into_iter()
            .find(|p| p.sku.to_lowercase() == sku && p.is_active)
    }

    pub async fn insert(&self, mut product: Product) -> AppResult<Product> {
        let lock = self.store.lock_for::<Product>();
        let _guard = lock.lock().await;

        let mut products = self.store.load::<Product>().await;
        if products
            .iter()
            .any(|p| p.sku.eq_ignore_ascii_case(&product.sku))
        {
            return Err(AppError::Conflict(format!(
                "SKU {} already exists",
                product.sku
            )));
        }

        product.set_id(JsonStore::next_id(&products));
        product.created_at = Utc::now();
        products.push(product.clone());
        self.store.save(&products).await?;
        Ok(product)
    }

    pub async fn update(&self, id: i32, mut product: Product) -> AppResult<Product> {
        let lock = self.store.lock_for::<Product>();
        let _guard = lock.lock().await;

        let mut products = self.store.load::<Product>().await;
        let pos = products
            .iter()
            .position(|p| p.product_id == id)
            .ok_or_else(|| AppError::NotFound(format!("Product with ID {} not found", id)))?;

        product.product_id = id;
        product.created_at = products[pos].created_at;
        products[pos] = product.clone();
        self.store.save(&products).await?;
        Ok(product)
    }

    /// Soft delete: clears `is_active`, the record stays in the file.
    /// Absent ids are a no-op.
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let lock = self.store.lock_for::<Product>();
        let _guard = lock.lock().await;

        let mut products = self.store.load::<Product>().await;
        if let Some(product) = products.iter_mut().find(|p| p.product_id == id) {
            product.is_active = false;
            self.store.save(&products).await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn repo() -> (tempfile::TempDir, ProductsRepository) {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(JsonStore::new(dir.path()).unwrap());
        (dir, ProductsRepository::new(store))
    }

    fn product(name: &str, sku: &str, price: i64) -> Product {
        Product {
            product_id: 0,
            name: name.to_string(),
            description: String::new(),
            sku: sku.to_string(),
            category: "misc".to_string(),
            price: Decimal::new(price, 0),
            quantity_in_stock: 1,
            manufacturer: String::new(),
            weight: String::new(),
            dimensions: String::new(),
            created_at: Utc::now(),
            is_active: true,
        }
    }

    #[tokio::test]
    async fn duplicate_sku_conflicts() {
        let (_dir, repo) = repo();
        repo.insert(product("a", "SKU-1", 5)).await.unwrap();
        let err = repo.insert(product("b", "sku-1", 5)).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn soft_delete_hides_from_list_and_sku_but_keeps_record() {
        let (_dir, repo) = repo();
        let p = repo.insert(product("a", "SKU-1", 5)).await.unwrap();
        repo.delete(p.product_id).await.unwrap();

        assert!(repo.list(None, None, None, 1, 10).await.is_empty());
        assert!(repo.get_by_sku("SKU-1").await.is_none());

        // The record survives in the backing file
        let stored = repo.get_by_id(p.product_id).await.unwrap();
        assert!(!stored.is_active);
    }

    #[tokio::test]
    async fn sort_by_price() {
        let (_dir, repo) = repo();
        repo.insert(product("mid", "S1", 20)).await.unwrap();
        repo.insert(product("cheap", "S2", 5)).await.unwrap();
        repo.insert(product("dear", "S3", 90)).await.unwrap();

        let sorted = repo.list(None, None, Some("price_asc"), 1, 10).await;
        let names: Vec<_> = sorted.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["cheap", "mid", "dear"]);
    }
}
