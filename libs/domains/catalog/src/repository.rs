use async_trait::async_trait;
use uuid::Uuid;

use crate::error::CatalogResult;
use crate::models::{Category, Product, ProductFilter};

/// Data access for products.
///
/// Listing order is creation order, oldest first.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Persist a new product
    async fn insert(&self, product: &Product) -> CatalogResult<()>;

    async fn get_by_id(&self, id: Uuid) -> CatalogResult<Option<Product>>;

    /// List products matching every set filter
    async fn list(&self, filter: &ProductFilter) -> CatalogResult<Vec<Product>>;

    /// Overwrite the stored document with the same id.
    ///
    /// Returns `false` when no such product exists.
    async fn replace(&self, product: &Product) -> CatalogResult<bool>;

    /// Returns `false` when no such product exists.
    async fn delete(&self, id: Uuid) -> CatalogResult<bool>;
}

/// Data access for categories
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    async fn insert(&self, category: &Category) -> CatalogResult<()>;

    async fn get_by_id(&self, id: Uuid) -> CatalogResult<Option<Category>>;

    /// Fetch several categories at once; unknown ids are skipped
    async fn get_by_ids(&self, ids: &[Uuid]) -> CatalogResult<Vec<Category>>;

    async fn list(&self) -> CatalogResult<Vec<Category>>;

    async fn delete(&self, id: Uuid) -> CatalogResult<bool>;
}
