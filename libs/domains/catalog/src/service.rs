//! Catalog Service - Business logic layer

use serde_json::{Map, Value};
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;
use tracing::{info, instrument, warn};
use uuid::Uuid;
use validator::Validate;

use crate::error::{CatalogError, CatalogResult};
use crate::image_host::{ImageHost, ImageUpload};
use crate::models::{
    AdminOverview, Category, CategoryScope, NewProduct, Product, ProductFilter, ProductImage,
    ProductView, UpdateProduct,
};
use crate::repository::{CategoryRepository, ProductRepository};

/// Product and category operations.
///
/// Multi-step operations (deleting a product with its images, detaching
/// products from a deleted category) run sequentially and are not atomic: a
/// failure part-way returns the error and leaves the steps already taken.
#[derive(Clone)]
pub struct CatalogService {
    products: Arc<dyn ProductRepository>,
    categories: Arc<dyn CategoryRepository>,
    images: Arc<dyn ImageHost>,
}

impl CatalogService {
    pub fn new(
        products: impl ProductRepository + 'static,
        categories: impl CategoryRepository + 'static,
        images: impl ImageHost + 'static,
    ) -> Self {
        Self {
            products: Arc::new(products),
            categories: Arc::new(categories),
            images: Arc::new(images),
        }
    }

    async fn find_product(&self, id: Uuid) -> CatalogResult<Product> {
        self.products
            .get_by_id(id)
            .await?
            .ok_or(CatalogError::ProductNotFound(id))
    }

    /// A product may only reference a category that exists.
    async fn ensure_category(&self, category: Option<Uuid>) -> CatalogResult<()> {
        if let Some(id) = category {
            if self.categories.get_by_id(id).await?.is_none() {
                return Err(CatalogError::CategoryNotFound(id));
            }
        }
        Ok(())
    }

    /// Products whose name contains `keyword`, ignoring case. Empty or
    /// absent lists everything.
    #[instrument(skip(self))]
    pub async fn list_products(&self, keyword: Option<&str>) -> CatalogResult<Vec<Product>> {
        self.products.list(&ProductFilter::keyword(keyword)).await
    }

    #[instrument(skip(self))]
    pub async fn list_by_category(&self, scope: CategoryScope) -> CatalogResult<Vec<Product>> {
        self.products.list(&ProductFilter::category(scope)).await
    }

    /// Every product with its category joined, plus stock counts.
    #[instrument(skip(self))]
    pub async fn admin_overview(&self) -> CatalogResult<AdminOverview> {
        let products = self.products.list(&ProductFilter::default()).await?;

        let ids: Vec<Uuid> = products
            .iter()
            .filter_map(|p| p.category)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let categories: HashMap<Uuid, Category> = self
            .categories
            .get_by_ids(&ids)
            .await?
            .into_iter()
            .map(|c| (c.id, c))
            .collect();

        let views = products
            .into_iter()
            .map(|p| {
                let category = p.category.and_then(|id| categories.get(&id).cloned());
                ProductView::new(p, category)
            })
            .collect();

        Ok(AdminOverview::new(views))
    }

    #[instrument(skip(self))]
    pub async fn get_product(&self, id: Uuid) -> CatalogResult<ProductView> {
        let product = self.find_product(id).await?;
        let category = match product.category {
            Some(category_id) => self.categories.get_by_id(category_id).await?,
            None => None,
        };
        Ok(ProductView::new(product, category))
    }

    /// Upload the image, then store the product with it as its only image.
    ///
    /// The image is checked before the fields, and nothing is uploaded or
    /// stored unless both are present.
    #[instrument(skip(self, input, image))]
    pub async fn create_product(
        &self,
        input: NewProduct,
        image: Option<ImageUpload>,
    ) -> CatalogResult<Product> {
        let image = image
            .filter(|i| !i.is_empty())
            .ok_or(CatalogError::MissingImage)?;
        let input = input.into_valid()?;

        self.ensure_category(input.category).await?;

        let uploaded = self.images.upload(image).await?;
        let product = Product::new(input, ProductImage::from(uploaded));
        self.products.insert(&product).await?;

        info!(product_id = %product.id, "Product created");
        Ok(product)
    }

    /// Overwrite the fields present in `input`; absent fields are untouched.
    #[instrument(skip(self, input))]
    pub async fn update_product(&self, id: Uuid, input: UpdateProduct) -> CatalogResult<Product> {
        input
            .validate()
            .map_err(|e| CatalogError::Validation(e.to_string()))?;

        let mut product = self.find_product(id).await?;
        self.ensure_category(input.category.flatten()).await?;
        product.apply_update(input);

        if !self.products.replace(&product).await? {
            return Err(CatalogError::ProductNotFound(id));
        }

        info!(product_id = %id, "Product updated");
        Ok(product)
    }

    #[instrument(skip(self, image))]
    pub async fn add_image(
        &self,
        id: Uuid,
        image: Option<ImageUpload>,
    ) -> CatalogResult<ProductImage> {
        let mut product = self.find_product(id).await?;
        let image = image
            .filter(|i| !i.is_empty())
            .ok_or(CatalogError::MissingImage)?;

        let uploaded = ProductImage::from(self.images.upload(image).await?);
        product.images.push(uploaded.clone());
        product.touch();

        if !self.products.replace(&product).await? {
            return Err(CatalogError::ProductNotFound(id));
        }

        info!(product_id = %id, image_id = %uploaded.id, "Image added");
        Ok(uploaded)
    }

    /// Remove one image from the host and from the product.
    ///
    /// `image_id` that is not a valid id is reported the same way as one the
    /// product does not have.
    #[instrument(skip(self))]
    pub async fn delete_image(&self, id: Uuid, image_id: Option<&str>) -> CatalogResult<()> {
        let mut product = self.find_product(id).await?;

        let raw = image_id
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or(CatalogError::MissingImageId)?;
        let position = Uuid::parse_str(raw)
            .ok()
            .and_then(|image_id| product.image_position(image_id))
            .ok_or_else(|| CatalogError::ImageNotFound(raw.to_string()))?;

        self.images.destroy(&product.images[position].public_id).await?;
        let removed = product.images.remove(position);
        product.touch();

        if !self.products.replace(&product).await? {
            return Err(CatalogError::ProductNotFound(id));
        }

        info!(product_id = %id, image_id = %removed.id, "Image deleted");
        Ok(())
    }

    /// Destroy every image on the host, in order, then delete the record.
    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: Uuid) -> CatalogResult<()> {
        let product = self.find_product(id).await?;

        for (destroyed, image) in product.images.iter().enumerate() {
            if let Err(e) = self.images.destroy(&image.public_id).await {
                warn!(
                    product_id = %id,
                    destroyed,
                    total = product.images.len(),
                    "Stopped deleting product images"
                );
                return Err(e);
            }
        }

        if !self.products.delete(id).await? {
            return Err(CatalogError::ProductNotFound(id));
        }

        info!(product_id = %id, images = product.images.len(), "Product deleted");
        Ok(())
    }

    #[instrument(skip(self, attributes))]
    pub async fn add_category(&self, attributes: Map<String, Value>) -> CatalogResult<Category> {
        let category = Category::new(attributes);
        self.categories.insert(&category).await?;

        info!(category_id = %category.id, "Category added");
        Ok(category)
    }

    #[instrument(skip(self))]
    pub async fn list_categories(&self) -> CatalogResult<Vec<Category>> {
        self.categories.list().await
    }

    /// Detach every product from the category, then delete it.
    #[instrument(skip(self))]
    pub async fn delete_category(&self, id: Uuid) -> CatalogResult<()> {
        if self.categories.get_by_id(id).await?.is_none() {
            return Err(CatalogError::CategoryNotFound(id));
        }

        let products = self
            .products
            .list(&ProductFilter::category(CategoryScope::Assigned(id)))
            .await?;

        for (cleared, mut product) in products.iter().cloned().enumerate() {
            product.category = None;
            product.touch();
            if let Err(e) = self.products.replace(&product).await {
                warn!(
                    category_id = %id,
                    cleared,
                    total = products.len(),
                    "Stopped detaching products from category"
                );
                return Err(e);
            }
        }

        if !self.categories.delete(id).await? {
            return Err(CatalogError::CategoryNotFound(id));
        }

        info!(category_id = %id, detached = products.len(), "Category deleted");
        Ok(())
    }
}
