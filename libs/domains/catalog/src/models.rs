use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::error::{CatalogError, CatalogResult};
use crate::image_host::UploadedImage;

/// Image attached to a product, as stored on the image host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProductImage {
    /// Local identifier, used to delete a single image
    #[serde(rename = "_id", alias = "id")]
    pub id: Uuid,
    /// Identifier on the image host
    pub public_id: String,
    /// Secure URL served by the image host
    pub url: String,
}

impl From<UploadedImage> for ProductImage {
    fn from(uploaded: UploadedImage) -> Self {
        Self {
            id: Uuid::now_v7(),
            public_id: uploaded.public_id,
            url: uploaded.url,
        }
    }
}

/// Product entity - represents a product stored in MongoDB
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Product {
    #[serde(rename = "_id", alias = "id")]
    pub id: Uuid,
    pub name: String,
    pub description: String,
    /// Owning category; `None` for uncategorized products
    #[serde(default)]
    pub category: Option<Uuid>,
    pub price: f64,
    /// Units on hand; zero means out of stock
    pub stock: u32,
    #[serde(default)]
    pub images: Vec<ProductImage>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Build a product whose only image is `image`.
    pub fn new(input: ValidProduct, image: ProductImage) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            name: input.name,
            description: input.description,
            category: input.category,
            price: input.price,
            stock: input.stock,
            images: vec![image],
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply_update(&mut self, update: UpdateProduct) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(category) = update.category {
            self.category = category;
        }
        if let Some(price) = update.price {
            self.price = price;
        }
        if let Some(stock) = update.stock {
            self.stock = stock;
        }
        self.updated_at = Utc::now();
    }

    pub fn is_out_of_stock(&self) -> bool {
        self.stock == 0
    }

    pub fn image_position(&self, image_id: Uuid) -> Option<usize> {
        self.images.iter().position(|image| image.id == image_id)
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// Fields of a new product as submitted in the multipart form.
///
/// Every field is optional here; presence is enforced by the service so the
/// "missing image" and "missing fields" responses keep their order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewProduct {
    pub name: Option<String>,
    pub description: Option<String>,
    pub category: Option<Uuid>,
    pub price: Option<f64>,
    pub stock: Option<u32>,
    /// Fields that were sent but could not be parsed, reported only once the
    /// image has been checked
    pub invalid: Vec<String>,
}

/// A [`NewProduct`] with every required field present.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidProduct {
    pub name: String,
    pub description: String,
    pub category: Option<Uuid>,
    pub price: f64,
    pub stock: u32,
}

impl NewProduct {
    /// Malformed fields fail with `Validation`, then an absent or blank
    /// required field fails with `MissingFields`.
    pub fn into_valid(self) -> CatalogResult<ValidProduct> {
        if !self.invalid.is_empty() {
            return Err(CatalogError::Validation(self.invalid.join("; ")));
        }
        self.into_complete().ok_or(CatalogError::MissingFields)
    }

    fn into_complete(self) -> Option<ValidProduct> {
        let name = self.name.filter(|s| !s.trim().is_empty())?;
        let description = self.description.filter(|s| !s.trim().is_empty())?;
        Some(ValidProduct {
            name,
            description,
            category: self.category,
            price: self.price?,
            stock: self.stock?,
        })
    }
}

/// Partial update. An absent field is left unchanged; a present one
/// overwrites, including `""`, `0` and `"category": null`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Validate, ToSchema)]
pub struct UpdateProduct {
    pub name: Option<String>,
    pub description: Option<String>,
    /// `null` removes the product from its category
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<Uuid>)]
    pub category: Option<Option<Uuid>>,
    #[validate(range(min = 0.0))]
    pub price: Option<f64>,
    pub stock: Option<u32>,
}

/// Distinguishes an explicit `null` from a missing key.
fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

/// Category document. Attributes are whatever JSON object the client sent
/// (conventionally `{"category": "Shoes"}`), kept as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Category {
    #[serde(rename = "_id", alias = "id")]
    pub id: Uuid,
    #[serde(flatten)]
    #[schema(value_type = Object)]
    pub attributes: Map<String, Value>,
    pub created_at: DateTime<Utc>,
}

/// Keys owned by the server, dropped from client-supplied attributes.
const RESERVED_CATEGORY_KEYS: [&str; 3] = ["_id", "id", "created_at"];

impl Category {
    pub fn new(mut attributes: Map<String, Value>) -> Self {
        for key in RESERVED_CATEGORY_KEYS {
            attributes.remove(key);
        }
        Self {
            id: Uuid::now_v7(),
            attributes,
            created_at: Utc::now(),
        }
    }
}

/// Which products a category listing selects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryScope {
    /// Products referencing this category
    Assigned(Uuid),
    /// Products with no category reference
    Unassigned,
}

/// Query filters for listing products
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductFilter {
    /// Case-insensitive substring of the name, matched literally
    pub keyword: Option<String>,
    pub category: Option<CategoryScope>,
}

impl ProductFilter {
    pub fn keyword(keyword: Option<&str>) -> Self {
        Self {
            keyword: keyword.filter(|k| !k.is_empty()).map(str::to_string),
            category: None,
        }
    }

    pub fn category(scope: CategoryScope) -> Self {
        Self {
            keyword: None,
            category: Some(scope),
        }
    }

    /// In-process equivalent of the database query.
    pub fn matches(&self, product: &Product) -> bool {
        let keyword_ok = self.keyword.as_ref().is_none_or(|k| {
            product.name.to_lowercase().contains(&k.to_lowercase())
        });
        let category_ok = match self.category {
            None => true,
            Some(CategoryScope::Assigned(id)) => product.category == Some(id),
            Some(CategoryScope::Unassigned) => product.category.is_none(),
        };
        keyword_ok && category_ok
    }
}

/// `GET /products` query string.
///
/// `category` takes precedence over `keyword`. An empty `category=` selects
/// uncategorized products.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ProductQuery {
    /// Case-insensitive name search
    pub keyword: Option<String>,
    /// Category id, or empty for uncategorized products
    pub category: Option<String>,
}

/// `DELETE /products/{id}/image` query string
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ImageQuery {
    /// Id of the image to remove
    pub id: Option<String>,
}

/// Product with its category document joined in
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ProductView {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub name: String,
    pub description: String,
    /// `null` when uncategorized or the category no longer exists
    pub category: Option<Category>,
    pub price: f64,
    pub stock: u32,
    pub images: Vec<ProductImage>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ProductView {
    pub fn new(product: Product, category: Option<Category>) -> Self {
        Self {
            id: product.id,
            name: product.name,
            description: product.description,
            category,
            price: product.price,
            stock: product.stock,
            images: product.images,
            created_at: product.created_at,
            updated_at: product.updated_at,
        }
    }
}

/// Admin dashboard listing
#[derive(Debug, Clone, PartialEq)]
pub struct AdminOverview {
    pub products: Vec<ProductView>,
    pub out_of_stock: u64,
    pub in_stock: u64,
}

impl AdminOverview {
    pub fn new(products: Vec<ProductView>) -> Self {
        let out_of_stock = products.iter().filter(|p| p.stock == 0).count() as u64;
        let in_stock = products.len() as u64 - out_of_stock;
        Self {
            products,
            out_of_stock,
            in_stock,
        }
    }
}

// Response envelopes

#[derive(Debug, Serialize, ToSchema)]
pub struct ProductListResponse {
    pub success: bool,
    pub products: Vec<Product>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AdminProductsResponse {
    pub success: bool,
    pub products: Vec<ProductView>,
    #[serde(rename = "outOfStock")]
    pub out_of_stock: u64,
    #[serde(rename = "inStock")]
    pub in_stock: u64,
}

impl From<AdminOverview> for AdminProductsResponse {
    fn from(overview: AdminOverview) -> Self {
        Self {
            success: true,
            products: overview.products,
            out_of_stock: overview.out_of_stock,
            in_stock: overview.in_stock,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProductResponse {
    pub success: bool,
    pub product: ProductView,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CategoryListResponse {
    pub success: bool,
    pub categories: Vec<Category>,
}
