//! MongoDB implementations of the catalog repositories

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures_util::TryStreamExt;
use mongodb::{
    Collection, Database, IndexModel,
    bson::{Binary, Bson, Document, doc, spec::BinarySubtype},
    options::{FindOptions, IndexOptions},
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::instrument;
use uuid::Uuid;

use crate::error::CatalogResult;
use crate::models::{Category, CategoryScope, Product, ProductFilter};
use crate::repository::{CategoryRepository, ProductRepository};

pub const PRODUCTS_COLLECTION: &str = "products";
pub const CATEGORIES_COLLECTION: &str = "categories";

/// A `Uuid` the way the driver writes it inside a document: 16 bytes of
/// generic binary. `to_bson` would produce the hyphenated string instead, which
/// never matches a stored value.
fn uuid_bson(id: Uuid) -> Bson {
    Bson::Binary(Binary {
        subtype: BinarySubtype::Generic,
        bytes: id.as_bytes().to_vec(),
    })
}

fn id_filter(id: Uuid) -> Document {
    doc! { "_id": uuid_bson(id) }
}

fn index(keys: Document, name: &str) -> IndexModel {
    IndexModel::builder()
        .keys(keys)
        .options(IndexOptions::builder().name(name.to_string()).build())
        .build()
}

fn oldest_first() -> FindOptions {
    FindOptions::builder().sort(doc! { "created_at": 1, "_id": 1 }).build()
}

pub struct MongoProductRepository {
    collection: Collection<Product>,
}

impl MongoProductRepository {
    pub fn new(db: &Database) -> Self {
        Self::with_collection(db, PRODUCTS_COLLECTION)
    }

    pub fn with_collection(db: &Database, collection_name: &str) -> Self {
        Self {
            collection: db.collection::<Product>(collection_name),
        }
    }

    pub async fn init_indexes(&self) -> CatalogResult<()> {
        let indexes = vec![
            index(doc! { "name": 1 }, "idx_name"),
            index(doc! { "category": 1, "created_at": 1 }, "idx_category"),
            index(doc! { "stock": 1 }, "idx_stock"),
        ];

        self.collection.create_indexes(indexes).await?;
        tracing::info!("Product indexes created successfully");
        Ok(())
    }

    /// Translate a [`ProductFilter`] into a query document.
    ///
    /// The keyword is regex-escaped so it matches literally.
    fn build_filter(filter: &ProductFilter) -> Document {
        let mut query = doc! {};

        if let Some(keyword) = filter.keyword.as_deref().filter(|k| !k.is_empty()) {
            query.insert(
                "name",
                doc! { "$regex": regex::escape(keyword), "$options": "i" },
            );
        }

        match filter.category {
            Some(CategoryScope::Assigned(id)) => {
                query.insert("category", uuid_bson(id));
            }
            // Matches both an explicit null and a missing field
            Some(CategoryScope::Unassigned) => {
                query.insert("category", Bson::Null);
            }
            None => {}
        }

        query
    }
}

#[async_trait]
impl ProductRepository for MongoProductRepository {
    #[instrument(skip(self, product), fields(product_id = %product.id))]
    async fn insert(&self, product: &Product) -> CatalogResult<()> {
        self.collection.insert_one(product).await?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: Uuid) -> CatalogResult<Option<Product>> {
        let product = self.collection.find_one(id_filter(id)).await?;
        Ok(product)
    }

    #[instrument(skip(self))]
    async fn list(&self, filter: &ProductFilter) -> CatalogResult<Vec<Product>> {
        let cursor = self
            .collection
            .find(Self::build_filter(filter))
            .with_options(oldest_first())
            .await?;
        let products: Vec<Product> = cursor.try_collect().await?;
        Ok(products)
    }

    #[instrument(skip(self, product), fields(product_id = %product.id))]
    async fn replace(&self, product: &Product) -> CatalogResult<bool> {
        let result = self
            .collection
            .replace_one(id_filter(product.id), product)
            .await?;
        Ok(result.matched_count > 0)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> CatalogResult<bool> {
        let result = self.collection.delete_one(id_filter(id)).await?;
        Ok(result.deleted_count > 0)
    }
}

/// Stored shape of a [`Category`]: client attributes live in their own
/// sub-document so they can never collide with `_id` or `created_at`.
#[derive(Debug, Serialize, Deserialize)]
struct CategoryDocument {
    #[serde(rename = "_id")]
    id: Uuid,
    #[serde(default)]
    attributes: Map<String, Value>,
    created_at: DateTime<Utc>,
}

impl From<&Category> for CategoryDocument {
    fn from(category: &Category) -> Self {
        Self {
            id: category.id,
            attributes: category.attributes.clone(),
            created_at: category.created_at,
        }
    }
}

impl From<CategoryDocument> for Category {
    fn from(doc: CategoryDocument) -> Self {
        Self {
            id: doc.id,
            attributes: doc.attributes,
            created_at: doc.created_at,
        }
    }
}

pub struct MongoCategoryRepository {
    collection: Collection<CategoryDocument>,
}

impl MongoCategoryRepository {
    pub fn new(db: &Database) -> Self {
        Self::with_collection(db, CATEGORIES_COLLECTION)
    }

    pub fn with_collection(db: &Database, collection_name: &str) -> Self {
        Self {
            collection: db.collection::<CategoryDocument>(collection_name),
        }
    }

    pub async fn init_indexes(&self) -> CatalogResult<()> {
        self.collection
            .create_index(index(doc! { "created_at": 1 }, "idx_created_at"))
            .await?;
        tracing::info!("Category indexes created successfully");
        Ok(())
    }

    async fn find(&self, filter: Document) -> CatalogResult<Vec<Category>> {
        let cursor = self.collection.find(filter).with_options(oldest_first()).await?;
        let docs: Vec<CategoryDocument> = cursor.try_collect().await?;
        Ok(docs.into_iter().map(Category::from).collect())
    }
}

#[async_trait]
impl CategoryRepository for MongoCategoryRepository {
    #[instrument(skip(self, category), fields(category_id = %category.id))]
    async fn insert(&self, category: &Category) -> CatalogResult<()> {
        self.collection
            .insert_one(CategoryDocument::from(category))
            .await?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: Uuid) -> CatalogResult<Option<Category>> {
        let found = self.collection.find_one(id_filter(id)).await?;
        Ok(found.map(Category::from))
    }

    #[instrument(skip(self), fields(count = ids.len()))]
    async fn get_by_ids(&self, ids: &[Uuid]) -> CatalogResult<Vec<Category>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let ids: Vec<Bson> = ids.iter().copied().map(uuid_bson).collect();
        self.find(doc! { "_id": { "$in": ids } }).await
    }

    #[instrument(skip(self))]
    async fn list(&self) -> CatalogResult<Vec<Category>> {
        self.find(doc! {}).await
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> CatalogResult<bool> {
        let result = self.collection.delete_one(id_filter(id)).await?;
        Ok(result.deleted_count > 0)
    }
}

/// Create indexes for both catalog collections.
pub async fn init_indexes(db: &Database) -> CatalogResult<()> {
    MongoProductRepository::new(db).init_indexes().await?;
    MongoCategoryRepository::new(db).init_indexes().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image_host::UploadedImage;
    use crate::models::{ProductImage, ValidProduct};
    use mongodb::bson::to_raw_document_buf;

    #[test]
    fn test_empty_filter_matches_everything() {
        assert_eq!(MongoProductRepository::build_filter(&ProductFilter::default()), doc! {});
        assert_eq!(
            MongoProductRepository::build_filter(&ProductFilter::keyword(Some(""))),
            doc! {}
        );
    }

    #[test]
    fn test_keyword_is_escaped_and_case_insensitive() {
        let filter = ProductFilter::keyword(Some("a.b(c"));
        let query = MongoProductRepository::build_filter(&filter);
        assert_eq!(
            query,
            doc! { "name": { "$regex": r"a\.b\(c", "$options": "i" } }
        );
    }

    #[test]
    fn test_category_scopes() {
        let id = Uuid::now_v7();
        let assigned =
            MongoProductRepository::build_filter(&ProductFilter::category(CategoryScope::Assigned(id)));
        assert_eq!(assigned, doc! { "category": uuid_bson(id) });

        let unassigned =
            MongoProductRepository::build_filter(&ProductFilter::category(CategoryScope::Unassigned));
        assert_eq!(unassigned, doc! { "category": Bson::Null });
    }

    #[test]
    fn test_category_document_conversion() {
        let attrs = serde_json::json!({ "category": "Shoes" });
        let category = Category::new(attrs.as_object().cloned().unwrap());

        let stored = CategoryDocument::from(&category);
        let doc = to_raw_document_buf(&stored).unwrap().to_document().unwrap();
        assert_eq!(doc.get("_id"), Some(&uuid_bson(category.id)));
        assert_eq!(
            doc.get_document("attributes").unwrap().get_str("category").unwrap(),
            "Shoes"
        );

        assert_eq!(Category::from(stored), category);
    }

    fn stored(product: &Product) -> Document {
        to_raw_document_buf(product).unwrap().to_document().unwrap()
    }

    fn sample_product(category: Option<Uuid>) -> Product {
        Product::new(
            ValidProduct {
                name: "Lamp".into(),
                description: "Desk lamp".into(),
                category,
                price: 25.0,
                stock: 3,
            },
            ProductImage::from(UploadedImage {
                public_id: "shop/lamp".into(),
                url: "https://img.example/lamp.png".into(),
            }),
        )
    }

    #[test]
    fn test_id_filter_matches_stored_id() {
        let product = sample_product(None);
        let doc = stored(&product);

        assert_eq!(doc.get("_id"), id_filter(product.id).get("_id"));
        assert!(matches!(
            doc.get("_id"),
            Some(Bson::Binary(Binary { subtype: BinarySubtype::Generic, .. }))
        ));
    }

    #[test]
    fn test_category_filters_match_stored_reference() {
        let category = Uuid::now_v7();
        let doc = stored(&sample_product(Some(category)));
        let assigned =
            MongoProductRepository::build_filter(&ProductFilter::category(CategoryScope::Assigned(category)));
        assert_eq!(doc.get("category"), assigned.get("category"));

        let doc = stored(&sample_product(None));
        let unassigned =
            MongoProductRepository::build_filter(&ProductFilter::category(CategoryScope::Unassigned));
        assert_eq!(doc.get("category"), unassigned.get("category"));
    }
}
