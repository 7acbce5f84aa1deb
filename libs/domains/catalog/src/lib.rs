//! Catalog Domain
//!
//! Products, categories and product images for the storefront admin API.
//! Records live in MongoDB; image files live on a Cloudinary-compatible host.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints, multipart forms
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Business rules, image lifecycle
//! └──┬───────┬──┘
//!    │       │
//! ┌──▼───────┴──┐  ┌────────────┐
//! │ Repository  │  │ Image host │  ← Traits + MongoDB / Cloudinary implementations
//! └──────┬──────┘  └────────────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Entities, request and response shapes
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_catalog::{
//!     CatalogService, CloudinaryConfig, CloudinaryImageHost, handlers,
//!     mongodb::{MongoCategoryRepository, MongoProductRepository},
//! };
//! use mongodb::Client;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Client::with_uri_str("mongodb://localhost:27017").await?;
//! let db = client.database("catalog");
//!
//! let images = CloudinaryImageHost::new(CloudinaryConfig::new("demo", "key", "secret"));
//! let service = CatalogService::new(
//!     MongoProductRepository::new(&db),
//!     MongoCategoryRepository::new(&db),
//!     images,
//! );
//!
//! let router = handlers::router(service);
//! # Ok(())
//! # }
//! ```

pub mod cloudinary;
pub mod error;
pub mod handlers;
pub mod image_host;
pub mod models;
pub mod mongodb;
pub mod repository;
pub mod service;

pub use cloudinary::{CloudinaryConfig, CloudinaryImageHost, SignatureAlgorithm};
pub use error::{CatalogError, CatalogResult};
pub use handlers::ApiDoc;
pub use image_host::{ImageHost, ImageUpload, UploadedImage};
pub use models::{
    AdminOverview, Category, CategoryScope, NewProduct, Product, ProductFilter, ProductImage,
    ProductView, UpdateProduct,
};
pub use repository::{CategoryRepository, ProductRepository};
pub use service::CatalogService;
