//! Catalog API routes
//!
//! Wires the catalog domain to MongoDB and the image host.

use axum::{Router, extract::DefaultBodyLimit};
use domain_catalog::{
    CatalogService, CloudinaryImageHost, handlers,
    mongodb::{MongoCategoryRepository, MongoProductRepository},
};

use crate::state::AppState;

pub fn router(state: &AppState) -> Router {
    let service = CatalogService::new(
        MongoProductRepository::new(&state.db),
        MongoCategoryRepository::new(&state.db),
        CloudinaryImageHost::new(state.config.cloudinary.clone()),
    );

    handlers::router(service).layer(DefaultBodyLimit::max(state.config.max_upload_bytes))
}
