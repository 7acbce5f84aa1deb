//! HTTP handlers for the Catalog API

mod categories;
pub mod multipart;
mod products;

use axum::{
    Router,
    routing::{delete, get, post},
};
use axum_helpers::errors::responses::{
    BadGatewayResponse, BadRequestResponse, BadRequestUuidResponse, BadRequestValidationResponse,
    InternalServerErrorResponse, NotFoundResponse, PayloadTooLargeResponse,
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::models::{
    AdminProductsResponse, Category, CategoryListResponse, MessageResponse, Product,
    ProductImage, ProductListResponse, ProductResponse, ProductView, UpdateProduct,
};
use crate::service::CatalogService;
use multipart::{ImageForm, ProductForm};

/// OpenAPI documentation for the Catalog API
#[derive(OpenApi)]
#[openapi(
    paths(
        products::list_products,
        products::admin_products,
        products::get_product,
        products::create_product,
        products::update_product,
        products::add_image,
        products::delete_image,
        products::delete_product,
        categories::add_category,
        categories::list_categories,
        categories::delete_category,
    ),
    components(
        schemas(
            Product, ProductImage, ProductView, Category, UpdateProduct,
            ProductForm, ImageForm,
            ProductListResponse, AdminProductsResponse, ProductResponse,
            CategoryListResponse, MessageResponse
        ),
        responses(
            NotFoundResponse,
            BadRequestResponse,
            BadRequestUuidResponse,
            BadRequestValidationResponse,
            PayloadTooLargeResponse,
            BadGatewayResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Products", description = "Product and product image management"),
        (name = "Categories", description = "Category management")
    )
)]
pub struct ApiDoc;

/// Catalog routes, relative to wherever the caller nests them.
///
/// The caller is responsible for the request body limit applied to the
/// multipart upload routes.
pub fn router(service: CatalogService) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route(
            "/products",
            get(products::list_products).post(products::create_product),
        )
        .route("/admin/products", get(products::admin_products))
        .route(
            "/products/{id}",
            get(products::get_product)
                .put(products::update_product)
                .delete(products::delete_product),
        )
        .route(
            "/products/{id}/image",
            post(products::add_image).delete(products::delete_image),
        )
        .route(
            "/categories",
            get(categories::list_categories).post(categories::add_category),
        )
        .route("/categories/{id}", delete(categories::delete_category))
        .with_state(shared_service)
}
