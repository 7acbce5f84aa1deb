//! Product endpoints

use axum::{
    Json,
    extract::{Query, State},
};
use axum_helpers::{
    UuidPath, ValidatedJson,
    errors::responses::{
        BadGatewayResponse, BadRequestResponse, BadRequestUuidResponse,
        BadRequestValidationResponse, InternalServerErrorResponse, NotFoundResponse,
        PayloadTooLargeResponse,
    },
};
use std::sync::Arc;
use uuid::Uuid;

use super::multipart::{ImageForm, ProductForm, UploadForm};
use crate::error::{CatalogError, CatalogResult};
use crate::models::{
    AdminProductsResponse, CategoryScope, ImageQuery, MessageResponse, ProductListResponse,
    ProductQuery, ProductResponse, UpdateProduct,
};
use crate::service::CatalogService;

/// `?category=` selects a category, or uncategorized products when empty.
fn category_scope(raw: &str) -> CatalogResult<CategoryScope> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(CategoryScope::Unassigned);
    }
    Uuid::parse_str(raw)
        .map(CategoryScope::Assigned)
        .map_err(|_| CatalogError::Validation("category must be a valid id".to_string()))
}

/// List products by name keyword or by category
#[utoipa::path(
    get,
    path = "/products",
    tag = "Products",
    params(ProductQuery),
    responses(
        (status = 200, description = "Matching products, oldest first", body = ProductListResponse),
        (status = 400, response = BadRequestResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
pub(super) async fn list_products(
    State(service): State<Arc<CatalogService>>,
    Query(query): Query<ProductQuery>,
) -> CatalogResult<Json<ProductListResponse>> {
    let products = match query.category.as_deref() {
        Some(raw) => service.list_by_category(category_scope(raw)?).await?,
        None => service.list_products(query.keyword.as_deref()).await?,
    };

    Ok(Json(ProductListResponse {
        success: true,
        products,
    }))
}

/// Every product with its category, plus stock counts
#[utoipa::path(
    get,
    path = "/admin/products",
    tag = "Products",
    responses(
        (status = 200, description = "All products with stock counts", body = AdminProductsResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
pub(super) async fn admin_products(
    State(service): State<Arc<CatalogService>>,
) -> CatalogResult<Json<AdminProductsResponse>> {
    let overview = service.admin_overview().await?;
    Ok(Json(overview.into()))
}

/// Get a product with its category
#[utoipa::path(
    get,
    path = "/products/{id}",
    tag = "Products",
    params(("id" = Uuid, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Product found", body = ProductResponse),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
pub(super) async fn get_product(
    State(service): State<Arc<CatalogService>>,
    UuidPath(id): UuidPath,
) -> CatalogResult<Json<ProductResponse>> {
    let product = service.get_product(id).await?;
    Ok(Json(ProductResponse {
        success: true,
        product,
    }))
}

/// Create a product from a multipart form with its first image
#[utoipa::path(
    post,
    path = "/products",
    tag = "Products",
    request_body(content = ProductForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Product created", body = MessageResponse),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = NotFoundResponse),
        (status = 413, response = PayloadTooLargeResponse),
        (status = 502, response = BadGatewayResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
pub(super) async fn create_product(
    State(service): State<Arc<CatalogService>>,
    form: UploadForm,
) -> CatalogResult<Json<MessageResponse>> {
    service.create_product(form.product, form.file).await?;
    Ok(Json(MessageResponse::new("Product Created Successfully")))
}

/// Update the fields present in the body
#[utoipa::path(
    put,
    path = "/products/{id}",
    tag = "Products",
    params(("id" = Uuid, Path, description = "Product ID")),
    request_body = UpdateProduct,
    responses(
        (status = 200, description = "Product updated", body = MessageResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
pub(super) async fn update_product(
    State(service): State<Arc<CatalogService>>,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<UpdateProduct>,
) -> CatalogResult<Json<MessageResponse>> {
    service.update_product(id, input).await?;
    Ok(Json(MessageResponse::new("Product Updated Successfully")))
}

/// Upload another image for a product
#[utoipa::path(
    post,
    path = "/products/{id}/image",
    tag = "Products",
    params(("id" = Uuid, Path, description = "Product ID")),
    request_body(content = ImageForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Image added", body = MessageResponse),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = NotFoundResponse),
        (status = 413, response = PayloadTooLargeResponse),
        (status = 502, response = BadGatewayResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
pub(super) async fn add_image(
    State(service): State<Arc<CatalogService>>,
    UuidPath(id): UuidPath,
    form: UploadForm,
) -> CatalogResult<Json<MessageResponse>> {
    service.add_image(id, form.file).await?;
    Ok(Json(MessageResponse::new("Image Added Successfully")))
}

/// Remove one image from a product and the image host
#[utoipa::path(
    delete,
    path = "/products/{id}/image",
    tag = "Products",
    params(("id" = Uuid, Path, description = "Product ID"), ImageQuery),
    responses(
        (status = 200, description = "Image deleted", body = MessageResponse),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = NotFoundResponse),
        (status = 502, response = BadGatewayResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
pub(super) async fn delete_image(
    State(service): State<Arc<CatalogService>>,
    UuidPath(id): UuidPath,
    Query(query): Query<ImageQuery>,
) -> CatalogResult<Json<MessageResponse>> {
    service.delete_image(id, query.id.as_deref()).await?;
    Ok(Json(MessageResponse::new("Image Deleted Successfully")))
}

/// Delete a product after removing all of its images from the host
#[utoipa::path(
    delete,
    path = "/products/{id}",
    tag = "Products",
    params(("id" = Uuid, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Product deleted", body = MessageResponse),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 502, response = BadGatewayResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
pub(super) async fn delete_product(
    State(service): State<Arc<CatalogService>>,
    UuidPath(id): UuidPath,
) -> CatalogResult<Json<MessageResponse>> {
    service.delete_product(id).await?;
    Ok(Json(MessageResponse::new("Product Deleted Successfully")))
}
