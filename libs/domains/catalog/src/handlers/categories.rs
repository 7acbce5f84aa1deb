//! Category endpoints

use axum::{Json, extract::State, http::StatusCode};
use axum_helpers::{
    JsonBody, UuidPath,
    errors::responses::{BadRequestUuidResponse, InternalServerErrorResponse, NotFoundResponse},
};
use serde_json::{Map, Value};
use std::sync::Arc;

use crate::error::CatalogResult;
use crate::models::{CategoryListResponse, MessageResponse};
use crate::service::CatalogService;

/// Create a category from an arbitrary JSON object
#[utoipa::path(
    post,
    path = "/categories",
    tag = "Categories",
    request_body(
        content = std::collections::HashMap<String, serde_json::Value>,
        description = "Category attributes, e.g. `{\"category\": \"Shoes\"}`"
    ),
    responses(
        (status = 201, description = "Category created", body = MessageResponse),
        (status = 400, description = "Body is not valid JSON"),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
pub(super) async fn add_category(
    State(service): State<Arc<CatalogService>>,
    JsonBody(attributes): JsonBody<Map<String, Value>>,
) -> CatalogResult<(StatusCode, Json<MessageResponse>)> {
    service.add_category(attributes).await?;
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("Category Added Successfully")),
    ))
}

/// List all categories
#[utoipa::path(
    get,
    path = "/categories",
    tag = "Categories",
    responses(
        (status = 200, description = "All categories, oldest first", body = CategoryListResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
pub(super) async fn list_categories(
    State(service): State<Arc<CatalogService>>,
) -> CatalogResult<Json<CategoryListResponse>> {
    let categories = service.list_categories().await?;
    Ok(Json(CategoryListResponse {
        success: true,
        categories,
    }))
}

/// Delete a category and detach its products
#[utoipa::path(
    delete,
    path = "/categories/{id}",
    tag = "Categories",
    params(("id" = Uuid, Path, description = "Category ID")),
    responses(
        (status = 200, description = "Category deleted", body = MessageResponse),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
pub(super) async fn delete_category(
    State(service): State<Arc<CatalogService>>,
    UuidPath(id): UuidPath,
) -> CatalogResult<Json<MessageResponse>> {
    service.delete_category(id).await?;
    Ok(Json(MessageResponse::new("Category Deleted Successfully")))
}
