use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Product not found: {0}")]
    ProductNotFound(Uuid),

    #[error("Category not found: {0}")]
    CategoryNotFound(Uuid),

    #[error("No image file was uploaded")]
    MissingImage,

    #[error("Required product fields are missing")]
    MissingFields,

    #[error("No image id was provided")]
    MissingImageId,

    #[error("Image '{0}' does not exist on this product")]
    ImageNotFound(String),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Invalid upload: {0}")]
    Upload(#[from] MultipartError),

    #[error("Invalid upload: {0}")]
    UploadRejected(#[from] MultipartRejection),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Image host error: {0}")]
    ImageHost(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type CatalogResult<T> = Result<T, CatalogError>;

/// Client-facing messages; the `Display` text above is for logs.
impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::ProductNotFound(_) => AppError::NotFound("Product not found".to_string()),
            CatalogError::CategoryNotFound(_) => {
                AppError::NotFound("Category Not Found".to_string())
            }
            CatalogError::MissingImage => AppError::BadRequest("Please add image".to_string()),
            CatalogError::MissingFields => {
                AppError::BadRequest("Please enter all fields".to_string())
            }
            CatalogError::MissingImageId => {
                AppError::BadRequest("Please provide image id".to_string())
            }
            CatalogError::ImageNotFound(_) => {
                AppError::BadRequest("Image doesn't exist".to_string())
            }
            CatalogError::Validation(msg) => AppError::BadRequest(msg),
            CatalogError::Upload(e) => AppError::Multipart(e),
            CatalogError::UploadRejected(e) => AppError::MultipartRejection(e),
            CatalogError::Database(msg) => AppError::Database(msg),
            CatalogError::ImageHost(msg) => AppError::BadGateway(msg),
            CatalogError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

impl From<mongodb::error::Error> for CatalogError {
    fn from(err: mongodb::error::Error) -> Self {
        CatalogError::Database(err.to_string())
    }
}

impl From<mongodb::bson::ser::Error> for CatalogError {
    fn from(err: mongodb::bson::ser::Error) -> Self {
        CatalogError::Internal(format!("BSON serialization failed: {err}"))
    }
}

impl From<reqwest::Error> for CatalogError {
    fn from(err: reqwest::Error) -> Self {
        CatalogError::ImageHost(err.to_string())
    }
}
