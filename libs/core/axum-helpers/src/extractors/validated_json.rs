//! JSON extractors that answer malformed bodies with the shared error envelope.

use crate::errors::AppError;
use axum::extract::{FromRequest, Json, Request};
use serde::de::DeserializeOwned;
use validator::Validate;

/// `Json<T>` whose rejection is an [`AppError`] instead of plain text.
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(data) = Json::<T>::from_request(req, state).await?;
        Ok(JsonBody(data))
    }
}

/// JSON body checked with the `validator` crate before the handler runs.
///
/// ```ignore
/// #[derive(Deserialize, Validate)]
/// struct UpdateProduct {
///     #[validate(range(min = 0.0))]
///     price: Option<f64>,
/// }
///
/// async fn update(ValidatedJson(patch): ValidatedJson<UpdateProduct>) -> String {
///     format!("{:?}", patch.price)
/// }
/// ```
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let JsonBody(data) = JsonBody::<T>::from_request(req, state).await?;
        data.validate()?;
        Ok(ValidatedJson(data))
    }
}
