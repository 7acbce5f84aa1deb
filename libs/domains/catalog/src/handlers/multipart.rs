//! Multipart form extraction for product uploads

use axum::extract::{FromRequest, Multipart, Request, multipart::Field};
use tracing::debug;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::{CatalogError, CatalogResult};
use crate::image_host::ImageUpload;
use crate::models::NewProduct;

/// Name of the form part carrying the image
pub const FILE_FIELD: &str = "file";

/// Product fields and the optional `file` part of a multipart request.
///
/// Empty text fields and zero-byte files count as absent. Unknown parts are
/// skipped. A malformed value does not reject the request here; it is kept in
/// [`NewProduct::invalid`] so the image and product checks answer first.
/// Routes that only read `file` never see it.
#[derive(Debug, Default)]
pub struct UploadForm {
    pub product: NewProduct,
    pub file: Option<ImageUpload>,
}

impl<S> FromRequest<S> for UploadForm
where
    S: Send + Sync,
{
    type Rejection = CatalogError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let mut multipart = Multipart::from_request(req, state).await?;
        let mut form = UploadForm::default();

        while let Some(field) = multipart.next_field().await? {
            let name = field.name().unwrap_or_default().to_string();
            match name.as_str() {
                FILE_FIELD => form.file = read_file(field).await?,
                "name" => form.product.name = read_text(field).await?,
                "description" => form.product.description = read_text(field).await?,
                "category" => {
                    let parsed = parse(read_text(field).await?, "category");
                    form.product.category = deferred(&mut form.product.invalid, parsed);
                }
                "price" => {
                    let parsed = parse(read_text(field).await?, "price");
                    form.product.price = deferred(&mut form.product.invalid, parsed);
                }
                "stock" => {
                    let parsed = parse(read_text(field).await?, "stock");
                    form.product.stock = deferred(&mut form.product.invalid, parsed);
                }
                other => debug!(field = other, "Ignoring unknown form field"),
            }
        }

        Ok(form)
    }
}

async fn read_text(field: Field<'_>) -> CatalogResult<Option<String>> {
    let text = field.text().await?;
    Ok(Some(text).filter(|t| !t.trim().is_empty()))
}

async fn read_file(field: Field<'_>) -> CatalogResult<Option<ImageUpload>> {
    let file_name = field.file_name().map(str::to_string);
    let content_type = field.content_type().map(str::to_string);
    let bytes = field.bytes().await?;

    if bytes.is_empty() {
        return Ok(None);
    }

    Ok(Some(ImageUpload {
        file_name,
        content_type,
        bytes: bytes.to_vec(),
    }))
}

/// OpenAPI shape of the product creation form
#[derive(ToSchema)]
pub struct ProductForm {
    pub name: String,
    pub description: String,
    /// Category id; omit or leave empty for none
    pub category: Option<Uuid>,
    pub price: f64,
    pub stock: u32,
    #[schema(value_type = String, format = Binary)]
    pub file: Vec<u8>,
}

/// OpenAPI shape of the add-image form
#[derive(ToSchema)]
pub struct ImageForm {
    #[schema(value_type = String, format = Binary)]
    pub file: Vec<u8>,
}

trait FormValue: Sized {
    const EXPECTED: &'static str;
    fn parse_value(raw: &str) -> Option<Self>;
}

impl FormValue for f64 {
    const EXPECTED: &'static str = "a non-negative number";
    fn parse_value(raw: &str) -> Option<Self> {
        raw.parse::<f64>().ok().filter(|p| p.is_finite() && *p >= 0.0)
    }
}

impl FormValue for u32 {
    const EXPECTED: &'static str = "a non-negative integer";
    fn parse_value(raw: &str) -> Option<Self> {
        raw.parse().ok()
    }
}

impl FormValue for Uuid {
    const EXPECTED: &'static str = "a valid id";
    fn parse_value(raw: &str) -> Option<Self> {
        Uuid::parse_str(raw).ok()
    }
}

fn parse<T: FormValue>(raw: Option<String>, field: &str) -> Result<Option<T>, String> {
    raw.map(|raw| T::parse_value(raw.trim()).ok_or_else(|| format!("{field} must be {}", T::EXPECTED)))
        .transpose()
}

fn deferred<T>(invalid: &mut Vec<String>, parsed: Result<Option<T>, String>) -> Option<T> {
    parsed.unwrap_or_else(|problem| {
        invalid.push(problem);
        None
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_absent_is_none() {
        assert_eq!(parse::<u32>(None, "stock").unwrap(), None);
    }

    #[test]
    fn test_parse_values() {
        assert_eq!(parse::<u32>(Some(" 0 ".into()), "stock").unwrap(), Some(0));
        assert_eq!(parse::<f64>(Some("19.5".into()), "price").unwrap(), Some(19.5));

        let id = Uuid::now_v7();
        assert_eq!(parse::<Uuid>(Some(id.to_string()), "category").unwrap(), Some(id));
    }

    #[test]
    fn test_parse_errors_name_the_field() {
        let err = parse::<u32>(Some("-3".into()), "stock").unwrap_err();
        assert_eq!(err, "stock must be a non-negative integer");

        let err = parse::<Uuid>(Some("shoes".into()), "category").unwrap_err();
        assert_eq!(err, "category must be a valid id");

        for price in ["-4", "NaN", "inf", "abc"] {
            let err = parse::<f64>(Some(price.into()), "price").unwrap_err();
            assert_eq!(err, "price must be a non-negative number");
        }
    }

    #[test]
    fn test_deferred_collects_problems() {
        let mut invalid = Vec::new();
        assert_eq!(deferred(&mut invalid, Ok(Some(3u32))), Some(3));
        assert_eq!(deferred::<u32>(&mut invalid, Err("stock must be a non-negative integer".into())), None);
        assert_eq!(invalid, ["stock must be a non-negative integer"]);
    }
}
