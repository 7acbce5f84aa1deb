use async_trait::async_trait;
use base64::{Engine, engine::general_purpose::STANDARD};

use crate::error::CatalogResult;

/// A file received from a client, ready to be sent to the image host
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageUpload {
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: bytes.into(),
            ..Default::default()
        }
    }

    pub fn with_file_name(mut self, name: impl Into<String>) -> Self {
        self.file_name = Some(name.into());
        self
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Declared content type, else a guess from the file extension.
    pub fn mime_type(&self) -> &str {
        if let Some(ct) = self.content_type.as_deref().filter(|ct| !ct.is_empty()) {
            return ct;
        }

        let extension = self
            .file_name
            .as_deref()
            .and_then(|name| name.rsplit_once('.'))
            .map(|(_, ext)| ext.to_ascii_lowercase());

        match extension.as_deref() {
            Some("png") => "image/png",
            Some("jpg" | "jpeg") => "image/jpeg",
            Some("gif") => "image/gif",
            Some("webp") => "image/webp",
            _ => "application/octet-stream",
        }
    }

    /// `data:<mime>;base64,<payload>`, the form the upload API accepts inline.
    pub fn data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime_type(), STANDARD.encode(&self.bytes))
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Result of a successful upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedImage {
    pub public_id: String,
    pub url: String,
}

/// Remote image storage
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ImageHost: Send + Sync {
    /// Store the image and return its public id and secure URL
    async fn upload(&self, image: ImageUpload) -> CatalogResult<UploadedImage>;

    /// Remove a previously uploaded image
    async fn destroy(&self, public_id: &str) -> CatalogResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mime_type_prefers_declared_content_type() {
        let upload = ImageUpload::new(vec![1])
            .with_file_name("photo.png")
            .with_content_type("image/jpeg");
        assert_eq!(upload.mime_type(), "image/jpeg");
    }

    #[test]
    fn test_mime_type_from_extension() {
        let guess = |name: &str| ImageUpload::new(vec![1]).with_file_name(name).mime_type().to_string();
        assert_eq!(guess("a.PNG"), "image/png");
        assert_eq!(guess("a.jpeg"), "image/jpeg");
        assert_eq!(guess("a.webp"), "image/webp");
        assert_eq!(guess("archive"), "application/octet-stream");
        assert_eq!(ImageUpload::new(vec![1]).mime_type(), "application/octet-stream");
    }

    #[test]
    fn test_data_uri() {
        let upload = ImageUpload::new(b"hi".to_vec()).with_content_type("image/gif");
        assert_eq!(upload.data_uri(), "data:image/gif;base64,aGk=");
    }
}
