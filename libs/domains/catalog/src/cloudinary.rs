//! Cloudinary-compatible [`ImageHost`] over the signed REST upload API

use async_trait::async_trait;
use core_config::{ConfigError, FromEnv, env_or_default, env_parse, env_required};
use serde::Deserialize;
use sha1::Sha1;
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use strum::{Display, EnumString};
use tracing::{instrument, warn};

use crate::error::{CatalogError, CatalogResult};
use crate::image_host::{ImageHost, ImageUpload, UploadedImage};

pub const DEFAULT_API_URL: &str = "https://api.cloudinary.com/v1_1";

/// Digest used for request signatures. Accounts verify SHA-1 unless they
/// have been switched to SHA-256.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum SignatureAlgorithm {
    #[default]
    Sha1,
    Sha256,
}

/// Credentials and endpoint for the image host
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CloudinaryConfig {
    pub cloud_name: String,
    pub api_key: String,
    pub api_secret: String,
    /// Folder uploads are placed in, if any
    pub folder: Option<String>,
    pub api_url: String,
    pub signature_algorithm: SignatureAlgorithm,
}

impl CloudinaryConfig {
    pub fn new(
        cloud_name: impl Into<String>,
        api_key: impl Into<String>,
        api_secret: impl Into<String>,
    ) -> Self {
        Self {
            cloud_name: cloud_name.into(),
            api_key: api_key.into(),
            api_secret: api_secret.into(),
            folder: None,
            api_url: DEFAULT_API_URL.to_string(),
            signature_algorithm: SignatureAlgorithm::default(),
        }
    }

    pub fn with_folder(mut self, folder: impl Into<String>) -> Self {
        self.folder = Some(folder.into());
        self
    }

    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    pub fn with_signature_algorithm(mut self, algorithm: SignatureAlgorithm) -> Self {
        self.signature_algorithm = algorithm;
        self
    }

    fn endpoint(&self, action: &str) -> String {
        format!(
            "{}/{}/image/{}",
            self.api_url.trim_end_matches('/'),
            self.cloud_name,
            action
        )
    }
}

/// Environment variables:
/// - `CLOUDINARY_CLOUD_NAME`, `CLOUDINARY_API_KEY`, `CLOUDINARY_API_SECRET` (required)
/// - `CLOUDINARY_FOLDER` (optional)
/// - `CLOUDINARY_API_URL` (default: `https://api.cloudinary.com/v1_1`)
/// - `CLOUDINARY_SIGNATURE_ALGORITHM`: `sha1` (default) or `sha256`
impl FromEnv for CloudinaryConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            cloud_name: env_required("CLOUDINARY_CLOUD_NAME")?,
            api_key: env_required("CLOUDINARY_API_KEY")?,
            api_secret: env_required("CLOUDINARY_API_SECRET")?,
            folder: std::env::var("CLOUDINARY_FOLDER")
                .ok()
                .filter(|f| !f.is_empty()),
            api_url: env_or_default("CLOUDINARY_API_URL", DEFAULT_API_URL),
            signature_algorithm: env_parse(
                "CLOUDINARY_SIGNATURE_ALGORITHM",
                SignatureAlgorithm::default(),
            )?,
        })
    }
}

/// Request signature: the parameters sorted by name, joined as
/// `k=v&k=v`, with the secret appended, hex digest.
fn sign(params: &BTreeMap<&str, String>, secret: &str, algorithm: SignatureAlgorithm) -> String {
    let joined = params
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&");
    let payload = format!("{joined}{secret}");
    match algorithm {
        SignatureAlgorithm::Sha1 => format!("{:x}", Sha1::digest(payload)),
        SignatureAlgorithm::Sha256 => format!("{:x}", Sha256::digest(payload)),
    }
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    public_id: String,
    secure_url: String,
}

#[derive(Debug, Deserialize)]
struct DestroyResponse {
    result: String,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
}

pub struct CloudinaryImageHost {
    client: reqwest::Client,
    config: CloudinaryConfig,
}

impl CloudinaryImageHost {
    pub fn new(config: CloudinaryConfig) -> Self {
        Self::with_client(reqwest::Client::new(), config)
    }

    pub fn with_client(client: reqwest::Client, config: CloudinaryConfig) -> Self {
        Self { client, config }
    }

    /// Add `api_key`, `timestamp` and the signature to `signed`, then POST.
    async fn post<T>(
        &self,
        action: &str,
        mut signed: BTreeMap<&'static str, String>,
        unsigned: Vec<(&'static str, String)>,
    ) -> CatalogResult<T>
    where
        T: for<'de> Deserialize<'de>,
    {
        signed.insert("timestamp", chrono::Utc::now().timestamp().to_string());
        let algorithm = self.config.signature_algorithm;
        let signature = sign(&signed, &self.config.api_secret, algorithm);

        let mut form: Vec<(&str, String)> = signed.into_iter().collect();
        form.extend(unsigned);
        form.push(("api_key", self.config.api_key.clone()));
        form.push(("signature", signature));
        if algorithm != SignatureAlgorithm::Sha1 {
            form.push(("signature_algorithm", algorithm.to_string()));
        }

        let response = self
            .client
            .post(self.config.endpoint(action))
            .form(&form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<ErrorBody>()
                .await
                .map(|body| body.error.message)
                .unwrap_or_else(|_| status.to_string());
            return Err(CatalogError::ImageHost(format!("{action} failed: {message}")));
        }

        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl ImageHost for CloudinaryImageHost {
    #[instrument(skip(self, image), fields(bytes = image.bytes.len()))]
    async fn upload(&self, image: ImageUpload) -> CatalogResult<UploadedImage> {
        let mut signed = BTreeMap::new();
        if let Some(folder) = &self.config.folder {
            signed.insert("folder", folder.clone());
        }

        let uploaded: UploadResponse = self
            .post("upload", signed, vec![("file", image.data_uri())])
            .await?;

        tracing::info!(public_id = %uploaded.public_id, "Image uploaded");
        Ok(UploadedImage {
            public_id: uploaded.public_id,
            url: uploaded.secure_url,
        })
    }

    #[instrument(skip(self))]
    async fn destroy(&self, public_id: &str) -> CatalogResult<()> {
        let signed = BTreeMap::from([("public_id", public_id.to_string())]);
        let response: DestroyResponse = self.post("destroy", signed, Vec::new()).await?;

        match response.result.as_str() {
            "ok" => {
                tracing::info!(public_id, "Image destroyed");
                Ok(())
            }
            // Already gone; the caller only needs it absent
            "not found" => {
                warn!(public_id, "Image was already absent from the host");
                Ok(())
            }
            other => Err(CatalogError::ImageHost(format!(
                "destroy of '{public_id}' returned '{other}'"
            ))),
        }
    }
}
