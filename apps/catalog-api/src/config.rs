use core_config::{AppInfo, FromEnv, app_info, env_parse, server::ServerConfig};
use database::mongodb::MongoConfig;
use domain_catalog::CloudinaryConfig;

pub use core_config::Environment;

/// Largest accepted request body on the upload routes
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Application configuration, composed from the shared config pieces
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub mongodb: MongoConfig,
    pub server: ServerConfig,
    pub cloudinary: CloudinaryConfig,
    pub environment: Environment,
    /// `MAX_UPLOAD_BYTES`
    pub max_upload_bytes: usize,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        Ok(Self {
            app: app_info!(),
            mongodb: MongoConfig::from_env()?,
            server: ServerConfig::from_env()?,
            cloudinary: CloudinaryConfig::from_env()?,
            environment: Environment::from_env(),
            max_upload_bytes: env_parse("MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES)?,
        })
    }
}
