//! Database plumbing for the catalog services.
//!
//! Connection management, startup retries and readiness probes for MongoDB.
//! Domain crates own their collections and queries; this crate only hands
//! them a connected [`mongodb::Client`].
//!
//! # Features
//!
//! - `mongodb` (default) - MongoDB connector and health checks
//! - `config` - `MongoConfig` loading via `core_config::FromEnv`
//! - `all` - Everything above
//!
//! # Example
//!
//! ```ignore
//! use database::mongodb::{MongoConfig, connect_from_config_with_retry};
//! use core_config::FromEnv;
//!
//! let config = MongoConfig::from_env()?;
//! let client = connect_from_config_with_retry(&config, None).await?;
//! let db = client.database(config.database());
//! ```

pub mod common;

#[cfg(feature = "mongodb")]
pub mod mongodb;

pub use common::{DatabaseError, DatabaseResult};
