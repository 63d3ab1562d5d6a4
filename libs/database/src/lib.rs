//! Database connectors and utilities for the products workspace
//!
//! # Features
//!
//! - `mongodb` (default) - MongoDB client bootstrap, health checks
//! - `config` - `MongoConfig` loading through `core_config::FromEnv`
//!
//! # Example
//!
//! ```ignore
//! use database::mongodb::{MongoConfig, connect_from_config_with_retry, disconnect};
//!
//! let config = MongoConfig::with_database("mongodb://localhost:27017", "shop");
//! let client = connect_from_config_with_retry(&config, None).await?;
//! let db = client.database(config.database());
//! // ...
//! disconnect(client).await;
//! ```

pub mod common;

#[cfg(feature = "mongodb")]
pub mod mongodb;

pub use common::{DatabaseError, DatabaseResult};
