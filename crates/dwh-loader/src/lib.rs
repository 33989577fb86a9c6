//! # dwh-loader
//!
//! Bootstrap-and-load library for a star-schema analytics warehouse.
//!
//! The library reads cluster credentials and object-storage locations from
//! a sectioned configuration file and drives two fixed pipelines:
//!
//! - **Schema (re)creation**: drop every warehouse table, then create the
//!   staging, fact, and dimension tables.
//! - **Two-phase load**: bulk-copy raw JSON records from object storage
//!   into staging tables, then insert into the fact and dimension tables
//!   via server-side SQL.
//!
//! Statements are executed strictly in order with a commit after each, so
//! a failed batch reports the exact statement that stopped it and leaves
//! everything before it in place.
//!
//! ## Example
//!
//! ```rust,no_run
//! use dwh_loader::{Config, Orchestrator};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), dwh_loader::LoadError> {
//!     let config = Config::load("dwh.yaml")?;
//!     let orchestrator = Orchestrator::new(config);
//!     orchestrator.create_schema().await?;
//!     Ok(())
//! }
//! ```

pub mod catalog;
pub mod config;
pub mod error;
pub mod orchestrator;
pub mod runner;
pub mod session;

// Re-exports for convenient access
pub use catalog::StatementGroup;
pub use config::{ClusterConfig, Config, StorageConfig, DEFAULT_CONFIG_FILE};
pub use error::{LoadError, Result};
pub use orchestrator::Orchestrator;
pub use runner::BatchRunner;
pub use session::{Connect, PgConnector, Session};
