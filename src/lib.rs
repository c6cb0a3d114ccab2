//! VBridge - port a live MySQL database to a starter analytics project
//!
//! Maintains a small set of persisted configuration properties and drives a
//! three-step generation pipeline: export a schema definition from a live
//! database connection, copy a deployment descriptor template, and render a
//! run-script template with the application name substituted.

pub mod commands;
pub mod config;
pub mod export;
pub mod resources;
pub mod types;

pub use commands::GenerationPipeline;
pub use config::{ConfigStore, FileConfigStore, ResolvedConfig};
pub use export::{MysqldumpExporter, SchemaExporter};
pub use resources::{DiskResourceLocator, ResourceLocator};
pub use types::{BridgeError, Result};
