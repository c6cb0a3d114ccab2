//! Configuration system for VBridge
//!
//! Three layers:
//! 1. A static schema of recognized properties with defaults
//! 2. A narrow persisted key/value store interface
//! 3. A resolver that computes a full configuration or reports what is
//!    missing, durably applying defaults along the way

pub mod resolver;
pub mod schema;
pub mod store;

pub use resolver::{AppliedDefault, MissingProperty, Outcome, Resolution, ResolvedConfig};
pub use store::{ConfigStore, FileConfigStore};
