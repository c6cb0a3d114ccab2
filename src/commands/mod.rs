//! Command implementations behind the CLI verbs

pub mod config;
pub mod port;
mod report;

pub use port::GenerationPipeline;
