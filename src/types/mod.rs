mod errors;

pub use errors::{BridgeError, Result};
