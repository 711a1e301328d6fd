pub mod config;
pub mod errors;
pub mod tracing;

pub use config::*;
pub use errors::*;
pub use self::tracing::*;
