//! Data models.

pub mod config;
pub mod record;

pub use config::{FreeFloatConfig, OutputConfig, PathsConfig};
pub use record::{Record, COLUMNS};
