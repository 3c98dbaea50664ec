pub mod backends;
pub mod config;
pub mod error;
pub mod models;
pub mod timing;

pub use error::{ModelError, Result, VqaError};
pub use models::{Catalog, Image, InitParams, ModelRegistry, ModelSettings, VqaModel};
pub use timing::measure_duration;
