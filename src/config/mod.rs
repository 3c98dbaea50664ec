//! Configuration module for vqa-hub
//!
//! Loads config from `$XDG_CONFIG_HOME/vqa-hub/config.toml` or `~/.config/vqa-hub/config.toml`.
//! Falls back to embedded defaults if the file doesn't exist, which register the
//! built-in `echo` and `canned` models.
//!
//! # Example
//!
//! ```no_run
//! use vqa_hub::config::Config;
//! use vqa_hub::models::{Catalog, ModelRegistry};
//!
//! let config = Config::load().expect("Failed to load config");
//! let registry = ModelRegistry::from_config(&config, Catalog::builtin()).unwrap();
//! let params = config.init_params("echo").unwrap();
//! let model = registry.get("echo", Some(&params)).unwrap();
//! println!("Framework: {}", model.framework());
//! ```

pub mod schema;

pub use schema::{config_path, Config, ModelEntry};
