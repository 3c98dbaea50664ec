pub mod catalog;
pub mod registry;

use crate::error::{ModelError, Result};
use serde::Deserialize;
use serde_json::{Map, Value};

pub use catalog::{Catalog, LoadPath, ModelClass, ModelConstructor};
pub use registry::ModelRegistry;

/// Keyword parameters passed to a model constructor
pub type InitParams = Map<String, Value>;

/// Opaque visual input handed to a model
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Image {
    bytes: Vec<u8>,
}

impl Image {
    #[must_use]
    pub const fn empty() -> Self {
        Self { bytes: Vec::new() }
    }

    #[must_use]
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: bytes.into(),
        }
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Construction parameters shared by every model
///
/// Set once when the model is built; there are no setters.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ModelSettings {
    model_name: String,
    system_prompt: String,
    cache_dir: String,
}

impl ModelSettings {
    #[must_use]
    pub fn new(
        model_name: impl Into<String>,
        system_prompt: impl Into<String>,
        cache_dir: impl Into<String>,
    ) -> Self {
        Self {
            model_name: model_name.into(),
            system_prompt: system_prompt.into(),
            cache_dir: cache_dir.into(),
        }
    }

    /// Read the three shared parameters out of `params`, ignoring any others
    pub fn from_params(params: &InitParams) -> Result<Self> {
        serde_json::from_value(Value::Object(params.clone()))
            .map_err(|e| ModelError::InvalidParams(e.to_string()).into())
    }

    #[must_use]
    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    #[must_use]
    pub fn system_prompt(&self) -> &str {
        &self.system_prompt
    }

    #[must_use]
    pub fn cache_dir(&self) -> &str {
        &self.cache_dir
    }
}

/// Unified interface for visual question answering models
pub trait VqaModel: Send + Sync {
    /// Settings fixed at construction
    fn settings(&self) -> &ModelSettings;

    /// Label of the inference mechanism this variant is bound to
    fn framework(&self) -> &str {
        ""
    }

    /// Answer `question` about a single image
    fn predict_on_image(&self, image: &Image, question: &str) -> Result<String>;

    /// Answer `question` about an ordered sequence of images
    ///
    /// Variants decide what an empty sequence means; the built-in ones
    /// reject it with [`ModelError::EmptyImages`].
    fn predict_on_images(&self, images: &[Image], question: &str) -> Result<String>;

    fn model_name(&self) -> &str {
        self.settings().model_name()
    }

    fn system_prompt(&self) -> &str {
        self.settings().system_prompt()
    }

    fn cache_dir(&self) -> &str {
        self.settings().cache_dir()
    }
}

impl std::fmt::Debug for dyn VqaModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VqaModel")
            .field("framework", &self.framework())
            .field("settings", self.settings())
            .finish()
    }
}

/// Deserialize a variant's own parameter struct from `params`
pub(crate) fn parse_params<T: for<'de> Deserialize<'de>>(params: &InitParams) -> Result<T> {
    serde_json::from_value(Value::Object(params.clone()))
        .map_err(|e| ModelError::InvalidParams(e.to_string()).into())
}
