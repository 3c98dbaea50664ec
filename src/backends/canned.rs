use crate::error::{ModelError, Result};
use crate::models::{parse_params, Image, InitParams, ModelSettings, VqaModel};
use serde::Deserialize;

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct CannedParams {
    model_name: String,
    system_prompt: String,
    cache_dir: String,
    #[serde(default = "default_answer")]
    answer: String,
}

fn default_answer() -> String {
    "I don't know.".to_string()
}

/// Model that gives the same configured answer to every question
///
/// Useful as a stand-in while wiring an application before a real variant
/// is available.
#[derive(Debug, Clone)]
pub struct CannedModel {
    settings: ModelSettings,
    answer: String,
}

impl CannedModel {
    pub const FRAMEWORK: &'static str = "canned";

    #[must_use]
    pub fn new(settings: ModelSettings, answer: impl Into<String>) -> Self {
        Self {
            settings,
            answer: answer.into(),
        }
    }

    /// Catalog constructor
    pub fn construct(params: &InitParams) -> Result<Box<dyn VqaModel>> {
        let params: CannedParams = parse_params(params)?;
        Ok(Box::new(Self::new(
            ModelSettings::new(params.model_name, params.system_prompt, params.cache_dir),
            params.answer,
        )))
    }

    #[must_use]
    pub fn answer(&self) -> &str {
        &self.answer
    }
}

impl VqaModel for CannedModel {
    fn settings(&self) -> &ModelSettings {
        &self.settings
    }

    fn framework(&self) -> &str {
        Self::FRAMEWORK
    }

    fn predict_on_image(&self, _image: &Image, _question: &str) -> Result<String> {
        Ok(self.answer.clone())
    }

    fn predict_on_images(&self, images: &[Image], _question: &str) -> Result<String> {
        if images.is_empty() {
            return Err(ModelError::EmptyImages.into());
        }
        Ok(self.answer.clone())
    }
}
