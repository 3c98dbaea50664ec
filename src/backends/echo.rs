use crate::error::{ModelError, Result};
use crate::models::{parse_params, Image, InitParams, ModelSettings, VqaModel};
use serde::Deserialize;

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct EchoParams {
    model_name: String,
    system_prompt: String,
    cache_dir: String,
}

/// Model that answers every question with the question itself
#[derive(Debug, Clone)]
pub struct EchoModel {
    settings: ModelSettings,
}

impl EchoModel {
    pub const FRAMEWORK: &'static str = "echo";

    #[must_use]
    pub const fn new(settings: ModelSettings) -> Self {
        Self { settings }
    }

    /// Catalog constructor
    pub fn construct(params: &InitParams) -> Result<Box<dyn VqaModel>> {
        let params: EchoParams = parse_params(params)?;
        Ok(Box::new(Self::new(ModelSettings::new(
            params.model_name,
            params.system_prompt,
            params.cache_dir,
        ))))
    }
}

impl VqaModel for EchoModel {
    fn settings(&self) -> &ModelSettings {
        &self.settings
    }

    fn framework(&self) -> &str {
        Self::FRAMEWORK
    }

    fn predict_on_image(&self, _image: &Image, question: &str) -> Result<String> {
        Ok(question.to_string())
    }

    fn predict_on_images(&self, images: &[Image], question: &str) -> Result<String> {
        if images.is_empty() {
            return Err(ModelError::EmptyImages.into());
        }
        Ok(question.to_string())
    }
}
