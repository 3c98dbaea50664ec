use thiserror::Error;

/// Main error type for vqa-hub
#[derive(Error, Debug)]
pub enum VqaError {
    #[error("Malformed load path '{path}': expected '<module>:<class>'")]
    MalformedLoadPath { path: String },

    #[error("No module named '{0}'\n\nTroubleshooting:\n- Check the module part of the load path (before ':')\n- Built-in variants live in 'vqa_hub.backends'\n- Custom modules must be added to the catalog before registering")]
    ModuleNotFound(String),

    #[error("Module '{module}' has no class '{class}'")]
    ClassNotFound { module: String, class: String },

    #[error("Model '{name}' is not registered.{}", suggestion_hint(.suggestion))]
    NotRegistered {
        name: String,
        suggestion: Option<String>,
    },

    #[error("Model error: {0}")]
    Model(#[from] ModelError),

    #[error("Config error: {0}\n\nTroubleshooting:\n- Check config file: ~/.config/vqa-hub/config.toml\n- Every [[models]] entry needs 'name' and 'load_path'\n- Run with RUST_LOG=debug for more details")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

/// Errors raised by model variants while constructing or answering
#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Invalid init parameters: {0}")]
    InvalidParams(String),

    #[error("No images given")]
    EmptyImages,

    #[error("Inference failed: {0}")]
    Inference(String),
}

fn suggestion_hint(suggestion: &Option<String>) -> String {
    suggestion
        .as_ref()
        .map(|s| format!(" Did you mean '{s}'?"))
        .unwrap_or_default()
}

pub type Result<T> = std::result::Result<T, VqaError>;
