use serde_json::{json, Value};
use vqa_hub::config::Config;
use vqa_hub::error::{ModelError, Result, VqaError};
use vqa_hub::models::{
    Catalog, Image, InitParams, ModelClass, ModelRegistry, ModelSettings, VqaModel,
};

fn params(value: Value) -> InitParams {
    value.as_object().cloned().expect("params must be an object")
}

/// Variant whose constructor reads an extra `shout` flag
struct Shouting {
    settings: ModelSettings,
    shout: bool,
}

impl VqaModel for Shouting {
    fn settings(&self) -> &ModelSettings {
        &self.settings
    }

    fn framework(&self) -> &str {
        "shouting"
    }

    fn predict_on_image(&self, _image: &Image, question: &str) -> Result<String> {
        if self.shout {
            Ok(question.to_uppercase())
        } else {
            Ok(question.to_string())
        }
    }

    fn predict_on_images(&self, images: &[Image], question: &str) -> Result<String> {
        images
            .first()
            .ok_or(VqaError::Model(ModelError::EmptyImages))
            .and_then(|image| self.predict_on_image(image, question))
    }
}

fn build_shouting(params: &InitParams) -> Result<Box<dyn VqaModel>> {
    let settings = ModelSettings::from_params(params)?;
    let shout = match params.get("shout") {
        None => false,
        Some(Value::Bool(b)) => *b,
        Some(other) => {
            return Err(ModelError::InvalidParams(format!("shout must be a bool, got {other}")).into())
        }
    };
    Ok(Box::new(Shouting { settings, shout }))
}

fn catalog_with_plugin() -> Catalog {
    let mut catalog = Catalog::builtin();
    catalog.add_class(ModelClass::new(
        "plugins.loud",
        "Shouting",
        "shouting",
        build_shouting,
    ));
    catalog
}

#[test]
fn test_echo_end_to_end() {
    let mut registry = ModelRegistry::default();
    registry
        .register("echo", "vqa_hub.backends:EchoModel")
        .unwrap();

    let model = registry
        .get(
            "echo",
            Some(&params(json!({"model_name": "E", "system_prompt": "", "cache_dir": "/tmp"}))),
        )
        .unwrap();

    assert_eq!(model.predict_on_image(&Image::empty(), "hi").unwrap(), "hi");
}

#[test]
fn test_custom_module_registration() {
    let mut registry = ModelRegistry::new(catalog_with_plugin());
    registry.register("loud", "plugins.loud:Shouting").unwrap();

    let model = registry
        .get(
            "loud",
            Some(&params(json!({
                "model_name": "Loud",
                "system_prompt": "Shout.",
                "cache_dir": "/tmp/loud",
                "shout": true,
            }))),
        )
        .unwrap();

    assert_eq!(model.framework(), "shouting");
    assert_eq!(
        model.predict_on_images(&[Image::empty()], "hello").unwrap(),
        "HELLO"
    );

    // Settings are untouched by predictions
    assert_eq!(model.model_name(), "Loud");
    assert_eq!(model.system_prompt(), "Shout.");
    assert_eq!(model.cache_dir(), "/tmp/loud");
}

#[test]
fn test_construction_error_propagates() {
    let mut registry = ModelRegistry::new(catalog_with_plugin());
    registry.register("loud", "plugins.loud:Shouting").unwrap();

    let err = registry
        .get(
            "loud",
            Some(&params(json!({
                "model_name": "Loud",
                "system_prompt": "",
                "cache_dir": "/tmp",
                "shout": "yes",
            }))),
        )
        .unwrap_err();

    assert!(matches!(
        err,
        VqaError::Model(ModelError::InvalidParams(ref msg)) if msg.contains("shout")
    ));
}

#[test]
fn test_none_and_empty_params_fail_alike() {
    let mut registry = ModelRegistry::default();
    registry
        .register("echo", "vqa_hub.backends:EchoModel")
        .unwrap();

    let from_none = registry.get("echo", None).unwrap_err();
    let from_empty = registry.get("echo", Some(&InitParams::new())).unwrap_err();
    assert_eq!(from_none.to_string(), from_empty.to_string());
}

#[test]
fn test_registration_errors() {
    let mut registry = ModelRegistry::default();

    for bad in ["vqa_hub.backends", "a:b:c"] {
        assert!(matches!(
            registry.register("x", bad),
            Err(VqaError::MalformedLoadPath { .. })
        ));
    }

    assert!(matches!(
        registry.register("x", "missing.module:EchoModel"),
        Err(VqaError::ModuleNotFound(ref m)) if m == "missing.module"
    ));
    assert!(matches!(
        registry.register("x", "vqa_hub.backends:MissingModel"),
        Err(VqaError::ClassNotFound { ref class, .. }) if class == "MissingModel"
    ));

    assert!(!registry.contains("x"));
}

#[test]
fn test_registry_from_config() {
    let config = Config::parse(
        r#"
        [defaults]
        cache_dir = "/tmp/vqa"

        [[models]]
        name = "cat"
        load_path = "vqa_hub.backends:CannedModel"
        [models.params]
        answer = "a cat"

        [[models]]
        name = "echo"
        load_path = "vqa_hub.backends:EchoModel"
        "#,
    )
    .unwrap();

    let registry = ModelRegistry::from_config(&config, Catalog::builtin()).unwrap();
    assert_eq!(registry.names(), vec!["cat", "echo"]);

    let cat = registry
        .get("cat", Some(&config.init_params("cat").unwrap()))
        .unwrap();
    assert_eq!(cat.model_name(), "cat");
    assert_eq!(cat.cache_dir(), "/tmp/vqa");
    assert_eq!(
        cat.predict_on_image(&Image::from_bytes(vec![0]), "what?").unwrap(),
        "a cat"
    );

    // Echo does not take an answer parameter
    let echo = registry
        .get("echo", Some(&config.init_params("echo").unwrap()))
        .unwrap();
    assert_eq!(echo.predict_on_image(&Image::empty(), "ping").unwrap(), "ping");
}

#[test]
fn test_registry_from_config_bad_path() {
    let config = Config::parse(
        r#"
        [[models]]
        name = "broken"
        load_path = "vqa_hub.backends:Nope"
        "#,
    )
    .unwrap();

    let err = ModelRegistry::from_config(&config, Catalog::builtin()).unwrap_err();
    assert!(err.to_string().contains("Nope"), "{err}");
}
