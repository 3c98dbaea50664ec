use crate::config::schema::Config;
use crate::error::{Result, VqaError};
use crate::models::catalog::{Catalog, LoadPath, ModelClass};
use crate::models::{InitParams, VqaModel};
use std::collections::HashMap;

/// Registry mapping model names to loadable model classes
///
/// Registration resolves the class right away; instances are only built on
/// [`ModelRegistry::get`], and every call builds a new one. The registry never
/// keeps a reference to the instances it hands out.
///
/// # Example
/// ```
/// use vqa_hub::models::{Image, ModelRegistry};
/// use serde_json::json;
///
/// let mut registry = ModelRegistry::default();
/// registry.register("echo", "vqa_hub.backends:EchoModel").unwrap();
///
/// let params = json!({"model_name": "E", "system_prompt": "", "cache_dir": "/tmp"});
/// let model = registry.get("echo", params.as_object()).unwrap();
/// assert_eq!(model.predict_on_image(&Image::empty(), "hi").unwrap(), "hi");
/// ```
#[derive(Debug)]
pub struct ModelRegistry {
    catalog: Catalog,
    models: HashMap<String, ModelClass>,
}

impl Default for ModelRegistry {
    fn default() -> Self {
        Self::new(Catalog::builtin())
    }
}

impl ModelRegistry {
    /// Create an empty registry resolving load paths against `catalog`
    #[must_use]
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            models: HashMap::new(),
        }
    }

    /// Create a registry and register every model listed in `config`
    ///
    /// Entries are registered in file order, so a later entry with the same
    /// name replaces an earlier one.
    pub fn from_config(config: &Config, catalog: Catalog) -> Result<Self> {
        let mut registry = Self::new(catalog);
        for entry in &config.models {
            registry.register(&entry.name, &entry.load_path)?;
        }
        Ok(registry)
    }

    #[must_use]
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Register `name` to the class at `load_path` (`<module>:<class>`)
    ///
    /// Replaces any previous registration of `name`.
    pub fn register(&mut self, name: &str, load_path: &str) -> Result<()> {
        let path = LoadPath::parse(load_path)?;
        let class = self.catalog.resolve(&path)?.clone();
        self.register_class(name, class);
        Ok(())
    }

    /// Register `name` to an already built class descriptor
    pub fn register_class(&mut self, name: &str, class: ModelClass) {
        tracing::debug!("Registering model '{name}' -> {}", class.load_path());
        if let Some(previous) = self.models.insert(name.to_string(), class) {
            tracing::debug!(
                "Model '{name}' was registered to {}, replaced",
                previous.load_path()
            );
        }
    }

    /// Build a new instance of the model registered as `name`
    ///
    /// `None` and an empty map are the same: no parameters. Errors raised by
    /// the model constructor are returned unchanged.
    pub fn get(&self, name: &str, init_params: Option<&InitParams>) -> Result<Box<dyn VqaModel>> {
        let class = self.models.get(name).ok_or_else(|| VqaError::NotRegistered {
            name: name.to_string(),
            suggestion: self.suggest(name).map(str::to_string),
        })?;

        tracing::debug!("Building model '{name}' from {}", class.load_path());
        match init_params {
            Some(params) => class.instantiate(params),
            None => class.instantiate(&InitParams::new()),
        }
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.models.contains_key(name)
    }

    /// Class registered as `name`
    #[must_use]
    pub fn class_of(&self, name: &str) -> Option<&ModelClass> {
        self.models.get(name)
    }

    /// Registered names, sorted
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.models.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Closest registered name within two edits
    #[must_use]
    pub fn suggest(&self, name: &str) -> Option<&str> {
        if name.is_empty() {
            return None;
        }

        self.models
            .keys()
            .map(|m| (m.as_str(), levenshtein_distance(name, m)))
            .min_by(|(a, da), (b, db)| da.cmp(db).then_with(|| a.cmp(b)))
            .filter(|(_, dist)| *dist <= 2)
            .map(|(model_name, _)| model_name)
    }
}

/// Calculate Levenshtein distance between two strings
fn levenshtein_distance(s1: &str, s2: &str) -> usize {
    let s1_chars: Vec<char> = s1.chars().collect();
    let s2_chars: Vec<char> = s2.chars().collect();

    if s1_chars.is_empty() {
        return s2_chars.len();
    }
    if s2_chars.is_empty() {
        return s1_chars.len();
    }

    // Single rolling row
    let mut row: Vec<usize> = (0..=s2_chars.len()).collect();
    for (i, c1) in s1_chars.iter().enumerate() {
        let mut diagonal = row[0];
        row[0] = i + 1;
        for (j, c2) in s2_chars.iter().enumerate() {
            let cost = usize::from(c1 != c2);
            let next = (row[j + 1] + 1).min(row[j] + 1).min(diagonal + cost);
            diagonal = row[j + 1];
            row[j + 1] = next;
        }
    }

    row[s2_chars.len()]
}
