//! Explicit table of loadable model classes.
//!
//! A load path such as `vqa_hub.backends:EchoModel` names a module and a class
//! inside it. Instead of importing code at runtime, every module and class is
//! added to a [`Catalog`] by ordinary code at startup, and load paths are
//! resolved against that table.

use crate::backends;
use crate::error::{Result, VqaError};
use crate::models::{InitParams, VqaModel};
use std::collections::HashMap;
use std::fmt;

/// Constructor of one model variant
pub type ModelConstructor = fn(&InitParams) -> Result<Box<dyn VqaModel>>;

/// A `<module>:<class>` reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadPath {
    pub module: String,
    pub class: String,
}

impl LoadPath {
    pub const DELIMITER: char = ':';

    /// Split `path` into exactly two non-empty parts
    pub fn parse(path: &str) -> Result<Self> {
        let malformed = || VqaError::MalformedLoadPath {
            path: path.to_string(),
        };

        let mut parts = path.split(Self::DELIMITER);
        let (Some(module), Some(class), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(malformed());
        };

        if module.is_empty() || class.is_empty() {
            return Err(malformed());
        }

        Ok(Self {
            module: module.to_string(),
            class: class.to_string(),
        })
    }
}

impl fmt::Display for LoadPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.module, Self::DELIMITER, self.class)
    }
}

/// Descriptor of a loadable model class
#[derive(Clone)]
pub struct ModelClass {
    load_path: LoadPath,
    framework: &'static str,
    constructor: ModelConstructor,
}

impl ModelClass {
    #[must_use]
    pub fn new(
        module: impl Into<String>,
        class: impl Into<String>,
        framework: &'static str,
        constructor: ModelConstructor,
    ) -> Self {
        Self {
            load_path: LoadPath {
                module: module.into(),
                class: class.into(),
            },
            framework,
            constructor,
        }
    }

    #[must_use]
    pub const fn load_path(&self) -> &LoadPath {
        &self.load_path
    }

    #[must_use]
    pub const fn framework(&self) -> &'static str {
        self.framework
    }

    /// Build a fresh instance; constructor errors are returned as-is
    pub fn instantiate(&self, params: &InitParams) -> Result<Box<dyn VqaModel>> {
        (self.constructor)(params)
    }
}

impl fmt::Debug for ModelClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelClass")
            .field("load_path", &self.load_path.to_string())
            .field("framework", &self.framework)
            .finish_non_exhaustive()
    }
}

/// Modules and the classes they expose
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    modules: HashMap<String, HashMap<String, ModelClass>>,
}

impl Catalog {
    /// Catalog with no modules
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Catalog holding the variants shipped with this crate
    #[must_use]
    pub fn builtin() -> Self {
        let mut catalog = Self::empty();
        backends::install(&mut catalog);
        catalog
    }

    /// Add a class, replacing one with the same module and class name
    pub fn add_class(&mut self, class: ModelClass) {
        let path = class.load_path();
        tracing::debug!("Catalog: adding {path}");
        self.modules
            .entry(path.module.clone())
            .or_default()
            .insert(path.class.clone(), class);
    }

    /// Look up the class a load path refers to
    pub fn resolve(&self, path: &LoadPath) -> Result<&ModelClass> {
        let module = self
            .modules
            .get(&path.module)
            .ok_or_else(|| VqaError::ModuleNotFound(path.module.clone()))?;

        module
            .get(&path.class)
            .ok_or_else(|| VqaError::ClassNotFound {
                module: path.module.clone(),
                class: path.class.clone(),
            })
    }

    /// All load paths, sorted
    #[must_use]
    pub fn load_paths(&self) -> Vec<LoadPath> {
        let mut paths: Vec<LoadPath> = self
            .modules
            .values()
            .flat_map(|classes| classes.values().map(|c| c.load_path().clone()))
            .collect();
        paths.sort_by(|a, b| (&a.module, &a.class).cmp(&(&b.module, &b.class)));
        paths
    }
}
