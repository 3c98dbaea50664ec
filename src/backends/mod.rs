pub mod canned;
pub mod echo;

use crate::models::{Catalog, ModelClass};

pub use canned::CannedModel;
pub use echo::EchoModel;

/// Module identifier the built-in variants are published under
pub const MODULE: &str = "vqa_hub.backends";

/// Add the built-in variants to `catalog`
pub fn install(catalog: &mut Catalog) {
    catalog.add_class(ModelClass::new(
        MODULE,
        "EchoModel",
        EchoModel::FRAMEWORK,
        EchoModel::construct,
    ));
    catalog.add_class(ModelClass::new(
        MODULE,
        "CannedModel",
        CannedModel::FRAMEWORK,
        CannedModel::construct,
    ));
}
