use crate::GenerateError;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

///
/// Consts
///

/// Namespaces every generated file imports.
pub const BASELINE_NAMESPACES: [&str; 6] = [
    "MyCompany",
    "MyCompany.Attributes",
    "MyCompany.Enums",
    "System",
    "System.Collections.Generic",
    "System.ComponentModel.DataAnnotations",
];

/// Extra namespaces imported by the class form.
pub const CLASS_NAMESPACES: [&str; 1] = ["System.ComponentModel.DataAnnotations.Schema"];

///
/// SHARED_CONFIG
/// process-wide default, initialized on first use and never mutated
///

static SHARED_CONFIG: LazyLock<GeneratorConfig> = LazyLock::new(GeneratorConfig::default);

///
/// GeneratorConfig
///
/// Names and namespaces baked into the generated artifacts. Every field has
/// a default, so a config file only lists what it changes.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Target namespace for contracts without a namespace override.
    pub default_namespace: String,

    pub baseline_namespaces: Vec<String>,
    pub class_namespaces: Vec<String>,

    /// Keyed-identity capability, rendered as `<key_capability><TKey>`.
    pub key_capability: String,

    pub equality_comparer: String,
    pub comparer: String,

    /// Annotation carried by reference members of the interface form.
    pub reference_annotation: String,

    /// Enum type naming the reference multiplicities.
    pub multiplicity_type: String,

    /// One level of indentation.
    pub indent: String,
}

impl GeneratorConfig {
    /// The shared default configuration.
    #[must_use]
    pub fn shared() -> &'static Self {
        &SHARED_CONFIG
    }

    /// Parse a config document; missing fields keep their defaults.
    pub fn from_toml(src: &str) -> Result<Self, GenerateError> {
        let config = toml::from_str(src)?;

        Ok(config)
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            default_namespace: "MyProduct.Entities".to_string(),
            baseline_namespaces: BASELINE_NAMESPACES.map(String::from).into(),
            class_namespaces: CLASS_NAMESPACES.map(String::from).into(),
            key_capability: "IHasPk".to_string(),
            equality_comparer: "EqualityComparer".to_string(),
            comparer: "Comparer".to_string(),
            reference_annotation: "EntityReference".to_string(),
            multiplicity_type: "EntityReferenceMultiplicityEnum".to_string(),
            indent: "    ".to_string(),
        }
    }
}

///
/// TESTS
///
