//! Interface and class text generation for entity contracts.
//!
//! A [`ContractGenerator`] pairs a built contract model with a
//! [`GeneratorConfig`], resolves its primary key once and renders either
//! artifact form to a complete string. Sinks only ever receive whole,
//! successfully rendered artifacts.

mod attribute;
mod class;
pub mod config;
mod interface;
mod members;
pub mod namespaces;
pub mod primary_key;
mod writer;

pub use config::GeneratorConfig;

use contractgen_core::{Error, model::ContractDeclaration};
use contractgen_schema::node::Schema;
use derive_more::Display;
use primary_key::PrimaryKey;
use std::io::Write;
use thiserror::Error as ThisError;

///
/// GenerateError
///

#[derive(Debug, ThisError)]
pub enum GenerateError {
    #[error(transparent)]
    Contract(#[from] Error),

    #[error("failed to write generated output: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid generator config: {0}")]
    Config(#[from] toml::de::Error),
}

///
/// ArtifactKind
///

#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
pub enum ArtifactKind {
    Interface,
    Class,
}

///
/// ContractGenerator
///

pub struct ContractGenerator<'a> {
    pub(crate) model: &'a ContractDeclaration,
    pub(crate) config: &'a GeneratorConfig,
    pub(crate) key: Option<PrimaryKey<'a>>,
}

impl<'a> ContractGenerator<'a> {
    /// Create a generator, failing if the contract's key cannot be resolved.
    pub fn new(model: &'a ContractDeclaration, config: &'a GeneratorConfig) -> Result<Self, Error> {
        let key = PrimaryKey::resolve(model)?;

        Ok(Self { model, config, key })
    }

    #[must_use]
    pub const fn key(&self) -> Option<&PrimaryKey<'a>> {
        self.key.as_ref()
    }

    /// Namespace the artifacts are declared in.
    #[must_use]
    pub fn target_namespace(&self) -> &'a str {
        self.model
            .target_namespace()
            .unwrap_or(&self.config.default_namespace)
    }

    #[must_use]
    pub fn interface_name(&self) -> String {
        format!("I{}", self.model.friendly_name())
    }

    #[must_use]
    pub fn class_name(&self) -> String {
        self.model.friendly_name().to_string()
    }

    /// `IHasPk<TKey>`, when the contract has a key.
    #[must_use]
    pub fn key_capability(&self) -> Option<String> {
        self.key
            .as_ref()
            .map(|key| format!("{}<{}>", self.config.key_capability, key.type_name()))
    }

    /// Render one artifact form to a complete string.
    pub fn render(&self, kind: ArtifactKind) -> Result<String, Error> {
        let text = match kind {
            ArtifactKind::Interface => interface::generate(self)?,
            ArtifactKind::Class => class::generate(self)?,
        };

        tracing::debug!(
            contract = %self.model.path(),
            kind = %kind,
            namespace = %self.target_namespace(),
            bytes = text.len(),
            "rendered artifact"
        );

        Ok(text)
    }
}

///
/// GeneratedContract
///
/// Both artifact forms of one contract.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GeneratedContract {
    pub path: String,
    pub namespace: String,
    pub interface_name: String,
    pub class_name: String,
    pub interface: String,
    pub class: String,
}

// render_interface
pub fn render_interface(model: &ContractDeclaration, config: &GeneratorConfig) -> Result<String, Error> {
    ContractGenerator::new(model, config)?.render(ArtifactKind::Interface)
}

// render_class
pub fn render_class(model: &ContractDeclaration, config: &GeneratorConfig) -> Result<String, Error> {
    ContractGenerator::new(model, config)?.render(ArtifactKind::Class)
}

/// Render the interface form and write it to `sink` in one piece.
pub fn write_interface<W: Write>(
    model: &ContractDeclaration,
    config: &GeneratorConfig,
    sink: &mut W,
) -> Result<(), GenerateError> {
    let text = render_interface(model, config)?;
    sink.write_all(text.as_bytes())?;

    Ok(())
}

/// Render the class form and write it to `sink` in one piece.
pub fn write_class<W: Write>(
    model: &ContractDeclaration,
    config: &GeneratorConfig,
    sink: &mut W,
) -> Result<(), GenerateError> {
    let text = render_class(model, config)?;
    sink.write_all(text.as_bytes())?;

    Ok(())
}

/// Build the model of `path` and render both artifact forms.
pub fn generate(schema: &Schema, path: &str, config: &GeneratorConfig) -> Result<GeneratedContract, Error> {
    let model = ContractDeclaration::build(schema, path)?;
    let generator = ContractGenerator::new(&model, config)?;

    Ok(GeneratedContract {
        path: model.path().to_string(),
        namespace: generator.target_namespace().to_string(),
        interface_name: generator.interface_name(),
        class_name: generator.class_name(),
        interface: generator.render(ArtifactKind::Interface)?,
        class: generator.render(ArtifactKind::Class)?,
    })
}

/// Generate every entity contract in `schema`, in document order.
///
/// Contracts are independent: a failure is logged and returned in its slot
/// while the remaining contracts are still generated.
#[must_use]
pub fn generate_all(
    schema: &Schema,
    config: &GeneratorConfig,
) -> Vec<(String, Result<GeneratedContract, Error>)> {
    schema
        .entity_contracts()
        .map(|contract| {
            let path = contract.path();
            let result = generate(schema, &path, config);

            if let Err(err) = &result {
                tracing::warn!(contract = %path, kind = %err.kind(), error = %err, "contract generation failed");
            }

            (path, result)
        })
        .collect()
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use contractgen_core::ErrorKind;
    use contractgen_schema::{prelude::*, types::Scalar};
    use proptest::prelude::*;

    fn company() -> Contract {
        Contract::new(Some("Shop"), "ICompany")
            .entity(EntityMarker::default())
            .property(Property::new("Id", TypeRef::scalar(Scalar::Int32)).primary_key(PrimaryKeyMarker::unordered()))
            .property(Property::new("Name", TypeRef::scalar(Scalar::Text)))
    }

    fn broken() -> Contract {
        Contract::new(Some("Shop"), "IBroken")
            .entity(EntityMarker::default())
            .property(Property::new("Ghost", TypeRef::scalar(Scalar::Text)).access(false, false))
    }

    ///
    /// FailingSink
    ///

    struct FailingSink;

    impl Write for FailingSink {
        fn write(&mut self, _: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::other("sink closed"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn generate_all_reports_failures_and_continues() {
        let schema = Schema::new(vec![broken(), company(), Contract::new(None, "IPlain")]).unwrap();

        let results = generate_all(&schema, GeneratorConfig::shared());

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].0, "Shop.IBroken");
        assert_eq!(
            results[0].1.as_ref().unwrap_err().kind(),
            ErrorKind::UnsupportedPropertyShape
        );

        let generated = results[1].1.as_ref().unwrap();
        assert_eq!(generated.interface_name, "ICompany");
        assert_eq!(generated.class_name, "Company");
        assert_eq!(generated.namespace, GeneratorConfig::shared().default_namespace);
    }

    #[test]
    fn failed_render_writes_nothing() {
        let schema = Schema::new(vec![
            broken(),
            Contract::new(Some("Shop"), "IProfile")
                .entity(EntityMarker::default())
                .property(
                    Property::new("Owner", TypeRef::named(Some("Shop"), "ICompany"))
                        .reference(ReferenceMarker::new(Multiplicity::One))
                        .primary_key(PrimaryKeyMarker::unordered()),
                ),
        ])
        .unwrap();
        let model = ContractDeclaration::build(&schema, "Shop.IProfile").unwrap();

        let mut sink = Vec::new();
        let err = write_class(&model, GeneratorConfig::shared(), &mut sink).unwrap_err();

        assert!(sink.is_empty());
        assert!(matches!(
            err,
            GenerateError::Contract(Error::UnsupportedPrimaryKeyConfiguration { .. })
        ));
    }

    #[test]
    fn sink_receives_the_rendered_text() {
        let schema = Schema::new(vec![company()]).unwrap();
        let model = ContractDeclaration::build(&schema, "Shop.ICompany").unwrap();
        let config = GeneratorConfig::shared();

        let mut sink = Vec::new();
        write_interface(&model, config, &mut sink).unwrap();

        assert_eq!(String::from_utf8(sink).unwrap(), render_interface(&model, config).unwrap());
        assert!(matches!(
            write_class(&model, config, &mut FailingSink),
            Err(GenerateError::Io(_))
        ));
    }

    proptest! {
        #[test]
        fn rendering_is_idempotent(
            names in prop::collection::btree_set("[A-Z][a-z]{1,8}", 1..6),
            nullable in any::<bool>(),
        ) {
            let mut contract = company();
            for name in &names {
                if name == "Id" || name == "Name" {
                    continue;
                }
                let ty = if nullable { TypeRef::nullable(TypeRef::scalar(Scalar::Int64)) } else { TypeRef::scalar(Scalar::Text) };
                contract = contract.property(Property::new(name, ty));
            }
            let schema = Schema::new(vec![contract]).unwrap();

            let first = generate(&schema, "Shop.ICompany", GeneratorConfig::shared()).unwrap();
            let second = generate(&schema, "Shop.ICompany", GeneratorConfig::shared()).unwrap();

            prop_assert_eq!(first, second);
        }
    }
}
