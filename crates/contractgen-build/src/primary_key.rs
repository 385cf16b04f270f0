use contractgen_core::{
    Error,
    model::{ContractDeclaration, PropertyCategory, PropertyDeclaration},
};

/// Suffix of the synthesized composite key type.
pub const COMPOSITE_KEY_SUFFIX: &str = "Pk";

///
/// PrimaryKey
///
/// The resolved identity of a contract: either one plain key property, or a
/// synthesized aggregate over every key property in key order.
///

#[derive(Clone, Debug)]
pub enum PrimaryKey<'a> {
    Simple(&'a PropertyDeclaration),
    Composite {
        type_name: String,
        components: Vec<&'a PropertyDeclaration>,
    },
}

impl<'a> PrimaryKey<'a> {
    /// Resolve the key of `model`; `None` when it declares no key properties.
    pub fn resolve(model: &'a ContractDeclaration) -> Result<Option<Self>, Error> {
        if !model.has_pk() {
            return Ok(None);
        }

        let references = model.bucket(PropertyCategory::EntityRefAsPrimaryKey);
        if let Some(many) = references.iter().find(|p| p.is_many()) {
            return Err(Error::unsupported_key(
                model.path(),
                format!(
                    "entity reference '{}' with multiplicity Many cannot be part of the primary key",
                    many.name()
                ),
            ));
        }

        if model.has_composite_pk() {
            return Ok(Some(Self::Composite {
                type_name: format!("{}{COMPOSITE_KEY_SUFFIX}", model.friendly_name()),
                components: model.key_properties(),
            }));
        }

        match model.bucket(PropertyCategory::PrimaryKey) {
            [single] => Ok(Some(Self::Simple(single))),
            _ => Err(Error::unsupported_key(
                model.path(),
                "an entity reference alone cannot act as the primary key",
            )),
        }
    }

    /// Type name the key is exposed as.
    #[must_use]
    pub fn type_name(&self) -> &str {
        match self {
            Self::Simple(property) => property.type_name(),
            Self::Composite { type_name, .. } => type_name,
        }
    }

    /// Key properties in key order.
    #[must_use]
    pub fn components(&self) -> Vec<&'a PropertyDeclaration> {
        match self {
            Self::Simple(property) => vec![*property],
            Self::Composite { components, .. } => components.clone(),
        }
    }

    #[must_use]
    pub const fn is_composite(&self) -> bool {
        matches!(self, Self::Composite { .. })
    }
}

///
/// TESTS
///
