use crate::{
    Error,
    format::format_default,
    model::PropertyCategory,
};
use contractgen_schema::prelude::*;
use std::cmp::Ordering;

///
/// Consts
///

/// Namespace of the synthesized required annotation.
pub const REQUIRED_NAMESPACE: &str = "System.ComponentModel.DataAnnotations";

/// Display name of the required annotation.
pub const REQUIRED_ANNOTATION: &str = "Required";

/// Annotation names that act as markers and never reach generated output.
pub const MARKER_ANNOTATIONS: [&str; 4] = [
    "EntityContractDeclaration",
    "EntityReference",
    "PrimaryKey",
    "ServiceContractDeclaration",
];

///
/// PropertyDeclaration
///
/// Classified, immutable view of one property visible on a contract.
///

#[derive(Clone, Debug, PartialEq)]
pub struct PropertyDeclaration {
    name: String,
    ty: TypeRef,
    type_name: String,
    category: PropertyCategory,
    pk_order: Option<u32>,
    multiplicity: Option<Multiplicity>,
    annotations: Vec<Annotation>,
    can_read: bool,
    can_write: bool,
    origin: Option<String>,
}

impl PropertyDeclaration {
    /// Build from a declared property of `contract`. `origin` is the path of
    /// the extended contract it was inherited through, if any.
    pub fn build(contract: &str, property: &Property, origin: Option<&str>) -> Result<Self, Error> {
        if !property.read && !property.write {
            return Err(Error::UnsupportedPropertyShape {
                contract: contract.to_string(),
                property: property.name.clone(),
            });
        }

        let multiplicity = match property.reference {
            Some(marker) => Some(marker.multiplicity.ok_or_else(|| {
                Error::InvalidReferenceMarker {
                    contract: contract.to_string(),
                    property: property.name.clone(),
                }
            })?),
            None => None,
        };

        let type_name = format_default(&property.ty).map_err(|e| Error::UnsupportedTypeShape {
            contract: contract.to_string(),
            property: property.name.clone(),
            ty: e.ty,
            reason: e.reason,
        })?;

        let category =
            PropertyCategory::classify(property.primary_key.is_some(), property.reference.is_some());

        let mut annotations: Vec<Annotation> = property
            .annotations
            .iter()
            .filter(|a| !MARKER_ANNOTATIONS.iter().any(|m| a.is(m)))
            .cloned()
            .collect();

        // exactly-one references are never nullable
        if multiplicity == Some(Multiplicity::One)
            && !annotations.iter().any(|a| a.is(REQUIRED_ANNOTATION))
        {
            annotations.push(required_annotation());
        }

        Ok(Self {
            name: property.name.clone(),
            ty: property.ty.clone(),
            type_name,
            category,
            pk_order: property.primary_key.and_then(|pk| pk.order),
            multiplicity,
            annotations,
            can_read: property.read,
            can_write: property.write,
            origin: origin.map(ToString::to_string),
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn ty(&self) -> &TypeRef {
        &self.ty
    }

    /// Type rendered with the default formatter flags.
    #[must_use]
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    #[must_use]
    pub const fn category(&self) -> PropertyCategory {
        self.category
    }

    #[must_use]
    pub const fn pk_order(&self) -> Option<u32> {
        self.pk_order
    }

    #[must_use]
    pub const fn multiplicity(&self) -> Option<Multiplicity> {
        self.multiplicity
    }

    #[must_use]
    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    #[must_use]
    pub const fn can_read(&self) -> bool {
        self.can_read
    }

    #[must_use]
    pub const fn can_write(&self) -> bool {
        self.can_write
    }

    /// Path of the extended contract this property was inherited through.
    #[must_use]
    pub fn origin(&self) -> Option<&str> {
        self.origin.as_deref()
    }

    #[must_use]
    pub const fn is_inherited(&self) -> bool {
        self.origin.is_some()
    }

    #[must_use]
    pub const fn is_key(&self) -> bool {
        self.category.is_key()
    }

    #[must_use]
    pub const fn is_reference(&self) -> bool {
        self.category.is_reference()
    }

    #[must_use]
    pub fn is_many(&self) -> bool {
        self.multiplicity.is_some_and(Multiplicity::is_many)
    }

    /// Deterministic relative order of two properties of the same contract:
    /// category rank, then explicit key order, then ordinal name. Ordered
    /// properties sort ahead of unordered ones so the ordering stays total.
    #[must_use]
    pub fn cmp_declaration(&self, other: &Self) -> Ordering {
        self.category
            .cmp(&other.category)
            .then_with(|| self.pk_order.is_none().cmp(&other.pk_order.is_none()))
            .then_with(|| self.pk_order.cmp(&other.pk_order))
            .then_with(|| self.name.as_bytes().cmp(other.name.as_bytes()))
    }
}

fn required_annotation() -> Annotation {
    Annotation::new(TypeRef::named(
        Some(REQUIRED_NAMESPACE),
        &format!("{REQUIRED_ANNOTATION}Attribute"),
    ))
}

///
/// TESTS
///
