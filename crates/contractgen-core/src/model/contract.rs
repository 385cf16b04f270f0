use crate::{
    Error, InvalidContractReason,
    model::{MARKER_ANNOTATIONS, PropertyCategory, PropertyDeclaration},
};
use contractgen_schema::prelude::*;
use std::collections::BTreeSet;

///
/// ContractDeclaration
///
/// Immutable, classified model of one entity contract. Built once from a
/// schema declaration and consumed by the text generators.
///

#[derive(Clone, Debug, PartialEq)]
pub struct ContractDeclaration {
    path: String,
    namespace: Option<String>,
    name: String,
    entity: EntityMarker,
    friendly_name: String,
    buckets: [Vec<PropertyDeclaration>; 4],
    extends: Vec<ExtendedContract>,
    annotations: Vec<Annotation>,
}

impl ContractDeclaration {
    /// Resolve `path` in `schema` and build its model.
    pub fn build(schema: &Schema, path: &str) -> Result<Self, Error> {
        let contract = schema
            .get(path)
            .ok_or_else(|| Error::invalid_contract(path, InvalidContractReason::NotDeclared))?;

        Self::from_contract(schema, contract)
    }

    /// Build the model of an already-resolved declaration.
    pub fn from_contract(schema: &Schema, contract: &Contract) -> Result<Self, Error> {
        let path = contract.path();

        if contract.kind != ContractKind::Contract {
            return Err(Error::invalid_contract(&path, InvalidContractReason::NotContractKind));
        }
        let Some(entity) = contract.entity.clone() else {
            return Err(Error::invalid_contract(&path, InvalidContractReason::MissingEntityMarker));
        };

        let visible = Visible::collect(schema, contract)?;

        let mut buckets: [Vec<PropertyDeclaration>; 4] = Default::default();
        for (property, origin) in &visible.properties {
            let decl = PropertyDeclaration::build(&path, property, origin.as_deref())?;
            buckets[decl.category().index()].push(decl);
        }

        // visible collection already rejected unknown extends
        let extends = contract
            .extends
            .iter()
            .filter_map(|ext| schema.get(ext))
            .map(|ext| ExtendedContract::new(ext, &buckets))
            .collect();

        let annotations = contract
            .annotations
            .iter()
            .filter(|a| !MARKER_ANNOTATIONS.iter().any(|m| a.is(m)))
            .cloned()
            .collect();

        let friendly_name = friendly_name(entity.name.as_deref().unwrap_or(&contract.name)).to_string();

        let model = Self {
            path,
            namespace: contract.namespace.clone(),
            name: contract.name.clone(),
            entity,
            friendly_name,
            buckets,
            extends,
            annotations,
        };
        model.validate_key_order()?;

        tracing::debug!(
            contract = %model.path,
            friendly_name = %model.friendly_name,
            properties = model.property_count(),
            key_properties = model.pk_property_count(),
            extends = model.extends.len(),
            "built contract model"
        );

        Ok(model)
    }

    // validate_key_order
    // composite key orders must form 0..N-1 once sorted
    fn validate_key_order(&self) -> Result<(), Error> {
        if !self.has_composite_pk() {
            return Ok(());
        }

        for (expected, property) in (0u32..).zip(self.key_properties()) {
            if property.pk_order() != Some(expected) {
                return Err(Error::InvalidPrimaryKeyOrder {
                    contract: self.path.clone(),
                    property: property.name().to_string(),
                    expected,
                    found: property.pk_order(),
                });
            }
        }

        Ok(())
    }

    //
    // identity
    //

    /// Qualified path of the source declaration.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Namespace of the source declaration.
    #[must_use]
    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    /// Name of the source declaration.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Display name used for the generated artifacts.
    #[must_use]
    pub fn friendly_name(&self) -> &str {
        &self.friendly_name
    }

    /// Namespace override carried by the entity marker.
    #[must_use]
    pub fn target_namespace(&self) -> Option<&str> {
        self.entity.namespace.as_deref()
    }

    #[must_use]
    pub fn extends(&self) -> &[ExtendedContract] {
        &self.extends
    }

    //
    // keys
    //

    #[must_use]
    pub const fn pk_property_count(&self) -> usize {
        self.buckets[0].len() + self.buckets[1].len()
    }

    #[must_use]
    pub const fn has_pk(&self) -> bool {
        self.pk_property_count() > 0
    }

    #[must_use]
    pub const fn has_composite_pk(&self) -> bool {
        self.pk_property_count() > 1
    }

    /// Key properties in key order: category rank, then explicit order.
    #[must_use]
    pub fn key_properties(&self) -> Vec<&PropertyDeclaration> {
        let mut keys: Vec<_> = self.properties_in(&PropertyCategory::KEY).collect();
        keys.sort_by(|a, b| a.cmp_declaration(b));

        keys
    }

    //
    // properties
    //

    /// Properties of one category, in enumeration order.
    #[must_use]
    pub fn bucket(&self, category: PropertyCategory) -> &[PropertyDeclaration] {
        &self.buckets[category.index()]
    }

    /// Every property, category by category in rank order.
    pub fn properties(&self) -> impl Iterator<Item = &PropertyDeclaration> {
        self.properties_in(&PropertyCategory::ALL)
    }

    /// Properties of the given categories, in the order the categories are given.
    pub fn properties_in<'a>(
        &'a self,
        categories: &'a [PropertyCategory],
    ) -> impl Iterator<Item = &'a PropertyDeclaration> + 'a {
        categories.iter().flat_map(|c| self.bucket(*c).iter())
    }

    /// Properties declared on this contract itself.
    pub fn own_properties(&self) -> impl Iterator<Item = &PropertyDeclaration> {
        self.properties().filter(|p| !p.is_inherited())
    }

    #[must_use]
    pub fn get_property(&self, name: &str) -> Option<&PropertyDeclaration> {
        self.properties().find(|p| p.name() == name)
    }

    #[must_use]
    pub fn property_count(&self) -> usize {
        self.buckets.iter().map(Vec::len).sum()
    }

    //
    // annotations
    //

    /// Annotations declared on the contract, markers excluded.
    #[must_use]
    pub fn contract_annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    /// Contract annotations followed by each property's, in property order.
    pub fn annotations(&self) -> impl Iterator<Item = &Annotation> {
        self.annotations
            .iter()
            .chain(self.properties().flat_map(|p| p.annotations().iter()))
    }
}

///
/// ExtendedContract
///
/// A contract named in `extends`, with the visible properties that entered
/// the model through it.
///

#[derive(Clone, Debug, PartialEq)]
pub struct ExtendedContract {
    pub path: String,
    pub namespace: Option<String>,
    pub name: String,
    pub properties: Vec<PropertyDeclaration>,
}

impl ExtendedContract {
    fn new(contract: &Contract, buckets: &[Vec<PropertyDeclaration>; 4]) -> Self {
        let path = contract.path();
        let properties = buckets
            .iter()
            .flatten()
            .filter(|p| p.origin() == Some(path.as_str()))
            .cloned()
            .collect();

        Self {
            path,
            namespace: contract.namespace.clone(),
            name: contract.name.clone(),
            properties,
        }
    }
}

///
/// Visible
///
/// Properties visible on a contract: its own first, then those of each
/// extended contract depth-first. Later duplicates of a name are skipped,
/// and a contract reached again through another path is walked only once.
///

struct Visible<'a> {
    root: String,
    seen: BTreeSet<&'a str>,
    visited: BTreeSet<&'a str>,
    properties: Vec<(&'a Property, Option<String>)>,
}

impl<'a> Visible<'a> {
    fn collect(schema: &'a Schema, contract: &'a Contract) -> Result<Self, Error> {
        let mut visible = Self {
            root: contract.path(),
            seen: BTreeSet::new(),
            visited: BTreeSet::new(),
            properties: Vec::new(),
        };

        visible.add(contract, None);

        let mut stack = vec![visible.root.clone()];
        for ext in &contract.extends {
            visible.walk(schema, ext, ext, &mut stack)?;
        }

        Ok(visible)
    }

    fn add(&mut self, contract: &'a Contract, origin: Option<&str>) {
        for property in &contract.properties {
            if self.seen.insert(property.name.as_str()) {
                self.properties
                    .push((property, origin.map(ToString::to_string)));
            }
        }
    }

    fn walk(
        &mut self,
        schema: &'a Schema,
        path: &'a str,
        origin: &str,
        stack: &mut Vec<String>,
    ) -> Result<(), Error> {
        if stack.iter().any(|p| p == path) {
            return Err(self.fail(InvalidContractReason::InheritanceCycle(path.to_string())));
        }
        if !self.visited.insert(path) {
            return Ok(());
        }

        let contract = schema.get(path).ok_or_else(|| {
            self.fail(InvalidContractReason::UnknownExtendedContract(path.to_string()))
        })?;
        if contract.kind != ContractKind::Contract {
            return Err(self.fail(InvalidContractReason::ExtendsNonContract(path.to_string())));
        }

        self.add(contract, Some(origin));

        stack.push(path.to_string());
        for ext in &contract.extends {
            self.walk(schema, ext, origin, stack)?;
        }
        stack.pop();

        Ok(())
    }

    fn fail(&self, reason: InvalidContractReason) -> Error {
        Error::invalid_contract(&self.root, reason)
    }
}

/// Strip a leading contract-style `I` when it is followed by another
/// uppercase letter: `ICompany` becomes `Company`, `Iid` and `I` stay as-is.
#[must_use]
pub fn friendly_name(name: &str) -> &str {
    let mut chars = name.chars();

    match (chars.next(), chars.next()) {
        (Some('I'), Some(second)) if second.is_uppercase() => &name[1..],
        _ => name,
    }
}

///
/// TESTS
///
