use crate::{SchemaError, prelude::*, validate::validate_schema};
use std::collections::BTreeMap;

///
/// Schema
///
/// Validated, read-only set of contract declarations in document order.
///

#[derive(Clone, Debug, Default)]
pub struct Schema {
    contracts: Vec<Contract>,
    index: BTreeMap<String, usize>,
}

impl Schema {
    /// Build and validate a schema from a list of contract declarations.
    pub fn new(contracts: Vec<Contract>) -> Result<Self, SchemaError> {
        let schema = Self::new_unvalidated(contracts);
        schema.validate()?;

        Ok(schema)
    }

    /// Run structural validation, reporting every problem at once.
    pub fn validate(&self) -> Result<(), SchemaError> {
        validate_schema(self).map_err(SchemaError::Validation)
    }

    // first declaration wins the index slot; duplicates are reported by validation
    pub(crate) fn new_unvalidated(contracts: Vec<Contract>) -> Self {
        let mut index = BTreeMap::new();
        for (i, contract) in contracts.iter().enumerate() {
            index.entry(contract.path()).or_insert(i);
        }

        Self { contracts, index }
    }

    /// Look a contract up by its qualified path.
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&Contract> {
        self.index.get(path).map(|i| &self.contracts[*i])
    }

    pub fn contracts(&self) -> impl Iterator<Item = &Contract> {
        self.contracts.iter()
    }

    /// Contracts tagged with the entity marker, in document order.
    pub fn entity_contracts(&self) -> impl Iterator<Item = &Contract> {
        self.contracts.iter().filter(|c| c.is_entity())
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.contracts.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.contracts.is_empty()
    }
}
