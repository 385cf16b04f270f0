use crate::prelude::*;

///
/// Contract
///
/// A declared contract: its identity, the contracts it extends, its
/// properties and its own annotations. Only contract-kind declarations that
/// carry an [`EntityMarker`] are turned into generated artifacts.
///

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Contract {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,

    pub name: String,

    #[serde(default)]
    pub kind: ContractKind,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity: Option<EntityMarker>,

    /// Qualified paths of extended contracts, in declaration order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extends: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub properties: Vec<Property>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub annotations: Vec<Annotation>,
}

impl Contract {
    /// A contract-kind declaration without markers or members.
    #[must_use]
    pub fn new(namespace: Option<&str>, name: &str) -> Self {
        Self {
            namespace: namespace.map(ToString::to_string),
            name: name.to_string(),
            kind: ContractKind::Contract,
            entity: None,
            extends: Vec::new(),
            properties: Vec::new(),
            annotations: Vec::new(),
        }
    }

    /// Qualified path used to look the contract up in a [`Schema`].
    #[must_use]
    pub fn path(&self) -> String {
        match &self.namespace {
            Some(ns) => format!("{ns}.{}", self.name),
            None => self.name.clone(),
        }
    }

    #[must_use]
    pub const fn is_entity(&self) -> bool {
        self.entity.is_some()
    }

    #[must_use]
    pub fn get_property(&self, name: &str) -> Option<&Property> {
        self.properties.iter().find(|p| p.name == name)
    }

    //
    // builder helpers
    //

    #[must_use]
    pub const fn kind(mut self, kind: ContractKind) -> Self {
        self.kind = kind;
        self
    }

    #[must_use]
    pub fn entity(mut self, marker: EntityMarker) -> Self {
        self.entity = Some(marker);
        self
    }

    #[must_use]
    pub fn extend(mut self, path: &str) -> Self {
        self.extends.push(path.to_string());
        self
    }

    #[must_use]
    pub fn property(mut self, property: Property) -> Self {
        self.properties.push(property);
        self
    }

    #[must_use]
    pub fn annotate(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }
}
