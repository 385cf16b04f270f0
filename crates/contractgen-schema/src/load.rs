use crate::{SchemaError, prelude::*};

///
/// SchemaDocument
///
/// On-disk shape of a schema file: a flat list of contracts.
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct SchemaDocument {
    #[serde(default)]
    pub contracts: Vec<Contract>,
}

impl Schema {
    /// Parse and validate a TOML schema document.
    pub fn from_toml(src: &str) -> Result<Self, SchemaError> {
        let doc: SchemaDocument = toml::from_str(src)?;

        Self::new(doc.contracts)
    }

    /// Parse and validate a JSON schema document.
    pub fn from_json(src: &str) -> Result<Self, SchemaError> {
        let doc: SchemaDocument = serde_json::from_str(src)?;

        Self::new(doc.contracts)
    }
}

///
/// TESTS
///
