use crate::prelude::*;

const fn default_true() -> bool {
    true
}

///
/// Property
///
/// One declared property of a contract.
///

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Property {
    pub name: String,

    #[serde(rename = "type")]
    pub ty: TypeRef,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_key: Option<PrimaryKeyMarker>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<ReferenceMarker>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub annotations: Vec<Annotation>,

    #[serde(default = "default_true")]
    pub read: bool,

    #[serde(default = "default_true")]
    pub write: bool,
}

impl Property {
    /// A readable and writable property with no markers.
    #[must_use]
    pub fn new(name: &str, ty: TypeRef) -> Self {
        Self {
            name: name.to_string(),
            ty,
            primary_key: None,
            reference: None,
            annotations: Vec::new(),
            read: true,
            write: true,
        }
    }

    #[must_use]
    pub const fn primary_key(mut self, marker: PrimaryKeyMarker) -> Self {
        self.primary_key = Some(marker);
        self
    }

    #[must_use]
    pub const fn reference(mut self, marker: ReferenceMarker) -> Self {
        self.reference = Some(marker);
        self
    }

    #[must_use]
    pub fn annotate(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }

    #[must_use]
    pub const fn access(mut self, read: bool, write: bool) -> Self {
        self.read = read;
        self.write = write;
        self
    }
}
