use crate::prelude::*;

///
/// EntityMarker
///
/// Tags a contract for generation. Carries the optional namespace/name the
/// generated artifacts should use instead of the declaration's own.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct EntityMarker {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

///
/// PrimaryKeyMarker
///
/// Marks a property as part of the entity's identity. A missing `order`
/// means "unordered", which only a single-property key may use.
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct PrimaryKeyMarker {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<u32>,
}

impl PrimaryKeyMarker {
    #[must_use]
    pub const fn unordered() -> Self {
        Self { order: None }
    }

    #[must_use]
    pub const fn ordered(order: u32) -> Self {
        Self { order: Some(order) }
    }
}

///
/// ReferenceMarker
///
/// Marks a property as a reference to another entity contract. The
/// multiplicity is mandatory; it is optional here only so a schema that
/// omits it can be loaded and rejected with a precise error.
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct ReferenceMarker {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multiplicity: Option<Multiplicity>,
}

impl ReferenceMarker {
    #[must_use]
    pub const fn new(multiplicity: Multiplicity) -> Self {
        Self {
            multiplicity: Some(multiplicity),
        }
    }
}
