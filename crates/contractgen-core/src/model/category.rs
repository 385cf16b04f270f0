use derive_more::Display;

///
/// PropertyCategory
///
/// Structural role of a property, derived from the markers it carries.
/// Variant order is the ranking used for sorting and the default
/// enumeration order of a contract model.
///

#[derive(Clone, Copy, Debug, Display, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum PropertyCategory {
    PrimaryKey,
    EntityRefAsPrimaryKey,
    EntityRef,
    NonPk,
}

impl PropertyCategory {
    /// Every category in rank order.
    pub const ALL: [Self; 4] = [
        Self::PrimaryKey,
        Self::EntityRefAsPrimaryKey,
        Self::EntityRef,
        Self::NonPk,
    ];

    /// The categories whose members form the primary key.
    pub const KEY: [Self; 2] = [Self::PrimaryKey, Self::EntityRefAsPrimaryKey];

    /// Classify from the presence of a primary-key and a reference marker.
    #[must_use]
    pub const fn classify(has_pk: bool, has_reference: bool) -> Self {
        match (has_pk, has_reference) {
            (true, true) => Self::EntityRefAsPrimaryKey,
            (true, false) => Self::PrimaryKey,
            (false, true) => Self::EntityRef,
            (false, false) => Self::NonPk,
        }
    }

    /// One-based rank; lower sorts first.
    #[must_use]
    pub const fn rank(self) -> u8 {
        match self {
            Self::PrimaryKey => 1,
            Self::EntityRefAsPrimaryKey => 2,
            Self::EntityRef => 3,
            Self::NonPk => 4,
        }
    }

    #[must_use]
    pub const fn is_key(self) -> bool {
        matches!(self, Self::PrimaryKey | Self::EntityRefAsPrimaryKey)
    }

    #[must_use]
    pub const fn is_reference(self) -> bool {
        matches!(self, Self::EntityRefAsPrimaryKey | Self::EntityRef)
    }

    pub(crate) const fn index(self) -> usize {
        self.rank() as usize - 1
    }
}

///
/// TESTS
///
