use derive_more::Display;
use thiserror::Error as ThisError;

///
/// Error
///
/// Construction-time failure scoped to a single contract. Every variant names
/// the contract (and the property, where one is at fault) so callers can
/// report it precisely and carry on with the remaining contracts.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum Error {
    #[error("invalid contract '{contract}': {reason}")]
    InvalidContract {
        contract: String,
        reason: InvalidContractReason,
    },

    #[error(
        "contract '{contract}': primary key order is not contiguous at property '{property}' (expected {expected}, found {})",
        .found.map_or_else(|| "unordered".to_string(), |o| o.to_string())
    )]
    InvalidPrimaryKeyOrder {
        contract: String,
        property: String,
        expected: u32,
        found: Option<u32>,
    },

    #[error("contract '{contract}': reference marker on property '{property}' has no multiplicity")]
    InvalidReferenceMarker { contract: String, property: String },

    #[error("contract '{contract}': property '{property}' can neither be read nor written")]
    UnsupportedPropertyShape { contract: String, property: String },

    #[error("contract '{contract}': property '{property}' has unsupported type '{ty}': {reason}")]
    UnsupportedTypeShape {
        contract: String,
        property: String,
        ty: String,
        reason: String,
    },

    #[error("contract '{contract}': unsupported primary key configuration: {reason}")]
    UnsupportedPrimaryKeyConfiguration { contract: String, reason: String },
}

impl Error {
    pub(crate) fn invalid_contract(contract: &str, reason: InvalidContractReason) -> Self {
        Self::InvalidContract {
            contract: contract.to_string(),
            reason,
        }
    }

    pub fn unsupported_key(contract: &str, reason: impl Into<String>) -> Self {
        Self::UnsupportedPrimaryKeyConfiguration {
            contract: contract.to_string(),
            reason: reason.into(),
        }
    }

    /// Path of the contract this error is scoped to.
    #[must_use]
    pub fn contract(&self) -> &str {
        match self {
            Self::InvalidContract { contract, .. }
            | Self::InvalidPrimaryKeyOrder { contract, .. }
            | Self::InvalidReferenceMarker { contract, .. }
            | Self::UnsupportedPropertyShape { contract, .. }
            | Self::UnsupportedTypeShape { contract, .. }
            | Self::UnsupportedPrimaryKeyConfiguration { contract, .. } => contract,
        }
    }

    /// Name of the offending property, when one is at fault.
    #[must_use]
    pub fn property(&self) -> Option<&str> {
        match self {
            Self::InvalidPrimaryKeyOrder { property, .. }
            | Self::InvalidReferenceMarker { property, .. }
            | Self::UnsupportedPropertyShape { property, .. }
            | Self::UnsupportedTypeShape { property, .. } => Some(property),
            Self::InvalidContract { .. } | Self::UnsupportedPrimaryKeyConfiguration { .. } => None,
        }
    }

    #[must_use]
    #[remain::check]
    pub const fn kind(&self) -> ErrorKind {
        #[remain::sorted]
        match self {
            Self::InvalidContract { .. } => ErrorKind::InvalidContract,
            Self::InvalidPrimaryKeyOrder { .. } => ErrorKind::InvalidPrimaryKeyOrder,
            Self::InvalidReferenceMarker { .. } => ErrorKind::InvalidReferenceMarker,
            Self::UnsupportedPrimaryKeyConfiguration { .. } => {
                ErrorKind::UnsupportedPrimaryKeyConfiguration
            }
            Self::UnsupportedPropertyShape { .. } => ErrorKind::UnsupportedPropertyShape,
            Self::UnsupportedTypeShape { .. } => ErrorKind::UnsupportedTypeShape,
        }
    }
}

///
/// ErrorKind
///
/// Stable classification of [`Error`] for diagnostics.
///

#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
#[remain::sorted]
pub enum ErrorKind {
    InvalidContract,
    InvalidPrimaryKeyOrder,
    InvalidReferenceMarker,
    UnsupportedPrimaryKeyConfiguration,
    UnsupportedPropertyShape,
    UnsupportedTypeShape,
}

///
/// InvalidContractReason
///
/// Which precondition of contract model construction failed.
///

#[derive(Clone, Debug, Display, Eq, PartialEq)]
pub enum InvalidContractReason {
    #[display("contract is not declared in the schema")]
    NotDeclared,

    #[display("declaration is not contract-kind")]
    NotContractKind,

    #[display("declaration does not carry the entity contract marker")]
    MissingEntityMarker,

    #[display("extended contract '{_0}' is not declared in the schema")]
    UnknownExtendedContract(String),

    #[display("extended contract '{_0}' is not contract-kind")]
    ExtendsNonContract(String),

    #[display("inheritance cycle through '{_0}'")]
    InheritanceCycle(String),
}

///
/// TESTS
///
