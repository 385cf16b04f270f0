//! Contract modeling and classification.
//!
//! Builds immutable [`model::ContractDeclaration`]s from a validated
//! [`contractgen_schema::node::Schema`] and formats type references for the
//! text generators.

pub mod error;
pub mod format;
pub mod model;

pub use error::{Error, ErrorKind, InvalidContractReason};

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        Error, ErrorKind,
        format::{TypeNameFlags, format_default, format_type},
        model::{ContractDeclaration, ExtendedContract, PropertyCategory, PropertyDeclaration},
    };
}
