//! Declarative input schema for entity contract generation.
//!
//! A [`node::Schema`] is a plain description of contracts, their properties
//! and the markers attached to them. It is loaded from TOML or JSON and
//! validated once; everything downstream treats it as read-only data.

pub mod error;
pub mod load;
pub mod node;
pub mod type_ref;
pub mod types;
pub mod validate;

/// Maximum length for contract and property identifiers.
pub const MAX_IDENT_LEN: usize = 128;

/// Maximum nesting of generic argument lists in a type expression.
pub const MAX_TYPE_DEPTH: usize = 32;

use crate::error::ErrorTree;
use thiserror::Error as ThisError;

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        err,
        error::ErrorTree,
        node::*,
        type_ref::{NamedType, TypeRef},
        types::{ContractKind, Multiplicity, Scalar},
    };
    pub use serde::{Deserialize, Serialize};
}

///
/// SchemaError
///

#[derive(Debug, ThisError)]
pub enum SchemaError {
    #[error("invalid toml schema document: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid json schema document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid type expression '{expr}': {reason}")]
    InvalidTypeExpr { expr: String, reason: String },

    #[error("schema validation failed:\n{0}")]
    Validation(ErrorTree),
}

impl SchemaError {
    pub(crate) fn type_expr(expr: &str, reason: impl Into<String>) -> Self {
        Self::InvalidTypeExpr {
            expr: expr.to_string(),
            reason: reason.into(),
        }
    }
}
