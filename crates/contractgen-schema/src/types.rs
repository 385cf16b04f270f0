use crate::prelude::*;
use derive_more::{Display, FromStr};
use std::{collections::BTreeMap, sync::LazyLock};

/// Namespace every well-known scalar lives in.
pub const SCALAR_NAMESPACE: &str = "System";

///
/// Multiplicity
///
/// How many target entities a reference property points at.
///

#[derive(
    Clone, Copy, Debug, Deserialize, Display, Eq, FromStr, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Multiplicity {
    One,
    ZeroOrOne,
    Many,
}

impl Multiplicity {
    #[must_use]
    pub const fn is_many(self) -> bool {
        matches!(self, Self::Many)
    }
}

///
/// ContractKind
///
/// Whether a declaration describes a contract surface or a concrete value.
/// Only contract-kind declarations can be turned into entity models.
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Display, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ContractKind {
    #[default]
    Contract,
    Concrete,
}

///
/// Scalar
///
/// Well-known scalar kinds that render with a short alias.
///

#[derive(Clone, Copy, Debug, Display, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[remain::sorted]
pub enum Scalar {
    Bool,
    Char,
    Decimal,
    Float32,
    Float64,
    Int8,
    Int16,
    Int32,
    Int64,
    Nat8,
    Nat16,
    Nat32,
    Nat64,
    Object,
    Text,
}

/// Every scalar, in declaration order.
pub const ALL_SCALARS: [Scalar; 15] = [
    Scalar::Bool,
    Scalar::Char,
    Scalar::Decimal,
    Scalar::Float32,
    Scalar::Float64,
    Scalar::Int8,
    Scalar::Int16,
    Scalar::Int32,
    Scalar::Int64,
    Scalar::Nat8,
    Scalar::Nat16,
    Scalar::Nat32,
    Scalar::Nat64,
    Scalar::Object,
    Scalar::Text,
];

static BY_TYPE_NAME: LazyLock<BTreeMap<&'static str, Scalar>> =
    LazyLock::new(|| ALL_SCALARS.iter().map(|s| (s.type_name(), *s)).collect());

static BY_ALIAS: LazyLock<BTreeMap<&'static str, Scalar>> =
    LazyLock::new(|| ALL_SCALARS.iter().map(|s| (s.alias(), *s)).collect());

impl Scalar {
    /// Short alias used in rendered output.
    #[must_use]
    #[remain::check]
    pub const fn alias(self) -> &'static str {
        #[remain::sorted]
        match self {
            Self::Bool => "bool",
            Self::Char => "char",
            Self::Decimal => "decimal",
            Self::Float32 => "float",
            Self::Float64 => "double",
            Self::Int8 => "sbyte",
            Self::Int16 => "short",
            Self::Int32 => "int",
            Self::Int64 => "long",
            Self::Nat8 => "byte",
            Self::Nat16 => "ushort",
            Self::Nat32 => "uint",
            Self::Nat64 => "ulong",
            Self::Object => "object",
            Self::Text => "string",
        }
    }

    /// Unqualified type name inside [`SCALAR_NAMESPACE`].
    #[must_use]
    #[remain::check]
    pub const fn type_name(self) -> &'static str {
        #[remain::sorted]
        match self {
            Self::Bool => "Boolean",
            Self::Char => "Char",
            Self::Decimal => "Decimal",
            Self::Float32 => "Single",
            Self::Float64 => "Double",
            Self::Int8 => "SByte",
            Self::Int16 => "Int16",
            Self::Int32 => "Int32",
            Self::Int64 => "Int64",
            Self::Nat8 => "Byte",
            Self::Nat16 => "UInt16",
            Self::Nat32 => "UInt32",
            Self::Nat64 => "UInt64",
            Self::Object => "Object",
            Self::Text => "String",
        }
    }

    /// Resolve a scalar from its namespace and type name.
    #[must_use]
    pub fn from_type_name(namespace: Option<&str>, name: &str) -> Option<Self> {
        if namespace != Some(SCALAR_NAMESPACE) {
            return None;
        }

        BY_TYPE_NAME.get(name).copied()
    }

    /// Resolve a scalar from its short alias.
    #[must_use]
    pub fn from_alias(alias: &str) -> Option<Self> {
        BY_ALIAS.get(alias).copied()
    }
}

///
/// TESTS
///
