//! Entity contract source generator.
//!
//! ## Crate layout
//! - `schema`: input schema nodes, type expressions, loading and validation.
//! - `core`: type name formatting and the contract/property models.
//! - `build`: generator config and the interface/class text generators.
//!
//! The `prelude` module covers the usual load, build and render flow.

pub use contractgen_build as build;
pub use contractgen_core as core;
pub use contractgen_schema as schema;

//
// Consts
//

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use contractgen_core::Error;

///
/// Prelude
///

pub mod prelude {
    pub use crate::build::{
        ArtifactKind, ContractGenerator, GenerateError, GeneratedContract, GeneratorConfig,
        generate, generate_all, render_class, render_interface, write_class, write_interface,
    };
    pub use crate::core::{
        Error, ErrorKind, InvalidContractReason,
        format::{TypeNameFlags, format_type},
        model::{ContractDeclaration, PropertyCategory, PropertyDeclaration},
    };
    pub use crate::schema::{
        SchemaError,
        node::{
            Annotation, ArgValue, Contract, EntityMarker, PrimaryKeyMarker, Property,
            ReferenceMarker, Schema,
        },
        type_ref::TypeRef,
        types::{ContractKind, Multiplicity, Scalar},
    };
}
