//! Type name rendering.
//!
//! Turns a [`TypeRef`] into the display string used in generated
//! declarations. Rules are tried in a fixed order and the first match wins:
//! nullable shortening, constructed generics, scalar aliases, plain names.

use contractgen_schema::{MAX_TYPE_DEPTH, prelude::*, type_ref::SELF_KEYWORD};
use std::{
    fmt::{self, Display},
    ops::BitOr,
};
use thiserror::Error as ThisError;

///
/// TypeNameFlags
///
/// Independently toggleable rendering options. The default enables all of
/// them, which is what generated declarations use.
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct TypeNameFlags(u8);

impl TypeNameFlags {
    pub const NONE: Self = Self(0);
    pub const EXCLUDE_NAMESPACE: Self = Self(1);
    pub const USE_ALIASES: Self = Self(1 << 1);
    pub const SHORTEN_NULLABLE: Self = Self(1 << 2);
    pub const ALL: Self = Self(0b111);

    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    #[must_use]
    pub const fn bits(self) -> u8 {
        self.0
    }
}

impl Default for TypeNameFlags {
    fn default() -> Self {
        Self::ALL
    }
}

impl BitOr for TypeNameFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

impl Display for TypeNameFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names = [
            (Self::EXCLUDE_NAMESPACE, "ExcludeNamespace"),
            (Self::USE_ALIASES, "UseAliases"),
            (Self::SHORTEN_NULLABLE, "ShortenNullable"),
        ];
        let set: Vec<_> = names
            .iter()
            .filter(|(flag, _)| self.contains(*flag))
            .map(|(_, name)| *name)
            .collect();

        if set.is_empty() {
            f.write_str("None")
        } else {
            f.write_str(&set.join(" | "))
        }
    }
}

///
/// TypeShapeError
///
/// A type reference the formatter cannot render. The property model wraps
/// it with the contract and property it came from.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
#[error("unsupported type shape '{ty}': {reason}")]
pub struct TypeShapeError {
    pub ty: String,
    pub reason: String,
}

impl TypeShapeError {
    fn new(ty: &TypeRef, reason: &str) -> Self {
        Self {
            ty: ty.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// Deepest type tree the formatter walks. Every argument level of a parsed
/// expression may also carry a nullable wrapper.
pub const MAX_RENDER_DEPTH: usize = 2 * MAX_TYPE_DEPTH + 1;

/// Render `ty` with the default flag set.
pub fn format_default(ty: &TypeRef) -> Result<String, TypeShapeError> {
    format_type(ty, TypeNameFlags::default())
}

/// Render `ty` according to `flags`.
pub fn format_type(ty: &TypeRef, flags: TypeNameFlags) -> Result<String, TypeShapeError> {
    let mut out = String::new();
    write_type(&mut out, ty, flags, 0)?;

    Ok(out)
}

fn write_type(
    out: &mut String,
    ty: &TypeRef,
    flags: TypeNameFlags,
    depth: usize,
) -> Result<(), TypeShapeError> {
    let TypeRef::Named(named) = ty else {
        return Err(TypeShapeError::new(
            ty,
            &format!("'{SELF_KEYWORD}' is only meaningful inside a type argument list"),
        ));
    };

    // only the qualified name is reported, the full tree may be arbitrarily deep
    if depth > MAX_RENDER_DEPTH {
        return Err(TypeShapeError {
            ty: named.qualified_name(),
            reason: format!("type nested deeper than {MAX_RENDER_DEPTH} levels"),
        });
    }

    // nullable shortening
    if flags.contains(TypeNameFlags::SHORTEN_NULLABLE)
        && let Some(inner) = ty.nullable_inner()
    {
        write_type(out, inner, flags, depth + 1)?;
        out.push('?');

        return Ok(());
    }

    // constructed generic
    if named.is_constructed() {
        if named.args.iter().any(|arg| *arg == TypeRef::SelfRef) {
            return Err(TypeShapeError::new(
                ty,
                "a generic instantiated with itself as an argument cannot be rendered",
            ));
        }

        write_name(out, named, flags);
        out.push('<');
        for (i, arg) in named.args.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            write_type(out, arg, flags, depth + 1)?;
        }
        out.push('>');

        return Ok(());
    }

    // alias
    if flags.contains(TypeNameFlags::USE_ALIASES)
        && let Some(scalar) = ty.scalar_kind()
    {
        out.push_str(scalar.alias());

        return Ok(());
    }

    write_name(out, named, flags);

    Ok(())
}

fn write_name(out: &mut String, named: &NamedType, flags: TypeNameFlags) {
    match &named.namespace {
        Some(ns) if !flags.contains(TypeNameFlags::EXCLUDE_NAMESPACE) => {
            out.push_str(ns);
            out.push('.');
        }
        _ => {}
    }
    out.push_str(&named.name);
}

///
/// TESTS
///
