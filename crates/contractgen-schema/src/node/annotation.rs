use crate::{
    prelude::*,
    types::{SCALAR_NAMESPACE, Scalar},
};

/// Conventional suffix stripped from annotation type names when rendered.
pub const ANNOTATION_SUFFIX: &str = "Attribute";

/// Type name of the `System.Type` value carried by type-valued arguments.
pub const TYPE_VALUE_NAME: &str = "Type";

///
/// Annotation
///
/// Non-structural metadata attached to a contract or property, rendered
/// verbatim into the generated declarations.
///

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Annotation {
    #[serde(rename = "type")]
    pub ty: TypeRef,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<AnnotationArg>,
}

impl Annotation {
    #[must_use]
    pub const fn new(ty: TypeRef) -> Self {
        Self {
            ty,
            args: Vec::new(),
        }
    }

    /// Append a positional argument.
    #[must_use]
    pub fn arg(mut self, value: ArgValue) -> Self {
        self.args.push(AnnotationArg { name: None, value });
        self
    }

    /// Append a named argument.
    #[must_use]
    pub fn named_arg(mut self, name: &str, value: ArgValue) -> Self {
        self.args.push(AnnotationArg {
            name: Some(name.to_string()),
            value,
        });
        self
    }

    /// Type name without namespace and without the `Attribute` suffix.
    #[must_use]
    pub fn display_name(&self) -> &str {
        let Some(named) = self.ty.as_named() else {
            return crate::type_ref::SELF_KEYWORD;
        };

        match named.name.strip_suffix(ANNOTATION_SUFFIX) {
            Some(stripped) if !stripped.is_empty() => stripped,
            _ => &named.name,
        }
    }

    /// Whether this annotation's display name equals `name`.
    #[must_use]
    pub fn is(&self, name: &str) -> bool {
        self.display_name() == name
    }

    pub fn positional_args(&self) -> impl Iterator<Item = &ArgValue> {
        self.args
            .iter()
            .filter(|arg| arg.name.is_none())
            .map(|arg| &arg.value)
    }

    pub fn named_args(&self) -> impl Iterator<Item = (&str, &ArgValue)> {
        self.args
            .iter()
            .filter_map(|arg| arg.name.as_deref().map(|name| (name, &arg.value)))
    }
}

///
/// AnnotationArg
///

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct AnnotationArg {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    pub value: ArgValue,
}

///
/// ArgValue
///
/// A typed annotation argument value.
///

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ArgValue {
    Bool(bool),
    Char(char),
    Enum {
        #[serde(rename = "type")]
        ty: TypeRef,
        variant: String,
    },
    Float(f64),
    Int(i64),
    Text(String),
    Type(TypeRef),
}

impl ArgValue {
    /// The type of the value itself (not the type a `Type` value names).
    #[must_use]
    pub fn value_type(&self) -> TypeRef {
        match self {
            Self::Bool(_) => TypeRef::scalar(Scalar::Bool),
            Self::Char(_) => TypeRef::scalar(Scalar::Char),
            Self::Enum { ty, .. } => ty.clone(),
            Self::Float(_) => TypeRef::scalar(Scalar::Float64),
            Self::Int(v) => {
                if i32::try_from(*v).is_ok() {
                    TypeRef::scalar(Scalar::Int32)
                } else {
                    TypeRef::scalar(Scalar::Int64)
                }
            }
            Self::Text(_) => TypeRef::scalar(Scalar::Text),
            Self::Type(_) => TypeRef::named(Some(SCALAR_NAMESPACE), TYPE_VALUE_NAME),
        }
    }

    /// The type named by a type-valued argument.
    #[must_use]
    pub const fn type_value(&self) -> Option<&TypeRef> {
        match self {
            Self::Type(ty) => Some(ty),
            _ => None,
        }
    }
}

///
/// TESTS
///
