use crate::{
    MAX_TYPE_DEPTH, SchemaError,
    prelude::*,
    types::{SCALAR_NAMESPACE, Scalar},
};
use std::{
    fmt::{self, Display},
    str::FromStr,
};

/// Type name of the nullable wrapper inside [`SCALAR_NAMESPACE`].
pub const NULLABLE_TYPE_NAME: &str = "Nullable";

/// Keyword that denotes the enclosing constructed type in an argument list.
pub const SELF_KEYWORD: &str = "Self";

///
/// TypeRef
///
/// Reference to a declared type. Parsed from (and rendered back to) a type
/// expression such as `System.Collections.Generic.List<string>` or `int?`.
///

#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(try_from = "String", into = "String")]
pub enum TypeRef {
    Named(NamedType),

    /// The enclosing constructed type, used as one of its own arguments.
    SelfRef,
}

impl TypeRef {
    #[must_use]
    pub fn named(namespace: Option<&str>, name: &str) -> Self {
        Self::generic(namespace, name, Vec::new())
    }

    #[must_use]
    pub fn generic(namespace: Option<&str>, name: &str, args: Vec<Self>) -> Self {
        Self::Named(NamedType {
            namespace: namespace.map(ToString::to_string),
            name: name.to_string(),
            args,
        })
    }

    #[must_use]
    pub fn scalar(scalar: Scalar) -> Self {
        Self::named(Some(SCALAR_NAMESPACE), scalar.type_name())
    }

    #[must_use]
    pub fn nullable(inner: Self) -> Self {
        Self::generic(Some(SCALAR_NAMESPACE), NULLABLE_TYPE_NAME, vec![inner])
    }

    #[must_use]
    pub const fn as_named(&self) -> Option<&NamedType> {
        match self {
            Self::Named(named) => Some(named),
            Self::SelfRef => None,
        }
    }

    #[must_use]
    pub fn namespace(&self) -> Option<&str> {
        self.as_named().and_then(|named| named.namespace.as_deref())
    }

    /// The `T` of a `Nullable<T>`, if this is one.
    #[must_use]
    pub fn nullable_inner(&self) -> Option<&Self> {
        let named = self.as_named()?;
        let is_nullable = named.namespace.as_deref() == Some(SCALAR_NAMESPACE)
            && named.name == NULLABLE_TYPE_NAME
            && named.args.len() == 1;

        is_nullable.then(|| &named.args[0])
    }

    /// The well-known scalar this type names, if any.
    #[must_use]
    pub fn scalar_kind(&self) -> Option<Scalar> {
        let named = self.as_named()?;
        if named.is_constructed() {
            return None;
        }

        Scalar::from_type_name(named.namespace.as_deref(), &named.name)
    }
}

impl Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(named) => named.fmt(f),
            Self::SelfRef => f.write_str(SELF_KEYWORD),
        }
    }
}

impl From<TypeRef> for String {
    fn from(ty: TypeRef) -> Self {
        ty.to_string()
    }
}

impl TryFrom<String> for TypeRef {
    type Error = SchemaError;

    fn try_from(expr: String) -> Result<Self, Self::Error> {
        expr.parse()
    }
}

impl FromStr for TypeRef {
    type Err = SchemaError;

    fn from_str(expr: &str) -> Result<Self, Self::Err> {
        let mut parser = Parser::new(expr);
        let ty = parser.parse_type(0)?;
        parser.skip_ws();

        if parser.pos < parser.src.len() {
            return Err(parser.error(format!("unexpected trailing input at {}", parser.pos)));
        }

        Ok(ty)
    }
}

///
/// NamedType
///

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct NamedType {
    pub namespace: Option<String>,
    pub name: String,
    pub args: Vec<TypeRef>,
}

impl NamedType {
    /// Whether this is a constructed generic (has concrete arguments).
    #[must_use]
    pub const fn is_constructed(&self) -> bool {
        !self.args.is_empty()
    }

    /// `Namespace.Name`, or just `Name` without a namespace.
    #[must_use]
    pub fn qualified_name(&self) -> String {
        match &self.namespace {
            Some(ns) => format!("{ns}.{}", self.name),
            None => self.name.clone(),
        }
    }
}

impl Display for NamedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.qualified_name())?;

        if self.is_constructed() {
            f.write_str("<")?;
            for (i, arg) in self.args.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                arg.fmt(f)?;
            }
            f.write_str(">")?;
        }

        Ok(())
    }
}

///
/// Parser
///
/// Recursive-descent parser for type expressions:
///
///   type  := path ( '<' type ( ',' type )* '>' )? '?'?
///   path  := ident ( '.' ident )*
///

struct Parser<'a> {
    expr: &'a str,
    src: &'a [u8],
    pos: usize,
}

impl<'a> Parser<'a> {
    const fn new(expr: &'a str) -> Self {
        Self {
            expr,
            src: expr.as_bytes(),
            pos: 0,
        }
    }

    fn error(&self, reason: impl Into<String>) -> SchemaError {
        SchemaError::type_expr(self.expr, reason)
    }

    fn skip_ws(&mut self) {
        while self.pos < self.src.len() && self.src[self.pos].is_ascii_whitespace() {
            self.pos += 1;
        }
    }

    fn peek(&mut self) -> Option<u8> {
        self.skip_ws();
        self.src.get(self.pos).copied()
    }

    fn eat(&mut self, byte: u8) -> bool {
        if self.peek() == Some(byte) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn parse_type(&mut self, depth: usize) -> Result<TypeRef, SchemaError> {
        if depth > MAX_TYPE_DEPTH {
            return Err(self.error(format!(
                "type arguments nested deeper than {MAX_TYPE_DEPTH} levels"
            )));
        }

        let segments = self.parse_path()?;

        let mut args = Vec::new();
        if self.eat(b'<') {
            loop {
                args.push(self.parse_type(depth + 1)?);
                if self.eat(b',') {
                    continue;
                }
                if self.eat(b'>') {
                    break;
                }
                return Err(self.error("expected ',' or '>' in type argument list"));
            }
        }

        let ty = Self::resolve(segments, args).map_err(|reason| self.error(reason))?;

        if self.eat(b'?') {
            if self.peek() == Some(b'?') {
                return Err(self.error("nested nullable types are not supported"));
            }
            return Ok(TypeRef::nullable(ty));
        }

        Ok(ty)
    }

    fn parse_path(&mut self) -> Result<Vec<&'a str>, SchemaError> {
        let mut segments = vec![self.parse_ident()?];
        while self.eat(b'.') {
            segments.push(self.parse_ident()?);
        }

        Ok(segments)
    }

    fn parse_ident(&mut self) -> Result<&'a str, SchemaError> {
        self.skip_ws();
        let start = self.pos;

        match self.src.get(self.pos) {
            Some(b) if b.is_ascii_alphabetic() || *b == b'_' => self.pos += 1,
            Some(_) => return Err(self.error(format!("expected identifier at {start}"))),
            None => return Err(self.error("unexpected end of type expression")),
        }

        while self
            .src
            .get(self.pos)
            .is_some_and(|b| b.is_ascii_alphanumeric() || *b == b'_')
        {
            self.pos += 1;
        }

        Ok(&self.expr[start..self.pos])
    }

    // resolve
    // turn a parsed path + arguments into a TypeRef, expanding aliases
    fn resolve(mut segments: Vec<&str>, args: Vec<TypeRef>) -> Result<TypeRef, String> {
        let name = segments.pop().unwrap_or_default();

        if segments.is_empty() && args.is_empty() {
            if name == SELF_KEYWORD {
                return Ok(TypeRef::SelfRef);
            }
            if let Some(scalar) = Scalar::from_alias(name) {
                return Ok(TypeRef::scalar(scalar));
            }
        }

        if name == SELF_KEYWORD {
            return Err(format!("'{SELF_KEYWORD}' cannot be qualified or parametrized"));
        }

        let namespace = (!segments.is_empty()).then(|| segments.join("."));

        Ok(TypeRef::generic(namespace.as_deref(), name, args))
    }
}

///
/// TESTS
///
