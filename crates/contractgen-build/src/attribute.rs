use contractgen_core::{Error, format::format_default};
use contractgen_schema::prelude::*;
use std::fmt::Write as _;

/// Render `[Name]` or `[Name(positional, Named = value)]`.
///
/// `owner` names the member (or contract) the annotation is attached to and
/// is reported if a type-valued argument cannot be formatted.
pub(crate) fn render_annotation(
    annotation: &Annotation,
    contract: &str,
    owner: &str,
) -> Result<String, Error> {
    let mut out = format!("[{}", annotation.display_name());

    if !annotation.args.is_empty() {
        let mut args = Vec::with_capacity(annotation.args.len());
        for value in annotation.positional_args() {
            args.push(render_value(value, contract, owner)?);
        }
        for (name, value) in annotation.named_args() {
            args.push(format!("{name} = {}", render_value(value, contract, owner)?));
        }

        let _ = write!(out, "({})", args.join(", "));
    }
    out.push(']');

    Ok(out)
}

fn render_value(value: &ArgValue, contract: &str, owner: &str) -> Result<String, Error> {
    let type_name = |ty: &TypeRef| {
        format_default(ty).map_err(|e| Error::UnsupportedTypeShape {
            contract: contract.to_string(),
            property: owner.to_string(),
            ty: e.ty,
            reason: e.reason,
        })
    };

    let rendered = match value {
        ArgValue::Bool(v) => v.to_string(),
        ArgValue::Char(c) => char_literal(*c),
        ArgValue::Enum { ty, variant } => format!("{}.{variant}", type_name(ty)?),
        ArgValue::Float(v) => float_literal(*v),
        ArgValue::Int(v) => v.to_string(),
        ArgValue::Text(s) => text_literal(s),
        ArgValue::Type(ty) => format!("typeof({})", type_name(ty)?),
    };

    Ok(rendered)
}

fn escape_into(out: &mut String, c: char, quote: char) {
    match c {
        '\\' => out.push_str("\\\\"),
        '\n' => out.push_str("\\n"),
        '\r' => out.push_str("\\r"),
        '\t' => out.push_str("\\t"),
        '\0' => out.push_str("\\0"),
        c if c == quote => {
            out.push('\\');
            out.push(c);
        }
        c if c.is_control() => {
            let _ = write!(out, "\\u{:04X}", u32::from(c));
        }
        c => out.push(c),
    }
}

pub(crate) fn text_literal(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        escape_into(&mut out, c, '"');
    }
    out.push('"');

    out
}

pub(crate) fn char_literal(c: char) -> String {
    let mut out = String::from("'");
    escape_into(&mut out, c, '\'');
    out.push('\'');

    out
}

fn float_literal(v: f64) -> String {
    if v.is_nan() {
        "double.NaN".to_string()
    } else if v.is_infinite() {
        if v > 0.0 {
            "double.PositiveInfinity".to_string()
        } else {
            "double.NegativeInfinity".to_string()
        }
    } else {
        format!("{v:?}")
    }
}

///
/// TESTS
///
