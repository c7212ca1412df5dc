//! Type rendering.
//!
//! `Display` output is embedded verbatim in diagnostic messages, so it must
//! be deterministic: object properties render in declaration order and
//! union/intersection members in construction order.

use crate::types::*;
use std::fmt::{self, Display, Formatter, Write};

impl Display for Type {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Type::Primitive(kind) => f.write_str(kind.keyword()),
            Type::Literal(value) => value.fmt(f),
            Type::Array(element) => {
                write_wrapped(f, element, needs_parens_as_element(element))?;
                f.write_str("[]")
            }
            Type::Tuple(elements) => {
                f.write_char('[')?;
                write_joined(f, elements.iter(), ", ")?;
                f.write_char(']')
            }
            Type::Object(shape) => shape.fmt(f),
            Type::Record(record) => write!(f, "Record<{}, {}>", record.key, record.value),
            Type::Union(members) => {
                for (i, member) in members.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" | ")?;
                    }
                    write_wrapped(f, member, matches!(member, Type::Function(_)))?;
                }
                Ok(())
            }
            Type::Intersection(members) => {
                for (i, member) in members.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" & ")?;
                    }
                    let parens = matches!(member, Type::Union(_) | Type::Function(_));
                    write_wrapped(f, member, parens)?;
                }
                Ok(())
            }
            Type::Function(shape) => shape.fmt(f),
            Type::Alias(name) => f.write_str(name),
            Type::Keyof(subject) => {
                f.write_str("keyof ")?;
                write_wrapped(f, subject, needs_parens_as_element(subject))
            }
            Type::Predicate(predicate) => {
                write!(f, "{} is {}", predicate.param_name, predicate.guard)
            }
        }
    }
}

impl Display for LiteralValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            LiteralValue::String(s) => write!(f, "\"{s}\""),
            LiteralValue::Number(n) => write!(f, "{}", n.0),
            LiteralValue::Boolean(b) => write!(f, "{b}"),
        }
    }
}

impl Display for ObjectShape {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if let Some(class_name) = &self.class_name {
            return f.write_str(class_name);
        }
        if self.is_empty() {
            return f.write_str("{}");
        }
        f.write_char('{')?;
        let mut first = true;
        for (name, prop) in &self.properties {
            if !first {
                f.write_str(", ")?;
            }
            first = false;
            let marker = if prop.optional { "?" } else { "" };
            write!(f, "{name}{marker}: {}", prop.ty)?;
        }
        if let Some(index) = &self.index_signature {
            if !first {
                f.write_str(", ")?;
            }
            write!(f, "[key: {}]: {}", index.key_type, index.value_type)?;
        }
        f.write_char('}')
    }
}

impl Display for FunctionShape {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            FunctionShape::AnyArity => f.write_str("function"),
            FunctionShape::Signature(sig) => sig.fmt(f),
        }
    }
}

impl Display for FunctionSignature {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.is_generic() {
            f.write_char('<')?;
            write_joined(f, self.type_params.iter(), ", ")?;
            f.write_char('>')?;
        }
        f.write_char('(')?;
        for (i, param) in self.params.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "p{i}: {param}")?;
        }
        write!(f, ") => {}", self.return_type)
    }
}

impl Display for TypeParam {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match &self.constraint {
            Some(constraint) => write!(f, "{} extends {constraint}", self.name),
            None => f.write_str(&self.name),
        }
    }
}

fn needs_parens_as_element(ty: &Type) -> bool {
    matches!(
        ty,
        Type::Union(_) | Type::Intersection(_) | Type::Function(_) | Type::Keyof(_)
    )
}

fn write_wrapped(f: &mut Formatter<'_>, ty: &Type, parens: bool) -> fmt::Result {
    if parens { write!(f, "({ty})") } else { write!(f, "{ty}") }
}

fn write_joined<'a, T: Display + 'a>(
    f: &mut Formatter<'_>,
    items: impl Iterator<Item = &'a T>,
    separator: &str,
) -> fmt::Result {
    for (i, item) in items.enumerate() {
        if i > 0 {
            f.write_str(separator)?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}
