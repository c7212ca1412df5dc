//! Literal and freshness widening.
//!
//! - `widen_literal`: `"a"` becomes `string`, `1 | 2` becomes `number`.
//! - `widen_freshness`: the type of an object literal loses its freshness
//!   once the literal is bound to a variable, so later uses of the variable
//!   go through ordinary structural compatibility without excess checks.

use crate::types::*;
use std::sync::Arc;

/// Widen literal types to their base primitive. Unions widen member-wise and
/// renormalize; every other type is returned unchanged.
pub fn widen_literal(ty: &Type) -> Type {
    match ty {
        Type::Literal(literal) => Type::Primitive(literal.base()),
        Type::Union(members) => Type::union(members.iter().map(widen_literal)),
        _ => ty.clone(),
    }
}

/// Strip `FRESH_LITERAL` from every object literal type reachable through
/// properties, arrays, tuples and unions.
pub fn widen_freshness(ty: &Type) -> Type {
    match ty {
        Type::Object(shape) => {
            let needs_rewrite = shape.is_fresh_literal()
                || shape.properties.values().any(|p| contains_fresh(&p.ty));
            if !needs_rewrite {
                return ty.clone();
            }
            let mut shape = shape.as_ref().clone();
            shape.flags.remove(ObjectFlags::FRESH_LITERAL);
            for prop in shape.properties.values_mut() {
                prop.ty = widen_freshness(&prop.ty);
            }
            Type::Object(Arc::new(shape))
        }
        Type::Array(element) if contains_fresh(element) => Type::array(widen_freshness(element)),
        Type::Tuple(elements) if elements.iter().any(contains_fresh) => {
            Type::tuple(elements.iter().map(widen_freshness))
        }
        Type::Union(members) if members.iter().any(contains_fresh) => {
            Type::union(members.iter().map(widen_freshness))
        }
        _ => ty.clone(),
    }
}

fn contains_fresh(ty: &Type) -> bool {
    match ty {
        Type::Object(shape) => {
            shape.is_fresh_literal() || shape.properties.values().any(|p| contains_fresh(&p.ty))
        }
        Type::Array(element) => contains_fresh(element),
        Type::Tuple(elements) => elements.iter().any(contains_fresh),
        Type::Union(members) => members.iter().any(contains_fresh),
        _ => false,
    }
}

#[cfg(test)]
#[path = "../tests/widening_tests.rs"]
mod tests;
