//! Type construction.
//!
//! Every composite type is built here. Union and intersection construction
//! normalizes once, at construction time:
//!
//! - nested unions (intersections) are flattened,
//! - structurally equal members are deduplicated (first occurrence wins, so
//!   rendering follows the order the caller wrote),
//! - `never` members are dropped from unions,
//! - a literal is absorbed by its base primitive (`"a" | string` is `string`),
//! - a union containing `any` is `any`,
//! - a single surviving member is returned unwrapped.
//!
//! Intersections stay algebraic: `{a: string} & {b: number}` is not merged into
//! one object here. See `objects::merge` for the explicit merge.

use crate::types::*;
use indexmap::IndexMap;
use smallvec::SmallVec;
use std::sync::Arc;
use tracing::trace;
use tyck_common::Atom;

type TypeListBuffer = SmallVec<[Type; 8]>;

impl Type {
    // -------------------------------------------------------------------------
    // Literals
    // -------------------------------------------------------------------------

    pub fn string_literal(value: impl Into<Atom>) -> Type {
        Type::Literal(LiteralValue::String(value.into()))
    }

    pub fn number_literal(value: f64) -> Type {
        Type::Literal(LiteralValue::Number(OrderedFloat(value)))
    }

    pub fn boolean_literal(value: bool) -> Type {
        Type::Literal(LiteralValue::Boolean(value))
    }

    // -------------------------------------------------------------------------
    // Composites
    // -------------------------------------------------------------------------

    pub fn array(element: Type) -> Type {
        Type::Array(Arc::new(element))
    }

    pub fn tuple(elements: impl IntoIterator<Item = Type>) -> Type {
        Type::Tuple(elements.into_iter().collect())
    }

    pub fn record(key: Type, value: Type) -> Type {
        Type::Record(Arc::new(RecordType { key, value }))
    }

    pub fn object(shape: ObjectShape) -> Type {
        Type::Object(Arc::new(shape))
    }

    pub fn alias(name: impl Into<Atom>) -> Type {
        Type::Alias(name.into())
    }

    pub fn keyof(subject: Type) -> Type {
        Type::Keyof(Arc::new(subject))
    }

    pub fn predicate(param_name: impl Into<Atom>, guard: Type) -> Type {
        Type::Predicate(Arc::new(TypePredicate {
            param_name: param_name.into(),
            guard,
        }))
    }

    /// The wildcard function type, compatible with every function.
    pub fn any_function() -> Type {
        Type::Function(Arc::new(FunctionShape::AnyArity))
    }

    pub fn function(params: impl IntoIterator<Item = Type>, return_type: Type) -> Type {
        Type::generic_function(Vec::new(), params, return_type)
    }

    pub fn generic_function(
        type_params: Vec<TypeParam>,
        params: impl IntoIterator<Item = Type>,
        return_type: Type,
    ) -> Type {
        Type::Function(Arc::new(FunctionShape::Signature(FunctionSignature {
            type_params,
            params: params.into_iter().collect(),
            return_type,
        })))
    }

    // -------------------------------------------------------------------------
    // Unions
    // -------------------------------------------------------------------------

    /// Build a normalized union. An empty input is `never`.
    pub fn union(members: impl IntoIterator<Item = Type>) -> Type {
        let mut flat: TypeListBuffer = SmallVec::new();
        for member in members {
            push_union_member(&mut flat, member);
        }
        normalize_union(flat)
    }

    pub fn union2(left: Type, right: Type) -> Type {
        Type::union([left, right])
    }

    // -------------------------------------------------------------------------
    // Intersections
    // -------------------------------------------------------------------------

    /// Build a normalized intersection. An empty input is `any`.
    pub fn intersection(members: impl IntoIterator<Item = Type>) -> Type {
        let mut flat: TypeListBuffer = SmallVec::new();
        for member in members {
            push_intersection_member(&mut flat, member);
        }
        normalize_intersection(flat)
    }

    pub fn intersection2(left: Type, right: Type) -> Type {
        Type::intersection([left, right])
    }
}

fn push_union_member(flat: &mut TypeListBuffer, member: Type) {
    match member {
        Type::Union(inner) => {
            for m in inner.iter() {
                push_unique(flat, m.clone());
            }
        }
        other => push_unique(flat, other),
    }
}

fn push_intersection_member(flat: &mut TypeListBuffer, member: Type) {
    match member {
        Type::Intersection(inner) => {
            for m in inner.iter() {
                push_unique(flat, m.clone());
            }
        }
        other => push_unique(flat, other),
    }
}

fn push_unique(flat: &mut TypeListBuffer, member: Type) {
    if !flat.contains(&member) {
        flat.push(member);
    }
}

fn normalize_union(mut flat: TypeListBuffer) -> Type {
    // If any member is `any`, the union is `any`
    if flat.iter().any(Type::is_any) {
        trace!("union contains any, collapsing");
        return Type::ANY;
    }
    flat.retain(|member| !member.is_never());

    absorb_literals_into_primitives(&mut flat);

    match flat.len() {
        0 => Type::NEVER,
        1 => flat.remove(0),
        _ => Type::Union(TypeList::from_vec(flat.into_vec())),
    }
}

/// Remove literal members whose base primitive is also a member.
/// e.g., "a" | string | number => string | number
/// e.g., true | boolean => boolean
fn absorb_literals_into_primitives(flat: &mut TypeListBuffer) {
    let mut has_string = false;
    let mut has_number = false;
    let mut has_boolean = false;

    for member in flat.iter() {
        match member {
            Type::Primitive(PrimitiveKind::String) => has_string = true,
            Type::Primitive(PrimitiveKind::Number) => has_number = true,
            Type::Primitive(PrimitiveKind::Boolean) => has_boolean = true,
            _ => {}
        }
    }
    if !(has_string || has_number || has_boolean) {
        return;
    }

    flat.retain(|member| {
        let Type::Literal(literal) = member else {
            return true;
        };
        match literal.base() {
            PrimitiveKind::String => !has_string,
            PrimitiveKind::Number => !has_number,
            PrimitiveKind::Boolean => !has_boolean,
            _ => true,
        }
    });
}

fn normalize_intersection(flat: TypeListBuffer) -> Type {
    if flat.iter().any(Type::is_never) {
        return Type::NEVER;
    }
    if flat.iter().any(Type::is_any) {
        return Type::ANY;
    }
    let mut flat = flat;
    match flat.len() {
        0 => Type::ANY,
        1 => flat.remove(0),
        _ => Type::Intersection(TypeList::from_vec(flat.into_vec())),
    }
}

// =============================================================================
// ObjectBuilder
// =============================================================================

/// Builder for object shapes.
///
/// ```ignore
/// let point = ObjectBuilder::new()
///     .property("x", Type::NUMBER)
///     .optional_property("label", Type::STRING)
///     .build();
/// ```
#[derive(Clone, Debug, Default)]
pub struct ObjectBuilder {
    shape: ObjectShape,
}

impl ObjectBuilder {
    pub fn new() -> Self {
        ObjectBuilder::default()
    }

    /// Start a builder for the type of an object literal expression.
    pub fn fresh_literal() -> Self {
        let mut builder = ObjectBuilder::default();
        builder.shape.flags |= ObjectFlags::FRESH_LITERAL;
        builder
    }

    /// Add a required property. Redeclaring a name replaces its type but keeps
    /// its original position.
    #[must_use]
    pub fn property(mut self, name: impl Into<Atom>, ty: Type) -> Self {
        self.shape
            .properties
            .insert(name.into(), PropertyInfo::required(ty));
        self
    }

    #[must_use]
    pub fn optional_property(mut self, name: impl Into<Atom>, ty: Type) -> Self {
        self.shape
            .properties
            .insert(name.into(), PropertyInfo::optional(ty));
        self
    }

    #[must_use]
    pub fn index_signature(mut self, key_type: Type, value_type: Type) -> Self {
        self.shape.index_signature = Some(IndexSignature {
            key_type,
            value_type,
        });
        self
    }

    #[must_use]
    pub fn class_name(mut self, name: impl Into<Atom>) -> Self {
        self.shape.class_name = Some(name.into());
        self
    }

    pub fn build_shape(self) -> ObjectShape {
        self.shape
    }

    pub fn build(self) -> Type {
        Type::object(self.shape)
    }
}

impl ObjectShape {
    /// Build a shape from `(name, type)` pairs, all required.
    pub fn from_properties<N: Into<Atom>>(properties: impl IntoIterator<Item = (N, Type)>) -> Self {
        let properties: IndexMap<Atom, PropertyInfo> = properties
            .into_iter()
            .map(|(name, ty)| (name.into(), PropertyInfo::required(ty)))
            .collect();
        ObjectShape {
            properties,
            ..ObjectShape::default()
        }
    }
}
