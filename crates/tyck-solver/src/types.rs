//! Type representation.
//!
//! `Type` is a closed, immutable value. Composite variants share their
//! children through `Arc`, so cloning a type is cheap and a type built once
//! can be handed to any number of queries.
//!
//! Equality is structural:
//! - union and intersection members compare as sets (order-independent),
//! - object properties compare as maps (order-independent, but iteration
//!   order is the declaration order and is what rendering and `keyof` use),
//! - tuple elements and function parameters compare positionally.
//!
//! Unions and intersections can only be built through the normalizing
//! constructors in `type_factory`, so their invariants hold for every value.

use bitflags::bitflags;
use indexmap::IndexMap;
use rustc_hash::FxHasher;
use std::hash::{Hash, Hasher};
use std::ops::Deref;
use std::sync::Arc;
use tyck_common::Atom;

// =============================================================================
// Primitives
// =============================================================================

/// The primitive (keyword) types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PrimitiveKind {
    String,
    Number,
    Boolean,
    Null,
    Undefined,
    Any,
    Never,
    Void,
}

impl PrimitiveKind {
    /// The keyword used to render this primitive.
    pub const fn keyword(self) -> &'static str {
        match self {
            PrimitiveKind::String => "string",
            PrimitiveKind::Number => "number",
            PrimitiveKind::Boolean => "boolean",
            PrimitiveKind::Null => "null",
            PrimitiveKind::Undefined => "undefined",
            PrimitiveKind::Any => "any",
            PrimitiveKind::Never => "never",
            PrimitiveKind::Void => "void",
        }
    }

    /// `null` and `undefined`.
    pub const fn is_nullish(self) -> bool {
        matches!(self, PrimitiveKind::Null | PrimitiveKind::Undefined)
    }
}

// =============================================================================
// Literals
// =============================================================================

/// An `f64` with total equality so literal types can be hashed.
///
/// `0.0` and `-0.0` are the same literal, and every NaN is the same literal.
#[derive(Clone, Copy, Debug)]
pub struct OrderedFloat(pub f64);

impl OrderedFloat {
    fn canonical_bits(self) -> u64 {
        if self.0 == 0.0 {
            0
        } else if self.0.is_nan() {
            f64::NAN.to_bits()
        } else {
            self.0.to_bits()
        }
    }
}

impl PartialEq for OrderedFloat {
    fn eq(&self, other: &Self) -> bool {
        self.canonical_bits() == other.canonical_bits()
    }
}

impl Eq for OrderedFloat {}

impl Hash for OrderedFloat {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.canonical_bits().hash(state);
    }
}

/// The exact value of a literal type. The base primitive follows from the
/// value kind.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum LiteralValue {
    String(Atom),
    Number(OrderedFloat),
    Boolean(bool),
}

impl LiteralValue {
    /// The primitive this literal widens to.
    pub const fn base(&self) -> PrimitiveKind {
        match self {
            LiteralValue::String(_) => PrimitiveKind::String,
            LiteralValue::Number(_) => PrimitiveKind::Number,
            LiteralValue::Boolean(_) => PrimitiveKind::Boolean,
        }
    }

    /// `false`, `0` and `""`.
    pub fn is_falsy(&self) -> bool {
        match self {
            LiteralValue::String(s) => s.is_empty(),
            LiteralValue::Number(n) => n.0 == 0.0 || n.0.is_nan(),
            LiteralValue::Boolean(b) => !*b,
        }
    }
}

// =============================================================================
// Type lists (union / intersection members)
// =============================================================================

/// Members of a union or intersection.
///
/// Constructed only by `type_factory`, after flattening and deduplication,
/// so equality can treat the list as a set.
#[derive(Clone, Debug)]
pub struct TypeList(Arc<[Type]>);

impl TypeList {
    pub(crate) fn from_vec(members: Vec<Type>) -> Self {
        debug_assert!(members.len() >= 2, "type lists hold at least two members");
        TypeList(Arc::from(members))
    }

    #[inline]
    pub fn members(&self) -> &[Type] {
        &self.0
    }
}

impl Deref for TypeList {
    type Target = [Type];

    fn deref(&self) -> &[Type] {
        &self.0
    }
}

impl PartialEq for TypeList {
    fn eq(&self, other: &Self) -> bool {
        self.0.len() == other.0.len() && self.0.iter().all(|member| other.0.contains(member))
    }
}

impl Eq for TypeList {}

impl Hash for TypeList {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.len().hash(state);
        unordered_hash(self.0.iter(), state);
    }
}

/// Hash a collection so that the result does not depend on iteration order.
fn unordered_hash<T: Hash, H: Hasher>(items: impl Iterator<Item = T>, state: &mut H) {
    let mut acc: u64 = 0;
    for item in items {
        let mut hasher = FxHasher::default();
        item.hash(&mut hasher);
        acc = acc.wrapping_add(hasher.finish());
    }
    state.write_u64(acc);
}

// =============================================================================
// Objects
// =============================================================================

bitflags! {
    /// Flags carried by object shapes. Flags never take part in equality.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct ObjectFlags: u8 {
        /// The shape is the type of an object literal expression that has not
        /// yet been bound to a variable.
        const FRESH_LITERAL = 1 << 0;
    }
}

/// A named property of an object shape.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PropertyInfo {
    pub ty: Type,
    pub optional: bool,
}

impl PropertyInfo {
    pub fn required(ty: Type) -> Self {
        PropertyInfo {
            ty,
            optional: false,
        }
    }

    pub fn optional(ty: Type) -> Self {
        PropertyInfo { ty, optional: true }
    }
}

/// `[key: K]: V`
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct IndexSignature {
    pub key_type: Type,
    pub value_type: Type,
}

/// The structure of an `Object` type.
#[derive(Clone, Debug, Default)]
pub struct ObjectShape {
    pub flags: ObjectFlags,
    /// Named properties in declaration order.
    pub properties: IndexMap<Atom, PropertyInfo>,
    pub index_signature: Option<IndexSignature>,
    /// Nominal tag for class instance types.
    pub class_name: Option<Atom>,
}

impl ObjectShape {
    pub fn property(&self, name: &str) -> Option<&PropertyInfo> {
        self.properties.get(name)
    }

    pub fn is_fresh_literal(&self) -> bool {
        self.flags.contains(ObjectFlags::FRESH_LITERAL)
    }

    /// No named properties and no index signature.
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty() && self.index_signature.is_none()
    }
}

impl PartialEq for ObjectShape {
    fn eq(&self, other: &Self) -> bool {
        self.properties == other.properties
            && self.index_signature == other.index_signature
            && self.class_name == other.class_name
    }
}

impl Eq for ObjectShape {}

impl Hash for ObjectShape {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.properties.len().hash(state);
        unordered_hash(self.properties.iter(), state);
        self.index_signature.hash(state);
        self.class_name.hash(state);
    }
}

/// `Record<K, V>`
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct RecordType {
    pub key: Type,
    pub value: Type,
}

// =============================================================================
// Functions
// =============================================================================

/// A generic type parameter with an optional `extends` constraint.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TypeParam {
    pub name: Atom,
    pub constraint: Option<Type>,
}

impl TypeParam {
    pub fn new(name: impl Into<Atom>) -> Self {
        TypeParam {
            name: name.into(),
            constraint: None,
        }
    }

    pub fn with_constraint(name: impl Into<Atom>, constraint: Type) -> Self {
        TypeParam {
            name: name.into(),
            constraint: Some(constraint),
        }
    }
}

/// A concrete call signature.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FunctionSignature {
    pub type_params: Vec<TypeParam>,
    pub params: Vec<Type>,
    pub return_type: Type,
}

impl FunctionSignature {
    pub fn is_generic(&self) -> bool {
        !self.type_params.is_empty()
    }
}

/// Function types. `AnyArity` is the wildcard accepting any parameter list;
/// it is rendered as `function`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum FunctionShape {
    AnyArity,
    Signature(FunctionSignature),
}

// =============================================================================
// Predicates
// =============================================================================

/// `param is T`, the return type of a boolean guard function.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TypePredicate {
    pub param_name: Atom,
    pub guard: Type,
}

// =============================================================================
// Type
// =============================================================================

/// The closed set of type variants.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Type {
    Primitive(PrimitiveKind),
    Literal(LiteralValue),
    Array(Arc<Type>),
    Tuple(Arc<[Type]>),
    Object(Arc<ObjectShape>),
    Record(Arc<RecordType>),
    Union(TypeList),
    Intersection(TypeList),
    Function(Arc<FunctionShape>),
    /// Unresolved reference into a `TypeAliasMap`.
    Alias(Atom),
    /// Unresolved `keyof` operator.
    Keyof(Arc<Type>),
    Predicate(Arc<TypePredicate>),
}

impl Type {
    pub const STRING: Type = Type::Primitive(PrimitiveKind::String);
    pub const NUMBER: Type = Type::Primitive(PrimitiveKind::Number);
    pub const BOOLEAN: Type = Type::Primitive(PrimitiveKind::Boolean);
    pub const NULL: Type = Type::Primitive(PrimitiveKind::Null);
    pub const UNDEFINED: Type = Type::Primitive(PrimitiveKind::Undefined);
    pub const ANY: Type = Type::Primitive(PrimitiveKind::Any);
    pub const NEVER: Type = Type::Primitive(PrimitiveKind::Never);
    pub const VOID: Type = Type::Primitive(PrimitiveKind::Void);

    #[inline]
    pub fn is_any(&self) -> bool {
        matches!(self, Type::Primitive(PrimitiveKind::Any))
    }

    #[inline]
    pub fn is_never(&self) -> bool {
        matches!(self, Type::Primitive(PrimitiveKind::Never))
    }

    #[inline]
    pub fn is_nullish(&self) -> bool {
        matches!(self, Type::Primitive(kind) if kind.is_nullish())
    }

    #[inline]
    pub fn is_union(&self) -> bool {
        matches!(self, Type::Union(_))
    }

    #[inline]
    pub fn is_literal(&self) -> bool {
        matches!(self, Type::Literal(_))
    }

    pub fn primitive_kind(&self) -> Option<PrimitiveKind> {
        match self {
            Type::Primitive(kind) => Some(*kind),
            _ => None,
        }
    }

    pub fn literal_value(&self) -> Option<&LiteralValue> {
        match self {
            Type::Literal(value) => Some(value),
            _ => None,
        }
    }

    pub fn object_shape(&self) -> Option<&ObjectShape> {
        match self {
            Type::Object(shape) => Some(shape),
            _ => None,
        }
    }

    pub fn alias_name(&self) -> Option<&Atom> {
        match self {
            Type::Alias(name) => Some(name),
            _ => None,
        }
    }

    /// Union members, or the type itself as a single-element slice.
    pub fn union_members(&self) -> &[Type] {
        match self {
            Type::Union(members) => members.members(),
            other => std::slice::from_ref(other),
        }
    }

    /// Whether this object type is the type of a fresh object literal.
    pub fn is_fresh_object_literal(&self) -> bool {
        matches!(self, Type::Object(shape) if shape.is_fresh_literal())
    }
}

#[cfg(test)]
#[path = "../tests/types_tests.rs"]
mod tests;
