//! Generic type instantiation and substitution.
//!
//! Substitution rewrites every `Alias(name)` bound in a [`TypeSubstitution`]
//! with its binding. Names that are not bound (ordinary aliases) pass through
//! untouched, and the any-arity function is returned unchanged.
//!
//! Unions and intersections are rebuilt through the normalizing constructors,
//! so `T | string` with `T = "a"` becomes `string`.
//!
//! Substituting into a generic function instantiates it: parameters bound by
//! the substitution are removed from its type parameter list, so
//! `<T>(p0: T) => T` with `T = number` becomes `(p0: number) => number`.

use crate::types::*;
use rustc_hash::FxHashMap;
use std::sync::Arc;
use tracing::trace;
use tyck_common::Atom;
use tyck_common::limits::{STACK_GROWTH_SIZE, STACK_RED_ZONE};

/// A mapping from type parameter names to their bindings.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TypeSubstitution {
    map: FxHashMap<Atom, Type>,
}

impl TypeSubstitution {
    pub fn new() -> Self {
        TypeSubstitution::default()
    }

    /// Bind `params[i]` to `args[i]`. Parameters without an argument bind to
    /// `any`.
    pub fn from_args(params: &[TypeParam], args: &[Type]) -> Self {
        let mut map = FxHashMap::default();
        for (i, param) in params.iter().enumerate() {
            let arg = args.get(i).cloned().unwrap_or(Type::ANY);
            map.insert(param.name.clone(), arg);
        }
        TypeSubstitution { map }
    }

    pub fn insert(&mut self, name: impl Into<Atom>, ty: Type) {
        self.map.insert(name.into(), ty);
    }

    pub fn get(&self, name: &str) -> Option<&Type> {
        self.map.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.map.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Atom, &Type)> {
        self.map.iter()
    }

    pub fn into_map(self) -> FxHashMap<Atom, Type> {
        self.map
    }
}

impl From<FxHashMap<Atom, Type>> for TypeSubstitution {
    fn from(map: FxHashMap<Atom, Type>) -> Self {
        TypeSubstitution { map }
    }
}

impl From<&TypeSubstitution> for TypeSubstitution {
    fn from(substitution: &TypeSubstitution) -> Self {
        substitution.clone()
    }
}

impl<N: Into<Atom>> From<Vec<(N, Type)>> for TypeSubstitution {
    fn from(pairs: Vec<(N, Type)>) -> Self {
        pairs.into_iter().collect()
    }
}

impl<N: Into<Atom>, const K: usize> From<[(N, Type); K]> for TypeSubstitution {
    fn from(pairs: [(N, Type); K]) -> Self {
        pairs.into_iter().collect()
    }
}

impl<N: Into<Atom>> FromIterator<(N, Type)> for TypeSubstitution {
    fn from_iter<I: IntoIterator<Item = (N, Type)>>(iter: I) -> Self {
        TypeSubstitution {
            map: iter
                .into_iter()
                .map(|(name, ty)| (name.into(), ty))
                .collect(),
        }
    }
}

/// Replace every bound `Alias` in `ty` with its binding.
pub fn substitute_type_params(ty: &Type, substitution: &TypeSubstitution) -> Type {
    if substitution.is_empty() {
        return ty.clone();
    }
    trace!(bindings = substitution.len(), ty = %ty, "substitute");
    let mut instantiator = TypeInstantiator { substitution };
    instantiator.instantiate(ty)
}

/// [`substitute_type_params`] accepting any substitution-like value: a
/// [`TypeSubstitution`], an `FxHashMap<Atom, Type>`, or `(name, Type)` pairs.
pub fn substitute_type(ty: &Type, substitution: impl Into<TypeSubstitution>) -> Type {
    substitute_type_params(ty, &substitution.into())
}

/// Aliases are never resolved here, so the walk is bounded by the size of
/// the input tree.
struct TypeInstantiator<'a> {
    substitution: &'a TypeSubstitution,
}

impl TypeInstantiator<'_> {
    fn instantiate(&mut self, ty: &Type) -> Type {
        stacker::maybe_grow(STACK_RED_ZONE, STACK_GROWTH_SIZE, || self.instantiate_inner(ty))
    }

    fn instantiate_inner(&mut self, ty: &Type) -> Type {
        match ty {
            Type::Primitive(_) | Type::Literal(_) => ty.clone(),
            Type::Alias(name) => match self.substitution.get(name) {
                Some(binding) => binding.clone(),
                None => ty.clone(),
            },
            Type::Array(element) => Type::array(self.instantiate(element)),
            Type::Tuple(elements) => {
                let elements: Vec<Type> = elements.iter().map(|e| self.instantiate(e)).collect();
                Type::tuple(elements)
            }
            Type::Object(shape) => Type::object(self.instantiate_shape(shape)),
            Type::Record(record) => {
                Type::record(self.instantiate(&record.key), self.instantiate(&record.value))
            }
            Type::Union(members) => {
                let members: Vec<Type> = members.iter().map(|m| self.instantiate(m)).collect();
                Type::union(members)
            }
            Type::Intersection(members) => {
                let members: Vec<Type> = members.iter().map(|m| self.instantiate(m)).collect();
                Type::intersection(members)
            }
            Type::Keyof(subject) => Type::keyof(self.instantiate(subject)),
            Type::Predicate(predicate) => Type::Predicate(Arc::new(TypePredicate {
                param_name: predicate.param_name.clone(),
                guard: self.instantiate(&predicate.guard),
            })),
            Type::Function(shape) => match shape.as_ref() {
                FunctionShape::AnyArity => ty.clone(),
                FunctionShape::Signature(sig) => self.instantiate_signature(sig),
            },
        }
    }

    fn instantiate_shape(&mut self, shape: &ObjectShape) -> ObjectShape {
        let properties = shape
            .properties
            .iter()
            .map(|(name, prop)| {
                let info = PropertyInfo {
                    ty: self.instantiate(&prop.ty),
                    optional: prop.optional,
                };
                (name.clone(), info)
            })
            .collect();
        let index_signature = shape.index_signature.as_ref().map(|index| IndexSignature {
            key_type: self.instantiate(&index.key_type),
            value_type: self.instantiate(&index.value_type),
        });
        ObjectShape {
            flags: shape.flags,
            properties,
            index_signature,
            class_name: shape.class_name.clone(),
        }
    }

    fn instantiate_signature(&mut self, sig: &FunctionSignature) -> Type {
        let substitution = self.substitution;
        let type_params = sig
            .type_params
            .iter()
            .filter(|param| !substitution.contains(&param.name))
            .map(|param| TypeParam {
                name: param.name.clone(),
                constraint: param.constraint.as_ref().map(|c| self.instantiate(c)),
            })
            .collect();
        let params: Vec<Type> = sig.params.iter().map(|p| self.instantiate(p)).collect();
        let return_type = self.instantiate(&sig.return_type);
        Type::generic_function(type_params, params, return_type)
    }
}

#[cfg(test)]
#[path = "../tests/instantiate_tests.rs"]
mod tests;
