//! Type narrowing for control-flow facts.
//!
//! Everything here is pure type algebra: the caller extracts a fact from the
//! syntax (an equality test, a `typeof` comparison, a guard call) and asks
//! for the type of the variable in the branch where the fact holds.
//!
//! ```text
//! x === "a"            -> TypeGuard::LiteralEquality("a")
//! typeof x === "string" -> TypeGuard::Typeof("string")
//! x == null            -> TypeGuard::NullishEquality
//! if (x)               -> TypeGuard::Truthy
//! isFoo(x)             -> TypeGuard::Predicate(Foo)
//! ```
//!
//! `narrow_type` and `exclude_type` split a union in two: for a target that
//! is a member, the two results are disjoint and together rebuild the union.

use crate::alias_map::TypeAliasMap;
use crate::subtype::CompatibilityChecker;
use crate::types::*;
use tracing::debug;
use tyck_common::Atom;

/// A narrowing condition, independent of the syntax it came from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TypeGuard {
    /// `typeof x === "name"`.
    Typeof(Atom),
    /// `x === literal`.
    LiteralEquality(Type),
    /// `x == null`, matching both `null` and `undefined`.
    NullishEquality,
    /// `x` in a condition.
    Truthy,
    /// A call to a guard function `(x) => x is T`, carrying `T`.
    Predicate(Type),
}

impl TypeGuard {
    /// The guard expressed by calling a function whose return type is
    /// `x is T`.
    pub fn from_predicate(return_type: &Type) -> Option<TypeGuard> {
        match return_type {
            Type::Predicate(predicate) => Some(TypeGuard::Predicate(predicate.guard.clone())),
            _ => None,
        }
    }
}

/// Narrowing bound to one alias map.
pub struct NarrowingContext<'a> {
    checker: CompatibilityChecker<'a>,
}

impl<'a> NarrowingContext<'a> {
    pub fn new(aliases: &'a TypeAliasMap) -> Self {
        NarrowingContext {
            checker: CompatibilityChecker::new(aliases),
        }
    }

    /// Members of `source` that match `target`.
    pub fn narrow_to_type(&mut self, source: &Type, target: &Type) -> Type {
        let source = self.checker.resolve(source);
        if source.is_any() {
            return target.clone();
        }
        let kept: Vec<Type> = source
            .union_members()
            .iter()
            .filter(|member| *member == target || self.checker.is_compatible(member, target))
            .cloned()
            .collect();
        let narrowed = Type::union(kept);
        debug!(source = %source, target = %target, narrowed = %narrowed, "narrow");
        narrowed
    }

    /// `source` without the members that match `target`. A target that is not
    /// a member leaves the source unchanged.
    pub fn narrow_excluding_type(&mut self, source: &Type, target: &Type) -> Type {
        let resolved = self.checker.resolve(source);
        if resolved.is_any() || !resolved.union_members().contains(target) {
            return source.clone();
        }
        let kept: Vec<Type> = resolved
            .union_members()
            .iter()
            .filter(|member| !self.checker.is_compatible(member, target))
            .cloned()
            .collect();
        let remaining = Type::union(kept);
        debug!(source = %resolved, target = %target, remaining = %remaining, "exclude");
        remaining
    }

    /// The type of `source` in the branch where `guard` is `sense`.
    pub fn narrow_by_guard(&mut self, source: &Type, guard: &TypeGuard, sense: bool) -> Type {
        match guard {
            TypeGuard::Typeof(name) => self.narrow_by_typeof_with_sense(source, name, sense),
            TypeGuard::LiteralEquality(literal) => {
                if sense {
                    self.narrow_to_literal(source, literal)
                } else {
                    self.narrow_excluding_literal(source, literal)
                }
            }
            TypeGuard::NullishEquality => {
                if sense {
                    self.narrow_to_nullish(source)
                } else {
                    remove_nullish(&self.checker.resolve(source))
                }
            }
            TypeGuard::Truthy => {
                if sense {
                    self.narrow_by_truthiness(source)
                } else {
                    self.narrow_to_falsy(source)
                }
            }
            TypeGuard::Predicate(guard_type) => {
                if sense {
                    let narrowed = self.narrow_to_type(source, guard_type);
                    if narrowed.is_never() {
                        // `x is Dog` on `Animal`: the guard refines the source.
                        let source = self.checker.resolve(source);
                        if self.checker.is_compatible(guard_type, &source) {
                            return guard_type.clone();
                        }
                    }
                    narrowed
                } else {
                    let resolved = self.checker.resolve(source);
                    if resolved.is_any() {
                        return resolved;
                    }
                    self.filter_members(&resolved, |ctx, member| {
                        !ctx.checker.is_compatible(member, guard_type)
                    })
                }
            }
        }
    }

    /// Members of `source` whose runtime `typeof` is `type_name`.
    pub fn narrow_by_typeof(&mut self, source: &Type, type_name: &str) -> Type {
        self.narrow_by_typeof_with_sense(source, type_name, true)
    }

    fn narrow_by_typeof_with_sense(&mut self, source: &Type, type_name: &str, sense: bool) -> Type {
        let resolved = self.checker.resolve(source);
        if resolved.is_any() {
            return if sense {
                typeof_any_type(type_name).unwrap_or(Type::ANY)
            } else {
                Type::ANY
            };
        }
        self.filter_members(&resolved, |ctx, member| {
            let member = ctx.checker.resolve(member);
            typeof_matches(&member, type_name) == sense
        })
    }

    fn narrow_to_literal(&mut self, source: &Type, literal: &Type) -> Type {
        let resolved = self.checker.resolve(source);
        if resolved.is_any() {
            return literal.clone();
        }
        let mut matched = false;
        let mut kept = Vec::new();
        for member in resolved.union_members() {
            if member == literal {
                matched = true;
                kept.push(member.clone());
            } else if self.checker.is_compatible(literal, member) {
                matched = true;
                kept.push(literal.clone());
            }
        }
        if !matched {
            return Type::NEVER;
        }
        Type::union(kept)
    }

    fn narrow_excluding_literal(&mut self, source: &Type, literal: &Type) -> Type {
        let resolved = self.checker.resolve(source);
        if resolved.is_any() {
            return resolved;
        }
        let kept: Vec<Type> = resolved
            .union_members()
            .iter()
            .filter_map(|member| match (member, literal) {
                _ if member == literal => None,
                (
                    Type::Primitive(PrimitiveKind::Boolean),
                    Type::Literal(LiteralValue::Boolean(value)),
                ) => Some(Type::boolean_literal(!value)),
                _ => Some(member.clone()),
            })
            .collect();
        Type::union(kept)
    }

    fn narrow_to_nullish(&mut self, source: &Type) -> Type {
        let resolved = self.checker.resolve(source);
        if resolved.is_any() {
            return Type::union2(Type::NULL, Type::UNDEFINED);
        }
        let kept: Vec<Type> = resolved
            .union_members()
            .iter()
            .filter(|member| member.is_nullish())
            .cloned()
            .collect();
        Type::union(kept)
    }

    /// Drop the members that are always falsy; `boolean` becomes `true`.
    fn narrow_by_truthiness(&mut self, source: &Type) -> Type {
        let resolved = self.checker.resolve(source);
        let kept: Vec<Type> = resolved
            .union_members()
            .iter()
            .filter_map(|member| match member {
                Type::Primitive(kind) if is_always_falsy(*kind) => None,
                Type::Primitive(PrimitiveKind::Boolean) => Some(Type::boolean_literal(true)),
                Type::Literal(value) if value.is_falsy() => None,
                _ => Some(member.clone()),
            })
            .collect();
        Type::union(kept)
    }

    /// Keep what can be falsy; `string` becomes `""`, `number` becomes `0`.
    fn narrow_to_falsy(&mut self, source: &Type) -> Type {
        let resolved = self.checker.resolve(source);
        if resolved.is_any() {
            return resolved;
        }
        let kept: Vec<Type> = resolved
            .union_members()
            .iter()
            .filter_map(|member| match member {
                Type::Primitive(kind) if is_always_falsy(*kind) => Some(member.clone()),
                Type::Primitive(PrimitiveKind::Boolean) => Some(Type::boolean_literal(false)),
                Type::Primitive(PrimitiveKind::String) => Some(Type::string_literal("")),
                Type::Primitive(PrimitiveKind::Number) => Some(Type::number_literal(0.0)),
                Type::Literal(value) if value.is_falsy() => Some(member.clone()),
                _ => None,
            })
            .collect();
        Type::union(kept)
    }

    fn filter_members(
        &mut self,
        source: &Type,
        mut keep: impl FnMut(&mut Self, &Type) -> bool,
    ) -> Type {
        let resolved = self.checker.resolve(source);
        let mut kept = Vec::new();
        for member in resolved.union_members() {
            if keep(self, member) {
                kept.push(member.clone());
            }
        }
        Type::union(kept)
    }
}

fn is_always_falsy(kind: PrimitiveKind) -> bool {
    kind.is_nullish() || kind == PrimitiveKind::Void
}

fn typeof_matches(ty: &Type, type_name: &str) -> bool {
    match ty {
        Type::Primitive(kind) => matches!(
            (kind, type_name),
            (PrimitiveKind::String, "string")
                | (PrimitiveKind::Number, "number")
                | (PrimitiveKind::Boolean, "boolean")
                | (PrimitiveKind::Undefined | PrimitiveKind::Void, "undefined")
                | (PrimitiveKind::Null, "object")
        ),
        Type::Literal(value) => value.base().keyword() == type_name,
        Type::Predicate(_) => type_name == "boolean",
        Type::Function(_) => type_name == "function",
        Type::Array(_) | Type::Tuple(_) | Type::Object(_) | Type::Record(_) => type_name == "object",
        Type::Intersection(members) => members.iter().any(|m| typeof_matches(m, type_name)),
        Type::Union(_) | Type::Alias(_) | Type::Keyof(_) => false,
    }
}

fn typeof_any_type(type_name: &str) -> Option<Type> {
    Some(match type_name {
        "string" => Type::STRING,
        "number" => Type::NUMBER,
        "boolean" => Type::BOOLEAN,
        "undefined" => Type::UNDEFINED,
        "function" => Type::any_function(),
        _ => return None,
    })
}

/// Members of `union` that match `target`; `never` when none does.
pub fn narrow_type(union: &Type, target: &Type) -> Type {
    NarrowingContext::new(&TypeAliasMap::new()).narrow_to_type(union, target)
}

/// `union` without the members that match `target`. A target that is not a
/// member leaves the union unchanged; excluding every member gives `never`.
pub fn exclude_type(union: &Type, target: &Type) -> Type {
    NarrowingContext::new(&TypeAliasMap::new()).narrow_excluding_type(union, target)
}

/// Strip `null` and `undefined`.
pub fn remove_nullish(ty: &Type) -> Type {
    match ty {
        Type::Union(members) => Type::union(members.iter().filter(|m| !m.is_nullish()).cloned()),
        _ if ty.is_nullish() => Type::NEVER,
        _ => ty.clone(),
    }
}

#[cfg(test)]
#[path = "../tests/narrowing_tests.rs"]
mod tests;
