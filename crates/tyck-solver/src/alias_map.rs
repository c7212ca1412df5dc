//! Type alias registry.
//!
//! A `TypeAliasMap` holds every `type X = ...` declaration of one compiled
//! unit. It is filled during the declaration phase (in any order, so forward
//! and mutual references work) and only read afterwards: every query takes
//! `&self`.
//!
//! Resolution is lenient: an unknown name resolves to itself. Cycles in alias
//! *chains* (`type A = B; type B = A`) are reported by [`TypeAliasMap::try_resolve`]
//! and [`TypeAliasMap::validate`]; recursion through structure
//! (`type List = { next: List }`) is legal and never followed eagerly.

use crate::diagnostics::DiagnosticBuilder;
use crate::evaluate_rules::keyof;
use crate::instantiate::{TypeSubstitution, substitute_type_params};
use crate::types::*;
use indexmap::IndexMap;
use rustc_hash::FxHashSet;
use smallvec::SmallVec;
use thiserror::Error;
use tracing::{debug, trace};
use tyck_common::limits::MAX_ALIAS_RESOLUTION_DEPTH;
use tyck_common::{Atom, CheckerOptions, Diagnostic};

/// A registered alias.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AliasDefinition {
    pub name: Atom,
    /// Generic parameters, in declaration order. Empty for concrete aliases.
    pub type_params: Vec<TypeParam>,
    pub body: Type,
}

impl AliasDefinition {
    pub fn is_generic(&self) -> bool {
        !self.type_params.is_empty()
    }
}

/// Why an alias chain could not be resolved.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum AliasResolutionError {
    #[error("type alias '{name}' circularly references itself")]
    Circular { name: Atom, chain: Vec<Atom> },
    #[error("type alias '{name}' exceeds the maximum resolution depth of {limit}")]
    DepthExceeded { name: Atom, limit: u32 },
}

/// Registry mapping alias names to definitions.
#[derive(Clone, Debug)]
pub struct TypeAliasMap {
    definitions: IndexMap<Atom, AliasDefinition>,
    max_resolution_depth: u32,
}

impl Default for TypeAliasMap {
    fn default() -> Self {
        TypeAliasMap {
            definitions: IndexMap::new(),
            max_resolution_depth: MAX_ALIAS_RESOLUTION_DEPTH,
        }
    }
}

impl TypeAliasMap {
    pub fn new() -> Self {
        TypeAliasMap::default()
    }

    pub fn with_options(options: &CheckerOptions) -> Self {
        TypeAliasMap {
            definitions: IndexMap::new(),
            max_resolution_depth: options.max_alias_resolution_depth,
        }
    }

    // -------------------------------------------------------------------------
    // Declaration phase
    // -------------------------------------------------------------------------

    /// Register `name = ty`.
    ///
    /// `generic_params` lists the alias's type parameters; `constraints` gives
    /// an `extends` bound for some of them. When `generic_params` is empty and
    /// `ty` is a function with its own type parameters, those become the
    /// alias's parameters. A function without type parameters is an ordinary
    /// concrete alias.
    ///
    /// Redefining a name replaces the previous definition.
    pub fn define(
        &mut self,
        name: impl Into<Atom>,
        ty: Type,
        generic_params: &[&str],
        constraints: &[(&str, Type)],
    ) {
        let type_params: Vec<TypeParam> = if generic_params.is_empty() {
            match &ty {
                Type::Function(shape) => match shape.as_ref() {
                    FunctionShape::Signature(sig) => sig.type_params.clone(),
                    FunctionShape::AnyArity => Vec::new(),
                },
                _ => Vec::new(),
            }
        } else {
            generic_params
                .iter()
                .map(|&param| {
                    let constraint = constraints
                        .iter()
                        .find(|(constrained, _)| *constrained == param)
                        .map(|(_, bound)| bound.clone());
                    TypeParam {
                        name: Atom::from(param),
                        constraint,
                    }
                })
                .collect()
        };
        self.define_generic(name, type_params, ty);
    }

    /// Register a concrete alias.
    pub fn declare(&mut self, name: impl Into<Atom>, ty: Type) {
        self.define(name, ty, &[], &[]);
    }

    /// Register an alias with explicit type parameters.
    pub fn define_generic(&mut self, name: impl Into<Atom>, type_params: Vec<TypeParam>, body: Type) {
        let name = name.into();
        trace!(name = %name, params = type_params.len(), "define alias");
        self.definitions.insert(
            name.clone(),
            AliasDefinition {
                name,
                type_params,
                body,
            },
        );
    }

    // -------------------------------------------------------------------------
    // Lookup
    // -------------------------------------------------------------------------

    pub fn get(&self, name: &str) -> Option<&AliasDefinition> {
        self.definitions.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.definitions.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Definitions in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &AliasDefinition> {
        self.definitions.values()
    }

    pub fn max_resolution_depth(&self) -> u32 {
        self.max_resolution_depth
    }

    // -------------------------------------------------------------------------
    // Resolution
    // -------------------------------------------------------------------------

    /// Follow an `Alias` chain to the first non-alias type.
    ///
    /// Unknown names are returned unchanged. A chain that revisits a name or
    /// exceeds the depth bound stops at the alias where the problem was seen.
    pub fn resolve(&self, ty: &Type) -> Type {
        match self.try_resolve(ty) {
            Ok(resolved) => resolved,
            Err(err) => {
                debug!(error = %err, "alias resolution stopped");
                match err {
                    AliasResolutionError::Circular { name, .. }
                    | AliasResolutionError::DepthExceeded { name, .. } => Type::Alias(name),
                }
            }
        }
    }

    /// Follow an `Alias` chain, reporting cycles and runaway depth.
    pub fn try_resolve(&self, ty: &Type) -> Result<Type, AliasResolutionError> {
        let mut current = ty.clone();
        let mut chain: SmallVec<[Atom; 4]> = SmallVec::new();

        while let Type::Alias(name) = &current {
            let Some(definition) = self.definitions.get(name) else {
                return Ok(current);
            };
            if chain.contains(name) {
                let mut cycle: Vec<Atom> = chain.to_vec();
                cycle.push(name.clone());
                return Err(AliasResolutionError::Circular {
                    name: name.clone(),
                    chain: cycle,
                });
            }
            if chain.len() as u32 >= self.max_resolution_depth {
                return Err(AliasResolutionError::DepthExceeded {
                    name: name.clone(),
                    limit: self.max_resolution_depth,
                });
            }
            chain.push(name.clone());
            current = definition.body.clone();
        }

        Ok(current)
    }

    /// Evaluate a `keyof` type. See `evaluate_rules::keyof` for the rules.
    pub fn resolve_keyof(&self, keyof_type: &Type) -> Type {
        keyof::resolve_keyof(self, keyof_type)
    }

    /// Instantiate the generic alias `name` with positional `type_args`.
    ///
    /// Missing arguments bind to `any`; extra arguments are ignored. An unknown
    /// name yields `Alias(name)`; a non-generic alias yields its body.
    pub fn instantiate_generic_type(&self, name: &str, type_args: &[Type]) -> Type {
        let Some(definition) = self.definitions.get(name) else {
            return Type::alias(name);
        };
        if !definition.is_generic() {
            return definition.body.clone();
        }

        let substitution = TypeSubstitution::from_args(&definition.type_params, type_args);
        trace!(name, args = type_args.len(), "instantiate generic alias");
        substitute_type_params(&definition.body, &substitution)
    }

    // -------------------------------------------------------------------------
    // Validation
    // -------------------------------------------------------------------------

    /// Alias names referenced by `ty` that are not declared, in first-seen
    /// order. Names bound by an enclosing generic function are not references.
    pub fn unresolved_references(&self, ty: &Type) -> Vec<Atom> {
        let mut collector = ReferenceCollector {
            aliases: self,
            bound: SmallVec::new(),
            seen: FxHashSet::default(),
            missing: Vec::new(),
        };
        collector.visit(ty);
        collector.missing
    }

    /// Check every definition: circular chains and runaway depth are errors,
    /// references to undeclared names are warnings. Each diagnostic is located
    /// at the name of the alias that contains the problem.
    pub fn validate(&self) -> Vec<Diagnostic<Atom>> {
        let mut diagnostics = Vec::new();
        for definition in self.definitions.values() {
            let location = definition.name.clone();
            match self.try_resolve(&Type::Alias(definition.name.clone())) {
                Err(AliasResolutionError::Circular { .. }) => diagnostics.push(
                    DiagnosticBuilder::new(location.clone()).circular_alias(&definition.name),
                ),
                Err(AliasResolutionError::DepthExceeded { limit, .. }) => diagnostics.push(
                    DiagnosticBuilder::new(location.clone())
                        .alias_too_deep(&definition.name, limit),
                ),
                Ok(_) => {}
            }

            let mut collector = ReferenceCollector {
                aliases: self,
                bound: definition.type_params.iter().map(|p| p.name.clone()).collect(),
                seen: FxHashSet::default(),
                missing: Vec::new(),
            };
            collector.visit(&definition.body);
            for param in &definition.type_params {
                if let Some(constraint) = &param.constraint {
                    collector.visit(constraint);
                }
            }
            for name in collector.missing {
                diagnostics.push(DiagnosticBuilder::new(location.clone()).cannot_find_type(&name));
            }
        }
        diagnostics
    }
}

struct ReferenceCollector<'a> {
    aliases: &'a TypeAliasMap,
    bound: SmallVec<[Atom; 4]>,
    seen: FxHashSet<Atom>,
    missing: Vec<Atom>,
}

impl ReferenceCollector<'_> {
    fn visit(&mut self, ty: &Type) {
        match ty {
            Type::Primitive(_) | Type::Literal(_) => {}
            Type::Alias(name) => {
                if !self.bound.contains(name)
                    && !self.aliases.contains(name)
                    && self.seen.insert(name.clone())
                {
                    self.missing.push(name.clone());
                }
            }
            Type::Array(element) => self.visit(element),
            Type::Keyof(subject) => self.visit(subject),
            Type::Tuple(elements) => elements.iter().for_each(|e| self.visit(e)),
            Type::Union(members) | Type::Intersection(members) => {
                members.iter().for_each(|m| self.visit(m))
            }
            Type::Object(shape) => {
                for prop in shape.properties.values() {
                    self.visit(&prop.ty);
                }
                if let Some(index) = &shape.index_signature {
                    self.visit(&index.key_type);
                    self.visit(&index.value_type);
                }
            }
            Type::Record(record) => {
                self.visit(&record.key);
                self.visit(&record.value);
            }
            Type::Predicate(predicate) => self.visit(&predicate.guard),
            Type::Function(shape) => {
                let FunctionShape::Signature(sig) = shape.as_ref() else {
                    return;
                };
                let scope = self.bound.len();
                self.bound.extend(sig.type_params.iter().map(|p| p.name.clone()));
                for param in &sig.type_params {
                    if let Some(constraint) = &param.constraint {
                        self.visit(constraint);
                    }
                }
                sig.params.iter().for_each(|p| self.visit(p));
                self.visit(&sig.return_type);
                self.bound.truncate(scope);
            }
        }
    }
}

#[cfg(test)]
#[path = "../tests/alias_map_tests.rs"]
mod tests;
