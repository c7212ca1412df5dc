//! Failure explanation for compatibility checks.
//!
//! `explain_failure` re-walks an incompatible pair one level at a time and
//! reports the first rule that rejects it, recursing into properties so the
//! reason for `{user: {userType: string}}` against
//! `{user: {userType: number}}` names `user.userType`.

use crate::diagnostics::SubtypeFailureReason;
use crate::objects::object_view;
use crate::subtype::CompatibilityChecker;
use crate::subtype_rules::declared_property_type;
use crate::types::*;

impl CompatibilityChecker<'_> {
    /// Why `value` is not assignable to `target`, or `None` if it is.
    pub fn explain_failure(&mut self, value: &Type, target: &Type) -> Option<SubtypeFailureReason> {
        if self.is_compatible(value, target) {
            return None;
        }
        if self.limit_exceeded() {
            return Some(SubtypeFailureReason::RecursionLimitExceeded);
        }
        let value = self.resolve(value);
        let target = self.resolve(target);
        Some(self.explain_resolved(&value, &target))
    }

    fn explain_resolved(&mut self, value: &Type, target: &Type) -> SubtypeFailureReason {
        match (value, target) {
            (_, Type::Union(members)) => {
                if let Type::Union(source_members) = value {
                    if let Some(member) = self.first_rejected(source_members, target) {
                        return SubtypeFailureReason::UnionMemberMismatch {
                            member,
                            target_type: target.clone(),
                        };
                    }
                }
                SubtypeFailureReason::NoUnionMemberMatches {
                    source_type: value.clone(),
                    target_union_members: members.to_vec(),
                }
            }
            (Type::Union(members), _) => match self.first_rejected(members, target) {
                Some(member) => SubtypeFailureReason::UnionMemberMismatch {
                    member,
                    target_type: target.clone(),
                },
                None => type_mismatch(value, target),
            },
            (_, Type::Intersection(members)) => {
                match members.iter().find(|m| !self.is_compatible(value, m)) {
                    Some(member) => SubtypeFailureReason::IntersectionMemberMismatch {
                        target_member: member.clone(),
                    },
                    None => type_mismatch(value, target),
                }
            }
            (Type::Literal(_), Type::Literal(_) | Type::Primitive(_)) => {
                SubtypeFailureReason::LiteralTypeMismatch {
                    source_type: value.clone(),
                    target_type: target.clone(),
                }
            }
            (Type::Primitive(_), Type::Primitive(_) | Type::Literal(_)) => {
                SubtypeFailureReason::IntrinsicTypeMismatch {
                    source_type: value.clone(),
                    target_type: target.clone(),
                }
            }
            (Type::Array(source), Type::Array(target_element)) => {
                SubtypeFailureReason::ArrayElementMismatch {
                    source_element: source.as_ref().clone(),
                    target_element: target_element.as_ref().clone(),
                }
            }
            (Type::Tuple(source), Type::Tuple(target_elements)) => {
                if source.len() != target_elements.len() {
                    return SubtypeFailureReason::TupleElementMismatch {
                        source_count: source.len(),
                        target_count: target_elements.len(),
                    };
                }
                self.explain_elements(source, target_elements.iter())
                    .unwrap_or_else(|| type_mismatch(value, target))
            }
            (Type::Tuple(source), Type::Array(element)) => self
                .explain_elements(source, std::iter::repeat(element.as_ref()))
                .unwrap_or_else(|| type_mismatch(value, target)),
            (Type::Object(_) | Type::Record(_), Type::Object(_) | Type::Record(_)) => self
                .explain_object(value, target)
                .unwrap_or_else(|| type_mismatch(value, target)),
            (Type::Function(source), Type::Function(target_fn)) => self
                .explain_function(source, target_fn)
                .unwrap_or_else(|| type_mismatch(value, target)),
            _ => type_mismatch(value, target),
        }
    }

    fn first_rejected(&mut self, members: &TypeList, target: &Type) -> Option<Type> {
        members
            .iter()
            .find(|member| !self.is_compatible(member, target))
            .cloned()
    }

    fn explain_elements<'t>(
        &mut self,
        source: &[Type],
        target: impl Iterator<Item = &'t Type>,
    ) -> Option<SubtypeFailureReason> {
        for (index, (s_elem, t_elem)) in source.iter().zip(target).enumerate() {
            if !self.is_compatible(s_elem, t_elem) {
                return Some(SubtypeFailureReason::TupleElementTypeMismatch {
                    index,
                    source_element: s_elem.clone(),
                    target_element: t_elem.clone(),
                });
            }
        }
        None
    }

    fn explain_object(&mut self, value: &Type, target: &Type) -> Option<SubtypeFailureReason> {
        let source = object_view(value)?;
        let target_shape = object_view(target)?;

        for (name, t_prop) in &target_shape.properties {
            match source.properties.get(name) {
                Some(s_prop) => {
                    if s_prop.optional && !t_prop.optional {
                        return Some(SubtypeFailureReason::OptionalPropertyRequired {
                            property_name: name.clone(),
                        });
                    }
                    let expected = declared_property_type(t_prop);
                    if let Some(nested) = self.explain_failure(&s_prop.ty, &expected) {
                        let nested_reason = matches!(
                            nested,
                            SubtypeFailureReason::PropertyTypeMismatch { .. }
                                | SubtypeFailureReason::MissingProperty { .. }
                                | SubtypeFailureReason::OptionalPropertyRequired { .. }
                        )
                        .then(|| Box::new(nested));
                        return Some(SubtypeFailureReason::PropertyTypeMismatch {
                            property_name: name.clone(),
                            source_property_type: s_prop.ty.clone(),
                            target_property_type: t_prop.ty.clone(),
                            nested_reason,
                        });
                    }
                }
                None if t_prop.optional => {}
                None => match &source.index_signature {
                    Some(index) if self.is_compatible(&index.value_type, &t_prop.ty) => {}
                    Some(index) => {
                        return Some(SubtypeFailureReason::IndexSignatureMismatch {
                            source_value_type: index.value_type.clone(),
                            target_value_type: t_prop.ty.clone(),
                        });
                    }
                    None => {
                        return Some(SubtypeFailureReason::MissingProperty {
                            property_name: name.clone(),
                        });
                    }
                },
            }
        }

        let t_index = target_shape.index_signature.as_ref()?;
        for (name, s_prop) in &source.properties {
            if !self.is_compatible(&s_prop.ty, &t_index.value_type) {
                return Some(SubtypeFailureReason::PropertyTypeMismatch {
                    property_name: name.clone(),
                    source_property_type: s_prop.ty.clone(),
                    target_property_type: t_index.value_type.clone(),
                    nested_reason: None,
                });
            }
        }
        let s_index = source.index_signature.as_ref()?;
        Some(SubtypeFailureReason::IndexSignatureMismatch {
            source_value_type: s_index.value_type.clone(),
            target_value_type: t_index.value_type.clone(),
        })
    }

    fn explain_function(
        &mut self,
        source: &FunctionShape,
        target: &FunctionShape,
    ) -> Option<SubtypeFailureReason> {
        let (FunctionShape::Signature(source), FunctionShape::Signature(target)) = (source, target)
        else {
            return None;
        };
        if source.params.len() != target.params.len() {
            return Some(SubtypeFailureReason::ParameterCountMismatch {
                source_count: source.params.len(),
                target_count: target.params.len(),
            });
        }
        for (param_index, (s_param, t_param)) in source.params.iter().zip(&target.params).enumerate()
        {
            if !self.is_identical(s_param, t_param) {
                return Some(SubtypeFailureReason::ParameterTypeMismatch {
                    param_index,
                    source_param: s_param.clone(),
                    target_param: t_param.clone(),
                });
            }
        }
        Some(SubtypeFailureReason::ReturnTypeMismatch {
            source_return: source.return_type.clone(),
            target_return: target.return_type.clone(),
        })
    }
}

fn type_mismatch(value: &Type, target: &Type) -> SubtypeFailureReason {
    SubtypeFailureReason::TypeMismatch {
        source_type: value.clone(),
        target_type: target.clone(),
    }
}
