//! Evaluation rules for type operators.

pub mod keyof;
