//! Shared helpers for the solver's unit tests.

use crate::type_factory::ObjectBuilder;
use crate::types::Type;
use tracing_subscriber::EnvFilter;

/// Install a test-writer subscriber once per test binary.
///
/// Output is off unless `TYCK_LOG` (or `RUST_LOG`) is set, e.g.
/// `TYCK_LOG=tyck_solver=trace`.
pub(crate) fn init_tracing() {
    let filter = match std::env::var("TYCK_LOG") {
        Ok(directives) => EnvFilter::builder().parse_lossy(directives),
        Err(_) => EnvFilter::from_default_env(),
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}

/// `{name: ty, ...}` with every property required.
pub(crate) fn object(properties: &[(&str, Type)]) -> Type {
    properties
        .iter()
        .fold(ObjectBuilder::new(), |builder, (name, ty)| {
            builder.property(*name, ty.clone())
        })
        .build()
}

/// The type of the object literal expression `{name: value, ...}`.
pub(crate) fn fresh_literal(properties: &[(&str, Type)]) -> Type {
    properties
        .iter()
        .fold(ObjectBuilder::fresh_literal(), |builder, (name, ty)| {
            builder.property(*name, ty.clone())
        })
        .build()
}

pub(crate) fn num(value: f64) -> Type {
    Type::number_literal(value)
}

pub(crate) fn str_lit(value: &str) -> Type {
    Type::string_literal(value)
}
