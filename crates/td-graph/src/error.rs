//! Construction vs evaluation errors.
//!
//! Construction errors are fatal at assembly-build time: bad wiring never
//! becomes an evaluatable assembly. Evaluation errors are fatal for the
//! current pass and propagate to the caller untouched; there is no retry and
//! no default-value substitution.

use td_core::CoreError;
use thiserror::Error;

use crate::value::FieldKind;

pub type ConstructResult<T> = Result<T, ConstructError>;
pub type EvalResult<T> = Result<T, EvalError>;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConstructError {
    #[error("Duplicate field '{field}' in component schema")]
    DuplicateField { field: String },

    #[error("Child '{name}' already exists in assembly")]
    DuplicateChild { name: String },

    #[error("Unknown child '{name}'")]
    UnknownChild { name: String },

    #[error("Unknown field '{field}' on child '{child}'")]
    UnknownField { child: String, field: String },

    #[error("Unknown port '{port}' on child '{child}'")]
    UnknownPort { child: String, port: String },

    #[error("Port class mismatch connecting '{src}' to '{dst}'")]
    PortClassMismatch { src: String, dst: String },

    #[error("Field kind mismatch connecting '{src}' to '{dst}'")]
    KindMismatch { src: String, dst: String },

    #[error("Connection destination '{child}.{field}' is not an input")]
    NotAnInput { child: String, field: String },

    #[error("Field '{child}.{field}' is already driven by another connection")]
    DuplicateWrite { child: String, field: String },

    #[error("Connection cycle through components: {through}")]
    CyclicGraph { through: String },

    #[error("Path '{path}' does not resolve to a field")]
    UnresolvedPath { path: String },

    #[error("Path '{path}' does not name a scalar field")]
    NotAScalar { path: String },

    #[error("Alias '{path}' fans in from several fields and is read-only")]
    FanInWrite { path: String },
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum EvalError {
    #[error("Unknown field '{field}'")]
    UnknownField { field: String },

    #[error("Field '{field}' holds a {actual}, expected {expected}")]
    KindMismatch {
        field: String,
        expected: FieldKind,
        actual: FieldKind,
    },

    #[error("Field '{field}' is connection-driven and read-only for its owner")]
    ConnectedWrite { field: String },

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Construct(#[from] ConstructError),
}
