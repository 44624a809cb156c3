//! Tagged values carried by fields.

use core::fmt;

use td_core::Real;
use td_geom::{C1Keypoint, Keypoint};

/// The kind of one field, fixed at schema-declaration time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Scalar,
    Keypoint,
    C1Keypoint,
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKind::Scalar => write!(f, "scalar"),
            FieldKind::Keypoint => write!(f, "keypoint"),
            FieldKind::C1Keypoint => write!(f, "C1 keypoint"),
        }
    }
}

/// One field value. Copyable, so connection propagation is a plain copy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    Scalar(Real),
    Keypoint(Keypoint),
    C1Keypoint(C1Keypoint),
}

impl Value {
    pub fn kind(&self) -> FieldKind {
        match self {
            Value::Scalar(_) => FieldKind::Scalar,
            Value::Keypoint(_) => FieldKind::Keypoint,
            Value::C1Keypoint(_) => FieldKind::C1Keypoint,
        }
    }

    /// Zero value of a kind, used for unset outputs.
    pub fn zero(kind: FieldKind) -> Value {
        match kind {
            FieldKind::Scalar => Value::Scalar(0.0),
            FieldKind::Keypoint => Value::Keypoint(Keypoint::default()),
            FieldKind::C1Keypoint => Value::C1Keypoint(C1Keypoint::default()),
        }
    }

    pub fn as_scalar(&self) -> Option<Real> {
        match self {
            Value::Scalar(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_keypoint(&self) -> Option<Keypoint> {
        match self {
            Value::Keypoint(kp) => Some(*kp),
            _ => None,
        }
    }

    pub fn as_c1(&self) -> Option<C1Keypoint> {
        match self {
            Value::C1Keypoint(kp) => Some(*kp),
            _ => None,
        }
    }
}
