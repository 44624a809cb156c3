//! Component nodes and their field-access view.

use td_core::Real;
use td_geom::{C1Keypoint, Envelope, Keypoint};

use crate::error::{ConstructResult, EvalError, EvalResult};
use crate::fields::Fields;
use crate::schema::Schema;
use crate::value::{FieldKind, Value};

/// A named unit owning inputs, params and outputs, with one deterministic
/// computation step.
///
/// `compute` must derive outputs purely from current inputs and params; its
/// only side effect is writing the component's own output fields through
/// `io`. It is invoked once per assembly evaluation pass, any number of
/// times across solver iterations.
pub trait Component {
    /// The fixed field table. Declared once, at assembly construction.
    fn schema(&self) -> ConstructResult<Schema>;

    fn compute(&mut self, io: &mut Io<'_>) -> EvalResult<()>;
}

/// Name-checked view over one component's fields.
///
/// Reads are unrestricted; writes refuse connection-driven fields.
pub struct Io<'a> {
    schema: &'a Schema,
    fields: &'a mut Fields,
}

impl<'a> Io<'a> {
    pub fn new(schema: &'a Schema, fields: &'a mut Fields) -> Self {
        Self { schema, fields }
    }

    pub fn value(&self, name: &str) -> EvalResult<Value> {
        let id = self.schema.field(name).ok_or_else(|| EvalError::UnknownField {
            field: name.to_string(),
        })?;
        Ok(self.fields.get(id))
    }

    pub fn set_value(&mut self, name: &str, value: Value) -> EvalResult<()> {
        let id = self.schema.field(name).ok_or_else(|| EvalError::UnknownField {
            field: name.to_string(),
        })?;
        if self.fields.is_locked(id) {
            return Err(EvalError::ConnectedWrite {
                field: name.to_string(),
            });
        }
        let expected = self.schema.def(id).kind;
        if value.kind() != expected {
            return Err(EvalError::KindMismatch {
                field: name.to_string(),
                expected,
                actual: value.kind(),
            });
        }
        self.fields.store(id, value);
        Ok(())
    }

    pub fn scalar(&self, name: &str) -> EvalResult<Real> {
        match self.value(name)? {
            Value::Scalar(v) => Ok(v),
            other => Err(kind_mismatch(name, FieldKind::Scalar, other)),
        }
    }

    pub fn keypoint(&self, name: &str) -> EvalResult<Keypoint> {
        match self.value(name)? {
            Value::Keypoint(kp) => Ok(kp),
            other => Err(kind_mismatch(name, FieldKind::Keypoint, other)),
        }
    }

    pub fn c1(&self, name: &str) -> EvalResult<C1Keypoint> {
        match self.value(name)? {
            Value::C1Keypoint(kp) => Ok(kp),
            other => Err(kind_mismatch(name, FieldKind::C1Keypoint, other)),
        }
    }

    pub fn set_scalar(&mut self, name: &str, v: Real) -> EvalResult<()> {
        self.set_value(name, Value::Scalar(v))
    }

    pub fn set_keypoint(&mut self, name: &str, kp: Keypoint) -> EvalResult<()> {
        self.set_value(name, Value::Keypoint(kp))
    }

    pub fn set_c1(&mut self, name: &str, kp: C1Keypoint) -> EvalResult<()> {
        self.set_value(name, Value::C1Keypoint(kp))
    }

    /// Read a whole envelope port.
    pub fn envelope(&self, port: &str) -> EvalResult<Envelope> {
        Ok(Envelope {
            inlet_hub: self.keypoint(&format!("{port}.inlet_hub"))?,
            inlet_tip: self.keypoint(&format!("{port}.inlet_tip"))?,
            exit_hub: self.keypoint(&format!("{port}.exit_hub"))?,
            exit_tip: self.keypoint(&format!("{port}.exit_tip"))?,
        })
    }

    /// Write a whole envelope port.
    pub fn set_envelope(&mut self, port: &str, env: &Envelope) -> EvalResult<()> {
        self.set_keypoint(&format!("{port}.inlet_hub"), env.inlet_hub)?;
        self.set_keypoint(&format!("{port}.inlet_tip"), env.inlet_tip)?;
        self.set_keypoint(&format!("{port}.exit_hub"), env.exit_hub)?;
        self.set_keypoint(&format!("{port}.exit_tip"), env.exit_tip)
    }

}

fn kind_mismatch(name: &str, expected: FieldKind, actual: Value) -> EvalError {
    EvalError::KindMismatch {
        field: name.to_string(),
        expected,
        actual: actual.kind(),
    }
}
