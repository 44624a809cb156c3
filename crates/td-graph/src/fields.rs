//! Runtime value storage for one component.

use td_core::FieldId;

use crate::schema::Schema;
use crate::value::Value;

/// One `Value` slot per schema field, plus the connection write lock.
///
/// A locked slot is a connection destination: the assembly writes it during
/// propagation and everyone else only reads it.
#[derive(Debug, Clone)]
pub struct Fields {
    values: Vec<Value>,
    locked: Vec<bool>,
}

impl Fields {
    pub fn from_schema(schema: &Schema) -> Self {
        Self {
            values: schema.fields().iter().map(|def| def.default).collect(),
            locked: vec![false; schema.len()],
        }
    }

    pub fn get(&self, id: FieldId) -> Value {
        self.values[id.index()]
    }

    pub fn is_locked(&self, id: FieldId) -> bool {
        self.locked[id.index()]
    }

    /// Store bypassing the lock. Connection propagation and alias forwarding
    /// go through here; owner writes go through `Io`.
    pub(crate) fn store(&mut self, id: FieldId, value: Value) {
        debug_assert_eq!(self.values[id.index()].kind(), value.kind());
        self.values[id.index()] = value;
    }

    pub(crate) fn lock(&mut self, id: FieldId) {
        self.locked[id.index()] = true;
    }
}
