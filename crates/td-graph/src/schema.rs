//! Fixed per-component field tables.
//!
//! A component declares its fields once, before it joins an assembly: named
//! scalar inputs/params/outputs and typed port bundles. Port bundles expand
//! into prefixed fields (`fl_in.w`, `kp.exit_tip`, ...) so the whole schema
//! is one flat table; the port entry keeps the class so connections can
//! enforce that both ends carry the identical bundle.

use std::collections::HashMap;

use td_core::{FieldId, Real};

use crate::error::{ConstructError, ConstructResult};
use crate::value::{FieldKind, Value};

/// What a field is to its owning component.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Populated by an upstream connection or a default value.
    Input,
    /// Pure configuration; never a connection destination.
    Param,
    /// Written by the owner's `compute` step.
    Output,
}

/// Typed port bundles with a fixed field list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortClass {
    /// Fluid stream: mass flow, total pressure, total temperature.
    Fluid,
    /// Shaft connection: power and rotational speed.
    Shaft,
    /// Geometric stage envelope: the four hub/tip corner keypoints.
    Envelope,
}

impl PortClass {
    pub fn fields(self) -> &'static [(&'static str, FieldKind)] {
        match self {
            PortClass::Fluid => &[
                ("w", FieldKind::Scalar),
                ("pt", FieldKind::Scalar),
                ("tt", FieldKind::Scalar),
            ],
            PortClass::Shaft => &[("power", FieldKind::Scalar), ("n", FieldKind::Scalar)],
            PortClass::Envelope => &[
                ("inlet_hub", FieldKind::Keypoint),
                ("inlet_tip", FieldKind::Keypoint),
                ("exit_hub", FieldKind::Keypoint),
                ("exit_tip", FieldKind::Keypoint),
            ],
        }
    }
}

/// One declared field.
#[derive(Debug, Clone)]
pub struct FieldDef {
    pub name: String,
    pub kind: FieldKind,
    pub role: Role,
    pub default: Value,
}

/// Immutable field table of one component.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    fields: Vec<FieldDef>,
    index: HashMap<String, FieldId>,
    ports: HashMap<String, PortClass>,
}

impl Schema {
    pub fn builder() -> SchemaBuilder {
        SchemaBuilder::default()
    }

    pub fn field(&self, name: &str) -> Option<FieldId> {
        self.index.get(name).copied()
    }

    pub fn def(&self, id: FieldId) -> &FieldDef {
        &self.fields[id.index()]
    }

    pub fn fields(&self) -> &[FieldDef] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Class of a declared port bundle, if `name` is one.
    pub fn port(&self, name: &str) -> Option<PortClass> {
        self.ports.get(name).copied()
    }
}

/// Collects field declarations, validated once in `build`.
#[derive(Debug, Default)]
pub struct SchemaBuilder {
    fields: Vec<FieldDef>,
    ports: Vec<(String, PortClass)>,
}

impl SchemaBuilder {
    /// Scalar populated by an upstream connection, or left at its default.
    pub fn input(mut self, name: &str, default: Real) -> Self {
        self.push(name, FieldKind::Scalar, Role::Input, Value::Scalar(default));
        self
    }

    /// Scalar configuration value; connections may not target it.
    pub fn param(mut self, name: &str, default: Real) -> Self {
        self.push(name, FieldKind::Scalar, Role::Param, Value::Scalar(default));
        self
    }

    /// Scalar computed by the owner.
    pub fn output(mut self, name: &str, default: Real) -> Self {
        self.push(name, FieldKind::Scalar, Role::Output, Value::Scalar(default));
        self
    }

    pub fn keypoint_input(mut self, name: &str) -> Self {
        self.push(
            name,
            FieldKind::Keypoint,
            Role::Input,
            Value::zero(FieldKind::Keypoint),
        );
        self
    }

    pub fn keypoint_output(mut self, name: &str) -> Self {
        self.push(
            name,
            FieldKind::Keypoint,
            Role::Output,
            Value::zero(FieldKind::Keypoint),
        );
        self
    }

    pub fn c1_input(mut self, name: &str) -> Self {
        self.push(
            name,
            FieldKind::C1Keypoint,
            Role::Input,
            Value::zero(FieldKind::C1Keypoint),
        );
        self
    }

    pub fn c1_output(mut self, name: &str) -> Self {
        self.push(
            name,
            FieldKind::C1Keypoint,
            Role::Output,
            Value::zero(FieldKind::C1Keypoint),
        );
        self
    }

    /// Port bundle filled by an upstream producer.
    pub fn port_input(self, name: &str, class: PortClass) -> Self {
        self.port(name, class, Role::Input)
    }

    /// Port bundle produced by the owner.
    pub fn port_output(self, name: &str, class: PortClass) -> Self {
        self.port(name, class, Role::Output)
    }

    /// Raw declaration, used when republishing child fields on a composite.
    pub fn field_raw(mut self, name: &str, kind: FieldKind, role: Role, default: Value) -> Self {
        self.push(name, kind, role, default);
        self
    }

    fn port(mut self, name: &str, class: PortClass, role: Role) -> Self {
        for (sub, kind) in class.fields() {
            self.push(&format!("{name}.{sub}"), *kind, role, Value::zero(*kind));
        }
        self.ports.push((name.to_string(), class));
        self
    }

    fn push(&mut self, name: &str, kind: FieldKind, role: Role, default: Value) {
        self.fields.push(FieldDef {
            name: name.to_string(),
            kind,
            role,
            default,
        });
    }

    pub fn build(self) -> ConstructResult<Schema> {
        let mut index = HashMap::with_capacity(self.fields.len());
        for (i, def) in self.fields.iter().enumerate() {
            let prev = index.insert(def.name.clone(), FieldId::from_index(i as u32));
            if prev.is_some() {
                return Err(ConstructError::DuplicateField {
                    field: def.name.clone(),
                });
            }
        }
        Ok(Schema {
            fields: self.fields,
            index,
            ports: self.ports.into_iter().collect(),
        })
    }
}
