//! Assembly graph: children, connections, pulled aliases, evaluation order.

use std::collections::{BTreeMap, HashMap, HashSet, VecDeque};

use td_core::{CompId, FieldId, Real, VarHandle};
use td_geom::Envelope;
use tracing::{debug, trace};

use crate::component::{Component, Io};
use crate::error::{ConstructError, ConstructResult, EvalError, EvalResult};
use crate::fields::Fields;
use crate::schema::{FieldDef, PortClass, Role, Schema};
use crate::value::{FieldKind, Value};

/// How `connect` maps source fields onto destination fields.
#[derive(Debug, Clone, Copy)]
pub enum FieldMap<'a> {
    /// Every source field whose name also names a destination input.
    Shared,
    /// An explicit list of identically named fields.
    Names(&'a [&'a str]),
    /// Explicit (source, destination) name pairs.
    Renamed(&'a [(&'a str, &'a str)]),
}

struct Child {
    name: String,
    component: Box<dyn Component>,
    schema: Schema,
    fields: Fields,
}

struct Connection {
    src: CompId,
    dst: CompId,
    map: Vec<(FieldId, FieldId)>,
}

/// A composite component node.
///
/// Children are evaluated in a topological order induced by the connection
/// set; the order is computed once and cached until the connections change.
/// The assembly's own surface is its alias table: child fields republished
/// ("pulled") under parent names, with fan-in allowed for reads only.
pub struct Assembly {
    name: String,
    children: Vec<Child>,
    by_name: HashMap<String, CompId>,
    connections: Vec<Connection>,
    // connection destinations, for duplicate-write detection
    written: HashSet<VarHandle>,
    aliases: BTreeMap<String, Vec<VarHandle>>,
    order: Option<Vec<CompId>>,
}

impl Assembly {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            children: Vec::new(),
            by_name: HashMap::new(),
            connections: Vec::new(),
            written: HashSet::new(),
            aliases: BTreeMap::new(),
            order: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Register a child component. Its schema is declared here, once.
    pub fn add_child(
        &mut self,
        name: &str,
        component: Box<dyn Component>,
    ) -> ConstructResult<CompId> {
        if self.by_name.contains_key(name) {
            return Err(ConstructError::DuplicateChild {
                name: name.to_string(),
            });
        }
        let schema = component.schema()?;
        let fields = Fields::from_schema(&schema);
        let id = CompId::from_index(self.children.len() as u32);
        self.by_name.insert(name.to_string(), id);
        self.children.push(Child {
            name: name.to_string(),
            component,
            schema,
            fields,
        });
        self.order = None;
        Ok(id)
    }

    pub fn child_id(&self, name: &str) -> ConstructResult<CompId> {
        self.by_name
            .get(name)
            .copied()
            .ok_or_else(|| ConstructError::UnknownChild {
                name: name.to_string(),
            })
    }

    pub fn child_name(&self, comp: CompId) -> &str {
        &self.children[comp.index()].name
    }

    pub fn schema_of(&self, comp: CompId) -> &Schema {
        &self.children[comp.index()].schema
    }

    /// Republish `comp.field` under the assembly's own namespace as
    /// `parent_name`.
    ///
    /// Pulling several child fields under one parent name is allowed; the
    /// fan-in alias is then readable but not writable.
    pub fn pull(&mut self, comp: CompId, field: &str, parent_name: &str) -> ConstructResult<()> {
        let handle = self.field_handle(comp, field)?;
        self.aliases
            .entry(parent_name.to_string())
            .or_default()
            .push(handle);
        Ok(())
    }

    /// Wire fields of `src` into inputs of `dst`.
    pub fn connect(&mut self, src: CompId, dst: CompId, map: FieldMap<'_>) -> ConstructResult<()> {
        let pairs: Vec<(String, String)> = match map {
            FieldMap::Shared => {
                let src_schema = &self.children[src.index()].schema;
                let dst_schema = &self.children[dst.index()].schema;
                src_schema
                    .fields()
                    .iter()
                    .filter(|def| {
                        dst_schema
                            .field(&def.name)
                            .is_some_and(|id| dst_schema.def(id).role == Role::Input)
                    })
                    .map(|def| (def.name.clone(), def.name.clone()))
                    .collect()
            }
            FieldMap::Names(names) => names
                .iter()
                .map(|n| (n.to_string(), n.to_string()))
                .collect(),
            FieldMap::Renamed(pairs) => pairs
                .iter()
                .map(|(s, d)| (s.to_string(), d.to_string()))
                .collect(),
        };
        self.add_connection(src, dst, &pairs)
    }

    /// Wire a whole port bundle. Both ends must carry the same port class.
    pub fn connect_port(
        &mut self,
        src: CompId,
        src_port: &str,
        dst: CompId,
        dst_port: &str,
    ) -> ConstructResult<()> {
        let src_class = self.port_class(src, src_port)?;
        let dst_class = self.port_class(dst, dst_port)?;
        if src_class != dst_class {
            return Err(ConstructError::PortClassMismatch {
                src: format!("{}.{src_port}", self.child_name(src)),
                dst: format!("{}.{dst_port}", self.child_name(dst)),
            });
        }
        let pairs: Vec<(String, String)> = src_class
            .fields()
            .iter()
            .map(|(sub, _)| (format!("{src_port}.{sub}"), format!("{dst_port}.{sub}")))
            .collect();
        self.add_connection(src, dst, &pairs)
    }

    fn add_connection(
        &mut self,
        src: CompId,
        dst: CompId,
        pairs: &[(String, String)],
    ) -> ConstructResult<()> {
        // Validate every pair before committing anything: a failed call must
        // leave the write ledger and the locks exactly as it found them.
        let mut map = Vec::with_capacity(pairs.len());
        let mut targets: Vec<VarHandle> = Vec::with_capacity(pairs.len());
        for (src_name, dst_name) in pairs {
            let src_handle = self.field_handle(src, src_name)?;
            let dst_handle = self.field_handle(dst, dst_name)?;

            let src_def = self.children[src.index()].schema.def(src_handle.field);
            let dst_def = self.children[dst.index()].schema.def(dst_handle.field);
            if src_def.kind != dst_def.kind {
                return Err(ConstructError::KindMismatch {
                    src: format!("{}.{src_name}", self.child_name(src)),
                    dst: format!("{}.{dst_name}", self.child_name(dst)),
                });
            }
            if dst_def.role != Role::Input {
                return Err(ConstructError::NotAnInput {
                    child: self.child_name(dst).to_string(),
                    field: dst_name.clone(),
                });
            }
            if self.written.contains(&dst_handle) || targets.contains(&dst_handle) {
                return Err(ConstructError::DuplicateWrite {
                    child: self.child_name(dst).to_string(),
                    field: dst_name.clone(),
                });
            }
            targets.push(dst_handle);
            map.push((src_handle.field, dst_handle.field));
        }
        for handle in targets {
            self.written.insert(handle);
            self.children[dst.index()].fields.lock(handle.field);
        }
        self.connections.push(Connection { src, dst, map });
        self.order = None;
        Ok(())
    }

    /// The cached topological evaluation order, recomputed only when the
    /// connection set has changed since the last call.
    pub fn evaluation_order(&mut self) -> ConstructResult<Vec<CompId>> {
        if let Some(order) = &self.order {
            return Ok(order.clone());
        }
        let order = self.compute_order()?;
        self.order = Some(order.clone());
        Ok(order)
    }

    /// One full synchronous pass: walk children in dependency order, copy
    /// connected values in, run each `compute` once.
    pub fn evaluate(&mut self) -> EvalResult<()> {
        let order = self.evaluation_order()?;
        debug!(assembly = %self.name, children = order.len(), "evaluation pass");

        let mut scratch: Vec<(FieldId, Value)> = Vec::new();
        for comp in order {
            for ci in 0..self.connections.len() {
                if self.connections[ci].dst != comp {
                    continue;
                }
                scratch.clear();
                let conn = &self.connections[ci];
                let src_fields = &self.children[conn.src.index()].fields;
                for (sf, df) in &conn.map {
                    scratch.push((*df, src_fields.get(*sf)));
                }
                let dst_fields = &mut self.children[comp.index()].fields;
                for (df, value) in &scratch {
                    dst_fields.store(*df, *value);
                }
            }

            let child = &mut self.children[comp.index()];
            trace!(child = %child.name, "compute");
            let mut io = Io::new(&child.schema, &mut child.fields);
            child.component.compute(&mut io)?;
        }
        Ok(())
    }

    /// Resolve a dotted path to a handle, for reading.
    ///
    /// A bare name is looked up in the alias table (a fan-in alias reads its
    /// first pulled leg); `child.field` addresses a direct child (the field
    /// part may itself be dotted for port subfields).
    pub fn resolve(&self, path: &str) -> ConstructResult<VarHandle> {
        if let Some(handles) = self.aliases.get(path) {
            return Ok(handles[0]);
        }
        let Some((child, field)) = path.split_once('.') else {
            return Err(ConstructError::UnresolvedPath {
                path: path.to_string(),
            });
        };
        let comp = self
            .child_id(child)
            .map_err(|_| ConstructError::UnresolvedPath {
                path: path.to_string(),
            })?;
        self.field_handle(comp, field)
            .map_err(|_| ConstructError::UnresolvedPath {
                path: path.to_string(),
            })
    }

    /// Resolve a path and require it to name a scalar field.
    pub fn resolve_scalar(&self, path: &str) -> ConstructResult<VarHandle> {
        let handle = self.resolve(path)?;
        if self.def_of(handle).kind != FieldKind::Scalar {
            return Err(ConstructError::NotAScalar {
                path: path.to_string(),
            });
        }
        Ok(handle)
    }

    /// Resolve a scalar path for writing.
    ///
    /// Fan-in aliases are rejected here: a name pulled from several child
    /// fields has no single write target and stays read-only.
    pub fn resolve_scalar_writable(&self, path: &str) -> ConstructResult<VarHandle> {
        if let Some(handles) = self.aliases.get(path) {
            if handles.len() > 1 {
                return Err(ConstructError::FanInWrite {
                    path: path.to_string(),
                });
            }
        }
        self.resolve_scalar(path)
    }

    pub fn value(&self, handle: VarHandle) -> Value {
        self.children[handle.comp.index()].fields.get(handle.field)
    }

    pub fn scalar(&self, handle: VarHandle) -> EvalResult<Real> {
        let def = self.def_of(handle);
        self.value(handle)
            .as_scalar()
            .ok_or_else(|| EvalError::KindMismatch {
                field: def.name.clone(),
                expected: FieldKind::Scalar,
                actual: def.kind,
            })
    }

    /// Write a scalar. Connection-driven fields are read-only from outside
    /// too; everything else (inputs, params, even outputs being initialised
    /// before a solve) is fair game.
    pub fn set_scalar(&mut self, handle: VarHandle, v: Real) -> EvalResult<()> {
        let def = self.def_of(handle);
        if def.kind != FieldKind::Scalar {
            return Err(EvalError::KindMismatch {
                field: def.name.clone(),
                expected: FieldKind::Scalar,
                actual: def.kind,
            });
        }
        let name = def.name.clone();
        let fields = &mut self.children[handle.comp.index()].fields;
        if fields.is_locked(handle.field) {
            return Err(EvalError::ConnectedWrite { field: name });
        }
        fields.store(handle.field, Value::Scalar(v));
        Ok(())
    }

    pub fn scalar_at(&self, path: &str) -> EvalResult<Real> {
        let handle = self.resolve_scalar(path)?;
        self.scalar(handle)
    }

    pub fn set_scalar_at(&mut self, path: &str, v: Real) -> EvalResult<()> {
        let handle = self.resolve_scalar_writable(path)?;
        self.set_scalar(handle, v)
    }

    pub fn value_at(&self, path: &str) -> EvalResult<Value> {
        Ok(self.value(self.resolve(path)?))
    }

    /// Read a whole envelope port at `child.port`.
    pub fn envelope_at(&self, path: &str) -> EvalResult<Envelope> {
        let read = |sub: &str| -> EvalResult<_> {
            let v = self.value_at(&format!("{path}.{sub}"))?;
            v.as_keypoint().ok_or_else(|| EvalError::KindMismatch {
                field: format!("{path}.{sub}"),
                expected: FieldKind::Keypoint,
                actual: v.kind(),
            })
        };
        Ok(Envelope {
            inlet_hub: read("inlet_hub")?,
            inlet_tip: read("inlet_tip")?,
            exit_hub: read("exit_hub")?,
            exit_tip: read("exit_tip")?,
        })
    }

    /// Apply a flat dotted-path configuration map, in its iteration order.
    pub fn apply_config<'a, I>(&mut self, entries: I) -> EvalResult<()>
    where
        I: IntoIterator<Item = (&'a str, Real)>,
    {
        for (path, v) in entries {
            self.set_scalar_at(path, v)?;
        }
        Ok(())
    }

    fn field_handle(&self, comp: CompId, field: &str) -> ConstructResult<VarHandle> {
        let child = &self.children[comp.index()];
        let id = child
            .schema
            .field(field)
            .ok_or_else(|| ConstructError::UnknownField {
                child: child.name.clone(),
                field: field.to_string(),
            })?;
        Ok(VarHandle { comp, field: id })
    }

    fn port_class(&self, comp: CompId, port: &str) -> ConstructResult<PortClass> {
        let child = &self.children[comp.index()];
        child
            .schema
            .port(port)
            .ok_or_else(|| ConstructError::UnknownPort {
                child: child.name.clone(),
                port: port.to_string(),
            })
    }

    fn def_of(&self, handle: VarHandle) -> &FieldDef {
        self.children[handle.comp.index()].schema.def(handle.field)
    }

    /// Kahn's algorithm over the producer→consumer edges, ties broken by
    /// child id so the order is stable across runs.
    fn compute_order(&self) -> ConstructResult<Vec<CompId>> {
        let n = self.children.len();
        let mut edges: HashSet<(usize, usize)> = HashSet::new();
        let mut adj: Vec<Vec<usize>> = vec![Vec::new(); n];
        let mut in_degree = vec![0usize; n];
        for conn in &self.connections {
            let e = (conn.src.index(), conn.dst.index());
            if edges.insert(e) {
                adj[e.0].push(e.1);
                in_degree[e.1] += 1;
            }
        }
        for list in &mut adj {
            list.sort_unstable();
        }

        let mut queue: VecDeque<usize> = (0..n).filter(|&i| in_degree[i] == 0).collect();
        let mut order = Vec::with_capacity(n);
        while let Some(i) = queue.pop_front() {
            order.push(CompId::from_index(i as u32));
            for &j in &adj[i] {
                in_degree[j] -= 1;
                if in_degree[j] == 0 {
                    queue.push_back(j);
                }
            }
        }

        if order.len() != n {
            let stuck: Vec<&str> = (0..n)
                .filter(|&i| in_degree[i] > 0)
                .map(|i| self.children[i].name.as_str())
                .collect();
            return Err(ConstructError::CyclicGraph {
                through: stuck.join(", "),
            });
        }
        debug!(assembly = %self.name, "evaluation order computed");
        Ok(order)
    }
}

/// Assemblies nest: a parent sees an assembly as one component whose fields
/// are its pulled aliases.
impl Component for Assembly {
    fn schema(&self) -> ConstructResult<Schema> {
        let mut builder = Schema::builder();
        for (name, handles) in &self.aliases {
            let def = self.def_of(handles[0]);
            builder = builder.field_raw(name, def.kind, def.role, def.default);
        }
        builder.build()
    }

    fn compute(&mut self, io: &mut Io<'_>) -> EvalResult<()> {
        // Alias inputs flow down. A fan-in alias has no single write target
        // and stays read-only; connection-driven child fields keep their
        // connection's value.
        let aliases: Vec<(String, VarHandle)> = self
            .aliases
            .iter()
            .filter(|(_, handles)| handles.len() == 1)
            .map(|(name, handles)| (name.clone(), handles[0]))
            .collect();

        for (name, handle) in &aliases {
            if self.def_of(*handle).role == Role::Output {
                continue;
            }
            let fields = &self.children[handle.comp.index()].fields;
            if fields.is_locked(handle.field) {
                continue;
            }
            let value = io.value(name)?;
            self.children[handle.comp.index()]
                .fields
                .store(handle.field, value);
        }

        self.evaluate()?;

        for (name, handle) in &aliases {
            if self.def_of(*handle).role != Role::Output {
                continue;
            }
            io.set_value(name, self.value(*handle))?;
        }
        Ok(())
    }
}
