//! td-graph: typed ports, component nodes, and the assembly graph.
//!
//! Provides:
//! - `FieldKind`/`Value`: the tagged value types ports carry
//! - `Schema`/`SchemaBuilder`: the fixed, statically declared field table of
//!   one component (scalars and port bundles)
//! - `Component`: a named unit with a deterministic `compute` step reading
//!   inputs and writing its own outputs through an `Io` view
//! - `Assembly`: composes components, wires ports (direct, subset, renamed),
//!   republishes child fields under pulled aliases, and evaluates children
//!   in a cached topological order
//!
//! # Example
//!
//! ```
//! use td_graph::{Assembly, Component, ConstructResult, EvalResult, Io, Schema};
//!
//! struct Doubler;
//!
//! impl Component for Doubler {
//!     fn schema(&self) -> ConstructResult<Schema> {
//!         Schema::builder().input("x", 1.0).output("y", 0.0).build()
//!     }
//!     fn compute(&mut self, io: &mut Io<'_>) -> EvalResult<()> {
//!         let x = io.scalar("x")?;
//!         io.set_scalar("y", 2.0 * x)
//!     }
//! }
//!
//! let mut asm = Assembly::new("pair");
//! let a = asm.add_child("a", Box::new(Doubler)).unwrap();
//! let b = asm.add_child("b", Box::new(Doubler)).unwrap();
//! asm.connect(a, b, td_graph::FieldMap::Renamed(&[("y", "x")])).unwrap();
//! asm.evaluate().unwrap();
//! assert_eq!(asm.scalar_at("b.y").unwrap(), 4.0);
//! ```

pub mod assembly;
pub mod component;
pub mod error;
pub mod fields;
pub mod schema;
pub mod value;

pub use assembly::{Assembly, FieldMap};
pub use component::{Component, Io};
pub use error::{ConstructError, ConstructResult, EvalError, EvalResult};
pub use fields::Fields;
pub use schema::{FieldDef, PortClass, Role, Schema, SchemaBuilder};
pub use value::{FieldKind, Value};
