//! td-engine: the turbofan assembly.
//!
//! Wires the geometry node and the engine's leaf components (inlet, fan
//! module, gas generator, channels, turbine, nozzles, nacelle, structures,
//! aero and weight roll-ups) into one `Assembly`, applies the flat
//! configuration record, and declares the `scaling` design method an
//! external solver closes the engine with.
//!
//! The leaf components carry the real wiring topology; their numerical
//! content is deliberately placeholder-grade — performance maps and real
//! thermodynamics live in external collaborator models.

pub mod aero;
pub mod channel;
pub mod config;
pub mod fan_module;
pub mod gas_generator;
pub mod geom;
pub mod inlet;
pub mod nacelle;
pub mod nozzle;
pub mod turbine;
pub mod turbofan;
pub mod weight;

pub use config::TurbofanConfig;
pub use turbofan::{build_turbofan, scaling_design_method};
