//! td-geom: keypoint geometry model for the turbofan envelope.
//!
//! Provides:
//! - `Keypoint` / `C1Keypoint`: immutable (radius, axial) corner points,
//!   optionally carrying a local slope for tangent-continuous cowls
//! - `Envelope`: the hub/tip corner bundle of one annular stage
//! - `GeomParams` / `compute`: the full engine envelope chain, fan module
//!   through nozzles and mount points, scaled off the fan diameter
//!
//! Everything here is a pure function of its inputs: keypoints are produced
//! once per evaluation pass and recomputed, never mutated, when an upstream
//! value changes. Downstream CAD kernels consume the exported keypoints and
//! rely on the continuity invariants (adjacent stages share corner points
//! exactly, because both sides are the same derived value).

pub mod envelope;
pub mod keypoint;
pub mod turbofan;

pub use envelope::Envelope;
pub use keypoint::{C1Keypoint, Keypoint, slope_to_drdz};
pub use turbofan::{EngineEnvelopes, GeomParams, compute};
