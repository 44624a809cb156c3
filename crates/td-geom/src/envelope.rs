//! Annular stage envelopes.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};
use td_core::Real;

use crate::keypoint::Keypoint;

/// Corner keypoints of one annular flow-path stage.
///
/// The four corners bound the stage cross-section: hub (inner) and tip
/// (outer) radii at the inlet and exit planes.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Envelope {
    pub inlet_hub: Keypoint,
    pub inlet_tip: Keypoint,
    pub exit_hub: Keypoint,
    pub exit_tip: Keypoint,
}

impl Envelope {
    /// Annulus area of the inlet plane.
    pub fn inlet_area(&self) -> Real {
        PI * (self.inlet_tip.r.powi(2) - self.inlet_hub.r.powi(2))
    }

    /// Annulus area of the exit plane.
    pub fn exit_area(&self) -> Real {
        PI * (self.exit_tip.r.powi(2) - self.exit_hub.r.powi(2))
    }
}
