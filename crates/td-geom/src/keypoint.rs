//! Envelope corner points.

use serde::{Deserialize, Serialize};
use td_core::Real;

/// A 2D envelope corner: radius and axial position, consistent length units.
///
/// Keypoints are immutable snapshots; derivation helpers return new values.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Keypoint {
    pub r: Real,
    pub z: Real,
}

impl Keypoint {
    pub const ORIGIN: Keypoint = Keypoint { r: 0.0, z: 0.0 };

    pub fn new(r: Real, z: Real) -> Self {
        Self { r, z }
    }

    /// Same radius, shifted axially.
    pub fn shifted_z(self, dz: Real) -> Self {
        Self {
            r: self.r,
            z: self.z + dz,
        }
    }

    pub fn shifted(self, dr: Real, dz: Real) -> Self {
        Self {
            r: self.r + dr,
            z: self.z + dz,
        }
    }

    pub fn with_r(self, r: Real) -> Self {
        Self { r, z: self.z }
    }

    pub fn with_z(self, z: Real) -> Self {
        Self { r: self.r, z }
    }

    /// Linear interpolation from `a` to `b`.
    ///
    /// `t` is not clamped: values outside [0, 1] extrapolate. Mount points
    /// declared past a stage's ends are accepted, not an error.
    pub fn lerp(a: Keypoint, b: Keypoint, t: Real) -> Keypoint {
        Keypoint {
            r: (1.0 - t) * a.r + t * b.r,
            z: (1.0 - t) * a.z + t * b.z,
        }
    }
}

/// A keypoint carrying the local slope dr/dz of the surface through it.
///
/// Used where the downstream surface builder needs tangent (C1) continuity,
/// e.g. the nozzle exit farings.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct C1Keypoint {
    pub rz: Keypoint,
    pub drdz: Real,
}

impl C1Keypoint {
    pub fn new(rz: Keypoint, drdz: Real) -> Self {
        Self { rz, drdz }
    }
}

/// Convert a cowl slope angle in degrees to the dr/dz carried by C1 keypoints.
///
/// Converging cowls use a negative angle: radius decreases with increasing z.
pub fn slope_to_drdz(angle_deg: Real) -> Real {
    angle_deg.to_radians().tan()
}
