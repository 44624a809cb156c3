//! Turbofan envelope chain.
//!
//! Reference for every dimension is the fan diameter. Each stage length is a
//! named ratio times a reference radius (fan radius, or an upstream stage
//! radius where the engine scales that way: core length off the core inlet
//! radius, turbine-side lengths off the turbine radius). Consecutive stages
//! share corner keypoints by construction, so the exported envelope is
//! continuous without any stitching downstream.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};
use td_core::{CoreResult, Real, ensure_finite};

use crate::envelope::Envelope;
use crate::keypoint::{C1Keypoint, Keypoint, slope_to_drdz};

/// Ratios, angles and relative positions driving the envelope chain.
///
/// Defaults are the generic narrow-body values; a design closure adjusts the
/// free ones. Non-positive inputs are not rejected here: bound violations are
/// the closure layer's business, not the geometry's.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeomParams {
    /// Fan diameter, the global reference dimension.
    pub fan_diameter: Real,

    /// Inlet length relative to fan radius.
    pub inlet_length_ratio: Real,
    /// Inlet hilite radius relative to fan radius.
    pub inlet_radius_ratio: Real,

    /// Fan module length relative to fan radius.
    pub fanmodule_length_ratio: Real,
    /// Fan OGV exit hub-to-tip ratio.
    pub ogv_exit_hqt: Real,

    /// Core inlet radius relative to fan radius.
    pub core_inlet_radius_ratio: Real,
    /// Core exit radius relative to fan radius.
    pub core_exit_radius_ratio: Real,
    /// Core length relative to its own inlet radius.
    pub core_length_ratio: Real,

    /// Shaft radius relative to fan radius.
    pub shaft_radius_ratio: Real,

    /// Turbine center frame exit radius relative to its inlet radius.
    pub tcf_exit_radius_ratio: Real,
    /// Turbine center frame length relative to its inlet tip radius.
    pub tcf_length_ratio: Real,

    /// Turbine radius relative to fan radius.
    pub turbine_radius_ratio: Real,
    /// Turbine length relative to turbine radius.
    pub turbine_length_ratio: Real,
    /// Turbine flowpath exit hub-to-tip ratio.
    pub turbine_fp_exit_hqt: Real,
    /// Turbine rear frame length relative to turbine radius.
    pub trf_length_ratio: Real,

    /// Core cowl slope angle in degrees; negative converges.
    pub core_cowl_slope: Real,

    /// Primary nozzle length relative to turbine radius.
    pub primary_nozzle_length_ratio: Real,
    /// Secondary nozzle length relative to fan radius.
    pub secondary_nozzle_length_ratio: Real,

    /// Primary nozzle exit area ratio.
    pub pri_nozzle_area_ratio: Real,
    /// Secondary nozzle exit area ratio.
    pub sec_nozzle_area_ratio: Real,

    /// Forward mount position relative to the fan module tip chord.
    pub frd_mount_relative: Real,
    /// Aft mount position relative to the turbine rear frame tip chord.
    pub aft_mount_relative: Real,
}

impl Default for GeomParams {
    fn default() -> Self {
        Self {
            fan_diameter: 1.6,
            inlet_length_ratio: 0.4,
            inlet_radius_ratio: 0.9,
            fanmodule_length_ratio: 1.0,
            ogv_exit_hqt: 0.6,
            core_inlet_radius_ratio: 0.25,
            core_exit_radius_ratio: 0.3,
            core_length_ratio: 3.0,
            shaft_radius_ratio: 0.1,
            tcf_exit_radius_ratio: 1.2,
            tcf_length_ratio: 0.15,
            turbine_radius_ratio: 0.65,
            turbine_length_ratio: 1.0,
            turbine_fp_exit_hqt: 0.8,
            trf_length_ratio: 0.15,
            core_cowl_slope: -20.0,
            primary_nozzle_length_ratio: 0.5,
            secondary_nozzle_length_ratio: 0.2,
            pri_nozzle_area_ratio: 0.9,
            sec_nozzle_area_ratio: 0.9,
            frd_mount_relative: 0.75,
            aft_mount_relative: 0.75,
        }
    }
}

/// Everything one geometry pass produces.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EngineEnvelopes {
    pub inlet: Envelope,
    pub fan_module: Envelope,
    pub shaft: Envelope,
    pub core: Envelope,
    pub tcf: Envelope,
    pub turbine: Envelope,
    pub trf: Envelope,
    pub primary_nozzle: Envelope,
    pub secondary_nozzle: Envelope,

    pub fan_inlet_tip: Keypoint,
    pub ogv_exit_hub: Keypoint,
    pub ogv_exit_tip: Keypoint,
    pub turbine_exit_tip: Keypoint,
    pub sec_nozzle_exit_tip: Keypoint,

    pub pri_nozzle_exit: C1Keypoint,
    pub sec_nozzle_exit_hub: C1Keypoint,

    pub frd_mount: Keypoint,
    pub aft_mount: Keypoint,

    pub fan_module_length: Real,
    pub engine_length: Real,
}

/// Exit tip radius preserving annulus-area scaling: the exit annulus is
/// `area_ratio` times the inlet annulus, at the given exit hub radius.
pub fn area_ratio_exit_tip_r(
    area_ratio: Real,
    inlet_area: Real,
    exit_hub_r: Real,
) -> CoreResult<Real> {
    ensure_finite(
        (area_ratio * inlet_area / PI + exit_hub_r.powi(2)).sqrt(),
        "nozzle exit tip radius",
    )
}

/// Run the envelope chain once.
///
/// Fixed topological order: fan module first, inlet computed backward from
/// it, then shaft, core, turbine center frame, turbine, turbine rear frame,
/// the two nozzles, and finally the mount points.
pub fn compute(p: &GeomParams) -> CoreResult<EngineEnvelopes> {
    let fan_radius = p.fan_diameter / 2.0;

    let fanmodule_length = fan_radius * p.fanmodule_length_ratio;
    let inlet_radius = fan_radius * p.inlet_radius_ratio;
    let inlet_length = fan_radius * p.inlet_length_ratio;
    let core_inlet_radius = fan_radius * p.core_inlet_radius_ratio;
    let core_exit_radius = fan_radius * p.core_exit_radius_ratio;
    let core_length = core_inlet_radius * p.core_length_ratio;
    let shaft_radius = fan_radius * p.shaft_radius_ratio;
    let turbine_radius = fan_radius * p.turbine_radius_ratio;
    let turbine_length = turbine_radius * p.turbine_length_ratio;
    let trf_length = turbine_radius * p.trf_length_ratio;
    let primary_nozzle_length = turbine_radius * p.primary_nozzle_length_ratio;

    let mut out = EngineEnvelopes::default();
    out.fan_module_length = fanmodule_length;
    out.engine_length = fanmodule_length + core_length + turbine_length + trf_length;

    // fan module
    let fm = Envelope {
        inlet_hub: Keypoint::ORIGIN,
        inlet_tip: Keypoint::new(fan_radius, 0.0),
        exit_hub: Keypoint::ORIGIN.shifted_z(fanmodule_length),
        exit_tip: Keypoint::new(fan_radius, 0.0).shifted_z(fanmodule_length),
    };
    out.fan_module = fm;
    out.fan_inlet_tip = fm.inlet_tip;
    out.ogv_exit_hub = fm.exit_tip.with_r(fm.exit_tip.r * p.ogv_exit_hqt);
    out.ogv_exit_tip = fm.exit_tip;

    // inlet, backward from the fan module face
    out.inlet = Envelope {
        inlet_hub: Keypoint::new(0.0, fm.inlet_hub.z - inlet_length),
        inlet_tip: Keypoint::new(inlet_radius, fm.inlet_hub.z - inlet_length),
        exit_hub: fm.inlet_hub,
        exit_tip: fm.inlet_tip,
    };

    // shaft inlet plane; exit waits for the tcf length
    let shaft_inlet_hub = fm.exit_hub;
    let shaft_inlet_tip = fm.exit_hub.shifted(shaft_radius, 0.0);

    // core
    let core = Envelope {
        inlet_hub: shaft_inlet_tip,
        inlet_tip: Keypoint::new(core_inlet_radius, shaft_inlet_tip.z),
        exit_hub: shaft_inlet_tip.shifted_z(core_length),
        exit_tip: Keypoint::new(core_exit_radius, shaft_inlet_tip.z + core_length),
    };
    out.core = core;

    // turbine center frame, length chained off its own inlet tip radius
    let tcf_length = core.exit_tip.r * p.tcf_length_ratio;
    let tcf = Envelope {
        inlet_hub: core.exit_hub,
        inlet_tip: core.exit_tip,
        exit_hub: core.exit_hub.shifted_z(tcf_length),
        exit_tip: core
            .exit_tip
            .with_r(core.exit_tip.r * p.tcf_exit_radius_ratio)
            .shifted_z(tcf_length),
    };
    out.tcf = tcf;

    // shaft spans the core and the tcf
    let shaft_length = core_length + tcf_length;
    out.shaft = Envelope {
        inlet_hub: shaft_inlet_hub,
        inlet_tip: shaft_inlet_tip,
        exit_hub: shaft_inlet_hub.shifted_z(shaft_length),
        exit_tip: shaft_inlet_tip.shifted_z(shaft_length),
    };

    // turbine
    let trb_exit_z = out.shaft.exit_hub.z + turbine_length;
    let turbine = Envelope {
        inlet_hub: out.shaft.exit_hub,
        inlet_tip: tcf.exit_tip,
        exit_hub: Keypoint::new(out.shaft.exit_hub.r, trb_exit_z),
        exit_tip: Keypoint::new(turbine_radius, trb_exit_z),
    };
    out.turbine = turbine;
    out.turbine_exit_tip = turbine.exit_tip;

    // turbine rear frame; flowpath hub steps up to the exit hub-to-tip ratio
    let trf_inlet_hub_r = p.turbine_fp_exit_hqt * turbine.exit_tip.r;
    let trf_exit_z = turbine.exit_hub.z + trf_length;
    let trf = Envelope {
        inlet_hub: Keypoint::new(trf_inlet_hub_r, turbine.exit_hub.z),
        inlet_tip: turbine.exit_tip,
        exit_hub: Keypoint::new(trf_inlet_hub_r, trf_exit_z),
        exit_tip: Keypoint::new(turbine.exit_tip.r, trf_exit_z),
    };
    out.trf = trf;

    // primary nozzle
    let mut pri = Envelope {
        inlet_hub: trf.exit_hub,
        inlet_tip: trf.exit_tip,
        exit_hub: trf.exit_hub.shifted_z(primary_nozzle_length),
        exit_tip: Keypoint::default(),
    };
    let pri_exit_tip_r =
        area_ratio_exit_tip_r(p.pri_nozzle_area_ratio, pri.inlet_area(), pri.inlet_hub.r)?;
    pri.exit_tip = Keypoint::new(pri_exit_tip_r, trf.exit_tip.z);
    out.primary_nozzle = pri;

    // Cowl faring past the nozzle: the slope constraint may demand a longer
    // axial offset than the nominal length. Keep the max of both candidates.
    let slope_tan = p.core_cowl_slope.to_radians().tan();
    let min_dz = ensure_finite(
        (pri.exit_tip.r - trf.exit_tip.r) / slope_tan,
        "primary nozzle cowl offset",
    )?;
    let dz = min_dz.max(primary_nozzle_length);
    let dr = dz * slope_tan;
    out.pri_nozzle_exit = C1Keypoint::new(
        trf.exit_tip.shifted(dr, dz),
        slope_to_drdz(p.core_cowl_slope),
    );

    // secondary nozzle, exit plane at 85% of the fan-exit to turbine-exit span
    let sec_exit_z = (turbine.exit_tip.z - fm.exit_tip.z) * 0.85 + fm.exit_tip.z;
    let cowl_dz = trf.exit_tip.z - sec_exit_z;
    let sec_exit_hub_r = trf.exit_tip.r - cowl_dz * slope_tan;
    let mut sec = Envelope {
        inlet_hub: out.ogv_exit_hub,
        inlet_tip: out.ogv_exit_tip,
        exit_hub: Keypoint::new(sec_exit_hub_r, sec_exit_z),
        exit_tip: Keypoint::default(),
    };
    let sec_exit_tip_r =
        area_ratio_exit_tip_r(p.sec_nozzle_area_ratio, sec.inlet_area(), sec_exit_hub_r)?;
    sec.exit_tip = Keypoint::new(sec_exit_tip_r, sec_exit_z);
    out.secondary_nozzle = sec;
    out.sec_nozzle_exit_tip = sec.exit_tip;
    out.sec_nozzle_exit_hub = C1Keypoint::new(sec.exit_hub, slope_to_drdz(p.core_cowl_slope));

    // mounts: unclamped interpolation along the tip chords
    out.frd_mount = Keypoint::lerp(fm.inlet_tip, fm.exit_tip, p.frd_mount_relative);
    out.aft_mount = Keypoint::lerp(trf.inlet_tip, trf.exit_tip, p.aft_mount_relative);

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use td_core::{Tolerances, nearly_equal};

    fn close(a: Keypoint, b: Keypoint) -> bool {
        let tol = Tolerances::default();
        nearly_equal(a.r, b.r, tol) && nearly_equal(a.z, b.z, tol)
    }

    #[test]
    fn cfm56_scale_fan_module() {
        let p = GeomParams {
            fan_diameter: 1.549,
            fanmodule_length_ratio: 1.0,
            ..GeomParams::default()
        };
        let out = compute(&p).unwrap();

        assert_eq!(out.fan_module_length, 0.7745);
        assert_eq!(out.fan_module.inlet_tip, Keypoint::new(0.7745, 0.0));
        assert_eq!(out.fan_module.exit_tip, Keypoint::new(0.7745, 0.7745));
    }

    #[test]
    fn adjacent_stages_share_keypoints_exactly() {
        let out = compute(&GeomParams::default()).unwrap();

        // Exact equality: both sides are the same derived value, not
        // independently recomputed.
        assert_eq!(out.inlet.exit_hub, out.fan_module.inlet_hub);
        assert_eq!(out.inlet.exit_tip, out.fan_module.inlet_tip);
        assert_eq!(out.shaft.inlet_hub, out.fan_module.exit_hub);
        assert_eq!(out.core.inlet_hub, out.shaft.inlet_tip);
        assert_eq!(out.tcf.inlet_hub, out.core.exit_hub);
        assert_eq!(out.tcf.inlet_tip, out.core.exit_tip);
        assert_eq!(out.turbine.inlet_hub, out.shaft.exit_hub);
        assert_eq!(out.turbine.inlet_tip, out.tcf.exit_tip);
        assert_eq!(out.trf.inlet_tip, out.turbine.exit_tip);
        assert_eq!(out.primary_nozzle.inlet_hub, out.trf.exit_hub);
        assert_eq!(out.primary_nozzle.inlet_tip, out.trf.exit_tip);
        assert_eq!(out.secondary_nozzle.inlet_hub, out.ogv_exit_hub);
        assert_eq!(out.secondary_nozzle.inlet_tip, out.ogv_exit_tip);
    }

    #[test]
    fn inlet_computed_backward_from_fan_face() {
        let p = GeomParams::default();
        let out = compute(&p).unwrap();
        let fan_radius = p.fan_diameter / 2.0;

        assert!(close(
            out.inlet.inlet_hub,
            Keypoint::new(0.0, -fan_radius * p.inlet_length_ratio),
        ));
        assert!(close(
            out.inlet.inlet_tip,
            Keypoint::new(
                fan_radius * p.inlet_radius_ratio,
                -fan_radius * p.inlet_length_ratio
            ),
        ));
    }

    #[test]
    fn nozzle_exit_preserves_annulus_area_scaling() {
        let out = compute(&GeomParams::default()).unwrap();
        let pri = out.primary_nozzle;

        let exit_annulus = PI * (pri.exit_tip.r.powi(2) - pri.inlet_hub.r.powi(2));
        let tol = Tolerances::default();
        assert!(nearly_equal(exit_annulus, 0.9 * pri.inlet_area(), tol));
    }

    #[test]
    fn steeper_cowl_slope_pulls_exit_tip_inward() {
        let mut prev = Real::INFINITY;
        for slope in [-15.0, -20.0, -30.0, -40.0] {
            let p = GeomParams {
                core_cowl_slope: slope,
                ..GeomParams::default()
            };
            let out = compute(&p).unwrap();
            let r = out.pri_nozzle_exit.rz.r;
            assert!(r < prev, "slope {slope} gave r {r} >= {prev}");
            prev = r;
        }
    }

    #[test]
    fn cowl_slope_offset_keeps_longer_candidate() {
        // A nearly flat slope makes the slope-driven offset dominate the
        // nominal ratio-based length.
        let p = GeomParams {
            core_cowl_slope: -1.0,
            ..GeomParams::default()
        };
        let out = compute(&p).unwrap();

        let turbine_radius = p.fan_diameter / 2.0 * p.turbine_radius_ratio;
        let nominal = turbine_radius * p.primary_nozzle_length_ratio;
        let dz = out.pri_nozzle_exit.rz.z - out.trf.exit_tip.z;
        assert!(dz > nominal);

        // Default slope: nominal length wins.
        let out = compute(&GeomParams::default()).unwrap();
        let dz = out.pri_nozzle_exit.rz.z - out.trf.exit_tip.z;
        assert_eq!(dz, nominal);
    }

    #[test]
    fn mounts_interpolate_linearly() {
        for (rel, expect_at) in [(0.0, 0.0_f64), (0.5, 0.5), (1.0, 1.0)] {
            let p = GeomParams {
                frd_mount_relative: rel,
                aft_mount_relative: rel,
                ..GeomParams::default()
            };
            let out = compute(&p).unwrap();

            let expected = Keypoint::lerp(
                out.fan_module.inlet_tip,
                out.fan_module.exit_tip,
                expect_at,
            );
            assert_eq!(out.frd_mount, expected);
            let expected = Keypoint::lerp(out.trf.inlet_tip, out.trf.exit_tip, expect_at);
            assert_eq!(out.aft_mount, expected);
        }
    }

    #[test]
    fn zero_slope_with_area_change_is_an_evaluation_error() {
        // tan(0) = 0 makes the slope-driven offset divide by zero.
        let p = GeomParams {
            core_cowl_slope: 0.0,
            ..GeomParams::default()
        };
        assert!(compute(&p).is_err());
    }

    #[test]
    fn engine_length_sums_stage_lengths() {
        let p = GeomParams::default();
        let out = compute(&p).unwrap();
        let fan_radius = p.fan_diameter / 2.0;
        let core_length = fan_radius * p.core_inlet_radius_ratio * p.core_length_ratio;
        let turbine_radius = fan_radius * p.turbine_radius_ratio;
        let expected = fan_radius * p.fanmodule_length_ratio
            + core_length
            + turbine_radius * p.turbine_length_ratio
            + turbine_radius * p.trf_length_ratio;
        assert!(nearly_equal(
            out.engine_length,
            expected,
            Tolerances::default()
        ));
    }
}
