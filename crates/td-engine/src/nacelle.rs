//! External lines: nacelle cowl, exhaust plug and core cowl.

use td_core::ensure_finite;
use td_graph::{Component, ConstructResult, EvalResult, Io, Schema};

/// Outer cowl wrapped around the fan case.
///
/// Collects the outward keypoints the inlet and geometry publish and
/// reports the widest point of the installation.
#[derive(Debug, Default)]
pub struct Nacelle;

impl Component for Nacelle {
    fn schema(&self) -> ConstructResult<Schema> {
        Schema::builder()
            .input("fan_diameter", 1.6)
            .keypoint_input("hilite_kp")
            .keypoint_input("ogv_exit_tip_kp")
            .keypoint_input("sec_nozzle_exit_kp")
            .param("cowl_thickness_ratio", 1.1)
            .output("max_diameter", 0.0)
            .build()
    }

    fn compute(&mut self, io: &mut Io<'_>) -> EvalResult<()> {
        let d = io.scalar("fan_diameter")? * io.scalar("cowl_thickness_ratio")?;
        io.set_scalar("max_diameter", d)
    }
}

/// Conical exhaust plug behind the primary nozzle.
#[derive(Debug, Default)]
pub struct Plug;

impl Component for Plug {
    fn schema(&self) -> ConstructResult<Schema> {
        Schema::builder()
            .keypoint_input("trf_exit_hub_kp")
            .param("angle", 15.0)
            .output("length", 0.0)
            .build()
    }

    fn compute(&mut self, io: &mut Io<'_>) -> EvalResult<()> {
        let hub = io.keypoint("trf_exit_hub_kp")?;
        let tan = io.scalar("angle")?.to_radians().tan();
        io.set_scalar("length", ensure_finite(hub.r / tan, "plug length")?)
    }
}

/// Cowl over the gas generator, from the bypass exit down to the primary
/// nozzle lip. Works with the tangent keypoints so the surface can stay
/// slope-continuous with the nozzle lines.
#[derive(Debug, Default)]
pub struct CoreCowl;

impl Component for CoreCowl {
    fn schema(&self) -> ConstructResult<Schema> {
        Schema::builder()
            .c1_input("inlet_kp")
            .c1_input("exit_kp")
            .output("length", 0.0)
            .build()
    }

    fn compute(&mut self, io: &mut Io<'_>) -> EvalResult<()> {
        let inlet = io.c1("inlet_kp")?;
        let exit = io.c1("exit_kp")?;
        io.set_scalar("length", exit.rz.z - inlet.rz.z)
    }
}
