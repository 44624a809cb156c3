//! Exhaust nozzles.

use td_core::ensure_finite;
use td_graph::{Component, ConstructResult, EvalResult, Io, PortClass, Schema};

/// Annular exhaust nozzle, used for both the primary and secondary streams.
///
/// The exit area comes from the stage envelope the geometry publishes, so
/// thrust reacts to the area-ratio params the design closure adjusts. The
/// one-equation gross-thrust model is a stand-in for a real nozzle code.
#[derive(Debug, Default)]
pub struct Nozzle;

impl Component for Nozzle {
    fn schema(&self) -> ConstructResult<Schema> {
        Schema::builder()
            .port_input("fl_in", PortClass::Fluid)
            .port_input("kp", PortClass::Envelope)
            .input("pamb", 101_325.0)
            .param("gamma", 1.4)
            .param("r_gas", 287.0)
            .port_output("fl_out", PortClass::Fluid)
            .output("area", 1.0)
            .output("thrust", 0.0)
            .build()
    }

    fn compute(&mut self, io: &mut Io<'_>) -> EvalResult<()> {
        let w = io.scalar("fl_in.w")?;
        let pt = io.scalar("fl_in.pt")?;
        let tt = io.scalar("fl_in.tt")?;
        io.set_scalar("fl_out.w", w)?;
        io.set_scalar("fl_out.pt", pt)?;
        io.set_scalar("fl_out.tt", tt)?;

        let area = io.envelope("kp")?.exit_area();
        io.set_scalar("area", area)?;

        let pamb = io.scalar("pamb")?;
        // exit density at ambient static pressure, exit velocity from
        // continuity, gross thrust = momentum + pressure terms
        let rho = pamb / (io.scalar("r_gas")? * tt);
        let v = ensure_finite(w / (rho * area), "nozzle exit velocity")?;
        let thrust = w * v + (pt - pamb) * area;
        io.set_scalar("thrust", ensure_finite(thrust, "nozzle thrust")?)
    }
}
