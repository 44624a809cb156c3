//! Annular ducts between the engine's rotating stages.

use td_graph::{Component, ConstructResult, EvalResult, Io, PortClass, Schema};

/// Plain transfer duct (turbine center frame, turbine rear frame).
///
/// Carries the flow across with a pressure-loss param and holds the stage
/// envelope so the duct shows up in path reads like any other stage.
#[derive(Debug, Default)]
pub struct Channel;

impl Component for Channel {
    fn schema(&self) -> ConstructResult<Schema> {
        Schema::builder()
            .port_input("fl_in", PortClass::Fluid)
            .port_input("kp", PortClass::Envelope)
            .param("dp_ratio", 0.0)
            .port_output("fl_out", PortClass::Fluid)
            .build()
    }

    fn compute(&mut self, io: &mut Io<'_>) -> EvalResult<()> {
        io.set_scalar("fl_out.w", io.scalar("fl_in.w")?)?;
        let dp = io.scalar("dp_ratio")?;
        io.set_scalar("fl_out.pt", io.scalar("fl_in.pt")? * (1.0 - dp))?;
        io.set_scalar("fl_out.tt", io.scalar("fl_in.tt")?)
    }
}

/// Bypass duct between the OGV exit and the secondary nozzle.
///
/// Same flow bookkeeping as `Channel`, plus the core cowl slope the
/// geometry hands down for the inner bypass line.
#[derive(Debug, Default)]
pub struct FanDuct;

impl Component for FanDuct {
    fn schema(&self) -> ConstructResult<Schema> {
        Schema::builder()
            .port_input("fl_in", PortClass::Fluid)
            .port_input("kp", PortClass::Envelope)
            .input("core_cowl_slope", -20.0)
            .param("dp_ratio", 0.0)
            .port_output("fl_out", PortClass::Fluid)
            .build()
    }

    fn compute(&mut self, io: &mut Io<'_>) -> EvalResult<()> {
        io.set_scalar("fl_out.w", io.scalar("fl_in.w")?)?;
        let dp = io.scalar("dp_ratio")?;
        io.set_scalar("fl_out.pt", io.scalar("fl_in.pt")? * (1.0 - dp))?;
        io.set_scalar("fl_out.tt", io.scalar("fl_in.tt")?)
    }
}
