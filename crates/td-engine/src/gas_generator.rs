//! Gas generator: HP compressor, combustor and HP turbine as one node.

use td_graph::{Component, ConstructResult, EvalResult, Io, PortClass, Schema};

/// Compresses the core stream, adds fuel and raises the total temperature.
///
/// The design-point pressure and temperature ratios stand in for the
/// compressor map and combustor model; `fuel_w` is a free input the design
/// closure or an upstream control picks.
#[derive(Debug, Default)]
pub struct GasGenerator;

impl Component for GasGenerator {
    fn schema(&self) -> ConstructResult<Schema> {
        Schema::builder()
            .port_input("fl_in", PortClass::Fluid)
            .port_input("kp", PortClass::Envelope)
            .input("fuel_w", 1.0)
            .param("opr_design", 11.0)
            .param("temp_ratio", 3.0)
            .param("compressor_stage_count", 9.0)
            .param("turbine_stage_count", 1.0)
            .param("n_design", 15_000.0)
            .port_output("fl_out", PortClass::Fluid)
            .output("opr", 1.0)
            .output("n", 0.0)
            .build()
    }

    fn compute(&mut self, io: &mut Io<'_>) -> EvalResult<()> {
        let fuel_w = io.scalar("fuel_w")?;
        io.set_scalar("fl_out.w", io.scalar("fl_in.w")? + fuel_w)?;
        let opr = io.scalar("opr_design")?;
        io.set_scalar("fl_out.pt", io.scalar("fl_in.pt")? * opr)?;
        io.set_scalar("fl_out.tt", io.scalar("fl_in.tt")? * io.scalar("temp_ratio")?)?;

        io.set_scalar("opr", opr)?;
        io.set_scalar("n", io.scalar("n_design")?)
    }
}
