//! Low-pressure turbine.

use td_core::ensure_finite;
use td_graph::{Component, ConstructResult, EvalResult, Io, PortClass, Schema};

/// Expands the core stream and publishes the shaft power it extracts.
///
/// `power` and `n` are free inputs the design closure sets; the pressure
/// and temperature ratios are design-point params. `spec_work` is the
/// closure's handle on turbine loading.
#[derive(Debug, Default)]
pub struct Turbine;

impl Component for Turbine {
    fn schema(&self) -> ConstructResult<Schema> {
        Schema::builder()
            .port_input("fl_in", PortClass::Fluid)
            .port_input("kp", PortClass::Envelope)
            .input("power", 30e6)
            .input("n", 5_000.0)
            .param("pt_ratio", 0.25)
            .param("tt_ratio", 0.7)
            .param("stage_count", 4.0)
            .port_output("fl_out", PortClass::Fluid)
            .port_output("sh_out", PortClass::Shaft)
            .output("spec_work", 0.0)
            .build()
    }

    fn compute(&mut self, io: &mut Io<'_>) -> EvalResult<()> {
        let w = io.scalar("fl_in.w")?;
        io.set_scalar("fl_out.w", w)?;
        io.set_scalar("fl_out.pt", io.scalar("fl_in.pt")? * io.scalar("pt_ratio")?)?;
        io.set_scalar("fl_out.tt", io.scalar("fl_in.tt")? * io.scalar("tt_ratio")?)?;

        let power = io.scalar("power")?;
        io.set_scalar("sh_out.power", power)?;
        io.set_scalar("sh_out.n", io.scalar("n")?)?;
        io.set_scalar("spec_work", ensure_finite(power / w, "turbine spec_work")?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use td_graph::{EvalError, Fields};

    #[test]
    fn specific_work_scales_with_flow() {
        let t = Turbine;
        let schema = t.schema().unwrap();
        let mut fields = Fields::from_schema(&schema);
        let mut io = Io::new(&schema, &mut fields);
        io.set_scalar("fl_in.w", 60.0).unwrap();
        io.set_scalar("fl_in.pt", 1.0e6).unwrap();
        io.set_scalar("fl_in.tt", 900.0).unwrap();
        io.set_scalar("power", 30e6).unwrap();

        Turbine.compute(&mut io).unwrap();
        assert_eq!(io.scalar("spec_work").unwrap(), 500_000.0);
        assert_eq!(io.scalar("sh_out.power").unwrap(), 30e6);
        assert_eq!(io.scalar("fl_out.pt").unwrap(), 250_000.0);
    }

    #[test]
    fn zero_flow_is_rejected() {
        let t = Turbine;
        let schema = t.schema().unwrap();
        let mut fields = Fields::from_schema(&schema);
        let mut io = Io::new(&schema, &mut fields);
        io.set_scalar("fl_in.w", 0.0).unwrap();

        assert!(matches!(
            Turbine.compute(&mut io),
            Err(EvalError::Core(_))
        ));
    }
}
