//! Inlet: the duct ahead of the fan.

use td_graph::{Component, ConstructResult, EvalResult, Io, PortClass, Schema};

/// Passes the inlet flow to the fan face and republishes the hilite
/// keypoint for the nacelle. Ram-drag bookkeeping is a placeholder for the
/// external aero model.
#[derive(Debug, Default)]
pub struct Inlet;

impl Component for Inlet {
    fn schema(&self) -> ConstructResult<Schema> {
        Schema::builder()
            .port_input("fl_in", PortClass::Fluid)
            .input("pamb", 101_325.0)
            .keypoint_input("fan_inlet_tip_kp")
            .param("drag_per_flow", 0.0)
            .port_output("fl_out", PortClass::Fluid)
            .keypoint_output("hilite_kp")
            .output("drag", 0.0)
            .build()
    }

    fn compute(&mut self, io: &mut Io<'_>) -> EvalResult<()> {
        let w = io.scalar("fl_in.w")?;
        io.set_scalar("fl_out.w", w)?;
        io.set_scalar("fl_out.pt", io.scalar("fl_in.pt")?)?;
        io.set_scalar("fl_out.tt", io.scalar("fl_in.tt")?)?;

        io.set_keypoint("hilite_kp", io.keypoint("fan_inlet_tip_kp")?)?;
        io.set_scalar("drag", io.scalar("drag_per_flow")? * w)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use td_graph::{Fields, Io};

    #[test]
    fn flow_passes_through() {
        let inlet = Inlet;
        let schema = inlet.schema().unwrap();
        let mut fields = Fields::from_schema(&schema);
        let mut io = Io::new(&schema, &mut fields);
        io.set_scalar("fl_in.w", 300.0).unwrap();
        io.set_scalar("fl_in.pt", 101_325.0).unwrap();
        io.set_scalar("fl_in.tt", 288.15).unwrap();

        Inlet.compute(&mut io).unwrap();
        assert_eq!(io.scalar("fl_out.w").unwrap(), 300.0);
        assert_eq!(io.scalar("drag").unwrap(), 0.0);
    }
}
