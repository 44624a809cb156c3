//! Whole-engine aerodynamic roll-up.

use td_core::ensure_finite;
use td_graph::{Component, ConstructResult, EvalResult, Io, PortClass, Schema};

/// Collects the per-stage performance figures into the engine-level ones
/// the design closure and the customer deck read: net thrust, overall
/// pressure ratio, specific fuel consumption and the two pressure splits.
#[derive(Debug, Default)]
pub struct TurbofanAero;

impl Component for TurbofanAero {
    fn schema(&self) -> ConstructResult<Schema> {
        Schema::builder()
            .input("fuel_w", 1.0)
            .input("inlet_drag", 0.0)
            .input("fan_pr", 1.0)
            .input("booster_pr", 1.0)
            .input("core_opr", 1.0)
            .input("primary_nozzle_thrust", 0.0)
            .input("secondary_nozzle_thrust", 0.0)
            .port_input("fl_primary_nozzle", PortClass::Fluid)
            .port_input("fl_secondary_nozzle", PortClass::Fluid)
            .output("thrust", 0.0)
            .output("opr", 1.0)
            .output("sfc", 0.0)
            .output("pr_split", 1.0)
            .output("pr_nozzle", 1.0)
            .build()
    }

    fn compute(&mut self, io: &mut Io<'_>) -> EvalResult<()> {
        let thrust = io.scalar("primary_nozzle_thrust")?
            + io.scalar("secondary_nozzle_thrust")?
            - io.scalar("inlet_drag")?;
        io.set_scalar("thrust", thrust)?;

        let fan_pr = io.scalar("fan_pr")?;
        let booster_pr = io.scalar("booster_pr")?;
        let core_opr = io.scalar("core_opr")?;
        io.set_scalar("opr", fan_pr * booster_pr * core_opr)?;
        io.set_scalar(
            "sfc",
            ensure_finite(io.scalar("fuel_w")? / thrust, "sfc")?,
        )?;
        io.set_scalar(
            "pr_split",
            ensure_finite(fan_pr * booster_pr / core_opr, "pr_split")?,
        )?;
        io.set_scalar(
            "pr_nozzle",
            ensure_finite(
                io.scalar("fl_secondary_nozzle.pt")? / io.scalar("fl_primary_nozzle.pt")?,
                "pr_nozzle",
            )?,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use td_graph::Fields;

    #[test]
    fn net_thrust_subtracts_inlet_drag() {
        let a = TurbofanAero;
        let schema = a.schema().unwrap();
        let mut fields = Fields::from_schema(&schema);
        let mut io = Io::new(&schema, &mut fields);
        io.set_scalar("primary_nozzle_thrust", 30_000.0).unwrap();
        io.set_scalar("secondary_nozzle_thrust", 90_000.0).unwrap();
        io.set_scalar("inlet_drag", 5_000.0).unwrap();
        io.set_scalar("fuel_w", 1.15).unwrap();
        io.set_scalar("fan_pr", 1.55).unwrap();
        io.set_scalar("booster_pr", 2.2).unwrap();
        io.set_scalar("core_opr", 11.0).unwrap();
        io.set_scalar("fl_primary_nozzle.pt", 250_000.0).unwrap();
        io.set_scalar("fl_secondary_nozzle.pt", 157_000.0).unwrap();

        TurbofanAero.compute(&mut io).unwrap();
        assert_eq!(io.scalar("thrust").unwrap(), 115_000.0);
        assert_eq!(io.scalar("opr").unwrap(), 1.55 * 2.2 * 11.0);
        assert_eq!(io.scalar("sfc").unwrap(), 1.15 / 115_000.0);
        assert_eq!(io.scalar("pr_split").unwrap(), 1.55 * 2.2 / 11.0);
        assert_eq!(io.scalar("pr_nozzle").unwrap(), 157_000.0 / 250_000.0);
    }
}
