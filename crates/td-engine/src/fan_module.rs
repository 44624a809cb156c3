//! Fan module: fan, booster and splitter, collapsed into one node.

use std::f64::consts::PI;

use td_graph::{Component, ConstructResult, EvalResult, Io, PortClass, Schema};

/// Splits the inlet flow into bypass and core streams by the bypass ratio
/// and applies design pressure ratios. The bypass ratio is a free input the
/// design closure targets; the pressure ratios stand in for the external
/// fan/booster map models.
#[derive(Debug, Default)]
pub struct FanModule;

impl Component for FanModule {
    fn schema(&self) -> ConstructResult<Schema> {
        Schema::builder()
            .port_input("fl_in", PortClass::Fluid)
            .port_input("sh_in", PortClass::Shaft)
            .input("fan_diameter", 1.6)
            .input("length", 0.8)
            .input("bpr", 5.0)
            .param("fan_pr_design", 1.55)
            .param("booster_pr_design", 2.2)
            .param("booster_stage_count", 3.0)
            .port_output("fl_core", PortClass::Fluid)
            .port_output("fl_bypass", PortClass::Fluid)
            .output("fan_pr", 1.0)
            .output("booster_pr", 1.0)
            .output("n", 0.0)
            .output("utip", 0.0)
            .build()
    }

    fn compute(&mut self, io: &mut Io<'_>) -> EvalResult<()> {
        let w = io.scalar("fl_in.w")?;
        let pt = io.scalar("fl_in.pt")?;
        let tt = io.scalar("fl_in.tt")?;
        let bpr = io.scalar("bpr")?;
        let fan_pr = io.scalar("fan_pr_design")?;
        let booster_pr = io.scalar("booster_pr_design")?;

        let w_core = w / (1.0 + bpr);
        io.set_scalar("fl_core.w", w_core)?;
        io.set_scalar("fl_core.pt", pt * fan_pr * booster_pr)?;
        io.set_scalar("fl_core.tt", tt)?;
        io.set_scalar("fl_bypass.w", w - w_core)?;
        io.set_scalar("fl_bypass.pt", pt * fan_pr)?;
        io.set_scalar("fl_bypass.tt", tt)?;

        io.set_scalar("fan_pr", fan_pr)?;
        io.set_scalar("booster_pr", booster_pr)?;

        let n = io.scalar("sh_in.n")?;
        io.set_scalar("n", n)?;
        // blade tip speed from spool speed [rpm] and fan diameter
        io.set_scalar("utip", PI * io.scalar("fan_diameter")? * n / 60.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use td_core::{Tolerances, nearly_equal};
    use td_graph::Fields;

    #[test]
    fn bypass_split_conserves_flow() {
        let fm = FanModule;
        let schema = fm.schema().unwrap();
        let mut fields = Fields::from_schema(&schema);
        let mut io = Io::new(&schema, &mut fields);
        io.set_scalar("fl_in.w", 300.0).unwrap();
        io.set_scalar("fl_in.pt", 101_325.0).unwrap();
        io.set_scalar("fl_in.tt", 288.15).unwrap();
        io.set_scalar("bpr", 5.0).unwrap();

        FanModule.compute(&mut io).unwrap();
        let w_core = io.scalar("fl_core.w").unwrap();
        let w_bypass = io.scalar("fl_bypass.w").unwrap();
        let tol = Tolerances::default();
        assert!(nearly_equal(w_core, 50.0, tol));
        assert!(nearly_equal(w_core + w_bypass, 300.0, tol));
        assert!(nearly_equal(w_bypass / w_core, 5.0, tol));
    }

    #[test]
    fn tip_speed_tracks_spool_speed() {
        let fm = FanModule;
        let schema = fm.schema().unwrap();
        let mut fields = Fields::from_schema(&schema);
        let mut io = Io::new(&schema, &mut fields);
        io.set_scalar("fan_diameter", 1.549).unwrap();
        io.set_scalar("sh_in.n", 5_000.0).unwrap();

        FanModule.compute(&mut io).unwrap();
        let utip = io.scalar("utip").unwrap();
        assert!(nearly_equal(
            utip,
            PI * 1.549 * 5_000.0 / 60.0,
            Tolerances::default()
        ));
    }
}
