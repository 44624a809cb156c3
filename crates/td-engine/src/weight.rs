//! Installed powerplant weight correlation.

use td_graph::{Component, ConstructResult, EvalResult, Io, Schema};

/// Scales a reference engine's weight by fan diameter and overall length.
///
/// The reference figures and exponents describe the CFM56-7 class; the
/// correlation only claims validity near that point.
#[derive(Debug, Default)]
pub struct TurbofanWeight;

impl Component for TurbofanWeight {
    fn schema(&self) -> ConstructResult<Schema> {
        Schema::builder()
            .input("fan_diameter", 1.6)
            .input("length", 3.0)
            .param("ipps_weight_ref", 7_500.0)
            .param("fan_diameter_ref", 1.549)
            .param("length_ref", 3.0)
            .param("exp_d", 2.4)
            .param("exp_l", 1.1)
            .output("ipps_weight", 0.0)
            .build()
    }

    fn compute(&mut self, io: &mut Io<'_>) -> EvalResult<()> {
        let d_term = (io.scalar("fan_diameter")? / io.scalar("fan_diameter_ref")?)
            .powf(io.scalar("exp_d")?);
        let l_term = (io.scalar("length")? / io.scalar("length_ref")?).powf(io.scalar("exp_l")?);
        io.set_scalar("ipps_weight", io.scalar("ipps_weight_ref")? * d_term * l_term)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use td_graph::Fields;

    #[test]
    fn reference_engine_weighs_reference_weight() {
        let w = TurbofanWeight;
        let schema = w.schema().unwrap();
        let mut fields = Fields::from_schema(&schema);
        let mut io = Io::new(&schema, &mut fields);
        io.set_scalar("fan_diameter", 1.549).unwrap();
        io.set_scalar("length", 3.0).unwrap();

        TurbofanWeight.compute(&mut io).unwrap();
        assert_eq!(io.scalar("ipps_weight").unwrap(), 7_500.0);
    }

    #[test]
    fn weight_grows_with_diameter() {
        let w = TurbofanWeight;
        let schema = w.schema().unwrap();
        let mut fields = Fields::from_schema(&schema);
        let mut io = Io::new(&schema, &mut fields);
        io.set_scalar("fan_diameter", 2.0).unwrap();
        io.set_scalar("length", 3.0).unwrap();

        TurbofanWeight.compute(&mut io).unwrap();
        let heavy = io.scalar("ipps_weight").unwrap();
        assert!(heavy > 7_500.0);
        assert_eq!(heavy, 7_500.0 * (2.0f64 / 1.549).powf(2.4));
    }
}
