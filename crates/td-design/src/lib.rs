//! td-design: design-closure declarations.
//!
//! A `DesignMethod` is the manifest an external nonlinear solver consumes:
//! an ordered list of free unknowns (dotted-path scalars, with optional
//! bounds and a maximum relative step per iteration) and an ordered list of
//! targets (scalars to drive to a fixed value, or to equality with a
//! separately wired reference). This layer does no solving; its obligation
//! is to record the declaration faithfully, in order, with paths resolved
//! and validated against the assembly at declaration time.
//!
//! Unknown and target counts need not match here: rejecting an ill-posed
//! system is the solver's call, and declaration order is preserved because
//! it shapes the solver's Jacobian, not this layer's correctness.

use td_core::{Real, VarHandle};
use td_graph::{Assembly, ConstructResult, EvalResult};

/// Bounds and step metadata of one unknown. Defaults are unbounded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnknownOpts {
    pub lower_bound: Real,
    pub upper_bound: Real,
    /// Largest relative change a single solver iteration may apply.
    pub max_rel_step: Real,
}

impl Default for UnknownOpts {
    fn default() -> Self {
        Self {
            lower_bound: Real::NEG_INFINITY,
            upper_bound: Real::INFINITY,
            max_rel_step: Real::INFINITY,
        }
    }
}

/// A free design variable.
#[derive(Debug, Clone, PartialEq)]
pub struct Unknown {
    pub path: String,
    pub handle: VarHandle,
    pub opts: UnknownOpts,
}

/// A quantity the solver must drive to its desired value.
#[derive(Debug, Clone, PartialEq)]
pub struct Target {
    pub path: String,
    pub handle: VarHandle,
    /// `None` means: drive to equality with the reference the field is
    /// already wired to elsewhere.
    pub value: Option<Real>,
}

/// One named closure declaration, scoped to an assembly.
#[derive(Debug, Clone, Default)]
pub struct DesignMethod {
    name: String,
    unknowns: Vec<Unknown>,
    targets: Vec<Target>,
}

impl DesignMethod {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            unknowns: Vec::new(),
            targets: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Append an unbounded unknown.
    pub fn add_unknown(&mut self, asm: &Assembly, path: &str) -> ConstructResult<()> {
        self.add_unknown_with(asm, path, UnknownOpts::default())
    }

    /// Append an unknown with bounds/step metadata.
    ///
    /// The path must resolve to a writable scalar field of the assembly —
    /// the solver writes unknowns, so a fan-in alias is rejected the same
    /// way an unresolved path is, here, not at first solver use.
    pub fn add_unknown_with(
        &mut self,
        asm: &Assembly,
        path: &str,
        opts: UnknownOpts,
    ) -> ConstructResult<()> {
        let handle = asm.resolve_scalar_writable(path)?;
        self.unknowns.push(Unknown {
            path: path.to_string(),
            handle,
            opts,
        });
        Ok(())
    }

    /// Append a target, with an optional fixed desired value.
    pub fn add_target(
        &mut self,
        asm: &Assembly,
        path: &str,
        value: Option<Real>,
    ) -> ConstructResult<()> {
        let handle = asm.resolve_scalar(path)?;
        self.targets.push(Target {
            path: path.to_string(),
            handle,
            value,
        });
        Ok(())
    }

    pub fn unknowns(&self) -> &[Unknown] {
        &self.unknowns
    }

    pub fn targets(&self) -> &[Target] {
        &self.targets
    }

    /// Current unknown values, in declaration order.
    pub fn read_unknowns(&self, asm: &Assembly) -> EvalResult<Vec<Real>> {
        self.unknowns.iter().map(|u| asm.scalar(u.handle)).collect()
    }

    /// Current target values, in declaration order.
    pub fn read_targets(&self, asm: &Assembly) -> EvalResult<Vec<Real>> {
        self.targets.iter().map(|t| asm.scalar(t.handle)).collect()
    }

    /// Write a solver-proposed unknown vector back into the assembly.
    ///
    /// Values are applied verbatim; respecting bounds and step limits is the
    /// solver's contract, not enforced here.
    pub fn apply_unknowns(&self, asm: &mut Assembly, values: &[Real]) -> EvalResult<()> {
        debug_assert_eq!(values.len(), self.unknowns.len());
        for (u, v) in self.unknowns.iter().zip(values) {
            asm.set_scalar(u.handle, *v)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use td_graph::{Component, ConstructError, EvalResult as GraphEvalResult, Io, Schema};

    struct Leaf;

    impl Component for Leaf {
        fn schema(&self) -> ConstructResult<Schema> {
            Schema::builder()
                .param("ratio", 0.65)
                .input("speed", 0.0)
                .output("psi", 0.0)
                .keypoint_output("tip")
                .build()
        }

        fn compute(&mut self, io: &mut Io<'_>) -> GraphEvalResult<()> {
            let v = io.scalar("ratio")? * 2.0;
            io.set_scalar("psi", v)
        }
    }

    fn assembly() -> Assembly {
        let mut asm = Assembly::new("engine");
        let a = asm.add_child("turbine", Box::new(Leaf)).unwrap();
        asm.pull(a, "psi", "psi").unwrap();
        asm
    }

    #[test]
    fn declaration_order_is_preserved() {
        let asm = assembly();
        let mut method = DesignMethod::new("scaling");
        method.add_unknown(&asm, "turbine.ratio").unwrap();
        method
            .add_unknown_with(
                &asm,
                "turbine.speed",
                UnknownOpts {
                    lower_bound: 0.0,
                    upper_bound: 1.5,
                    max_rel_step: 0.5,
                },
            )
            .unwrap();
        method.add_target(&asm, "psi", Some(1.1)).unwrap();
        method.add_target(&asm, "turbine.psi", None).unwrap();

        let paths: Vec<&str> = method.unknowns().iter().map(|u| u.path.as_str()).collect();
        assert_eq!(paths, ["turbine.ratio", "turbine.speed"]);
        assert_eq!(method.unknowns()[0].opts, UnknownOpts::default());
        assert_eq!(method.unknowns()[1].opts.max_rel_step, 0.5);
        assert_eq!(method.targets()[0].value, Some(1.1));
        assert_eq!(method.targets()[1].value, None);

        // Counts may differ; rejecting an ill-posed system is the solver's
        // problem, not this layer's.
        method.add_target(&asm, "psi", Some(2.0)).unwrap();
        assert_eq!(method.unknowns().len(), 2);
        assert_eq!(method.targets().len(), 3);
    }

    #[test]
    fn paths_are_validated_at_declaration_time() {
        let asm = assembly();
        let mut method = DesignMethod::new("scaling");

        let err = method.add_unknown(&asm, "turbine.missing").unwrap_err();
        assert!(matches!(err, ConstructError::UnresolvedPath { .. }));

        let err = method.add_target(&asm, "turbine.tip", None).unwrap_err();
        assert!(matches!(err, ConstructError::NotAScalar { .. }));
    }

    #[test]
    fn fan_in_aliases_cannot_be_unknowns() {
        let mut asm = Assembly::new("engine");
        let a = asm.add_child("turbine", Box::new(Leaf)).unwrap();
        let b = asm.add_child("booster", Box::new(Leaf)).unwrap();
        asm.pull(a, "ratio", "ratio").unwrap();
        asm.pull(b, "ratio", "ratio").unwrap();

        // the solver writes unknowns, and a fan-in alias has no single
        // write target
        let mut method = DesignMethod::new("scaling");
        let err = method.add_unknown(&asm, "ratio").unwrap_err();
        assert!(matches!(err, ConstructError::FanInWrite { .. }));

        // read-only targets may still fan in
        method.add_target(&asm, "ratio", None).unwrap();
        assert_eq!(method.targets().len(), 1);
    }

    #[test]
    fn solver_round_trip_through_handles() {
        let mut asm = assembly();
        let mut method = DesignMethod::new("scaling");
        method.add_unknown(&asm, "turbine.ratio").unwrap();
        method.add_target(&asm, "psi", Some(1.6)).unwrap();

        method.apply_unknowns(&mut asm, &[0.8]).unwrap();
        asm.evaluate().unwrap();

        assert_eq!(method.read_unknowns(&asm).unwrap(), vec![0.8]);
        assert_eq!(method.read_targets(&asm).unwrap(), vec![1.6]);
    }
}
