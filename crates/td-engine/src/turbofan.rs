//! The full engine assembly and its scaling design method.

use td_design::{DesignMethod, UnknownOpts};
use td_graph::{Assembly, ConstructResult, EvalResult, FieldMap};
use tracing::info;

use crate::aero::TurbofanAero;
use crate::channel::{Channel, FanDuct};
use crate::config::TurbofanConfig;
use crate::fan_module::FanModule;
use crate::gas_generator::GasGenerator;
use crate::geom::TurbofanGeom;
use crate::inlet::Inlet;
use crate::nacelle::{CoreCowl, Nacelle, Plug};
use crate::nozzle::Nozzle;
use crate::turbine::Turbine;
use crate::weight::TurbofanWeight;

/// Wire the turbofan and apply the configuration record.
///
/// The spool coupling is left open on purpose: `fan_module.sh_in` is a free
/// input (initialised from the config, owned by the solver) rather than a
/// connection from `turbine.sh_out`, so the graph stays acyclic and the
/// power balance becomes a closure target instead of a wire.
pub fn build_turbofan(config: &TurbofanConfig) -> EvalResult<Assembly> {
    let mut asm = Assembly::new("turbofan");

    let geom = asm.add_child("geom", Box::new(TurbofanGeom))?;
    let inlet = asm.add_child("inlet", Box::new(Inlet))?;
    let fan_module = asm.add_child("fan_module", Box::new(FanModule))?;
    let fan_duct = asm.add_child("fan_duct", Box::new(FanDuct))?;
    let core = asm.add_child("core", Box::new(GasGenerator))?;
    let tcf = asm.add_child("tcf", Box::new(Channel))?;
    let turbine = asm.add_child("turbine", Box::new(Turbine))?;
    let trf = asm.add_child("trf", Box::new(Channel))?;
    let primary_nozzle = asm.add_child("primary_nozzle", Box::new(Nozzle))?;
    let secondary_nozzle = asm.add_child("secondary_nozzle", Box::new(Nozzle))?;
    let nacelle = asm.add_child("nacelle", Box::new(Nacelle))?;
    let plug = asm.add_child("plug", Box::new(Plug))?;
    let core_cowl = asm.add_child("core_cowl", Box::new(CoreCowl))?;
    let aero = asm.add_child("aero", Box::new(TurbofanAero))?;
    let weight = asm.add_child("weight", Box::new(TurbofanWeight))?;

    // fluid connectors
    asm.connect_port(inlet, "fl_out", fan_module, "fl_in")?;
    asm.connect_port(fan_module, "fl_bypass", fan_duct, "fl_in")?;
    asm.connect_port(fan_duct, "fl_out", secondary_nozzle, "fl_in")?;
    asm.connect_port(fan_module, "fl_core", core, "fl_in")?;
    asm.connect_port(core, "fl_out", tcf, "fl_in")?;
    asm.connect_port(tcf, "fl_out", turbine, "fl_in")?;
    asm.connect_port(turbine, "fl_out", trf, "fl_in")?;
    asm.connect_port(trf, "fl_out", primary_nozzle, "fl_in")?;

    // geometry connectors
    asm.connect(geom, inlet, FieldMap::Names(&["fan_inlet_tip_kp"]))?;
    asm.connect(
        geom,
        fan_module,
        FieldMap::Renamed(&[
            ("fan_diameter", "fan_diameter"),
            ("fan_module_length", "length"),
        ]),
    )?;
    asm.connect_port(geom, "core_kp", core, "kp")?;
    asm.connect_port(geom, "tcf_kp", tcf, "kp")?;
    asm.connect_port(geom, "turbine_kp", turbine, "kp")?;
    asm.connect_port(geom, "trf_kp", trf, "kp")?;
    asm.connect_port(geom, "primary_nozzle_kp", primary_nozzle, "kp")?;
    asm.connect_port(geom, "secondary_nozzle_kp", secondary_nozzle, "kp")?;
    asm.connect_port(geom, "secondary_nozzle_kp", fan_duct, "kp")?;
    asm.connect(
        geom,
        fan_duct,
        FieldMap::Names(&["core_cowl_slope"]),
    )?;
    asm.connect(
        geom,
        nacelle,
        FieldMap::Names(&["fan_diameter", "ogv_exit_tip_kp", "sec_nozzle_exit_kp"]),
    )?;
    asm.connect(inlet, nacelle, FieldMap::Names(&["hilite_kp"]))?;
    asm.connect(trf, plug, FieldMap::Renamed(&[("kp.exit_hub", "trf_exit_hub_kp")]))?;
    asm.connect(
        geom,
        core_cowl,
        FieldMap::Renamed(&[
            ("sec_nozzle_exit_hub_kp", "inlet_kp"),
            ("pri_nozzle_exit_kp", "exit_kp"),
        ]),
    )?;

    // ambient pressure fans out from the inlet
    asm.connect(inlet, primary_nozzle, FieldMap::Names(&["pamb"]))?;
    asm.connect(inlet, secondary_nozzle, FieldMap::Names(&["pamb"]))?;

    // aerodynamic performance connectors
    asm.connect(inlet, aero, FieldMap::Renamed(&[("drag", "inlet_drag")]))?;
    asm.connect(fan_module, aero, FieldMap::Names(&["fan_pr", "booster_pr"]))?;
    asm.connect(
        core,
        aero,
        FieldMap::Renamed(&[("opr", "core_opr"), ("fuel_w", "fuel_w")]),
    )?;
    asm.connect(
        primary_nozzle,
        aero,
        FieldMap::Renamed(&[("thrust", "primary_nozzle_thrust")]),
    )?;
    asm.connect(
        secondary_nozzle,
        aero,
        FieldMap::Renamed(&[("thrust", "secondary_nozzle_thrust")]),
    )?;
    asm.connect_port(trf, "fl_out", aero, "fl_primary_nozzle")?;
    asm.connect_port(fan_duct, "fl_out", aero, "fl_secondary_nozzle")?;

    // weight connectors
    asm.connect(
        geom,
        weight,
        FieldMap::Renamed(&[("fan_diameter", "fan_diameter"), ("engine_length", "length")]),
    )?;

    // the assembly's public surface
    asm.pull(geom, "fan_diameter", "fan_diameter")?;
    asm.pull(geom, "frd_mount", "frd_mount")?;
    asm.pull(geom, "aft_mount", "aft_mount")?;
    asm.pull(inlet, "fl_in.w", "fl_in.w")?;
    asm.pull(inlet, "fl_in.pt", "fl_in.pt")?;
    asm.pull(inlet, "fl_in.tt", "fl_in.tt")?;
    asm.pull(inlet, "pamb", "pamb")?;
    asm.pull(fan_module, "bpr", "bpr")?;
    asm.pull(fan_module, "n", "n1")?;
    asm.pull(core, "n", "n2")?;
    asm.pull(core, "fuel_w", "fuel_w")?;
    asm.pull(aero, "thrust", "thrust")?;
    asm.pull(aero, "opr", "opr")?;
    asm.pull(aero, "sfc", "sfc")?;
    asm.pull(aero, "pr_split", "pr_split")?;
    asm.pull(aero, "pr_nozzle", "pr_nozzle")?;
    asm.pull(weight, "ipps_weight", "ipps_weight")?;

    asm.apply_config(config.iter())?;
    info!(entries = config.len(), "turbofan assembled");
    Ok(asm)
}

/// The `scaling` closure: size the engine to cycle targets at constant
/// component loadings.
///
/// Targets carry no fixed value; the solver drives each to the reference
/// its operating context provides. Declaration order matters downstream
/// and mirrors the flow path, fan first.
pub fn scaling_design_method(asm: &Assembly) -> ConstructResult<DesignMethod> {
    let mut method = DesignMethod::new("scaling");

    method.add_unknown(asm, "fan_diameter")?;
    method.add_target(asm, "fan_module.utip", None)?;
    method.add_target(asm, "bpr", None)?;

    // lpt
    method.add_unknown(asm, "geom.turbine_radius_ratio")?;
    method.add_target(asm, "turbine.spec_work", None)?;

    // hpc
    method.add_unknown_with(
        asm,
        "geom.core_inlet_radius_ratio",
        UnknownOpts {
            max_rel_step: 0.8,
            ..UnknownOpts::default()
        },
    )?;
    method.add_target(asm, "core.opr", None)?;

    // hpt
    method.add_unknown_with(
        asm,
        "geom.core_exit_radius_ratio",
        UnknownOpts {
            max_rel_step: 0.8,
            ..UnknownOpts::default()
        },
    )?;

    // nozzles
    method.add_unknown_with(
        asm,
        "geom.pri_nozzle_area_ratio",
        UnknownOpts {
            lower_bound: 0.05,
            ..UnknownOpts::default()
        },
    )?;
    method.add_unknown_with(
        asm,
        "geom.sec_nozzle_area_ratio",
        UnknownOpts {
            upper_bound: 1.0,
            ..UnknownOpts::default()
        },
    )?;
    method.add_target(asm, "pr_nozzle", None)?;

    Ok(method)
}
