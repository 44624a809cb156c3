//! End-to-end assembly tests on the CFM56-class reference engine.

use td_engine::{TurbofanConfig, build_turbofan, scaling_design_method};

#[test]
fn builds_and_evaluates() {
    let mut engine = build_turbofan(&TurbofanConfig::cfm56()).unwrap();
    engine.evaluate().unwrap();

    assert_eq!(engine.scalar_at("geom.fan_module_length").unwrap(), 0.7745);
    assert_eq!(engine.scalar_at("opr").unwrap(), 1.55 * 2.2 * 11.0);
    assert!(engine.scalar_at("thrust").unwrap() > 0.0);
    assert!(engine.scalar_at("sfc").unwrap() > 0.0);
    assert!(engine.scalar_at("ipps_weight").unwrap() > 0.0);
}

#[test]
fn flow_path_is_contiguous() {
    let mut engine = build_turbofan(&TurbofanConfig::cfm56()).unwrap();
    engine.evaluate().unwrap();

    // each stage envelope starts where the previous one ends
    let chain = [
        "geom.inlet_kp",
        "geom.fanmodule_kp",
        "geom.core_kp",
        "geom.tcf_kp",
        "geom.turbine_kp",
        "geom.trf_kp",
        "geom.primary_nozzle_kp",
    ];
    for pair in chain.windows(2) {
        let up = engine.envelope_at(pair[0]).unwrap();
        let down = engine.envelope_at(pair[1]).unwrap();
        assert_eq!(
            up.exit_tip.z, down.inlet_tip.z,
            "gap between {} and {}",
            pair[0], pair[1]
        );
    }

    // the stage envelopes arrive at the components that own them
    let at_geom = engine.envelope_at("geom.turbine_kp").unwrap();
    let at_turbine = engine.envelope_at("turbine.kp").unwrap();
    assert_eq!(at_geom, at_turbine);
}

#[test]
fn mass_flow_is_conserved_through_the_bypass_split() {
    let mut engine = build_turbofan(&TurbofanConfig::cfm56()).unwrap();
    engine.evaluate().unwrap();

    let w_in = engine.scalar_at("fl_in.w").unwrap();
    let w_core = engine.scalar_at("fan_module.fl_core.w").unwrap();
    let w_bypass = engine.scalar_at("fan_module.fl_bypass.w").unwrap();
    assert_eq!(w_in, 300.0);
    assert!((w_core + w_bypass - w_in).abs() < 1e-9);

    let bpr = engine.scalar_at("bpr").unwrap();
    assert!((w_bypass / w_core - bpr).abs() < 1e-9);

    // fuel added in the core shows up at the primary nozzle
    let fuel_w = engine.scalar_at("fuel_w").unwrap();
    let w_pri = engine.scalar_at("primary_nozzle.fl_out.w").unwrap();
    assert!((w_pri - (w_core + fuel_w)).abs() < 1e-9);
}

#[test]
fn fan_diameter_rescales_the_whole_engine() {
    let mut cfg = TurbofanConfig::cfm56();
    let mut engine = build_turbofan(&cfg).unwrap();
    engine.evaluate().unwrap();
    let length = engine.scalar_at("geom.engine_length").unwrap();
    let weight = engine.scalar_at("ipps_weight").unwrap();

    cfg.set("fan_diameter", 2.0 * 1.549);
    let mut bigger = build_turbofan(&cfg).unwrap();
    bigger.evaluate().unwrap();
    assert_eq!(
        bigger.scalar_at("geom.engine_length").unwrap(),
        2.0 * length
    );
    assert!(bigger.scalar_at("ipps_weight").unwrap() > weight);
}

#[test]
fn re_evaluation_is_bit_identical() {
    let mut engine = build_turbofan(&TurbofanConfig::cfm56()).unwrap();
    engine.evaluate().unwrap();
    let first = [
        engine.scalar_at("thrust").unwrap(),
        engine.scalar_at("sfc").unwrap(),
        engine.scalar_at("pr_nozzle").unwrap(),
        engine.scalar_at("geom.engine_length").unwrap(),
    ];

    engine.evaluate().unwrap();
    let second = [
        engine.scalar_at("thrust").unwrap(),
        engine.scalar_at("sfc").unwrap(),
        engine.scalar_at("pr_nozzle").unwrap(),
        engine.scalar_at("geom.engine_length").unwrap(),
    ];
    for (a, b) in first.iter().zip(&second) {
        assert_eq!(a.to_bits(), b.to_bits());
    }
}

#[test]
fn connected_stage_inputs_are_sealed() {
    let mut engine = build_turbofan(&TurbofanConfig::cfm56()).unwrap();
    // fan_module.length is driven by the geometry connection
    assert!(engine.set_scalar_at("fan_module.length", 1.0).is_err());
    // the free shaft input is not
    engine.set_scalar_at("fan_module.sh_in.power", 25e6).unwrap();
}

#[test]
fn scaling_method_mirrors_the_flow_path() {
    let engine = build_turbofan(&TurbofanConfig::cfm56()).unwrap();
    let method = scaling_design_method(&engine).unwrap();

    let unknowns: Vec<&str> = method.unknowns().iter().map(|u| u.path.as_str()).collect();
    assert_eq!(
        unknowns,
        [
            "fan_diameter",
            "geom.turbine_radius_ratio",
            "geom.core_inlet_radius_ratio",
            "geom.core_exit_radius_ratio",
            "geom.pri_nozzle_area_ratio",
            "geom.sec_nozzle_area_ratio",
        ]
    );
    let targets: Vec<&str> = method.targets().iter().map(|t| t.path.as_str()).collect();
    assert_eq!(
        targets,
        [
            "fan_module.utip",
            "bpr",
            "turbine.spec_work",
            "core.opr",
            "pr_nozzle",
        ]
    );
    assert_eq!(method.unknowns()[4].opts.lower_bound, 0.05);
    assert_eq!(method.unknowns()[5].opts.upper_bound, 1.0);
}

#[test]
fn design_unknowns_round_trip_through_the_assembly() {
    let mut engine = build_turbofan(&TurbofanConfig::cfm56()).unwrap();
    let method = scaling_design_method(&engine).unwrap();

    let mut values = method.read_unknowns(&engine).unwrap();
    assert_eq!(values[0], 1.549);

    values[0] = 1.8;
    method.apply_unknowns(&mut engine, &values).unwrap();
    engine.evaluate().unwrap();
    assert_eq!(engine.scalar_at("geom.fan_module_length").unwrap(), 0.9);
    assert_eq!(method.read_unknowns(&engine).unwrap()[0], 1.8);
}

#[test]
fn config_round_trips_through_json() {
    let cfg = TurbofanConfig::cfm56();
    let json = serde_json::to_string(&cfg).unwrap();
    let back: TurbofanConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(back, cfg);

    // and a hand-written record applies like a constructed one
    let parsed: TurbofanConfig =
        serde_json::from_str(r#"{"fan_diameter": 1.2, "fl_in.w": 250.0}"#).unwrap();
    let mut engine = build_turbofan(&parsed).unwrap();
    engine.evaluate().unwrap();
    assert_eq!(engine.scalar_at("fl_in.w").unwrap(), 250.0);
    assert_eq!(engine.scalar_at("geom.fan_module_length").unwrap(), 0.6);
}

#[test]
fn unknown_config_paths_are_rejected() {
    let mut cfg = TurbofanConfig::cfm56();
    cfg.set("geom.no_such_ratio", 1.0);
    assert!(build_turbofan(&cfg).is_err());
}
