//! Flat configuration records.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use td_core::Real;

/// Scalar overrides keyed by dotted path, applied on top of the schema
/// defaults after the assembly is wired.
///
/// The map form keeps configs diffable and serializable; path resolution
/// and kind checking happen in the assembly when the record is applied.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TurbofanConfig {
    entries: BTreeMap<String, Real>,
}

impl TurbofanConfig {
    /// CFM56-7 class reference engine.
    pub fn cfm56() -> Self {
        let mut cfg = Self::default();
        cfg.set("fan_diameter", 1.549);

        cfg.set("geom.core_inlet_radius_ratio", 0.35);
        cfg.set("geom.tcf_exit_radius_ratio", 1.4);
        cfg.set("geom.tcf_length_ratio", 0.5);
        cfg.set("geom.pri_nozzle_area_ratio", 0.9);
        cfg.set("geom.sec_nozzle_area_ratio", 0.6);

        cfg.set("fl_in.w", 300.0);
        cfg.set("fl_in.pt", 101_325.0);
        cfg.set("fl_in.tt", 288.15);

        // solver starting point for the free shaft quantities
        cfg.set("fan_module.sh_in.power", 30e6);
        cfg.set("fan_module.sh_in.n", 5_000.0);
        cfg.set("turbine.power", 30e6);
        cfg.set("turbine.n", 5_000.0);
        cfg
    }

    pub fn set(&mut self, path: &str, value: Real) -> Option<Real> {
        self.entries.insert(path.to_string(), value)
    }

    pub fn get(&self, path: &str) -> Option<Real> {
        self.entries.get(path).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Real)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
