//! Geometry component node.

use td_geom::GeomParams;
use td_graph::{Component, ConstructResult, EvalResult, Io, PortClass, Schema};

/// Publishes the whole engine envelope as ports and outward keypoints.
///
/// `fan_diameter` is the one wirable input; everything else is a ratio
/// param that a design closure may pick as an unknown.
#[derive(Debug, Default)]
pub struct TurbofanGeom;

impl Component for TurbofanGeom {
    fn schema(&self) -> ConstructResult<Schema> {
        let d = GeomParams::default();
        Schema::builder()
            .input("fan_diameter", d.fan_diameter)
            .param("inlet_length_ratio", d.inlet_length_ratio)
            .param("inlet_radius_ratio", d.inlet_radius_ratio)
            .param("fanmodule_length_ratio", d.fanmodule_length_ratio)
            .param("ogv_exit_hqt", d.ogv_exit_hqt)
            .param("core_inlet_radius_ratio", d.core_inlet_radius_ratio)
            .param("core_exit_radius_ratio", d.core_exit_radius_ratio)
            .param("core_length_ratio", d.core_length_ratio)
            .param("shaft_radius_ratio", d.shaft_radius_ratio)
            .param("tcf_exit_radius_ratio", d.tcf_exit_radius_ratio)
            .param("tcf_length_ratio", d.tcf_length_ratio)
            .param("turbine_radius_ratio", d.turbine_radius_ratio)
            .param("turbine_length_ratio", d.turbine_length_ratio)
            .param("turbine_fp_exit_hqt", d.turbine_fp_exit_hqt)
            .param("trf_length_ratio", d.trf_length_ratio)
            .param("core_cowl_slope", d.core_cowl_slope)
            .param("primary_nozzle_length_ratio", d.primary_nozzle_length_ratio)
            .param(
                "secondary_nozzle_length_ratio",
                d.secondary_nozzle_length_ratio,
            )
            .param("pri_nozzle_area_ratio", d.pri_nozzle_area_ratio)
            .param("sec_nozzle_area_ratio", d.sec_nozzle_area_ratio)
            .param("frd_mount_relative", d.frd_mount_relative)
            .param("aft_mount_relative", d.aft_mount_relative)
            .port_output("inlet_kp", PortClass::Envelope)
            .port_output("fanmodule_kp", PortClass::Envelope)
            .port_output("shaft_kp", PortClass::Envelope)
            .port_output("core_kp", PortClass::Envelope)
            .port_output("tcf_kp", PortClass::Envelope)
            .port_output("turbine_kp", PortClass::Envelope)
            .port_output("trf_kp", PortClass::Envelope)
            .port_output("primary_nozzle_kp", PortClass::Envelope)
            .port_output("secondary_nozzle_kp", PortClass::Envelope)
            .keypoint_output("fan_inlet_tip_kp")
            .keypoint_output("ogv_exit_hub_kp")
            .keypoint_output("ogv_exit_tip_kp")
            .keypoint_output("turbine_exit_tip_kp")
            .keypoint_output("sec_nozzle_exit_kp")
            .c1_output("pri_nozzle_exit_kp")
            .c1_output("sec_nozzle_exit_hub_kp")
            .keypoint_output("frd_mount")
            .keypoint_output("aft_mount")
            .output("fan_module_length", 1.0)
            .output("engine_length", 1.0)
            .build()
    }

    fn compute(&mut self, io: &mut Io<'_>) -> EvalResult<()> {
        let params = GeomParams {
            fan_diameter: io.scalar("fan_diameter")?,
            inlet_length_ratio: io.scalar("inlet_length_ratio")?,
            inlet_radius_ratio: io.scalar("inlet_radius_ratio")?,
            fanmodule_length_ratio: io.scalar("fanmodule_length_ratio")?,
            ogv_exit_hqt: io.scalar("ogv_exit_hqt")?,
            core_inlet_radius_ratio: io.scalar("core_inlet_radius_ratio")?,
            core_exit_radius_ratio: io.scalar("core_exit_radius_ratio")?,
            core_length_ratio: io.scalar("core_length_ratio")?,
            shaft_radius_ratio: io.scalar("shaft_radius_ratio")?,
            tcf_exit_radius_ratio: io.scalar("tcf_exit_radius_ratio")?,
            tcf_length_ratio: io.scalar("tcf_length_ratio")?,
            turbine_radius_ratio: io.scalar("turbine_radius_ratio")?,
            turbine_length_ratio: io.scalar("turbine_length_ratio")?,
            turbine_fp_exit_hqt: io.scalar("turbine_fp_exit_hqt")?,
            trf_length_ratio: io.scalar("trf_length_ratio")?,
            core_cowl_slope: io.scalar("core_cowl_slope")?,
            primary_nozzle_length_ratio: io.scalar("primary_nozzle_length_ratio")?,
            secondary_nozzle_length_ratio: io.scalar("secondary_nozzle_length_ratio")?,
            pri_nozzle_area_ratio: io.scalar("pri_nozzle_area_ratio")?,
            sec_nozzle_area_ratio: io.scalar("sec_nozzle_area_ratio")?,
            frd_mount_relative: io.scalar("frd_mount_relative")?,
            aft_mount_relative: io.scalar("aft_mount_relative")?,
        };
        let out = td_geom::compute(&params)?;

        io.set_envelope("inlet_kp", &out.inlet)?;
        io.set_envelope("fanmodule_kp", &out.fan_module)?;
        io.set_envelope("shaft_kp", &out.shaft)?;
        io.set_envelope("core_kp", &out.core)?;
        io.set_envelope("tcf_kp", &out.tcf)?;
        io.set_envelope("turbine_kp", &out.turbine)?;
        io.set_envelope("trf_kp", &out.trf)?;
        io.set_envelope("primary_nozzle_kp", &out.primary_nozzle)?;
        io.set_envelope("secondary_nozzle_kp", &out.secondary_nozzle)?;

        io.set_keypoint("fan_inlet_tip_kp", out.fan_inlet_tip)?;
        io.set_keypoint("ogv_exit_hub_kp", out.ogv_exit_hub)?;
        io.set_keypoint("ogv_exit_tip_kp", out.ogv_exit_tip)?;
        io.set_keypoint("turbine_exit_tip_kp", out.turbine_exit_tip)?;
        io.set_keypoint("sec_nozzle_exit_kp", out.sec_nozzle_exit_tip)?;
        io.set_c1("pri_nozzle_exit_kp", out.pri_nozzle_exit)?;
        io.set_c1("sec_nozzle_exit_hub_kp", out.sec_nozzle_exit_hub)?;
        io.set_keypoint("frd_mount", out.frd_mount)?;
        io.set_keypoint("aft_mount", out.aft_mount)?;

        io.set_scalar("fan_module_length", out.fan_module_length)?;
        io.set_scalar("engine_length", out.engine_length)
    }
}
