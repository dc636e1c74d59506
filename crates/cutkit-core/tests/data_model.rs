use cutkit_core::data::{
    CuttingConstraints, Machine, MachineId, MachiningMethod, Material, MaterialGroup, MaterialId,
    SearchBox, Strategy, StrategyId, Tool, ToolCoating, ToolId, ToolKind, ToolMaterial,
};
use cutkit_core::error::OptimizeError;

fn face_mill() -> Tool {
    Tool {
        id: ToolId("T1".to_string()),
        name: "Test face mill".to_string(),
        kind: ToolKind::FaceMill,
        material: ToolMaterial::CoatedCarbide,
        coating: ToolCoating::TiAlN,
        diameter: 25.0,
        teeth: 2,
        tip_radius: 0.8,
        approach_angle: 45.0,
        rake_angle: 6.0,
        overhang: 75.0,
        recommended_speed_min: 800.0,
        recommended_speed_max: 3000.0,
        recommended_feed_min: 150.0,
        recommended_feed_max: 1200.0,
        recommended_cut_depth_max: 3.0,
        recommended_cut_width_max: 18.0,
        max_cutting_speed: 240.0,
        max_feed_per_tooth: 0.15,
        max_feed_force: 2000.0,
        life_coefficient: 100_000.0,
        speed_exponent: -1.5,
        feed_exponent: 0.75,
        depth_exponent: 0.1,
        stiffness: 2.0e7,
        elastic_modulus: 600_000.0,
    }
}

fn steel() -> Material {
    Material {
        id: MaterialId("P2".to_string()),
        name: "Test steel".to_string(),
        group: MaterialGroup::P,
        hardness: 220.0,
        tensile_strength: 700.0,
        machinability: 0.7,
        cutting_force_coefficient: 2000.0,
        kienzle_slope: 0.21,
    }
}

fn vmc() -> Machine {
    Machine {
        id: MachineId("M1".to_string()),
        name: "Test VMC".to_string(),
        rpm_max: 8000.0,
        power_max: 15.0,
        torque_max: 95.0,
        feed_rate_max: 10_000.0,
        feed_force_max: 8000.0,
        efficiency: 0.85,
    }
}

fn milling_strategy() -> Strategy {
    Strategy {
        id: StrategyId("S1".to_string()),
        name: "Test milling".to_string(),
        method: "milling".to_string(),
        min_tool_life: 10.0,
        bottom_roughness_limit: 6.3,
        side_roughness_limit: 12.5,
        cut_width: 8.5,
        wear_multiplier: 1.0,
        inner_diameter: 0.0,
    }
}

#[test]
fn valid_records_pass_validation() {
    assert!(face_mill().validate().is_ok());
    assert!(steel().validate().is_ok());
    assert!(vmc().validate().is_ok());
    assert!(milling_strategy().validate().is_ok());
}

#[test]
fn tool_with_inverted_speed_envelope_is_rejected() {
    let mut tool = face_mill();
    tool.recommended_speed_min = 4000.0;
    let err = tool.validate().unwrap_err();
    assert!(matches!(err, OptimizeError::InvalidInput { .. }));
}

#[test]
fn tool_with_zero_diameter_is_rejected() {
    let mut tool = face_mill();
    tool.diameter = 0.0;
    assert!(tool.validate().is_err());
}

#[test]
fn machine_efficiency_must_stay_in_unit_interval() {
    let mut machine = vmc();
    machine.efficiency = 1.2;
    assert!(machine.validate().is_err());
    machine.efficiency = 0.0;
    assert!(machine.validate().is_err());
}

#[test]
fn machinability_above_limit_is_rejected() {
    let mut material = steel();
    material.machinability = 1.4;
    assert!(material.validate().is_err());
}

#[test]
fn method_tags_canonicalize() {
    assert_eq!(
        MachiningMethod::canonicalize("milling").unwrap(),
        MachiningMethod::Milling
    );
    assert_eq!(
        MachiningMethod::canonicalize("DRILLING").unwrap(),
        MachiningMethod::Drilling
    );
    assert_eq!(
        MachiningMethod::canonicalize("铣削").unwrap(),
        MachiningMethod::Milling
    );
    assert_eq!(
        MachiningMethod::canonicalize("镗孔").unwrap(),
        MachiningMethod::Boring
    );
    // Unknown tags default to milling.
    assert_eq!(
        MachiningMethod::canonicalize("grinding").unwrap(),
        MachiningMethod::Milling
    );
}

#[test]
fn turning_is_rejected_at_validation() {
    let err = MachiningMethod::canonicalize("turning").unwrap_err();
    assert!(matches!(err, OptimizeError::InvalidInput { .. }));
    assert!(MachiningMethod::canonicalize("车削").is_err());
}

#[test]
fn material_group_from_id_prefix() {
    assert_eq!(MaterialGroup::from_id("P3"), Some(MaterialGroup::P));
    assert_eq!(MaterialGroup::from_id("k1"), Some(MaterialGroup::K));
    assert_eq!(MaterialGroup::from_id("X9"), None);
}

#[test]
fn compiled_constraints_take_the_tighter_bounds() {
    let constraints =
        CuttingConstraints::compile(&face_mill(), &steel(), &vmc(), &milling_strategy()).unwrap();
    assert_eq!(constraints.method, MachiningMethod::Milling);
    // Feed force bound is the tighter of tool and machine.
    assert_eq!(constraints.max_feed_force, 2000.0);
    // Cut width never exceeds the tool diameter.
    assert_eq!(constraints.cut_width, 8.5);
    let mut wide = milling_strategy();
    wide.cut_width = 40.0;
    let constraints = CuttingConstraints::compile(&face_mill(), &steel(), &vmc(), &wide).unwrap();
    assert_eq!(constraints.cut_width, 25.0);
}

#[test]
fn boring_requires_an_inner_diameter_smaller_than_the_tool() {
    let mut strategy = milling_strategy();
    strategy.method = "boring".to_string();
    strategy.inner_diameter = 25.0;
    let err =
        CuttingConstraints::compile(&face_mill(), &steel(), &vmc(), &strategy).unwrap_err();
    assert!(matches!(err, OptimizeError::InvalidInput { .. }));

    strategy.inner_diameter = 22.5;
    assert!(CuttingConstraints::compile(&face_mill(), &steel(), &vmc(), &strategy).is_ok());
}

#[test]
fn search_box_reports_the_first_empty_axis() {
    let search_box = SearchBox {
        speed_range: (1000.0, 100.0),
        feed_range: (10.0, 500.0),
        cut_depth_range: (0.1, 2.0),
        cut_width_range: (0.1, 5.0),
    };
    match search_box.validate().unwrap_err() {
        OptimizeError::Infeasible { axis, lower, upper } => {
            assert_eq!(axis, "speed");
            assert_eq!(lower, 1000.0);
            assert_eq!(upper, 100.0);
        }
        other => panic!("expected infeasible error, got {other:?}"),
    }
}

#[test]
fn records_round_trip_through_json() {
    let tool = face_mill();
    let json = serde_json::to_string(&tool).unwrap();
    let back: Tool = serde_json::from_str(&json).unwrap();
    assert_eq!(back.id, tool.id);
    assert_eq!(back.diameter, tool.diameter);
    assert_eq!(back.kind, ToolKind::FaceMill);
}
