use cutkit_core::data::{
    Evaluation, Machine, MachineId, Material, MaterialGroup, MaterialId, Strategy, StrategyId,
    Tool, ToolCoating, ToolId, ToolKind, ToolMaterial,
};
use cutkit_optimizer::{ReviewSeverity, Reviewer};

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

/// An evaluation with every check comfortably inside its limit.
fn benign_evaluation() -> Evaluation {
    Evaluation {
        speed: 900.0,
        feed: 200.0,
        cut_depth: 0.3,
        cut_width: 8.5,
        feed_per_tooth: 0.11,
        cutting_speed: 70.0,
        removal_rate: 0.5,
        tool_life: 45.0,
        bottom_roughness: 0.1,
        side_roughness: 0.6,
        power: 0.5,
        torque: 5.0,
        feed_force: 400.0,
        deflection: 0.01,
    }
}

#[test]
fn all_safe_evaluation_passes_with_full_score() {
    let tool = face_mill();
    let material = steel();
    let machine = vmc();
    let strategy = milling_strategy();
    let report = Reviewer::new(&tool, &material, &machine, &strategy).review(&benign_evaluation());

    assert!(report.passed);
    assert_eq!(report.safe_count, report.total_items);
    assert_eq!(report.safety_score, 100.0);
    assert!(report.overall_assessment.contains("safe"));
}

#[test]
fn safety_score_stays_in_bounds() {
    let tool = face_mill();
    let material = steel();
    let machine = vmc();
    let strategy = milling_strategy();
    let reviewer = Reviewer::new(&tool, &material, &machine, &strategy);

    let mut bad = benign_evaluation();
    bad.power = 20.0;
    bad.torque = 120.0;
    bad.tool_life = 0.5;
    bad.deflection = 0.5;
    bad.speed = 5000.0;
    let report = reviewer.review(&bad);

    assert!(!report.passed);
    assert!(report.critical_count > 0);
    assert!((0.0..=100.0).contains(&report.safety_score));
    assert!(report.safety_score < 100.0);
}

#[test]
fn graded_scenario_flags_tool_life_and_warns_on_power() {
    let tool = face_mill();
    let material = steel();
    let machine = vmc();
    let strategy = milling_strategy();
    let reviewer = Reviewer::new(&tool, &material, &machine, &strategy);

    // Power at 95% of the derated budget (≈ 81% machine load), torque at
    // half, cutting speed in range, tool life at half the floor.
    let mut eval = benign_evaluation();
    eval.power = 0.95 * 0.85 * machine.power_max;
    eval.torque = 0.5 * machine.torque_max;
    eval.tool_life = 0.5 * strategy.min_tool_life;
    let report = reviewer.review(&eval);

    let hard_failures: Vec<_> = report
        .items
        .iter()
        .filter(|i| matches!(i.severity, ReviewSeverity::Error | ReviewSeverity::Critical))
        .collect();
    assert_eq!(hard_failures.len(), 1);
    assert_eq!(hard_failures[0].name, "tool life");

    let power_item = report.items.iter().find(|i| i.name == "machine power").unwrap();
    assert_eq!(power_item.severity, ReviewSeverity::Warning);
    assert!(!report.passed);
}

#[test]
fn any_critical_item_fails_the_review() {
    let tool = face_mill();
    let material = steel();
    let machine = vmc();
    let strategy = milling_strategy();

    let mut eval = benign_evaluation();
    eval.power = 1.1 * machine.power_max;
    let report = Reviewer::new(&tool, &material, &machine, &strategy).review(&eval);

    assert!(!report.passed);
    assert!(report.critical_count >= 1);
    assert!(report.overall_assessment.contains("Critical"));
}

#[test]
fn vendor_envelope_grades_over_and_under() {
    let tool = face_mill();
    let material = steel();
    let machine = vmc();
    let strategy = milling_strategy();
    let reviewer = Reviewer::new(&tool, &material, &machine, &strategy);

    let mut over = benign_evaluation();
    over.speed = 3500.0;
    let report = reviewer.review(&over);
    let item = report.items.iter().find(|i| i.name == "vendor speed").unwrap();
    assert_eq!(item.severity, ReviewSeverity::Error);

    let mut under = benign_evaluation();
    under.feed = 50.0;
    let report = reviewer.review(&under);
    let item = report.items.iter().find(|i| i.name == "vendor feed").unwrap();
    assert_eq!(item.severity, ReviewSeverity::Warning);
}
