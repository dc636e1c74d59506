//! Cutting-mechanics kernel
//!
//! Maps a candidate (speed, feed, depth) to the full set of derived
//! machining quantities and the constraint penalty. One pure function per
//! machining method; the batched fitness path and the final scalar
//! re-evaluation call the same bodies, so both produce the same numbers.
//!
//! Formulas follow the Kienzle specific-force model, a Taylor-extended
//! tool life model, and a cantilever deflection model for milling.

use std::f64::consts::PI;

use cutkit_core::data::{CuttingConstraints, Evaluation, MachiningMethod};
use cutkit_core::limits::{guard, penalty, physics};

/// Evaluate one candidate with the method dispatch taken from the
/// constraints view.
pub fn evaluate(speed: f64, feed: f64, cut_depth: f64, c: &CuttingConstraints) -> Evaluation {
    match c.method {
        MachiningMethod::Milling => evaluate_milling(speed, feed, cut_depth, c),
        MachiningMethod::Drilling => evaluate_drilling(speed, feed, c),
        MachiningMethod::Boring => evaluate_boring(speed, feed, cut_depth, c),
    }
}

/// Milling: slab removal over the engaged width, chip thickness by radial
/// engagement, feed force from the main cutting force, cantilever
/// deflection at the tip.
#[inline]
pub fn evaluate_milling(speed: f64, feed: f64, cut_depth: f64, c: &CuttingConstraints) -> Evaluation {
    let n = speed.max(guard::MIN_SPEED);
    let f = feed.max(guard::MIN_FEED);
    let ap = cut_depth;
    let ae = c.cut_width;
    let teeth = f64::from(c.teeth);

    let fz = f / (teeth * n);
    let vc = n * c.diameter / physics::VC_DIVISOR;
    let safe_fz = fz.max(guard::EPS);
    let safe_vc = vc.max(guard::EPS);

    let removal_rate = f * ap * ae / 1000.0;
    let tool_life = taylor_life(safe_vc, safe_fz, c);

    let engagement = ae / c.diameter;
    let chip = if engagement <= physics::ENGAGEMENT_RATIO_SPLIT {
        safe_fz * engagement.sqrt()
    } else {
        let ratio = ((ae - 0.5 * c.diameter) / (0.5 * c.diameter)).clamp(-1.0, 1.0);
        let engagement_angle = 90.0 + ratio.asin().to_degrees();
        physics::ENGAGEMENT_CHIP_FACTOR * safe_fz * c.approach_angle.to_radians().sin() * engagement
            / engagement_angle
    };
    let safe_chip = chip.max(guard::EPS);

    let kc = (1.0 - 0.01 * c.rake_angle) * c.cutting_force_coefficient
        / (safe_chip.powf(c.kienzle_slope) + guard::KIENZLE_EPS);

    let power = removal_rate * kc / physics::POWER_DIVISOR / c.efficiency;
    let torque = physics::TORQUE_FACTOR * power / (n + guard::DIV_EPS);

    let main_force = kc * ap * ae / teeth;
    let feed_coefficient = 0.3 + 0.2 * (1.0 - c.rake_angle / 20.0) * (90.0 / c.approach_angle);
    let feed_force = main_force * feed_coefficient;

    let bottom_roughness = physics::BOTTOM_ROUGHNESS_FACTOR * safe_fz * safe_fz / c.diameter;
    let side_roughness =
        (safe_fz * teeth).powi(2) * physics::SIDE_ROUGHNESS_FACTOR / c.diameter;

    let inertia = PI * c.diameter.powi(4) / 64.0;
    let deflection = feed_force * c.overhang.powi(3) / (3.0 * c.elastic_modulus * inertia);

    Evaluation {
        speed: n,
        feed: f,
        cut_depth: ap,
        cut_width: ae,
        feed_per_tooth: fz,
        cutting_speed: vc,
        removal_rate,
        tool_life,
        bottom_roughness,
        side_roughness,
        power,
        torque,
        feed_force,
        deflection,
    }
}

/// Drilling: full-face removal over the drill cross-section, thrust from
/// the web, no engaged depth or width in the output.
#[inline]
pub fn evaluate_drilling(speed: f64, feed: f64, c: &CuttingConstraints) -> Evaluation {
    let n = speed.max(guard::MIN_SPEED);
    let f = feed.max(guard::MIN_FEED);
    let teeth = f64::from(c.teeth);

    let fz = f / (teeth * n);
    let vc = n * c.diameter / physics::VC_DIVISOR;
    let safe_fz = fz.max(guard::EPS);
    let safe_vc = vc.max(guard::EPS);

    let removal_rate = f * PI * c.diameter * c.diameter / 4000.0;
    let tool_life = taylor_life(safe_vc, safe_fz, c);

    let chip = safe_fz * c.approach_angle.to_radians().sin();
    let safe_chip = chip.max(guard::EPS);
    let kc = c.cutting_force_coefficient / (safe_chip.powf(c.kienzle_slope) + guard::KIENZLE_EPS);

    let power = removal_rate * kc / physics::POWER_DIVISOR / c.efficiency;
    let torque = physics::TORQUE_FACTOR * power / (n + guard::DIV_EPS);
    let feed_force = physics::THRUST_COEFFICIENT * safe_fz * teeth * c.diameter * kc / 2.0;

    Evaluation {
        speed: n,
        feed: f,
        cut_depth: 0.0,
        cut_width: 0.0,
        feed_per_tooth: fz,
        cutting_speed: vc,
        removal_rate,
        tool_life,
        bottom_roughness: 0.0,
        side_roughness: 0.0,
        power,
        torque,
        feed_force,
        deflection: 0.0,
    }
}

/// Boring: removal over the annulus between tool and pre-bored diameter,
/// side roughness at the tip radius.
#[inline]
pub fn evaluate_boring(speed: f64, feed: f64, cut_depth: f64, c: &CuttingConstraints) -> Evaluation {
    let n = speed.max(guard::MIN_SPEED);
    let f = feed.max(guard::MIN_FEED);
    let teeth = f64::from(c.teeth);

    let fz = f / (teeth * n);
    let vc = n * c.diameter / physics::VC_DIVISOR;
    let safe_fz = fz.max(guard::EPS);
    let safe_vc = vc.max(guard::EPS);

    let annulus = c.diameter * c.diameter - c.inner_diameter * c.inner_diameter;
    let removal_rate = f * PI * annulus / 4000.0;
    let tool_life = taylor_life(safe_vc, safe_fz, c);

    let side_roughness =
        (safe_fz * teeth).powi(2) * physics::SIDE_ROUGHNESS_FACTOR / c.tip_radius;

    let chip = safe_fz * c.approach_angle.to_radians().sin();
    let safe_chip = chip.max(guard::EPS);
    let kc = c.cutting_force_coefficient / (safe_chip.powf(c.kienzle_slope) + guard::KIENZLE_EPS);

    let power = removal_rate * kc / physics::POWER_DIVISOR / c.efficiency;
    let torque = physics::TORQUE_FACTOR * power / (n + guard::DIV_EPS);
    let feed_force = physics::THRUST_COEFFICIENT * safe_fz * teeth * (c.diameter - c.inner_diameter)
        * kc
        / 2.0;

    Evaluation {
        speed: n,
        feed: f,
        cut_depth,
        cut_width: c.cut_width,
        feed_per_tooth: fz,
        cutting_speed: vc,
        removal_rate,
        tool_life,
        bottom_roughness: 0.0,
        side_roughness,
        power,
        torque,
        feed_force,
        deflection: 0.0,
    }
}

/// Taylor-extended tool life: `Lt = Ct · Vc^αs · fz^αf · wear`
#[inline]
fn taylor_life(safe_vc: f64, safe_fz: f64, c: &CuttingConstraints) -> f64 {
    c.life_coefficient
        * safe_vc.powf(c.speed_exponent)
        * safe_fz.powf(c.feed_exponent)
        * c.wear_multiplier
}

/// Which constraints a candidate violated
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ConstraintHits {
    pub tool_life: bool,
    pub power: bool,
    pub torque: bool,
    pub bottom_roughness: bool,
    pub side_roughness: bool,
    pub feed_force: bool,
    pub feed_per_tooth: bool,
    pub cutting_speed: bool,
    pub deflection: bool,
    pub plunge_pressure: bool,
}

impl ConstraintHits {
    /// Number of violated bounds
    pub fn count(&self) -> usize {
        [
            self.tool_life,
            self.power,
            self.torque,
            self.bottom_roughness,
            self.side_roughness,
            self.feed_force,
            self.feed_per_tooth,
            self.cutting_speed,
            self.deflection,
            self.plunge_pressure,
        ]
        .iter()
        .filter(|&&hit| hit)
        .count()
    }

    /// Whether any constraint was violated
    pub fn any(&self) -> bool {
        self.count() > 0
    }
}

/// Accumulated penalty with per-constraint hit flags
#[derive(Debug, Clone, Copy)]
pub struct Penalty {
    /// Weighted sum of squared violation margins
    pub value: f64,
    /// Which bounds were violated
    pub hits: ConstraintHits,
}

/// Accumulate the weighted squared margins of every violated bound.
///
/// The hit flags feed batch diagnostics only; they never change the
/// penalty value.
pub fn constraint_penalty(eval: &Evaluation, c: &CuttingConstraints) -> Penalty {
    let mut value = 0.0;
    let mut hits = ConstraintHits::default();

    if eval.tool_life < c.min_tool_life {
        value += (c.min_tool_life - eval.tool_life).powi(2) * penalty::TOOL_LIFE;
        hits.tool_life = true;
    }
    if eval.power > c.max_power {
        value += (eval.power - c.max_power).powi(2) * penalty::POWER;
        hits.power = true;
    }
    if eval.torque > c.max_torque {
        value += (eval.torque - c.max_torque).powi(2) * penalty::TORQUE;
        hits.torque = true;
    }
    if eval.bottom_roughness > c.max_bottom_roughness {
        value += (eval.bottom_roughness - c.max_bottom_roughness).powi(2) * penalty::ROUGHNESS;
        hits.bottom_roughness = true;
    }
    if eval.side_roughness > c.max_side_roughness {
        value += (eval.side_roughness - c.max_side_roughness).powi(2) * penalty::ROUGHNESS;
        hits.side_roughness = true;
    }
    if eval.feed_force > c.max_feed_force {
        value += (eval.feed_force - c.max_feed_force).powi(2) * penalty::FEED_FORCE;
        hits.feed_force = true;
    }
    if eval.feed_per_tooth > c.max_feed_per_tooth {
        value += (eval.feed_per_tooth - c.max_feed_per_tooth).powi(2) * penalty::ENVELOPE;
        hits.feed_per_tooth = true;
    }
    if eval.cutting_speed > c.max_cutting_speed {
        value += (eval.cutting_speed - c.max_cutting_speed).powi(2) * penalty::ENVELOPE;
        hits.cutting_speed = true;
    }
    if eval.deflection > c.max_deflection {
        value += (eval.deflection - c.max_deflection).powi(2) * penalty::DEFLECTION;
        hits.deflection = true;
    }
    if c.method == MachiningMethod::Drilling {
        let point_area = PI * (c.diameter / 2.0).powi(2);
        let plunge_pressure = eval.feed_force / point_area;
        if plunge_pressure > c.max_plunge_pressure {
            value += (plunge_pressure - c.max_plunge_pressure).powi(2) * penalty::PLUNGE;
            hits.plunge_pressure = true;
        }
    }

    Penalty { value, hits }
}

/// Penalized fitness: `MRR − κ·penalty`
///
/// Feasible candidates score exactly their removal rate; any violation
/// pushes the score below every feasible candidate's.
pub fn fitness_of(eval: &Evaluation, c: &CuttingConstraints) -> f64 {
    eval.removal_rate - penalty::SCALE * constraint_penalty(eval, c).value
}
