//! Named limits and physical constants
//!
//! Single point of truth for the values shared between the planner, the
//! physics kernel, and the reviewer. Nothing in the optimizer crates
//! duplicates these numbers.

/// Planner safety factors applied to vendor envelope maxima.
pub mod safety {
    /// Spindle speed derating against the vendor maximum
    pub const SPEED: f64 = 0.9;
    /// Feed rate derating against the vendor maximum
    pub const FEED: f64 = 0.85;
    /// Axial depth derating against the vendor maximum
    pub const CUT_DEPTH: f64 = 0.8;
    /// Radial width derating against the vendor maximum
    pub const CUT_WIDTH: f64 = 0.85;
}

/// Planner axis floors and geometric guards.
pub mod planner {
    /// Lowest spindle speed the search box may start at (r/min)
    pub const SPEED_FLOOR: f64 = 100.0;
    /// Lowest feed rate the search box may start at (mm/min)
    pub const FEED_FLOOR: f64 = 10.0;
    /// Lowest axial depth / radial width the search box may start at (mm)
    pub const CUT_FLOOR: f64 = 0.1;
    /// Numerator of the critical-speed estimate `30000 / D` (r/min·mm)
    pub const RESONANCE_RPM: f64 = 30_000.0;
    /// Derating applied to the critical-speed estimate
    pub const RESONANCE_DERATE: f64 = 0.8;
    /// Axial depth never exceeds this fraction of the tool diameter
    pub const DEPTH_DIAMETER_FACTOR: f64 = 0.5;
    /// Radial width never exceeds this fraction of the tool diameter
    pub const WIDTH_DIAMETER_FACTOR: f64 = 0.7;
    /// Drilling depth cap as a multiple of the tool diameter
    pub const DRILL_DEPTH_FACTOR: f64 = 2.5;
}

/// Material adjustment factors derived from hardness and machinability.
pub mod material_factor {
    /// Hardness above which parameters are derated (HB)
    pub const HARD_HB: f64 = 300.0;
    /// Hardness below which parameters may be raised (HB)
    pub const SOFT_HB: f64 = 150.0;
    /// Derating factor for hard materials
    pub const HARD_FACTOR: f64 = 0.8;
    /// Uprating factor for soft materials
    pub const SOFT_FACTOR: f64 = 1.1;
}

/// Physical constants of the cutting formulas.
pub mod physics {
    /// Divisor of the rpm-to-cutting-speed conversion `Vc = n·D / 318`
    pub const VC_DIVISOR: f64 = 318.0;
    /// Torque from power and speed: `T = 9549·P / n`
    pub const TORQUE_FACTOR: f64 = 9549.0;
    /// Power denominator: `P = MRR·kc / 60000 / η` (kW)
    pub const POWER_DIVISOR: f64 = 60_000.0;
    /// Bottom roughness factor: `Rz = (318/4)·fz² / D`
    pub const BOTTOM_ROUGHNESS_FACTOR: f64 = 318.0 / 4.0;
    /// Side roughness factor: `Rx = (fz·z)²·125 / r`
    pub const SIDE_ROUGHNESS_FACTOR: f64 = 125.0;
    /// Chip-thickness factor of the high-engagement milling branch
    pub const ENGAGEMENT_CHIP_FACTOR: f64 = 1147.0;
    /// Radial engagement ratio separating the two chip-thickness branches
    pub const ENGAGEMENT_RATIO_SPLIT: f64 = 0.3;
    /// Drilling thrust coefficient: `Ff = 0.63·fz·z·D·kc / 2`
    pub const THRUST_COEFFICIENT: f64 = 0.63;
}

/// Numeric guards applied before fractional or negative powers and divisions.
pub mod guard {
    /// Spindle speed floor (r/min)
    pub const MIN_SPEED: f64 = 1.0;
    /// Feed rate floor (mm/min)
    pub const MIN_FEED: f64 = 0.1;
    /// Floor for cutting speed, feed per tooth, and chip thickness
    pub const EPS: f64 = 1e-3;
    /// Additive stabilizer of the Kienzle denominator
    pub const KIENZLE_EPS: f64 = 1e-3;
    /// Additive stabilizer for divisions by the spindle speed
    pub const DIV_EPS: f64 = 1e-7;
}

/// Penalty scalarization of the constrained objective.
pub mod penalty {
    /// Scalar separating every infeasible candidate from the feasible set
    pub const SCALE: f64 = 1e29;
    /// Weight of the tool-life lower bound
    pub const TOOL_LIFE: f64 = 1e29;
    /// Weight of the machine power bound
    pub const POWER: f64 = 1e29;
    /// Weight of the machine torque bound
    pub const TORQUE: f64 = 1e29;
    /// Weight of the surface roughness bounds
    pub const ROUGHNESS: f64 = 1e29;
    /// Weight of the feed force bound
    pub const FEED_FORCE: f64 = 1e29;
    /// Weight of the tool deflection bound
    pub const DEFLECTION: f64 = 1e29;
    /// Weight of the drilling plunge-pressure bound
    pub const PLUNGE: f64 = 1e29;
    /// Weight of the feed-per-tooth and cutting-speed envelope bounds
    pub const ENVELOPE: f64 = 1.0;
    /// Fitness assigned to individuals whose evaluation is not finite
    pub const SENTINEL_FITNESS: f64 = -1e300;
}

/// Reviewer thresholds and stiffness-derived budgets.
pub mod review {
    /// Machine load fraction above which capacity items degrade
    pub const MACHINE_LOAD_THRESHOLD: f64 = 0.85;
    /// Tool deflection budget (mm); also the deflection constraint limit
    pub const DEFLECTION_BUDGET_MM: f64 = 0.1;
    /// Force budget per unit stiffness: `F_max = K·0.1`
    pub const STIFFNESS_FORCE_FACTOR: f64 = 0.1;
    /// Recommended cutting speed for hard materials, > 300 HB (m/min)
    pub const VC_HARD: f64 = 80.0;
    /// Recommended cutting speed for medium materials, > 200 HB (m/min)
    pub const VC_MEDIUM: f64 = 120.0;
    /// Recommended cutting speed for soft materials (m/min)
    pub const VC_SOFT: f64 = 150.0;
    /// Hardness separating medium from soft recommendations (HB)
    pub const MEDIUM_HB: f64 = 200.0;
    /// Tool-life review floor (min); the graded base is `min(Lt_min, 10)`
    pub const TOOL_LIFE_FLOOR: f64 = 10.0;
}

/// Drilling plunge safety.
pub mod drilling {
    /// Plunge pressure limit `Ff / (π·(D/2)²)` (MPa)
    pub const PLUNGE_PRESSURE_MAX: f64 = 50.0;
}
