//! Search-box planning
//!
//! Narrows the parameter search space a priori from the tool vendor
//! envelope, the workpiece material, and the machine capacity, without
//! evaluating any candidate. Produces the box, the safety factors
//! applied, a reason string, and per-axis advice.

use std::collections::HashMap;

use cutkit_core::data::{Machine, MachiningMethod, Material, SearchBox, Tool};
use cutkit_core::error::Result;
use cutkit_core::limits::{material_factor, physics, planner, review, safety};
use serde::{Deserialize, Serialize};

/// Derating factors applied to the vendor maxima
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SafetyFactors {
    pub speed: f64,
    pub feed: f64,
    pub cut_depth: f64,
    pub cut_width: f64,
}

impl Default for SafetyFactors {
    fn default() -> Self {
        Self {
            speed: safety::SPEED,
            feed: safety::FEED,
            cut_depth: safety::CUT_DEPTH,
            cut_width: safety::CUT_WIDTH,
        }
    }
}

/// Planner output: the box plus the reasoning behind it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchPlan {
    /// The narrowed search box
    pub search_box: SearchBox,
    /// Safety factors used on the vendor maxima
    pub safety_factors: SafetyFactors,
    /// Human-readable summary of the narrowing
    pub reason: String,
    /// Per-axis advice keyed by "speed", "feed", "cut_depth", "general"
    pub advice: HashMap<String, String>,
}

/// Search-box planner over the three input records
pub struct Planner<'a> {
    tool: &'a Tool,
    material: &'a Material,
    machine: &'a Machine,
}

impl<'a> Planner<'a> {
    pub fn new(tool: &'a Tool, material: &'a Material, machine: &'a Machine) -> Self {
        Self {
            tool,
            material,
            machine,
        }
    }

    /// Plan the search box for a machining method.
    ///
    /// Returns the infeasibility error of the first axis whose interval
    /// narrows to empty; the optimizer never runs in that case.
    pub fn plan(&self, method: MachiningMethod) -> Result<SearchPlan> {
        let factors = SafetyFactors::default();
        let speed_range = self.plan_speed_range();
        let feed_range = self.plan_feed_range();
        let mut cut_depth_range = self.plan_cut_depth_range();
        let mut cut_width_range = self.plan_cut_width_range();

        if method == MachiningMethod::Drilling {
            // A drill has no radial engagement; depth is bounded by the
            // usable flute length.
            cut_width_range = (0.0, 0.0);
            cut_depth_range = (0.0, self.tool.diameter * planner::DRILL_DEPTH_FACTOR);
        }

        let search_box = SearchBox {
            speed_range,
            feed_range,
            cut_depth_range,
            cut_width_range,
        };
        search_box.validate()?;

        Ok(SearchPlan {
            reason: self.reason(&factors),
            advice: self.advice(),
            search_box,
            safety_factors: factors,
        })
    }

    fn plan_speed_range(&self) -> (f64, f64) {
        let lower = self.tool.recommended_speed_min.max(planner::SPEED_FLOOR);

        let mut upper = self.tool.recommended_speed_max * safety::SPEED;
        // Stay clear of the estimated resonance band of the spindle/tool
        // combination.
        let critical = planner::RESONANCE_RPM / self.tool.diameter * planner::RESONANCE_DERATE;
        if upper > critical {
            upper = critical;
        }
        let by_cutting_speed = self.tool.max_cutting_speed * physics::VC_DIVISOR / self.tool.diameter;
        upper = upper.min(by_cutting_speed);
        upper *= self.speed_feed_factor();
        upper = upper.min(self.machine.rpm_max);

        (lower, upper)
    }

    fn plan_feed_range(&self) -> (f64, f64) {
        let lower = self.tool.recommended_feed_min.max(planner::FEED_FLOOR);

        let mut upper = self.tool.recommended_feed_max * safety::FEED;
        let by_per_tooth = self.tool.max_feed_per_tooth
            * f64::from(self.tool.teeth)
            * self.tool.recommended_speed_min;
        upper = upper.min(by_per_tooth);
        let by_stiffness = self.tool.stiffness * review::STIFFNESS_FORCE_FACTOR
            / self.material.cutting_force_coefficient;
        upper = upper.min(by_stiffness);
        upper *= self.speed_feed_factor();
        upper = upper.min(self.machine.feed_rate_max);

        (lower, upper)
    }

    fn plan_cut_depth_range(&self) -> (f64, f64) {
        let mut upper = self.tool.recommended_cut_depth_max * safety::CUT_DEPTH;
        upper = upper.min(self.tool.diameter * planner::DEPTH_DIAMETER_FACTOR);
        // Slenderness heuristics: a long overhang takes shallower cuts.
        let slenderness = self.tool.diameter / self.tool.overhang;
        upper = upper.min(self.tool.diameter * slenderness * slenderness * 0.5);
        upper = upper.min(self.tool.diameter * slenderness);
        upper *= self.hardness_factor();

        (planner::CUT_FLOOR, upper)
    }

    fn plan_cut_width_range(&self) -> (f64, f64) {
        let upper = (self.tool.recommended_cut_width_max * safety::CUT_WIDTH)
            .min(self.tool.diameter * planner::WIDTH_DIAMETER_FACTOR);
        (planner::CUT_FLOOR, upper)
    }

    /// Hardness factor alone; scales the depth axis
    fn hardness_factor(&self) -> f64 {
        if self.material.hardness > material_factor::HARD_HB {
            material_factor::HARD_FACTOR
        } else if self.material.hardness < material_factor::SOFT_HB {
            material_factor::SOFT_FACTOR
        } else {
            1.0
        }
    }

    /// Hardness and machinability combined; scales speed and feed
    fn speed_feed_factor(&self) -> f64 {
        self.hardness_factor() * self.material.machinability
    }

    fn reason(&self, factors: &SafetyFactors) -> String {
        format!(
            "vendor envelope of {} {} ({}); material {} at {:.0} HB, machinability {:.2}; \
             machine {} capped at {:.0} r/min and {:.1} kW; safety factors speed {:.2}, \
             feed {:.2}, cut depth {:.2}",
            self.tool.material,
            self.tool.kind,
            self.tool.name,
            self.material.name,
            self.material.hardness,
            self.material.machinability,
            self.machine.name,
            self.machine.rpm_max,
            self.machine.power_max,
            factors.speed,
            factors.feed,
            factors.cut_depth,
        )
    }

    fn advice(&self) -> HashMap<String, String> {
        let mut advice = HashMap::new();

        if self.material.hardness > material_factor::HARD_HB {
            advice.insert(
                "speed".to_string(),
                "Hard workpiece material: keep spindle speed down to preserve tool life"
                    .to_string(),
            );
        } else if self.material.hardness < material_factor::SOFT_HB {
            advice.insert(
                "speed".to_string(),
                "Soft workpiece material: spindle speed can go up for better productivity"
                    .to_string(),
            );
        }

        if self.tool.material.is_carbide() {
            advice.insert(
                "feed".to_string(),
                "Carbide tooling tolerates the upper end of the recommended feed range"
                    .to_string(),
            );
        } else {
            advice.insert(
                "feed".to_string(),
                "Non-carbide tooling: stay toward the lower end of the feed range".to_string(),
            );
        }

        if self.tool.overhang > self.tool.diameter * 3.0 {
            advice.insert(
                "cut_depth".to_string(),
                "Long tool overhang: reduce the depth of cut to avoid chatter".to_string(),
            );
        }

        advice.insert(
            "general".to_string(),
            format!(
                "Maximize removal rate while keeping tool life above the strategy minimum; \
                 monitor spindle load on {}",
                self.machine.name
            ),
        );

        advice
    }
}
