//! Result review
//!
//! Classifies a final evaluation against safety thresholds in five
//! groups: tool strength, machine capacity, material adaptation, vendor
//! envelope, and operational safety. Produces graded items, an aggregate
//! pass flag, a textual assessment, and a 0-100 safety score.

use cutkit_core::data::{Evaluation, Machine, Material, Strategy, Tool};
use cutkit_core::limits::{material_factor, review};
use serde::{Deserialize, Serialize};

/// Severity of one review item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReviewSeverity {
    /// Within limits
    Safe,
    /// Close to a limit, worth watching
    Warning,
    /// Outside a physical limit, adjust before use
    Error,
    /// Endangers machine or tool, must not be used
    Critical,
}

impl ReviewSeverity {
    /// Contribution to the aggregate safety score
    fn score(self) -> f64 {
        match self {
            Self::Safe => 100.0,
            Self::Warning => 70.0,
            Self::Error => 30.0,
            Self::Critical => 0.0,
        }
    }
}

impl std::fmt::Display for ReviewSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Safe => write!(f, "safe"),
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
            Self::Critical => write!(f, "critical"),
        }
    }
}

/// One graded check
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewItem {
    /// Check name
    pub name: String,
    /// Observed value
    pub current_value: f64,
    /// Limit the value was compared against
    pub limit_value: f64,
    /// Grade
    pub severity: ReviewSeverity,
    /// What was found
    pub message: String,
    /// What to do about it
    pub recommendation: String,
}

/// Aggregated review of one optimization result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewReport {
    /// No error or critical item present
    pub passed: bool,
    pub total_items: usize,
    pub safe_count: usize,
    pub warning_count: usize,
    pub error_count: usize,
    pub critical_count: usize,
    /// All graded items
    pub items: Vec<ReviewItem>,
    /// Short textual verdict
    pub overall_assessment: String,
    /// Mean item score in [0, 100]
    pub safety_score: f64,
}

/// Safety reviewer over the run's input records
pub struct Reviewer<'a> {
    tool: &'a Tool,
    material: &'a Material,
    machine: &'a Machine,
    strategy: &'a Strategy,
}

impl<'a> Reviewer<'a> {
    pub fn new(
        tool: &'a Tool,
        material: &'a Material,
        machine: &'a Machine,
        strategy: &'a Strategy,
    ) -> Self {
        Self {
            tool,
            material,
            machine,
            strategy,
        }
    }

    /// Review a final evaluation
    pub fn review(&self, eval: &Evaluation) -> ReviewReport {
        let mut items = Vec::new();
        self.review_tool_strength(eval, &mut items);
        self.review_machine_capacity(eval, &mut items);
        self.review_material_adaptation(eval, &mut items);
        self.review_vendor_envelope(eval, &mut items);
        self.review_operational_safety(eval, &mut items);

        let safe_count = count(&items, ReviewSeverity::Safe);
        let warning_count = count(&items, ReviewSeverity::Warning);
        let error_count = count(&items, ReviewSeverity::Error);
        let critical_count = count(&items, ReviewSeverity::Critical);

        let safety_score = if items.is_empty() {
            100.0
        } else {
            items.iter().map(|i| i.severity.score()).sum::<f64>() / items.len() as f64
        };

        ReviewReport {
            passed: error_count == 0 && critical_count == 0,
            total_items: items.len(),
            safe_count,
            warning_count,
            error_count,
            critical_count,
            overall_assessment: assessment(critical_count, error_count, warning_count),
            safety_score,
            items,
        }
    }

    /// Cutting force against the stiffness-derived budget, and tip
    /// deflection against the deflection budget.
    fn review_tool_strength(&self, eval: &Evaluation, items: &mut Vec<ReviewItem>) {
        let cutting_force = self.material.cutting_force_coefficient
            * eval.cut_depth
            * eval.cut_width
            * (eval.feed / 1000.0).sqrt();
        let max_force = self.tool.stiffness * review::STIFFNESS_FORCE_FACTOR;
        let ratio = cutting_force / max_force;

        let (severity, message, recommendation) = if ratio > 1.0 {
            (
                ReviewSeverity::Critical,
                format!(
                    "Cutting force {cutting_force:.0} N exceeds the tool budget {max_force:.0} N"
                ),
                "Reduce feed or depth of cut immediately to avoid tool breakage".to_string(),
            )
        } else if ratio > 0.9 {
            (
                ReviewSeverity::Error,
                format!(
                    "Cutting force {cutting_force:.0} N is at {:.0}% of the tool budget",
                    ratio * 100.0
                ),
                "Reduce feed or depth of cut to restore a safety margin".to_string(),
            )
        } else if ratio > 0.75 {
            (
                ReviewSeverity::Warning,
                format!(
                    "Cutting force {cutting_force:.0} N is elevated ({:.0}% of budget)",
                    ratio * 100.0
                ),
                "Watch tool wear and inspect the edge regularly".to_string(),
            )
        } else {
            (
                ReviewSeverity::Safe,
                format!(
                    "Cutting force {cutting_force:.0} N is within the tool budget ({:.0}%)",
                    ratio * 100.0
                ),
                "No action needed".to_string(),
            )
        };
        items.push(ReviewItem {
            name: "tool strength".to_string(),
            current_value: cutting_force,
            limit_value: max_force,
            severity,
            message,
            recommendation,
        });

        let deflection = eval.deflection;
        let budget = review::DEFLECTION_BUDGET_MM;
        let (severity, message, recommendation) = if deflection > budget {
            (
                ReviewSeverity::Error,
                format!("Tool deflection {:.1} μm exceeds {:.1} μm", deflection * 1000.0, budget * 1000.0),
                "Reduce depth of cut or shorten the overhang".to_string(),
            )
        } else if deflection > budget * 0.8 {
            (
                ReviewSeverity::Warning,
                format!("Tool deflection {:.1} μm is close to the budget", deflection * 1000.0),
                "Accuracy may suffer; consider a shallower cut".to_string(),
            )
        } else {
            (
                ReviewSeverity::Safe,
                format!("Tool deflection {:.1} μm is within the budget", deflection * 1000.0),
                "Tool stiffness is adequate".to_string(),
            )
        };
        items.push(ReviewItem {
            name: "tool deflection".to_string(),
            current_value: deflection,
            limit_value: budget,
            severity,
            message,
            recommendation,
        });
    }

    /// Power, torque, and feed force against 85% of the machine limits
    fn review_machine_capacity(&self, eval: &Evaluation, items: &mut Vec<ReviewItem>) {
        let threshold = review::MACHINE_LOAD_THRESHOLD;
        let checks = [
            ("machine power", eval.power, self.machine.power_max, "kW"),
            ("machine torque", eval.torque, self.machine.torque_max, "N·m"),
            (
                "machine feed force",
                eval.feed_force,
                self.machine.feed_force_max,
                "N",
            ),
        ];
        for (name, value, limit, unit) in checks {
            if name == "machine feed force" && value <= 0.0 {
                continue;
            }
            let ratio = value / limit;
            let (severity, message, recommendation) = if ratio > 1.0 {
                (
                    ReviewSeverity::Critical,
                    format!("{value:.2} {unit} exceeds the machine limit {limit:.2} {unit}"),
                    "Reduce cutting parameters to avoid overloading the machine".to_string(),
                )
            } else if ratio > threshold {
                (
                    ReviewSeverity::Error,
                    format!(
                        "Utilization {:.0}% exceeds the {:.0}% load threshold",
                        ratio * 100.0,
                        threshold * 100.0
                    ),
                    format!(
                        "Reduce cutting parameters to keep utilization under {:.0}%",
                        threshold * 100.0
                    ),
                )
            } else if ratio > threshold * 0.9 {
                (
                    ReviewSeverity::Warning,
                    format!("Utilization {:.0}% is close to the load threshold", ratio * 100.0),
                    "Avoid sustained operation at this load".to_string(),
                )
            } else {
                (
                    ReviewSeverity::Safe,
                    format!("Utilization {:.0}% is within the load threshold", ratio * 100.0),
                    "No action needed".to_string(),
                )
            };
            items.push(ReviewItem {
                name: name.to_string(),
                current_value: value,
                limit_value: limit * threshold,
                severity,
                message,
                recommendation,
            });
        }
    }

    /// Cutting speed against the hardness-derived recommendation
    fn review_material_adaptation(&self, eval: &Evaluation, items: &mut Vec<ReviewItem>) {
        let recommended = if self.material.hardness > material_factor::HARD_HB {
            review::VC_HARD
        } else if self.material.hardness > review::MEDIUM_HB {
            review::VC_MEDIUM
        } else {
            review::VC_SOFT
        };
        let ratio = eval.cutting_speed / recommended;

        let (severity, message, recommendation) = if ratio > 1.5 {
            (
                ReviewSeverity::Error,
                format!(
                    "Cutting speed {:.1} m/min is far above the {recommended:.0} m/min \
                     recommended for {:.0} HB",
                    eval.cutting_speed, self.material.hardness
                ),
                "Lower the spindle speed to avoid overheating and rapid wear".to_string(),
            )
        } else if ratio > 1.2 {
            (
                ReviewSeverity::Warning,
                format!(
                    "Cutting speed {:.1} m/min is above the {recommended:.0} m/min recommendation",
                    eval.cutting_speed
                ),
                "Watch edge temperature; consider coolant".to_string(),
            )
        } else if ratio < 0.5 {
            (
                ReviewSeverity::Warning,
                format!(
                    "Cutting speed {:.1} m/min is well below the {recommended:.0} m/min \
                     recommendation",
                    eval.cutting_speed
                ),
                "Spindle speed can go up for better productivity".to_string(),
            )
        } else {
            (
                ReviewSeverity::Safe,
                format!("Cutting speed {:.1} m/min suits this material", eval.cutting_speed),
                "No action needed".to_string(),
            )
        };
        items.push(ReviewItem {
            name: "material adaptation".to_string(),
            current_value: eval.cutting_speed,
            limit_value: recommended,
            severity,
            message,
            recommendation,
        });
    }

    /// Speed, feed, and depth against the vendor recommendations
    fn review_vendor_envelope(&self, eval: &Evaluation, items: &mut Vec<ReviewItem>) {
        items.push(envelope_item(
            "vendor speed",
            eval.speed,
            self.tool.recommended_speed_min,
            self.tool.recommended_speed_max,
            "r/min",
        ));
        items.push(envelope_item(
            "vendor feed",
            eval.feed,
            self.tool.recommended_feed_min,
            self.tool.recommended_feed_max,
            "mm/min",
        ));

        let depth_limit = self.tool.recommended_cut_depth_max;
        let (severity, message, recommendation) = if eval.cut_depth > depth_limit {
            (
                ReviewSeverity::Error,
                format!(
                    "Depth of cut {:.2} mm exceeds the vendor maximum {depth_limit:.2} mm",
                    eval.cut_depth
                ),
                "Reduce the depth of cut into the vendor envelope".to_string(),
            )
        } else {
            (
                ReviewSeverity::Safe,
                format!("Depth of cut {:.2} mm is within the vendor envelope", eval.cut_depth),
                "No action needed".to_string(),
            )
        };
        items.push(ReviewItem {
            name: "vendor cut depth".to_string(),
            current_value: eval.cut_depth,
            limit_value: depth_limit,
            severity,
            message,
            recommendation,
        });
    }

    /// Tool life against the graded strategy/operational floor
    fn review_operational_safety(&self, eval: &Evaluation, items: &mut Vec<ReviewItem>) {
        let base = self.strategy.min_tool_life.min(review::TOOL_LIFE_FLOOR);
        let (severity, message, recommendation) = if eval.tool_life < base {
            (
                ReviewSeverity::Critical,
                format!(
                    "Tool life {:.1} min is below the {base:.1} min floor; constant tool \
                     changes would stall production",
                    eval.tool_life
                ),
                "Reduce cutting parameters to extend tool life".to_string(),
            )
        } else if eval.tool_life < base * 2.0 {
            (
                ReviewSeverity::Error,
                format!("Tool life {:.1} min forces frequent tool changes", eval.tool_life),
                "Reduce cutting parameters to extend tool life".to_string(),
            )
        } else {
            (
                ReviewSeverity::Safe,
                format!("Tool life {:.1} min is adequate", eval.tool_life),
                "No action needed".to_string(),
            )
        };
        items.push(ReviewItem {
            name: "tool life".to_string(),
            current_value: eval.tool_life,
            limit_value: base * 2.0,
            severity,
            message,
            recommendation,
        });
    }
}

fn envelope_item(name: &str, value: f64, min: f64, max: f64, unit: &str) -> ReviewItem {
    let (severity, message, recommendation) = if value > max {
        (
            ReviewSeverity::Error,
            format!("{value:.1} {unit} exceeds the vendor maximum {max:.1} {unit}"),
            "Bring the value back into the vendor envelope".to_string(),
        )
    } else if value < min {
        (
            ReviewSeverity::Warning,
            format!("{value:.1} {unit} is below the vendor minimum {min:.1} {unit}"),
            "Productivity suffers below the vendor envelope; consider raising it".to_string(),
        )
    } else {
        (
            ReviewSeverity::Safe,
            format!("{value:.1} {unit} is within the vendor envelope"),
            "No action needed".to_string(),
        )
    };
    ReviewItem {
        name: name.to_string(),
        current_value: value,
        limit_value: max,
        severity,
        message,
        recommendation,
    }
}

fn count(items: &[ReviewItem], severity: ReviewSeverity) -> usize {
    items.iter().filter(|i| i.severity == severity).count()
}

fn assessment(critical: usize, errors: usize, warnings: usize) -> String {
    if critical > 0 {
        "Critical: parameters endanger the machine or tool and must be corrected".to_string()
    } else if errors > 0 {
        "Errors present: parameters exceed physical limits and need adjustment".to_string()
    } else if warnings >= 3 {
        "Multiple warnings: parameters run close to their limits".to_string()
    } else if warnings > 0 {
        "Warnings present: parameters are workable but leave room for improvement".to_string()
    } else {
        "All checks safe: parameters are within reasonable bounds".to_string()
    }
}
