//! Compiled constraints view
//!
//! Everything the physics kernel needs for one run, flattened out of the
//! four input records. Built once per optimization and never mutated
//! afterwards.

use serde::{Deserialize, Serialize};

use crate::data::{Machine, MachiningMethod, Material, Strategy, Tool};
use crate::error::{OptimizeError, Result};
use crate::limits::{drilling, review};

/// Flattened per-run view of geometry, coefficients, and limits
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CuttingConstraints {
    /// Machining method driving the formula dispatch
    pub method: MachiningMethod,

    // Tool geometry
    /// Cutting diameter in mm
    pub diameter: f64,
    /// Number of teeth
    pub teeth: u32,
    /// Tip corner radius in mm
    pub tip_radius: f64,
    /// Approach angle in degrees
    pub approach_angle: f64,
    /// Rake angle in degrees
    pub rake_angle: f64,
    /// Overhang in mm
    pub overhang: f64,
    /// Elastic modulus in MPa
    pub elastic_modulus: f64,
    /// Static stiffness in N/μm
    pub stiffness: f64,

    // Process
    /// Radial width of cut in mm (milling)
    pub cut_width: f64,
    /// Pre-bored inner diameter in mm (boring)
    pub inner_diameter: f64,

    // Material
    /// Specific cutting force `kc1.1` in N/mm²
    pub cutting_force_coefficient: f64,
    /// Kienzle chip-thickness exponent `mc`
    pub kienzle_slope: f64,

    // Machine
    /// Drive train efficiency
    pub efficiency: f64,

    // Tool life model
    /// Tool life coefficient `Ct`
    pub life_coefficient: f64,
    /// Cutting-speed exponent
    pub speed_exponent: f64,
    /// Feed exponent
    pub feed_exponent: f64,
    /// Strategy wear multiplier
    pub wear_multiplier: f64,

    // Limits
    /// Tool life lower bound in min
    pub min_tool_life: f64,
    /// Machine power bound in kW
    pub max_power: f64,
    /// Machine torque bound in N·m
    pub max_torque: f64,
    /// Feed force bound in N, the tighter of tool and machine
    pub max_feed_force: f64,
    /// Bottom roughness bound in μm
    pub max_bottom_roughness: f64,
    /// Side roughness bound in μm
    pub max_side_roughness: f64,
    /// Feed-per-tooth envelope bound in mm
    pub max_feed_per_tooth: f64,
    /// Cutting-speed envelope bound in m/min
    pub max_cutting_speed: f64,
    /// Axial depth cap in mm
    pub max_cut_depth: f64,
    /// Tool deflection bound in mm
    pub max_deflection: f64,
    /// Drilling plunge pressure bound in MPa
    pub max_plunge_pressure: f64,
}

impl CuttingConstraints {
    /// Compile the per-run view from the four input records.
    ///
    /// Validates every record first; the resulting view is the only thing
    /// the evaluator and the fitness batcher ever see.
    pub fn compile(
        tool: &Tool,
        material: &Material,
        machine: &Machine,
        strategy: &Strategy,
    ) -> Result<Self> {
        tool.validate()?;
        material.validate()?;
        machine.validate()?;
        strategy.validate()?;
        let method = strategy.machining_method()?;
        if method == MachiningMethod::Boring && strategy.inner_diameter >= tool.diameter {
            return Err(OptimizeError::invalid(
                "strategy.inner_diameter",
                "must be smaller than the tool diameter",
            ));
        }

        Ok(Self {
            method,
            diameter: tool.diameter,
            teeth: tool.teeth,
            tip_radius: tool.tip_radius,
            approach_angle: tool.approach_angle,
            rake_angle: tool.rake_angle,
            overhang: tool.overhang,
            elastic_modulus: tool.elastic_modulus,
            stiffness: tool.stiffness,
            cut_width: strategy.cut_width.min(tool.diameter),
            inner_diameter: strategy.inner_diameter,
            cutting_force_coefficient: material.cutting_force_coefficient,
            kienzle_slope: material.kienzle_slope,
            efficiency: machine.efficiency,
            life_coefficient: tool.life_coefficient,
            speed_exponent: tool.speed_exponent,
            feed_exponent: tool.feed_exponent,
            wear_multiplier: strategy.wear_multiplier,
            min_tool_life: strategy.min_tool_life,
            max_power: machine.power_max,
            max_torque: machine.torque_max,
            max_feed_force: tool.max_feed_force.min(machine.feed_force_max),
            max_bottom_roughness: strategy.bottom_roughness_limit,
            max_side_roughness: strategy.side_roughness_limit,
            max_feed_per_tooth: tool.max_feed_per_tooth,
            max_cutting_speed: tool.max_cutting_speed,
            max_cut_depth: tool.recommended_cut_depth_max.min(tool.diameter),
            max_deflection: review::DEFLECTION_BUDGET_MM,
            max_plunge_pressure: drilling::PLUNGE_PRESSURE_MAX,
        })
    }
}
