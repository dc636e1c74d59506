//! Candidate evaluation aggregate

use serde::{Deserialize, Serialize};

/// Derived machining quantities of one candidate parameter set
///
/// Units: speed r/min, feed mm/min, cut depth/width mm, feed per tooth mm,
/// cutting speed m/min, removal rate cm³/min, tool life min, roughness μm,
/// power kW, torque N·m, feed force N, deflection mm.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    /// Spindle speed `n`
    pub speed: f64,
    /// Feed rate `f`
    pub feed: f64,
    /// Axial depth of cut `ap`
    pub cut_depth: f64,
    /// Radial width of cut `ae`
    pub cut_width: f64,
    /// Feed per tooth `fz`
    pub feed_per_tooth: f64,
    /// Cutting speed `Vc`
    pub cutting_speed: f64,
    /// Material removal rate
    pub removal_rate: f64,
    /// Tool life `Lt`
    pub tool_life: f64,
    /// Bottom surface roughness `Rz`
    pub bottom_roughness: f64,
    /// Side surface roughness `Rx`
    pub side_roughness: f64,
    /// Spindle power `P`
    pub power: f64,
    /// Spindle torque `T`
    pub torque: f64,
    /// Feed force `Ff`
    pub feed_force: f64,
    /// Tool tip deflection `δ` (milling; 0 otherwise)
    pub deflection: f64,
}

impl Evaluation {
    /// Whether every derived quantity is finite
    pub fn is_finite(&self) -> bool {
        [
            self.speed,
            self.feed,
            self.cut_depth,
            self.cut_width,
            self.feed_per_tooth,
            self.cutting_speed,
            self.removal_rate,
            self.tool_life,
            self.bottom_roughness,
            self.side_roughness,
            self.power,
            self.torque,
            self.feed_force,
            self.deflection,
        ]
        .iter()
        .all(|v| v.is_finite())
    }
}
