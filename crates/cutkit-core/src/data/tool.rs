//! Cutting tool records
//!
//! This module provides:
//! - Tool classification (kind, substrate material, coating)
//! - Tool geometry and the vendor-recommended operating envelope
//! - Taylor-model wear coefficients and stiffness data
//! - Record validation used before an optimization run

use serde::{Deserialize, Serialize};

use crate::error::{OptimizeError, Result};

/// Tool kinds for classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub enum ToolKind {
    /// Face mill
    FaceMill,
    /// Flat end mill
    EndMill,
    /// Twist drill
    Drill,
    /// Boring bar
    BoringBar,
    /// Specialty tool
    Specialty,
}

impl std::fmt::Display for ToolKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FaceMill => write!(f, "Face Mill"),
            Self::EndMill => write!(f, "End Mill"),
            Self::Drill => write!(f, "Drill"),
            Self::BoringBar => write!(f, "Boring Bar"),
            Self::Specialty => write!(f, "Specialty"),
        }
    }
}

/// Tool substrate material
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ToolMaterial {
    /// High Speed Steel
    Hss,
    /// Solid carbide
    Carbide,
    /// Coated carbide
    CoatedCarbide,
    /// Ceramic
    Ceramic,
    /// Cubic boron nitride
    Cbn,
}

impl ToolMaterial {
    /// Whether the substrate tolerates the upper end of the feed envelope
    pub fn is_carbide(&self) -> bool {
        matches!(self, Self::Carbide | Self::CoatedCarbide)
    }
}

impl std::fmt::Display for ToolMaterial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Hss => write!(f, "HSS"),
            Self::Carbide => write!(f, "Carbide"),
            Self::CoatedCarbide => write!(f, "Coated Carbide"),
            Self::Ceramic => write!(f, "Ceramic"),
            Self::Cbn => write!(f, "CBN"),
        }
    }
}

/// Tool coating type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ToolCoating {
    /// Uncoated
    None,
    /// Titanium Nitride coating
    TiN,
    /// Titanium Aluminum Nitride coating
    TiAlN,
    /// Aluminum Chromium Nitride coating
    AlCrN,
    /// Diamond-like carbon coating
    Dlc,
}

impl std::fmt::Display for ToolCoating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => write!(f, "Uncoated"),
            Self::TiN => write!(f, "TiN"),
            Self::TiAlN => write!(f, "TiAlN"),
            Self::AlCrN => write!(f, "AlCrN"),
            Self::Dlc => write!(f, "DLC"),
        }
    }
}

/// Tool identifier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct ToolId(pub String);

impl std::fmt::Display for ToolId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Complete tool definition
///
/// Immutable for the duration of one optimization run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tool {
    /// Unique tool identifier
    pub id: ToolId,
    /// Display name
    pub name: String,
    /// Tool kind
    pub kind: ToolKind,
    /// Substrate material
    pub material: ToolMaterial,
    /// Coating
    pub coating: ToolCoating,

    // Geometry
    /// Cutting diameter in mm
    pub diameter: f64,
    /// Number of teeth / flutes
    pub teeth: u32,
    /// Tip corner radius in mm
    pub tip_radius: f64,
    /// Approach (entering) angle in degrees
    pub approach_angle: f64,
    /// Rake angle in degrees
    pub rake_angle: f64,
    /// Overhang from the holder in mm
    pub overhang: f64,

    // Vendor envelope
    /// Recommended minimum spindle speed in r/min
    pub recommended_speed_min: f64,
    /// Recommended maximum spindle speed in r/min
    pub recommended_speed_max: f64,
    /// Recommended minimum feed rate in mm/min
    pub recommended_feed_min: f64,
    /// Recommended maximum feed rate in mm/min
    pub recommended_feed_max: f64,
    /// Recommended maximum axial depth of cut in mm
    pub recommended_cut_depth_max: f64,
    /// Recommended maximum radial width of cut in mm
    pub recommended_cut_width_max: f64,
    /// Maximum cutting speed in m/min
    pub max_cutting_speed: f64,
    /// Maximum feed per tooth in mm
    pub max_feed_per_tooth: f64,
    /// Maximum feed force in N
    pub max_feed_force: f64,

    // Taylor wear coefficients
    /// Tool life coefficient `Ct`
    pub life_coefficient: f64,
    /// Cutting-speed exponent of the life model
    pub speed_exponent: f64,
    /// Feed exponent of the life model
    pub feed_exponent: f64,
    /// Depth exponent of the life model (carried, unused by the current model)
    pub depth_exponent: f64,

    // Stiffness
    /// Static stiffness in N/μm
    pub stiffness: f64,
    /// Elastic modulus of the tool body in MPa
    pub elastic_modulus: f64,
}

impl Tool {
    /// Validate the record before use in an optimization
    pub fn validate(&self) -> Result<()> {
        if self.diameter <= 0.0 {
            return Err(OptimizeError::invalid(
                "tool.diameter",
                "must be strictly positive",
            ));
        }
        if self.teeth < 1 {
            return Err(OptimizeError::invalid("tool.teeth", "must be at least 1"));
        }
        if self.approach_angle <= 0.0 {
            return Err(OptimizeError::invalid(
                "tool.approach_angle",
                "must be strictly positive",
            ));
        }
        if self.overhang <= 0.0 {
            return Err(OptimizeError::invalid(
                "tool.overhang",
                "must be strictly positive",
            ));
        }
        for (field, min, max) in [
            (
                "tool.recommended_speed",
                self.recommended_speed_min,
                self.recommended_speed_max,
            ),
            (
                "tool.recommended_feed",
                self.recommended_feed_min,
                self.recommended_feed_max,
            ),
        ] {
            if min <= 0.0 || min > max {
                return Err(OptimizeError::invalid(
                    field,
                    "minimum must be positive and not exceed the maximum",
                ));
            }
        }
        for (field, value) in [
            ("tool.recommended_cut_depth_max", self.recommended_cut_depth_max),
            ("tool.recommended_cut_width_max", self.recommended_cut_width_max),
            ("tool.max_cutting_speed", self.max_cutting_speed),
            ("tool.max_feed_per_tooth", self.max_feed_per_tooth),
            ("tool.max_feed_force", self.max_feed_force),
            ("tool.life_coefficient", self.life_coefficient),
            ("tool.stiffness", self.stiffness),
            ("tool.elastic_modulus", self.elastic_modulus),
            ("tool.tip_radius", self.tip_radius),
        ] {
            if value <= 0.0 {
                return Err(OptimizeError::invalid(field, "must be strictly positive"));
            }
        }
        Ok(())
    }
}
