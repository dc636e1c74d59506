//! Machining strategy records and method tags

use serde::{Deserialize, Serialize};

use crate::error::{OptimizeError, Result};

/// Machining method driving the physics dispatch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub enum MachiningMethod {
    /// Face or peripheral milling
    Milling,
    /// Drilling into solid material
    Drilling,
    /// Internal boring of a pre-made hole
    Boring,
}

impl MachiningMethod {
    /// Canonicalize a strategy type tag.
    ///
    /// Accepts the literal tags and their Chinese equivalents. Turning is
    /// rejected: its removal-rate and roughness formulas differ from all
    /// three supported methods. Unknown tags default to milling.
    pub fn canonicalize(tag: &str) -> Result<Self> {
        match tag.trim().to_lowercase().as_str() {
            "milling" | "铣削" => Ok(Self::Milling),
            "drilling" | "钻孔" => Ok(Self::Drilling),
            "boring" | "镗孔" => Ok(Self::Boring),
            "turning" | "车削" => Err(OptimizeError::invalid(
                "strategy.method",
                "turning is not supported",
            )),
            _ => Ok(Self::Milling),
        }
    }
}

impl std::fmt::Display for MachiningMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Milling => write!(f, "milling"),
            Self::Drilling => write!(f, "drilling"),
            Self::Boring => write!(f, "boring"),
        }
    }
}

/// Strategy identifier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct StrategyId(pub String);

impl std::fmt::Display for StrategyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Machining strategy: quality targets and process parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Strategy {
    /// Unique strategy identifier
    pub id: StrategyId,
    /// Display name
    pub name: String,
    /// Raw method tag; canonicalized with [`MachiningMethod::canonicalize`]
    pub method: String,
    /// Minimum acceptable tool life in min
    pub min_tool_life: f64,
    /// Bottom surface roughness limit `Rz` in μm
    pub bottom_roughness_limit: f64,
    /// Side surface roughness limit `Rx` in μm
    pub side_roughness_limit: f64,
    /// Nominal radial width of cut `ae` in mm
    pub cut_width: f64,
    /// Tool wear coefficient multiplier
    pub wear_multiplier: f64,
    /// Pre-bored inner diameter in mm; 0 when not boring
    pub inner_diameter: f64,
}

impl Strategy {
    /// Canonicalized machining method of this strategy
    pub fn machining_method(&self) -> Result<MachiningMethod> {
        MachiningMethod::canonicalize(&self.method)
    }

    /// Validate the record before use in an optimization
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("strategy.min_tool_life", self.min_tool_life),
            ("strategy.bottom_roughness_limit", self.bottom_roughness_limit),
            ("strategy.side_roughness_limit", self.side_roughness_limit),
            ("strategy.wear_multiplier", self.wear_multiplier),
        ] {
            if value <= 0.0 {
                return Err(OptimizeError::invalid(field, "must be strictly positive"));
            }
        }
        if self.cut_width < 0.0 {
            return Err(OptimizeError::invalid(
                "strategy.cut_width",
                "must not be negative",
            ));
        }
        if self.inner_diameter < 0.0 {
            return Err(OptimizeError::invalid(
                "strategy.inner_diameter",
                "must not be negative",
            ));
        }
        if self.machining_method()? == MachiningMethod::Boring && self.inner_diameter <= 0.0 {
            return Err(OptimizeError::invalid(
                "strategy.inner_diameter",
                "boring requires a positive pre-bored diameter",
            ));
        }
        Ok(())
    }
}
