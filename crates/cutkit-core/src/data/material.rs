//! Workpiece material records
//!
//! Material groups follow the ISO application classes (P steel, M
//! stainless, K cast iron, N non-ferrous, S superalloy, H hardened, O
//! other hard materials). Cutting behavior is captured by the Kienzle
//! model coefficients and a scalar machinability index.

use serde::{Deserialize, Serialize};

use crate::error::{OptimizeError, Result};

/// ISO material application group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub enum MaterialGroup {
    /// Non-alloy and low-alloy steels
    P,
    /// Stainless steels
    M,
    /// Cast irons
    K,
    /// Aluminium and copper alloys
    N,
    /// Heat-resistant superalloys
    S,
    /// Hardened steels
    H,
    /// Other hard materials
    O,
}

impl MaterialGroup {
    /// Derive the group from a group-prefixed id such as "P3" or "K1"
    pub fn from_id(id: &str) -> Option<Self> {
        match id.chars().next()? {
            'P' | 'p' => Some(Self::P),
            'M' | 'm' => Some(Self::M),
            'K' | 'k' => Some(Self::K),
            'N' | 'n' => Some(Self::N),
            'S' | 's' => Some(Self::S),
            'H' | 'h' => Some(Self::H),
            'O' | 'o' => Some(Self::O),
            _ => None,
        }
    }
}

impl std::fmt::Display for MaterialGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::P => write!(f, "P (steel)"),
            Self::M => write!(f, "M (stainless steel)"),
            Self::K => write!(f, "K (cast iron)"),
            Self::N => write!(f, "N (non-ferrous)"),
            Self::S => write!(f, "S (superalloy)"),
            Self::H => write!(f, "H (hardened steel)"),
            Self::O => write!(f, "O (hard material)"),
        }
    }
}

/// Material identifier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct MaterialId(pub String);

impl std::fmt::Display for MaterialId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Complete workpiece material definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Material {
    /// Unique material identifier
    pub id: MaterialId,
    /// Display name
    pub name: String,
    /// ISO application group
    pub group: MaterialGroup,
    /// Brinell hardness (HB)
    pub hardness: f64,
    /// Tensile strength in MPa
    pub tensile_strength: f64,
    /// Machinability index in (0, 1.3]
    pub machinability: f64,
    /// Specific cutting force `kc1.1` in N/mm²
    pub cutting_force_coefficient: f64,
    /// Kienzle chip-thickness exponent `mc`
    pub kienzle_slope: f64,
}

impl Material {
    /// Validate the record before use in an optimization
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("material.hardness", self.hardness),
            ("material.tensile_strength", self.tensile_strength),
            (
                "material.cutting_force_coefficient",
                self.cutting_force_coefficient,
            ),
            ("material.kienzle_slope", self.kienzle_slope),
        ] {
            if value <= 0.0 {
                return Err(OptimizeError::invalid(field, "must be strictly positive"));
            }
        }
        if self.machinability <= 0.0 || self.machinability > 1.3 {
            return Err(OptimizeError::invalid(
                "material.machinability",
                "must lie in (0, 1.3]",
            ));
        }
        Ok(())
    }
}
