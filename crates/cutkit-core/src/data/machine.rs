//! Machine tool capability records

use serde::{Deserialize, Serialize};

use crate::error::{OptimizeError, Result};

/// Machine identifier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct MachineId(pub String);

impl std::fmt::Display for MachineId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Machine tool capabilities
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Machine {
    /// Unique machine identifier
    pub id: MachineId,
    /// Display name
    pub name: String,
    /// Maximum spindle speed in r/min
    pub rpm_max: f64,
    /// Maximum spindle power in kW
    pub power_max: f64,
    /// Maximum spindle torque in N·m
    pub torque_max: f64,
    /// Maximum feed rate in mm/min
    pub feed_rate_max: f64,
    /// Maximum feed force in N
    pub feed_force_max: f64,
    /// Drive train efficiency in (0, 1]
    pub efficiency: f64,
}

impl Machine {
    /// Validate the record before use in an optimization
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("machine.rpm_max", self.rpm_max),
            ("machine.power_max", self.power_max),
            ("machine.torque_max", self.torque_max),
            ("machine.feed_rate_max", self.feed_rate_max),
            ("machine.feed_force_max", self.feed_force_max),
        ] {
            if value <= 0.0 {
                return Err(OptimizeError::invalid(field, "must be strictly positive"));
            }
        }
        if self.efficiency <= 0.0 || self.efficiency > 1.0 {
            return Err(OptimizeError::invalid(
                "machine.efficiency",
                "must lie in (0, 1]",
            ));
        }
        Ok(())
    }
}
