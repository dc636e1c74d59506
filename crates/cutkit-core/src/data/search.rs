//! Parameter search box

use serde::{Deserialize, Serialize};

use crate::error::{OptimizeError, Result};

/// Closed box restricting the optimizer's search space
///
/// Each axis is an inclusive `(lower, upper)` interval in the unit of the
/// corresponding parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchBox {
    /// Spindle speed range in r/min
    pub speed_range: (f64, f64),
    /// Feed rate range in mm/min
    pub feed_range: (f64, f64),
    /// Axial depth range in mm
    pub cut_depth_range: (f64, f64),
    /// Radial width range in mm
    pub cut_width_range: (f64, f64),
}

impl SearchBox {
    /// Check that every axis is a non-empty interval.
    ///
    /// The first empty axis is reported; the optimizer surfaces this
    /// before any population is built.
    pub fn validate(&self) -> Result<()> {
        for (axis, (lower, upper)) in [
            ("speed", self.speed_range),
            ("feed", self.feed_range),
            ("cut_depth", self.cut_depth_range),
            ("cut_width", self.cut_width_range),
        ] {
            if upper < lower {
                return Err(OptimizeError::Infeasible { axis, lower, upper });
            }
        }
        Ok(())
    }
}
