//! # CutKit Core
//!
//! Core domain types for cutting-parameter optimization.
//! Provides the records describing tools, materials, machines, and
//! machining strategies, the compiled constraints view consumed by the
//! optimizer, the evaluation aggregate it produces, and the shared
//! error taxonomy and named limits.

pub mod data;
pub mod error;
pub mod limits;

pub use data::{
    CuttingConstraints, Evaluation, Machine, MachineId, MachiningMethod, Material, MaterialGroup,
    MaterialId, SearchBox, Strategy, StrategyId, Tool, ToolCoating, ToolId, ToolKind, ToolMaterial,
};

pub use error::{OptimizeError, Result};
