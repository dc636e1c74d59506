//! Domain data model
//!
//! Value types describing the inputs of an optimization run (tool,
//! material, machine, strategy), the compiled constraints view handed to
//! the physics kernel, the search box the planner produces, and the
//! evaluation aggregate of a candidate parameter set.

pub mod constraints;
pub mod evaluation;
pub mod machine;
pub mod material;
pub mod search;
pub mod strategy;
pub mod tool;

pub use constraints::CuttingConstraints;
pub use evaluation::Evaluation;
pub use machine::{Machine, MachineId};
pub use material::{Material, MaterialGroup, MaterialId};
pub use search::SearchBox;
pub use strategy::{MachiningMethod, Strategy, StrategyId};
pub use tool::{Tool, ToolCoating, ToolId, ToolKind, ToolMaterial};
