//! # CutKit Tool Library
//!
//! The repository interface the optimizer consumes and an in-memory,
//! JSON-backed implementation seeded with a small standard library of
//! tools, materials, machines, and strategies.

pub mod library;
pub mod traits;

pub use library::{init_standard_library, ParameterLibrary};
pub use traits::ParameterStore;
