use cutkit_core::data::{Machine, Material, Strategy, Tool};

/// Read-only source of optimization input records.
///
/// Implementations must not mutate records while an optimization run
/// holds copies of them.
pub trait ParameterStore: Send + Sync {
    fn material(&self, id: &str) -> Option<Material>;
    fn tool(&self, id: &str) -> Option<Tool>;
    fn machine(&self, id: &str) -> Option<Machine>;
    fn strategy(&self, id: &str) -> Option<Strategy>;
}
