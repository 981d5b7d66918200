//! Engine policy types.

use crate::error::GraphError;

/// Budget configuration for graph construction.
///
/// The standard catalog reaches its fixed point well inside the defaults; the
/// budgets exist so a custom catalog cannot grow the registry without bound.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnginePolicyV1 {
    /// Hard cap on expansion passes.
    pub max_passes: u64,
    /// Hard cap on registry size.
    pub max_nodes: usize,
}

impl EnginePolicyV1 {
    /// Validate that both budgets are usable.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::InvalidPolicy`] if a budget is zero or
    /// `max_nodes` cannot even hold the 100 kernel nodes.
    pub fn validate(&self) -> Result<(), GraphError> {
        if self.max_passes == 0 {
            return Err(GraphError::InvalidPolicy {
                detail: "max_passes must be at least 1".into(),
            });
        }
        if self.max_nodes < crate::registry::KERNEL_SIZE {
            return Err(GraphError::InvalidPolicy {
                detail: format!(
                    "max_nodes must be at least {} (the kernel), got {}",
                    crate::registry::KERNEL_SIZE,
                    self.max_nodes
                ),
            });
        }
        Ok(())
    }
}

impl Default for EnginePolicyV1 {
    fn default() -> Self {
        Self {
            max_passes: 64,
            max_nodes: 100_000,
        }
    }
}
