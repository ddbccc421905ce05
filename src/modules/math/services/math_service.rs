use crate::core::Result;
use crate::modules::math::models::{BatchOperationRequest, Operation};

/// Stateless calculator behind the math endpoints
#[derive(Debug, Clone, Default)]
pub struct MathService;

impl MathService {
    pub fn new() -> Self {
        Self
    }

    /// Apply a named operation to two operands
    pub fn calculate(&self, operation: &str, x: f64, y: f64) -> Result<f64> {
        let op: Operation = operation.parse()?;
        let result = op.apply(x, y)?;
        tracing::debug!(%op, x, y, result, "Calculated operation");
        Ok(result)
    }

    /// Names of the supported operations
    pub fn available_operations(&self) -> Vec<&'static str> {
        Operation::ALL.iter().map(|op| op.name()).collect()
    }

    /// Evaluate every entry in order. The first failure aborts the batch.
    pub fn calculate_batch(&self, operations: &[BatchOperationRequest]) -> Result<Vec<f64>> {
        operations
            .iter()
            .map(|entry| self.calculate(&entry.operation, entry.x, entry.y))
            .collect()
    }
}
