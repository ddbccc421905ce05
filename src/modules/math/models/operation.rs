use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::{AppError, Result};

/// Binary arithmetic operation on two `f64` operands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Add,
    Subtract,
    Multiply,
    Divide,
    Power,
}

impl Operation {
    /// Every supported operation, in listing order
    pub const ALL: [Operation; 5] = [
        Operation::Add,
        Operation::Subtract,
        Operation::Multiply,
        Operation::Divide,
        Operation::Power,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Operation::Add => "add",
            Operation::Subtract => "subtract",
            Operation::Multiply => "multiply",
            Operation::Divide => "divide",
            Operation::Power => "power",
        }
    }

    /// Evaluate `x <op> y`.
    ///
    /// Division by zero and results that overflow to infinity or NaN are
    /// rejected with `Validation`.
    pub fn apply(self, x: f64, y: f64) -> Result<f64> {
        let result = match self {
            Operation::Add => x + y,
            Operation::Subtract => x - y,
            Operation::Multiply => x * y,
            Operation::Divide => {
                if y == 0.0 {
                    return Err(AppError::validation("Cannot divide by zero"));
                }
                x / y
            }
            Operation::Power => x.powf(y),
        };

        if !result.is_finite() {
            return Err(AppError::validation(format!(
                "Result of {} is not a finite number",
                self
            )));
        }
        Ok(result)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Operation {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        Operation::ALL
            .into_iter()
            .find(|op| op.name() == s)
            .ok_or_else(|| AppError::validation(format!("Unsupported operation: {}", s)))
    }
}

/// Operands for a single calculation
#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct OperandsRequest {
    pub x: f64,
    pub y: f64,
}

/// One entry of a batch request. The name stays a string so unknown
/// operations are reported as business errors rather than bad JSON.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BatchOperationRequest {
    pub operation: String,
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
}

/// v1 batch entry: the inputs echoed back with the result
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OperationResult {
    pub operation: String,
    pub x: f64,
    pub y: f64,
    pub result: f64,
}

/// v2 batch entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BatchResult {
    pub operation: String,
    pub result: f64,
}
