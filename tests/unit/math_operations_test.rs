// Unit tests for the arithmetic operations behind /math

use proptest::prelude::*;
use stockroom::core::AppError;
use stockroom::math::models::BatchOperationRequest;
use stockroom::math::{MathService, Operation};

#[test]
fn test_operation_names_round_trip() {
    for op in Operation::ALL {
        let parsed: Operation = op.name().parse().unwrap();
        assert_eq!(parsed, op);
        assert_eq!(op.to_string(), op.name());
    }
}

#[test]
fn test_unknown_operation_is_rejected() {
    let err = "modulo".parse::<Operation>().unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
    assert_eq!(err.to_string(), "Unsupported operation: modulo");
}

#[test]
fn test_operation_names_are_case_sensitive() {
    assert!("Add".parse::<Operation>().is_err());
    assert!("ADD".parse::<Operation>().is_err());
}

#[test]
fn test_basic_results() {
    assert_eq!(Operation::Add.apply(2.0, 3.0).unwrap(), 5.0);
    assert_eq!(Operation::Subtract.apply(2.0, 3.0).unwrap(), -1.0);
    assert_eq!(Operation::Multiply.apply(4.0, 2.5).unwrap(), 10.0);
    assert_eq!(Operation::Divide.apply(10.0, 4.0).unwrap(), 2.5);
    assert_eq!(Operation::Power.apply(2.0, 10.0).unwrap(), 1024.0);
}

#[test]
fn test_divide_by_zero() {
    let err = Operation::Divide.apply(1.0, 0.0).unwrap_err();
    assert_eq!(err.to_string(), "Cannot divide by zero");

    // negative zero is still zero
    assert!(Operation::Divide.apply(1.0, -0.0).is_err());
}

#[test]
fn test_overflow_is_rejected() {
    assert!(Operation::Power.apply(10.0, 400.0).is_err());
    assert!(Operation::Multiply.apply(f64::MAX, 2.0).is_err());
}

#[test]
fn test_service_batch_stops_at_first_failure() {
    let service = MathService::new();
    let batch = vec![
        BatchOperationRequest {
            operation: "add".to_string(),
            x: 1.0,
            y: 1.0,
        },
        BatchOperationRequest {
            operation: "divide".to_string(),
            x: 1.0,
            y: 0.0,
        },
    ];

    let err = service.calculate_batch(&batch).unwrap_err();
    assert_eq!(err.to_string(), "Cannot divide by zero");
}

#[test]
fn test_service_empty_batch() {
    let service = MathService::new();
    assert!(service.calculate_batch(&[]).unwrap().is_empty());
}

proptest! {
    #[test]
    fn prop_add_is_commutative(x in -1.0e12f64..1.0e12, y in -1.0e12f64..1.0e12) {
        prop_assert_eq!(
            Operation::Add.apply(x, y).unwrap(),
            Operation::Add.apply(y, x).unwrap()
        );
    }

    #[test]
    fn prop_subtract_inverts_add(x in -1.0e6f64..1.0e6, y in -1.0e6f64..1.0e6) {
        let sum = Operation::Add.apply(x, y).unwrap();
        let back = Operation::Subtract.apply(sum, y).unwrap();
        prop_assert!((back - x).abs() < 1e-6);
    }

    #[test]
    fn prop_divide_by_nonzero_succeeds(x in -1.0e6f64..1.0e6, y in 1.0e-3f64..1.0e6) {
        let quotient = Operation::Divide.apply(x, y).unwrap();
        prop_assert!((quotient * y - x).abs() < 1e-6 * x.abs().max(1.0));
    }

    #[test]
    fn prop_results_are_finite(op_index in 0usize..5, x in -1.0e3f64..1.0e3, y in -3.0f64..3.0) {
        let op = Operation::ALL[op_index];
        if let Ok(result) = op.apply(x, y) {
            prop_assert!(result.is_finite());
        }
    }
}
