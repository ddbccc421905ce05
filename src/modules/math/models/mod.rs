mod operation;

pub use operation::{
    BatchOperationRequest, BatchResult, OperandsRequest, Operation, OperationResult,
};
