use thiserror::Error;

/// Failure while evaluating a node's value or derivative.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum EvalError {
    #[error("division by zero")]
    DivisionByZero,
    #[error("{op} is not defined for {value}")]
    Domain { op: &'static str, value: f64 },
}

/// Failure while numbering the nodes of a tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum IndexError {
    #[error("node is already indexed as {0}. Indices can be assigned only once per tree.")]
    AlreadyIndexed(usize),
}
