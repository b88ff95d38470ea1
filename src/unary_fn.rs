use crate::error::EvalError;

/// The closed set of unary functions a tree can contain.
/// Each one knows its value and the factor it contributes to the chain rule.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnaryOp {
    Sin,
    Ln,
}

impl UnaryOp {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Sin => "sin",
            Self::Ln => "ln",
        }
    }

    pub(crate) fn f(&self, data: f64) -> Result<f64, EvalError> {
        match self {
            Self::Sin => Ok(data.sin()),
            Self::Ln => {
                self.check_domain(data)?;
                Ok(data.ln())
            }
        }
    }

    /// d/du f(u), to be multiplied by the operand's derivative.
    pub(crate) fn grad(&self, data: f64) -> Result<f64, EvalError> {
        match self {
            Self::Sin => Ok(data.cos()),
            Self::Ln => {
                self.check_domain(data)?;
                Ok(1. / data)
            }
        }
    }

    fn check_domain(&self, data: f64) -> Result<(), EvalError> {
        match self {
            Self::Ln if data <= 0. => Err(EvalError::Domain {
                op: self.name(),
                value: data,
            }),
            _ => Ok(()),
        }
    }
}

#[test]
fn test_ln_domain() {
    assert_eq!(UnaryOp::Ln.f(1.), Ok(0.));
    assert_eq!(UnaryOp::Ln.grad(4.), Ok(0.25));
    assert_eq!(
        UnaryOp::Ln.f(0.),
        Err(EvalError::Domain {
            op: "ln",
            value: 0.
        })
    );
    assert!(UnaryOp::Ln.grad(-1.).is_err());
    assert!(UnaryOp::Sin.f(-1.).is_ok());
}
