use crate::error::EvalError;

/// The closed set of binary operators a tree can contain.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl BinaryOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
        }
    }

    pub(crate) fn f(&self, lhs: f64, rhs: f64) -> Result<f64, EvalError> {
        Ok(match self {
            Self::Add => lhs + rhs,
            Self::Sub => lhs - rhs,
            Self::Mul => lhs * rhs,
            Self::Div => {
                if rhs == 0. {
                    return Err(EvalError::DivisionByZero);
                }
                lhs / rhs
            }
        })
    }

    /// Derivative of `lhs op rhs` given the values and derivatives of both operands.
    pub(crate) fn grad(
        &self,
        (lhs, dlhs): (f64, f64),
        (rhs, drhs): (f64, f64),
    ) -> Result<f64, EvalError> {
        Ok(match self {
            Self::Add => dlhs + drhs,
            Self::Sub => dlhs - drhs,
            Self::Mul => lhs * drhs + rhs * dlhs,
            Self::Div => {
                if rhs == 0. {
                    return Err(EvalError::DivisionByZero);
                }
                (dlhs * rhs - lhs * drhs) / (rhs * rhs)
            }
        })
    }
}

#[test]
fn test_binary_grad() {
    assert_eq!(BinaryOp::Mul.grad((2., 1.), (3., 0.)), Ok(3.));
    assert_eq!(BinaryOp::Div.grad((10., 0.), (2., 1.)), Ok(-2.5));
    assert_eq!(
        BinaryOp::Div.grad((1., 1.), (0., 0.)),
        Err(EvalError::DivisionByZero)
    );
}
