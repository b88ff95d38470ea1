//! Forward-mode differentiation with dual numbers.
//!
//! A [`Dual`] carries a value together with its derivative with respect to
//! one seeded input. [`gradient`] recovers a full gradient by evaluating the
//! function once per input, which is cheap per call but linear in the number
//! of inputs.
//!
//! Division and `ln` can fail, so they are methods returning a `Result`
//! rather than operators.

use std::ops::{Add, Mul, Neg, Sub};

use crate::{binary_fn::BinaryOp, error::EvalError, unary_fn::UnaryOp};

#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Dual {
    pub x: f64,
    pub dx: f64,
}

impl Dual {
    pub fn new(x: f64, dx: f64) -> Self {
        Self { x, dx }
    }

    /// The input being differentiated, with derivative 1.
    pub fn var(x: f64) -> Self {
        Self { x, dx: 1. }
    }

    pub fn constant(x: f64) -> Self {
        Self { x, dx: 0. }
    }

    pub fn sin(self) -> Self {
        Self {
            x: self.x.sin(),
            dx: self.x.cos() * self.dx,
        }
    }

    pub fn ln(self) -> Result<Self, EvalError> {
        let op = UnaryOp::Ln;
        Ok(Self {
            x: op.f(self.x)?,
            dx: op.grad(self.x)? * self.dx,
        })
    }

    /// Quotient rule. A plain `f64` divisor is a constant with zero derivative.
    pub fn checked_div(self, rhs: impl Into<Dual>) -> Result<Self, EvalError> {
        let rhs = rhs.into();
        let op = BinaryOp::Div;
        Ok(Self {
            x: op.f(self.x, rhs.x)?,
            dx: op.grad((self.x, self.dx), (rhs.x, rhs.dx))?,
        })
    }
}

impl From<f64> for Dual {
    fn from(x: f64) -> Self {
        Self::constant(x)
    }
}

impl std::fmt::Display for Dual {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "(x={}, dx={})", self.x, self.dx)
    }
}

impl Add for Dual {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        Self::new(self.x + rhs.x, self.dx + rhs.dx)
    }
}

impl Sub for Dual {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self::Output {
        Self::new(self.x - rhs.x, self.dx - rhs.dx)
    }
}

impl Mul for Dual {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self::Output {
        Self::new(self.x * rhs.x, self.dx * rhs.x + self.x * rhs.dx)
    }
}

impl Neg for Dual {
    type Output = Self;
    fn neg(self) -> Self::Output {
        Self::new(-self.x, -self.dx)
    }
}

// A scalar operand is a constant with zero derivative, so every rule above
// applies unchanged.
macro_rules! impl_scalar_op {
    ($trait:ident, $method:ident) => {
        impl $trait<f64> for Dual {
            type Output = Dual;
            fn $method(self, rhs: f64) -> Dual {
                self.$method(Dual::constant(rhs))
            }
        }

        impl $trait<Dual> for f64 {
            type Output = Dual;
            fn $method(self, rhs: Dual) -> Dual {
                Dual::constant(self).$method(rhs)
            }
        }
    };
}

impl_scalar_op!(Add, add);
impl_scalar_op!(Sub, sub);
impl_scalar_op!(Mul, mul);

/// Gradient of `f` at `x`.
///
/// `f` is called once per input; on the `i`-th call the `i`-th argument is
/// seeded with derivative 1 and all others with 0. The first failing call
/// stops the evaluation.
pub fn gradient(
    f: impl Fn(&[Dual]) -> Result<Dual, EvalError>,
    x: &[f64],
) -> Result<Vec<f64>, EvalError> {
    (0..x.len())
        .map(|i| {
            let args: Vec<_> = x
                .iter()
                .enumerate()
                .map(|(j, &v)| Dual::new(v, if i == j { 1. } else { 0. }))
                .collect();
            Ok(f(&args)?.dx)
        })
        .collect()
}

#[test]
fn test_dual() {
    let d1 = Dual::new(1., 2.);
    let d2 = Dual::new(3., 4.);
    assert_eq!(d1 + d2, Dual::new(4., 6.));
    assert_eq!(d1 - d2, Dual::new(-2., -2.));
    assert_eq!(d1 * d2, Dual::new(3., 10.));

    let d4 = Dual::new(20., -10.);
    let d5 = Dual::new(2., 1.);
    assert_eq!(d4.checked_div(d5), Ok(Dual::new(10., -10.)));
}

#[test]
fn test_scalar_ops() {
    let x = Dual::var(2.);
    assert_eq!(5. - x, Dual::new(3., -1.));
    assert_eq!(x - 5., Dual::new(-3., 1.));
    assert_eq!(x.checked_div(4.), Ok(Dual::new(0.5, 0.25)));
    assert_eq!(Dual::constant(10.).checked_div(x), Ok(Dual::new(5., -2.5)));
    assert_eq!(3. * x + 1., Dual::new(7., 3.));
}

#[test]
fn test_gradient() {
    let grad = gradient(|args| Ok(args[0] * args[1] + args[0].sin()), &[2., 3.]);
    assert_eq!(grad, Ok(vec![3. + 2f64.cos(), 2.]));
}

#[test]
fn test_failures() {
    let x = Dual::var(0.);
    assert_eq!(x.checked_div(0.), Err(EvalError::DivisionByZero));
    assert_eq!(Dual::var(4.).ln(), Ok(Dual::new(4f64.ln(), 0.25)));
    assert!(matches!(
        (-1. * x).ln(),
        Err(EvalError::Domain { op: "ln", .. })
    ));

    let grad = gradient(|x| x[0].checked_div(x[1]), &[1., 0.]);
    assert_eq!(grad, Err(EvalError::DivisionByZero));
    let grad = gradient(|x| (x[0] * x[1]).ln(), &[-1., 2.]);
    assert!(grad.is_err());
}
