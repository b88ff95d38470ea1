//! Operator overloads that build expression trees from ordinary arithmetic syntax.
//!
//! Numbers on either side of an operator become [`Node::constant`]s and the
//! operands keep their written order, so `5. - x` is `Sub(5, x)`.
//! Borrowed operands are cloned into the new tree.

use std::ops::{Add, Div, Mul, Neg, Sub};

use crate::{binary_fn::BinaryOp, node::Node, unary_fn::UnaryOp};

impl From<f64> for Node {
    fn from(value: f64) -> Self {
        Node::constant(value)
    }
}

impl From<i32> for Node {
    fn from(value: i32) -> Self {
        Node::constant(value as f64)
    }
}

impl From<&Node> for Node {
    fn from(node: &Node) -> Self {
        node.clone()
    }
}

macro_rules! impl_binary_op {
    ($trait:ident, $method:ident, $op:expr) => {
        impl<Rhs: Into<Node>> $trait<Rhs> for Node {
            type Output = Node;
            fn $method(self, rhs: Rhs) -> Node {
                Node::binary($op, self, rhs.into())
            }
        }

        impl<Rhs: Into<Node>> $trait<Rhs> for &Node {
            type Output = Node;
            fn $method(self, rhs: Rhs) -> Node {
                Node::binary($op, self.clone(), rhs.into())
            }
        }

        impl_binary_op!(@scalar $trait, $method, $op, f64);
        impl_binary_op!(@scalar $trait, $method, $op, i32);
    };
    (@scalar $trait:ident, $method:ident, $op:expr, $scalar:ty) => {
        impl $trait<Node> for $scalar {
            type Output = Node;
            fn $method(self, rhs: Node) -> Node {
                Node::binary($op, self.into(), rhs)
            }
        }

        impl $trait<&Node> for $scalar {
            type Output = Node;
            fn $method(self, rhs: &Node) -> Node {
                Node::binary($op, self.into(), rhs.clone())
            }
        }
    };
}

impl_binary_op!(Add, add, BinaryOp::Add);
impl_binary_op!(Sub, sub, BinaryOp::Sub);
impl_binary_op!(Mul, mul, BinaryOp::Mul);
impl_binary_op!(Div, div, BinaryOp::Div);

/// `-x` is built as `0 - x`.
impl Neg for Node {
    type Output = Node;
    fn neg(self) -> Node {
        Node::binary(BinaryOp::Sub, Node::constant(0.), self)
    }
}

impl Neg for &Node {
    type Output = Node;
    fn neg(self) -> Node {
        -self.clone()
    }
}

pub fn sin(x: impl Into<Node>) -> Node {
    Node::unary(UnaryOp::Sin, x.into())
}

pub fn ln(x: impl Into<Node>) -> Node {
    Node::unary(UnaryOp::Ln, x.into())
}
