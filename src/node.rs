use std::{cell::OnceCell, fmt::Display, rc::Rc};

use crate::{
    binary_fn::BinaryOp,
    error::{EvalError, IndexError},
    unary_fn::UnaryOp,
};

#[derive(Debug)]
struct VariablePayload {
    value: f64,
    name: OnceCell<String>,
    index: OnceCell<usize>,
}

/// A named input of an expression.
///
/// All occurrences of one variable in a tree share the same payload, so
/// cloning a `Variable` gives a distinct node that still denotes the same
/// input. Two variables created separately are never equal, whatever their
/// values are.
#[derive(Clone, Debug)]
pub struct Variable(Rc<VariablePayload>);

impl Variable {
    fn new(value: f64, name: Option<String>) -> Self {
        Self(Rc::new(VariablePayload {
            value,
            name: name.map_or_else(OnceCell::new, OnceCell::from),
            index: OnceCell::new(),
        }))
    }

    pub fn value(&self) -> f64 {
        self.0.value
    }

    pub fn name(&self) -> Option<&str> {
        self.0.name.get().map(String::as_str)
    }
}

impl PartialEq for Variable {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

/// A numeric literal. Constants are equal when their values are.
#[derive(Debug)]
pub struct Constant {
    value: f64,
    index: OnceCell<usize>,
}

impl Constant {
    pub fn value(&self) -> f64 {
        self.value
    }
}

// A copy is a new tree position, so it starts without an index.
impl Clone for Constant {
    fn clone(&self) -> Self {
        Self {
            value: self.value,
            index: OnceCell::new(),
        }
    }
}

impl PartialEq for Constant {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

#[derive(Debug)]
pub struct BinaryNode {
    op: BinaryOp,
    lhs: Box<Node>,
    rhs: Box<Node>,
    index: OnceCell<usize>,
}

impl BinaryNode {
    pub fn op(&self) -> BinaryOp {
        self.op
    }

    pub fn lhs(&self) -> &Node {
        &self.lhs
    }

    pub fn rhs(&self) -> &Node {
        &self.rhs
    }
}

impl Clone for BinaryNode {
    fn clone(&self) -> Self {
        Self {
            op: self.op,
            lhs: self.lhs.clone(),
            rhs: self.rhs.clone(),
            index: OnceCell::new(),
        }
    }
}

#[derive(Debug)]
pub struct UnaryNode {
    op: UnaryOp,
    term: Box<Node>,
    index: OnceCell<usize>,
}

impl Clone for UnaryNode {
    fn clone(&self) -> Self {
        Self {
            op: self.op,
            term: self.term.clone(),
            index: OnceCell::new(),
        }
    }
}

impl UnaryNode {
    pub fn op(&self) -> UnaryOp {
        self.op
    }

    pub fn operand(&self) -> &Node {
        &self.term
    }
}

/// An element of an expression tree.
///
/// Values and shapes never change after construction. The only mutation is
/// the one-time assignment of an index (and a name, for variables) done by
/// [`assign_indices`](crate::assign_indices).
#[derive(Clone, Debug)]
pub enum Node {
    Variable(Variable),
    Constant(Constant),
    Binary(BinaryNode),
    Unary(UnaryNode),
}

impl Node {
    /// A new input variable without a name. It will be named `x<index>` when indexed.
    pub fn var(value: f64) -> Self {
        Self::Variable(Variable::new(value, None))
    }

    pub fn named_var(value: f64, name: impl Into<String>) -> Self {
        Self::Variable(Variable::new(value, Some(name.into())))
    }

    pub fn constant(value: f64) -> Self {
        Self::Constant(Constant {
            value,
            index: OnceCell::new(),
        })
    }

    pub fn binary(op: BinaryOp, lhs: Node, rhs: Node) -> Self {
        Self::Binary(BinaryNode {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
            index: OnceCell::new(),
        })
    }

    pub fn unary(op: UnaryOp, term: Node) -> Self {
        Self::Unary(UnaryNode {
            op,
            term: Box::new(term),
            index: OnceCell::new(),
        })
    }

    pub fn value(&self) -> Result<f64, EvalError> {
        match self {
            Self::Variable(var) => Ok(var.value()),
            Self::Constant(c) => Ok(c.value),
            Self::Binary(BinaryNode { op, lhs, rhs, .. }) => op.f(lhs.value()?, rhs.value()?),
            Self::Unary(UnaryNode { op, term, .. }) => op.f(term.value()?),
        }
    }

    /// Partial derivative of this subexpression with respect to `wrt`.
    ///
    /// Only a variable equal to `wrt` contributes 1; every other leaf contributes 0.
    /// Nothing is cached, each call walks the whole subtree again.
    pub fn derivative(&self, wrt: &Node) -> Result<f64, EvalError> {
        match self {
            Self::Variable(var) => Ok(match wrt {
                Self::Variable(wrt) if var == wrt => 1.,
                _ => 0.,
            }),
            Self::Constant(_) => Ok(0.),
            Self::Binary(BinaryNode { op, lhs, rhs, .. }) => op.grad(
                (lhs.value()?, lhs.derivative(wrt)?),
                (rhs.value()?, rhs.derivative(wrt)?),
            ),
            Self::Unary(UnaryNode { op, term, .. }) => {
                Ok(op.grad(term.value()?)? * term.derivative(wrt)?)
            }
        }
    }

    /// Partial derivatives with respect to each of `inputs`, in order.
    pub fn gradient(&self, inputs: &[Node]) -> Result<Vec<f64>, EvalError> {
        inputs.iter().map(|input| self.derivative(input)).collect()
    }

    pub fn children(&self) -> Vec<&Node> {
        match self {
            Self::Variable(_) | Self::Constant(_) => vec![],
            Self::Binary(BinaryNode { lhs, rhs, .. }) => vec![lhs.as_ref(), rhs.as_ref()],
            Self::Unary(UnaryNode { term, .. }) => vec![term.as_ref()],
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Self::Variable(_) | Self::Constant(_))
    }

    /// Equality used to deduplicate leaves: the same variable, or constants
    /// with the same value. Operator nodes are never the same leaf.
    pub fn same_leaf(&self, other: &Node) -> bool {
        match (self, other) {
            (Self::Variable(lhs), Self::Variable(rhs)) => lhs == rhs,
            (Self::Constant(lhs), Self::Constant(rhs)) => lhs == rhs,
            _ => false,
        }
    }

    /// Position assigned by [`assign_indices`](crate::assign_indices), if any.
    pub fn index(&self) -> Option<usize> {
        self.index_cell().get().copied()
    }

    /// Display name of a variable. Other nodes have none.
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Variable(var) => var.name(),
            _ => None,
        }
    }

    /// Short label for a diagram: the variable's name (or value), the
    /// constant's value, or the operator symbol.
    pub fn label(&self) -> String {
        match self {
            Self::Variable(var) => var
                .name()
                .map_or_else(|| var.value().to_string(), str::to_string),
            Self::Constant(c) => c.value.to_string(),
            Self::Binary(node) => node.op.symbol().to_string(),
            Self::Unary(node) => node.op.name().to_string(),
        }
    }

    fn index_cell(&self) -> &OnceCell<usize> {
        match self {
            Self::Variable(var) => &var.0.index,
            Self::Constant(c) => &c.index,
            Self::Binary(node) => &node.index,
            Self::Unary(node) => &node.index,
        }
    }

    pub(crate) fn set_index(&self, index: usize) -> Result<(), IndexError> {
        let cell = self.index_cell();
        cell.set(index)
            .map_err(|_| IndexError::AlreadyIndexed(cell.get().copied().unwrap_or(index)))
    }

    /// Gives a variable a name unless it already has one.
    pub(crate) fn name_if_missing(&self, name: impl FnOnce() -> String) {
        if let Self::Variable(var) = self {
            var.0.name.get_or_init(name);
        }
    }
}

/// Structural equality: same shape, same variables and equal constants.
/// Indices are not compared.
impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Binary(lhs), Self::Binary(rhs)) => {
                lhs.op == rhs.op && lhs.lhs == rhs.lhs && lhs.rhs == rhs.rhs
            }
            (Self::Unary(lhs), Self::Unary(rhs)) => lhs.op == rhs.op && lhs.term == rhs.term,
            _ => self.same_leaf(other),
        }
    }
}

impl Display for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Variable(var) => match var.name() {
                Some(name) => write!(f, "{name}"),
                None => write!(f, "Var({})", var.value()),
            },
            Self::Constant(c) => write!(f, "{}", c.value),
            Self::Binary(BinaryNode { op, lhs, rhs, .. }) => {
                write!(f, "({} {} {})", lhs, op.symbol(), rhs)
            }
            Self::Unary(UnaryNode { op, term, .. }) => write!(f, "{}({})", op.name(), term),
        }
    }
}

/// Partial derivatives of `root` with respect to each of `inputs`, in order.
pub fn derivative_vector(root: &Node, inputs: &[Node]) -> Result<Vec<f64>, EvalError> {
    root.gradient(inputs)
}
