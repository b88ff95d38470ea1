//! Exact partial derivatives of arithmetic expressions, computed two ways:
//! by walking an explicit expression tree ([`Node`]), or by forward-mode
//! propagation through dual numbers ([`Dual`]).
//!
//! ```
//! use autodx::{sin, Node};
//!
//! let a = Node::var(2.);
//! let b = Node::var(3.);
//! let f = &a * &b + sin(&a);
//! assert_eq!(f.value().unwrap(), 6. + 2f64.sin());
//! assert_eq!(f.gradient(&[a, b]).unwrap(), vec![3. + 2f64.cos(), 2.]);
//! ```

mod binary_fn;
mod builder;
pub mod dual;
pub mod error;
mod node;
mod tree;
mod unary_fn;

pub use binary_fn::BinaryOp;
pub use builder::{ln, sin};
pub use dual::{gradient, Dual};
pub use error::{EvalError, IndexError};
pub use node::{derivative_vector, BinaryNode, Constant, Node, UnaryNode, Variable};
pub use tree::{assign_indices, collect_leaves};
pub use unary_fn::UnaryOp;
