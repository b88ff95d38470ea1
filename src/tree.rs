//! Traversals that prepare a finished tree for rendering or code generation.

use std::collections::VecDeque;

use tracing::{debug, trace};

use crate::{error::IndexError, node::Node};

/// Leaves reachable from `root` in breadth-first, first-seen order.
///
/// A leaf that is [the same leaf](Node::same_leaf) as one already collected
/// is skipped, so repeated variables and equal constants appear once.
pub fn collect_leaves(root: &Node) -> Vec<&Node> {
    let mut leaves: Vec<&Node> = vec![];
    let mut work = VecDeque::from([root]);
    while let Some(node) = work.pop_front() {
        if node.is_leaf() {
            if !leaves.iter().any(|leaf| leaf.same_leaf(node)) {
                leaves.push(node);
            }
        } else {
            work.extend(node.children());
        }
    }
    trace!(count = leaves.len(), "collected leaves");
    leaves
}

/// Numbers every node of the tree and names anonymous variables.
///
/// Distinct variables get `first_index, first_index + 1, ...` in the order
/// of [`collect_leaves`], and an unnamed one is named `x<index>`. Then all the
/// other nodes are numbered in post-order, continuing after the last variable.
/// Constants and subexpressions are not deduplicated here: each position
/// gets its own index.
///
/// Indices can be assigned once per tree. If any node is already indexed,
/// nothing is modified and an error is returned. Returns the next unused index.
pub fn assign_indices(root: &Node, first_index: usize) -> Result<usize, IndexError> {
    check_unindexed(root)?;

    let mut next = first_index;
    for var in collect_leaves(root)
        .into_iter()
        .filter(|leaf| matches!(leaf, Node::Variable(_)))
    {
        var.set_index(next)?;
        var.name_if_missing(|| format!("x{next}"));
        debug!(index = next, name = ?var.name(), "indexed variable");
        next += 1;
    }

    let vars_end = next;
    let next = assign_rest(root, next)?;
    debug!(first_index, vars_end, next, "assigned indices");
    Ok(next)
}

fn check_unindexed(node: &Node) -> Result<(), IndexError> {
    if let Some(index) = node.index() {
        return Err(IndexError::AlreadyIndexed(index));
    }
    node.children().into_iter().try_for_each(check_unindexed)
}

/// Variables were numbered in the first phase and are the only nodes skipped here.
fn assign_rest(node: &Node, next: usize) -> Result<usize, IndexError> {
    if node.index().is_some() {
        return Ok(next);
    }
    let next = match node {
        Node::Variable(_) | Node::Constant(_) => next,
        Node::Binary(binary) => {
            let next = assign_rest(binary.lhs(), next)?;
            assign_rest(binary.rhs(), next)?
        }
        Node::Unary(unary) => assign_rest(unary.operand(), next)?,
    };
    node.set_index(next)?;
    Ok(next + 1)
}
