//! Numbers a tree and prints one line per node: index, label and child indices.

use autodx::{assign_indices, ln, sin, Node};

fn print_node(node: &Node, depth: usize) {
    let children: Vec<_> = node
        .children()
        .iter()
        .filter_map(|child| child.index())
        .collect();
    println!(
        "{:indent$}{} [{}] <- {:?}",
        "",
        node.index().map_or(-1, |i| i as i64),
        node.label(),
        children,
        indent = depth * 2
    );
    for child in node.children() {
        print_node(child, depth + 1);
    }
}

fn main() {
    let x = Node::var(3.);
    let y = Node::named_var(0.5, "y");
    let e = ln(&x * 2 + 1) / sin(&y) - 2 * &x;
    println!("{e}");
    match assign_indices(&e, 0) {
        Ok(next) => {
            println!("{next} slots");
            print_node(&e, 0);
        }
        Err(err) => eprintln!("{err}"),
    }
}
