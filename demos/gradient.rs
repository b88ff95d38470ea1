//! Gradient of f(a, b) = a * b + sin(a) computed both ways.

use autodx::{gradient, sin, Dual, EvalError, Node};

fn f(x: &[Dual]) -> Result<Dual, EvalError> {
    Ok(x[0] * x[1] + x[0].sin())
}

fn main() -> Result<(), EvalError> {
    let a = Node::named_var(2., "a");
    let b = Node::named_var(3., "b");
    let tree = &a * &b + sin(&a);
    println!("{} = {}", tree, tree.value()?);
    println!("tree:    {:?}", tree.gradient(&[a, b])?);
    println!("forward: {:?}", gradient(f, &[2., 3.])?);
    println!("d/da f at a=2 (b fixed): {}", f(&[Dual::var(2.), Dual::constant(3.)])?);
    println!(
        "f / (b - 3) at b=3: {:?}",
        gradient(|x| f(x)?.checked_div(x[1] - 3.), &[2., 3.])
    );
    Ok(())
}
