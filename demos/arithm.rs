use autodx::Node;

fn main() -> Result<(), autodx::EvalError> {
    let a = Node::named_var(123., "a");
    let b = Node::named_var(321., "b");
    let c = Node::named_var(42., "c");
    let ab = &a + &b;
    let abc = &ab * &c;
    println!("a + b: {} = {}", ab, ab.value()?);
    println!("(a + b) * c: {} = {}", abc, abc.value()?);
    println!("d(a + b) / da = {}", ab.derivative(&a)?);
    println!("d((a + b) * c) / da = {}", abc.derivative(&a)?);
    println!("d((a + b) * c) / db = {}", abc.derivative(&b)?);
    println!("d((a + b) * c) / dc = {}", abc.derivative(&c)?);

    let abcd = &abc / 2;
    println!("d((a + b) * c / 2) / dc = {}", abcd.derivative(&c)?);

    let zero = &abc / (&a - 123);
    if let Err(e) = zero.value() {
        println!("{}: {}", zero, e);
    }
    Ok(())
}
