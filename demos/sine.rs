use autodx::{sin, Node};

fn main() {
    for i in -10..=10 {
        let x = i as f64 / 10. * std::f64::consts::PI;
        run_model(x);
    }
}

fn run_model(a_val: f64) {
    let a = Node::var(a_val);
    let sin_a = sin(&a);

    match (sin_a.value(), sin_a.derivative(&a)) {
        (Ok(v), Ok(d)) => println!("[{a_val}, {v}, {d}],"),
        (Err(e), _) | (_, Err(e)) => eprintln!("{e}"),
    }
}
