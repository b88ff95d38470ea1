use approx::assert_relative_eq;
use autodx::{derivative_vector, gradient, ln, sin, Dual, EvalError, Node};
use proptest::prelude::*;

#[derive(Clone, Debug)]
enum Shape {
    Var(usize),
    Const(f64),
    Add(Box<Shape>, Box<Shape>),
    Sub(Box<Shape>, Box<Shape>),
    Mul(Box<Shape>, Box<Shape>),
}

const NUM_VARS: usize = 3;

fn shape() -> impl Strategy<Value = Shape> {
    let leaf = prop_oneof![
        (0..NUM_VARS).prop_map(Shape::Var),
        (-10.0..10.0f64).prop_map(Shape::Const),
    ];
    leaf.prop_recursive(4, 32, 2, |inner| {
        prop_oneof![
            (inner.clone(), inner.clone())
                .prop_map(|(l, r)| Shape::Add(Box::new(l), Box::new(r))),
            (inner.clone(), inner.clone())
                .prop_map(|(l, r)| Shape::Sub(Box::new(l), Box::new(r))),
            (inner.clone(), inner).prop_map(|(l, r)| Shape::Mul(Box::new(l), Box::new(r))),
        ]
    })
}

fn build(shape: &Shape, vars: &[Node]) -> Node {
    match shape {
        Shape::Var(i) => vars[*i].clone(),
        Shape::Const(c) => Node::constant(*c),
        Shape::Add(l, r) => build(l, vars) + build(r, vars),
        Shape::Sub(l, r) => build(l, vars) - build(r, vars),
        Shape::Mul(l, r) => build(l, vars) * build(r, vars),
    }
}

fn eval(shape: &Shape, vals: &[f64]) -> f64 {
    match shape {
        Shape::Var(i) => vals[*i],
        Shape::Const(c) => *c,
        Shape::Add(l, r) => eval(l, vals) + eval(r, vals),
        Shape::Sub(l, r) => eval(l, vals) - eval(r, vals),
        Shape::Mul(l, r) => eval(l, vals) * eval(r, vals),
    }
}

fn eval_dual(shape: &Shape, args: &[Dual]) -> Dual {
    match shape {
        Shape::Var(i) => args[*i],
        Shape::Const(c) => Dual::constant(*c),
        Shape::Add(l, r) => eval_dual(l, args) + eval_dual(r, args),
        Shape::Sub(l, r) => eval_dual(l, args) - eval_dual(r, args),
        Shape::Mul(l, r) => eval_dual(l, args) * eval_dual(r, args),
    }
}

fn values() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(-5.0..5.0f64, NUM_VARS)
}

proptest! {
    #[test]
    fn tree_value_matches_direct_evaluation(shape in shape(), vals in values()) {
        let vars: Vec<_> = vals.iter().map(|&v| Node::var(v)).collect();
        let tree = build(&shape, &vars);
        prop_assert_eq!(tree.value(), Ok(eval(&shape, &vals)));
    }

    #[test]
    fn tree_and_forward_mode_agree(shape in shape(), vals in values()) {
        let vars: Vec<_> = vals.iter().map(|&v| Node::var(v)).collect();
        let tree = build(&shape, &vars);
        let by_tree = derivative_vector(&tree, &vars).unwrap();
        let by_dual = gradient(|args| Ok(eval_dual(&shape, args)), &vals).unwrap();
        for (t, d) in by_tree.iter().zip(by_dual.iter()) {
            assert_relative_eq!(*t, *d, epsilon = 1e-9, max_relative = 1e-9);
        }
    }

    #[test]
    fn product_rule(f in shape(), g in shape(), vals in values(), wrt in 0..NUM_VARS) {
        let vars: Vec<_> = vals.iter().map(|&v| Node::var(v)).collect();
        let (f, g) = (build(&f, &vars), build(&g, &vars));
        let wrt = &vars[wrt];
        let expected = f.value().unwrap() * g.derivative(wrt).unwrap()
            + g.value().unwrap() * f.derivative(wrt).unwrap();
        assert_relative_eq!((&f * &g).derivative(wrt).unwrap(), expected, epsilon = 1e-9);
    }

    #[test]
    fn quotient_rule(f in shape(), g in shape(), vals in values(), wrt in 0..NUM_VARS) {
        let vars: Vec<_> = vals.iter().map(|&v| Node::var(v)).collect();
        let (f, g) = (build(&f, &vars), build(&g, &vars));
        let gv = g.value().unwrap();
        prop_assume!(gv.abs() > 1e-3);
        let wrt = &vars[wrt];
        let fv = f.value().unwrap();
        let expected =
            (f.derivative(wrt).unwrap() * gv - fv * g.derivative(wrt).unwrap()) / (gv * gv);
        assert_relative_eq!(
            (&f / &g).derivative(wrt).unwrap(),
            expected,
            epsilon = 1e-9,
            max_relative = 1e-9
        );
    }

    #[test]
    fn chain_rule(u in shape(), vals in values(), wrt in 0..NUM_VARS) {
        let vars: Vec<_> = vals.iter().map(|&v| Node::var(v)).collect();
        let u = build(&u, &vars);
        let wrt = &vars[wrt];
        let (uv, du) = (u.value().unwrap(), u.derivative(wrt).unwrap());

        assert_relative_eq!(
            sin(&u).derivative(wrt).unwrap(),
            uv.cos() * du,
            epsilon = 1e-9,
            max_relative = 1e-9
        );
        if uv > 0. {
            assert_relative_eq!(
                ln(&u).derivative(wrt).unwrap(),
                du / uv,
                epsilon = 1e-9,
                max_relative = 1e-9
            );
        } else {
            let is_domain_error =
                matches!(ln(&u).derivative(wrt), Err(EvalError::Domain { .. }));
            prop_assert!(is_domain_error);
        }
    }
}

#[test]
fn diamond() {
    let a = Node::named_var(1., "a");
    let b = Node::named_var(3., "b");
    let c = Node::named_var(5., "c");
    let ab = &a + &b;
    let ac = &a + &c;
    let abac = &ab + &ac;
    assert_eq!(derivative_vector(&abac, &[a, b, c]), Ok(vec![2., 1., 1.]));
}

#[test]
fn scalar_on_either_side() {
    let x = Node::var(2.);
    let lhs = 5 - &x;
    assert_eq!(lhs.value(), Ok(3.));
    assert_eq!(lhs.derivative(&x), Ok(-1.));
    let rhs = &x - 5;
    assert_eq!(rhs.value(), Ok(-3.));
    assert_eq!(rhs.derivative(&x), Ok(1.));
}

#[test]
fn constant_over_variable() {
    let x = Node::var(2.);
    let e = Node::constant(10.) / &x;
    assert_eq!(e.value(), Ok(5.));
    assert_eq!(e.derivative(&x), Ok(-2.5));
}

#[test]
fn tree_gradient() {
    let a = Node::var(2.);
    let b = Node::var(3.);
    let f = &a * &b + sin(&a);
    let grad = f.gradient(&[a, b]).unwrap();
    assert_relative_eq!(grad[0], 3. + 2f64.cos());
    assert_relative_eq!(grad[1], 2.);
}

#[test]
fn forward_gradient() {
    let grad = gradient(|x| Ok(x[0] * x[1] + x[0].sin()), &[2., 3.]).unwrap();
    assert_relative_eq!(grad[0], 3. + 2f64.cos());
    assert_relative_eq!(grad[1], 2.);
}

#[test]
fn failures_leave_tree_reusable() {
    let x = Node::var(0.);
    let y = Node::var(1.);
    let e = &y / &x;
    assert_eq!(e.value(), Err(EvalError::DivisionByZero));
    assert_eq!(e.derivative(&y), Err(EvalError::DivisionByZero));

    let l = ln(&x) + &y;
    assert!(matches!(l.value(), Err(EvalError::Domain { op: "ln", .. })));
    // A sibling subtree still evaluates
    assert_eq!(l.children()[1].value(), Ok(1.));
}

#[test]
fn zero_divisor_fails_in_both_models() {
    let a = Node::var(1.);
    let b = Node::var(0.);
    let tree = &a / &b;
    assert_eq!(tree.gradient(&[a, b]), Err(EvalError::DivisionByZero));

    let forward = gradient(|x| x[0].checked_div(x[1]), &[1., 0.]);
    assert_eq!(forward, Err(EvalError::DivisionByZero));
}

#[test]
fn forward_ln_outside_domain_fails() {
    let forward = gradient(|x| (x[0] - x[1]).ln(), &[1., 2.]);
    assert!(matches!(forward, Err(EvalError::Domain { op: "ln", .. })));
    let forward = gradient(|x| (x[1] - x[0]).ln(), &[1., 2.]).unwrap();
    assert_eq!(forward, vec![-1., 1.]);
}
