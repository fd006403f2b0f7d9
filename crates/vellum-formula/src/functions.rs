//! The closed set of built-in formula functions.
//!
//! `if` and `lookup` live in the evaluator (they need laziness and bag
//! access); everything here is a pure numeric function over evaluated
//! arguments.

use crate::eval::{EvalError, Scalar};

/// Every callable name, for diagnostics and CLI listings.
pub const BUILTINS: &[&str] = &[
    "abs", "ceil", "floor", "round", "sign", "min", "max", "if", "lookup",
];

/// Call a pure built-in with evaluated arguments.
pub fn call(name: &str, args: &[Scalar]) -> Result<Scalar, EvalError> {
    match name {
        "abs" => unary(name, args, f64::abs),
        "ceil" => unary(name, args, f64::ceil),
        "floor" => unary(name, args, f64::floor),
        "round" => unary(name, args, f64::round),
        "sign" => unary(name, args, |n| {
            if n > 0.0 {
                1.0
            } else if n < 0.0 {
                -1.0
            } else {
                0.0
            }
        }),
        "min" => fold(name, args, f64::min),
        "max" => fold(name, args, f64::max),
        other => Err(EvalError::UnknownFunction(other.to_string())),
    }
}

fn unary(name: &str, args: &[Scalar], f: impl Fn(f64) -> f64) -> Result<Scalar, EvalError> {
    if args.len() != 1 {
        return Err(EvalError::BadArity(name.to_string()));
    }
    let n = args[0].as_number().ok_or(EvalError::NonNumeric)?;
    Ok(Scalar::Num(f(n)))
}

fn fold(name: &str, args: &[Scalar], f: impl Fn(f64, f64) -> f64) -> Result<Scalar, EvalError> {
    if args.is_empty() {
        return Err(EvalError::BadArity(name.to_string()));
    }
    let mut acc = args[0].as_number().ok_or(EvalError::NonNumeric)?;
    for arg in &args[1..] {
        let n = arg.as_number().ok_or(EvalError::NonNumeric)?;
        acc = f(acc, n);
    }
    Ok(Scalar::Num(acc))
}
