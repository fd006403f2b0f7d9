//! Tree-walk evaluation of parsed expressions.
//!
//! Evaluation is pure apart from consuming the randomness source. Errors
//! here are internal: the phrase engine absorbs them into the configured
//! default value before anything reaches a caller.

use serde_json::Value;
use tracing::trace;

use vellum_dice::roll::roll;
use vellum_dice::source::RandomSource;
use vellum_props::resolve::resolve;
use vellum_props::table;

use crate::ast::{BinaryOp, Expr, UnaryOp};
use crate::functions;
use crate::phrase;
use crate::scan::OPEN_MARKER;

/// Depth bound for nested property-formula resolution.
///
/// A property's value may itself be a formula; resolution recurses through
/// such values at most this many levels, which also cuts transitive
/// reference cycles short deterministically.
pub const MAX_PROPERTY_DEPTH: usize = 10;

/// A scalar value produced by evaluation.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Num(f64),
    Str(String),
}

impl Scalar {
    /// Boolean results are the strings `"true"` / `"false"`.
    pub fn from_bool(b: bool) -> Self {
        Scalar::Str(if b { "true" } else { "false" }.to_string())
    }

    /// Numeric view: numbers directly, strings via parsing.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Scalar::Num(n) => Some(*n),
            Scalar::Str(s) => s.trim().parse::<f64>().ok(),
        }
    }

    /// Render for substitution. Integral floats print without `.0`.
    pub fn render(&self) -> String {
        match self {
            Scalar::Num(n) => {
                if n.is_finite() && n.fract() == 0.0 && n.abs() < 9e15 {
                    format!("{}", *n as i64)
                } else {
                    n.to_string()
                }
            }
            Scalar::Str(s) => s.clone(),
        }
    }

    /// Truthiness for `if()`: non-zero numbers, and non-empty strings other
    /// than `"false"` and `"0"`.
    pub fn truthy(&self) -> bool {
        match self {
            Scalar::Num(n) => *n != 0.0,
            Scalar::Str(s) => !s.is_empty() && s != "false" && s != "0",
        }
    }
}

/// Errors surfaced during evaluation of a single span.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EvalError {
    #[error("division by zero")]
    DivisionByZero,

    #[error("non-numeric operand")]
    NonNumeric,

    #[error("unknown function '{0}'")]
    UnknownFunction(String),

    #[error("wrong number of arguments to '{0}'")]
    BadArity(String),
}

/// Shared, read-only evaluation state.
#[derive(Clone, Copy)]
pub struct EvalContext<'a> {
    /// The entity's property bag.
    pub bag: &'a Value,

    /// Substituted wherever a value cannot be produced.
    pub default_value: &'a str,

    /// Key of the field being computed, for self-reference detection.
    pub reference: Option<&'a str>,

    /// Current nested-property depth.
    pub depth: usize,
}

/// An evaluated expression: its value plus the annotated source text used
/// for explanation assembly.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluated {
    pub value: Scalar,
    pub note: String,
}

/// Evaluate one expression tree.
pub fn eval(
    expr: &Expr,
    ctx: EvalContext<'_>,
    source: &mut dyn RandomSource,
) -> Result<Evaluated, EvalError> {
    match expr {
        Expr::Number(n) => {
            let value = Scalar::Num(*n);
            let note = value.render();
            Ok(Evaluated { value, note })
        }
        Expr::Str(s) => Ok(Evaluated {
            value: Scalar::Str(s.clone()),
            note: s.clone(),
        }),
        Expr::Dice { spec, source: text } => {
            let outcome = roll(spec, source);
            trace!(spec = %spec, total = outcome.total, "rolled dice");
            Ok(Evaluated {
                value: Scalar::Num(outcome.total as f64),
                note: format!("{} ({})", text, outcome.faces()),
            })
        }
        Expr::Reference {
            path,
            source: text,
            fallback,
        } => eval_reference(path, text, fallback.as_deref(), ctx, source),
        Expr::Unary { op, operand } => {
            let inner = eval(operand, ctx, source)?;
            match op {
                UnaryOp::Neg => {
                    let n = inner.value.as_number().ok_or(EvalError::NonNumeric)?;
                    Ok(Evaluated {
                        value: Scalar::Num(-n),
                        note: format!("-{}", inner.note),
                    })
                }
            }
        }
        Expr::Binary { op, lhs, rhs } => eval_binary(*op, lhs, rhs, ctx, source),
        Expr::Call { name, args } => eval_call(name, args, ctx, source),
    }
}

fn eval_reference(
    path: &vellum_props::path::PropertyPath,
    text: &str,
    fallback: Option<&Expr>,
    ctx: EvalContext<'_>,
    source: &mut dyn RandomSource,
) -> Result<Evaluated, EvalError> {
    // A field referencing itself would loop forever; cut it to the default.
    if ctx.reference == Some(text) {
        trace!(reference = text, "self-reference, using default");
        return Ok(annotated_default(text, ctx));
    }

    match resolve(ctx.bag, path) {
        Some(value) => {
            let scalar = scalar_from_value(value, ctx, source);
            let note = format!("{} ({})", text, scalar.render());
            Ok(Evaluated { value: scalar, note })
        }
        None => match fallback {
            Some(expr) => {
                let fb = eval(expr, ctx, source)?;
                Ok(Evaluated {
                    note: format!("{} ({})", text, fb.value.render()),
                    value: fb.value,
                })
            }
            None => {
                trace!(reference = text, "unresolved reference, using default");
                Ok(annotated_default(text, ctx))
            }
        },
    }
}

/// Convert a bag value to a scalar, recursively computing values that are
/// themselves formulas, bounded by [`MAX_PROPERTY_DEPTH`].
fn scalar_from_value(
    value: &Value,
    ctx: EvalContext<'_>,
    source: &mut dyn RandomSource,
) -> Scalar {
    match value {
        Value::Number(n) => Scalar::Num(n.as_f64().unwrap_or(0.0)),
        Value::Bool(b) => Scalar::from_bool(*b),
        Value::String(s) => {
            if s.contains(OPEN_MARKER) {
                if ctx.depth >= MAX_PROPERTY_DEPTH {
                    trace!(depth = ctx.depth, "property nesting limit hit, using default");
                    Scalar::Str(ctx.default_value.to_string())
                } else {
                    let nested = EvalContext {
                        depth: ctx.depth + 1,
                        ..ctx
                    };
                    Scalar::Str(phrase::compute_nested(s, nested, source))
                }
            } else {
                Scalar::Str(s.clone())
            }
        }
        // Arrays, objects, and null have no scalar rendering.
        _ => Scalar::Str(ctx.default_value.to_string()),
    }
}

fn eval_binary(
    op: BinaryOp,
    lhs: &Expr,
    rhs: &Expr,
    ctx: EvalContext<'_>,
    source: &mut dyn RandomSource,
) -> Result<Evaluated, EvalError> {
    let left = eval(lhs, ctx, source)?;
    let right = eval(rhs, ctx, source)?;
    let note = format!("{} {} {}", left.note, op.symbol(), right.note);

    let value = match op {
        BinaryOp::Add | BinaryOp::Sub | BinaryOp::Mul | BinaryOp::Div => {
            let a = left.value.as_number().ok_or(EvalError::NonNumeric)?;
            let b = right.value.as_number().ok_or(EvalError::NonNumeric)?;
            let n = match op {
                BinaryOp::Add => a + b,
                BinaryOp::Sub => a - b,
                BinaryOp::Mul => a * b,
                BinaryOp::Div => {
                    if b == 0.0 {
                        return Err(EvalError::DivisionByZero);
                    }
                    a / b
                }
                _ => unreachable!(),
            };
            Scalar::Num(n)
        }
        BinaryOp::Eq | BinaryOp::Ne => {
            let equal = match (left.value.as_number(), right.value.as_number()) {
                (Some(a), Some(b)) => a == b,
                _ => left.value.render() == right.value.render(),
            };
            Scalar::from_bool(if op == BinaryOp::Eq { equal } else { !equal })
        }
        BinaryOp::Lt | BinaryOp::Le | BinaryOp::Gt | BinaryOp::Ge => {
            let a = left.value.as_number().ok_or(EvalError::NonNumeric)?;
            let b = right.value.as_number().ok_or(EvalError::NonNumeric)?;
            let ordered = match op {
                BinaryOp::Lt => a < b,
                BinaryOp::Le => a <= b,
                BinaryOp::Gt => a > b,
                BinaryOp::Ge => a >= b,
                _ => unreachable!(),
            };
            Scalar::from_bool(ordered)
        }
    };

    Ok(Evaluated { value, note })
}

fn eval_call(
    name: &str,
    args: &[Expr],
    ctx: EvalContext<'_>,
    source: &mut dyn RandomSource,
) -> Result<Evaluated, EvalError> {
    match name {
        // Lazy: only the taken branch is evaluated, so untaken dice don't roll.
        "if" => {
            if args.len() != 3 {
                return Err(EvalError::BadArity("if".into()));
            }
            let cond = eval(&args[0], ctx, source)?;
            let branch = if cond.value.truthy() { &args[1] } else { &args[2] };
            let taken = eval(branch, ctx, source)?;
            Ok(Evaluated {
                note: format!("if({}, {})", cond.note, taken.note),
                value: taken.value,
            })
        }
        // Table lookup against the bag; a miss degrades to the default.
        "lookup" => {
            if args.len() != 2 {
                return Err(EvalError::BadArity("lookup".into()));
            }
            let table_path = match &args[0] {
                Expr::Reference { source: text, .. } => text.clone(),
                Expr::Str(s) => s.clone(),
                _ => return Err(EvalError::BadArity("lookup".into())),
            };
            let key = eval(&args[1], ctx, source)?;
            let key_num = key.value.as_number().ok_or(EvalError::NonNumeric)?;

            let hit = vellum_props::path::PropertyPath::parse(&table_path)
                .ok()
                .and_then(|p| resolve(ctx.bag, &p))
                .and_then(table::rows_from_value)
                .and_then(|rows| table::lookup(&rows, key_num).cloned());

            let value = match hit {
                Some(v) => scalar_from_value(&v, ctx, source),
                None => Scalar::Str(ctx.default_value.to_string()),
            };
            Ok(Evaluated {
                note: format!("lookup({}, {}) ({})", table_path, key.note, value.render()),
                value,
            })
        }
        _ => {
            let mut values = Vec::with_capacity(args.len());
            let mut notes = Vec::with_capacity(args.len());
            for arg in args {
                let ev = eval(arg, ctx, source)?;
                values.push(ev.value);
                notes.push(ev.note);
            }
            let value = functions::call(name, &values)?;
            Ok(Evaluated {
                note: format!("{}({})", name, notes.join(", ")),
                value,
            })
        }
    }
}

fn annotated_default(text: &str, ctx: EvalContext<'_>) -> Evaluated {
    Evaluated {
        value: Scalar::Str(ctx.default_value.to_string()),
        note: format!("{} ({})", text, ctx.default_value),
    }
}
