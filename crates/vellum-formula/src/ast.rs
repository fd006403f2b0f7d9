//! Expression trees for computable spans.
//!
//! Built once by the parser and walked by the evaluator; no string
//! re-parsing happens during evaluation. References and dice keep their
//! original source text for explanation assembly.

use vellum_dice::spec::DiceSpec;
use vellum_props::path::PropertyPath;

/// A parsed computable expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Numeric literal.
    Number(f64),

    /// Quoted string literal.
    Str(String),

    /// Property reference with optional `??` fallback.
    Reference {
        path: PropertyPath,
        source: String,
        fallback: Option<Box<Expr>>,
    },

    /// Dice literal like `4d6kh3`.
    Dice { spec: DiceSpec, source: String },

    /// Unary operator application.
    Unary { op: UnaryOp, operand: Box<Expr> },

    /// Binary operator application.
    Binary {
        op: BinaryOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },

    /// Built-in function call.
    Call { name: String, args: Vec<Expr> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Neg,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl BinaryOp {
    /// Operator spelling, used in explanation rendering.
    pub fn symbol(&self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Eq => "==",
            BinaryOp::Ne => "!=",
            BinaryOp::Lt => "<",
            BinaryOp::Le => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::Ge => ">=",
        }
    }
}
