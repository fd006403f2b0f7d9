//! Formula computation engine for the vellum system.
//!
//! A formula is designer-authored text with computable spans delimited by
//! `${` and `}$`. Spans are parsed once into expression trees (arithmetic,
//! comparisons, dice notation, property references, built-in function calls)
//! and evaluated against an entity's property bag, producing a final
//! substituted result plus an optional human-readable explanation trace.
//!
//! Failure policy, deliberately: formulas are designer content and must
//! render *something*. Malformed spans pass through as literal text,
//! unresolvable references and bad arithmetic substitute the configured
//! default, and recursion/reroll guards cut cycles short. Nothing in this
//! crate panics or hard-errors on bad formula input.

pub mod ast;
pub mod eval;
pub mod functions;
pub mod parser;
pub mod phrase;
pub mod scan;
