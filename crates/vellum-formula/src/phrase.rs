//! The computable phrase: the public `compute` contract.
//!
//! A phrase is parsed once into literal and expression segments and can be
//! computed repeatedly against different bags. Computation always yields a
//! defined result string: malformed spans pass through as typed, evaluation
//! errors substitute the configured default, and the explanation records
//! what happened either way.

use serde::Serialize;
use serde_json::Value;
use tracing::trace;

use vellum_dice::source::RandomSource;

use crate::ast::Expr;
use crate::eval::{EvalContext, eval};
use crate::parser::{ParseError, parse_expression};
use crate::scan::{CLOSE_MARKER, OPEN_MARKER, RawSegment, scan};

/// Options for one computation.
#[derive(Debug, Clone)]
pub struct ComputeOptions {
    /// Substituted wherever a value cannot be produced. Defaults to `"0"`.
    pub default_value: String,

    /// Whether to assemble an explanation trace.
    pub explain: bool,

    /// Key of the field being computed, for self-reference detection.
    pub reference: Option<String>,
}

impl Default for ComputeOptions {
    fn default() -> Self {
        Self {
            default_value: "0".to_string(),
            explain: false,
            reference: None,
        }
    }
}

/// The outcome of computing a phrase.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Computed {
    /// Literal text concatenated with evaluated expression results.
    pub result: String,

    /// Present only when requested; empty for literal-only phrases.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

/// One parsed segment of a phrase.
#[derive(Debug, Clone, PartialEq)]
pub enum Segment {
    /// Text outside markers.
    Literal(String),

    /// An expression span. `expr` is `None` when the span failed to parse,
    /// in which case its raw text (markers included) passes through.
    Expression {
        source: String,
        expr: Option<Expr>,
        error: Option<ParseError>,
    },
}

/// A formula parsed into segments, reusable across computations.
#[derive(Debug, Clone, PartialEq)]
pub struct Phrase {
    pub segments: Vec<Segment>,
}

impl Phrase {
    /// Parse a raw formula. Never fails: malformed spans are kept as
    /// degraded expression segments.
    pub fn parse(raw: &str) -> Self {
        let segments = scan(raw)
            .into_iter()
            .map(|seg| match seg {
                RawSegment::Literal(text) => Segment::Literal(text),
                RawSegment::Expression(source) => match parse_expression(&source) {
                    Ok(expr) => Segment::Expression {
                        source,
                        expr: Some(expr),
                        error: None,
                    },
                    Err(err) => {
                        trace!(span = %source, %err, "span failed to parse, degrading");
                        Segment::Expression {
                            source,
                            expr: None,
                            error: Some(err),
                        }
                    }
                },
            })
            .collect();
        Self { segments }
    }

    /// Compute this phrase against a bag.
    pub fn compute(
        &self,
        bag: &Value,
        source: &mut dyn RandomSource,
        options: &ComputeOptions,
    ) -> Computed {
        let ctx = EvalContext {
            bag,
            default_value: &options.default_value,
            reference: options.reference.as_deref(),
            depth: 0,
        };
        let (result, explanation) = compute_segments(&self.segments, ctx, source);
        Computed {
            result,
            explanation: if options.explain {
                Some(explanation)
            } else {
                None
            },
        }
    }
}

/// Parse and compute in one step.
pub fn compute(
    raw: &str,
    bag: &Value,
    source: &mut dyn RandomSource,
    options: &ComputeOptions,
) -> Computed {
    Phrase::parse(raw).compute(bag, source, options)
}

/// Compute a formula found as a property value, at an already-incremented
/// depth. Used by the evaluator for nested resolution.
pub(crate) fn compute_nested(
    raw: &str,
    ctx: EvalContext<'_>,
    source: &mut dyn RandomSource,
) -> String {
    let phrase = Phrase::parse(raw);
    compute_segments(&phrase.segments, ctx, source).0
}

/// Walk segments left to right, producing the substituted result and the
/// annotated explanation. The explanation is empty for literal-only
/// phrases.
fn compute_segments(
    segments: &[Segment],
    ctx: EvalContext<'_>,
    source: &mut dyn RandomSource,
) -> (String, String) {
    let mut result = String::new();
    let mut explanation = String::new();
    let mut any_expression = false;

    for segment in segments {
        match segment {
            Segment::Literal(text) => {
                result.push_str(text);
                explanation.push_str(text);
            }
            Segment::Expression { source: span, expr, error } => {
                any_expression = true;
                match expr {
                    Some(tree) => match eval(tree, ctx, source) {
                        Ok(ev) => {
                            result.push_str(&ev.value.render());
                            explanation.push_str(&ev.note);
                        }
                        Err(err) => {
                            result.push_str(ctx.default_value);
                            explanation.push_str(&format!(
                                "{} (error: {}, default {})",
                                span, err, ctx.default_value
                            ));
                        }
                    },
                    None => {
                        // Malformed span: the raw text passes through.
                        result.push_str(OPEN_MARKER);
                        result.push_str(span);
                        result.push_str(CLOSE_MARKER);
                        let reason = error
                            .as_ref()
                            .map(|e| e.to_string())
                            .unwrap_or_else(|| "parse error".to_string());
                        explanation.push_str(&format!("{} (not computable: {})", span, reason));
                    }
                }
            }
        }
    }

    if !any_expression {
        explanation.clear();
    }

    (result, explanation)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use vellum_dice::source::FixedRolls;

    use super::*;

    fn run(raw: &str, bag: Value, rolls: Vec<i64>, options: ComputeOptions) -> Computed {
        compute(raw, &bag, &mut FixedRolls::new(rolls), &options)
    }

    fn explain() -> ComputeOptions {
        ComputeOptions {
            explain: true,
            ..Default::default()
        }
    }

    #[test]
    fn literal_only_passes_through_with_empty_explanation() {
        let out = run("Sword of Dawn", json!({}), vec![], explain());
        assert_eq!(out.result, "Sword of Dawn");
        assert_eq!(out.explanation.as_deref(), Some(""));
    }

    #[test]
    fn dice_and_arithmetic() {
        let out = run("You rolled ${2d6+3}$", json!({}), vec![4, 5], explain());
        assert_eq!(out.result, "You rolled 12");
        let explanation = out.explanation.unwrap();
        assert!(explanation.contains('4'), "explanation: {}", explanation);
        assert!(explanation.contains('5'), "explanation: {}", explanation);
        assert_eq!(explanation, "You rolled 2d6 (4, 5) + 3");
    }

    #[test]
    fn reference_present() {
        let out = run("${str}$", json!({ "str": 7 }), vec![], ComputeOptions::default());
        assert_eq!(out.result, "7");
    }

    #[test]
    fn reference_missing_uses_default() {
        let out = run("${missing}$", json!({}), vec![], ComputeOptions::default());
        assert_eq!(out.result, "0");
    }

    #[test]
    fn reference_missing_custom_default() {
        let options = ComputeOptions {
            default_value: "-".to_string(),
            ..Default::default()
        };
        let out = run("${missing}$", json!({}), vec![], options);
        assert_eq!(out.result, "-");
    }

    #[test]
    fn explanation_omitted_when_not_requested() {
        let out = run("${1 + 1}$", json!({}), vec![], ComputeOptions::default());
        assert_eq!(out.result, "2");
        assert_eq!(out.explanation, None);
    }

    #[test]
    fn multiple_spans_concatenate_in_order() {
        let bag = json!({ "name": "Mira", "level": 3 });
        let out = run("${name}$ is level ${level}$!", bag, vec![], explain());
        assert_eq!(out.result, "Mira is level 3!");
        assert_eq!(
            out.explanation.as_deref(),
            Some("name (Mira) is level level (3)!")
        );
    }

    #[test]
    fn malformed_span_passes_through_with_note() {
        let out = run("hp: ${2 +}$", json!({}), vec![], explain());
        assert_eq!(out.result, "hp: ${2 +}$");
        let explanation = out.explanation.unwrap();
        assert!(explanation.contains("not computable"), "explanation: {}", explanation);
    }

    #[test]
    fn malformed_span_does_not_abort_others() {
        let out = run("${2 +}$ and ${1 + 1}$", json!({}), vec![], ComputeOptions::default());
        assert_eq!(out.result, "${2 +}$ and 2");
    }

    #[test]
    fn unterminated_marker_is_literal() {
        let out = run("raw ${2d6", json!({}), vec![], explain());
        assert_eq!(out.result, "raw ${2d6");
        assert_eq!(out.explanation.as_deref(), Some(""));
    }

    #[test]
    fn division_by_zero_degrades_to_default() {
        let out = run("${10 / 0}$", json!({}), vec![], explain());
        assert_eq!(out.result, "0");
        let explanation = out.explanation.unwrap();
        assert!(explanation.contains("division by zero"), "explanation: {}", explanation);
    }

    #[test]
    fn non_numeric_arithmetic_degrades() {
        let bag = json!({ "name": "Mira" });
        let out = run("${name * 2}$", bag, vec![], ComputeOptions::default());
        assert_eq!(out.result, "0");
    }

    #[test]
    fn self_reference_terminates_to_default() {
        let bag = json!({ "hp": "${hp}$" });
        let options = ComputeOptions {
            reference: Some("hp".to_string()),
            ..Default::default()
        };
        let out = run("${hp}$", bag, vec![], options);
        assert_eq!(out.result, "0");
    }

    #[test]
    fn nested_property_formulas_resolve() {
        let bag = json!({
            "base": 10,
            "mod": "${floor((base - 10) / 2)}$",
            "attack": "${1d20 + mod}$"
        });
        let out = run("${attack}$", bag, vec![13], ComputeOptions::default());
        assert_eq!(out.result, "13");
    }

    #[test]
    fn deep_cycle_terminates_within_bound() {
        let bag = json!({
            "a": "${b}$",
            "b": "${a}$"
        });
        let out = run("${a}$", bag, vec![], ComputeOptions::default());
        assert_eq!(out.result, "0");
    }

    #[test]
    fn conditional_with_comparison() {
        let bag = json!({ "str": 14 });
        let out = run("${if(str >= 12, 'strong', 'weak')}$", bag, vec![], ComputeOptions::default());
        assert_eq!(out.result, "strong");
    }

    #[test]
    fn table_lookup_in_phrase() {
        let bag = json!({
            "score": 15,
            "grades": [[0, "F"], [10, "C"], [20, "B"]]
        });
        let out = run("Grade: ${lookup(grades, score)}$", bag, vec![], ComputeOptions::default());
        assert_eq!(out.result, "Grade: C");
    }

    #[test]
    fn phrase_reuse_across_bags() {
        let phrase = Phrase::parse("${str + 1}$");
        let options = ComputeOptions::default();
        let a = phrase.compute(&json!({ "str": 1 }), &mut FixedRolls::new(vec![]), &options);
        let b = phrase.compute(&json!({ "str": 5 }), &mut FixedRolls::new(vec![]), &options);
        assert_eq!(a.result, "2");
        assert_eq!(b.result, "6");
    }
}
