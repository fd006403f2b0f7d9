//! `vel eval` -- compute a formula against the property bag.

use anyhow::Result;

use vellum_formula::phrase::{ComputeOptions, compute};

use crate::cli::EvalArgs;
use crate::context::{RuntimeContext, random_source};
use crate::output::{print_json, result_text, trace_text};

/// Execute the `vel eval` command.
pub fn run(ctx: &RuntimeContext, args: &EvalArgs) -> Result<()> {
    let options = ComputeOptions {
        default_value: args
            .default
            .clone()
            .unwrap_or_else(|| ctx.settings.default_value.clone()),
        explain: args.explain,
        reference: args.reference.clone(),
    };
    let mut source = random_source(&args.seed_rolls);
    let computed = compute(&args.formula, &ctx.props, source.as_mut(), &options);

    if ctx.json {
        print_json(&computed);
        return Ok(());
    }

    println!("{}", result_text(&computed.result));
    if let Some(explanation) = &computed.explanation {
        if !explanation.is_empty() && !ctx.quiet {
            println!("{}", trace_text(explanation));
        }
    }
    Ok(())
}
