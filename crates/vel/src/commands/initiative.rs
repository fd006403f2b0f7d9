//! `vel initiative` -- compute the configured initiative formula.

use anyhow::{Result, bail};

use vellum_formula::phrase::{ComputeOptions, compute};

use crate::cli::InitiativeArgs;
use crate::context::{RuntimeContext, random_source};
use crate::output::{print_json, result_text, trace_text};

/// Execute the `vel initiative` command.
pub fn run(ctx: &RuntimeContext, args: &InitiativeArgs) -> Result<()> {
    let Some(formula) = &ctx.settings.initiative_formula else {
        bail!("no initiative formula configured (set initiative_formula in vellum.yaml)");
    };

    let options = ComputeOptions {
        default_value: ctx.settings.default_value.clone(),
        explain: ctx.settings.explain_rolls,
        reference: None,
    };
    let mut source = random_source(&args.seed_rolls);
    let computed = compute(formula, &ctx.props, source.as_mut(), &options);

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
