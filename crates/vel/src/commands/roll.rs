//! `vel roll` -- roll a standalone dice expression.

use anyhow::{Context as _, Result};

use vellum_dice::roll::roll;
use vellum_dice::spec::DiceSpec;

use crate::cli::RollArgs;
use crate::context::{RuntimeContext, random_source};
use crate::output::{print_json, result_text, trace_text};

/// Execute the `vel roll` command.
pub fn run(ctx: &RuntimeContext, args: &RollArgs) -> Result<()> {
    let spec = DiceSpec::parse(&args.dice)
        .with_context(|| format!("invalid dice expression '{}'", args.dice))?;
    let mut source = random_source(&args.seed_rolls);
    let outcome = roll(&spec, source.as_mut());

    if ctx.json {
        print_json(&outcome);
        return Ok(());
    }

    println!("{}", result_text(&outcome.total.to_string()));
    if !ctx.quiet {
        println!("{}", trace_text(&outcome.breakdown()));
    }
    Ok(())
}
