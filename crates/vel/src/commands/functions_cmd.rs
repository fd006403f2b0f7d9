//! `vel functions` -- list formula built-in functions.

use anyhow::Result;

use vellum_formula::functions::BUILTINS;

use crate::context::RuntimeContext;
use crate::output::print_json;

/// Execute the `vel functions` command.
pub fn run(ctx: &RuntimeContext) -> Result<()> {
    if ctx.json {
        print_json(&BUILTINS);
        return Ok(());
    }
    for name in BUILTINS {
        println!("{}", name);
    }
    Ok(())
}
