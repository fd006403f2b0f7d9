//! `vel components` -- list registered component types.

use anyhow::Result;

use vellum_components::registry::ComponentRegistry;

use crate::context::RuntimeContext;
use crate::output::print_json;

/// Execute the `vel components` command.
pub fn run(ctx: &RuntimeContext) -> Result<()> {
    let registry = ComponentRegistry::with_builtins();
    let tags = registry.tags();

    if ctx.json {
        print_json(&tags);
        return Ok(());
    }
    for tag in tags {
        println!("{}", tag);
    }
    Ok(())
}
