//! `vel get` -- resolve a property path from the bag.

use anyhow::Result;
use serde_json::Value;

use vellum_props::resolve::resolve_or;

use crate::cli::GetArgs;
use crate::context::RuntimeContext;
use crate::output::{print_json, result_text};

/// Execute the `vel get` command.
pub fn run(ctx: &RuntimeContext, args: &GetArgs) -> Result<()> {
    let default = Value::String(
        args.default
            .clone()
            .unwrap_or_else(|| ctx.settings.default_value.clone()),
    );
    let value = resolve_or(&ctx.props, &args.path, &default);

    if ctx.json {
        print_json(value);
        return Ok(());
    }

    // Strings print raw, structured values as JSON.
    match value {
        Value::String(s) => println!("{}", result_text(s)),
        other => println!("{}", result_text(&other.to_string())),
    }
    Ok(())
}
