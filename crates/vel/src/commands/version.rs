//! `vel version` -- show version information.

use anyhow::Result;

use crate::context::RuntimeContext;
use crate::output::print_json;

/// Execute the `vel version` command.
pub fn run(ctx: &RuntimeContext) -> Result<()> {
    let version = env!("CARGO_PKG_VERSION");
    if ctx.json {
        print_json(&serde_json::json!({ "version": version }));
        return Ok(());
    }
    println!("vel {}", version);
    Ok(())
}
