//! `vel template` -- check, show, and roll against sheet templates.

use std::path::Path;

use anyhow::{Context as _, Result, bail};

use vellum_components::component::UiNode;
use vellum_components::descriptor::Descriptor;
use vellum_components::registry::ComponentRegistry;
use vellum_components::template::load_template;

use crate::cli::{TemplateArgs, TemplateCommands, TemplateFileArgs, TemplateRollArgs};
use crate::context::{RuntimeContext, random_source};
use crate::output::{print_json, result_text, trace_text};

/// Execute the `vel template` command.
pub fn run(ctx: &RuntimeContext, args: &TemplateArgs) -> Result<()> {
    match &args.command {
        TemplateCommands::Check(file_args) => run_check(ctx, file_args),
        TemplateCommands::Show(file_args) => run_show(ctx, file_args),
        TemplateCommands::Roll(roll_args) => run_roll(ctx, roll_args),
    }
}

fn run_check(ctx: &RuntimeContext, args: &TemplateFileArgs) -> Result<()> {
    let template = load_template(Path::new(&args.file))
        .with_context(|| format!("failed to load template '{}'", args.file))?;
    let registry = ComponentRegistry::with_builtins();
    let count = template
        .check(&registry)
        .with_context(|| format!("template '{}' failed validation", template.name))?;

    if ctx.json {
        // Summarize every field through the descriptor envelope.
        let fields: Vec<serde_json::Value> = template
            .sections
            .iter()
            .flat_map(|section| {
                section.components.iter().map(|component| {
                    let envelope = Descriptor::from_value(component);
                    serde_json::json!({
                        "section": section.label,
                        "type": envelope.as_ref().map(|d| d.kind.clone()).unwrap_or_default(),
                        "key": envelope.map(|d| d.key).unwrap_or_default(),
                    })
                })
            })
            .collect();
        print_json(&serde_json::json!({
            "name": template.name,
            "components": count,
            "fields": fields,
            "ok": true
        }));
        return Ok(());
    }
    if !ctx.quiet {
        println!("ok: {} ({} components)", template.name, count);
    }
    Ok(())
}

fn run_show(ctx: &RuntimeContext, args: &TemplateFileArgs) -> Result<()> {
    let template = load_template(Path::new(&args.file))
        .with_context(|| format!("failed to load template '{}'", args.file))?;
    let registry = ComponentRegistry::with_builtins();
    let mut source = random_source(&None);
    let tree = template.render(&registry, &ctx.props, source.as_mut())?;

    if ctx.json {
        print_json(&tree);
        return Ok(());
    }
    print_tree(&tree, 0);
    Ok(())
}

fn run_roll(ctx: &RuntimeContext, args: &TemplateRollArgs) -> Result<()> {
    let template = load_template(Path::new(&args.file))
        .with_context(|| format!("failed to load template '{}'", args.file))?;
    let registry = ComponentRegistry::with_builtins();
    let mut source = random_source(&args.seed_rolls);

    for (_, components) in template.instantiate(&registry)? {
        for component in components {
            if component.key() != args.key {
                continue;
            }
            let Some(computed) = component.activate(&ctx.props, source.as_mut()) else {
                bail!(
                    "component '{}' ({}) is not rollable",
                    args.key,
                    component.type_tag()
                );
            };
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
            return Ok(());
        }
    }
    bail!("no component with key '{}' in template", args.key);
}

/// Print a render tree with two-space indentation.
fn print_tree(node: &UiNode, depth: usize) {
    let indent = "  ".repeat(depth);
    let mut line = format!("{}{}", indent, node.element);
    if let Some(key) = &node.key {
        line.push_str(&format!(" [{}]", key));
    }
    if let Some(text) = &node.text {
        line.push_str(&format!(" {:?}", text));
    }
    if let Some(value) = &node.value {
        line.push_str(&format!(" = {}", value));
    }
    println!("{}", line);
    for child in &node.children {
        print_tree(child, depth + 1);
    }
}
