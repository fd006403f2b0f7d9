//! Clap CLI definitions for the `vel` command.

use clap::{Args, Parser, Subcommand};

/// vel -- sheet formula engine for virtual tabletops.
///
/// Computes designer-authored formulas against an entity's property bag,
/// rolls dice, resolves properties, and validates sheet templates.
#[derive(Parser, Debug)]
#[command(
    name = "vel",
    about = "Sheet formula engine for virtual tabletops",
    long_about = "Computes designer-authored formulas against an entity's property bag, rolls dice, resolves properties, and validates sheet templates.",
    version,
    propagate_version = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Global flags available to all subcommands.
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Property bag JSON file acting as the entity's data.
    #[arg(long, global = true)]
    pub props: Option<String>,

    /// Settings file path (default: discover vellum.yaml upward).
    #[arg(long, global = true, env = "VELLUM_CONFIG")]
    pub config: Option<String>,

    /// Output in JSON format.
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable verbose/debug output.
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output (errors only).
    #[arg(short = 'q', long, global = true)]
    pub quiet: bool,
}

/// All available subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compute a formula against the property bag.
    #[command(alias = "compute")]
    Eval(EvalArgs),

    /// Roll a dice expression like 4d6kh3.
    Roll(RollArgs),

    /// Resolve a property path from the bag.
    Get(GetArgs),

    /// Compute the configured initiative formula.
    Initiative(InitiativeArgs),

    /// Inspect and validate sheet templates.
    Template(TemplateArgs),

    /// List registered component types.
    Components,

    /// List formula built-in functions.
    Functions,

    /// Show version information.
    Version,
}

#[derive(Args, Debug)]
pub struct EvalArgs {
    /// The formula, e.g. "You rolled ${2d6 + str}$".
    pub formula: String,

    /// Include the explanation trace.
    #[arg(long)]
    pub explain: bool,

    /// Default value substituted for unresolvable parts.
    #[arg(long)]
    pub default: Option<String>,

    /// Key of the field being computed (self-reference guard).
    #[arg(long)]
    pub reference: Option<String>,

    /// Fixed die faces for reproducible output, e.g. "4,5".
    #[arg(long, value_delimiter = ',')]
    pub seed_rolls: Option<Vec<i64>>,
}

#[derive(Args, Debug)]
pub struct RollArgs {
    /// Dice notation, e.g. "2d6", "4d6kh3", "3d6r2".
    pub dice: String,

    /// Fixed die faces for reproducible output.
    #[arg(long, value_delimiter = ',')]
    pub seed_rolls: Option<Vec<i64>>,
}

#[derive(Args, Debug)]
pub struct GetArgs {
    /// Property path, e.g. "attributes.dex.mod" or "attacks[0].name".
    pub path: String,

    /// Value returned when the path is absent.
    #[arg(long)]
    pub default: Option<String>,
}

#[derive(Args, Debug)]
pub struct InitiativeArgs {
    /// Fixed die faces for reproducible output.
    #[arg(long, value_delimiter = ',')]
    pub seed_rolls: Option<Vec<i64>>,
}

#[derive(Args, Debug)]
pub struct TemplateArgs {
    #[command(subcommand)]
    pub command: TemplateCommands,
}

#[derive(Subcommand, Debug)]
pub enum TemplateCommands {
    /// Instantiate every component and report problems.
    Check(TemplateFileArgs),

    /// Render the template against the property bag as a UI tree.
    Show(TemplateFileArgs),

    /// Activate a roll component from the template by key.
    Roll(TemplateRollArgs),
}

#[derive(Args, Debug)]
pub struct TemplateFileArgs {
    /// Template file (.json or .toml).
    pub file: String,
}

#[derive(Args, Debug)]
pub struct TemplateRollArgs {
    /// Template file (.json or .toml).
    pub file: String,

    /// Key of the component to activate.
    pub key: String,

    /// Fixed die faces for reproducible output.
    #[arg(long, value_delimiter = ',')]
    pub seed_rolls: Option<Vec<i64>>,
}
