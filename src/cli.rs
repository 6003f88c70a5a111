use crate::core::score::SusceptibilityClass;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "hazardscore",
    version,
    about = "Weighted-overlay landslide susceptibility scoring"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List factors and their subclass weights.
    Factors(CommonArgs),
    /// Resolve one factor input to its subclass weight.
    Resolve(ResolveArgs),
    /// Score a raw weight vector.
    Score(ScoreArgs),
    /// Resolve factor inputs and compute the composite score.
    Evaluate(EvaluateArgs),
    /// Write a starter hazardscore.toml.
    Init(InitArgs),
    Table {
        #[command(subcommand)]
        command: TableSubcommand,
    },
}

#[derive(Debug, Args, Clone)]
pub struct CommonArgs {
    #[arg(long)]
    pub config: Option<PathBuf>,
    #[arg(long)]
    pub json: bool,
    /// Log every resolution step to stderr.
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Args, Clone)]
pub struct ResolveArgs {
    #[command(flatten)]
    pub common: CommonArgs,
    /// Factor index, key or name.
    pub factor: String,
    /// Measured value or category.
    #[arg(allow_hyphen_values = true)]
    pub value: String,
}

#[derive(Debug, Args, Clone)]
pub struct ScoreArgs {
    #[command(flatten)]
    pub common: CommonArgs,
    /// Comma-separated weights, one per factor in table order.
    #[arg(value_delimiter = ',', required = true)]
    pub weights: Vec<u8>,
}

#[derive(Debug, Args, Clone)]
pub struct EvaluateArgs {
    #[command(flatten)]
    pub common: CommonArgs,
    /// Factor input as FACTOR=VALUE (repeatable).
    #[arg(long = "set", value_name = "FACTOR=VALUE")]
    pub inputs: Vec<String>,
    /// File of FACTOR=VALUE lines, applied before --set.
    #[arg(long)]
    pub inputs_file: Option<PathBuf>,
    /// Replace a factor's weight as FACTOR=WEIGHT (repeatable).
    #[arg(long = "override", value_name = "FACTOR=WEIGHT")]
    pub overrides: Vec<String>,
    /// Exit with status 1 when the class is at or above this one.
    #[arg(long)]
    pub fail_at: Option<SusceptibilityClass>,
}

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Include the built-in factor table for editing.
    #[arg(long)]
    pub with_table: bool,
}

#[derive(Debug, Subcommand)]
pub enum TableSubcommand {
    /// Report authoring problems in the active factor table.
    Check(CommonArgs),
}
