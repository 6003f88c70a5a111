mod cli;
mod config;
mod core;
mod telemetry;
mod utils;

use anyhow::{Result, bail};
use clap::Parser;
use cli::{Cli, Commands, CommonArgs, EvaluateArgs, ResolveArgs, ScoreArgs};
use config::LoadedConfig;
use crate::core::report;
use crate::core::resolver::{self, RawValue};
use crate::core::score::{self, MAX_WEIGHT};
use serde::Serialize;

fn main() {
    let exit_code = match run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            2
        }
    };

    std::process::exit(exit_code);
}

fn run() -> Result<i32> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Factors(args) => {
            let loaded = setup(&args)?;
            if output_json(&args, &loaded) {
                println!("{}", serde_json::to_string_pretty(loaded.table())?);
            } else {
                report::print_factor_table(loaded.table());
            }
            Ok(0)
        }
        Commands::Resolve(args) => run_resolve(args),
        Commands::Score(args) => run_score(args),
        Commands::Evaluate(args) => run_evaluate(args),
        Commands::Init(args) => {
            let path = std::env::current_dir()?.join(config::CONFIG_FILE_NAME);
            config::write_default_config(&path, args.with_table)?;
            println!("created {}", path.display());
            Ok(0)
        }
        Commands::Table { command } => match command {
            cli::TableSubcommand::Check(args) => {
                let loaded = setup(&args)?;
                let issues = core::lint::check_table(loaded.table());
                if output_json(&args, &loaded) {
                    println!("{}", serde_json::to_string_pretty(&issues)?);
                } else {
                    report::print_issues(&issues);
                }
                if report::has_errors(&issues) { Ok(1) } else { Ok(0) }
            }
        },
    }
}

fn setup(args: &CommonArgs) -> Result<LoadedConfig> {
    let cwd = std::env::current_dir()?;
    let loaded = config::load_config(args.config.as_deref(), &cwd)?;
    let level = if args.verbose {
        "debug"
    } else {
        loaded.config.general.log_level.as_str()
    };
    telemetry::init(level)?;

    if let Some(source) = &loaded.source {
        tracing::debug!(path = %source.display(), factors = loaded.table().len(), "loaded config");
    }
    Ok(loaded)
}

fn output_json(args: &CommonArgs, loaded: &LoadedConfig) -> bool {
    args.json || loaded.config.general.json
}

#[derive(Debug, Serialize)]
struct Resolution<'a> {
    index: usize,
    factor: &'a str,
    value: String,
    weight: u8,
    resolved: bool,
}

fn run_resolve(args: ResolveArgs) -> Result<i32> {
    let loaded = setup(&args.common)?;
    let table = loaded.table();
    let index = core::factor_index(table, &args.factor)?;
    let Some(value) = RawValue::from_input(&args.value) else {
        bail!("no value given for factor '{}'", args.factor);
    };

    let resolved = resolver::resolve_weight(table, index, &value)?;
    let default_weight = loaded.config.general.default_weight;
    let resolution = Resolution {
        index,
        factor: &table.factors()[index].name,
        value: value.to_string(),
        weight: resolved.unwrap_or(default_weight),
        resolved: resolved.is_some(),
    };

    if output_json(&args.common, &loaded) {
        println!("{}", serde_json::to_string_pretty(&resolution)?);
    } else if resolution.resolved {
        println!("{} = {} -> weight {}", resolution.factor, resolution.value, resolution.weight);
    } else {
        println!(
            "{} = {} -> unresolved, default weight {}",
            resolution.factor, resolution.value, resolution.weight
        );
    }
    Ok(0)
}

fn run_score(args: ScoreArgs) -> Result<i32> {
    let loaded = setup(&args.common)?;
    let expected = loaded.table().len();
    if args.weights.len() != expected {
        bail!(
            "expected {} weights (one per factor), got {}",
            expected,
            args.weights.len()
        );
    }
    if let Some(weight) = args.weights.iter().find(|weight| **weight > MAX_WEIGHT) {
        bail!("weight {} exceeds maximum {}", weight, MAX_WEIGHT);
    }

    let result = score::aggregate(&args.weights);
    if output_json(&args.common, &loaded) {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        report::print_composite(&result);
    }
    Ok(0)
}

fn run_evaluate(args: EvaluateArgs) -> Result<i32> {
    let loaded = setup(&args.common)?;

    let mut inputs = match &args.inputs_file {
        Some(path) => utils::assign::read_assignments(path)?,
        None => Vec::new(),
    };
    for raw in &args.inputs {
        inputs.push(utils::assign::parse_assignment(raw)?);
    }
    let overrides = args
        .overrides
        .iter()
        .map(|raw| utils::assign::parse_assignment(raw))
        .collect::<Result<Vec<_>>>()?;

    let options = core::EvaluationOptions {
        default_weight: loaded.config.general.default_weight,
        fail_at: args.fail_at.or(loaded.config.general.fail_at),
    };
    let evaluation = core::evaluate(loaded.table(), &inputs, &overrides, options)?;

    if output_json(&args.common, &loaded) {
        println!("{}", serde_json::to_string_pretty(&evaluation)?);
    } else {
        report::print_human(&evaluation);
    }

    if evaluation.exit.ok { Ok(0) } else { Ok(1) }
}
