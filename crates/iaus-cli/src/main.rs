//! Command line tools for the utility engine.
//!
//! Prints response curve shapes, lists presets, and scores ad-hoc actions
//! so curve parameters can be tuned without a running game.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use iaus_core::{
    default_config_toml, presets, ActionProfile, Category, CurveType, EngineConfig,
    FnConsideration, ResponseCurve,
};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Width of the bar drawn for a score of 1.0
const BAR_WIDTH: usize = 40;

#[derive(Parser, Debug)]
#[command(name = "iaus")]
#[command(about = "Inspect response curves and utility scores")]
struct Cli {
    /// Engine configuration file (TOML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List built-in curve presets
    Presets,

    /// Sample a curve across [0, 1]
    Curve {
        /// Preset or configured curve name; omit to build one from the flags
        #[arg(conflicts_with_all = ["curve_type", "slope", "exponent", "x_shift", "y_shift"])]
        name: Option<String>,

        #[command(flatten)]
        params: CurveParams,

        /// Number of evenly spaced samples
        #[arg(long, default_value_t = 11)]
        samples: usize,
    },

    /// Score an action from raw consideration values
    Score {
        /// Priority category (idle, survival, combat, emergency)
        #[arg(long, default_value = "idle")]
        category: Category,

        /// Curve applied to every value (preset or configured name)
        #[arg(long, default_value = "linear")]
        curve: String,

        /// Momentum bonus to add
        #[arg(long, default_value_t = 0.0)]
        bonus: f64,

        /// Pruning threshold
        #[arg(long, default_value_t = 0.0)]
        threshold: f64,

        /// Raw consideration values, in evaluation order
        #[arg(required = true, allow_negative_numbers = true)]
        values: Vec<f64>,
    },

    /// Print the default configuration, or the loaded one with --config
    Config,
}

#[derive(clap::Args, Debug)]
struct CurveParams {
    /// Curve family for an ad-hoc curve
    #[arg(long = "type")]
    curve_type: Option<CurveType>,
    #[arg(long, default_value_t = 1.0, allow_negative_numbers = true)]
    slope: f64,
    #[arg(long, default_value_t = 1.0, allow_negative_numbers = true)]
    exponent: f64,
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    x_shift: f64,
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    y_shift: f64,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = match &cli.config {
        Some(path) => EngineConfig::from_file(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => EngineConfig::default(),
    };

    match cli.command {
        Command::Presets => print_presets(&config),
        Command::Curve {
            name,
            params,
            samples,
        } => {
            let curve = match (name, params.curve_type) {
                (Some(name), _) => config.curve(&name)?,
                (None, Some(curve_type)) => ResponseCurve::new(
                    curve_type,
                    params.slope,
                    params.exponent,
                    params.x_shift,
                    params.y_shift,
                ),
                (None, None) => bail!("give a curve name or --type"),
            };
            print_curve(&curve, samples);
        }
        Command::Score {
            category,
            curve,
            bonus,
            threshold,
            values,
        } => {
            let curve = config.curve(&curve)?;
            print_score(category, curve, bonus, threshold, &values);
        }
        Command::Config => {
            if cli.config.is_some() {
                print!("{}", config.to_toml()?);
            } else {
                print!("{}", default_config_toml());
            }
        }
    }

    Ok(())
}

fn print_presets(config: &EngineConfig) {
    println!("Built-in presets");
    println!("================");
    for (name, curve) in presets::ALL {
        println!("  {:<20} {}", name, curve);
    }

    if !config.curves.is_empty() {
        println!();
        println!("Configured curves");
        println!("=================");
        for (name, curve) in &config.curves {
            println!("  {:<20} {}", name, curve);
        }
    }
}

fn print_curve(curve: &ResponseCurve, samples: usize) {
    info!(%curve, samples, "sampling curve");
    println!("{}", curve);
    println!();
    for (x, y) in curve.sample(samples) {
        let bar = "#".repeat((y * BAR_WIDTH as f64).round() as usize);
        println!("  {:>6.3}  {:>6.4}  {}", x, y, bar);
    }
}

fn print_score(
    category: Category,
    curve: ResponseCurve,
    bonus: f64,
    threshold: f64,
    values: &[f64],
) {
    let base = ActionProfile::new("ad-hoc").with_category(category);
    let profile = values.iter().enumerate().fold(base, |profile, (i, &value)| {
        profile.with_consideration(FnConsideration::new(
            format!("value {}", i + 1),
            curve,
            move || value,
        ))
    });

    println!("Category: {} (weight {})", category, category.weight());
    println!("Curve:    {}", curve);
    println!();
    for consideration in profile.considerations() {
        println!(
            "  {:<10} raw {:>8.4}  normalized {:>6.4}",
            consideration.name(),
            consideration.raw_value(),
            consideration.calculate()
        );
    }
    println!();
    println!("Score: {:.6}", profile.score(bonus, threshold));
}
