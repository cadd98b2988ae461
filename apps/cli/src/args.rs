//! # CLI Argument Definitions

use clap::{Args, Parser, Subcommand};
use fitclass::domain::input::RawInput;
use fitclass::domain::scheme::SchemeKind;
use std::path::PathBuf;

/// The main CLI structure parsing command-line arguments.
#[derive(Debug, Parser)]
#[command(name = "fitclass")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(arg_required_else_help = true)]
#[command(about = "Predict a fitness membership category from personal and lifestyle data")]
pub(crate) struct Cli {
    /// Configuration file (defaults to `fitclass.{toml,json,yaml}` when present)
    #[arg(long, global = true, env = "FITCLASS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log diagnostics to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub(crate) enum Commands {
    /// Validate the form, derive features and run the model
    Predict {
        #[command(flatten)]
        form: FormArgs,
        /// Model artifact; overrides `model.path` from the config
        #[arg(long)]
        model: Option<PathBuf>,
        /// Print the response as JSON
        #[arg(long)]
        json: bool,
    },
    /// Validate the form and print the derived features without a model
    Features {
        #[command(flatten)]
        form: FormArgs,
        /// Print the feature row as JSON
        #[arg(long)]
        json: bool,
    },
    /// List the feature schemes with their columns, occupations and city tiers
    Schemes {},
}

/// The prediction form. Defaults match the form UI.
#[derive(Debug, Args)]
pub(crate) struct FormArgs {
    #[arg(long, default_value_t = 30, allow_negative_numbers = true)]
    pub age: i64,
    /// Weight in kg
    #[arg(long, default_value_t = 70.0, allow_negative_numbers = true)]
    pub weight: f64,
    /// Height in metres
    #[arg(long, default_value_t = 1.75, allow_negative_numbers = true)]
    pub height: f64,
    /// Annual income in LPA
    #[arg(long, alias = "income-lpa", default_value_t = 15.0, allow_negative_numbers = true)]
    pub income: f64,
    #[arg(long)]
    pub city: String,
    #[arg(long)]
    pub occupation: String,
    /// Required by the risk scheme
    #[arg(long)]
    pub active_lifestyle: Option<bool>,
    /// Overrides `scheme.kind` from the config
    #[arg(long)]
    pub scheme: Option<SchemeKind>,
}

impl FormArgs {
    pub(crate) fn to_raw(&self) -> RawInput {
        RawInput {
            age: self.age,
            weight: self.weight,
            height: self.height,
            income_lpa: self.income,
            active_lifestyle: self.active_lifestyle,
            city: self.city.clone(),
            occupation: self.occupation.clone(),
        }
    }
}
