//! Shelter Stay Estimator
//!
//! Command line form that estimates how long a shelter animal will wait for
//! adoption, and collects feedback on those estimates.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use config::Config;
use feedback_store::FeedbackLog;
use intake_structs::FeedbackLabel;
use ml_model::ShelterStayModel;
use shelter_stay::commands::{self, FormArgs};
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Shelter Stay Estimator
#[derive(Parser)]
#[command(name = "shelter-stay")]
#[command(about = "Estimate days in a shelter before adoption")]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Model artifact to load (overrides `SHELTER_MODEL_PATH`)
    #[arg(short, long, global = true)]
    model: Option<PathBuf>,

    /// Feedback CSV file (overrides `SHELTER_FEEDBACK_PATH`)
    #[arg(short, long, global = true)]
    feedback_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Estimate days in the shelter for one animal
    Predict {
        #[command(flatten)]
        form: FormArgs,
    },

    /// Estimate, then record whether the estimate was right
    Feedback {
        #[command(flatten)]
        form: FormArgs,

        /// Was the estimate right?
        #[arg(short, long, value_enum)]
        label: FeedbackLabel,

        /// Days the animal really stayed, if known
        #[arg(short, long, value_parser = commands::form::parse_days)]
        real_days: Option<f64>,

        /// Directory to write SVG charts into
        #[arg(short, long)]
        plots_dir: Option<PathBuf>,
    },

    /// Summarize the feedback log
    Stats {
        /// Directory to write SVG charts into
        #[arg(short, long)]
        plots_dir: Option<PathBuf>,
    },

    /// Show the input schema of the loaded model
    Schema,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing subscriber
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = Config::from_env()?
        .with_model_path(cli.model)
        .with_feedback_path(cli.feedback_file);
    debug!(?config, "Loaded configuration");

    let log = FeedbackLog::new(&config.feedback_path);

    match cli.command {
        Commands::Predict { form } => {
            let model = load_model(&config)?;
            commands::predict::run(&model, &form.into())?;
        }
        Commands::Feedback {
            form,
            label,
            real_days,
            plots_dir,
        } => {
            let model = load_model(&config)?;
            commands::feedback::run(
                &model,
                &log,
                &form.into(),
                label,
                real_days,
                plots_dir.as_deref(),
            )?;
        }
        Commands::Stats { plots_dir } => commands::stats::run(&log, plots_dir.as_deref())?,
        Commands::Schema => commands::schema::run(&load_model(&config)?),
    }

    Ok(())
}

/// Loads the configured model artifact; a failure here is fatal.
fn load_model(config: &Config) -> Result<ShelterStayModel> {
    ShelterStayModel::load(&config.model_path).with_context(|| {
        format!(
            "Could not load the model from {}; check that the artifact exists",
            config.model_path.display()
        )
    })
}
