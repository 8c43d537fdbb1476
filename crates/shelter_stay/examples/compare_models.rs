//! Example: Run one intake form through every bundled model revision.
//!
//! Usage:
//!   cargo run --example compare_models -- --breed "Labrador Retriever Mix" --age-months 3
//!
//! Each model reads the fields its schema needs; a form that a revision cannot
//! express (e.g. a rabbit for the grouped model) prints a warning for that
//! revision only.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use feature_extractor::IntakeForm;
use ml_model::ShelterStayModel;
use shelter_stay::commands::{self, FormArgs};
use tracing::info;
use tracing_subscriber::EnvFilter;

const BUNDLED_MODELS: [&str; 3] = [
    "modelo_regresion.json",
    "modelo_extendido.json",
    "best_model_XGBoost.json",
];

/// Compare the bundled model revisions on one animal.
#[derive(Parser, Debug)]
#[command(name = "compare_models")]
#[command(about = "Run one intake form through every bundled model", long_about = None)]
struct Args {
    /// Directory holding the model artifacts
    #[arg(long, value_name = "PATH", default_value = "models")]
    models_dir: PathBuf,

    #[command(flatten)]
    form: FormArgs,
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new("info"))
        .init();

    let args = Args::parse();
    let form: IntakeForm = args.form.into();

    for file in BUNDLED_MODELS {
        let path = args.models_dir.join(file);
        let model = ShelterStayModel::load(&path)
            .with_context(|| format!("Failed to load {}", path.display()))?;

        info!("=== {} ({}) ===", model.name(), model.schema());
        commands::predict::run(&model, &form)?;
    }

    Ok(())
}
