// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// This is the entry point for all user interaction.
// It uses the `clap` crate to parse command line arguments.
// All business logic is delegated to Layer 2 (application).
//
// Two commands are supported:
//   1. `train`   — fits and persists the pricing model
//   2. `predict` — loads the artifacts and prices one property

// Declare the commands submodule
pub mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, PredictArgs, TrainArgs};

/// The main CLI struct — clap reads the fields and generates
/// argument parsing code automatically via the Parser derive macro.
#[derive(Parser, Debug)]
#[command(
    name = "house-price-predictor",
    version,
    about = "Train a regression model on housing records, then estimate sale prices."
)]
pub struct Cli {
    /// The subcommand to run (train or predict)
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Match on the subcommand and dispatch to the correct use case.
    /// This keeps the CLI layer thin — it only routes, never computes.
    /// The handlers are associated functions: the args they receive are
    /// moved out of `command`, and nothing else of the Cli remains.
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Train(args) => Self::run_train(args),
            Commands::Predict(args) => Self::run_predict(args),
        }
    }

    /// Handles the `train` subcommand.
    fn run_train(args: TrainArgs) -> Result<()> {
        use crate::application::train_use_case::TrainUseCase;

        tracing::info!("Starting training on '{}'", args.dataset);

        let use_case = TrainUseCase::new(args.into());
        use_case.execute()?;

        println!("Training complete. Model and feature schema saved.");
        Ok(())
    }

    /// Handles the `predict` subcommand.
    fn run_predict(args: PredictArgs) -> Result<()> {
        use crate::application::predict_use_case::PredictUseCase;

        let record = args.to_record();
        let predictor = PredictUseCase::new(&args.model_dir)?;
        let estimate = predictor.predict(&record)?;

        println!("\nEstimated house price: {}", estimate.price);
        println!("Price per sqft:        {}", estimate.price_per_sqft);
        println!(
            "\nProperty: {} sqft, {} bed / {} bath, {}-story, {}",
            record.area, record.bedrooms, record.bathrooms, record.stories, record.furnishingstatus,
        );
        Ok(())
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_dispatches_predict_and_surfaces_the_error() {
        let dir = tempfile::tempdir().unwrap();
        let model_dir = dir.path().join("never-trained");
        let cli = Cli::parse_from([
            "house-price-predictor",
            "predict",
            "--model-dir",
            model_dir.to_str().unwrap(),
            "--area",
            "3000",
            "--bedrooms",
            "3",
            "--bathrooms",
            "2",
            "--stories",
            "2",
            "--parking",
            "1",
        ]);

        // Dispatch consumes the Cli; nothing has been trained, so the
        // predict path must come back with an error, not a price.
        let err = cli.run().unwrap_err();
        assert!(err.to_string().contains("no trained model"));
    }

    #[test]
    fn run_dispatches_train_and_surfaces_the_error() {
        let dir = tempfile::tempdir().unwrap();
        let cli = Cli::parse_from([
            "house-price-predictor",
            "train",
            "--dataset",
            dir.path().join("missing.csv").to_str().unwrap(),
            "--model-dir",
            dir.path().join("model").to_str().unwrap(),
        ]);
        assert!(cli.run().is_err());
    }
}
