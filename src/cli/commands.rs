// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Defines the two subcommands: `train` and `predict`
// and all their configurable flags.
//
// clap's derive macros automatically generate:
//   - help text (--help)
//   - error messages for missing args
//   - type conversion (string → usize, f64, etc.)
//
// The From/to_record conversions at the bottom are the
// boundary between Layer 1 and Layer 2 — the application
// layer never sees clap types.

use clap::{Args, Subcommand, ValueEnum};

use crate::application::train_use_case::{ModelChoice, TrainConfig};
use crate::domain::record::PropertyRecord;

/// The two top-level subcommands available to the user.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Train regression models on a labeled housing CSV
    Train(TrainArgs),

    /// Estimate the price of one property using the trained model
    Predict(PredictArgs),
}

/// Which fitted candidate to persist.
#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum PersistArg {
    Linear,
    Forest,
}

/// All arguments for the `train` command.
#[derive(Args, Debug)]
pub struct TrainArgs {
    /// Path to the labeled dataset (CSV with a "price" column)
    #[arg(long, default_value = "data/housing.csv")]
    pub dataset: String,

    /// Directory to write the model and feature-schema artifacts
    #[arg(long, default_value = "model")]
    pub model_dir: String,

    /// Fraction of rows held out for evaluation
    #[arg(long, default_value_t = 0.2)]
    pub test_size: f64,

    /// Seed for the train/test shuffle and the forest bootstrap —
    /// identical input and seed reproduce the exact same artifacts
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Number of trees in the random-forest candidate
    #[arg(long, default_value_t = 300)]
    pub n_estimators: usize,

    /// Maximum depth of each tree
    #[arg(long, default_value_t = 10)]
    pub max_depth: usize,

    /// Minimum samples a tree node needs before it may split
    #[arg(long, default_value_t = 5)]
    pub min_samples_split: usize,

    /// Which candidate to persist (both are always evaluated)
    #[arg(long, value_enum, default_value_t = PersistArg::Linear)]
    pub persist: PersistArg,
}

impl From<TrainArgs> for TrainConfig {
    fn from(a: TrainArgs) -> Self {
        TrainConfig {
            dataset_path: a.dataset,
            model_dir: a.model_dir,
            test_size: a.test_size,
            seed: a.seed,
            n_estimators: a.n_estimators,
            max_depth: a.max_depth,
            min_samples_split: a.min_samples_split,
            persist: match a.persist {
                PersistArg::Linear => ModelChoice::Linear,
                PersistArg::Forest => ModelChoice::Forest,
            },
        }
    }
}

/// All arguments for the `predict` command. The numeric fields are
/// required; the categorical flags default to the same values the
/// original input form preselected.
#[derive(Args, Debug)]
pub struct PredictArgs {
    /// Directory holding the trained artifacts
    #[arg(long, default_value = "model")]
    pub model_dir: String,

    /// Total area in square feet
    #[arg(long)]
    pub area: f64,

    /// Number of bedrooms (0-10)
    #[arg(long)]
    pub bedrooms: u32,

    /// Number of bathrooms (0-10)
    #[arg(long)]
    pub bathrooms: u32,

    /// Number of floors (0-10)
    #[arg(long)]
    pub stories: u32,

    /// Number of parking spaces (0-10)
    #[arg(long)]
    pub parking: u32,

    /// Connected to a main road? (yes/no)
    #[arg(long, default_value = "yes")]
    pub mainroad: String,

    /// Has a guest room? (yes/no)
    #[arg(long, default_value = "no")]
    pub guestroom: String,

    /// Has a basement? (yes/no)
    #[arg(long, default_value = "no")]
    pub basement: String,

    /// Has hot-water heating? (yes/no)
    #[arg(long, default_value = "no")]
    pub hotwaterheating: String,

    /// Has air conditioning? (yes/no)
    #[arg(long, default_value = "yes")]
    pub airconditioning: String,

    /// Located in a preferred area? (yes/no)
    #[arg(long, default_value = "yes")]
    pub prefarea: String,

    /// furnished, semi-furnished or unfurnished
    #[arg(long, default_value = "furnished")]
    pub furnishingstatus: String,
}

impl PredictArgs {
    /// Build the domain record this request describes.
    pub fn to_record(&self) -> PropertyRecord {
        PropertyRecord {
            area: self.area,
            bedrooms: self.bedrooms,
            bathrooms: self.bathrooms,
            stories: self.stories,
            parking: self.parking,
            mainroad: self.mainroad.clone(),
            guestroom: self.guestroom.clone(),
            basement: self.basement.clone(),
            hotwaterheating: self.hotwaterheating.clone(),
            airconditioning: self.airconditioning.clone(),
            prefarea: self.prefarea.clone(),
            furnishingstatus: self.furnishingstatus.clone(),
        }
    }
}
