// ============================================================
// Layer 3 — PropertyRecord Domain Type
// ============================================================
// Represents a single property to be scored, before encoding.
// Numeric attributes are carried as numbers; categorical
// attributes are carried as raw strings so that a value the
// model has never seen still flows through encoding unchanged
// (it simply contributes no signal after schema alignment —
// it does NOT raise an error, see the encoder).
//
// A record is immutable once constructed: validation and
// encoding both take &self and never mutate it.

use serde::{Deserialize, Serialize};

use crate::domain::error::{PredictorError, Result};

/// Upper bound for the small count fields (bedrooms, bathrooms,
/// stories, parking). Matches the input form's widget limits.
pub const MAX_COUNT: u32 = 10;

/// One property described by its structural attributes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertyRecord {
    /// Total area in square feet. Must be positive.
    pub area: f64,

    /// Small non-negative counts, each bounded by [`MAX_COUNT`].
    pub bedrooms: u32,
    pub bathrooms: u32,
    pub stories: u32,
    pub parking: u32,

    /// Yes/no amenity flags, kept as raw strings (domain: "yes"/"no").
    pub mainroad: String,
    pub guestroom: String,
    pub basement: String,
    pub hotwaterheating: String,
    pub airconditioning: String,
    pub prefarea: String,

    /// Domain: "furnished", "semi-furnished", "unfurnished".
    pub furnishingstatus: String,
}

impl PropertyRecord {
    /// Numeric fields in dataset column order.
    /// This order only affects log output — schema alignment makes the
    /// expansion order irrelevant for prediction.
    pub fn numeric_fields(&self) -> [(&'static str, f64); 5] {
        [
            ("area", self.area),
            ("bedrooms", f64::from(self.bedrooms)),
            ("bathrooms", f64::from(self.bathrooms)),
            ("stories", f64::from(self.stories)),
            ("parking", f64::from(self.parking)),
        ]
    }

    /// Categorical fields in dataset column order.
    pub fn categorical_fields(&self) -> [(&'static str, &str); 7] {
        [
            ("mainroad", self.mainroad.as_str()),
            ("guestroom", self.guestroom.as_str()),
            ("basement", self.basement.as_str()),
            ("hotwaterheating", self.hotwaterheating.as_str()),
            ("airconditioning", self.airconditioning.as_str()),
            ("prefarea", self.prefarea.as_str()),
            ("furnishingstatus", self.furnishingstatus.as_str()),
        ]
    }

    /// Validate the numeric fields before encoding.
    ///
    /// Returns the FIRST violated field — the caller surfaces it verbatim,
    /// never substitutes a default. Categorical fields are deliberately not
    /// checked here: an unknown category is an accepted approximation handled
    /// by schema alignment, not an input error.
    pub fn validate(&self) -> Result<()> {
        if !self.area.is_finite() || self.area <= 0.0 {
            return Err(PredictorError::Validation {
                field: "area",
                reason: format!("must be a positive number of square feet, got {}", self.area),
            });
        }

        for (field, value) in [
            ("bedrooms", self.bedrooms),
            ("bathrooms", self.bathrooms),
            ("stories", self.stories),
            ("parking", self.parking),
        ] {
            if value > MAX_COUNT {
                return Err(PredictorError::Validation {
                    field,
                    reason: format!("must be between 0 and {MAX_COUNT}, got {value}"),
                });
            }
        }

        Ok(())
    }
}
