//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::engine::{CreditPriceEstimate, ModeComparison, Savings};

/// Response for the city autocomplete source.
#[derive(Debug, Serialize)]
pub struct CitiesResponse {
    /// Distinct city names, sorted for display
    pub cities: Vec<String>,
}

/// Request to look up the distance between two cities.
#[derive(Debug, Deserialize)]
pub struct DistanceRequest {
    pub origin: String,
    pub destination: String,
}

/// Response for a distance lookup.
#[derive(Debug, Serialize)]
pub struct DistanceResponse {
    /// Distance in km, or null when no route matches
    pub distance_km: Option<f64>,
}

/// Request to run a full calculation.
#[derive(Debug, Deserialize)]
pub struct CalculateRequest {
    /// Origin city (display string, not validated against the catalog)
    pub origin: String,

    /// Destination city
    pub destination: String,

    /// Trip distance in km; must be a positive finite number
    pub distance_km: f64,

    /// Transport mode identifier; must be a configured mode
    pub mode: String,
}

/// A mode's emission compared against the car baseline.
#[derive(Debug, Serialize)]
pub struct ModeComparisonResult {
    pub mode: String,

    /// Emission in kg CO₂, rounded to 2 decimals
    pub emission_kg: f64,

    /// Emission relative to the car baseline in percent; null when the
    /// ratio is undefined
    pub percentage_vs_car: Option<f64>,
}

/// Emission saved against the car baseline.
#[derive(Debug, Serialize)]
pub struct SavingsResult {
    /// kg CO₂ saved; negative when the mode emits more than the baseline
    pub saved_kg: f64,

    /// Saved fraction in percent; null when the baseline is zero
    pub percentage: Option<f64>,
}

/// Estimated price range for the credits, in BRL.
#[derive(Debug, Serialize)]
pub struct CreditPriceResult {
    pub min: f64,
    pub max: f64,
    pub average: f64,
}

/// Response for a full calculation.
#[derive(Debug, Serialize)]
pub struct CalculateResponse {
    pub origin: String,
    pub destination: String,
    pub distance_km: f64,
    pub mode: String,

    /// Emission for the selected mode, kg CO₂
    pub emission_kg: f64,

    /// Savings versus the car baseline; null when no baseline is available
    pub savings: Option<SavingsResult>,

    /// All configured modes, sorted ascending by emission
    pub comparison: Vec<ModeComparisonResult>,

    /// Carbon credits needed to offset the emission, rounded to 4 decimals
    pub credits: f64,

    /// Price estimate for those credits
    pub price: CreditPriceResult,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

// Conversion implementations

impl ModeComparisonResult {
    /// Create from a domain ModeComparison.
    pub fn from_comparison(comparison: &ModeComparison) -> Self {
        Self {
            mode: comparison.mode.clone(),
            emission_kg: comparison.emission_kg,
            percentage_vs_car: comparison.percentage_vs_car,
        }
    }
}

impl SavingsResult {
    /// Create from a domain Savings.
    pub fn from_savings(savings: &Savings) -> Self {
        Self {
            saved_kg: savings.saved_kg,
            percentage: savings.percentage,
        }
    }
}

impl CreditPriceResult {
    /// Create from a domain CreditPriceEstimate.
    pub fn from_estimate(estimate: &CreditPriceEstimate) -> Self {
        Self {
            min: estimate.min,
            max: estimate.max,
            average: estimate.average,
        }
    }
}
