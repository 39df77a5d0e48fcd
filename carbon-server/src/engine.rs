//! Emission calculation engine.
//!
//! Pure arithmetic over a distance, a transport-mode identifier, and the
//! two static configuration tables. Every operation is deterministic and
//! side-effect free; invalid input is signalled with `None` (or an empty
//! vector), never a panic.

use crate::config::{CarbonCreditConfig, EmissionFactors};

/// Mode used as the baseline for savings and relative percentages.
const BASELINE_MODE: &str = "car";

/// One mode's emission for a given distance, relative to the car baseline.
///
/// `percentage_vs_car` is `None` when the ratio is undefined (zero car
/// baseline with a nonzero emission, or no car baseline at all).
#[derive(Debug, Clone, PartialEq)]
pub struct ModeComparison {
    pub mode: String,
    pub emission_kg: f64,
    pub percentage_vs_car: Option<f64>,
}

/// Emission saved against a baseline.
///
/// `saved_kg` may be negative when the chosen mode emits more than the
/// baseline; that is a valid, displayable result. `percentage` is `None`
/// when the baseline is exactly zero.
#[derive(Debug, Clone, PartialEq)]
pub struct Savings {
    pub saved_kg: f64,
    pub percentage: Option<f64>,
}

/// Price range for a number of carbon credits, in BRL.
#[derive(Debug, Clone, PartialEq)]
pub struct CreditPriceEstimate {
    pub min: f64,
    pub max: f64,
    pub average: f64,
}

/// Round to 2 decimals, half away from zero.
///
/// The uniform rounding rule for emissions, percentages, and currency.
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Round to 4 decimals, half away from zero. Used for credit counts.
fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

/// The calculation engine.
///
/// Holds the two static tables, passed in explicitly so tests can run
/// against synthetic fixtures. The engine has no mutable state; sharing
/// one instance across concurrent requests is safe by construction.
#[derive(Debug, Clone)]
pub struct EmissionEngine {
    factors: EmissionFactors,
    credit: CarbonCreditConfig,
}

impl EmissionEngine {
    pub fn new(factors: EmissionFactors, credit: CarbonCreditConfig) -> Self {
        Self { factors, credit }
    }

    /// The emission-factor table this engine computes against.
    pub fn factors(&self) -> &EmissionFactors {
        &self.factors
    }

    /// The carbon-credit constants this engine computes against.
    pub fn credit_config(&self) -> &CarbonCreditConfig {
        &self.credit
    }

    /// Emission in kg CO₂ for a distance and mode: `distance * factor`,
    /// rounded to 2 decimals.
    ///
    /// Returns `None` when the distance is not finite or the mode has no
    /// factor entry. A zero factor is a valid entry, so a distance of 0
    /// and a factor of 0 both legally yield `Some(0.0)`.
    pub fn calculate_emissions(&self, distance_km: f64, mode: &str) -> Option<f64> {
        if !distance_km.is_finite() {
            return None;
        }
        let factor = self.factors.factor(mode)?;

        Some(round2(distance_km * factor))
    }

    /// Emissions for every configured mode, each compared against the car
    /// baseline, sorted ascending by emission.
    ///
    /// Ties preserve the factor table's order. Returns an empty vector
    /// (nothing to show, as opposed to an error) when the distance is not
    /// finite.
    ///
    /// `percentage_vs_car` follows the baseline rules: a zero car baseline
    /// with a zero emission counts as equivalent (exactly 100); a zero
    /// baseline with a nonzero emission, or a missing baseline, is
    /// undefined (`None`).
    pub fn calculate_all_modes(&self, distance_km: f64) -> Vec<ModeComparison> {
        if !distance_km.is_finite() {
            return Vec::new();
        }

        let car_emission = self.calculate_emissions(distance_km, BASELINE_MODE);

        let mut results: Vec<ModeComparison> = self
            .factors
            .modes()
            .filter_map(|mode| {
                let emission_kg = self.calculate_emissions(distance_km, mode)?;

                let percentage_vs_car = match car_emission {
                    Some(car) if car != 0.0 => Some(round2(emission_kg / car * 100.0)),
                    Some(_) if emission_kg == 0.0 => Some(100.0),
                    _ => None,
                };

                Some(ModeComparison {
                    mode: mode.to_string(),
                    emission_kg,
                    percentage_vs_car,
                })
            })
            .collect();

        // Stable sort: equal emissions keep the factor table's order.
        results.sort_by(|a, b| a.emission_kg.total_cmp(&b.emission_kg));

        results
    }

    /// Emission saved against a baseline emission.
    ///
    /// Returns `None` when either argument is not finite. The percentage
    /// is computed from the unrounded difference, then rounded once.
    pub fn calculate_savings(&self, emission: f64, baseline: f64) -> Option<Savings> {
        if !emission.is_finite() || !baseline.is_finite() {
            return None;
        }

        let saved = baseline - emission;
        let percentage = if baseline != 0.0 {
            Some(round2(saved / baseline * 100.0))
        } else {
            None
        };

        Some(Savings {
            saved_kg: round2(saved),
            percentage,
        })
    }

    /// Carbon credits needed to offset an emission, rounded to 4 decimals.
    ///
    /// The divisor is guaranteed positive by `CarbonCreditConfig`
    /// validation, so the division is always defined.
    pub fn calculate_carbon_credits(&self, emission_kg: f64) -> Option<f64> {
        if !emission_kg.is_finite() {
            return None;
        }

        Some(round4(emission_kg / self.credit.kg_per_credit))
    }

    /// Price range for a number of credits.
    ///
    /// The average is taken from the unrounded min/max before its own
    /// rounding, so it doesn't compound the bounds' rounding error.
    pub fn estimate_credit_price(&self, credits: f64) -> Option<CreditPriceEstimate> {
        if !credits.is_finite() {
            return None;
        }

        let min = credits * self.credit.price_min;
        let max = credits * self.credit.price_max;
        let average = (min + max) / 2.0;

        Some(CreditPriceEstimate {
            min: round2(min),
            max: round2(max),
            average: round2(average),
        })
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn engine() -> EmissionEngine {
        EmissionEngine::new(EmissionFactors::default(), CarbonCreditConfig::default())
    }

    /// Distances that stay well inside f64 range after multiplication.
    fn distance() -> impl Strategy<Value = f64> {
        0.0f64..1_000_000.0
    }

    proptest! {
        /// The emission formula is exactly round2(distance * factor) for
        /// every configured mode.
        #[test]
        fn emissions_match_formula(d in distance()) {
            let engine = engine();

            for (mode, factor) in engine.factors().iter() {
                let expected = (d * factor * 100.0).round() / 100.0;
                prop_assert_eq!(engine.calculate_emissions(d, mode), Some(expected));
            }
        }

        /// Unknown modes are always None, whatever the distance.
        #[test]
        fn unknown_mode_is_none(d in distance(), mode in "[a-z]{1,10}") {
            let engine = engine();
            prop_assume!(engine.factors().factor(&mode).is_none());

            prop_assert_eq!(engine.calculate_emissions(d, &mode), None);
        }

        /// One comparison entry per configured mode, sorted ascending.
        #[test]
        fn all_modes_complete_and_sorted(d in distance()) {
            let engine = engine();
            let results = engine.calculate_all_modes(d);

            prop_assert_eq!(results.len(), engine.factors().len());

            for window in results.windows(2) {
                prop_assert!(window[0].emission_kg <= window[1].emission_kg);
            }

            for mode in engine.factors().modes() {
                prop_assert!(results.iter().any(|r| r.mode == mode));
            }
        }

        /// Savings against a zero baseline: no percentage, and the saved
        /// amount is the negated emission.
        #[test]
        fn savings_zero_baseline(e in -1_000_000.0f64..1_000_000.0) {
            let savings = engine().calculate_savings(e, 0.0).unwrap();

            prop_assert_eq!(savings.percentage, None);
            prop_assert_eq!(savings.saved_kg, (-e * 100.0).round() / 100.0);
        }

        /// Credits follow the configured divisor.
        #[test]
        fn credits_match_formula(kg in 0.0f64..10_000_000.0) {
            let expected = (kg / 1000.0 * 10_000.0).round() / 10_000.0;

            prop_assert_eq!(engine().calculate_carbon_credits(kg), Some(expected));
        }

        /// Price bounds scale linearly and the average sits between them.
        #[test]
        fn price_bounds_ordered(credits in 0.0f64..100_000.0) {
            let estimate = engine().estimate_credit_price(credits).unwrap();

            prop_assert!(estimate.min <= estimate.max);
            prop_assert!(estimate.min <= estimate.average);
            prop_assert!(estimate.average <= estimate.max);
        }
    }
}
