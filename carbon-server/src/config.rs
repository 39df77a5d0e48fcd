//! Static configuration tables for the calculator.
//!
//! Both tables are built once at startup and never mutated afterwards.
//! Structural problems (negative factors, a zero credit divisor) are
//! rejected here with a descriptive error instead of surfacing later as
//! infinities or NaN in per-request arithmetic.

/// Errors raised when a configuration table is structurally broken.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// An emission factor is negative or not finite
    #[error("emission factor for {mode:?} must be a finite non-negative number, got {value}")]
    InvalidFactor { mode: String, value: f64 },

    /// The same mode appears twice in the factor table
    #[error("duplicate emission factor entry for mode {0:?}")]
    DuplicateMode(String),

    /// A mode identifier is empty or whitespace-only
    #[error("blank transport mode identifier in emission factor table")]
    BlankMode,

    /// kg-per-credit would cause a division by zero (or worse)
    #[error("kg per credit must be a positive finite number, got {0}")]
    InvalidKgPerCredit(f64),

    /// A credit price bound is not finite
    #[error("credit price bound must be finite, got {0}")]
    InvalidCreditPrice(f64),
}

/// Ordered table of transport-mode emission factors (kg CO₂ per km).
///
/// The table is an explicitly ordered sequence rather than a map: iteration
/// order is part of the contract because it decides tie-breaks when
/// comparison results are sorted by emission value.
///
/// A factor of zero is a valid entry (bicycles emit nothing); lookup
/// distinguishes "mode absent" (`None`) from "factor is zero"
/// (`Some(0.0)`).
#[derive(Debug, Clone, PartialEq)]
pub struct EmissionFactors {
    entries: Vec<(String, f64)>,
}

impl EmissionFactors {
    /// Build a factor table, validating every entry.
    ///
    /// Rejects blank mode identifiers, duplicate modes, and factors that
    /// are negative or not finite.
    pub fn new(entries: Vec<(String, f64)>) -> Result<Self, ConfigError> {
        for (i, (mode, value)) in entries.iter().enumerate() {
            if mode.trim().is_empty() {
                return Err(ConfigError::BlankMode);
            }
            if !value.is_finite() || *value < 0.0 {
                return Err(ConfigError::InvalidFactor {
                    mode: mode.clone(),
                    value: *value,
                });
            }
            if entries[..i].iter().any(|(m, _)| m == mode) {
                return Err(ConfigError::DuplicateMode(mode.clone()));
            }
        }

        Ok(Self { entries })
    }

    /// Look up the factor for a mode.
    ///
    /// Returns `None` only when the mode has no entry; a configured zero
    /// factor comes back as `Some(0.0)`.
    pub fn factor(&self, mode: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(m, _)| m == mode)
            .map(|(_, f)| *f)
    }

    /// Iterate over `(mode, factor)` pairs in table order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|(m, f)| (m.as_str(), *f))
    }

    /// Iterate over the configured mode identifiers in table order.
    pub fn modes(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(m, _)| m.as_str())
    }

    /// Number of configured modes.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no modes are configured.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for EmissionFactors {
    /// The built-in factor set, in display order.
    fn default() -> Self {
        Self {
            entries: vec![
                ("bicycle".to_string(), 0.0),
                ("car".to_string(), 0.12),
                ("bus".to_string(), 0.089),
                ("truck".to_string(), 0.96),
            ],
        }
    }
}

/// Carbon-credit constants: how many kg of CO₂ one credit offsets, and the
/// market price range per credit in BRL.
#[derive(Debug, Clone, PartialEq)]
pub struct CarbonCreditConfig {
    /// kg of CO₂ offset by a single credit. Always positive.
    pub kg_per_credit: f64,

    /// Lower bound of the per-credit price (BRL).
    pub price_min: f64,

    /// Upper bound of the per-credit price (BRL).
    pub price_max: f64,
}

impl CarbonCreditConfig {
    /// Build credit constants, rejecting a non-positive divisor and
    /// non-finite price bounds.
    pub fn new(kg_per_credit: f64, price_min: f64, price_max: f64) -> Result<Self, ConfigError> {
        if !kg_per_credit.is_finite() || kg_per_credit <= 0.0 {
            return Err(ConfigError::InvalidKgPerCredit(kg_per_credit));
        }
        for price in [price_min, price_max] {
            if !price.is_finite() {
                return Err(ConfigError::InvalidCreditPrice(price));
            }
        }

        Ok(Self {
            kg_per_credit,
            price_min,
            price_max,
        })
    }
}

impl Default for CarbonCreditConfig {
    fn default() -> Self {
        Self {
            kg_per_credit: 1000.0,
            price_min: 50.0,
            price_max: 150.0,
        }
    }
}

/// Display metadata for a transport mode: label, icon, accent color.
///
/// Pure presentation data; the calculation core never reads it.
#[derive(Debug, Clone, PartialEq)]
pub struct ModeDisplay {
    pub label: String,
    pub icon: String,
    pub color: String,
}

impl ModeDisplay {
    fn new(label: &str, icon: &str, color: &str) -> Self {
        Self {
            label: label.to_string(),
            icon: icon.to_string(),
            color: color.to_string(),
        }
    }
}

/// Mode identifier → display metadata, keyed by the same opaque strings as
/// the factor table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModeDisplayTable {
    entries: Vec<(String, ModeDisplay)>,
}

impl ModeDisplayTable {
    /// Build a table from `(mode, display)` pairs.
    pub fn new(entries: Vec<(String, ModeDisplay)>) -> Self {
        Self { entries }
    }

    /// Look up display metadata for a mode.
    pub fn get(&self, mode: &str) -> Option<&ModeDisplay> {
        self.entries
            .iter()
            .find(|(m, _)| m == mode)
            .map(|(_, d)| d)
    }

    /// The built-in pt-BR display set.
    pub fn brazilian() -> Self {
        Self::new(vec![
            (
                "bicycle".to_string(),
                ModeDisplay::new("Bicicleta", "🚲", "#10b981"),
            ),
            (
                "car".to_string(),
                ModeDisplay::new("Carro", "🚗", "#2563eb"),
            ),
            (
                "bus".to_string(),
                ModeDisplay::new("Ônibus", "🚌", "#f59e0b"),
            ),
            (
                "truck".to_string(),
                ModeDisplay::new("Caminhão", "🚚", "#ef4444"),
            ),
        ])
    }
}
