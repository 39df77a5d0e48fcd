//! Askama templates for the web frontend.

use askama::Template;

use crate::config::{EmissionFactors, ModeDisplayTable};
use crate::engine::{CreditPriceEstimate, ModeComparison, Savings};

use super::dto::CalculateRequest;
use super::format::{format_currency, format_number};

// ============================================================================
// Page Templates (extend base.html)
// ============================================================================

/// Home page with the calculator form.
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub modes: Vec<ModeOptionView>,
}

/// About page.
#[derive(Template)]
#[template(path = "about.html")]
pub struct AboutTemplate;

// ============================================================================
// Fragment Templates (AJAX responses, no base.html)
// ============================================================================

/// Calculation results fragment.
#[derive(Template)]
#[template(path = "results.html")]
pub struct ResultsTemplate {
    pub view: ResultsView,
}

// ============================================================================
// View Models (for templates)
// ============================================================================

/// A transport-mode option in the calculator form.
#[derive(Debug, Clone)]
pub struct ModeOptionView {
    pub mode: String,
    pub label: String,
    pub icon: String,
    pub color: String,
    pub checked: bool,
}

impl ModeOptionView {
    /// One option per configured mode, in table order. The car option is
    /// pre-selected when present.
    pub fn build_list(factors: &EmissionFactors, display: &ModeDisplayTable) -> Vec<Self> {
        factors
            .modes()
            .map(|mode| {
                let (label, icon, color) = display_or_fallback(display, mode);
                Self {
                    mode: mode.to_string(),
                    label,
                    icon,
                    color,
                    checked: mode == "car",
                }
            })
            .collect()
    }
}

/// Full calculation results, pre-formatted for display.
#[derive(Debug, Clone)]
pub struct ResultsView {
    pub origin: String,
    pub destination: String,
    pub distance_display: String,
    pub emission_display: String,
    pub mode_label: String,
    pub mode_icon: String,
    pub mode_color: String,
    /// Savings card; hidden for the baseline mode itself or when no
    /// baseline was available.
    pub savings: Option<SavingsView>,
    pub comparison: Vec<ComparisonItemView>,
    pub credits: CreditsView,
}

impl ResultsView {
    pub fn build(
        request: &CalculateRequest,
        emission_kg: f64,
        savings: Option<&Savings>,
        comparison: &[ModeComparison],
        credits: f64,
        price: &CreditPriceEstimate,
        display: &ModeDisplayTable,
        kg_per_credit: f64,
    ) -> Self {
        let (mode_label, mode_icon, mode_color) = display_or_fallback(display, &request.mode);

        // Driving "saves" nothing against itself; the card only makes
        // sense for the alternatives.
        let savings_view = if request.mode == "car" {
            None
        } else {
            savings.map(SavingsView::from_savings)
        };

        Self {
            origin: request.origin.clone(),
            destination: request.destination.clone(),
            distance_display: format_number(request.distance_km, 0),
            emission_display: format_number(emission_kg, 2),
            mode_label,
            mode_icon,
            mode_color,
            savings: savings_view,
            comparison: ComparisonItemView::build_list(comparison, &request.mode, display),
            credits: CreditsView::build(credits, price, kg_per_credit),
        }
    }
}

/// Savings card contents.
#[derive(Debug, Clone)]
pub struct SavingsView {
    pub saved_display: String,
    pub percentage_display: String,
}

impl SavingsView {
    /// Create from a domain Savings. An undefined percentage renders as
    /// "-" without hiding the saved amount.
    pub fn from_savings(savings: &Savings) -> Self {
        Self {
            saved_display: format_number(savings.saved_kg, 2),
            percentage_display: savings
                .percentage
                .map(|p| format!("{}%", format_number(p, 2)))
                .unwrap_or_else(|| "-".to_string()),
        }
    }
}

/// One row of the mode comparison list.
#[derive(Debug, Clone)]
pub struct ComparisonItemView {
    pub mode: String,
    pub label: String,
    pub icon: String,
    pub emission_display: String,
    pub percentage_display: String,
    /// Bar length as a percentage of the highest emission in the list.
    pub bar_width: u32,
    pub bar_color: String,
    pub selected: bool,
}

impl ComparisonItemView {
    /// Build the comparison rows, preserving the (already sorted) order
    /// of the input.
    pub fn build_list(
        comparison: &[ModeComparison],
        selected_mode: &str,
        display: &ModeDisplayTable,
    ) -> Vec<Self> {
        let max_emission = comparison
            .iter()
            .map(|c| c.emission_kg)
            .fold(0.0_f64, f64::max);
        // All-zero emissions still need a defined bar scale.
        let max_emission = if max_emission == 0.0 { 1.0 } else { max_emission };

        comparison
            .iter()
            .map(|c| {
                let (label, icon, _) = display_or_fallback(display, &c.mode);
                let bar_width = ((c.emission_kg / max_emission) * 100.0).round() as u32;

                // Color grades by the car-relative percentage when it is
                // defined, else by the bar's own share.
                let color_ref = c.percentage_vs_car.unwrap_or(bar_width as f64);

                Self {
                    mode: c.mode.clone(),
                    label,
                    icon,
                    emission_display: format_number(c.emission_kg, 2),
                    percentage_display: c
                        .percentage_vs_car
                        .map(|p| format!("{}%", format_number(p, 2)))
                        .unwrap_or_else(|| "-".to_string()),
                    bar_width,
                    bar_color: bar_color(color_ref).to_string(),
                    selected: c.mode == selected_mode,
                }
            })
            .collect()
    }
}

/// Carbon-credit card contents.
#[derive(Debug, Clone)]
pub struct CreditsView {
    pub credits_display: String,
    pub kg_per_credit_display: String,
    pub average_display: String,
    pub range_display: String,
}

impl CreditsView {
    pub fn build(credits: f64, price: &CreditPriceEstimate, kg_per_credit: f64) -> Self {
        Self {
            credits_display: format_number(credits, 4),
            kg_per_credit_display: format_number(kg_per_credit, 0),
            average_display: format_currency(price.average),
            range_display: format!(
                "{} — {}",
                format_currency(price.min),
                format_currency(price.max)
            ),
        }
    }
}

/// Display metadata for a mode, falling back to the bare identifier with
/// a neutral color for modes the table doesn't know.
fn display_or_fallback(display: &ModeDisplayTable, mode: &str) -> (String, String, String) {
    match display.get(mode) {
        Some(d) => (d.label.clone(), d.icon.clone(), d.color.clone()),
        None => (mode.to_string(), String::new(), "#666".to_string()),
    }
}

/// Emission-level color grading: green up to 25%, yellow up to 75%,
/// orange up to 100%, red above the car baseline.
fn bar_color(reference: f64) -> &'static str {
    if reference <= 25.0 {
        "#16a34a"
    } else if reference <= 75.0 {
        "#f59e0b"
    } else if reference <= 100.0 {
        "#f97316"
    } else {
        "#ef4444"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CarbonCreditConfig;
    use crate::engine::EmissionEngine;

    fn engine() -> EmissionEngine {
        EmissionEngine::new(EmissionFactors::default(), CarbonCreditConfig::default())
    }

    fn display() -> ModeDisplayTable {
        ModeDisplayTable::brazilian()
    }

    #[test]
    fn mode_options_follow_table_order() {
        let options = ModeOptionView::build_list(engine().factors(), &display());

        let modes: Vec<&str> = options.iter().map(|o| o.mode.as_str()).collect();
        assert_eq!(modes, vec!["bicycle", "car", "bus", "truck"]);

        assert!(options.iter().find(|o| o.mode == "car").unwrap().checked);
        assert_eq!(options.iter().filter(|o| o.checked).count(), 1);
    }

    #[test]
    fn comparison_widths_scale_to_max() {
        let comparison = engine().calculate_all_modes(100.0);
        let items = ComparisonItemView::build_list(&comparison, "bus", &display());

        // Truck is the largest emitter, so it fills the bar.
        let truck = items.iter().find(|i| i.mode == "truck").unwrap();
        assert_eq!(truck.bar_width, 100);

        // Car: 12 / 96 ≈ 13%.
        let car = items.iter().find(|i| i.mode == "car").unwrap();
        assert_eq!(car.bar_width, 13);

        let bicycle = items.iter().find(|i| i.mode == "bicycle").unwrap();
        assert_eq!(bicycle.bar_width, 0);
    }

    #[test]
    fn comparison_colors_grade_by_percentage() {
        let comparison = engine().calculate_all_modes(100.0);
        let items = ComparisonItemView::build_list(&comparison, "car", &display());

        let color = |m: &str| items.iter().find(|i| i.mode == m).unwrap().bar_color.clone();

        assert_eq!(color("bicycle"), "#16a34a"); // 0%
        assert_eq!(color("bus"), "#f59e0b"); // 74.17%
        assert_eq!(color("car"), "#f97316"); // 100%
        assert_eq!(color("truck"), "#ef4444"); // 800%
    }

    #[test]
    fn comparison_marks_selected_mode() {
        let comparison = engine().calculate_all_modes(100.0);
        let items = ComparisonItemView::build_list(&comparison, "bus", &display());

        let selected: Vec<&str> = items
            .iter()
            .filter(|i| i.selected)
            .map(|i| i.mode.as_str())
            .collect();
        assert_eq!(selected, vec!["bus"]);
    }

    #[test]
    fn comparison_undefined_percentage_renders_dash() {
        let comparison = vec![ModeComparison {
            mode: "truck".to_string(),
            emission_kg: 96.0,
            percentage_vs_car: None,
        }];

        let items = ComparisonItemView::build_list(&comparison, "truck", &display());
        assert_eq!(items[0].percentage_display, "-");
    }

    #[test]
    fn comparison_all_zero_emissions() {
        let comparison = vec![
            ModeComparison {
                mode: "bicycle".to_string(),
                emission_kg: 0.0,
                percentage_vs_car: Some(100.0),
            },
            ModeComparison {
                mode: "car".to_string(),
                emission_kg: 0.0,
                percentage_vs_car: Some(100.0),
            },
        ];

        let items = ComparisonItemView::build_list(&comparison, "car", &display());
        assert!(items.iter().all(|i| i.bar_width == 0));
    }

    #[test]
    fn unknown_mode_falls_back_to_identifier() {
        let comparison = vec![ModeComparison {
            mode: "scooter".to_string(),
            emission_kg: 1.0,
            percentage_vs_car: None,
        }];

        let items = ComparisonItemView::build_list(&comparison, "scooter", &display());
        assert_eq!(items[0].label, "scooter");
        assert_eq!(items[0].icon, "");
    }

    #[test]
    fn savings_view_formats() {
        let view = SavingsView::from_savings(&Savings {
            saved_kg: 12.0,
            percentage: Some(100.0),
        });

        assert_eq!(view.saved_display, "12,00");
        assert_eq!(view.percentage_display, "100,00%");

        let view = SavingsView::from_savings(&Savings {
            saved_kg: -8.9,
            percentage: None,
        });

        assert_eq!(view.saved_display, "-8,90");
        assert_eq!(view.percentage_display, "-");
    }

    #[test]
    fn credits_view_formats() {
        let view = CreditsView::build(
            1.2,
            &CreditPriceEstimate {
                min: 60.0,
                max: 180.0,
                average: 120.0,
            },
            1000.0,
        );

        assert_eq!(view.credits_display, "1,2000");
        assert_eq!(view.kg_per_credit_display, "1.000");
        assert_eq!(view.average_display, "R$ 120,00");
        assert_eq!(view.range_display, "R$ 60,00 — R$ 180,00");
    }

    fn request(origin: &str, destination: &str, distance_km: f64, mode: &str) -> CalculateRequest {
        CalculateRequest {
            origin: origin.to_string(),
            destination: destination.to_string(),
            distance_km,
            mode: mode.to_string(),
        }
    }

    #[test]
    fn results_view_hides_savings_for_car() {
        let engine = engine();
        let comparison = engine.calculate_all_modes(100.0);
        let savings = Savings {
            saved_kg: 0.0,
            percentage: Some(0.0),
        };
        let price = CreditPriceEstimate {
            min: 0.6,
            max: 1.8,
            average: 1.2,
        };

        let view = ResultsView::build(
            &request("São Paulo, SP", "Rio de Janeiro, RJ", 430.0, "car"),
            51.6,
            Some(&savings),
            &comparison,
            0.0516,
            &price,
            &display(),
            1000.0,
        );

        assert!(view.savings.is_none());
        assert_eq!(view.mode_label, "Carro");
        assert_eq!(view.distance_display, "430");
        assert_eq!(view.emission_display, "51,60");
    }

    #[test]
    fn results_view_shows_savings_for_alternatives() {
        let engine = engine();
        let comparison = engine.calculate_all_modes(100.0);
        let savings = Savings {
            saved_kg: 3.1,
            percentage: Some(25.83),
        };
        let price = CreditPriceEstimate {
            min: 0.45,
            max: 1.34,
            average: 0.89,
        };

        let view = ResultsView::build(
            &request("Recife, PE", "Olinda, PE", 100.0, "bus"),
            8.9,
            Some(&savings),
            &comparison,
            0.0089,
            &price,
            &display(),
            1000.0,
        );

        let savings_view = view.savings.unwrap();
        assert_eq!(savings_view.saved_display, "3,10");
        assert_eq!(savings_view.percentage_display, "25,83%");
    }

    #[test]
    fn bar_color_thresholds() {
        assert_eq!(bar_color(0.0), "#16a34a");
        assert_eq!(bar_color(25.0), "#16a34a");
        assert_eq!(bar_color(25.01), "#f59e0b");
        assert_eq!(bar_color(75.0), "#f59e0b");
        assert_eq!(bar_color(100.0), "#f97316");
        assert_eq!(bar_color(100.01), "#ef4444");
        assert_eq!(bar_color(800.0), "#ef4444");
    }
}
