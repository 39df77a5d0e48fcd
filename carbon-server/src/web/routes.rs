//! HTTP route handlers.

use askama::Template;
use axum::body::Bytes;
use axum::{
    Json, Router,
    extract::{Query, State},
    http::{HeaderMap, StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use tower_http::services::ServeDir;

use super::dto::*;
use super::state::AppState;
use super::templates::*;

/// Create the application router.
///
/// `static_dir` is the path to the static assets directory.
pub fn create_router(state: AppState, static_dir: &str) -> Router {
    Router::new()
        .route("/", get(index_page))
        .route("/health", get(health))
        .route("/about", get(about_page))
        .route("/api/cities", get(list_cities))
        .route("/api/distance", get(lookup_distance))
        .route("/calculate", post(calculate))
        .nest_service("/static", ServeDir::new(static_dir))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Index page with the calculator form.
async fn index_page(State(state): State<AppState>) -> impl IntoResponse {
    let template = IndexTemplate {
        modes: ModeOptionView::build_list(state.engine.factors(), &state.mode_display),
    };

    Html(
        template
            .render()
            .unwrap_or_else(|e| format!("Template error: {}", e)),
    )
}

/// About page.
async fn about_page() -> impl IntoResponse {
    Html(
        AboutTemplate
            .render()
            .unwrap_or_else(|e| format!("Template error: {}", e)),
    )
}

/// City names for the autocomplete datalist.
async fn list_cities(State(state): State<AppState>) -> Json<CitiesResponse> {
    Json(CitiesResponse {
        cities: state.catalog.all_cities(),
    })
}

/// Look up the catalog distance between two cities.
///
/// Answers `{"distance_km": null}` for unknown pairs; the client decides
/// whether to fall back to manual entry.
async fn lookup_distance(
    State(state): State<AppState>,
    Query(req): Query<DistanceRequest>,
) -> Json<DistanceResponse> {
    let distance_km = state.catalog.find_distance(&req.origin, &req.destination);

    if distance_km.is_none() {
        tracing::debug!(origin = %req.origin, destination = %req.destination, "no route match");
    }

    Json(DistanceResponse { distance_km })
}

/// Check if request accepts HTML.
fn accepts_html(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|accept| accept.contains("text/html"))
}

/// Run the full calculation for one trip.
async fn calculate(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, AppError> {
    // Parse JSON manually so we can log the body on failure
    let req: CalculateRequest = serde_json::from_slice(&body).map_err(|e| {
        eprintln!("[JSON parse error] {e}");
        eprintln!("[Body] {}", String::from_utf8_lossy(&body));
        AppError::BadRequest {
            message: format!("Invalid JSON: {e}"),
        }
    })?;

    // Validate the request before touching the engine
    if req.origin.trim().is_empty() || req.destination.trim().is_empty() {
        return Err(AppError::BadRequest {
            message: "Origin and destination are required".to_string(),
        });
    }
    if !req.distance_km.is_finite() || req.distance_km <= 0.0 {
        return Err(AppError::BadRequest {
            message: format!("Distance must be a positive number, got {}", req.distance_km),
        });
    }
    if state.engine.factors().factor(&req.mode).is_none() {
        return Err(AppError::BadRequest {
            message: format!("Unknown transport mode: {}", req.mode),
        });
    }

    let engine = &state.engine;

    // Validation guarantees a factor entry and a finite distance, so the
    // emission is always computable from here on.
    let emission_kg = engine
        .calculate_emissions(req.distance_km, &req.mode)
        .ok_or_else(|| AppError::Internal {
            message: format!("emission not computable for mode {}", req.mode),
        })?;

    // Baseline and savings are best-effort: a factor table without "car"
    // still produces a result, just without the savings section.
    let car_emission = engine.calculate_emissions(req.distance_km, "car");
    let savings = car_emission.and_then(|car| engine.calculate_savings(emission_kg, car));

    let comparison = engine.calculate_all_modes(req.distance_km);

    let credits = engine
        .calculate_carbon_credits(emission_kg)
        .ok_or_else(|| AppError::Internal {
            message: "credit count not computable".to_string(),
        })?;
    let price = engine
        .estimate_credit_price(credits)
        .ok_or_else(|| AppError::Internal {
            message: "credit price not computable".to_string(),
        })?;

    tracing::debug!(
        mode = %req.mode,
        distance_km = req.distance_km,
        emission_kg,
        "calculated emissions"
    );

    // Return HTML or JSON based on Accept header
    if accepts_html(&headers) {
        let view = ResultsView::build(
            &req,
            emission_kg,
            savings.as_ref(),
            &comparison,
            credits,
            &price,
            &state.mode_display,
            engine.credit_config().kg_per_credit,
        );

        let template = ResultsTemplate { view };
        let html = template.render().map_err(|e| AppError::Internal {
            message: format!("Template error: {}", e),
        })?;

        Ok(Html(html).into_response())
    } else {
        let response = CalculateResponse {
            origin: req.origin,
            destination: req.destination,
            distance_km: req.distance_km,
            mode: req.mode,
            emission_kg,
            savings: savings.as_ref().map(SavingsResult::from_savings),
            comparison: comparison
                .iter()
                .map(ModeComparisonResult::from_comparison)
                .collect(),
            credits,
            price: CreditPriceResult::from_estimate(&price),
        };

        Ok(Json(response).into_response())
    }
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    Internal { message: String },
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match &self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message.clone()),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message.clone()),
        };

        // Log errors to stderr for debugging
        eprintln!("[{status}] {message}");

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
