//! Web layer for the carbon emission calculator.
//!
//! Serves the calculator page and the JSON endpoints behind it: the city
//! autocomplete source, the distance autofill lookup, and the calculation
//! itself.

mod dto;
mod format;
mod routes;
mod state;
pub mod templates;

pub use dto::*;
pub use routes::create_router;
pub use state::AppState;
pub use templates::*;
