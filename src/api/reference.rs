//! Read-only reference data for team forms

use serde::Serialize;

use crate::api::types::Json;
use crate::domain::team::{Sport, COUNTRY_CODES};

#[derive(Debug, Serialize)]
pub struct SportsResponse {
    pub sports: Vec<Sport>,
}

#[derive(Debug, Serialize)]
pub struct CountriesResponse {
    pub countries: &'static [&'static str],
}

/// GET /api/sports
pub async fn list_sports() -> Json<SportsResponse> {
    Json(SportsResponse {
        sports: Sport::ALL.to_vec(),
    })
}

/// GET /api/countries
pub async fn list_countries() -> Json<CountriesResponse> {
    Json(CountriesResponse {
        countries: COUNTRY_CODES,
    })
}
