//! Pricing API route handlers

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    routing::{get, post},
    Json, Router,
};

use crate::error::Result;
use crate::AppState;

use super::requests::{QuoteRequest, TourOffersQuery};
use super::responses::{
    CatalogResponse, QuoteResponse, TourOfferResponse, TourOffersResponse, CURRENCY,
};
use super::services;

/// Pricing routes, mounted under `/api/pricing`
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/catalog", get(catalog))
        .route("/tours", get(tours))
        .route("/quote", post(quote))
}

/// Full tour and accommodation catalog
async fn catalog(State(state): State<AppState>) -> Json<CatalogResponse> {
    Json(CatalogResponse {
        currency: CURRENCY,
        tours: state.catalog.tours.clone(),
        accommodations: state.catalog.accommodations.clone(),
    })
}

/// Tour picker prices for a party size
async fn tours(
    State(state): State<AppState>,
    query: std::result::Result<Query<TourOffersQuery>, QueryRejection>,
) -> Result<Json<TourOffersResponse>> {
    let Query(query) = query?;
    services::validate_party_size(query.num_people, state.config.max_party_size)?;

    let tours = services::tour_offers(&state.catalog, query.num_people)
        .into_iter()
        .map(TourOfferResponse::from)
        .collect();

    Ok(Json(TourOffersResponse {
        num_people: query.num_people,
        tours,
    }))
}

/// Recompute the quote for the current form state
async fn quote(
    State(state): State<AppState>,
    payload: std::result::Result<Json<QuoteRequest>, JsonRejection>,
) -> Result<Json<QuoteResponse>> {
    let Json(req) = payload?;
    services::validate_party_size(req.num_people, state.config.max_party_size)?;

    let result = services::quote_selection(
        &state.catalog,
        req.accommodation.as_deref(),
        req.num_people,
        req.tours.as_slice(),
    );
    let accommodations = services::accommodation_offers(&state.catalog, req.tours.as_slice());

    Ok(Json(QuoteResponse::new(req.num_people, &result, accommodations)))
}
