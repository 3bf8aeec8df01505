//! Quote engine for the booking form.
//!
//! Prices desert tours by party-size tier and accommodation per person,
//! applying the free tented-camp promotion. The calculators are pure; the
//! services and routes wrap them for the HTTP API.

pub mod calculators;
pub mod catalog;
pub mod models;
pub mod requests;
pub mod responses;
pub mod routes;
pub mod services;

// Re-export commonly used items
pub use calculators::{
    compute_accommodation_cost, compute_quote, compute_tour_cost, is_free_accommodation_eligible,
    price_for_tour, LineItem, LineItemKind, QuoteResult,
};
pub use catalog::{Catalog, CatalogError};
pub use models::{AccommodationOption, PriceTier, TourCatalogEntry};
pub use routes::router;
pub use services::{quote_selection, PricingError};
