//! Pricing service functions over the loaded catalog.
//!
//! These resolve ids from requests against the catalog, apply form-layer
//! validation and hand off to the pure calculators.

use rust_decimal::Decimal;

use super::calculators::{
    compute_quote, is_free_accommodation_eligible, price_for_tour, QuoteResult,
    FREE_ACCOMMODATION_ID, NO_ACCOMMODATION_ID,
};
use super::catalog::Catalog;
use super::models::{AccommodationOption, PriceTier};

/// Upper bound offered by the booking form's party-size selector
pub const DEFAULT_MAX_PARTY_SIZE: u32 = 6;

/// Current price of a tour for the party size being quoted
#[derive(Debug, Clone)]
pub struct TourOffer {
    pub id: String,
    pub name: String,
    pub price_per_person: Decimal,
    pub price_tiers: Vec<PriceTier>,
    pub children_note: Option<String>,
}

/// Current price of an accommodation given the tours selected so far
#[derive(Debug, Clone)]
pub struct AccommodationOffer {
    pub id: String,
    pub name: String,
    pub description: String,
    pub list_price_per_person: Decimal,
    pub price_per_person: Decimal,
    pub included_with_tour: bool,
}

/// Form-layer validation errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PricingError {
    #[error("Number of people must be between 1 and {max} (got {got})")]
    InvalidPartySize { got: u32, max: u32 },

    #[error("Unknown tour: {0}")]
    UnknownTour(String),

    #[error("Unknown accommodation: {0}")]
    UnknownAccommodation(String),
}

/// Check the party size the form submitted
pub fn validate_party_size(num_people: u32, max: u32) -> Result<(), PricingError> {
    if num_people < 1 || num_people > max {
        return Err(PricingError::InvalidPartySize {
            got: num_people,
            max,
        });
    }
    Ok(())
}

/// Resolve an accommodation choice. Empty, `"none"` and unknown ids all mean
/// no accommodation.
pub fn resolve_accommodation<'a>(
    catalog: &'a Catalog,
    accommodation_id: Option<&str>,
) -> Option<&'a AccommodationOption> {
    let id = accommodation_id
        .map(str::trim)
        .filter(|id| !id.is_empty() && *id != NO_ACCOMMODATION_ID)?;

    let accommodation = catalog.accommodation(id);
    if accommodation.is_none() {
        tracing::warn!("Ignoring unknown accommodation id: {}", id);
    }
    accommodation
}

/// Quote a selection against the catalog.
///
/// Never fails: unknown ids are dropped (with a warning) and priced at zero.
pub fn quote_selection<S: AsRef<str>>(
    catalog: &Catalog,
    accommodation_id: Option<&str>,
    num_people: u32,
    selected_tour_ids: &[S],
) -> QuoteResult {
    for id in selected_tour_ids {
        if catalog.tour(id.as_ref()).is_none() {
            tracing::warn!("Ignoring unknown tour id: {}", id.as_ref());
        }
    }

    let accommodation = resolve_accommodation(catalog, accommodation_id);
    let quote = compute_quote(&catalog.tours, accommodation, num_people, selected_tour_ids);

    tracing::debug!(
        "Quoted {} line items for {} people: total {}",
        quote.line_items.len(),
        num_people,
        quote.total
    );

    quote
}

/// Strict variant used for submissions: every id must exist in the catalog.
pub fn check_selection<S: AsRef<str>>(
    catalog: &Catalog,
    accommodation_id: Option<&str>,
    selected_tour_ids: &[S],
) -> Result<(), PricingError> {
    for id in selected_tour_ids {
        if catalog.tour(id.as_ref()).is_none() {
            return Err(PricingError::UnknownTour(id.as_ref().to_string()));
        }
    }

    if let Some(id) = accommodation_id
        .map(str::trim)
        .filter(|id| !id.is_empty() && *id != NO_ACCOMMODATION_ID)
    {
        if catalog.accommodation(id).is_none() {
            return Err(PricingError::UnknownAccommodation(id.to_string()));
        }
    }

    Ok(())
}

/// Tour picker contents for the given party size
pub fn tour_offers(catalog: &Catalog, num_people: u32) -> Vec<TourOffer> {
    catalog
        .tours
        .iter()
        .map(|tour| TourOffer {
            id: tour.id.clone(),
            name: tour.name.clone(),
            price_per_person: price_for_tour(tour, num_people),
            price_tiers: tour.price_tiers.clone(),
            children_note: tour.children_note.clone(),
        })
        .collect()
}

/// Accommodation picker contents; the tented camp shows as free once a
/// qualifying tour is selected.
pub fn accommodation_offers<S: AsRef<str>>(
    catalog: &Catalog,
    selected_tour_ids: &[S],
) -> Vec<AccommodationOffer> {
    let known: Vec<&str> = selected_tour_ids
        .iter()
        .map(|id| id.as_ref())
        .filter(|id| catalog.tour(id).is_some())
        .collect();
    let eligible = is_free_accommodation_eligible(&known);

    catalog
        .accommodations
        .iter()
        .map(|option| {
            let included_with_tour = eligible && option.id == FREE_ACCOMMODATION_ID;
            AccommodationOffer {
                id: option.id.clone(),
                name: option.name.clone(),
                description: option.description.clone(),
                list_price_per_person: option.price_per_person,
                price_per_person: if included_with_tour {
                    Decimal::ZERO
                } else {
                    option.price_per_person
                },
                included_with_tour,
            }
        })
        .collect()
}
