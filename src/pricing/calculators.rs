//! Core quote calculation functions.
//!
//! Pure functions for pricing math - no I/O, no shared state. The booking
//! form recomputes its quote on every change, so everything here must be
//! cheap and deterministic.

use std::collections::HashSet;

use rust_decimal::Decimal;
use serde::Serialize;

use super::models::{AccommodationOption, TourCatalogEntry};

/// Accommodation that becomes free with a qualifying tour
pub const FREE_ACCOMMODATION_ID: &str = "tented-camp";

/// Tours that do not unlock the free accommodation on their own
pub const NON_QUALIFYING_TOUR_IDS: [&str; 3] = ["sandboarding", "camel-rides", "hot-air-balloon"];

/// Sentinel accommodation id meaning "no accommodation needed"
pub const NO_ACCOMMODATION_ID: &str = "none";

/// Smallest party the engine will price; smaller values are clamped up
pub const MIN_PARTY_SIZE: u32 = 1;

/// Per-person price of a tour for the given party size.
///
/// Picks the tier with `min_people <= num_people <= max_people`. When no tier
/// matches, the first tier's price is returned instead of failing, so a quote
/// can always be produced. A tour without tiers prices at zero. `num_people`
/// below 1 is treated as 1.
///
/// # Examples
/// ```
/// use rust_decimal_macros::dec;
/// use wadirum_web::pricing::{price_for_tour, Catalog};
///
/// let catalog = Catalog::wadi_rum();
/// let jeep = catalog.tour("half-day-jeep").unwrap();
/// assert_eq!(price_for_tour(jeep, 3), dec!(45));
/// assert_eq!(price_for_tour(jeep, 7), dec!(50)); // no tier, first tier wins
/// ```
pub fn price_for_tour(tour: &TourCatalogEntry, num_people: u32) -> Decimal {
    let num_people = num_people.max(MIN_PARTY_SIZE);
    tour.price_tiers
        .iter()
        .find(|tier| tier.covers(num_people))
        .or_else(|| tour.price_tiers.first())
        .map(|tier| tier.price_per_person)
        .unwrap_or(Decimal::ZERO)
}

/// True when at least one selected tour qualifies for free accommodation.
///
/// Evaluated fresh on every change: dropping the last qualifying tour drops
/// the discount with it.
pub fn is_free_accommodation_eligible<S: AsRef<str>>(selected_tour_ids: &[S]) -> bool {
    selected_tour_ids
        .iter()
        .any(|id| !NON_QUALIFYING_TOUR_IDS.contains(&id.as_ref()))
}

/// Cost of the accommodation for the whole party
pub fn compute_accommodation_cost(
    accommodation: &AccommodationOption,
    num_people: u32,
    eligible: bool,
) -> Decimal {
    if is_complimentary(accommodation, eligible) {
        return Decimal::ZERO;
    }
    party_cost(accommodation.price_per_person, num_people)
}

/// Cost of a tour for the whole party
pub fn compute_tour_cost(tour: &TourCatalogEntry, num_people: u32) -> Decimal {
    party_cost(price_for_tour(tour, num_people), num_people)
}

/// Per-person price times the (clamped) party size, saturating at `Decimal::MAX`
fn party_cost(price_per_person: Decimal, num_people: u32) -> Decimal {
    let num_people = num_people.max(MIN_PARTY_SIZE);
    price_per_person.saturating_mul(Decimal::from(num_people))
}

fn is_complimentary(accommodation: &AccommodationOption, eligible: bool) -> bool {
    eligible && accommodation.id == FREE_ACCOMMODATION_ID
}

/// What a line item prices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LineItemKind {
    Accommodation,
    Tour,
}

/// One row of the price breakdown
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineItem {
    pub kind: LineItemKind,
    pub id: String,
    pub label: String,
    /// Price actually charged per person (zero when complimentary)
    #[serde(with = "rust_decimal::serde::str")]
    pub unit_price: Decimal,
    pub quantity: u32,
    #[serde(with = "rust_decimal::serde::str")]
    pub subtotal: Decimal,
    /// Included with a qualifying tour
    pub complimentary: bool,
}

/// Line-itemized quote
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuoteResult {
    pub line_items: Vec<LineItem>,
    #[serde(with = "rust_decimal::serde::str")]
    pub total: Decimal,
}

impl QuoteResult {
    pub fn accommodation(&self) -> Option<&LineItem> {
        self.line_items
            .iter()
            .find(|item| item.kind == LineItemKind::Accommodation)
    }

    pub fn tours(&self) -> impl Iterator<Item = &LineItem> {
        self.line_items
            .iter()
            .filter(|item| item.kind == LineItemKind::Tour)
    }
}

/// Compute the full quote for a selection.
///
/// Emits at most one accommodation line followed by one line per selected
/// tour in selection order. Ids not found in `tours` contribute nothing, and
/// repeated ids are only priced once. `num_people` below 1 is treated as 1.
pub fn compute_quote<S: AsRef<str>>(
    tours: &[TourCatalogEntry],
    accommodation: Option<&AccommodationOption>,
    num_people: u32,
    selected_tour_ids: &[S],
) -> QuoteResult {
    let num_people = num_people.max(MIN_PARTY_SIZE);

    let mut seen = HashSet::new();
    let selected: Vec<&TourCatalogEntry> = selected_tour_ids
        .iter()
        .map(|id| id.as_ref())
        .filter(|id| seen.insert(*id))
        .filter_map(|id| tours.iter().find(|tour| tour.id == id))
        .collect();

    let selected_ids: Vec<&str> = selected.iter().map(|tour| tour.id.as_str()).collect();
    let eligible = is_free_accommodation_eligible(&selected_ids);

    let mut line_items = Vec::with_capacity(selected.len() + 1);

    if let Some(accommodation) = accommodation.filter(|a| a.id != NO_ACCOMMODATION_ID) {
        let complimentary = is_complimentary(accommodation, eligible);
        line_items.push(LineItem {
            kind: LineItemKind::Accommodation,
            id: accommodation.id.clone(),
            label: accommodation.name.clone(),
            unit_price: if complimentary {
                Decimal::ZERO
            } else {
                accommodation.price_per_person
            },
            quantity: num_people,
            subtotal: compute_accommodation_cost(accommodation, num_people, eligible),
            complimentary,
        });
    }

    for tour in selected {
        line_items.push(LineItem {
            kind: LineItemKind::Tour,
            id: tour.id.clone(),
            label: tour.name.clone(),
            unit_price: price_for_tour(tour, num_people),
            quantity: num_people,
            subtotal: compute_tour_cost(tour, num_people),
            complimentary: false,
        });
    }

    let total = line_items
        .iter()
        .fold(Decimal::ZERO, |sum, item| sum.saturating_add(item.subtotal));

    QuoteResult { line_items, total }
}
