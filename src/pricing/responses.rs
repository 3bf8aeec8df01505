//! Response DTOs for pricing API endpoints.

use rust_decimal::Decimal;
use serde::Serialize;

use super::calculators::{LineItem, LineItemKind, QuoteResult};
use super::models::{AccommodationOption, PriceTier, TourCatalogEntry};
use super::services::{AccommodationOffer, TourOffer};

/// The only currency the camp prices in (Jordanian dinar)
pub const CURRENCY: &str = "JOD";

/// Money value for JSON responses
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MoneyResponse {
    #[serde(with = "rust_decimal::serde::str")]
    pub amount: Decimal,
    pub currency: String,
}

impl MoneyResponse {
    pub fn jod(amount: Decimal) -> Self {
        Self {
            amount,
            currency: CURRENCY.to_string(),
        }
    }
}

/// One row of the booking summary
#[derive(Debug, Serialize)]
pub struct LineItemResponse {
    pub kind: LineItemKind,
    pub id: String,
    pub label: String,
    pub unit_price: MoneyResponse,
    pub quantity: u32,
    pub subtotal: MoneyResponse,
    pub complimentary: bool,
}

impl From<&LineItem> for LineItemResponse {
    fn from(item: &LineItem) -> Self {
        Self {
            kind: item.kind,
            id: item.id.clone(),
            label: item.label.clone(),
            unit_price: MoneyResponse::jod(item.unit_price),
            quantity: item.quantity,
            subtotal: MoneyResponse::jod(item.subtotal),
            complimentary: item.complimentary,
        }
    }
}

/// Response for a quote
#[derive(Debug, Serialize)]
pub struct QuoteResponse {
    pub num_people: u32,
    pub line_items: Vec<LineItemResponse>,
    pub total: MoneyResponse,
    pub accommodations: Vec<AccommodationOfferResponse>,
}

impl QuoteResponse {
    pub fn new(
        num_people: u32,
        quote: &QuoteResult,
        accommodations: Vec<AccommodationOffer>,
    ) -> Self {
        Self {
            num_people,
            line_items: quote.line_items.iter().map(LineItemResponse::from).collect(),
            total: MoneyResponse::jod(quote.total),
            accommodations: accommodations
                .into_iter()
                .map(AccommodationOfferResponse::from)
                .collect(),
        }
    }
}

/// Tour with its price for the requested party size
#[derive(Debug, Serialize)]
pub struct TourOfferResponse {
    pub id: String,
    pub name: String,
    pub price_per_person: MoneyResponse,
    pub price_tiers: Vec<PriceTier>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children_note: Option<String>,
}

impl From<TourOffer> for TourOfferResponse {
    fn from(offer: TourOffer) -> Self {
        Self {
            id: offer.id,
            name: offer.name,
            price_per_person: MoneyResponse::jod(offer.price_per_person),
            price_tiers: offer.price_tiers,
            children_note: offer.children_note,
        }
    }
}

/// Accommodation with its effective price
#[derive(Debug, Serialize)]
pub struct AccommodationOfferResponse {
    pub id: String,
    pub name: String,
    pub description: String,
    pub list_price_per_person: MoneyResponse,
    pub price_per_person: MoneyResponse,
    pub included_with_tour: bool,
}

impl From<AccommodationOffer> for AccommodationOfferResponse {
    fn from(offer: AccommodationOffer) -> Self {
        Self {
            id: offer.id,
            name: offer.name,
            description: offer.description,
            list_price_per_person: MoneyResponse::jod(offer.list_price_per_person),
            price_per_person: MoneyResponse::jod(offer.price_per_person),
            included_with_tour: offer.included_with_tour,
        }
    }
}

/// Full catalog for the booking form
#[derive(Debug, Serialize)]
pub struct CatalogResponse {
    pub currency: &'static str,
    pub tours: Vec<TourCatalogEntry>,
    pub accommodations: Vec<AccommodationOption>,
}

/// Response for the tour picker
#[derive(Debug, Serialize)]
pub struct TourOffersResponse {
    pub num_people: u32,
    pub tours: Vec<TourOfferResponse>,
}
