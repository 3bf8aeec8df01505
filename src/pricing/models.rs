//! Catalog models for the quote engine.
//!
//! These models deserialize straight from the catalog JSON file and are
//! immutable once the catalog is loaded.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A party-size bracket with its per-person price
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceTier {
    pub min_people: u32,
    pub max_people: u32,
    #[serde(with = "rust_decimal::serde::str")]
    pub price_per_person: Decimal,
}

impl PriceTier {
    pub fn new(min_people: u32, max_people: u32, price_per_person: Decimal) -> Self {
        Self {
            min_people,
            max_people,
            price_per_person,
        }
    }

    /// Check if the tier covers the given party size (both bounds inclusive)
    pub fn covers(&self, num_people: u32) -> bool {
        self.min_people <= num_people && num_people <= self.max_people
    }
}

/// A bookable desert experience
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TourCatalogEntry {
    pub id: String,
    pub name: String,
    pub price_tiers: Vec<PriceTier>,
    /// Informational discount note shown next to the tour, never priced
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children_note: Option<String>,
}

/// A place to sleep, always priced per person
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccommodationOption {
    pub id: String,
    pub name: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub price_per_person: Decimal,
    pub description: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_tier_covers_inclusive_bounds() {
        let tier = PriceTier::new(2, 3, dec!(45));
        assert!(!tier.covers(1));
        assert!(tier.covers(2));
        assert!(tier.covers(3));
        assert!(!tier.covers(4));
    }

    #[test]
    fn test_tour_deserializes_without_children_note() {
        let json = r#"{
            "id": "camel-rides",
            "name": "Camel Rides",
            "price_tiers": [{"min_people": 1, "max_people": 100, "price_per_person": "20"}]
        }"#;
        let tour: TourCatalogEntry = serde_json::from_str(json).unwrap();
        assert_eq!(tour.children_note, None);
        assert_eq!(tour.price_tiers[0].price_per_person, dec!(20));
    }
}
