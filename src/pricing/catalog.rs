//! Tour and accommodation catalog.
//!
//! The catalog is static configuration: either the built-in camp price list or
//! a JSON file read once at start-up. It is validated on load and never mutated
//! afterwards; handlers share it behind an `Arc`.

use std::collections::HashSet;
use std::path::Path;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::models::{AccommodationOption, PriceTier, TourCatalogEntry};

/// Catalog loading and validation errors
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Failed to read catalog file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid catalog JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Catalog validation failed: {}", .0.join("; "))]
    Invalid(Vec<String>),
}

/// Immutable tours + accommodations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    pub tours: Vec<TourCatalogEntry>,
    pub accommodations: Vec<AccommodationOption>,
}

impl Catalog {
    /// Build a validated catalog
    pub fn new(
        tours: Vec<TourCatalogEntry>,
        accommodations: Vec<AccommodationOption>,
    ) -> Result<Self, CatalogError> {
        let catalog = Self {
            tours,
            accommodations,
        };
        catalog.validate()?;
        Ok(catalog)
    }

    /// Parse and validate a catalog from JSON text
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let catalog: Catalog = serde_json::from_str(json)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Load a catalog file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let catalog = Self::from_json_str(&json)?;
        tracing::info!(
            "Loaded catalog from {} ({} tours, {} accommodations)",
            path.display(),
            catalog.tours.len(),
            catalog.accommodations.len()
        );
        Ok(catalog)
    }

    pub fn tour(&self, id: &str) -> Option<&TourCatalogEntry> {
        self.tours.iter().find(|t| t.id == id)
    }

    pub fn accommodation(&self, id: &str) -> Option<&AccommodationOption> {
        self.accommodations.iter().find(|a| a.id == id)
    }

    /// Check catalog invariants, collecting every problem found
    pub fn validate(&self) -> Result<(), CatalogError> {
        let mut errors = Vec::new();

        let mut tour_ids = HashSet::new();
        for tour in &self.tours {
            if tour.id.is_empty() {
                errors.push(format!("tour '{}' has an empty id", tour.name));
            } else if !tour_ids.insert(tour.id.as_str()) {
                errors.push(format!("duplicate tour id '{}'", tour.id));
            }
            errors.extend(tier_errors(&tour.id, &tour.price_tiers));
        }

        let mut accommodation_ids = HashSet::new();
        for accommodation in &self.accommodations {
            if accommodation.id.is_empty() {
                errors.push(format!(
                    "accommodation '{}' has an empty id",
                    accommodation.name
                ));
            } else if !accommodation_ids.insert(accommodation.id.as_str()) {
                errors.push(format!("duplicate accommodation id '{}'", accommodation.id));
            }
            if accommodation.price_per_person < Decimal::ZERO {
                errors.push(format!(
                    "accommodation '{}' has a negative price",
                    accommodation.id
                ));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(CatalogError::Invalid(errors))
        }
    }

    /// The camp's published price list
    pub fn wadi_rum() -> Self {
        let tours = vec![
            tour(
                "half-day-jeep",
                "Half Day Jeep Tour",
                &[(1, 1, dec!(50)), (2, 3, dec!(45)), (4, 6, dec!(35))],
                None,
            ),
            tour(
                "full-day-jeep",
                "Full Day Jeep Tour",
                &[(1, 1, dec!(60)), (2, 3, dec!(55)), (4, 6, dec!(45))],
                None,
            ),
            tour(
                "beduin-way",
                "The Beduin Way",
                &[(1, 1, dec!(150)), (2, 5, dec!(100)), (6, 100, dec!(85))],
                None,
            ),
            tour(
                "jebel-khash",
                "Jebel Khash Route",
                &[(1, 1, dec!(140)), (2, 3, dec!(90)), (4, 6, dec!(75))],
                Some("Children 5-12 Years: Half Price. Kids from 0-5 Years: FREE"),
            ),
            tour(
                "hot-air-balloon",
                "Hot Air Balloon",
                &[(1, 1, dec!(200)), (2, 6, dec!(185))],
                None,
            ),
            tour(
                "burdah-arch",
                "Burdah Arch Scrambling",
                &[(1, 1, dec!(120)), (2, 5, dec!(80)), (6, 100, dec!(65))],
                None,
            ),
            tour(
                "all-in-one",
                "All in One Day",
                &[(1, 1, dec!(110)), (2, 5, dec!(80)), (6, 100, dec!(65))],
                None,
            ),
            tour(
                "um-addami",
                "Jebel Um Addami Climbing",
                &[(1, 1, dec!(85)), (2, 3, dec!(75)), (4, 6, dec!(65))],
                None,
            ),
            // Flat per-person price: a single tier spanning the whole range
            tour("camel-rides", "Camel Rides", &[(1, 100, dec!(20))], None),
            tour("sandboarding", "Sandboarding", &[(1, 100, dec!(20))], None),
            tour(
                "trekking",
                "Trekking in the Wild",
                &[(1, 1, dec!(190)), (2, 5, dec!(150)), (6, 100, dec!(130))],
                None,
            ),
        ];

        let accommodations = vec![
            accommodation(
                "tented-camp",
                "Sleeping at the Tented Camp",
                dec!(25),
                "With breakfast and dinner",
            ),
            accommodation(
                "under-stars",
                "Sleeping Under the Stars",
                dec!(40),
                "With dinner and breakfast",
            ),
            accommodation("luxury-bubble", "Luxury Bubble Camp", dec!(120), "Per person"),
            accommodation("normal-bubble", "Normal Bubble Camp", dec!(80), "Per person"),
        ];

        Self {
            tours,
            accommodations,
        }
    }
}

/// Tier rules: non-empty, starting at 1, sorted, non-overlapping, prices
/// non-negative and non-increasing. Gaps after the last tier are allowed.
fn tier_errors(tour_id: &str, tiers: &[PriceTier]) -> Vec<String> {
    let mut errors = Vec::new();

    let Some(first) = tiers.first() else {
        errors.push(format!("tour '{}' has no price tiers", tour_id));
        return errors;
    };
    if first.min_people != 1 {
        errors.push(format!(
            "tour '{}' first tier starts at {} instead of 1",
            tour_id, first.min_people
        ));
    }

    for tier in tiers {
        if tier.min_people == 0 || tier.min_people > tier.max_people {
            errors.push(format!(
                "tour '{}' has an invalid tier {}-{}",
                tour_id, tier.min_people, tier.max_people
            ));
        }
        if tier.price_per_person < Decimal::ZERO {
            errors.push(format!("tour '{}' has a negative tier price", tour_id));
        }
    }

    for pair in tiers.windows(2) {
        let (lower, upper) = (&pair[0], &pair[1]);
        if upper.min_people <= lower.max_people {
            errors.push(format!(
                "tour '{}' tiers {}-{} and {}-{} overlap or are out of order",
                tour_id, lower.min_people, lower.max_people, upper.min_people, upper.max_people
            ));
        }
        if upper.price_per_person > lower.price_per_person {
            errors.push(format!(
                "tour '{}' price rises from {} to {} at {} people",
                tour_id, lower.price_per_person, upper.price_per_person, upper.min_people
            ));
        }
    }

    errors
}

fn tour(
    id: &str,
    name: &str,
    tiers: &[(u32, u32, Decimal)],
    children_note: Option<&str>,
) -> TourCatalogEntry {
    TourCatalogEntry {
        id: id.to_string(),
        name: name.to_string(),
        price_tiers: tiers
            .iter()
            .map(|&(min, max, price)| PriceTier::new(min, max, price))
            .collect(),
        children_note: children_note.map(str::to_string),
    }
}

fn accommodation(id: &str, name: &str, price: Decimal, description: &str) -> AccommodationOption {
    AccommodationOption {
        id: id.to_string(),
        name: name.to_string(),
        price_per_person: price,
        description: description.to_string(),
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::wadi_rum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog_is_valid() {
        Catalog::wadi_rum().validate().unwrap();
    }

    #[test]
    fn test_builtin_catalog_prices_non_increasing() {
        for tour in &Catalog::wadi_rum().tours {
            let prices: Vec<Decimal> = tour.price_tiers.iter().map(|t| t.price_per_person).collect();
            assert!(
                prices.windows(2).all(|w| w[0] >= w[1]),
                "tour {} has rising prices",
                tour.id
            );
        }
    }

    #[test]
    fn test_lookup_by_id() {
        let catalog = Catalog::wadi_rum();
        assert_eq!(catalog.tour("camel-rides").unwrap().name, "Camel Rides");
        assert_eq!(
            catalog.accommodation("tented-camp").unwrap().price_per_person,
            dec!(25)
        );
        assert!(catalog.tour("scuba").is_none());
        assert!(catalog.accommodation("none").is_none());
    }

    #[test]
    fn test_json_roundtrip_of_builtin_catalog() {
        let json = serde_json::to_string(&Catalog::wadi_rum()).unwrap();
        assert_eq!(Catalog::from_json_str(&json).unwrap(), Catalog::wadi_rum());
    }

    #[test]
    fn test_overlapping_tiers_rejected() {
        let result = Catalog::new(
            vec![tour("x", "X", &[(1, 3, dec!(50)), (3, 6, dec!(40))], None)],
            vec![],
        );
        match result {
            Err(CatalogError::Invalid(errors)) => {
                assert!(errors.iter().any(|e| e.contains("overlap")));
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_rising_prices_rejected() {
        let result = Catalog::new(
            vec![tour("x", "X", &[(1, 1, dec!(40)), (2, 6, dec!(50))], None)],
            vec![],
        );
        assert!(matches!(result, Err(CatalogError::Invalid(_))));
    }

    #[test]
    fn test_missing_tiers_and_duplicate_ids_rejected() {
        let result = Catalog::new(
            vec![tour("x", "X", &[], None), tour("x", "X again", &[(1, 1, dec!(1))], None)],
            vec![],
        );
        match result {
            Err(CatalogError::Invalid(errors)) => {
                assert_eq!(errors.len(), 2);
                assert!(errors.iter().any(|e| e.contains("no price tiers")));
                assert!(errors.iter().any(|e| e.contains("duplicate tour id")));
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_first_tier_must_start_at_one() {
        let result = Catalog::new(vec![tour("x", "X", &[(2, 6, dec!(40))], None)], vec![]);
        assert!(matches!(result, Err(CatalogError::Invalid(_))));
    }

    #[test]
    fn test_negative_accommodation_price_rejected() {
        let result = Catalog::new(vec![], vec![accommodation("a", "A", dec!(-1), "")]);
        assert!(matches!(result, Err(CatalogError::Invalid(_))));
    }

    #[test]
    fn test_missing_file_reports_path() {
        let err = Catalog::load("/nonexistent/catalog.json").unwrap_err();
        assert!(err.to_string().contains("/nonexistent/catalog.json"));
    }
}
