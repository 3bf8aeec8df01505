//! Booking form state and the submission record.
//!
//! A [`BookingSelection`] lives for one form session. The quote is never
//! stored on it; it is derived from the catalog on demand, so it can be
//! recomputed after every change. On submit the selection is turned into a
//! [`BookingSubmission`], the serializable record handed to notifications.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::notify::OutboundEmail;
use crate::pricing::calculators::{LineItem, MIN_PARTY_SIZE, NO_ACCOMMODATION_ID};
use crate::pricing::responses::CURRENCY;
use crate::pricing::{quote_selection, Catalog, LineItemKind, QuoteResult};

/// Customer contact fields, passed through untouched
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactDetails {
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(default)]
    pub arrival_date: Option<NaiveDate>,
    #[serde(default)]
    pub message: String,
}

/// Current state of the booking form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingSelection {
    num_people: u32,
    tour_ids: Vec<String>,
    accommodation_id: Option<String>,
    pub contact: ContactDetails,
}

impl Default for BookingSelection {
    fn default() -> Self {
        Self::new()
    }
}

impl BookingSelection {
    /// One person, no tours, no accommodation
    pub fn new() -> Self {
        Self {
            num_people: MIN_PARTY_SIZE,
            tour_ids: Vec::new(),
            accommodation_id: None,
            contact: ContactDetails::default(),
        }
    }

    pub fn num_people(&self) -> u32 {
        self.num_people
    }

    /// Selected tours in the order they were added
    pub fn tour_ids(&self) -> &[String] {
        &self.tour_ids
    }

    pub fn accommodation_id(&self) -> Option<&str> {
        self.accommodation_id.as_deref()
    }

    /// Add a tour; returns false if it was already selected
    pub fn add_tour(&mut self, tour_id: impl Into<String>) -> bool {
        let tour_id = tour_id.into();
        if self.tour_ids.contains(&tour_id) {
            return false;
        }
        self.tour_ids.push(tour_id);
        true
    }

    /// Remove a tour; returns false if it was not selected
    pub fn remove_tour(&mut self, tour_id: &str) -> bool {
        let before = self.tour_ids.len();
        self.tour_ids.retain(|id| id != tour_id);
        self.tour_ids.len() != before
    }

    /// Party size, never below one
    pub fn set_num_people(&mut self, num_people: u32) {
        self.num_people = num_people.max(MIN_PARTY_SIZE);
    }

    /// Choose an accommodation; empty or `"none"` clears the choice
    pub fn set_accommodation(&mut self, accommodation_id: Option<&str>) {
        self.accommodation_id = accommodation_id
            .map(str::trim)
            .filter(|id| !id.is_empty() && *id != NO_ACCOMMODATION_ID)
            .map(str::to_string);
    }

    /// Back to a blank form ("Make Another Booking")
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Derive the quote for the current state
    pub fn quote(&self, catalog: &Catalog) -> QuoteResult {
        quote_selection(
            catalog,
            self.accommodation_id(),
            self.num_people,
            self.tour_ids.as_slice(),
        )
    }

    /// Freeze the selection into a submission record
    pub fn into_submission(self, catalog: &Catalog, submitted_at: DateTime<Utc>) -> BookingSubmission {
        let quote = self.quote(catalog);
        let mut accommodation = None;
        let mut tours = Vec::with_capacity(quote.line_items.len());
        for item in quote.line_items {
            match item.kind {
                LineItemKind::Accommodation => accommodation = Some(item),
                LineItemKind::Tour => tours.push(item),
            }
        }

        BookingSubmission {
            reference: Uuid::new_v4(),
            submitted_at,
            contact: self.contact,
            num_people: self.num_people,
            accommodation,
            tours,
            total: quote.total,
            currency: CURRENCY,
        }
    }
}

/// Everything the camp needs to confirm a booking request
#[derive(Debug, Clone, Serialize)]
pub struct BookingSubmission {
    pub reference: Uuid,
    pub submitted_at: DateTime<Utc>,
    pub contact: ContactDetails,
    pub num_people: u32,
    pub accommodation: Option<LineItem>,
    pub tours: Vec<LineItem>,
    #[serde(with = "rust_decimal::serde::str")]
    pub total: Decimal,
    pub currency: &'static str,
}

impl BookingSubmission {
    /// Human-readable booking summary
    pub fn summary_text(&self) -> String {
        let mut lines = vec![
            "New Booking Request from Wadi Rum Website".to_string(),
            String::new(),
            format!("Reference: {}", self.reference),
            format!("Name: {}", self.contact.name),
            format!("Email: {}", self.contact.email),
            format!("Phone: {}", self.contact.phone),
            format!(
                "Arrival Date: {}",
                self.contact
                    .arrival_date
                    .map(|d| d.format("%B %-d, %Y").to_string())
                    .unwrap_or_else(|| "Not specified".to_string())
            ),
            format!(
                "Number of People: {} {}",
                self.num_people,
                if self.num_people == 1 { "Person" } else { "People" }
            ),
            String::new(),
            "Booking Summary".to_string(),
        ];

        if let Some(accommodation) = &self.accommodation {
            if accommodation.complimentary {
                lines.push(format!("{}: FREE (Included with tour)", accommodation.label));
            } else {
                lines.push(self.describe(accommodation));
            }
        }
        for tour in &self.tours {
            lines.push(self.describe(tour));
        }
        lines.push(format!("Total: {} {}", self.total, self.currency));

        if !self.contact.message.trim().is_empty() {
            lines.push(String::new());
            lines.push("Special Requests or Questions:".to_string());
            lines.push(self.contact.message.trim().to_string());
        }

        lines.join("\n")
    }

    fn describe(&self, item: &LineItem) -> String {
        format!(
            "{}: {} {} × {} = {} {}",
            item.label, item.unit_price, self.currency, item.quantity, item.subtotal, self.currency
        )
    }

    /// Email to the camp, replying to the customer
    pub fn to_email(&self, from: &str, to: &str) -> OutboundEmail {
        OutboundEmail {
            from: from.to_string(),
            to: vec![to.to_string()],
            subject: format!("New Booking Request from {}", self.contact.name),
            text: self.summary_text(),
            reply_to: Some(self.contact.email.clone()).filter(|e| !e.is_empty()),
        }
    }
}
