//! Booking form route handler

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::booking::{BookingSelection, ContactDetails};
use crate::contact::is_plausible_email;
use crate::error::{AppError, Result};
use crate::pricing::requests::default_num_people;
use crate::pricing::responses::{LineItemResponse, MoneyResponse};
use crate::pricing::services;
use crate::AppState;

/// Booking form submission
#[derive(Debug, Deserialize)]
pub struct BookingRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default = "default_num_people")]
    pub num_people: u32,
    #[serde(default)]
    pub tours: Vec<String>,
    #[serde(default)]
    pub accommodation: Option<String>,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct BookingResponse {
    pub success: bool,
    pub reference: Uuid,
    pub message: &'static str,
    pub line_items: Vec<LineItemResponse>,
    pub total: MoneyResponse,
}

pub fn router() -> Router<AppState> {
    Router::new().route("/api/bookings", post(submit_booking))
}

/// Price, log and forward a booking request
async fn submit_booking(
    State(state): State<AppState>,
    payload: std::result::Result<Json<BookingRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<BookingResponse>)> {
    let Json(req) = payload?;
    let contact = ContactDetails {
        name: req.name.trim().to_string(),
        email: req.email.trim().to_string(),
        phone: req.phone.trim().to_string(),
        arrival_date: req.date,
        message: req.message,
    };
    if contact.name.is_empty() || contact.email.is_empty() || contact.phone.is_empty() {
        return Err(AppError::Validation(
            "Please fill out all required fields".to_string(),
        ));
    }
    if !is_plausible_email(&contact.email) {
        return Err(AppError::Validation(
            "Please enter a valid email address".to_string(),
        ));
    }

    services::validate_party_size(req.num_people, state.config.max_party_size)?;
    services::check_selection(
        &state.catalog,
        req.accommodation.as_deref(),
        req.tours.as_slice(),
    )?;

    let mut selection = BookingSelection::new();
    selection.contact = contact;
    selection.set_num_people(req.num_people);
    selection.set_accommodation(req.accommodation.as_deref());
    for tour_id in req.tours {
        selection.add_tour(tour_id);
    }

    let submission = selection.into_submission(&state.catalog, Utc::now());

    match serde_json::to_string(&submission) {
        Ok(record) => tracing::info!(
            reference = %submission.reference,
            "Booking submitted: {}",
            record
        ),
        Err(e) => tracing::warn!(
            reference = %submission.reference,
            "Failed to serialize booking submission: {}",
            e
        ),
    }

    let email = submission.to_email(&state.config.contact_sender, &state.config.contact_recipient);
    let receipt = state.notifier.send(&email).await?;
    tracing::debug!(
        reference = %submission.reference,
        "Booking forwarded via {} ({})",
        state.notifier.name(),
        receipt.id
    );

    let line_items = submission
        .accommodation
        .iter()
        .chain(submission.tours.iter())
        .map(LineItemResponse::from)
        .collect();

    Ok((
        StatusCode::CREATED,
        Json(BookingResponse {
            success: true,
            reference: submission.reference,
            message: "Thank you for your booking request. We will contact you shortly to confirm your reservation.",
            line_items,
            total: MoneyResponse::jod(submission.total),
        }),
    ))
}
