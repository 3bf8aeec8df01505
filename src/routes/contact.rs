//! Contact form route handler

use axum::{
    extract::{rejection::JsonRejection, State},
    routing::post,
    Json, Router,
};
use serde::Serialize;

use crate::contact::{ContactMessage, ContactRequest};
use crate::error::Result;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct ContactResponse {
    pub success: bool,
    pub id: String,
    pub message: &'static str,
}

pub fn router() -> Router<AppState> {
    Router::new().route("/api/contact", post(send_contact_email))
}

/// Email a contact form inquiry to the camp
async fn send_contact_email(
    State(state): State<AppState>,
    payload: std::result::Result<Json<ContactRequest>, JsonRejection>,
) -> Result<Json<ContactResponse>> {
    let Json(req) = payload?;
    tracing::info!(
        "Contact form received - Name: {}, Email: {}, Message length: {}",
        req.name,
        req.email,
        req.message.len()
    );

    let message = ContactMessage::try_from(req)?;
    let email = message.to_email(&state.config.contact_sender, &state.config.contact_recipient);

    tracing::debug!(
        "Sending contact email to {} via {}",
        state.config.contact_recipient,
        state.notifier.name()
    );
    let receipt = state.notifier.send(&email).await?;

    Ok(Json(ContactResponse {
        success: true,
        id: receipt.id,
        message: "Your message has been sent successfully! We'll get back to you soon.",
    }))
}
