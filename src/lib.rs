//! Wadi Rum camp website backend.
//!
//! Serves the booking form's quote engine and forwards booking requests and
//! contact inquiries to the camp by email.

pub mod booking;
pub mod config;
pub mod contact;
pub mod error;
pub mod notify;
pub mod pricing;
pub mod routes;

use std::sync::Arc;

use crate::config::Config;
use crate::notify::{mask_api_key, LogNotifier, Notifier, NotifyError, ResendNotifier};
use crate::pricing::{Catalog, CatalogError};

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub notifier: Arc<dyn Notifier>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(catalog: Catalog, notifier: Arc<dyn Notifier>, config: Config) -> Self {
        Self {
            catalog: Arc::new(catalog),
            notifier,
            config: Arc::new(config),
        }
    }
}

/// Load the configured catalog file, or the built-in price list
pub fn load_catalog(config: &Config) -> Result<Catalog, CatalogError> {
    match &config.catalog_path {
        Some(path) => Catalog::load(path),
        None => {
            tracing::info!("Using built-in catalog");
            Ok(Catalog::wadi_rum())
        }
    }
}

/// Email through Resend when a key is configured, otherwise log messages only
pub fn build_notifier(config: &Config) -> Result<Arc<dyn Notifier>, NotifyError> {
    match &config.resend_api_key {
        Some(key) => {
            tracing::info!(
                "Using Resend API key: {} ({})",
                mask_api_key(key),
                config.resend_api_url
            );
            let notifier =
                ResendNotifier::new(&config.resend_api_url, key, config.email_timeout)?;
            Ok(Arc::new(notifier))
        }
        None => {
            tracing::warn!("RESEND_API_KEY not set; emails will only be logged");
            Ok(Arc::new(LogNotifier))
        }
    }
}
