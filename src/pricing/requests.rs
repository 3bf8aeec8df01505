//! Request DTOs for pricing API endpoints.

use serde::Deserialize;

/// Query for the tour picker
#[derive(Debug, Deserialize)]
pub struct TourOffersQuery {
    #[serde(default = "default_num_people")]
    pub num_people: u32,
}

/// Request to quote the current form selection
#[derive(Debug, Deserialize)]
pub struct QuoteRequest {
    #[serde(default = "default_num_people")]
    pub num_people: u32,
    #[serde(default)]
    pub tours: Vec<String>,
    #[serde(default)]
    pub accommodation: Option<String>,
}

pub(crate) fn default_num_people() -> u32 {
    1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_request_defaults() {
        let req: QuoteRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(req.num_people, 1);
        assert!(req.tours.is_empty());
        assert!(req.accommodation.is_none());
    }

    #[test]
    fn test_quote_request_full() {
        let req: QuoteRequest = serde_json::from_str(
            r#"{"num_people": 3, "tours": ["camel-rides"], "accommodation": "tented-camp"}"#,
        )
        .unwrap();
        assert_eq!(req.num_people, 3);
        assert_eq!(req.tours, vec!["camel-rides"]);
        assert_eq!(req.accommodation.as_deref(), Some("tented-camp"));
    }
}
