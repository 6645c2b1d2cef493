//! Venue request bodies.

use serde::Deserialize;
use utoipa::ToSchema;

use super::common_dto::present;
use crate::error::ApiError;
use crate::persistence::models::{NewVenue, VenueChanges};

/// Request body for `POST /api/venues` and `PUT /api/venues/{id}`.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct VenueRequest {
    /// Display name; required on create.
    #[serde(default)]
    pub name: Option<String>,
    /// Address or area; required on create.
    #[serde(default)]
    pub location: Option<String>,
}

impl VenueRequest {
    /// Validates a create request.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] if name or location is missing.
    pub fn into_new(self) -> Result<NewVenue, ApiError> {
        match (present(self.name), present(self.location)) {
            (Some(name), Some(location)) => Ok(NewVenue { name, location }),
            _ => Err(ApiError::Validation(
                "Name and location are required".to_string(),
            )),
        }
    }

    /// Converts an update request. Blank fields keep the stored value.
    #[must_use]
    pub fn into_changes(self) -> VenueChanges {
        VenueChanges {
            name: present(self.name),
            location: present(self.location),
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn create_requires_both_fields() {
        let request = VenueRequest {
            name: Some("Koramangala Arena".to_string()),
            location: None,
        };
        let Err(ApiError::Validation(msg)) = request.into_new() else {
            panic!("expected validation error");
        };
        assert_eq!(msg, "Name and location are required");
    }

    #[test]
    fn create_accepts_complete_body() {
        let request = VenueRequest {
            name: Some("Koramangala Arena".to_string()),
            location: Some("Koramangala, Bengaluru".to_string()),
        };
        let Ok(venue) = request.into_new() else {
            panic!("expected venue");
        };
        assert_eq!(venue.name, "Koramangala Arena");
    }

    #[test]
    fn update_ignores_blank_fields() {
        let changes = VenueRequest {
            name: Some(String::new()),
            location: Some("HSR Layout".to_string()),
        }
        .into_changes();
        assert_eq!(changes.name, None);
        assert_eq!(changes.location.as_deref(), Some("HSR Layout"));
    }
}
