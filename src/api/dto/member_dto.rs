//! Member request bodies and list filters.

use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use super::common_dto::{date_field, flag, present};
use crate::domain::MemberStatus;
use crate::error::ApiError;
use crate::persistence::MemberFilter;
use crate::persistence::models::{MemberChanges, NewMember};

/// Request body for `POST /api/members` and `PUT /api/members/{id}`.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct MemberRequest {
    /// Full name; required on create.
    #[serde(default)]
    pub name: Option<String>,
    /// `Active` or `Inactive`; required on create.
    #[serde(default)]
    pub status: Option<String>,
    /// Joined on a trial. Defaults to `false` on create.
    #[serde(default)]
    pub is_trial_user: Option<bool>,
    /// Converted from a trial. Defaults to `false` on create.
    #[serde(default)]
    pub converted_from_trial: Option<bool>,
    /// Join date, `YYYY-MM-DD`; required on create.
    #[serde(default)]
    pub join_date: Option<String>,
}

impl MemberRequest {
    /// Validates a create request.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] if a required field is missing or
    /// the status or date is invalid.
    pub fn into_new(self) -> Result<NewMember, ApiError> {
        let (Some(name), Some(status), Some(join_date)) = (
            present(self.name),
            present(self.status),
            present(self.join_date),
        ) else {
            return Err(ApiError::Validation(
                "name, status, and join_date are required".to_string(),
            ));
        };
        let status: MemberStatus = status.parse()?;
        let join_date = date_field(Some(&join_date), "join_date")?
            .ok_or_else(|| ApiError::Validation("join_date is required".to_string()))?;

        Ok(NewMember {
            name,
            status,
            is_trial_user: self.is_trial_user.unwrap_or(false),
            converted_from_trial: self.converted_from_trial.unwrap_or(false),
            join_date,
        })
    }

    /// Validates an update request.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] if a present status or date is
    /// invalid.
    pub fn into_changes(self) -> Result<MemberChanges, ApiError> {
        let status = present(self.status)
            .map(|s| s.parse::<MemberStatus>())
            .transpose()?;
        Ok(MemberChanges {
            name: present(self.name),
            status,
            is_trial_user: self.is_trial_user,
            converted_from_trial: self.converted_from_trial,
            join_date: date_field(self.join_date.as_deref(), "join_date")?,
        })
    }
}

/// Query parameters for `GET /api/members`.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct MemberListParams {
    /// Exact status match.
    pub status: Option<String>,
    /// `true` or `false`.
    pub is_trial_user: Option<String>,
    /// `true` or `false`.
    pub converted_from_trial: Option<String>,
}

impl MemberListParams {
    /// Converts to a repository filter.
    #[must_use]
    pub fn into_filter(self) -> MemberFilter {
        MemberFilter {
            status: present(self.status),
            is_trial_user: flag(self.is_trial_user.as_deref()),
            converted_from_trial: flag(self.converted_from_trial.as_deref()),
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn request(status: &str) -> MemberRequest {
        MemberRequest {
            name: Some("Asha Rao".to_string()),
            status: Some(status.to_string()),
            join_date: Some("2024-02-01".to_string()),
            ..MemberRequest::default()
        }
    }

    #[test]
    fn create_defaults_trial_flags() {
        let Ok(member) = request("Active").into_new() else {
            panic!("expected member");
        };
        assert_eq!(member.status, MemberStatus::Active);
        assert!(!member.is_trial_user);
        assert!(!member.converted_from_trial);
        assert_eq!(member.join_date.to_string(), "2024-02-01");
    }

    #[test]
    fn create_rejects_missing_fields() {
        let Err(ApiError::Validation(msg)) = MemberRequest::default().into_new() else {
            panic!("expected validation error");
        };
        assert_eq!(msg, "name, status, and join_date are required");
    }

    #[test]
    fn create_rejects_unknown_status() {
        let Err(ApiError::Validation(msg)) = request("Gold").into_new() else {
            panic!("expected validation error");
        };
        assert_eq!(msg, "Status must be one of: Active, Inactive");
    }

    #[test]
    fn update_validates_present_status_only() {
        let Ok(changes) = MemberRequest {
            is_trial_user: Some(true),
            ..MemberRequest::default()
        }
        .into_changes() else {
            panic!("expected changes");
        };
        assert_eq!(changes.status, None);
        assert_eq!(changes.is_trial_user, Some(true));

        let bad = MemberRequest {
            status: Some("Paused".to_string()),
            ..MemberRequest::default()
        };
        assert!(bad.into_changes().is_err());
    }

    #[test]
    fn list_flags_compare_against_true() {
        let filter = MemberListParams {
            status: Some("Active".to_string()),
            is_trial_user: Some("true".to_string()),
            converted_from_trial: Some("no".to_string()),
        }
        .into_filter();
        assert_eq!(filter.status.as_deref(), Some("Active"));
        assert_eq!(filter.is_trial_user, Some(true));
        assert_eq!(filter.converted_from_trial, Some(false));
    }
}
