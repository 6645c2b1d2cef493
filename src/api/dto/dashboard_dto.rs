//! Dashboard query parameters and response body.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{DashboardFilter, RevenuePoint, Summary, VenueFilter, YearMonth};
use crate::error::ApiError;
use crate::persistence::models::VenueRow;
use crate::service::Dashboard;

/// Query parameters for `GET /api/dashboard`.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DashboardParams {
    /// `all` (default) or a venue id.
    pub venue: Option<String>,
    /// `YYYY-MM`; defaults to the current UTC month.
    pub month: Option<String>,
}

impl DashboardParams {
    /// Resolves the parameters into a filter, defaulting the month to
    /// `current`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] if either value is malformed.
    pub fn into_filter(self, current: YearMonth) -> Result<DashboardFilter, ApiError> {
        let venue = match self.venue.as_deref() {
            Some(raw) => raw.parse()?,
            None => VenueFilter::All,
        };
        let month = match self.month.as_deref().map(str::trim) {
            Some(raw) if !raw.is_empty() => raw.parse()?,
            _ => current,
        };
        Ok(DashboardFilter { venue, month })
    }
}

/// One day of the revenue chart.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RevenuePointDto {
    /// Calendar day.
    pub date: NaiveDate,
    /// Chart label, e.g. `"Tue 05 Mar"`.
    pub label: String,
    /// Successful revenue on that day.
    pub revenue: Decimal,
}

impl From<&RevenuePoint> for RevenuePointDto {
    fn from(point: &RevenuePoint) -> Self {
        Self {
            date: point.date,
            label: point.date.format("%a %d %b").to_string(),
            revenue: point.revenue,
        }
    }
}

/// Response body for `GET /api/dashboard`.
#[derive(Debug, Serialize, ToSchema)]
pub struct DashboardResponse {
    /// Month the series covers, `YYYY-MM`.
    pub month: String,
    /// `all` or the selected venue id.
    pub venue: String,
    /// Headline figures.
    pub summary: Summary,
    /// One point per day of `month`.
    pub revenue_series: Vec<RevenuePointDto>,
    /// Venues available to the filter.
    pub venues: Vec<VenueRow>,
}

impl From<Dashboard> for DashboardResponse {
    fn from(dashboard: Dashboard) -> Self {
        let Dashboard { report, venues } = dashboard;
        Self {
            month: report.filter.month.to_string(),
            venue: report.filter.venue.to_string(),
            revenue_series: report.revenue_series.iter().map(Into::into).collect(),
            summary: report.summary,
            venues,
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;
    use crate::domain::VenueId;

    fn march() -> YearMonth {
        let Some(month) = YearMonth::new(2024, 3) else {
            panic!("bad test month");
        };
        month
    }

    #[test]
    fn defaults_to_all_venues_and_current_month() {
        let Ok(filter) = DashboardParams::default().into_filter(march()) else {
            panic!("expected filter");
        };
        assert_eq!(filter.venue, VenueFilter::All);
        assert_eq!(filter.month, march());
    }

    #[test]
    fn parses_venue_and_month() {
        let params = DashboardParams {
            venue: Some("2".to_string()),
            month: Some("2024-02".to_string()),
        };
        let Ok(filter) = params.into_filter(march()) else {
            panic!("expected filter");
        };
        assert_eq!(filter.venue, VenueFilter::Venue(VenueId::new(2)));
        assert_eq!(filter.month.to_string(), "2024-02");
    }

    #[test]
    fn rejects_malformed_values() {
        let bad_month = DashboardParams {
            month: Some("2024-13".to_string()),
            ..DashboardParams::default()
        };
        assert!(matches!(
            bad_month.into_filter(march()),
            Err(ApiError::Validation(_))
        ));

        let bad_venue = DashboardParams {
            venue: Some("downtown".to_string()),
            ..DashboardParams::default()
        };
        assert!(matches!(
            bad_venue.into_filter(march()),
            Err(ApiError::Validation(_))
        ));
    }

    #[test]
    fn revenue_points_carry_a_chart_label() {
        let Some(date) = NaiveDate::from_ymd_opt(2024, 3, 5) else {
            panic!("bad test date");
        };
        let dto = RevenuePointDto::from(&RevenuePoint {
            date,
            revenue: dec!(1100),
        });
        assert_eq!(dto.label, "Tue 05 Mar");
        assert_eq!(dto.revenue, dec!(1100));
    }
}
