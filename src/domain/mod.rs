//! Domain layer: identifiers, closed value sets, record views, and the
//! dashboard metrics aggregator.
//!
//! Nothing in here performs I/O. The aggregator in [`metrics`] is a pure
//! function over record slices; the persistence layer converts database
//! rows into the [`records`] views it consumes.

pub mod amount;
pub mod ids;
pub mod metrics;
pub mod month;
pub mod records;
pub mod status;

pub use amount::to_amount;
pub use ids::{BookingId, MemberId, SportId, TransactionId, VenueId};
pub use metrics::{DashboardFilter, DashboardReport, RevenuePoint, Summary, VenueFilter};
pub use month::YearMonth;
pub use records::{Booking, Member, Transaction};
pub use status::{BookingStatus, InvalidVariant, MemberStatus, TransactionStatus, TransactionType};
