//! Data Transfer Objects for REST request/response serialization.
//!
//! Request bodies keep every field optional so that missing values produce
//! the API's own validation messages rather than serde errors. Each body
//! converts into a persistence write model through `into_new` (create) or
//! `into_changes` (partial update).

pub mod booking_dto;
pub mod common_dto;
pub mod dashboard_dto;
pub mod member_dto;
pub mod transaction_dto;
pub mod venue_dto;

pub use booking_dto::*;
pub use common_dto::ApiEnvelope;
pub use dashboard_dto::*;
pub use member_dto::*;
pub use transaction_dto::*;
pub use venue_dto::*;
