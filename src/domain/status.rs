//! Closed value sets stored as text columns.
//!
//! The database keeps these as `VARCHAR` guarded by `CHECK` constraints. The
//! enums here are the typed view used for validation and aggregation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Rejection for a value outside one of the closed sets below.
///
/// Displays as `"Status must be one of: Active, Inactive"`, which is also
/// the message returned to API clients.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{field} must be one of: {}", .allowed.join(", "))]
pub struct InvalidVariant {
    /// Human label of the rejected field (`"Status"` or `"Type"`).
    pub field: &'static str,
    /// Accepted spellings.
    pub allowed: &'static [&'static str],
}

macro_rules! text_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $field:literal {
            $($(#[$vmeta:meta])* $variant:ident => $text:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
        pub enum $name {
            $($(#[$vmeta])* $variant),+
        }

        impl $name {
            /// Every accepted spelling, in declaration order.
            pub const ALLOWED: &'static [&'static str] = &[$($text),+];

            /// Returns the stored text form.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $text),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = InvalidVariant;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($text => Ok(Self::$variant),)+
                    _ => Err(InvalidVariant {
                        field: $field,
                        allowed: Self::ALLOWED,
                    }),
                }
            }
        }
    };
}

text_enum!(
    /// Membership state. Exactly one applies to each member.
    MemberStatus, "Status" {
        /// Currently paying or engaged.
        Active => "Active",
        /// Lapsed.
        Inactive => "Inactive",
    }
);

text_enum!(
    /// Lifecycle of a court booking.
    BookingStatus, "Status" {
        /// Accepted by the venue.
        Confirmed => "Confirmed",
        /// Played.
        Completed => "Completed",
        /// Withdrawn before play.
        Cancelled => "Cancelled",
        /// Awaiting confirmation. Default for new bookings.
        Pending => "Pending",
    }
);

text_enum!(
    /// What a payment was for.
    TransactionType, "Type" {
        /// Payment for a court booking.
        Booking => "Booking",
        /// Payment for a coaching session.
        Coaching => "Coaching",
        /// Money returned to a member.
        Refund => "Refund",
    }
);

text_enum!(
    /// Settlement state of a payment.
    TransactionStatus, "Status" {
        /// Settled. Only these count as realized revenue.
        Success => "Success",
        /// Declined or errored.
        Failed => "Failed",
        /// Not yet settled.
        Pending => "Pending",
        /// Returned to the payer.
        Refunded => "Refunded",
        /// Contested by the payer.
        Dispute => "Dispute",
    }
);

impl Default for BookingStatus {
    fn default() -> Self {
        Self::Pending
    }
}

impl TransactionType {
    /// Whether a successful transaction of this type is realized revenue.
    #[must_use]
    pub const fn is_revenue(self) -> bool {
        matches!(self, Self::Booking | Self::Coaching)
    }
}

impl TransactionStatus {
    /// Whether the transaction counts toward the refunds & disputes figure.
    #[must_use]
    pub const fn is_refund_or_dispute(self) -> bool {
        matches!(self, Self::Refunded | Self::Dispute)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn parses_exact_spelling_only() {
        assert_eq!("Active".parse::<MemberStatus>(), Ok(MemberStatus::Active));
        assert!("active".parse::<MemberStatus>().is_err());
        assert!("".parse::<BookingStatus>().is_err());
    }

    #[test]
    fn rejection_lists_allowed_values() {
        let Err(err) = "Lost".parse::<BookingStatus>() else {
            panic!("expected rejection");
        };
        assert_eq!(
            err.to_string(),
            "Status must be one of: Confirmed, Completed, Cancelled, Pending"
        );

        let Err(err) = "Gift".parse::<TransactionType>() else {
            panic!("expected rejection");
        };
        assert_eq!(err.to_string(), "Type must be one of: Booking, Coaching, Refund");
    }

    #[test]
    fn text_form_matches_serde() {
        for status in [
            TransactionStatus::Success,
            TransactionStatus::Failed,
            TransactionStatus::Pending,
            TransactionStatus::Refunded,
            TransactionStatus::Dispute,
        ] {
            let json = serde_json::to_string(&status).ok();
            assert_eq!(json, Some(format!("\"{}\"", status.as_str())));
        }
    }

    #[test]
    fn revenue_types() {
        assert!(TransactionType::Booking.is_revenue());
        assert!(TransactionType::Coaching.is_revenue());
        assert!(!TransactionType::Refund.is_revenue());
    }

    #[test]
    fn new_bookings_default_to_pending() {
        assert_eq!(BookingStatus::default(), BookingStatus::Pending);
    }
}
