//! Type-safe record identifiers.
//!
//! Every table uses a `SERIAL` primary key. Each key gets its own newtype so
//! a venue id can never be bound where a member id is expected.

use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

macro_rules! record_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            Serialize,
            Deserialize,
            ToSchema,
            sqlx::Type,
        )]
        #[serde(transparent)]
        #[sqlx(transparent)]
        pub struct $name(i32);

        impl $name {
            /// Wraps a raw database key.
            #[must_use]
            pub const fn new(raw: i32) -> Self {
                Self(raw)
            }

            /// Returns the raw database key.
            #[must_use]
            pub const fn get(self) -> i32 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i32> for $name {
            fn from(raw: i32) -> Self {
                Self(raw)
            }
        }

        impl From<$name> for i32 {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl FromStr for $name {
            type Err = ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim().parse().map(Self)
            }
        }
    };
}

record_id!(
    /// Primary key of the `venues` table.
    VenueId
);
record_id!(
    /// Primary key of the `sports` table.
    SportId
);
record_id!(
    /// Primary key of the `members` table.
    MemberId
);
record_id!(
    /// Primary key of the `bookings` table.
    BookingId
);
record_id!(
    /// Primary key of the `transactions` table.
    TransactionId
);

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn parses_trimmed_integers() {
        let Ok(id) = " 42 ".parse::<VenueId>() else {
            panic!("expected a venue id");
        };
        assert_eq!(id.get(), 42);
        assert!("abc".parse::<VenueId>().is_err());
    }

    #[test]
    fn serializes_as_bare_integer() {
        let json = serde_json::to_string(&MemberId::new(7)).ok();
        assert_eq!(json.as_deref(), Some("7"));

        let Ok(id) = serde_json::from_str::<BookingId>("19") else {
            panic!("expected a booking id");
        };
        assert_eq!(id, BookingId::from(19));
    }

    #[test]
    fn display_matches_raw_key() {
        assert_eq!(TransactionId::new(1203).to_string(), "1203");
    }
}
