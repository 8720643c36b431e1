//! UUID-backed identifiers for every persisted entity.
//!
//! Each identifier is its own type so a reservation id can never be passed
//! where a ticket id is expected. All of them serialise as plain strings.

use std::fmt;
use std::str::FromStr;

use uuid::Uuid;

/// Error raised when an identifier string is not a UUID.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind} must be a valid UUID")]
pub struct IdParseError {
    kind: &'static str,
}

impl IdParseError {
    /// Human label of the identifier that failed to parse.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        self.kind
    }
}

macro_rules! uuid_identifier {
    ($(#[$meta:meta])* $name:ident, $kind:literal) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord,
            serde::Serialize, serde::Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Parse an identifier from its textual form.
            ///
            /// # Errors
            /// Returns [`IdParseError`] when the input is not a UUID. Leading
            /// or trailing whitespace is rejected rather than trimmed.
            pub fn new(raw: impl AsRef<str>) -> Result<Self, IdParseError> {
                let raw = raw.as_ref();
                if raw.trim() != raw {
                    return Err(IdParseError { kind: $kind });
                }
                Uuid::parse_str(raw)
                    .map(Self)
                    .map_err(|_| IdParseError { kind: $kind })
            }

            #[must_use]
            pub fn random() -> Self {
                Self(Uuid::new_v4())
            }

            #[must_use]
            pub const fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            #[must_use]
            pub const fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(&self.0, f)
            }
        }

        impl FromStr for $name {
            type Err = IdParseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s)
            }
        }

        impl From<Uuid> for $name {
            fn from(value: Uuid) -> Self {
                Self(value)
            }
        }

        impl From<$name> for Uuid {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

uuid_identifier!(
    /// Identifier of a registered user; shared with the identity provider.
    UserId,
    "user id"
);
uuid_identifier!(
    /// Identifier of a purchasable offer.
    OfferId,
    "offer id"
);
uuid_identifier!(
    /// Identifier of a checkout transaction.
    TransactionId,
    "transaction id"
);
uuid_identifier!(
    /// Identifier of a reservation line.
    ReservationId,
    "reservation id"
);
uuid_identifier!(
    /// Identifier of an individual e-ticket.
    ETicketId,
    "ticket id"
);

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("")]
    #[case("not-a-uuid")]
    #[case(" 3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    fn rejects_malformed_ids(#[case] raw: &str) {
        let err = OfferId::new(raw).expect_err("malformed ids fail");
        assert_eq!(err.kind(), "offer id");
        assert_eq!(err.to_string(), "offer id must be a valid UUID");
    }

    #[test]
    fn serialises_as_plain_string() {
        let id = ReservationId::new("3fa85f64-5717-4562-b3fc-2c963f66afa6").expect("valid id");
        let json = serde_json::to_string(&id).expect("serialise id");
        assert_eq!(json, "\"3fa85f64-5717-4562-b3fc-2c963f66afa6\"");
    }
}
