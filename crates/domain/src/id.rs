//! Typed identifier newtypes backed by UUIDs.
//!
//! Each id carries a human label used when a string fails to parse, so a bad
//! `user_id` and a bad subscription id are reported differently.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

macro_rules! define_id {
    ($(#[doc = $doc:expr])* $name:ident, $kind:literal) => {
        $(#[doc = $doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(uuid::Uuid);

        impl Default for $name {
            fn default() -> Self {
                Self(uuid::Uuid::new_v4())
            }
        }

        impl $name {
            /// Label used in parse errors.
            pub const KIND: &'static str = $kind;

            /// Generate a new random identifier.
            #[must_use]
            pub fn new() -> Self {
                Self::default()
            }

            /// Wrap an existing UUID.
            #[must_use]
            pub fn from_uuid(uuid: uuid::Uuid) -> Self {
                Self(uuid)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }

        impl FromStr for $name {
            type Err = ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                uuid::Uuid::parse_str(s.trim())
                    .map(Self)
                    .map_err(|_| ValidationError::InvalidId {
                        kind: $kind,
                        value: s.to_owned(),
                    })
            }
        }
    };
}

define_id!(
    /// Unique identifier for a [`Subscription`](crate::subscription::Subscription).
    SubscriptionId,
    "subscription id"
);

define_id!(
    /// Opaque identifier of the user owning a subscription.
    UserId,
    "user id"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_generate_unique_ids_when_called_twice() {
        let a = SubscriptionId::new();
        let b = SubscriptionId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn should_roundtrip_through_display_and_from_str() {
        let id = UserId::new();
        let parsed: UserId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn should_tolerate_surrounding_whitespace() {
        let id = SubscriptionId::new();
        let parsed: SubscriptionId = format!(" {id}\n").parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn should_serialize_as_plain_uuid_string() {
        let uuid = uuid::Uuid::new_v4();
        let json = serde_json::to_string(&UserId::from_uuid(uuid)).unwrap();
        assert_eq!(json, format!("\"{uuid}\""));
    }

    #[test]
    fn should_name_the_id_kind_when_parsing_fails() {
        let err = UserId::from_str("bob").unwrap_err();
        assert_eq!(
            err,
            ValidationError::InvalidId {
                kind: "user id",
                value: "bob".to_string(),
            }
        );
        assert_eq!(err.to_string(), "invalid user id `bob`, expected a UUID");

        let err = SubscriptionId::from_str("not-a-uuid").unwrap_err();
        assert!(matches!(
            err,
            ValidationError::InvalidId { kind: SubscriptionId::KIND, .. }
        ));
    }
}
