//! Identifier newtypes for the entities the lifecycle touches.
//!
//! Users and pets are owned by external collaborators; the lifecycle only
//! ever references them by identity, so the identifiers are the whole of
//! their domain surface here.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

macro_rules! define_id {
    ($(#[$outer:meta])* $name:ident) => {
        $(#[$outer])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Construct from an existing UUID.
            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Generate a fresh random identifier.
            pub fn random() -> Self {
                Self(Uuid::new_v4())
            }

            /// Access the inner UUID.
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(Uuid::parse_str(s)?))
            }
        }
    };
}

define_id! {
    /// Identity of a user in the external user store.
    UserId
}

define_id! {
    /// Identity of a pet in the external pet store.
    PetId
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;

    #[test]
    fn user_id_round_trips_through_display() {
        let id = UserId::random();
        let parsed: UserId = id.to_string().parse().expect("parse user id");
        assert_eq!(parsed, id);
    }

    #[test]
    fn pet_id_from_uuid_preserves_value() {
        let uuid = Uuid::new_v4();
        let id = PetId::from_uuid(uuid);
        assert_eq!(id.as_uuid(), &uuid);
    }

    #[test]
    fn ids_serialize_as_bare_uuid_strings() {
        let id = UserId::from_uuid(Uuid::nil());
        let json = serde_json::to_string(&id).expect("serialize user id");
        assert_eq!(json, "\"00000000-0000-0000-0000-000000000000\"");
    }
}
