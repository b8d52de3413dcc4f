//! Pet snapshot consumed from the external pet store.
//!
//! The lifecycle never owns pets; it only reads availability and, on
//! approval, marks the pet adopted. This snapshot carries just the fields
//! those two interactions need.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::ids::{PetId, UserId};

/// Adoption status of a pet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PetStatus {
    /// Open for new adoption requests.
    Available,
    /// Reserved by the shelter outside this lifecycle.
    Pending,
    /// Adopted; set only as the side effect of exactly one approved request.
    Adopted,
}

impl std::fmt::Display for PetStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Available => "available",
            Self::Pending => "pending",
            Self::Adopted => "adopted",
        })
    }
}

/// The slice of a pet record the lifecycle reads and updates.
#[derive(Debug, Clone, PartialEq)]
pub struct Pet {
    id: PetId,
    name: String,
    status: PetStatus,
    adopted_by: Option<UserId>,
    adoption_date: Option<DateTime<Utc>>,
}

impl Pet {
    /// Construct a pet that is open for adoption requests.
    pub fn available(id: PetId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            status: PetStatus::Available,
            adopted_by: None,
            adoption_date: None,
        }
    }

    /// Construct a pet in an explicit status.
    pub fn with_status(id: PetId, name: impl Into<String>, status: PetStatus) -> Self {
        Self {
            id,
            name: name.into(),
            status,
            adopted_by: None,
            adoption_date: None,
        }
    }

    /// Stable pet identifier.
    pub fn id(&self) -> &PetId {
        &self.id
    }

    /// Display name.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Current adoption status.
    pub fn status(&self) -> PetStatus {
        self.status
    }

    /// The adopter, once adopted.
    pub fn adopted_by(&self) -> Option<&UserId> {
        self.adopted_by.as_ref()
    }

    /// When the adoption completed.
    pub fn adoption_date(&self) -> Option<DateTime<Utc>> {
        self.adoption_date
    }

    /// Whether new adoption requests may target this pet.
    pub fn is_available(&self) -> bool {
        self.status == PetStatus::Available
    }

    /// Record the approval side effect on this pet.
    pub fn mark_adopted(&mut self, adopter: UserId, when: DateTime<Utc>) {
        self.status = PetStatus::Adopted;
        self.adopted_by = Some(adopter);
        self.adoption_date = Some(when);
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use chrono::Utc;

    use super::*;

    #[test]
    fn available_pet_accepts_requests() {
        let pet = Pet::available(PetId::random(), "Biscuit");
        assert!(pet.is_available());
        assert!(pet.adopted_by().is_none());
    }

    #[test]
    fn mark_adopted_records_adopter_and_date() {
        let mut pet = Pet::available(PetId::random(), "Biscuit");
        let adopter = UserId::random();
        let when = Utc::now();

        pet.mark_adopted(adopter, when);

        assert_eq!(pet.status(), PetStatus::Adopted);
        assert!(!pet.is_available());
        assert_eq!(pet.adopted_by(), Some(&adopter));
        assert_eq!(pet.adoption_date(), Some(when));
    }

    #[test]
    fn non_available_statuses_refuse_requests() {
        let pet = Pet::with_status(PetId::random(), "Biscuit", PetStatus::Pending);
        assert!(!pet.is_available());
    }
}
