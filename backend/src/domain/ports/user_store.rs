//! Driven port for the external user store.
//!
//! The lifecycle touches user records in exactly one way: appending an
//! adoption-history entry when a request is approved. Entries are
//! append-only and never rewritten.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{PetId, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by user store adapters.
    pub enum UserStoreError {
        /// Store connection could not be established.
        Connection { message: String } =>
            "user store connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "user store query failed: {message}",
    }
}

/// Completion state of an adoption-history entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AdoptionHistoryStatus {
    Completed,
}

/// A single entry in a user's adoption history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdoptionHistoryEntry {
    pub pet: PetId,
    pub adoption_date: DateTime<Utc>,
    pub status: AdoptionHistoryStatus,
}

/// Port for appending to a user's adoption history.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Append a `completed` adoption-history entry for `pet_id` at `when`.
    async fn append_adoption_history(
        &self,
        user_id: &UserId,
        pet_id: &PetId,
        when: DateTime<Utc>,
    ) -> Result<(), UserStoreError>;
}

/// Fixture implementation for tests that do not exercise user history.
///
/// # Examples
/// ```
/// use backend::domain::ports::{FixtureUserStore, UserStore};
/// use backend::domain::{PetId, UserId};
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// FixtureUserStore
///     .append_adoption_history(&UserId::random(), &PetId::random(), chrono::Utc::now())
///     .await
///     .expect("fixture append");
/// # });
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureUserStore;

#[async_trait]
impl UserStore for FixtureUserStore {
    async fn append_adoption_history(
        &self,
        _user_id: &UserId,
        _pet_id: &PetId,
        _when: DateTime<Utc>,
    ) -> Result<(), UserStoreError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;

    #[test]
    fn connection_error_formats_message() {
        let err = UserStoreError::connection("pool exhausted");
        assert!(err.to_string().contains("pool exhausted"));
    }

    #[test]
    fn history_entry_serializes_camel_case() {
        let entry = AdoptionHistoryEntry {
            pet: PetId::random(),
            adoption_date: Utc::now(),
            status: AdoptionHistoryStatus::Completed,
        };
        let json = serde_json::to_value(&entry).expect("serialize entry");
        assert_eq!(json["status"], "completed");
        assert!(json.get("adoptionDate").is_some());
    }
}
