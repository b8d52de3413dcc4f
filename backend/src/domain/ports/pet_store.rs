//! Driven port for the external pet store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{Pet, PetId, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by pet store adapters.
    pub enum PetStoreError {
        /// Store connection could not be established.
        Connection { message: String } =>
            "pet store connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "pet store query failed: {message}",
        /// A mutation targeted a pet that no longer exists.
        Missing { pet_id: String } =>
            "pet {pet_id} does not exist",
    }
}

/// Port for reading pet availability and recording adoptions.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PetStore: Send + Sync {
    /// Look up a pet by id.
    async fn find_by_id(&self, pet_id: &PetId) -> Result<Option<Pet>, PetStoreError>;

    /// Mark a pet adopted by `adopter` at `when`.
    async fn mark_adopted(
        &self,
        pet_id: &PetId,
        adopter: &UserId,
        when: DateTime<Utc>,
    ) -> Result<(), PetStoreError>;
}

/// Fixture implementation for tests that do not exercise pet reads.
///
/// # Examples
/// ```
/// use backend::domain::ports::{FixturePetStore, PetStore};
/// use backend::domain::PetId;
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let found = FixturePetStore.find_by_id(&PetId::random()).await.expect("fixture lookup");
/// assert!(found.is_none());
/// # });
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct FixturePetStore;

#[async_trait]
impl PetStore for FixturePetStore {
    async fn find_by_id(&self, _pet_id: &PetId) -> Result<Option<Pet>, PetStoreError> {
        Ok(None)
    }

    async fn mark_adopted(
        &self,
        _pet_id: &PetId,
        _adopter: &UserId,
        _when: DateTime<Utc>,
    ) -> Result<(), PetStoreError> {
        Ok(())
    }
}
