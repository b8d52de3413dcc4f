//! In-memory adapter for the three driven ports.
//!
//! Backs pets, adoption requests, and adoption histories with one mutex-held
//! state block, so every port call observes and mutates a consistent
//! snapshot. In particular `create` checks the pending-uniqueness constraint
//! and inserts under the same lock, and `reject_pending_siblings` rewrites
//! all matching requests in one critical section.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::ports::{
    AdoptionHistoryEntry, AdoptionHistoryStatus, AdoptionRequestRepository,
    AdoptionRequestRepositoryError, PetStore, PetStoreError, UserStore, UserStoreError,
};
use crate::domain::{AdoptionRequest, Pet, PetId, RequestStatus, UserId};

#[derive(Debug, Default)]
struct StoreState {
    pets: HashMap<PetId, Pet>,
    requests: HashMap<Uuid, AdoptionRequest>,
    history: HashMap<UserId, Vec<AdoptionHistoryEntry>>,
}

/// Shared in-memory store implementing every driven port.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Mutex<StoreState>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn locked(&self) -> MutexGuard<'_, StoreState> {
        // The state stays consistent even if a panic interrupted a holder,
        // since every mutation completes within one critical section.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Seed or replace a pet record.
    pub fn insert_pet(&self, pet: Pet) {
        self.locked().pets.insert(*pet.id(), pet);
    }

    /// Read back a pet record.
    pub fn pet(&self, pet_id: &PetId) -> Option<Pet> {
        self.locked().pets.get(pet_id).cloned()
    }

    /// Read back a user's adoption history, oldest entry first.
    pub fn adoption_history_for(&self, user_id: &UserId) -> Vec<AdoptionHistoryEntry> {
        self.locked()
            .history
            .get(user_id)
            .cloned()
            .unwrap_or_default()
    }
}

fn newest_first(requests: &mut [AdoptionRequest]) {
    requests.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
}

#[async_trait]
impl PetStore for MemoryStore {
    async fn find_by_id(&self, pet_id: &PetId) -> Result<Option<Pet>, PetStoreError> {
        Ok(self.locked().pets.get(pet_id).cloned())
    }

    async fn mark_adopted(
        &self,
        pet_id: &PetId,
        adopter: &UserId,
        when: DateTime<Utc>,
    ) -> Result<(), PetStoreError> {
        let mut state = self.locked();
        let pet = state
            .pets
            .get_mut(pet_id)
            .ok_or_else(|| PetStoreError::missing(pet_id.to_string()))?;
        pet.mark_adopted(*adopter, when);
        Ok(())
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn append_adoption_history(
        &self,
        user_id: &UserId,
        pet_id: &PetId,
        when: DateTime<Utc>,
    ) -> Result<(), UserStoreError> {
        self.locked()
            .history
            .entry(*user_id)
            .or_default()
            .push(AdoptionHistoryEntry {
                pet: *pet_id,
                adoption_date: when,
                status: AdoptionHistoryStatus::Completed,
            });
        Ok(())
    }
}

#[async_trait]
impl AdoptionRequestRepository for MemoryStore {
    async fn create(
        &self,
        request: &AdoptionRequest,
    ) -> Result<(), AdoptionRequestRepositoryError> {
        let mut state = self.locked();
        let duplicate = state.requests.values().any(|existing| {
            existing.requester() == request.requester()
                && existing.pet() == request.pet()
                && existing.status() == RequestStatus::Pending
        });
        if duplicate {
            return Err(AdoptionRequestRepositoryError::duplicate_pending());
        }
        state.requests.insert(request.id(), request.clone());
        Ok(())
    }

    async fn find_by_id(
        &self,
        request_id: Uuid,
    ) -> Result<Option<AdoptionRequest>, AdoptionRequestRepositoryError> {
        Ok(self.locked().requests.get(&request_id).cloned())
    }

    async fn find_pending_for(
        &self,
        user_id: &UserId,
        pet_id: &PetId,
    ) -> Result<Option<AdoptionRequest>, AdoptionRequestRepositoryError> {
        Ok(self
            .locked()
            .requests
            .values()
            .find(|request| {
                request.requester() == user_id
                    && request.pet() == pet_id
                    && request.status() == RequestStatus::Pending
            })
            .cloned())
    }

    async fn save(&self, request: &AdoptionRequest) -> Result<(), AdoptionRequestRepositoryError> {
        let mut state = self.locked();
        if !state.requests.contains_key(&request.id()) {
            return Err(AdoptionRequestRepositoryError::query(format!(
                "request {} does not exist",
                request.id()
            )));
        }
        state.requests.insert(request.id(), request.clone());
        Ok(())
    }

    async fn reject_pending_siblings(
        &self,
        pet_id: &PetId,
        excluding: Uuid,
        reviewer: &UserId,
        when: DateTime<Utc>,
    ) -> Result<usize, AdoptionRequestRepositoryError> {
        let mut state = self.locked();
        let mut rejected = 0;
        for request in state.requests.values_mut() {
            if request.pet() == pet_id
                && request.id() != excluding
                && request.status() == RequestStatus::Pending
            {
                request.reject_as_sibling(*reviewer, when);
                rejected += 1;
            }
        }
        Ok(rejected)
    }

    async fn list_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<AdoptionRequest>, AdoptionRequestRepositoryError> {
        let mut requests: Vec<_> = self
            .locked()
            .requests
            .values()
            .filter(|request| request.requester() == user_id)
            .cloned()
            .collect();
        newest_first(&mut requests);
        Ok(requests)
    }

    async fn list_all(
        &self,
        status: Option<RequestStatus>,
    ) -> Result<Vec<AdoptionRequest>, AdoptionRequestRepositoryError> {
        let mut requests: Vec<_> = self
            .locked()
            .requests
            .values()
            .filter(|request| status.is_none_or(|wanted| request.status() == wanted))
            .cloned()
            .collect();
        newest_first(&mut requests);
        Ok(requests)
    }
}

#[cfg(test)]
mod tests {
    //! End-to-end lifecycle coverage over the in-memory adapter.
    use std::sync::Arc;

    use chrono::{DateTime, Local, TimeZone};
    use mockable::Clock;

    use crate::domain::ports::{
        AdoptionCommand, AdoptionQuery, ApplicationPayload, ListAllAdoptionRequests,
        ReviewAdoptionRequest, SubmitAdoptionRequest, WithdrawAdoptionRequest,
    };
    use crate::domain::{
        AdoptionCommandService, AdoptionQueryService, ErrorCode, ExperienceLevel, Housing,
        OtherPets, PetStatus, ReviewDecision, SIBLING_REJECTION_NOTE,
    };

    use super::*;

    struct FixedClock(DateTime<Utc>);

    impl Clock for FixedClock {
        fn local(&self) -> DateTime<Local> {
            self.0.with_timezone(&Local)
        }

        fn utc(&self) -> DateTime<Utc> {
            self.0
        }
    }

    fn fixture_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 14, 9, 30, 0)
            .single()
            .expect("valid fixture timestamp")
    }

    fn lifecycle(
        store: &Arc<MemoryStore>,
    ) -> (
        AdoptionCommandService<MemoryStore, MemoryStore, MemoryStore>,
        AdoptionQueryService<MemoryStore>,
    ) {
        let commands = AdoptionCommandService::new(
            store.clone(),
            store.clone(),
            store.clone(),
            Arc::new(FixedClock(fixture_now())),
        );
        let queries = AdoptionQueryService::new(store.clone());
        (commands, queries)
    }

    fn application() -> ApplicationPayload {
        ApplicationPayload {
            message: "We have a quiet home and plenty of time for walks.".to_owned(),
            experience: ExperienceLevel::Experienced,
            housing: Housing::HouseYard,
            other_pets: OtherPets::None,
            work_schedule: None,
            references: vec![],
        }
    }

    async fn submit(
        commands: &AdoptionCommandService<MemoryStore, MemoryStore, MemoryStore>,
        requester: UserId,
        pet_id: PetId,
    ) -> crate::domain::ports::AdoptionRequestPayload {
        commands
            .submit(SubmitAdoptionRequest {
                requester,
                pet_id,
                application: application(),
            })
            .await
            .expect("submission succeeds")
    }

    #[tokio::test]
    async fn second_pending_request_for_the_same_pair_conflicts() {
        let store = Arc::new(MemoryStore::new());
        let pet_id = PetId::random();
        store.insert_pet(Pet::available(pet_id, "Biscuit"));
        let (commands, _) = lifecycle(&store);
        let requester = UserId::random();

        submit(&commands, requester, pet_id).await;
        let err = commands
            .submit(SubmitAdoptionRequest {
                requester,
                pet_id,
                application: application(),
            })
            .await
            .expect_err("duplicate pending is rejected");

        assert_eq!(err.code(), ErrorCode::Conflict);
    }

    #[tokio::test]
    async fn withdrawing_frees_the_pair_for_a_new_request() {
        let store = Arc::new(MemoryStore::new());
        let pet_id = PetId::random();
        store.insert_pet(Pet::available(pet_id, "Biscuit"));
        let (commands, _) = lifecycle(&store);
        let requester = UserId::random();

        let first = submit(&commands, requester, pet_id).await;
        commands
            .withdraw(WithdrawAdoptionRequest {
                request_id: first.id,
                requester,
            })
            .await
            .expect("withdrawal succeeds");

        let second = submit(&commands, requester, pet_id).await;
        assert_ne!(second.id, first.id);
        assert_eq!(second.status, RequestStatus::Pending);
    }

    #[tokio::test]
    async fn approval_cascades_to_pet_history_and_siblings() {
        let store = Arc::new(MemoryStore::new());
        let pet_id = PetId::random();
        store.insert_pet(Pet::available(pet_id, "Biscuit"));
        let (commands, queries) = lifecycle(&store);
        let winner = UserId::random();
        let rival = UserId::random();
        let reviewer = UserId::random();

        let winning = submit(&commands, winner, pet_id).await;
        let rival_request = submit(&commands, rival, pet_id).await;

        let approved = commands
            .review(ReviewAdoptionRequest {
                request_id: winning.id,
                reviewer,
                decision: ReviewDecision::Approved,
                notes: Some("Lovely garden.".to_owned()),
            })
            .await
            .expect("approval succeeds");
        assert_eq!(approved.status, RequestStatus::Approved);

        let pet = store.pet(&pet_id).expect("pet exists");
        assert_eq!(pet.status(), PetStatus::Adopted);
        assert_eq!(pet.adopted_by(), Some(&winner));
        assert_eq!(pet.adoption_date(), Some(fixture_now()));

        let history = store.adoption_history_for(&winner);
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].pet, pet_id);
        assert_eq!(history[0].status, AdoptionHistoryStatus::Completed);

        let rejected = queries
            .get_request(crate::domain::ports::GetAdoptionRequest {
                request_id: rival_request.id,
                caller: rival,
                caller_is_reviewer: false,
            })
            .await
            .expect("rival reads their request");
        assert_eq!(rejected.status, RequestStatus::Rejected);
        assert_eq!(rejected.review_notes.as_deref(), Some(SIBLING_REJECTION_NOTE));
        assert_eq!(rejected.reviewed_by, Some(reviewer));
    }

    #[tokio::test]
    async fn rejection_leaves_the_pet_available() {
        let store = Arc::new(MemoryStore::new());
        let pet_id = PetId::random();
        store.insert_pet(Pet::available(pet_id, "Biscuit"));
        let (commands, _) = lifecycle(&store);

        let request = submit(&commands, UserId::random(), pet_id).await;
        commands
            .review(ReviewAdoptionRequest {
                request_id: request.id,
                reviewer: UserId::random(),
                decision: ReviewDecision::Rejected,
                notes: None,
            })
            .await
            .expect("rejection succeeds");

        let pet = store.pet(&pet_id).expect("pet exists");
        assert_eq!(pet.status(), PetStatus::Available);
        assert!(store.adoption_history_for(&UserId::random()).is_empty());
    }

    #[tokio::test]
    async fn approved_requests_cannot_be_withdrawn() {
        let store = Arc::new(MemoryStore::new());
        let pet_id = PetId::random();
        store.insert_pet(Pet::available(pet_id, "Biscuit"));
        let (commands, _) = lifecycle(&store);
        let requester = UserId::random();

        let request = submit(&commands, requester, pet_id).await;
        commands
            .review(ReviewAdoptionRequest {
                request_id: request.id,
                reviewer: UserId::random(),
                decision: ReviewDecision::Approved,
                notes: None,
            })
            .await
            .expect("approval succeeds");

        let err = commands
            .withdraw(WithdrawAdoptionRequest {
                request_id: request.id,
                requester,
            })
            .await
            .expect_err("approved request cannot be withdrawn");

        assert_eq!(err.code(), ErrorCode::Conflict);
    }

    #[tokio::test]
    async fn submitting_against_an_adopted_pet_conflicts() {
        let store = Arc::new(MemoryStore::new());
        let pet_id = PetId::random();
        store.insert_pet(Pet::available(pet_id, "Biscuit"));
        let (commands, _) = lifecycle(&store);

        let winning = submit(&commands, UserId::random(), pet_id).await;
        commands
            .review(ReviewAdoptionRequest {
                request_id: winning.id,
                reviewer: UserId::random(),
                decision: ReviewDecision::Approved,
                notes: None,
            })
            .await
            .expect("approval succeeds");

        let err = commands
            .submit(SubmitAdoptionRequest {
                requester: UserId::random(),
                pet_id,
                application: application(),
            })
            .await
            .expect_err("adopted pet refuses new requests");

        assert_eq!(err.code(), ErrorCode::Conflict);
    }

    #[tokio::test]
    async fn list_all_filters_by_status() {
        let store = Arc::new(MemoryStore::new());
        let first_pet = PetId::random();
        let second_pet = PetId::random();
        store.insert_pet(Pet::available(first_pet, "Biscuit"));
        store.insert_pet(Pet::available(second_pet, "Clover"));
        let (commands, queries) = lifecycle(&store);

        let decided = submit(&commands, UserId::random(), first_pet).await;
        submit(&commands, UserId::random(), second_pet).await;
        commands
            .review(ReviewAdoptionRequest {
                request_id: decided.id,
                reviewer: UserId::random(),
                decision: ReviewDecision::Rejected,
                notes: None,
            })
            .await
            .expect("rejection succeeds");

        let pending = queries
            .list_all(ListAllAdoptionRequests {
                status: Some(RequestStatus::Pending),
            })
            .await
            .expect("filtered listing succeeds");
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].pet, second_pet);

        let everything = queries
            .list_all(ListAllAdoptionRequests { status: None })
            .await
            .expect("unfiltered listing succeeds");
        assert_eq!(everything.len(), 2);
    }

    #[tokio::test]
    async fn missing_pet_cannot_be_marked_adopted() {
        let store = MemoryStore::new();
        let err = store
            .mark_adopted(&PetId::random(), &UserId::random(), fixture_now())
            .await
            .expect_err("unknown pet is an error");
        assert!(matches!(err, PetStoreError::Missing { .. }));
    }
}
