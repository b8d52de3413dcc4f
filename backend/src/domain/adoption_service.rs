//! Domain services implementing the adoption lifecycle use-cases.
//!
//! [`AdoptionCommandService`] drives the three mutations (submit, review,
//! withdraw) against the driven ports; [`AdoptionQueryService`] serves reads.
//! All timestamps come from the injected [`Clock`] so tests can pin time.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::json;
use tracing::info;
use uuid::Uuid;

use crate::domain::ports::{
    AdoptionCommand, AdoptionQuery, AdoptionRequestPayload, AdoptionRequestRepository,
    AdoptionRequestRepositoryError, GetAdoptionRequest, ListAdoptionRequestsForUser,
    ListAllAdoptionRequests, PetStore, PetStoreError, ReviewAdoptionRequest,
    SubmitAdoptionRequest, UserStore, UserStoreError, WithdrawAdoptionRequest,
};
use crate::domain::{
    adoption::validate_review_notes, AdoptionRequest, AdoptionRequestDraft,
    AdoptionValidationError, Error, ReferenceDraft, RequestStatus, ReviewDecision,
};

/// Implements the write side of the adoption lifecycle.
pub struct AdoptionCommandService<R, P, U>
where
    R: AdoptionRequestRepository,
    P: PetStore,
    U: UserStore,
{
    request_repo: Arc<R>,
    pet_store: Arc<P>,
    user_store: Arc<U>,
    clock: Arc<dyn Clock>,
}

impl<R, P, U> AdoptionCommandService<R, P, U>
where
    R: AdoptionRequestRepository,
    P: PetStore,
    U: UserStore,
{
    /// Create a service backed by the given stores and clock.
    pub fn new(
        request_repo: Arc<R>,
        pet_store: Arc<P>,
        user_store: Arc<U>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            request_repo,
            pet_store,
            user_store,
            clock,
        }
    }

    async fn load_request(&self, request_id: Uuid) -> Result<AdoptionRequest, Error> {
        self.request_repo
            .find_by_id(request_id)
            .await
            .map_err(repository_error)?
            .ok_or_else(|| Error::not_found("adoption request not found"))
    }
}

#[async_trait]
impl<R, P, U> AdoptionCommand for AdoptionCommandService<R, P, U>
where
    R: AdoptionRequestRepository,
    P: PetStore,
    U: UserStore,
{
    async fn submit(
        &self,
        request: SubmitAdoptionRequest,
    ) -> Result<AdoptionRequestPayload, Error> {
        let pet = self
            .pet_store
            .find_by_id(&request.pet_id)
            .await
            .map_err(pet_store_error)?
            .ok_or_else(|| Error::not_found("pet not found"))?;
        if !pet.is_available() {
            return Err(Error::conflict(format!(
                "pet is not available for adoption (status: {})",
                pet.status()
            )));
        }

        // Early duplicate check for a friendly error; the repository's
        // uniqueness constraint in `create` is what actually holds under
        // concurrent submissions.
        let existing = self
            .request_repo
            .find_pending_for(&request.requester, &request.pet_id)
            .await
            .map_err(repository_error)?;
        if existing.is_some() {
            return Err(duplicate_pending_error());
        }

        let application = request.application;
        let record = AdoptionRequest::new(AdoptionRequestDraft {
            id: Uuid::new_v4(),
            requester: request.requester,
            pet: request.pet_id,
            message: application.message,
            experience: application.experience,
            housing: application.housing,
            other_pets: application.other_pets,
            work_schedule: application.work_schedule,
            references: application
                .references
                .into_iter()
                .map(|reference| ReferenceDraft {
                    name: reference.name,
                    phone: reference.phone,
                    relationship: reference.relationship,
                })
                .collect(),
            created_at: self.clock.utc(),
        })
        .map_err(validation_error)?;

        match self.request_repo.create(&record).await {
            Ok(()) => {}
            Err(AdoptionRequestRepositoryError::DuplicatePending) => {
                return Err(duplicate_pending_error());
            }
            Err(err) => return Err(repository_error(err)),
        }

        info!(
            request_id = %record.id(),
            requester = %record.requester(),
            pet = %record.pet(),
            "adoption request submitted"
        );
        Ok(record.into())
    }

    async fn review(
        &self,
        request: ReviewAdoptionRequest,
    ) -> Result<AdoptionRequestPayload, Error> {
        if let Some(notes) = &request.notes {
            validate_review_notes(notes).map_err(validation_error)?;
        }

        let mut record = self.load_request(request.request_id).await?;
        let now = self.clock.utc();
        record
            .review(request.reviewer, request.decision, request.notes, now)
            .map_err(|err| Error::conflict(err.to_string()))?;
        self.request_repo
            .save(&record)
            .await
            .map_err(repository_error)?;

        if request.decision == ReviewDecision::Approved {
            self.pet_store
                .mark_adopted(record.pet(), record.requester(), now)
                .await
                .map_err(pet_store_error)?;
            self.user_store
                .append_adoption_history(record.requester(), record.pet(), now)
                .await
                .map_err(user_store_error)?;
            let rejected = self
                .request_repo
                .reject_pending_siblings(record.pet(), record.id(), &request.reviewer, now)
                .await
                .map_err(repository_error)?;
            info!(
                request_id = %record.id(),
                pet = %record.pet(),
                adopter = %record.requester(),
                rejected_siblings = rejected,
                "adoption request approved"
            );
        } else {
            info!(request_id = %record.id(), "adoption request rejected");
        }

        Ok(record.into())
    }

    async fn withdraw(
        &self,
        request: WithdrawAdoptionRequest,
    ) -> Result<AdoptionRequestPayload, Error> {
        let mut record = self.load_request(request.request_id).await?;
        if record.requester() != &request.requester {
            return Err(Error::forbidden(
                "only the requester can withdraw this request",
            ));
        }
        record
            .withdraw(self.clock.utc())
            .map_err(|err| Error::conflict(err.to_string()))?;
        self.request_repo
            .save(&record)
            .await
            .map_err(repository_error)?;

        info!(request_id = %record.id(), "adoption request withdrawn");
        Ok(record.into())
    }
}

/// Implements the read side of the adoption lifecycle.
pub struct AdoptionQueryService<R>
where
    R: AdoptionRequestRepository,
{
    request_repo: Arc<R>,
}

impl<R> AdoptionQueryService<R>
where
    R: AdoptionRequestRepository,
{
    /// Create a query service over the given repository.
    pub fn new(request_repo: Arc<R>) -> Self {
        Self { request_repo }
    }
}

#[async_trait]
impl<R> AdoptionQuery for AdoptionQueryService<R>
where
    R: AdoptionRequestRepository,
{
    async fn get_request(
        &self,
        request: GetAdoptionRequest,
    ) -> Result<AdoptionRequestPayload, Error> {
        let record = self
            .request_repo
            .find_by_id(request.request_id)
            .await
            .map_err(repository_error)?
            .ok_or_else(|| Error::not_found("adoption request not found"))?;
        if record.requester() != &request.caller && !request.caller_is_reviewer {
            return Err(Error::forbidden("access denied"));
        }
        Ok(record.into())
    }

    async fn list_for_user(
        &self,
        request: ListAdoptionRequestsForUser,
    ) -> Result<Vec<AdoptionRequestPayload>, Error> {
        let records = self
            .request_repo
            .list_for_user(&request.user_id)
            .await
            .map_err(repository_error)?;
        Ok(records.into_iter().map(Into::into).collect())
    }

    async fn list_all(
        &self,
        request: ListAllAdoptionRequests,
    ) -> Result<Vec<AdoptionRequestPayload>, Error> {
        let records = self
            .request_repo
            .list_all(request.status)
            .await
            .map_err(repository_error)?;
        Ok(records.into_iter().map(Into::into).collect())
    }
}

fn duplicate_pending_error() -> Error {
    Error::conflict("you already have a pending request for this pet")
        .with_details(json!({ "status": RequestStatus::Pending }))
}

fn validation_error(err: AdoptionValidationError) -> Error {
    Error::invalid_request(err.to_string()).with_details(json!({ "field": err.field() }))
}

fn repository_error(err: AdoptionRequestRepositoryError) -> Error {
    match err {
        AdoptionRequestRepositoryError::Connection { .. } => {
            Error::service_unavailable("adoption request store is unavailable")
        }
        AdoptionRequestRepositoryError::Query { .. }
        | AdoptionRequestRepositoryError::DuplicatePending => {
            Error::internal("adoption request store operation failed")
        }
    }
}

fn pet_store_error(err: PetStoreError) -> Error {
    match err {
        PetStoreError::Connection { .. } => Error::service_unavailable("pet store is unavailable"),
        PetStoreError::Query { .. } | PetStoreError::Missing { .. } => {
            Error::internal("pet store operation failed")
        }
    }
}

fn user_store_error(err: UserStoreError) -> Error {
    match err {
        UserStoreError::Connection { .. } => {
            Error::service_unavailable("user store is unavailable")
        }
        UserStoreError::Query { .. } => Error::internal("user store operation failed"),
    }
}

#[cfg(test)]
#[path = "adoption_service_tests.rs"]
mod tests;
