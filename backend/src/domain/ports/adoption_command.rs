//! Driving port for adoption request mutations.
//!
//! Covers the three lifecycle operations: submit, review, withdraw. Caller
//! identity is always an explicit parameter; nothing is read from ambient
//! context.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{
    AdoptionRequest, Error, ExperienceLevel, Housing, OtherPets, PetId, Reference, RequestStatus,
    ReviewDecision, UserId,
};

/// Serializable reference payload for driving ports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferencePayload {
    pub name: String,
    pub phone: String,
    pub relationship: String,
}

impl From<&Reference> for ReferencePayload {
    fn from(value: &Reference) -> Self {
        Self {
            name: value.name().to_owned(),
            phone: value.phone().to_owned(),
            relationship: value.relationship().to_owned(),
        }
    }
}

/// The applicant-supplied portion of a new adoption request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationPayload {
    pub message: String,
    pub experience: ExperienceLevel,
    pub housing: Housing,
    pub other_pets: OtherPets,
    pub work_schedule: Option<String>,
    pub references: Vec<ReferencePayload>,
}

/// Request to submit a new adoption application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitAdoptionRequest {
    pub requester: UserId,
    pub pet_id: PetId,
    pub application: ApplicationPayload,
}

/// Request to decide a pending adoption request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewAdoptionRequest {
    pub request_id: Uuid,
    pub reviewer: UserId,
    pub decision: ReviewDecision,
    pub notes: Option<String>,
}

/// Request to withdraw one's own pending adoption request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WithdrawAdoptionRequest {
    pub request_id: Uuid,
    pub requester: UserId,
}

/// Serializable snapshot of an adoption request for driving ports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdoptionRequestPayload {
    pub id: Uuid,
    pub requester: UserId,
    pub pet: PetId,
    pub message: String,
    pub experience: ExperienceLevel,
    pub housing: Housing,
    pub other_pets: OtherPets,
    pub work_schedule: Option<String>,
    pub references: Vec<ReferencePayload>,
    pub status: RequestStatus,
    pub reviewed_by: Option<UserId>,
    pub review_date: Option<DateTime<Utc>>,
    pub review_notes: Option<String>,
    pub meeting_scheduled: Option<DateTime<Utc>>,
    pub meeting_notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<AdoptionRequest> for AdoptionRequestPayload {
    fn from(value: AdoptionRequest) -> Self {
        Self {
            id: value.id(),
            requester: *value.requester(),
            pet: *value.pet(),
            message: value.message().to_owned(),
            experience: value.experience(),
            housing: value.housing(),
            other_pets: value.other_pets(),
            work_schedule: value.work_schedule().map(str::to_owned),
            references: value.references().iter().map(ReferencePayload::from).collect(),
            status: value.status(),
            reviewed_by: value.reviewed_by().copied(),
            review_date: value.review_date(),
            review_notes: value.review_notes().map(str::to_owned),
            meeting_scheduled: value.meeting_scheduled(),
            meeting_notes: value.meeting_notes().map(str::to_owned),
            created_at: value.created_at(),
            updated_at: value.updated_at(),
        }
    }
}

/// Driving port for adoption request write operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AdoptionCommand: Send + Sync {
    /// Submit a new application against an available pet.
    ///
    /// Fails with `NotFound` when the pet does not exist, `Conflict` when
    /// the pet is unavailable or a pending duplicate exists, and
    /// `InvalidRequest` when a field constraint is violated.
    async fn submit(&self, request: SubmitAdoptionRequest)
        -> Result<AdoptionRequestPayload, Error>;

    /// Decide a pending request. Approval triggers the cascade: the pet is
    /// marked adopted, the adopter's history grows one entry, and every
    /// sibling pending request is rejected with the fixed system note.
    async fn review(&self, request: ReviewAdoptionRequest)
        -> Result<AdoptionRequestPayload, Error>;

    /// Withdraw one's own pending request.
    async fn withdraw(
        &self,
        request: WithdrawAdoptionRequest,
    ) -> Result<AdoptionRequestPayload, Error>;
}
