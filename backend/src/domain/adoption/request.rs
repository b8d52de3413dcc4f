//! The adoption request entity and its state machine.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::ids::{PetId, UserId};

use super::{
    AdoptionValidationError, ExperienceLevel, Housing, OtherPets, RequestStatus,
    RequestTransitionError, ReviewDecision, SIBLING_REJECTION_NOTE,
};

/// A validated personal reference attached to an application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    pub(super) name: String,
    pub(super) phone: String,
    pub(super) relationship: String,
}

impl Reference {
    /// The reference's name.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// The reference's phone number.
    pub fn phone(&self) -> &str {
        self.phone.as_str()
    }

    /// How the reference knows the applicant.
    pub fn relationship(&self) -> &str {
        self.relationship.as_str()
    }
}

/// Unvalidated input for constructing an [`AdoptionRequest`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdoptionRequestDraft {
    pub id: Uuid,
    pub requester: UserId,
    pub pet: PetId,
    pub message: String,
    pub experience: ExperienceLevel,
    pub housing: Housing,
    pub other_pets: OtherPets,
    pub work_schedule: Option<String>,
    pub references: Vec<super::ReferenceDraft>,
    pub created_at: DateTime<Utc>,
}

/// A formal application by a user to adopt a specific pet.
///
/// ## Invariants
/// - Created `pending` with review metadata unset.
/// - Mutated only through [`AdoptionRequest::review`],
///   [`AdoptionRequest::withdraw`], or the approval cascade's
///   [`AdoptionRequest::reject_as_sibling`]; all of these require the current
///   status to be `pending`.
/// - Never physically deleted in normal operation.
#[derive(Debug, Clone, PartialEq)]
pub struct AdoptionRequest {
    pub(super) id: Uuid,
    pub(super) requester: UserId,
    pub(super) pet: PetId,
    pub(super) message: String,
    pub(super) experience: ExperienceLevel,
    pub(super) housing: Housing,
    pub(super) other_pets: OtherPets,
    pub(super) work_schedule: Option<String>,
    pub(super) references: Vec<Reference>,
    pub(super) status: RequestStatus,
    pub(super) reviewed_by: Option<UserId>,
    pub(super) review_date: Option<DateTime<Utc>>,
    pub(super) review_notes: Option<String>,
    pub(super) meeting_scheduled: Option<DateTime<Utc>>,
    pub(super) meeting_notes: Option<String>,
    pub(super) created_at: DateTime<Utc>,
    pub(super) updated_at: DateTime<Utc>,
}

impl AdoptionRequest {
    /// Validate a draft into a pending request.
    ///
    /// # Examples
    /// ```
    /// use backend::domain::{
    ///     AdoptionRequest, AdoptionRequestDraft, ExperienceLevel, Housing, OtherPets, PetId,
    ///     RequestStatus, UserId,
    /// };
    ///
    /// let request = AdoptionRequest::new(AdoptionRequestDraft {
    ///     id: uuid::Uuid::new_v4(),
    ///     requester: UserId::random(),
    ///     pet: PetId::random(),
    ///     message: "We have a quiet home and a large garden.".to_owned(),
    ///     experience: ExperienceLevel::Some,
    ///     housing: Housing::HouseYard,
    ///     other_pets: OtherPets::None,
    ///     work_schedule: None,
    ///     references: vec![],
    ///     created_at: chrono::Utc::now(),
    /// })
    /// .expect("valid draft");
    /// assert_eq!(request.status(), RequestStatus::Pending);
    /// ```
    pub fn new(draft: AdoptionRequestDraft) -> Result<Self, AdoptionValidationError> {
        Self::try_from(draft)
    }

    /// Unique identifier of this request.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// The applicant.
    pub fn requester(&self) -> &UserId {
        &self.requester
    }

    /// The pet this application targets.
    pub fn pet(&self) -> &PetId {
        &self.pet
    }

    /// The applicant's free-text message.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// The applicant's experience level.
    pub fn experience(&self) -> ExperienceLevel {
        self.experience
    }

    /// The applicant's housing situation.
    pub fn housing(&self) -> Housing {
        self.housing
    }

    /// Other animals in the applicant's home.
    pub fn other_pets(&self) -> OtherPets {
        self.other_pets
    }

    /// Optional description of the applicant's work schedule.
    pub fn work_schedule(&self) -> Option<&str> {
        self.work_schedule.as_deref()
    }

    /// Personal references, in the order supplied.
    pub fn references(&self) -> &[Reference] {
        self.references.as_slice()
    }

    /// Current lifecycle status.
    pub fn status(&self) -> RequestStatus {
        self.status
    }

    /// Reviewer who decided this request, if decided.
    pub fn reviewed_by(&self) -> Option<&UserId> {
        self.reviewed_by.as_ref()
    }

    /// When the request was decided.
    pub fn review_date(&self) -> Option<DateTime<Utc>> {
        self.review_date
    }

    /// Notes recorded by the reviewer.
    pub fn review_notes(&self) -> Option<&str> {
        self.review_notes.as_deref()
    }

    /// When a meet-and-greet was scheduled, if any.
    pub fn meeting_scheduled(&self) -> Option<DateTime<Utc>> {
        self.meeting_scheduled
    }

    /// Notes from the meet-and-greet, if any.
    pub fn meeting_notes(&self) -> Option<&str> {
        self.meeting_notes.as_deref()
    }

    /// When the request was created.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// When the request was last modified.
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Apply a reviewer's decision to a pending request.
    ///
    /// Omitted notes leave any prior notes unchanged. Callers are expected to
    /// have validated the notes' length beforehand.
    pub fn review(
        &mut self,
        reviewer: UserId,
        decision: ReviewDecision,
        notes: Option<String>,
        now: DateTime<Utc>,
    ) -> Result<(), RequestTransitionError> {
        self.require_pending()?;
        self.status = decision.into();
        self.reviewed_by = Some(reviewer);
        self.review_date = Some(now);
        if let Some(notes) = notes {
            self.review_notes = Some(notes);
        }
        self.updated_at = now;
        Ok(())
    }

    /// Withdraw a pending request. Terminal; no side effects on the pet.
    pub fn withdraw(&mut self, now: DateTime<Utc>) -> Result<(), RequestTransitionError> {
        self.require_pending()?;
        self.status = RequestStatus::Withdrawn;
        self.updated_at = now;
        Ok(())
    }

    /// Reject this request because a rival request on the same pet was
    /// approved. Stamps the fixed system note.
    pub fn reject_as_sibling(&mut self, reviewer: UserId, now: DateTime<Utc>) {
        self.status = RequestStatus::Rejected;
        self.reviewed_by = Some(reviewer);
        self.review_date = Some(now);
        self.review_notes = Some(SIBLING_REJECTION_NOTE.to_owned());
        self.updated_at = now;
    }

    fn require_pending(&self) -> Result<(), RequestTransitionError> {
        if self.status == RequestStatus::Pending {
            Ok(())
        } else {
            Err(RequestTransitionError::NotPending {
                status: self.status,
            })
        }
    }
}
