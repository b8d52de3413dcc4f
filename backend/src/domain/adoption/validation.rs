//! Adoption request validation and conversion helpers.

use super::{
    AdoptionRequest, AdoptionRequestDraft, AdoptionValidationError, Reference, ReferenceDraft,
    RequestStatus, MESSAGE_MAX_LEN, MESSAGE_MIN_LEN, REFERENCE_NAME_MAX_LEN,
    REFERENCE_RELATIONSHIP_MAX_LEN, REVIEW_NOTES_MAX_LEN, WORK_SCHEDULE_MAX_LEN,
};

impl TryFrom<AdoptionRequestDraft> for AdoptionRequest {
    type Error = AdoptionValidationError;

    fn try_from(value: AdoptionRequestDraft) -> Result<Self, Self::Error> {
        let message = value.message.trim().to_owned();
        let length = message.chars().count();
        if length < MESSAGE_MIN_LEN {
            return Err(AdoptionValidationError::MessageTooShort { length });
        }
        if length > MESSAGE_MAX_LEN {
            return Err(AdoptionValidationError::MessageTooLong { length });
        }

        if let Some(schedule) = &value.work_schedule {
            let length = schedule.chars().count();
            if length > WORK_SCHEDULE_MAX_LEN {
                return Err(AdoptionValidationError::WorkScheduleTooLong { length });
            }
        }

        let references = value
            .references
            .into_iter()
            .enumerate()
            .map(|(index, draft)| validate_reference(index, draft))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            id: value.id,
            requester: value.requester,
            pet: value.pet,
            message,
            experience: value.experience,
            housing: value.housing,
            other_pets: value.other_pets,
            work_schedule: value.work_schedule,
            references,
            status: RequestStatus::Pending,
            reviewed_by: None,
            review_date: None,
            review_notes: None,
            meeting_scheduled: None,
            meeting_notes: None,
            created_at: value.created_at,
            updated_at: value.created_at,
        })
    }
}

fn validate_reference(
    index: usize,
    draft: ReferenceDraft,
) -> Result<Reference, AdoptionValidationError> {
    let name = draft.name.trim().to_owned();
    if name.is_empty() {
        return Err(AdoptionValidationError::ReferenceNameEmpty { index });
    }
    if name.chars().count() > REFERENCE_NAME_MAX_LEN {
        return Err(AdoptionValidationError::ReferenceNameTooLong { index });
    }

    if !is_valid_phone(&draft.phone) {
        return Err(AdoptionValidationError::ReferencePhoneInvalid { index });
    }

    let relationship = draft.relationship.trim().to_owned();
    if relationship.is_empty() {
        return Err(AdoptionValidationError::ReferenceRelationshipEmpty { index });
    }
    if relationship.chars().count() > REFERENCE_RELATIONSHIP_MAX_LEN {
        return Err(AdoptionValidationError::ReferenceRelationshipTooLong { index });
    }

    Ok(Reference {
        name,
        phone: draft.phone,
        relationship,
    })
}

/// Permissive phone check: an optional leading `+` followed by at least one
/// digit, space, dash, or parenthesis.
fn is_valid_phone(phone: &str) -> bool {
    let rest = phone.strip_prefix('+').unwrap_or(phone);
    !rest.is_empty()
        && rest
            .chars()
            .all(|c| c.is_ascii_digit() || c.is_whitespace() || matches!(c, '-' | '(' | ')'))
}

/// Validate reviewer notes before they are stamped on a request.
pub fn validate_review_notes(notes: &str) -> Result<(), AdoptionValidationError> {
    let length = notes.chars().count();
    if length > REVIEW_NOTES_MAX_LEN {
        return Err(AdoptionValidationError::ReviewNotesTooLong { length });
    }
    Ok(())
}
