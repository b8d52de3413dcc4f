//! Adoption request aggregate and its closed vocabulary.
//!
//! An adoption request is the only record this service owns. It is created
//! `pending`, leaves that status exactly once (review or withdrawal), and the
//! terminal statuses (`approved`, `rejected`, `withdrawn`) admit no further
//! transition. Applications that used to carry these fields as free-form
//! strings use closed sum types here so invalid states are unrepresentable.

use serde::{Deserialize, Serialize};

mod request;
mod validation;

pub use request::{AdoptionRequest, AdoptionRequestDraft, Reference};
pub use validation::validate_review_notes;

/// Minimum message length in characters, after trimming.
pub const MESSAGE_MIN_LEN: usize = 10;
/// Maximum message length in characters, after trimming.
pub const MESSAGE_MAX_LEN: usize = 1000;
/// Maximum work-schedule length in characters.
pub const WORK_SCHEDULE_MAX_LEN: usize = 200;
/// Maximum reference name length in characters.
pub const REFERENCE_NAME_MAX_LEN: usize = 100;
/// Maximum reference relationship length in characters.
pub const REFERENCE_RELATIONSHIP_MAX_LEN: usize = 50;
/// Maximum review-notes length in characters.
pub const REVIEW_NOTES_MAX_LEN: usize = 500;

/// Fixed review note stamped on sibling requests rejected by an approval.
pub const SIBLING_REJECTION_NOTE: &str = "Pet has been adopted by another applicant";

/// Lifecycle status of an adoption request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RequestStatus {
    /// Submitted and awaiting review. The only non-terminal status.
    Pending,
    Approved,
    Rejected,
    Withdrawn,
}

impl RequestStatus {
    fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::Withdrawn => "withdrawn",
        }
    }
}

/// The applicant's prior experience with pets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExperienceLevel {
    FirstTime,
    Some,
    Experienced,
}

impl ExperienceLevel {
    fn as_str(self) -> &'static str {
        match self {
            Self::FirstTime => "first-time",
            Self::Some => "some",
            Self::Experienced => "experienced",
        }
    }
}

/// The applicant's housing situation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Housing {
    HouseYard,
    HouseNoYard,
    Apartment,
    Other,
}

impl Housing {
    fn as_str(self) -> &'static str {
        match self {
            Self::HouseYard => "house-yard",
            Self::HouseNoYard => "house-no-yard",
            Self::Apartment => "apartment",
            Self::Other => "other",
        }
    }
}

/// Other animals already living with the applicant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OtherPets {
    None,
    Dogs,
    Cats,
    Both,
    Other,
}

impl OtherPets {
    fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Dogs => "dogs",
            Self::Cats => "cats",
            Self::Both => "both",
            Self::Other => "other",
        }
    }
}

/// A reviewer's verdict on a pending request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReviewDecision {
    Approved,
    Rejected,
}

impl ReviewDecision {
    fn as_str(self) -> &'static str {
        match self {
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

impl From<ReviewDecision> for RequestStatus {
    fn from(value: ReviewDecision) -> Self {
        match value {
            ReviewDecision::Approved => Self::Approved,
            ReviewDecision::Rejected => Self::Rejected,
        }
    }
}

/// Parse failure for the closed enums above.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{value:?} is not one of {expected}")]
pub struct ParseEnumValueError {
    pub value: String,
    pub expected: &'static str,
}

macro_rules! enum_strings {
    ($ty:ident, $expected:expr, [$($variant:ident),+ $(,)?]) => {
        impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $ty {
            type Err = ParseEnumValueError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                $(
                    if s == Self::$variant.as_str() {
                        return Ok(Self::$variant);
                    }
                )+
                Err(ParseEnumValueError {
                    value: s.to_owned(),
                    expected: $expected,
                })
            }
        }
    };
}

enum_strings!(
    RequestStatus,
    "pending, approved, rejected, or withdrawn",
    [Pending, Approved, Rejected, Withdrawn]
);
enum_strings!(
    ExperienceLevel,
    "first-time, some, or experienced",
    [FirstTime, Some, Experienced]
);
enum_strings!(
    Housing,
    "house-yard, house-no-yard, apartment, or other",
    [HouseYard, HouseNoYard, Apartment, Other]
);
enum_strings!(
    OtherPets,
    "none, dogs, cats, both, or other",
    [None, Dogs, Cats, Both, Other]
);
enum_strings!(
    ReviewDecision,
    "approved or rejected",
    [Approved, Rejected]
);

/// Validation errors raised by adoption request constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdoptionValidationError {
    MessageTooShort { length: usize },
    MessageTooLong { length: usize },
    WorkScheduleTooLong { length: usize },
    ReferenceNameEmpty { index: usize },
    ReferenceNameTooLong { index: usize },
    ReferencePhoneInvalid { index: usize },
    ReferenceRelationshipEmpty { index: usize },
    ReferenceRelationshipTooLong { index: usize },
    ReviewNotesTooLong { length: usize },
}

impl AdoptionValidationError {
    /// Wire name of the offending field, for error details.
    pub fn field(&self) -> &'static str {
        match self {
            Self::MessageTooShort { .. } | Self::MessageTooLong { .. } => "message",
            Self::WorkScheduleTooLong { .. } => "workSchedule",
            Self::ReferenceNameEmpty { .. }
            | Self::ReferenceNameTooLong { .. }
            | Self::ReferencePhoneInvalid { .. }
            | Self::ReferenceRelationshipEmpty { .. }
            | Self::ReferenceRelationshipTooLong { .. } => "references",
            Self::ReviewNotesTooLong { .. } => "reviewNotes",
        }
    }
}

impl std::fmt::Display for AdoptionValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MessageTooShort { length } => write!(
                f,
                "message must be at least {MESSAGE_MIN_LEN} characters (got {length})"
            ),
            Self::MessageTooLong { length } => write!(
                f,
                "message cannot exceed {MESSAGE_MAX_LEN} characters (got {length})"
            ),
            Self::WorkScheduleTooLong { length } => write!(
                f,
                "work schedule cannot exceed {WORK_SCHEDULE_MAX_LEN} characters (got {length})"
            ),
            Self::ReferenceNameEmpty { index } => {
                write!(f, "reference {index} is missing a name")
            }
            Self::ReferenceNameTooLong { index } => write!(
                f,
                "reference {index} name cannot exceed {REFERENCE_NAME_MAX_LEN} characters"
            ),
            Self::ReferencePhoneInvalid { index } => {
                write!(f, "reference {index} phone number is not valid")
            }
            Self::ReferenceRelationshipEmpty { index } => {
                write!(f, "reference {index} is missing a relationship")
            }
            Self::ReferenceRelationshipTooLong { index } => write!(
                f,
                "reference {index} relationship cannot exceed \
                 {REFERENCE_RELATIONSHIP_MAX_LEN} characters"
            ),
            Self::ReviewNotesTooLong { length } => write!(
                f,
                "review notes cannot exceed {REVIEW_NOTES_MAX_LEN} characters (got {length})"
            ),
        }
    }
}

impl std::error::Error for AdoptionValidationError {}

/// Transition failures raised by the request state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestTransitionError {
    /// The request is no longer pending, so no transition is possible.
    NotPending { status: RequestStatus },
}

impl std::fmt::Display for RequestTransitionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotPending { status } => {
                write!(f, "request is already {status}; only pending requests can transition")
            }
        }
    }
}

impl std::error::Error for RequestTransitionError {}

/// Draft of a single reference supplied with an application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceDraft {
    pub name: String,
    pub phone: String,
    pub relationship: String,
}
