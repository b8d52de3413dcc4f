//! Domain primitives, ports, and services for the adoption lifecycle.
//!
//! Purpose: Define strongly typed domain entities and the use-cases that
//! mutate them. Keep types transport-agnostic and document invariants and
//! serialisation contracts (serde) in each type's Rustdoc.
//!
//! The only aggregate with real invariants is the adoption request: one
//! pending request per (requester, pet) pair, and the approval cascade that
//! marks the pet adopted, appends the adopter's history, and rejects every
//! sibling pending request.

pub mod adoption;
pub mod adoption_service;
pub mod error;
pub mod ids;
pub mod pet;
pub mod ports;
pub mod trace_id;

pub use self::adoption::{
    AdoptionRequest, AdoptionRequestDraft, AdoptionValidationError, ExperienceLevel, Housing,
    OtherPets, ParseEnumValueError, Reference, ReferenceDraft, RequestStatus,
    RequestTransitionError, ReviewDecision, SIBLING_REJECTION_NOTE,
};
pub use self::adoption_service::{AdoptionCommandService, AdoptionQueryService};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::ids::{PetId, UserId};
pub use self::pet::{Pet, PetStatus};
pub use self::trace_id::TraceId;

/// Response header carrying the request-scoped trace identifier.
pub const TRACE_ID_HEADER: &str = "trace-id";

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use backend::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
