//! Hexagonal ports for the adoption backend.
//!
//! Driven ports ([`PetStore`], [`UserStore`], [`AdoptionRequestRepository`])
//! are implemented by outbound adapters; driving ports ([`AdoptionCommand`],
//! [`AdoptionQuery`]) are implemented by domain services and consumed by
//! inbound adapters.

mod adoption_command;
mod adoption_query;
mod adoption_request_repository;
mod macros;
mod pet_store;
mod user_store;

pub(crate) use self::macros::define_port_error;

pub use self::adoption_command::{
    AdoptionCommand, AdoptionRequestPayload, ApplicationPayload, ReferencePayload,
    ReviewAdoptionRequest, SubmitAdoptionRequest, WithdrawAdoptionRequest,
};
pub use self::adoption_query::{
    AdoptionQuery, GetAdoptionRequest, ListAdoptionRequestsForUser, ListAllAdoptionRequests,
};
pub use self::adoption_request_repository::{
    AdoptionRequestRepository, AdoptionRequestRepositoryError, FixtureAdoptionRequestRepository,
};
pub use self::pet_store::{FixturePetStore, PetStore, PetStoreError};
pub use self::user_store::{
    AdoptionHistoryEntry, AdoptionHistoryStatus, FixtureUserStore, UserStore, UserStoreError,
};

#[cfg(test)]
pub use self::adoption_command::MockAdoptionCommand;
#[cfg(test)]
pub use self::adoption_query::MockAdoptionQuery;
#[cfg(test)]
pub use self::adoption_request_repository::MockAdoptionRequestRepository;
#[cfg(test)]
pub use self::pet_store::MockPetStore;
#[cfg(test)]
pub use self::user_store::MockUserStore;
