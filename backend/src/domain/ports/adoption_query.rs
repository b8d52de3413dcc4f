//! Driving port for adoption request reads.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{Error, RequestStatus, UserId};

use super::AdoptionRequestPayload;

/// Request to fetch a single adoption request.
///
/// `caller_is_reviewer` is resolved by the inbound adapter from the session
/// role; the query layer only enforces the owner-or-reviewer rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetAdoptionRequest {
    pub request_id: Uuid,
    pub caller: UserId,
    pub caller_is_reviewer: bool,
}

/// Request to list a user's own adoption requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListAdoptionRequestsForUser {
    pub user_id: UserId,
}

/// Request to list every adoption request, optionally filtered by status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListAllAdoptionRequests {
    pub status: Option<RequestStatus>,
}

/// Driving port for adoption request read operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AdoptionQuery: Send + Sync {
    /// Fetch a request by id. Only the requester or a reviewer may read it.
    async fn get_request(&self, request: GetAdoptionRequest)
        -> Result<AdoptionRequestPayload, Error>;

    /// List a user's own requests, newest first.
    async fn list_for_user(
        &self,
        request: ListAdoptionRequestsForUser,
    ) -> Result<Vec<AdoptionRequestPayload>, Error>;

    /// List all requests, newest first, optionally filtered by status.
    async fn list_all(
        &self,
        request: ListAllAdoptionRequests,
    ) -> Result<Vec<AdoptionRequestPayload>, Error>;
}
