//! Adoption request HTTP handlers.
//!
//! ```text
//! POST /api/v1/adoptions
//! PUT  /api/v1/adoptions/{id}/status
//! PUT  /api/v1/adoptions/{id}/withdraw
//! GET  /api/v1/adoptions/my-requests
//! GET  /api/v1/adoptions/{id}
//! GET  /api/v1/adoptions?status=pending
//! ```

use actix_web::{get, post, put, web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::{
    AdoptionRequestPayload, ApplicationPayload, GetAdoptionRequest, ListAdoptionRequestsForUser,
    ListAllAdoptionRequests, ReferencePayload, ReviewAdoptionRequest, SubmitAdoptionRequest,
    WithdrawAdoptionRequest,
};
use crate::domain::{PetId, RequestStatus};
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{parse_enum, parse_uuid, FieldName};
use crate::inbound::http::ApiResult;

/// A personal reference supplied with an application.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceBody {
    pub name: String,
    pub phone: String,
    pub relationship: String,
}

/// Request payload for submitting an adoption application.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmitAdoptionRequestBody {
    #[schema(format = "uuid")]
    pub pet_id: String,
    pub message: String,
    #[schema(example = "first-time")]
    pub experience: String,
    #[schema(example = "house-yard")]
    pub housing: String,
    #[schema(example = "none")]
    pub other_pets: String,
    pub work_schedule: Option<String>,
    #[serde(default)]
    pub references: Vec<ReferenceBody>,
}

/// Request payload for deciding a pending request.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReviewAdoptionRequestBody {
    #[schema(example = "approved")]
    pub status: String,
    pub review_notes: Option<String>,
}

/// Query parameters for the full listing.
#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct ListAdoptionRequestsQuery {
    /// Restrict the listing to one lifecycle status.
    pub status: Option<String>,
}

/// Response payload describing an adoption request.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdoptionRequestBody {
    #[schema(format = "uuid")]
    pub id: String,
    #[schema(format = "uuid")]
    pub requester: String,
    #[schema(format = "uuid")]
    pub pet: String,
    pub message: String,
    pub experience: String,
    pub housing: String,
    pub other_pets: String,
    pub work_schedule: Option<String>,
    pub references: Vec<ReferenceBody>,
    #[schema(example = "pending")]
    pub status: String,
    #[schema(format = "uuid")]
    pub reviewed_by: Option<String>,
    #[schema(format = "date-time")]
    pub review_date: Option<String>,
    pub review_notes: Option<String>,
    #[schema(format = "date-time")]
    pub meeting_scheduled: Option<String>,
    pub meeting_notes: Option<String>,
    #[schema(format = "date-time")]
    pub created_at: String,
    #[schema(format = "date-time")]
    pub updated_at: String,
}

impl From<AdoptionRequestPayload> for AdoptionRequestBody {
    fn from(value: AdoptionRequestPayload) -> Self {
        Self {
            id: value.id.to_string(),
            requester: value.requester.to_string(),
            pet: value.pet.to_string(),
            message: value.message,
            experience: value.experience.to_string(),
            housing: value.housing.to_string(),
            other_pets: value.other_pets.to_string(),
            work_schedule: value.work_schedule,
            references: value
                .references
                .into_iter()
                .map(|reference| ReferenceBody {
                    name: reference.name,
                    phone: reference.phone,
                    relationship: reference.relationship,
                })
                .collect(),
            status: value.status.to_string(),
            reviewed_by: value.reviewed_by.map(|id| id.to_string()),
            review_date: value.review_date.map(|when| when.to_rfc3339()),
            review_notes: value.review_notes,
            meeting_scheduled: value.meeting_scheduled.map(|when| when.to_rfc3339()),
            meeting_notes: value.meeting_notes,
            created_at: value.created_at.to_rfc3339(),
            updated_at: value.updated_at.to_rfc3339(),
        }
    }
}

fn parse_application(body: SubmitAdoptionRequestBody) -> ApiResult<(PetId, ApplicationPayload)> {
    let pet_id = PetId::from_uuid(parse_uuid(body.pet_id, FieldName::new("petId"))?);
    let application = ApplicationPayload {
        message: body.message,
        experience: parse_enum(body.experience, FieldName::new("experience"))?,
        housing: parse_enum(body.housing, FieldName::new("housing"))?,
        other_pets: parse_enum(body.other_pets, FieldName::new("otherPets"))?,
        work_schedule: body.work_schedule,
        references: body
            .references
            .into_iter()
            .map(|reference| ReferencePayload {
                name: reference.name,
                phone: reference.phone,
                relationship: reference.relationship,
            })
            .collect(),
    };
    Ok((pet_id, application))
}

/// Submit an adoption application for the authenticated user.
#[utoipa::path(
    post,
    path = "/api/v1/adoptions",
    request_body = SubmitAdoptionRequestBody,
    responses(
        (status = 201, description = "Request submitted", body = AdoptionRequestBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorized", body = ErrorSchema),
        (status = 404, description = "Pet not found", body = ErrorSchema),
        (status = 409, description = "Pet unavailable or duplicate pending request", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["adoptions"],
    operation_id = "submitAdoptionRequest",
    security(("SessionCookie" = []))
)]
#[post("/adoptions")]
pub async fn submit_adoption_request(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<SubmitAdoptionRequestBody>,
) -> ApiResult<HttpResponse> {
    let identity = session.require_identity()?;
    let (pet_id, application) = parse_application(payload.into_inner())?;

    let created = state
        .adoptions
        .submit(SubmitAdoptionRequest {
            requester: identity.user_id,
            pet_id,
            application,
        })
        .await?;

    Ok(HttpResponse::Created().json(AdoptionRequestBody::from(created)))
}

/// Decide a pending request. Reviewer only.
#[utoipa::path(
    put,
    path = "/api/v1/adoptions/{id}/status",
    request_body = ReviewAdoptionRequestBody,
    params(("id" = uuid::Uuid, Path, description = "Adoption request id")),
    responses(
        (status = 200, description = "Request decided", body = AdoptionRequestBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorized", body = ErrorSchema),
        (status = 403, description = "Reviewer role required", body = ErrorSchema),
        (status = 404, description = "Request not found", body = ErrorSchema),
        (status = 409, description = "Request already decided", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["adoptions"],
    operation_id = "reviewAdoptionRequest",
    security(("SessionCookie" = []))
)]
#[put("/adoptions/{id}/status")]
pub async fn review_adoption_request(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<ReviewAdoptionRequestBody>,
) -> ApiResult<web::Json<AdoptionRequestBody>> {
    let identity = session.require_reviewer()?;
    let request_id = parse_uuid(path.into_inner(), FieldName::new("id"))?;
    let payload = payload.into_inner();
    let decision = parse_enum(payload.status, FieldName::new("status"))?;

    let decided = state
        .adoptions
        .review(ReviewAdoptionRequest {
            request_id,
            reviewer: identity.user_id,
            decision,
            notes: payload.review_notes,
        })
        .await?;

    Ok(web::Json(AdoptionRequestBody::from(decided)))
}

/// Withdraw the caller's own pending request.
#[utoipa::path(
    put,
    path = "/api/v1/adoptions/{id}/withdraw",
    params(("id" = uuid::Uuid, Path, description = "Adoption request id")),
    responses(
        (status = 200, description = "Request withdrawn", body = AdoptionRequestBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorized", body = ErrorSchema),
        (status = 403, description = "Not the requester", body = ErrorSchema),
        (status = 404, description = "Request not found", body = ErrorSchema),
        (status = 409, description = "Request already decided", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["adoptions"],
    operation_id = "withdrawAdoptionRequest",
    security(("SessionCookie" = []))
)]
#[put("/adoptions/{id}/withdraw")]
pub async fn withdraw_adoption_request(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<AdoptionRequestBody>> {
    let identity = session.require_identity()?;
    let request_id = parse_uuid(path.into_inner(), FieldName::new("id"))?;

    let withdrawn = state
        .adoptions
        .withdraw(WithdrawAdoptionRequest {
            request_id,
            requester: identity.user_id,
        })
        .await?;

    Ok(web::Json(AdoptionRequestBody::from(withdrawn)))
}

/// List the caller's own requests, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/adoptions/my-requests",
    responses(
        (status = 200, description = "The caller's requests", body = [AdoptionRequestBody]),
        (status = 401, description = "Unauthorized", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["adoptions"],
    operation_id = "myAdoptionRequests",
    security(("SessionCookie" = []))
)]
#[get("/adoptions/my-requests")]
pub async fn my_adoption_requests(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<AdoptionRequestBody>>> {
    let identity = session.require_identity()?;

    let requests = state
        .adoptions_query
        .list_for_user(ListAdoptionRequestsForUser {
            user_id: identity.user_id,
        })
        .await?;

    Ok(web::Json(requests.into_iter().map(Into::into).collect()))
}

/// Fetch a single request. Requester or reviewer only.
#[utoipa::path(
    get,
    path = "/api/v1/adoptions/{id}",
    params(("id" = uuid::Uuid, Path, description = "Adoption request id")),
    responses(
        (status = 200, description = "The request", body = AdoptionRequestBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorized", body = ErrorSchema),
        (status = 403, description = "Access denied", body = ErrorSchema),
        (status = 404, description = "Request not found", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["adoptions"],
    operation_id = "getAdoptionRequest",
    security(("SessionCookie" = []))
)]
#[get("/adoptions/{id}")]
pub async fn get_adoption_request(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<AdoptionRequestBody>> {
    let identity = session.require_identity()?;
    let request_id = parse_uuid(path.into_inner(), FieldName::new("id"))?;

    let request = state
        .adoptions_query
        .get_request(GetAdoptionRequest {
            request_id,
            caller: identity.user_id,
            caller_is_reviewer: identity.is_reviewer(),
        })
        .await?;

    Ok(web::Json(AdoptionRequestBody::from(request)))
}

/// List every request, optionally filtered by status. Reviewer only.
#[utoipa::path(
    get,
    path = "/api/v1/adoptions",
    params(ListAdoptionRequestsQuery),
    responses(
        (status = 200, description = "All requests", body = [AdoptionRequestBody]),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorized", body = ErrorSchema),
        (status = 403, description = "Reviewer role required", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["adoptions"],
    operation_id = "listAdoptionRequests",
    security(("SessionCookie" = []))
)]
#[get("/adoptions")]
pub async fn list_adoption_requests(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<ListAdoptionRequestsQuery>,
) -> ApiResult<web::Json<Vec<AdoptionRequestBody>>> {
    session.require_reviewer()?;
    let status = query
        .into_inner()
        .status
        .map(|raw| parse_enum::<RequestStatus>(raw, FieldName::new("status")))
        .transpose()?;

    let requests = state
        .adoptions_query
        .list_all(ListAllAdoptionRequests { status })
        .await?;

    Ok(web::Json(requests.into_iter().map(Into::into).collect()))
}

/// Register the adoption handlers on a scope.
///
/// `my_adoption_requests` must be registered before `get_adoption_request`
/// so the literal `my-requests` segment wins over the `{id}` pattern.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(submit_adoption_request)
        .service(review_adoption_request)
        .service(withdraw_adoption_request)
        .service(my_adoption_requests)
        .service(list_adoption_requests)
        .service(get_adoption_request);
}

#[cfg(test)]
#[path = "adoptions_tests.rs"]
mod tests;
