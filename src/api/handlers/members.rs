use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    api::{extract::AppJson, state::AppState},
    domain::{Member, MemberSummary},
    error::Result,
    validation::{MemberInput, MemberPatchInput},
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DeleteResponse {
    pub detail: String,
}

#[utoipa::path(
    get,
    path = "/registered/",
    tag = "members",
    responses(
        (status = 200, description = "Every registered member", body = Vec<Member>),
        (status = 404, description = "No members registered yet")
    )
)]
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Member>>> {
    let members = state.service_context.member_service.list_members().await?;

    Ok(Json(members))
}

#[utoipa::path(
    post,
    path = "/registered/",
    tag = "members",
    request_body = MemberInput,
    responses(
        (status = 201, description = "Member registered", body = Member),
        (status = 409, description = "Same name, phone and t-shirt already registered"),
        (status = 422, description = "Invalid input")
    )
)]
pub async fn create(
    State(state): State<AppState>,
    AppJson(input): AppJson<MemberInput>,
) -> Result<(StatusCode, Json<Member>)> {
    let member = state.service_context.member_service.create_member(input).await?;

    Ok((StatusCode::CREATED, Json(member)))
}

#[utoipa::path(
    get,
    path = "/registered/{id}",
    tag = "members",
    params(("id" = i64, Path, description = "Member id")),
    responses(
        (status = 200, body = Member),
        (status = 404, description = "Member not found")
    )
)]
pub async fn get(State(state): State<AppState>, Path(id): Path<i64>) -> Result<Json<Member>> {
    let member = state.service_context.member_service.get_member(id).await?;

    Ok(Json(member))
}

#[utoipa::path(
    put,
    path = "/registered/{id}",
    tag = "members",
    params(("id" = i64, Path, description = "Member id")),
    request_body = MemberPatchInput,
    responses(
        (status = 200, description = "Member after the update", body = Member),
        (status = 404, description = "Member not found"),
        (status = 422, description = "Invalid input or no field provided"),
        (status = 500, description = "Unexpected storage failure")
    )
)]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    AppJson(input): AppJson<MemberPatchInput>,
) -> Result<Json<Member>> {
    let member = state.service_context.member_service.update_member(id, input).await?;

    Ok(Json(member))
}

#[utoipa::path(
    delete,
    path = "/registered/{id}",
    tag = "members",
    params(("id" = i64, Path, description = "Member id")),
    responses(
        (status = 200, body = DeleteResponse),
        (status = 404, description = "Member not found")
    )
)]
pub async fn delete(State(state): State<AppState>, Path(id): Path<i64>) -> Result<Json<DeleteResponse>> {
    state.service_context.member_service.delete_member(id).await?;

    Ok(Json(DeleteResponse {
        detail: format!("Member {} removed from the registry", id),
    }))
}

#[utoipa::path(
    get,
    path = "/registered/summary",
    tag = "members",
    responses((status = 200, description = "Member count and t-shirt tally", body = MemberSummary))
)]
pub async fn summary(State(state): State<AppState>) -> Result<Json<MemberSummary>> {
    let summary = state.service_context.member_service.summary().await?;

    Ok(Json(summary))
}
