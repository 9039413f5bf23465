//! 用户处理器

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};

use super::model::{NewUser, User, UserFields, UserPatch};
use crate::app::{parse_id, AppState};
use crate::core::{payload::Payload, CoreError};

pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<User>>, CoreError> {
    Ok(Json(state.users.list()?))
}

pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<User>, CoreError> {
    let id = parse_id("用户", &id)?;
    Ok(Json(state.users.get(id)?))
}

pub async fn create_user(
    State(state): State<AppState>,
    Payload(fields): Payload<UserFields>,
) -> Result<(StatusCode, Json<User>), CoreError> {
    let user = state.users.create(NewUser::try_from(fields)?)?;
    Ok((StatusCode::CREATED, Json(user)))
}

pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Payload(fields): Payload<UserFields>,
) -> Result<Json<User>, CoreError> {
    let id = parse_id("用户", &id)?;
    state.users.get(id)?;
    Ok(Json(state.users.update(id, UserPatch::try_from(fields)?)?))
}

pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, CoreError> {
    let id = parse_id("用户", &id)?;
    state.users.delete(id)?;
    Ok(StatusCode::NO_CONTENT)
}
