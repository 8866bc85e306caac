use std::sync::Arc;

use crate::{
    app::AppState,
    domain::{errors::ApiError, fields::UserId},
};
use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveRequest {
    user_id: Option<UserId>,
    game_state: Option<Value>,
}

#[derive(Serialize)]
pub struct SaveResponse {
    success: bool,
    message: String,
}

pub async fn save_game(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<SaveRequest>,
) -> Result<Json<SaveResponse>, ApiError> {
    let user_id = payload
        .user_id
        .filter(|u| !u.is_blank())
        .ok_or(ApiError::MissingField("userId"))?;
    let game_state = payload
        .game_state
        .ok_or(ApiError::MissingField("gameState"))?;

    let payload_size = serde_json::to_vec(&game_state)
        .map_err(|_| ApiError::ServerError)?
        .len();
    if payload_size > state.config.save.max_payload_bytes {
        tracing::info!(
            "rejecting oversized save >>> {} bytes from {}",
            payload_size,
            user_id
        );
        return Err(ApiError::PayloadTooLarge);
    }

    state.get_store().put_save(&user_id, game_state).await?;

    Ok(Json(SaveResponse {
        success: true,
        message: "Game saved".to_owned(),
    }))
}

pub async fn load_game(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let user_id = UserId::from(user_id);
    if user_id.is_blank() {
        return Err(ApiError::MissingField("userId"));
    }

    let record = state
        .get_store()
        .get_save(&user_id)
        .await?
        .ok_or(ApiError::SaveNotFound)?;

    Ok(Json(record.game_state))
}
