use std::sync::Arc;

use crate::{
    app::AppState,
    domain::{
        errors::ApiError,
        events::{AppEvent, NewReferralEvent},
        fields::UserId,
    },
};
use axum::{
    extract::State,
    headers::{authorization::Bearer, Authorization},
    Json, TypedHeader,
};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};

/// Minimal chat update forwarded by the bot transport. The command
/// dispatcher itself lives outside this service; it only relays
/// `start` events here.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BotUpdate {
    user_id: Option<UserId>,
    command: Option<String>,
    payload: Option<String>,
}

#[derive(Serialize)]
pub struct BotReply {
    message: String,
}

pub async fn bot_update(
    State(state): State<Arc<AppState>>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    Json(update): Json<BotUpdate>,
) -> Result<Json<BotReply>, ApiError> {
    if auth.token() != state.config.bot.token.expose_secret() {
        return Err(ApiError::Unauthorized);
    }

    let user_id = update
        .user_id
        .filter(|u| !u.is_blank())
        .ok_or(ApiError::MissingField("userId"))?;

    if update.command.as_deref() != Some("start") {
        return Ok(Json(BotReply {
            message: "Unknown command".to_owned(),
        }));
    }

    let referrer = update
        .payload
        .map(UserId::from)
        .filter(|r| !r.is_blank());

    if let Some(referrer) = referrer {
        let created = state
            .get_store()
            .record_referral(&referrer, &user_id)
            .await?;

        if created {
            tracing::info!("new referral >>> {} invited {}", referrer, user_id);
            let _ = state
                .get_sender()
                .send(AppEvent::NewReferral(NewReferralEvent {
                    referrer: referrer.clone(),
                    referred_user: user_id,
                }));

            return Ok(Json(BotReply {
                message: format!("Welcome! You joined through {}'s invite.", referrer),
            }));
        }
    }

    Ok(Json(BotReply {
        message: "Welcome to the game!".to_owned(),
    }))
}
