use std::sync::Arc;

use crate::{
    app::AppState,
    domain::{
        errors::ApiError,
        events::{AppEvent, RewardsClaimedEvent},
        fields::{Reward, UserId},
    },
};
use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MyReferralsResponse {
    friends_invited: i64,
    unclaimed_count: i64,
    unclaimed_reward: Reward,
}

pub async fn my_referrals(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<Json<MyReferralsResponse>, ApiError> {
    let user_id = UserId::from(user_id);
    let stats = state.get_store().referral_stats(&user_id).await?;

    Ok(Json(MyReferralsResponse {
        friends_invited: stats.friends_invited,
        unclaimed_count: stats.unclaimed_count,
        unclaimed_reward: stats.unclaimed_reward(),
    }))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimRewardsRequest {
    user_id: Option<UserId>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimRewardsResponse {
    claimed_count: i64,
    rewards: Reward,
}

pub async fn claim_rewards(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<ClaimRewardsRequest>,
) -> Result<Json<ClaimRewardsResponse>, ApiError> {
    let user_id = payload
        .user_id
        .filter(|u| !u.is_blank())
        .ok_or(ApiError::MissingField("userId"))?;

    tracing::info!("claiming referral rewards >>> {}", user_id);
    let claimed_count = state.get_store().claim_rewards(&user_id).await?;
    let rewards = Reward::for_referrals(claimed_count);

    if claimed_count > 0 {
        let _ = state
            .get_sender()
            .send(AppEvent::RewardsClaimed(RewardsClaimedEvent {
                referrer: user_id,
                claimed_count,
                rewards,
            }));
    }

    Ok(Json(ClaimRewardsResponse {
        claimed_count,
        rewards,
    }))
}
