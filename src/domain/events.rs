use super::fields::{Reward, UserId};
use serde::Serialize;

#[derive(Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct NewReferralEvent {
    pub referrer: UserId,
    pub referred_user: UserId,
}

#[derive(Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct RewardsClaimedEvent {
    pub referrer: UserId,
    pub claimed_count: i64,
    pub rewards: Reward,
}

#[derive(Serialize, Clone, Debug)]
#[serde(tag = "type", content = "data")]
pub enum AppEvent {
    NewReferral(NewReferralEvent),
    RewardsClaimed(RewardsClaimedEvent),
}
