use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Reward credited per referred friend, split between the two
/// in-game currencies.
pub const REWARD_MONEY_PER_REFERRAL: i64 = 50_000;
pub const REWARD_GEMS_PER_REFERRAL: i64 = 5;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Hash)]
pub struct UserId(String);

impl UserId {
    pub fn inner(&self) -> String {
        self.0.to_owned()
    }

    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl From<String> for UserId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for UserId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Reward {
    pub money: i64,
    pub gems: i64,
}

impl Reward {
    pub fn for_referrals(count: i64) -> Self {
        Self {
            money: count * REWARD_MONEY_PER_REFERRAL,
            gems: count * REWARD_GEMS_PER_REFERRAL,
        }
    }
}

#[derive(Serialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ReferralStats {
    pub friends_invited: i64,
    pub unclaimed_count: i64,
}

impl ReferralStats {
    pub fn unclaimed_reward(&self) -> Reward {
        Reward::for_referrals(self.unclaimed_count)
    }
}
