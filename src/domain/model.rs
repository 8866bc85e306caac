use sqlx::FromRow;
use time::OffsetDateTime;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReferralStatus {
    Pending,
    Claimed,
}

/// One attribution of a referred user to the referrer whose code they
/// joined with. `referred_id` is unique across all records, so a user
/// is attributed at most once, permanently.
#[derive(Clone, Debug)]
pub struct ReferralRecord {
    pub referrer_id: String,
    pub referred_id: String,
    pub status: ReferralStatus,
    pub created_at: OffsetDateTime,
}

#[derive(FromRow, Clone, Debug)]
pub struct SaveRecord {
    pub user_id: String,
    pub game_state: serde_json::Value,
    pub last_saved: OffsetDateTime,
}
