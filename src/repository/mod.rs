use crate::domain::{
    errors::StoreError,
    fields::{ReferralStats, UserId},
    model::SaveRecord,
};
use async_trait::async_trait;

pub mod memory;
pub mod postgres;

pub use memory::MemStore;
pub use postgres::PgStore;

/// Persistence surface shared by every backend. Each operation is a
/// single round trip; all cross-request coordination lives behind it.
#[async_trait]
pub trait Store: Send + Sync {
    /// Records that `referred` joined through `referrer`'s code, with
    /// first-write-wins semantics on `referred`. Self-referrals and
    /// already-attributed users are silently ignored. Returns whether
    /// a new record was created.
    async fn record_referral(
        &self,
        referrer: &UserId,
        referred: &UserId,
    ) -> Result<bool, StoreError>;

    /// Total and still-pending referral counts for `referrer`. An
    /// unknown referrer yields zeros.
    async fn referral_stats(&self, referrer: &UserId) -> Result<ReferralStats, StoreError>;

    /// Transitions every pending referral of `referrer` to claimed and
    /// returns how many were transitioned, as one atomic conditional
    /// update. Calling again right away returns zero.
    async fn claim_rewards(&self, referrer: &UserId) -> Result<i64, StoreError>;

    /// Full-replacement upsert of the user's saved game state.
    async fn put_save(&self, user: &UserId, game_state: serde_json::Value)
        -> Result<(), StoreError>;

    /// `None` means the user has never saved, which callers surface as
    /// not-found rather than a failure.
    async fn get_save(&self, user: &UserId) -> Result<Option<SaveRecord>, StoreError>;
}
