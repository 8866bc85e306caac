use super::Store;
use crate::domain::{
    errors::StoreError,
    fields::{ReferralStats, UserId},
    model::{ReferralRecord, ReferralStatus, SaveRecord},
};
use async_trait::async_trait;
use std::collections::{hash_map::Entry, HashMap};
use time::OffsetDateTime;
use tokio::sync::Mutex;

#[derive(Default)]
struct Inner {
    // keyed by referred_id, which enforces at-most-one attribution
    referrals: HashMap<String, ReferralRecord>,
    saves: HashMap<String, SaveRecord>,
}

/// In-process backend for local runs and tests. One mutex guards both
/// maps, so every operation executes as a single critical section.
#[derive(Default)]
pub struct MemStore {
    inner: Mutex<Inner>,
}

impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for MemStore {
    async fn record_referral(
        &self,
        referrer: &UserId,
        referred: &UserId,
    ) -> Result<bool, StoreError> {
        if referrer == referred {
            return Ok(false);
        }

        let mut inner = self.inner.lock().await;
        match inner.referrals.entry(referred.inner()) {
            Entry::Occupied(_) => Ok(false),
            Entry::Vacant(slot) => {
                slot.insert(ReferralRecord {
                    referrer_id: referrer.inner(),
                    referred_id: referred.inner(),
                    status: ReferralStatus::Pending,
                    created_at: OffsetDateTime::now_utc(),
                });
                Ok(true)
            }
        }
    }

    async fn referral_stats(&self, referrer: &UserId) -> Result<ReferralStats, StoreError> {
        let inner = self.inner.lock().await;
        let mut stats = ReferralStats::default();
        for record in inner.referrals.values() {
            if record.referrer_id == referrer.as_ref() {
                stats.friends_invited += 1;
                if record.status == ReferralStatus::Pending {
                    stats.unclaimed_count += 1;
                }
            }
        }

        Ok(stats)
    }

    async fn claim_rewards(&self, referrer: &UserId) -> Result<i64, StoreError> {
        let mut inner = self.inner.lock().await;
        let mut claimed = 0;
        for record in inner.referrals.values_mut() {
            if record.referrer_id == referrer.as_ref() && record.status == ReferralStatus::Pending {
                record.status = ReferralStatus::Claimed;
                claimed += 1;
            }
        }

        Ok(claimed)
    }

    async fn put_save(
        &self,
        user: &UserId,
        game_state: serde_json::Value,
    ) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().await;
        inner.saves.insert(
            user.inner(),
            SaveRecord {
                user_id: user.inner(),
                game_state,
                last_saved: OffsetDateTime::now_utc(),
            },
        );

        Ok(())
    }

    async fn get_save(&self, user: &UserId) -> Result<Option<SaveRecord>, StoreError> {
        let inner = self.inner.lock().await;
        Ok(inner.saves.get(user.as_ref()).cloned())
    }
}
