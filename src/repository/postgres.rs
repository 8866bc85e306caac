use super::Store;
use crate::domain::{
    errors::StoreError,
    fields::{ReferralStats, UserId},
    model::SaveRecord,
};
use async_trait::async_trait;
use sqlx::PgPool;

pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Store for PgStore {
    async fn record_referral(
        &self,
        referrer: &UserId,
        referred: &UserId,
    ) -> Result<bool, StoreError> {
        if referrer == referred {
            return Ok(false);
        }

        // The unique constraint on referred_id is the only guard
        // against double attribution; no existence check beforehand.
        let result = sqlx::query(
            "insert into referrals (referrer_id, referred_id, status) values ($1, $2, 'pending') on conflict (referred_id) do nothing",
        )
        .bind(referrer.as_ref())
        .bind(referred.as_ref())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("recording referral failed >>> {}", e);
            StoreError::Unavailable
        })?;

        Ok(result.rows_affected() == 1)
    }

    async fn referral_stats(&self, referrer: &UserId) -> Result<ReferralStats, StoreError> {
        let (total, pending): (i64, i64) = sqlx::query_as(
            "select count(*), count(*) filter (where status = 'pending') from referrals where referrer_id = $1",
        )
        .bind(referrer.as_ref())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("fetching referral stats failed >>> {}", e);
            StoreError::Unavailable
        })?;

        Ok(ReferralStats {
            friends_invited: total,
            unclaimed_count: pending,
        })
    }

    async fn claim_rewards(&self, referrer: &UserId) -> Result<i64, StoreError> {
        let result = sqlx::query(
            "update referrals set status = 'claimed' where referrer_id = $1 and status = 'pending'",
        )
        .bind(referrer.as_ref())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("claiming rewards failed >>> {}", e);
            StoreError::Unavailable
        })?;

        Ok(result.rows_affected() as i64)
    }

    async fn put_save(
        &self,
        user: &UserId,
        game_state: serde_json::Value,
    ) -> Result<(), StoreError> {
        sqlx::query(
            "insert into saves (user_id, game_state, last_saved) values ($1, $2, now()) on conflict (user_id) do update set game_state = excluded.game_state, last_saved = now()",
        )
        .bind(user.as_ref())
        .bind(game_state)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("saving game state failed >>> {}", e);
            StoreError::Unavailable
        })?;

        Ok(())
    }

    async fn get_save(&self, user: &UserId) -> Result<Option<SaveRecord>, StoreError> {
        let record = sqlx::query_as::<_, SaveRecord>(
            "select user_id, game_state, last_saved from saves where user_id = $1",
        )
        .bind(user.as_ref())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("loading game state failed >>> {}", e);
            StoreError::Unavailable
        })?;

        Ok(record)
    }
}
