pub async fn health() -> &'static str {
    "quest referral server up"
}

pub mod bot;
pub mod event;
pub mod referral;
pub mod save;
