use dotenv::dotenv;
use quest_referral_server::{app::Application, config::Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    let config = Config::load()?;
    Application::build(config).await
}
