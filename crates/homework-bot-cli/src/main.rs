use homework_bot_core::{Config, Poller};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Credentials may also come from a .env file in the working directory.
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,homework_bot_core=debug")),
        )
        .init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("CRITICAL: {e}. The bot cannot start.");
            std::process::exit(1);
        }
    };

    info!("Bot started");
    Poller::from_config(&config).run().await;
}
