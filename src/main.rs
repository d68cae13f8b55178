//! userd - main entry point

use anyhow::Result;
use tracing::info;

use userd::{api, config::Config, db, logging};

#[tokio::main]
async fn main() -> Result<()> {
    let log_config = logging::LogConfig::from_env()?;
    logging::init_logging(&log_config)?;

    info!("Starting userd");

    let config = Config::load()?;
    info!(
        "Configuration loaded - server will bind to {}:{}",
        config.server.host, config.server.port
    );

    let pool = db::create_pool(&config.database).await?;
    db::run_migrations(&pool).await?;

    api::serve(config, pool).await
}
