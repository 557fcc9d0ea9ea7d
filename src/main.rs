use anyhow::Result;
use clap::Parser;
use ems_portal::cli::{handle_command, Cli};
use ems_portal::core::{ClientError, ConfigManager};
use ems_portal::logging;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = ConfigManager::load()?;
    logging::init(config.log_path.as_deref())?;
    config.ensure_directories().await?;
    info!("Loaded configuration: {}", config.summary());

    if let Err(e) = handle_command(cli, config).await {
        error!("Command failed: {:#}", e);
        match e.downcast_ref::<ClientError>() {
            Some(client_error) => eprintln!("❌ {}", client_error),
            None => eprintln!("❌ Error: {:#}", e),
        }
        std::process::exit(1);
    }
    Ok(())
}
