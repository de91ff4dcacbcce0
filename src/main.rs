mod cli;

use cli::CommandLine;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let commands = CommandLine::parse_args();

    tracing::info!("lesion-triage starting");

    let config = commands.config()?;
    config.log_startup();

    cli::run(commands, config).await
}
