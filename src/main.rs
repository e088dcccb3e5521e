mod cli;

use clap::Parser;
use cli::{Cli, Commands};
use tokio_util::sync::CancellationToken;
use tracing::info;

use delinkify::config::Config;
use delinkify::pipeline::Delinkifier;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Fetch(args) => {
            let mut config = Config::load()?;
            if let Some(tmp_dir) = args.tmp_dir {
                config.tmp_dir = tmp_dir;
            }
            tokio::fs::create_dir_all(&config.tmp_dir).await?;

            let delinkifier = Delinkifier::new(config)?;

            let cancel = CancellationToken::new();
            let signal_cancel = cancel.clone();
            tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    info!("Shutdown signal received");
                    signal_cancel.cancel();
                }
            });

            let media = delinkifier.run(args.urls, cancel).await;
            for item in &media {
                println!("{}\t{}", item.source().display(), item.original_url());
            }

            let snapshot = delinkifier.metrics().snapshot();
            info!(
                urls = snapshot.urls_received,
                published = snapshot.media_published,
                failed = snapshot.acquisitions_failed,
                unsupported = snapshot.unsupported_links,
                "done"
            );
        }
    }

    Ok(())
}
