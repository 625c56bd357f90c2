use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;

use risalebot::config::{DEFAULT_DATA_DIR, RisaleConfig};
use risalebot::service::RisaleService;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct AppArgs {
    #[arg(long, default_value = "127.0.0.1:8080")]
    addr: SocketAddr,

    /// Corpus directory holding `index/` and `sozler/`.
    #[arg(long, env = "RISALE_DATA_DIR", default_value = DEFAULT_DATA_DIR)]
    data_dir: PathBuf,
}

#[tokio::main]
async fn main() -> std::process::ExitCode {
    if let Err(err) = try_main().await {
        eprintln!("{err:#}");
        return std::process::ExitCode::FAILURE;
    }
    std::process::ExitCode::SUCCESS
}

async fn try_main() -> anyhow::Result<()> {
    risalebot::logging::init_with_default("info,tower_http=info")?;

    let args = AppArgs::parse();
    tracing::info!(?args, "starting risalebot-app");

    let config = RisaleConfig::new(&args.data_dir);
    let service = Arc::new(RisaleService::from_config(&config)?);
    let toc_entries = service.index().toc().await.len();
    if toc_entries == 0 {
        tracing::warn!(data_dir = %args.data_dir.display(), "table of contents is empty");
    }

    let app = risalebot::http::router(service);

    let listener = tokio::net::TcpListener::bind(args.addr)
        .await
        .map_err(|err| anyhow::anyhow!("bind {}: {err}", args.addr))?;
    tracing::info!(addr = %args.addr, toc_entries, "listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if let Err(err) = tokio::signal::ctrl_c().await {
                tracing::warn!(?err, "ctrl-c handler unavailable");
            }
        })
        .await?;
    Ok(())
}
