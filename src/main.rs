use anyhow::Result;
use clap::{Parser, Subcommand};
use heygen_stt::{
    AppState, Config, HttpTokenSource, ScriptedProvider, SessionClient, SessionDriver,
    TokenBroker,
};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "heygen-stt", version, about = "Speech-to-text over a streaming-avatar session")]
struct Cli {
    /// Config file (extension optional)
    #[arg(long, default_value = "config/heygen-stt")]
    config: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the token broker HTTP server
    Serve,

    /// Run a session against the broker, replaying a transcript script
    Listen {
        /// Text file, one transcription chunk per line
        #[arg(long)]
        script: PathBuf,

        /// Delay between chunks in milliseconds
        #[arg(long, default_value_t = 500)]
        interval_ms: u64,

        /// Override the broker URL from config
        #[arg(long)]
        broker_url: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let cli = Cli::parse();
    let cfg = Config::load(&cli.config)?;

    info!("{} v{}", cfg.service.name, env!("CARGO_PKG_VERSION"));

    match cli.command {
        Commands::Serve => serve(cfg).await,
        Commands::Listen {
            script,
            interval_ms,
            broker_url,
        } => listen(cfg, script, Duration::from_millis(interval_ms), broker_url).await,
    }
}

async fn serve(cfg: Config) -> Result<()> {
    let broker_config = cfg.broker_config()?;
    info!("Upstream token endpoint: {}", broker_config.token_endpoint());

    let broker = TokenBroker::new(broker_config);
    if !broker.has_credential() {
        warn!("HEYGEN_API_KEY is not set; token requests will fail with 500");
    }

    let state = AppState::new(broker);
    heygen_stt::http::serve(&cfg.bind_addr(), state).await
}

async fn listen(
    cfg: Config,
    script: PathBuf,
    interval: Duration,
    broker_url: Option<String>,
) -> Result<()> {
    let broker_url = broker_url.unwrap_or(cfg.client.broker_url);
    let tokens = HttpTokenSource::new(&broker_url);
    info!("Fetching tokens from {}", tokens.url());

    let provider = ScriptedProvider::from_file(&script, interval)?.with_disconnect_at_end(true);
    let client = SessionClient::new(
        Arc::new(tokens),
        Arc::new(provider),
        cfg.session.start_request(),
    );

    let (handle, mut driver) = SessionDriver::spawn(client);
    let mut views = handle.subscribe();

    handle.start().await?;

    loop {
        tokio::select! {
            changed = views.changed() => {
                if changed.is_err() {
                    break;
                }
                let view = views.borrow_and_update().clone();
                println!("\n{}", view);
                if !view.listening && view.error.is_some() {
                    break;
                }
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Interrupted, stopping session");
                break;
            }
        }
    }

    handle.shutdown().await?;

    // Ending the session can block on the provider; a second Ctrl-C gives up
    tokio::select! {
        joined = &mut driver => {
            let client = joined?;
            println!("\n{}", handle.view());
            println!("\n{}", serde_json::to_string_pretty(&client.stats())?);
        }
        _ = tokio::signal::ctrl_c() => {
            warn!("Interrupted again, abandoning session teardown");
            driver.abort();
        }
    }

    Ok(())
}
