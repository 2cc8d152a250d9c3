//! FraudLens CLI - Main Entry Point
//!
//! Analyst console for the FraudLens scoring service: submit text, URL, or
//! audio samples for scoring and review the detection timeline.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use tokio::sync::Mutex;
use tracing::info;

use fraudlens::client::ClientError;
use fraudlens::config::AppConfig;
use fraudlens::export;
use fraudlens::filter::{FilterState, ModuleFilter, TierFilter};
use fraudlens::render;
use fraudlens::scan::{self, ScanController, ScanInput};
use fraudlens::{LogStore, Poller, ScanClient};

#[derive(Parser)]
#[command(name = "fraudlens")]
#[command(version)]
#[command(about = "Analyst console for the FraudLens scoring service", long_about = None)]
struct Cli {
    /// Scoring service base URL
    #[arg(long, env = "FRAUDLENS_API_URL")]
    api_url: Option<String>,

    /// Configuration file
    #[arg(long, default_value = "config/config.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan an email, SMS, or chat message
    Text {
        /// Message body to scan
        input: Option<String>,

        /// Read the message from a file instead
        #[arg(long, conflicts_with = "input")]
        file: Option<PathBuf>,

        /// Canned demo sample: bank-phishing, otp-scam, credential-leak
        #[arg(long, conflicts_with_all = ["input", "file"])]
        demo: Option<String>,

        /// Write the text report artifact after the scan
        #[arg(long)]
        export: bool,
    },
    /// Scan a URL for phishing and spoofing structure
    Url {
        /// URL to scan
        input: Option<String>,

        /// Canned demo sample: legit-bank, phishing, typosquat, support-scam
        #[arg(long, conflicts_with = "input")]
        demo: Option<String>,

        /// Write the url report artifact after the scan
        #[arg(long)]
        export: bool,
    },
    /// Scan a call recording for synthetic voice indicators
    Voice {
        /// Audio file (.wav, .mp3, .m4a)
        file: PathBuf,

        /// Write the voice report artifact after the scan
        #[arg(long)]
        export: bool,
    },
    /// Review the detection timeline
    Logs {
        /// Risk tier filter
        #[arg(long, value_enum, default_value = "all")]
        tier: TierFilter,

        /// Detection module filter
        #[arg(long, value_enum, default_value = "all")]
        module: ModuleFilter,

        /// Keyword filter over label, summary, type, and tier
        #[arg(long, default_value = "")]
        query: String,

        /// Keep refreshing on the configured period until Ctrl+C
        #[arg(long)]
        watch: bool,

        /// Write the filtered view to the audit log artifact
        #[arg(long)]
        export: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("fraudlens=info".parse()?),
        )
        .init();

    let cli = Cli::parse();

    let config = if cli.config.exists() {
        AppConfig::load_from_path(&cli.config)?
    } else {
        AppConfig::default()
    };

    let base_url = cli.api_url.unwrap_or_else(|| config.api.base_url.clone());
    let client = ScanClient::new(&base_url, Duration::from_secs(config.api.timeout_secs))
        .context("failed to build HTTP client")?;

    info!(api = %base_url, "fraudlens starting");

    match cli.command {
        Commands::Text {
            input,
            file,
            demo,
            export,
        } => {
            let body = resolve_text_input(input, file, demo).await?;
            run_scan(&client, &config, ScanInput::Text(body), export).await
        }
        Commands::Url {
            input,
            demo,
            export,
        } => {
            let target = resolve_url_input(input, demo)?;
            render::print_url_preview(&target);
            run_scan(&client, &config, ScanInput::Url(target), export).await
        }
        Commands::Voice { file, export } => {
            run_scan(&client, &config, ScanInput::Voice(file), export).await
        }
        Commands::Logs {
            tier,
            module,
            query,
            watch,
            export,
        } => {
            let filter = FilterState::new(tier, module, query);
            run_logs(&client, &config, filter, watch, export).await
        }
    }
}

async fn resolve_text_input(
    input: Option<String>,
    file: Option<PathBuf>,
    demo: Option<String>,
) -> Result<String> {
    if let Some(name) = demo {
        return scan::demo_text(&name)
            .map(str::to_string)
            .ok_or_else(|| {
                anyhow!(
                    "unknown demo sample {name:?}; available: {}",
                    scan::TEXT_DEMO_NAMES.join(", ")
                )
            });
    }
    if let Some(path) = file {
        return tokio::fs::read_to_string(&path)
            .await
            .with_context(|| format!("failed to read {}", path.display()));
    }
    Ok(input.unwrap_or_default())
}

fn resolve_url_input(input: Option<String>, demo: Option<String>) -> Result<String> {
    if let Some(name) = demo {
        return scan::demo_url(&name).map(str::to_string).ok_or_else(|| {
            anyhow!(
                "unknown demo sample {name:?}; available: {}",
                scan::URL_DEMO_NAMES.join(", ")
            )
        });
    }
    Ok(input.unwrap_or_default())
}

/// Run one scan to completion and render the result panel.
async fn run_scan(
    client: &ScanClient,
    config: &AppConfig,
    input: ScanInput,
    export_result: bool,
) -> Result<()> {
    let module = input.module();
    let mut controller = ScanController::new();

    match controller.run(client, input).await {
        Ok(()) => {}
        Err(err @ ClientError::Validation(_)) => return Err(anyhow!("{err}")),
        Err(err) => {
            return Err(anyhow!(err)
                .context("analysis failed; is the scoring service running?"))
        }
    }

    if let Some(result) = controller.result() {
        render::print_result(module, result);

        if export_result {
            let path = export::export_report(
                Path::new(&config.export.dir),
                &config.export.prefix,
                module,
                result,
            )?;
            println!("exported {}", path.display());
        }
    }

    Ok(())
}

/// Load, filter, and render the timeline; optionally export and/or keep
/// auto-refreshing until Ctrl+C.
async fn run_logs(
    client: &ScanClient,
    config: &AppConfig,
    filter: FilterState,
    watch: bool,
    export_logs: bool,
) -> Result<()> {
    let mut store = LogStore::new();
    store.load(client).await;

    let shown = filter.apply(store.events());
    render::print_timeline(&shown);

    if export_logs {
        if shown.is_empty() {
            println!("nothing to export: the filtered timeline is empty");
        } else {
            let path =
                export::export_events(Path::new(&config.export.dir), &config.export.prefix, &shown)?;
            println!("exported {}", path.display());
        }
    }

    if watch {
        let period = Duration::from_secs(config.poller.interval_secs);
        let store = Arc::new(Mutex::new(store));
        let mut poller = Poller::new();

        let tick_client = client.clone();
        let tick_store = store.clone();
        let tick_filter = filter.clone();
        poller.start(period, move || {
            let client = tick_client.clone();
            let store = tick_store.clone();
            let filter = tick_filter.clone();
            async move {
                let mut store = store.lock().await;
                store.load(&client).await;
                println!();
                render::print_refresh_stamp();
                render::print_timeline(&filter.apply(store.events()));
            }
        });

        info!(period_secs = period.as_secs(), "auto-refresh on, Ctrl+C to stop");
        tokio::signal::ctrl_c()
            .await
            .context("failed to listen for Ctrl+C")?;
        poller.stop();
        info!("auto-refresh stopped");
    }

    Ok(())
}
