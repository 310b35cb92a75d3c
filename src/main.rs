use anyhow::{Context, Result};
use maud::Render;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use sidebar_preview::components::{FeedView, OnboardingView, ThreadView};
use sidebar_preview::config::Config;
use sidebar_preview::feed::{FeedController, Screen, Snapshot};
use sidebar_preview::preview::PreviewResolver;

#[tokio::main]
async fn main() {
    tokio::select! {
        result = run() => {
            if let Err(e) = result {
                error!("Fatal error: {e:#}");
                std::process::exit(1);
            }
        }
        () = shutdown_signal() => {
            info!("Interrupted, pending previews dropped");
        }
    }
}

async fn run() -> Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    init_tracing()?;

    let config = Config::from_env().context("Failed to load configuration")?;
    config.validate().context("Invalid configuration")?;

    info!(
        proxy = %config.proxy_url,
        enrichment = config.preview_enabled,
        "Configuration loaded"
    );
    if config.fetch_timeout.is_none() {
        warn!("No PREVIEW_FETCH_TIMEOUT_SECS set - a hung preview fetch blocks until interrupted");
    }

    let snapshot = match &config.snapshot_path {
        Some(path) => Snapshot::from_path(path)
            .await
            .with_context(|| format!("Failed to load snapshot: {}", path.display()))?,
        None => Snapshot::bundled().context("Failed to load bundled snapshot")?,
    };
    info!(
        posts = snapshot.posts.len(),
        agents = snapshot.agents.len(),
        "Snapshot loaded"
    );

    let resolver =
        PreviewResolver::from_config(&config).context("Failed to build preview fetcher")?;
    let mut controller = FeedController::new(snapshot, resolver);

    println!("{}", OnboardingView::new(&controller).render().into_string());
    controller.go_to(Screen::Feed);
    println!("{}", FeedView::new(&controller).render().into_string());

    let post_ids: Vec<u64> = controller.visible_posts().iter().map(|p| p.id).collect();
    for post_id in post_ids {
        controller.go_to(Screen::Detail(post_id));
        controller.settle_preview().await;
        println!("{}", ThreadView::new(&controller).render().into_string());
        controller.go_to(Screen::Feed);
    }

    info!("Done");
    Ok(())
}

fn init_tracing() -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,sidebar_preview=debug"));

    // Check if JSON logging is requested
    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| matches!(v.to_lowercase().as_str(), "json" | "structured"))
        .unwrap_or(false);

    // Logs go to stderr so rendered markup on stdout stays clean
    if use_json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .try_init()
            .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {e}"))?;
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .try_init()
            .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {e}"))?;
    }

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}
