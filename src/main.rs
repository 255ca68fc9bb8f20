use anyhow::{Context, Result};
use std::sync::Arc;
use tokio::{signal, sync::oneshot};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use uv_bot::location::{default_locations, validate_locations};
use uv_bot::{
    ConsoleReporter, MeasurementReporter, OpenWeatherMap, Poller, ReporterSettings, Settings,
    TwitterReporter,
};

#[tokio::main]
async fn main() -> Result<()> {
    // stdout carries the alerts, so logs go to stderr
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "uv_bot=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let settings = Settings::from_env().context("Failed to load configuration")?;

    let locations = default_locations();
    validate_locations(&locations).context("Failed to load monitored locations")?;

    let provider = Arc::new(OpenWeatherMap::with_host(
        &settings.weather.host,
        &settings.weather.app_id,
    )?);

    let reporter: Arc<dyn MeasurementReporter> = match &settings.reporter {
        ReporterSettings::Console => Arc::new(ConsoleReporter::stdout()),
        ReporterSettings::Twitter { host, credentials } => {
            Arc::new(TwitterReporter::with_host(host, credentials.clone())?)
        }
    };

    let (stop_tx, stop_rx) = oneshot::channel();
    tokio::spawn(async move {
        tracing::info!("Listening for signals...");
        shutdown_signal().await;
        let _ = stop_tx.send(());
    });

    let mut poller = Poller::new(provider, reporter, settings.poll);
    poller.run(&locations, stop_rx).await;

    tracing::info!("Shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut s) => {
                s.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install signal handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
