//! Fill chart binary.
//!
//! Reads `fill-chart.yaml` (or the file named by `FILL_CHART_CONFIG`), then
//! renders the configured range on the console chart surface.

use std::process::ExitCode;

use anyhow::Context;
use fill_chart::application::AppContext;
use fill_chart::app::load_run_config;
use fill_chart::config::{Config, LoggingConfig};
use fill_chart::infrastructure::chart::ConsoleChart;
use fill_chart::telemetry::init_tracing;
use tokio::signal;
use tokio_util::sync::CancellationToken;

/// Environment variable naming the config file.
const CONFIG_PATH_ENV: &str = "FILL_CHART_CONFIG";

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    load_dotenv();

    let config = match load() {
        Ok(config) => config,
        Err(e) => {
            // No logging config without a config file.
            init_tracing(&LoggingConfig::default());
            tracing::error!("{e:?}");
            return ExitCode::FAILURE;
        }
    };
    init_tracing(&config.observability.logging);

    let chart = ConsoleChart::new(config.chart.toolbox, config.chart.hold_open);
    let close_handle = chart.close_handle();
    let mut ctx = AppContext::new(chart);

    let cancel = ctx.cancel_token();
    let signals = tokio::spawn(async move {
        shutdown_signal(cancel).await;
        // Release anyone waiting on the window.
        close_handle.close();
    });

    let result = fill_chart::run(&config, &mut ctx)
        .await
        .context("fill chart run failed");

    if ctx.is_interrupted() {
        tracing::info!("Session interrupted by signal");
    }
    ctx.teardown().await;
    signals.abort();

    match result {
        Ok(outcome) => {
            tracing::info!(end = ?outcome.end(), "Done");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("{e:?}");
            ExitCode::FAILURE
        }
    }
}

/// Load the config named by `FILL_CHART_CONFIG`, or the default file.
fn load() -> anyhow::Result<Config> {
    let path = std::env::var(CONFIG_PATH_ENV).ok();
    load_run_config(path.as_deref()).context("failed to load configuration")
}

/// Load `.env` from the current directory or the nearest ancestor.
fn load_dotenv() {
    if dotenvy::dotenv().is_ok() {
        return;
    }

    if let Ok(cwd) = std::env::current_dir() {
        let mut dir = cwd.as_path();
        while let Some(parent) = dir.parent() {
            let env_path = parent.join(".env");
            if env_path.exists() {
                let _ = dotenvy::from_path(&env_path);
                return;
            }
            dir = parent;
        }
    }
}

/// Wait for SIGINT or SIGTERM, then cancel the session.
async fn shutdown_signal(cancel: CancellationToken) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::warn!(error = %e, "Ctrl+C handler unavailable");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "SIGTERM handler unavailable");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received Ctrl+C, closing chart");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, closing chart");
        }
    }

    cancel.cancel();
}
