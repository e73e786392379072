//! Run wiring: load candles and fills per the config, then hand them to the
//! use case for the configured mode.

use std::path::Path;

use tracing::info;

use crate::application::AppContext;
use crate::application::ports::ChartPort;
use crate::application::use_cases::{
    RenderStaticUseCase, ReplayLiveUseCase, ReplayOutcome, SessionEnd, StaticOutcome,
};
use crate::config::{Config, RenderMode, load_config};
use crate::domain::fills::Fill;
use crate::error::AppError;
use crate::infrastructure::storage::{CandleLoader, FillLogError, read_fill_log};

/// Outcome of one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// Full range shown at once.
    Static(StaticOutcome),
    /// Live replay.
    Live(ReplayOutcome),
}

impl RunOutcome {
    /// How the session ended.
    #[must_use]
    pub const fn end(&self) -> SessionEnd {
        match self {
            Self::Static(o) => o.end,
            Self::Live(o) => o.end,
        }
    }
}

/// Load the run configuration, `None` meaning the default file.
///
/// # Errors
///
/// `AppError::Config` if the file cannot be read, parsed, or validated.
pub fn load_run_config(path: Option<&str>) -> Result<Config, AppError> {
    Ok(load_config(path)?)
}

/// Build the candle loader described by `config`.
#[must_use]
pub fn candle_loader(config: &Config) -> CandleLoader {
    CandleLoader::new(
        config.data.directory.clone(),
        config.data.symbol.as_str(),
        config.data.timeframe,
    )
}

/// Read the fill log if one is configured.
///
/// # Errors
///
/// Any `FillLogError` from reading a configured log.
pub fn load_fills(path: Option<&Path>) -> Result<Vec<Fill>, FillLogError> {
    match path {
        Some(path) => Ok(read_fill_log(path)?.fills),
        None => {
            info!("No fill log configured, drawing candles only");
            Ok(Vec::new())
        }
    }
}

/// Load data and run the configured mode against the context's chart.
///
/// The context is not torn down here; callers do that once the run returns.
///
/// # Errors
///
/// Returns an `AppError` for load failures and chart failures other than
/// the user closing the chart.
pub async fn run<C: ChartPort>(
    config: &Config,
    ctx: &mut AppContext<C>,
) -> Result<RunOutcome, AppError> {
    let start = config.range.start_date;
    let end = config.range.end_date;
    let loader = candle_loader(config);
    let legend = config.chart.legend;

    info!(
        mode = ?config.mode,
        symbol = %config.data.symbol,
        timeframe = %config.data.timeframe,
        %start,
        %end,
        chart = ctx.chart().name(),
        "Starting fill chart"
    );

    let outcome = match config.mode {
        RenderMode::Static => {
            let candles = loader.load_combined(start, end)?;
            let fills = load_fills(config.fills.path.as_deref())?;
            let (chart, cancel) = ctx.session();
            let outcome = RenderStaticUseCase::new(chart, legend, cancel)
                .execute(&candles, &fills)
                .await?;
            RunOutcome::Static(outcome)
        }
        RenderMode::Live => {
            let load = loader.load_days(start, end)?;
            let fills = load_fills(config.fills.path.as_deref())?;
            let (chart, cancel) = ctx.session();
            let outcome = ReplayLiveUseCase::new(chart, legend, config.replay.step_delay(), cancel)
                .execute(&load.days, &fills)
                .await?;
            RunOutcome::Live(outcome)
        }
    };

    info!(end = ?outcome.end(), "Session ended");
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::config::ConfigError;

    #[test]
    fn test_missing_config_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.yaml");

        let Err(err) = load_run_config(path.to_str()) else {
            panic!("missing explicit config should fail");
        };
        assert!(matches!(err, AppError::Config(ConfigError::ReadError { .. })));
    }

    #[test]
    fn test_invalid_config_is_config_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "replay:\n  step_delay_ms: 0").unwrap();

        let Err(err) = load_run_config(file.path().to_str()) else {
            panic!("zero step delay should fail validation");
        };
        assert!(matches!(
            err,
            AppError::Config(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn test_valid_config_loads() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "mode: static").unwrap();

        let config = load_run_config(file.path().to_str()).unwrap();
        assert_eq!(config.mode, RenderMode::Static);
    }

    #[test]
    fn test_no_fill_log_is_empty() {
        assert!(load_fills(None).unwrap().is_empty());
    }
}
