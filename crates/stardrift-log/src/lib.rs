//! Structured logging for Stardrift via the `tracing` ecosystem.
//!
//! Console output with uptime timestamps and module paths, plus a JSON file
//! sink in debug builds for post-mortem analysis. The log level can be
//! overridden from configuration or the `RUST_LOG` environment variable.

use std::path::Path;

use stardrift_config::Config;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Default filter: `info` everywhere, with the chatty GPU crates quieted.
const DEFAULT_FILTER: &str = "info,wgpu=warn,naga=warn";

/// Initialize the tracing subscriber.
///
/// * `log_dir` — optional directory for the JSON log file (debug builds only)
/// * `debug_build` — whether this is a debug build (enables file logging)
/// * `config` — optional configuration whose `debug.log_level` takes
///   precedence over the default filter (but not over `RUST_LOG`)
pub fn init_logging(log_dir: Option<&Path>, debug_build: bool, config: Option<&Config>) {
    let filter_str = config
        .map(|c| c.debug.log_level.as_str())
        .filter(|level| !level.is_empty())
        .unwrap_or(DEFAULT_FILTER);

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter_str));

    let console_layer = fmt::layer()
        .with_target(true)
        .with_level(true)
        .with_timer(fmt::time::uptime());

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer);

    if debug_build
        && let Some(log_dir) = log_dir
        && std::fs::create_dir_all(log_dir).is_ok()
        && let Ok(log_file) = std::fs::File::create(log_dir.join("stardrift.log"))
    {
        let file_layer = fmt::layer()
            .with_writer(log_file)
            .with_ansi(false)
            .with_target(true)
            .with_timer(fmt::time::uptime())
            .json();

        subscriber.with(file_layer).init();
        tracing::info!("Logging initialized (console + JSON file in {})", log_dir.display());
        return;
    }

    subscriber.init();
    tracing::info!("Logging initialized");
}

/// An `EnvFilter` built from the default filter string.
pub fn default_env_filter() -> EnvFilter {
    EnvFilter::new(DEFAULT_FILTER)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_quiets_gpu_crates() {
        let filter = default_env_filter();
        let filter_str = format!("{filter}");
        assert!(filter_str.contains("wgpu=warn"));
        assert!(filter_str.contains("naga=warn"));
        assert!(filter_str.contains("info"));
    }

    #[test]
    fn test_config_level_override() {
        let mut config = Config::default();
        config.debug.log_level = "debug".to_string();
        let level = Some(&config)
            .map(|c| c.debug.log_level.as_str())
            .filter(|l| !l.is_empty())
            .unwrap_or(DEFAULT_FILTER);
        assert_eq!(level, "debug");
    }

    #[test]
    fn test_empty_config_level_falls_back() {
        let config = Config::default();
        let level = Some(&config)
            .map(|c| c.debug.log_level.as_str())
            .filter(|l| !l.is_empty())
            .unwrap_or(DEFAULT_FILTER);
        assert_eq!(level, DEFAULT_FILTER);
    }
}
