//! Structured logging for the orrery viewer.
//!
//! Console logging via the `tracing` ecosystem: timestamps relative to
//! startup, module paths, severity levels, and environment-based filtering.
//! The config system's `log_level` setting provides the default filter when
//! `RUST_LOG` is unset.

use orrery_config::Config;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the tracing subscriber for the viewer.
///
/// The filter is resolved in priority order: the `RUST_LOG` environment
/// variable, then the config's `debug.log_level`, then the built-in default
/// (`info` with wgpu/naga noise demoted to `warn`).
pub fn init_logging(config: Option<&Config>) {
    let filter_str = match config {
        Some(config) if !config.debug.log_level.is_empty() => {
            format!("{},wgpu=warn,naga=warn", config.debug.log_level)
        }
        _ => "info,wgpu=warn,naga=warn".to_string(),
    };

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&filter_str));

    let console_layer = fmt::layer()
        .with_target(true)
        .with_level(true)
        .with_timer(fmt::time::uptime());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .init();
}

/// Create an `EnvFilter` with the default filter string.
///
/// `info` for all targets, `warn` for `wgpu` and `naga` to reduce noise.
pub fn default_env_filter() -> EnvFilter {
    EnvFilter::new("info,wgpu=warn,naga=warn")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_log_level() {
        let filter = default_env_filter();
        let filter_str = format!("{}", filter);
        assert!(filter_str.contains("wgpu=warn"));
        assert!(filter_str.contains("naga=warn"));
        assert!(filter_str.contains("info"));
    }

    #[test]
    fn test_config_level_feeds_filter_string() {
        let mut config = orrery_config::Config::default();
        config.debug.log_level = "debug".to_string();
        let filter_str = format!("{},wgpu=warn,naga=warn", config.debug.log_level);
        let filter = EnvFilter::new(&filter_str);
        assert!(format!("{}", filter).contains("debug"));
    }

    #[test]
    fn test_env_filter_parsing() {
        let valid_filters = [
            "info",
            "debug,orrery_render=trace",
            "warn,orrery_scene=debug",
            "error",
        ];

        for filter_str in &valid_filters {
            let result = EnvFilter::try_from(*filter_str);
            assert!(result.is_ok(), "Failed to parse filter: {}", filter_str);
        }
    }
}
