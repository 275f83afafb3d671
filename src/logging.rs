//! Logging initialization for quay.
//!
//! Configures `tracing-subscriber` from the `log_level` and `log_format`
//! config fields. `RUST_LOG`, when set, takes precedence over `log_level`.

use crate::config::{Config, LogFormat};
use anyhow::Result;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Initialize the global tracing subscriber.
///
/// Must be called at most once per process, before ships start sailing.
pub fn init_tracing(config: &Config) -> Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let registry = tracing_subscriber::registry().with(env_filter);
    let initialized = match config.log_format {
        LogFormat::Compact => registry
            .with(tracing_subscriber::fmt::layer().compact().with_thread_names(true))
            .try_init(),
        LogFormat::Pretty => registry
            .with(tracing_subscriber::fmt::layer().pretty())
            .try_init(),
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json())
            .try_init(),
    };

    initialized.map_err(|e| {
        anyhow::anyhow!(
            "failed to initialize {:?} tracing subscriber: {}",
            config.log_format,
            e
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_second_init_is_rejected() {
        let mut config = Config::default();
        config.log_level = "warn".to_string();

        let _ = init_tracing(&config);
        let err = init_tracing(&config).unwrap_err();

        assert!(err.to_string().contains("tracing subscriber"));
    }
}
