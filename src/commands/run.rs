//! Implementation of the `quay run` command.

use crate::cli::RunArgs;
use quay::config::{Config, LogFormat};
use quay::error::{PortError, Result};
use quay::harbor::Harbor;
use quay::logging::init_tracing;

/// Execute the `quay run` command.
pub fn cmd_run(args: RunArgs) -> Result<()> {
    let json = args.json;
    let config = resolve_config(args)?;
    init_tracing(&config).map_err(|e| PortError::Config(e.to_string()))?;

    let duration = config.duration();
    let harbor = Harbor::from_config(config)?;
    let report = harbor.run(duration)?;

    if json {
        let rendered = serde_json::to_string_pretty(&report)
            .map_err(|e| PortError::Io(format!("failed to serialize report: {}", e)))?;
        println!("{}", rendered);
    } else {
        print!("{}", report);
    }
    Ok(())
}

/// Load the config (or defaults) and apply command-line overrides.
pub(crate) fn resolve_config(args: RunArgs) -> Result<Config> {
    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    if let Some(secs) = args.duration_secs {
        config.duration_secs = secs;
    }
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    if let Some(path) = args.events {
        config.event_log = Some(path);
    }
    if let Some(format) = &args.log_format {
        config.log_format = LogFormat::from_str(format).ok_or_else(|| {
            PortError::Config(format!(
                "unknown log format '{}' (expected compact, pretty or json)",
                format
            ))
        })?;
    }

    config.validate()?;
    Ok(config)
}
