//! Implementation of the `quay init` command.
//!
//! Writes the default configuration so it can be edited before a run.

use crate::cli::InitArgs;
use quay::config::Config;
use quay::error::{PortError, Result};
use quay::fs::atomic_write_file;

/// Execute the `quay init` command.
///
/// Refuses to overwrite an existing file unless `--force` is given.
pub fn cmd_init(args: InitArgs) -> Result<()> {
    write_default_config(&args)?;

    println!("Wrote default config to {}", args.path.display());
    println!();
    println!("Start the harbor with:");
    println!("  quay run --config {}", args.path.display());
    Ok(())
}

pub(crate) fn write_default_config(args: &InitArgs) -> Result<()> {
    if args.path.exists() && !args.force {
        return Err(PortError::Config(format!(
            "'{}' already exists (use --force to overwrite)",
            args.path.display()
        )));
    }

    let yaml = Config::default().to_yaml()?;
    atomic_write_file(&args.path, &yaml)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_init_writes_loadable_config() {
        let temp_dir = TempDir::new().unwrap();
        let args = InitArgs {
            path: temp_dir.path().join("quay.yaml"),
            force: false,
        };

        write_default_config(&args).unwrap();

        let loaded = Config::load(&args.path).unwrap();
        assert_eq!(loaded.berth_count, Config::default().berth_count);
        assert_eq!(loaded.ships.len(), Config::default().ships.len());
    }

    #[test]
    fn test_init_refuses_existing_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("quay.yaml");
        fs::write(&path, "keep me").unwrap();

        let args = InitArgs {
            path: path.clone(),
            force: false,
        };
        let err = write_default_config(&args).unwrap_err();

        assert!(matches!(err, PortError::Config(_)));
        assert_eq!(fs::read_to_string(&path).unwrap(), "keep me");
    }

    #[test]
    fn test_init_force_overwrites() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("quay.yaml");
        fs::write(&path, "old").unwrap();

        let args = InitArgs { path, force: true };
        write_default_config(&args).unwrap();

        assert!(Config::load(&args.path).is_ok());
    }
}
