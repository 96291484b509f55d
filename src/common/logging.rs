//! Logger setup. Everything else logs through the `log` macros.

use std::fs::OpenOptions;
use std::path::Path;

use anyhow::{Context, Result};
use env_logger::{Builder, Env, Target};

/// Starts `env_logger`, filtered by `RUST_LOG` (default `warn`).
///
/// With a log file, records are appended there. Without one, a full-screen
/// session only logs when `RUST_LOG` is set, since stderr shares the screen.
pub fn init(log_file: Option<&Path>, full_screen: bool) -> Result<()> {
    let env = Env::default().default_filter_or("warn");
    let mut builder = Builder::from_env(env);

    match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            builder.target(Target::Pipe(Box::new(file)));
        }
        None if full_screen && std::env::var_os("RUST_LOG").is_none() => {
            builder.filter_level(log::LevelFilter::Off);
        }
        None => {
            builder.target(Target::Stderr);
        }
    }

    builder
        .try_init()
        .context("Failed to initialize logger")?;
    Ok(())
}
