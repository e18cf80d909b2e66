//! Construction of the diagnostics collaborator.
//!
//! Nothing in the crate installs a global subscriber. The binary builds a
//! [`Dispatch`] from [`LogConfig`] and runs the pipeline inside
//! [`tracing::dispatcher::with_default`], which keeps library code free of
//! process-wide state and lets tests supply their own subscriber.

use serde::{Deserialize, Serialize};
use tracing::Dispatch;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::costs::error::{CostError, Result};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Filter directive used when `RUST_LOG` is not set, e.g. `info`.
    pub level: String,
    pub format: LogFormat,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Text,
        }
    }
}

/// Builds the dispatcher for a run. `RUST_LOG` takes precedence over the
/// configured level. Output goes to stderr.
pub fn build_dispatch(config: &LogConfig) -> Result<Dispatch> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.level)
            .map_err(|error| CostError::Logging(format!("{}: {error}", config.level)))?,
    };

    let dispatch = match config.format {
        LogFormat::Json => Dispatch::new(
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().json().with_writer(std::io::stderr)),
        ),
        LogFormat::Text => Dispatch::new(
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().with_target(true).with_writer(std::io::stderr)),
        ),
    };
    Ok(dispatch)
}
