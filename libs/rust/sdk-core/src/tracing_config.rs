//! Subscriber setup for applications embedding the SDKs.
//!
//! The SDK crates only emit `tracing` events and spans; installing a
//! subscriber is the application's call. This helper wires the usual
//! `EnvFilter` + fmt layer in one line.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

const SDK_TARGETS: [&str; 2] = ["sdk_core", "secrets_manager_sdk"];

/// Tracing configuration.
#[derive(Debug, Clone)]
pub struct TracingConfig {
    /// Default filter directive when `RUST_LOG` is unset
    pub log_level: String,
    /// Level for the SDK crates, overriding `log_level` for their targets
    pub sdk_level: Option<String>,
    /// Whether to output JSON format
    pub json_output: bool,
    /// Whether to include the event target in each line
    pub with_target: bool,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            sdk_level: None,
            json_output: false,
            with_target: true,
        }
    }
}

impl TracingConfig {
    /// Set the default filter directive.
    #[must_use]
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Log the SDK crates at `level`, e.g. `debug` to see every request.
    #[must_use]
    pub fn with_sdk_level(mut self, level: impl Into<String>) -> Self {
        self.sdk_level = Some(level.into());
        self
    }

    /// The filter directive used when `RUST_LOG` is unset.
    #[must_use]
    pub fn filter_directive(&self) -> String {
        let mut directive = self.log_level.clone();
        if let Some(level) = &self.sdk_level {
            for target in SDK_TARGETS {
                directive.push_str(&format!(",{target}={level}"));
            }
        }
        directive
    }

    /// Enable JSON output.
    #[must_use]
    pub const fn with_json_output(mut self) -> Self {
        self.json_output = true;
        self
    }

    /// Drop event targets from the output.
    #[must_use]
    pub const fn without_target(mut self) -> Self {
        self.with_target = false;
        self
    }
}

/// Install a global subscriber built from `config`.
///
/// `RUST_LOG` takes precedence over [`TracingConfig::filter_directive`].
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init_tracing(config: &TracingConfig) -> Result<(), tracing_subscriber::util::TryInitError> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(config.filter_directive()));

    if config.json_output {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(config.with_target),
            )
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_target(config.with_target))
            .try_init()
    }
}
