//! Logging subscriber initialisation.

use tracing_subscriber::{
    EnvFilter, Layer, Registry, layer::SubscriberExt, util::SubscriberInitExt,
};

use crate::config::logging::{LogFormat, LoggingConfig};

use super::ObservabilityError;

/// Dependencies only worth hearing from at `warn` and above.
const NOISY_TARGETS: [&str; 4] = ["h2", "hyper", "reqwest", "rustls"];

pub(crate) fn init_subscriber(config: &LoggingConfig) -> Result<(), ObservabilityError> {
    tracing_subscriber::registry()
        .with(formatter(config.log_format))
        .with(env_filter(&config.log_level))
        .try_init()?;

    Ok(())
}

fn formatter(format: LogFormat) -> Box<dyn Layer<Registry> + Send + Sync> {
    let layer = tracing_subscriber::fmt::layer().with_target(true);

    match format {
        LogFormat::Compact => layer
            .compact()
            .with_file(true)
            .with_line_number(true)
            .boxed(),
        LogFormat::Json => layer
            .json()
            .with_current_span(true)
            .with_span_list(true)
            .boxed(),
    }
}

/// `RUST_LOG` when set, otherwise the configured level with noisy targets quietened.
fn env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives(level)))
}

fn default_directives(level: &str) -> String {
    std::iter::once(level.to_owned())
        .chain(NOISY_TARGETS.iter().map(|target| format!("{target}=warn")))
        .collect::<Vec<_>>()
        .join(",")
}
