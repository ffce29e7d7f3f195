use crate::config::LoggingConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Installs the global subscriber. `RUST_LOG` wins over the config.
///
/// Returns `false` when a subscriber was already installed, which happens when
/// the embedding application set up its own.
pub fn init_logger(config: &LoggingConfig) -> bool {
    let default_directive = match (config.verbose.unwrap_or(false), config.level.as_deref()) {
        (true, _) => "moneybox=debug,info".to_string(),
        (false, Some(level)) => format!("moneybox={}", level),
        (false, None) => "moneybox=info".to_string(),
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false);

    let result = if config.json.unwrap_or(false) {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer.json())
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer.compact())
            .try_init()
    };

    result.is_ok()
}
