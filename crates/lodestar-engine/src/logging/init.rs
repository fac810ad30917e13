use std::sync::Once;

/// How the toolkit's own logger is set up when the host has none.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Directive string such as `"warn,lodestar_ui=trace"`. Falls back to
    /// `RUST_LOG`, then to `info`.
    pub env_filter: Option<String>,
    pub write_style: env_logger::WriteStyle,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { env_filter: None, write_style: env_logger::WriteStyle::Auto }
    }
}

impl LoggingConfig {
    pub fn with_filter(filter: impl Into<String>) -> Self {
        Self { env_filter: Some(filter.into()), ..Self::default() }
    }

    fn directives(&self) -> Option<String> {
        self.env_filter.clone().or_else(|| std::env::var("RUST_LOG").ok())
    }
}

static INIT: Once = Once::new();

/// Installs an `env_logger` backend for the studio and tests.
///
/// Only the first call does anything. Embedded in a game client, the client's
/// logger is usually installed already and stays in charge.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();
        match config.directives() {
            Some(directives) => builder.parse_filters(&directives),
            None => builder.filter_level(log::LevelFilter::Info),
        };
        builder.write_style(config.write_style);

        match builder.try_init() {
            Ok(()) => log::debug!("lodestar logger installed"),
            Err(_) => log::debug!("host logger already present"),
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_filter_wins_over_environment() {
        let config = LoggingConfig::with_filter("lodestar_ui=trace");
        assert_eq!(config.directives().as_deref(), Some("lodestar_ui=trace"));
    }

    #[test]
    fn repeated_init_is_harmless() {
        init_logging(LoggingConfig::with_filter("off"));
        init_logging(LoggingConfig::default());
    }
}
