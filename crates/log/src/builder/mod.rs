//! Subscriber construction

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt};

use crate::config::{Config, DisplayConfig, Format};
use crate::error::LogError;

type Filtered = tracing_subscriber::layer::Layered<EnvFilter, Registry>;
type BoxedLayer = Box<dyn Layer<Filtered> + Send + Sync + 'static>;

/// Install the global subscriber described by `config`.
///
/// Fails with [`LogError::Filter`] if `config.level` is not a valid filter
/// and with [`LogError::Init`] if a global subscriber is already set.
pub fn init(config: &Config) -> Result<(), LogError> {
    let filter = parse_filter(&config.level)?;
    let layer = format_layer(config.format, &config.display);

    Registry::default()
        .with(filter)
        .with(layer)
        .try_init()
        .map_err(|e| LogError::Init(e.to_string()))?;

    tracing::debug!(level = %config.level, format = %config.format, "logger initialized");
    Ok(())
}

/// Parse a level filter in `EnvFilter` syntax.
pub fn parse_filter(level: &str) -> Result<EnvFilter, LogError> {
    EnvFilter::try_new(level).map_err(|e| LogError::Filter {
        filter: level.to_owned(),
        reason: e.to_string(),
    })
}

macro_rules! fmt_layer {
    ($format:ident, $display:expr) => {{
        let display: &DisplayConfig = $display;
        let layer = fmt::layer()
            .$format()
            .with_writer(std::io::stderr)
            .with_ansi(display.colors)
            .with_target(display.target)
            .with_file(display.source)
            .with_line_number(display.source);
        if display.time {
            layer.boxed()
        } else {
            layer.without_time().boxed()
        }
    }};
}

fn format_layer(format: Format, display: &DisplayConfig) -> BoxedLayer {
    match format {
        Format::Pretty => fmt_layer!(pretty, display),
        Format::Compact => fmt_layer!(compact, display),
        Format::Json => {
            let layer = fmt::layer()
                .json()
                .with_writer(std::io::stderr)
                .with_current_span(true)
                .with_span_list(display.span_list)
                .flatten_event(display.flatten)
                .with_ansi(false)
                .with_target(display.target)
                .with_file(display.source)
                .with_line_number(display.source);
            if display.time {
                layer.boxed()
            } else {
                layer.without_time().boxed()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_filter_is_reported() {
        let err = parse_filter("stratus=loud").unwrap_err();
        assert!(matches!(err, LogError::Filter { ref filter, .. } if filter == "stratus=loud"));
    }

    #[test]
    fn directive_filters_parse() {
        assert!(parse_filter("debug,stratus_cloud=trace").is_ok());
    }

    #[test]
    fn every_format_builds() {
        for format in [Format::Pretty, Format::Compact, Format::Json] {
            let _ = format_layer(format, &DisplayConfig::default());
            let _ = format_layer(
                format,
                &DisplayConfig {
                    time: false,
                    ..DisplayConfig::default()
                },
            );
        }
    }

    #[test]
    fn second_init_fails() {
        let config = Config {
            level: "warn".into(),
            ..Config::default()
        };
        // Another test in this binary may have installed a subscriber first.
        let _ = init(&config);
        assert!(matches!(init(&config), Err(LogError::Init(_))));
    }
}
