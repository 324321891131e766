use tracing_subscriber::{
    EnvFilter, fmt, prelude::__tracing_subscriber_SubscriberExt, util::SubscriberInitExt,
};

/// Builds the event filter. `RUST_LOG`, when set and valid, replaces the
/// default entirely; otherwise only this crate logs, at warn or at debug when
/// `verbose`.
pub fn log_filter(verbose: bool, rust_log: Option<&str>) -> EnvFilter {
    if let Some(directives) = rust_log {
        match EnvFilter::try_new(directives) {
            Ok(filter) => return filter,
            Err(e) => eprintln!("Ignoring invalid RUST_LOG '{directives}': {e}"),
        }
    }
    let level = if verbose { "debug" } else { "warn" };
    EnvFilter::new(format!("quotetab={level}"))
}

pub fn init_logging(verbose: bool) {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();

    tracing_subscriber::registry()
        .with(fmt::layer().pretty().without_time().with_writer(std::io::stderr))
        .with(log_filter(verbose, rust_log.as_deref()))
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::level_filters::LevelFilter;

    #[test]
    fn test_default_filter_shows_warnings() {
        assert_eq!(log_filter(false, None).max_level_hint(), Some(LevelFilter::WARN));
    }

    #[test]
    fn test_verbose_filter_shows_debug() {
        assert_eq!(log_filter(true, None).max_level_hint(), Some(LevelFilter::DEBUG));
    }

    #[test]
    fn test_rust_log_overrides_default() {
        assert_eq!(
            log_filter(false, Some("quotetab=trace")).max_level_hint(),
            Some(LevelFilter::TRACE)
        );
        assert_eq!(
            log_filter(true, Some("off")).max_level_hint(),
            Some(LevelFilter::OFF)
        );
    }

    #[test]
    fn test_invalid_rust_log_falls_back() {
        assert_eq!(
            log_filter(true, Some("quotetab=loud")).max_level_hint(),
            Some(LevelFilter::DEBUG)
        );
    }
}
