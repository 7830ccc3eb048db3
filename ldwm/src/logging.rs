//! Sets up `tracing` for the window manager.
use tracing::metadata::LevelFilter;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the filter directives, e.g. `ldwm_core=debug`.
pub const LOG_ENV: &str = "LDWM_LOG";

#[cfg(feature = "file-log")]
mod file {
    use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};

    const LOG_FILE_NAME: &str = "ldwm.log";

    /// A writer appending to `ldwm.log` in the cache directory.
    pub fn writer() -> Option<(NonBlocking, WorkerGuard)> {
        let dir = xdg::BaseDirectories::with_prefix("ldwm")
            .ok()?
            .create_cache_directory("")
            .map_err(|err| eprintln!("Couldn't create log directory: {err}"))
            .ok()?;
        let appender = tracing_appender::rolling::never(dir, LOG_FILE_NAME);
        Some(tracing_appender::non_blocking(appender))
    }
}

/// Keeps buffered log output flowing until dropped.
#[must_use]
pub struct LogGuard {
    #[cfg(feature = "file-log")]
    _file: Option<tracing_appender::non_blocking::WorkerGuard>,
}

/// Builds the filter from `directives`, falling back to `info` when they don't parse.
pub fn parse_log_level(directives: &str) -> (EnvFilter, Option<ParseError>) {
    let builder = EnvFilter::builder().with_default_directive(LevelFilter::INFO.into());
    match builder.clone().parse(directives) {
        Ok(filter) => (filter, None),
        Err(err) => (builder.parse_lossy(""), Some(err)),
    }
}

/// Installs the global subscriber: stderr always, and a log file with the `file-log` feature.
pub fn setup_logging() -> LogGuard {
    let directives = std::env::var(LOG_ENV).unwrap_or_default();
    let (filter, parse_err) = parse_log_level(&directives);

    let stderr = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);
    let subscriber = tracing_subscriber::registry().with(filter).with(stderr);

    #[cfg(feature = "file-log")]
    let (subscriber, guard) = {
        let (writer, guard) = file::writer().unzip();
        let layer = writer.map(|writer| {
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(writer)
        });
        (subscriber.with(layer), guard)
    };

    if let Err(err) = subscriber.try_init() {
        eprintln!("Couldn't setup global subscriber (logger): {err}");
    }
    if let Some(err) = parse_err {
        tracing::warn!("Invalid {} directives `{}`: {}", LOG_ENV, directives, err);
    }

    LogGuard {
        #[cfg(feature = "file-log")]
        _file: guard,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_directives_default_to_info() {
        let (filter, err) = parse_log_level("");
        assert!(err.is_none());
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::INFO));
    }

    #[test]
    fn directives_are_honoured() {
        let (filter, err) = parse_log_level("debug");
        assert!(err.is_none());
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::DEBUG));
    }

    #[test]
    fn bad_directives_fall_back_to_info() {
        let (filter, err) = parse_log_level("ldwm=loud");
        assert!(err.is_some());
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::INFO));
    }
}
