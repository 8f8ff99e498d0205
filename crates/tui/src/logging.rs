use std::{fs, path::PathBuf};

use directories::BaseDirs;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_FILTER: &str = "core=info,tui=info,bridges=info";

fn log_dir() -> Option<PathBuf> {
    let base = BaseDirs::new()?;
    Some(base.data_dir().join("swipecon").join("logs"))
}

// RUST_LOG wins when set; otherwise every crate logs at info.
fn filter_directives(from_env: Option<String>) -> String {
    from_env
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_FILTER.to_string())
}

/// Send logs to a file, since the terminal belongs to the UI. Keep the guard
/// alive for the life of the process so buffered lines get flushed.
///
/// Logging is best-effort: without a usable log directory the app runs
/// unlogged.
pub fn init_logging() -> Option<WorkerGuard> {
    let dir = log_dir()?;
    if let Err(e) = fs::create_dir_all(&dir) {
        eprintln!("swipecon: logging disabled, cannot create {}: {}", dir.display(), e);
        return None;
    }
    let appender = tracing_appender::rolling::never(&dir, "swipecon.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let directives = filter_directives(std::env::var(EnvFilter::DEFAULT_ENV).ok());
    tracing_subscriber::registry()
        .with(fmt::layer().compact().with_ansi(false).with_writer(writer))
        .with(EnvFilter::builder().parse_lossy(directives))
        .init();

    Some(guard)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_filter_covers_every_target() {
        assert_eq!(filter_directives(None), DEFAULT_FILTER);
        assert_eq!(filter_directives(Some("  ".into())), DEFAULT_FILTER);
        assert_eq!(filter_directives(Some("tui=debug".into())), "tui=debug");
        assert!(EnvFilter::builder().parse(DEFAULT_FILTER).is_ok());
    }
}
