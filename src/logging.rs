//! Log setup for artworks-tui.
//!
//! The terminal belongs to the table, so every record goes to a daily-rotated
//! file. Where that file lives and which records pass the filter come from
//! `Settings` (and `--log-dir`); a non-empty `RUST_LOG` overrides the
//! configured filter.
//!
//! Page fetches are grouped under a `fetch` span on the `artworks_tui::fetch`
//! target, carrying the request token and page. The background task and the
//! code applying its result both enter it, so one request can be followed
//! from spawn to the moment its rows are shown or dropped:
//!
//! ```text
//! RUST_LOG=artworks_tui::fetch=debug artworks-tui
//! ```

use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::Span;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

use crate::config::Settings;

/// Filter used when neither `RUST_LOG` nor the config sets one.
pub const DEFAULT_LOG_FILTER: &str = "artworks_tui=info,warn";

/// Target of the per-request fetch span and its events.
pub const FETCH_TARGET: &str = "artworks_tui::fetch";

/// File name prefix; the appender adds the date.
const LOG_FILE_PREFIX: &str = "artworks-tui.log";

/// Initialize file logging from the application settings.
///
/// Returns the directory the log files are written to.
///
/// # Errors
///
/// Returns an error if the log directory cannot be determined or created,
/// if the filter does not parse, or if a global subscriber is already set.
pub fn init(settings: &Settings) -> anyhow::Result<PathBuf> {
    let log_dir = resolve_log_directory(settings.log_dir.as_deref())?;
    std::fs::create_dir_all(&log_dir)
        .with_context(|| format!("Could not create log directory {}", log_dir.display()))?;

    let directive = filter_directive(
        std::env::var("RUST_LOG").ok(),
        settings.log_filter.as_deref(),
    );
    let filter = EnvFilter::try_new(&directive)
        .with_context(|| format!("Invalid log filter '{}'", directive))?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, &log_dir, LOG_FILE_PREFIX);

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(true)
                .with_file(true)
                .with_line_number(true),
        )
        .with(filter)
        .try_init()?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        filter = %directive,
        log_dir = %log_dir.display(),
        "artworks-tui starting up"
    );

    Ok(log_dir)
}

/// Pick the filter directive: `RUST_LOG`, then the config, then the default.
///
/// A blank `RUST_LOG` counts as unset.
fn filter_directive(env: Option<String>, configured: Option<&str>) -> String {
    env.filter(|v| !v.trim().is_empty())
        .or_else(|| configured.map(str::to_string))
        .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string())
}

/// The directory log files go to.
///
/// A configured directory is used as is. Otherwise:
///
/// - Linux: `~/.local/share/artworks-tui/logs/`
/// - macOS: `~/Library/Application Support/artworks-tui/logs/`
/// - Windows: `C:\Users\<User>\AppData\Local\artworks-tui\logs\`
pub fn resolve_log_directory(configured: Option<&Path>) -> anyhow::Result<PathBuf> {
    if let Some(dir) = configured {
        return Ok(dir.to_path_buf());
    }

    let base_dir =
        dirs::data_local_dir().context("Could not determine local data directory")?;
    Ok(base_dir.join("artworks-tui").join("logs"))
}

/// The span one page fetch is logged under.
///
/// Entered by the background task while the request runs and again when its
/// result is applied or discarded.
pub fn fetch_span(request_id: u64, page: u32) -> Span {
    tracing::info_span!(target: FETCH_TARGET, "fetch", request_id, page)
}

/// Log application shutdown.
pub fn shutdown() {
    tracing::info!("artworks-tui shutting down");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_defaults() {
        assert_eq!(filter_directive(None, None), DEFAULT_LOG_FILTER);
    }

    #[test]
    fn test_filter_from_config() {
        assert_eq!(
            filter_directive(None, Some("artworks_tui=debug")),
            "artworks_tui=debug"
        );
    }

    #[test]
    fn test_rust_log_overrides_config() {
        assert_eq!(
            filter_directive(Some("artworks_tui::fetch=trace".to_string()), Some("warn")),
            "artworks_tui::fetch=trace"
        );
    }

    #[test]
    fn test_blank_rust_log_is_ignored() {
        assert_eq!(filter_directive(Some("  ".to_string()), Some("warn")), "warn");
    }

    #[test]
    fn test_configured_log_directory_wins() {
        let dir = tempfile::tempdir().unwrap();
        let resolved = resolve_log_directory(Some(dir.path())).unwrap();
        assert_eq!(resolved, dir.path());
    }

    #[test]
    fn test_default_log_directory() {
        let dir = resolve_log_directory(None).unwrap();
        assert!(dir.ends_with("artworks-tui/logs"));
    }

    #[test]
    fn test_fetch_span_metadata() {
        tracing::subscriber::with_default(tracing_subscriber::registry(), || {
            let span = fetch_span(7, 3);
            let metadata = span.metadata().unwrap();
            assert_eq!(metadata.name(), "fetch");
            assert_eq!(metadata.target(), FETCH_TARGET);
            assert!(metadata.fields().field("request_id").is_some());
            assert!(metadata.fields().field("page").is_some());
        });
    }
}
