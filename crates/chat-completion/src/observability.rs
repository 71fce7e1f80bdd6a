use std::path::{Path, PathBuf};

use once_cell::sync::OnceCell;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt as _;
use tracing_subscriber::util::SubscriberInitExt as _;

use crate::errors::CompletionError;

/// Filter used when neither `CHAT_COMPLETION_LOG_LEVEL` nor `RUST_LOG` is set.
///
/// Dependencies stay at `warn`; raise this crate alone with
/// `CHAT_COMPLETION_LOG_LEVEL=warn,chat_completion=debug` to see the
/// `completion.*` events.
pub const DEFAULT_FILTER: &str = "warn,chat_completion=info";

const DEFAULT_LOG_FILE: &str = "chat-completion.logs.jsonl";

static INIT: OnceCell<()> = OnceCell::new();

/// Where log records are written.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LogSink {
    /// Human-readable lines on stderr; stdout is left for completion text.
    Stderr,
    /// One JSON object per line, appended to `dir/file_name`.
    JsonFile { dir: PathBuf, file_name: String },
}

impl LogSink {
    /// Picks a sink from an optional log path (`CHAT_COMPLETION_JSON_LOG_PATH`).
    pub fn from_path(path: Option<&str>) -> Self {
        let Some(raw) = path.map(str::trim).filter(|p| !p.is_empty()) else {
            return Self::Stderr;
        };
        let path = Path::new(raw);
        let dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or(DEFAULT_LOG_FILE)
            .to_string();
        Self::JsonFile { dir, file_name }
    }

    /// Creates the log directory for file sinks.
    fn prepare(&self) -> Result<(), CompletionError> {
        match self {
            Self::Stderr => Ok(()),
            Self::JsonFile { dir, .. } => std::fs::create_dir_all(dir).map_err(|e| {
                CompletionError::Config(format!(
                    "cannot create log directory {}: {e}",
                    dir.display()
                ))
            }),
        }
    }
}

fn logging_disabled(value: Option<&str>) -> bool {
    matches!(
        value.map(|v| v.trim().to_ascii_lowercase()).as_deref(),
        Some("0" | "false" | "no" | "off" | "disabled")
    )
}

/// Builds the filter from an explicit directive, then `RUST_LOG`, then
/// `DEFAULT_FILTER`. An unparsable explicit directive is a config error.
pub fn resolve_filter(directive: Option<&str>) -> Result<EnvFilter, CompletionError> {
    if let Some(directive) = directive.map(str::trim).filter(|d| !d.is_empty()) {
        return EnvFilter::try_new(directive).map_err(|e| {
            CompletionError::Config(format!("invalid log filter {directive:?}: {e}"))
        });
    }
    Ok(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER)))
}

/// Installs the global subscriber once per process.
///
/// Reads `CHAT_COMPLETION_OBSERVABILITY_ENABLED` (set to `off`/`false`/`0` to
/// skip), `CHAT_COMPLETION_LOG_LEVEL`, `CHAT_COMPLETION_JSON_LOG_PATH` and
/// `RUST_LOG`. Later calls are no-ops, as is a process that already installed
/// its own subscriber.
pub fn init_observability() -> Result<(), CompletionError> {
    INIT.get_or_try_init(|| {
        let enabled = std::env::var("CHAT_COMPLETION_OBSERVABILITY_ENABLED").ok();
        if logging_disabled(enabled.as_deref()) {
            return Ok(());
        }
        let level = std::env::var("CHAT_COMPLETION_LOG_LEVEL").ok();
        let path = std::env::var("CHAT_COMPLETION_JSON_LOG_PATH").ok();
        install(resolve_filter(level.as_deref())?, LogSink::from_path(path.as_deref()))
    })
    .map(|_| ())
}

fn install(filter: EnvFilter, sink: LogSink) -> Result<(), CompletionError> {
    sink.prepare()?;
    let registry = tracing_subscriber::registry().with(filter);
    match sink {
        LogSink::Stderr => {
            let _ = registry
                .with(
                    tracing_subscriber::fmt::layer()
                        .compact()
                        .with_writer(std::io::stderr),
                )
                .try_init();
        }
        LogSink::JsonFile { dir, file_name } => {
            let _ = registry
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_current_span(true)
                        .with_writer(tracing_appender::rolling::never(dir, file_name)),
                )
                .try_init();
        }
    }
    Ok(())
}
