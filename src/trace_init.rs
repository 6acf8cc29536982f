#[cfg(feature = "trace")]
use std::path::Path;
#[cfg(feature = "trace")]
use std::sync::Once;

#[cfg(feature = "trace")]
use tracing_subscriber::{fmt::format::FmtSpan, EnvFilter};

/// Log file created inside the host-provided directory.
#[cfg(feature = "trace")]
const TRACE_FILE: &str = "glyph-trace.jsonl";

/// Environment variable overriding the default filter.
#[cfg(feature = "trace")]
const FILTER_ENV: &str = "GLYPH_LOG";

#[cfg(feature = "trace")]
const DEFAULT_FILTER: &str = "glyph_engine=debug,glyph_chain=debug,glyph_core=debug";

#[cfg(feature = "trace")]
static INIT: Once = Once::new();

/// Route JSON trace events to `<log_dir>/glyph-trace.jsonl`. Later calls are
/// ignored.
#[cfg(feature = "trace")]
pub fn init_tracing(log_dir: &Path) {
    INIT.call_once(|| {
        let (writer, guard) =
            tracing_appender::non_blocking(tracing_appender::rolling::never(log_dir, TRACE_FILE));
        // Lives as long as the keyboard process.
        std::mem::forget(guard);

        let filter =
            EnvFilter::try_from_env(FILTER_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        tracing_subscriber::fmt()
            .json()
            .with_writer(writer)
            .with_target(true)
            .with_span_events(FmtSpan::CLOSE)
            .with_env_filter(filter)
            .init();
    });
}

#[cfg(not(feature = "trace"))]
pub fn init_tracing(_log_dir: &std::path::Path) {}
