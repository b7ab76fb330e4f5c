use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Environment variable holding `tracing` filter directives for the binaries.
pub const LOG_ENV_VAR: &str = "MEDIACONV_LOG";

/// Install a JSON subscriber on stderr, filtered by `MEDIACONV_LOG`.
///
/// Only errors are logged when the variable is unset or unparsable, so stdout stays
/// clean for the CLI's artifact bytes. Try `MEDIACONV_LOG=mediaconv=debug,tower_http=info`
/// to see per-conversion events. Calling this more than once is harmless.
pub fn init() {
    let directives = std::env::var(LOG_ENV_VAR).ok();

    let json_to_stderr = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(std::io::stderr);

    let _ = tracing_subscriber::registry()
        .with(conversion_filter(directives.as_deref()))
        .with(json_to_stderr)
        .try_init();
}

fn conversion_filter(directives: Option<&str>) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(LevelFilter::ERROR.into())
        .parse_lossy(directives.unwrap_or_default())
}
