//! Telemetry utilities: logging setup and standard spans.

use tracing_subscriber::EnvFilter;

/// Install the global `tracing` subscriber.
///
/// Logs go to stderr so they never interleave with the chat view on stdout.
/// `RUST_LOG` overrides `default_filter`.
pub fn init(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    // A second call (tests, embedding) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Standardized span constructors for client observability.
pub mod spans {
    use tracing::{Span, info_span};

    /// Span covering one server connection, from open to close.
    pub fn connection(host: &str, port: u16) -> Span {
        info_span!("connection", host = %host, port = port)
    }

    /// Span for handling one inbound message.
    pub fn inbound(command: &str, origin: &str) -> Span {
        if origin.is_empty() {
            info_span!("inbound", command = %command)
        } else {
            info_span!("inbound", command = %command, origin = %origin)
        }
    }
}
