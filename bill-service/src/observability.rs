use tracing::Span;
use tracing_subscriber::EnvFilter;

/// Env var holding an `EnvFilter` directive, e.g. `bill_service=debug`.
pub const LOG_ENV: &str = "BILL_SERVICE_LOG";
const DEFAULT_DIRECTIVE: &str = "bill_service=info,bill_client=info";

pub fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Span for one lookup, so every line logged while serving it carries the
/// reference number.
pub fn lookup_span(reference_number: &str) -> Span {
    tracing::info_span!("bill_lookup", reference = %reference_number)
}
