use std::time::Duration;

use anyhow::Result;
use bill_client::remote::HttpBillSource;
use bill_service::{api, config::AppConfig, metrics_server, observability, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    observability::init_tracing();

    // Load configuration
    let cfg = AppConfig::load()?;

    // Start metrics server if configured
    if let Some(metrics_cfg) = &cfg.metrics {
        metrics_server::init(&metrics_cfg.bind_addr)?;
    }

    let upstream = &cfg.upstream;
    if upstream.accept_invalid_certs {
        tracing::warn!(
            base_url = %upstream.base_url,
            "TLS certificate validation toward the bill site is disabled"
        );
    }

    let source = HttpBillSource::new(
        &upstream.base_url,
        &upstream.reference_param,
        Duration::from_millis(upstream.timeout_ms),
        upstream.accept_invalid_certs,
        &upstream.user_agent,
    )?;

    api::serve(&cfg.server.bind_addr, AppState::new(source)).await
}
