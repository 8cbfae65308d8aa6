use std::time::Instant;

use axum::{
    extract::{Query, State},
    Json,
};
use bill_client::domain::BillRecord;
use serde::{Deserialize, Serialize};
use tracing::Instrument;

use super::{error::ApiError, AppState};
use crate::{
    extract::{self, ExtractError},
    observability,
};

#[derive(Debug, Deserialize)]
pub struct LookupParams {
    refno: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct BillResponse {
    status: bool,
    #[serde(flatten)]
    record: BillRecord,
}

impl From<BillRecord> for BillResponse {
    fn from(record: BillRecord) -> Self {
        Self { status: true, record }
    }
}

pub async fn lookup_bill(
    State(state): State<AppState>,
    Query(params): Query<LookupParams>,
) -> Result<Json<BillResponse>, ApiError> {
    metrics::counter!("bill_lookup_requests_total").increment(1);

    let Some(reference) = params
        .refno
        .as_deref()
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .map(str::to_string)
    else {
        metrics::counter!("bill_lookup_missing_reference_total").increment(1);
        return Err(ApiError::MissingReference);
    };

    let span = observability::lookup_span(&reference);
    lookup(state, reference).instrument(span).await.map(Json)
}

async fn lookup(state: AppState, reference: String) -> Result<BillResponse, ApiError> {
    let started = Instant::now();
    let html = state.source.fetch_bill_html(&reference).await.map_err(|e| {
        metrics::counter!("bill_lookup_upstream_errors_total").increment(1);
        tracing::error!(error = %e, "bill site fetch failed");
        ApiError::Upstream
    })?;
    metrics::histogram!("bill_upstream_fetch_seconds").record(started.elapsed().as_secs_f64());

    // The parsed DOM is not Send; keep it on the blocking pool.
    let extracted = tokio::task::spawn_blocking(move || extract::extract_bill(&reference, &html))
        .await
        .map_err(|e| {
            metrics::counter!("bill_lookup_extract_errors_total").increment(1);
            tracing::error!(error = %e, "bill extraction task failed");
            ApiError::Upstream
        })?;

    match extracted {
        Ok(record) => {
            tracing::info!(history_rows = record.history.len(), "bill extracted");
            Ok(record.into())
        }
        Err(ExtractError::RecordNotFound) => {
            metrics::counter!("bill_lookup_not_found_total").increment(1);
            tracing::info!("bill site has no record for reference");
            Err(ApiError::NotFound)
        }
        Err(e) => {
            metrics::counter!("bill_lookup_extract_errors_total").increment(1);
            tracing::error!(error = %e, "bill page could not be queried");
            Err(ApiError::Upstream)
        }
    }
}
