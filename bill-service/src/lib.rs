pub mod api;
pub mod config;
pub mod extract;
pub mod observability;
pub mod metrics_server;

pub use api::{router, AppState};
pub use extract::{extract_bill, ExtractError};
