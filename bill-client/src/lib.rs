pub mod domain;
pub mod remote;

pub use domain::{BillInfo, BillRecord, BillingDetails, Charges, HistoryEntry};
pub use remote::{BillSource, FetchError, HttpBillSource};
