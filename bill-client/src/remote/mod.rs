pub mod bill_source;

pub use bill_source::{BillSource, FetchError, HttpBillSource};
