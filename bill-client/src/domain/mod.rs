pub mod bill_record;

pub use bill_record::{
    or_sentinel, BillInfo, BillRecord, BillingDetails, Charges, HistoryEntry, NOT_AVAILABLE, ZERO,
};
