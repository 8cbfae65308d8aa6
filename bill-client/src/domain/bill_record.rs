use serde::{Deserialize, Serialize};

/// Placeholder for descriptive fields the bill page did not provide.
pub const NOT_AVAILABLE: &str = "N/A";
/// Placeholder for numeric-looking fields (units, readings, amounts).
pub const ZERO: &str = "0";

/// Trimmed `value`, or `sentinel` when nothing is left after trimming.
pub fn or_sentinel(value: &str, sentinel: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        sentinel.to_string()
    } else {
        trimmed.to_string()
    }
}

/// One bill, as extracted from a single fetch of the upstream page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillRecord {
    pub reference_number: String,
    pub info: BillInfo,
    pub billing: BillingDetails,
    pub charges: Charges,
    pub history: Vec<HistoryEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillInfo {
    pub name: String,
    pub address: String,
    pub tariff: String,
    pub load: String,
    pub connection_date: String,
    pub feeder_name: String,
    pub division: String,
}

impl Default for BillInfo {
    fn default() -> Self {
        Self {
            name: NOT_AVAILABLE.to_string(),
            address: NOT_AVAILABLE.to_string(),
            tariff: NOT_AVAILABLE.to_string(),
            load: NOT_AVAILABLE.to_string(),
            connection_date: NOT_AVAILABLE.to_string(),
            feeder_name: NOT_AVAILABLE.to_string(),
            division: NOT_AVAILABLE.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillingDetails {
    pub month: String,
    pub due_date: String,
    pub reading_date: String,
    pub issue_date: String,
    pub units: String,
    pub pres_reading: String,
    pub prev_reading: String,
    pub meter_no: String,
}

impl Default for BillingDetails {
    fn default() -> Self {
        Self {
            month: NOT_AVAILABLE.to_string(),
            due_date: NOT_AVAILABLE.to_string(),
            reading_date: NOT_AVAILABLE.to_string(),
            issue_date: NOT_AVAILABLE.to_string(),
            units: ZERO.to_string(),
            pres_reading: ZERO.to_string(),
            prev_reading: ZERO.to_string(),
            meter_no: NOT_AVAILABLE.to_string(),
        }
    }
}

/// Currency amounts, kept in the formatting the bill page uses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Charges {
    pub cost_of_electricity: String,
    pub gst: String,
    pub tv_fee: String,
    pub electricity_duty: String,
    pub fc_surcharge: String,
    pub qtr_tariff_adj: String,
    pub total_payable: String,
    pub total_after_due: String,
}

impl Default for Charges {
    fn default() -> Self {
        Self {
            cost_of_electricity: ZERO.to_string(),
            gst: ZERO.to_string(),
            tv_fee: ZERO.to_string(),
            electricity_duty: ZERO.to_string(),
            fc_surcharge: ZERO.to_string(),
            qtr_tariff_adj: ZERO.to_string(),
            total_payable: ZERO.to_string(),
            total_after_due: ZERO.to_string(),
        }
    }
}

/// A row of the trailing usage-history table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub month: String,
    pub units: String,
    pub bill: String,
    pub payment: String,
}
