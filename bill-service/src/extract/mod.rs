//! Turns the utility's HTML bill page into a [`BillRecord`].
//!
//! The page has no stable ids or classes; values are found by the caption text
//! of the cell next to them. Caption matching is case-sensitive.

pub mod history;
pub mod page;

use bill_client::domain::{
    or_sentinel, BillInfo, BillRecord, BillingDetails, Charges, NOT_AVAILABLE, ZERO,
};

pub use history::extract_history;
pub use page::BillPage;

/// Phrases the bill site shows instead of a bill.
pub const NOT_FOUND_MARKERS: [&str; 2] = ["Record not found", "Invalid Reference Number"];

pub mod labels {
    pub const TARIFF: &str = "TARIFF";
    pub const LOAD: &str = "SANCTIONED LOAD";
    pub const CONNECTION_DATE: &str = "CONNECTION DATE";
    pub const FEEDER_NAME: &str = "FEEDER NAME";
    pub const DIVISION: &str = "DIVISION";

    pub const BILL_MONTH: &str = "BILL MONTH";
    pub const DUE_DATE: &str = "DUE DATE";
    pub const READING_DATE: &str = "READING DATE";
    pub const ISSUE_DATE: &str = "ISSUE DATE";
    pub const UNITS: &str = "UNITS CONSUMED";
    pub const METER_NO: &str = "METER NO";

    pub const COST_OF_ELECTRICITY: &str = "COST OF ELECTRICITY";
    pub const GST: &str = "GST";
    pub const TV_FEE: &str = "TV FEE";
    pub const ELECTRICITY_DUTY: &str = "ELECTRICITY DUTY";
    pub const FC_SURCHARGE: &str = "FC SURCHARGE";
    pub const QTR_TARIFF_ADJ: &str = "QTR ADJ";
    pub const TOTAL_PAYABLE: &str = "PAYABLE WITHIN";
    pub const TOTAL_AFTER_DUE: &str = "PAYABLE AFTER";
}

#[derive(thiserror::Error, Debug)]
pub enum ExtractError {
    #[error("bill site reports no record for this reference")]
    RecordNotFound,
    #[error("invalid selector {0}")]
    Selector(String),
}

/// Marker phrase found in the page text, if the site says there is no bill.
pub fn not_found_marker(page: &BillPage) -> Option<&'static str> {
    let text = page.visible_text();
    NOT_FOUND_MARKERS.into_iter().find(|m| text.contains(m))
}

/// Extract a full bill record from one fetched page.
///
/// Fails only when the page is a not-found notice or the page could not be
/// queried at all. A broken history section yields an empty history.
pub fn extract_bill(reference_number: &str, html: &str) -> Result<BillRecord, ExtractError> {
    let page = BillPage::parse(html)?;

    if let Some(marker) = not_found_marker(&page) {
        tracing::debug!(reference = %reference_number, marker, "bill page is a not-found notice");
        return Err(ExtractError::RecordNotFound);
    }

    let text = |label: &str| or_sentinel(&page.lookup_label(label), NOT_AVAILABLE);
    let number = |label: &str| or_sentinel(&page.lookup_label(label), ZERO);

    let (name, address) = page.name_and_address();
    let info = BillInfo {
        name: or_sentinel(&name, NOT_AVAILABLE),
        address: or_sentinel(&address, NOT_AVAILABLE),
        tariff: text(labels::TARIFF),
        load: text(labels::LOAD),
        connection_date: text(labels::CONNECTION_DATE),
        feeder_name: text(labels::FEEDER_NAME),
        division: text(labels::DIVISION),
    };

    let (prev_reading, pres_reading) = page.meter_readings();
    let billing = BillingDetails {
        month: text(labels::BILL_MONTH),
        due_date: text(labels::DUE_DATE),
        reading_date: text(labels::READING_DATE),
        issue_date: text(labels::ISSUE_DATE),
        units: number(labels::UNITS),
        pres_reading: or_sentinel(&pres_reading, ZERO),
        prev_reading: or_sentinel(&prev_reading, ZERO),
        meter_no: text(labels::METER_NO),
    };

    let charges = Charges {
        cost_of_electricity: number(labels::COST_OF_ELECTRICITY),
        gst: number(labels::GST),
        tv_fee: number(labels::TV_FEE),
        electricity_duty: number(labels::ELECTRICITY_DUTY),
        fc_surcharge: number(labels::FC_SURCHARGE),
        qtr_tariff_adj: number(labels::QTR_TARIFF_ADJ),
        total_payable: number(labels::TOTAL_PAYABLE),
        total_after_due: number(labels::TOTAL_AFTER_DUE),
    };

    let history = match extract_history(page.document()) {
        Ok(rows) => rows,
        Err(e) => {
            metrics::counter!("bill_history_parse_failures_total").increment(1);
            tracing::warn!(reference = %reference_number, error = %e, "history section unreadable, returning empty history");
            Vec::new()
        }
    };

    Ok(BillRecord {
        reference_number: reference_number.to_string(),
        info,
        billing,
        charges,
        history,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_BILL: &str = r#"<!DOCTYPE html>
<html>
<head><title>Electricity Bill</title></head>
<body>
<table>
  <tr><td>REFERENCE NO</td><td>04 11234 5678901</td></tr>
  <tr><td>TARIFF</td><td>A-1a(01)</td></tr>
  <tr><td>SANCTIONED LOAD</td><td>5</td></tr>
  <tr><td>CONNECTION DATE</td><td>12 MAR 2009</td></tr>
  <tr><td>FEEDER NAME</td><td></td><td>SHADMAN-2</td></tr>
  <tr><td>DIVISION</td><td>GULBERG</td></tr>
</table>
<table>
  <tr><td>NAME &amp; ADDRESS</td></tr>
  <tr><td>MUHAMMAD ASLAM</td><td>
      HOUSE 12 STREET 4
      MODEL TOWN LAHORE
  </td></tr>
</table>
<table>
  <tr><td>BILL MONTH</td><td>DEC 23</td></tr>
  <tr><td>READING DATE</td><td>18 DEC 23</td></tr>
  <tr><td>ISSUE DATE</td><td>20 DEC 23</td></tr>
  <tr><td>DUE DATE</td><td>02 JAN 24</td></tr>
  <tr><td>METER NO</td><td>PB-1234567</td></tr>
  <tr><td>UNITS CONSUMED</td><td>234</td></tr>
</table>
<table>
  <tr><td colspan="2">METER READING</td></tr>
  <tr><td>PREVIOUS</td><td>PRESENT</td></tr>
  <tr><td>10234</td><td>10468</td></tr>
</table>
<table>
  <tr><td>COST OF ELECTRICITY</td><td>7,480</td></tr>
  <tr><td>GST</td><td>1,271</td></tr>
  <tr><td>TV FEE</td><td>35</td></tr>
  <tr><td>ELECTRICITY DUTY</td><td>112</td></tr>
  <tr><td>FC SURCHARGE</td><td>101</td></tr>
  <tr><td>QTR ADJ</td><td>-84</td></tr>
  <tr><td>PAYABLE WITHIN</td><td>8,915</td></tr>
  <tr><td>PAYABLE AFTER</td><td>9,663</td></tr>
</table>
<table>
  <tr><td>MONTH</td><td>UNITS</td><td>BILL</td><td>PAYMENT</td></tr>
  <tr><td>NOV23</td><td>188</td><td>5,902</td><td>5,902</td></tr>
  <tr><td>OCT23</td><td>305</td><td>9,870</td><td>9,870</td></tr>
  <tr><td>SEP23</td><td>412</td><td>14,330</td><td>14,330</td></tr>
  <tr><td></td><td></td><td></td><td></td></tr>
</table>
</body>
</html>"#;

    #[test]
    fn extracts_every_section_of_a_sample_bill() {
        let record = extract_bill("04112345678901", SAMPLE_BILL).unwrap();

        assert_eq!(record.reference_number, "04112345678901");

        assert_eq!(record.info.name, "MUHAMMAD ASLAM");
        assert_eq!(record.info.address, "HOUSE 12 STREET 4 MODEL TOWN LAHORE");
        assert_eq!(record.info.tariff, "A-1a(01)");
        assert_eq!(record.info.load, "5");
        assert_eq!(record.info.connection_date, "12 MAR 2009");
        assert_eq!(record.info.feeder_name, "SHADMAN-2");
        assert_eq!(record.info.division, "GULBERG");

        assert_eq!(record.billing.month, "DEC 23");
        assert_eq!(record.billing.due_date, "02 JAN 24");
        assert_eq!(record.billing.reading_date, "18 DEC 23");
        assert_eq!(record.billing.issue_date, "20 DEC 23");
        assert_eq!(record.billing.units, "234");
        assert_eq!(record.billing.prev_reading, "10234");
        assert_eq!(record.billing.pres_reading, "10468");
        assert_eq!(record.billing.meter_no, "PB-1234567");

        assert_eq!(record.charges.cost_of_electricity, "7,480");
        assert_eq!(record.charges.gst, "1,271");
        assert_eq!(record.charges.tv_fee, "35");
        assert_eq!(record.charges.electricity_duty, "112");
        assert_eq!(record.charges.fc_surcharge, "101");
        assert_eq!(record.charges.qtr_tariff_adj, "-84");
        assert_eq!(record.charges.total_payable, "8,915");
        assert_eq!(record.charges.total_after_due, "9,663");

        let months: Vec<_> = record.history.iter().map(|h| h.month.as_str()).collect();
        assert_eq!(months, ["NOV23", "OCT23", "SEP23"]);
    }

    #[test]
    fn not_found_notice_short_circuits() {
        let html = "<html><body><table><tr><td>TARIFF</td><td>A-1</td></tr></table>\
                    <p>Record not found</p></body></html>";
        let res = extract_bill("1", html);
        assert!(matches!(res, Err(ExtractError::RecordNotFound)));
    }

    #[test]
    fn invalid_reference_notice_short_circuits() {
        let html = "<html><body><h3>Invalid Reference Number</h3></body></html>";
        assert!(matches!(extract_bill("1", html), Err(ExtractError::RecordNotFound)));
    }

    #[test]
    fn missing_history_does_not_affect_other_fields() {
        let html = "<html><body><table>\
                    <tr><td>DUE DATE</td><td>02 JAN 24</td></tr>\
                    <tr><td>GST</td><td>1,271</td></tr>\
                    </table></body></html>";

        let record = extract_bill("1", html).unwrap();

        assert!(record.history.is_empty());
        assert_eq!(record.billing.due_date, "02 JAN 24");
        assert_eq!(record.charges.gst, "1,271");
    }

    #[test]
    fn minimal_page_gets_sentinels_everywhere() {
        let record = extract_bill("1", "<html><body><p>maintenance</p></body></html>").unwrap();

        assert_eq!(record.info, BillInfo::default());
        assert_eq!(record.billing, BillingDetails::default());
        assert_eq!(record.charges, Charges::default());
        assert!(record.history.is_empty());
    }
}
