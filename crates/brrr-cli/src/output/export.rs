use brrr_core::{DealRecord, Money, Percent};
use rust_decimal::RoundingStrategy;
use serde::Serialize;
use std::fs::File;
use std::io::Write;

/// One row of the human-readable deal export.
#[derive(Debug, Serialize)]
struct ExportRow {
    #[serde(rename = "Address")]
    address: String,
    #[serde(rename = "Purchase Price")]
    purchase_price: String,
    #[serde(rename = "Deposit")]
    deposit: String,
    #[serde(rename = "Refurb Cost")]
    refurb_cost: String,
    #[serde(rename = "Stamp Duty")]
    stamp_duty: String,
    #[serde(rename = "Total Fees")]
    total_fees: String,
    #[serde(rename = "Monthly Rent")]
    monthly_rent: String,
    #[serde(rename = "Yield %")]
    yield_percent: String,
    #[serde(rename = "ROI %")]
    roi_percent: String,
    #[serde(rename = "Cash Left In")]
    cash_left_in: String,
}

impl From<&DealRecord> for ExportRow {
    fn from(r: &DealRecord) -> Self {
        ExportRow {
            address: r.address.clone(),
            purchase_price: format_money(r.purchase_price),
            deposit: format_money(r.deposit),
            refurb_cost: format_money(r.refurb_cost),
            stamp_duty: format_money(r.stamp_duty),
            total_fees: format_money(r.total_fees),
            monthly_rent: format_money(r.rent_monthly),
            yield_percent: format_percent(r.yield_percent),
            roi_percent: format_percent(r.roi_percent),
            cash_left_in: format_money(r.cash_left_in),
        }
    }
}

/// Two decimal places, half away from zero.
pub fn format_money(value: Money) -> String {
    format!(
        "{:.2}",
        value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    )
}

pub fn format_percent(value: Percent) -> String {
    format!("{}%", format_money(value))
}

/// Write deal records as CSV with display headers.
pub fn write_export<W: Write>(writer: W, records: &[DealRecord]) -> Result<(), csv::Error> {
    let mut wtr = csv::Writer::from_writer(writer);
    if records.is_empty() {
        wtr.write_record([
            "Address",
            "Purchase Price",
            "Deposit",
            "Refurb Cost",
            "Stamp Duty",
            "Total Fees",
            "Monthly Rent",
            "Yield %",
            "ROI %",
            "Cash Left In",
        ])?;
    }
    for record in records {
        wtr.serialize(ExportRow::from(record))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Export deal records to a CSV file at `path`.
pub fn export_to_path(path: &str, records: &[DealRecord]) -> Result<(), Box<dyn std::error::Error>> {
    let file = File::create(path).map_err(|e| format!("Failed to create '{}': {}", path, e))?;
    write_export(file, records)?;
    log::info!("Exported {} deals to {}", records.len(), path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use brrr_core::{compute, DealInput};
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    fn sample_record() -> DealRecord {
        compute(&DealInput {
            address: "1 High St".into(),
            purchase_price: dec!(200000),
            deposit_percent: dec!(25),
            refurb_cost: dec!(20000),
            rent_monthly: dec!(1200),
            post_refurb_value: dec!(260000),
            latitude: None,
            longitude: None,
        })
    }

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(dec!(9750)), "9750.00");
        assert_eq!(format_money(dec!(70.3125)), "70.31");
        assert_eq!(format_money(dec!(0.005)), "0.01");
        assert_eq!(format_money(dec!(-110450)), "-110450.00");
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(dec!(7.2)), "7.20%");
    }

    #[test]
    fn test_write_export() {
        let mut buf = Vec::new();
        write_export(&mut buf, &[sample_record()]).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let mut lines = text.lines();

        assert_eq!(
            lines.next().unwrap(),
            "Address,Purchase Price,Deposit,Refurb Cost,Stamp Duty,Total Fees,Monthly Rent,Yield %,ROI %,Cash Left In"
        );
        assert_eq!(
            lines.next().unwrap(),
            "1 High St,200000.00,50000.00,20000.00,9750.00,83050.00,1200.00,7.20%,0.00%,-110450.00"
        );
        assert!(lines.next().is_none());
    }

    #[test]
    fn test_write_export_empty_has_header_only() {
        let mut buf = Vec::new();
        write_export(&mut buf, &[]).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text.lines().count(), 1);
    }

    #[test]
    fn test_export_to_path_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("export.csv");
        let path = path.to_str().unwrap();

        export_to_path(path, &[sample_record(), sample_record()]).unwrap();
        let text = std::fs::read_to_string(path).unwrap();
        assert_eq!(text.lines().count(), 3);
        assert!(text.lines().nth(2).unwrap().starts_with("1 High St,200000.00,"));
    }

    #[test]
    fn test_export_to_path_bad_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("export.csv");
        let err = export_to_path(path.to_str().unwrap(), &[]).unwrap_err();
        assert!(err.to_string().starts_with("Failed to create"));
    }
}
