use brrr_core::{DealInput, Money, Percent};
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::fs::{self, File};
use std::io::Read;
use std::path::{Path, PathBuf};

/// Read a JSON file and deserialise into a typed struct.
pub fn read_json<T: DeserializeOwned>(path: &str) -> Result<T, Box<dyn std::error::Error>> {
    let canonical = resolve_path(path)?;
    let contents = fs::read_to_string(&canonical)
        .map_err(|e| format!("Failed to read '{}': {}", canonical.display(), e))?;
    let value: T = serde_json::from_str(&contents)
        .map_err(|e| format!("Failed to parse '{}': {}", canonical.display(), e))?;
    Ok(value)
}

/// Read a batch of deals from a `.json` array or a CSV file whose headers
/// match the `DealInput` field names.
pub fn read_deals(path: &str) -> Result<Vec<DealInput>, Box<dyn std::error::Error>> {
    let is_json = Path::new(path)
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let deals = if is_json {
        read_json::<Vec<DealInput>>(path)?
    } else {
        let canonical = resolve_path(path)?;
        let file = File::open(&canonical)
            .map_err(|e| format!("Failed to read '{}': {}", canonical.display(), e))?;
        parse_deals_csv(file)
            .map_err(|e| format!("Failed to parse '{}': {}", canonical.display(), e))?
    };

    log::info!("Read {} deals from {}", deals.len(), path);
    Ok(deals)
}

/// One CSV row. Cells are parsed as decimal text; csv would otherwise infer
/// floats and drop digits past f64 precision.
#[derive(Debug, Deserialize)]
struct DealRow {
    #[serde(default)]
    address: String,
    #[serde(with = "rust_decimal::serde::str")]
    purchase_price: Money,
    #[serde(with = "rust_decimal::serde::str")]
    deposit_percent: Percent,
    #[serde(default, with = "rust_decimal::serde::str")]
    refurb_cost: Money,
    #[serde(default, with = "rust_decimal::serde::str")]
    rent_monthly: Money,
    #[serde(default, with = "rust_decimal::serde::str")]
    post_refurb_value: Money,
    #[serde(default, with = "rust_decimal::serde::str_option")]
    latitude: Option<Decimal>,
    #[serde(default, with = "rust_decimal::serde::str_option")]
    longitude: Option<Decimal>,
}

impl From<DealRow> for DealInput {
    fn from(row: DealRow) -> Self {
        DealInput {
            address: row.address,
            purchase_price: row.purchase_price,
            deposit_percent: row.deposit_percent,
            refurb_cost: row.refurb_cost,
            rent_monthly: row.rent_monthly,
            post_refurb_value: row.post_refurb_value,
            latitude: row.latitude,
            longitude: row.longitude,
        }
    }
}

/// Parse CSV deal rows. Blank latitude/longitude cells become `None`.
pub fn parse_deals_csv<R: Read>(reader: R) -> Result<Vec<DealInput>, csv::Error> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    rdr.deserialize::<DealRow>()
        .map(|row| row.map(DealInput::from))
        .collect()
}

/// Resolve and validate the path, preventing directory traversal.
fn resolve_path(path: &str) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let p = Path::new(path);
    let canonical = if p.is_absolute() {
        p.to_path_buf()
    } else {
        std::env::current_dir()?.join(p)
    };

    if !canonical.exists() {
        return Err(format!("File not found: {}", canonical.display()).into());
    }

    if !canonical.is_file() {
        return Err(format!("Not a file: {}", canonical.display()).into());
    }

    Ok(canonical)
}
