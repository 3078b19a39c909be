// 🏠 Resale Record - One HDB resale transaction
// Typed row schema + immutable record with derived price per unit area

use crate::error::RecordError;
use csv::StringRecord;
use serde::Deserialize;
use std::fmt;

// ============================================================================
// ROW SCHEMA
// ============================================================================

/// ResaleRow - One CSV row, keyed by exact header name
///
/// `month` is optional and defaults to the empty string. Every other column
/// is required; a missing one fails deserialization. Unknown columns are
/// ignored. Numeric columns stay as text here and are converted by
/// `ResaleRecord::new`.
#[derive(Debug, Clone, Deserialize)]
pub struct ResaleRow {
    #[serde(default)]
    pub month: String,
    pub town: String,
    pub flat_type: String,
    pub block: String,
    pub street_name: String,
    pub storey_range: String,
    pub floor_area_sqm: String,
    pub flat_model: String,
    pub lease_commence_date: String,
    pub remaining_lease: String,
    pub resale_price: String,
}

/// Parse one raw CSV record against the header row.
pub fn parse_row(headers: &StringRecord, record: &StringRecord) -> Result<ResaleRecord, RecordError> {
    let row: ResaleRow = record.deserialize(Some(headers))?;
    ResaleRecord::try_from(row)
}

/// Render a raw row as `{'header': 'value', ...}` for the error log.
///
/// Headers beyond the end of a short row render as `None`; fields beyond the
/// last header are collected under a trailing `None: [...]` entry.
pub fn describe_row(headers: &StringRecord, record: &StringRecord) -> String {
    let mut fields: Vec<String> = headers
        .iter()
        .enumerate()
        .map(|(i, header)| match record.get(i) {
            Some(value) => format!("{}: {}", quote(header), quote(value)),
            None => format!("{}: None", quote(header)),
        })
        .collect();

    let extra: Vec<String> = record.iter().skip(headers.len()).map(quote).collect();
    if !extra.is_empty() {
        fields.push(format!("None: [{}]", extra.join(", ")));
    }

    format!("{{{}}}", fields.join(", "))
}

fn quote(value: &str) -> String {
    format!("'{}'", value.replace('\\', "\\\\").replace('\'', "\\'"))
}

// ============================================================================
// RECORD
// ============================================================================

/// ResaleRecord - Immutable once constructed
#[derive(Debug, Clone, PartialEq)]
pub struct ResaleRecord {
    month: String,
    town: String,
    flat_type: String,
    block: String,
    street_name: String,
    storey_range: String,
    floor_area_sqm: f64,
    flat_model: String,
    lease_commence_date: String,
    remaining_lease: String,
    resale_price: f64,
}

impl ResaleRecord {
    /// Build a record, converting the two numeric columns to `f64`.
    ///
    /// Fails if either number does not parse, or if the floor area is not a
    /// positive finite value (the price ratio would be undefined).
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        month: &str,
        town: &str,
        flat_type: &str,
        block: &str,
        street_name: &str,
        storey_range: &str,
        floor_area_sqm: &str,
        flat_model: &str,
        lease_commence_date: &str,
        remaining_lease: &str,
        resale_price: &str,
    ) -> Result<Self, RecordError> {
        let floor_area_sqm = parse_float("floor_area_sqm", floor_area_sqm)?;
        let resale_price = parse_float("resale_price", resale_price)?;

        if !(floor_area_sqm.is_finite() && floor_area_sqm > 0.0) {
            return Err(RecordError::NonPositiveArea(floor_area_sqm));
        }

        Ok(ResaleRecord {
            month: month.to_string(),
            town: town.to_string(),
            flat_type: flat_type.to_string(),
            block: block.to_string(),
            street_name: street_name.to_string(),
            storey_range: storey_range.to_string(),
            floor_area_sqm,
            flat_model: flat_model.to_string(),
            lease_commence_date: lease_commence_date.to_string(),
            remaining_lease: remaining_lease.to_string(),
            resale_price,
        })
    }

    pub fn month(&self) -> &str {
        &self.month
    }

    pub fn town(&self) -> &str {
        &self.town
    }

    pub fn flat_type(&self) -> &str {
        &self.flat_type
    }

    pub fn block(&self) -> &str {
        &self.block
    }

    pub fn street_name(&self) -> &str {
        &self.street_name
    }

    pub fn storey_range(&self) -> &str {
        &self.storey_range
    }

    pub fn floor_area_sqm(&self) -> f64 {
        self.floor_area_sqm
    }

    pub fn flat_model(&self) -> &str {
        &self.flat_model
    }

    pub fn lease_commence_date(&self) -> &str {
        &self.lease_commence_date
    }

    pub fn remaining_lease(&self) -> &str {
        &self.remaining_lease
    }

    pub fn resale_price(&self) -> f64 {
        self.resale_price
    }

    /// Resale price divided by floor area ("price PSF"), computed on each call
    pub fn price_per_unit_area(&self) -> f64 {
        self.resale_price / self.floor_area_sqm
    }
}

impl TryFrom<ResaleRow> for ResaleRecord {
    type Error = RecordError;

    fn try_from(row: ResaleRow) -> Result<Self, Self::Error> {
        ResaleRecord::new(
            &row.month,
            &row.town,
            &row.flat_type,
            &row.block,
            &row.street_name,
            &row.storey_range,
            &row.floor_area_sqm,
            &row.flat_model,
            &row.lease_commence_date,
            &row.remaining_lease,
            &row.resale_price,
        )
    }
}

/// Search result line: `Town: .., Flat Type: .., Flat Model: ..,  Price PSF: ..`
impl fmt::Display for ResaleRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Town: {}, Flat Type: {}, Flat Model: {},  Price PSF: {:.2}",
            self.town,
            self.flat_type,
            self.flat_model,
            self.price_per_unit_area()
        )
    }
}

fn parse_float(field: &'static str, value: &str) -> Result<f64, RecordError> {
    let invalid = || RecordError::InvalidNumber {
        field,
        value: value.to_string(),
    };

    let text = value.trim();
    let digits = if text.contains('_') {
        strip_digit_separators(text).ok_or_else(invalid)?
    } else {
        text.to_string()
    };

    digits.parse::<f64>().map_err(|_| invalid())
}

/// Drop `_` digit-group separators ("1_000" -> "1000"). Each `_` must sit
/// between two ASCII digits.
fn strip_digit_separators(text: &str) -> Option<String> {
    let bytes = text.as_bytes();
    for (i, b) in bytes.iter().enumerate() {
        if *b == b'_' {
            let before = i.checked_sub(1).and_then(|j| bytes.get(j));
            let after = bytes.get(i + 1);
            if !matches!((before, after), (Some(l), Some(r)) if l.is_ascii_digit() && r.is_ascii_digit()) {
                return None;
            }
        }
    }
    Some(text.replace('_', ""))
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn bedok_record(floor_area: &str, price: &str) -> Result<ResaleRecord, RecordError> {
        ResaleRecord::new(
            "2024-01",
            "BEDOK",
            "3 ROOM",
            "101",
            "BEDOK NTH AVE 4",
            "04 TO 06",
            floor_area,
            "NEW GENERATION",
            "1978",
            "53 years 02 months",
            price,
        )
    }

    fn headers() -> StringRecord {
        StringRecord::from(vec![
            "month",
            "town",
            "flat_type",
            "block",
            "street_name",
            "storey_range",
            "floor_area_sqm",
            "flat_model",
            "lease_commence_date",
            "remaining_lease",
            "resale_price",
        ])
    }

    #[test]
    fn test_price_per_unit_area() {
        let record = bedok_record("60", "300000").unwrap();
        assert_eq!(record.price_per_unit_area(), 5000.0);
        assert_eq!(record.price_per_unit_area(), 300000.0 / 60.0);
    }

    #[test]
    fn test_accessors() {
        let record = bedok_record("60", "300000").unwrap();
        assert_eq!(record.month(), "2024-01");
        assert_eq!(record.town(), "BEDOK");
        assert_eq!(record.flat_type(), "3 ROOM");
        assert_eq!(record.flat_model(), "NEW GENERATION");
        assert_eq!(record.floor_area_sqm(), 60.0);
        assert_eq!(record.resale_price(), 300000.0);
        assert_eq!(record.remaining_lease(), "53 years 02 months");
    }

    #[test]
    fn test_numbers_tolerate_whitespace() {
        let record = bedok_record(" 67.5 ", "405000 ").unwrap();
        assert_eq!(record.floor_area_sqm(), 67.5);
        assert_eq!(record.resale_price(), 405000.0);
    }

    #[test]
    fn test_non_numeric_price_fails() {
        let err = bedok_record("60", "three hundred").unwrap_err();
        assert_eq!(
            err,
            RecordError::InvalidNumber {
                field: "resale_price",
                value: "three hundred".to_string(),
            }
        );
    }

    #[test]
    fn test_empty_floor_area_fails() {
        let err = bedok_record("", "300000").unwrap_err();
        assert!(matches!(
            err,
            RecordError::InvalidNumber { field: "floor_area_sqm", .. }
        ));
    }

    #[test]
    fn test_zero_and_negative_area_rejected() {
        assert_eq!(
            bedok_record("0", "300000").unwrap_err(),
            RecordError::NonPositiveArea(0.0)
        );
        assert_eq!(
            bedok_record("-10", "300000").unwrap_err(),
            RecordError::NonPositiveArea(-10.0)
        );
    }

    #[test]
    fn test_negative_price_accepted() {
        let record = bedok_record("50", "-100").unwrap();
        assert_eq!(record.price_per_unit_area(), -2.0);
    }

    #[test]
    fn test_display_line() {
        let record = bedok_record("60", "300000").unwrap();
        assert_eq!(
            record.to_string(),
            "Town: BEDOK, Flat Type: 3 ROOM, Flat Model: NEW GENERATION,  Price PSF: 5000.00"
        );
    }

    #[test]
    fn test_parse_row_ok() {
        let record = StringRecord::from(vec![
            "2024-01", "BEDOK", "3 ROOM", "101", "BEDOK NTH AVE 4", "04 TO 06", "60",
            "NEW GENERATION", "1978", "53 years 02 months", "300000",
        ]);

        let parsed = parse_row(&headers(), &record).unwrap();
        assert_eq!(parsed.town(), "BEDOK");
        assert_eq!(parsed.price_per_unit_area(), 5000.0);
    }

    #[test]
    fn test_parse_row_month_optional_and_extra_columns_ignored() {
        let headers = StringRecord::from(vec![
            "town",
            "flat_type",
            "block",
            "street_name",
            "storey_range",
            "floor_area_sqm",
            "flat_model",
            "lease_commence_date",
            "remaining_lease",
            "resale_price",
            "postal_code",
        ]);
        let record = StringRecord::from(vec![
            "YISHUN", "5 ROOM", "720", "YISHUN ST 71", "07 TO 09", "121", "IMPROVED", "1986",
            "61 years", "600000", "760720",
        ]);

        let parsed = parse_row(&headers, &record).unwrap();
        assert_eq!(parsed.month(), "");
        assert_eq!(parsed.town(), "YISHUN");
    }

    #[test]
    fn test_parse_row_missing_column() {
        let mut headers = headers();
        headers.truncate(10); // drop resale_price
        let record = StringRecord::from(vec![
            "2024-01", "BEDOK", "3 ROOM", "101", "BEDOK NTH AVE 4", "04 TO 06", "60",
            "NEW GENERATION", "1978", "53 years 02 months",
        ]);

        let err = parse_row(&headers, &record).unwrap_err();
        assert!(matches!(err, RecordError::Schema(_)));
        assert!(err.to_string().contains("resale_price"));
    }

    #[test]
    fn test_digit_group_underscores() {
        let record = bedok_record("1_20", "1_000_000").unwrap();
        assert_eq!(record.floor_area_sqm(), 120.0);
        assert_eq!(record.resale_price(), 1000000.0);
    }

    #[test]
    fn test_misplaced_underscores_fail() {
        for price in ["_1000", "1000_", "1__000", "1_.5"] {
            let err = bedok_record("60", price).unwrap_err();
            assert_eq!(
                err,
                RecordError::InvalidNumber {
                    field: "resale_price",
                    value: price.to_string(),
                }
            );
        }
    }

    #[test]
    fn test_describe_row_extra_fields() {
        let headers = StringRecord::from(vec!["town", "flat_type"]);
        let record = StringRecord::from(vec!["BEDOK", "3 ROOM", "x", "y"]);

        assert_eq!(
            describe_row(&headers, &record),
            "{'town': 'BEDOK', 'flat_type': '3 ROOM', None: ['x', 'y']}"
        );
    }

    #[test]
    fn test_describe_row_escapes_quotes() {
        let headers = StringRecord::from(vec!["street_name"]);
        let record = StringRecord::from(vec!["O'BRIEN RD"]);

        assert_eq!(describe_row(&headers, &record), r"{'street_name': 'O\'BRIEN RD'}");
    }

    #[test]
    fn test_describe_row() {
        let headers = StringRecord::from(vec!["town", "flat_type", "resale_price"]);
        let record = StringRecord::from(vec!["BEDOK", "3 ROOM"]);

        assert_eq!(
            describe_row(&headers, &record),
            "{'town': 'BEDOK', 'flat_type': '3 ROOM', 'resale_price': None}"
        );
    }
}
