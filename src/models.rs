//! Data models for the sales analyzer.
//!
//! This module contains the core data structures used throughout
//! the application: raw and normalized sales rows, aggregation results,
//! derived insights and the final report.

use crate::error::RowError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// One raw sale as read from the input: field name to field value.
pub type Row = HashMap<String, String>;

/// Default size label for rows without one.
pub const UNKNOWN_SIZE: &str = "UNKNOWN";

/// Default color and design label for rows without one.
pub const UNKNOWN_LABEL: &str = "Unknown";

/// A validated and normalized sale.
#[derive(Debug, Clone, PartialEq)]
pub struct SaleRecord {
    /// Sale amount (revenue).
    pub amount: f64,
    /// Units sold.
    pub quantity: i64,
    /// Upper-cased size label.
    pub size: String,
    /// Title-cased color label.
    pub color: String,
    /// Design name, as given.
    pub design: String,
}

impl SaleRecord {
    /// Normalize a raw row.
    ///
    /// Missing or empty `amount` becomes 0.0 and missing or empty `quantity`
    /// becomes 1. Any other value must parse once trimmed. Text fields take
    /// their default only when the column is missing; an empty cell is kept
    /// as its own group.
    pub fn from_row(row: &Row) -> Result<Self, RowError> {
        let amount = match numeric_field(row, "amount") {
            Some(value) => value
                .trim()
                .parse::<f64>()
                .map_err(|source| RowError::InvalidAmount {
                    value: value.to_string(),
                    source,
                })?,
            None => 0.0,
        };

        let quantity = match numeric_field(row, "quantity") {
            Some(value) => value
                .trim()
                .parse::<i64>()
                .map_err(|source| RowError::InvalidQuantity {
                    value: value.to_string(),
                    source,
                })?,
            None => 1,
        };

        Ok(Self {
            amount,
            quantity,
            size: row
                .get("size")
                .map(|v| v.to_uppercase())
                .unwrap_or_else(|| UNKNOWN_SIZE.to_string()),
            color: row
                .get("color")
                .map(|v| title_case(v))
                .unwrap_or_else(|| UNKNOWN_LABEL.to_string()),
            design: row
                .get("design")
                .cloned()
                .unwrap_or_else(|| UNKNOWN_LABEL.to_string()),
        })
    }
}

/// Look up a numeric field, treating an empty value as absent.
fn numeric_field<'a>(row: &'a Row, name: &str) -> Option<&'a str> {
    row.get(name).map(String::as_str).filter(|v| !v.is_empty())
}

/// Title-case a label: the first letter of every alphabetic run is
/// upper-cased, the rest lower-cased ("navy BLUE" -> "Navy Blue").
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_word = false;

    for c in s.chars() {
        if c.is_alphabetic() {
            if in_word {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(c);
            in_word = false;
        }
    }

    out
}

/// A grouping key with its accumulated revenue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedEntry {
    pub key: String,
    pub revenue: f64,
}

/// A grouping key with its accumulated unit count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuantityEntry {
    pub key: String,
    pub quantity: i64,
}

/// A size with its share of total revenue, in percent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SizeShare {
    pub size: String,
    pub percentage: f64,
}

/// Totals and rankings produced by one aggregation pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AggregationResult {
    /// Sum of all valid amounts.
    pub total_revenue: f64,
    /// Sum of all valid quantities.
    pub total_quantity: i64,
    /// Revenue per unit, 0 when nothing was sold.
    pub average_price: f64,
    /// Sizes by revenue, highest first.
    pub sorted_sizes: Vec<RankedEntry>,
    /// Colors by revenue, highest first.
    pub sorted_colors: Vec<RankedEntry>,
    /// Designs by revenue, highest first.
    pub sorted_designs: Vec<RankedEntry>,
    /// Units sold per size.
    pub size_quantity: BTreeMap<String, i64>,
    /// Units sold per color.
    pub color_quantity: BTreeMap<String, i64>,
}

impl AggregationResult {
    /// Percentage of total revenue represented by `revenue`.
    ///
    /// Returns 0.0 when there is no revenue at all.
    pub fn revenue_share(&self, revenue: f64) -> f64 {
        if self.total_revenue > 0.0 {
            revenue / self.total_revenue * 100.0
        } else {
            0.0
        }
    }
}

/// Highlights derived from an [`AggregationResult`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Insights {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_size_revenue: Option<RankedEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_size_quantity: Option<QuantityEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_color: Option<RankedEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_design: Option<RankedEntry>,
    /// Every size with its revenue share; absent when there is no revenue.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size_distribution: Option<Vec<SizeShare>>,
}

impl Insights {
    /// Returns true when no highlight could be derived.
    pub fn is_empty(&self) -> bool {
        self.top_size_revenue.is_none()
            && self.top_size_quantity.is_none()
            && self.top_color.is_none()
            && self.top_design.is_none()
            && self.size_distribution.is_none()
    }
}

/// A row that was dropped during aggregation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowWarning {
    /// 1-indexed position of the row in the input sequence.
    pub row_number: usize,
    /// The offending row.
    pub row: Row,
    /// Why it was dropped.
    pub reason: RowError,
}

impl std::fmt::Display for RowWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut fields: Vec<_> = self.row.iter().collect();
        fields.sort();
        write!(
            f,
            "skipping invalid row {} {:?}: {}",
            self.row_number, fields, self.reason
        )
    }
}

/// Metadata about a generated report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// Path of the analyzed input file.
    pub input_file: String,
    /// Date and time the report was generated.
    pub generated_at: DateTime<Utc>,
    /// Number of rows read from the input.
    pub rows_read: usize,
    /// Number of rows dropped as invalid.
    pub rows_skipped: usize,
}

/// The complete sales report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub metadata: ReportMetadata,
    pub results: AggregationResult,
    pub insights: Insights,
    /// Merchandising recommendations listed at the end of the report.
    pub recommendations: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(pairs: &[(&str, &str)]) -> Row {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_from_row_normalizes_fields() {
        let record = SaleRecord::from_row(&row(&[
            ("amount", "12.5"),
            ("quantity", " 3 "),
            ("size", "xl"),
            ("color", "navy BLUE"),
            ("design", "retro logo"),
        ]))
        .unwrap();

        assert_eq!(record.amount, 12.5);
        assert_eq!(record.quantity, 3);
        assert_eq!(record.size, "XL");
        assert_eq!(record.color, "Navy Blue");
        assert_eq!(record.design, "retro logo");
    }

    #[test]
    fn test_from_row_defaults() {
        let record = SaleRecord::from_row(&Row::new()).unwrap();
        assert_eq!(record.amount, 0.0);
        assert_eq!(record.quantity, 1);
        assert_eq!(record.size, UNKNOWN_SIZE);
        assert_eq!(record.color, UNKNOWN_LABEL);
        assert_eq!(record.design, UNKNOWN_LABEL);

        let blank = SaleRecord::from_row(&row(&[("amount", ""), ("quantity", "")])).unwrap();
        assert_eq!(blank.amount, 0.0);
        assert_eq!(blank.quantity, 1);
    }

    #[test]
    fn test_from_row_keeps_empty_labels() {
        let record = SaleRecord::from_row(&row(&[
            ("amount", "5"),
            ("size", ""),
            ("color", ""),
            ("design", ""),
        ]))
        .unwrap();

        assert_eq!(record.size, "");
        assert_eq!(record.color, "");
        assert_eq!(record.design, "");
    }

    #[test]
    fn test_from_row_rejects_whitespace_numbers() {
        let err = SaleRecord::from_row(&row(&[("amount", " ")])).unwrap_err();
        assert!(matches!(err, RowError::InvalidAmount { .. }));

        let err = SaleRecord::from_row(&row(&[("quantity", "  ")])).unwrap_err();
        assert!(matches!(err, RowError::InvalidQuantity { .. }));
    }

    #[test]
    fn test_from_row_rejects_non_numeric() {
        let err = SaleRecord::from_row(&row(&[("amount", "abc")])).unwrap_err();
        assert!(matches!(err, RowError::InvalidAmount { .. }));

        let err = SaleRecord::from_row(&row(&[("amount", "5"), ("quantity", "2.5")])).unwrap_err();
        assert!(matches!(err, RowError::InvalidQuantity { .. }));
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("red"), "Red");
        assert_eq!(title_case("RED"), "Red");
        assert_eq!(title_case("heather-grey"), "Heather-Grey");
        assert_eq!(title_case("o'neil"), "O'Neil");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn test_revenue_share() {
        let result = AggregationResult {
            total_revenue: 200.0,
            ..Default::default()
        };
        assert_eq!(result.revenue_share(50.0), 25.0);
        assert_eq!(AggregationResult::default().revenue_share(10.0), 0.0);
    }

    #[test]
    fn test_row_warning_display() {
        let warning = RowWarning {
            row_number: 4,
            row: row(&[("amount", "bad")]),
            reason: SaleRecord::from_row(&row(&[("amount", "bad")])).unwrap_err(),
        };
        let text = warning.to_string();
        assert!(text.contains("row 4"));
        assert!(text.contains("invalid amount 'bad'"));
    }
}
