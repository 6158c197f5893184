//! Sales aggregation.
//!
//! This module folds raw rows into revenue and quantity totals, grouped by
//! size, color and design, and ranks each grouping by revenue.

use crate::error::RowError;
use crate::models::{AggregationResult, RankedEntry, Row, RowWarning, SaleRecord};
use std::collections::{BTreeMap, HashMap};
use std::ops::AddAssign;

/// Per-key running totals that remember first-encounter order.
#[derive(Debug)]
struct Tally<V> {
    index: HashMap<String, usize>,
    entries: Vec<(String, V)>,
}

impl<V: Copy + Default + AddAssign> Tally<V> {
    fn new() -> Self {
        Self {
            index: HashMap::new(),
            entries: Vec::new(),
        }
    }

    /// Add `value` to `key`, starting from zero on first sight.
    fn add(&mut self, key: &str, value: V) {
        let slot = match self.index.get(key) {
            Some(&slot) => slot,
            None => {
                self.entries.push((key.to_string(), V::default()));
                self.index.insert(key.to_string(), self.entries.len() - 1);
                self.entries.len() - 1
            }
        };
        self.entries[slot].1 += value;
    }

    /// Current total for `key`, zero if unseen.
    fn get(&self, key: &str) -> V {
        self.index
            .get(key)
            .map(|&slot| self.entries[slot].1)
            .unwrap_or_default()
    }

    fn into_map(self) -> BTreeMap<String, V> {
        self.entries.into_iter().collect()
    }
}

impl Tally<f64> {
    /// Entries by revenue, highest first. Ties keep first-encounter order.
    fn into_ranking(self) -> Vec<RankedEntry> {
        let mut ranking: Vec<RankedEntry> = self
            .entries
            .into_iter()
            .map(|(key, revenue)| RankedEntry { key, revenue })
            .collect();

        ranking.sort_by(|a, b| {
            b.revenue
                .partial_cmp(&a.revenue)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        ranking
    }
}

/// Aggregate sales rows.
///
/// Rows whose `amount` or `quantity` is not numeric, or whose quantity would
/// overflow a unit total, are dropped and handed to `on_warning`; they
/// contribute to no total. Design revenue is tracked but design quantity is
/// not.
pub fn aggregate<'a, I, F>(rows: I, mut on_warning: F) -> AggregationResult
where
    I: IntoIterator<Item = &'a Row>,
    F: FnMut(RowWarning),
{
    let mut total_revenue = 0.0;
    let mut total_quantity: i64 = 0;

    let mut size_sales = Tally::<f64>::new();
    let mut color_sales = Tally::<f64>::new();
    let mut design_sales = Tally::<f64>::new();
    let mut size_quantity = Tally::<i64>::new();
    let mut color_quantity = Tally::<i64>::new();

    for (i, row) in rows.into_iter().enumerate() {
        let checked = SaleRecord::from_row(row).and_then(|record| {
            let fits = total_quantity.checked_add(record.quantity).is_some()
                && size_quantity.get(&record.size).checked_add(record.quantity).is_some()
                && color_quantity.get(&record.color).checked_add(record.quantity).is_some();
            if fits {
                Ok(record)
            } else {
                Err(RowError::QuantityOverflow {
                    quantity: record.quantity,
                })
            }
        });

        let record = match checked {
            Ok(record) => record,
            Err(reason) => {
                on_warning(RowWarning {
                    row_number: i + 1,
                    row: row.clone(),
                    reason,
                });
                continue;
            }
        };

        total_revenue += record.amount;
        total_quantity += record.quantity;

        size_sales.add(&record.size, record.amount);
        size_quantity.add(&record.size, record.quantity);

        color_sales.add(&record.color, record.amount);
        color_quantity.add(&record.color, record.quantity);

        design_sales.add(&record.design, record.amount);
    }

    let average_price = if total_quantity > 0 {
        total_revenue / total_quantity as f64
    } else {
        0.0
    };

    AggregationResult {
        total_revenue,
        total_quantity,
        average_price,
        sorted_sizes: size_sales.into_ranking(),
        sorted_colors: color_sales.into_ranking(),
        sorted_designs: design_sales.into_ranking(),
        size_quantity: size_quantity.into_map(),
        color_quantity: color_quantity.into_map(),
    }
}

/// Aggregate sales rows, returning the skipped-row warnings alongside.
pub fn aggregate_collecting<'a, I>(rows: I) -> (AggregationResult, Vec<RowWarning>)
where
    I: IntoIterator<Item = &'a Row>,
{
    let mut warnings = Vec::new();
    let result = aggregate(rows, |w| warnings.push(w));
    (result, warnings)
}
