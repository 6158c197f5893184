//! Business insights derived from aggregated sales.

use crate::models::{AggregationResult, Insights, QuantityEntry, SizeShare};

/// Derive headline insights from an aggregation result.
///
/// Every highlight is absent when its source grouping is empty, and the
/// size distribution is absent when there is no revenue.
pub fn derive_insights(result: &AggregationResult) -> Insights {
    let size_distribution = (result.total_revenue > 0.0).then(|| {
        result
            .sorted_sizes
            .iter()
            .map(|entry| SizeShare {
                size: entry.key.clone(),
                percentage: entry.revenue / result.total_revenue * 100.0,
            })
            .collect()
    });

    Insights {
        top_size_revenue: result.sorted_sizes.first().cloned(),
        top_size_quantity: top_by_quantity(result),
        top_color: result.sorted_colors.first().cloned(),
        top_design: result.sorted_designs.first().cloned(),
        size_distribution,
    }
}

/// The size with the most units sold; the first maximum in key order wins.
fn top_by_quantity(result: &AggregationResult) -> Option<QuantityEntry> {
    result
        .size_quantity
        .iter()
        .fold(None, |best: Option<(&String, i64)>, (key, &quantity)| match best {
            Some((_, top)) if top >= quantity => best,
            _ => Some((key, quantity)),
        })
        .map(|(key, quantity)| QuantityEntry {
            key: key.clone(),
            quantity,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::aggregate_collecting;
    use crate::models::{RankedEntry, Row};

    fn sale(amount: &str, quantity: &str, size: &str, color: &str, design: &str) -> Row {
        [
            ("amount", amount),
            ("quantity", quantity),
            ("size", size),
            ("color", color),
            ("design", design),
        ]
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
    }

    #[test]
    fn test_derive_insights() {
        let rows = vec![
            sale("10", "2", "s", "red", "logo"),
            sale("20", "1", "M", "Red", "logo"),
            sale("6", "4", "s", "blue", "stripe"),
        ];
        let (result, _) = aggregate_collecting(&rows);

        let insights = derive_insights(&result);

        assert_eq!(
            insights.top_size_revenue,
            Some(RankedEntry { key: "M".to_string(), revenue: 20.0 })
        );
        assert_eq!(
            insights.top_size_quantity,
            Some(QuantityEntry { key: "S".to_string(), quantity: 6 })
        );
        assert_eq!(insights.top_color.map(|e| e.key), Some("Red".to_string()));
        assert_eq!(insights.top_design.map(|e| e.key), Some("logo".to_string()));

        let distribution = insights.size_distribution.unwrap();
        assert_eq!(distribution.len(), 2);
        assert_eq!(distribution[0].size, "M");
        assert!((distribution[0].percentage - 20.0 / 36.0 * 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_distribution_sums_to_hundred() {
        let rows = vec![
            sale("19.99", "1", "S", "black", "a"),
            sale("24.50", "2", "M", "white", "b"),
            sale("12.10", "1", "L", "black", "c"),
            sale("3.33", "1", "XL", "red", "a"),
        ];
        let (result, _) = aggregate_collecting(&rows);

        let total: f64 = derive_insights(&result)
            .size_distribution
            .unwrap()
            .iter()
            .map(|s| s.percentage)
            .sum();

        assert!((total - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_insights_empty_result() {
        let insights = derive_insights(&AggregationResult::default());
        assert!(insights.is_empty());
    }

    #[test]
    fn test_zero_revenue_has_no_distribution() {
        let rows = vec![sale("", "5", "L", "blue", "x")];
        let (result, _) = aggregate_collecting(&rows);

        let insights = derive_insights(&result);

        assert!(insights.size_distribution.is_none());
        assert_eq!(
            insights.top_size_quantity,
            Some(QuantityEntry { key: "L".to_string(), quantity: 5 })
        );
        assert_eq!(insights.top_size_revenue.map(|e| e.revenue), Some(0.0));
    }
}
