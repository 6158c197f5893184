//! Text and JSON report generation.
//!
//! This module renders a [`Report`] as a plain-text sales report or as JSON,
//! and produces the short console summary.

use crate::cli::OutputFormat;
use crate::models::{AggregationResult, Insights, RankedEntry, Report, ReportMetadata};
use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::io::Write;
use std::path::Path;

/// Generate a complete plain-text report.
pub fn generate_text_report(report: &Report) -> String {
    let mut output = String::new();

    output.push_str("T-Shirt Sales Analysis Report\n");
    output.push_str("============================\n\n");

    output.push_str(&generate_metadata_section(&report.metadata));
    output.push_str(&generate_totals_section(&report.results));

    output.push_str(&generate_ranking_section(
        "T-Shirt Sizes by Revenue",
        "Size ",
        &report.results,
        &report.results.sorted_sizes,
        Some(&report.results.size_quantity),
    ));
    output.push_str(&generate_ranking_section(
        "T-Shirt Colors by Revenue",
        "",
        &report.results,
        &report.results.sorted_colors,
        Some(&report.results.color_quantity),
    ));
    output.push_str(&generate_ranking_section(
        "T-Shirt Designs by Revenue",
        "",
        &report.results,
        &report.results.sorted_designs,
        None,
    ));

    output.push_str(&generate_insights_section(&report.insights));
    output.push_str(&generate_recommendations_section(&report.recommendations));

    output
}

/// Underline a heading with dashes.
fn heading(title: &str) -> String {
    format!("{}\n{}\n", title, "-".repeat(title.len()))
}

/// Generate the metadata section.
fn generate_metadata_section(metadata: &ReportMetadata) -> String {
    let mut section = String::new();

    section.push_str(&format!("Source: {}\n", metadata.input_file));
    section.push_str(&format!(
        "Generated: {}\n",
        metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    section.push_str(&format!("Records Read: {}\n", metadata.rows_read));
    if metadata.rows_skipped > 0 {
        section.push_str(&format!("Records Skipped: {}\n", metadata.rows_skipped));
    }
    section.push('\n');

    section
}

/// Generate the totals section.
fn generate_totals_section(results: &AggregationResult) -> String {
    let mut section = String::new();

    section.push_str(&format!("Total Revenue: ${:.2}\n", results.total_revenue));
    section.push_str(&format!("Total T-Shirts Sold: {}\n", results.total_quantity));
    section.push_str(&format!(
        "Average Price per T-Shirt: ${:.2}\n\n",
        results.average_price
    ));

    section
}

/// Generate one ranking, optionally with unit counts per key.
fn generate_ranking_section(
    title: &str,
    label: &str,
    results: &AggregationResult,
    ranking: &[RankedEntry],
    quantities: Option<&BTreeMap<String, i64>>,
) -> String {
    let mut section = heading(title);

    for (i, entry) in ranking.iter().enumerate() {
        section.push_str(&format!(
            "{}. {}{}: ${:.2} ({:.1}%)",
            i + 1,
            label,
            entry.key,
            entry.revenue,
            results.revenue_share(entry.revenue)
        ));
        if let Some(quantities) = quantities {
            let units = quantities.get(&entry.key).copied().unwrap_or(0);
            section.push_str(&format!(" - {} units", units));
        }
        section.push('\n');
    }
    section.push('\n');

    section
}

/// Generate the key insights section.
fn generate_insights_section(insights: &Insights) -> String {
    let mut section = heading("Key Insights");

    if let Some(ref top) = insights.top_size_revenue {
        section.push_str(&format!(
            "Best selling size by revenue: {} (${:.2})\n",
            top.key, top.revenue
        ));
    }
    if let Some(ref top) = insights.top_size_quantity {
        section.push_str(&format!(
            "Most popular size by quantity: {} ({} units)\n",
            top.key, top.quantity
        ));
    }
    if let Some(ref top) = insights.top_color {
        section.push_str(&format!(
            "Best selling color: {} (${:.2})\n",
            top.key, top.revenue
        ));
    }
    if let Some(ref top) = insights.top_design {
        section.push_str(&format!(
            "Top performing design: {} (${:.2})\n",
            top.key, top.revenue
        ));
    }
    if let Some(ref distribution) = insights.size_distribution {
        let shares: Vec<String> = distribution
            .iter()
            .map(|share| format!("{} {:.1}%", share.size, share.percentage))
            .collect();
        section.push_str(&format!("Size distribution: {}\n", shares.join(", ")));
    }
    section.push('\n');

    section
}

/// Generate the recommendations section.
fn generate_recommendations_section(recommendations: &[String]) -> String {
    if recommendations.is_empty() {
        return String::new();
    }

    let mut section = heading("Recommendations");

    for (i, rec) in recommendations.iter().enumerate() {
        section.push_str(&format!("{}. {}\n", i + 1, rec));
    }

    section
}

/// Generate a JSON report.
pub fn generate_json_report(report: &Report) -> Result<String> {
    serde_json::to_string_pretty(report).map_err(Into::into)
}

/// Render and write the report to a file.
pub fn write_report(report: &Report, path: &Path, format: OutputFormat) -> Result<()> {
    let content = match format {
        OutputFormat::Text => generate_text_report(report),
        OutputFormat::Json => generate_json_report(report)?,
    };

    let mut file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create report file {}", path.display()))?;
    file.write_all(content.as_bytes())
        .with_context(|| format!("Failed to write report to {}", path.display()))?;

    Ok(())
}

/// Render the console summary: totals plus the top `count` sizes and colors.
pub fn render_summary(results: &AggregationResult, count: usize) -> String {
    let mut lines = Vec::new();

    lines.push("T-Shirt Sales Summary:".to_string());
    lines.push(format!("Total Revenue: ${:.2}", results.total_revenue));
    lines.push(format!("Total Units Sold: {}", results.total_quantity));
    lines.push(format!("Average Price: ${:.2}", results.average_price));

    lines.push(String::new());
    lines.push(format!("Top {} Sizes by Revenue:", count));
    for (i, entry) in results.sorted_sizes.iter().take(count).enumerate() {
        lines.push(format!(
            "{}. Size {}: ${:.2} ({:.1}%)",
            i + 1,
            entry.key,
            entry.revenue,
            results.revenue_share(entry.revenue)
        ));
    }

    lines.push(String::new());
    lines.push(format!("Top {} Colors by Revenue:", count));
    for (i, entry) in results.sorted_colors.iter().take(count).enumerate() {
        lines.push(format!(
            "{}. {}: ${:.2} ({:.1}%)",
            i + 1,
            entry.key,
            entry.revenue,
            results.revenue_share(entry.revenue)
        ));
    }

    lines.join("\n")
}
