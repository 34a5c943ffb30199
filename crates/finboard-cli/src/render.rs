//! Plain-text tables for analysis records.

use chrono::{DateTime, Utc};
use colored::Colorize;
use finboard_core::analysis::{AnalysisRecord, MetricGroup};
use finboard_core::search::SearchResult;
use serde_json::Value;

const EMPTY: &str = "-";

/// `net_income_growth` -> `Net Income Growth`.
pub fn humanize_key(key: &str) -> String {
    key.split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

pub fn format_date(date: &DateTime<Utc>) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Range bounds come as a bare year or a timestamp; keep the date part only.
fn format_bound(value: &str) -> String {
    value.split('T').next().unwrap_or(value).to_string()
}

fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => EMPTY.to_string(),
        other => other.to_string(),
    }
}

/// Renders `rows` under `headers` with left-aligned, padded columns.
pub fn table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if let Some(width) = widths.get_mut(i) {
                *width = (*width).max(cell.chars().count());
            }
        }
    }

    let line = |cells: Vec<String>| -> String {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut out = Vec::with_capacity(rows.len() + 2);
    out.push(
        line(headers.iter().map(|h| h.to_string()).collect())
            .bold()
            .to_string(),
    );
    out.push(
        widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("  "),
    );
    for row in rows {
        out.push(line(row.clone()));
    }
    out.join("\n")
}

pub fn general_info(record: &AnalysisRecord) -> String {
    table(
        &["Asset", "Start", "End", "Created", "Updated", "Published"],
        &[vec![
            record.activo.clone(),
            format_bound(&record.inicio),
            format_bound(&record.fin),
            format_date(&record.created_at),
            format_date(&record.updated_at),
            record
                .published_at
                .as_ref()
                .map(format_date)
                .unwrap_or_else(|| EMPTY.to_string()),
        ]],
    )
}

pub fn metric_group(group: &MetricGroup) -> String {
    let rows: Vec<Vec<String>> = group
        .iter()
        .map(|(metric, value)| vec![humanize_key(metric), format_value(value)])
        .collect();
    table(&["Metric", "Value"], &rows)
}

/// The full record view: general information, then one table per category.
pub fn record_detail(record: &AnalysisRecord) -> String {
    let mut sections = vec![format!(
        "{}\n{}",
        "General Information".cyan().bold(),
        general_info(record)
    )];

    for (category, group) in record.resultado.categories() {
        if group.is_empty() {
            continue;
        }
        sections.push(format!(
            "{}\n{}",
            humanize_key(category).cyan().bold(),
            metric_group(group)
        ));
    }
    sections.join("\n\n")
}

/// One line per record, for listings.
pub fn record_rows(records: &[AnalysisRecord], selected: Option<i64>) -> String {
    let rows: Vec<Vec<String>> = records
        .iter()
        .map(|record| {
            let marker = if Some(record.id) == selected { "*" } else { "" };
            vec![
                marker.to_string(),
                record.id.to_string(),
                record.activo.clone(),
                format_bound(&record.inicio),
                format_bound(&record.fin),
                format_date(&record.created_at),
            ]
        })
        .collect();
    table(&["", "Id", "Asset", "Start", "End", "Created"], &rows)
}

pub fn search_results(results: &[SearchResult]) -> String {
    let rows: Vec<Vec<String>> = results
        .iter()
        .map(|r| {
            vec![
                r.symbol.clone(),
                r.name.clone(),
                r.exchange.clone(),
                r.kind.clone(),
            ]
        })
        .collect();
    table(&["Symbol", "Name", "Exchange", "Type"], &rows)
}
