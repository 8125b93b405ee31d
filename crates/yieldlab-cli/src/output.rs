//! Output formatting utilities.

use colored::Colorize;
use rust_decimal::Decimal;
use serde::Serialize;
use tabled::{
    settings::{object::Columns, Alignment, Modify, Style},
    Table, Tabled,
};

use yieldlab_analytics::{AnalyticsResultDto, CashFlowDto, ErrorBody};

use crate::error::CliResult;

/// Prints a value as pretty JSON on stdout.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> CliResult<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Prints rows as a rounded table.
pub fn print_table<T: Tabled>(rows: &[T]) {
    if rows.is_empty() {
        println!("No results.");
        return;
    }

    let table = Table::new(rows)
        .with(Style::rounded())
        .with(Modify::new(Columns::first()).with(Alignment::left()))
        .to_string();

    println!("{table}");
}

/// Prints an error envelope body to stderr.
pub fn print_error(error: &ErrorBody) {
    eprintln!("{} {}: {}", "✗".red(), error.kind.as_str().bold(), error.message);
}

/// Prints a success marker to stderr.
pub fn print_success(message: &str) {
    eprintln!("{} {}", "✓".green(), message);
}

/// Prints a header for a section.
pub fn print_header(title: &str) {
    println!("\n{}", title.bold().underline());
}

/// Formats a currency amount to cents.
pub fn format_amount(value: Decimal) -> String {
    value.round_dp(2).to_string()
}

/// Formats a percentage.
pub fn format_percent(value: f64) -> String {
    format!("{value:.4}%")
}

/// A key-value pair for display.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct KeyValue {
    #[tabled(rename = "Metric")]
    pub key: String,
    #[tabled(rename = "Value")]
    pub value: String,
}

impl KeyValue {
    /// Creates a new key-value pair.
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Creates a key-value pair from a float with fixed precision.
    pub fn from_f64(key: impl Into<String>, value: f64, precision: usize) -> Self {
        Self::new(key, format!("{value:.precision$}"))
    }
}

/// Metric rows of a calculation result.
pub fn result_rows(result: &AnalyticsResultDto) -> Vec<KeyValue> {
    let mut rows = vec![
        KeyValue::from_f64("Clean Price", result.clean_price, 6),
        KeyValue::from_f64("Dirty Price", result.dirty_price, 6),
        KeyValue::from_f64("Accrued (% face)", result.accrued_interest, 6),
        KeyValue::new("Accrued Amount", format_amount(result.accrued_amount)),
        KeyValue::new("Yield to Maturity", format_percent(result.yield_to_maturity)),
    ];

    if let (Some(ytw), Some(date), Some(kind)) =
        (result.yield_to_worst, result.worst_date, result.worst_kind)
    {
        rows.push(KeyValue::new("Yield to Worst", format_percent(ytw)));
        rows.push(KeyValue::new("Worst Workout", format!("{kind:?} {date}")));
    }

    rows.extend([
        KeyValue::from_f64("Modified Duration", result.modified_duration, 4),
        KeyValue::from_f64("Macaulay Duration", result.macaulay_duration, 4),
        KeyValue::from_f64("Convexity", result.convexity, 4),
        KeyValue::from_f64("DV01", result.dv01, 4),
    ]);

    if let Some(spread) = result.spread_to_benchmark {
        rows.push(KeyValue::new("Spread to Benchmark", format!("{spread:.2} bps")));
    }
    if let Some(current) = result.current_yield {
        rows.push(KeyValue::new("Current Yield", format_percent(current)));
    }
    rows.push(KeyValue::new(
        "Solver",
        format!(
            "{} iterations, {}",
            result.iterations,
            if result.converged { "converged" } else { "not converged" }
        ),
    ));
    rows
}

/// A cash-flow row for display.
#[derive(Debug, Clone, Tabled)]
pub struct CashFlowRow {
    #[tabled(rename = "Date")]
    pub date: String,
    #[tabled(rename = "Type")]
    pub kind: String,
    #[tabled(rename = "Rate")]
    pub rate: String,
    #[tabled(rename = "Coupon")]
    pub coupon: String,
    #[tabled(rename = "Principal")]
    pub principal: String,
    #[tabled(rename = "Total")]
    pub total: String,
    #[tabled(rename = "Outstanding")]
    pub outstanding: String,
}

impl From<&CashFlowDto> for CashFlowRow {
    fn from(cf: &CashFlowDto) -> Self {
        Self {
            date: cf.date.to_string(),
            kind: format!("{:?}", cf.payment_type),
            rate: format!("{}%", cf.coupon_rate.normalize()),
            coupon: format_amount(cf.coupon),
            principal: format_amount(cf.principal),
            total: format_amount(cf.total),
            outstanding: format_amount(cf.outstanding_after),
        }
    }
}

/// Prints a cash-flow timetable.
pub fn print_cash_flows(flows: &[CashFlowDto]) {
    let rows: Vec<CashFlowRow> = flows.iter().map(CashFlowRow::from).collect();
    print_table(&rows);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_amount_rounds_to_cents() {
        assert_eq!(format_amount(Decimal::new(123_456, 3)), "123.46");
        assert_eq!(format_amount(Decimal::from(25)), "25");
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(5.0), "5.0000%");
    }
}
