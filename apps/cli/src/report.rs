//! Rendering results for stdout.
//!
//! ## Text Layout
//! ```text
//! Bill Summary
//! Subtotal: $38.00
//! Tax (5%): $1.90
//! Discount (10%): $3.99
//! Total: $35.91
//!
//! Individual Shares
//! Alice: $11.97
//! Bob: $11.97
//! Charlie: $11.97
//! ```
//!
//! Two-decimal formatting is display only; JSON output carries the raw values.

use billsplit_core::{ApiError, CalculateResponse};
use serde::Serialize;

use crate::config::{OutputFormat, Settings};
use crate::error::CliError;

/// Renders a successful calculation.
pub fn render(response: &CalculateResponse, settings: &Settings) -> Result<String, CliError> {
    match settings.output {
        OutputFormat::Json => to_json(response, settings.pretty),
        OutputFormat::Text => Ok(render_text(response, &settings.currency_symbol)),
    }
}

/// Renders a rejected calculation.
pub fn render_error(err: &ApiError, settings: &Settings) -> Result<String, CliError> {
    match settings.output {
        OutputFormat::Json => to_json(err, settings.pretty),
        OutputFormat::Text => Ok(format!("Error: {}", err.message)),
    }
}

fn to_json<T: Serialize>(value: &T, pretty: bool) -> Result<String, CliError> {
    let json = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    json.map_err(CliError::Render)
}

fn render_text(response: &CalculateResponse, symbol: &str) -> String {
    let summary = &response.summary;
    let mut lines = vec![
        "Bill Summary".to_string(),
        format!("Subtotal: {}", format_amount(summary.subtotal, symbol)),
        format!(
            "Tax ({}%): {}",
            summary.tax_percent,
            format_amount(summary.tax_amount, symbol)
        ),
        format!(
            "Discount ({}%): {}",
            summary.discount_percent,
            format_amount(summary.discount_amount, symbol)
        ),
        format!("Total: {}", format_amount(summary.final_total, symbol)),
    ];

    if !response.shares.is_empty() {
        lines.push(String::new());
        lines.push("Individual Shares".to_string());
        lines.extend(
            response
                .shares
                .iter()
                .map(|(person, amount)| format!("{person}: {}", format_amount(*amount, symbol))),
        );
    }

    lines.join("\n")
}

/// Formats an amount with two decimals, sign before the symbol.
pub fn format_amount(amount: f64, symbol: &str) -> String {
    let rounded = (amount * 100.0).round() / 100.0;
    let sign = if rounded < 0.0 { "-" } else { "" };
    format!("{sign}{symbol}{:.2}", rounded.abs())
}
