//! # billsplit CLI
//!
//! Command-line front-end for `billsplit-core`.
//!
//! ## Usage
//! ```text
//! billsplit calculate --input bill.json
//! billsplit calculate --item "Pizza:20:1:Alice,Bob" --tax-percent 5 --output text
//! cat bill.json | billsplit calculate --discount-percent 10
//! ```
//!
//! ## Startup Sequence
//! 1. Parse arguments
//! 2. Load settings (file → env), then apply flag overrides
//! 3. Initialize tracing (stderr)
//! 4. Read the request, run `calculate`, print the result
//! 5. Exit 0, or [`EXIT_REJECTED`] when the bill was rejected

use std::path::PathBuf;

use billsplit_core::{calculate_with_basis, ApiError, CalculateRequest};
use clap::{Args, Parser, Subcommand};
use tracing::{debug, info};

pub mod config;
pub mod error;
pub mod input;
pub mod report;

use crate::config::{OutputFormat, Settings};
use crate::error::CliError;
use crate::input::{parse_item, read_request, InputSource};

/// Exit code for a bill the calculator rejected (bad input, not a crash).
pub const EXIT_REJECTED: i32 = 2;

#[derive(Parser, Debug)]
#[command(name = "billsplit")]
#[command(about = "Split a shared bill, tax and discount included")]
pub struct Cli {
    /// Settings file (defaults to ./billsplit.toml when present).
    #[arg(long, global = true, env = "BILLSPLIT_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compute the bill summary and each person's share.
    Calculate(CalculateArgs),
}

#[derive(Args, Debug, Default)]
pub struct CalculateArgs {
    /// Request document (JSON). `-` reads stdin.
    #[arg(long, short)]
    pub input: Option<PathBuf>,

    /// Extra item as NAME:RATE:QUANTITY:PERSON[,PERSON...]. Repeatable.
    #[arg(long = "item", value_name = "SPEC")]
    pub items: Vec<String>,

    /// Tax percentage (overrides the document).
    #[arg(long)]
    pub tax_percent: Option<f64>,

    /// Absolute tax for the whole bill (overrides any percentage).
    #[arg(long)]
    pub tax_amount: Option<f64>,

    /// Discount percentage (overrides the document).
    #[arg(long)]
    pub discount_percent: Option<f64>,

    /// Output format (overrides the settings).
    #[arg(long, value_enum)]
    pub output: Option<OutputFormat>,
}

impl CalculateArgs {
    /// Settings with this command's flag overrides applied.
    pub fn settings(&self, base: &Settings) -> Settings {
        let mut settings = base.clone();
        if let Some(output) = self.output {
            settings.output = output;
        }
        settings
    }

    /// Assembles the request from the input document, items and flags.
    ///
    /// With neither `--input` nor `--item`, the document is read from stdin.
    pub async fn request(&self) -> Result<CalculateRequest, CliError> {
        let source = match (&self.input, self.items.is_empty()) {
            (Some(path), _) => Some(InputSource::from_arg(path)),
            (None, true) => Some(InputSource::Stdin),
            (None, false) => None,
        };

        let mut request = match source {
            Some(source) => read_request(&source).await?,
            None => CalculateRequest::default(),
        };

        for spec in &self.items {
            request.items.push(parse_item(spec)?);
        }
        if let Some(tax_percent) = self.tax_percent {
            request.tax_percent = tax_percent;
            request.tax_amount = None;
        }
        if let Some(tax_amount) = self.tax_amount {
            request.tax_amount = Some(tax_amount);
        }
        if let Some(discount_percent) = self.discount_percent {
            request.discount_percent = discount_percent;
        }

        Ok(request)
    }
}

/// Runs `calculate` and renders the result with `settings`.
///
/// A rejected bill comes back as `CliError::Rejected`; [`execute`] decides
/// how to print it.
pub async fn run_calculate(args: &CalculateArgs, settings: &Settings) -> Result<String, CliError> {
    let request = args.request().await?;
    info!(
        items = request.items.len(),
        basis = ?settings.discount_basis,
        "Calculating bill"
    );

    let response =
        calculate_with_basis(&request, settings.discount_basis).map_err(ApiError::from)?;
    report::render(&response, settings)
}

/// What the binary prints on stdout and the code it exits with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub output: String,
    pub exit_code: i32,
}

/// Runs `calculate` and turns a rejected bill into a rendered error with
/// [`EXIT_REJECTED`].
///
/// Any other failure (unreadable input, bad item flag, ...) is returned as
/// an error.
pub async fn execute(args: &CalculateArgs, settings: &Settings) -> Result<Outcome, CliError> {
    match run_calculate(args, settings).await {
        Ok(output) => Ok(Outcome {
            output,
            exit_code: 0,
        }),
        Err(CliError::Rejected(err)) => {
            debug!(code = ?err.code, "Bill rejected");
            Ok(Outcome {
                output: report::render_error(&err, settings)?,
                exit_code: EXIT_REJECTED,
            })
        }
        Err(err) => Err(err),
    }
}
