use clap::{Parser, Subcommand};

pub fn parse_window_days(value: &str) -> Result<i64, String> {
    let parsed = value
        .parse::<i64>()
        .map_err(|_| "window must be a whole number of days".to_string())?;
    if parsed < 0 {
        return Err("window must be zero or more days".to_string());
    }
    Ok(parsed)
}

pub fn parse_fraction(value: &str) -> Result<f64, String> {
    let parsed = value
        .parse::<f64>()
        .map_err(|_| "threshold must be a number".to_string())?;
    if !(parsed > 0.0 && parsed < 1.0) {
        return Err("threshold must be between 0 and 1 exclusive".to_string());
    }
    Ok(parsed)
}

/// Extended help shown after `ledgerlens classify --help` and
/// `ledgerlens anomalies --help`: the ledger column contract.
pub const LEDGER_AFTER_HELP: &str = "\
Ledger input format:
  Ledgerlens does not parse raw departmental extracts. Normalize your
  source into one table first, then point a command at it.

  Accepted formats:
    JSON — one top-level array of transaction objects
    CSV  — one header row with the column names below

  <path> is a local file path. Use `-` to read stdin.
  Example: cat ledger.csv | ledgerlens classify -

Ledger columns:
  department (required):
    One of the covered department names, exactly as configured.
    Example: `HMRC`

  supplier (required):
    Supplier name. Normalized to uppercase and trimmed on ingestion.

  amount (required):
    Signed number with at most 2 decimal places. `£` signs, thousands
    separators, and surrounding quotes are stripped automatically.
    Example: `-42.15` or `£1,234.50`

  date (required):
    Calendar date, `YYYY-MM-DD` or `DD/MM/YYYY`. No time component.

  expense_type (required column, value may be empty):
    The source system's expense type label.

  description (required column, value may be empty):
    Free-text line description. When empty, the expense type stands in.

  reference (optional):
    Source transaction number. Only used by quality diagnostics.

  Extra columns in the source are ignored.
";

#[derive(Debug, Parser)]
#[command(
    name = "ledgerlens",
    version,
    about = "public spending triage layer",
    disable_help_subcommand = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Classify every transaction into a spending category
    #[command(after_long_help = LEDGER_AFTER_HELP)]
    Classify {
        /// Path to a normalized JSON or CSV ledger (use `-` for stdin)
        path: Option<String>,
        /// Skip the direct expense-type mapping tier
        #[arg(long)]
        no_direct_map: bool,
        /// Write the classified table as CSV to this path
        #[arg(long)]
        output: Option<String>,
        /// Emit structured JSON object output for machine parsing
        #[arg(long)]
        json: bool,
    },
    /// Flag anomalous payments in a ledger for review
    #[command(after_long_help = LEDGER_AFTER_HELP)]
    Anomalies {
        /// Path to a normalized JSON or CSV ledger (use `-` for stdin)
        path: Option<String>,
        /// Duplicate-payment window in days (default 7)
        #[arg(long, value_parser = parse_window_days)]
        window_days: Option<i64>,
        /// Supplier spend-concentration fraction, 0-1 exclusive (default 0.15)
        #[arg(long, value_parser = parse_fraction)]
        spend_threshold: Option<f64>,
        /// Supplier transaction-concentration fraction, 0-1 exclusive (default 0.10)
        #[arg(long, value_parser = parse_fraction)]
        txn_threshold: Option<f64>,
        /// Emit structured JSON object output for machine parsing
        #[arg(long)]
        json: bool,
    },
    /// Check ledger data quality before running analysis
    Quality {
        /// Path to a normalized JSON or CSV ledger (use `-` for stdin)
        path: Option<String>,
        /// Emit structured JSON object output for machine parsing
        #[arg(long)]
        json: bool,
    },
    /// Run the full pipeline and emit a combined report
    Report {
        /// Path to a normalized JSON or CSV ledger (use `-` for stdin)
        path: Option<String>,
        /// Write classified.csv, anomalies.csv, and stats.json here
        #[arg(long)]
        output_dir: Option<String>,
        /// Emit structured JSON object output for machine parsing
        #[arg(long)]
        json: bool,
    },
}

#[cfg(test)]
pub fn parse_from<I, T>(itr: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::try_parse_from(itr)
}
