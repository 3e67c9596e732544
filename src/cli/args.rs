use crate::report::ReportKind;
use crate::types::{DateRange, LedgerError};
use chrono::NaiveDate;
use clap::Parser;
use std::path::PathBuf;

/// Replay bookkeeping operations and emit a report
#[derive(Parser, Debug)]
#[command(name = "ledger-engine")]
#[command(about = "Replay bookkeeping operations from CSV and emit a report", long_about = None)]
pub struct CliArgs {
    /// Input CSV file path containing ledger operations
    #[arg(value_name = "INPUT", help = "Path to the input operations CSV file")]
    pub input_file: PathBuf,

    /// Which report to write to stdout after the replay
    #[arg(
        long = "report",
        value_name = "KIND",
        default_value = "summary",
        help = "Report to emit: 'customers', 'obligations', 'cash', or 'summary'"
    )]
    pub report: ReportKind,

    /// Start of the report date filter (inclusive)
    #[arg(long = "from", value_name = "DATE", help = "Filter start date (YYYY-MM-DD)")]
    pub from: Option<NaiveDate>,

    /// End of the report date filter (inclusive)
    #[arg(long = "to", value_name = "DATE", help = "Filter end date (YYYY-MM-DD)")]
    pub to: Option<NaiveDate>,
}

impl CliArgs {
    /// Build the report date range from the `--from`/`--to` pair
    ///
    /// Both must be given together; an open-ended range is not supported.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` when only one bound is present or the bounds
    /// are inverted.
    pub fn date_range(&self) -> Result<Option<DateRange>, LedgerError> {
        match (self.from, self.to) {
            (None, None) => Ok(None),
            (Some(start), Some(end)) => DateRange::new(start, end).map(Some),
            _ => Err(LedgerError::invalid_argument(
                "date_range",
                "--from and --to must be given together",
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::default_report(&["program", "input.csv"], ReportKind::Summary)]
    #[case::obligations(&["program", "--report", "obligations", "input.csv"], ReportKind::Obligations)]
    #[case::cash(&["program", "--report", "cash", "input.csv"], ReportKind::Cash)]
    #[case::customers(&["program", "--report", "customers", "input.csv"], ReportKind::Customers)]
    fn test_report_parsing(#[case] args: &[&str], #[case] expected: ReportKind) {
        let parsed = CliArgs::try_parse_from(args).unwrap();
        assert_eq!(parsed.report, expected);
    }

    #[test]
    fn test_date_range_requires_both_bounds() {
        let parsed =
            CliArgs::try_parse_from(["program", "--from", "2025-06-01", "input.csv"]).unwrap();
        assert!(matches!(
            parsed.date_range(),
            Err(LedgerError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_date_range_built_from_both_bounds() {
        let parsed = CliArgs::try_parse_from([
            "program",
            "--from",
            "2025-06-01",
            "--to",
            "2025-06-30",
            "input.csv",
        ])
        .unwrap();

        let range = parsed.date_range().unwrap().unwrap();
        assert_eq!(range.start, NaiveDate::from_ymd_opt(2025, 6, 1).unwrap());
        assert_eq!(range.end, NaiveDate::from_ymd_opt(2025, 6, 30).unwrap());
    }

    #[rstest]
    #[case::missing_input(&["program"])]
    #[case::invalid_report(&["program", "--report", "invoices", "input.csv"])]
    #[case::invalid_date(&["program", "--from", "June", "--to", "2025-06-30", "input.csv"])]
    fn test_parsing_errors(#[case] args: &[&str]) {
        let result = CliArgs::try_parse_from(args);
        assert!(result.is_err());
    }
}
