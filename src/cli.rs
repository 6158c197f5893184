//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Tshirt Analyzer - sales breakdown for t-shirt order exports
///
/// Reads a CSV of t-shirt sales, ranks sizes, colors and designs by
/// revenue, and writes a report plus a console summary.
///
/// Examples:
///   tshirt-analyzer tshirt_sales.csv tshirt_report.txt
///   tshirt-analyzer tshirt_sales.csv report.json --format json
///   tshirt-analyzer orders.tsv --delimiter '\t' --top 5
///   tshirt-analyzer --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// CSV file of sales records (header row required)
    #[arg(value_name = "INPUT", required_unless_present = "init_config")]
    pub input: Option<PathBuf>,

    /// Output file path for the report
    ///
    /// Defaults to the config value, or tshirt_report.txt.
    #[arg(value_name = "OUTPUT")]
    pub output: Option<PathBuf>,

    /// Path to configuration file
    ///
    /// If not specified, looks for .tshirt-analyzer.toml in the current directory
    #[arg(short, long, value_name = "FILE", env = "TSHIRT_ANALYZER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (minimal output)
    #[arg(short, long)]
    pub quiet: bool,

    /// Report format (text, json)
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<OutputFormat>,

    /// Number of top sizes and colors shown in the console summary
    #[arg(long, value_name = "COUNT")]
    pub top: Option<usize>,

    /// Field delimiter of the input file
    #[arg(long, value_name = "CHAR", value_parser = parse_delimiter)]
    pub delimiter: Option<char>,

    /// Generate a default .tshirt-analyzer.toml configuration file
    #[arg(long)]
    pub init_config: bool,
}

/// Output format for the report.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Plain text (default)
    #[default]
    Text,
    /// JSON format
    Json,
}

/// Accept a single character, or the escape `\t` for tab.
fn parse_delimiter(s: &str) -> Result<char, String> {
    if s == "\\t" {
        return Ok('\t');
    }

    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(format!("Delimiter must be a single character, got '{}'", s)),
    }
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        // Skip validation for --init-config
        if self.init_config {
            return Ok(());
        }

        match self.input {
            None => return Err("An input file is required".to_string()),
            Some(ref input) if !input.is_file() => {
                return Err(format!("Input file '{}' not found", input.display()));
            }
            Some(_) => {}
        }

        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        if self.top == Some(0) {
            return Err("--top must be at least 1".to_string());
        }

        if let Some(delimiter) = self.delimiter {
            if !delimiter.is_ascii() {
                return Err("Delimiter must be an ASCII character".to_string());
            }
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    pub(crate) fn make_args() -> Args {
        Args {
            input: Some(PathBuf::from("sales.csv")),
            output: None,
            config: None,
            verbose: false,
            quiet: false,
            format: None,
            top: None,
            delimiter: None,
            init_config: false,
        }
    }

    #[test]
    fn test_validation_missing_input_file() {
        let args = make_args();
        let err = args.validate().unwrap_err();
        assert!(err.contains("not found"));
    }

    #[test]
    fn test_validation_existing_input_file() {
        let file = NamedTempFile::new().unwrap();
        let mut args = make_args();
        args.input = Some(file.path().to_path_buf());
        assert!(args.validate().is_ok());

        args.top = Some(0);
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_validation_conflicting_options() {
        let file = NamedTempFile::new().unwrap();
        let mut args = make_args();
        args.input = Some(file.path().to_path_buf());
        args.verbose = true;
        args.quiet = true;
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_validation_init_config() {
        let mut args = make_args();
        args.input = None;
        args.init_config = true;
        assert!(args.validate().is_ok());
    }

    #[test]
    fn test_parse_delimiter() {
        assert_eq!(parse_delimiter(";"), Ok(';'));
        assert_eq!(parse_delimiter("\\t"), Ok('\t'));
        assert!(parse_delimiter(",,").is_err());
        assert!(parse_delimiter("").is_err());
    }

    #[test]
    fn test_parse_from_command_line() {
        let args = Args::try_parse_from([
            "tshirt-analyzer",
            "sales.csv",
            "report.json",
            "--format",
            "json",
            "--top",
            "5",
        ])
        .unwrap();

        assert_eq!(args.input, Some(PathBuf::from("sales.csv")));
        assert_eq!(args.output, Some(PathBuf::from("report.json")));
        assert_eq!(args.format, Some(OutputFormat::Json));
        assert_eq!(args.top, Some(5));
    }

    #[test]
    fn test_log_level() {
        let mut args = make_args();
        assert_eq!(args.log_level(), tracing::Level::INFO);

        args.verbose = true;
        assert_eq!(args.log_level(), tracing::Level::DEBUG);

        args.verbose = false;
        args.quiet = true;
        assert_eq!(args.log_level(), tracing::Level::ERROR);
    }
}
