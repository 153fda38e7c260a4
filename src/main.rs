mod aggregator;
mod analyzer;
mod classifier;
mod config;
mod error;
mod parser;
mod report;
mod source;

use clap::Parser;
use config::AnalysisConfig;
use error::Result;
use source::LogSource;
use std::path::PathBuf;

/// Summarizes an access log and flags addresses with repeated failed logins
#[derive(Parser, Debug)]
#[command(
    name = "access_log_analyzer",
    author,
    version,
    about = "Counts requests per IP and per endpoint, and flags IPs with too many failed logins"
)]
struct Args {
    /// Path to the log file to analyze
    #[arg(value_name = "LOG_FILE", default_value = config::DEFAULT_LOG_FILE)]
    file: PathBuf,

    /// Where to write the CSV results
    #[arg(short = 'o', long = "output", value_name = "CSV_FILE", default_value = config::DEFAULT_CSV_OUTPUT)]
    output: PathBuf,

    /// IPs with more failed logins than this are flagged
    #[arg(
        short = 't',
        long = "threshold",
        value_name = "COUNT",
        default_value_t = config::DEFAULT_FAILED_LOGIN_THRESHOLD,
        allow_negative_numbers = true
    )]
    threshold: i64,

    /// Regex that marks a line as a failed login
    #[arg(
        short = 'p',
        long = "failure-pattern",
        value_name = "REGEX",
        default_value = config::DEFAULT_FAILED_LOGIN_PATTERN
    )]
    failure_pattern: String,

    /// Also export the full analysis as JSON to this path
    #[arg(short = 'j', long = "json-output", value_name = "OUTPUT_FILE")]
    json_output: Option<PathBuf>,

    /// Suppress warnings for unreadable log lines
    #[arg(short = 'q', long = "quiet")]
    quiet: bool,

    /// Disable colored terminal output
    #[arg(long = "no-color")]
    no_color: bool,
}

impl Args {
    fn to_config(&self) -> AnalysisConfig {
        AnalysisConfig {
            log_file: self.file.clone(),
            csv_output: self.output.clone(),
            json_output: self.json_output.clone(),
            failed_login_threshold: self.threshold,
            failed_login_pattern: self.failure_pattern.clone(),
        }
    }
}

fn main() {
    let args = Args::parse();

    let default_level = if args.quiet { "error" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();

    if args.no_color {
        colored::control::set_override(false);
    }

    if let Err(e) = run(&args.to_config()) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

fn run(config: &AnalysisConfig) -> Result<()> {
    let mut source = LogSource::open(&config.log_file)?;
    let analysis = analyzer::analyze(&mut source, config)?;

    report::print_report(&analysis).map_err(|source| error::AnalyzerError::Io {
        path: PathBuf::from("<stdout>"),
        source,
    })?;

    report::export_csv(&analysis.summary, &config.csv_output)?;
    println!("Results saved to {}", config.csv_output.display());

    if let Some(json_path) = &config.json_output {
        report::export_json(&analysis, json_path)?;
        println!("✓ JSON report saved to '{}'", json_path.display());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Args::command().debug_assert();
    }

    #[test]
    fn defaults_match_config_defaults() {
        let args = Args::try_parse_from(["access_log_analyzer"]).unwrap();
        assert_eq!(args.to_config(), AnalysisConfig::default());
    }

    #[test]
    fn accepts_negative_threshold() {
        let args = Args::try_parse_from(["access_log_analyzer", "auth.log", "-t", "-1"]).unwrap();
        let config = args.to_config();
        assert_eq!(config.failed_login_threshold, -1);
        assert_eq!(config.log_file, PathBuf::from("auth.log"));
    }

    #[test]
    fn reads_all_options() {
        let args = Args::try_parse_from([
            "access_log_analyzer",
            "access.log",
            "--output",
            "out.csv",
            "--threshold",
            "5",
            "--failure-pattern",
            "403",
            "--json-output",
            "out.json",
            "--quiet",
            "--no-color",
        ])
        .unwrap();
        assert!(args.quiet);
        assert!(args.no_color);
        let config = args.to_config();
        assert_eq!(config.csv_output, PathBuf::from("out.csv"));
        assert_eq!(config.json_output, Some(PathBuf::from("out.json")));
        assert_eq!(config.failed_login_threshold, 5);
        assert_eq!(config.failed_login_pattern, "403");
    }
}
