use std::path::PathBuf;

pub const DEFAULT_LOG_FILE: &str = "sample.log";
pub const DEFAULT_CSV_OUTPUT: &str = "log_analysis_results.csv";
pub const DEFAULT_FAILED_LOGIN_THRESHOLD: i64 = 3;
pub const DEFAULT_FAILED_LOGIN_PATTERN: &str = r"401|Invalid credentials";

/// Everything one analysis run needs, passed explicitly into the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisConfig {
    /// Log file to read
    pub log_file: PathBuf,
    /// Where the sectioned CSV record is written
    pub csv_output: PathBuf,
    /// Optional JSON export of the full analysis
    pub json_output: Option<PathBuf>,
    /// An address is suspicious once its failed-login count is strictly above this
    pub failed_login_threshold: i64,
    /// Regex marking a line as a failed authentication attempt
    pub failed_login_pattern: String,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        AnalysisConfig {
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
            csv_output: PathBuf::from(DEFAULT_CSV_OUTPUT),
            json_output: None,
            failed_login_threshold: DEFAULT_FAILED_LOGIN_THRESHOLD,
            failed_login_pattern: DEFAULT_FAILED_LOGIN_PATTERN.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let config = AnalysisConfig::default();
        assert_eq!(config.log_file, PathBuf::from("sample.log"));
        assert_eq!(config.csv_output, PathBuf::from("log_analysis_results.csv"));
        assert_eq!(config.json_output, None);
        assert_eq!(config.failed_login_threshold, 3);
        assert_eq!(config.failed_login_pattern, "401|Invalid credentials");
    }
}
