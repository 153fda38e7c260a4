use crate::aggregator::Tallies;
use crate::classifier::{summarize, Summary};
use crate::config::AnalysisConfig;
use crate::error::Result;
use crate::parser::LineParser;
use crate::source::LogSource;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io::BufRead;

/// The complete analysis output
#[derive(Debug, Clone, Serialize)]
pub struct Analysis {
    pub source: String,
    pub generated_at: DateTime<Utc>,
    pub lines_read: usize,
    pub unreadable_lines: usize,
    pub summary: Summary,
}

/// Run the pipeline over a log source: parse each line, fold it into the
/// tallies, then classify once the source is exhausted.
pub fn analyze<R: BufRead>(source: &mut LogSource<R>, config: &AnalysisConfig) -> Result<Analysis> {
    let parser = LineParser::new(&config.failed_login_pattern)?;
    let mut tallies = Tallies::default();
    let mut lines_read = 0usize;

    for line in source.by_ref() {
        let line = line?;
        lines_read += 1;
        tallies.accumulate(&parser.parse(&line));
    }

    log::debug!(
        "consumed {} lines: {} requests from {} addresses, {} endpoints, {} failed logins",
        lines_read,
        tallies.requests_per_address.total(),
        tallies.requests_per_address.len(),
        tallies.accesses_per_endpoint.len(),
        tallies.failed_logins_per_address.total()
    );
    if lines_read > 0 && tallies.requests_per_address.is_empty() {
        log::warn!("no IP addresses found in {}", config.log_file.display());
    }

    Ok(Analysis {
        source: config.log_file.display().to_string(),
        generated_at: Utc::now(),
        lines_read,
        unreadable_lines: source.unreadable(),
        summary: summarize(&tallies, config.failed_login_threshold),
    })
}
