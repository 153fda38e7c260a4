use crate::error::{AnalyzerError, Result};
use regex::Regex;
use std::sync::OnceLock;

/// Facts pulled out of a single log line.
///
/// Borrows from the line, so it lives only as long as the line it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ParsedEvent<'a> {
    /// First dotted-quad address on the line
    pub address: Option<&'a str>,
    /// Request path following a quoted GET/POST/PUT/DELETE
    pub endpoint: Option<&'a str>,
    /// Line looks like a failed authentication attempt
    pub failed_login: bool,
}

impl<'a> ParsedEvent<'a> {
    /// A failure marker only counts when the same line names an address.
    pub fn attributable_failure(&self) -> Option<&'a str> {
        match (self.address, self.failed_login) {
            (Some(address), true) => Some(address),
            _ => None,
        }
    }
}

/// Four digit groups separated by dots. Octets are not range-checked:
///   10.0.0.1, 999.1.2.3
static ADDRESS_REGEX: OnceLock<Regex> = OnceLock::new();

/// A quote, a method token, whitespace, then a path up to the next whitespace:
///   "GET /login HTTP/1.1"  ->  /login
static ENDPOINT_REGEX: OnceLock<Regex> = OnceLock::new();

fn address_regex() -> &'static Regex {
    ADDRESS_REGEX.get_or_init(|| {
        Regex::new(r"\d+\.\d+\.\d+\.\d+").expect("hard-coded regex should always compile")
    })
}

fn endpoint_regex() -> &'static Regex {
    ENDPOINT_REGEX.get_or_init(|| {
        Regex::new(r#""(?:GET|POST|PUT|DELETE)\s(/\S*)"#)
            .expect("hard-coded regex should always compile")
    })
}

/// Applies the three extraction rules to a line.
///
/// The address and endpoint rules are fixed; the failed-login rule is built
/// from configuration.
#[derive(Debug, Clone)]
pub struct LineParser {
    failure: Regex,
}

impl LineParser {
    pub fn new(failure_pattern: &str) -> Result<Self> {
        let failure = Regex::new(failure_pattern).map_err(|source| AnalyzerError::InvalidPattern {
            pattern: failure_pattern.to_string(),
            source,
        })?;
        Ok(LineParser { failure })
    }

    pub fn parse<'a>(&self, line: &'a str) -> ParsedEvent<'a> {
        let address = address_regex().find(line).map(|m| m.as_str());
        let endpoint = endpoint_regex()
            .captures(line)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str());
        let failed_login = self.failure.is_match(line);

        ParsedEvent {
            address,
            endpoint,
            failed_login,
        }
    }
}

impl Default for LineParser {
    fn default() -> Self {
        LineParser::new(crate::config::DEFAULT_FAILED_LOGIN_PATTERN)
            .expect("default failed-login pattern should always compile")
    }
}

// ─── Unit Tests ──────────────────────────────────────────────────────────────
