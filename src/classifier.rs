use crate::aggregator::{OrderedCounter, Tallies};
use serde::Serialize;

/// Placeholder shown when no request line named an endpoint
pub const NO_ENDPOINT: &str = "None";

/// A key and its count
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedItem {
    pub value: String,
    pub count: usize,
}

impl RankedItem {
    fn new(value: &str, count: usize) -> Self {
        RankedItem {
            value: value.to_string(),
            count,
        }
    }
}

/// Final, read-only view of the tallies
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    /// Addresses by request count, highest first; ties keep first-seen order
    pub requests_per_address: Vec<RankedItem>,
    /// Endpoint with the most accesses; the first one seen wins a tie
    pub most_accessed_endpoint: Option<RankedItem>,
    /// Addresses whose failed-login count is strictly above the threshold,
    /// in first-seen order
    pub suspicious_activity: Vec<RankedItem>,
    /// Threshold the suspicious list was built against
    pub failed_login_threshold: i64,
}

impl Summary {
    /// The top endpoint, or (`None`, 0) when nothing was requested.
    pub fn top_endpoint(&self) -> (&str, usize) {
        self.most_accessed_endpoint
            .as_ref()
            .map(|item| (item.value.as_str(), item.count))
            .unwrap_or((NO_ENDPOINT, 0))
    }
}

pub fn summarize(tallies: &Tallies, threshold: i64) -> Summary {
    Summary {
        requests_per_address: rank_by_count(&tallies.requests_per_address),
        most_accessed_endpoint: most_frequent(&tallies.accesses_per_endpoint),
        suspicious_activity: over_threshold(&tallies.failed_logins_per_address, threshold),
        failed_login_threshold: threshold,
    }
}

fn rank_by_count(counter: &OrderedCounter) -> Vec<RankedItem> {
    let mut ranked: Vec<RankedItem> = counter
        .iter()
        .map(|(value, count)| RankedItem::new(value, count))
        .collect();
    // stable: equal counts stay in first-seen order
    ranked.sort_by(|a, b| b.count.cmp(&a.count));
    ranked
}

fn most_frequent(counter: &OrderedCounter) -> Option<RankedItem> {
    counter
        .iter()
        .reduce(|best, next| if next.1 > best.1 { next } else { best })
        .map(|(value, count)| RankedItem::new(value, count))
}

fn over_threshold(counter: &OrderedCounter, threshold: i64) -> Vec<RankedItem> {
    counter
        .iter()
        .filter(|&(_, count)| exceeds(count, threshold))
        .map(|(value, count)| RankedItem::new(value, count))
        .collect()
}

fn exceeds(count: usize, threshold: i64) -> bool {
    i64::try_from(count).map_or(true, |count| count > threshold)
}
