use crate::parser::ParsedEvent;
use std::collections::HashMap;

/// A count per key that remembers the order keys were first seen.
///
/// Tie-breaks downstream depend on first-seen order, which `HashMap`
/// iteration does not preserve.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderedCounter {
    index: HashMap<String, usize>,
    entries: Vec<(String, usize)>,
}

impl OrderedCounter {
    pub fn increment(&mut self, key: &str) {
        match self.index.get(key) {
            Some(&slot) => self.entries[slot].1 += 1,
            None => {
                let key = key.to_string();
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, 1));
            }
        }
    }

    /// Entries in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> + '_ {
        self.entries.iter().map(|(key, count)| (key.as_str(), *count))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, count)| count).sum()
    }
}

/// Running counts built up one line at a time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tallies {
    pub requests_per_address: OrderedCounter,
    pub accesses_per_endpoint: OrderedCounter,
    pub failed_logins_per_address: OrderedCounter,
}

impl Tallies {
    /// Fold one parsed line into the counts.
    pub fn accumulate(&mut self, event: &ParsedEvent<'_>) {
        if let Some(address) = event.address {
            self.requests_per_address.increment(address);
        }
        if let Some(endpoint) = event.endpoint {
            self.accesses_per_endpoint.increment(endpoint);
        }
        if let Some(address) = event.attributable_failure() {
            self.failed_logins_per_address.increment(address);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::LineParser;

    fn tally(lines: &[&str]) -> Tallies {
        let parser = LineParser::default();
        let mut tallies = Tallies::default();
        for line in lines {
            tallies.accumulate(&parser.parse(line));
        }
        tallies
    }

    fn count(counter: &OrderedCounter, key: &str) -> usize {
        counter
            .iter()
            .find(|(k, _)| *k == key)
            .map_or(0, |(_, n)| n)
    }

    #[test]
    fn counter_preserves_first_seen_order() {
        let mut counter = OrderedCounter::default();
        for key in ["b", "a", "b", "c", "a", "b"] {
            counter.increment(key);
        }
        let entries: Vec<_> = counter.iter().collect();
        assert_eq!(entries, vec![("b", 3), ("a", 2), ("c", 1)]);
        assert_eq!(count(&counter, "a"), 2);
        assert_eq!(count(&counter, "missing"), 0);
        assert_eq!(counter.total(), 6);
        assert_eq!(counter.len(), 3);
    }

    #[test]
    fn single_failed_login_line() {
        // no quote before the method, so no endpoint
        let tallies = tally(&[r#"GET /login HTTP/1.1" 401 - from 10.0.0.1"#]);
        assert_eq!(count(&tallies.requests_per_address, "10.0.0.1"), 1);
        assert_eq!(count(&tallies.failed_logins_per_address, "10.0.0.1"), 1);
        assert!(tallies.accesses_per_endpoint.is_empty());
    }

    #[test]
    fn quoted_failed_login_line_counts_endpoint() {
        let tallies = tally(&[r#""GET /login HTTP/1.1" 401 - from 10.0.0.1"#]);
        assert_eq!(count(&tallies.requests_per_address, "10.0.0.1"), 1);
        assert_eq!(count(&tallies.failed_logins_per_address, "10.0.0.1"), 1);
        assert_eq!(count(&tallies.accesses_per_endpoint, "/login"), 1);
    }

    #[test]
    fn address_without_endpoint_still_counts() {
        let tallies = tally(&["sshd: connection from 10.0.0.3 closed"]);
        assert_eq!(count(&tallies.requests_per_address, "10.0.0.3"), 1);
        assert!(tallies.accesses_per_endpoint.is_empty());
        assert!(tallies.failed_logins_per_address.is_empty());
    }

    #[test]
    fn unattributed_failure_is_dropped() {
        let tallies = tally(&[r#""POST /login HTTP/1.1" 401 Invalid credentials"#]);
        assert!(tallies.requests_per_address.is_empty());
        assert!(tallies.failed_logins_per_address.is_empty());
        assert_eq!(count(&tallies.accesses_per_endpoint, "/login"), 1);
    }

    #[test]
    fn unmatched_lines_contribute_nothing() {
        let tallies = tally(&["", "garbage", "   "]);
        assert_eq!(tallies, Tallies::default());
    }

    #[test]
    fn request_total_equals_lines_with_address() {
        let lines = [
            r#"192.168.1.1 - - "GET /home HTTP/1.1" 200"#,
            "no address here",
            r#"10.0.0.2 - - "POST /login HTTP/1.1" 401"#,
            r#""GET /about HTTP/1.1" 200"#,
            "192.168.1.1 again",
        ];
        let parser = LineParser::default();
        let with_address = lines
            .iter()
            .filter(|line| parser.parse(line).address.is_some())
            .count();
        let tallies = tally(&lines);
        assert_eq!(tallies.requests_per_address.total(), with_address);
        assert_eq!(with_address, 3);
    }

    #[test]
    fn final_counts_do_not_depend_on_line_order() {
        let lines = [
            r#"1.1.1.1 "GET /a HTTP/1.1" 401"#,
            r#"2.2.2.2 "GET /b HTTP/1.1" 200"#,
            r#"1.1.1.1 "GET /b HTTP/1.1" 200"#,
        ];
        let forward = tally(&lines);
        let mut reversed = lines;
        reversed.reverse();
        let backward = tally(&reversed);
        for address in ["1.1.1.1", "2.2.2.2"] {
            assert_eq!(
                count(&forward.requests_per_address, address),
                count(&backward.requests_per_address, address)
            );
            assert_eq!(
                count(&forward.failed_logins_per_address, address),
                count(&backward.failed_logins_per_address, address)
            );
        }
        assert_eq!(count(&forward.accesses_per_endpoint, "/b"), 2);
        assert_eq!(count(&backward.accesses_per_endpoint, "/b"), 2);
    }
}
