//! URL search-parameter handling for the list views.
//!
//! The search box rewrites the `query` parameter of the current URL. The
//! rewrite is a pure function over the parameter list, and the 300ms quiet
//! period is a small state machine with time passed in, so neither depends
//! on a UI runtime.

use std::time::{Duration, Instant};

use crate::constants::SEARCH_DEBOUNCE_MS;

/// Ordered list of URL query parameters
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchParams {
    pairs: Vec<(String, String)>,
}

impl SearchParams {
    /// Parse a raw query string (without the leading `?`)
    pub fn parse(query_string: &str) -> Self {
        let pairs = serde_urlencoded::from_str::<Vec<(String, String)>>(query_string)
            .unwrap_or_default();
        Self { pairs }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Replace the first `key` entry in place, or append it; later duplicates are dropped
    pub fn set(&mut self, key: &str, value: &str) {
        let mut seen = false;
        self.pairs.retain_mut(|(k, v)| {
            if k != key {
                return true;
            }
            if seen {
                return false;
            }
            seen = true;
            *v = value.to_string();
            true
        });
        if !seen {
            self.pairs.push((key.to_string(), value.to_string()));
        }
    }

    pub fn delete(&mut self, key: &str) {
        self.pairs.retain(|(k, _)| k != key);
    }

    /// Render back to an URL-encoded query string
    pub fn to_query_string(&self) -> String {
        serde_urlencoded::to_string(&self.pairs).unwrap_or_default()
    }
}

/// Compute the parameters after the user searches for `new_query`.
///
/// A new search always starts back at page 1; an empty search removes the
/// `query` parameter instead of leaving `query=` behind.
pub fn apply_search(current: &SearchParams, new_query: &str) -> SearchParams {
    let mut params = current.clone();
    params.set("page", "1");
    if new_query.is_empty() {
        params.delete("query");
    } else {
        params.set("query", new_query);
    }
    params
}

/// Trailing-edge debouncer: only the last input of a burst is emitted.
#[derive(Debug)]
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<(Instant, T)>,
}

impl<T> Default for Debouncer<T> {
    fn default() -> Self {
        Self::new(Duration::from_millis(SEARCH_DEBOUNCE_MS))
    }
}

impl<T> Debouncer<T> {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Record an input, restarting the quiet period
    pub fn input(&mut self, now: Instant, value: T) {
        self.pending = Some((now, value));
    }

    /// Take the pending value if the quiet period has elapsed
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match self.pending {
            Some((at, _)) if now.saturating_duration_since(at) >= self.delay => {
                self.pending.take().map(|(_, value)| value)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_resets_page_and_sets_query() {
        let current = SearchParams::parse("page=4&sort=date");
        let next = apply_search(&current, "sam");

        assert_eq!(next.get("page"), Some("1"));
        assert_eq!(next.get("query"), Some("sam"));
        assert_eq!(next.get("sort"), Some("date"));
        assert_eq!(next.to_query_string(), "page=1&sort=date&query=sam");
    }

    #[test]
    fn test_empty_search_removes_query() {
        let current = SearchParams::parse("query=lee&page=2");
        let next = apply_search(&current, "");

        assert_eq!(next.get("query"), None);
        assert_eq!(next.to_query_string(), "page=1");
    }

    #[test]
    fn test_search_does_not_mutate_input() {
        let current = SearchParams::parse("query=a");
        let _ = apply_search(&current, "b");
        assert_eq!(current.get("query"), Some("a"));
    }

    #[test]
    fn test_query_is_url_encoded() {
        let next = apply_search(&SearchParams::default(), "a&b c");
        assert_eq!(next.to_query_string(), "page=1&query=a%26b+c");
        assert_eq!(
            SearchParams::parse(&next.to_query_string()).get("query"),
            Some("a&b c")
        );
    }

    #[test]
    fn test_debouncer_emits_last_value_after_quiet_period() {
        let start = Instant::now();
        let mut debouncer = Debouncer::default();

        debouncer.input(start, "s");
        debouncer.input(start + Duration::from_millis(100), "sa");
        debouncer.input(start + Duration::from_millis(200), "sam");

        assert_eq!(debouncer.poll(start + Duration::from_millis(400)), None);
        assert_eq!(
            debouncer.poll(start + Duration::from_millis(500)),
            Some("sam")
        );
        assert_eq!(debouncer.poll(start + Duration::from_millis(900)), None);
    }
}
