//! Repeat tracker: how often each unordered pair of players has met.

use std::collections::HashMap;

#[derive(Clone, Debug, Default)]
pub struct RepeatTracker {
    meetings: HashMap<(String, String), u32>,
}

fn key(a: &str, b: &str) -> (String, String) {
    if a <= b {
        (a.to_string(), b.to_string())
    } else {
        (b.to_string(), a.to_string())
    }
}

impl RepeatTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one meeting and return the new count.
    pub fn add(&mut self, a: &str, b: &str) -> u32 {
        let count = self.meetings.entry(key(a, b)).or_insert(0);
        *count += 1;
        *count
    }

    /// Meetings so far (0 if never).
    pub fn get(&self, a: &str, b: &str) -> u32 {
        self.meetings.get(&key(a, b)).copied().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_are_order_independent() {
        let mut r = RepeatTracker::new();
        assert_eq!(r.add("Bo", "Al"), 1);
        assert_eq!(r.add("Al", "Bo"), 2);
        assert_eq!(r.get("Bo", "Al"), 2);
        assert_eq!(r.get("Al", "Cy"), 0);
    }
}
