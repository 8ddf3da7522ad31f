//! Day-scoped quarantine bookkeeping.
//!
//! The ledger maps a day key to the set of account ids that failed
//! non-fatally on that day. Membership only ever affects selection for the
//! same day; it naturally expires when the day key rolls over. State is
//! process-local and intentionally not persisted.

use std::collections::HashSet;

use dashmap::DashMap;

use crate::calendar::DayKey;

/// In-memory map of day key -> quarantined account ids.
///
/// Insertion goes through the dashmap entry API, so concurrent failures
/// never lose updates; per day the set is append-only. Retained days are
/// bounded: inserting for day D prunes everything older than D's previous
/// day (older entries can never be read again, selection always filters on
/// the current day).
pub struct QuarantineLedger {
    days: DashMap<DayKey, HashSet<String>>,
}

impl QuarantineLedger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self { days: DashMap::new() }
    }

    /// Add `id` to the quarantine set for `day`. Idempotent.
    pub fn quarantine(&self, day: &DayKey, id: &str) {
        let newly_added = {
            let mut set = self.days.entry(day.clone()).or_default();
            set.insert(id.to_string())
        };

        if newly_added {
            tracing::info!("account {} quarantined for {}", id, day);
        }

        if let Some(cutoff) = day.previous() {
            self.days.retain(|key, _| *key >= cutoff);
        }
    }

    /// Whether `id` is quarantined for `day`.
    pub fn is_quarantined(&self, day: &DayKey, id: &str) -> bool {
        self.days.get(day).is_some_and(|set| set.contains(id))
    }

    /// Number of accounts quarantined for `day`.
    pub fn quarantined(&self, day: &DayKey) -> usize {
        self.days.get(day).map_or(0, |set| set.len())
    }
}

impl Default for QuarantineLedger {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::Calendar;
    use chrono::{TimeZone, Utc};
    use std::sync::Arc;

    fn day(y: i32, m: u32, d: u32) -> DayKey {
        let calendar = Calendar::from_name("UTC").expect("known timezone");
        calendar.day_key(Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap())
    }

    #[test]
    fn test_quarantine_is_day_scoped() {
        let ledger = QuarantineLedger::new();
        let today = day(2024, 3, 1);
        let tomorrow = day(2024, 3, 2);

        ledger.quarantine(&today, "acc-a");

        assert!(ledger.is_quarantined(&today, "acc-a"));
        assert!(!ledger.is_quarantined(&tomorrow, "acc-a"));
        assert!(!ledger.is_quarantined(&today, "acc-b"));
    }

    #[test]
    fn test_quarantine_is_idempotent() {
        let ledger = QuarantineLedger::new();
        let today = day(2024, 3, 1);

        ledger.quarantine(&today, "acc-a");
        ledger.quarantine(&today, "acc-a");

        assert_eq!(ledger.quarantined(&today), 1);
    }

    #[test]
    fn test_concurrent_quarantines_are_all_reflected() {
        let ledger = Arc::new(QuarantineLedger::new());
        let today = day(2024, 3, 1);
        let n = 32;

        let handles: Vec<_> = (0..n)
            .map(|i| {
                let ledger = Arc::clone(&ledger);
                let today = today.clone();
                std::thread::spawn(move || {
                    ledger.quarantine(&today, &format!("acc-{}", i));
                })
            })
            .collect();
        for handle in handles {
            handle.join().expect("thread panicked");
        }

        assert_eq!(ledger.quarantined(&today), n);
        for i in 0..n {
            assert!(ledger.is_quarantined(&today, &format!("acc-{}", i)));
        }
    }

    #[test]
    fn test_retention_keeps_current_and_previous_day() {
        let ledger = QuarantineLedger::new();
        let monday = day(2024, 3, 4);
        let tuesday = day(2024, 3, 5);
        let wednesday = day(2024, 3, 6);

        ledger.quarantine(&monday, "acc-a");
        ledger.quarantine(&tuesday, "acc-b");
        ledger.quarantine(&wednesday, "acc-c");

        // Monday was pruned when Wednesday arrived; Tuesday survives as the
        // previous day (covers failures recorded just before midnight).
        assert!(!ledger.is_quarantined(&monday, "acc-a"));
        assert!(ledger.is_quarantined(&tuesday, "acc-b"));
        assert!(ledger.is_quarantined(&wednesday, "acc-c"));
    }
}
