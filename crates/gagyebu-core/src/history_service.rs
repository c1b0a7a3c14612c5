//! Reverse-chronological grouping for the history feed.

use std::cmp::Ordering;

use gagyebu_domain::{Entry, HistoryGroup};

/// Groups entries by calendar date for display.
pub struct HistoryService;

impl HistoryService {
    /// Orders entries newest first and partitions them into per-date groups.
    ///
    /// One comparator drives both group order and order within a group: date descending,
    /// then creation time descending. Entries that tie on both keep their input order.
    pub fn group(entries: &[Entry]) -> Vec<HistoryGroup> {
        let mut sorted: Vec<Entry> = entries.to_vec();
        sorted.sort_by(newest_first);

        let mut groups: Vec<HistoryGroup> = Vec::new();
        for entry in sorted {
            match groups.last_mut() {
                Some(current) if current.date == entry.date => current.entries.push(entry),
                _ => groups.push(HistoryGroup {
                    date: entry.date,
                    entries: vec![entry],
                }),
            }
        }
        groups
    }
}

/// Date descending, then creation timestamp descending.
pub fn newest_first(a: &Entry, b: &Entry) -> Ordering {
    b.date
        .cmp(&a.date)
        .then_with(|| b.created_at.cmp(&a.created_at))
}
