use crate::outline::EntryNode;
use std::fmt;

/// A closed, 1-based page interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRange {
    pub start: u32,
    pub end: u32,
}

impl PageRange {
    /// A range ending at `end`, or at `start` when `end` falls before it.
    pub fn clamped(start: u32, end: u32) -> Self {
        PageRange {
            start,
            end: end.max(start),
        }
    }

    pub fn contains(&self, page: u32) -> bool {
        (self.start..=self.end).contains(&page)
    }
}

impl fmt::Display for PageRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// An entry destined to become one output file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedEntry {
    pub title: String,
    pub range: PageRange,
}

/// Assign each top-level entry the pages up to the next entry's start, and
/// the last one the pages up to `last_page`.
pub fn resolve_ranges(entries: &[EntryNode], last_page: u32) -> Vec<ResolvedEntry> {
    entries
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let end = match entries.get(i + 1) {
                Some(next) => next.page.saturating_sub(1),
                None => last_page,
            };
            ResolvedEntry {
                title: entry.title.clone(),
                range: PageRange::clamped(entry.page, end),
            }
        })
        .collect()
}
