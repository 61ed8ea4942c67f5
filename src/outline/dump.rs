use super::{BookmarkRecord, Outline};
use tracing::debug;

#[derive(Debug, Default)]
struct PendingRecord {
    title: Option<String>,
    level: Option<u32>,
    page: Option<u32>,
}

impl PendingRecord {
    fn is_empty(&self) -> bool {
        self.title.is_none() && self.level.is_none() && self.page.is_none()
    }

    /// Emit the record if every field was seen, and reset either way.
    fn flush(&mut self, records: &mut Vec<BookmarkRecord>) {
        let pending = std::mem::take(self);
        match pending {
            PendingRecord {
                title: Some(title),
                level: Some(level),
                page: Some(page),
            } => records.push(BookmarkRecord { title, level, page }),
            pending if pending.is_empty() => {}
            pending => debug!(?pending, "dropping incomplete bookmark record"),
        }
    }
}

/// Parse the text of a `pdftk dump_data` run into an outline.
///
/// Bookmarks arrive as `BookmarkTitle`, `BookmarkLevel` and
/// `BookmarkPageNumber` lines. A bookmark is complete once its page number
/// is read; records missing a field, or pointing at page 0, are dropped. Titles are kept verbatim,
/// HTML entities included.
pub fn parse_dump_data(text: &str) -> Outline {
    let mut outline = Outline::default();
    let mut pending = PendingRecord::default();

    for line in text.lines() {
        let (key, value) = match line.split_once(": ") {
            Some((key, value)) => (key.trim(), value),
            None => (line.trim(), ""),
        };

        match key {
            "BookmarkBegin" => pending.flush(&mut outline.records),
            "BookmarkTitle" => pending.title = Some(value.trim().to_string()),
            "BookmarkLevel" => pending.level = value.trim().parse().ok(),
            "BookmarkPageNumber" => {
                // pdftk reports 0 for bookmarks without a resolvable target.
                pending.page = value.trim().parse().ok().filter(|&page| page >= 1);
                pending.flush(&mut outline.records);
            }
            "NumberOfPages" => outline.page_count = value.trim().parse().ok(),
            _ => {}
        }
    }
    pending.flush(&mut outline.records);

    outline
}

#[cfg(test)]
mod tests {
    use super::*;

    const DUMP: &str = "\
InfoBegin
InfoKey: Title
InfoValue: Bestiary
NumberOfPages: 330
BookmarkBegin
BookmarkTitle: Introduction
BookmarkLevel: 1
BookmarkPageNumber: 4
BookmarkBegin
BookmarkTitle: Monsters A to Z
BookmarkLevel: 1
BookmarkPageNumber: 10
BookmarkBegin
BookmarkTitle: Will&#8217;o&#8217;wisp
BookmarkLevel: 2
BookmarkPageNumber: 277
";

    #[test]
    fn test_parse_records() {
        let outline = parse_dump_data(DUMP);
        assert_eq!(outline.page_count, Some(330));
        assert_eq!(outline.records.len(), 3);
        assert_eq!(
            outline.records[1],
            BookmarkRecord {
                title: "Monsters A to Z".to_string(),
                level: 1,
                page: 10,
            }
        );
    }

    #[test]
    fn test_entity_preserved() {
        let outline = parse_dump_data(DUMP);
        assert_eq!(outline.records[2].title, "Will&#8217;o&#8217;wisp");
    }

    #[test]
    fn test_title_with_separator_kept_whole() {
        let text = "BookmarkTitle: Appendix: Variants\nBookmarkLevel: 1\nBookmarkPageNumber: 3\n";
        let outline = parse_dump_data(text);
        assert_eq!(outline.records[0].title, "Appendix: Variants");
    }

    #[test]
    fn test_incomplete_record_dropped() {
        let text = "\
BookmarkBegin
BookmarkTitle: Missing Level
BookmarkPageNumber: 5
BookmarkBegin
BookmarkTitle: Goblin
BookmarkLevel: 2
BookmarkPageNumber: 156
";
        let outline = parse_dump_data(text);
        assert_eq!(outline.records.len(), 1);
        assert_eq!(outline.records[0].title, "Goblin");
        assert_eq!(outline.page_count, None);
    }

    #[test]
    fn test_fields_do_not_leak_into_next_record() {
        let text = "\
BookmarkBegin
BookmarkTitle: Orphan
BookmarkLevel: 2
BookmarkBegin
BookmarkLevel: 2
BookmarkPageNumber: 9
";
        let outline = parse_dump_data(text);
        assert!(outline.records.is_empty());
    }

    #[test]
    fn test_bad_page_number_counts_as_missing() {
        let text = "BookmarkTitle: Orc\nBookmarkLevel: 2\nBookmarkPageNumber: x\n";
        assert!(parse_dump_data(text).records.is_empty());
    }

    #[test]
    fn test_page_zero_counts_as_missing() {
        let text = "\
BookmarkBegin
BookmarkTitle: Ghost
BookmarkLevel: 2
BookmarkPageNumber: 0
BookmarkBegin
BookmarkTitle: Ghoul
BookmarkLevel: 2
BookmarkPageNumber: 146
";
        let outline = parse_dump_data(text);
        assert_eq!(outline.records.len(), 1);
        assert_eq!(outline.records[0].title, "Ghoul");
        assert!(outline.records.iter().all(|r| r.page >= 1));
    }
}
