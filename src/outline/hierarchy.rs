use super::{BookmarkRecord, EntryNode, Outline};
use anyhow::{bail, Result};
use tracing::warn;

/// Build the subtree of `parent` from a flat, depth-tagged record list.
///
/// Records one level below the current parent become its children. A record
/// that jumps more than one level deeper descends into the most recent child
/// and is retried there; a record at or above the current parent's level
/// closes that parent. The open parents are kept on an explicit stack.
pub fn build_hierarchy(parent: EntryNode, records: &[BookmarkRecord]) -> EntryNode {
    let mut stack = vec![parent];
    let mut cursor = 0;

    while let Some(record) = records.get(cursor) {
        let depth = stack.len();
        let current = &mut stack[depth - 1];

        if record.level <= current.level {
            if depth == 1 {
                warn!(
                    title = %record.title,
                    level = record.level,
                    ignored = records.len() - cursor,
                    "bookmark outside of the outline root; ignoring remaining records"
                );
                break;
            }
            close_frame(&mut stack);
        } else if record.level == current.level + 1 {
            current.children.push(EntryNode::from(record));
            cursor += 1;
        } else {
            match current.children.pop() {
                Some(last) => stack.push(last),
                None => {
                    // Nothing to descend into, keep it at this level.
                    current.children.push(EntryNode::from(record));
                    cursor += 1;
                }
            }
        }
    }

    while stack.len() > 1 {
        close_frame(&mut stack);
    }
    stack.pop().unwrap_or_else(EntryNode::root)
}

fn close_frame(stack: &mut Vec<EntryNode>) {
    if let Some(done) = stack.pop() {
        if let Some(parent) = stack.last_mut() {
            parent.children.push(done);
        }
    }
}

/// The working section of a book and the page its last entry ends on.
///
/// `last_page` is the start page of the next top-level bookmark, so the last
/// entry shares that page with whatever follows the section.
#[derive(Debug, Clone)]
pub struct Section {
    pub node: EntryNode,
    pub last_page: u32,
}

/// Build the whole outline tree and pick the top-level section whose title
/// starts with `prefix`.
pub fn select_section(outline: &Outline, prefix: &str) -> Result<Section> {
    let tree = build_hierarchy(EntryNode::root(), &outline.records);
    let mut top_level = tree.children.into_iter();

    let Some(node) = top_level.by_ref().find(|node| node.title.starts_with(prefix)) else {
        bail!("No top-level bookmark starting with \"{}\" found", prefix);
    };

    let last_page = match top_level.next() {
        Some(next) => next.page.max(node.page),
        None => match outline.page_count {
            Some(count) => count.max(node.page),
            None => bail!(
                "\"{}\" is the last section and the page count is unknown",
                node.title
            ),
        },
    };

    Ok(Section { node, last_page })
}
