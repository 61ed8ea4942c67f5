use super::Corrections;
use crate::outline::EntryNode;

/// Promote variant entries nested under a parent bookmark to the top level.
///
/// Bestiaries 1 to 4 nest variants inconsistently: sometimes the parent
/// bookmark is a real entry with pages of its own, sometimes it only spans
/// its variants. A parent that starts on the same page as its first variant
/// and has several of them is dropped in favour of the variants.
pub fn promote_groupings(mut section: EntryNode, corrections: &Corrections) -> EntryNode {
    let mut promoted = Vec::with_capacity(section.children.len());

    for mut row in std::mem::take(&mut section.children) {
        if row.children.is_empty() {
            promoted.push(row);
            continue;
        }

        let mut candidates = Vec::new();
        let mut kept = Vec::new();
        for mut child in std::mem::take(&mut row.children) {
            if is_variant(&row.title, &child.title, corrections) {
                let pulled = if child.title.starts_with(&corrections.dragon_prefix) {
                    let (pulled, rest): (Vec<_>, Vec<_>) = std::mem::take(&mut child.children)
                        .into_iter()
                        .partition(|grandchild| grandchild.title.contains(','));
                    child.children = rest;
                    pulled
                } else {
                    Vec::new()
                };
                candidates.push(child);
                candidates.extend(pulled);
            } else if child.title.ends_with(&corrections.giant_suffix)
                || (row.title == corrections.outer_dragon_group
                    && child.title.contains(corrections.dragon_infix.trim_end()))
            {
                candidates.push(child);
            } else {
                kept.push(child);
            }
        }
        row.children = kept;

        let Some(first) = candidates.first() else {
            promoted.push(row);
            continue;
        };
        let spans_only_variants = row.page == first.page && candidates.len() > 1;
        if !spans_only_variants {
            promoted.push(row);
        }
        promoted.extend(candidates);
    }

    section.children = promoted;
    section
}

fn is_variant(parent: &str, title: &str, corrections: &Corrections) -> bool {
    title.starts_with(parent)
        && !corrections
            .grouping_markers
            .iter()
            .any(|marker| title.contains(marker.as_str()))
        && !corrections.grouping_titles.iter().any(|t| t == title)
}
