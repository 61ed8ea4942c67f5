use super::Corrections;
use crate::outline::EntryNode;

/// Rewrite "Red Dragon, Young" as "Dragon, Red, Young" so every dragon files
/// under D. Entries already in "Dragon, ..." form have their children merged
/// the same way.
pub fn merge_dragon_titles(mut section: EntryNode, corrections: &Corrections) -> EntryNode {
    merge_children(&mut section.children, corrections);
    section
}

fn merge_children(children: &mut [EntryNode], corrections: &Corrections) {
    for row in children {
        if let Some((kind, variant)) = row.title.split_once(&corrections.dragon_infix) {
            row.title = format!("{}{}, {}", corrections.dragon_prefix, kind, variant);
        }
        if row.title.starts_with(&corrections.dragon_prefix) {
            merge_children(&mut row.children, corrections);
        }
    }
}
