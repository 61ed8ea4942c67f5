//! Structural fixes for bestiary bookmark outlines.
//!
//! Every pass takes the monsters section by value and returns the corrected
//! section, so each one can be exercised on its own.
//!
//! ## Pipeline Order
//!
//! 1. **Letter groups** - Drop the A-Z grouping level some editions add
//! 2. **Introductions** - "Demon Introduction" becomes "Demon"
//! 3. **Names** - Rename base forms that later books expand into variants
//! 4. **Entities** - Unescape `&#8217;` in titles
//! 5. **Spurious** - Remove entries indexed at the top level by mistake
//! 6. **Groupings** - Promote variants nested under a parent bookmark
//! 7. **Dragons** - "Red Dragon, Young" becomes "Dragon, Red, Young"
//! 8. **Duplicates** - Drop the broken first copy of doubled entries
//!
//! Groupings run before dragons because they match the unmerged dragon
//! titles, and dragons must see the variants once they are top level.

pub mod corrections;
mod dragons;
mod groupings;

pub use corrections::Corrections;
pub use dragons::merge_dragon_titles;
pub use groupings::promote_groupings;

use crate::outline::EntryNode;
use tracing::debug;

type Pass = fn(EntryNode, &Corrections) -> EntryNode;

const PIPELINE: [(&str, Pass); 8] = [
    ("letter groups", flatten_letter_groups),
    ("introductions", strip_introductions),
    ("names", disambiguate_names),
    ("entities", unescape_entities),
    ("spurious", drop_spurious),
    ("groupings", promote_groupings),
    ("dragons", merge_dragon_titles),
    ("duplicates", drop_duplicates),
];

/// Run every fix over the monsters section.
pub fn fix_section(mut section: EntryNode, corrections: &Corrections) -> EntryNode {
    for (name, pass) in PIPELINE {
        section = pass(section, corrections);
        debug!(pass = name, entries = section.children.len(), "applied fix");
    }
    section
}

/// Bestiaries 2, 3 and 4 group monsters under single-letter bookmarks.
pub fn flatten_letter_groups(mut section: EntryNode, _: &Corrections) -> EntryNode {
    let grouped = section
        .children
        .first()
        .is_some_and(|first| first.title.chars().count() == 1);

    if grouped {
        section.children = section
            .children
            .into_iter()
            .flat_map(|letter| letter.children)
            .collect();
    }
    section
}

pub fn strip_introductions(mut section: EntryNode, corrections: &Corrections) -> EntryNode {
    let suffix = corrections.introduction_suffix.as_str();
    for row in &mut section.children {
        if let Some(title) = row.title.strip_suffix(suffix) {
            row.title = title.to_string();
        }
    }
    section
}

pub fn disambiguate_names(mut section: EntryNode, corrections: &Corrections) -> EntryNode {
    for row in &mut section.children {
        let rule = corrections
            .renames
            .iter()
            .find(|rule| rule.from == row.title && rule.children == row.children.len());
        if let Some(rule) = rule {
            row.title = rule.to.clone();
        }
    }
    section
}

pub fn unescape_entities(mut section: EntryNode, corrections: &Corrections) -> EntryNode {
    for row in &mut section.children {
        for entity in &corrections.entities {
            if row.title.contains(&entity.from) {
                row.title = row.title.replace(&entity.from, &entity.to);
            }
        }
    }
    section
}

/// Remove every top-level entry listed as spurious.
pub fn drop_spurious(mut section: EntryNode, corrections: &Corrections) -> EntryNode {
    section
        .children
        .retain(|row| !corrections.spurious.contains(&row.title));
    section
}

/// Some entries appear twice and the first copy has a broken page range.
pub fn drop_duplicates(mut section: EntryNode, corrections: &Corrections) -> EntryNode {
    for title in &corrections.duplicates {
        let count = section.children.iter().filter(|row| &row.title == title).count();
        if count > 1 {
            if let Some(first) = section.children.iter().position(|row| &row.title == title) {
                section.children.remove(first);
            }
        }
    }
    section
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn node(title: &str, page: u32) -> EntryNode {
        EntryNode::new(title, 2, page)
    }

    pub(crate) fn section(children: Vec<EntryNode>) -> EntryNode {
        EntryNode::new("Monsters", 1, 1).with_children(children)
    }

    pub(crate) fn titles(node: &EntryNode) -> Vec<&str> {
        node.children.iter().map(|c| c.title.as_str()).collect()
    }

    fn assert_idempotent(pass: Pass, input: EntryNode) {
        let corrections = Corrections::default();
        let once = pass(input, &corrections);
        let twice = pass(once.clone(), &corrections);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_flatten_letter_groups() {
        let input = section(vec![
            node("A", 10).with_children(vec![node("Aboleth", 10), node("Angel", 12)]),
            node("B", 14).with_children(vec![node("Basilisk", 14)]),
        ]);
        let fixed = flatten_letter_groups(input.clone(), &Corrections::default());
        assert_eq!(titles(&fixed), vec!["Aboleth", "Angel", "Basilisk"]);
        assert_idempotent(flatten_letter_groups, input);
    }

    #[test]
    fn test_flatten_leaves_ungrouped_section_alone() {
        let input = section(vec![node("Aboleth", 10), node("B", 12)]);
        let fixed = flatten_letter_groups(input.clone(), &Corrections::default());
        assert_eq!(fixed, input);
        let empty = flatten_letter_groups(section(vec![]), &Corrections::default());
        assert_eq!(empty, section(vec![]));
    }

    #[test]
    fn test_strip_introductions() {
        let input = section(vec![node("Demon Introduction", 60), node("Introduction", 5)]);
        let fixed = strip_introductions(input.clone(), &Corrections::default());
        assert_eq!(titles(&fixed), vec!["Demon", "Introduction"]);
        assert_idempotent(strip_introductions, input);
    }

    #[test]
    fn test_disambiguate_names_respects_child_count() {
        let input = section(vec![
            node("Kyton", 185),
            node("Sphinx", 257).with_children(vec![node("Sphinx, Androsphinx", 257)]),
            node("Rakshasa", 231),
            node("Familiar", 130).with_children(vec![node("Familiar, Imp", 130)]),
        ]);
        let fixed = disambiguate_names(input.clone(), &Corrections::default());
        assert_eq!(
            titles(&fixed),
            vec!["Kyton, Chain Devil", "Sphinx", "Rakshasa, Standard", "Familiar, Small"]
        );
        assert_idempotent(disambiguate_names, input);
    }

    #[test]
    fn test_unescape_entities() {
        let input = section(vec![node("Will&#8217;o&#8217;wisp", 277)]);
        let fixed = unescape_entities(input.clone(), &Corrections::default());
        assert_eq!(titles(&fixed), vec!["Will'o'wisp"]);
        assert_idempotent(unescape_entities, input);
    }

    #[test]
    fn test_drop_spurious() {
        let input = section(vec![
            node("Leaf Leshy", 180),
            node("Variant Leaf Rays", 181),
            node("Leng Spider", 182),
        ]);
        let fixed = drop_spurious(input.clone(), &Corrections::default());
        assert_eq!(titles(&fixed), vec!["Leaf Leshy", "Leng Spider"]);
        assert_idempotent(drop_spurious, input);
    }

    #[test]
    fn test_drop_duplicates_keeps_second_copy() {
        let input = section(vec![
            node("Assassin Vine", 3),
            node("Athach", 20),
            node("Assassin Vine", 22),
        ]);
        let fixed = drop_duplicates(input.clone(), &Corrections::default());
        assert_eq!(titles(&fixed), vec!["Athach", "Assassin Vine"]);
        assert_eq!(fixed.children[1].page, 22);
        assert_idempotent(drop_duplicates, input);
    }

    #[test]
    fn test_single_assassin_vine_kept() {
        let input = section(vec![node("Assassin Vine", 22)]);
        assert_eq!(drop_duplicates(input.clone(), &Corrections::default()), input);
    }

    #[test]
    fn test_custom_tables_drive_passes() {
        let corrections = Corrections {
            spurious: vec!["Mite Swarm".to_string()],
            ..Corrections::default()
        };
        let input = section(vec![
            node("Mite", 10),
            node("Mite Swarm", 10),
            node("Variant Leaf Rays", 11),
        ]);
        let fixed = drop_spurious(input, &corrections);
        assert_eq!(titles(&fixed), vec!["Mite", "Variant Leaf Rays"]);
    }

    #[test]
    fn test_drop_spurious_removes_every_copy() {
        let input = section(vec![
            node("Variant Leaf Rays", 181),
            node("Leng Spider", 182),
            node("Variant Leaf Rays", 183),
        ]);
        let fixed = drop_spurious(input, &Corrections::default());
        assert_eq!(titles(&fixed), vec!["Leng Spider"]);
    }

    #[test]
    fn test_full_pipeline() {
        let input = section(vec![
            node("A", 10).with_children(vec![
                node("Angel Introduction", 10).with_children(vec![
                    node("Angel, Astral Deva", 10),
                    node("Angel, Planetar", 11),
                    node("Angelic Choirs", 12),
                ]),
                node("Assassin Vine", 13),
                node("Assassin Vine", 14),
            ]),
            node("B", 15).with_children(vec![node("Black Dragon, Young", 15)]),
            node("W", 20).with_children(vec![
                node("Variant Leaf Rays", 20),
                node("Will&#8217;o&#8217;wisp", 21),
            ]),
        ]);

        let fixed = fix_section(input, &Corrections::default());
        assert_eq!(
            titles(&fixed),
            vec![
                "Angel, Astral Deva",
                "Angel, Planetar",
                "Assassin Vine",
                "Dragon, Black, Young",
                "Will'o'wisp",
            ]
        );
        assert_eq!(fixed.children[2].page, 14);
    }
}
