//! Document-specific correction tables.
//!
//! The fixer passes are generic; everything that names a particular monster
//! or bookmark lives here, so a new edition can be handled with a JSON file
//! passed through `--corrections` instead of a code change.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

/// Rename a top-level entry titled `from` that has exactly `children`
/// children.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RenameRule {
    pub from: String,
    pub to: String,
    pub children: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Replacement {
    pub from: String,
    pub to: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Corrections {
    /// Prefix of the top-level bookmark holding the monster entries.
    pub section_prefix: String,
    pub introduction_suffix: String,
    pub renames: Vec<RenameRule>,
    pub entities: Vec<Replacement>,
    /// Entries indexed at the top level by mistake.
    pub spurious: Vec<String>,
    /// Entries listed twice whose first occurrence is broken.
    pub duplicates: Vec<String>,
    /// Substrings marking a sub-bookmark as something other than a monster.
    pub grouping_markers: Vec<String>,
    /// Sub-bookmarks that share their parent's name but are not monsters.
    pub grouping_titles: Vec<String>,
    pub giant_suffix: String,
    pub outer_dragon_group: String,
    pub dragon_prefix: String,
    pub dragon_infix: String,
}

impl Default for Corrections {
    fn default() -> Self {
        Corrections {
            section_prefix: "Monsters".to_string(),
            introduction_suffix: " Introduction".to_string(),
            renames: vec![
                rename("Kyton", "Kyton, Chain Devil", 0),
                rename("Sphinx", "Sphinx, Gynosphinx", 0),
                rename("Rakshasa", "Rakshasa, Standard", 0),
                rename("Familiar", "Familiar, Small", 1),
            ],
            entities: vec![
                Replacement {
                    from: "&#8217;".to_string(),
                    to: "'".to_string(),
                },
                // Outlines read natively carry the real character.
                Replacement {
                    from: "\u{2019}".to_string(),
                    to: "'".to_string(),
                },
            ],
            spurious: strings(&["Variant Leaf Rays"]),
            duplicates: strings(&["Assassin Vine"]),
            grouping_markers: strings(&[
                " Characters",
                " Companions",
                " Traits",
                " Lords",
                " Special Abilities",
                "(CR",
            ]),
            grouping_titles: strings(&[
                "Angelic Choirs",
                "Blood Hag Covens",
                "Dragon Age Categories",
                "Dragon Attacks and Speeds",
                "Dragon Ability Scores",
                "Drakainia Spawn",
                "Vampire Spawn",
                "Drow Noble",
                "Graveknight Armor",
                "Shobhad Longrifle",
                "Thriae Merope",
                "Witchfire Covens",
            ]),
            giant_suffix: ", Giant".to_string(),
            outer_dragon_group: "Dragon, Outer".to_string(),
            dragon_prefix: "Dragon, ".to_string(),
            dragon_infix: " Dragon, ".to_string(),
        }
    }
}

impl Corrections {
    /// Load tables from a JSON file; fields it leaves out keep their
    /// built-in values.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read corrections: {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse corrections: {}", path.display()))
    }
}

fn rename(from: &str, to: &str, children: usize) -> RenameRule {
    RenameRule {
        from: from.to_string(),
        to: to.to_string(),
        children,
    }
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "spurious": ["Variant Leaf Rays", "Mite Swarm"] }}"#).unwrap();

        let corrections = Corrections::load(file.path()).unwrap();
        assert_eq!(corrections.spurious, vec!["Variant Leaf Rays", "Mite Swarm"]);
        assert_eq!(corrections.section_prefix, "Monsters");
        assert_eq!(corrections.renames.len(), 4);
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();
        assert!(Corrections::load(file.path()).is_err());
    }
}
