use crate::outline::BookmarkRecord;
use anyhow::{Context, Result};
use lopdf::{Dictionary, Document, Object, ObjectId};
use std::collections::{HashMap, HashSet};
use tracing::debug;

type PageMap = HashMap<ObjectId, u32>;

/// Read the bookmark outline as flat records in document order.
///
/// Levels start at 1 for top-level bookmarks. Bookmarks whose destination
/// does not resolve to a page are skipped, their children are still read.
pub fn outline_records(doc: &Document) -> Result<Vec<BookmarkRecord>> {
    let catalog = doc
        .catalog()
        .with_context(|| "Failed to get document catalog")?;

    // Get outlines dictionary
    let outlines = match catalog.get(b"Outlines") {
        Ok(Object::Reference(r)) => doc.get_dictionary(*r).ok(),
        Ok(Object::Dictionary(d)) => Some(d),
        _ => None,
    };
    let Some(first) = outlines.and_then(|o| reference(o, b"First")) else {
        return Ok(Vec::new());
    };

    // Map page object IDs to 1-based page numbers
    let page_map: PageMap = doc
        .get_pages()
        .into_iter()
        .map(|(num, id)| (id, num))
        .collect();

    let mut walker = OutlineWalker {
        doc,
        page_map: &page_map,
        visited: HashSet::new(),
        records: Vec::new(),
    };
    walker.walk(first, 1);
    Ok(walker.records)
}

struct OutlineWalker<'a> {
    doc: &'a Document,
    page_map: &'a PageMap,
    visited: HashSet<ObjectId>,
    records: Vec<BookmarkRecord>,
}

impl OutlineWalker<'_> {
    fn walk(&mut self, first: ObjectId, level: u32) {
        let doc = self.doc;
        let mut current = Some(first);

        while let Some(id) = current {
            // Malformed outlines can link back to an earlier item.
            if !self.visited.insert(id) {
                debug!(?id, "outline cycle detected");
                break;
            }
            let Ok(item) = doc.get_dictionary(id) else {
                break;
            };

            // Get title
            let title = match item.get(b"Title") {
                Ok(Object::String(bytes, _)) => decode_pdf_string(bytes),
                _ => String::new(),
            };
            // Get page number from Dest or A (action)
            match self.destination_page(item) {
                Some(page) => self.records.push(BookmarkRecord {
                    title: title.trim().to_string(),
                    level,
                    page,
                }),
                None => debug!(%title, "bookmark without a page destination"),
            }

            // Process children
            if let Some(child) = reference(item, b"First") {
                self.walk(child, level + 1);
            }

            // Get next sibling
            current = reference(item, b"Next");
        }
    }

    fn destination_page(&self, item: &Dictionary) -> Option<u32> {
        if let Ok(dest) = item.get(b"Dest") {
            return self.resolve(dest, 0);
        }

        // Only GoTo actions point at a page
        let action = match item.get(b"A").ok()? {
            Object::Reference(r) => self.doc.get_dictionary(*r).ok()?,
            Object::Dictionary(d) => d,
            _ => return None,
        };
        match action.get(b"S") {
            Ok(Object::Name(kind)) if kind == b"GoTo" => self.resolve(action.get(b"D").ok()?, 0),
            _ => None,
        }
    }

    fn resolve(&self, dest: &Object, depth: u8) -> Option<u32> {
        if depth > 8 {
            return None;
        }
        match dest {
            // Named destination
            Object::String(name, _) | Object::Name(name) => self.resolve_named(name, depth),
            // Explicit destination: [page /Fit ...]
            Object::Array(arr) => match arr.first() {
                Some(Object::Reference(page)) => self.page_map.get(page).copied(),
                _ => None,
            },
            Object::Dictionary(d) => self.resolve(d.get(b"D").ok()?, depth + 1),
            Object::Reference(r) => self.resolve(self.doc.get_object(*r).ok()?, depth + 1),
            _ => None,
        }
    }

    fn resolve_named(&self, name: &[u8], depth: u8) -> Option<u32> {
        let catalog = self.doc.catalog().ok()?;

        // Look in the /Names -> /Dests name tree first
        let names_tree = reference(catalog, b"Names")
            .and_then(|id| self.doc.get_dictionary(id).ok())
            .and_then(|names| reference(names, b"Dests"));
        if let Some(dest) = names_tree.and_then(|root| self.search_name_tree(root, name, 0)) {
            return self.resolve(dest, depth + 1);
        }

        // Older documents keep a plain /Dests dictionary.
        let dests = self.doc.get_dictionary(reference(catalog, b"Dests")?).ok()?;
        self.resolve(dests.get(name).ok()?, depth + 1)
    }

    fn search_name_tree(&self, node: ObjectId, name: &[u8], depth: u8) -> Option<&Object> {
        if depth > 32 {
            return None;
        }
        let dict = self.doc.get_dictionary(node).ok()?;

        // Leaf node: [key1 value1 key2 value2 ...]
        if let Ok(Object::Array(names)) = dict.get(b"Names") {
            for pair in names.chunks_exact(2) {
                if matches!(&pair[0], Object::String(key, _) if key.as_slice() == name) {
                    return Some(&pair[1]);
                }
            }
        }

        // Intermediate node
        if let Ok(Object::Array(kids)) = dict.get(b"Kids") {
            return kids.iter().find_map(|kid| match kid {
                Object::Reference(kid) => self.search_name_tree(*kid, name, depth + 1),
                _ => None,
            });
        }

        None
    }
}

fn reference(dict: &Dictionary, key: &[u8]) -> Option<ObjectId> {
    match dict.get(key) {
        Ok(Object::Reference(r)) => Some(*r),
        _ => None,
    }
}

/// Decode a PDF text string: UTF-16BE with a byte order mark, otherwise
/// treated as Latin-1.
pub fn decode_pdf_string(bytes: &[u8]) -> String {
    match bytes {
        [0xFE, 0xFF, rest @ ..] => {
            let units: Vec<u16> = rest
                .chunks_exact(2)
                .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
                .collect();
            String::from_utf16_lossy(&units)
        }
        _ => bytes.iter().map(|&b| b as char).collect(),
    }
}
