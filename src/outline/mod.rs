pub mod dump;
pub mod hierarchy;

/// One bookmark as reported by the outline dump, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookmarkRecord {
    pub title: String,
    pub level: u32,
    pub page: u32,
}

/// The flat outline of a document plus its page count, when known.
#[derive(Debug, Clone, Default)]
pub struct Outline {
    pub records: Vec<BookmarkRecord>,
    pub page_count: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryNode {
    pub title: String,
    pub level: u32,
    pub page: u32,
    pub children: Vec<EntryNode>,
}

impl EntryNode {
    /// The synthetic root every outline tree hangs from.
    pub fn root() -> Self {
        EntryNode {
            title: "Root".to_string(),
            level: 0,
            page: 0,
            children: Vec::new(),
        }
    }

    pub fn new(title: impl Into<String>, level: u32, page: u32) -> Self {
        EntryNode {
            title: title.into(),
            level,
            page,
            children: Vec::new(),
        }
    }

    #[cfg(test)]
    pub fn with_children(mut self, children: Vec<EntryNode>) -> Self {
        self.children = children;
        self
    }
}

impl From<&BookmarkRecord> for EntryNode {
    fn from(record: &BookmarkRecord) -> Self {
        EntryNode::new(record.title.clone(), record.level, record.page)
    }
}
