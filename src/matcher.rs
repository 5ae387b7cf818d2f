use crate::model::Entry;

/// Case-insensitive substring filter over display titles.
pub struct QueryMatcher {
    needle: String,
}

impl QueryMatcher {
    pub fn new(query: &str) -> Self {
        Self {
            needle: query.to_lowercase(),
        }
    }

    /// An empty query matches everything.
    pub fn matches(&self, entry: &Entry) -> bool {
        self.needle.is_empty() || entry.display_title.to_lowercase().contains(&self.needle)
    }

    pub fn retain(&self, entries: &mut Vec<Entry>) {
        entries.retain(|e| self.matches(e));
    }
}
