use serde::{Deserialize, Serialize};

/// One application or search provider, normalized for filtering, sorting and display.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub identity: String,          // Lowercase key, e.g. "dialer-app" or "clickstore_clickstore"
    pub display_title: String,     // Locale-resolved name
    pub sort_key: String,          // Lowercased display_title, never shown
    pub subtitle: String,          // Descriptor comment / provider description
    pub icon_reference: String,    // file:// or http(s) URI, or empty
    pub activation_target: String, // What the host activates
    pub raw_descriptor: String,    // Original descriptor text, kept for previews
    pub is_local_application: bool,
}

impl Entry {
    pub fn new(display_title: String, activation_target: String, is_local_application: bool) -> Self {
        let mut entry = Self {
            activation_target,
            is_local_application,
            ..Self::default()
        };
        entry.set_title(display_title);
        entry
    }

    /// Sets the title and keeps the sort key in step with it.
    pub fn set_title(&mut self, title: String) {
        self.sort_key = title.to_lowercase();
        self.display_title = title;
    }

    /// Uppercased first character of the title, `None` for untitled entries.
    pub fn first_letter(&self) -> Option<char> {
        self.display_title
            .chars()
            .next()
            .and_then(|c| c.to_uppercase().next())
    }
}

/// How results are grouped into categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    ByType,
    ByLetter,
}

impl Layout {
    /// Maps the host's integer setting: 0 groups by type, anything else by letter.
    pub fn from_setting(value: i64) -> Self {
        if value == 0 { Layout::ByType } else { Layout::ByLetter }
    }
}

/// Category used for entries whose title is empty under the by-letter layout.
pub const UNTITLED_LETTER: char = '#';

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum CategoryId {
    Favorites,
    Apps,
    Scopes,
    Store,
    Letter(char),
}

impl CategoryId {
    pub fn name(&self) -> String {
        match self {
            CategoryId::Favorites => "favorites".to_string(),
            CategoryId::Apps => "apps".to_string(),
            CategoryId::Scopes => "scopes".to_string(),
            CategoryId::Store => "store".to_string(),
            CategoryId::Letter(c) => c.to_string(),
        }
    }
}

impl From<CategoryId> for String {
    fn from(id: CategoryId) -> Self {
        id.name()
    }
}

impl TryFrom<String> for CategoryId {
    type Error = String;

    fn try_from(name: String) -> Result<Self, Self::Error> {
        match name.as_str() {
            "favorites" => Ok(CategoryId::Favorites),
            "apps" => Ok(CategoryId::Apps),
            "scopes" => Ok(CategoryId::Scopes),
            "store" => Ok(CategoryId::Store),
            other => {
                let mut chars = other.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Ok(CategoryId::Letter(c)),
                    _ => Err(format!("unknown category '{}'", other)),
                }
            }
        }
    }
}
