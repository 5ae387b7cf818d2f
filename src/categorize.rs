use crate::error::Result;
use crate::favorites::Favorites;
use crate::host::{CategorisedResult, CategoryDef, SearchReply};
use crate::model::{CategoryId, Entry, Layout, UNTITLED_LETTER};
use log::{debug, info};
use std::collections::BTreeSet;
use std::sync::atomic::{AtomicBool, Ordering};

/// Stable ascending sort on `sort_key`; ties keep scan order.
pub fn sort_entries(entries: &mut [Entry]) {
    entries.sort_by(|a, b| a.sort_key.cmp(&b.sort_key));
}

pub fn store_title(query: &str) -> String {
    if query.is_empty() {
        "Search for more apps".to_string()
    } else {
        format!("Search for apps like \"{}\"", query)
    }
}

fn letter_of(entry: &Entry) -> char {
    entry.first_letter().unwrap_or(UNTITLED_LETTER)
}

/// Categories to register, in registration order.
pub fn plan_categories(entries: &[Entry], layout: Layout, query: &str) -> Vec<CategoryDef> {
    let mut categories = vec![CategoryDef::new(CategoryId::Favorites, "Favorites")];

    match layout {
        Layout::ByType => {
            categories.push(CategoryDef::new(CategoryId::Apps, "Apps"));
            categories.push(CategoryDef::new(CategoryId::Scopes, "Scopes"));
        }
        Layout::ByLetter => {
            let letters: BTreeSet<char> = entries.iter().map(letter_of).collect();
            categories.extend(
                letters
                    .into_iter()
                    .map(|c| CategoryDef::new(CategoryId::Letter(c), c.to_string())),
            );
        }
    }

    categories.push(CategoryDef::new(CategoryId::Store, store_title(query)));
    categories
}

/// Registers categories and pushes sorted entries into them.
pub struct Categorizer<'a> {
    pub layout: Layout,
    pub query: &'a str,
    pub favorites: &'a dyn Favorites,
    pub cancelled: &'a AtomicBool,
}

impl Categorizer<'_> {
    fn is_favorite(&self, entry: &Entry) -> bool {
        !entry.identity.is_empty() && self.favorites.is_favorite(&entry.identity)
    }

    /// Pushes one result; `Ok(false)` means the request was cancelled.
    fn push(&self, reply: &mut dyn SearchReply, result: CategorisedResult) -> Result<bool> {
        if self.cancelled.load(Ordering::SeqCst) {
            info!("Emission cancelled");
            return Ok(false);
        }
        reply.push(result)?;
        Ok(true)
    }

    /// Emits `entries` and the optional store link; returns the number of results pushed.
    pub fn emit(
        &self,
        mut entries: Vec<Entry>,
        store: Option<Entry>,
        reply: &mut dyn SearchReply,
    ) -> Result<usize> {
        sort_entries(&mut entries);

        for category in plan_categories(&entries, self.layout, self.query) {
            reply.register_category(category)?;
        }

        let (favorites, rest): (Vec<&Entry>, Vec<&Entry>) =
            entries.iter().partition(|e| self.is_favorite(e));

        let mut results: Vec<CategorisedResult> = favorites
            .iter()
            .map(|e| CategorisedResult::new(CategoryId::Favorites, e))
            .collect();

        match self.layout {
            Layout::ByType => {
                // All apps go out before the first scope
                let (apps, scopes): (Vec<&Entry>, Vec<&Entry>) =
                    rest.into_iter().partition(|e| e.is_local_application);
                results.extend(apps.iter().map(|e| CategorisedResult::new(CategoryId::Apps, e)));
                results.extend(scopes.iter().map(|e| CategorisedResult::new(CategoryId::Scopes, e)));
            }
            Layout::ByLetter => {
                results.extend(rest.iter().map(|e| {
                    let kind = if e.is_local_application { "App" } else { "Scope" };
                    CategorisedResult::new(CategoryId::Letter(letter_of(e)), e).with_subtitle(kind)
                }));
            }
        }

        if let Some(store) = &store {
            results.push(CategorisedResult::new(CategoryId::Store, store));
        }

        let mut pushed = 0;
        for result in results {
            if !self.push(reply, result)? {
                break;
            }
            pushed += 1;
        }

        debug!("Pushed {} results ({} favorites)", pushed, favorites.len());
        Ok(pushed)
    }
}
