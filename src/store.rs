use crate::model::Entry;

const EXPLORER_SCOPE_MARKER: &str = "uappexplorer-scope.bhdouglass";
const EXPLORER_APP_MARKER: &str = "uappexplorer.bhdouglass";
const CLICKSTORE_MARKER: &str = "com.canonical.scopes.clickstore";

/// The three store-like entries that can back the "search for more" link.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct WellKnown {
    pub explorer_scope: Option<Entry>,
    pub explorer_app: Option<Entry>,
    pub clickstore: Option<Entry>,
}

impl WellKnown {
    /// Records `entry` if its identity carries a marker. The first match per slot is kept.
    pub fn observe(&mut self, entry: &Entry) {
        let slot = if entry.identity.contains(EXPLORER_APP_MARKER) {
            &mut self.explorer_app
        } else if entry.identity.contains(EXPLORER_SCOPE_MARKER) {
            &mut self.explorer_scope
        } else if entry.identity.contains(CLICKSTORE_MARKER) {
            &mut self.clickstore
        } else {
            return;
        };
        slot.get_or_insert_with(|| entry.clone());
    }
}

pub fn explorer_search_url(query: &str) -> String {
    format!("https://uappexplorer.com/apps?q={}&sort=relevance", query)
}

/// Picks the store entry and points it at `query`.
///
/// Preference is explorer scope, explorer app, then the click store.
pub fn resolve_store_link(well_known: WellKnown, query: &str) -> Option<Entry> {
    let WellKnown {
        explorer_scope,
        explorer_app,
        clickstore,
    } = well_known;

    let (mut store, web_search) = match (explorer_scope, explorer_app, clickstore) {
        (Some(scope), _, _) => (scope, false),
        (None, Some(app), _) => (app, true),
        (None, None, Some(clickstore)) => (clickstore, false),
        (None, None, None) => return None,
    };

    if !query.is_empty() {
        store.activation_target = if web_search {
            explorer_search_url(query)
        } else {
            format!("{}?q={}", store.activation_target, query)
        };
    }
    Some(store)
}
