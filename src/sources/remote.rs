use crate::error::Result;
use crate::model::Entry;
use crate::sources::Source;
use log::{debug, info, warn};
use serde::Deserialize;
use serde_json::Value;
use std::fs;
use std::path::PathBuf;
use std::sync::atomic::AtomicBool;

/// Cached shape of a remote search provider, written by the scope registry.
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct RemoteProviderRecord {
    pub id: String,
    pub name: String,
    pub icon: String,
    pub description: String,
}

impl From<RemoteProviderRecord> for Entry {
    fn from(record: RemoteProviderRecord) -> Self {
        let mut entry = Entry::new(record.name, format!("scope://{}", record.id), false);
        entry.identity = record.id.to_lowercase();
        entry.icon_reference = record.icon;
        entry.subtitle = record.description;
        entry
    }
}

/// Decodes as many records as possible from the index text.
///
/// Elements that do not fit the record shape are skipped; text that is not
/// a JSON array decodes to nothing.
pub fn decode_records(content: &str) -> Vec<RemoteProviderRecord> {
    let items = match serde_json::from_str::<Vec<Value>>(content) {
        Ok(items) => items,
        Err(e) => {
            warn!("Remote index is not a JSON array: {}", e);
            return Vec::new();
        }
    };

    items
        .into_iter()
        .enumerate()
        .filter_map(|(i, item)| match serde_json::from_value(item) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!("Skipping remote index record {}: {}", i, e);
                None
            }
        })
        .collect()
}

pub struct RemoteIndexSource {
    pub path: PathBuf,
}

impl Source for RemoteIndexSource {
    fn scan(&self, _cancelled: &AtomicBool) -> Result<Vec<Entry>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) => {
                info!("No remote index at {:?}: {}", self.path, e);
                return Ok(Vec::new());
            }
        };

        debug!("Decoding remote index {:?}", self.path);
        let entries: Vec<Entry> = decode_records(&content).into_iter().map(Entry::from).collect();
        info!("RemoteIndexSource: found {} entries", entries.len());
        Ok(entries)
    }
}
