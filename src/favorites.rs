use directories::ProjectDirs;
use log::{debug, warn};
use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Answers whether the user pinned an identity.
pub trait Favorites {
    fn is_favorite(&self, identity: &str) -> bool;
}

impl Favorites for HashSet<String> {
    fn is_favorite(&self, identity: &str) -> bool {
        self.contains(identity)
    }
}

/// Read-only favorites list kept by the host as `{"ids": [...]}`.
#[derive(Deserialize, Default, Debug, Clone)]
pub struct FavoriteStore {
    #[serde(default)]
    pub ids: HashSet<String>,
}

impl Favorites for FavoriteStore {
    fn is_favorite(&self, identity: &str) -> bool {
        self.ids.is_favorite(identity)
    }
}

pub fn default_favorites_path() -> Option<PathBuf> {
    ProjectDirs::from("org", "appscope", "appscope").map(|dirs| dirs.data_dir().join("favorites.json"))
}

/// Loads the store, treating a missing or malformed file as "no favorites".
pub fn load_favorites(path: Option<&Path>) -> FavoriteStore {
    let Some(path) = path.map(Path::to_path_buf).or_else(default_favorites_path) else {
        return FavoriteStore::default();
    };

    let content = match fs::read_to_string(&path) {
        Ok(content) => content,
        Err(e) => {
            debug!("No favorites at {:?}: {}", path, e);
            return FavoriteStore::default();
        }
    };

    match serde_json::from_str::<FavoriteStore>(&content) {
        Ok(store) => FavoriteStore {
            ids: store.ids.into_iter().map(|id| id.to_lowercase()).collect(),
        },
        Err(e) => {
            warn!("Ignoring malformed favorites {:?}: {}", path, e);
            FavoriteStore::default()
        }
    }
}
