use crate::categorize::Categorizer;
use crate::config::Config;
use crate::error::Result;
use crate::favorites::Favorites;
use crate::host::{CategorisedResult, PreviewReply, SearchReply};
use crate::locale::CatalogTranslator;
use crate::model::Layout;
use crate::pipeline;
use crate::preview;
use crate::sources::desktop::DesktopSource;
use crate::sources::remote::RemoteIndexSource;
use crate::store;
use log::info;
use std::sync::atomic::AtomicBool;

/// The application search scope the host talks to.
///
/// Holds no state between requests beyond its configuration; every search
/// rescans descriptors and rereads the remote index.
pub struct AppScope {
    config: Config,
    locale: String,
    favorites: Box<dyn Favorites>,
}

impl AppScope {
    pub fn new(config: Config, locale: String, favorites: Box<dyn Favorites>) -> Self {
        Self { config, locale, favorites }
    }

    pub fn layout(&self) -> Layout {
        Layout::from_setting(self.config.general.layout)
    }

    /// Runs one query to completion against `reply`.
    ///
    /// Cancellation stops scanning and emission early and still returns `Ok`.
    pub fn search(&self, query: &str, reply: &mut dyn SearchReply, cancelled: &AtomicBool) -> Result<()> {
        info!("query: {}", query);

        let translator = CatalogTranslator::new(self.config.sources.locale_dirs.clone(), &self.locale);
        let descriptors = DesktopSource {
            dirs: self.config.sources.desktop_dirs.clone(),
            locale: &self.locale,
            translator: &translator,
            self_identity: &self.config.general.self_identity,
        };
        let remote = RemoteIndexSource {
            path: self.config.sources.remote_index.clone(),
        };

        let aggregate = pipeline::aggregate(query, &descriptors, &remote, cancelled)?;
        let store = store::resolve_store_link(aggregate.well_known, query);

        let categorizer = Categorizer {
            layout: self.layout(),
            query,
            favorites: self.favorites.as_ref(),
            cancelled,
        };
        let pushed = categorizer.emit(aggregate.entries, store, reply)?;
        info!("query '{}' produced {} results", query, pushed);
        Ok(())
    }

    pub fn preview(&self, result: &CategorisedResult, reply: &mut dyn PreviewReply) -> Result<()> {
        reply.push_widgets(preview::widgets_for(&result.app))
    }
}
