use crate::error::Result;
use crate::model::Entry;
use std::sync::atomic::AtomicBool;

/// A provider of normalized entries for one search request.
///
/// `cancelled` is the host's cancellation flag; sources stop early and
/// return what they have when it is set.
pub trait Source {
    fn scan(&self, cancelled: &AtomicBool) -> Result<Vec<Entry>>;
}

pub mod desktop;
pub mod remote;
