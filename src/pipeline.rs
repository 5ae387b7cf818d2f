use crate::error::Result;
use crate::matcher::QueryMatcher;
use crate::model::Entry;
use crate::sources::Source;
use crate::store::WellKnown;
use log::info;
use std::sync::atomic::{AtomicBool, Ordering};

/// Entries that survived every filter, plus the store candidates seen on the way.
#[derive(Debug, Default)]
pub struct Aggregate {
    pub entries: Vec<Entry>,
    pub well_known: WellKnown,
}

/// Merges descriptor entries and remote providers that match `query`.
///
/// Store candidates are picked from descriptor entries before the query
/// filter applies, so the "search for more" link survives narrow queries.
pub fn aggregate(
    query: &str,
    descriptors: &dyn Source,
    remote: &dyn Source,
    cancelled: &AtomicBool,
) -> Result<Aggregate> {
    let matcher = QueryMatcher::new(query);
    let mut aggregate = Aggregate::default();

    for entry in descriptors.scan(cancelled)? {
        aggregate.well_known.observe(&entry);
        if matcher.matches(&entry) {
            aggregate.entries.push(entry);
        }
    }

    if cancelled.load(Ordering::SeqCst) {
        info!("Aggregation cancelled before remote index");
        return Ok(aggregate);
    }

    let mut providers = remote.scan(cancelled)?;
    matcher.retain(&mut providers);
    aggregate.entries.extend(providers);

    info!("Aggregated {} entries for query '{}'", aggregate.entries.len(), query);
    Ok(aggregate)
}
