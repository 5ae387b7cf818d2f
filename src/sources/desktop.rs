use crate::error::{Result, ScopeError};
use crate::locale::{self, Translator};
use crate::model::Entry;
use crate::sources::Source;
use log::{debug, info, warn};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

/// `OnlyShowIn` value of the environment we run in; also the default.
pub const HOST_ENVIRONMENT: &str = "unity";

const SD_CARD_ICON_NAME: &str = "media-memory-sd";
const SD_CARD_ICON: &str = "file:///usr/share/icons/Humanity/devices/48/media-memory-sd.svg";
pub const PLACEHOLDER_ICON: &str = "file:///usr/share/icons/suru/apps/128/placeholder-app-icon.png";

/// Scopes keep their data, and therefore their icons, under these paths.
const SCOPE_DATA_PREFIXES: [&str; 3] = [
    "/home/phablet/.local/share/unity-scopes/",
    "/usr/lib/arm-linux-gnueabihf/unity-scopes/",
    "/usr/share/unity/scopes/",
];

/// A descriptor projected into an entry, before the inclusion filter runs.
#[derive(Debug, Clone)]
pub struct ParsedDescriptor {
    pub entry: Entry,
    pub skip: bool,
    pub hidden: bool,
    pub only_show_in: String,
}

impl ParsedDescriptor {
    pub fn is_included(&self) -> bool {
        !self.skip && !self.hidden && self.only_show_in == HOST_ENVIRONMENT
    }
}

/// Splits descriptor text into a lowercased-key map.
///
/// Lines without `=` are ignored; the value is everything after the first `=`
/// and is kept verbatim. Later duplicates win.
fn read_fields(content: &str) -> HashMap<String, String> {
    content
        .lines()
        .filter_map(|line| line.split_once('='))
        .map(|(key, value)| (key.to_lowercase(), value.to_string()))
        .collect()
}

fn is_true(value: Option<&String>) -> bool {
    value.is_some_and(|v| v.eq_ignore_ascii_case("true"))
}

pub fn resolve_icon(value: &str) -> String {
    if value == SD_CARD_ICON_NAME {
        SD_CARD_ICON.to_string()
    } else if value.starts_with('/') {
        format!("file://{}", value)
    } else if !value.is_empty() {
        // Themed icon names are not resolved here
        PLACEHOLDER_ICON.to_string()
    } else {
        String::new()
    }
}

fn is_scope_icon(icon: &str) -> bool {
    SCOPE_DATA_PREFIXES.iter().any(|prefix| icon.contains(prefix))
}

/// Parses one descriptor file.
///
/// Returns `None` only for the descriptor of `self_identity`, which must
/// never be surfaced. Everything else yields a `ParsedDescriptor` whose
/// inclusion flags the caller applies.
pub fn parse_descriptor(
    file_name: &str,
    content: &str,
    locale: &str,
    translator: &dyn Translator,
    self_identity: &str,
) -> Option<ParsedDescriptor> {
    let fields = read_fields(content);

    let mut entry = Entry {
        raw_descriptor: content.to_string(),
        activation_target: format!("application:///{}", file_name),
        is_local_application: true,
        ..Entry::default()
    };

    if let Some(name) = fields.get("name") {
        entry.set_title(locale::resolve_title(name, &fields, locale, translator));
    }
    if let Some(icon) = fields.get("icon") {
        entry.icon_reference = resolve_icon(icon);
    }
    if let Some(comment) = fields.get("comment") {
        entry.subtitle = comment.clone();
    }
    if let Some(id) = fields.get("x-ubuntu-application-id") {
        entry.identity = id.to_lowercase();
    }

    let mut parsed = ParsedDescriptor {
        skip: !is_true(fields.get("x-ubuntu-touch")),
        hidden: is_true(fields.get("nodisplay")),
        only_show_in: fields
            .get("onlyshowin")
            .map(|v| v.to_lowercase())
            .unwrap_or_else(|| HOST_ENVIRONMENT.to_string()),
        entry,
    };

    if is_scope_icon(&parsed.entry.icon_reference) {
        let name = file_name.strip_suffix(".desktop").unwrap_or(file_name);
        if name.eq_ignore_ascii_case(self_identity) {
            debug!("Dropping own descriptor {}", file_name);
            return None;
        }

        // The bare name keeps the host's preview working for scopes
        parsed.entry.identity = name.to_lowercase();
        parsed.entry.activation_target = name.to_string();
        parsed.entry.is_local_application = false;
        parsed.skip = false;
        parsed.hidden = false;
    }

    Some(parsed)
}

/// Scans descriptor directories in order, yielding included entries.
pub struct DesktopSource<'a> {
    pub dirs: Vec<PathBuf>,
    pub locale: &'a str,
    pub translator: &'a dyn Translator,
    pub self_identity: &'a str,
}

impl DesktopSource<'_> {
    fn scan_dir(&self, dir: &Path, entries: &mut Vec<Entry>) -> Result<()> {
        let read_dir = match fs::read_dir(dir) {
            Ok(read_dir) => read_dir,
            Err(e) => {
                warn!("Skipping descriptor directory {:?}: {}", dir, e);
                return Ok(());
            }
        };

        let mut paths = Vec::new();
        for dir_entry in read_dir {
            match dir_entry {
                Ok(dir_entry) => paths.push(dir_entry.path()),
                Err(e) => warn!("Skipping unlistable entry in {:?}: {}", dir, e),
            }
        }
        // Anything that is not a directory gets read, so broken links fail loudly
        paths.retain(|p| !p.is_dir());
        paths.sort();

        debug!("Scanning {} descriptors in {:?}", paths.len(), dir);
        for path in paths {
            let bytes = fs::read(&path).map_err(|source| ScopeError::UnreadableDescriptor {
                path: path.clone(),
                source,
            })?;
            let content = String::from_utf8_lossy(&bytes);
            let file_name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();

            if let Some(parsed) = parse_descriptor(
                &file_name,
                &content,
                self.locale,
                self.translator,
                self.self_identity,
            ) {
                if parsed.is_included() {
                    entries.push(parsed.entry);
                }
            }
        }
        Ok(())
    }
}

impl Source for DesktopSource<'_> {
    fn scan(&self, cancelled: &AtomicBool) -> Result<Vec<Entry>> {
        let mut entries = Vec::new();
        for dir in &self.dirs {
            if cancelled.load(Ordering::SeqCst) {
                info!("DesktopSource: cancelled before {:?}", dir);
                break;
            }
            self.scan_dir(dir, &mut entries)?;
        }
        info!("DesktopSource: found {} entries", entries.len());
        Ok(entries)
    }
}
