use gettext::Catalog;
use log::{debug, warn};
use std::cell::RefCell;
use std::collections::HashMap;
use std::fs::File;
use std::path::PathBuf;

/// Descriptor key naming the gettext domain used to translate `Name`.
pub const GETTEXT_DOMAIN_KEY: &str = "x-ubuntu-gettext-domain";

/// Tags derived from an environment locale such as `fr_FR.UTF-8`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleTags {
    /// `fr_FR`: the locale without its encoding suffix, case preserved.
    pub full: String,
    /// `fr`: the language without its region suffix, case preserved.
    pub short: String,
}

impl LocaleTags {
    /// Returns `None` for an empty locale, which disables localized lookups.
    pub fn parse(locale: &str) -> Option<Self> {
        if locale.is_empty() {
            return None;
        }
        let full = locale.split('.').next().unwrap_or_default().to_string();
        let short = full.split('_').next().unwrap_or_default().to_string();
        Some(Self { full, short })
    }
}

/// Translates a message through a named translation domain.
pub trait Translator {
    /// Returns `None` when the domain has no translation for `msgid`.
    fn translate(&self, domain: &str, msgid: &str) -> Option<String>;
}

/// Translator used when no catalogs should be consulted.
#[cfg(test)]
pub struct NoTranslation;

#[cfg(test)]
impl Translator for NoTranslation {
    fn translate(&self, _domain: &str, _msgid: &str) -> Option<String> {
        None
    }
}

/// Reads compiled gettext catalogs from `<dir>/<tag>/LC_MESSAGES/<domain>.mo`.
///
/// Catalogs are loaded lazily and kept for the lifetime of the translator,
/// which is one search request.
pub struct CatalogTranslator {
    locale_dirs: Vec<PathBuf>,
    tags: Option<LocaleTags>,
    catalogs: RefCell<HashMap<String, Option<Catalog>>>,
}

impl CatalogTranslator {
    pub fn new(locale_dirs: Vec<PathBuf>, locale: &str) -> Self {
        Self {
            locale_dirs,
            tags: LocaleTags::parse(locale),
            catalogs: RefCell::new(HashMap::new()),
        }
    }

    fn load(&self, domain: &str) -> Option<Catalog> {
        let tags = self.tags.as_ref()?;
        let file_name = format!("{}.mo", domain);

        for dir in &self.locale_dirs {
            for tag in [&tags.full, &tags.short] {
                let path = dir.join(tag).join("LC_MESSAGES").join(&file_name);
                let Ok(file) = File::open(&path) else { continue };
                match Catalog::parse(file) {
                    Ok(catalog) => {
                        debug!("Loaded catalog {:?}", path);
                        return Some(catalog);
                    }
                    Err(e) => warn!("Ignoring unparsable catalog {:?}: {}", path, e),
                }
            }
        }
        None
    }
}

impl Translator for CatalogTranslator {
    fn translate(&self, domain: &str, msgid: &str) -> Option<String> {
        let mut catalogs = self.catalogs.borrow_mut();
        let catalog = catalogs
            .entry(domain.to_string())
            .or_insert_with(|| self.load(domain))
            .as_ref()?;

        // gettext hands back the msgid itself when nothing matched
        let translated = catalog.gettext(msgid);
        if translated.is_empty() || translated == msgid {
            None
        } else {
            Some(translated.to_string())
        }
    }
}

/// Picks the display title for a descriptor.
///
/// Starts from the raw `name`, prefers `name[<locale>]` then `name[<language>]`,
/// and lets a translation through the declared gettext domain override both.
pub fn resolve_title(
    raw_name: &str,
    fields: &HashMap<String, String>,
    locale: &str,
    translator: &dyn Translator,
) -> String {
    let mut title = raw_name.to_string();

    if let Some(tags) = LocaleTags::parse(locale) {
        let full_key = format!("name[{}]", tags.full.to_lowercase());
        let short_key = format!("name[{}]", tags.short.to_lowercase());
        if let Some(localized) = fields.get(&full_key).or_else(|| fields.get(&short_key)) {
            title = localized.clone();
        }
    }

    if let Some(domain) = fields.get(GETTEXT_DOMAIN_KEY) {
        if let Some(translated) = translator.translate(domain, raw_name) {
            title = translated;
        }
    }

    title
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedTranslator(&'static str);

    impl Translator for FixedTranslator {
        fn translate(&self, _domain: &str, _msgid: &str) -> Option<String> {
            Some(self.0.to_string())
        }
    }

    fn fields(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn parses_full_and_short_tags() {
        let tags = LocaleTags::parse("fr_FR.UTF-8").unwrap();
        assert_eq!(tags.full, "fr_FR");
        assert_eq!(tags.short, "fr");

        assert_eq!(LocaleTags::parse(""), None);
    }

    #[test]
    fn exact_locale_tag_wins_over_language() {
        let fields = fields(&[("name", "Foo"), ("name[fr_fr]", "FooFR"), ("name[fr]", "FooF")]);

        let title = resolve_title("Foo", &fields, "fr_FR.UTF-8", &NoTranslation);

        assert_eq!(title, "FooFR");
    }

    #[test]
    fn falls_back_to_language_tag() {
        let fields = fields(&[("name", "Foo"), ("name[fr]", "FooF")]);

        assert_eq!(resolve_title("Foo", &fields, "fr_CA.UTF-8", &NoTranslation), "FooF");
    }

    #[test]
    fn empty_locale_keeps_raw_name() {
        let fields = fields(&[("name", "Foo"), ("name[fr]", "FooF")]);

        assert_eq!(resolve_title("Foo", &fields, "", &NoTranslation), "Foo");
    }

    #[test]
    fn translation_domain_overrides_localized_key() {
        let fields = fields(&[("name", "Foo"), ("name[fr]", "FooF"), (GETTEXT_DOMAIN_KEY, "foo")]);

        let title = resolve_title("Foo", &fields, "fr_FR.UTF-8", &FixedTranslator("Truc"));

        assert_eq!(title, "Truc");
    }

    #[test]
    fn translator_is_ignored_without_domain() {
        let fields = fields(&[("name", "Foo")]);

        assert_eq!(resolve_title("Foo", &fields, "fr_FR", &FixedTranslator("Truc")), "Foo");
    }

    /// Builds a little-endian `.mo` catalog holding `messages` plus a UTF-8 header.
    fn mo_bytes(messages: &[(&str, &str)]) -> Vec<u8> {
        let mut entries = vec![("", "Content-Type: text/plain; charset=UTF-8\n")];
        entries.extend_from_slice(messages);
        entries.sort_by(|a, b| a.0.cmp(b.0));

        let count = entries.len() as u32;
        let originals_at = 28;
        let translations_at = originals_at + count * 8;
        let strings_at = translations_at + count * 8;

        let mut table = Vec::new();
        let mut strings = Vec::new();
        let texts = entries.iter().map(|e| e.0).chain(entries.iter().map(|e| e.1));
        for text in texts {
            table.extend_from_slice(&(text.len() as u32).to_le_bytes());
            table.extend_from_slice(&(strings_at + strings.len() as u32).to_le_bytes());
            strings.extend_from_slice(text.as_bytes());
            strings.push(0);
        }

        let mut bytes = Vec::new();
        for word in [0x950412de_u32, 0, count, originals_at, translations_at, 0, strings_at] {
            bytes.extend_from_slice(&word.to_le_bytes());
        }
        bytes.extend(table);
        bytes.extend(strings);
        bytes
    }

    fn write_catalog(root: &std::path::Path, tag: &str, domain: &str, messages: &[(&str, &str)]) {
        let dir = root.join(tag).join("LC_MESSAGES");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join(format!("{}.mo", domain)), mo_bytes(messages)).unwrap();
    }

    #[test]
    fn catalog_translator_translates_known_messages() {
        let dir = tempfile::tempdir().unwrap();
        write_catalog(dir.path(), "fr", "dom", &[("Foo", "Truc")]);
        let translator = CatalogTranslator::new(vec![dir.path().to_path_buf()], "fr_FR.UTF-8");

        assert_eq!(translator.translate("dom", "Foo"), Some("Truc".to_string()));
        assert_eq!(translator.translate("dom", "Bar"), None);
        assert_eq!(translator.translate("other", "Foo"), None);
    }

    #[test]
    fn catalog_for_full_tag_beats_language_catalog() {
        let dir = tempfile::tempdir().unwrap();
        write_catalog(dir.path(), "fr", "dom", &[("Foo", "Truc")]);
        write_catalog(dir.path(), "fr_FR", "dom", &[("Foo", "Machin")]);
        let translator = CatalogTranslator::new(vec![dir.path().to_path_buf()], "fr_FR.UTF-8");

        assert_eq!(translator.translate("dom", "Foo"), Some("Machin".to_string()));
    }

    #[test]
    fn catalog_translation_overrides_localized_name() {
        let dir = tempfile::tempdir().unwrap();
        write_catalog(dir.path(), "fr", "dom", &[("Foo", "Truc")]);
        let translator = CatalogTranslator::new(vec![dir.path().to_path_buf()], "fr_FR.UTF-8");
        let fields = fields(&[("name", "Foo"), ("name[fr]", "FooF"), (GETTEXT_DOMAIN_KEY, "dom")]);

        assert_eq!(resolve_title("Foo", &fields, "fr_FR.UTF-8", &translator), "Truc");
    }

    #[test]
    fn untranslated_name_keeps_localized_key() {
        let dir = tempfile::tempdir().unwrap();
        write_catalog(dir.path(), "fr", "dom", &[("Other", "Autre")]);
        let translator = CatalogTranslator::new(vec![dir.path().to_path_buf()], "fr_FR.UTF-8");
        let fields = fields(&[("name", "Foo"), ("name[fr]", "FooF"), (GETTEXT_DOMAIN_KEY, "dom")]);

        assert_eq!(resolve_title("Foo", &fields, "fr_FR.UTF-8", &translator), "FooF");
    }

    #[test]
    fn catalog_translator_without_catalogs_returns_none() {
        let dir = tempfile::tempdir().unwrap();
        let translator = CatalogTranslator::new(vec![dir.path().to_path_buf()], "fr_FR.UTF-8");

        assert_eq!(translator.translate("missing", "Foo"), None);
    }

    #[test]
    fn catalog_translator_skips_garbage_catalogs() {
        let dir = tempfile::tempdir().unwrap();
        let messages = dir.path().join("fr").join("LC_MESSAGES");
        std::fs::create_dir_all(&messages).unwrap();
        std::fs::write(messages.join("broken.mo"), b"not a catalog").unwrap();
        let translator = CatalogTranslator::new(vec![dir.path().to_path_buf()], "fr_FR.UTF-8");

        assert_eq!(translator.translate("broken", "Foo"), None);
    }
}
