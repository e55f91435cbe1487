//! Translation store
//!
//! Holds one document per catalog locale. Loaded once at startup and never
//! mutated afterwards, so a single store can be shared across sessions
//! behind an `Arc` without locking.

use crate::catalog::{list_locales, LocaleCode, Scope};
use crate::core::{Config, Error, Result};
use crate::i18n::bundled;
use crate::i18n::document::Document;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Every catalog locale's document plus the fallback locale
#[derive(Debug)]
pub struct TranslationStore {
    default_locale: LocaleCode,
    documents: HashMap<LocaleCode, Document>,
}

impl TranslationStore {
    /// Load the documents bundled into the binary
    pub fn load(default_locale: LocaleCode) -> Result<Self> {
        let mut documents = HashMap::new();
        for locale in list_locales() {
            let code = locale.code;
            documents.insert(code, Document::parse(code.as_str(), bundled::source(code))?);
        }
        Self::from_documents(default_locale, documents)
    }

    /// Load `<code>.json` for every catalog locale from `dir`
    pub fn load_from_dir(dir: &Path, default_locale: LocaleCode) -> Result<Self> {
        let mut documents = HashMap::new();
        for locale in list_locales() {
            let code = locale.code;
            let path = dir.join(format!("{}.json", code));
            if !path.is_file() {
                return Err(Error::MissingDocument(code.to_string()));
            }
            let content = fs::read_to_string(&path)?;
            documents.insert(code, Document::parse(code.as_str(), &content)?);
        }
        Self::from_documents(default_locale, documents)
    }

    /// Bundled or on-disk documents, as the configuration says
    pub fn from_config(config: &Config) -> Result<Self> {
        let default_locale = config.default_locale()?;
        match &config.general.locales_dir {
            Some(dir) => Self::load_from_dir(dir, default_locale),
            None => Self::load(default_locale),
        }
    }

    /// Build from documents already in memory; every catalog locale is required
    ///
    /// The default locale is every session's last resort, so it must be
    /// selectable in every scope.
    pub fn from_documents(
        default_locale: LocaleCode,
        documents: HashMap<LocaleCode, Document>,
    ) -> Result<Self> {
        if let Some(scope) = Scope::ALL.iter().find(|s| !s.allows(default_locale)) {
            return Err(Error::Config(format!(
                "Default locale {} is not allowed in scope {}",
                default_locale, scope
            )));
        }

        if let Some(missing) = list_locales().iter().find(|l| !documents.contains_key(&l.code)) {
            return Err(Error::MissingDocument(missing.code.to_string()));
        }

        let keys = documents
            .get(&default_locale)
            .map(|d| d.leaf_keys().len())
            .unwrap_or_default();
        log::info!(
            "Loaded {} translation documents ({} keys in default locale {})",
            documents.len(),
            keys,
            default_locale
        );

        Ok(Self {
            default_locale,
            documents,
        })
    }

    pub fn default_locale(&self) -> LocaleCode {
        self.default_locale
    }

    /// Whole document for a locale
    pub fn document(&self, locale: LocaleCode) -> Option<&Document> {
        self.documents.get(&locale)
    }

    /// Whether `locale`'s own document has a string at `key` (no fallback)
    pub fn has_translation(&self, locale: LocaleCode, key: &str) -> bool {
        self.document(locale)
            .and_then(|doc| doc.lookup(key))
            .is_some()
    }

    /// Default-locale keys with no string in `locale`'s own document
    pub fn missing_keys(&self, locale: LocaleCode) -> Vec<String> {
        let Some(reference) = self.document(self.default_locale) else {
            return Vec::new();
        };
        reference
            .leaf_keys()
            .into_iter()
            .filter(|key| !self.has_translation(locale, key))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_documents_load() {
        let store = TranslationStore::load(LocaleCode::En).unwrap();
        for locale in list_locales() {
            assert!(store.document(locale.code).is_some());
        }
        assert_eq!(store.default_locale(), LocaleCode::En);
    }

    #[test]
    fn test_default_is_superset() {
        let store = TranslationStore::load(LocaleCode::En).unwrap();
        let reference = store.document(LocaleCode::En).unwrap().leaf_keys();
        for locale in list_locales() {
            let doc = store.document(locale.code).unwrap();
            for key in doc.leaf_keys().iter().filter(|k| !k.starts_with("_source.")) {
                assert!(reference.contains(key), "{} has extra key {}", locale.code, key);
            }
        }
        assert!(store.missing_keys(LocaleCode::En).is_empty());
    }

    #[test]
    fn test_admin_locales_cover_admin_keys() {
        let store = TranslationStore::load(LocaleCode::En).unwrap();
        let missing = store.missing_keys(LocaleCode::ZhTw);
        assert!(missing.iter().all(|k| !k.starts_with("admin.")), "{:?}", missing);
    }

    #[test]
    fn test_missing_document_is_fatal() {
        let mut documents = HashMap::new();
        documents.insert(LocaleCode::En, Document::default());
        let err = TranslationStore::from_documents(LocaleCode::En, documents).unwrap_err();
        assert!(matches!(err, Error::MissingDocument(ref code) if code == "zh-TW"));
        assert!(err.is_configuration());
    }

    #[test]
    fn test_default_locale_must_be_allowed_in_every_scope() {
        let documents: HashMap<LocaleCode, Document> = list_locales()
            .iter()
            .map(|l| (l.code, Document::default()))
            .collect();

        let err = TranslationStore::from_documents(LocaleCode::Fr, documents.clone()).unwrap_err();
        assert!(matches!(err, Error::Config(ref msg) if msg.contains("admin")));
        assert!(err.is_configuration());
        assert!(TranslationStore::load(LocaleCode::Fr).is_err());

        let store = TranslationStore::from_documents(LocaleCode::En, documents).unwrap();
        assert_eq!(store.default_locale(), LocaleCode::En);
    }

    #[test]
    fn test_load_from_dir() {
        let dir = tempfile::tempdir().unwrap();
        for locale in list_locales() {
            let body = if locale.code == LocaleCode::En {
                r#"{"nav": {"home": "Home"}}"#
            } else {
                "{}"
            };
            fs::write(dir.path().join(format!("{}.json", locale.code)), body).unwrap();
        }

        let store = TranslationStore::load_from_dir(dir.path(), LocaleCode::En).unwrap();
        assert!(store.has_translation(LocaleCode::En, "nav.home"));
        assert!(!store.has_translation(LocaleCode::Fr, "nav.home"));
        assert_eq!(store.missing_keys(LocaleCode::Fr), vec!["nav.home".to_string()]);
    }

    #[test]
    fn test_load_from_dir_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("en.json"), "{}").unwrap();
        let err = TranslationStore::load_from_dir(dir.path(), LocaleCode::En).unwrap_err();
        assert!(matches!(err, Error::MissingDocument(_)));
    }

    #[test]
    fn test_load_from_dir_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        for locale in list_locales() {
            fs::write(dir.path().join(format!("{}.json", locale.code)), "{}").unwrap();
        }
        fs::write(dir.path().join("ja.json"), "{ not json").unwrap();
        let err = TranslationStore::load_from_dir(dir.path(), LocaleCode::En).unwrap_err();
        assert!(matches!(err, Error::InvalidDocument { ref locale, .. } if locale == "ja"));
    }
}
