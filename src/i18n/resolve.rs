//! Key resolution with default-locale fallback

use crate::catalog::LocaleCode;
use crate::i18n::store::TranslationStore;

impl TranslationStore {
    /// Resolve `key` in `locale`, then in the default locale
    ///
    /// `None` only when both documents miss. An empty string is a hit.
    pub fn resolve(&self, locale: LocaleCode, key: &str) -> Option<&str> {
        if let Some(text) = self.document(locale).and_then(|doc| doc.lookup(key)) {
            return Some(text);
        }
        if locale == self.default_locale() {
            return None;
        }
        log::trace!("{} missing in {}, trying {}", key, locale, self.default_locale());
        self.document(self.default_locale()).and_then(|doc| doc.lookup(key))
    }

    /// Display text for `key`; never fails
    ///
    /// Falls back to `fallback` and then to the key itself when no document
    /// has a string for it.
    pub fn translate(&self, locale: LocaleCode, key: &str, fallback: Option<&str>) -> String {
        match self.resolve(locale, key) {
            Some(text) => text.to_string(),
            None => fallback.unwrap_or(key).to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::list_locales;
    use crate::i18n::document::Document;
    use std::collections::HashMap;

    fn store() -> TranslationStore {
        let mut documents: HashMap<LocaleCode, Document> = list_locales()
            .iter()
            .map(|l| (l.code, Document::default()))
            .collect();
        documents.insert(
            LocaleCode::En,
            Document::parse(
                "en",
                r#"{
                    "nav": { "home": "Home", "products": "Products" },
                    "contact": { "blank": "" },
                    "admin": { "products": { "title": "Products" } }
                }"#,
            )
            .unwrap(),
        );
        documents.insert(
            LocaleCode::Fr,
            Document::parse("fr", r#"{"nav": {"products": "Produits"}}"#).unwrap(),
        );
        documents.insert(
            LocaleCode::ZhTw,
            Document::parse("zh-TW", r#"{"contact": {"blank": "空白"}}"#).unwrap(),
        );
        TranslationStore::from_documents(LocaleCode::En, documents).unwrap()
    }

    #[test]
    fn test_own_locale_wins() {
        assert_eq!(store().translate(LocaleCode::Fr, "nav.products", None), "Produits");
    }

    #[test]
    fn test_falls_back_to_default_locale() {
        assert_eq!(store().translate(LocaleCode::Fr, "nav.home", None), "Home");
    }

    #[test]
    fn test_caller_fallback() {
        let store = store();
        assert_eq!(
            store.translate(LocaleCode::Fr, "admin.widgets.title", Some("Widgets")),
            "Widgets"
        );
    }

    #[test]
    fn test_key_echo() {
        assert_eq!(store().translate(LocaleCode::En, "foo.bar", None), "foo.bar");
    }

    #[test]
    fn test_empty_key_is_a_miss() {
        let store = store();
        assert_eq!(store.resolve(LocaleCode::En, ""), None);
        assert_eq!(store.translate(LocaleCode::En, "", Some("x")), "x");
    }

    #[test]
    fn test_empty_string_is_returned() {
        let store = store();
        assert_eq!(store.translate(LocaleCode::En, "contact.blank", Some("fallback")), "");
        // fr inherits the empty string from en instead of using the fallback
        assert_eq!(store.translate(LocaleCode::Fr, "contact.blank", Some("fallback")), "");
        assert_eq!(store.translate(LocaleCode::ZhTw, "contact.blank", None), "空白");
    }

    #[test]
    fn test_group_is_a_miss() {
        assert_eq!(store().translate(LocaleCode::Fr, "admin.products", None), "admin.products");
    }

    #[test]
    fn test_default_keys_never_echo() {
        let store = store();
        let keys = store.document(LocaleCode::En).unwrap().leaf_keys();
        for locale in list_locales() {
            for key in &keys {
                let own = store.document(locale.code).unwrap().lookup(key);
                let default = store.document(LocaleCode::En).unwrap().lookup(key);
                let text = store.translate(locale.code, key, None);
                assert!(Some(text.as_str()) == own || Some(text.as_str()) == default);
            }
        }
    }

    #[test]
    fn test_non_default_default_locale() {
        let mut documents: HashMap<LocaleCode, Document> = list_locales()
            .iter()
            .map(|l| (l.code, Document::default()))
            .collect();
        documents.insert(
            LocaleCode::ZhTw,
            Document::parse("zh-TW", r#"{"nav": {"home": "首頁"}}"#).unwrap(),
        );
        let store = TranslationStore::from_documents(LocaleCode::ZhTw, documents).unwrap();
        assert_eq!(store.translate(LocaleCode::En, "nav.home", None), "首頁");
    }
}
