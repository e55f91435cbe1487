//! Per-session locale state
//!
//! One [`LocaleSession`] per active user session: it owns the current locale
//! and the scope restricting it, reads the shared [`TranslationStore`], and
//! persists explicit choices through a [`PreferenceStore`].

use crate::catalog::{Locale, LocaleCode, Scope, LANGUAGE_COOKIE_NAME};
use crate::core::{Error, Result, StorageConfig};
use crate::i18n::detect::match_ambient;
use crate::i18n::store::TranslationStore;
use crate::prefs::PreferenceStore;
use std::sync::Arc;

/// Lifecycle of the session locale
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Uninitialized,
    /// Chosen by detection at startup
    Detected,
    /// Chosen explicitly by the user; detection never overrides it
    UserSelected,
}

/// Locale context for one session
pub struct LocaleSession<P: PreferenceStore> {
    store: Arc<TranslationStore>,
    scope: Scope,
    prefs: P,
    current: LocaleCode,
    state: SessionState,
    storage_key: String,
    cookie_name: String,
    cookie_max_age_secs: u64,
}

impl<P: PreferenceStore> LocaleSession<P> {
    /// New uninitialized session showing the default locale
    pub fn new(store: Arc<TranslationStore>, scope: Scope, prefs: P) -> Self {
        Self::with_storage(store, scope, prefs, &StorageConfig::default())
    }

    /// Same as [`LocaleSession::new`] with configured key and cookie names
    pub fn with_storage(
        store: Arc<TranslationStore>,
        scope: Scope,
        prefs: P,
        storage: &StorageConfig,
    ) -> Self {
        let current = store.default_locale();
        Self {
            store,
            scope,
            prefs,
            current,
            state: SessionState::Uninitialized,
            storage_key: storage.storage_key.clone(),
            cookie_name: storage.cookie_name.clone(),
            cookie_max_age_secs: storage.cookie_max_age_secs,
        }
    }

    /// Pick the starting locale
    ///
    /// Order: persisted preference valid for the scope, then the ambient
    /// locale, then the default locale. A user selection already made in this
    /// session is kept as is.
    pub fn initialize(&mut self, ambient: Option<&str>) -> &'static Locale {
        if self.state == SessionState::UserSelected {
            return self.current.locale();
        }

        self.current = self.detect(ambient);
        self.state = SessionState::Detected;

        log::info!("Detected locale {} for scope {}", self.current, self.scope);
        self.current.locale()
    }

    fn detect(&self, ambient: Option<&str>) -> LocaleCode {
        match self.prefs.get(&self.storage_key) {
            Ok(Some(stored)) => match stored.parse::<LocaleCode>() {
                Ok(code) if self.scope.allows(code) => return code,
                _ => log::debug!("Ignoring stored locale {:?} for scope {}", stored, self.scope),
            },
            Ok(None) => {}
            Err(e) => log::warn!("Failed to read stored locale: {}", e),
        }

        if let Some(code) = ambient.and_then(|tag| match_ambient(self.scope, tag)) {
            log::debug!("Matched ambient locale {:?} to {}", ambient, code);
            return code;
        }

        self.store.default_locale()
    }

    /// Select a locale, rejecting codes outside the scope
    ///
    /// On success the choice is persisted; a failed write is logged and the
    /// in-session selection stands.
    pub fn try_set_locale(&mut self, candidate: &str) -> Result<()> {
        let code = candidate
            .parse::<LocaleCode>()
            .ok()
            .filter(|code| self.scope.allows(*code))
            .ok_or_else(|| Error::InvalidLocaleSelection {
                locale: candidate.to_string(),
                scope: self.scope.to_string(),
            })?;

        self.current = code;
        self.state = SessionState::UserSelected;

        if let Err(e) = self.prefs.set(&self.storage_key, code.as_str()) {
            log::warn!("Failed to persist locale {}: {}", code, e);
        }

        log::info!("Locale set to: {}", code);
        Ok(())
    }

    /// Select a locale; invalid choices are logged and ignored
    pub fn set_locale(&mut self, candidate: &str) {
        if let Err(e) = self.try_set_locale(candidate) {
            log::warn!("{}", e);
        }
    }

    pub fn current_locale(&self) -> &'static Locale {
        self.current.locale()
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn scope(&self) -> Scope {
        self.scope
    }

    /// Value for the document's `lang` attribute
    pub fn html_lang(&self) -> &'static str {
        self.current.locale().html_lang
    }

    /// Locales the switcher should offer, in display order
    pub fn available_locales(&self) -> Vec<&'static Locale> {
        self.scope.locales()
    }

    /// Translate `key` in the current locale
    pub fn translate(&self, key: &str, fallback: Option<&str>) -> String {
        self.store.translate(self.current, key, fallback)
    }

    /// `Set-Cookie` value handing the locale to server-side rendering
    pub fn cookie_header(&self) -> String {
        format!(
            "{}={}; Path=/; Max-Age={}; SameSite=Lax",
            self.cookie_name, self.current, self.cookie_max_age_secs
        )
    }

    pub fn preferences(&self) -> &P {
        &self.prefs
    }
}

/// Locale carried by a `Cookie` request header, if it names a catalog locale
pub fn locale_from_cookie(header: &str, cookie_name: &str) -> Option<LocaleCode> {
    header
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == cookie_name)
        .and_then(|(_, value)| value.trim().parse().ok())
}

/// [`locale_from_cookie`] with the default cookie name
pub fn locale_from_default_cookie(header: &str) -> Option<LocaleCode> {
    locale_from_cookie(header, LANGUAGE_COOKIE_NAME)
}
