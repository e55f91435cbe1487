//! Locale catalog
//!
//! Static registry of the supported locales, their display order, and the
//! locales each application area (scope) lets users pick from.

use crate::core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Supported locale identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LocaleCode {
    #[serde(rename = "en")]
    En,
    #[serde(rename = "zh-TW")]
    ZhTw,
    #[serde(rename = "zh-CN")]
    ZhCn,
    #[serde(rename = "ja")]
    Ja,
    #[serde(rename = "it")]
    It,
    #[serde(rename = "fr")]
    Fr,
    #[serde(rename = "es")]
    Es,
    #[serde(rename = "de")]
    De,
}

impl LocaleCode {
    pub fn as_str(self) -> &'static str {
        match self {
            LocaleCode::En => "en",
            LocaleCode::ZhTw => "zh-TW",
            LocaleCode::ZhCn => "zh-CN",
            LocaleCode::Ja => "ja",
            LocaleCode::It => "it",
            LocaleCode::Fr => "fr",
            LocaleCode::Es => "es",
            LocaleCode::De => "de",
        }
    }

    /// Primary language subtag ("zh" for "zh-TW")
    pub fn primary_subtag(self) -> &'static str {
        let tag = self.as_str();
        tag.split('-').next().unwrap_or(tag)
    }

    /// Catalog entry for this code
    pub fn locale(self) -> &'static Locale {
        // LOCALES is indexed in the same order as the enum variants
        &LOCALES[self as usize]
    }
}

impl fmt::Display for LocaleCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for LocaleCode {
    type Err = Error;

    /// Exact catalog identifiers only ("zh-TW", not "zh_tw")
    fn from_str(s: &str) -> Result<Self> {
        LOCALES
            .iter()
            .map(|l| l.code)
            .find(|code| code.as_str() == s)
            .ok_or_else(|| Error::UnknownLocale(s.to_string()))
    }
}

/// A supported locale and its display metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Locale {
    pub code: LocaleCode,
    /// Short label for the switcher ("Eng", "繁中")
    pub label: &'static str,
    /// Full language name
    pub name: &'static str,
    /// Machine translation service target code
    pub deepl_code: &'static str,
    /// HTML `lang` attribute value
    pub html_lang: &'static str,
}

/// All supported locales, in switcher display order
pub static LOCALES: [Locale; 8] = [
    Locale { code: LocaleCode::En, label: "Eng", name: "English", deepl_code: "EN", html_lang: "en" },
    Locale { code: LocaleCode::ZhTw, label: "繁中", name: "繁體中文", deepl_code: "ZH", html_lang: "zh-TW" },
    Locale { code: LocaleCode::ZhCn, label: "简中", name: "简体中文", deepl_code: "ZH", html_lang: "zh-CN" },
    Locale { code: LocaleCode::Ja, label: "日本語", name: "日本語", deepl_code: "JA", html_lang: "ja" },
    Locale { code: LocaleCode::It, label: "IT", name: "Italiano", deepl_code: "IT", html_lang: "it" },
    Locale { code: LocaleCode::Fr, label: "FR", name: "Français", deepl_code: "FR", html_lang: "fr" },
    Locale { code: LocaleCode::Es, label: "ES", name: "Español", deepl_code: "ES", html_lang: "es" },
    Locale { code: LocaleCode::De, label: "DE", name: "Deutsch", deepl_code: "DE", html_lang: "de" },
];

/// Authoritative locale, valid in every scope
pub const DEFAULT_LOCALE: LocaleCode = LocaleCode::En;

/// Preference key the selected locale is persisted under
pub const LANGUAGE_STORAGE_KEY: &str = "jaws-language";

/// Cookie name used to hand the locale to server-side rendering
pub const LANGUAGE_COOKIE_NAME: &str = "jaws-language";

const ALL_CODES: [LocaleCode; 8] = [
    LocaleCode::En,
    LocaleCode::ZhTw,
    LocaleCode::ZhCn,
    LocaleCode::Ja,
    LocaleCode::It,
    LocaleCode::Fr,
    LocaleCode::Es,
    LocaleCode::De,
];

const ADMIN_CODES: [LocaleCode; 2] = [LocaleCode::En, LocaleCode::ZhTw];

/// Application area restricting which locales are selectable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    /// Public marketing site
    Public,
    /// Client self-service dashboard
    Dashboard,
    /// Back-office admin console
    Admin,
}

impl Scope {
    pub const ALL: [Scope; 3] = [Scope::Public, Scope::Dashboard, Scope::Admin];

    pub fn as_str(self) -> &'static str {
        match self {
            Scope::Public => "public",
            Scope::Dashboard => "dashboard",
            Scope::Admin => "admin",
        }
    }

    /// Codes selectable in this scope
    pub fn allowed(self) -> &'static [LocaleCode] {
        match self {
            Scope::Public | Scope::Dashboard => &ALL_CODES,
            Scope::Admin => &ADMIN_CODES,
        }
    }

    pub fn allows(self, code: LocaleCode) -> bool {
        self.allowed().contains(&code)
    }

    /// Selectable locales in display order
    pub fn locales(self) -> Vec<&'static Locale> {
        LOCALES.iter().filter(|l| self.allows(l.code)).collect()
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Scope {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "public" => Ok(Scope::Public),
            "dashboard" => Ok(Scope::Dashboard),
            "admin" => Ok(Scope::Admin),
            other => Err(Error::UnknownScope(other.to_string())),
        }
    }
}

/// All locales in display order
pub fn list_locales() -> &'static [Locale] {
    &LOCALES
}

/// Locales selectable in the named scope, in display order
pub fn locales_for_scope(scope: &str) -> Result<Vec<&'static Locale>> {
    Ok(scope.parse::<Scope>()?.locales())
}
