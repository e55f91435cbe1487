//! Ambient locale detection

use crate::catalog::{LocaleCode, Scope, LOCALES};

/// Locale reported by the OS or user agent, if any
///
/// Asks the platform first, then `LC_ALL`, `LC_MESSAGES` and `LANG`.
pub fn detect_ambient_locale() -> Option<String> {
    if let Some(locale) = sys_locale::get_locale() {
        return Some(locale);
    }

    ["LC_ALL", "LC_MESSAGES", "LANG"]
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .find(|value| !value.is_empty() && value != "C" && value != "POSIX")
}

/// Normalize a raw tag: "zh_TW.UTF-8" -> "zh-TW"
pub fn normalize_tag(raw: &str) -> String {
    let tag = raw.trim();
    let tag = tag.split('.').next().unwrap_or(tag);
    let tag = tag.split('@').next().unwrap_or(tag);
    tag.replace('_', "-")
}

/// Best locale of `scope` for an ambient tag
///
/// Exact tag match first (case-insensitive), then the first locale in
/// display order sharing the primary language subtag.
pub fn match_ambient(scope: Scope, raw: &str) -> Option<LocaleCode> {
    let tag = normalize_tag(raw);
    if tag.is_empty() {
        return None;
    }

    let allowed = || LOCALES.iter().map(|l| l.code).filter(move |code| scope.allows(*code));

    if let Some(code) = allowed().find(|code| code.as_str().eq_ignore_ascii_case(&tag)) {
        return Some(code);
    }

    let primary = tag.split('-').next().unwrap_or(&tag);
    allowed().find(|code| code.primary_subtag().eq_ignore_ascii_case(primary))
}
