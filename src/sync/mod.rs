//! Offline translation sync
//!
//! Brings every non-default locale document up to date with the default
//! locale by machine-translating strings that are new or whose source text
//! changed. Each translated key gets a `_source.<key>` marker holding the
//! source text it was produced from, so the next run can tell stale
//! translations from current ones.

mod deepl;

pub use deepl::DeeplClient;

use crate::catalog::Locale;
use crate::core::{Error, Result, TranslateConfig};
use crate::i18n::{flatten, unflatten, Document, FlatMap};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Group holding per-key source markers
pub const SOURCE_PREFIX: &str = "_source.";

/// Keys with this prefix are editorial notes and are not carried over
pub const NOTE_PREFIX: &str = "_note";

/// A default-locale string that needs (re)translation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingString {
    pub key: String,
    pub text: String,
}

/// Outcome of syncing one locale
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncStats {
    pub translated: usize,
    pub skipped: usize,
}

fn is_internal(key: &str) -> bool {
    key.starts_with(SOURCE_PREFIX) || key.starts_with(NOTE_PREFIX)
}

fn marker(key: &str) -> String {
    format!("{}{}", SOURCE_PREFIX, key)
}

/// Number of strings in `source` that get translated
pub fn translatable_count(source: &FlatMap) -> usize {
    source.keys().filter(|key| !is_internal(key)).count()
}

/// Strings of `source` that `existing` lacks or translated from older text
pub fn plan(source: &FlatMap, existing: &FlatMap) -> Vec<PendingString> {
    source
        .iter()
        .filter(|(key, _)| !is_internal(key))
        .filter(|(key, text)| {
            let translated = existing.get(key.as_str()).is_some_and(|t| !t.is_empty());
            let current = existing.get(&marker(key)) == Some(*text);
            !(translated && current)
        })
        .map(|(key, text)| PendingString {
            key: key.clone(),
            text: text.clone(),
        })
        .collect()
}

/// Fold fresh translations into `existing`
///
/// Translated strings and their markers are updated. Untouched keys keep
/// their markers. Note keys and keys no longer in `source` are dropped, so a
/// source leaf turned into a group does not collide with the old string.
pub fn merge(
    source: &FlatMap,
    existing: &FlatMap,
    pending: &[PendingString],
    translations: &[String],
) -> FlatMap {
    let mut strings = FlatMap::new();
    let mut markers = FlatMap::new();

    for (key, value) in existing {
        if let Some(marked) = key.strip_prefix(SOURCE_PREFIX) {
            if source.contains_key(marked) {
                markers.insert(key.clone(), value.clone());
            }
        } else if !key.starts_with(NOTE_PREFIX) && source.contains_key(key) {
            strings.insert(key.clone(), value.clone());
        }
    }

    for (item, translation) in pending.iter().zip(translations) {
        strings.insert(item.key.clone(), translation.clone());
        markers.insert(marker(&item.key), item.text.clone());
    }

    strings.extend(markers);
    strings
}

/// Read a locale file as a flat map; unreadable files start fresh
pub fn read_flat(path: &Path, locale: &str) -> FlatMap {
    if !path.is_file() {
        return FlatMap::new();
    }

    match fs::read_to_string(path).map_err(Error::from).and_then(|c| Document::parse(locale, &c)) {
        Ok(document) => flatten(&document),
        Err(e) => {
            log::warn!("Starting {} from scratch: {}", path.display(), e);
            FlatMap::new()
        }
    }
}

/// Translate what `locale` is missing and rewrite `<dir>/<code>.json`
pub async fn sync_locale(
    client: &DeeplClient,
    config: &TranslateConfig,
    locale: &Locale,
    source: &FlatMap,
    dir: &Path,
) -> Result<SyncStats> {
    let path = dir.join(format!("{}.json", locale.code));
    let existing = read_flat(&path, locale.code.as_str());
    let total = translatable_count(source);

    let pending = plan(source, &existing);
    if pending.is_empty() {
        return Ok(SyncStats {
            translated: 0,
            skipped: total,
        });
    }

    log::info!("Translating {} strings to {}...", pending.len(), locale.name);

    let batch_size = config.batch_size.max(1);
    let mut translations = Vec::with_capacity(pending.len());
    for (index, batch) in pending.chunks(batch_size).enumerate() {
        let texts: Vec<String> = batch.iter().map(|p| p.text.clone()).collect();
        translations.extend(client.translate(&texts, locale.deepl_code).await?);

        let done = translations.len();
        log::info!("  Progress: {}/{}", done, pending.len());

        if (index + 1) * batch_size < pending.len() {
            tokio::time::sleep(Duration::from_millis(config.batch_delay_ms)).await;
        }
    }

    let merged = merge(source, &existing, &pending, &translations);
    let document = unflatten(&merged)?;
    fs::write(&path, document.to_json_pretty()?)?;

    Ok(SyncStats {
        translated: pending.len(),
        skipped: total - pending.len(),
    })
}
