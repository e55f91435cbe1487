//! Conversion between nested documents and flat dot-key maps

use crate::core::{Error, Result};
use crate::i18n::document::{Document, Group, TranslationValue};
use indexmap::IndexMap;

/// Ordered `dot.key -> text` map
pub type FlatMap = IndexMap<String, String>;

/// Flatten a document into dot keys, depth first in file order
pub fn flatten(document: &Document) -> FlatMap {
    let mut flat = FlatMap::new();
    flatten_into(document.root(), "", &mut flat);
    flat
}

fn flatten_into(group: &Group, prefix: &str, flat: &mut FlatMap) {
    for (segment, value) in group {
        let key = if prefix.is_empty() {
            segment.clone()
        } else {
            format!("{}.{}", prefix, segment)
        };
        match value {
            TranslationValue::Leaf(text) => {
                flat.insert(key, text.clone());
            }
            TranslationValue::Group(child) => flatten_into(child, &key, flat),
        }
    }
}

/// Rebuild the nested form of a flat map
///
/// Fails when one key is a prefix group of another leaf (`a` and `a.b`) or a
/// key has an empty segment.
pub fn unflatten(flat: &FlatMap) -> Result<Document> {
    let mut root = Group::new();

    for (key, text) in flat {
        let segments: Vec<&str> = key.split('.').collect();
        if segments.iter().any(|s| s.is_empty()) {
            return Err(Error::InvalidKey(key.clone()));
        }
        let Some((last, parents)) = segments.split_last() else {
            return Err(Error::InvalidKey(key.clone()));
        };

        let mut group = &mut root;
        for segment in parents {
            group = match group
                .entry(segment.to_string())
                .or_insert_with(|| TranslationValue::Group(Group::new()))
            {
                TranslationValue::Group(child) => child,
                TranslationValue::Leaf(_) => return Err(Error::KeyConflict(key.clone())),
            };
        }

        if let Some(TranslationValue::Group(_)) = group.get(*last) {
            return Err(Error::KeyConflict(key.clone()));
        }
        group.insert(last.to_string(), TranslationValue::Leaf(text.clone()));
    }

    Ok(Document::from_root(root))
}
