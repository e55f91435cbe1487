//! Translation documents
//!
//! A document is a tree of named groups whose leaves are strings, mirroring
//! the dot-separated key namespace (`admin.products.title`).

use crate::core::{Error, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Named children of a group, in file order
pub type Group = IndexMap<String, TranslationValue>;

/// A node of a translation document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TranslationValue {
    Leaf(String),
    Group(Group),
}

/// One locale's translation tree
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Document {
    root: Group,
}

impl Document {
    /// Wrap an already-built tree
    pub fn from_root(root: Group) -> Self {
        Self { root }
    }

    /// Parse and validate a JSON document for `locale`
    ///
    /// Rejects non-string leaves and segment names that are empty or contain
    /// a `.`; empty groups are dropped.
    pub fn parse(locale: &str, json: &str) -> Result<Self> {
        let mut root: Group = serde_json::from_str(json).map_err(|e| Error::InvalidDocument {
            locale: locale.to_string(),
            reason: e.to_string(),
        })?;

        validate_group(&root, "").map_err(|reason| Error::InvalidDocument {
            locale: locale.to_string(),
            reason,
        })?;
        prune_empty(&mut root);

        Ok(Self { root })
    }

    /// Pretty JSON with two-space indentation
    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(&self.root).map_err(|e| Error::Serialization(e.to_string()))
    }

    pub fn root(&self) -> &Group {
        &self.root
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    /// Walk `key` segment by segment; `None` when any step is absent
    pub fn get(&self, key: &str) -> Option<&TranslationValue> {
        if key.is_empty() {
            return None;
        }

        let mut segments = key.split('.');
        let mut node = self.root.get(segments.next()?)?;
        for segment in segments {
            node = match node {
                TranslationValue::Group(group) => group.get(segment)?,
                TranslationValue::Leaf(_) => return None,
            };
        }
        Some(node)
    }

    /// String at `key`; a group at `key` is a miss
    pub fn lookup(&self, key: &str) -> Option<&str> {
        match self.get(key)? {
            TranslationValue::Leaf(text) => Some(text),
            TranslationValue::Group(_) => None,
        }
    }

    /// Dot keys of every leaf, depth first in file order
    pub fn leaf_keys(&self) -> Vec<String> {
        let mut keys = Vec::new();
        collect_keys(&self.root, "", &mut keys);
        keys
    }
}

fn join_key(prefix: &str, segment: &str) -> String {
    if prefix.is_empty() {
        segment.to_string()
    } else {
        format!("{}.{}", prefix, segment)
    }
}

fn validate_group(group: &Group, prefix: &str) -> std::result::Result<(), String> {
    for (segment, value) in group {
        if segment.is_empty() {
            return Err(format!("empty key segment under {:?}", prefix));
        }
        if segment.contains('.') {
            return Err(format!("key segment {:?} contains '.'", join_key(prefix, segment)));
        }
        if let TranslationValue::Group(child) = value {
            validate_group(child, &join_key(prefix, segment))?;
        }
    }
    Ok(())
}

fn prune_empty(group: &mut Group) {
    for value in group.values_mut() {
        if let TranslationValue::Group(child) = value {
            prune_empty(child);
        }
    }
    group.retain(|_, value| !matches!(value, TranslationValue::Group(child) if child.is_empty()));
}

fn collect_keys(group: &Group, prefix: &str, keys: &mut Vec<String>) {
    for (segment, value) in group {
        let key = join_key(prefix, segment);
        match value {
            TranslationValue::Leaf(_) => keys.push(key),
            TranslationValue::Group(child) => collect_keys(child, &key, keys),
        }
    }
}
