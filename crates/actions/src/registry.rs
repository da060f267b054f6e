//! Declarative action-type registry.
//!
//! The host (server) supplies a YAML document mapping action kinds to their
//! field schemas. The registry is read-only configuration: the engine
//! consults it to validate action configs and to render field groups, but
//! never mutates it.

use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading a registry document.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("failed to read registry file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse registry YAML: {0}")]
    Parse(#[from] serde_yaml::Error),
}

/// Mapping from action kind (e.g. `"email"`, `"webhook"`, `"ftp"`) to its
/// field schema. Key order is preserved for display.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActionRegistry {
    kinds: IndexMap<String, ActionKindDef>,
}

impl ActionRegistry {
    pub fn new(kinds: IndexMap<String, ActionKindDef>) -> Self {
        Self { kinds }
    }

    /// Parse a registry from a YAML document.
    pub fn from_yaml(yaml: &str) -> Result<Self, RegistryError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Load a registry from a YAML file on disk.
    pub fn from_path(path: &Path) -> Result<Self, RegistryError> {
        let raw = std::fs::read_to_string(path)?;
        let registry = Self::from_yaml(&raw)?;
        tracing::debug!(
            path = %path.display(),
            kinds = registry.kinds.len(),
            "action registry loaded"
        );
        Ok(registry)
    }

    /// Look up the schema for an action kind.
    pub fn get(&self, kind: &str) -> Option<&ActionKindDef> {
        self.kinds.get(kind)
    }

    pub fn contains(&self, kind: &str) -> bool {
        self.kinds.contains_key(kind)
    }

    /// Known action kinds in declaration order.
    pub fn kind_keys(&self) -> impl Iterator<Item = &str> {
        self.kinds.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    /// Names of the required fields for a kind. Unknown kinds have none.
    pub fn required_fields(&self, kind: &str) -> Vec<&str> {
        self.get(kind)
            .map(|def| {
                def.fields
                    .iter()
                    .filter(|f| f.required)
                    .map(|f| f.name.as_str())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Closest known kind to `input`, for "did you mean" hints. Returns
    /// None if the best match is too dissimilar.
    pub fn suggest(&self, input: &str) -> Option<&str> {
        let input_lower = input.to_lowercase();
        let mut best: Option<(&str, usize)> = None;

        for candidate in self.kind_keys() {
            let dist = levenshtein(&input_lower, &candidate.to_lowercase());
            match best {
                None => best = Some((candidate, dist)),
                Some((_, best_dist)) if dist < best_dist => best = Some((candidate, dist)),
                _ => {}
            }
        }

        best.and_then(|(name, dist)| {
            // Only suggest if edit distance is reasonable (≤ half the longer string)
            let max_len = input.len().max(name.len());
            if dist <= max_len / 2 {
                Some(name)
            } else {
                None
            }
        })
    }
}

/// Schema for a single action kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionKindDef {
    pub label: String,
    #[serde(default)]
    pub fields: Vec<FieldDef>,
}

/// A single config field within an action kind schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDef {
    pub name: String,
    pub label: String,
    #[serde(rename = "type")]
    pub kind: FieldKind,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<SelectOption>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rows: Option<u32>,
}

/// Input widget kind for a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Text,
    Number,
    Select,
    Textarea,
    Json,
}

/// One choice of a `select` field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

/// Levenshtein edit distance between two strings.
fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let m = a.len();
    let n = b.len();

    let mut prev = (0..=n).collect::<Vec<_>>();
    let mut curr = vec![0; n + 1];

    for i in 1..=m {
        curr[0] = i;
        for j in 1..=n {
            let cost = if a[i - 1] == b[j - 1] { 0 } else { 1 };
            curr[j] = (prev[j] + 1)
                .min(curr[j - 1] + 1)
                .min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[n]
}
