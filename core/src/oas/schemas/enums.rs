#![deny(missing_docs)]

//! # Enum Collection
//!
//! Gathers every enumeration encountered during compilation into one
//! namespace of named artifacts. Registration is idempotent for identical
//! name/value pairs; the same name with a different value sequence is a
//! conflict, never a silent overwrite.

use crate::error::{CompileError, CompileResult};
use crate::oas::models::{EnumArtifact, EnumMember};
use indexmap::IndexMap;
use serde_json::Value as JsonValue;

/// Punctuation stripped from member identifiers.
const STRIP: &str = "{}[]()/\\.!@#$%^&*+|'\"<>:`;?";

/// Registry of named enums, in first-registration order.
#[derive(Debug, Default)]
pub struct EnumCollector {
    artifacts: IndexMap<String, Vec<JsonValue>>,
}

impl EnumCollector {
    /// Creates an empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `values` under `name`.
    ///
    /// Values are de-duplicated preserving first occurrence. Registering an
    /// identical sequence under an existing name is a no-op; a differing
    /// sequence fails with an enum conflict.
    pub fn register(&mut self, name: &str, values: &[JsonValue]) -> CompileResult<()> {
        let deduped = dedup_values(values);
        match self.artifacts.get(name) {
            Some(existing) if *existing == deduped => Ok(()),
            Some(_) => Err(CompileError::EnumConflict(format!(
                "enum '{}' registered twice with different value sets",
                name
            ))),
            None => {
                self.artifacts.insert(name.to_string(), deduped);
                Ok(())
            }
        }
    }

    /// Number of registered enums.
    pub fn len(&self) -> usize {
        self.artifacts.len()
    }

    /// True when nothing has been registered.
    pub fn is_empty(&self) -> bool {
        self.artifacts.is_empty()
    }

    /// Consumes the registry into artifacts with normalized member
    /// identifiers.
    pub fn into_artifacts(self) -> Vec<EnumArtifact> {
        self.artifacts
            .into_iter()
            .map(|(name, values)| EnumArtifact {
                name,
                members: values
                    .into_iter()
                    .map(|value| EnumMember {
                        ident: member_ident(&value),
                        value,
                    })
                    .collect(),
            })
            .collect()
    }
}

fn dedup_values(values: &[JsonValue]) -> Vec<JsonValue> {
    let mut deduped: Vec<JsonValue> = Vec::with_capacity(values.len());
    for value in values {
        if !deduped.contains(value) {
            deduped.push(value.clone());
        }
    }
    deduped
}

/// Normalizes a raw scalar into a member identifier: transliterate to the
/// ASCII alphabet, strip punctuation, turn whitespace and hyphens into
/// underscores, upper-case. The raw value itself stays untouched on the
/// member.
pub(crate) fn member_ident(value: &JsonValue) -> String {
    let raw = match value {
        JsonValue::String(s) => s.clone(),
        other => other.to_string(),
    };

    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        for lc in c.to_lowercase() {
            if STRIP.contains(lc) {
                continue;
            }
            if lc == '-' || lc.is_whitespace() {
                out.push('_');
                continue;
            }
            if lc.is_ascii() {
                out.push(lc);
                continue;
            }
            if let Some(folded) = fold_char(lc) {
                out.push_str(folded);
            }
        }
    }
    out.to_uppercase()
}

/// Folds a lowercase accented Latin character to its ASCII base form.
/// Characters outside the table are dropped from identifiers.
fn fold_char(c: char) -> Option<&'static str> {
    let folded = match c {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' | 'ā' | 'ă' | 'ą' => "a",
        'ç' | 'ć' | 'č' | 'ĉ' | 'ċ' => "c",
        'ď' | 'đ' | 'ð' => "d",
        'è' | 'é' | 'ê' | 'ë' | 'ē' | 'ĕ' | 'ė' | 'ę' | 'ě' => "e",
        'ĝ' | 'ğ' | 'ġ' | 'ģ' => "g",
        'ĥ' | 'ħ' => "h",
        'ì' | 'í' | 'î' | 'ï' | 'ĩ' | 'ī' | 'ĭ' | 'į' | 'ı' => "i",
        'ĵ' => "j",
        'ķ' => "k",
        'ĺ' | 'ļ' | 'ľ' | 'ł' => "l",
        'ñ' | 'ń' | 'ņ' | 'ň' => "n",
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ø' | 'ō' | 'ŏ' | 'ő' => "o",
        'ŕ' | 'ř' => "r",
        'ś' | 'š' | 'ş' | 'ŝ' => "s",
        'ť' | 'ţ' | 'ŧ' => "t",
        'ù' | 'ú' | 'û' | 'ü' | 'ũ' | 'ū' | 'ŭ' | 'ů' | 'ű' | 'ų' => "u",
        'ŵ' => "w",
        'ý' | 'ÿ' | 'ŷ' => "y",
        'ź' | 'ž' | 'ż' => "z",
        'ß' => "ss",
        'æ' => "ae",
        'œ' => "oe",
        'þ' => "th",
        _ => return None,
    };
    Some(folded)
}
