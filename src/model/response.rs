use std::borrow::Cow;
use std::path::Path;

use anyhow::Context as _;
use serde_json::Value;

use crate::foundation::error::{VizError, VizResult};

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
/// One element of an algorithm trace.
///
/// The position of a step inside [`AlgorithmResponse::steps`] is authoritative. The wire-level
/// `index` (also accepted as `step`, which producers often emit 1-based) is kept for reference
/// and rewritten to the 0-based position by [`AlgorithmResponse::normalize`].
pub struct AlgorithmStep {
    /// 0-based position once normalized.
    #[serde(default, alias = "step", skip_serializing_if = "Option::is_none")]
    pub index: Option<u64>,
    /// Short step title.
    #[serde(default)]
    pub title: String,
    /// Prose description of what happens in this step.
    #[serde(default)]
    pub description: String,
    /// Optional code excerpt.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Untyped snapshot. `null` and absent are equivalent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    /// References into `data` (indices, ids or `[row, col]` pairs).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub highlights: Option<Vec<Value>>,
    /// Free-form action tag (`compare`, `swap`, ...). Only selects a highlight tint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
/// Complete visualization payload for one query. Immutable for a playback session.
pub struct AlgorithmResponse {
    /// Algorithm name.
    pub title: String,
    /// Prose overview.
    #[serde(default)]
    pub explanation: String,
    /// Prose complexity summary.
    #[serde(default)]
    pub complexity: String,
    /// Ordered trace; may be empty.
    pub steps: Vec<AlgorithmStep>,
    /// Snapshot used for steps that carry no data of their own.
    #[serde(
        default,
        rename = "sampleData",
        alias = "sample_data",
        skip_serializing_if = "Option::is_none"
    )]
    pub sample_data: Option<Value>,
}

impl AlgorithmResponse {
    /// Parse a response document.
    ///
    /// Bare `Infinity`, `-Infinity` and `NaN` tokens are turned into strings first, so payloads
    /// that spell distances as JavaScript literals still parse. An empty title is rejected.
    pub fn from_json_str(text: &str) -> VizResult<Self> {
        let text = quote_non_finite_literals(text);
        let mut response: Self = serde_json::from_str(&text)?;
        response.validate()?;
        response.normalize();
        Ok(response)
    }

    pub fn from_path(path: &Path) -> VizResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read response '{}'", path.display()))?;
        Self::from_json_str(&text)
    }

    pub fn validate(&self) -> VizResult<()> {
        if self.title.trim().is_empty() {
            return Err(VizError::validation("response title must be non-empty"));
        }
        Ok(())
    }

    /// Rewrite each step's `index` to its 0-based position.
    pub fn normalize(&mut self) {
        for (pos, step) in self.steps.iter_mut().enumerate() {
            step.index = Some(pos as u64);
        }
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Index of the last step, `None` for an empty trace.
    pub fn last_index(&self) -> Option<usize> {
        self.steps.len().checked_sub(1)
    }

    /// Clamp `index` into `[0, len-1]`; `0` for an empty trace.
    pub fn clamp_index(&self, index: usize) -> usize {
        self.last_index().map_or(0, |last| index.min(last))
    }

    /// Snapshot for step `index`: the step's own data, else the initial sample data.
    pub fn snapshot_at(&self, index: usize) -> Option<&Value> {
        self.steps
            .get(index)
            .and_then(|s| s.data.as_ref())
            .filter(|v| !v.is_null())
            .or(self.sample_data.as_ref())
    }
}

/// Quote bare `Infinity` / `-Infinity` / `NaN` tokens that sit outside JSON strings.
pub(crate) fn quote_non_finite_literals(text: &str) -> Cow<'_, str> {
    const TOKENS: [&str; 3] = ["-Infinity", "Infinity", "NaN"];

    if !TOKENS.iter().any(|t| text.contains(t)) {
        return Cow::Borrowed(text);
    }

    let bytes = text.as_bytes();
    let mut out = String::with_capacity(text.len() + 16);
    let mut in_string = false;
    let mut escaped = false;
    let mut copied_to = 0usize;
    let mut i = 0usize;

    while i < bytes.len() {
        let b = bytes[i];
        if in_string {
            if escaped {
                escaped = false;
            } else if b == b'\\' {
                escaped = true;
            } else if b == b'"' {
                in_string = false;
            }
            i += 1;
            continue;
        }
        if b == b'"' {
            in_string = true;
            i += 1;
            continue;
        }

        let boundary_before = i == 0 || !is_ident_byte(bytes[i - 1]);
        let matched = boundary_before
            .then(|| {
                TOKENS.iter().find(|t| {
                    bytes[i..].starts_with(t.as_bytes())
                        && bytes
                            .get(i + t.len())
                            .is_none_or(|next| !is_ident_byte(*next))
                })
            })
            .flatten();

        if let Some(token) = matched {
            out.push_str(&text[copied_to..i]);
            out.push('"');
            out.push_str(token);
            out.push('"');
            i += token.len();
            copied_to = i;
        } else {
            i += 1;
        }
    }
    out.push_str(&text[copied_to..]);
    Cow::Owned(out)
}

fn is_ident_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'$'
}

#[cfg(test)]
#[path = "../../tests/unit/model/response.rs"]
mod tests;
