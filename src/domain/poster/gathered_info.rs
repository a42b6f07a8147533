//! GatheredInfo - the partially-filled poster requirement set.
//!
//! Fields are plain optional strings because the model reports them as free
//! text. A blank string carries no information and is treated exactly like
//! an absent field everywhere in this module.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::intent::StyleDefaults;

/// Dimensions used when nothing was ever gathered.
pub const DEFAULT_DIMENSIONS: &str = "1024x1024";

/// Headline used when nothing was ever gathered.
pub const DEFAULT_MESSAGE: &str = "Special Offer";

/// Key elements used when neither the model nor the user supplied any.
pub const DEFAULT_KEY_ELEMENTS: &str =
    "bold typography, CTA elements, visual hierarchy, marketing graphics";

/// Structured poster requirements accumulated across a conversation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GatheredInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visual_style: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mood: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_elements: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color_preference: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_audience: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub references: Option<String>,
    /// Model-reported completeness estimate, 0-100.
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_completeness"
    )]
    pub completeness: Option<u8>,
}

/// Accepts any number (or numeric string such as `"85%"`), rounded and
/// clamped to 0-100. Anything else reads as absent.
fn lenient_completeness<'de, D>(deserializer: D) -> Result<Option<u8>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    let number = value.and_then(|v| match v {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().trim_end_matches('%').trim().parse().ok(),
        _ => None,
    });
    Ok(number
        .filter(|n: &f64| n.is_finite())
        .map(|n| n.round().clamp(0.0, 100.0) as u8))
}

impl GatheredInfo {
    pub fn dimensions(&self) -> Option<&str> {
        present(&self.dimensions)
    }

    pub fn message(&self) -> Option<&str> {
        present(&self.message)
    }

    pub fn visual_style(&self) -> Option<&str> {
        present(&self.visual_style)
    }

    pub fn mood(&self) -> Option<&str> {
        present(&self.mood)
    }

    pub fn key_elements(&self) -> Option<&str> {
        present(&self.key_elements)
    }

    pub fn color_preference(&self) -> Option<&str> {
        present(&self.color_preference)
    }

    pub fn target_audience(&self) -> Option<&str> {
        present(&self.target_audience)
    }

    pub fn references(&self) -> Option<&str> {
        present(&self.references)
    }

    /// Both dimensions and a headline are known.
    pub fn has_minimum_info(&self) -> bool {
        self.dimensions().is_some() && self.message().is_some()
    }

    /// Returns true if no field carries any information.
    pub fn is_empty(&self) -> bool {
        self.dimensions().is_none()
            && self.message().is_none()
            && self.visual_style().is_none()
            && self.mood().is_none()
            && self.key_elements().is_none()
            && self.color_preference().is_none()
            && self.target_audience().is_none()
            && self.references().is_none()
            && self.completeness.is_none()
    }

    /// Additive merge: every non-blank field of `update` overwrites, every
    /// blank or missing field keeps `self`'s value.
    pub fn merged_with(&self, update: &GatheredInfo) -> GatheredInfo {
        GatheredInfo {
            dimensions: pick(&update.dimensions, &self.dimensions),
            message: pick(&update.message, &self.message),
            visual_style: pick(&update.visual_style, &self.visual_style),
            mood: pick(&update.mood, &self.mood),
            key_elements: pick(&update.key_elements, &self.key_elements),
            color_preference: pick(&update.color_preference, &self.color_preference),
            target_audience: pick(&update.target_audience, &self.target_audience),
            references: pick(&update.references, &self.references),
            completeness: update.completeness.or(self.completeness).map(|c| c.min(100)),
        }
    }

    /// Merges `update` onto `self` and fills the five core fields that are
    /// still empty: dimensions and message from fixed literals, style and
    /// mood from `defaults`, key elements from a fixed literal.
    pub fn resolved_with(&self, update: &GatheredInfo, defaults: &StyleDefaults) -> GatheredInfo {
        let mut merged = self.merged_with(update);
        fill(&mut merged.dimensions, DEFAULT_DIMENSIONS);
        fill(&mut merged.message, DEFAULT_MESSAGE);
        fill(&mut merged.visual_style, defaults.style);
        fill(&mut merged.mood, defaults.mood);
        fill(&mut merged.key_elements, DEFAULT_KEY_ELEMENTS);
        merged
    }
}

fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn pick(update: &Option<String>, prior: &Option<String>) -> Option<String> {
    present(update)
        .or_else(|| present(prior))
        .map(str::to_string)
}

fn fill(field: &mut Option<String>, default: &str) {
    if present(field).is_none() {
        *field = Some(default.to_string());
    }
}
