//! Brand context value objects.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{BrandKitId, UserId, ValidationError};

/// Primary color used in prompts when the brand kit has none.
pub const DEFAULT_PRIMARY_COLOR: &str = "#000000";

/// Secondary color used in prompts when the brand kit has none.
pub const DEFAULT_SECONDARY_COLOR: &str = "#ffffff";

/// Brand color set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BrandColors {
    pub primary: Option<String>,
    pub secondary: Option<String>,
    pub accent: Option<String>,
    /// Ordered additional palette colors.
    pub palette: Vec<String>,
}

impl BrandColors {
    /// Primary color, falling back to black.
    pub fn primary_or_default(&self) -> &str {
        non_blank(self.primary.as_deref()).unwrap_or(DEFAULT_PRIMARY_COLOR)
    }

    /// Secondary color, falling back to white.
    pub fn secondary_or_default(&self) -> &str {
        non_blank(self.secondary.as_deref()).unwrap_or(DEFAULT_SECONDARY_COLOR)
    }

    /// Accent color if one is set.
    pub fn accent(&self) -> Option<&str> {
        non_blank(self.accent.as_deref())
    }

    /// Palette colors, skipping blanks.
    pub fn palette(&self) -> impl Iterator<Item = &str> {
        self.palette
            .iter()
            .map(|c| c.trim())
            .filter(|c| !c.is_empty())
    }

    /// Human-readable palette line, e.g. `Primary: #111, Secondary: #fff, Accent: #f00`.
    pub fn describe(&self) -> String {
        let mut out = format!(
            "Primary: {}, Secondary: {}",
            self.primary_or_default(),
            self.secondary_or_default()
        );
        if let Some(accent) = self.accent() {
            out.push_str(&format!(", Accent: {}", accent));
        }
        let palette: Vec<&str> = self.palette().collect();
        if !palette.is_empty() {
            out.push_str(&format!(", Additional: {}", palette.join(", ")));
        }
        out
    }
}

/// Immutable brand identity used to flavor poster prompts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandContext {
    id: BrandKitId,
    owner: UserId,
    company_name: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    tagline: Option<String>,
    #[serde(default)]
    vision: Option<String>,
    #[serde(default)]
    mission: Option<String>,
    #[serde(default)]
    tone: Option<String>,
    #[serde(default)]
    voice_descriptor: Option<String>,
    #[serde(default)]
    audience_description: Option<String>,
    #[serde(default)]
    values: Vec<String>,
    #[serde(default)]
    colors: BrandColors,
}

impl BrandContext {
    /// Creates a brand context with only the required fields.
    ///
    /// # Errors
    ///
    /// - `EmptyField` if the company name is blank
    pub fn new(
        id: BrandKitId,
        owner: UserId,
        company_name: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let company_name = company_name.into();
        if company_name.trim().is_empty() {
            return Err(ValidationError::empty_field("company_name"));
        }
        Ok(Self {
            id,
            owner,
            company_name,
            description: None,
            tagline: None,
            vision: None,
            mission: None,
            tone: None,
            voice_descriptor: None,
            audience_description: None,
            values: Vec::new(),
            colors: BrandColors::default(),
        })
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_tagline(mut self, tagline: impl Into<String>) -> Self {
        self.tagline = Some(tagline.into());
        self
    }

    pub fn with_vision(mut self, vision: impl Into<String>) -> Self {
        self.vision = Some(vision.into());
        self
    }

    pub fn with_mission(mut self, mission: impl Into<String>) -> Self {
        self.mission = Some(mission.into());
        self
    }

    pub fn with_tone(mut self, tone: impl Into<String>) -> Self {
        self.tone = Some(tone.into());
        self
    }

    pub fn with_voice_descriptor(mut self, voice: impl Into<String>) -> Self {
        self.voice_descriptor = Some(voice.into());
        self
    }

    pub fn with_audience(mut self, audience: impl Into<String>) -> Self {
        self.audience_description = Some(audience.into());
        self
    }

    pub fn with_values(mut self, values: Vec<String>) -> Self {
        self.values = values;
        self
    }

    pub fn with_colors(mut self, colors: BrandColors) -> Self {
        self.colors = colors;
        self
    }

    pub fn id(&self) -> &BrandKitId {
        &self.id
    }

    pub fn owner(&self) -> &UserId {
        &self.owner
    }

    /// Checks if the given user owns this brand kit.
    pub fn is_owner(&self, user_id: &UserId) -> bool {
        &self.owner == user_id
    }

    pub fn company_name(&self) -> &str {
        &self.company_name
    }

    pub fn description(&self) -> Option<&str> {
        non_blank(self.description.as_deref())
    }

    pub fn tagline(&self) -> Option<&str> {
        non_blank(self.tagline.as_deref())
    }

    pub fn vision(&self) -> Option<&str> {
        non_blank(self.vision.as_deref())
    }

    pub fn mission(&self) -> Option<&str> {
        non_blank(self.mission.as_deref())
    }

    pub fn tone(&self) -> Option<&str> {
        non_blank(self.tone.as_deref())
    }

    pub fn voice_descriptor(&self) -> Option<&str> {
        non_blank(self.voice_descriptor.as_deref())
    }

    pub fn audience_description(&self) -> Option<&str> {
        non_blank(self.audience_description.as_deref())
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }

    pub fn colors(&self) -> &BrandColors {
        &self.colors
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
