//! Marketing intent classification.
//!
//! One keyword classifier feeds both the style/mood defaults used while
//! gathering and the prompt synthesis heuristics, so the two always agree
//! on what a headline is trying to do.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::domain::brand::BrandColors;

static DISCOUNT: Lazy<Regex> = Lazy::new(|| keywords(r"\d+%|\boff\b|\bsale\b|\bsave\b"));
static URGENCY: Lazy<Regex> =
    Lazy::new(|| keywords(r"\blimited\b|\bnow\b|\btoday\b|\bhurry\b|\bending\b"));
static LAUNCH: Lazy<Regex> =
    Lazy::new(|| keywords(r"\bnew\b|\blaunching\b|\barrival\b|\bintroducing\b"));
static FREE_OFFER: Lazy<Regex> =
    Lazy::new(|| keywords(r"\bfree\b|\bcomplimentary\b|\bno cost\b"));
static PREMIUM: Lazy<Regex> =
    Lazy::new(|| keywords(r"\bluxury\b|\bpremium\b|\bexclusive\b|\belite\b"));
static FUN: Lazy<Regex> =
    Lazy::new(|| keywords(r"\bfun\b|\bexciting\b|\bamazing\b|\bcelebrate\b"));

fn keywords(pattern: &str) -> Regex {
    Regex::new(&format!("(?i){}", pattern)).unwrap()
}

/// Which keyword families a headline matches. Several may be set at once.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MarketingIntent {
    pub discount: bool,
    pub urgency: bool,
    pub launch: bool,
    pub free_offer: bool,
    pub premium: bool,
    pub fun: bool,
}

/// The single bucket a headline falls into, by priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntentTag {
    Premium,
    DiscountUrgency,
    Launch,
    Fun,
    Generic,
}

/// Classifies a headline by case-insensitive, word-bounded keyword matching.
pub fn classify_marketing_intent(message: &str) -> MarketingIntent {
    MarketingIntent {
        discount: DISCOUNT.is_match(message),
        urgency: URGENCY.is_match(message),
        launch: LAUNCH.is_match(message),
        free_offer: FREE_OFFER.is_match(message),
        premium: PREMIUM.is_match(message),
        fun: FUN.is_match(message),
    }
}

impl MarketingIntent {
    /// First match wins: premium > discount/urgency > launch > fun > generic.
    pub fn tag(&self) -> IntentTag {
        if self.premium {
            IntentTag::Premium
        } else if self.discount || self.urgency {
            IntentTag::DiscountUrgency
        } else if self.launch {
            IntentTag::Launch
        } else if self.fun {
            IntentTag::Fun
        } else {
            IntentTag::Generic
        }
    }

    pub fn is_promotional(&self) -> bool {
        self.discount || self.urgency
    }

    /// Short label naming what the poster should achieve.
    pub fn marketing_goal(&self) -> &'static str {
        if self.discount {
            "sale/discount promotion"
        } else if self.urgency {
            "urgency-driven conversion"
        } else if self.launch {
            "product launch"
        } else if self.free_offer {
            "lead generation"
        } else {
            "brand awareness"
        }
    }

    /// Suggested graphic elements, always ending with an arrow and a CTA.
    pub fn conversion_elements(&self) -> Vec<&'static str> {
        let mut elements = Vec::new();
        if self.discount {
            elements.extend(["price tag badge", "percentage highlight", "sale ribbon"]);
        }
        if self.urgency {
            elements.extend(["urgency indicators", "countdown visual", "limited time badge"]);
        }
        if self.launch {
            elements.extend(["NEW badge", "spotlight effect", "announcement banner"]);
        }
        if self.free_offer {
            elements.extend(["FREE badge", "checkmark icons", "benefit callouts"]);
        }
        elements.extend(["directional arrow", "CTA button/text"]);
        elements
    }

    /// Color guidance that prefers the brand accent, with canonical colors
    /// per intent otherwise (red for urgency, gold for launch, green for a
    /// free offer). Mentions up to three palette colors when present.
    pub fn color_psychology(&self, colors: &BrandColors) -> String {
        let accent = colors.accent();
        let mut guidance = if self.is_promotional() {
            match accent {
                Some(accent) => format!(
                    "{} accents for urgency, high contrast with {}",
                    accent,
                    colors.primary_or_default()
                ),
                None => "red accents for urgency, high contrast".to_string(),
            }
        } else if self.launch {
            match accent {
                Some(accent) => format!("{} highlights for excitement", accent),
                None => "gold/yellow highlights for excitement".to_string(),
            }
        } else if self.free_offer {
            "green accents for positive action".to_string()
        } else {
            "brand colors for consistency".to_string()
        };

        let palette: Vec<&str> = colors.palette().take(3).collect();
        if !palette.is_empty() {
            guidance.push_str(&format!(" (can use palette: {})", palette.join(", ")));
        }
        guidance
    }
}

/// Style and mood used to fill fields nobody supplied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyleDefaults {
    pub style: &'static str,
    pub mood: &'static str,
}

impl StyleDefaults {
    pub fn for_tag(tag: IntentTag) -> Self {
        let (style, mood) = match tag {
            IntentTag::Premium => (
                "elegant, sophisticated, luxury design",
                "premium, aspirational, refined",
            ),
            IntentTag::DiscountUrgency => {
                ("bold, urgent, high-impact", "urgent, exciting, action-driven")
            }
            IntentTag::Launch => (
                "modern, fresh, announcement-style",
                "exciting, innovative, attention-grabbing",
            ),
            IntentTag::Fun => ("vibrant, playful, energetic", "fun, engaging, youthful"),
            IntentTag::Generic => (
                "bold, eye-catching, promotional",
                "energetic, conversion-focused",
            ),
        };
        Self { style, mood }
    }

    /// Defaults for a headline, or the generic bucket when there is none.
    pub fn for_message(message: Option<&str>) -> Self {
        let tag = message
            .map(|m| classify_marketing_intent(m).tag())
            .unwrap_or(IntentTag::Generic);
        Self::for_tag(tag)
    }
}
