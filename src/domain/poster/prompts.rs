//! Prompt library for the poster conversation.
//!
//! Pure template functions: every prompt the engine sends, plus the
//! deterministic poster-prompt builder used when model-assisted synthesis is
//! unavailable. Nothing here performs I/O.

use crate::domain::brand::BrandContext;

use super::gathered_info::{GatheredInfo, DEFAULT_DIMENSIONS, DEFAULT_MESSAGE};
use super::intent::{classify_marketing_intent, MarketingIntent};
use super::turn::{render_transcript, ConversationTurn};

/// Headline length above which the fallback builder truncates.
const MAX_FALLBACK_HEADLINE_CHARS: usize = 40;

/// Consultant persona used for every requirement-gathering call.
pub const CLARIFICATION_PROMPT: &str = r#"You are a professional Marketing & Design Consultant specializing in high-converting advertisement posters.
Your goal is to gather requirements to create an effective marketing poster that drives conversions.

ESSENTIAL INFORMATION TO GATHER:
1. **Marketing Goal**: What action should viewers take? (buy, signup, visit, learn more, download)
2. **Primary Message/Headline**: What's the main benefit or offer? (sale %, new product, free offer, limited time)
3. **Format/Dimensions**: Where will this be displayed? (social media, website banner, print, email header)
4. **Call-to-Action**: What specific action? (Shop Now, Get Started, Learn More, Claim Offer)
5. **Urgency/Scarcity**: Any time limits or limited availability?
6. **Visual Style**: What marketing approach? (bold & urgent, minimalist & premium, playful & engaging)

MARKETING-FOCUSED QUESTIONS TO ASK:
- "What's the main goal of this poster? (e.g., drive sales, generate leads, announce launch)"
- "What's your headline or main offer? (e.g., '50% OFF', 'New Arrival', 'Free Trial')"
- "Where will this poster be displayed? (helps determine dimensions)"
- "Is there a time-sensitive element? (e.g., 'Limited Time', 'Ends Today')"
- "What action should viewers take? (e.g., 'Shop Now', 'Sign Up', 'Learn More')"
- "What's the desired emotional response? (urgency, excitement, trust, curiosity)"

Ask 2-3 strategic questions at a time to gather missing information.
Focus on CONVERSION GOALS and MARKETING EFFECTIVENESS.
Be helpful, creative, and marketing-savvy."#;

/// System prompt for turning structured requirements into an image prompt.
pub const PROMPT_ENGINEER_SYSTEM_PROMPT: &str = r#"You are an expert Prompt Engineer for an image generation model specializing in MARKETING POSTER DESIGN.

You create high-converting advertisement posters optimized for marketing campaigns, sales, promotions, and brand awareness.

CRITICAL RULES FOR MARKETING POSTER GENERATION:
1. Always start with: "Marketing poster" or "Advertisement banner" or "Promotional graphic"
2. Keep prompts CONCISE (under 150 words) and ACTION-ORIENTED
3. Use graphic design terminology, NOT photography terms (no "camera angles", "lighting", "scene")
4. Specify text EXACTLY and keep it SHORT (max 5-7 words for headlines)
5. Include MARKETING ELEMENTS: urgency, social proof, value proposition, CTA

OPTIMAL MARKETING PROMPT STRUCTURE:
[Format] [Marketing Style] [Headline Text] [Subtext/CTA] [Color Psychology] [Conversion Elements] [Layout]

Example of EXCELLENT marketing poster prompt:
"Marketing poster, bold promotional style, large text '50% OFF' in red sans-serif at top, smaller text 'Limited Time' below, white background with red accents, urgency-driven design, geometric price tag icon, eye-catching contrast, centered hierarchy, clean 16:9 banner"

Example of WEAK marketing prompt (avoid):
"A professional scene with elegant typography featuring a sale message. The design has clean aesthetics with subtle elements and balanced composition..."

MARKETING-SPECIFIC DESIGN ELEMENTS TO INCLUDE:
- **Urgency Triggers**: "Limited Time", countdown elements, sale badges, red accents
- **Value Proposition**: Price highlights, percentage savings, "FREE", benefit callouts
- **Call-to-Action**: Arrows, buttons, "Shop Now", "Get Started", directional cues
- **Social Proof**: Star ratings, testimonial snippets, "Bestseller" badges
- **Scarcity**: "While supplies last", limited quantity indicators
- **Emotion**: Excitement (bright colors), trust (blue tones), luxury (gold/black)

YOUR JOB:
1. Extract HEADLINE (max 5 words, action-oriented, benefit-focused)
2. Identify MARKETING GOAL (sale, signup, awareness, product launch, event)
3. Add CONVERSION ELEMENT (CTA arrow, button, badge, price tag)
4. Use COLOR PSYCHOLOGY (red=urgency, blue=trust, green=action, yellow=attention, gold=premium)
5. Create VISUAL HIERARCHY (headline → value prop → CTA)
6. Include MARKETING ICONOGRAPHY (badges, ribbons, icons, geometric emphasis)

TEXT HANDLING FOR MARKETING:
- **Headline**: 'text "[ACTION WORD + BENEFIT]" in [extra large] [high-contrast color] [bold] font'
- **Subtext/CTA**: 'smaller text "[CTA]" in [size] [color] font [position]'
- **Placement**: Use top-third for headline, center for value, bottom for CTA
- Keep headline to 3-5 words maximum for impact

MARKETING COLOR STRATEGIES:
- Sale/Urgency: Red background or accents, yellow highlights, high contrast
- Trust/Professional: Blue background, white text, clean layout
- Premium/Luxury: Black/gold/navy, elegant typography, refined design
- Eco/Health: Green accents, natural elements, earthy tones
- Youth/Energy: Vibrant gradients, bold contrasts, dynamic shapes, neon accents
- Modern/Tech: Blue/purple gradients, geometric shapes, contemporary
- Bold/Impact: Bright colors, maximum contrast, large typography

IMPORTANT: Match the style to the marketing message, DON'T default to minimal/clean for everything!
- Sales/Discounts → BOLD, VIBRANT, HIGH CONTRAST, not minimal
- Luxury → Elegant, sophisticated, refined, not minimal
- Youth/Fun → Playful, energetic, colorful, not minimal
- Tech/Modern → Gradient, contemporary, sleek (can be minimal)

RETURN FORMAT:
Output ONLY the raw prompt string on a single line (no markdown, no quotes, no explanations, no preamble)
Start with format + marketing angle (e.g., "Marketing poster, urgent sale promotion...")"#;

/// Brand identity block shared by the gathering prompts.
pub fn brand_context_block(brand: &BrandContext) -> String {
    let or_na = |v: Option<&str>| v.unwrap_or("N/A").to_string();
    format!(
        "BRAND CONTEXT:\n\
         - Name: {}\n\
         - Tagline: {}\n\
         - Description: {}\n\
         - Vision: {}\n\
         - Mission: {}\n\
         - Tone: {}\n\
         - Voice Descriptor: {}\n\
         - Audience: {}\n\
         - Values: {}\n\
         - Colors: {}",
        brand.company_name(),
        or_na(brand.tagline()),
        or_na(brand.description()),
        or_na(brand.vision()),
        or_na(brand.mission()),
        or_na(brand.tone()),
        or_na(brand.voice_descriptor()),
        or_na(brand.audience_description()),
        if brand.values().is_empty() {
            "N/A".to_string()
        } else {
            brand.values().join(", ")
        },
        brand.colors().describe(),
    )
}

/// System prompt for the first turn: list follow-up questions and extract
/// whatever the initial description already says.
pub fn start_system_prompt(brand: &BrandContext, user_description: &str) -> String {
    format!(
        r#"{clarification}

{brand}

User Initial Request: "{description}"

Analyze what information is missing.
Return JSON:
{{
  "questions": ["question1", "question2"],
  "gatheredInfo": {{ "dimensions": "...", "message": "...", "visualStyle": "...", "mood": "...", "keyElements": "...", "targetAudience": "...", "colorPreference": "...", "completeness": 0 }}
}}"#,
        clarification = CLARIFICATION_PROMPT,
        brand = brand_context_block(brand),
        description = user_description,
    )
}

/// System prompt for a gathering turn.
pub fn refine_system_prompt(
    brand: &BrandContext,
    current_info: &GatheredInfo,
    history: &[ConversationTurn],
    questions_asked: usize,
    max_questions: usize,
) -> String {
    format!(
        r#"{clarification}

{brand}

Current Gathered Info: {info}

Conversation History:
{transcript}

You have asked {asked} questions so far.

IMPORTANT RULES:
1. If you have dimensions AND a message/headline, you have ENOUGH information. Mark isReady: true.
2. If the user says "no" or "generate now" or similar, STOP asking questions. Mark isReady: true.
3. Visual style and mood can use smart defaults based on the marketing message.
4. Do NOT ask more than {max} questions total.
5. If you've asked {max} questions already, mark isReady: true regardless.

MINIMUM REQUIRED INFO:
- Dimensions (default to "{default_dimensions}" if not specified)
- Message/Headline (required)

OPTIONAL INFO (use smart defaults if missing):
- Visual Style: Analyze the message to determine appropriate style
  * Sale/Discount → "bold, urgent, high-impact"
  * New/Launch → "modern, fresh, announcement-style"
  * Premium/Luxury → "elegant, sophisticated, luxury design"
  * Fun/Exciting → "vibrant, playful, energetic"
  * Default → "bold, eye-catching, promotional"
- Mood: Match the marketing goal
  * Urgency → "urgent, exciting, action-driven"
  * Premium → "premium, aspirational, refined"
  * Launch → "exciting, innovative, attention-grabbing"
  * Default → "energetic, conversion-focused"
- Key Elements: Always include marketing elements like "bold typography, CTA elements, visual hierarchy"

Return JSON:
{{
  "isReady": boolean,
  "nextQuestion": "string" (ONLY if not ready AND haven't asked {max} questions),
  "updatedInfo": {{
    "dimensions": "width x height or format",
    "message": "main headline/text",
    "visualStyle": "description",
    "mood": "description",
    "keyElements": "elements to include"
  }}
}}"#,
        clarification = CLARIFICATION_PROMPT,
        brand = brand_context_block(brand),
        info = info_json(current_info, false),
        transcript = render_transcript(history),
        asked = questions_asked,
        max = max_questions,
        default_dimensions = DEFAULT_DIMENSIONS,
    )
}

/// System prompt mapping a free-text edit onto the gathered info.
pub fn modify_system_prompt(
    current_info: &GatheredInfo,
    current_prompt: &str,
    edit_request: &str,
) -> String {
    format!(
        r#"You are a design modification expert. The user has a generated poster and wants to make changes.

CURRENT DESIGN INFO:
{info}

CURRENT IMAGE GENERATION PROMPT:
{prompt}

USER'S CHANGE REQUEST:
{request}

Analyze the user's request and update the design info accordingly.

Common requests and how to handle them:
- "Make text bigger/smaller" → adjust typography in keyElements
- "Change color to X" → update visualStyle to mention the color
- "Add/remove element" → update keyElements
- "Make it more/less professional" → update mood
- "Change style" → update visualStyle
- "Add discount/percentage" → update message and keyElements

Return JSON:
{{
  "updatedInfo": {{
    "dimensions": "string",
    "message": "string",
    "visualStyle": "string",
    "mood": "string",
    "keyElements": "string"
  }},
  "explanation": "Brief explanation of what changes you made"
}}"#,
        info = info_json(current_info, true),
        prompt = current_prompt,
        request = edit_request,
    )
}

/// Format descriptor for a dimensions string.
pub fn format_descriptor(dimensions: &str) -> &'static str {
    let lower = dimensions.to_lowercase();
    if dimensions.contains("16:9") || lower.contains("horizontal") {
        "horizontal 16:9 banner"
    } else if dimensions.contains("9:16") || lower.contains("vertical") {
        "vertical 9:16 poster"
    } else if dimensions.contains("1920") || dimensions.contains("1080") {
        "wide horizontal banner"
    } else {
        "square"
    }
}

/// Structured brief sent to the prompt engineer.
pub fn prompt_engineering_input(brand: &BrandContext, info: &GatheredInfo) -> String {
    let message = headline(brand, info);
    let intent = classify_marketing_intent(message);
    let colors = brand.colors();

    format!(
        r#"Create a MARKETING poster with these specifications:

BRAND: {company}
BRAND INDUSTRY/TYPE: {industry}
COLOR PALETTE: {palette}

PRIMARY MESSAGE: "{message}"
(Extract main headline - keep to 3-5 words maximum for impact)

MARKETING GOAL: {goal}
DESIGN STYLE: {style}
MOOD: {mood}
FORMAT: {format}

CONVERSION ELEMENTS TO INCLUDE: {conversion}
ADDITIONAL ELEMENTS: {elements}

COLOR PSYCHOLOGY STRATEGY: {psychology}

MARKETING POSTER REQUIREMENTS:
- This is a MARKETING ADVERTISEMENT, not a photograph or art piece
- Create VISUAL HIERARCHY: Headline → Value Prop → CTA
- Keep headline text SHORT (3-5 words) and ACTION-ORIENTED
- Include a CALL-TO-ACTION element (arrow, button, or text like "Shop Now")
- Use HIGH CONTRAST for readability and impact
- Add marketing elements: badges, ribbons, price tags, urgency indicators
- Use graphic design terms ONLY (no "camera", "lighting", "scene")
- Be CONCISE - under 150 words total
- Focus on CONVERSION and ENGAGEMENT

Generate the marketing poster prompt now."#,
        company = brand.company_name(),
        industry = brand.description().unwrap_or("General business"),
        palette = colors.describe(),
        message = message,
        goal = intent.marketing_goal(),
        style = info.visual_style().unwrap_or("bold, promotional"),
        mood = info.mood().unwrap_or("urgent, engaging, conversion-focused"),
        format = format_descriptor(info.dimensions().unwrap_or(DEFAULT_DIMENSIONS)),
        conversion = intent.conversion_elements().join(", "),
        elements = info.key_elements().unwrap_or("bold typography, clear hierarchy"),
        psychology = intent.color_psychology(colors),
    )
}

/// Deterministic single-line poster prompt. Always non-empty.
pub fn fallback_poster_prompt(brand: &BrandContext, info: &GatheredInfo) -> String {
    let message = headline(brand, info);
    let intent = classify_marketing_intent(message);
    let colors = brand.colors();
    let primary = colors.primary_or_default();
    let secondary = colors.secondary_or_default();
    let highlight = colors.accent().or_else(|| colors.palette().next());

    let style = info.visual_style().unwrap_or("bold promotional");
    let mood = info.mood().unwrap_or("urgent and engaging");
    let format = format_descriptor(info.dimensions().unwrap_or(DEFAULT_DIMENSIONS));

    let mut elements = vec![info.key_elements().unwrap_or("bold typography")];
    elements.extend(fallback_conversion_elements(&intent));

    let color_strategy = if intent.is_promotional() {
        format!(
            "large {} headline text on {} background with {} accents",
            secondary,
            primary,
            highlight.unwrap_or("red")
        )
    } else if intent.launch {
        format!(
            "{} text on {} background with {} highlights",
            secondary,
            primary,
            highlight.unwrap_or("gold")
        )
    } else if let Some(accent) = colors.accent() {
        format!("{} text on {} background with {} accents", secondary, primary, accent)
    } else {
        format!("{} text on {} background", secondary, primary)
    };

    let lower = message.to_lowercase();
    let cta = if lower.contains("shop") || lower.contains("get") {
        ""
    } else {
        ", small text \"Shop Now\" at bottom"
    };

    single_line(&format!(
        "Marketing poster, {} style, large text \"{}\" in extra large bold sans-serif font{}, {}, {}, {} marketing aesthetic, visual hierarchy with top headline, high contrast conversion-focused design, clean {}",
        style,
        short_headline(message),
        cta,
        color_strategy,
        elements.join(", "),
        mood,
        format,
    ))
}

/// Post-processes a model-written poster prompt: drops code-fence lines,
/// keeps the first non-empty line, strips wrapping quotes. Returns `None`
/// when nothing usable remains.
pub fn clean_model_prompt(raw: &str) -> Option<String> {
    let line = raw
        .lines()
        .map(str::trim)
        .filter(|l| !l.starts_with("```"))
        .find(|l| !l.is_empty())?;

    let cleaned = single_line(strip_wrapping_quotes(line));
    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned)
    }
}

/// Removes one pair of matching quotes enclosing the whole line.
fn strip_wrapping_quotes(line: &str) -> &str {
    ['"', '\'']
        .into_iter()
        .find_map(|q| line.strip_prefix(q)?.strip_suffix(q))
        .unwrap_or(line)
}

fn headline<'a>(brand: &'a BrandContext, info: &'a GatheredInfo) -> &'a str {
    info.message().unwrap_or_else(|| {
        let company = brand.company_name().trim();
        if company.is_empty() {
            DEFAULT_MESSAGE
        } else {
            company
        }
    })
}

fn short_headline(message: &str) -> String {
    if message.chars().count() > MAX_FALLBACK_HEADLINE_CHARS {
        let head: String = message.chars().take(MAX_FALLBACK_HEADLINE_CHARS - 3).collect();
        format!("{}...", head)
    } else {
        message.to_string()
    }
}

fn fallback_conversion_elements(intent: &MarketingIntent) -> Vec<&'static str> {
    let mut elements = Vec::new();
    if intent.discount {
        elements.extend(["price tag badge", "sale ribbon"]);
    }
    if intent.urgency {
        elements.extend(["urgency indicator", "red accent highlights"]);
    }
    if intent.launch {
        elements.extend(["NEW badge", "spotlight effect"]);
    }
    elements.extend(["directional arrow", "call-to-action emphasis"]);
    elements
}

/// Collapses every whitespace run, line breaks included, into one space.
fn single_line(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn info_json(info: &GatheredInfo, pretty: bool) -> String {
    let rendered = if pretty {
        serde_json::to_string_pretty(info)
    } else {
        serde_json::to_string(info)
    };
    rendered.unwrap_or_else(|_| "{}".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::brand::BrandColors;
    use crate::domain::foundation::{BrandKitId, UserId};
    use crate::domain::poster::turn::ConversationTurn;
    use proptest::prelude::*;

    fn brand() -> BrandContext {
        BrandContext::new(BrandKitId::new(), UserId::new("owner").unwrap(), "Acme Coffee")
            .unwrap()
            .with_description("Specialty coffee roaster")
            .with_colors(BrandColors {
                primary: Some("#3b2f2f".to_string()),
                secondary: Some("#f5f0e1".to_string()),
                accent: None,
                palette: vec![],
            })
    }

    fn info(message: &str) -> GatheredInfo {
        GatheredInfo {
            dimensions: Some("1024x1024".to_string()),
            message: Some(message.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn format_descriptor_covers_all_formats() {
        assert_eq!(format_descriptor("16:9"), "horizontal 16:9 banner");
        assert_eq!(format_descriptor("Horizontal banner"), "horizontal 16:9 banner");
        assert_eq!(format_descriptor("9:16 story"), "vertical 9:16 poster");
        assert_eq!(format_descriptor("VERTICAL"), "vertical 9:16 poster");
        assert_eq!(format_descriptor("1920x600"), "wide horizontal banner");
        assert_eq!(format_descriptor("1024x1024"), "square");
    }

    #[test]
    fn fallback_for_discount_uses_red_accents_and_cta() {
        let prompt = fallback_poster_prompt(&brand(), &info("50% OFF Summer Sale"));
        assert!(prompt.starts_with("Marketing poster, bold promotional style"));
        assert!(prompt.contains("large text \"50% OFF Summer Sale\""));
        assert!(prompt.contains("small text \"Shop Now\" at bottom"));
        assert!(prompt.contains("large #f5f0e1 headline text on #3b2f2f background with red accents"));
        assert!(prompt.contains("price tag badge, sale ribbon"));
        assert!(prompt.ends_with("clean square"));
    }

    #[test]
    fn fallback_skips_cta_when_message_already_has_one() {
        let prompt = fallback_poster_prompt(&brand(), &info("Shop the new range"));
        assert!(!prompt.contains("\"Shop Now\""));
        assert!(prompt.contains("with gold highlights"));
    }

    #[test]
    fn fallback_truncates_long_headlines() {
        let message = "An extraordinarily long headline that keeps going and going";
        let prompt = fallback_poster_prompt(&brand(), &info(message));
        let expected: String = message.chars().take(37).collect();
        assert!(prompt.contains(&format!("\"{}...\"", expected)));
    }

    #[test]
    fn fallback_uses_company_name_without_message() {
        let prompt = fallback_poster_prompt(&brand(), &GatheredInfo::default());
        assert!(prompt.contains("\"Acme Coffee\""));
    }

    #[test]
    fn fallback_prefers_palette_when_no_accent() {
        let brand = brand().with_colors(BrandColors {
            palette: vec!["#ff2200".to_string()],
            ..Default::default()
        });
        let prompt = fallback_poster_prompt(&brand, &info("Hurry, ends today"));
        assert!(prompt.contains("with #ff2200 accents"));
    }

    #[test]
    fn clean_strips_fences_and_quotes() {
        let raw = "```\n\"Marketing poster, bold style, large text 'SALE'\"\n```";
        assert_eq!(
            clean_model_prompt(raw).as_deref(),
            Some("Marketing poster, bold style, large text 'SALE'")
        );
    }

    #[test]
    fn clean_keeps_quoted_headline_at_end_of_prompt() {
        let raw = "Marketing poster, bold urgent style, large text \"50% OFF\"";
        assert_eq!(clean_model_prompt(raw).as_deref(), Some(raw));
    }

    #[test]
    fn clean_leaves_mismatched_quotes_alone() {
        assert_eq!(
            clean_model_prompt("\"Marketing poster, bold'").as_deref(),
            Some("\"Marketing poster, bold'")
        );
    }

    #[test]
    fn clean_keeps_first_non_empty_line() {
        let raw = "\n\nMarketing poster, vibrant\nHere is why I chose this...";
        assert_eq!(clean_model_prompt(raw).as_deref(), Some("Marketing poster, vibrant"));
    }

    #[test]
    fn clean_rejects_empty_output() {
        assert_eq!(clean_model_prompt("```\n```"), None);
        assert_eq!(clean_model_prompt("  \"\"  "), None);
    }

    #[test]
    fn engineering_input_carries_intent_analysis() {
        let input = prompt_engineering_input(&brand(), &info("Free tasting today"));
        assert!(input.contains("MARKETING GOAL: urgency-driven conversion"));
        assert!(input.contains("FREE badge"));
        assert!(input.contains("BRAND INDUSTRY/TYPE: Specialty coffee roaster"));
        assert!(input.contains("FORMAT: square"));
    }

    #[test]
    fn refine_prompt_reports_question_count_and_transcript() {
        let history = vec![
            ConversationTurn::user("poster please"),
            ConversationTurn::assistant("What size?"),
            ConversationTurn::user("square"),
        ];
        let prompt = refine_system_prompt(&brand(), &GatheredInfo::default(), &history, 1, 3);
        assert!(prompt.contains("You have asked 1 questions so far."));
        assert!(prompt.contains("ASSISTANT: What size?"));
        assert!(prompt.contains("Do NOT ask more than 3 questions total."));
        assert!(prompt.contains("- Name: Acme Coffee"));
    }

    #[test]
    fn modify_prompt_includes_current_prompt_and_request() {
        let prompt = modify_system_prompt(&info("Sale"), "Marketing poster, red", "make it blue");
        assert!(prompt.contains("CURRENT IMAGE GENERATION PROMPT:\nMarketing poster, red"));
        assert!(prompt.contains("USER'S CHANGE REQUEST:\nmake it blue"));
        assert!(prompt.contains("\"message\": \"Sale\""));
    }

    proptest! {
        #[test]
        fn fallback_is_always_single_line_and_non_empty(
            message in "[a-zA-Z0-9%!\\n\\r\\t ]{0,80}",
            style in proptest::option::of("[a-z\\n ]{0,20}"),
        ) {
            let gathered = GatheredInfo {
                message: Some(message),
                visual_style: style,
                ..Default::default()
            };
            let prompt = fallback_poster_prompt(&brand(), &gathered);
            prop_assert!(!prompt.is_empty());
            prop_assert!(!prompt.contains('\n'));
            prop_assert!(!prompt.contains('\r'));
        }

        #[test]
        fn cleaned_model_output_is_single_line(raw in "(```|\"|[a-z ]|\\n|\\r){0,60}") {
            if let Some(cleaned) = clean_model_prompt(&raw) {
                prop_assert!(!cleaned.is_empty());
                prop_assert!(!cleaned.contains('\n'));
                prop_assert!(!cleaned.contains('\r'));
            }
        }
    }
}
