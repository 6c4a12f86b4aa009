use serde::Serialize;

/// Sampling parameters sent with every Gemini request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationSettings {
    pub temperature: f32,
    pub top_p: f32,
    pub top_k: u32,
    pub max_output_tokens: u32,
}

/// Fixed parameters for the `ask` commands. Callers cannot change these.
pub const CHAT_GENERATION: GenerationSettings = GenerationSettings {
    temperature: 0.9,
    top_p: 1.0,
    top_k: 1,
    max_output_tokens: 2048,
};

/// Parameters used by the standalone image generator.
pub const IMAGE_GENERATION: GenerationSettings = GenerationSettings {
    temperature: 0.4,
    top_p: 0.8,
    top_k: 32,
    max_output_tokens: 2048,
};

/// Harm categories understood by the Gemini safety filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HarmCategory {
    #[serde(rename = "HARM_CATEGORY_HARASSMENT")]
    Harassment,
    #[serde(rename = "HARM_CATEGORY_HATE_SPEECH")]
    HateSpeech,
    #[serde(rename = "HARM_CATEGORY_SEXUALLY_EXPLICIT")]
    SexuallyExplicit,
    #[serde(rename = "HARM_CATEGORY_DANGEROUS_CONTENT")]
    DangerousContent,
}

/// How aggressively a category is blocked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HarmBlockThreshold {
    BlockLowAndAbove,
    BlockMediumAndAbove,
    BlockOnlyHigh,
    BlockNone,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SafetySetting {
    pub category: HarmCategory,
    pub threshold: HarmBlockThreshold,
}

/// Safety thresholds applied to every chat request.
pub const CHAT_SAFETY: [SafetySetting; 4] = [
    SafetySetting {
        category: HarmCategory::Harassment,
        threshold: HarmBlockThreshold::BlockMediumAndAbove,
    },
    SafetySetting {
        category: HarmCategory::HateSpeech,
        threshold: HarmBlockThreshold::BlockMediumAndAbove,
    },
    SafetySetting {
        category: HarmCategory::SexuallyExplicit,
        threshold: HarmBlockThreshold::BlockMediumAndAbove,
    },
    SafetySetting {
        category: HarmCategory::DangerousContent,
        threshold: HarmBlockThreshold::BlockMediumAndAbove,
    },
];

/// A decoded image returned by an image-capable model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedImage {
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn safety_settings_serialize_to_api_names() {
        let json = serde_json::to_value(CHAT_SAFETY[1]).unwrap();
        assert_eq!(json["category"], "HARM_CATEGORY_HATE_SPEECH");
        assert_eq!(json["threshold"], "BLOCK_MEDIUM_AND_ABOVE");
    }

    #[test]
    fn chat_safety_covers_every_category_once() {
        let categories: Vec<HarmCategory> = CHAT_SAFETY.iter().map(|s| s.category).collect();
        assert!(categories.contains(&HarmCategory::Harassment));
        assert!(categories.contains(&HarmCategory::HateSpeech));
        assert!(categories.contains(&HarmCategory::SexuallyExplicit));
        assert!(categories.contains(&HarmCategory::DangerousContent));
        assert!(CHAT_SAFETY
            .iter()
            .all(|s| s.threshold == HarmBlockThreshold::BlockMediumAndAbove));
    }
}
