//! Describing an uploaded artwork image with a vision-capable model.

use anyhow::Result;
use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

use crate::config::LlmConfig;
use crate::llm::oracle::{call_ollama_model, call_openai_model, ChatMessage};
use crate::models::ArtworkAnalysis;

const ANALYSIS_PROMPT: &str = "You are an art expert. Analyze the uploaded artwork and describe \
     its theme, colour palette, and emotion briefly. Respond like:\n\
     Theme: <theme>, Colour palette: <palette>, Emotion: <emotion>.";

static LABELLED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(theme|colou?r palette|emotion)\s*:\s*([^,\n]+)")
        .expect("analysis pattern is valid")
});

/// Ask the vision model for theme, palette and emotion of an image.
pub async fn analyze_artwork(
    client: &reqwest::Client,
    config: &LlmConfig,
    image_base64: &str,
    mime: &str,
) -> Result<ArtworkAnalysis> {
    let image_base64 = image_base64.trim();
    if image_base64.is_empty() {
        anyhow::bail!("No image data supplied");
    }

    let text = match config.provider.as_str() {
        "ollama" => {
            let messages = vec![
                ChatMessage::text("system", ANALYSIS_PROMPT),
                ChatMessage {
                    role: "user".to_string(),
                    content: "Analyze this artwork.".to_string(),
                    images: Some(vec![image_base64.to_string()]),
                },
            ];
            call_ollama_model(client, config, &config.vision_model, messages, 0.2).await?
        }
        "openai" => {
            let messages = vec![
                VisionMessage {
                    role: "system",
                    content: vec![ContentPart::Text {
                        text: ANALYSIS_PROMPT.to_string(),
                    }],
                },
                VisionMessage {
                    role: "user",
                    content: vec![
                        ContentPart::Text {
                            text: "Analyze this artwork.".to_string(),
                        },
                        ContentPart::ImageUrl {
                            image_url: ImageUrl {
                                url: format!("data:{mime};base64,{image_base64}"),
                            },
                        },
                    ],
                },
            ];
            call_openai_model(client, config, &config.vision_model, messages, 0.2).await?
        }
        other => anyhow::bail!("Unknown LLM provider: {other}"),
    };

    Ok(parse_analysis(&text))
}

/// Pull the labelled fields out of the reply; whatever is missing stays `None`.
pub fn parse_analysis(text: &str) -> ArtworkAnalysis {
    let mut analysis = ArtworkAnalysis {
        raw: text.trim().to_string(),
        ..ArtworkAnalysis::default()
    };

    for caps in LABELLED.captures_iter(text) {
        let label = caps[1].to_lowercase();
        let value = caps[2].trim().trim_end_matches('.').trim().to_string();
        if value.is_empty() {
            continue;
        }
        let slot = if label == "theme" {
            &mut analysis.theme
        } else if label == "emotion" {
            &mut analysis.emotion
        } else {
            &mut analysis.palette
        };
        if slot.is_none() {
            *slot = Some(value);
        }
    }

    analysis
}

// ─── OpenAI multimodal message ───────────────────────────

#[derive(Serialize)]
struct VisionMessage {
    role: &'static str,
    content: Vec<ContentPart>,
}

#[derive(Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentPart {
    Text { text: String },
    ImageUrl { image_url: ImageUrl },
}

#[derive(Serialize)]
struct ImageUrl {
    url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_expected_format() {
        let a = parse_analysis("Theme: Coastal landscape, Colour palette: Cool blues, Emotion: Calm.");
        assert_eq!(a.theme.as_deref(), Some("Coastal landscape"));
        assert_eq!(a.palette.as_deref(), Some("Cool blues"));
        assert_eq!(a.emotion.as_deref(), Some("Calm"));
    }

    #[test]
    fn test_parse_multiline_and_american_spelling() {
        let a = parse_analysis("**Theme**: Portrait\nColor palette: warm earth tones\nemotion: mysterious");
        assert_eq!(a.palette.as_deref(), Some("warm earth tones"));
        assert_eq!(a.emotion.as_deref(), Some("mysterious"));
    }

    #[test]
    fn test_parse_free_text_keeps_raw_only() {
        let a = parse_analysis("A lovely painting of the sea.");
        assert!(a.theme.is_none());
        assert!(a.palette.is_none());
        assert!(a.emotion.is_none());
        assert_eq!(a.raw, "A lovely painting of the sea.");
    }

    #[test]
    fn test_content_parts_serialize_openai_shape() {
        let part = ContentPart::ImageUrl {
            image_url: ImageUrl {
                url: "data:image/png;base64,AAAA".to_string(),
            },
        };
        let json = serde_json::to_value(&part).unwrap();
        assert_eq!(json["type"], "image_url");
        assert_eq!(json["image_url"]["url"], "data:image/png;base64,AAAA");
    }

    #[tokio::test]
    async fn test_empty_image_rejected() {
        let err = analyze_artwork(&reqwest::Client::new(), &LlmConfig::default(), "  ", "image/png")
            .await
            .unwrap_err();
        assert!(err.to_string().contains("No image"));
    }
}
