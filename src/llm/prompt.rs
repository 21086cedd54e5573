use crate::models::ArtworkRecord;

/// Most recommendations the curator prompt will ever ask for.
pub const MAX_RECOMMENDATIONS: usize = 5;

/// Shape of the curator prompt.
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    /// Role and ground rules sent as the system message
    pub system: String,
    /// Numbered entries requested, clamped to `1..=MAX_RECOMMENDATIONS`
    pub recommendations: usize,
    /// List tags, suburb, price and artist next to each title
    pub include_details: bool,
}

impl Default for PromptTemplate {
    fn default() -> Self {
        Self {
            system: "You are an expert art curator for a local art group. \
                     Match the buyer's request with the highest precision, using exact \
                     words or close synonyms. Evaluate artworks by title first, then tags, \
                     then what the artwork depicts (objects, scenes, colours, mood, \
                     landmarks), and only fall back to logical inference when nothing \
                     matches directly. If the request names a place or scene, prefer \
                     artworks depicting it or similar environments."
                .to_string(),
            recommendations: MAX_RECOMMENDATIONS,
            include_details: true,
        }
    }
}

impl PromptTemplate {
    /// User message: the buyer's request, the candidate list and the strict
    /// numbered output format the parser expects.
    pub fn render(&self, query: &str, catalogue: &[ArtworkRecord]) -> String {
        let k = self.recommendations.clamp(1, MAX_RECOMMENDATIONS);

        let listing: Vec<String> = catalogue
            .iter()
            .map(|a| {
                if self.include_details {
                    catalogue_line(a)
                } else {
                    format!("- {}", a.title)
                }
            })
            .collect();

        let format_lines: String = (1..=k)
            .map(|n| format!("{n}. <Artwork Title> – <one short reason>\n"))
            .collect();

        format!(
            "The buyer request is: \"{query}\"\n\n\
             Available artworks:\n{}\n\n\
             Recommend up to {k} artworks from this list, most relevant first. \
             Use the titles exactly as listed. Give one short sentence per artwork. \
             Do not add greetings or any other text.\n\
             Output format (strict):\n{format_lines}",
            listing.join("\n"),
        )
    }
}

fn catalogue_line(a: &ArtworkRecord) -> String {
    let price = a
        .price
        .map(|p| format!("{p}"))
        .unwrap_or_else(|| a.price_range.clone());
    format!(
        "- {} (tags: {}, suburb: {}, price: {}, artist: {})",
        a.title,
        a.tags.join(", "),
        a.suburb,
        price,
        a.artist
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalogue() -> Vec<ArtworkRecord> {
        vec![
            ArtworkRecord::new("Beach View", "Artist 1")
                .with_tags(["ocean", "calm"])
                .with_suburb("Bondi")
                .with_price(450.0),
            ArtworkRecord::new("Monalisa", "Artist 4"),
        ]
    }

    #[test]
    fn test_render_lists_every_title_with_details() {
        let prompt = PromptTemplate::default().render("calm ocean", &catalogue());
        assert!(prompt.contains("\"calm ocean\""));
        assert!(prompt.contains("- Beach View (tags: ocean, calm, suburb: Bondi, price: 450, artist: Artist 1)"));
        assert!(prompt.contains("- Monalisa (tags: , suburb: , price: , artist: Artist 4)"));
    }

    #[test]
    fn test_render_titles_only() {
        let template = PromptTemplate {
            include_details: false,
            ..PromptTemplate::default()
        };
        let prompt = template.render("x", &catalogue());
        assert!(prompt.contains("- Beach View\n"));
        assert!(!prompt.contains("tags:"));
    }

    #[test]
    fn test_render_caps_recommendations() {
        let template = PromptTemplate {
            recommendations: 12,
            ..PromptTemplate::default()
        };
        let prompt = template.render("x", &catalogue());
        assert!(prompt.contains("5. <Artwork Title>"));
        assert!(!prompt.contains("6. <Artwork Title>"));
        assert!(prompt.contains("up to 5 artworks"));
    }
}
