//! Deck assembly: slide sequences and output naming.
//!
//! A `DeckSpec` is owned by the assembler until it is written to disk and is
//! never reused across requests.

use crate::catalog::{Catalog, CategoryId};
use crate::compose::{compose, Recommendation, SlideSpec};

pub const DEFAULT_FILENAME: &str = "building_blocks_architecture.pptx";
pub const FILE_EXTENSION: &str = ".pptx";
/// Derived names carry the deck kind, the way the original files were named.
pub const DERIVED_SUFFIX: &str = "_building_blocks.pptx";
const MAX_BASENAME_LEN: usize = 60;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct DeckSpec {
    pub slides: Vec<SlideSpec>,
}

impl DeckSpec {
    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }

    pub fn shape_counts(&self) -> Vec<usize> {
        self.slides.iter().map(SlideSpec::shape_count).collect()
    }
}

/// Single-slide variant: one building-block diagram for the matched
/// categories (the building-block agent behavior).
pub fn building_block_deck(
    catalog: &Catalog,
    categories: &[CategoryId],
    requirements: &str,
) -> DeckSpec {
    let recommendations = categories
        .iter()
        .map(|category| Recommendation::for_category(catalog, *category))
        .collect();
    DeckSpec {
        slides: vec![compose(
            "Solution Architecture Building Blocks",
            recommendations,
            requirements,
        )],
    }
}

/// Multi-slide variant: title slide, one narrative slide per category, then
/// the combined diagram (the original full-deck agent behavior).
pub fn narrative_deck(catalog: &Catalog, categories: &[CategoryId], requirements: &str) -> DeckSpec {
    let mut slides = Vec::with_capacity(categories.len() + 2);

    slides.push(SlideSpec::Title {
        title: "Solution Architecture".to_string(),
        subtitle: summary_line(categories),
    });

    for category in categories {
        let entry = catalog.get(*category);
        let bullets = entry
            .primary
            .iter()
            .chain(entry.supporting.iter())
            .map(|service| (*service).to_string())
            .collect();
        slides.push(SlideSpec::Bullets {
            title: category.display_name().to_string(),
            bullets,
        });
    }

    let recommendations = categories
        .iter()
        .map(|category| Recommendation::for_category(catalog, *category))
        .collect();
    slides.push(compose("Solution Architecture Building Blocks", recommendations, requirements));

    DeckSpec { slides }
}

fn summary_line(categories: &[CategoryId]) -> String {
    let names: Vec<&str> = categories.iter().map(|category| category.display_name()).collect();
    format!("Recommended building blocks: {}", names.join(", "))
}

/// Derives an output filename from request text: non-alphanumeric runs
/// collapse to `_`, the result is truncated and suffixed
/// `_building_blocks.pptx`. Text with no usable characters falls back to the
/// default name.
pub fn derive_filename(requirements: &str) -> String {
    let mut basename = String::new();
    let mut last_was_separator = true;
    for ch in requirements.chars() {
        if ch.is_ascii_alphanumeric() {
            basename.push(ch.to_ascii_lowercase());
            last_was_separator = false;
        } else if !last_was_separator {
            basename.push('_');
            last_was_separator = true;
        }
        if basename.len() >= MAX_BASENAME_LEN {
            break;
        }
    }
    let basename = basename.trim_matches('_');
    if basename.is_empty() {
        DEFAULT_FILENAME.to_string()
    } else {
        format!("{basename}{DERIVED_SUFFIX}")
    }
}

#[cfg(test)]
mod tests {
    use super::{building_block_deck, derive_filename, narrative_deck};
    use crate::catalog::{Catalog, CategoryId};
    use crate::compose::SlideSpec;

    #[test]
    fn building_block_deck_is_single_slide() {
        let catalog = Catalog::builtin();
        let deck = building_block_deck(
            &catalog,
            &[CategoryId::AiAnalytics, CategoryId::WebApplication],
            "analytics with web interface",
        );
        assert_eq!(deck.slide_count(), 1);
        assert!(matches!(deck.slides[0], SlideSpec::BuildingBlocks { .. }));
    }

    #[test]
    fn narrative_deck_brackets_categories_with_title_and_diagram() {
        let catalog = Catalog::builtin();
        let deck = narrative_deck(
            &catalog,
            &[CategoryId::DataPlatform, CategoryId::Security],
            "secure data platform",
        );
        assert_eq!(deck.slide_count(), 4);
        assert!(matches!(deck.slides[0], SlideSpec::Title { .. }));
        assert!(matches!(deck.slides[1], SlideSpec::Bullets { .. }));
        assert!(matches!(deck.slides[3], SlideSpec::BuildingBlocks { .. }));
    }

    #[test]
    fn title_subtitle_lists_display_names() {
        let catalog = Catalog::builtin();
        let deck = narrative_deck(&catalog, &[CategoryId::Security], "x");
        let SlideSpec::Title { subtitle, .. } = &deck.slides[0] else {
            panic!("expected title slide");
        };
        assert!(subtitle.contains("Security"));
    }

    #[test]
    fn filename_derivation_strips_punctuation() {
        assert_eq!(
            derive_filename("AI-powered analytics platform!"),
            "ai_powered_analytics_platform_building_blocks.pptx"
        );
        assert_eq!(derive_filename("???"), "building_blocks_architecture.pptx");
        assert_eq!(derive_filename(""), "building_blocks_architecture.pptx");
    }

    #[test]
    fn filename_is_bounded() {
        let long = "x".repeat(500);
        let name = derive_filename(&long);
        assert!(name.len() <= 60 + super::DERIVED_SUFFIX.len());
    }
}
