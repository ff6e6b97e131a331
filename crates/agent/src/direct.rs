//! Model-free generation path. Used by `generate --direct`, and as the
//! fallback when the agent loop ends without a saved deck.

use std::path::PathBuf;

use anyhow::{anyhow, Result};

use blockdeck_core::{
    building_block_deck, derive_filename, narrative_deck, Categorizer, CategoryId,
};

use crate::tools::Session;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeckStyle {
    /// Single building-block diagram slide.
    Blocks,
    /// Title slide, one slide per category, then the diagram.
    Narrative,
}

pub struct Generated {
    pub path: PathBuf,
    pub categories: Vec<CategoryId>,
}

pub fn generate(session: &mut Session, requirements: &str, style: DeckStyle) -> Result<Generated> {
    let categories = session.categorizer.categorize(requirements);
    generate_with_categories(session, requirements, categories, style)
}

/// Same emission path with the categories decided elsewhere (the model-backed
/// categorizer).
pub fn generate_with_categories(
    session: &mut Session,
    requirements: &str,
    categories: Vec<CategoryId>,
    style: DeckStyle,
) -> Result<Generated> {
    session.requirements = requirements.to_string();
    session.categories = categories;
    session.deck = match style {
        DeckStyle::Blocks => {
            building_block_deck(&session.catalog, &session.categories, requirements)
        }
        DeckStyle::Narrative => {
            narrative_deck(&session.catalog, &session.categories, requirements)
        }
    };

    let path = session.output_dir.join(derive_filename(requirements));
    blockdeck_pptx::write_deck(&session.deck, &session.icons, &path)
        .map_err(|error| anyhow!("writing presentation: {error}"))?;
    session.saved_path = Some(path.clone());

    Ok(Generated { path, categories: session.categories.clone() })
}

#[cfg(test)]
mod tests {
    use super::{generate, DeckStyle};
    use crate::tools::Session;
    use blockdeck_core::{CategoryId, IconResolver};

    #[test]
    fn blocks_style_writes_single_slide_deck() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut session = Session::new(IconResolver::new(None), dir.path().to_path_buf());
        let generated =
            generate(&mut session, "AI-powered analytics platform", DeckStyle::Blocks)
                .expect("generate");
        assert!(generated.path.exists());
        assert_eq!(generated.categories, vec![CategoryId::AiAnalytics]);
        assert_eq!(session.deck.slide_count(), 1);
    }

    #[test]
    fn narrative_style_adds_title_and_category_slides() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut session = Session::new(IconResolver::new(None), dir.path().to_path_buf());
        generate(&mut session, "secure data platform", DeckStyle::Narrative).expect("generate");
        // title + one per category + diagram
        assert!(session.deck.slide_count() >= 3);
    }

    #[test]
    fn unmatched_requirements_still_produce_a_deck() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut session = Session::new(IconResolver::new(None), dir.path().to_path_buf());
        let generated =
            generate(&mut session, "???", DeckStyle::Blocks).expect("generate");
        assert_eq!(generated.categories, vec![CategoryId::Infrastructure]);
        assert!(generated
            .path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name == "building_blocks_architecture.pptx"));
    }
}
