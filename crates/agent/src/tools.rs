//! Tool surface exposed to the model, plus the per-request session state the
//! tools mutate. Every tool returns a JSON string so results can go straight
//! back into the conversation as tool messages.

use std::path::PathBuf;

use anyhow::{anyhow, bail, Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use blockdeck_core::{
    building_block_deck, derive_filename, Catalog, Categorizer, CategoryId, DeckSpec,
    IconResolver, KeywordCategorizer, Recommendation,
};

/// Mutable state for one generation request. The deck under construction
/// lives here between tool calls.
pub struct Session {
    pub catalog: Catalog,
    pub categorizer: KeywordCategorizer,
    pub icons: IconResolver,
    pub output_dir: PathBuf,
    pub requirements: String,
    pub categories: Vec<CategoryId>,
    pub deck: DeckSpec,
    pub saved_path: Option<PathBuf>,
}

impl Session {
    pub fn new(icons: IconResolver, output_dir: PathBuf) -> Self {
        Self {
            catalog: Catalog::builtin(),
            categorizer: KeywordCategorizer::default(),
            icons,
            output_dir,
            requirements: String::new(),
            categories: Vec::new(),
            deck: DeckSpec::default(),
            saved_path: None,
        }
    }

    fn ensure_categories(&mut self) -> &[CategoryId] {
        if self.categories.is_empty() {
            self.categories = self.categorizer.categorize(&self.requirements);
        }
        &self.categories
    }
}

#[async_trait]
pub trait Tool: Send + Sync {
    fn name(&self) -> &'static str;
    fn description(&self) -> &'static str;
    fn parameters(&self) -> serde_json::Value;
    async fn execute(&self, session: &mut Session, arguments: serde_json::Value) -> Result<String>;
}

fn parse_arguments<T: for<'de> Deserialize<'de>>(arguments: serde_json::Value) -> Result<T> {
    serde_json::from_value(arguments).context("invalid tool arguments")
}

struct AnalyzeRequirements;

#[derive(Deserialize)]
struct AnalyzeArgs {
    requirements: String,
}

#[async_trait]
impl Tool for AnalyzeRequirements {
    fn name(&self) -> &'static str {
        "analyze_requirements"
    }

    fn description(&self) -> &'static str {
        "Match customer requirements against the service catalog and return the architecture categories they map to."
    }

    fn parameters(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "requirements": {
                    "type": "string",
                    "description": "Customer requirements in natural language"
                }
            },
            "required": ["requirements"]
        })
    }

    async fn execute(&self, session: &mut Session, arguments: serde_json::Value) -> Result<String> {
        let args: AnalyzeArgs = parse_arguments(arguments)?;
        session.requirements = args.requirements;
        session.categories = session.categorizer.categorize(&session.requirements);
        let names: Vec<&str> =
            session.categories.iter().map(|category| category.display_name()).collect();
        Ok(json!({ "categories": names }).to_string())
    }
}

struct GetServiceRecommendations;

#[async_trait]
impl Tool for GetServiceRecommendations {
    fn name(&self) -> &'static str {
        "get_service_recommendations"
    }

    fn description(&self) -> &'static str {
        "List the recommended primary services for the categories matched so far."
    }

    fn parameters(&self) -> serde_json::Value {
        json!({ "type": "object", "properties": {} })
    }

    async fn execute(&self, session: &mut Session, _arguments: serde_json::Value) -> Result<String> {
        let catalog = session.catalog;
        let recommendations: Vec<serde_json::Value> = session
            .ensure_categories()
            .iter()
            .map(|category| {
                let recommendation = Recommendation::for_category(&catalog, *category);
                json!({
                    "category": recommendation.display_name,
                    "services": recommendation.services,
                })
            })
            .collect();
        Ok(json!({ "recommendations": recommendations }).to_string())
    }
}

struct CreateBuildingBlockSlide;

#[async_trait]
impl Tool for CreateBuildingBlockSlide {
    fn name(&self) -> &'static str {
        "create_building_block_slide"
    }

    fn description(&self) -> &'static str {
        "Replace the working deck with a single building-block architecture diagram for the matched categories."
    }

    fn parameters(&self) -> serde_json::Value {
        json!({ "type": "object", "properties": {} })
    }

    async fn execute(&self, session: &mut Session, _arguments: serde_json::Value) -> Result<String> {
        session.ensure_categories();
        session.deck =
            building_block_deck(&session.catalog, &session.categories, &session.requirements);
        Ok(json!({
            "slides": session.deck.slide_count(),
            "blocks": session.categories.len(),
        })
        .to_string())
    }
}

struct CreateSlide;

#[derive(Deserialize)]
struct CreateSlideArgs {
    title: String,
    #[serde(default)]
    bullets: Vec<String>,
}

#[async_trait]
impl Tool for CreateSlide {
    fn name(&self) -> &'static str {
        "create_slide"
    }

    fn description(&self) -> &'static str {
        "Append a bullet slide with the given title and bullet texts to the working deck."
    }

    fn parameters(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "title": { "type": "string" },
                "bullets": { "type": "array", "items": { "type": "string" } }
            },
            "required": ["title"]
        })
    }

    async fn execute(&self, session: &mut Session, arguments: serde_json::Value) -> Result<String> {
        let args: CreateSlideArgs = parse_arguments(arguments)?;
        session.deck.slides.push(blockdeck_core::SlideSpec::Bullets {
            title: args.title,
            bullets: args.bullets,
        });
        Ok(json!({ "slides": session.deck.slide_count() }).to_string())
    }
}

struct SavePresentation;

#[derive(Deserialize, Default)]
struct SaveArgs {
    #[serde(default)]
    filename: Option<String>,
}

#[async_trait]
impl Tool for SavePresentation {
    fn name(&self) -> &'static str {
        "save_presentation"
    }

    fn description(&self) -> &'static str {
        "Write the working deck to a .pptx file and return its path. Builds the building-block diagram first if the deck is still empty."
    }

    fn parameters(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "filename": {
                    "type": "string",
                    "description": "Optional output filename; derived from the requirements when omitted"
                }
            }
        })
    }

    async fn execute(&self, session: &mut Session, arguments: serde_json::Value) -> Result<String> {
        let args: SaveArgs = if arguments.is_null() {
            SaveArgs::default()
        } else {
            parse_arguments(arguments)?
        };

        if session.deck.slides.is_empty() {
            session.ensure_categories();
            session.deck =
                building_block_deck(&session.catalog, &session.categories, &session.requirements);
        }

        let filename = match args.filename {
            Some(name) if !name.trim().is_empty() => {
                if name.ends_with(blockdeck_core::deck::FILE_EXTENSION) {
                    name
                } else {
                    format!("{name}{}", blockdeck_core::deck::FILE_EXTENSION)
                }
            }
            _ => derive_filename(&session.requirements),
        };
        let path = session.output_dir.join(filename);
        blockdeck_pptx::write_deck(&session.deck, &session.icons, &path)
            .map_err(|error| anyhow!("writing presentation: {error}"))?;
        session.saved_path = Some(path.clone());
        Ok(json!({ "path": path.display().to_string() }).to_string())
    }
}

pub struct ToolRegistry {
    tools: Vec<Box<dyn Tool>>,
}

impl ToolRegistry {
    pub fn builtin() -> Self {
        Self {
            tools: vec![
                Box::new(AnalyzeRequirements),
                Box::new(GetServiceRecommendations),
                Box::new(CreateBuildingBlockSlide),
                Box::new(CreateSlide),
                Box::new(SavePresentation),
            ],
        }
    }

    pub fn specs(&self) -> Vec<crate::llm::ToolSpec> {
        self.tools
            .iter()
            .map(|tool| {
                crate::llm::ToolSpec::function(tool.name(), tool.description(), tool.parameters())
            })
            .collect()
    }

    pub async fn dispatch(
        &self,
        name: &str,
        session: &mut Session,
        arguments: serde_json::Value,
    ) -> Result<String> {
        for tool in &self.tools {
            if tool.name() == name {
                return tool.execute(session, arguments).await;
            }
        }
        bail!("unknown tool `{name}`")
    }
}
