use std::path::PathBuf;

use blockdeck_agent::{
    AgentRuntime, DeckStyle, Generated, HttpLlmClient, ModelCategorizer, Session,
};
use blockdeck_core::config::{AppConfig, ConfigOverrides, LoadOptions};
use blockdeck_core::IconResolver;

use super::CommandResult;
use crate::DeckArg;

pub struct GenerateArgs {
    pub requirements: String,
    pub deck: DeckArg,
    pub direct: bool,
    pub out: Option<PathBuf>,
    pub icons: Option<PathBuf>,
    pub model: Option<String>,
}

pub fn run(args: &GenerateArgs) -> CommandResult {
    let options = LoadOptions {
        overrides: ConfigOverrides {
            output_directory: args.out.clone(),
            icon_dir: args.icons.clone(),
            model: args.model.clone(),
            ..ConfigOverrides::default()
        },
        ..LoadOptions::default()
    };
    let config = match AppConfig::load(options) {
        Ok(config) => config,
        Err(error) => return CommandResult::failure("generate", "config", error.to_string(), 2),
    };

    if let Err(error) = std::fs::create_dir_all(&config.output.directory) {
        return CommandResult::failure(
            "generate",
            "output_directory",
            format!("could not create `{}`: {error}", config.output.directory.display()),
            2,
        );
    }

    let mut session = Session::new(
        IconResolver::new(config.output.icon_dir.clone()),
        config.output.directory.clone(),
    );

    match generate_into(&mut session, &config, args) {
        Ok((generated, message)) => CommandResult::saved("generate", message, &generated.path),
        Err(error) => CommandResult::failure("generate", "generation", format!("{error:#}"), 1),
    }
}

fn generate_into(
    session: &mut Session,
    config: &AppConfig,
    args: &GenerateArgs,
) -> anyhow::Result<(Generated, String)> {
    let style = match args.deck {
        DeckArg::Blocks => DeckStyle::Blocks,
        DeckArg::Narrative => DeckStyle::Narrative,
    };

    if args.direct || config.llm.api_key.is_none() {
        if !args.direct {
            tracing::info!("no API key configured, using the keyword pipeline");
        }
        let generated = blockdeck_agent::generate(session, &args.requirements, style)?;
        let message = summary_line(&generated, "keyword pipeline");
        return Ok((generated, message));
    }

    let client = HttpLlmClient::from_config(&config.llm)?;
    let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build()?;

    match style {
        DeckStyle::Blocks => {
            let agent = AgentRuntime::new(client, config.llm.max_tool_rounds);
            let outcome = runtime.block_on(agent.run(session, &args.requirements))?;
            let message = if outcome.used_fallback {
                summary_line(&outcome.generated, "direct fallback")
            } else {
                outcome.summary
            };
            Ok((outcome.generated, message))
        }
        DeckStyle::Narrative => {
            // Narrative decks are deterministic once the categories are known,
            // so only categorization goes through the model.
            let categorizer = ModelCategorizer::new(client);
            let categories = runtime.block_on(categorizer.categorize(&args.requirements));
            let generated = blockdeck_agent::generate_with_categories(
                session,
                &args.requirements,
                categories,
                style,
            )?;
            let message = summary_line(&generated, "model categorizer");
            Ok((generated, message))
        }
    }
}

fn summary_line(generated: &Generated, via: &str) -> String {
    let names: Vec<&str> =
        generated.categories.iter().map(|category| category.display_name()).collect();
    format!(
        "saved `{}` with blocks: {} ({via})",
        generated.path.display(),
        names.join(", ")
    )
}

#[cfg(test)]
mod tests {
    use super::{run, GenerateArgs};
    use crate::DeckArg;

    fn args(dir: &std::path::Path, requirements: &str) -> GenerateArgs {
        GenerateArgs {
            requirements: requirements.to_string(),
            deck: DeckArg::Blocks,
            direct: true,
            out: Some(dir.to_path_buf()),
            icons: None,
            model: None,
        }
    }

    #[test]
    fn direct_generation_reports_saved_path() {
        let dir = tempfile::tempdir().expect("tempdir");
        let result = run(&args(dir.path(), "customer web portal"));
        assert_eq!(result.exit_code, 0);
        assert!(result.output.contains("customer_web_portal_building_blocks.pptx"));
        assert!(dir.path().join("customer_web_portal_building_blocks.pptx").exists());
    }

    #[test]
    fn narrative_direct_generation_succeeds() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut generate_args = args(dir.path(), "secure data platform");
        generate_args.deck = DeckArg::Narrative;
        let result = run(&generate_args);
        assert_eq!(result.exit_code, 0);
        assert!(result.output.contains("Data Platform"));
    }
}
