use std::io::{BufRead, Write};

use blockdeck_agent::{AgentRuntime, DeckStyle, HttpLlmClient, Session};
use blockdeck_core::config::{AppConfig, LoadOptions};
use blockdeck_core::IconResolver;

use super::CommandResult;

pub fn run() -> CommandResult {
    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => return CommandResult::failure("repl", "config", error.to_string(), 2),
    };

    if let Err(error) = std::fs::create_dir_all(&config.output.directory) {
        return CommandResult::failure(
            "repl",
            "output_directory",
            format!("could not create `{}`: {error}", config.output.directory.display()),
            2,
        );
    }

    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    match session_loop(&config, stdin.lock(), &mut stdout) {
        Ok(decks) => CommandResult::success("repl", format!("session ended, {decks} deck(s) generated")),
        Err(error) => CommandResult::failure("repl", "io", format!("{error:#}"), 1),
    }
}

fn session_loop(
    config: &AppConfig,
    input: impl BufRead,
    output: &mut impl Write,
) -> anyhow::Result<usize> {
    writeln!(output, "blockdeck repl: enter requirements, `exit` to leave")?;
    if config.llm.api_key.is_none() {
        writeln!(output, "(no API key configured, running the keyword pipeline)")?;
    }

    let mut decks = 0usize;
    for line in input.lines() {
        let line = line?;
        let requirements = line.trim();
        if requirements.is_empty() {
            continue;
        }
        if ["exit", "quit", "q"].iter().any(|stop| requirements.eq_ignore_ascii_case(stop)) {
            break;
        }

        match generate_one(config, requirements) {
            Ok(message) => {
                decks += 1;
                writeln!(output, "{message}")?;
            }
            Err(error) => writeln!(output, "error: {error:#}")?,
        }
    }
    Ok(decks)
}

// Each line gets a fresh session so decks never leak between requests.
fn generate_one(config: &AppConfig, requirements: &str) -> anyhow::Result<String> {
    let mut session = Session::new(
        IconResolver::new(config.output.icon_dir.clone()),
        config.output.directory.clone(),
    );

    if config.llm.api_key.is_none() {
        let generated = blockdeck_agent::generate(&mut session, requirements, DeckStyle::Blocks)?;
        return Ok(format!("saved `{}`", generated.path.display()));
    }

    let client = HttpLlmClient::from_config(&config.llm)?;
    let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build()?;
    let agent = AgentRuntime::new(client, config.llm.max_tool_rounds);
    let outcome = runtime.block_on(agent.run(&mut session, requirements))?;
    Ok(format!("{} (`{}`)", outcome.summary, outcome.generated.path.display()))
}
