//! The constrained agent loop.
//!
//! The model is strictly an orchestrator: it decides which tools to call and
//! in what order, but category matching, slide layout, and file naming are
//! deterministic decisions made by the core. If the endpoint fails or the
//! round cap is reached before a deck is saved, the run falls back to the
//! direct pipeline so a request always produces a file.

use anyhow::Result;

use crate::direct::{self, DeckStyle, Generated};
use crate::llm::{ChatMessage, LlmClient};
use crate::tools::{Session, ToolRegistry};

const SYSTEM_PROMPT: &str = "You are an architecture assistant that builds PowerPoint decks \
from customer requirements. Work only through the provided tools: first call \
analyze_requirements with the customer text, optionally inspect \
get_service_recommendations, then build slides with \
create_building_block_slide (and create_slide for extra narrative slides), \
and finish by calling save_presentation. Reply with a short summary once the \
file is saved.";

pub struct AgentOutcome {
    pub generated: Generated,
    pub summary: String,
    pub used_fallback: bool,
}

pub struct AgentRuntime<C> {
    llm: C,
    registry: ToolRegistry,
    max_rounds: u32,
}

impl<C: LlmClient> AgentRuntime<C> {
    pub fn new(llm: C, max_rounds: u32) -> Self {
        Self { llm, registry: ToolRegistry::builtin(), max_rounds: max_rounds.max(1) }
    }

    pub async fn run(&self, session: &mut Session, requirements: &str) -> Result<AgentOutcome> {
        session.requirements = requirements.to_string();
        let specs = self.registry.specs();
        let mut messages =
            vec![ChatMessage::system(SYSTEM_PROMPT), ChatMessage::user(requirements)];
        let mut summary = None;

        for round in 1..=self.max_rounds {
            let reply = match self.llm.chat(&messages, &specs).await {
                Ok(reply) => reply,
                Err(error) => {
                    tracing::warn!(%error, round, "model call failed, using direct pipeline");
                    break;
                }
            };

            let Some(calls) = reply.tool_calls.clone().filter(|calls| !calls.is_empty()) else {
                summary = reply.content;
                break;
            };

            messages.push(reply);
            for call in calls {
                let arguments = if call.function.arguments.trim().is_empty() {
                    serde_json::Value::Null
                } else {
                    serde_json::from_str(&call.function.arguments)
                        .unwrap_or(serde_json::Value::Null)
                };
                let result = match self
                    .registry
                    .dispatch(&call.function.name, session, arguments)
                    .await
                {
                    Ok(result) => result,
                    // feed the failure back so the model can correct itself
                    Err(error) => {
                        tracing::debug!(tool = %call.function.name, %error, "tool call failed");
                        serde_json::json!({ "error": error.to_string() }).to_string()
                    }
                };
                messages.push(ChatMessage::tool_result(call.id, result));
            }
        }

        match session.saved_path.clone() {
            Some(path) => Ok(AgentOutcome {
                generated: Generated { path, categories: session.categories.clone() },
                summary: summary.unwrap_or_else(|| "Presentation saved.".to_string()),
                used_fallback: false,
            }),
            None => {
                tracing::info!("no presentation saved by the model, generating directly");
                let generated = direct::generate(session, requirements, DeckStyle::Blocks)?;
                Ok(AgentOutcome {
                    summary: format!(
                        "Presentation saved to {} (direct pipeline).",
                        generated.path.display()
                    ),
                    generated,
                    used_fallback: true,
                })
            }
        }
    }
}
