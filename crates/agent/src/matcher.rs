//! Model-backed category selection.
//!
//! The model is asked for category identifiers only; everything it returns is
//! validated against `CategoryId` and unknown names are dropped. An empty or
//! unparseable answer falls back to the keyword matcher, so categorization
//! never fails and never returns an identifier outside the catalog.

use blockdeck_core::{Catalog, Categorizer, CategoryId, KeywordCategorizer};

use crate::llm::{ChatMessage, LlmClient};

pub struct ModelCategorizer<C> {
    llm: C,
    catalog: Catalog,
    fallback: KeywordCategorizer,
}

impl<C: LlmClient> ModelCategorizer<C> {
    pub fn new(llm: C) -> Self {
        let catalog = Catalog::builtin();
        Self { llm, catalog, fallback: KeywordCategorizer::new(catalog) }
    }

    fn prompt() -> String {
        let identifiers: Vec<&str> =
            CategoryId::ALL.iter().map(|category| category.identifier()).collect();
        format!(
            "Classify the customer requirements into architecture categories. \
             Respond with a JSON array of identifiers, chosen only from: {}. \
             Respond with the array and nothing else.",
            identifiers.join(", ")
        )
    }

    pub async fn categorize(&self, requirements: &str) -> Vec<CategoryId> {
        let messages = [ChatMessage::system(Self::prompt()), ChatMessage::user(requirements)];
        let answer = match self.llm.chat(&messages, &[]).await {
            Ok(reply) => reply.content.unwrap_or_default(),
            Err(error) => {
                tracing::warn!(%error, "categorization call failed, using keyword matcher");
                return self.fallback.categorize(requirements);
            }
        };

        let matched = parse_identifiers(&answer);
        if matched.is_empty() {
            tracing::debug!(answer_len = answer.len(), "model answer unusable, using keyword matcher");
            return self.fallback.categorize(requirements);
        }
        self.catalog.canonical_order(&matched)
    }
}

/// Accepts a JSON string array or a loose comma/newline separated list.
fn parse_identifiers(answer: &str) -> Vec<CategoryId> {
    let trimmed = answer.trim().trim_start_matches("```json").trim_matches('`').trim();
    if let Ok(names) = serde_json::from_str::<Vec<String>>(trimmed) {
        return names.iter().filter_map(|name| CategoryId::parse_loose(name)).collect();
    }
    trimmed
        .split(|ch: char| ch == ',' || ch == '\n')
        .filter_map(CategoryId::parse_loose)
        .collect()
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::{parse_identifiers, ModelCategorizer};
    use crate::llm::{AgentError, ChatMessage, LlmClient, ToolSpec};
    use blockdeck_core::CategoryId;

    struct FixedAnswer(&'static str);

    #[async_trait]
    impl LlmClient for FixedAnswer {
        async fn chat(
            &self,
            _: &[ChatMessage],
            _: &[ToolSpec],
        ) -> Result<ChatMessage, AgentError> {
            Ok(ChatMessage::system(self.0))
        }
    }

    struct Unreachable;

    #[async_trait]
    impl LlmClient for Unreachable {
        async fn chat(
            &self,
            _: &[ChatMessage],
            _: &[ToolSpec],
        ) -> Result<ChatMessage, AgentError> {
            Err(AgentError::Protocol("dns failure".to_string()))
        }
    }

    #[test]
    fn json_array_parses_and_drops_unknowns() {
        let parsed = parse_identifiers(r#"["ai_analytics", "flux_capacitor", "security"]"#);
        assert_eq!(parsed, vec![CategoryId::AiAnalytics, CategoryId::Security]);
    }

    #[test]
    fn loose_list_parses() {
        let parsed = parse_identifiers("web_application, data_platform");
        assert_eq!(parsed, vec![CategoryId::WebApplication, CategoryId::DataPlatform]);
    }

    #[tokio::test]
    async fn model_answer_is_canonically_ordered() {
        let categorizer =
            ModelCategorizer::new(FixedAnswer(r#"["security", "ai_analytics"]"#));
        let result = categorizer.categorize("anything").await;
        assert_eq!(result, vec![CategoryId::AiAnalytics, CategoryId::Security]);
    }

    #[tokio::test]
    async fn garbage_answer_falls_back_to_keywords() {
        let categorizer = ModelCategorizer::new(FixedAnswer("I cannot help with that."));
        let result = categorizer.categorize("customer web portal").await;
        assert_eq!(result, vec![CategoryId::WebApplication]);
    }

    #[tokio::test]
    async fn transport_failure_falls_back_to_keywords() {
        let categorizer = ModelCategorizer::new(Unreachable);
        let result = categorizer.categorize("identity and compliance").await;
        assert_eq!(result, vec![CategoryId::Security]);
    }
}
