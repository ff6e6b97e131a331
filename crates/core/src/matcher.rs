//! Keyword-based category matching.
//!
//! The matcher is the deterministic half of the categorizer strategy. A
//! model-backed implementation lives in the agent crate and validates its
//! output against `CategoryId` before use, falling back here when the model
//! answer is unusable.

use std::collections::BTreeSet;

use crate::catalog::{Catalog, CategoryId};

/// Strategy seam for category selection. Implemented by `KeywordCategorizer`
/// here and by the model-backed categorizer in the agent crate.
pub trait Categorizer {
    fn categorize(&self, requirements: &str) -> Vec<CategoryId>;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct KeywordCategorizer {
    catalog: Catalog,
}

struct KeywordRule {
    category: CategoryId,
    keywords: &'static [&'static str],
}

// Architectural-layer phrases come first so multi-word matches are visible in
// traces before single tokens; selection itself is order independent.
static KEYWORD_RULES: [KeywordRule; 8] = [
    KeywordRule {
        category: CategoryId::WebApplication,
        keywords: &["user experience", "ux", "frontend", "application layer", "app layer"],
    },
    KeywordRule {
        category: CategoryId::AiAnalytics,
        keywords: &["data and intelligence", "data intelligence"],
    },
    KeywordRule {
        category: CategoryId::Integration,
        keywords: &["integration layer"],
    },
    KeywordRule {
        category: CategoryId::AiAnalytics,
        keywords: &[
            "ai",
            "analytics",
            "machine learning",
            "ml",
            "data science",
            "openai",
            "chatbot",
            "intelligent",
            "prediction",
        ],
    },
    KeywordRule {
        category: CategoryId::WebApplication,
        keywords: &["web", "website", "portal", "api", "backend", "application", "app"],
    },
    KeywordRule {
        category: CategoryId::DataPlatform,
        keywords: &["database", "data", "storage", "sql", "cosmos", "warehouse", "lake"],
    },
    KeywordRule {
        category: CategoryId::Integration,
        keywords: &["integration", "messaging", "event", "workflow", "automation"],
    },
    KeywordRule {
        category: CategoryId::Security,
        keywords: &[
            "security",
            "authentication",
            "authorization",
            "identity",
            "firewall",
            "compliance",
        ],
    },
];

impl KeywordCategorizer {
    pub fn new(catalog: Catalog) -> Self {
        Self { catalog }
    }

    fn scan(&self, requirements: &str) -> BTreeSet<CategoryId> {
        let normalized = requirements.to_ascii_lowercase();
        let mut matched = BTreeSet::new();
        for rule in &KEYWORD_RULES {
            if rule.keywords.iter().any(|keyword| normalized.contains(keyword)) {
                matched.insert(rule.category);
            }
        }
        matched
    }
}

impl Categorizer for KeywordCategorizer {
    /// Categories are reported in catalog order, never input order. Input
    /// with no recognizable keyword yields the Infrastructure default so a
    /// slide is never empty.
    fn categorize(&self, requirements: &str) -> Vec<CategoryId> {
        let matched = self.scan(requirements);
        if matched.is_empty() {
            tracing::debug!(
                requirements_len = requirements.len(),
                "no category keyword matched, using default"
            );
            return vec![CategoryId::Infrastructure];
        }
        self.catalog.canonical_order(&matched.into_iter().collect::<Vec<_>>())
    }
}

#[cfg(test)]
mod tests {
    use super::{Categorizer, KeywordCategorizer};
    use crate::catalog::{Catalog, CategoryId};

    fn categorize(text: &str) -> Vec<CategoryId> {
        KeywordCategorizer::new(Catalog::builtin()).categorize(text)
    }

    #[test]
    fn known_keyword_selects_its_category() {
        struct Case {
            text: &'static str,
            expect: CategoryId,
        }

        let cases = vec![
            Case { text: "predictive analytics for churn", expect: CategoryId::AiAnalytics },
            Case { text: "customer web portal", expect: CategoryId::WebApplication },
            Case { text: "sql warehouse consolidation", expect: CategoryId::DataPlatform },
            Case { text: "event driven messaging backbone", expect: CategoryId::Integration },
            Case { text: "identity and compliance controls", expect: CategoryId::Security },
        ];

        for (index, case) in cases.iter().enumerate() {
            let result = categorize(case.text);
            assert!(result.contains(&case.expect), "case {index}: {}", case.text);
        }
    }

    #[test]
    fn no_keyword_yields_infrastructure_default() {
        assert_eq!(categorize("lorem ipsum dolor"), vec![CategoryId::Infrastructure]);
        assert_eq!(categorize(""), vec![CategoryId::Infrastructure]);
    }

    #[test]
    fn result_is_catalog_ordered_not_input_ordered() {
        // Security keyword appears before the web keyword in the text.
        let result = categorize("firewall rules in front of the web portal");
        assert_eq!(result, vec![CategoryId::WebApplication, CategoryId::Security]);
    }

    #[test]
    fn analytics_platform_with_web_interface_scenario() {
        let result = categorize("AI-powered analytics platform with web interface");
        assert_eq!(result, vec![CategoryId::AiAnalytics, CategoryId::WebApplication]);
    }

    #[test]
    fn layer_phrases_map_to_layers() {
        let result = categorize(
            "1. User experience layer, 2. Application Layer, 3. Data and intelligence layer, 4. Integration Layer",
        );
        assert_eq!(
            result,
            vec![
                CategoryId::AiAnalytics,
                CategoryId::WebApplication,
                CategoryId::DataPlatform,
                CategoryId::Integration,
            ]
        );
    }

    #[test]
    fn duplicate_triggers_report_category_once() {
        let result = categorize("web website portal app application");
        assert_eq!(result, vec![CategoryId::WebApplication]);
    }
}
