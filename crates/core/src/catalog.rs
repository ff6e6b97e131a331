//! Static service catalog: categories, recommended services, display colors.
//!
//! The catalog is pure data, constructed once at startup and never mutated.
//! `CategoryId`'s declaration order is the catalog order; everything that
//! reports categories sorts by it so slide layout stays deterministic.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryId {
    AiAnalytics,
    WebApplication,
    DataPlatform,
    Integration,
    Security,
    Infrastructure,
}

impl CategoryId {
    pub const ALL: [CategoryId; 6] = [
        CategoryId::AiAnalytics,
        CategoryId::WebApplication,
        CategoryId::DataPlatform,
        CategoryId::Integration,
        CategoryId::Security,
        CategoryId::Infrastructure,
    ];

    pub fn identifier(self) -> &'static str {
        match self {
            Self::AiAnalytics => "ai_analytics",
            Self::WebApplication => "web_application",
            Self::DataPlatform => "data_platform",
            Self::Integration => "integration",
            Self::Security => "security",
            Self::Infrastructure => "infrastructure",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Self::AiAnalytics => "AI & Analytics",
            Self::WebApplication => "Web Application",
            Self::DataPlatform => "Data Platform",
            Self::Integration => "Integration",
            Self::Security => "Security",
            Self::Infrastructure => "Infrastructure",
        }
    }

    /// Parses a loose identifier the way model output arrives: case and
    /// separator insensitive. Unknown strings yield `None` and are dropped
    /// by the caller.
    pub fn parse_loose(raw: &str) -> Option<Self> {
        let normalized: String = raw
            .trim()
            .chars()
            .filter(|ch| ch.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_lowercase();
        match normalized.as_str() {
            "aianalytics" | "aiandanalytics" => Some(Self::AiAnalytics),
            "webapplication" | "webapp" => Some(Self::WebApplication),
            "dataplatform" => Some(Self::DataPlatform),
            "integration" => Some(Self::Integration),
            "security" => Some(Self::Security),
            "infrastructure" => Some(Self::Infrastructure),
            _ => None,
        }
    }
}

/// 24-bit display color.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub fn as_hex(self) -> String {
        format!("{:02X}{:02X}{:02X}", self.0, self.1, self.2)
    }
}

pub const DEFAULT_BLOCK_COLOR: Rgb = Rgb(0x44, 0x44, 0x44);

#[derive(Clone, Debug)]
pub struct ServiceCategory {
    pub id: CategoryId,
    pub primary: &'static [&'static str],
    pub supporting: &'static [&'static str],
    pub color: Rgb,
}

/// Services rendered as the black strip below the block grid on every
/// building-block slide, regardless of matched categories.
pub const CROSS_CUTTING_SERVICES: [&str; 7] = [
    "Azure Policy and Compliance",
    "Azure Firewall and DDoS",
    "Microsoft Sentinel and Defender",
    "Encryption",
    "Azure Monitor",
    "Azure Backup and BCDR",
    "Microsoft Entra ID",
];

static CATEGORIES: [ServiceCategory; 6] = [
    ServiceCategory {
        id: CategoryId::AiAnalytics,
        primary: &["Azure OpenAI", "Microsoft Fabric", "Azure Databricks"],
        supporting: &[
            "Azure AI Services",
            "Azure Synapse Analytics",
            "Azure ML",
            "Power BI",
            "Azure AI Search",
        ],
        color: Rgb(0x8A, 0x2B, 0xE2),
    },
    ServiceCategory {
        id: CategoryId::WebApplication,
        primary: &["Azure Web Apps", "Azure Container Apps", "Azure Kubernetes Service"],
        supporting: &[
            "Azure App Service",
            "Azure Front Door",
            "Azure Application Gateway",
            "Azure Load Balancer",
        ],
        color: Rgb(0x00, 0x78, 0xD4),
    },
    ServiceCategory {
        id: CategoryId::DataPlatform,
        primary: &["Azure SQL Database", "Azure Cosmos DB", "Azure Storage"],
        supporting: &["Azure Data Factory", "Azure Data Lake", "Azure Synapse", "Azure Purview"],
        color: Rgb(0x00, 0xBC, 0x8C),
    },
    ServiceCategory {
        id: CategoryId::Integration,
        primary: &["Azure API Management", "Azure Service Bus", "Azure Logic Apps"],
        supporting: &["Azure Event Grid", "Azure Event Hub", "Function Apps", "Power Automate"],
        color: Rgb(0xFF, 0x8C, 0x00),
    },
    ServiceCategory {
        id: CategoryId::Security,
        primary: &["Microsoft Entra ID", "Azure Key Vault", "Microsoft Sentinel"],
        supporting: &["Azure Firewall", "Microsoft Defender", "Azure Policy", "Azure Monitor"],
        color: Rgb(0xE8, 0x11, 0x23),
    },
    ServiceCategory {
        id: CategoryId::Infrastructure,
        primary: &["Azure Virtual Networks", "Azure Virtual Machines", "Azure Backup"],
        supporting: &["Azure DevOps", "Azure Monitor", "Azure Policy and Compliance"],
        color: Rgb(0x10, 0x6E, 0xBE),
    },
];

#[derive(Clone, Copy, Debug, Default)]
pub struct Catalog;

impl Catalog {
    pub fn builtin() -> Self {
        Self
    }

    pub fn categories(&self) -> &'static [ServiceCategory] {
        &CATEGORIES
    }

    pub fn get(&self, id: CategoryId) -> &'static ServiceCategory {
        // ALL and CATEGORIES share declaration order.
        &CATEGORIES[id as usize]
    }

    pub fn color(&self, id: CategoryId) -> Rgb {
        self.get(id).color
    }

    /// Re-orders and deduplicates an arbitrary category selection into
    /// catalog order.
    pub fn canonical_order(&self, ids: &[CategoryId]) -> Vec<CategoryId> {
        CategoryId::ALL.into_iter().filter(|id| ids.contains(id)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::{Catalog, CategoryId, Rgb};

    #[test]
    fn lookup_matches_declaration_order() {
        let catalog = Catalog::builtin();
        for id in CategoryId::ALL {
            assert_eq!(catalog.get(id).id, id);
        }
    }

    #[test]
    fn colors_come_from_fixed_table() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.color(CategoryId::AiAnalytics), Rgb(0x8A, 0x2B, 0xE2));
        assert_eq!(catalog.color(CategoryId::WebApplication), Rgb(0x00, 0x78, 0xD4));
        assert_eq!(catalog.color(CategoryId::Security), Rgb(0xE8, 0x11, 0x23));
    }

    #[test]
    fn canonical_order_ignores_input_order_and_duplicates() {
        let catalog = Catalog::builtin();
        let ordered = catalog.canonical_order(&[
            CategoryId::Security,
            CategoryId::AiAnalytics,
            CategoryId::Security,
            CategoryId::WebApplication,
        ]);
        assert_eq!(
            ordered,
            vec![CategoryId::AiAnalytics, CategoryId::WebApplication, CategoryId::Security]
        );
    }

    #[test]
    fn loose_parse_accepts_model_style_identifiers() {
        assert_eq!(CategoryId::parse_loose("ai_analytics"), Some(CategoryId::AiAnalytics));
        assert_eq!(CategoryId::parse_loose("Web Application"), Some(CategoryId::WebApplication));
        assert_eq!(CategoryId::parse_loose("DATA-PLATFORM"), Some(CategoryId::DataPlatform));
        assert_eq!(CategoryId::parse_loose("serverless"), None);
    }

    #[test]
    fn every_category_has_three_primary_services() {
        let catalog = Catalog::builtin();
        for category in catalog.categories() {
            assert_eq!(category.primary.len(), 3, "{:?}", category.id);
        }
    }
}
