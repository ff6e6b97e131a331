//! Service icon resolution.
//!
//! An optional asset directory may hold PNG icons named after services.
//! Resolution probes a few filename conventions and degrades to a Unicode
//! glyph on any miss; it never fails, missing assets cost visual quality only.

use std::path::{Path, PathBuf};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum IconRef {
    Image(PathBuf),
    Glyph(&'static str),
}

pub const DEFAULT_GLYPH: &str = "\u{1F527}"; // 🔧

static GLYPHS: [(&str, &str); 24] = [
    ("Azure Web Apps", "\u{1F310}"),
    ("Azure Container Apps", "\u{1F4E6}"),
    ("Azure Kubernetes Service", "\u{2699}"),
    ("Azure Front Door", "\u{1F6AA}"),
    ("Azure OpenAI", "\u{1F916}"),
    ("Microsoft Fabric", "\u{1F9E9}"),
    ("Azure Databricks", "\u{1F4CA}"),
    ("Azure AI Services", "\u{1F9E0}"),
    ("Azure SQL Database", "\u{1F5C4}"),
    ("Azure Cosmos DB", "\u{1F30C}"),
    ("Azure Storage", "\u{1F4BE}"),
    ("Azure Data Factory", "\u{1F3ED}"),
    ("Azure API Management", "\u{1F50C}"),
    ("Azure Service Bus", "\u{1F68C}"),
    ("Azure Logic Apps", "\u{26A1}"),
    ("Azure Event Grid", "\u{1F4CB}"),
    ("Microsoft Entra ID", "\u{1F510}"),
    ("Azure Key Vault", "\u{1F511}"),
    ("Microsoft Sentinel", "\u{1F6E1}"),
    ("Azure Firewall and DDoS", "\u{1F525}"),
    ("Azure Monitor", "\u{1F4CA}"),
    ("Azure Virtual Networks", "\u{1F310}"),
    ("Azure Virtual Machines", "\u{1F5A5}"),
    ("Azure Backup and BCDR", "\u{1F4BE}"),
];

#[derive(Clone, Debug, Default)]
pub struct IconResolver {
    asset_dir: Option<PathBuf>,
}

impl IconResolver {
    /// `asset_dir` is optional; `None` (or a missing directory) means every
    /// lookup resolves to a glyph.
    pub fn new(asset_dir: Option<PathBuf>) -> Self {
        Self { asset_dir }
    }

    pub fn resolve(&self, service: &str) -> IconRef {
        if let Some(dir) = &self.asset_dir {
            if let Some(path) = probe(dir, service) {
                return IconRef::Image(path);
            }
        }
        IconRef::Glyph(glyph_for(service))
    }
}

pub fn glyph_for(service: &str) -> &'static str {
    GLYPHS
        .iter()
        .find(|(name, _)| *name == service)
        .map(|(_, glyph)| *glyph)
        .unwrap_or(DEFAULT_GLYPH)
}

fn probe(dir: &Path, service: &str) -> Option<PathBuf> {
    let lower = service.to_ascii_lowercase();
    let candidates = [
        format!("{}.png", lower.replace(' ', "-")),
        format!("{}.png", lower.replace(' ', "_")),
        format!("{lower}.png"),
    ];
    for candidate in candidates {
        let path = dir.join(candidate);
        if path.is_file() {
            tracing::debug!(icon = %path.display(), service, "icon asset resolved");
            return Some(path);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::{IconRef, IconResolver, DEFAULT_GLYPH};

    #[test]
    fn missing_directory_falls_back_to_glyph() {
        let resolver = IconResolver::new(Some("/nonexistent/icon/dir".into()));
        assert_eq!(resolver.resolve("Azure Key Vault"), IconRef::Glyph("\u{1F511}"));
    }

    #[test]
    fn unknown_service_gets_default_glyph() {
        let resolver = IconResolver::new(None);
        assert_eq!(resolver.resolve("Contoso Quantum Service"), IconRef::Glyph(DEFAULT_GLYPH));
    }

    #[test]
    fn hyphen_convention_resolves_first() {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::write(dir.path().join("azure-key-vault.png"), b"png").expect("write");
        fs::write(dir.path().join("azure_key_vault.png"), b"png").expect("write");

        let resolver = IconResolver::new(Some(dir.path().to_path_buf()));
        match resolver.resolve("Azure Key Vault") {
            IconRef::Image(path) => {
                assert!(path.ends_with("azure-key-vault.png"));
            }
            IconRef::Glyph(_) => panic!("expected image resolution"),
        }
    }

    #[test]
    fn underscore_convention_is_second_choice() {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::write(dir.path().join("azure_key_vault.png"), b"png").expect("write");

        let resolver = IconResolver::new(Some(dir.path().to_path_buf()));
        assert!(matches!(resolver.resolve("Azure Key Vault"), IconRef::Image(_)));
    }
}
