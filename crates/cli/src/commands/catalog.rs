use blockdeck_core::{Catalog, CROSS_CUTTING_SERVICES};
use serde::Serialize;

#[derive(Debug, Serialize)]
struct CatalogEntry {
    identifier: &'static str,
    display_name: &'static str,
    color: String,
    primary: Vec<&'static str>,
    supporting: Vec<&'static str>,
}

#[derive(Debug, Serialize)]
struct CatalogReport {
    categories: Vec<CatalogEntry>,
    cross_cutting: Vec<&'static str>,
}

pub fn run(json_output: bool) -> String {
    let report = build_report();

    if json_output {
        return serde_json::to_string_pretty(&report).unwrap_or_else(|error| {
            format!("{{\"error\":\"catalog serialization failed: {}\"}}", error)
        });
    }

    render_human(&report)
}

fn build_report() -> CatalogReport {
    let catalog = Catalog::builtin();
    let categories = catalog
        .categories()
        .iter()
        .map(|category| CatalogEntry {
            identifier: category.id.identifier(),
            display_name: category.id.display_name(),
            color: category.color.as_hex(),
            primary: category.primary.to_vec(),
            supporting: category.supporting.to_vec(),
        })
        .collect();
    CatalogReport { categories, cross_cutting: CROSS_CUTTING_SERVICES.to_vec() }
}

fn render_human(report: &CatalogReport) -> String {
    let mut lines = Vec::new();
    for entry in &report.categories {
        lines.push(format!("{} ({}, #{})", entry.display_name, entry.identifier, entry.color));
        lines.push(format!("  primary:    {}", entry.primary.join(", ")));
        if !entry.supporting.is_empty() {
            lines.push(format!("  supporting: {}", entry.supporting.join(", ")));
        }
    }
    lines.push(format!("cross-cutting strip: {}", report.cross_cutting.join(", ")));
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::run;

    #[test]
    fn human_output_lists_all_categories_and_strip() {
        let output = run(false);
        assert!(output.contains("AI & Analytics"));
        assert!(output.contains("Infrastructure"));
        assert!(output.contains("cross-cutting strip:"));
    }

    #[test]
    fn json_output_parses_back() {
        let output = run(true);
        let value: serde_json::Value = serde_json::from_str(&output).expect("json");
        assert_eq!(value["categories"].as_array().map(Vec::len), Some(6));
        assert_eq!(value["cross_cutting"].as_array().map(Vec::len), Some(7));
    }
}
