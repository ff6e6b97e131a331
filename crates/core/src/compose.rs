//! Slide composition: turns matched categories into layout descriptions.
//!
//! Composition is pure. The pptx crate walks the resulting `SlideSpec`s and
//! issues the actual shape placement; nothing here touches the filesystem.

use crate::catalog::{Catalog, CategoryId, Rgb, CROSS_CUTTING_SERVICES};

/// Hard cap on primary services rendered inside one block.
pub const MAX_PRIMARY_PER_BLOCK: usize = 3;

/// Legibility guideline only. Composition never rejects larger input; the
/// grid shrinks block dimensions instead.
pub const ADVISORY_MAX_BLOCKS: usize = 6;

#[derive(Clone, Debug, PartialEq)]
pub struct Recommendation {
    pub category: CategoryId,
    pub display_name: String,
    pub services: Vec<String>,
    pub color: Rgb,
}

impl Recommendation {
    /// Builds the display subset for a category: top primary services,
    /// capped at `MAX_PRIMARY_PER_BLOCK`.
    pub fn for_category(catalog: &Catalog, category: CategoryId) -> Self {
        let entry = catalog.get(category);
        Self {
            category,
            display_name: category.display_name().to_string(),
            services: entry
                .primary
                .iter()
                .take(MAX_PRIMARY_PER_BLOCK)
                .map(|service| (*service).to_string())
                .collect(),
            color: entry.color,
        }
    }
}

/// Block grid measurements in inches, scaled to a 10 x 7.5 in page.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridGeometry {
    pub columns: usize,
    pub rows: usize,
    pub block_width_in: f64,
    pub block_height_in: f64,
    pub spacing_x_in: f64,
    pub spacing_y_in: f64,
    pub start_x_in: f64,
    pub start_y_in: f64,
}

impl GridGeometry {
    pub fn for_block_count(count: usize) -> Self {
        let (columns, block_width_in, block_height_in) = match count {
            0..=3 => (count.max(1), 2.8, 2.0),
            4..=6 => (3, 2.5, 1.8),
            _ => (3, 2.2, 1.5),
        };
        Self {
            columns,
            rows: count.div_ceil(columns),
            block_width_in,
            block_height_in,
            spacing_x_in: 0.3,
            spacing_y_in: 0.4,
            start_x_in: 0.5,
            start_y_in: 1.8,
        }
    }

    /// Top-left corner of block `index` in inches.
    pub fn block_origin(&self, index: usize) -> (f64, f64) {
        let column = index % self.columns;
        let row = index / self.columns;
        (
            self.start_x_in + column as f64 * (self.block_width_in + self.spacing_x_in),
            self.start_y_in + row as f64 * (self.block_height_in + self.spacing_y_in),
        )
    }

    /// Y position of the cross-cutting strip, below the last grid row.
    pub fn strip_y_in(&self) -> f64 {
        self.start_y_in + self.rows as f64 * (self.block_height_in + self.spacing_y_in) + 0.3
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum SlideSpec {
    /// Centered title with a subtitle summary line (multi-slide deck only).
    Title { title: String, subtitle: String },
    /// Simple title-and-bullets narrative slide.
    Bullets { title: String, bullets: Vec<String> },
    /// The building-block diagram: colored category blocks over a
    /// cross-cutting strip and a requirements footer.
    BuildingBlocks {
        title: String,
        recommendations: Vec<Recommendation>,
        cross_cutting: Vec<String>,
        requirements: String,
        grid: GridGeometry,
    },
}

impl SlideSpec {
    /// Number of shapes the renderer will place for this spec. Kept next to
    /// the spec so the round-trip property has one source of truth.
    pub fn shape_count(&self) -> usize {
        match self {
            // title placeholder + subtitle placeholder
            Self::Title { .. } => 2,
            // title box + one body box
            Self::Bullets { .. } => 2,
            Self::BuildingBlocks { recommendations, cross_cutting, .. } => {
                // title box + blocks + strip header + strip boxes + footer
                1 + recommendations.len() + 1 + cross_cutting.len() + 1
            }
        }
    }
}

/// `compose(title, recommendations, requirements_text)` from the component
/// contract: computes grid geometry and packages the layout description.
pub fn compose(
    title: impl Into<String>,
    recommendations: Vec<Recommendation>,
    requirements: impl Into<String>,
) -> SlideSpec {
    let grid = GridGeometry::for_block_count(recommendations.len());
    if recommendations.len() > ADVISORY_MAX_BLOCKS {
        tracing::warn!(
            blocks = recommendations.len(),
            advisory = ADVISORY_MAX_BLOCKS,
            "block count exceeds legibility guideline"
        );
    }
    SlideSpec::BuildingBlocks {
        title: title.into(),
        recommendations,
        cross_cutting: CROSS_CUTTING_SERVICES.iter().map(|service| (*service).to_string()).collect(),
        requirements: requirements.into(),
        grid,
    }
}
