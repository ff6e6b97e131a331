//! Lowers slide specs into placed shapes.
//!
//! Layout constants mirror the composer's inch-based geometry; everything
//! leaves here in EMU.

use blockdeck_core::{DeckSpec, IconRef, IconResolver, Rgb, SlideSpec};

use crate::emu::inches;
use crate::shapes::{
    Align, Geometry, Paragraph, Picture, RenderedDeck, RenderedSlide, Shape, TextRun,
};
use crate::PptxError;

const BLACK: Rgb = Rgb(0, 0, 0);
const STRIP_BOX_WIDTH_IN: f64 = 1.25;
const STRIP_BOX_HEIGHT_IN: f64 = 0.6;
const STRIP_SPACING_IN: f64 = 0.05;
const ICON_SIZE_IN: f64 = 0.3;

pub fn render_deck(deck: &DeckSpec, icons: &IconResolver) -> Result<RenderedDeck, PptxError> {
    let mut rendered = RenderedDeck::default();
    for spec in &deck.slides {
        let slide = match spec {
            SlideSpec::Title { title, subtitle } => render_title(title, subtitle),
            SlideSpec::Bullets { title, bullets } => render_bullets(title, bullets),
            SlideSpec::BuildingBlocks { title, recommendations, cross_cutting, requirements, grid } => {
                render_building_blocks(
                    title,
                    recommendations,
                    cross_cutting,
                    requirements,
                    grid,
                    icons,
                    &mut rendered,
                )
            }
        };
        rendered.slides.push(slide);
    }
    Ok(rendered)
}

fn text_box(
    x_in: f64,
    y_in: f64,
    width_in: f64,
    height_in: f64,
    paragraphs: Vec<Paragraph>,
) -> Shape {
    Shape {
        geometry: Geometry::TextBox,
        fill: None,
        x: inches(x_in),
        y: inches(y_in),
        width: inches(width_in),
        height: inches(height_in),
        paragraphs,
    }
}

fn single(run: TextRun, align: Align) -> Vec<Paragraph> {
    vec![Paragraph { runs: vec![run], align }]
}

fn render_title(title: &str, subtitle: &str) -> RenderedSlide {
    RenderedSlide {
        shapes: vec![
            text_box(0.5, 2.3, 9.0, 1.2, single(TextRun::bold(title, 32), Align::Center)),
            text_box(0.5, 3.7, 9.0, 1.0, single(TextRun::plain(subtitle, 16), Align::Center)),
        ],
        pictures: Vec::new(),
    }
}

fn render_bullets(title: &str, bullets: &[String]) -> RenderedSlide {
    let body = bullets
        .iter()
        .map(|bullet| Paragraph {
            runs: vec![TextRun::plain(format!("\u{2022} {bullet}"), 14)],
            align: Align::Left,
        })
        .collect();
    RenderedSlide {
        shapes: vec![
            text_box(0.5, 0.5, 9.0, 1.0, single(TextRun::bold(title, 24), Align::Center)),
            text_box(0.8, 1.8, 8.4, 5.0, body),
        ],
        pictures: Vec::new(),
    }
}

fn render_building_blocks(
    title: &str,
    recommendations: &[blockdeck_core::Recommendation],
    cross_cutting: &[String],
    requirements: &str,
    grid: &blockdeck_core::GridGeometry,
    icons: &IconResolver,
    rendered: &mut RenderedDeck,
) -> RenderedSlide {
    let mut shapes = Vec::new();
    let mut pictures = Vec::new();

    shapes.push(text_box(0.5, 0.5, 9.0, 1.0, single(TextRun::bold(title, 20), Align::Center)));

    for (index, recommendation) in recommendations.iter().enumerate() {
        let (x_in, y_in) = grid.block_origin(index);
        let mut paragraphs = single(
            TextRun::bold(recommendation.display_name.clone(), 11).white(),
            Align::Center,
        );

        for (service_index, service) in recommendation.services.iter().enumerate() {
            let line = match icons.resolve(service) {
                IconRef::Image(path) => {
                    let media_index = intern_media(rendered, path);
                    pictures.push(Picture {
                        media_index,
                        x: inches(x_in - 0.35),
                        y: inches(y_in + 0.35 + service_index as f64 * 0.35),
                        width: inches(ICON_SIZE_IN),
                        height: inches(ICON_SIZE_IN),
                    });
                    service.clone()
                }
                IconRef::Glyph(glyph) => format!("{glyph} {service}"),
            };
            paragraphs.push(Paragraph {
                runs: vec![TextRun::plain(line, 8).white()],
                align: Align::Left,
            });
        }

        shapes.push(Shape {
            geometry: Geometry::RoundedRectangle,
            fill: Some(recommendation.color),
            x: inches(x_in),
            y: inches(y_in),
            width: inches(grid.block_width_in),
            height: inches(grid.block_height_in),
            paragraphs,
        });
    }

    let strip_y = grid.strip_y_in();
    shapes.push(text_box(
        0.5,
        strip_y - 0.3,
        9.0,
        0.25,
        single(
            TextRun::bold("Cross-cutting Security and Infrastructure Services", 11),
            Align::Center,
        ),
    ));

    for (index, service) in cross_cutting.iter().enumerate() {
        let x_in = 0.5 + index as f64 * (STRIP_BOX_WIDTH_IN + STRIP_SPACING_IN);
        let line = match icons.resolve(service) {
            IconRef::Image(path) => {
                let media_index = intern_media(rendered, path);
                pictures.push(Picture {
                    media_index,
                    x: inches(x_in),
                    y: inches(strip_y - 0.2),
                    width: inches(ICON_SIZE_IN),
                    height: inches(ICON_SIZE_IN),
                });
                service.clone()
            }
            IconRef::Glyph(glyph) => format!("{glyph} {service}"),
        };
        shapes.push(Shape {
            geometry: Geometry::Rectangle,
            fill: Some(BLACK),
            x: inches(x_in),
            y: inches(strip_y),
            width: inches(STRIP_BOX_WIDTH_IN),
            height: inches(STRIP_BOX_HEIGHT_IN),
            paragraphs: single(TextRun::plain(line, 8).white(), Align::Center),
        });
    }

    let footer_y = strip_y + STRIP_BOX_HEIGHT_IN + 0.2;
    shapes.push(text_box(
        0.5,
        footer_y,
        9.0,
        0.5,
        single(TextRun::plain(format!("Requirements: {requirements}"), 10).italic(), Align::Left),
    ));

    RenderedSlide { shapes, pictures }
}

fn intern_media(rendered: &mut RenderedDeck, path: std::path::PathBuf) -> usize {
    if let Some(index) = rendered.media.iter().position(|existing| *existing == path) {
        return index;
    }
    rendered.media.push(path);
    rendered.media.len() - 1
}

#[cfg(test)]
mod tests {
    use blockdeck_core::{building_block_deck, Catalog, CategoryId, IconResolver};

    use super::render_deck;
    use crate::shapes::Geometry;

    fn deck_for(categories: &[CategoryId]) -> blockdeck_core::DeckSpec {
        building_block_deck(&Catalog::builtin(), categories, "test requirements")
    }

    #[test]
    fn shape_count_matches_spec_accounting() {
        let deck = deck_for(&[CategoryId::AiAnalytics, CategoryId::WebApplication]);
        let rendered = render_deck(&deck, &IconResolver::new(None)).expect("render");
        assert_eq!(rendered.slides.len(), 1);
        assert_eq!(rendered.slides[0].shapes.len(), deck.slides[0].shape_count());
    }

    #[test]
    fn glyph_fallback_prefixes_service_text() {
        let deck = deck_for(&[CategoryId::Security]);
        let rendered = render_deck(&deck, &IconResolver::new(None)).expect("render");
        let block = rendered.slides[0]
            .shapes
            .iter()
            .find(|shape| shape.geometry == Geometry::RoundedRectangle)
            .expect("category block");
        // first service of Security is Microsoft Entra ID, glyph 🔐
        let service_line = &block.paragraphs[1].runs[0].text;
        assert!(service_line.starts_with('\u{1F510}'), "got {service_line}");
        assert!(rendered.slides[0].pictures.is_empty());
        assert!(rendered.media.is_empty());
    }

    #[test]
    fn resolved_icons_become_pictures_and_media() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(dir.path().join("microsoft-entra-id.png"), b"\x89PNG").expect("write");

        let deck = deck_for(&[CategoryId::Security]);
        let resolver = IconResolver::new(Some(dir.path().to_path_buf()));
        let rendered = render_deck(&deck, &resolver).expect("render");

        // Entra ID appears both as a primary service and in the cross-cutting
        // strip; media must still be interned once.
        assert_eq!(rendered.media.len(), 1);
        assert!(rendered.slides[0].pictures.len() >= 2);
    }

    #[test]
    fn blocks_carry_category_colors() {
        let deck = deck_for(&[CategoryId::Integration]);
        let rendered = render_deck(&deck, &IconResolver::new(None)).expect("render");
        let block = rendered.slides[0]
            .shapes
            .iter()
            .find(|shape| shape.geometry == Geometry::RoundedRectangle)
            .expect("category block");
        assert_eq!(block.fill, Some(blockdeck_core::Rgb(0xFF, 0x8C, 0x00)));
    }
}
