use blockdeck_core::{building_block_deck, narrative_deck, Catalog, CategoryId, IconResolver};

#[test]
fn written_package_reports_spec_counts() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("deck.pptx");

    let catalog = Catalog::builtin();
    let deck = building_block_deck(
        &catalog,
        &[CategoryId::AiAnalytics, CategoryId::WebApplication],
        "AI-powered analytics platform with web interface",
    );

    blockdeck_pptx::write_deck(&deck, &IconResolver::new(None), &path).expect("write");

    let summary = blockdeck_pptx::inspect(&path).expect("inspect");
    assert_eq!(summary.slide_count, deck.slide_count());
    assert_eq!(summary.shape_counts, deck.shape_counts());
    // no icon directory, so everything fell back to glyphs
    assert!(summary.picture_counts.iter().all(|count| *count == 0));
}

#[test]
fn narrative_deck_round_trips() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("narrative.pptx");

    let catalog = Catalog::builtin();
    let deck = narrative_deck(
        &catalog,
        &[CategoryId::DataPlatform, CategoryId::Security],
        "secure data platform",
    );

    blockdeck_pptx::write_deck(&deck, &IconResolver::new(None), &path).expect("write");

    let summary = blockdeck_pptx::inspect(&path).expect("inspect");
    assert_eq!(summary.slide_count, deck.slide_count());
    assert_eq!(summary.shape_counts, deck.shape_counts());
}

#[test]
fn icons_embed_as_pictures() {
    let dir = tempfile::tempdir().expect("tempdir");
    let icon_dir = dir.path().join("icons");
    std::fs::create_dir(&icon_dir).expect("icon dir");
    // 1x1 transparent png
    let png: &[u8] = &[
        0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48,
        0x44, 0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00,
        0x00, 0x1F, 0x15, 0xC4, 0x89, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x44, 0x41, 0x54, 0x78,
        0x9C, 0x62, 0x00, 0x01, 0x00, 0x00, 0x05, 0x00, 0x01, 0x0D, 0x0A, 0x2D, 0xB4, 0x00,
        0x00, 0x00, 0x00, 0x49, 0x45, 0x4E, 0x44, 0xAE, 0x42, 0x60, 0x82,
    ];
    std::fs::write(icon_dir.join("microsoft-entra-id.png"), png).expect("icon");

    let path = dir.path().join("deck.pptx");
    let catalog = Catalog::builtin();
    let deck = building_block_deck(&catalog, &[CategoryId::Security], "identity and compliance");

    blockdeck_pptx::write_deck(&deck, &IconResolver::new(Some(icon_dir)), &path).expect("write");

    let summary = blockdeck_pptx::inspect(&path).expect("inspect");
    // Entra ID is both a primary Security service and a cross-cutting entry.
    assert!(summary.picture_counts[0] >= 2);
    // shape accounting is independent of icon resolution
    assert_eq!(summary.shape_counts, deck.shape_counts());
}

#[test]
fn missing_part_is_reported() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("not-a-package.pptx");

    let mut zip = zip::ZipWriter::new(std::fs::File::create(&path).expect("create"));
    zip.start_file("README.txt", zip::write::SimpleFileOptions::default()).expect("entry");
    std::io::Write::write_all(&mut zip, b"not a presentation").expect("write");
    zip.finish().expect("finish");

    let error = blockdeck_pptx::inspect(&path).expect_err("must fail");
    assert!(matches!(error, blockdeck_pptx::PptxError::MissingPart(_)));
}
