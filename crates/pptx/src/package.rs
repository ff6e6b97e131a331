//! Zip package assembly.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use zip::write::SimpleFileOptions;
use zip::ZipWriter;

use crate::parts;
use crate::shapes::RenderedDeck;
use crate::PptxError;

pub fn write_package(rendered: &RenderedDeck, path: &Path) -> Result<(), PptxError> {
    let file = File::create(path)?;
    let mut zip = ZipWriter::new(BufWriter::new(file));
    let options = SimpleFileOptions::default();
    let slide_count = rendered.slides.len();

    write_part(
        &mut zip,
        options,
        "[Content_Types].xml",
        &parts::content_types(slide_count, !rendered.media.is_empty()),
    )?;
    write_part(&mut zip, options, "_rels/.rels", &parts::package_rels())?;
    write_part(&mut zip, options, "ppt/presentation.xml", &parts::presentation(slide_count))?;
    write_part(
        &mut zip,
        options,
        "ppt/_rels/presentation.xml.rels",
        &parts::presentation_rels(slide_count),
    )?;
    write_part(&mut zip, options, "ppt/slideMasters/slideMaster1.xml", &parts::slide_master())?;
    write_part(
        &mut zip,
        options,
        "ppt/slideMasters/_rels/slideMaster1.xml.rels",
        &parts::slide_master_rels(),
    )?;
    write_part(&mut zip, options, "ppt/slideLayouts/slideLayout1.xml", &parts::slide_layout())?;
    write_part(
        &mut zip,
        options,
        "ppt/slideLayouts/_rels/slideLayout1.xml.rels",
        &parts::slide_layout_rels(),
    )?;
    write_part(&mut zip, options, "ppt/theme/theme1.xml", &parts::theme())?;

    for (index, slide) in rendered.slides.iter().enumerate() {
        let number = index + 1;
        write_part(&mut zip, options, &format!("ppt/slides/slide{number}.xml"), &parts::slide(slide))?;
        write_part(
            &mut zip,
            options,
            &format!("ppt/slides/_rels/slide{number}.xml.rels"),
            &parts::slide_rels(&slide.pictures),
        )?;
    }

    for (index, media_path) in rendered.media.iter().enumerate() {
        let bytes = std::fs::read(media_path)?;
        zip.start_file(format!("ppt/media/image{}.png", index + 1), options)?;
        zip.write_all(&bytes)?;
    }

    let inner = zip.finish()?;
    inner.into_inner().map_err(|error| error.into_error())?.sync_all()?;
    Ok(())
}

fn write_part<W: Write + std::io::Seek>(
    zip: &mut ZipWriter<W>,
    options: SimpleFileOptions,
    name: &str,
    content: &str,
) -> Result<(), PptxError> {
    zip.start_file(name, options)?;
    zip.write_all(content.as_bytes())?;
    Ok(())
}
