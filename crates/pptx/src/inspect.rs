//! Reopens a written package and counts what is in it. Used by the round-trip
//! tests and by `doctor` to verify emitted files without a PowerPoint install.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use quick_xml::events::Event;
use quick_xml::Reader;
use zip::result::ZipError;
use zip::ZipArchive;

use crate::PptxError;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PackageSummary {
    pub slide_count: usize,
    /// `<p:sp>` elements per slide, in slide order.
    pub shape_counts: Vec<usize>,
    /// `<p:pic>` elements per slide, in slide order.
    pub picture_counts: Vec<usize>,
}

pub fn inspect_package(path: &Path) -> Result<PackageSummary, PptxError> {
    let mut archive = ZipArchive::new(File::open(path)?)?;

    let presentation = read_part(&mut archive, "ppt/presentation.xml")?;
    let slide_count = count_elements(&presentation, "p:sldId")?;

    let mut shape_counts = Vec::with_capacity(slide_count);
    let mut picture_counts = Vec::with_capacity(slide_count);
    for index in 1..=slide_count {
        let slide = read_part(&mut archive, &format!("ppt/slides/slide{index}.xml"))?;
        shape_counts.push(count_elements(&slide, "p:sp")?);
        picture_counts.push(count_elements(&slide, "p:pic")?);
    }

    Ok(PackageSummary { slide_count, shape_counts, picture_counts })
}

fn read_part<R: Read + std::io::Seek>(
    archive: &mut ZipArchive<R>,
    name: &str,
) -> Result<String, PptxError> {
    let mut part = archive.by_name(name).map_err(|error| match error {
        ZipError::FileNotFound => PptxError::MissingPart(name.to_owned()),
        other => PptxError::Zip(other),
    })?;
    let mut content = String::new();
    part.read_to_string(&mut content)?;
    Ok(content)
}

fn count_elements(xml: &str, element: &str) -> Result<usize, PptxError> {
    let mut reader = Reader::from_str(xml);
    let mut count = 0;
    loop {
        match reader.read_event()? {
            Event::Start(start) if start.name().as_ref() == element.as_bytes() => count += 1,
            Event::Empty(empty) if empty.name().as_ref() == element.as_bytes() => count += 1,
            Event::Eof => break,
            _ => {}
        }
    }
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::count_elements;

    #[test]
    fn counts_start_and_empty_forms() {
        let xml = "<root><p:sp><a:t>x</a:t></p:sp><p:sp/><p:spPr/></root>";
        assert_eq!(count_elements(xml, "p:sp").expect("count"), 2);
        assert_eq!(count_elements(xml, "p:pic").expect("count"), 0);
    }
}
