//! XML part construction for the presentation package.
//!
//! The master/layout/theme trio is fixed boilerplate (every slide is built on
//! the blank layout, exactly as the original decks were); presentation.xml,
//! the relationship parts, and the slide parts are generated per deck.

use quick_xml::escape::escape;

use crate::emu::{points_hundredths, SLIDE_HEIGHT_EMU, SLIDE_WIDTH_EMU};
use crate::shapes::{Align, Geometry, Paragraph, Picture, RenderedSlide, Shape};

const XML_DECL: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>";
const NS_A: &str = "http://schemas.openxmlformats.org/drawingml/2006/main";
const NS_P: &str = "http://schemas.openxmlformats.org/presentationml/2006/main";
const NS_R: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
const NS_REL: &str = "http://schemas.openxmlformats.org/package/2006/relationships";

/// Minimal append-only XML buffer. Text and attribute values go through
/// quick-xml's escaping; element structure is fixed and trusted.
struct Xml {
    buffer: String,
}

impl Xml {
    fn new() -> Self {
        Self { buffer: String::from(XML_DECL) }
    }

    fn open(&mut self, tag: &str) -> &mut Self {
        self.buffer.push('<');
        self.buffer.push_str(tag);
        self.buffer.push('>');
        self
    }

    fn open_with(&mut self, tag: &str, attrs: &[(&str, &str)]) -> &mut Self {
        self.buffer.push('<');
        self.buffer.push_str(tag);
        for (name, value) in attrs {
            self.buffer.push(' ');
            self.buffer.push_str(name);
            self.buffer.push_str("=\"");
            self.buffer.push_str(&escape(value));
            self.buffer.push('"');
        }
        self.buffer.push('>');
        self
    }

    fn empty(&mut self, tag: &str, attrs: &[(&str, &str)]) -> &mut Self {
        self.buffer.push('<');
        self.buffer.push_str(tag);
        for (name, value) in attrs {
            self.buffer.push(' ');
            self.buffer.push_str(name);
            self.buffer.push_str("=\"");
            self.buffer.push_str(&escape(value));
            self.buffer.push('"');
        }
        self.buffer.push_str("/>");
        self
    }

    fn text(&mut self, value: &str) -> &mut Self {
        self.buffer.push_str(&escape(value));
        self
    }

    fn close(&mut self, tag: &str) -> &mut Self {
        self.buffer.push_str("</");
        self.buffer.push_str(tag);
        self.buffer.push('>');
        self
    }

    fn finish(self) -> String {
        self.buffer
    }
}

pub fn content_types(slide_count: usize, has_png: bool) -> String {
    let mut xml = Xml::new();
    xml.open_with(
        "Types",
        &[("xmlns", "http://schemas.openxmlformats.org/package/2006/content-types")],
    );
    xml.empty(
        "Default",
        &[
            ("Extension", "rels"),
            ("ContentType", "application/vnd.openxmlformats-package.relationships+xml"),
        ],
    );
    xml.empty("Default", &[("Extension", "xml"), ("ContentType", "application/xml")]);
    if has_png {
        xml.empty("Default", &[("Extension", "png"), ("ContentType", "image/png")]);
    }
    override_part(
        &mut xml,
        "/ppt/presentation.xml",
        "application/vnd.openxmlformats-officedocument.presentationml.presentation.main+xml",
    );
    override_part(
        &mut xml,
        "/ppt/slideMasters/slideMaster1.xml",
        "application/vnd.openxmlformats-officedocument.presentationml.slideMaster+xml",
    );
    override_part(
        &mut xml,
        "/ppt/slideLayouts/slideLayout1.xml",
        "application/vnd.openxmlformats-officedocument.presentationml.slideLayout+xml",
    );
    override_part(
        &mut xml,
        "/ppt/theme/theme1.xml",
        "application/vnd.openxmlformats-officedocument.theme+xml",
    );
    for index in 1..=slide_count {
        override_part(
            &mut xml,
            &format!("/ppt/slides/slide{index}.xml"),
            "application/vnd.openxmlformats-officedocument.presentationml.slide+xml",
        );
    }
    xml.close("Types");
    xml.finish()
}

fn override_part(xml: &mut Xml, part_name: &str, content_type: &str) {
    xml.empty("Override", &[("PartName", part_name), ("ContentType", content_type)]);
}

pub fn package_rels() -> String {
    let mut xml = Xml::new();
    xml.open_with("Relationships", &[("xmlns", NS_REL)]);
    xml.empty(
        "Relationship",
        &[
            ("Id", "rId1"),
            (
                "Type",
                "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument",
            ),
            ("Target", "ppt/presentation.xml"),
        ],
    );
    xml.close("Relationships");
    xml.finish()
}

pub fn presentation(slide_count: usize) -> String {
    let mut xml = Xml::new();
    xml.open_with("p:presentation", &[("xmlns:a", NS_A), ("xmlns:r", NS_R), ("xmlns:p", NS_P)]);
    xml.open("p:sldMasterIdLst");
    xml.empty("p:sldMasterId", &[("id", "2147483648"), ("r:id", "rId1")]);
    xml.close("p:sldMasterIdLst");
    if slide_count > 0 {
        xml.open("p:sldIdLst");
        for index in 0..slide_count {
            let id = (256 + index).to_string();
            let rid = format!("rId{}", index + 2);
            xml.empty("p:sldId", &[("id", &id), ("r:id", &rid)]);
        }
        xml.close("p:sldIdLst");
    }
    let width = SLIDE_WIDTH_EMU.to_string();
    let height = SLIDE_HEIGHT_EMU.to_string();
    xml.empty("p:sldSz", &[("cx", &width), ("cy", &height)]);
    xml.empty("p:notesSz", &[("cx", &height), ("cy", &width)]);
    xml.close("p:presentation");
    xml.finish()
}

pub fn presentation_rels(slide_count: usize) -> String {
    let mut xml = Xml::new();
    xml.open_with("Relationships", &[("xmlns", NS_REL)]);
    xml.empty(
        "Relationship",
        &[
            ("Id", "rId1"),
            (
                "Type",
                "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideMaster",
            ),
            ("Target", "slideMasters/slideMaster1.xml"),
        ],
    );
    for index in 0..slide_count {
        let rid = format!("rId{}", index + 2);
        let target = format!("slides/slide{}.xml", index + 1);
        xml.empty(
            "Relationship",
            &[
                ("Id", &rid),
                ("Type", "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide"),
                ("Target", &target),
            ],
        );
    }
    xml.close("Relationships");
    xml.finish()
}

pub fn slide_rels(pictures: &[Picture]) -> String {
    let mut xml = Xml::new();
    xml.open_with("Relationships", &[("xmlns", NS_REL)]);
    xml.empty(
        "Relationship",
        &[
            ("Id", "rId1"),
            (
                "Type",
                "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideLayout",
            ),
            ("Target", "../slideLayouts/slideLayout1.xml"),
        ],
    );
    // One relationship per referenced media part; duplicates collapse.
    let mut seen = Vec::new();
    for picture in pictures {
        if seen.contains(&picture.media_index) {
            continue;
        }
        seen.push(picture.media_index);
        let rid = format!("rId{}", media_rid(picture.media_index));
        let target = format!("../media/image{}.png", picture.media_index + 1);
        xml.empty(
            "Relationship",
            &[
                ("Id", &rid),
                ("Type", "http://schemas.openxmlformats.org/officeDocument/2006/relationships/image"),
                ("Target", &target),
            ],
        );
    }
    xml.close("Relationships");
    xml.finish()
}

/// Media relationship ids start after the layout relationship.
fn media_rid(media_index: usize) -> usize {
    media_index + 2
}

pub fn slide(rendered: &RenderedSlide) -> String {
    let mut xml = Xml::new();
    xml.open_with("p:sld", &[("xmlns:a", NS_A), ("xmlns:r", NS_R), ("xmlns:p", NS_P)]);
    xml.open("p:cSld");
    xml.open("p:spTree");

    xml.open("p:nvGrpSpPr");
    xml.empty("p:cNvPr", &[("id", "1"), ("name", "")]);
    xml.empty("p:cNvGrpSpPr", &[]);
    xml.empty("p:nvPr", &[]);
    xml.close("p:nvGrpSpPr");
    xml.open("p:grpSpPr");
    xml.open("a:xfrm");
    xml.empty("a:off", &[("x", "0"), ("y", "0")]);
    xml.empty("a:ext", &[("cx", "0"), ("cy", "0")]);
    xml.empty("a:chOff", &[("x", "0"), ("y", "0")]);
    xml.empty("a:chExt", &[("cx", "0"), ("cy", "0")]);
    xml.close("a:xfrm");
    xml.close("p:grpSpPr");

    let mut next_id = 2u32;
    for shape in &rendered.shapes {
        write_shape(&mut xml, shape, next_id);
        next_id += 1;
    }
    for picture in &rendered.pictures {
        write_picture(&mut xml, picture, next_id);
        next_id += 1;
    }

    xml.close("p:spTree");
    xml.close("p:cSld");
    xml.open("p:clrMapOvr");
    xml.empty("a:masterClrMapping", &[]);
    xml.close("p:clrMapOvr");
    xml.close("p:sld");
    xml.finish()
}

fn write_shape(xml: &mut Xml, shape: &Shape, id: u32) {
    let id_text = id.to_string();
    let name = match shape.geometry {
        Geometry::TextBox => format!("TextBox {id}"),
        _ => format!("Block {id}"),
    };

    xml.open("p:sp");
    xml.open("p:nvSpPr");
    xml.empty("p:cNvPr", &[("id", &id_text), ("name", &name)]);
    if shape.geometry == Geometry::TextBox {
        xml.empty("p:cNvSpPr", &[("txBox", "1")]);
    } else {
        xml.empty("p:cNvSpPr", &[]);
    }
    xml.empty("p:nvPr", &[]);
    xml.close("p:nvSpPr");

    xml.open("p:spPr");
    write_transform(xml, shape.x, shape.y, shape.width, shape.height);
    let preset = match shape.geometry {
        Geometry::RoundedRectangle => "roundRect",
        Geometry::Rectangle | Geometry::TextBox => "rect",
    };
    xml.open_with("a:prstGeom", &[("prst", preset)]);
    xml.empty("a:avLst", &[]);
    xml.close("a:prstGeom");
    match shape.fill {
        Some(color) => {
            xml.open("a:solidFill");
            xml.empty("a:srgbClr", &[("val", &color.as_hex())]);
            xml.close("a:solidFill");
        }
        None => {
            xml.empty("a:noFill", &[]);
        }
    }
    xml.close("p:spPr");

    xml.open("p:txBody");
    xml.empty("a:bodyPr", &[("wrap", "square"), ("rtlCol", "0")]);
    xml.empty("a:lstStyle", &[]);
    for paragraph in &shape.paragraphs {
        write_paragraph(xml, paragraph);
    }
    xml.close("p:txBody");
    xml.close("p:sp");
}

fn write_paragraph(xml: &mut Xml, paragraph: &Paragraph) {
    xml.open("a:p");
    let align = match paragraph.align {
        Align::Left => "l",
        Align::Center => "ctr",
    };
    xml.empty("a:pPr", &[("algn", align)]);
    for run in &paragraph.runs {
        xml.open("a:r");
        let size = points_hundredths(run.size_pt).to_string();
        let mut attrs: Vec<(&str, &str)> = vec![("lang", "en-US"), ("sz", &size)];
        if run.bold {
            attrs.push(("b", "1"));
        }
        if run.italic {
            attrs.push(("i", "1"));
        }
        match run.color {
            Some(color) => {
                xml.open_with("a:rPr", &attrs);
                xml.open("a:solidFill");
                xml.empty("a:srgbClr", &[("val", &color.as_hex())]);
                xml.close("a:solidFill");
                xml.close("a:rPr");
            }
            None => {
                xml.empty("a:rPr", &attrs);
            }
        }
        xml.open("a:t");
        xml.text(&run.text);
        xml.close("a:t");
        xml.close("a:r");
    }
    xml.close("a:p");
}

fn write_picture(xml: &mut Xml, picture: &Picture, id: u32) {
    let id_text = id.to_string();
    let name = format!("Icon {id}");
    let rid = format!("rId{}", media_rid(picture.media_index));

    xml.open("p:pic");
    xml.open("p:nvPicPr");
    xml.empty("p:cNvPr", &[("id", &id_text), ("name", &name)]);
    xml.open("p:cNvPicPr");
    xml.empty("a:picLocks", &[("noChangeAspect", "1")]);
    xml.close("p:cNvPicPr");
    xml.empty("p:nvPr", &[]);
    xml.close("p:nvPicPr");
    xml.open("p:blipFill");
    xml.empty("a:blip", &[("r:embed", &rid)]);
    xml.open("a:stretch");
    xml.empty("a:fillRect", &[]);
    xml.close("a:stretch");
    xml.close("p:blipFill");
    xml.open("p:spPr");
    write_transform(xml, picture.x, picture.y, picture.width, picture.height);
    xml.open_with("a:prstGeom", &[("prst", "rect")]);
    xml.empty("a:avLst", &[]);
    xml.close("a:prstGeom");
    xml.close("p:spPr");
    xml.close("p:pic");
}

fn write_transform(xml: &mut Xml, x: i64, y: i64, width: i64, height: i64) {
    let x = x.to_string();
    let y = y.to_string();
    let width = width.to_string();
    let height = height.to_string();
    xml.open("a:xfrm");
    xml.empty("a:off", &[("x", &x), ("y", &y)]);
    xml.empty("a:ext", &[("cx", &width), ("cy", &height)]);
    xml.close("a:xfrm");
}

pub fn slide_master() -> String {
    let mut xml = Xml::new();
    xml.open_with("p:sldMaster", &[("xmlns:a", NS_A), ("xmlns:r", NS_R), ("xmlns:p", NS_P)]);
    xml.open("p:cSld");
    xml.open("p:spTree");
    xml.open("p:nvGrpSpPr");
    xml.empty("p:cNvPr", &[("id", "1"), ("name", "")]);
    xml.empty("p:cNvGrpSpPr", &[]);
    xml.empty("p:nvPr", &[]);
    xml.close("p:nvGrpSpPr");
    xml.open("p:grpSpPr");
    xml.empty("a:xfrm", &[]);
    xml.close("p:grpSpPr");
    xml.close("p:spTree");
    xml.close("p:cSld");
    xml.empty(
        "p:clrMap",
        &[
            ("bg1", "lt1"),
            ("tx1", "dk1"),
            ("bg2", "lt2"),
            ("tx2", "dk2"),
            ("accent1", "accent1"),
            ("accent2", "accent2"),
            ("accent3", "accent3"),
            ("accent4", "accent4"),
            ("accent5", "accent5"),
            ("accent6", "accent6"),
            ("hlink", "hlink"),
            ("folHlink", "folHlink"),
        ],
    );
    xml.open("p:sldLayoutIdLst");
    xml.empty("p:sldLayoutId", &[("id", "2147483649"), ("r:id", "rId1")]);
    xml.close("p:sldLayoutIdLst");
    xml.close("p:sldMaster");
    xml.finish()
}

pub fn slide_master_rels() -> String {
    let mut xml = Xml::new();
    xml.open_with("Relationships", &[("xmlns", NS_REL)]);
    xml.empty(
        "Relationship",
        &[
            ("Id", "rId1"),
            (
                "Type",
                "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideLayout",
            ),
            ("Target", "../slideLayouts/slideLayout1.xml"),
        ],
    );
    xml.empty(
        "Relationship",
        &[
            ("Id", "rId2"),
            ("Type", "http://schemas.openxmlformats.org/officeDocument/2006/relationships/theme"),
            ("Target", "../theme/theme1.xml"),
        ],
    );
    xml.close("Relationships");
    xml.finish()
}

pub fn slide_layout() -> String {
    let mut xml = Xml::new();
    xml.open_with(
        "p:sldLayout",
        &[("xmlns:a", NS_A), ("xmlns:r", NS_R), ("xmlns:p", NS_P), ("type", "blank")],
    );
    xml.open("p:cSld");
    xml.open("p:spTree");
    xml.open("p:nvGrpSpPr");
    xml.empty("p:cNvPr", &[("id", "1"), ("name", "")]);
    xml.empty("p:cNvGrpSpPr", &[]);
    xml.empty("p:nvPr", &[]);
    xml.close("p:nvGrpSpPr");
    xml.open("p:grpSpPr");
    xml.empty("a:xfrm", &[]);
    xml.close("p:grpSpPr");
    xml.close("p:spTree");
    xml.close("p:cSld");
    xml.open("p:clrMapOvr");
    xml.empty("a:masterClrMapping", &[]);
    xml.close("p:clrMapOvr");
    xml.close("p:sldLayout");
    xml.finish()
}

pub fn slide_layout_rels() -> String {
    let mut xml = Xml::new();
    xml.open_with("Relationships", &[("xmlns", NS_REL)]);
    xml.empty(
        "Relationship",
        &[
            ("Id", "rId1"),
            (
                "Type",
                "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideMaster",
            ),
            ("Target", "../slideMasters/slideMaster1.xml"),
        ],
    );
    xml.close("Relationships");
    xml.finish()
}

pub fn theme() -> String {
    let mut xml = Xml::new();
    xml.open_with("a:theme", &[("xmlns:a", NS_A), ("name", "Blockdeck")]);
    xml.open("a:themeElements");

    xml.open_with("a:clrScheme", &[("name", "Blockdeck")]);
    for (slot, value) in [
        ("a:dk1", "000000"),
        ("a:lt1", "FFFFFF"),
        ("a:dk2", "44546A"),
        ("a:lt2", "E7E6E6"),
        ("a:accent1", "0078D4"),
        ("a:accent2", "8A2BE2"),
        ("a:accent3", "00BC8C"),
        ("a:accent4", "FF8C00"),
        ("a:accent5", "E81123"),
        ("a:accent6", "106EBE"),
        ("a:hlink", "0563C1"),
        ("a:folHlink", "954F72"),
    ] {
        xml.open(slot);
        if slot == "a:dk1" || slot == "a:lt1" {
            let preset = if slot == "a:dk1" { "windowText" } else { "window" };
            xml.empty("a:sysClr", &[("val", preset), ("lastClr", value)]);
        } else {
            xml.empty("a:srgbClr", &[("val", value)]);
        }
        xml.close(slot);
    }
    xml.close("a:clrScheme");

    xml.open_with("a:fontScheme", &[("name", "Blockdeck")]);
    for slot in ["a:majorFont", "a:minorFont"] {
        xml.open(slot);
        xml.empty("a:latin", &[("typeface", "Segoe UI")]);
        xml.empty("a:ea", &[("typeface", "")]);
        xml.empty("a:cs", &[("typeface", "")]);
        xml.close(slot);
    }
    xml.close("a:fontScheme");

    xml.open_with("a:fmtScheme", &[("name", "Blockdeck")]);
    xml.open("a:fillStyleLst");
    for _ in 0..3 {
        solid_scheme_fill(&mut xml);
    }
    xml.close("a:fillStyleLst");
    xml.open("a:lnStyleLst");
    for _ in 0..3 {
        xml.open_with("a:ln", &[("w", "9525")]);
        solid_scheme_fill(&mut xml);
        xml.close("a:ln");
    }
    xml.close("a:lnStyleLst");
    xml.open("a:effectStyleLst");
    for _ in 0..3 {
        xml.open("a:effectStyle");
        xml.empty("a:effectLst", &[]);
        xml.close("a:effectStyle");
    }
    xml.close("a:effectStyleLst");
    xml.open("a:bgFillStyleLst");
    for _ in 0..3 {
        solid_scheme_fill(&mut xml);
    }
    xml.close("a:bgFillStyleLst");
    xml.close("a:fmtScheme");

    xml.close("a:themeElements");
    xml.close("a:theme");
    xml.finish()
}

fn solid_scheme_fill(xml: &mut Xml) {
    xml.open("a:solidFill");
    xml.empty("a:schemeClr", &[("val", "phClr")]);
    xml.close("a:solidFill");
}

#[cfg(test)]
mod tests {
    use crate::shapes::{Align, Geometry, Paragraph, RenderedSlide, Shape, TextRun};

    #[test]
    fn content_types_lists_every_slide() {
        let xml = super::content_types(3, false);
        assert!(xml.contains("/ppt/slides/slide1.xml"));
        assert!(xml.contains("/ppt/slides/slide3.xml"));
        assert!(!xml.contains("image/png"));
    }

    #[test]
    fn content_types_declares_png_only_with_media() {
        assert!(super::content_types(1, true).contains("image/png"));
    }

    #[test]
    fn presentation_links_master_then_slides() {
        let xml = super::presentation(2);
        assert!(xml.contains("r:id=\"rId1\""));
        assert!(xml.contains("r:id=\"rId2\""));
        assert!(xml.contains("r:id=\"rId3\""));
        assert!(xml.contains("cx=\"9144000\""));
    }

    #[test]
    fn slide_xml_escapes_text() {
        let slide = RenderedSlide {
            shapes: vec![Shape {
                geometry: Geometry::TextBox,
                fill: None,
                x: 0,
                y: 0,
                width: 914_400,
                height: 914_400,
                paragraphs: vec![Paragraph {
                    runs: vec![TextRun::plain("A <B> & C", 10)],
                    align: Align::Left,
                }],
            }],
            pictures: Vec::new(),
        };
        let xml = super::slide(&slide);
        assert!(xml.contains("A &lt;B&gt; &amp; C"));
        assert!(!xml.contains("A <B> & C"));
    }

    #[test]
    fn shape_ids_are_unique_and_start_after_group() {
        let shape = Shape {
            geometry: Geometry::Rectangle,
            fill: None,
            x: 0,
            y: 0,
            width: 1,
            height: 1,
            paragraphs: Vec::new(),
        };
        let slide =
            RenderedSlide { shapes: vec![shape.clone(), shape], pictures: Vec::new() };
        let xml = super::slide(&slide);
        assert!(xml.contains("id=\"2\""));
        assert!(xml.contains("id=\"3\""));
    }
}
