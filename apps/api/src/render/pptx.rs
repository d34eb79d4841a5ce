//! PowerPoint backend — lays a generated deck out as a widescreen
//! PresentationML package.
//!
//! Slide sequence is fixed: title slide, table of contents, one slide per
//! content entry, key-takeaways summary, thank-you slide. All geometry is
//! expressed in inches on a 13.33in x 7.5in canvas and converted to EMU at
//! serialization time. Images arrive as data URIs and are embedded as
//! package media; any other URL form is ignored.

use std::fmt::Write;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::Deserialize;
use tracing::debug;

use crate::errors::AppError;
use crate::models::{PresentationContent, SlideContent, TeamMember};
use crate::render::ooxml::{emu, xml_escape, zip_package, PackagePart};
use crate::render::theme::{Palette, SlideTemplate};
use crate::render::{sanitize_stem, truncate_text, RenderedDocument};

/// Widescreen canvas, exact EMU per the PresentationML defaults.
const SLIDE_W_EMU: i64 = 12_192_000;
const SLIDE_H_EMU: i64 = 6_858_000;

const MAX_POINTS_PER_SLIDE: usize = 5;
const SUMMARY_SLIDE_LIMIT: usize = 6;

const FONT: &str = "Arial";

/// Deck-level metadata supplied alongside the generated content.
#[derive(Debug, Clone, Deserialize)]
pub struct DeckMeta {
    pub team_members: Vec<TeamMember>,
    pub subject_name: String,
    pub professor_name: Option<String>,
    pub college_name: String,
    pub department_name: Option<String>,
    pub university_logo: Option<String>,
    pub topic: String,
    pub template: SlideTemplate,
}

// ─────────────────────────────────────────────────────────────────────────────
// Slide element model
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Align {
    Left,
    Center,
    Right,
}

impl Align {
    fn val(self) -> &'static str {
        match self {
            Align::Left => "l",
            Align::Center => "ctr",
            Align::Right => "r",
        }
    }
}

#[derive(Debug, Clone)]
enum Element {
    /// Filled rectangle, coordinates in inches.
    Rect {
        x: f64,
        y: f64,
        w: f64,
        h: f64,
        fill: String,
    },
    Text {
        text: String,
        x: f64,
        y: f64,
        w: f64,
        h: f64,
        /// Points.
        size: u32,
        color: String,
        bold: bool,
        align: Align,
        middle: bool,
    },
    /// References deck media by relationship id assigned during assembly.
    Picture {
        rel_id: String,
        x: f64,
        y: f64,
        w: f64,
        h: f64,
    },
}

fn rect(x: f64, y: f64, w: f64, h: f64, fill: &str) -> Element {
    Element::Rect {
        x,
        y,
        w,
        h,
        fill: fill.to_string(),
    }
}

#[allow(clippy::too_many_arguments)]
fn text(text: impl Into<String>, x: f64, y: f64, w: f64, h: f64, size: u32, color: &str) -> Element {
    Element::Text {
        text: text.into(),
        x,
        y,
        w,
        h,
        size,
        color: color.to_string(),
        bold: false,
        align: Align::Left,
        middle: false,
    }
}

fn bold(element: Element) -> Element {
    match element {
        Element::Text { text, x, y, w, h, size, color, align, middle, .. } => Element::Text {
            text,
            x,
            y,
            w,
            h,
            size,
            color,
            bold: true,
            align,
            middle,
        },
        other => other,
    }
}

fn aligned(element: Element, align: Align) -> Element {
    match element {
        Element::Text { text, x, y, w, h, size, color, bold, middle, .. } => Element::Text {
            text,
            x,
            y,
            w,
            h,
            size,
            color,
            bold,
            align,
            middle,
        },
        other => other,
    }
}

fn middled(element: Element) -> Element {
    match element {
        Element::Text { text, x, y, w, h, size, color, bold, align, .. } => Element::Text {
            text,
            x,
            y,
            w,
            h,
            size,
            color,
            bold,
            align,
            middle: true,
        },
        other => other,
    }
}

/// One slide: its elements plus any embedded media (rel id, extension, bytes).
#[derive(Debug, Default)]
struct Slide {
    elements: Vec<Element>,
    media: Vec<(String, &'static str, Vec<u8>)>,
}

impl Slide {
    fn push(&mut self, element: Element) {
        self.elements.push(element);
    }

    /// Embeds a data-URI image and returns its relationship id, or None when
    /// the URI is not an embeddable data URI.
    fn embed_image(&mut self, uri: &str) -> Option<String> {
        let (ext, bytes) = decode_data_uri(uri)?;
        let rel_id = format!("rId{}", 2 + self.media.len());
        self.media.push((rel_id.clone(), ext, bytes));
        Some(rel_id)
    }
}

fn decode_data_uri(uri: &str) -> Option<(&'static str, Vec<u8>)> {
    let rest = uri.strip_prefix("data:")?;
    let (mime, payload) = rest.split_once(";base64,")?;
    let ext = match mime {
        "image/jpeg" | "image/jpg" => "jpeg",
        _ => "png",
    };
    let bytes = BASE64.decode(payload.trim()).ok()?;
    Some((ext, bytes))
}

// ─────────────────────────────────────────────────────────────────────────────
// Slide builders
// ─────────────────────────────────────────────────────────────────────────────

fn title_slide(meta: &DeckMeta, content: &PresentationContent, palette: &Palette) -> Slide {
    let mut slide = Slide::default();

    slide.push(rect(0.0, 0.0, 13.333, 7.5, palette.dark_bg));
    slide.push(rect(0.0, 0.0, 0.4, 7.5, palette.secondary));
    slide.push(rect(0.4, 6.8, 13.0, 0.7, palette.primary));

    if let Some(logo) = meta.university_logo.as_deref() {
        if let Some(rel_id) = slide.embed_image(logo) {
            slide.push(Element::Picture {
                rel_id,
                x: 11.5,
                y: 0.4,
                w: 1.5,
                h: 1.5,
            });
        }
    }

    let title = if content.title.is_empty() {
        &meta.topic
    } else {
        &content.title
    };
    slide.push(bold(text(title, 1.0, 2.0, 11.0, 1.5, 44, palette.text_light)));
    slide.push(rect(1.0, 3.6, 4.0, 0.08, palette.secondary));

    let names = meta
        .team_members
        .iter()
        .map(|m| m.name.as_str())
        .collect::<Vec<_>>()
        .join("  |  ");
    let ids = meta
        .team_members
        .iter()
        .map(|m| m.id.as_str())
        .collect::<Vec<_>>()
        .join("  |  ");
    slide.push(bold(text(names, 1.0, 4.0, 11.0, 0.5, 18, palette.text_light)));
    slide.push(text(ids, 1.0, 4.5, 11.0, 0.4, 14, "A0A0A0"));

    let college = match meta.department_name.as_deref() {
        Some(dept) => format!("{}  \u{2022}  {}", meta.college_name, dept),
        None => meta.college_name.clone(),
    };
    slide.push(text(college, 1.0, 5.2, 11.0, 0.4, 14, palette.secondary));

    let subject = match meta.professor_name.as_deref() {
        Some(prof) => format!("{}  \u{2022}  Prof. {}", meta.subject_name, prof),
        None => meta.subject_name.clone(),
    };
    slide.push(text(subject, 1.0, 5.6, 11.0, 0.3, 12, "808080"));

    slide
}

fn header_bar(slide: &mut Slide, heading: &str, palette: &Palette) {
    slide.push(rect(0.0, 0.0, 13.333, 1.2, palette.primary));
    slide.push(rect(0.0, 1.2, 13.333, 0.08, palette.secondary));
    slide.push(bold(text(heading, 0.5, 0.3, 12.0, 0.8, 32, palette.text_light)));
}

fn toc_slide(content: &PresentationContent, palette: &Palette) -> Slide {
    let mut slide = Slide::default();
    slide.push(rect(0.0, 0.0, 13.333, 7.5, palette.background));
    header_bar(&mut slide, "Table of Contents", palette);

    let half = content.slides.len().div_ceil(2);
    for (idx, entry) in content.slides.iter().enumerate() {
        let (column_x, row) = if idx < half {
            (0.5, idx)
        } else {
            (7.0, idx - half)
        };
        let y = 1.6 + row as f64 * 0.6;
        slide.push(bold(text(
            format!("{:02}", idx + 1),
            column_x,
            y,
            0.6,
            0.5,
            16,
            palette.secondary,
        )));
        slide.push(text(
            truncate_text(&entry.title, 35),
            column_x + 0.7,
            y,
            5.0,
            0.5,
            14,
            palette.text_dark,
        ));
    }

    slide
}

fn content_slide(
    index: usize,
    total: usize,
    entry: &SlideContent,
    deck_title: &str,
    palette: &Palette,
) -> Slide {
    let mut slide = Slide::default();
    slide.push(rect(0.0, 0.0, 13.333, 7.5, palette.background));
    slide.push(rect(0.0, 0.0, 13.333, 1.2, palette.primary));
    slide.push(rect(0.0, 1.2, 13.333, 0.08, palette.secondary));

    // Slide-number badge
    slide.push(rect(12.2, 0.2, 0.8, 0.8, palette.accent));
    slide.push(middled(aligned(
        bold(text(
            format!("{}", index + 1),
            12.2,
            0.2,
            0.8,
            0.8,
            18,
            palette.text_light,
        )),
        Align::Center,
    )));

    slide.push(bold(text(
        truncate_text(&entry.title, 60),
        0.5,
        0.3,
        11.0,
        0.8,
        26,
        palette.text_light,
    )));

    let image_rel = entry
        .image_url
        .as_deref()
        .and_then(|uri| slide.embed_image(uri).map(|rel| (uri, rel)));
    let has_image = image_rel.is_some();
    let content_width = if has_image { 7.5 } else { 12.0 };
    let point_limit = if has_image { 80 } else { 120 };

    for (point_idx, point) in entry.points.iter().take(MAX_POINTS_PER_SLIDE).enumerate() {
        let y = 1.6 + point_idx as f64 * 0.85;
        slide.push(rect(0.6, y + 0.15, 0.18, 0.18, palette.bullet_color));
        slide.push(text(
            truncate_text(point, point_limit),
            1.0,
            y,
            content_width - 0.5,
            0.8,
            15,
            palette.text_dark,
        ));
    }

    if let Some((_, rel_id)) = image_rel {
        slide.push(rect(8.2, 1.5, 4.6, 3.8, "F0F0F0"));
        slide.push(Element::Picture {
            rel_id,
            x: 8.3,
            y: 1.6,
            w: 4.4,
            h: 3.6,
        });
    }

    // Footer bar
    slide.push(rect(0.0, 7.0, 13.333, 0.5, palette.primary));
    slide.push(text(
        truncate_text(deck_title, 50),
        0.5,
        7.05,
        10.0,
        0.4,
        10,
        "A0A0A0",
    ));
    slide.push(aligned(
        text(format!("{} / {}", index + 1, total), 11.5, 7.05, 1.5, 0.4, 10, "A0A0A0"),
        Align::Right,
    ));

    slide
}

fn summary_slide(content: &PresentationContent, palette: &Palette) -> Slide {
    let mut slide = Slide::default();
    slide.push(rect(0.0, 0.0, 13.333, 7.5, palette.background));
    header_bar(&mut slide, "Key Takeaways", palette);

    for (idx, entry) in content.slides.iter().take(SUMMARY_SLIDE_LIMIT).enumerate() {
        let y = 1.6 + idx as f64 * 0.8;
        slide.push(bold(text(
            format!("{}", idx + 1),
            0.5,
            y,
            0.5,
            0.5,
            16,
            palette.accent,
        )));
        slide.push(bold(text(
            truncate_text(&entry.title, 40),
            1.1,
            y,
            11.0,
            0.4,
            14,
            palette.text_dark,
        )));
        let first_point = entry.points.first().map(String::as_str).unwrap_or("");
        slide.push(text(
            truncate_text(first_point, 80),
            1.1,
            y + 0.35,
            11.0,
            0.4,
            12,
            "666666",
        ));
    }

    slide
}

fn thanks_slide(meta: &DeckMeta, palette: &Palette) -> Slide {
    let mut slide = Slide::default();
    slide.push(rect(0.0, 0.0, 13.333, 7.5, palette.dark_bg));
    slide.push(rect(0.0, 0.0, 0.4, 7.5, palette.secondary));
    slide.push(rect(10.0, 4.5, 4.0, 4.0, palette.primary));

    slide.push(bold(text("Thank You!", 1.0, 2.0, 10.0, 1.2, 54, palette.text_light)));
    slide.push(rect(1.0, 3.3, 3.0, 0.08, palette.secondary));
    slide.push(text(
        "Questions & Discussion",
        1.0,
        3.6,
        10.0,
        0.7,
        22,
        palette.secondary,
    ));

    let team = meta
        .team_members
        .iter()
        .map(|m| format!("{} ({})", m.name, m.id))
        .collect::<Vec<_>>()
        .join("  \u{2022}  ");
    slide.push(text(team, 1.0, 5.0, 10.0, 0.5, 13, "B0B0B0"));
    slide.push(text(
        format!("{}  |  {}", meta.college_name, meta.subject_name),
        1.0,
        5.5,
        10.0,
        0.4,
        11,
        "808080",
    ));

    slide
}

fn build_slides(meta: &DeckMeta, content: &PresentationContent) -> Vec<Slide> {
    let palette = meta.template.palette();
    let deck_title = if content.title.is_empty() {
        meta.topic.clone()
    } else {
        content.title.clone()
    };

    let mut slides = Vec::with_capacity(content.slides.len() + 4);
    slides.push(title_slide(meta, content, palette));
    slides.push(toc_slide(content, palette));
    let total = content.slides.len();
    for (index, entry) in content.slides.iter().enumerate() {
        slides.push(content_slide(index, total, entry, &deck_title, palette));
    }
    slides.push(summary_slide(content, palette));
    slides.push(thanks_slide(meta, palette));
    slides
}

// ─────────────────────────────────────────────────────────────────────────────
// PresentationML serialization
// ─────────────────────────────────────────────────────────────────────────────

const NS_A: &str = "http://schemas.openxmlformats.org/drawingml/2006/main";
const NS_P: &str = "http://schemas.openxmlformats.org/presentationml/2006/main";
const NS_R: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

fn write_xfrm(xml: &mut String, x: f64, y: f64, w: f64, h: f64) {
    let _ = write!(
        xml,
        "<a:xfrm><a:off x=\"{}\" y=\"{}\"/><a:ext cx=\"{}\" cy=\"{}\"/></a:xfrm>",
        emu(x),
        emu(y),
        emu(w),
        emu(h)
    );
}

fn write_element(xml: &mut String, id: usize, element: &Element) {
    match element {
        Element::Rect { x, y, w, h, fill } => {
            let _ = write!(
                xml,
                "<p:sp><p:nvSpPr><p:cNvPr id=\"{id}\" name=\"Rect {id}\"/><p:cNvSpPr/><p:nvPr/></p:nvSpPr><p:spPr>"
            );
            write_xfrm(xml, *x, *y, *w, *h);
            let _ = write!(
                xml,
                "<a:prstGeom prst=\"rect\"><a:avLst/></a:prstGeom>\
                 <a:solidFill><a:srgbClr val=\"{fill}\"/></a:solidFill><a:ln><a:noFill/></a:ln>\
                 </p:spPr><p:txBody><a:bodyPr/><a:p/></p:txBody></p:sp>"
            );
        }
        Element::Text {
            text,
            x,
            y,
            w,
            h,
            size,
            color,
            bold,
            align,
            middle,
        } => {
            let _ = write!(
                xml,
                "<p:sp><p:nvSpPr><p:cNvPr id=\"{id}\" name=\"Text {id}\"/><p:cNvSpPr txBox=\"1\"/><p:nvPr/></p:nvSpPr><p:spPr>"
            );
            write_xfrm(xml, *x, *y, *w, *h);
            let anchor = if *middle { "ctr" } else { "t" };
            let bold_attr = if *bold { " b=\"1\"" } else { "" };
            let _ = write!(
                xml,
                "<a:prstGeom prst=\"rect\"><a:avLst/></a:prstGeom><a:noFill/></p:spPr>\
                 <p:txBody><a:bodyPr wrap=\"square\" anchor=\"{anchor}\"/>\
                 <a:p><a:pPr algn=\"{algn}\"/>\
                 <a:r><a:rPr lang=\"en-US\" sz=\"{sz}\"{bold_attr} dirty=\"0\">\
                 <a:solidFill><a:srgbClr val=\"{color}\"/></a:solidFill>\
                 <a:latin typeface=\"{FONT}\"/></a:rPr>\
                 <a:t>{body}</a:t></a:r></a:p></p:txBody></p:sp>",
                algn = align.val(),
                sz = size * 100,
                body = xml_escape(text),
            );
        }
        Element::Picture { rel_id, x, y, w, h } => {
            let _ = write!(
                xml,
                "<p:pic><p:nvPicPr><p:cNvPr id=\"{id}\" name=\"Picture {id}\"/><p:cNvPicPr/><p:nvPr/></p:nvPicPr>\
                 <p:blipFill><a:blip r:embed=\"{rel_id}\"/><a:stretch><a:fillRect/></a:stretch></p:blipFill><p:spPr>"
            );
            write_xfrm(xml, *x, *y, *w, *h);
            xml.push_str("<a:prstGeom prst=\"rect\"><a:avLst/></a:prstGeom></p:spPr></p:pic>");
        }
    }
}

fn slide_xml(slide: &Slide) -> String {
    let mut xml = String::with_capacity(8 * 1024);
    xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>");
    let _ = write!(
        xml,
        "<p:sld xmlns:a=\"{NS_A}\" xmlns:r=\"{NS_R}\" xmlns:p=\"{NS_P}\"><p:cSld><p:spTree>\
         <p:nvGrpSpPr><p:cNvPr id=\"1\" name=\"\"/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr>\
         <p:grpSpPr><a:xfrm><a:off x=\"0\" y=\"0\"/><a:ext cx=\"0\" cy=\"0\"/>\
         <a:chOff x=\"0\" y=\"0\"/><a:chExt cx=\"0\" cy=\"0\"/></a:xfrm></p:grpSpPr>"
    );
    for (index, element) in slide.elements.iter().enumerate() {
        write_element(&mut xml, index + 2, element);
    }
    xml.push_str("</p:spTree></p:cSld><p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr></p:sld>");
    xml
}

/// `media_names` holds the package-global file name for each entry of
/// `slide.media`, in order.
fn slide_rels_xml(slide: &Slide, media_names: &[String]) -> String {
    let mut xml = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
         <Relationships xmlns=\"http://schemas.openxmlformats.org/package/2006/relationships\">\
         <Relationship Id=\"rId1\" Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideLayout\" Target=\"../slideLayouts/slideLayout1.xml\"/>",
    );
    for ((rel_id, _, _), name) in slide.media.iter().zip(media_names) {
        let _ = write!(
            xml,
            "<Relationship Id=\"{rel_id}\" Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/image\" Target=\"../media/{name}\"/>"
        );
    }
    xml.push_str("</Relationships>");
    xml
}

fn presentation_xml(slide_count: usize) -> String {
    let mut xml = String::new();
    xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>");
    let _ = write!(
        xml,
        "<p:presentation xmlns:a=\"{NS_A}\" xmlns:r=\"{NS_R}\" xmlns:p=\"{NS_P}\">\
         <p:sldMasterIdLst><p:sldMasterId id=\"2147483648\" r:id=\"rId1\"/></p:sldMasterIdLst><p:sldIdLst>"
    );
    for index in 0..slide_count {
        let _ = write!(
            xml,
            "<p:sldId id=\"{}\" r:id=\"rId{}\"/>",
            256 + index,
            index + 2
        );
    }
    let _ = write!(
        xml,
        "</p:sldIdLst><p:sldSz cx=\"{SLIDE_W_EMU}\" cy=\"{SLIDE_H_EMU}\"/>\
         <p:notesSz cx=\"{SLIDE_H_EMU}\" cy=\"{SLIDE_W_EMU}\"/></p:presentation>"
    );
    xml
}

fn presentation_rels_xml(slide_count: usize) -> String {
    let mut xml = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
         <Relationships xmlns=\"http://schemas.openxmlformats.org/package/2006/relationships\">\
         <Relationship Id=\"rId1\" Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideMaster\" Target=\"slideMasters/slideMaster1.xml\"/>",
    );
    for index in 0..slide_count {
        let _ = write!(
            xml,
            "<Relationship Id=\"rId{}\" Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide\" Target=\"slides/slide{}.xml\"/>",
            index + 2,
            index + 1
        );
    }
    xml.push_str("</Relationships>");
    xml
}

fn content_types_xml(slide_count: usize) -> String {
    let mut xml = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
         <Types xmlns=\"http://schemas.openxmlformats.org/package/2006/content-types\">\
         <Default Extension=\"rels\" ContentType=\"application/vnd.openxmlformats-package.relationships+xml\"/>\
         <Default Extension=\"xml\" ContentType=\"application/xml\"/>\
         <Default Extension=\"png\" ContentType=\"image/png\"/>\
         <Default Extension=\"jpeg\" ContentType=\"image/jpeg\"/>\
         <Override PartName=\"/ppt/presentation.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.presentationml.presentation.main+xml\"/>\
         <Override PartName=\"/ppt/slideMasters/slideMaster1.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.presentationml.slideMaster+xml\"/>\
         <Override PartName=\"/ppt/slideLayouts/slideLayout1.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.presentationml.slideLayout+xml\"/>\
         <Override PartName=\"/ppt/theme/theme1.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.theme+xml\"/>",
    );
    for index in 0..slide_count {
        let _ = write!(
            xml,
            "<Override PartName=\"/ppt/slides/slide{}.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.presentationml.slide+xml\"/>",
            index + 1
        );
    }
    xml.push_str("</Types>");
    xml
}

const ROOT_RELS: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
<Relationships xmlns=\"http://schemas.openxmlformats.org/package/2006/relationships\">\
<Relationship Id=\"rId1\" Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument\" Target=\"ppt/presentation.xml\"/>\
</Relationships>";

fn slide_master_xml() -> String {
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
         <p:sldMaster xmlns:a=\"{NS_A}\" xmlns:r=\"{NS_R}\" xmlns:p=\"{NS_P}\">\
         <p:cSld><p:spTree>\
         <p:nvGrpSpPr><p:cNvPr id=\"1\" name=\"\"/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr>\
         <p:grpSpPr><a:xfrm><a:off x=\"0\" y=\"0\"/><a:ext cx=\"0\" cy=\"0\"/>\
         <a:chOff x=\"0\" y=\"0\"/><a:chExt cx=\"0\" cy=\"0\"/></a:xfrm></p:grpSpPr>\
         </p:spTree></p:cSld>\
         <p:clrMap bg1=\"lt1\" tx1=\"dk1\" bg2=\"lt2\" tx2=\"dk2\" accent1=\"accent1\" accent2=\"accent2\" accent3=\"accent3\" accent4=\"accent4\" accent5=\"accent5\" accent6=\"accent6\" hlink=\"hlink\" folHlink=\"folHlink\"/>\
         <p:sldLayoutIdLst><p:sldLayoutId id=\"2147483649\" r:id=\"rId1\"/></p:sldLayoutIdLst>\
         </p:sldMaster>"
    )
}

const SLIDE_MASTER_RELS: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
<Relationships xmlns=\"http://schemas.openxmlformats.org/package/2006/relationships\">\
<Relationship Id=\"rId1\" Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideLayout\" Target=\"../slideLayouts/slideLayout1.xml\"/>\
<Relationship Id=\"rId2\" Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/theme\" Target=\"../theme/theme1.xml\"/>\
</Relationships>";

fn slide_layout_xml() -> String {
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
         <p:sldLayout xmlns:a=\"{NS_A}\" xmlns:r=\"{NS_R}\" xmlns:p=\"{NS_P}\" type=\"blank\">\
         <p:cSld><p:spTree>\
         <p:nvGrpSpPr><p:cNvPr id=\"1\" name=\"\"/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr>\
         <p:grpSpPr><a:xfrm><a:off x=\"0\" y=\"0\"/><a:ext cx=\"0\" cy=\"0\"/>\
         <a:chOff x=\"0\" y=\"0\"/><a:chExt cx=\"0\" cy=\"0\"/></a:xfrm></p:grpSpPr>\
         </p:spTree></p:cSld><p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr></p:sldLayout>"
    )
}

const SLIDE_LAYOUT_RELS: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
<Relationships xmlns=\"http://schemas.openxmlformats.org/package/2006/relationships\">\
<Relationship Id=\"rId1\" Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideMaster\" Target=\"../slideMasters/slideMaster1.xml\"/>\
</Relationships>";

fn theme_xml() -> String {
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
         <a:theme xmlns:a=\"{NS_A}\" name=\"Office\"><a:themeElements>\
         <a:clrScheme name=\"Office\">\
         <a:dk1><a:srgbClr val=\"000000\"/></a:dk1><a:lt1><a:srgbClr val=\"FFFFFF\"/></a:lt1>\
         <a:dk2><a:srgbClr val=\"44546A\"/></a:dk2><a:lt2><a:srgbClr val=\"E7E6E6\"/></a:lt2>\
         <a:accent1><a:srgbClr val=\"4472C4\"/></a:accent1><a:accent2><a:srgbClr val=\"ED7D31\"/></a:accent2>\
         <a:accent3><a:srgbClr val=\"A5A5A5\"/></a:accent3><a:accent4><a:srgbClr val=\"FFC000\"/></a:accent4>\
         <a:accent5><a:srgbClr val=\"5B9BD5\"/></a:accent5><a:accent6><a:srgbClr val=\"70AD47\"/></a:accent6>\
         <a:hlink><a:srgbClr val=\"0563C1\"/></a:hlink><a:folHlink><a:srgbClr val=\"954F72\"/></a:folHlink>\
         </a:clrScheme>\
         <a:fontScheme name=\"Office\">\
         <a:majorFont><a:latin typeface=\"Arial\"/><a:ea typeface=\"\"/><a:cs typeface=\"\"/></a:majorFont>\
         <a:minorFont><a:latin typeface=\"Arial\"/><a:ea typeface=\"\"/><a:cs typeface=\"\"/></a:minorFont>\
         </a:fontScheme>\
         <a:fmtScheme name=\"Office\">\
         <a:fillStyleLst><a:solidFill><a:schemeClr val=\"phClr\"/></a:solidFill><a:solidFill><a:schemeClr val=\"phClr\"/></a:solidFill><a:solidFill><a:schemeClr val=\"phClr\"/></a:solidFill></a:fillStyleLst>\
         <a:lnStyleLst><a:ln><a:solidFill><a:schemeClr val=\"phClr\"/></a:solidFill></a:ln><a:ln><a:solidFill><a:schemeClr val=\"phClr\"/></a:solidFill></a:ln><a:ln><a:solidFill><a:schemeClr val=\"phClr\"/></a:solidFill></a:ln></a:lnStyleLst>\
         <a:effectStyleLst><a:effectStyle><a:effectLst/></a:effectStyle><a:effectStyle><a:effectLst/></a:effectStyle><a:effectStyle><a:effectLst/></a:effectStyle></a:effectStyleLst>\
         <a:bgFillStyleLst><a:solidFill><a:schemeClr val=\"phClr\"/></a:solidFill><a:solidFill><a:schemeClr val=\"phClr\"/></a:solidFill><a:solidFill><a:schemeClr val=\"phClr\"/></a:solidFill></a:bgFillStyleLst>\
         </a:fmtScheme></a:themeElements></a:theme>"
    )
}

// ─────────────────────────────────────────────────────────────────────────────
// Package assembly
// ─────────────────────────────────────────────────────────────────────────────

/// Renders a complete .pptx download.
pub fn render(meta: &DeckMeta, content: &PresentationContent) -> Result<RenderedDocument, AppError> {
    let slides = build_slides(meta, content);

    let mut parts = vec![
        PackagePart::text("[Content_Types].xml", content_types_xml(slides.len())),
        PackagePart::text("_rels/.rels", ROOT_RELS),
        PackagePart::text("ppt/presentation.xml", presentation_xml(slides.len())),
        PackagePart::text("ppt/_rels/presentation.xml.rels", presentation_rels_xml(slides.len())),
        PackagePart::text("ppt/slideMasters/slideMaster1.xml", slide_master_xml()),
        PackagePart::text("ppt/slideMasters/_rels/slideMaster1.xml.rels", SLIDE_MASTER_RELS),
        PackagePart::text("ppt/slideLayouts/slideLayout1.xml", slide_layout_xml()),
        PackagePart::text("ppt/slideLayouts/_rels/slideLayout1.xml.rels", SLIDE_LAYOUT_RELS),
        PackagePart::text("ppt/theme/theme1.xml", theme_xml()),
    ];

    let mut media_counter = 0usize;
    for (slide_index, slide) in slides.iter().enumerate() {
        let media_names: Vec<String> = slide
            .media
            .iter()
            .map(|(_, ext, _)| {
                media_counter += 1;
                format!("image{media_counter}.{ext}")
            })
            .collect();

        parts.push(PackagePart::text(
            format!("ppt/slides/slide{}.xml", slide_index + 1),
            slide_xml(slide),
        ));
        parts.push(PackagePart::text(
            format!("ppt/slides/_rels/slide{}.xml.rels", slide_index + 1),
            slide_rels_xml(slide, &media_names),
        ));
        for ((_, _, bytes), name) in slide.media.iter().zip(&media_names) {
            parts.push(PackagePart::binary(
                format!("ppt/media/{name}"),
                bytes.clone(),
            ));
        }
    }

    let bytes = zip_package(&parts).map_err(|e| AppError::Render(e.to_string()))?;
    debug!(
        slides = slides.len(),
        template = meta.template.palette().name,
        bytes = bytes.len(),
        "Rendered deck"
    );

    Ok(RenderedDocument {
        bytes,
        filename: format!("{}_presentation.pptx", sanitize_stem(&meta.topic)),
        content_type: "application/vnd.openxmlformats-officedocument.presentationml.presentation",
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    // 1x1 transparent PNG
    const PNG_URI: &str = "data:image/png;base64,iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mNkYPhfDwAChwGA60e6kgAAAABJRU5ErkJggg==";

    fn meta() -> DeckMeta {
        DeckMeta {
            team_members: vec![
                TeamMember {
                    name: "Ava".to_string(),
                    id: "A1".to_string(),
                },
                TeamMember {
                    name: "Ben".to_string(),
                    id: "B2".to_string(),
                },
            ],
            subject_name: "Physics".to_string(),
            professor_name: Some("Khan".to_string()),
            college_name: "City College".to_string(),
            department_name: None,
            university_logo: None,
            topic: "Quantum Tunneling".to_string(),
            template: SlideTemplate::Professional,
        }
    }

    fn content(slides: usize) -> PresentationContent {
        PresentationContent {
            title: "Quantum Tunneling".to_string(),
            slides: (0..slides)
                .map(|i| SlideContent {
                    title: format!("Section {i}"),
                    points: vec![format!("Point {i}")],
                    image_url: None,
                })
                .collect(),
        }
    }

    #[test]
    fn test_deck_has_four_framing_slides() {
        let slides = build_slides(&meta(), &content(7));
        assert_eq!(slides.len(), 7 + 4);
    }

    #[test]
    fn test_content_slide_caps_points_at_five() {
        let entry = SlideContent {
            title: "Busy".to_string(),
            points: (0..9).map(|i| format!("p{i}")).collect(),
            image_url: None,
        };
        let slide = content_slide(0, 1, &entry, "Deck", SlideTemplate::Academic.palette());
        let bullets = slide
            .elements
            .iter()
            .filter(|e| matches!(e, Element::Rect { w, h, .. } if *w == 0.18 && *h == 0.18))
            .count();
        assert_eq!(bullets, MAX_POINTS_PER_SLIDE);
    }

    #[test]
    fn test_data_uri_image_is_embedded() {
        let entry = SlideContent {
            title: "Visual".to_string(),
            points: vec!["one".to_string()],
            image_url: Some(PNG_URI.to_string()),
        };
        let slide = content_slide(0, 1, &entry, "Deck", SlideTemplate::Creative.palette());
        assert_eq!(slide.media.len(), 1);
        assert_eq!(slide.media[0].1, "png");
        assert!(slide
            .elements
            .iter()
            .any(|e| matches!(e, Element::Picture { .. })));
    }

    #[test]
    fn test_plain_url_image_is_skipped() {
        let entry = SlideContent {
            title: "Remote".to_string(),
            points: vec!["one".to_string()],
            image_url: Some("https://example.com/pic.png".to_string()),
        };
        let slide = content_slide(0, 1, &entry, "Deck", SlideTemplate::Professional.palette());
        assert!(slide.media.is_empty());
        assert!(!slide
            .elements
            .iter()
            .any(|e| matches!(e, Element::Picture { .. })));
    }

    #[test]
    fn test_decode_data_uri_variants() {
        assert!(decode_data_uri(PNG_URI).is_some());
        assert_eq!(
            decode_data_uri("data:image/jpeg;base64,Zm9v").map(|(ext, _)| ext),
            Some("jpeg")
        );
        assert!(decode_data_uri("https://example.com/a.png").is_none());
        assert!(decode_data_uri("data:image/png;base64,!!!").is_none());
    }

    #[test]
    fn test_render_produces_zip_with_pptx_name() {
        let doc = render(&meta(), &content(5)).unwrap();
        assert_eq!(doc.filename, "Quantum_Tunneling_presentation.pptx");
        assert_eq!(&doc.bytes[..2], b"PK");
    }

    #[test]
    fn test_presentation_xml_lists_every_slide() {
        let xml = presentation_xml(9);
        assert!(xml.contains("r:id=\"rId10\""));
        assert!(xml.contains(&format!("cx=\"{SLIDE_W_EMU}\" cy=\"{SLIDE_H_EMU}\"")));
    }

    #[test]
    fn test_slide_text_escapes_content() {
        let mut slide = Slide::default();
        slide.push(text("Q & A <session>", 1.0, 1.0, 5.0, 1.0, 18, "000000"));
        let xml = slide_xml(&slide);
        assert!(xml.contains("Q &amp; A &lt;session&gt;"));
    }
}
