//! Word backend — builds a typed paragraph/run tree from content blocks and
//! serializes it to a minimal WordprocessingML package.
//!
//! The package carries exactly three parts: `[Content_Types].xml`,
//! `_rels/.rels` and `word/document.xml`. Images are not embedded; when the
//! document was generated with images, a note points the reader to the PDF
//! export instead.

use std::fmt::Write;

use crate::compose::ContentBlock;
use crate::errors::AppError;
use crate::render::ooxml::{xml_escape, zip_package, PackagePart};
use crate::render::{sanitize_stem, DocumentMeta, RenderedDocument, GENERATOR_FOOTER};

const FONT_SERIF: &str = "Georgia";
const FONT_SANS: &str = "Arial";

const COLOR_TITLE: &str = "1E3A5F";
const COLOR_H2: &str = "2E5984";
const COLOR_H3: &str = "3D7BA8";
const COLOR_BODY: &str = "333333";
const COLOR_GOLD: &str = "D4AF37";

const DIVIDER: &str = "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━";

// ─────────────────────────────────────────────────────────────────────────────
// Typed document model
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct Run {
    pub text: String,
    /// Half-points, as WordprocessingML measures font size.
    pub size: u32,
    pub color: &'static str,
    pub font: &'static str,
    pub bold: bool,
    pub italic: bool,
}

impl Run {
    fn new(text: impl Into<String>, size: u32, color: &'static str, font: &'static str) -> Self {
        Run {
            text: text.into(),
            size,
            color,
            font,
            bold: false,
            italic: false,
        }
    }

    fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    fn italic(mut self) -> Self {
        self.italic = true;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    Left,
    Center,
    Justify,
}

impl Alignment {
    fn val(self) -> &'static str {
        match self {
            Alignment::Left => "left",
            Alignment::Center => "center",
            Alignment::Justify => "both",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Paragraph {
    pub runs: Vec<Run>,
    pub alignment: Alignment,
    /// Twentieths of a point.
    pub spacing_before: u32,
    pub spacing_after: u32,
    /// Line spacing in 240ths of a line; 360 is 1.5 lines.
    pub line: Option<u32>,
    pub page_break_before: bool,
    pub bottom_border: bool,
}

impl Paragraph {
    fn new(runs: Vec<Run>) -> Self {
        Paragraph {
            runs,
            alignment: Alignment::Left,
            spacing_before: 0,
            spacing_after: 0,
            line: None,
            page_break_before: false,
            bottom_border: false,
        }
    }

    fn aligned(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    fn spacing(mut self, before: u32, after: u32) -> Self {
        self.spacing_before = before;
        self.spacing_after = after;
        self
    }

    fn line(mut self, line: u32) -> Self {
        self.line = Some(line);
        self
    }

    fn page_break_before(mut self) -> Self {
        self.page_break_before = true;
        self
    }

    fn bottom_border(mut self) -> Self {
        self.bottom_border = true;
        self
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Document assembly
// ─────────────────────────────────────────────────────────────────────────────

/// Builds the full paragraph sequence: cover page, content, optional image
/// note, closing footer.
pub fn build_paragraphs(
    meta: &DocumentMeta,
    blocks: &[ContentBlock],
    has_images: bool,
) -> Vec<Paragraph> {
    let mut paragraphs = Vec::with_capacity(blocks.len() + 16);

    // Cover page
    paragraphs.push(
        Paragraph::new(vec![
            Run::new(meta.topic.to_uppercase(), 56, COLOR_TITLE, FONT_SERIF).bold(),
        ])
            .aligned(Alignment::Center)
            .spacing(0, 600),
    );
    paragraphs.push(divider());
    for (label, value) in meta.info_rows() {
        paragraphs.push(
            Paragraph::new(vec![
                Run::new(format!("{label} "), 24, COLOR_TITLE, FONT_SANS).bold(),
                Run::new(value, 24, COLOR_BODY, FONT_SANS),
            ])
            .aligned(Alignment::Center)
            .spacing(0, 120),
        );
    }

    // Content starts on a fresh page
    let mut first = true;
    for block in blocks {
        let mut paragraph = content_paragraph(block);
        if first {
            paragraph = paragraph.page_break_before();
            first = false;
        }
        paragraphs.push(paragraph);
    }

    if has_images {
        paragraphs.push(
            Paragraph::new(vec![Run::new("Visual References", 36, COLOR_TITLE, FONT_SERIF).bold()])
                .aligned(Alignment::Center)
                .spacing(0, 200)
                .page_break_before(),
        );
        paragraphs.push(
            Paragraph::new(vec![Run::new(
                "(AI-generated images related to the topic are included in the PDF version)",
                22,
                "666666",
                FONT_SANS,
            )
            .italic()])
            .aligned(Alignment::Center)
            .spacing(0, 200),
        );
    }

    // Closing
    paragraphs.push(divider());
    paragraphs.push(
        Paragraph::new(vec![Run::new(GENERATOR_FOOTER, 20, "888888", FONT_SANS).italic()])
            .aligned(Alignment::Center)
            .spacing(200, 0),
    );

    paragraphs
}

fn divider() -> Paragraph {
    Paragraph::new(vec![Run::new(DIVIDER, 24, COLOR_GOLD, FONT_SANS)])
        .aligned(Alignment::Center)
        .spacing(0, 200)
}

fn content_paragraph(block: &ContentBlock) -> Paragraph {
    match block {
        ContentBlock::Heading1(text) => {
            Paragraph::new(vec![Run::new(text, 44, COLOR_TITLE, FONT_SERIF).bold()])
                .spacing(400, 200)
                .bottom_border()
        }
        ContentBlock::Heading2(text) => {
            Paragraph::new(vec![Run::new(text, 32, COLOR_H2, FONT_SERIF).bold()]).spacing(300, 150)
        }
        ContentBlock::Heading3(text) => {
            Paragraph::new(vec![Run::new(text, 26, COLOR_H3, FONT_SANS).bold()]).spacing(200, 100)
        }
        ContentBlock::Paragraph(text) => {
            Paragraph::new(vec![Run::new(text, 24, COLOR_BODY, FONT_SANS)])
                .aligned(Alignment::Justify)
                .spacing(0, 200)
                .line(360)
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// WordprocessingML serialization
// ─────────────────────────────────────────────────────────────────────────────

fn write_paragraph(xml: &mut String, paragraph: &Paragraph) {
    xml.push_str("<w:p><w:pPr>");
    if paragraph.page_break_before {
        xml.push_str("<w:pageBreakBefore/>");
    }
    if paragraph.bottom_border {
        let _ = write!(
            xml,
            "<w:pBdr><w:bottom w:val=\"single\" w:sz=\"12\" w:space=\"4\" w:color=\"{COLOR_GOLD}\"/></w:pBdr>"
        );
    }
    let _ = write!(
        xml,
        "<w:spacing w:before=\"{}\" w:after=\"{}\"",
        paragraph.spacing_before, paragraph.spacing_after
    );
    if let Some(line) = paragraph.line {
        let _ = write!(xml, " w:line=\"{line}\" w:lineRule=\"auto\"");
    }
    xml.push_str("/>");
    let _ = write!(xml, "<w:jc w:val=\"{}\"/>", paragraph.alignment.val());
    xml.push_str("</w:pPr>");

    for run in &paragraph.runs {
        xml.push_str("<w:r><w:rPr>");
        let _ = write!(
            xml,
            "<w:rFonts w:ascii=\"{font}\" w:hAnsi=\"{font}\"/>",
            font = run.font
        );
        if run.bold {
            xml.push_str("<w:b/>");
        }
        if run.italic {
            xml.push_str("<w:i/>");
        }
        let _ = write!(xml, "<w:color w:val=\"{}\"/>", run.color);
        let _ = write!(
            xml,
            "<w:sz w:val=\"{size}\"/><w:szCs w:val=\"{size}\"/>",
            size = run.size
        );
        xml.push_str("</w:rPr>");
        let _ = write!(
            xml,
            "<w:t xml:space=\"preserve\">{}</w:t>",
            xml_escape(&run.text)
        );
        xml.push_str("</w:r>");
    }
    xml.push_str("</w:p>");
}

fn document_xml(paragraphs: &[Paragraph]) -> String {
    let mut xml = String::with_capacity(16 * 1024);
    xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>");
    xml.push_str(
        "<w:document xmlns:w=\"http://schemas.openxmlformats.org/wordprocessingml/2006/main\"><w:body>",
    );
    for paragraph in paragraphs {
        write_paragraph(&mut xml, paragraph);
    }
    // A4 portrait with one-inch margins
    xml.push_str(
        "<w:sectPr><w:pgSz w:w=\"11906\" w:h=\"16838\"/>\
         <w:pgMar w:top=\"1440\" w:right=\"1440\" w:bottom=\"1440\" w:left=\"1440\"/></w:sectPr>",
    );
    xml.push_str("</w:body></w:document>");
    xml
}

const CONTENT_TYPES: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
<Types xmlns=\"http://schemas.openxmlformats.org/package/2006/content-types\">\
<Default Extension=\"rels\" ContentType=\"application/vnd.openxmlformats-package.relationships+xml\"/>\
<Default Extension=\"xml\" ContentType=\"application/xml\"/>\
<Override PartName=\"/word/document.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml\"/>\
</Types>";

const ROOT_RELS: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
<Relationships xmlns=\"http://schemas.openxmlformats.org/package/2006/relationships\">\
<Relationship Id=\"rId1\" Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument\" Target=\"word/document.xml\"/>\
</Relationships>";

/// Renders a complete .docx download.
pub fn render(
    meta: &DocumentMeta,
    blocks: &[ContentBlock],
    has_images: bool,
) -> Result<RenderedDocument, AppError> {
    let paragraphs = build_paragraphs(meta, blocks, has_images);

    let parts = [
        PackagePart::text("[Content_Types].xml", CONTENT_TYPES),
        PackagePart::text("_rels/.rels", ROOT_RELS),
        PackagePart::text("word/document.xml", document_xml(&paragraphs)),
    ];
    let bytes = zip_package(&parts).map_err(|e| AppError::Render(e.to_string()))?;

    Ok(RenderedDocument {
        bytes,
        filename: format!("{}_Assignment.docx", sanitize_stem(&meta.topic)),
        content_type: "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meta() -> DocumentMeta {
        DocumentMeta {
            student_name: "Omar".to_string(),
            student_id: "77".to_string(),
            subject_name: "History".to_string(),
            professor_name: "Dr. Lune".to_string(),
            topic: "Silk Road".to_string(),
        }
    }

    #[test]
    fn test_cover_page_precedes_content() {
        let blocks = vec![ContentBlock::Heading1("Origins".to_string())];
        let paragraphs = build_paragraphs(&meta(), &blocks, false);
        // Cover title is uppercased
        assert_eq!(paragraphs[0].runs[0].text, "SILK ROAD");
        assert_eq!(paragraphs[0].runs[0].size, 56);
        assert!(paragraphs[0].runs[0].bold);
        // First content paragraph starts a fresh page
        let content = paragraphs
            .iter()
            .find(|p| p.runs[0].text == "Origins")
            .unwrap();
        assert!(content.page_break_before);
        assert!(content.bottom_border);
    }

    #[test]
    fn test_body_paragraphs_are_justified_with_line_spacing() {
        let paragraph = content_paragraph(&ContentBlock::Paragraph("text".to_string()));
        assert_eq!(paragraph.alignment, Alignment::Justify);
        assert_eq!(paragraph.line, Some(360));
        assert_eq!(paragraph.runs[0].size, 24);
    }

    #[test]
    fn test_image_note_only_when_images_present() {
        let without = build_paragraphs(&meta(), &[], false);
        assert!(!without
            .iter()
            .any(|p| p.runs[0].text == "Visual References"));

        let with = build_paragraphs(&meta(), &[], true);
        let header = with
            .iter()
            .find(|p| p.runs[0].text == "Visual References")
            .unwrap();
        assert!(header.page_break_before);
    }

    #[test]
    fn test_footer_is_last_paragraph() {
        let paragraphs = build_paragraphs(&meta(), &[], false);
        let last = paragraphs.last().unwrap();
        assert_eq!(last.runs[0].text, GENERATOR_FOOTER);
        assert!(last.runs[0].italic);
    }

    #[test]
    fn test_document_xml_escapes_text() {
        let paragraphs = build_paragraphs(
            &meta(),
            &[ContentBlock::Paragraph("a < b & c".to_string())],
            false,
        );
        let xml = document_xml(&paragraphs);
        assert!(xml.contains("a &lt; b &amp; c"));
        assert!(xml.contains("<w:sectPr>"));
    }

    #[test]
    fn test_render_produces_zip_with_docx_name() {
        let doc = render(&meta(), &[ContentBlock::Paragraph("x".to_string())], false).unwrap();
        assert_eq!(doc.filename, "Silk_Road_Assignment.docx");
        assert_eq!(&doc.bytes[..2], b"PK");
    }
}
