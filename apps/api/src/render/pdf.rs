//! PDF backend — assembles the deterministic HTML/CSS document and hands it
//! to the headless-browser rasterizer for pagination.
//!
//! The stylesheet is a fixed decision table (navy/gold academic palette,
//! justified body text); nothing in it is caller-configurable. Figures and
//! the closing section carry page-break hints so the rasterizer never
//! splits them across pages.

use std::fmt::Write;

use crate::compose::{ContentBlock, RenderUnit};
use crate::errors::AppError;
use crate::rasterizer::{PdfOptions, RasterizerClient};
use crate::render::ooxml::xml_escape;
use crate::render::{sanitize_stem, DocumentMeta, RenderedDocument, GENERATOR_FOOTER};

const STYLESHEET: &str = r#"
  @import url('https://fonts.googleapis.com/css2?family=Poppins:wght@300;400;500;600;700&display=swap');
  * { font-family: 'Poppins', Arial, sans-serif; }
  h1, h2, h3 { color: #1E3A5F; }
  h1 { font-size: 28px; border-bottom: 3px solid #D4AF37; padding-bottom: 10px; margin-bottom: 20px; }
  h2 { font-size: 22px; color: #2E5984; margin-top: 25px; }
  h3 { font-size: 18px; color: #3D7BA8; }
  p { line-height: 1.8; color: #333; text-align: justify; margin-bottom: 12px; }
  .header { text-align: center; margin-bottom: 40px; padding: 30px; background: linear-gradient(135deg, #1E3A5F 0%, #2E5984 100%); color: white; border-radius: 10px; }
  .header h1 { color: white; border-bottom: 3px solid #D4AF37; display: inline-block; padding-bottom: 10px; }
  .info { background: #f8f9fa; padding: 20px; border-radius: 8px; margin-bottom: 30px; border-left: 4px solid #D4AF37; }
  .info-item { margin: 8px 0; }
  .info-label { font-weight: 600; color: #1E3A5F; }
  .content { padding: 20px 0; }
  figure { page-break-inside: avoid; break-inside: avoid; text-align: center; margin: 20px 0; }
  figure img { max-width: 100%; height: auto; border-radius: 8px; box-shadow: 0 4px 15px rgba(0,0,0,0.1); }
  figcaption { color: #666; font-size: 13px; font-style: italic; margin-top: 8px; }
  .footer { page-break-inside: avoid; text-align: center; margin-top: 40px; padding-top: 20px; border-top: 2px solid #D4AF37; color: #888; font-style: italic; }
"#;

/// Assembles the full HTML document for a set of render units.
/// Pure and deterministic; all text is HTML-escaped.
pub fn assemble_html(meta: &DocumentMeta, units: &[RenderUnit]) -> String {
    let mut html = String::with_capacity(4096);

    html.push_str("<!DOCTYPE html><html><head><meta charset=\"utf-8\"><style>");
    html.push_str(STYLESHEET);
    html.push_str("</style></head><body>");

    // Cover header
    let _ = write!(
        html,
        "<div class=\"header\"><h1>{}</h1></div>",
        xml_escape(&meta.topic)
    );

    // Metadata box
    html.push_str("<div class=\"info\">");
    for (label, value) in meta.info_rows() {
        let _ = write!(
            html,
            "<div class=\"info-item\"><span class=\"info-label\">{}</span> {}</div>",
            xml_escape(label),
            xml_escape(value)
        );
    }
    html.push_str("</div>");

    // Content with inline-interleaved figures
    html.push_str("<div class=\"content\">");
    for unit in units {
        match unit {
            RenderUnit::Block(block) => push_block(&mut html, block),
            RenderUnit::Image(image) => {
                let _ = write!(
                    html,
                    "<figure><img src=\"{}\" alt=\"{}\" /><figcaption>{}</figcaption></figure>",
                    xml_escape(&image.url),
                    xml_escape(&image.caption),
                    xml_escape(&image.caption)
                );
            }
        }
    }
    html.push_str("</div>");

    // Closing section
    let _ = write!(html, "<div class=\"footer\">{GENERATOR_FOOTER}</div>");
    html.push_str("</body></html>");

    html
}

fn push_block(html: &mut String, block: &ContentBlock) {
    let tag = match block {
        ContentBlock::Heading1(_) => "h1",
        ContentBlock::Heading2(_) => "h2",
        ContentBlock::Heading3(_) => "h3",
        ContentBlock::Paragraph(_) => "p",
    };
    let _ = write!(html, "<{tag}>{}</{tag}>", xml_escape(block.text()));
}

/// Renders the assembled HTML to a downloadable PDF.
pub async fn render(
    rasterizer: &RasterizerClient,
    meta: &DocumentMeta,
    units: &[RenderUnit],
) -> Result<RenderedDocument, AppError> {
    let html = assemble_html(meta, units);

    let bytes = rasterizer
        .render_pdf(&html, &PdfOptions::default())
        .await
        .map_err(|e| AppError::Render(e.to_string()))?;

    Ok(RenderedDocument {
        bytes,
        filename: format!("{}_Assignment.pdf", sanitize_stem(&meta.topic)),
        content_type: "application/pdf",
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compose::ImageUnit;

    fn meta() -> DocumentMeta {
        DocumentMeta {
            student_name: "Sara".to_string(),
            student_id: "2021-114".to_string(),
            subject_name: "Economics".to_string(),
            professor_name: "Dr. Nabil".to_string(),
            topic: "Inflation & Policy".to_string(),
        }
    }

    #[test]
    fn test_html_carries_metadata_rows() {
        let html = assemble_html(&meta(), &[]);
        assert!(html.contains("Student Name:"));
        assert!(html.contains("Sara"));
        assert!(html.contains("Dr. Nabil"));
    }

    #[test]
    fn test_topic_is_escaped_in_header() {
        let html = assemble_html(&meta(), &[]);
        assert!(html.contains("Inflation &amp; Policy"));
        assert!(!html.contains("<h1>Inflation & Policy</h1>"));
    }

    #[test]
    fn test_blocks_map_to_heading_tags() {
        let units = vec![
            RenderUnit::Block(ContentBlock::Heading1("Intro".to_string())),
            RenderUnit::Block(ContentBlock::Heading2("Causes".to_string())),
            RenderUnit::Block(ContentBlock::Paragraph("Body text".to_string())),
        ];
        let html = assemble_html(&meta(), &units);
        assert!(html.contains("<h1>Intro</h1>"));
        assert!(html.contains("<h2>Causes</h2>"));
        assert!(html.contains("<p>Body text</p>"));
    }

    #[test]
    fn test_images_render_as_captioned_figures() {
        let units = vec![RenderUnit::Image(ImageUnit {
            url: "data:image/png;base64,Zm9v".to_string(),
            caption: "Figure 1: Inflation & Policy".to_string(),
        })];
        let html = assemble_html(&meta(), &units);
        assert!(html.contains("<figure>"));
        assert!(html.contains("<figcaption>Figure 1: Inflation &amp; Policy</figcaption>"));
    }

    #[test]
    fn test_assembly_is_deterministic() {
        let units = vec![RenderUnit::Block(ContentBlock::Paragraph("x".to_string()))];
        assert_eq!(assemble_html(&meta(), &units), assemble_html(&meta(), &units));
    }

    #[test]
    fn test_footer_present() {
        assert!(assemble_html(&meta(), &[]).contains(GENERATOR_FOOTER));
    }
}
