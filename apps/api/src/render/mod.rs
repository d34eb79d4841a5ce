// Document renderers: three independent backends over one intermediate
// representation (the compose::RenderUnit sequence plus a metadata record).
// Each backend owns its format's styling decision table; nothing here is
// user-configurable beyond the PPTX template selector.

pub mod docx;
pub mod ooxml;
pub mod pdf;
pub mod pptx;
pub mod theme;

use axum::http::{header, HeaderValue};
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

/// Footer branding stamped into every exported document.
pub const GENERATOR_FOOTER: &str = "Generated by StudyForge";

/// Metadata block shared by the assignment-style renderers (PDF, Word).
#[derive(Debug, Clone, Deserialize)]
pub struct DocumentMeta {
    pub student_name: String,
    pub student_id: String,
    pub subject_name: String,
    pub professor_name: String,
    pub topic: String,
}

impl DocumentMeta {
    /// The cover-page key/value rows, in display order.
    pub fn info_rows(&self) -> [(&'static str, &str); 4] {
        [
            ("Student Name:", &self.student_name),
            ("Student ID:", &self.student_id),
            ("Subject:", &self.subject_name),
            ("Professor:", &self.professor_name),
        ]
    }
}

/// A fully rendered document ready for download.
pub struct RenderedDocument {
    pub bytes: Vec<u8>,
    pub filename: String,
    pub content_type: &'static str,
}

impl IntoResponse for RenderedDocument {
    fn into_response(self) -> Response {
        let disposition = format!("attachment; filename=\"{}\"", self.filename);
        (
            [
                (
                    header::CONTENT_TYPE,
                    HeaderValue::from_static(self.content_type),
                ),
                (
                    header::CONTENT_DISPOSITION,
                    HeaderValue::from_str(&disposition)
                        .unwrap_or_else(|_| HeaderValue::from_static("attachment")),
                ),
            ],
            self.bytes,
        )
            .into_response()
    }
}

/// Derives the filename stem from a topic: every character outside
/// `[a-zA-Z0-9]` becomes `_`.
pub fn sanitize_stem(topic: &str) -> String {
    topic
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

/// Truncates to `max` characters, ellipsizing when anything was cut.
pub fn truncate_text(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(3)).collect();
    format!("{kept}...")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_stem_replaces_each_special_char() {
        assert_eq!(sanitize_stem("AI & Society: 2024!"), "AI___Society__2024_");
    }

    #[test]
    fn test_sanitize_stem_keeps_alphanumerics() {
        assert_eq!(sanitize_stem("Rust101"), "Rust101");
    }

    #[test]
    fn test_assignment_filename_shape() {
        let filename = format!("{}_Assignment.docx", sanitize_stem("AI & Society: 2024!"));
        assert_eq!(filename, "AI___Society__2024__Assignment.docx");
    }

    #[test]
    fn test_truncate_text_short_input_untouched() {
        assert_eq!(truncate_text("short", 35), "short");
    }

    #[test]
    fn test_truncate_text_long_input_ellipsized() {
        let out = truncate_text("abcdefghij", 8);
        assert_eq!(out, "abcde...");
        assert_eq!(out.chars().count(), 8);
    }

    #[test]
    fn test_info_rows_order() {
        let meta = DocumentMeta {
            student_name: "Amira".to_string(),
            student_id: "12345".to_string(),
            subject_name: "Biology".to_string(),
            professor_name: "Dr. Hany".to_string(),
            topic: "Cells".to_string(),
        };
        let labels: Vec<&str> = meta.info_rows().iter().map(|(l, _)| *l).collect();
        assert_eq!(
            labels,
            vec!["Student Name:", "Student ID:", "Subject:", "Professor:"]
        );
    }
}
