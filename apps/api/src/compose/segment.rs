//! Content Segmenter — turns a flat markdown-like string into typed blocks.
//!
//! Classification is total: any input is valid, blank lines are dropped,
//! and unrecognized lines fall through to paragraphs with their emphasis
//! markers stripped.

use super::ContentBlock;

/// Segments raw generated text into blocks, one per non-empty trimmed line.
///
/// Prefix rules (checked longest-first so `###` is not misread as `#`):
/// `### ` → Heading3, `## ` → Heading2, `# ` → Heading1. A line wholly
/// wrapped in `**…**` is treated as a Heading3 — models often emit bold
/// lines where a subheading is meant.
pub fn segment(raw: &str) -> Vec<ContentBlock> {
    raw.lines()
        .filter_map(|line| {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                return None;
            }

            let block = if let Some(rest) = trimmed.strip_prefix("### ") {
                ContentBlock::Heading3(rest.to_string())
            } else if let Some(rest) = trimmed.strip_prefix("## ") {
                ContentBlock::Heading2(rest.to_string())
            } else if let Some(rest) = trimmed.strip_prefix("# ") {
                ContentBlock::Heading1(rest.to_string())
            } else if is_bold_only(trimmed) {
                ContentBlock::Heading3(trimmed.replace("**", ""))
            } else {
                ContentBlock::Paragraph(strip_emphasis(trimmed))
            };

            Some(block)
        })
        .collect()
}

/// True for lines like `**Conclusion**` — bold markers at both ends.
fn is_bold_only(line: &str) -> bool {
    line.len() > 4 && line.starts_with("**") && line.ends_with("**")
}

/// Removes `**` and `*` emphasis markers from paragraph text.
fn strip_emphasis(text: &str) -> String {
    text.replace("**", "").replace('*', "")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compose::ContentBlock::{Heading1, Heading2, Heading3, Paragraph};

    #[test]
    fn test_heading_levels_round_trip() {
        let blocks = segment("# A\n## B\n### C\ntext");
        assert_eq!(
            blocks,
            vec![
                Heading1("A".to_string()),
                Heading2("B".to_string()),
                Heading3("C".to_string()),
                Paragraph("text".to_string()),
            ]
        );
    }

    #[test]
    fn test_segment_is_deterministic() {
        let input = "# Intro\n\nSome **bold** text\n**Conclusion**\n";
        assert_eq!(segment(input), segment(input));
    }

    #[test]
    fn test_blank_lines_are_dropped() {
        let blocks = segment("\n\n# Title\n\n\nbody\n\n");
        assert_eq!(blocks.len(), 2);
    }

    #[test]
    fn test_bold_only_line_becomes_heading3() {
        let blocks = segment("**Key Findings**");
        assert_eq!(blocks, vec![Heading3("Key Findings".to_string())]);
    }

    #[test]
    fn test_paragraph_emphasis_is_stripped() {
        let blocks = segment("This is **very** *important* stuff");
        assert_eq!(
            blocks,
            vec![Paragraph("This is very important stuff".to_string())]
        );
    }

    #[test]
    fn test_bare_double_asterisks_not_a_heading() {
        // "**" alone is too short to be a bold-wrapped heading
        let blocks = segment("**");
        assert_eq!(blocks, vec![Paragraph(String::new())]);
    }

    #[test]
    fn test_leading_whitespace_is_trimmed_before_classification() {
        let blocks = segment("   ## Indented");
        assert_eq!(blocks, vec![Heading2("Indented".to_string())]);
    }

    #[test]
    fn test_empty_input_yields_no_blocks() {
        assert!(segment("").is_empty());
    }
}
