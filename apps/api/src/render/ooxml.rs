//! Shared OOXML plumbing for the Word and Slides backends: XML escaping,
//! EMU coordinate conversion, and zip packaging of document parts.

use std::io::{Cursor, Write};

use anyhow::{Context, Result};
use quick_xml::escape::escape;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// English Metric Units per inch — the coordinate space of DrawingML.
pub const EMU_PER_INCH: f64 = 914_400.0;

/// Converts inches to EMU, rounding to the nearest unit.
pub fn emu(inches: f64) -> i64 {
    (inches * EMU_PER_INCH).round() as i64
}

/// Escapes text for placement inside an XML element or attribute.
pub fn xml_escape(text: &str) -> String {
    escape(text).into_owned()
}

/// One file inside an OOXML package.
pub struct PackagePart {
    pub path: String,
    pub content: Vec<u8>,
}

impl PackagePart {
    pub fn text(path: impl Into<String>, content: impl Into<String>) -> Self {
        PackagePart {
            path: path.into(),
            content: content.into().into_bytes(),
        }
    }

    pub fn binary(path: impl Into<String>, content: Vec<u8>) -> Self {
        PackagePart {
            path: path.into(),
            content,
        }
    }
}

/// Packages parts into a deflated zip archive in memory.
pub fn zip_package(parts: &[PackagePart]) -> Result<Vec<u8>> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    for part in parts {
        writer
            .start_file(part.path.as_str(), options)
            .with_context(|| format!("Failed to start package part {}", part.path))?;
        writer
            .write_all(&part.content)
            .with_context(|| format!("Failed to write package part {}", part.path))?;
    }

    let cursor = writer.finish().context("Failed to finalize package")?;
    Ok(cursor.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emu_conversion() {
        assert_eq!(emu(1.0), 914_400);
        assert_eq!(emu(7.5), 6_858_000);
        assert_eq!(emu(0.0), 0);
    }

    #[test]
    fn test_xml_escape_special_chars() {
        assert_eq!(
            xml_escape("Fish & <Chips> \"fresh\""),
            "Fish &amp; &lt;Chips&gt; &quot;fresh&quot;"
        );
    }

    #[test]
    fn test_zip_package_is_a_zip() {
        let parts = vec![
            PackagePart::text("[Content_Types].xml", "<Types/>"),
            PackagePart::text("word/document.xml", "<w:document/>"),
        ];
        let bytes = zip_package(&parts).unwrap();
        // Local file header magic
        assert_eq!(&bytes[..4], b"PK\x03\x04");
    }
}
