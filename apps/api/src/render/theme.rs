//! Presentation design templates — three fixed color palettes selected at
//! render time. Selection is a pure lookup on a closed enum; the records
//! themselves never change at runtime.

use serde::{Deserialize, Serialize};

/// The template selector exposed through the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlideTemplate {
    Professional,
    Academic,
    Creative,
}

/// A fixed palette record. All colors are 6-digit RGB hex without `#`,
/// as the OOXML `srgbClr` element expects.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub name: &'static str,
    pub primary: &'static str,
    pub secondary: &'static str,
    pub accent: &'static str,
    pub background: &'static str,
    pub dark_bg: &'static str,
    pub text_light: &'static str,
    pub text_dark: &'static str,
    pub bullet_color: &'static str,
}

const PROFESSIONAL: Palette = Palette {
    name: "Professional",
    primary: "1E3A5F",
    secondary: "2DD4BF",
    accent: "F59E0B",
    background: "FFFFFF",
    dark_bg: "0F172A",
    text_light: "FFFFFF",
    text_dark: "1E293B",
    bullet_color: "2DD4BF",
};

const ACADEMIC: Palette = Palette {
    name: "Academic",
    primary: "7C3AED",
    secondary: "EC4899",
    accent: "06B6D4",
    background: "FFFFFF",
    dark_bg: "2E1065",
    text_light: "FFFFFF",
    text_dark: "1E1B4B",
    bullet_color: "EC4899",
};

const CREATIVE: Palette = Palette {
    name: "Creative",
    primary: "F97316",
    secondary: "14B8A6",
    accent: "A855F7",
    background: "FFFFFF",
    dark_bg: "431407",
    text_light: "FFFFFF",
    text_dark: "292524",
    bullet_color: "14B8A6",
};

impl SlideTemplate {
    pub fn palette(self) -> &'static Palette {
        match self {
            SlideTemplate::Professional => &PROFESSIONAL,
            SlideTemplate::Academic => &ACADEMIC,
            SlideTemplate::Creative => &CREATIVE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_lookup_is_stable() {
        assert_eq!(SlideTemplate::Professional.palette().primary, "1E3A5F");
        assert_eq!(SlideTemplate::Academic.palette().dark_bg, "2E1065");
        assert_eq!(SlideTemplate::Creative.palette().accent, "A855F7");
    }

    #[test]
    fn test_template_deserializes_lowercase() {
        let t: SlideTemplate = serde_json::from_str("\"academic\"").unwrap();
        assert_eq!(t, SlideTemplate::Academic);
    }
}
