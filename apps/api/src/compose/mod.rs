// Document composition: classify raw generated text into typed blocks and
// plan where auxiliary images sit in the reading order. Everything here is
// pure — renderers consume the resulting RenderUnit sequence.

pub mod interleave;
pub mod segment;

pub use interleave::interleave;
pub use segment::segment;

/// A classified piece of document text, in reading order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentBlock {
    Heading1(String),
    Heading2(String),
    Heading3(String),
    Paragraph(String),
}

impl ContentBlock {
    pub fn text(&self) -> &str {
        match self {
            ContentBlock::Heading1(t)
            | ContentBlock::Heading2(t)
            | ContentBlock::Heading3(t)
            | ContentBlock::Paragraph(t) => t,
        }
    }
}

/// An image placed into the block sequence with its stable caption.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUnit {
    pub url: String,
    /// "Figure {n}: {topic}" — numbering is assigned at planning time and
    /// does not depend on final pagination.
    pub caption: String,
}

/// The smallest item the document renderers consume.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderUnit {
    Block(ContentBlock),
    Image(ImageUnit),
}
