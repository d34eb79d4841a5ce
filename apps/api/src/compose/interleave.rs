//! Layout Planner — distributes auxiliary images evenly through a block
//! sequence so they never cluster at the end of the document.

use super::{ContentBlock, ImageUnit, RenderUnit};

/// Interleaves `images` into `blocks` at evenly spaced positions.
///
/// With `n` blocks and `k` images, image `i` is inserted before the block
/// at index `floor(n * (i + 1) / (k + 1))`, the floor taken over the whole
/// product so positions stay evenly spaced for any `n`. Positions are
/// non-decreasing in `i`; when two images land on the same index they are
/// emitted consecutively in their original order. The output always holds
/// exactly `n + k` units, and an empty image list returns the blocks
/// unchanged.
pub fn interleave(blocks: Vec<ContentBlock>, images: &[String], topic: &str) -> Vec<RenderUnit> {
    if images.is_empty() {
        return blocks.into_iter().map(RenderUnit::Block).collect();
    }

    let n = blocks.len();
    let k = images.len();
    let positions: Vec<usize> = (0..k).map(|i| n * (i + 1) / (k + 1)).collect();

    let mut units = Vec::with_capacity(n + k);
    let mut next_image = 0;

    for (index, block) in blocks.into_iter().enumerate() {
        while next_image < k && positions[next_image] == index {
            units.push(RenderUnit::Image(image_unit(
                &images[next_image],
                next_image,
                topic,
            )));
            next_image += 1;
        }
        units.push(RenderUnit::Block(block));
    }

    // Any images not yet placed (including the n == 0 case) go at the end,
    // still in order.
    while next_image < k {
        units.push(RenderUnit::Image(image_unit(
            &images[next_image],
            next_image,
            topic,
        )));
        next_image += 1;
    }

    units
}

fn image_unit(url: &str, index: usize, topic: &str) -> ImageUnit {
    ImageUnit {
        url: url.to_string(),
        caption: format!("Figure {}: {}", index + 1, topic),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paragraphs(n: usize) -> Vec<ContentBlock> {
        (0..n)
            .map(|i| ContentBlock::Paragraph(format!("p{i}")))
            .collect()
    }

    fn urls(k: usize) -> Vec<String> {
        (0..k).map(|i| format!("img{i}")).collect()
    }

    #[test]
    fn test_zero_images_is_identity() {
        let blocks = paragraphs(4);
        let units = interleave(blocks.clone(), &[], "T");
        assert_eq!(units.len(), 4);
        for (unit, block) in units.iter().zip(&blocks) {
            assert_eq!(unit, &RenderUnit::Block(block.clone()));
        }
    }

    #[test]
    fn test_output_length_is_n_plus_k() {
        for n in 0..8 {
            for k in 0..=n {
                let units = interleave(paragraphs(n), &urls(k), "T");
                assert_eq!(units.len(), n + k, "n={n} k={k}");
            }
        }
    }

    #[test]
    fn test_images_preserve_order_and_numbering() {
        let units = interleave(paragraphs(6), &urls(3), "Photosynthesis");
        let captions: Vec<&str> = units
            .iter()
            .filter_map(|u| match u {
                RenderUnit::Image(img) => Some(img.caption.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(
            captions,
            vec![
                "Figure 1: Photosynthesis",
                "Figure 2: Photosynthesis",
                "Figure 3: Photosynthesis"
            ]
        );
    }

    fn image_positions(units: &[RenderUnit]) -> Vec<usize> {
        units
            .iter()
            .enumerate()
            .filter_map(|(i, u)| matches!(u, RenderUnit::Image(_)).then_some(i))
            .collect()
    }

    #[test]
    fn test_images_are_spread_not_clustered() {
        // 6 blocks, 2 images → insertion indices 2 and 4
        let units = interleave(paragraphs(6), &urls(2), "T");
        assert_eq!(image_positions(&units), vec![2, 5]);
    }

    #[test]
    fn test_spread_floors_whole_product() {
        // 5 blocks, 2 images → insertion indices floor(5/3)=1 and
        // floor(10/3)=3, not 1 and 2 as per-term flooring would give
        let units = interleave(paragraphs(5), &urls(2), "T");
        assert_eq!(image_positions(&units), vec![1, 4]);

        // 9 blocks, 4 images → 1, 3, 5, 7
        let units = interleave(paragraphs(9), &urls(4), "T");
        assert_eq!(image_positions(&units), vec![1, 4, 7, 10]);
    }

    #[test]
    fn test_tied_positions_emit_consecutively() {
        // 1 block, 2 images → both compute index 0 and keep their order
        let units = interleave(paragraphs(1), &urls(2), "T");
        assert!(matches!(&units[0], RenderUnit::Image(i) if i.url == "img0"));
        assert!(matches!(&units[1], RenderUnit::Image(i) if i.url == "img1"));
        assert!(matches!(&units[2], RenderUnit::Block(_)));
    }

    #[test]
    fn test_no_blocks_emits_images_only() {
        let units = interleave(vec![], &urls(2), "T");
        assert_eq!(units.len(), 2);
        assert!(units.iter().all(|u| matches!(u, RenderUnit::Image(_))));
    }
}
