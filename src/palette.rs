//! Shared color palette for index images.
//!
//! One fixed table serves every file: a biome or resource cell is painted
//! with the color at its palette index, and editing tools only need to place
//! exact palette colors to be understood on the way back in. Index 0 is
//! reserved for unassigned/background cells and is never given to a real id.

use std::collections::HashMap;

use image::{Rgb, RgbImage};

use crate::error::{BiomError, Result};

/// Process-wide color table. Entry 0 stays black so hand edits read well on a
/// dark background; the rest are chosen to stay distinguishable side by side.
pub const PALETTE: [[u8; 3]; 48] = [
    [0x00, 0x00, 0x00], // reserved: unassigned / background
    [0x1f, 0x77, 0xb4],
    [0xff, 0x7f, 0x0e],
    [0x2c, 0xa0, 0x2c],
    [0xd6, 0x27, 0x28],
    [0x94, 0x67, 0xbd],
    [0x8c, 0x56, 0x4b],
    [0xe3, 0x77, 0xc2],
    [0x7f, 0x7f, 0x7f],
    [0xbc, 0xbd, 0x22],
    [0x17, 0xbe, 0xcf],
    [0xae, 0xc7, 0xe8],
    [0xff, 0xbb, 0x78],
    [0x98, 0xdf, 0x8a],
    [0xff, 0x98, 0x96],
    [0xc5, 0xb0, 0xd5],
    [0xc4, 0x9c, 0x94],
    [0xf7, 0xb6, 0xd2],
    [0xc7, 0xc7, 0xc7],
    [0xdb, 0xdb, 0x8d],
    [0x9e, 0xda, 0xe5],
    [0x39, 0x3b, 0x79],
    [0x52, 0x54, 0xa3],
    [0x6b, 0x6e, 0xcf],
    [0x9c, 0x9e, 0xde],
    [0x63, 0x79, 0x39],
    [0x8c, 0xa2, 0x52],
    [0xb5, 0xcf, 0x6b],
    [0xce, 0xdb, 0x9c],
    [0x8c, 0x6d, 0x31],
    [0xbd, 0x9e, 0x39],
    [0xe7, 0xba, 0x52],
    [0xe7, 0xcb, 0x94],
    [0x84, 0x3c, 0x39],
    [0xad, 0x49, 0x4a],
    [0xd6, 0x61, 0x6b],
    [0xe7, 0x96, 0x9c],
    [0x7b, 0x41, 0x73],
    [0xa5, 0x51, 0x94],
    [0xce, 0x6d, 0xbd],
    [0xde, 0x9e, 0xd6],
    [0x31, 0x82, 0xbd],
    [0x6b, 0xae, 0xd6],
    [0x9e, 0xca, 0xe1],
    [0xc6, 0xdb, 0xef],
    [0xe6, 0x55, 0x0d],
    [0xfd, 0x8d, 0x3c],
    [0xfd, 0xae, 0x6b],
];

/// Render a flat row-major index plane as an RGB image.
///
/// Indices originate from the grid transform, so a value outside the palette
/// is a programming error and fails fast with [`BiomError::IndexOutOfRange`].
pub fn encode(indices: &[u8], width: u32, height: u32) -> Result<RgbImage> {
    if indices.len() != (width as usize) * (height as usize) {
        return Err(BiomError::GridLength {
            field: "indexPlane",
            expected: (width as usize) * (height as usize),
            actual: indices.len(),
        });
    }

    let mut image = RgbImage::new(width, height);
    for (i, &index) in indices.iter().enumerate() {
        let color = PALETTE
            .get(index as usize)
            .ok_or(BiomError::IndexOutOfRange {
                index: index as usize,
                limit: PALETTE.len(),
            })?;
        let x = (i as u32) % width;
        let y = (i as u32) / width;
        image.put_pixel(x, y, Rgb(*color));
    }
    Ok(image)
}

/// Match image pixels back to palette indices, row-major.
///
/// A pixel whose color has no exact palette match resolves to the reserved
/// index 0. Hand-painted input is untrusted but always decodable, so this
/// path never fails.
pub fn decode(image: &RgbImage) -> Vec<u8> {
    let reverse: HashMap<[u8; 3], u8> = PALETTE
        .iter()
        .enumerate()
        .map(|(i, color)| (*color, i as u8))
        .collect();

    image
        .pixels()
        .map(|pixel| reverse.get(&pixel.0).copied().unwrap_or(0))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_palette_colors_are_distinct() {
        let unique: HashSet<[u8; 3]> = PALETTE.iter().copied().collect();
        assert_eq!(unique.len(), PALETTE.len());
    }

    #[test]
    fn test_reserved_index_is_black() {
        assert_eq!(PALETTE[0], [0, 0, 0]);
    }

    #[test]
    fn test_encode_decode_round_trip() {
        let indices: Vec<u8> = (0..96usize).map(|i| (i % PALETTE.len()) as u8).collect();
        let image = encode(&indices, 12, 8).unwrap();
        assert_eq!(decode(&image), indices);
    }

    #[test]
    fn test_stray_color_decodes_to_reserved_index() {
        let mut image = encode(&[1, 2, 3, 4], 2, 2).unwrap();
        image.put_pixel(1, 1, Rgb([3, 141, 59])); // not a palette color
        assert_eq!(decode(&image), vec![1, 2, 3, 0]);
    }

    #[test]
    fn test_out_of_range_index_fails_fast() {
        let err = encode(&[0, 200], 2, 1).unwrap_err();
        assert!(matches!(
            err,
            BiomError::IndexOutOfRange { index: 200, limit } if limit == PALETTE.len()
        ));
    }

    #[test]
    fn test_length_mismatch_is_rejected() {
        let err = encode(&[0, 1, 2], 2, 2).unwrap_err();
        assert!(matches!(err, BiomError::GridLength { field: "indexPlane", .. }));
    }
}
