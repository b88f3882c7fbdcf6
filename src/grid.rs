//! Hemisphere grid orientation and id/index mapping.
//!
//! On disk a hemisphere is a flat row-major 256x256 sequence. For editing,
//! each hemisphere is rotated a quarter turn counter-clockwise and the two
//! are laid side by side in one 512x256 index plane: South on the left half,
//! North on the right. The convention is internal and pinned by the tests at
//! the bottom of this module; encode and decode must stay exact inverses of
//! each other, which matters more than how the result looks in any particular
//! renderer.

use std::collections::HashMap;
use std::hash::Hash;

use crate::binary::{GRID_DIM, GRID_FLAT};
use crate::error::{BiomError, Result};

/// Width of the combined two-hemisphere index plane.
pub const IMAGE_WIDTH: u32 = (GRID_DIM * 2) as u32;

/// Height of the combined index plane.
pub const IMAGE_HEIGHT: u32 = GRID_DIM as u32;

/// Map every id in a grid to its palette index.
///
/// Fails with [`BiomError::UnknownId`] on the first id that is missing from
/// the table; an id must be part of the file's active id set before it can be
/// rendered.
pub fn ids_to_indices<T>(grid: &[T], id_to_index: &HashMap<T, u8>) -> Result<Vec<u8>>
where
    T: Copy + Eq + Hash + Into<u32>,
{
    grid.iter()
        .map(|&id| {
            id_to_index
                .get(&id)
                .copied()
                .ok_or(BiomError::UnknownId { id: id.into() })
        })
        .collect()
}

/// Inverse of [`ids_to_indices`]: replace every palette index with the id at
/// that position in the table.
pub fn indices_to_ids<T: Copy>(indices: &[u8], index_to_id: &[T]) -> Result<Vec<T>> {
    indices
        .iter()
        .map(|&index| {
            index_to_id
                .get(index as usize)
                .copied()
                .ok_or(BiomError::IndexOutOfRange {
                    index: index as usize,
                    limit: index_to_id.len(),
                })
        })
        .collect()
}

/// Rotate a row-major square grid a quarter turn counter-clockwise.
fn rotate_ccw<T: Copy>(grid: &[T], dim: usize) -> Vec<T> {
    let mut out = Vec::with_capacity(dim * dim);
    for row in 0..dim {
        for col in 0..dim {
            out.push(grid[col * dim + (dim - 1 - row)]);
        }
    }
    out
}

/// Exact inverse of [`rotate_ccw`].
fn rotate_cw<T: Copy>(grid: &[T], dim: usize) -> Vec<T> {
    let mut out = Vec::with_capacity(dim * dim);
    for row in 0..dim {
        for col in 0..dim {
            out.push(grid[(dim - 1 - col) * dim + row]);
        }
    }
    out
}

fn check_flat(field: &'static str, actual: usize, expected: usize) -> Result<()> {
    if actual != expected {
        return Err(BiomError::GridLength {
            field,
            expected,
            actual,
        });
    }
    Ok(())
}

/// Lay two flat hemisphere index grids out as one 512-wide row-major plane,
/// South on the left half and North on the right, each rotated into image
/// orientation.
pub fn combine_hemispheres(south: &[u8], north: &[u8]) -> Result<Vec<u8>> {
    check_flat("south", south.len(), GRID_FLAT)?;
    check_flat("north", north.len(), GRID_FLAT)?;

    let south = rotate_ccw(south, GRID_DIM);
    let north = rotate_ccw(north, GRID_DIM);

    let mut plane = Vec::with_capacity(GRID_FLAT * 2);
    for row in 0..GRID_DIM {
        plane.extend_from_slice(&south[row * GRID_DIM..(row + 1) * GRID_DIM]);
        plane.extend_from_slice(&north[row * GRID_DIM..(row + 1) * GRID_DIM]);
    }
    Ok(plane)
}

/// Exact inverse of [`combine_hemispheres`]; returns `(south, north)` as flat
/// on-disk sequences.
pub fn split_hemispheres(plane: &[u8]) -> Result<(Vec<u8>, Vec<u8>)> {
    check_flat("plane", plane.len(), GRID_FLAT * 2)?;

    let mut south = Vec::with_capacity(GRID_FLAT);
    let mut north = Vec::with_capacity(GRID_FLAT);
    for row in 0..GRID_DIM {
        let base = row * GRID_DIM * 2;
        south.extend_from_slice(&plane[base..base + GRID_DIM]);
        north.extend_from_slice(&plane[base + GRID_DIM..base + 2 * GRID_DIM]);
    }
    Ok((rotate_cw(&south, GRID_DIM), rotate_cw(&north, GRID_DIM)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotate_ccw_corners() {
        // 4x4 row-major grid holding 0..16
        let grid: Vec<u8> = (0..16).collect();
        let rotated = rotate_ccw(&grid, 4);
        // top-left of the image is the end of the first source row
        assert_eq!(rotated[0], 3);
        assert_eq!(rotated[3], 15);
        assert_eq!(rotated[12], 0);
        assert_eq!(rotated[15], 12);
    }

    #[test]
    fn test_rotate_round_trip() {
        let grid: Vec<u8> = (0..16).collect();
        assert_eq!(rotate_cw(&rotate_ccw(&grid, 4), 4), grid);
        assert_eq!(rotate_ccw(&rotate_cw(&grid, 4), 4), grid);
    }

    #[test]
    fn test_hemisphere_halves_land_left_and_right() {
        let south = vec![1u8; GRID_FLAT];
        let north = vec![2u8; GRID_FLAT];
        let plane = combine_hemispheres(&south, &north).unwrap();
        assert_eq!(plane.len(), GRID_FLAT * 2);
        // first image row: South across the left half, North across the right
        assert_eq!(plane[0], 1);
        assert_eq!(plane[GRID_DIM - 1], 1);
        assert_eq!(plane[GRID_DIM], 2);
        assert_eq!(plane[2 * GRID_DIM - 1], 2);
    }

    #[test]
    fn test_combined_orientation_golden() {
        // Distinct markers in all four corners of each hemisphere pin the
        // rotation and the concatenation order.
        let mut south = vec![0u8; GRID_FLAT];
        let mut north = vec![0u8; GRID_FLAT];
        south[0] = 1; // row 0, col 0
        south[GRID_DIM - 1] = 2; // row 0, col 255
        south[GRID_FLAT - GRID_DIM] = 3; // row 255, col 0
        south[GRID_FLAT - 1] = 4; // row 255, col 255
        north[0] = 5;
        north[GRID_DIM - 1] = 6;

        let plane = combine_hemispheres(&south, &north).unwrap();
        let width = GRID_DIM * 2;

        // South's first-row end rotates to the image's top-left corner.
        assert_eq!(plane[0], 2);
        // South's last-row end lands top-right of the left half.
        assert_eq!(plane[GRID_DIM - 1], 4);
        // South's first-row start sinks to the bottom-left corner.
        assert_eq!(plane[(GRID_DIM - 1) * width], 1);
        assert_eq!(plane[(GRID_DIM - 1) * width + GRID_DIM - 1], 3);
        // North occupies the right half with the same orientation.
        assert_eq!(plane[GRID_DIM], 6);
        assert_eq!(plane[(GRID_DIM - 1) * width + GRID_DIM], 5);
    }

    #[test]
    fn test_combine_split_round_trip() {
        let south: Vec<u8> = (0..GRID_FLAT).map(|i| (i % 251) as u8).collect();
        let north: Vec<u8> = (0..GRID_FLAT).map(|i| (i % 239) as u8).collect();
        let plane = combine_hemispheres(&south, &north).unwrap();
        let (south2, north2) = split_hemispheres(&plane).unwrap();
        assert_eq!(south2, south);
        assert_eq!(north2, north);
    }

    #[test]
    fn test_unknown_id_is_rejected() {
        let mut table = HashMap::new();
        table.insert(0x100u32, 1u8);
        let err = ids_to_indices(&[0x100u32, 0x2FF], &table).unwrap_err();
        assert!(matches!(err, BiomError::UnknownId { id: 0x2FF }));
    }

    #[test]
    fn test_out_of_range_index_is_rejected() {
        let table = [0x100u32, 0x200];
        let err = indices_to_ids(&[0, 1, 2], &table).unwrap_err();
        assert!(matches!(err, BiomError::IndexOutOfRange { index: 2, limit: 2 }));
    }

    #[test]
    fn test_wrong_length_grid_is_rejected() {
        let err = combine_hemispheres(&[0u8; 10], &[0u8; 10]).unwrap_err();
        assert!(matches!(err, BiomError::GridLength { field: "south", .. }));
    }
}
