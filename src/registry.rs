//! Static biome and resource id tables.
//!
//! The biome table ships with the crate as a delimited text file
//! (`edid,hex-id,display name`) and is parsed once on first use. Ids that are
//! not in the table still resolve: they fall back to their decimal spelling,
//! so every biome can be labeled in a UI or a report.

use std::collections::HashMap;
use std::sync::OnceLock;

/// The twelve resource ids the game recognizes, in palette order.
///
/// A resource cell's palette index is its position in this table; membership
/// here (not the biome registry) decides whether a resource id can appear in
/// an editing image.
pub const KNOWN_RESOURCE_IDS: [u8; 12] = [8, 88, 0, 80, 1, 81, 2, 82, 3, 83, 4, 84];

/// Editor code and display name for a biome id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BiomeNames {
    /// Editor id string, e.g. "OceanBiomeMain".
    pub code: String,
    /// Human-readable name, e.g. "Ocean".
    pub name: String,
}

const BIOME_TABLE: &str = include_str!("../data/biomes.csv");

static REGISTRY: OnceLock<HashMap<u32, (String, String)>> = OnceLock::new();

fn registry() -> &'static HashMap<u32, (String, String)> {
    REGISTRY.get_or_init(|| {
        let mut map = HashMap::new();
        for line in BIOME_TABLE.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let mut parts = line.splitn(3, ',');
            let entry = (|| {
                let code = parts.next()?;
                let id = u32::from_str_radix(parts.next()?.trim(), 16).ok()?;
                let name = parts.next()?;
                Some((id, code.to_string(), name.to_string()))
            })();
            match entry {
                Some((id, code, name)) => {
                    map.insert(id, (code, name));
                }
                None => {
                    eprintln!("Warning: skipping malformed biome table row: {}", line);
                }
            }
        }
        map
    })
}

/// Look up the editor code and display name for a biome id.
///
/// Unknown ids resolve to their decimal spelling for both fields; this layer
/// never fails.
pub fn biome_names(id: u32) -> BiomeNames {
    match registry().get(&id) {
        Some((code, name)) => BiomeNames {
            code: code.clone(),
            name: name.clone(),
        },
        None => BiomeNames {
            code: id.to_string(),
            name: id.to_string(),
        },
    }
}

/// Palette position of a resource id, or `None` if the id is not one of the
/// twelve known resources.
pub fn resource_index(id: u8) -> Option<u8> {
    KNOWN_RESOURCE_IDS.iter().position(|&r| r == id).map(|i| i as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_biome_lookup() {
        let names = biome_names(0x0001889A);
        assert_eq!(names.code, "OceanBiomeMain");
        assert_eq!(names.name, "Ocean");
    }

    #[test]
    fn test_unknown_biome_falls_back_to_decimal() {
        let names = biome_names(0x2FF);
        assert_eq!(names.code, "767");
        assert_eq!(names.name, "767");
    }

    #[test]
    fn test_resource_index_follows_table_order() {
        assert_eq!(resource_index(8), Some(0));
        assert_eq!(resource_index(88), Some(1));
        assert_eq!(resource_index(0), Some(2));
        assert_eq!(resource_index(84), Some(11));
        assert_eq!(resource_index(7), None);
    }

    #[test]
    fn test_table_has_no_duplicate_ids() {
        assert_eq!(registry().len(), BIOME_TABLE.lines().filter(|l| !l.trim().is_empty()).count());
    }
}
