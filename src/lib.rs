//! # Planet Biom
//!
//! A Rust library for the planetary `.biom` biome/resource file format.
//!
//! ## Overview
//!
//! A `.biom` file stores two 256x256 hemisphere grids of biome ids and two of
//! resource ids. This library parses and rebuilds that binary layout and maps
//! the grids to and from a pair of palette-indexed 512x256 PNG images (South
//! hemisphere on the left half, North on the right) so surfaces can be edited
//! by hand in any raster tool.
//!
//! ## Quick Start
//!
//! ```ignore
//! use planet_biom::BiomFile;
//!
//! // Unpack a file into its editing images
//! let (mut file, images) = BiomFile::load_from_path("kreet.biom")?;
//! images.write_png_pair("work", "kreet")?;
//!
//! // ... paint kreet_biomes.png / kreet_resources.png ...
//!
//! // Absorb the edits and write the rebuilt binary
//! let edited = planet_biom::PlanetImages::read_png_pair("work", "kreet")?;
//! file.save_to_path("kreet.biom", &edited.biomes, &edited.resources)?;
//! ```
//!
//! Host applications should stay on the [`BiomFile`] surface; the binary
//! layout, grid orientation, and palette modules are exposed for tooling but
//! carry conventions that only make sense used together.

pub mod binary;
pub mod biom;
pub mod error;
pub mod grid;
pub mod palette;
pub mod registry;

// Re-export main types for convenience
pub use biom::{BiomFile, PlanetImages, PlanetManifest, UNASSIGNED_BIOME};
pub use error::{BiomError, Result};
pub use registry::{biome_names, BiomeNames, KNOWN_RESOURCE_IDS};
