//! `.biom` file orchestration: load a binary blob into a pair of editable
//! images, absorb the edited pair back into a binary blob.
//!
//! A [`BiomFile`] is created empty or from bytes, used for one load or save,
//! and discarded; the images being edited live with the caller and come back
//! as explicit `save` parameters, never as state held here between calls.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

use image::RgbImage;
use serde::Deserialize;

use crate::binary::{self, GRID_FLAT};
use crate::error::{BiomError, Result};
use crate::grid::{self, IMAGE_HEIGHT, IMAGE_WIDTH};
use crate::palette;
use crate::registry::KNOWN_RESOURCE_IDS;

/// Biome id for cells no biome has claimed. Always renders as palette
/// index 0 and is never listed in the file's id table.
pub const UNASSIGNED_BIOME: u32 = 0;

/// In-memory contents of one `.biom` file.
///
/// Hemisphere grids are flat 65536-element row-major sequences, exactly as
/// stored on disk. After any save, every id occurring in the biome grids is a
/// member of `biome_ids`; the table is derived from grid contents, never
/// trusted as authoritative input.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BiomFile {
    /// Registered biome ids; position i maps to palette index i + 1.
    pub biome_ids: Vec<u32>,
    pub biome_grid_n: Vec<u32>,
    pub biome_grid_s: Vec<u32>,
    pub resrc_grid_n: Vec<u8>,
    pub resrc_grid_s: Vec<u8>,
}

/// The pair of palette-indexed 512x256 images handed out for editing,
/// South hemisphere on the left half and North on the right.
#[derive(Debug, Clone)]
pub struct PlanetImages {
    pub biomes: RgbImage,
    pub resources: RgbImage,
}

impl PlanetImages {
    /// Write the pair as `<name>_biomes.png` and `<name>_resources.png`.
    pub fn write_png_pair<P: AsRef<Path>>(&self, dir: P, name: &str) -> Result<()> {
        let dir = dir.as_ref();
        self.biomes.save(dir.join(format!("{}_biomes.png", name)))?;
        self.resources.save(dir.join(format!("{}_resources.png", name)))?;
        Ok(())
    }

    /// Read a pair written by [`write_png_pair`](Self::write_png_pair),
    /// possibly hand-edited in the meantime.
    pub fn read_png_pair<P: AsRef<Path>>(dir: P, name: &str) -> Result<Self> {
        let dir = dir.as_ref();
        let biomes = image::open(dir.join(format!("{}_biomes.png", name)))?.to_rgb8();
        let resources = image::open(dir.join(format!("{}_resources.png", name)))?.to_rgb8();
        Ok(Self { biomes, resources })
    }
}

/// Caller-supplied description of a planet to author from scratch.
#[derive(Debug, Clone, Deserialize)]
pub struct PlanetManifest {
    /// Human-assigned planet name, used for companion image file names.
    pub name: String,
    /// Desired biome ids, in palette order.
    pub biome_ids: Vec<u32>,
}

impl PlanetManifest {
    /// Load a manifest from a JSON file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }
}

fn check_biom_extension(path: &Path) -> Result<()> {
    if path.extension().map(|e| e == "biom").unwrap_or(false) {
        Ok(())
    } else {
        Err(BiomError::NotBiom(path.to_path_buf()))
    }
}

fn check_image_dimensions(image: &RgbImage) -> Result<()> {
    let (width, height) = image.dimensions();
    if (width, height) != (IMAGE_WIDTH, IMAGE_HEIGHT) {
        return Err(BiomError::ImageDimensions {
            expected_width: IMAGE_WIDTH,
            expected_height: IMAGE_HEIGHT,
            actual_width: width,
            actual_height: height,
        });
    }
    Ok(())
}

impl BiomFile {
    /// Parse a binary blob without rendering images.
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        binary::parse(bytes)
    }

    /// Build the binary blob for the current state.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        binary::build(self)
    }

    /// Parse a binary blob and render both editing images.
    pub fn load(bytes: &[u8]) -> Result<(Self, PlanetImages)> {
        let file = binary::parse(bytes)?;
        let images = file.render_images()?;
        Ok((file, images))
    }

    /// Read and load a `.biom` file from disk.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<(Self, PlanetImages)> {
        let path = path.as_ref();
        check_biom_extension(path)?;
        let bytes = fs::read(path)?;
        Self::load(&bytes)
    }

    /// Create a fresh file whose grids are fully covered by the first listed
    /// biome and the zero resource. Duplicate ids in the manifest collapse to
    /// their first occurrence.
    pub fn from_manifest(manifest: &PlanetManifest) -> Result<Self> {
        let mut biome_ids: Vec<u32> = Vec::new();
        for &id in &manifest.biome_ids {
            if id != UNASSIGNED_BIOME && !biome_ids.contains(&id) {
                biome_ids.push(id);
            }
        }
        let fill = *biome_ids.first().ok_or(BiomError::NoBiomes)?;
        Ok(Self {
            biome_ids,
            biome_grid_n: vec![fill; GRID_FLAT],
            biome_grid_s: vec![fill; GRID_FLAT],
            resrc_grid_n: vec![0; GRID_FLAT],
            resrc_grid_s: vec![0; GRID_FLAT],
        })
    }

    /// Biome ids in palette-index order, with the reserved unassigned slot
    /// at position 0. The id table never legitimately contains the
    /// unassigned id, but if one sneaks in it keeps its reserved meaning.
    fn palette_ids(&self) -> Vec<u32> {
        let mut ids = Vec::with_capacity(self.biome_ids.len() + 1);
        ids.push(UNASSIGNED_BIOME);
        for &id in &self.biome_ids {
            if id != UNASSIGNED_BIOME && !ids.contains(&id) {
                ids.push(id);
            }
        }
        ids
    }

    /// Render both hemisphere pairs into the combined editing images.
    ///
    /// Fails fast on any grid id that is absent from the active tables; no
    /// image is produced for a half-mappable file.
    pub fn render_images(&self) -> Result<PlanetImages> {
        let palette_ids = self.palette_ids();
        if palette_ids.len() > palette::PALETTE.len() {
            return Err(BiomError::IndexOutOfRange {
                index: palette_ids.len() - 1,
                limit: palette::PALETTE.len(),
            });
        }

        let biome_to_index: HashMap<u32, u8> = palette_ids
            .iter()
            .enumerate()
            .map(|(index, &id)| (id, index as u8))
            .collect();
        let resource_to_index: HashMap<u8, u8> = KNOWN_RESOURCE_IDS
            .iter()
            .enumerate()
            .map(|(index, &id)| (id, index as u8))
            .collect();

        let biome_n = grid::ids_to_indices(&self.biome_grid_n, &biome_to_index)?;
        let biome_s = grid::ids_to_indices(&self.biome_grid_s, &biome_to_index)?;
        let resrc_n = grid::ids_to_indices(&self.resrc_grid_n, &resource_to_index)?;
        let resrc_s = grid::ids_to_indices(&self.resrc_grid_s, &resource_to_index)?;

        let biome_plane = grid::combine_hemispheres(&biome_s, &biome_n)?;
        let resrc_plane = grid::combine_hemispheres(&resrc_s, &resrc_n)?;

        Ok(PlanetImages {
            biomes: palette::encode(&biome_plane, IMAGE_WIDTH, IMAGE_HEIGHT)?,
            resources: palette::encode(&resrc_plane, IMAGE_WIDTH, IMAGE_HEIGHT)?,
        })
    }

    /// Absorb a pair of edited images and build the final binary blob.
    ///
    /// Stray colors in the images decode to the unassigned index; an index
    /// with no id in the current tables is an error. The biome id table is
    /// recomputed from what the edit actually painted, so ids that no longer
    /// occur are dropped. State is replaced only after every step has
    /// succeeded; on error the file keeps its previous contents.
    pub fn save(&mut self, biomes: &RgbImage, resources: &RgbImage) -> Result<Vec<u8>> {
        check_image_dimensions(biomes)?;
        check_image_dimensions(resources)?;

        let biome_table = self.palette_ids();
        let (biome_s, biome_n) = grid::split_hemispheres(&palette::decode(biomes))?;
        let (resrc_s, resrc_n) = grid::split_hemispheres(&palette::decode(resources))?;

        let biome_grid_n = grid::indices_to_ids(&biome_n, &biome_table)?;
        let biome_grid_s = grid::indices_to_ids(&biome_s, &biome_table)?;
        let resrc_grid_n = grid::indices_to_ids(&resrc_n, &KNOWN_RESOURCE_IDS)?;
        let resrc_grid_s = grid::indices_to_ids(&resrc_s, &KNOWN_RESOURCE_IDS)?;

        let mut present: BTreeSet<u32> = biome_grid_n.iter().copied().collect();
        present.extend(biome_grid_s.iter().copied());
        present.remove(&UNASSIGNED_BIOME);

        let next = Self {
            biome_ids: present.into_iter().collect(),
            biome_grid_n,
            biome_grid_s,
            resrc_grid_n,
            resrc_grid_s,
        };
        let bytes = binary::build(&next)?;
        *self = next;
        Ok(bytes)
    }

    /// Save to disk: the blob is written only after the whole transform has
    /// succeeded in memory, so a failed save never leaves a partial file.
    pub fn save_to_path<P: AsRef<Path>>(
        &mut self,
        path: P,
        biomes: &RgbImage,
        resources: &RgbImage,
    ) -> Result<PathBuf> {
        let path = path.as_ref();
        check_biom_extension(path)?;
        let bytes = self.save(biomes, resources)?;
        fs::write(path, &bytes)?;
        Ok(path.to_path_buf())
    }

    /// Resource ids observed alongside each biome id, across both
    /// hemispheres. Diagnostic only; nothing here is persisted.
    pub fn resources_per_biome(&self) -> BTreeMap<u32, BTreeSet<u8>> {
        let mut map: BTreeMap<u32, BTreeSet<u8>> = BTreeMap::new();
        let hemispheres = [
            (&self.biome_grid_n, &self.resrc_grid_n),
            (&self.biome_grid_s, &self.resrc_grid_s),
        ];
        for (biomes, resources) in hemispheres {
            for (&biome, &resource) in biomes.iter().zip(resources.iter()) {
                map.entry(biome).or_default().insert(resource);
            }
        }
        map
    }
}
