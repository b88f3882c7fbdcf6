//! Planet Biom CLI
//!
//! Unpack `.biom` files into editable PNG pairs and pack them back.

use clap::{Parser, Subcommand};
use planet_biom::{biome_names, BiomFile, PlanetImages, PlanetManifest};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "planet-biom")]
#[command(author, version, about = "Edit planetary .biom files through palette-indexed images", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Unpack a .biom file into <name>_biomes.png and <name>_resources.png
    Unpack {
        /// Input .biom file
        #[arg(short, long)]
        input: PathBuf,

        /// Directory for the PNG pair (defaults to the input's directory)
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
    },

    /// Pack an edited PNG pair back into a .biom file
    Pack {
        /// The .biom file whose id tables the images were unpacked from
        #[arg(short, long)]
        input: PathBuf,

        /// Directory holding the PNG pair (defaults to the input's directory)
        #[arg(short, long)]
        images_dir: Option<PathBuf>,

        /// Output .biom path (defaults to overwriting the input)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Author a fresh .biom file from a JSON manifest
    New {
        /// Manifest file: {"name": "...", "biome_ids": [..]}
        #[arg(short, long)]
        manifest: PathBuf,

        /// Directory for the new .biom and its PNG pair
        #[arg(short, long, default_value = ".")]
        output_dir: PathBuf,
    },

    /// Show the id tables and per-biome resource usage of a .biom file
    Info {
        /// Input .biom file
        #[arg(short, long)]
        input: PathBuf,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Unpack { input, output_dir } => unpack(&input, output_dir.as_deref())?,
        Commands::Pack {
            input,
            images_dir,
            output,
        } => pack(&input, images_dir.as_deref(), output.as_deref())?,
        Commands::New {
            manifest,
            output_dir,
        } => author(&manifest, &output_dir)?,
        Commands::Info { input } => info(&input)?,
    }

    Ok(())
}

/// Planet name derived from the file stem, as the companion PNGs are named
/// after it.
fn planet_name(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "planet".to_string())
}

fn parent_dir(path: &Path) -> PathBuf {
    let dir = path.parent().unwrap_or(Path::new("."));
    if dir.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        dir.to_path_buf()
    }
}

fn unpack(input: &Path, output_dir: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let (file, images) = BiomFile::load_from_path(input)?;
    let name = planet_name(input);
    let dir = output_dir.map(Path::to_path_buf).unwrap_or_else(|| parent_dir(input));

    images.write_png_pair(&dir, &name)?;

    println!("Unpacked {:?}: {} biomes", input, file.biome_ids.len());
    println!("  {:?}", dir.join(format!("{}_biomes.png", name)));
    println!("  {:?}", dir.join(format!("{}_resources.png", name)));
    Ok(())
}

fn pack(
    input: &Path,
    images_dir: Option<&Path>,
    output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let (mut file, _) = BiomFile::load_from_path(input)?;
    let name = planet_name(input);
    let dir = images_dir.map(Path::to_path_buf).unwrap_or_else(|| parent_dir(input));

    let images = PlanetImages::read_png_pair(&dir, &name)?;
    let target = output.unwrap_or(input);
    file.save_to_path(target, &images.biomes, &images.resources)?;

    println!("Packed {:?}: {} biomes", target, file.biome_ids.len());
    Ok(())
}

fn author(manifest_path: &Path, output_dir: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let manifest = PlanetManifest::from_path(manifest_path)?;
    let file = BiomFile::from_manifest(&manifest)?;

    let biom_path = output_dir.join(format!("{}.biom", manifest.name));
    std::fs::write(&biom_path, file.to_bytes()?)?;
    file.render_images()?.write_png_pair(output_dir, &manifest.name)?;

    println!(
        "Authored {:?} with {} biomes, fully covered by {}",
        biom_path,
        file.biome_ids.len(),
        biome_names(file.biome_ids[0]).name
    );
    Ok(())
}

fn info(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let (file, _) = BiomFile::load_from_path(input)?;

    println!("{:?}", input);
    println!("  Biomes: {}", file.biome_ids.len());
    let per_biome = file.resources_per_biome();
    for &id in &file.biome_ids {
        let names = biome_names(id);
        let resources: Vec<String> = per_biome
            .get(&id)
            .map(|set| set.iter().map(|r| r.to_string()).collect())
            .unwrap_or_default();
        println!(
            "    {:#010x}  {} ({})  resources: [{}]",
            id,
            names.code,
            names.name,
            resources.join(", ")
        );
    }
    if let Some(unassigned) = per_biome_unassigned(&file) {
        println!("    unassigned cells: {}", unassigned);
    }
    Ok(())
}

fn per_biome_unassigned(file: &BiomFile) -> Option<usize> {
    let count = file
        .biome_grid_n
        .iter()
        .chain(file.biome_grid_s.iter())
        .filter(|&&id| id == planet_biom::UNASSIGNED_BIOME)
        .count();
    (count > 0).then_some(count)
}
