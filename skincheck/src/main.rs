use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use glob::glob;
use guikit::{SkinFolder, SkinKind, Texture};
use image::Rgba;

#[derive(Parser)]
#[command(name = "skincheck", about = "Bitmap skin folder checker for guikit widgets")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check that a folder holds every image a widget kind loads
    Check {
        /// Path to the skin folder
        path: PathBuf,
        /// Widget kind the folder is meant for
        #[arg(long, value_enum)]
        kind: Kind,
        /// Image file extension
        #[arg(long, default_value = "png")]
        ext: String,
    },
    /// List every image in a folder with its dimensions
    Info {
        /// Path to the skin folder
        path: PathBuf,
    },
    /// Clean semi-transparent pixels from PNG images (hard cut alpha)
    Clean {
        /// Path to the skin folder
        path: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Kind {
    Button,
    Checkbox,
    Slider,
}

impl From<Kind> for SkinKind {
    fn from(kind: Kind) -> Self {
        match kind {
            Kind::Button => SkinKind::Button,
            Kind::Checkbox => SkinKind::CheckBox,
            Kind::Slider => SkinKind::Slider,
        }
    }
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Check { path, kind, ext } => cmd_check(&path, kind.into(), &ext),
        Commands::Info { path } => cmd_info(&path),
        Commands::Clean { path } => cmd_clean(&path),
    }
}

fn folder_pattern(folder: &Path, ext: &str) -> String {
    let folder = folder.to_string_lossy();
    format!("{}/*.{}", folder.trim_end_matches('/'), ext)
}

fn cmd_check(folder: &Path, kind: SkinKind, ext: &str) {
    let skin = SkinFolder::new(folder, ext);
    let mut problems = 0;

    for path in skin.missing_files(kind) {
        eprintln!("Missing: {}", path.display());
        problems += 1;
    }

    for name in kind.file_names() {
        let path = skin.file_path(name);
        if !path.is_file() {
            continue;
        }
        match Texture::from_path(&path) {
            Ok(texture) => println!("  ok {} ({}x{})", path.display(), texture.width(), texture.height()),
            Err(e) => {
                eprintln!("Unreadable: {}: {}", path.display(), e);
                problems += 1;
            }
        }
    }

    if problems > 0 {
        eprintln!("{} problem(s) in {}", problems, folder.display());
        std::process::exit(1);
    }
    println!("Skin {} is complete for {:?}", folder.display(), kind);
}

fn cmd_info(folder: &Path) {
    let pattern = format!("{}/*", folder.to_string_lossy().trim_end_matches('/'));
    let entries = glob(&pattern).unwrap_or_else(|e| {
        eprintln!("Invalid folder pattern {}: {}", pattern, e);
        std::process::exit(1);
    });

    for path in entries.flatten().filter(|path| path.is_file()) {
        match image::image_dimensions(&path) {
            Ok((width, height)) => println!("{}  {}x{}", path.display(), width, height),
            Err(_) => log::debug!("Skipping non-image {}", path.display()),
        }
    }
}

fn cmd_clean(folder: &Path) {
    let pattern = folder_pattern(folder, "png");
    println!("Cleaning images in: {}", pattern);

    let entries = glob(&pattern).unwrap_or_else(|e| {
        eprintln!("Invalid folder pattern {}: {}", pattern, e);
        std::process::exit(1);
    });

    for path in entries.flatten() {
        let mut img = match image::open(&path) {
            Ok(img) => img.into_rgba8(),
            Err(e) => {
                eprintln!("Failed to load {}: {}", path.display(), e);
                continue;
            }
        };

        let mut changed = false;
        for pixel in img.pixels_mut() {
            if pixel.0[3] < 255 && pixel.0 != [0, 0, 0, 0] {
                *pixel = Rgba([0, 0, 0, 0]);
                changed = true;
            }
        }

        if changed {
            match img.save(&path) {
                Ok(()) => println!("Fixed: {}", path.display()),
                Err(e) => eprintln!("Failed to save {}: {}", path.display(), e),
            }
        }
    }
}
