//! Slide registry: the ordered, read-only list of slides a carousel cycles through.
//!
//! A registry comes from a TOML manifest:
//!
//! ```toml
//! [carousel]
//! autoplay_interval_ms = 4500
//!
//! [[slides]]
//! content = "artsuzani.jpg"
//! alt = "Vintage Suzani embroidery detail"
//! caption = "Vintage Suzani, handworked heritage"
//! ```
//!
//! or from a directory of images, sorted by file name.

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use serde::Deserialize;

use crate::config::CarouselConfig;
use crate::error::RegistryError;

const IMAGE_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "bmp", "gif"];

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SlideDescriptor {
    /// Opaque media reference. For file-backed slides this is a path.
    #[serde(rename = "content")]
    pub content_ref: String,
    #[serde(rename = "alt")]
    pub alt_text: String,
    #[serde(default)]
    pub caption: Option<String>,
}

impl SlideDescriptor {
    pub fn new(
        content_ref: impl Into<String>,
        alt_text: impl Into<String>,
        caption: Option<&str>,
    ) -> Self {
        Self {
            content_ref: content_ref.into(),
            alt_text: alt_text.into(),
            caption: caption.map(str::to_owned),
        }
    }
}

/// Immutable once built; the carousel only ever reads it by index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlideRegistry {
    slides: Vec<SlideDescriptor>,
}

impl SlideRegistry {
    pub fn new(slides: Vec<SlideDescriptor>) -> Self {
        Self { slides }
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&SlideDescriptor> {
        self.slides.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SlideDescriptor> {
        self.slides.iter()
    }
}

/// Everything a slide source provides: the slides plus the carousel settings that go with them.
#[derive(Debug, Clone, Default)]
pub struct Manifest {
    pub config: CarouselConfig,
    pub slides: SlideRegistry,
}

#[derive(Deserialize)]
struct ManifestFile {
    #[serde(default)]
    carousel: CarouselConfig,
    #[serde(default)]
    slides: Vec<SlideDescriptor>,
}

impl Manifest {
    /// Loads a manifest file, or scans a directory for images.
    pub fn load(path: &Path) -> Result<Self, RegistryError> {
        if path.is_dir() {
            let slides = scan_image_directory(path)?;
            info!("Loaded {} slides from directory {:?}", slides.len(), path);
            return Ok(Self { config: CarouselConfig::default(), slides });
        }

        let text = fs::read_to_string(path).map_err(|source| RegistryError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
        let manifest = Self::parse(&text, base_dir).map_err(|source| RegistryError::Manifest {
            path: path.to_path_buf(),
            source,
        })?;
        info!("Loaded {} slides from manifest {:?}", manifest.slides.len(), path);
        Ok(manifest)
    }

    /// Parses manifest text. Relative content paths resolve against `base_dir`.
    pub fn parse(text: &str, base_dir: &Path) -> Result<Self, toml::de::Error> {
        let file: ManifestFile = toml::from_str(text)?;
        let slides = file
            .slides
            .into_iter()
            .map(|slide| SlideDescriptor {
                content_ref: resolve_content(&slide.content_ref, base_dir),
                ..slide
            })
            .collect();
        Ok(Self { config: file.carousel, slides: SlideRegistry::new(slides) })
    }
}

fn resolve_content(content_ref: &str, base_dir: &Path) -> String {
    if content_ref.contains("://") || Path::new(content_ref).is_absolute() {
        content_ref.to_owned()
    } else {
        base_dir.join(content_ref).to_string_lossy().into_owned()
    }
}

/// Builds a registry from the image files of a directory, sorted by file name. A directory
/// without images gives an empty registry; only read failures are errors.
pub fn scan_image_directory(dir_path: &Path) -> Result<SlideRegistry, RegistryError> {
    let io_error = |source| RegistryError::Io { path: dir_path.to_path_buf(), source };

    let mut paths: Vec<PathBuf> = Vec::new();
    for entry in fs::read_dir(dir_path).map_err(io_error)? {
        let path = entry.map_err(io_error)?.path();
        if path.is_file() && has_image_extension(&path) {
            paths.push(path);
        } else {
            debug!("Skipping {:?}", path);
        }
    }
    paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    if paths.is_empty() {
        warn!("No image files found in {:?}", dir_path);
    }

    let slides = paths
        .into_iter()
        .map(|path| SlideDescriptor {
            alt_text: alt_text_from_stem(&path),
            content_ref: path.to_string_lossy().into_owned(),
            caption: None,
        })
        .collect();
    Ok(SlideRegistry::new(slides))
}

fn has_image_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

fn alt_text_from_stem(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
        .replace(['_', '-'], " ")
}
