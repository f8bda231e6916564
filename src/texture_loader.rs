use std::fs;
use std::io::Cursor;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use exif::{In, Reader, Tag, Value};
use log::{debug, warn};
use raylib::prelude::*;

use carousel::SlideRegistry;

/// Loads one texture per slide. Slides that fail to load get `None` and render as a placeholder.
pub fn load_slide_textures(
    rl: &mut RaylibHandle,
    thread: &RaylibThread,
    registry: &SlideRegistry,
) -> Vec<Option<Texture2D>> {
    registry
        .iter()
        .map(|slide| {
            match load_texture_with_exif_rotation(rl, thread, Path::new(&slide.content_ref)) {
                Ok(texture) => Some(texture),
                Err(e) => {
                    warn!("Slide {:?} will show a placeholder: {:#}", slide.alt_text, e);
                    None
                }
            }
        })
        .collect()
}

// --- Load Image, Apply EXIF Rotation, Create Texture ---
pub fn load_texture_with_exif_rotation(
    rl: &mut RaylibHandle,
    thread: &RaylibThread,
    image_path: &Path,
) -> Result<Texture2D> {
    let file_bytes = fs::read(image_path)
        .with_context(|| format!("Failed to read file {:?}", image_path))?;

    let extension = image_path.extension().and_then(|s| s.to_str()).unwrap_or("").to_lowercase();
    let orientation = if extension == "jpg" || extension == "jpeg" {
        read_orientation(&file_bytes, image_path)
    } else {
        1
    };

    let mut image = Image::load_image_from_mem(&(".".to_string() + &extension), &file_bytes)
        .map_err(|e| anyhow!("Failed to load image data for {:?}: {}", image_path, e))?;

    // 1 = normal, 3 = 180 deg, 6 = 90 deg clockwise, 8 = 90 deg counter-clockwise.
    // Mirrored orientations are ignored.
    match orientation {
        3 => {
            image.rotate_cw();
            image.rotate_cw();
        }
        6 => image.rotate_cw(),
        8 => image.rotate_ccw(),
        _ => {}
    }
    if orientation != 1 {
        debug!("Applied EXIF orientation {} to {:?}", orientation, image_path);
    }

    let texture = rl
        .load_texture_from_image(thread, &image)
        .map_err(|e| anyhow!("Failed to create texture for {:?}: {}", image_path, e))?;

    // CPU copy is no longer needed once the texture is on the GPU
    drop(image);

    Ok(texture)
}

fn read_orientation(file_bytes: &[u8], image_path: &Path) -> u16 {
    match Reader::new().read_from_container(&mut Cursor::new(file_bytes)) {
        Ok(exif) => match exif.get_field(Tag::Orientation, In::PRIMARY).map(|f| &f.value) {
            Some(Value::Short(values)) => values.first().copied().unwrap_or(1),
            _ => 1,
        },
        Err(e) => {
            // Not fatal: the image is shown unrotated
            debug!("No EXIF data for {:?}: {}", image_path, e);
            1
        }
    }
}
