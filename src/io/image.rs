//! PNG export of tile material colours

use crate::io::error::{GridError, Result, invalid_configuration};
use image::{ImageBuffer, Rgba};
use ndarray::Array2;
use std::path::Path;

/// Export a colour map as a PNG, each tile a `pixels_per_tile` square
///
/// Row 0 is drawn at the top of the image.
///
/// # Errors
///
/// Returns an error if:
/// - The map is empty or `pixels_per_tile` is zero
/// - The image side would not fit in a `u32`
/// - The parent directory cannot be created
/// - The image cannot be saved to the specified path
pub fn export_colors_as_png(
    colors: &Array2<[u8; 4]>,
    pixels_per_tile: u32,
    output_path: &Path,
) -> Result<()> {
    if colors.is_empty() {
        return Err(invalid_configuration(
            "colors",
            &"0x0",
            &"there are no tiles to export",
        ));
    }
    if pixels_per_tile == 0 {
        return Err(invalid_configuration(
            "pixels_per_tile",
            &pixels_per_tile,
            &"must be at least 1",
        ));
    }

    let (rows, columns) = colors.dim();
    let width = scaled_side(columns, pixels_per_tile)?;
    let height = scaled_side(rows, pixels_per_tile)?;

    let img = ImageBuffer::from_fn(width, height, |px, py| {
        let row = (py / pixels_per_tile) as usize;
        let col = (px / pixels_per_tile) as usize;
        let rgba = colors.get([row, col]).copied().unwrap_or([0, 0, 0, 0]);
        Rgba(rgba)
    });

    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| GridError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }

    img.save(output_path)
        .map_err(|e| GridError::ImageExport {
            path: output_path.to_path_buf(),
            source: e,
        })?;

    Ok(())
}

fn scaled_side(tiles: usize, pixels_per_tile: u32) -> Result<u32> {
    u32::try_from(tiles)
        .ok()
        .and_then(|tiles| tiles.checked_mul(pixels_per_tile))
        .ok_or_else(|| {
            invalid_configuration(
                "pixels_per_tile",
                &pixels_per_tile,
                &format!("{tiles} tiles at this size overflow the image dimensions"),
            )
        })
}
